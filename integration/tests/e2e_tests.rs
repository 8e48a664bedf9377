//! End-to-end tests: host, resource and HTTP client against a mocked Vault.

use serde_json::json;
use test_utils::fixtures::SampleConfig;
use vault_config_integration_tests::{Host, init_test_tracing};
use vault_generic_config::schema::{DATA_JSON, PATH};
use vault_generic_config::{
    DeletePolicy, GenericConfigResource, PlanAction, ResourceData, VaultClient, VaultConfig,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "s.e2e-token";

fn resource_for(server: &MockServer) -> GenericConfigResource<VaultClient> {
    let client = VaultClient::new(VaultConfig::new(server.uri(), TOKEN)).unwrap();
    GenericConfigResource::new(client)
}

fn config(path: &str, data_json: &str) -> ResourceData {
    ResourceData::new().with(PATH, path).with(DATA_JSON, data_json)
}

#[tokio::test]
async fn test_full_lifecycle() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;
    let sample = SampleConfig::cors();

    Mock::given(method("PUT"))
        .and(path("/v1/sys/config/cors"))
        .and(header("X-Vault-Token", TOKEN))
        .and(body_json(json!({
            "enabled": true,
            "allowed_origins": ["https://app.example.com", "https://admin.example.com"]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/sys/config/cors"))
        .and(body_json(json!({"enabled": false, "allowed_origins": []})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/sys/config/cors"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = Host::new(resource_for(&server));

    assert_eq!(host.apply(config(sample.path, sample.data_json)).await?, PlanAction::Create);
    let state = host.state().unwrap();
    assert_eq!(state.id(), Some(sample.path));
    assert_eq!(state.get(DATA_JSON), Some(sample.canonical));

    // Reformatting the same document is not a change.
    assert_eq!(host.apply(config(sample.path, sample.canonical)).await?, PlanAction::NoOp);

    let updated = r#"{"enabled": false, "allowed_origins": []}"#;
    assert_eq!(host.apply(config(sample.path, updated)).await?, PlanAction::Update);

    host.refresh().await?;
    assert_eq!(host.state().unwrap().id(), Some(sample.path));

    host.destroy().await?;
    assert!(host.state().is_none());
    Ok(())
}

#[tokio::test]
async fn test_path_change_replaces() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/secret/old"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = Host::new(resource_for(&server));
    host.apply(config("secret/old", r#"{"a": 1}"#)).await?;

    assert_eq!(host.apply(config("secret/new", r#"{"a": 1}"#)).await?, PlanAction::Replace);
    assert_eq!(host.state().unwrap().id(), Some("secret/new"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_json_never_reaches_vault() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut host = Host::new(resource_for(&server));
    let err = host.apply(config("secret/foo", "{invalid")).await.unwrap_err();
    assert!(err.to_string().contains("syntax error"));
    assert!(host.state().is_none());
}

#[tokio::test]
async fn test_write_failure_keeps_state_empty() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"errors": ["permission denied"]})),
        )
        .mount(&server)
        .await;

    let mut host = Host::new(resource_for(&server));
    let err = host.apply(config("secret/foo", r#"{"a": 1}"#)).await.unwrap_err();

    let chain = format!("{err:#}");
    assert!(chain.contains("error writing to Vault"), "{chain}");
    assert!(chain.contains("permission denied"), "{chain}");
    assert!(host.state().is_none());
}

#[tokio::test]
async fn test_destroy_succeeds_when_vault_fails() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let mut state = config("secret/foo", r#"{"a":1}"#);
    state.set_id("secret/foo");
    let mut host = Host::new(resource_for(&server)).with_state(state);

    host.destroy().await?;
    assert!(host.state().is_none());
    Ok(())
}

#[tokio::test]
async fn test_destroy_failure_kept_under_propagate_policy() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut state = config("secret/foo", r#"{"a":1}"#);
    state.set_id("secret/foo");
    let resource = resource_for(&server).with_delete_policy(DeletePolicy::Propagate);
    let mut host = Host::new(resource).with_state(state);

    assert!(host.destroy().await.is_err());
    assert_eq!(host.state().unwrap().id(), Some("secret/foo"));
}

#[tokio::test]
async fn test_destroy_already_absent() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resource = resource_for(&server).with_delete_policy(DeletePolicy::Propagate);
    assert!(matches!(
        resource.delete_outcome("secret/foo").await,
        vault_generic_config::DeleteOutcome::AlreadyAbsent
    ));
    resource.delete("secret/foo").await?;
    Ok(())
}

#[tokio::test]
async fn test_refresh_does_not_contact_vault() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = ResourceData::new();
    state.set_id("secret/imported");
    let mut host = Host::new(resource_for(&server)).with_state(state);

    host.refresh().await?;
    assert_eq!(host.state().unwrap().get(PATH), Some("secret/imported"));
    Ok(())
}

#[tokio::test]
async fn test_apply_over_imported_state_updates_in_place() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/secret/imported"))
        .and(body_json(json!({"a": 1})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = ResourceData::new();
    state.set_id("secret/imported");
    let mut host = Host::new(resource_for(&server)).with_state(state);

    assert_eq!(host.apply(config("secret/imported", r#"{"a": 1}"#)).await?, PlanAction::Update);
    let state = host.state().unwrap();
    assert_eq!(state.id(), Some("secret/imported"));
    assert_eq!(state.get(DATA_JSON), Some(r#"{"a":1}"#));
    Ok(())
}

#[tokio::test]
async fn test_blank_path_never_reaches_vault() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut host = Host::new(resource_for(&server));
    let err = host.apply(config("", "{}")).await.unwrap_err();
    assert!(err.to_string().contains("path"), "{err}");
    assert!(host.state().is_none());
}

#[tokio::test]
async fn test_fetch_reads_current_value() -> anyhow::Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"a": 2}})))
        .mount(&server)
        .await;

    let resource = resource_for(&server);
    let current = resource.fetch("secret/foo").await?.unwrap();
    assert_eq!(current.to_canonical_json(), r#"{"a":2}"#);
    Ok(())
}
