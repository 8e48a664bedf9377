//! Host-facing schema contract.
//!
//! The host owns diffing and state persistence. This module describes the
//! attributes it needs to drive the resource: which are required, which
//! force replacement, and the validate and state hooks applied to values.

use crate::error::ResourceError;
use crate::json::{normalize_data_json, validate_data_json};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Attribute name of the Vault path.
pub const PATH: &str = "path";
/// Attribute name of the JSON payload.
pub const DATA_JSON: &str = "data_json";

/// Local validation hook; an empty list means the value is accepted.
pub type ValidateFn = fn(&str) -> Vec<ResourceError>;
/// Rewrites a value into the form stored in host state.
pub type StateFn = fn(&str) -> String;

/// One attribute of a resource schema.
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    /// Attribute name
    pub name: &'static str,
    /// Must be present in configuration
    pub required: bool,
    /// A change requires destroy and recreate
    pub force_new: bool,
    /// Human-readable description
    pub description: &'static str,
    /// Validation hook
    pub validate: Option<ValidateFn>,
    /// State hook
    pub state: Option<StateFn>,
}

impl AttributeSchema {
    /// Required string attribute without hooks.
    #[must_use]
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: true,
            force_new: false,
            description,
            validate: None,
            state: None,
        }
    }

    /// Mark the attribute as forcing replacement.
    #[must_use]
    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Attach a validation hook.
    #[must_use]
    pub const fn with_validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Attach a state hook.
    #[must_use]
    pub const fn with_state(mut self, state: StateFn) -> Self {
        self.state = Some(state);
        self
    }

    /// Value as it is kept in host state.
    #[must_use]
    pub fn state_value(&self, raw: &str) -> String {
        self.state.map_or_else(|| raw.to_string(), |state| state(raw))
    }
}

/// What the host has to do to move from prior state to configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    /// Nothing recorded yet
    Create,
    /// In-place overwrite
    Update,
    /// Destroy then create
    Replace,
    /// State already matches
    NoOp,
}

/// Schema of a managed resource.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    /// Resource type name
    pub type_name: &'static str,
    /// Attributes in declaration order
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Required-attribute and validate-hook checks over a configuration.
    #[must_use]
    pub fn validate(&self, config: &ResourceData) -> Vec<ResourceError> {
        let mut errors = Vec::new();
        for attr in &self.attributes {
            // A blank value counts as unset.
            match config.get(attr.name).filter(|v| !v.trim().is_empty()) {
                None if attr.required => errors.push(ResourceError::MissingAttribute(attr.name.to_string())),
                None => {}
                Some(value) => {
                    if let Some(validate) = attr.validate {
                        errors.extend(validate(value));
                    }
                }
            }
        }
        errors
    }

    /// Apply every state hook, producing what the host should persist.
    #[must_use]
    pub fn to_state(&self, config: &ResourceData) -> ResourceData {
        let mut state = config.clone();
        for attr in &self.attributes {
            if let Some(value) = config.get(attr.name) {
                state.set(attr.name, attr.state_value(value));
            }
        }
        state
    }

    /// Classify the change from `prior` state to `config`.
    ///
    /// Values are compared in state form, so a `data_json` that only differs
    /// in formatting is not a change.
    #[must_use]
    pub fn plan(&self, prior: Option<&ResourceData>, config: &ResourceData) -> PlanAction {
        let Some(prior) = prior.filter(|p| p.id().is_some()) else {
            return PlanAction::Create;
        };

        let mut action = PlanAction::NoOp;
        for attr in &self.attributes {
            let before = prior.get(attr.name).map(|v| attr.state_value(v));
            let after = config.get(attr.name).map(|v| attr.state_value(v));
            if before != after {
                if attr.force_new {
                    return PlanAction::Replace;
                }
                action = PlanAction::Update;
            }
        }
        action
    }
}

/// Schema of the generic config resource.
#[must_use]
pub fn generic_config_schema() -> ResourceSchema {
    ResourceSchema {
        type_name: "vault_generic_config",
        attributes: vec![
            AttributeSchema::required(PATH, "Full path where the generic config will be written.")
                .force_new(),
            // Arbitrary structure is allowed, so values are not forced to strings.
            AttributeSchema::required(DATA_JSON, "JSON-encoded config data to write.")
                .with_validate(validate_data_json)
                .with_state(normalize_data_json),
        ],
    }
}

/// Attribute values and identity of one resource instance, as handed over
/// by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceData {
    attributes: BTreeMap<String, String>,
    id: Option<String>,
}

impl ResourceData {
    /// Empty data with no identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Current identity, if the instance exists.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Record the identity.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Forget the identity; the host drops the instance from state.
    pub fn clear_id(&mut self) {
        self.id = None;
    }
}

/// Lifecycle entry points a host calls on a managed resource.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Schema the host validates and diffs against.
    fn schema(&self) -> ResourceSchema;

    /// Create the remote object and set the identity.
    async fn create(&self, d: &mut ResourceData) -> Result<(), ResourceError>;

    /// Apply an in-place change.
    async fn update(&self, d: &mut ResourceData) -> Result<(), ResourceError>;

    /// Reconcile state before planning.
    async fn refresh(&self, d: &mut ResourceData) -> Result<(), ResourceError>;

    /// Remove the remote object and clear the identity.
    async fn destroy(&self, d: &mut ResourceData) -> Result<(), ResourceError>;
}
