//! Minimal host used by the end-to-end tests.
//!
//! Plays the orchestrator's part: validates configuration against the
//! schema, plans from persisted state, calls the lifecycle entry points and
//! keeps the resulting state.

#![forbid(unsafe_code)]

use anyhow::{Context, bail};
use rust_common::{TracingConfig, init_tracing};
use tracing::info;
use vault_generic_config::{PlanAction, Resource, ResourceData};

/// Install a debug-level subscriber writing through the test harness.
pub fn init_test_tracing() {
    // Another test may already have installed it.
    let _ = init_tracing(&TracingConfig::default().with_log_level("debug").for_tests());
}

/// Drives one resource instance through its lifecycle.
pub struct Host<R> {
    resource: R,
    state: Option<ResourceData>,
}

impl<R: Resource> Host<R> {
    /// Host with no persisted state.
    pub const fn new(resource: R) -> Self {
        Self {
            resource,
            state: None,
        }
    }

    /// Managed resource.
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// Persisted state, if the instance exists.
    pub const fn state(&self) -> Option<&ResourceData> {
        self.state.as_ref()
    }

    /// Start from existing state, as after an import.
    pub fn with_state(mut self, state: ResourceData) -> Self {
        self.state = Some(state);
        self
    }

    /// Validate, refresh, plan and apply `config`, returning the action taken.
    ///
    /// # Errors
    ///
    /// Fails on validation errors or when a lifecycle call fails; state is
    /// left as it was before the failing call.
    pub async fn apply(&mut self, config: ResourceData) -> anyhow::Result<PlanAction> {
        let schema = self.resource.schema();
        let errors = schema.validate(&config);
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            bail!("invalid {} configuration: {}", schema.type_name, messages.join("; "));
        }

        // Imported state only carries the identity until refreshed.
        self.refresh().await?;
        let action = schema.plan(self.state.as_ref(), &config);
        info!(?action, "Planned change");

        match action {
            PlanAction::NoOp => {}
            PlanAction::Create => {
                let mut d = config;
                self.resource.create(&mut d).await.context("create")?;
                self.state = Some(schema.to_state(&d));
            }
            PlanAction::Update => {
                let mut d = config;
                if let Some(id) = self.state.as_ref().and_then(ResourceData::id) {
                    d.set_id(id);
                }
                self.resource.update(&mut d).await.context("update")?;
                self.state = Some(schema.to_state(&d));
            }
            PlanAction::Replace => {
                self.destroy().await?;
                let mut d = config;
                self.resource.create(&mut d).await.context("create")?;
                self.state = Some(schema.to_state(&d));
            }
        }

        Ok(action)
    }

    /// Reconcile persisted state through the resource's refresh.
    ///
    /// # Errors
    ///
    /// Fails when the refresh call fails.
    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        if let Some(state) = self.state.as_mut() {
            self.resource.refresh(state).await.context("refresh")?;
        }
        Ok(())
    }

    /// Destroy the instance and drop it from state.
    ///
    /// # Errors
    ///
    /// Fails when the destroy call fails; state is kept in that case.
    pub async fn destroy(&mut self) -> anyhow::Result<()> {
        let Some(mut state) = self.state.take() else {
            return Ok(());
        };

        if let Err(err) = self.resource.destroy(&mut state).await {
            self.state = Some(state);
            return Err(err).context("destroy");
        }
        Ok(())
    }
}
