//! Settings application coordinator.
//!
//! One apply is a strict sequence against the backend: set, then save and
//! load only when every affected service initialized. A rejected set is
//! followed by a load that discards the rejected in-memory merge. Nothing is
//! retried and no step runs in parallel with another.

use std::fmt;

use backend_client::{BackendClient, BackendError};
use serde::Serialize;
use settings_schema::{
    ConfigCategory, ConfigFragment, FieldMap, PartialView, ServiceName, TransformError, diff_fields,
    extract, rebuild_changes,
};

/// Outcome of an apply the backend answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    pub succeeded: bool,
    pub failed_services: Vec<ServiceName>,
    pub persisted: bool,
}

impl ApplyResult {
    pub fn accepted() -> Self {
        Self {
            succeeded: true,
            failed_services: Vec::new(),
            persisted: true,
        }
    }

    pub fn rejected(failed_services: Vec<ServiceName>) -> Self {
        Self {
            succeeded: false,
            failed_services,
            persisted: false,
        }
    }
}

/// Backend call within an apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStep {
    Fetch,
    Set,
    Save,
    Load,
    Verify,
}

impl fmt::Display for ApplyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApplyStep::Fetch => "fetch",
            ApplyStep::Set => "set",
            ApplyStep::Save => "save",
            ApplyStep::Load => "load",
            ApplyStep::Verify => "verify",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("backend unavailable during {step}: {source}")]
    BackendUnavailable {
        step: ApplyStep,
        #[source]
        source: BackendError,
    },

    #[error("reloaded {category} settings differ from submitted values: {keys:?}")]
    RoundTripDrift {
        category: ConfigCategory,
        keys: Vec<String>,
    },

    #[error("invalid settings form: {0}")]
    Form(TransformError),

    #[error("settings schema error: {0}")]
    Schema(#[from] TransformError),
}

fn at(step: ApplyStep) -> impl FnOnce(BackendError) -> ApplyError {
    move |source| match source {
        BackendError::Schema(e) => ApplyError::Schema(e),
        source => ApplyError::BackendUnavailable { step, source },
    }
}

/// Runs the apply sequence against one backend.
#[derive(Clone)]
pub struct SettingsCoordinator {
    backend: BackendClient,
    verify_round_trip: bool,
}

impl SettingsCoordinator {
    pub fn new(backend: BackendClient, verify_round_trip: bool) -> Self {
        Self {
            backend,
            verify_round_trip,
        }
    }

    /// Apply a partial flat form on top of the backend's current values of
    /// `category`. Only changed keys are submitted. Services in `required`
    /// are expected in addition to the ones the changes activate.
    pub async fn apply_form(
        &self,
        category: ConfigCategory,
        submitted: &FieldMap,
        required: &[ServiceName],
    ) -> Result<ApplyResult, ApplyError> {
        PartialView::defaults(category)
            .with_fields(submitted)
            .map_err(ApplyError::Form)?;

        let document = self
            .backend
            .get_document(&[category])
            .await
            .map_err(at(ApplyStep::Fetch))?;
        let base = extract(&document, category);
        let view = base.with_fields(submitted).map_err(ApplyError::Form)?;

        let mut affected = view.affected_by_changes(&base)?;
        affected.extend_from_slice(required);
        affected.sort();
        affected.dedup();

        let fragment = rebuild_changes(&base, &view)?;
        self.apply(&fragment, &affected).await
    }

    /// Submit `fragment`, and persist it only if every service in `affected`
    /// initialized.
    ///
    /// An affected service missing from the backend's answer counts as failed.
    pub async fn apply(
        &self,
        fragment: &ConfigFragment,
        affected: &[ServiceName],
    ) -> Result<ApplyResult, ApplyError> {
        let category = fragment.category();
        tracing::info!(%category, services = ?affected, "Applying settings");

        let outcome = self
            .backend
            .set_settings(fragment)
            .await
            .map_err(at(ApplyStep::Set))?;

        let failed = outcome.statuses.failed_among(affected);
        if !failed.is_empty() || !outcome.success {
            tracing::warn!(
                %category,
                failed = ?failed,
                backend_success = outcome.success,
                "Settings rejected"
            );
            self.discard_rejected(category).await;
            return Ok(ApplyResult::rejected(failed));
        }

        self.backend
            .save_settings()
            .await
            .map_err(at(ApplyStep::Save))?;
        tracing::debug!(%category, step = %ApplyStep::Save, "Settings persisted");

        self.backend
            .load_settings()
            .await
            .map_err(at(ApplyStep::Load))?;
        tracing::debug!(%category, step = %ApplyStep::Load, "Settings reloaded");

        if self.verify_round_trip {
            self.verify(fragment).await?;
        }

        tracing::info!(%category, "Settings applied");
        Ok(ApplyResult::accepted())
    }

    /// Reload from storage so the rejected merge does not linger in memory.
    async fn discard_rejected(&self, category: ConfigCategory) {
        if let Err(e) = self.backend.load_settings().await {
            tracing::warn!(%category, "Failed to discard rejected settings: {e}");
        }
    }

    async fn verify(&self, fragment: &ConfigFragment) -> Result<(), ApplyError> {
        let category = fragment.category();
        let document = self
            .backend
            .get_document(&[category])
            .await
            .map_err(at(ApplyStep::Verify))?;

        let keys = diff_fields(fragment.view(), &extract(&document, category))?;
        if !keys.is_empty() {
            tracing::error!(%category, keys = ?keys, "Reloaded settings differ from submitted values");
            return Err(ApplyError::RoundTripDrift { category, keys });
        }
        Ok(())
    }
}
