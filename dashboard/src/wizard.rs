//! Onboarding wizard: one apply step per configuration category, in order.
//!
//! The persisted cursor is the highest step completed with every earlier step
//! also completed. Reaching a step needs the cursor past the previous step
//! and the step-required services of all earlier steps initialized right now.

use backend_client::{BackendClient, BackendError};
use dashboard_db::{Database, DbError};
use serde::Serialize;
use settings_schema::{ConfigCategory, FieldMap, ReadinessRequirement};

use crate::apply::{ApplyError, ApplyResult, SettingsCoordinator};
use crate::gate::ONBOARDING_PATH;

/// Categories in wizard order; step `i` edits `WIZARD_STEPS[i - 1]`.
pub const WIZARD_STEPS: [ConfigCategory; 4] = ConfigCategory::ALL;

/// Main entry point, reached once every step is done.
pub const MAIN_PATH: &str = "/";

/// A 1-based wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WizardStep(u8);

impl WizardStep {
    pub const COUNT: u8 = WIZARD_STEPS.len() as u8;

    pub fn new(index: u8) -> Result<Self, WizardError> {
        if (1..=Self::COUNT).contains(&index) {
            Ok(Self(index))
        } else {
            Err(WizardError::StepOutOfRange(index))
        }
    }

    pub fn first() -> Self {
        Self(1)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn category(self) -> ConfigCategory {
        WIZARD_STEPS[usize::from(self.0 - 1)]
    }

    /// Services that must be initialized before moving past this step.
    pub fn requirement(self) -> ReadinessRequirement {
        ReadinessRequirement::for_step(self.category())
    }

    pub fn path(self) -> String {
        format!("{ONBOARDING_PATH}/{}", self.0)
    }

    /// Steps before this one, in order.
    pub fn earlier(self) -> impl Iterator<Item = WizardStep> {
        (1..self.0).map(WizardStep)
    }

    pub fn next(self) -> WizardState {
        WizardState::from_cursor(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Step(WizardStep),
    Done,
}

impl WizardState {
    /// State following the highest completed step.
    pub fn from_cursor(cursor: u8) -> Self {
        if cursor >= WizardStep::COUNT {
            WizardState::Done
        } else {
            WizardState::Step(WizardStep(cursor + 1))
        }
    }

    pub fn path(self) -> String {
        match self {
            WizardState::Step(step) => step.path(),
            WizardState::Done => MAIN_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAccess {
    Allowed,
    /// Earliest step that is not complete.
    Redirect(WizardStep),
}

/// Result of submitting a step and where the wizard goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub result: ApplyResult,
    pub next: WizardState,
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error("local state error: {0}")]
    Store(#[from] DbError),

    #[error("backend unavailable: {0}")]
    Backend(#[from] BackendError),

    #[error("no wizard step {0}")]
    StepOutOfRange(u8),
}

pub struct WizardController {
    db: Database,
    backend: BackendClient,
    coordinator: SettingsCoordinator,
}

impl WizardController {
    pub fn new(db: Database, backend: BackendClient, coordinator: SettingsCoordinator) -> Self {
        Self {
            db,
            backend,
            coordinator,
        }
    }

    pub fn cursor(&self) -> Result<u8, WizardError> {
        Ok(self.db.wizard_cursor()?.min(WizardStep::COUNT))
    }

    pub fn current(&self) -> Result<WizardState, WizardError> {
        Ok(WizardState::from_cursor(self.cursor()?))
    }

    /// Where the wizard entry point leads. A finished wizard is re-checked
    /// against fresh status: a required service that stopped initializing
    /// after setup sends the user back to the earliest step that needs it.
    pub async fn resume(&self) -> Result<WizardState, WizardError> {
        let current = self.current()?;
        if current != WizardState::Done {
            return Ok(current);
        }

        let status = self.backend.services().await?;
        let failing = (1..=WizardStep::COUNT)
            .map(WizardStep)
            .find(|step| !step.requirement().is_satisfied_by(&status));
        let reopened = match failing {
            Some(step) => Some(step),
            None if !ReadinessRequirement::main_gate().is_satisfied_by(&status) => Some(WizardStep::first()),
            None => None,
        };

        Ok(match reopened {
            Some(step) => {
                tracing::info!(
                    step = step.index(),
                    unmet = ?step.requirement().unmet(&status),
                    "Completed wizard reopened"
                );
                WizardState::Step(step)
            }
            None => WizardState::Done,
        })
    }

    /// Whether `step` may be shown, checked against a fresh status map.
    pub async fn check_access(&self, step: WizardStep) -> Result<StepAccess, WizardError> {
        if step == WizardStep::first() {
            return Ok(StepAccess::Allowed);
        }
        let cursor = self.cursor()?;
        let status = self.backend.services().await?;

        let blocked = step
            .earlier()
            .find(|earlier| earlier.index() > cursor || !earlier.requirement().is_satisfied_by(&status));
        Ok(match blocked {
            Some(earlier) => {
                tracing::debug!(
                    step = step.index(),
                    cursor,
                    redirect = earlier.index(),
                    unmet = ?earlier.requirement().unmet(&status),
                    "Wizard step not reachable"
                );
                StepAccess::Redirect(earlier)
            }
            None => StepAccess::Allowed,
        })
    }

    /// Move the cursor for the outcome of an apply at `step`.
    pub fn record(&self, step: WizardStep, result: &ApplyResult) -> Result<WizardState, WizardError> {
        let cursor = self.cursor()?;
        let updated = if result.succeeded {
            cursor.max(step.index())
        } else {
            cursor.min(step.index() - 1)
        };
        if updated != cursor {
            self.db.set_wizard_cursor(updated)?;
        }
        Ok(if result.succeeded {
            step.next()
        } else {
            WizardState::Step(step)
        })
    }

    /// Apply the form submitted at `step` and advance on success.
    pub async fn submit(&self, step: WizardStep, fields: &FieldMap) -> Result<StepOutcome, WizardError> {
        let required = step.requirement().services;
        let result = self
            .coordinator
            .apply_form(step.category(), fields, &required)
            .await?;
        let next = self.record(step, &result)?;

        if result.succeeded {
            tracing::info!(step = step.index(), next = %next.path(), "Wizard step completed");
        } else {
            tracing::info!(
                step = step.index(),
                failed = ?result.failed_services,
                "Wizard step rejected"
            );
        }
        Ok(StepOutcome { result, next })
    }
}
