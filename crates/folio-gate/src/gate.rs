use folio_session::SessionState;
use tracing::warn;

use crate::config::GateConfig;
use crate::operation::Operation;
use crate::stage::{GuardStage, StageDecision, StageResult};
use crate::stages::AuthenticationStage;

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// What the caller must do with the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    /// Run the operation.
    Allow,
    /// Skip the operation and redirect. The reason has already been stored
    /// as the session's error flash.
    Deny { redirect_to: String, reason: String },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// The full record of one pipeline evaluation.
#[derive(Clone, Debug)]
pub struct GateResult {
    pub operation: Operation,
    /// Per-stage results in evaluation order.
    pub stage_results: Vec<StageResult>,
    /// The reason given by the first denying stage, if any.
    pub denial: Option<String>,
}

impl GateResult {
    pub fn is_allowed(&self) -> bool {
        self.denial.is_none()
    }
}

// ---------------------------------------------------------------------------
// AccessGate
// ---------------------------------------------------------------------------

/// The access gate: a pipeline of guard stages every request passes
/// through before its operation body runs.
pub struct AccessGate {
    stages: Vec<Box<dyn GuardStage>>,
    config: GateConfig,
}

impl AccessGate {
    /// Create a gate with an empty pipeline, which allows everything.
    pub fn new(config: GateConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Create a gate with the standard pipeline: Authentication.
    pub fn with_default_stages(config: GateConfig) -> Self {
        let mut gate = Self::new(config);
        gate.add_stage(Box::new(AuthenticationStage));
        gate
    }

    /// Append a stage to the end of the pipeline.
    pub fn add_stage(&mut self, stage: Box<dyn GuardStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run the pipeline without side effects.
    ///
    /// The pipeline is **fail-fast**: the first denying stage stops
    /// evaluation.
    pub fn evaluate(&self, operation: Operation, session: &SessionState) -> GateResult {
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let decision = stage.evaluate(operation, session);
            let reason = match &decision {
                StageDecision::Pass => None,
                StageDecision::Deny { reason } => Some(reason.clone()),
            };
            stage_results.push(StageResult {
                stage_name: stage.name().to_string(),
                passed: reason.is_none(),
                reason: reason.clone(),
            });

            if reason.is_some() {
                return GateResult {
                    operation,
                    stage_results,
                    denial: reason,
                };
            }
        }

        GateResult {
            operation,
            stage_results,
            denial: None,
        }
    }

    /// Run the pipeline and apply a denial to the session.
    ///
    /// On denial the reason becomes the session's error flash and the
    /// caller must redirect without running the operation.
    pub fn check(&self, operation: Operation, session: &mut SessionState) -> AccessDecision {
        let result = self.evaluate(operation, session);
        match result.denial {
            None => AccessDecision::Allow,
            Some(reason) => {
                warn!(%operation, user = ?session.user(), "operation denied: {reason}");
                session.flash_error(reason.clone());
                AccessDecision::Deny {
                    redirect_to: self.config.deny_redirect.clone(),
                    reason,
                }
            }
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::with_default_stages(GateConfig::default())
    }
}
