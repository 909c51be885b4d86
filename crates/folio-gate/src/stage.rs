use folio_session::SessionState;

use crate::operation::Operation;

/// The outcome of a single guard stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageDecision {
    /// The stage passed; proceed to the next stage.
    Pass,
    /// The stage refused the operation. `reason` is shown to the visitor.
    Deny { reason: String },
}

impl StageDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Recorded result from a completed stage evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageResult {
    pub stage_name: String,
    pub passed: bool,
    pub reason: Option<String>,
}

/// A single check in the access pipeline.
///
/// Stages only inspect the session; the gate applies the side effects of a
/// denial. The trait is object-safe and `Send + Sync` so stages can be
/// stored in a `Vec<Box<dyn GuardStage>>`.
pub trait GuardStage: Send + Sync {
    /// Human-readable name of this stage (e.g., "authentication").
    fn name(&self) -> &str;

    fn evaluate(&self, operation: Operation, session: &SessionState) -> StageDecision;
}
