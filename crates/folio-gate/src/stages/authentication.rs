use folio_session::SessionState;

use crate::operation::Operation;
use crate::stage::{GuardStage, StageDecision};

/// Message shown when an anonymous visitor attempts a guarded operation.
pub const SIGN_IN_REQUIRED: &str = "You must be signed in to do that";

/// Denies guarded operations to anonymous sessions.
pub struct AuthenticationStage;

impl GuardStage for AuthenticationStage {
    fn name(&self) -> &str {
        "authentication"
    }

    fn evaluate(&self, operation: Operation, session: &SessionState) -> StageDecision {
        if operation.is_guarded() && !session.is_authenticated() {
            return StageDecision::Deny {
                reason: SIGN_IN_REQUIRED.into(),
            };
        }
        StageDecision::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_guarded_is_denied() {
        let session = SessionState::new();
        let decision = AuthenticationStage.evaluate(Operation::Destroy, &session);
        assert_eq!(
            decision,
            StageDecision::Deny {
                reason: SIGN_IN_REQUIRED.into()
            }
        );
    }

    #[test]
    fn anonymous_open_operation_passes() {
        let session = SessionState::new();
        assert!(AuthenticationStage.evaluate(Operation::View, &session).is_pass());
        assert!(AuthenticationStage.evaluate(Operation::Signup, &session).is_pass());
    }

    #[test]
    fn signed_in_guarded_passes() {
        let mut session = SessionState::new();
        session.sign_in("bob");
        for op in Operation::GUARDED {
            assert!(AuthenticationStage.evaluate(op, &session).is_pass());
        }
    }
}
