//! Access control for Folio.
//!
//! Every request passes through the [`AccessGate`] before its operation
//! runs. The gate evaluates a configurable pipeline of [`GuardStage`]s
//! against the visitor's session. When a stage denies, the gate stores the
//! reason as the session's error flash and tells the caller to redirect;
//! the operation body never executes.
//!
//! # Quick Start
//!
//! ```rust
//! use folio_gate::{AccessDecision, AccessGate, Operation};
//! use folio_session::SessionState;
//!
//! let gate = AccessGate::default();
//! let mut session = SessionState::new();
//!
//! assert!(gate.check(Operation::View, &mut session).is_allowed());
//! assert!(!gate.check(Operation::Destroy, &mut session).is_allowed());
//! assert_eq!(
//!     session.take_flash().error.as_deref(),
//!     Some("You must be signed in to do that")
//! );
//! ```

pub mod config;
pub mod gate;
pub mod operation;
pub mod stage;
pub mod stages;

pub use config::GateConfig;
pub use gate::{AccessDecision, AccessGate, GateResult};
pub use operation::Operation;
pub use stage::{GuardStage, StageDecision, StageResult};
pub use stages::{AuthenticationStage, SIGN_IN_REQUIRED};
