use serde::{Deserialize, Serialize};

/// Configuration for the access gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Where a denied visitor is sent.
    pub deny_redirect: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            deny_redirect: "/".into(),
        }
    }
}
