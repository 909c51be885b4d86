use std::fmt;

use serde::{Deserialize, Serialize};

/// Every operation a visitor can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    List,
    View,
    Edit,
    Save,
    NewForm,
    Create,
    Destroy,
    Copy,
    LoginForm,
    Login,
    Logout,
    SignupForm,
    Signup,
}

impl Operation {
    /// Operations that require a signed-in session.
    pub const GUARDED: [Operation; 6] = [
        Self::Edit,
        Self::Save,
        Self::NewForm,
        Self::Create,
        Self::Destroy,
        Self::Copy,
    ];

    pub fn is_guarded(self) -> bool {
        Self::GUARDED.contains(&self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
            Self::NewForm => "new-form",
            Self::Create => "create",
            Self::Destroy => "destroy",
            Self::Copy => "copy",
            Self::LoginForm => "login-form",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::SignupForm => "signup-form",
            Self::Signup => "signup",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_set() {
        for op in Operation::GUARDED {
            assert!(op.is_guarded(), "{op} should be guarded");
        }
        for op in [
            Operation::List,
            Operation::View,
            Operation::LoginForm,
            Operation::Login,
            Operation::Logout,
            Operation::SignupForm,
            Operation::Signup,
        ] {
            assert!(!op.is_guarded(), "{op} should be open");
        }
    }

    #[test]
    fn display() {
        assert_eq!(Operation::NewForm.to_string(), "new-form");
        assert_eq!(Operation::Destroy.to_string(), "destroy");
    }
}
