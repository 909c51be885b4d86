use folio_gate::Operation;

/// A visitor's request, decoded from the transport.
///
/// Document names arrive raw; the service decides whether they are valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    List,
    View { name: String },
    Edit { name: String },
    Save { name: String, content: String },
    NewForm,
    Create { name: String },
    Destroy { name: String },
    Copy { name: String },
    LoginForm,
    Login { username: String, password: String },
    Logout,
    SignupForm,
    Signup { username: String, password: String },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Self::List => Operation::List,
            Self::View { .. } => Operation::View,
            Self::Edit { .. } => Operation::Edit,
            Self::Save { .. } => Operation::Save,
            Self::NewForm => Operation::NewForm,
            Self::Create { .. } => Operation::Create,
            Self::Destroy { .. } => Operation::Destroy,
            Self::Copy { .. } => Operation::Copy,
            Self::LoginForm => Operation::LoginForm,
            Self::Login { .. } => Operation::Login,
            Self::Logout => Operation::Logout,
            Self::SignupForm => Operation::SignupForm,
            Self::Signup { .. } => Operation::Signup,
        }
    }
}
