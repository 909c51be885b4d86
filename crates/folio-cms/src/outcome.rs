use folio_render::Rendered;
use folio_session::{Flash, SessionState};
use folio_types::DocumentName;

/// Status for a successfully rendered page.
pub const STATUS_OK: u16 = 200;

/// Status for a form re-rendered with a validation error.
pub const STATUS_UNPROCESSABLE: u16 = 422;

/// What to show on a rendered page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Index { documents: Vec<DocumentName> },
    Edit { name: DocumentName, content: String },
    NewDocument,
    Login { username: String },
    Signup { username: String },
}

/// A rendered page: the view plus everything the layout needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub view: View,
    pub status: u16,
    /// Messages consumed from the session for this page.
    pub flash: Flash,
    /// The signed-in username, if any.
    pub user: Option<String>,
}

impl Page {
    /// Build a page, consuming the session's pending flash.
    pub fn new(view: View, session: &mut SessionState) -> Self {
        Self {
            view,
            status: STATUS_OK,
            flash: session.take_flash(),
            user: session.user().map(str::to_owned),
        }
    }

    /// Mark the page as a rejected form and show `message` inline. The
    /// message is not stored in the session.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.status = STATUS_UNPROCESSABLE;
        self.flash.error = Some(message.into());
        self
    }
}

/// The result of handling a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Page(Page),
    /// Send the visitor elsewhere; pending flash survives to the next page.
    Redirect(String),
    /// A rendered document body. Does not consume the flash.
    Content(Rendered),
}

impl Outcome {
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect(to.into())
    }

    pub fn is_redirect_to(&self, path: &str) -> bool {
        matches!(self, Self::Redirect(to) if to == path)
    }
}
