use std::sync::{Mutex, PoisonError};

use folio_auth::{hash_password, AuthError, CredentialStore, FileCredentialStore};
use folio_gate::{AccessDecision, AccessGate};
use folio_render::{ContentRenderer, RenderError};
use folio_session::SessionState;
use folio_store::{DocumentStore, FsDocumentStore, StoreError};
use folio_types::DocumentName;
use folio_validate::{validate_document_name, validate_signup, NameRules, ValidationError};
use tracing::{info, warn};

use crate::config::CmsConfig;
use crate::error::CmsResult;
use crate::outcome::{Outcome, Page, View};
use crate::request::Request;

/// Path of the document list.
pub const INDEX_PATH: &str = "/";

/// Path of the sign-in form.
pub const LOGIN_PATH: &str = "/users/login";

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const WELCOME: &str = "Welcome!";
const SIGNED_OUT: &str = "You have been signed out.";
const ACCOUNT_CREATED: &str = "Your account has been created. Please sign in.";

fn not_found_message(raw: &str) -> String {
    format!("The file '{raw}' couldn't be found.")
}

/// The Folio service.
///
/// `Cms` owns the stores and the access gate. Every request goes through
/// [`Cms::handle`], which consults the gate first and only runs the
/// operation when the gate allows it.
pub struct Cms {
    documents: Box<dyn DocumentStore>,
    credentials: Box<dyn CredentialStore>,
    gate: AccessGate,
    renderer: ContentRenderer,
    name_rules: NameRules,
    /// Held across read + validate + write of a sign-up.
    signup_lock: Mutex<()>,
}

impl Cms {
    pub fn new(documents: Box<dyn DocumentStore>, credentials: Box<dyn CredentialStore>) -> Self {
        Self {
            documents,
            credentials,
            gate: AccessGate::default(),
            renderer: ContentRenderer::new(),
            name_rules: NameRules::default(),
            signup_lock: Mutex::new(()),
        }
    }

    /// Open the directory and credential file selected by `config`.
    pub fn open(config: &CmsConfig) -> CmsResult<Self> {
        let documents = FsDocumentStore::open(config.data_dir())?;
        let credentials = FileCredentialStore::new(config.credentials_path());
        info!(
            environment = %config.environment,
            data = %config.data_dir().display(),
            "opened content store"
        );
        Ok(Self::new(Box::new(documents), Box::new(credentials))
            .with_name_rules(config.name_rules.clone())
            .with_renderer(ContentRenderer::new().with_extended_markdown(config.extended_markdown)))
    }

    pub fn with_gate(mut self, gate: AccessGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_renderer(mut self, renderer: ContentRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_name_rules(mut self, rules: NameRules) -> Self {
        self.name_rules = rules;
        self
    }

    pub fn documents(&self) -> &dyn DocumentStore {
        self.documents.as_ref()
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Handle one request against a visitor's session.
    ///
    /// Recoverable failures become flash messages or re-rendered forms; only
    /// I/O and hashing failures are returned as errors.
    pub fn handle(&self, session: &mut SessionState, request: Request) -> CmsResult<Outcome> {
        if let AccessDecision::Deny { redirect_to, .. } =
            self.gate.check(request.operation(), session)
        {
            return Ok(Outcome::Redirect(redirect_to));
        }

        match request {
            Request::List => self.list(session),
            Request::View { name } => self.view(session, &name),
            Request::Edit { name } => self.edit(session, &name),
            Request::Save { name, content } => self.save(session, &name, &content),
            Request::NewForm => Ok(Outcome::Page(Page::new(View::NewDocument, session))),
            Request::Create { name } => self.create(session, &name),
            Request::Destroy { name } => self.destroy(session, &name),
            Request::Copy { name } => self.copy(session, &name),
            Request::LoginForm => Ok(Outcome::Page(Page::new(
                View::Login {
                    username: String::new(),
                },
                session,
            ))),
            Request::Login { username, password } => self.login(session, &username, &password),
            Request::Logout => Ok(self.logout(session)),
            Request::SignupForm => Ok(Outcome::Page(Page::new(
                View::Signup {
                    username: String::new(),
                },
                session,
            ))),
            Request::Signup { username, password } => self.signup(session, &username, &password),
        }
    }

    // ---- Documents ----

    fn list(&self, session: &mut SessionState) -> CmsResult<Outcome> {
        let documents = self.documents.list()?;
        Ok(Outcome::Page(Page::new(View::Index { documents }, session)))
    }

    /// Resolve a raw name to an existing document.
    fn existing(&self, raw: &str) -> CmsResult<Option<DocumentName>> {
        let Ok(name) = DocumentName::parse(raw) else {
            return Ok(None);
        };
        Ok(self.documents.exists(&name)?.then_some(name))
    }

    fn not_found(&self, session: &mut SessionState, raw: &str) -> Outcome {
        session.flash_error(not_found_message(raw));
        Outcome::redirect(INDEX_PATH)
    }

    /// Map a store result, turning `NotFound` into the not-found redirect.
    fn or_not_found<T>(
        &self,
        session: &mut SessionState,
        raw: &str,
        result: Result<T, StoreError>,
    ) -> CmsResult<Result<T, Outcome>> {
        match result {
            Ok(value) => Ok(Ok(value)),
            Err(StoreError::NotFound(_)) => Ok(Err(self.not_found(session, raw))),
            Err(e) => Err(e.into()),
        }
    }

    fn view(&self, session: &mut SessionState, raw: &str) -> CmsResult<Outcome> {
        let Some(name) = self.existing(raw)? else {
            return Ok(self.not_found(session, raw));
        };
        let content = match self.or_not_found(session, raw, self.documents.read(&name))? {
            Ok(content) => content,
            Err(outcome) => return Ok(outcome),
        };
        match self.renderer.render(&name, &content) {
            Ok(rendered) => Ok(Outcome::Content(rendered)),
            Err(RenderError::Unsupported { name }) => {
                session.flash_error(format!("The file '{name}' can't be displayed."));
                Ok(Outcome::redirect(INDEX_PATH))
            }
        }
    }

    fn edit(&self, session: &mut SessionState, raw: &str) -> CmsResult<Outcome> {
        let Some(name) = self.existing(raw)? else {
            return Ok(self.not_found(session, raw));
        };
        let content = match self.or_not_found(session, raw, self.documents.read(&name))? {
            Ok(content) => String::from_utf8_lossy(&content).into_owned(),
            Err(outcome) => return Ok(outcome),
        };
        Ok(Outcome::Page(Page::new(View::Edit { name, content }, session)))
    }

    fn save(&self, session: &mut SessionState, raw: &str, content: &str) -> CmsResult<Outcome> {
        let Ok(name) = DocumentName::parse(raw) else {
            return Ok(self.not_found(session, raw));
        };
        self.documents.write(&name, content.as_bytes())?;
        info!(document = %name, user = ?session.user(), "document updated");
        session.flash_success(format!("The file {name} has been updated."));
        Ok(Outcome::redirect(INDEX_PATH))
    }

    fn create(&self, session: &mut SessionState, raw: &str) -> CmsResult<Outcome> {
        let trimmed = raw.trim();
        let rejected = |session: &mut SessionState, message: String| {
            Outcome::Page(Page::new(View::NewDocument, session).with_error(message))
        };

        if let Err(e) = validate_document_name(trimmed, &self.name_rules) {
            return Ok(rejected(session, e.to_string()));
        }
        let name = match DocumentName::parse(trimmed) {
            Ok(name) => name,
            Err(e) => return Ok(rejected(session, e.to_string())),
        };

        match self.documents.create(&name) {
            Ok(()) => {}
            Err(StoreError::AlreadyExists(name)) => {
                return Ok(rejected(session, format!("{name} already exists.")));
            }
            Err(e) => return Err(e.into()),
        }

        info!(document = %name, user = ?session.user(), "document created");
        session.flash_success(format!("{name} was created."));
        Ok(Outcome::redirect(INDEX_PATH))
    }

    fn destroy(&self, session: &mut SessionState, raw: &str) -> CmsResult<Outcome> {
        let Ok(name) = DocumentName::parse(raw) else {
            return Ok(self.not_found(session, raw));
        };
        if let Err(outcome) = self.or_not_found(session, raw, self.documents.delete(&name))? {
            return Ok(outcome);
        }
        info!(document = %name, user = ?session.user(), "document deleted");
        session.flash_success(format!("'{name}' was deleted."));
        Ok(Outcome::redirect(INDEX_PATH))
    }

    fn copy(&self, session: &mut SessionState, raw: &str) -> CmsResult<Outcome> {
        let Ok(name) = DocumentName::parse(raw) else {
            return Ok(self.not_found(session, raw));
        };
        match self.documents.copy(&name) {
            Ok(target) => {
                info!(source = %name, target = %target, "document copied");
                session.flash_success(format!("a copy of '{}' was created", name.base_name()));
            }
            Err(StoreError::NotFound(_)) => return Ok(self.not_found(session, raw)),
            Err(StoreError::AlreadyExists(target)) => {
                session.flash_error(format!("'{target}' already exists."));
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Outcome::redirect(INDEX_PATH))
    }

    // ---- Accounts ----

    fn login(&self, session: &mut SessionState, username: &str, password: &str) -> CmsResult<Outcome> {
        let username = username.trim();
        if self.credentials.verify(username, password)? {
            info!(user = username, "signed in");
            session.sign_in(username);
            session.flash_success(WELCOME);
            return Ok(Outcome::redirect(INDEX_PATH));
        }

        warn!(user = username, "failed sign-in attempt");
        let view = View::Login {
            username: username.to_string(),
        };
        Ok(Outcome::Page(Page::new(view, session).with_error(INVALID_CREDENTIALS)))
    }

    fn logout(&self, session: &mut SessionState) -> Outcome {
        if let Some(user) = session.user() {
            info!(user, "signed out");
        }
        session.clear();
        session.flash_success(SIGNED_OUT);
        Outcome::redirect(INDEX_PATH)
    }

    fn signup(&self, session: &mut SessionState, username: &str, password: &str) -> CmsResult<Outcome> {
        // Stored names never carry surrounding whitespace.
        let username = username.trim();
        let rejected = |session: &mut SessionState, e: ValidationError| {
            let view = View::Signup {
                username: username.to_string(),
            };
            Outcome::Page(Page::new(view, session).with_error(e.to_string()))
        };

        let _guard = self.signup_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = self.credentials.usernames()?;
        if let Err(e) = validate_signup(username, password, existing.iter().map(String::as_str)) {
            return Ok(rejected(session, e));
        }

        let hash = hash_password(password)?;
        match self.credentials.insert(username, &hash) {
            Ok(()) => {}
            Err(AuthError::UserExists(_)) => {
                return Ok(rejected(session, ValidationError::UsernameTaken));
            }
            Err(e) => return Err(e.into()),
        }

        info!(user = username, "account created");
        session.flash_success(ACCOUNT_CREATED);
        Ok(Outcome::redirect(LOGIN_PATH))
    }
}

impl std::fmt::Debug for Cms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cms")
            .field("gate_stages", &self.gate.stage_count())
            .field("name_rules", &self.name_rules)
            .finish()
    }
}
