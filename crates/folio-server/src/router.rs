use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use folio_cms::Cms;
use folio_session::SessionStore;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub cms: Arc<Cms>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(cms: Cms) -> Self {
        Self {
            cms: Arc::new(cms),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

/// Build the axum router with all Folio routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/new", get(handler::new_form).post(handler::create))
        .route("/users/login", get(handler::login_form).post(handler::login))
        .route("/users/logout", post(handler::logout))
        .route("/users/sign_up", get(handler::signup_form).post(handler::signup))
        .route("/:name", get(handler::view))
        .route("/:name/edit", get(handler::edit))
        .route("/:name/save", post(handler::save))
        .route("/:name/destroy", post(handler::destroy))
        .route("/:name/copy", post(handler::copy))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
