use std::sync::Arc;

use axum::extract::{Form, Path, State};
use axum::http::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use folio_cms::{Outcome, Request};
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;
use crate::session::Visit;
use crate::views;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveForm {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateForm {
    pub document_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Run a request against the visitor's session and build the response.
async fn dispatch(app: &AppState, headers: &HeaderMap, request: Request) -> ServerResult<Response> {
    let mut visit = Visit::begin(&app.sessions, headers);
    let cms = Arc::clone(&app.cms);

    // Store I/O and password hashing block.
    let (visit, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = cms.handle(&mut visit.state, request);
        (visit, outcome)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))?;

    let outcome = outcome?;
    let cookie = visit.finish(&app.sessions)?;
    let mut response = outcome_response(outcome);
    if let Some(cookie) = cookie {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(response)
}

fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Page(page) => {
            let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::OK);
            (status, Html(views::render_page(&page))).into_response()
        }
        Outcome::Redirect(to) => (StatusCode::FOUND, [(LOCATION, to)]).into_response(),
        Outcome::Content(rendered) => {
            ([(CONTENT_TYPE, rendered.content_type)], rendered.body).into_response()
        }
    }
}

pub async fn index(State(app): State<AppState>, headers: HeaderMap) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::List).await
}

pub async fn view(
    State(app): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::View { name }).await
}

pub async fn edit(
    State(app): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::Edit { name }).await
}

pub async fn save(
    State(app): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Form(form): Form<SaveForm>,
) -> ServerResult<Response> {
    let request = Request::Save {
        name,
        content: form.content,
    };
    dispatch(&app, &headers, request).await
}

pub async fn new_form(State(app): State<AppState>, headers: HeaderMap) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::NewForm).await
}

pub async fn create(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CreateForm>,
) -> ServerResult<Response> {
    let request = Request::Create {
        name: form.document_name,
    };
    dispatch(&app, &headers, request).await
}

pub async fn destroy(
    State(app): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::Destroy { name }).await
}

pub async fn copy(
    State(app): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::Copy { name }).await
}

pub async fn login_form(State(app): State<AppState>, headers: HeaderMap) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::LoginForm).await
}

pub async fn login(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> ServerResult<Response> {
    let request = Request::Login {
        username: form.username,
        password: form.password,
    };
    dispatch(&app, &headers, request).await
}

pub async fn logout(State(app): State<AppState>, headers: HeaderMap) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::Logout).await
}

pub async fn signup_form(State(app): State<AppState>, headers: HeaderMap) -> ServerResult<Response> {
    dispatch(&app, &headers, Request::SignupForm).await
}

pub async fn signup(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> ServerResult<Response> {
    let request = Request::Signup {
        username: form.username,
        password: form.password,
    };
    dispatch(&app, &headers, request).await
}
