use anyhow::Result;
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use tracing::error;

use crate::auth::{AuthGate, Authenticator};
use crate::track_store::{DraftTrack, TrackPatch, TrackRepository};
use axum_extra::extract::cookie::{Cookie, SameSite};
use tower_http::services::ServeDir;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{response, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::session::Session;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub tracks_count: usize,
    pub session_token: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginSuccessResponse {
    token: String,
}

#[derive(Serialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Deserialize, Debug)]
struct UpdateTrackBody {
    id: Option<String>,
    #[serde(flatten)]
    patch: TrackPatch,
}

#[derive(Deserialize, Debug)]
struct DeleteTrackParams {
    id: Option<String>,
}

async fn home(session: Option<Session>, State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        tracks_count: state.repository.tracks_count(),
        session_token: session.map(|s| s.token),
    };
    Json(stats)
}

/// Public feed: allow-listed projection, featured first then newest.
async fn get_public_tracks(
    State(repository): State<SharedRepository>,
) -> Result<Response, ApiError> {
    let tracks = repository.list_public()?;
    Ok(Json(tracks).into_response())
}

/// Full admin listing, newest first.
async fn get_admin_tracks(
    _session: Session,
    State(repository): State<SharedRepository>,
) -> Result<Response, ApiError> {
    let tracks = repository.list()?;
    Ok(Json(tracks).into_response())
}

async fn post_track(
    _session: Session,
    State(repository): State<SharedRepository>,
    Json(draft): Json<DraftTrack>,
) -> Result<Response, ApiError> {
    let id = repository.create(draft)?;
    Ok(Json(CreatedResponse { id }).into_response())
}

async fn put_track(
    _session: Session,
    State(repository): State<SharedRepository>,
    Json(body): Json<UpdateTrackBody>,
) -> Result<Response, ApiError> {
    let id = body.id.unwrap_or_default();
    repository.update(&id, body.patch)?;
    Ok(StatusCode::OK.into_response())
}

async fn delete_track(
    _session: Session,
    State(repository): State<SharedRepository>,
    Query(params): Query<DeleteTrackParams>,
) -> Result<Response, ApiError> {
    let id = params.id.unwrap_or_default();
    repository.delete(&id)?;
    Ok(StatusCode::OK.into_response())
}

async fn login(
    State(auth_gate): State<GuardedAuthGate>,
    Json(body): Json<LoginBody>,
) -> Response {
    let token = auth_gate.lock().unwrap().login(&body.email, &body.password);
    match token {
        Some(token) => {
            let response_body = LoginSuccessResponse {
                token: token.value.0.clone(),
            };
            let response_body = serde_json::to_string(&response_body).unwrap();

            let cookie_value = HeaderValue::from_str(&format!(
                "session_token={}; Path=/; HttpOnly",
                token.value.0
            ))
            .unwrap();
            response::Builder::new()
                .status(StatusCode::CREATED)
                .header(axum::http::header::SET_COOKIE, cookie_value)
                .body(Body::from(response_body))
                .unwrap()
        }
        None => ApiError::Unauthorized.into_response(),
    }
}

async fn logout(State(auth_gate): State<GuardedAuthGate>, session: Session) -> Response {
    let deleted = auth_gate
        .lock()
        .unwrap()
        .logout(&crate::auth::SessionTokenValue(session.token));
    if !deleted {
        error!("Logout for a session that was not active");
    }

    let cookie_value = Cookie::build(Cookie::new("session_token", ""))
        .path("/")
        .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1)) // Expire it in the past
        .same_site(SameSite::Lax)
        .build();

    response::Builder::new()
        .status(StatusCode::OK)
        .header(axum::http::header::SET_COOKIE, cookie_value.to_string())
        .body(Body::empty())
        .unwrap()
}

impl ServerState {
    fn new(
        config: ServerConfig,
        repository: Arc<TrackRepository>,
        auth_gate: AuthGate,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            repository,
            auth_gate: Arc::new(Mutex::new(auth_gate)),
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    repository: Arc<TrackRepository>,
    authenticator: Box<dyn Authenticator>,
) -> Result<Router> {
    let auth_gate = AuthGate::new(authenticator);
    let state = ServerState::new(config.clone(), repository, auth_gate);

    let auth_routes: Router = Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
        .with_state(state.clone());

    let public_routes: Router = Router::new()
        .route("/tracks", get(get_public_tracks))
        .with_state(state.clone());

    let admin_routes: Router = Router::new()
        .route(
            "/tracks",
            get(get_admin_tracks)
                .post(post_track)
                .put(put_track)
                .delete(delete_track),
        )
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let app: Router = home_router
        .merge(public_routes)
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    config: ServerConfig,
    repository: Arc<TrackRepository>,
    authenticator: Box<dyn Authenticator>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, repository, authenticator)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AdminIdentity;
    use crate::track_store::{Track, TrackStore};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt; // for `oneshot`

    #[derive(Default)]
    struct EmptyTrackStore;

    impl TrackStore for EmptyTrackStore {
        fn insert_track(&self, _track: &Track) -> Result<()> {
            Ok(())
        }

        fn get_track(&self, _id: &str) -> Result<Option<Track>> {
            Ok(None)
        }

        fn list_tracks(&self) -> Result<Vec<Track>> {
            Ok(Vec::new())
        }

        fn update_track(&self, _track: &Track) -> Result<bool> {
            Ok(false)
        }

        fn delete_track(&self, _id: &str) -> Result<bool> {
            Ok(false)
        }

        fn tracks_count(&self) -> usize {
            0
        }
    }

    struct RejectAllAuthenticator;

    impl Authenticator for RejectAllAuthenticator {
        fn verify(&self, _email: &str, _password: &str) -> Option<AdminIdentity> {
            None
        }
    }

    fn test_app() -> Router {
        let repository = Arc::new(TrackRepository::new(Arc::new(EmptyTrackStore)));
        make_app(
            ServerConfig::default(),
            repository,
            Box::new(RejectAllAuthenticator),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn responds_unauthorized_on_protected_routes() {
        let app = test_app();

        let protected = vec![
            ("GET", "/admin/tracks"),
            ("POST", "/admin/tracks"),
            ("PUT", "/admin/tracks"),
            ("DELETE", "/admin/tracks?id=123"),
            ("GET", "/auth/logout"),
        ];

        for (method, route) in protected.into_iter() {
            println!("Trying route {} {}", method, route);
            let request = Request::builder()
                .method(method)
                .uri(route)
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn public_feed_needs_no_auth() {
        let app = test_app();

        let request = Request::builder()
            .uri("/tracks")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejected_login_is_unauthorized() {
        let app = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"email":"admin@example.com","password":"nope"}"#,
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
