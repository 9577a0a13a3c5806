use std::future::Future;

use amity_core::{CoreConfig, DEFAULT_HTTP_BIND};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{Friendship, NewUser, User, UserError, UserId, UserStore};

/// Name rendered in messages when a friend id no longer resolves.
pub const MISSING_USER_PLACEHOLDER: &str = "<unknown>";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub friends: Vec<UserId>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        NewUser::new(value.name, value.age).with_friends(value.friends)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeFriendsRequest {
    pub source_id: UserId,
    pub target_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub target_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAgeRequest {
    pub age: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    #[serde(rename = "userID")]
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendshipResponse {
    pub source_id: UserId,
    pub target_id: UserId,
    pub source_name: String,
    pub target_name: Option<String>,
    pub message: String,
}

impl From<Friendship> for FriendshipResponse {
    fn from(value: Friendship) -> Self {
        let message = format!(
            "{} and {} are friends now",
            value.source_name,
            value.target_name.as_deref().unwrap_or(MISSING_USER_PLACEHOLDER)
        );

        Self {
            source_id: value.source_id,
            target_id: value.target_id,
            source_name: value.source_name,
            target_name: value.target_name,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: UserId,
    pub name: String,
    pub message: String,
}

impl From<User> for DeletedResponse {
    fn from(value: User) -> Self {
        let message = format!("{} was deleted", value.name);
        Self {
            id: value.id,
            name: value.name,
            message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Clone)]
struct UserServiceState {
    store: UserStore,
}

/// Configuration for the user API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserServiceConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    DEFAULT_HTTP_BIND.to_string()
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl From<&CoreConfig> for UserServiceConfig {
    fn from(value: &CoreConfig) -> Self {
        Self {
            bind_address: value.http_bind.clone(),
        }
    }
}

/// Composes the REST API over a shared [`UserStore`].
#[derive(Clone)]
pub struct UserApiBuilder {
    state: UserServiceState,
}

impl UserApiBuilder {
    pub fn new(store: UserStore) -> Self {
        Self {
            state: UserServiceState { store },
        }
    }

    pub fn into_router(self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/create", post(create_user))
            .route("/make_friends", post(make_friends))
            .route("/delete", delete(delete_user))
            .route("/friends/:id", get(list_friends))
            .route("/:id", put(update_age))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    /// Serves the API on the configured address until `shutdown` resolves.
    pub async fn run<F>(self, config: UserServiceConfig, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
        serve_on(listener, self.into_router(), shutdown).await
    }

    /// Spawns an HTTP server binding to the configured address.
    ///
    /// Dropping or firing the returned sender shuts the server down.
    pub async fn serve(self, config: UserServiceConfig) -> anyhow::Result<oneshot::Sender<()>> {
        let (tx, rx) = oneshot::channel();
        let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
        let app = self.into_router();

        tokio::spawn(async move {
            let shutdown = async move {
                let _ = rx.await;
            };
            if let Err(err) = serve_on(listener, app, shutdown).await {
                warn!(?err, "user service terminated with error");
            }
        });

        Ok(tx)
    }
}

async fn serve_on<F>(listener: tokio::net::TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    info!(%address, "starting user service");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(%address, "user service stopped");
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_user(
    State(state): State<UserServiceState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), UserError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let user_id = state.store.add(request.into());
    Ok((StatusCode::CREATED, Json(CreatedResponse { user_id })))
}

async fn make_friends(
    State(state): State<UserServiceState>,
    payload: Result<Json<MakeFriendsRequest>, JsonRejection>,
) -> Result<Json<FriendshipResponse>, UserError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let friendship = state
        .store
        .make_friends(request.source_id, request.target_id)?;
    Ok(Json(friendship.into()))
}

async fn delete_user(
    State(state): State<UserServiceState>,
    payload: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> Result<Json<DeletedResponse>, UserError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let removed = state.store.delete_user(request.target_id)?;
    Ok(Json(removed.into()))
}

async fn list_friends(
    State(state): State<UserServiceState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Vec<Option<String>>>, UserError> {
    let Path(id) = id.map_err(invalid_path)?;
    let names = state.store.list_friend_names(UserId::new(id))?;
    Ok(Json(names))
}

async fn update_age(
    State(state): State<UserServiceState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdateAgeRequest>, JsonRejection>,
) -> Result<Json<User>, UserError> {
    let Path(id) = id.map_err(invalid_path)?;
    let Json(request) = payload.map_err(invalid_body)?;
    let user = state.store.update_age(UserId::new(id), request.age)?;
    Ok(Json(user))
}

fn invalid_body(rejection: JsonRejection) -> UserError {
    UserError::validation(rejection.body_text())
}

fn invalid_path(rejection: PathRejection) -> UserError {
    UserError::validation(format!("error parsing user id: {}", rejection.body_text()))
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = match &self {
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::Validation(_) => StatusCode::BAD_REQUEST,
            UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "request failed");

        let body = Json(ErrorResponse {
            code: self.code().into(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
