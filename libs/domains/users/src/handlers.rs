use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use domain_notes::NoteRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, DeleteUser, MessageResponse, Role, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, update_user, delete_user),
    components(
        schemas(UserResponse, CreateUser, UpdateUser, DeleteUser, MessageResponse, Role),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User account management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router: all four operations are dispatched by HTTP
/// method on the single resource path
pub fn router<R, N>(service: UserService<R, N>) -> Router
where
    R: UserRepository + 'static,
    N: NoteRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "List of users, password hashes omitted", body = Vec<UserResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R, N>(
    State(service): State<Arc<UserService<R, N>>>,
) -> UserResult<Json<Vec<UserResponse>>>
where
    R: UserRepository,
    N: NoteRepository,
{
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R, N>(
    State(service): State<Arc<UserService<R, N>>>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    R: UserRepository,
    N: NoteRepository,
{
    let Json(input) = payload?;
    let user = service.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("New User {} created", user.username),
        }),
    ))
}

/// Update an existing user
#[utoipa::path(
    patch,
    path = "",
    tag = "Users",
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R, N>(
    State(service): State<Arc<UserService<R, N>>>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError>
where
    R: UserRepository,
    N: NoteRepository,
{
    let Json(input) = payload?;
    let user = service.update_user(input).await?;

    Ok(Json(MessageResponse {
        message: format!("{} updated", user.username),
    }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "",
    tag = "Users",
    request_body = DeleteUser,
    responses(
        (status = 200, description = "User deleted successfully", body = String),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R, N>(
    State(service): State<Arc<UserService<R, N>>>,
    payload: Result<Json<DeleteUser>, JsonRejection>,
) -> Result<Json<String>, AppError>
where
    R: UserRepository,
    N: NoteRepository,
{
    let Json(input) = payload?;
    let user = service.delete_user(input).await?;

    Ok(Json(format!(
        "Username {} with ID {} deleted",
        user.username, user.id
    )))
}
