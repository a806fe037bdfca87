use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateUserReq, UpdateUserReq, UserDto};
use crate::domain::error::UsersError;
use crate::domain::service::Service;

/// Body served when a path id matches no record. Served at status 200:
/// existing clients of this API read the body, not the status line.
pub const USER_NOT_FOUND: &str = "User data not found.";

/// Name used in confirmations when a record carries no first name.
const UNNAMED: &str = "unknown";

fn error_response(e: &UsersError) -> Response {
    match e {
        UsersError::NotFound { .. } => USER_NOT_FOUND.into_response(),
        UsersError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
        }
    }
}

/// List every user, in insertion order.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "The full user collection", body = [UserDto])
    )
)]
pub async fn list_users(Extension(svc): Extension<Arc<Service>>) -> Response {
    info!("Listing users");

    match svc.list_users().await {
        Ok(users) => {
            let dto_users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
            Json(dto_users).into_response()
        }
        Err(e) => {
            error!("Failed to list users: {e}");
            error_response(&e)
        }
    }
}

/// Create a new user from whatever subset of fields the payload carries.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 200, description = "Confirmation naming the new user's first name",
         body = String, content_type = "text/plain")
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateUserReq>,
) -> Response {
    info!("Creating user");

    let first_name = req
        .first_name
        .clone()
        .unwrap_or_else(|| UNNAMED.to_string());

    match svc.create_user(req.into()).await {
        Ok(user) => {
            info!("Created user {}", user.id);
            format!("{first_name} has been added to the database.").into_response()
        }
        Err(e) => {
            error!("Failed to create user: {e}");
            error_response(&e)
        }
    }
}

/// Fetch a single user by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Id of the user to fetch")
    ),
    responses(
        (status = 200, description = "The matching record; a plaintext not-found message when no record matches", body = UserDto)
    )
)]
pub async fn get_user(Extension(svc): Extension<Arc<Service>>, Path(id): Path<Uuid>) -> Response {
    info!("Getting user {id}");

    match svc.get_user(id).await {
        Ok(user) => Json(UserDto::from(user)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Update an existing user with the fields present in the payload.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Id of the user to update")
    ),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "Confirmation naming the updated id; a plaintext not-found message when no record matches",
         body = String, content_type = "text/plain")
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserReq>,
) -> Response {
    info!("Updating user {id}");

    match svc.update_user(id, req.into()).await {
        Ok(_) => format!("User with the {id} has been updated.").into_response(),
        Err(e) => error_response(&e),
    }
}

/// Delete every record carrying the given id.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Id of the user to delete")
    ),
    responses(
        (status = 200, description = "Confirmation naming the deleted user; a plaintext not-found message when no record matches",
         body = String, content_type = "text/plain")
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Response {
    info!("Deleting user {id}");

    match svc.delete_user(id).await {
        Ok(removed) => {
            let name = removed.first_name.as_deref().unwrap_or(UNNAMED);
            format!("{name}'s data deleted successfully from database.").into_response()
        }
        Err(e) => error_response(&e),
    }
}
