use utoipa::OpenApi;

/// Aggregated OpenAPI document for every operation the server exposes.
///
/// Generated from the `#[utoipa::path]` annotations next to the handlers.
/// The document describes the surface; the handlers do not enforce it.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Userbox API",
        description = "CRUD operations over an in-memory collection of user records",
        version = "0.1.0"
    ),
    paths(
        crate::web::home,
        crate::web::health_check,
        users::api::rest::handlers::list_users,
        users::api::rest::handlers::create_user,
        users::api::rest::handlers::get_user,
        users::api::rest::handlers::update_user,
        users::api::rest::handlers::delete_user,
    ),
    components(schemas(
        users::api::rest::dto::UserDto,
        users::api::rest::dto::CreateUserReq,
        users::api::rest::dto::UpdateUserReq,
    )),
    tags(
        (name = "service", description = "Service-level endpoints"),
        (name = "users", description = "User collection CRUD")
    )
)]
pub struct ApiDoc;
