use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestQueryResponse, BadRequestResponse, BadRequestUuidResponse,
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{DateRange, RenameUser, User, UserPayload};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_user,
        users_by_birth_date,
        get_user,
        replace_user,
        rename_user,
        delete_user,
    ),
    components(
        schemas(User, UserPayload, RenameUser, DateRange),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestQueryResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_user))
        .route("/filter", get(users_by_birth_date))
        .route(
            "/{id}",
            get(get_user)
                .put(replace_user)
                .patch(rename_user)
                .delete(delete_user),
        )
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<UserPayload>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Search users by birth date
#[utoipa::path(
    get,
    path = "/filter",
    tag = TAG,
    params(DateRange),
    responses(
        (status = 200, description = "Users born within the inclusive range", body = Vec<User>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn users_by_birth_date<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(range): ValidatedQuery<DateRange>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.users_by_birth_date(range.from, range.to).await?;
    Ok(Json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<User>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace every field of a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User replaced successfully", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UserPayload>,
) -> UserResult<Json<User>> {
    let user = service.replace_user(id, input).await?;
    Ok(Json(user))
}

/// Change a user's first and last name
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID"),
        RenameUser
    ),
    responses(
        (status = 200, description = "User renamed successfully"),
        (status = 400, response = BadRequestQueryResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn rename_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedQuery(input): ValidatedQuery<RenameUser>,
) -> UserResult<impl IntoResponse> {
    service
        .rename_user(id, input.first_name, input.last_name)
        .await?;
    Ok(StatusCode::OK)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
