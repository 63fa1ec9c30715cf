//! Author management endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::author::{AuthorRequest, AuthorResponse},
    AppState,
};

use super::{ApiPath, ValidatedJson};

/// List all authors
#[utoipa::path(
    get,
    path = "/api/autores",
    tag = "autores",
    responses(
        (status = 200, description = "All authors", body = Vec<AuthorResponse>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<AuthorResponse>>> {
    let authors = state.services.authors.list_authors().await?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/api/autores/{id}",
    tag = "autores",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.get_author(id).await?;
    Ok(Json(author))
}

/// Get author by exact name
#[utoipa::path(
    get,
    path = "/api/autores/nombre/{nombre}",
    tag = "autores",
    params(
        ("nombre" = String, Path, description = "Author name (exact match)")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorResponse),
        (status = 404, description = "No author with this name", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author_by_name(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.get_author_by_name(&name).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/api/autores",
    tag = "autores",
    request_body = AuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AuthorRequest>,
) -> AppResult<(StatusCode, Json<AuthorResponse>)> {
    let created = state.services.authors.create_author(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing author
#[utoipa::path(
    put,
    path = "/api/autores/{id}",
    tag = "autores",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    request_body = AuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<AuthorRequest>,
) -> AppResult<Json<AuthorResponse>> {
    let updated = state.services.authors.update_author(id, request).await?;
    Ok(Json(updated))
}

/// Delete an author and their books
#[utoipa::path(
    delete,
    path = "/api/autores/{id}",
    tag = "autores",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.services.authors.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
