//! Book catalog endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{BookRequest, BookResponse},
    AppState,
};

use super::{ApiPath, ValidatedJson};

/// List all books
#[utoipa::path(
    get,
    path = "/api/libros",
    tag = "libros",
    responses(
        (status = 200, description = "All books", body = Vec<BookResponse>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.books.list_books().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/api/libros/{id}",
    tag = "libros",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/api/libros",
    tag = "libros",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input or unknown author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BookRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let created = state.services.books.create_book(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing book
#[utoipa::path(
    put,
    path = "/api/libros/{id}",
    tag = "libros",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid input or unknown author", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<BookRequest>,
) -> AppResult<Json<BookResponse>> {
    let updated = state.services.books.update_book(id, request).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/libros/{id}",
    tag = "libros",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List books by exact author name
#[utoipa::path(
    get,
    path = "/api/libros/autor/{nombre}",
    tag = "libros",
    params(
        ("nombre" = String, Path, description = "Author name (exact match)")
    ),
    responses(
        (status = 200, description = "Books by this author", body = Vec<BookResponse>)
    )
)]
pub async fn list_books_by_author(
    State(state): State<AppState>,
    ApiPath(author_name): ApiPath<String>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.books.list_books_by_author_name(&author_name).await?;
    Ok(Json(books))
}

/// List books by exact category
#[utoipa::path(
    get,
    path = "/api/libros/categoria/{categoria}",
    tag = "libros",
    params(
        ("categoria" = String, Path, description = "Category (exact match)")
    ),
    responses(
        (status = 200, description = "Books in this category", body = Vec<BookResponse>)
    )
)]
pub async fn list_books_by_category(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.books.list_books_by_category(&category).await?;
    Ok(Json(books))
}
