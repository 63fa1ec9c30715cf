//! Loan management endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::loan::{LoanRequest, LoanResponse},
    AppState,
};

use super::{ApiPath, ValidatedJson};

/// List all loans
#[utoipa::path(
    get,
    path = "/api/prestamos",
    tag = "prestamos",
    responses(
        (status = 200, description = "All loans", body = Vec<LoanResponse>)
    )
)]
pub async fn list_loans(State(state): State<AppState>) -> AppResult<Json<Vec<LoanResponse>>> {
    let loans = state.services.loans.list_loans().await?;
    Ok(Json(loans))
}

/// List loans not yet returned
#[utoipa::path(
    get,
    path = "/api/prestamos/pendientes",
    tag = "prestamos",
    responses(
        (status = 200, description = "Outstanding loans", body = Vec<LoanResponse>)
    )
)]
pub async fn list_outstanding_loans(State(state): State<AppState>) -> AppResult<Json<Vec<LoanResponse>>> {
    let loans = state.services.loans.list_outstanding_loans().await?;
    Ok(Json(loans))
}

/// Get loan details by ID
#[utoipa::path(
    get,
    path = "/api/prestamos/{id}",
    tag = "prestamos",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan details", body = LoanResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_loan(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<LoanResponse>> {
    let loan = state.services.loans.get_loan(id).await?;
    Ok(Json(loan))
}

/// List loans of a user
#[utoipa::path(
    get,
    path = "/api/prestamos/usuario/{id}",
    tag = "prestamos",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Loans of the user", body = Vec<LoanResponse>)
    )
)]
pub async fn list_user_loans(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> AppResult<Json<Vec<LoanResponse>>> {
    let loans = state.services.loans.list_user_loans(user_id).await?;
    Ok(Json(loans))
}

/// List loans of a book
#[utoipa::path(
    get,
    path = "/api/prestamos/libro/{id}",
    tag = "prestamos",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Loans of the book", body = Vec<LoanResponse>)
    )
)]
pub async fn list_book_loans(
    State(state): State<AppState>,
    ApiPath(book_id): ApiPath<i64>,
) -> AppResult<Json<Vec<LoanResponse>>> {
    let loans = state.services.loans.list_book_loans(book_id).await?;
    Ok(Json(loans))
}

/// Lend a book to a user
#[utoipa::path(
    post,
    path = "/api/prestamos",
    tag = "prestamos",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan created", body = LoanResponse),
        (status = 400, description = "Unknown user or book, or no copy available", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoanRequest>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    let created = state.services.loans.create_loan(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/api/prestamos/{id}/devolucion",
    tag = "prestamos",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan returned", body = LoanResponse),
        (status = 400, description = "Loan already returned", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_loan(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<LoanResponse>> {
    let loan = state.services.loans.return_loan(id).await?;
    Ok(Json(loan))
}

/// Delete a loan
#[utoipa::path(
    delete,
    path = "/api/prestamos/{id}",
    tag = "prestamos",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_loan(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.services.loans.delete_loan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
