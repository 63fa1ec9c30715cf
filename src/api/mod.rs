//! API handlers for Biblioteca REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    routing::{get, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{error::AppError, AppState};

/// JSON body extractor that also runs the body's validation rules.
///
/// Malformed JSON, missing fields and rule violations all reject with
/// `400 Bad Request`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Path parameter extractor that rejects unparsable segments with the
/// JSON error body instead of axum's plain-text one.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(ApiPath(value))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Books
        .route("/libros", get(books::list_books).post(books::create_book))
        .route(
            "/libros/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        .route("/libros/autor/:nombre", get(books::list_books_by_author))
        .route("/libros/categoria/:categoria", get(books::list_books_by_category))
        // Authors
        .route("/autores", get(authors::list_authors).post(authors::create_author))
        .route(
            "/autores/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .route("/autores/nombre/:nombre", get(authors::get_author_by_name))
        // Users
        .route("/usuarios", get(users::list_users).post(users::create_user))
        .route(
            "/usuarios/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        // Loans
        .route("/prestamos", get(loans::list_loans).post(loans::create_loan))
        .route("/prestamos/pendientes", get(loans::list_outstanding_loans))
        .route("/prestamos/:id", get(loans::get_loan).delete(loans::delete_loan))
        .route("/prestamos/:id/devolucion", put(loans::return_loan))
        .route("/prestamos/usuario/:id", get(loans::list_user_loans))
        .route("/prestamos/libro/:id", get(loans::list_book_loans));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api)
        .fallback(route_not_found)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Ruta no encontrada".to_string())
}
