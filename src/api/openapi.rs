//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblioteca API",
        version = "1.0.0",
        description = "Library books, authors, users and loans REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::list_books_by_author,
        books::list_books_by_category,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::get_author_by_name,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Loans
        loans::list_loans,
        loans::list_outstanding_loans,
        loans::get_loan,
        loans::list_user_loans,
        loans::list_book_loans,
        loans::create_loan,
        loans::return_loan,
        loans::delete_loan,
    ),
    components(
        schemas(
            // Books
            crate::models::book::BookRequest,
            crate::models::book::BookResponse,
            crate::models::book::BookSummary,
            // Authors
            crate::models::author::AuthorRequest,
            crate::models::author::AuthorResponse,
            // Users
            crate::models::user::UserRequest,
            crate::models::user::UserResponse,
            crate::models::user::UserSummary,
            // Loans
            crate::models::loan::LoanRequest,
            crate::models::loan::LoanResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "libros", description = "Book catalog"),
        (name = "autores", description = "Author management"),
        (name = "usuarios", description = "User management"),
        (name = "prestamos", description = "Loan management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
