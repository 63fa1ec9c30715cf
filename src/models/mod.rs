//! Data models for Biblioteca
//!
//! Each module holds the database row type plus the request/response DTOs
//! exposed on the wire. Wire field names follow the client contract
//! (`idLibro`, `titulo`, ...) while Rust fields stay in English.

pub mod author;
pub mod book;
pub mod loan;
pub mod user;

use validator::ValidationError;

// Re-export commonly used types
pub use author::{Author, AuthorRequest, AuthorResponse};
pub use book::{Book, BookRequest, BookResponse, BookSummary, BookWithAuthor};
pub use loan::{Loan, LoanDetails, LoanRequest, LoanResponse};
pub use user::{User, UserRequest, UserResponse, UserSummary};

/// Rejects strings made only of whitespace
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("no puede estar vacío".into());
        return Err(error);
    }
    Ok(())
}
