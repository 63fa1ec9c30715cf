//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::BookSummary, user::UserSummary};

/// Loan row from the `prestamos` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Loan {
    #[sqlx(rename = "id_prestamo")]
    pub id: i64,
    #[sqlx(rename = "id_usuario")]
    pub user_id: i64,
    #[sqlx(rename = "id_libro")]
    pub book_id: i64,
    #[sqlx(rename = "fecha_prestamo")]
    pub loan_date: NaiveDate,
    #[sqlx(rename = "fecha_devolucion")]
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    /// A loan is outstanding until its return date is set
    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Loan joined with its user name and book title
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LoanDetails {
    #[sqlx(flatten)]
    pub loan: Loan,
    #[sqlx(rename = "usuario_nombre")]
    pub user_name: String,
    #[sqlx(rename = "libro_titulo")]
    pub book_title: String,
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoanRequest {
    #[serde(rename = "idUsuario")]
    pub user_id: i64,
    #[serde(rename = "idLibro")]
    pub book_id: i64,
}

/// Loan as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanResponse {
    #[serde(rename = "idPrestamo")]
    pub id: i64,
    #[serde(rename = "usuario")]
    pub user: UserSummary,
    #[serde(rename = "libro")]
    pub book: BookSummary,
    #[serde(rename = "fechaPrestamo")]
    pub loan_date: NaiveDate,
    /// Null while the loan is outstanding
    #[serde(rename = "fechaDevolucion")]
    pub return_date: Option<NaiveDate>,
}

impl From<LoanDetails> for LoanResponse {
    fn from(row: LoanDetails) -> Self {
        Self {
            id: row.loan.id,
            user: UserSummary {
                id: row.loan.user_id,
                name: row.user_name,
            },
            book: BookSummary {
                id: row.loan.book_id,
                title: row.book_title,
            },
            loan_date: row.loan.loan_date,
            return_date: row.loan.return_date,
        }
    }
}
