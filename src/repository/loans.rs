//! Loans repository for database operations

use chrono::NaiveDate;
use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanDetails},
};

/// Loan columns joined with the borrower's name and the book's title
const SELECT_DETAILS: &str = r#"
    SELECT p.id_prestamo, p.id_usuario, p.id_libro, p.fecha_prestamo, p.fecha_devolucion,
           u.nombre AS usuario_nombre, l.titulo AS libro_titulo
    FROM prestamos p
    JOIN usuarios u ON u.id_usuario = p.id_usuario
    JOIN libros l ON l.id_libro = p.id_libro
"#;

const LOAN_COLUMNS: &str = "id_prestamo, id_usuario, id_libro, fecha_prestamo, fecha_devolucion";

#[derive(Clone, Copy, Debug, Default)]
pub struct LoansRepository;

impl LoansRepository {
    /// Get loan by ID
    pub async fn find_by_id(&self, conn: &mut PgConnection, id: i64) -> AppResult<Option<LoanDetails>> {
        let loan = sqlx::query_as::<_, LoanDetails>(&format!("{} WHERE p.id_prestamo = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(loan)
    }

    /// List all loans
    pub async fn find_all(&self, conn: &mut PgConnection) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!("{} ORDER BY p.id_prestamo", SELECT_DETAILS))
            .fetch_all(conn)
            .await?;
        Ok(loans)
    }

    /// Loans taken by a user, returned or not
    pub async fn find_by_user(&self, conn: &mut PgConnection, user_id: i64) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{} WHERE p.id_usuario = $1 ORDER BY p.id_prestamo",
            SELECT_DETAILS
        ))
        .bind(user_id)
        .fetch_all(conn)
        .await?;
        Ok(loans)
    }

    /// Loans of a book, returned or not
    pub async fn find_by_book(&self, conn: &mut PgConnection, book_id: i64) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{} WHERE p.id_libro = $1 ORDER BY p.id_prestamo",
            SELECT_DETAILS
        ))
        .bind(book_id)
        .fetch_all(conn)
        .await?;
        Ok(loans)
    }

    /// Loans with no return date yet
    pub async fn find_outstanding(&self, conn: &mut PgConnection) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{} WHERE p.fecha_devolucion IS NULL ORDER BY p.id_prestamo",
            SELECT_DETAILS
        ))
        .fetch_all(conn)
        .await?;
        Ok(loans)
    }

    /// Insert a new outstanding loan
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        book_id: i64,
        loan_date: NaiveDate,
    ) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "INSERT INTO prestamos (id_usuario, id_libro, fecha_prestamo) VALUES ($1, $2, $3) RETURNING {}",
            LOAN_COLUMNS
        ))
        .bind(user_id)
        .bind(book_id)
        .bind(loan_date)
        .fetch_one(conn)
        .await?;
        Ok(loan)
    }

    /// Set the return date of an outstanding loan.
    ///
    /// Returns `None` when the loan is missing or already returned.
    pub async fn mark_returned(
        &self,
        conn: &mut PgConnection,
        id: i64,
        return_date: NaiveDate,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "UPDATE prestamos SET fecha_devolucion = $2 WHERE id_prestamo = $1 AND fecha_devolucion IS NULL RETURNING {}",
            LOAN_COLUMNS
        ))
        .bind(id)
        .bind(return_date)
        .fetch_optional(conn)
        .await?;
        Ok(loan)
    }

    /// Delete a loan, returning the removed row
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "DELETE FROM prestamos WHERE id_prestamo = $1 RETURNING {}",
            LOAN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(loan)
    }
}
