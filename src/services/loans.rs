//! Loan management service
//!
//! A loan takes one copy of the book off the shelf and returning it puts the
//! copy back, so `cantidad_disponible` always counts the copies not lent out.

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::loan::{LoanRequest, LoanResponse},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

fn loan_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Préstamo no encontrado con ID: {}", id))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every loan
    pub async fn list_loans(&self) -> AppResult<Vec<LoanResponse>> {
        let mut tx = self.repository.begin().await?;
        let loans = self.repository.loans.find_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    /// Get a loan by ID
    pub async fn get_loan(&self, id: i64) -> AppResult<LoanResponse> {
        let mut tx = self.repository.begin().await?;
        let loan = self
            .repository
            .loans
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| loan_not_found(id))?;
        tx.commit().await?;
        Ok(loan.into())
    }

    /// Loans of a user
    pub async fn list_user_loans(&self, user_id: i64) -> AppResult<Vec<LoanResponse>> {
        let mut tx = self.repository.begin().await?;
        let loans = self.repository.loans.find_by_user(&mut *tx, user_id).await?;
        tx.commit().await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    /// Loans of a book
    pub async fn list_book_loans(&self, book_id: i64) -> AppResult<Vec<LoanResponse>> {
        let mut tx = self.repository.begin().await?;
        let loans = self.repository.loans.find_by_book(&mut *tx, book_id).await?;
        tx.commit().await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    /// Loans not yet returned
    pub async fn list_outstanding_loans(&self) -> AppResult<Vec<LoanResponse>> {
        let mut tx = self.repository.begin().await?;
        let loans = self.repository.loans.find_outstanding(&mut *tx).await?;
        tx.commit().await?;
        Ok(loans.into_iter().map(LoanResponse::from).collect())
    }

    /// Lend a copy of a book to a user, dated today
    pub async fn create_loan(&self, request: LoanRequest) -> AppResult<LoanResponse> {
        let mut tx = self.repository.begin().await?;

        if self.repository.users.find_by_id(&mut *tx, request.user_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Usuario no encontrado con ID: {}",
                request.user_id
            )));
        }

        if self.repository.books.find_by_id(&mut *tx, request.book_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Libro no encontrado con ID: {}",
                request.book_id
            )));
        }

        if !self.repository.books.take_copy(&mut *tx, request.book_id).await? {
            return Err(AppError::BadRequest(format!(
                "No hay ejemplares disponibles del libro con ID: {}",
                request.book_id
            )));
        }

        let loan = self
            .repository
            .loans
            .insert(&mut *tx, request.user_id, request.book_id, today())
            .await?;

        let details = self
            .repository
            .loans
            .find_by_id(&mut *tx, loan.id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Loan {} vanished after insert", loan.id)))?;
        tx.commit().await?;

        tracing::info!(
            loan_id = loan.id,
            user_id = request.user_id,
            book_id = request.book_id,
            "Loan created"
        );
        Ok(details.into())
    }

    /// Mark a loan as returned today and restock the book
    pub async fn return_loan(&self, id: i64) -> AppResult<LoanResponse> {
        let mut tx = self.repository.begin().await?;

        let current = self
            .repository
            .loans
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| loan_not_found(id))?;

        if !current.loan.is_outstanding() {
            return Err(AppError::BadRequest(format!(
                "El préstamo con ID {} ya fue devuelto",
                id
            )));
        }

        let returned = self
            .repository
            .loans
            .mark_returned(&mut *tx, id, today())
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("El préstamo con ID {} ya fue devuelto", id)))?;

        self.repository.books.return_copy(&mut *tx, returned.book_id).await?;
        tx.commit().await?;

        tracing::info!(loan_id = id, book_id = returned.book_id, "Loan returned");

        let mut details = current;
        details.loan = returned;
        Ok(details.into())
    }

    /// Delete a loan; an outstanding one gives its copy back
    pub async fn delete_loan(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;

        let loan = self
            .repository
            .loans
            .delete(&mut *tx, id)
            .await?
            .ok_or_else(|| loan_not_found(id))?;

        if loan.is_outstanding() {
            self.repository.books.return_copy(&mut *tx, loan.book_id).await?;
        }
        tx.commit().await?;

        tracing::info!(loan_id = id, "Loan deleted");
        Ok(())
    }
}
