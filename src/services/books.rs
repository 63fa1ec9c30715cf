//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{BookRequest, BookResponse, BookWithAuthor},
    repository::{books::author_not_found, Repository},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

fn book_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Libro no encontrado con ID: {}", id))
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book
    pub async fn list_books(&self) -> AppResult<Vec<BookResponse>> {
        let mut tx = self.repository.begin().await?;
        let books = self.repository.books.find_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<BookResponse> {
        let mut tx = self.repository.begin().await?;
        let book = self
            .repository
            .books
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        tx.commit().await?;
        Ok(book.into())
    }

    /// Create a book for an existing author
    pub async fn create_book(&self, request: BookRequest) -> AppResult<BookResponse> {
        let mut tx = self.repository.begin().await?;

        let author = self
            .repository
            .authors
            .find_by_id(&mut *tx, request.author_id)
            .await?
            .ok_or_else(|| author_not_found(request.author_id))?;

        let book = self.repository.books.insert(&mut *tx, &request).await?;
        tx.commit().await?;

        tracing::info!(book_id = book.id, author_id = author.id, "Book created");
        Ok(BookResponse::from(BookWithAuthor {
            book,
            author_name: author.name,
        }))
    }

    /// Replace every field of an existing book
    pub async fn update_book(&self, id: i64, request: BookRequest) -> AppResult<BookResponse> {
        let mut tx = self.repository.begin().await?;

        if self.repository.books.find_by_id(&mut *tx, id).await?.is_none() {
            return Err(book_not_found(id));
        }

        let author = self
            .repository
            .authors
            .find_by_id(&mut *tx, request.author_id)
            .await?
            .ok_or_else(|| author_not_found(request.author_id))?;

        let book = self
            .repository
            .books
            .update(&mut *tx, id, &request)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        tx.commit().await?;

        tracing::info!(book_id = id, "Book updated");
        Ok(BookResponse::from(BookWithAuthor {
            book,
            author_name: author.name,
        }))
    }

    /// Delete a book
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        if !self.repository.books.delete(&mut *tx, id).await? {
            return Err(book_not_found(id));
        }
        tx.commit().await?;

        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Books written by the author with exactly this name
    pub async fn list_books_by_author_name(&self, author_name: &str) -> AppResult<Vec<BookResponse>> {
        let mut tx = self.repository.begin().await?;
        let books = self.repository.books.find_by_author_name(&mut *tx, author_name).await?;
        tx.commit().await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }

    /// Books in exactly this category
    pub async fn list_books_by_category(&self, category: &str) -> AppResult<Vec<BookResponse>> {
        let mut tx = self.repository.begin().await?;
        let books = self.repository.books.find_by_category(&mut *tx, category).await?;
        tx.commit().await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }
}
