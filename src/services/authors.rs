//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::author::{AuthorRequest, AuthorResponse},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

fn author_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Autor no encontrado con ID: {}", id))
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every author
    pub async fn list_authors(&self) -> AppResult<Vec<AuthorResponse>> {
        let mut tx = self.repository.begin().await?;
        let authors = self.repository.authors.find_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(authors.into_iter().map(AuthorResponse::from).collect())
    }

    /// Get an author by ID
    pub async fn get_author(&self, id: i64) -> AppResult<AuthorResponse> {
        let mut tx = self.repository.begin().await?;
        let author = self
            .repository
            .authors
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| author_not_found(id))?;
        tx.commit().await?;
        Ok(author.into())
    }

    /// Get the author with exactly this name
    pub async fn get_author_by_name(&self, name: &str) -> AppResult<AuthorResponse> {
        let mut tx = self.repository.begin().await?;
        let author = self
            .repository
            .authors
            .find_by_name(&mut *tx, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Autor no encontrado con nombre: {}", name)))?;
        tx.commit().await?;
        Ok(author.into())
    }

    /// Create an author
    pub async fn create_author(&self, request: AuthorRequest) -> AppResult<AuthorResponse> {
        let mut tx = self.repository.begin().await?;
        let author = self.repository.authors.insert(&mut *tx, &request.name).await?;
        tx.commit().await?;

        tracing::info!(author_id = author.id, "Author created");
        Ok(author.into())
    }

    /// Replace an author's fields
    pub async fn update_author(&self, id: i64, request: AuthorRequest) -> AppResult<AuthorResponse> {
        let mut tx = self.repository.begin().await?;
        let author = self
            .repository
            .authors
            .update(&mut *tx, id, &request.name)
            .await?
            .ok_or_else(|| author_not_found(id))?;
        tx.commit().await?;

        tracing::info!(author_id = id, "Author updated");
        Ok(author.into())
    }

    /// Delete an author together with their books
    pub async fn delete_author(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        if !self.repository.authors.delete(&mut *tx, id).await? {
            return Err(author_not_found(id));
        }
        tx.commit().await?;

        tracing::info!(author_id = id, "Author deleted");
        Ok(())
    }
}
