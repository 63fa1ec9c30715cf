//! User management service

use crate::{
    error::{AppError, AppResult},
    models::user::{UserRequest, UserResponse},
    repository::{users::email_taken, Repository},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

fn user_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Usuario no encontrado con ID: {}", id))
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every user
    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let mut tx = self.repository.begin().await?;
        let users = self.repository.users.find_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> AppResult<UserResponse> {
        let mut tx = self.repository.begin().await?;
        let user = self
            .repository
            .users
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| user_not_found(id))?;
        tx.commit().await?;
        Ok(user.into())
    }

    /// Create a user with a unique email
    pub async fn create_user(&self, request: UserRequest) -> AppResult<UserResponse> {
        let mut tx = self.repository.begin().await?;

        if self.repository.users.email_exists(&mut *tx, &request.email, None).await? {
            return Err(email_taken(&request.email));
        }

        let user = self.repository.users.insert(&mut *tx, &request).await?;
        tx.commit().await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user.into())
    }

    /// Replace a user's fields, keeping emails unique
    pub async fn update_user(&self, id: i64, request: UserRequest) -> AppResult<UserResponse> {
        let mut tx = self.repository.begin().await?;

        if self.repository.users.find_by_id(&mut *tx, id).await?.is_none() {
            return Err(user_not_found(id));
        }

        if self
            .repository
            .users
            .email_exists(&mut *tx, &request.email, Some(id))
            .await?
        {
            return Err(email_taken(&request.email));
        }

        let user = self
            .repository
            .users
            .update(&mut *tx, id, &request)
            .await?
            .ok_or_else(|| user_not_found(id))?;
        tx.commit().await?;

        tracing::info!(user_id = id, "User updated");
        Ok(user.into())
    }

    /// Delete a user together with their loans.
    ///
    /// Copies the user still has out go back on the shelf first.
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        let restocked_books = self.repository.books.return_copies_lent_to(&mut *tx, id).await?;
        if !self.repository.users.delete(&mut *tx, id).await? {
            return Err(user_not_found(id));
        }
        tx.commit().await?;

        tracing::info!(user_id = id, restocked_books, "User deleted");
        Ok(())
    }
}
