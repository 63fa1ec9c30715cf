//! Repository layer for database operations
//!
//! Table repositories run their queries on a caller-supplied connection so a
//! service can group several calls into one transaction:
//!
//! ```ignore
//! let mut tx = repository.begin().await?;
//! let author = repository.authors.find_by_id(&mut tx, id).await?;
//! tx.commit().await?;
//! ```

pub mod authors;
pub mod books;
pub mod loans;
pub mod users;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            authors: authors::AuthorsRepository,
            books: books::BooksRepository,
            users: users::UsersRepository,
            loans: loans::LoansRepository,
        }
    }

    /// Open the transaction that scopes one request's work.
    ///
    /// Dropping it without `commit` rolls everything back.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
