//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::AuthorResponse, not_blank};

/// Book row from the `libros` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    #[sqlx(rename = "id_libro")]
    pub id: i64,
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[sqlx(rename = "id_autor")]
    pub author_id: i64,
    #[sqlx(rename = "categoria")]
    pub category: String,
    #[sqlx(rename = "cantidad_disponible")]
    pub available_count: i32,
}

/// Book joined with its author, as read for responses
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookWithAuthor {
    #[sqlx(flatten)]
    pub book: Book,
    #[sqlx(rename = "autor_nombre")]
    pub author_name: String,
}

/// Create or full-replace book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookRequest {
    #[serde(rename = "titulo")]
    #[validate(custom(function = "not_blank"), length(min = 1, max = 255, message = "El título debe tener entre 1 y 255 caracteres"))]
    pub title: String,
    /// Id of an existing author
    #[serde(rename = "idAutor")]
    pub author_id: i64,
    #[serde(rename = "categoria")]
    #[validate(custom(function = "not_blank"), length(min = 1, max = 100, message = "La categoría debe tener entre 1 y 100 caracteres"))]
    pub category: String,
    /// Copies currently on the shelf
    #[serde(rename = "cantidadDisponible")]
    #[validate(range(min = 0, message = "La cantidad disponible debe ser mayor o igual a 0"))]
    pub available_count: i32,
}

/// Book as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    #[serde(rename = "idLibro")]
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: AuthorResponse,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "cantidadDisponible")]
    pub available_count: i32,
}

/// Minimal book reference embedded in loan responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    #[serde(rename = "idLibro")]
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
}

impl From<BookWithAuthor> for BookResponse {
    fn from(row: BookWithAuthor) -> Self {
        Self {
            id: row.book.id,
            title: row.book.title,
            author: AuthorResponse {
                id: row.book.author_id,
                name: row.author_name,
            },
            category: row.book.category,
            available_count: row.book.available_count,
        }
    }
}
