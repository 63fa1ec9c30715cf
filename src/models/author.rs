//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

/// Author row from the `autores` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Author {
    #[sqlx(rename = "id_autor")]
    pub id: i64,
    #[sqlx(rename = "nombre")]
    pub name: String,
}

/// Create or replace author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthorRequest {
    /// Author name
    #[serde(rename = "nombre")]
    #[validate(custom(function = "not_blank"), length(min = 1, max = 255, message = "El nombre debe tener entre 1 y 255 caracteres"))]
    pub name: String,
}

/// Author as returned by the API, also embedded in book responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorResponse {
    #[serde(rename = "idAutor")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}
