//! User (library patron) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

/// User row from the `usuarios` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    #[sqlx(rename = "id_usuario")]
    pub id: i64,
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[sqlx(rename = "correo_electronico")]
    pub email: String,
}

/// Create or replace user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[serde(rename = "nombre")]
    #[validate(custom(function = "not_blank"), length(min = 1, max = 255, message = "El nombre debe tener entre 1 y 255 caracteres"))]
    pub name: String,
    /// Email address, unique across users
    #[serde(rename = "correoElectronico")]
    #[validate(email(message = "El correo electrónico debe tener un formato válido"), length(max = 255, message = "El correo electrónico no puede exceder 255 caracteres"))]
    pub email: String,
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "idUsuario")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correoElectronico")]
    pub email: String,
}

/// Minimal user reference embedded in loan responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    #[serde(rename = "idUsuario")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
