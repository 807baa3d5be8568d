//! Error Types
//!
//! Failures surfaced by the catalog pipeline. Display text is user facing.

use thiserror::Error;

use crate::forms::Field;
use crate::models::MovieId;

/// Normalized failure of a single REST call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Non-success HTTP status
    #[error("{status} {status_text}")]
    Rejected { status: u16, status_text: String },

    /// Network unreachable or unreadable response
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Local form validation failure; never reaches the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, completa todos los campos obligatorios")]
    MissingRequired { field: Field },

    #[error("{} debe tener al menos {min} caracteres", .field.subject())]
    TooShort { field: Field, min: usize },

    #[error("El año debe ser un número entre {min} y {max}")]
    YearOutOfRange { min: i32, max: i32 },

    #[error("La calificación debe ser un número entre 1 y 10")]
    RatingOutOfRange,
}

impl ValidationError {
    /// Field that should receive focus
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingRequired { field } | ValidationError::TooShort { field, .. } => {
                *field
            }
            ValidationError::YearOutOfRange { .. } => Field::Year,
            ValidationError::RatingOutOfRange => Field::Rating,
        }
    }
}

/// Any reason a user action did not complete
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No se encontró la película")]
    NotFound(MovieId),

    #[error("Hay otra operación en curso, espera a que termine")]
    Busy,

    #[error("El formulario no está abierto")]
    FormClosed,

    #[error("{context}: {source}")]
    Remote {
        context: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("No se pudo exportar el catálogo: {0}")]
    Export(String),
}

impl ActionError {
    pub fn remote(context: &'static str, source: ApiError) -> Self {
        ActionError::Remote { context, source }
    }

    /// Whether the user should see a banner for this error
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, ActionError::FormClosed)
    }
}

pub type ActionResult<T> = Result<T, ActionError>;
