//! Errores de comunicación con la API PPOB.

use thiserror::Error;

/// Fallos posibles de una llamada a la API.
///
/// Se dividen en dos familias: fallos de transporte (la petición no llegó o
/// la respuesta no fue 2xx) y fallos de aplicación (respuesta 2xx con
/// `status != 0` en el envoltorio).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// La petición no produjo respuesta.
    #[error("Network error: {0}")]
    Network(String),

    /// Respuesta HTTP no-2xx.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Respuesta 2xx con `status` distinto de 0.
    #[error("API status {status}: {message}")]
    Application { status: i64, message: String },

    /// El cuerpo no se pudo decodificar.
    #[error("Parse error: {0}")]
    Decode(String),

    /// Operación autenticada sin token de sesión.
    #[error("no hay token de sesión")]
    Unauthenticated,

    /// Precondición del cliente no cumplida; no se envió nada.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Http { .. })
    }

    pub fn is_application(&self) -> bool {
        matches!(self, ApiError::Application { .. })
    }

    /// Mensaje corto para la alerta transitoria de la UI
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } | ApiError::Application { message, .. }
                if !message.is_empty() =>
            {
                message.clone()
            }
            ApiError::Rejected(message) => message.clone(),
            ApiError::Unauthenticated => "Session expired, please log in again".to_string(),
            other => other.to_string(),
        }
    }
}
