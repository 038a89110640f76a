//! # Errores del Motor de Jobs
//! src/error.rs
//!
//! Un único enum de errores para todo el crate. Los errores de
//! encode/decode se devuelven al llamador inmediato; `run` solo
//! propaga `ExecutionFailure`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// La fuente no es un objeto JSON válido
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Falló la escritura del entorno en el sink
    #[error("encode error: {0}")]
    Encode(#[source] std::io::Error),

    /// No se pudo serializar un valor antes de guardarlo
    #[error("encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// El entorno no tiene la forma del tipo destino
    #[error("export error: {0}")]
    Export(#[source] serde_json::Error),

    /// El handler devolvió un estado distinto de "0"
    #[error("{name}: {status}")]
    ExecutionFailure { name: String, status: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Estado devuelto por el handler, si el error es un fallo de ejecución
    pub fn status(&self) -> Option<&str> {
        match self {
            EngineError::ExecutionFailure { status, .. } => Some(status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failure_message() {
        let err = EngineError::ExecutionFailure {
            name: "pull".to_string(),
            status: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "pull: permission denied");
        assert_eq!(err.status(), Some("permission denied"));
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EngineError::Decode(json_err);
        assert!(err.to_string().starts_with("decode error"));
        assert!(err.status().is_none());
    }
}
