//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! - `echo`: escribe los argumentos separados por espacios
//! - `cat`: copia la entrada a la salida
//! - `env`: escribe el entorno como objeto JSON
//! - `true` / `false`: terminan con éxito o con error

use crate::jobs::{Job, STATUS_OK};
use std::io::{Read, Write};

/// Escribe los argumentos en la salida
///
/// Con `newline` falso en el entorno no añade el salto de línea final.
pub fn echo(job: &mut Job<'_>) -> String {
    let mut line = job.args().join(" ");
    if job.getenv("newline").is_empty() || job.getenv_bool("newline") {
        line.push('\n');
    }

    match job.stdout().write_all(line.as_bytes()) {
        Ok(()) => STATUS_OK.to_string(),
        Err(e) => e.to_string(),
    }
}

/// Copia la entrada completa a la salida
pub fn cat(job: &mut Job<'_>) -> String {
    let mut input = Vec::new();
    if let Err(e) = job.stdin().read_to_end(&mut input) {
        return e.to_string();
    }

    match job.stdout().write_all(&input) {
        Ok(()) => STATUS_OK.to_string(),
        Err(e) => e.to_string(),
    }
}

/// Escribe el entorno del job como JSON
pub fn env(job: &mut Job<'_>) -> String {
    let mut buf = Vec::new();
    if let Err(e) = job.encode_env(&mut buf) {
        return e.to_string();
    }

    match job.stdout().write_all(&buf) {
        Ok(()) => STATUS_OK.to_string(),
        Err(e) => e.to_string(),
    }
}

pub fn succeed(_job: &mut Job<'_>) -> String {
    STATUS_OK.to_string()
}

/// Falla con el estado de `status` en el entorno, o "1"
pub fn fail(job: &mut Job<'_>) -> String {
    match job.getenv("status") {
        "" | "0" => "1".to_string(),
        status => status.to_string(),
    }
}
