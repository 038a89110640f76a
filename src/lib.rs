//! # Job Engine
//! src/lib.rs
//!
//! Abstracción de invocación de jobs: una unidad de trabajo identificada
//! por nombre y argumentos, con un entorno de strings, tres streams y un
//! estado de salida ("0" = éxito, cualquier otra cosa = motivo del fallo).
//!
//! ## Arquitectura
//!
//! - `jobs`: el job, su entorno y el encode/decode estructurado
//! - `error`: errores del crate
//! - `config`: configuración del binario (CLI y variables de entorno)
//! - `commands`: handlers de ejemplo que usa el binario
//!
//! ## Ejemplo de uso
//!
//! ```
//! use job_engine::jobs::Job;
//! use std::io::Write;
//!
//! fn hello(job: &mut Job<'_>) -> String {
//!     let who = job.getenv("who").to_string();
//!     match writeln!(job.stdout(), "hello {}", who) {
//!         Ok(()) => "0".to_string(),
//!         Err(e) => e.to_string(),
//!     }
//! }
//!
//! let owner = "engine";
//! let mut job = Job::new(&owner, "hello", Vec::<String>::new()).with_handler(hello);
//! job.setenv("who", "world");
//! job.run().unwrap();
//! assert_eq!(job.to_string(), "engine.hello() = OK (0)");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod jobs;

pub use error::{EngineError, Result};
