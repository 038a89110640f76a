//! # Sistema de Jobs
//! src/jobs/mod.rs
//!
//! Un job tiene nombre, argumentos, un entorno de strings `key=value`,
//! tres streams (entrada, salida, error) y un estado de salida en forma
//! de string.
//!
//! - `env`: almacén del entorno y accesores tipados
//! - `codec`: import/export del entorno como objeto JSON
//! - `job`: el job, su ejecución y su formato para logs

pub mod codec;
pub mod env;
pub mod job;

pub use env::Env;
pub use job::{Handler, Job, STATUS_NOT_FOUND, STATUS_OK};
