//! # Comandos del Binario
//! src/commands/mod.rs
//!
//! Handlers de ejemplo que el binario asocia a un job por nombre. El
//! núcleo (`jobs`) nunca resuelve nombres: esa tabla vive aquí.
//!
//! Cada comando es una función que recibe el `Job` y retorna su estado.

pub mod basic;

use crate::config::Config;
use crate::error::Result;
use crate::jobs::{Env, Job};
use std::fs::File;
use std::io::{BufReader, Read, Write};

/// Firma de un handler de comando
pub type CommandFn = fn(&mut Job<'_>) -> String;

/// Tabla nombre → handler
const COMMANDS: &[(&str, CommandFn)] = &[
    ("echo", basic::echo),
    ("cat", basic::cat),
    ("env", basic::env),
    ("true", basic::succeed),
    ("false", basic::fail),
];

/// Busca el handler de un comando
pub fn lookup(name: &str) -> Option<CommandFn> {
    COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, handler)| *handler)
}

/// Nombres de todos los comandos disponibles
pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _)| *name)
}

/// Construye el job descrito por `config` sobre los streams dados y lo ejecuta
///
/// Con `export_env` el entorno final se escribe en el stream de error.
/// Los streams siempre se cierran, y el resultado del job tiene prioridad
/// sobre los errores de export o cierre.
pub fn execute<'a, R, W, E>(config: &'a Config, stdin: R, stdout: W, stderr: E) -> Result<()>
where
    R: Read + 'a,
    W: Write + 'a,
    E: Write + 'a,
{
    let mut env = Env::from_entries(config.env.iter().cloned());
    if let Some(path) = &config.env_file {
        let file = File::open(path)?;
        env.decode_env(BufReader::new(file))?;
    }

    let mut job = Job::new(&config.owner, config.name.as_str(), config.args.iter().cloned())
        .with_env(env)
        .with_stdin(stdin)
        .with_stdout(stdout)
        .with_stderr(stderr);

    match lookup(&config.name) {
        Some(handler) => job = job.with_handler(handler),
        None => tracing::debug!(
            name = %config.name,
            available = ?names().collect::<Vec<_>>(),
            "unknown command"
        ),
    }

    let result = job.run();

    let exported = if config.export_env {
        let mut buf = Vec::new();
        job.encode_env(&mut buf)
            .and_then(|()| job.stderr().write_all(&buf).map_err(Into::into))
    } else {
        Ok(())
    };
    let closed = job.close();

    result.and(exported).and(closed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known() {
        for name in ["echo", "cat", "env", "true", "false"] {
            assert!(lookup(name).is_some(), "{} should exist", name);
        }
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("rm").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_names() {
        assert_eq!(names().count(), 5);
    }

    // ==================== Ejecución ====================

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn config(name: &str, export_env: bool) -> Config {
        Config {
            name: name.to_string(),
            env: vec!["status=disk full".to_string()],
            export_env,
            ..Config::default()
        }
    }

    #[test]
    fn test_execute_exports_env() {
        let config = config("true", true);
        let mut out = Vec::new();
        let mut err = Vec::new();
        execute(&config, std::io::empty(), &mut out, &mut err).unwrap();

        let exported: serde_json::Value = serde_json::from_slice(&err).unwrap();
        assert_eq!(exported, serde_json::json!({"status": "disk full"}));
        assert!(String::from_utf8(out).unwrap().contains("= OK (0)"));
    }

    #[test]
    fn test_execute_keeps_job_result_when_export_fails() {
        let config = config("false", true);
        let err = execute(&config, std::io::empty(), std::io::sink(), Broken).unwrap_err();
        assert_eq!(err.status(), Some("disk full"));
    }

    #[test]
    fn test_execute_reports_export_failure() {
        let config = config("true", true);
        let err = execute(&config, std::io::empty(), std::io::sink(), Broken).unwrap_err();
        assert!(matches!(err, crate::EngineError::Io(_)));
    }
}
