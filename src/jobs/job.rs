//! # Estructura de Job
//! src/jobs/job.rs
//!
//! Un job es la unidad de trabajo del motor. Se modela como un proceso
//! unix: nombre, argumentos, entorno, streams de entrada/salida/error y
//! un estado de salida.
//!
//! El estado es un string: "0" indica éxito y cualquier otro valor es un
//! error (y a la vez su descripción).

use crate::error::{EngineError, Result};
use crate::jobs::env::Env;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read, Write};

/// Estado de éxito
pub const STATUS_OK: &str = "0";

/// Estado cuando no hay handler asociado
pub const STATUS_NOT_FOUND: &str = "command not found";

/// Lógica que ejecuta un job
///
/// La resolución nombre → handler la hace quien construye el job.
pub trait Handler {
    /// Ejecuta el trabajo y devuelve el estado de salida
    fn handle(&self, job: &mut Job<'_>) -> String;
}

impl<F> Handler for F
where
    F: Fn(&mut Job<'_>) -> String,
{
    fn handle(&self, job: &mut Job<'_>) -> String {
        self(job)
    }
}

/// Representa un job individual
pub struct Job<'a> {
    /// Dueño del job; solo se usa para mostrarlo
    owner: &'a dyn fmt::Display,

    name: String,
    args: Vec<String>,
    env: Env,

    stdin: Box<dyn Read + 'a>,
    stdout: Box<dyn Write + 'a>,
    stderr: Box<dyn Write + 'a>,

    /// Se consume en `run`
    handler: Option<Box<dyn Handler + 'a>>,

    /// `None` hasta que el job se ejecuta
    status: Option<String>,
}

impl<'a> Job<'a> {
    /// Crea un job sin handler, con entrada vacía y salidas descartadas
    pub fn new<I, S>(owner: &'a dyn fmt::Display, name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner,
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: Env::new(),
            stdin: Box::new(io::empty()),
            stdout: Box::new(io::sink()),
            stderr: Box::new(io::sink()),
            handler: None,
            status: None,
        }
    }

    pub fn with_handler<H: Handler + 'a>(mut self, handler: H) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn with_stdin<R: Read + 'a>(mut self, stdin: R) -> Self {
        self.stdin = Box::new(stdin);
        self
    }

    pub fn with_stdout<W: Write + 'a>(mut self, stdout: W) -> Self {
        self.stdout = Box::new(stdout);
        self
    }

    pub fn with_stderr<W: Write + 'a>(mut self, stderr: W) -> Self {
        self.stderr = Box::new(stderr);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Estado de salida; vacío mientras el job no se ha ejecutado
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }

    pub fn is_executed(&self) -> bool {
        self.status.is_some()
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    pub fn stdin(&mut self) -> &mut dyn Read {
        &mut *self.stdin
    }

    pub fn stdout(&mut self) -> &mut dyn Write {
        &mut *self.stdout
    }

    pub fn stderr(&mut self) -> &mut dyn Write {
        &mut *self.stderr
    }

    /// Ejecuta el job y bloquea hasta que termina
    ///
    /// Si el estado final no es "0", devuelve `ExecutionFailure` con el
    /// nombre del job y el estado.
    ///
    /// Un job se ejecuta una sola vez: llamadas posteriores no vuelven a
    /// invocar el handler y devuelven el resultado de la primera.
    pub fn run(&mut self) -> Result<()> {
        if let Some(status) = &self.status {
            tracing::warn!(job = %self.name, "job already executed");
            return self.outcome(status.clone());
        }

        self.log_marker("{");
        tracing::debug!(job = %self, "job started");

        let status = match self.handler.take() {
            Some(handler) => handler.handle(self),
            None => STATUS_NOT_FOUND.to_string(),
        };
        self.status = Some(status.clone());

        self.log_marker("}");

        if status != STATUS_OK {
            tracing::warn!(job = %self.name, status = %status, "job failed");
        } else {
            tracing::debug!(job = %self.name, "job succeeded");
        }
        self.outcome(status)
    }

    fn outcome(&self, status: String) -> Result<()> {
        if status == STATUS_OK {
            return Ok(());
        }
        Err(EngineError::ExecutionFailure {
            name: self.name.clone(),
            status,
        })
    }

    fn log_marker(&mut self, marker: &str) {
        if let Err(e) = self.log(marker) {
            tracing::warn!(job = %self.name, error = %e, "could not write log line");
        }
    }

    /// Escribe una línea de log en la salida del job
    ///
    /// La línea lleva el prefijo `[<job>] ` y termina en exactamente un
    /// salto de línea. Devuelve los bytes escritos.
    pub fn logf(&mut self, args: fmt::Arguments<'_>) -> io::Result<usize> {
        let message = args.to_string();
        let line = format!("[{}] {}\n", self, message.trim_end_matches('\n'));
        self.stdout.write_all(line.as_bytes())?;
        Ok(line.len())
    }

    pub fn log(&mut self, message: &str) -> io::Result<usize> {
        self.logf(format_args!("{}", message))
    }

    /// Vacía la salida y el error, y libera los streams
    pub fn close(mut self) -> Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()?;
        Ok(())
    }

    // === Entorno ===

    pub fn getenv(&self, key: &str) -> &str {
        self.env.getenv(key)
    }

    pub fn setenv(&mut self, key: &str, value: &str) {
        self.env.setenv(key, value);
    }

    pub fn getenv_bool(&self, key: &str) -> bool {
        self.env.getenv_bool(key)
    }

    pub fn setenv_bool(&mut self, key: &str, value: bool) {
        self.env.setenv_bool(key, value);
    }

    pub fn getenv_int(&self, key: &str) -> i64 {
        self.env.getenv_int(key)
    }

    pub fn setenv_int(&mut self, key: &str, value: i64) {
        self.env.setenv_int(key, value);
    }

    pub fn getenv_list(&self, key: &str) -> Vec<String> {
        self.env.getenv_list(key)
    }

    pub fn setenv_list<S: AsRef<str>>(&mut self, key: &str, value: &[S]) -> Result<()> {
        self.env.setenv_list(key, value)
    }

    pub fn environ(&self) -> BTreeMap<String, String> {
        self.env.environ()
    }

    pub fn decode_env<R: Read>(&mut self, src: R) -> Result<()> {
        self.env.decode_env(src)
    }

    pub fn encode_env<W: Write>(&self, dst: W) -> Result<()> {
        self.env.encode_env(dst)
    }

    pub fn export_env<T: DeserializeOwned>(&self) -> Result<T> {
        self.env.export_env()
    }

    pub fn import_env<T: Serialize + ?Sized>(&mut self, src: &T) -> Result<()> {
        self.env.import_env(src)
    }
}

/// `<owner>.<name>(<args>)`, más ` = OK (<status>)` o ` = ERR (<status>)`
/// una vez ejecutado
impl fmt::Display for Job<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({})", self.owner, self.name, self.args.join(", "))?;
        if let Some(status) = &self.status {
            let okerr = if status == STATUS_OK { "OK" } else { "ERR" };
            write!(f, " = {} ({})", okerr, status)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Job<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("owner", &self.owner.to_string())
            .field("name", &self.name)
            .field("args", &self.args)
            .field("env", &self.env)
            .field("has_handler", &self.handler.is_some())
            .field("status", &self.status)
            .finish()
    }
}
