//! # Configuración del Binario
//! src/config.rs
//!
//! Configuración de `job_engine` con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./job_engine --owner docker -e image=ubuntu -e tty=1 echo hello world
//! ./job_engine -e 'cmd=["sh","-c"]' env
//! ./job_engine --env-file config.json --export-env env
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! JOB_OWNER=docker JOB_ENV=$'image=ubuntu\ntty=1' JOB_LOG=debug ./job_engine env
//! ```

use clap::Parser;

/// Configuración de una invocación
#[derive(Debug, Clone, Parser)]
#[command(name = "job_engine")]
#[command(about = "Ejecuta un job con entorno, streams y estado de salida")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Nombre del job a ejecutar
    pub name: String,

    /// Argumentos del job
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Nombre del dueño del job (solo para logs)
    #[arg(long, default_value = "engine", env = "JOB_OWNER")]
    pub owner: String,

    // === Entorno ===

    /// Entradas `key=value` para el entorno del job (se repite `-e`)
    ///
    /// Los valores se toman enteros: pueden llevar comas o ser arrays JSON.
    /// En `JOB_ENV` las entradas van separadas por saltos de línea.
    #[arg(short = 'e', long = "env", env = "JOB_ENV", value_delimiter = '\n')]
    pub env: Vec<String>,

    /// Archivo JSON (un objeto) que se importa al entorno
    #[arg(long = "env-file", env = "JOB_ENV_FILE")]
    pub env_file: Option<String>,

    /// Escribe el entorno final como JSON en stderr al terminar
    #[arg(long = "export-env")]
    pub export_env: bool,

    // === Logging ===

    /// Filtro de logs (sintaxis de `EnvFilter`)
    #[arg(long = "log", default_value = "info", env = "JOB_LOG")]
    pub log_filter: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Job name must not be empty".to_string());
        }

        if let Some(entry) = self.env.iter().find(|e| !e.contains('=')) {
            return Err(format!("Env entry must be key=value: {}", entry));
        }

        if let Some(path) = &self.env_file {
            if path.is_empty() {
                return Err("Env file path must not be empty".to_string());
            }
        }

        if self.log_filter.trim().is_empty() {
            return Err("Log filter must not be empty".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        tracing::debug!(
            owner = %self.owner,
            name = %self.name,
            args = ?self.args,
            env_entries = self.env.len(),
            env_file = ?self.env_file,
            export_env = self.export_env,
            "configuration loaded"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            name: "help".to_string(),
            args: Vec::new(),
            owner: "engine".to_string(),
            env: Vec::new(),
            env_file: None,
            export_env: false,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.owner, "engine");
        assert_eq!(config.log_filter, "info");
        assert!(config.env.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_args() {
        let config = Config::try_parse_from([
            "job_engine",
            "--owner",
            "docker",
            "-e",
            "image=ubuntu",
            "--env",
            "tty=1",
            "-e",
            "detach=0",
            "echo",
            "hello",
            "-n",
        ])
        .unwrap();

        assert_eq!(config.owner, "docker");
        assert_eq!(config.name, "echo");
        assert_eq!(config.args, vec!["hello", "-n"]);
        assert_eq!(config.env, vec!["image=ubuntu", "tty=1", "detach=0"]);
        assert!(!config.export_env);
    }

    #[test]
    fn test_parse_env_keeps_commas() {
        let config = Config::try_parse_from([
            "job_engine",
            "-e",
            r#"cmd=["a","b"]"#,
            "-e",
            "labels=web,db",
            "env",
        ])
        .unwrap();

        assert_eq!(config.env, vec![r#"cmd=["a","b"]"#, "labels=web,db"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_requires_name() {
        assert!(Config::try_parse_from(["job_engine"]).is_err());
    }

    // ==================== Validación ====================

    #[test]
    fn test_validate_empty_name() {
        let mut config = Config::default();
        config.name = "  ".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().contains("Job name"));
    }

    #[test]
    fn test_validate_malformed_env() {
        let mut config = Config::default();
        config.env = vec!["image=ubuntu".to_string(), "tty".to_string()];
        let result = config.validate();
        assert!(result.unwrap_err().contains("tty"));
    }

    #[test]
    fn test_validate_empty_env_file() {
        let mut config = Config::default();
        config.env_file = Some(String::new());
        assert!(config.validate().unwrap_err().contains("Env file"));
    }

    #[test]
    fn test_validate_empty_log_filter() {
        let mut config = Config::default();
        config.log_filter = String::new();
        assert!(config.validate().unwrap_err().contains("Log filter"));
    }

    #[test]
    fn test_log_summary() {
        // Should not panic
        Config::default().log_summary();
    }
}
