//! # Entorno de un Job
//! src/jobs/env.rs
//!
//! Almacén plano y ordenado de entradas `key=value`. Se permiten claves
//! duplicadas: las lecturas devuelven la última escritura, pero las
//! entradas anteriores nunca se borran.
//!
//! Cada entrada guarda además, de forma opcional, el valor JSON del que
//! provino (cuando llegó desde una fuente estructurada). Las lecturas
//! siempre usan el texto; el valor tipado solo lo consume el encoder.

use crate::error::{EngineError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Valores que `getenv_bool` interpreta como falso
const FALSE_VALUES: [&str; 5] = ["", "0", "no", "false", "none"];

/// Una entrada cruda del entorno
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    /// Texto `key=value` tal cual se guardó
    raw: String,

    /// Valor estructurado original, si lo hay
    typed: Option<Value>,
}

impl Entry {
    /// Separa la entrada por el primer `=`. `None` si está malformada.
    fn split(&self) -> Option<(&str, &str)> {
        self.raw.split_once('=')
    }

    /// Valor crudo (lo que sigue al primer `=`)
    pub(crate) fn value(&self) -> &str {
        self.split().map_or("", |(_, v)| v)
    }

    pub(crate) fn typed(&self) -> Option<&Value> {
        self.typed.as_ref()
    }
}

/// Entorno de un job
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    entries: Vec<Entry>,
}

impl Env {
    /// Crea un entorno vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye un entorno a partir de entradas crudas `key=value`
    ///
    /// Las entradas sin `=` se conservan, pero las lecturas las ignoran.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut env = Self::new();
        for entry in entries {
            env.push_raw(entry);
        }
        env
    }

    /// Añade una entrada cruda sin validarla
    pub fn push_raw(&mut self, entry: impl Into<String>) {
        self.entries.push(Entry {
            raw: entry.into(),
            typed: None,
        });
    }

    /// Añade `key=value` al final. Nunca modifica entradas previas.
    pub fn setenv(&mut self, key: &str, value: &str) {
        self.push(key, value, None);
    }

    /// Como `setenv`, recordando el valor estructurado de origen
    ///
    /// Si la clave contiene `=`, la entrada se lee con otra clave y otro
    /// valor, así que el valor tipado ya no la describe y se descarta.
    pub(crate) fn setenv_typed(&mut self, key: &str, value: &str, typed: Value) {
        let typed = if key.contains('=') { None } else { Some(typed) };
        self.push(key, value, typed);
    }

    fn push(&mut self, key: &str, value: &str, typed: Option<Value>) {
        self.entries.push(Entry {
            raw: format!("{}={}", key, value),
            typed,
        });
    }

    /// Valor de la última entrada con esa clave, o `""` si no existe
    pub fn getenv(&self, key: &str) -> &str {
        let mut value = "";
        for (k, v) in self.entries.iter().filter_map(Entry::split) {
            if k == key {
                value = v;
            }
        }
        value
    }

    /// Proyección clave → valor (la última escritura gana)
    pub fn environ(&self) -> BTreeMap<String, String> {
        self.latest()
            .into_iter()
            .filter_map(|(k, entry)| entry.split().map(|(_, v)| (k.to_string(), v.to_string())))
            .collect()
    }

    /// Última entrada de cada clave, en orden de clave
    pub(crate) fn latest(&self) -> BTreeMap<&str, &Entry> {
        let mut map = BTreeMap::new();
        for entry in &self.entries {
            if let Some((k, _)) = entry.split() {
                map.insert(k, entry);
            }
        }
        map
    }

    /// Booleano: falso para "", "0", "no", "false" y "none" (sin importar
    /// mayúsculas ni espacios alrededor), verdadero para todo lo demás
    pub fn getenv_bool(&self, key: &str) -> bool {
        let value = self.getenv(key).trim().to_lowercase();
        !FALSE_VALUES.contains(&value.as_str())
    }

    pub fn setenv_bool(&mut self, key: &str, value: bool) {
        self.setenv(key, if value { "1" } else { "0" });
    }

    /// Entero con signo; 0 si no existe o no se puede parsear
    pub fn getenv_int(&self, key: &str) -> i64 {
        self.getenv(key).trim().parse().unwrap_or(0)
    }

    pub fn setenv_int(&mut self, key: &str, value: i64) {
        self.setenv(key, &value.to_string());
    }

    /// Lista de strings guardada como array JSON
    ///
    /// Si el valor no es un array JSON de strings, devuelve una lista de
    /// un solo elemento con el valor crudo.
    pub fn getenv_list(&self, key: &str) -> Vec<String> {
        let raw = self.getenv(key);
        serde_json::from_str(raw).unwrap_or_else(|_| vec![raw.to_string()])
    }

    pub fn setenv_list<S: AsRef<str>>(&mut self, key: &str, value: &[S]) -> Result<()> {
        let list: Vec<&str> = value.iter().map(AsRef::as_ref).collect();
        let typed = serde_json::to_value(&list).map_err(EngineError::Encoding)?;
        let text = serde_json::to_string(&list).map_err(EngineError::Encoding)?;
        self.setenv_typed(key, &text, typed);
        Ok(())
    }

    /// Entradas crudas en orden de almacenamiento
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.raw.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
