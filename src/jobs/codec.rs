//! # Encode/Decode Estructurado del Entorno
//! src/jobs/codec.rs
//!
//! Puente entre el entorno plano de strings y un objeto JSON de un nivel
//! (`key → JSON o string`).
//!
//! - Decode: los strings se guardan tal cual; cualquier otro valor se
//!   guarda como su texto JSON, recordando el valor original.
//! - Encode: las entradas con valor original lo emiten sin cambios; las
//!   escritas con `setenv` se re-parsean como JSON y, si no lo son, se
//!   emiten como string.

use crate::error::{EngineError, Result};
use crate::jobs::env::Env;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{Read, Write};

impl Env {
    /// Decodifica `src` como un objeto JSON y añade cada par al entorno
    ///
    /// Solo se lee el primer valor de `src`; lo que venga después se ignora.
    pub fn decode_env<R: Read>(&mut self, src: R) -> Result<()> {
        let mut de = serde_json::Deserializer::from_reader(src);
        let map = Map::<String, Value>::deserialize(&mut de).map_err(EngineError::Decode)?;

        for (key, value) in map {
            let text = match &value {
                Value::String(s) => s.clone(),
                other => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
            };
            self.setenv_typed(&key, &text, value);
        }

        Ok(())
    }

    /// Escribe el entorno como un objeto JSON seguido de un salto de línea
    pub fn encode_env<W: Write>(&self, mut dst: W) -> Result<()> {
        let mut map = Map::new();

        for (key, entry) in self.latest() {
            let value = match entry.typed() {
                Some(typed) => typed.clone(),
                None => {
                    let raw = entry.value();
                    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
                }
            };
            map.insert(key.to_string(), value);
        }

        let mut buf = serde_json::to_vec(&map).map_err(|e| EngineError::Encode(e.into()))?;
        buf.push(b'\n');
        dst.write_all(&buf).map_err(EngineError::Encode)?;

        Ok(())
    }

    /// Vuelca el entorno en un tipo arbitrario pasando por JSON
    pub fn export_env<T: DeserializeOwned>(&self) -> Result<T> {
        let mut buf = Vec::new();
        self.encode_env(&mut buf)?;
        serde_json::from_slice(&buf).map_err(EngineError::Export)
    }

    /// Importa un tipo arbitrario al entorno pasando por JSON
    ///
    /// El tipo debe serializarse como un objeto.
    pub fn import_env<T: Serialize + ?Sized>(&mut self, src: &T) -> Result<()> {
        let buf = serde_json::to_vec(src).map_err(EngineError::Encoding)?;
        self.decode_env(buf.as_slice())
    }
}
