//! Escritura de los artefactos JSON.

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// Escribe `value` como JSON con sangría. Se escribe primero a un archivo
/// temporal junto al destino y luego se renombra, así la salida anterior se
/// reemplaza entera o no se toca.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, text).map_err(|e| Error::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}
