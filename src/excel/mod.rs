//! Módulo `excel`: lectura de la oferta de cursos cruda.
//!
//! Submódulos:
//! - `io`: helpers de celdas/encabezados y lectura de hojas con calamine
//! - `oferta`: filas de una hoja -> `RawCourseRecord`
//!
//! El mismo export llega a veces convertido a JSON (lista de objetos con las
//! cabeceras como claves); `leer_oferta` decide por la extensión.

/// Helpers de IO y utilidades para parsing de Excel
pub mod io;

/// Lectura de la oferta desde filas de hoja: `records_from_rows`
pub mod oferta;

pub use io::{cell_to_string, normalize_header, read_first_sheet};
pub use oferta::records_from_rows;

use crate::error::{Error, Result};
use crate::models::RawCourseRecord;
use std::path::Path;
use tracing::info;

/// Extensiones que abre calamine
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Lee la oferta académica completa. Cualquier fallo aquí es fatal para la
/// ejecución: no se escribe salida parcial.
pub fn leer_oferta<P: AsRef<Path>>(path: P) -> Result<Vec<RawCourseRecord>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "archivo de oferta no encontrado"),
        ));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let records = if ext == "json" {
        leer_oferta_json(path)?
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        leer_oferta_excel(path)?
    } else {
        return Err(Error::UnsupportedFormat(path.display().to_string()));
    };

    info!("Oferta cargada desde {:?}: {} registros", path, records.len());
    Ok(records)
}

/// Export en JSON: debe ser una lista de objetos
pub fn leer_oferta_json(path: &Path) -> Result<Vec<RawCourseRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_oferta_json(&text)
}

pub fn parse_oferta_json(text: &str) -> Result<Vec<RawCourseRecord>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(Error::InvalidInput("se esperaba una lista JSON de registros".to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Export en hoja de cálculo (primera hoja con datos)
pub fn leer_oferta_excel(path: &Path) -> Result<Vec<RawCourseRecord>> {
    let rows = read_first_sheet(path)?;
    if rows.is_empty() {
        return Err(Error::InvalidInput(format!("el libro '{}' no contiene datos", path.display())));
    }
    records_from_rows(&rows)
}
