//! Tipos de error comunes del crate.
//!
//! Sólo los fallos a nivel de archivo llegan aquí: los tokens de horario que no
//! se pueden interpretar se descartan localmente y nunca producen un `Error`.

use std::path::PathBuf;
use thiserror::Error;

/// Resultado estándar de las operaciones de `timetable_flat`
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No se pudo leer o escribir un archivo
    #[error("IO error en '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON mal formado o con forma inesperada
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fallo de calamine al abrir o recorrer el libro
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Extensión de archivo que no sabemos leer
    #[error("Formato no soportado: '{0}' (se esperaba .json, .xlsx, .xls, .xlsb u .ods)")]
    UnsupportedFormat(String),

    /// La hoja no tiene una columna obligatoria
    #[error("Columna obligatoria no encontrada: {0}")]
    MissingColumn(String),

    /// Entrada con estructura inválida (p.ej. JSON que no es una lista)
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
