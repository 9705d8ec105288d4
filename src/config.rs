//! Configuración de la ejecución (argumentos de línea de comandos + entorno).

use crate::schedule::PeriodDialect;
use clap::Parser;
use std::path::PathBuf;

/// Normaliza la oferta de cursos a un horario plano para la web app
#[derive(Debug, Clone, Parser)]
#[command(name = "timetable-flat", version)]
pub struct Config {
    /// Oferta cruda (.json, .xlsx, .xls, .xlsb, .ods)
    pub input: PathBuf,

    /// Archivo JSON de salida (se sobrescribe completo)
    pub output: PathBuf,

    /// Sistema de periodos de la fuente: `uniform` o `mixed`
    #[arg(long, env = "TIMETABLE_PERIODS", default_value = "uniform")]
    pub periods: PeriodDialect,

    /// Directorio donde escribir professors.json y classrooms.json
    #[arg(long, env = "TIMETABLE_LOOKUPS_DIR")]
    pub lookups_dir: Option<PathBuf>,

    /// Comprobar la cobertura de la salida contra la fuente
    #[arg(long)]
    pub verify: bool,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, periods: PeriodDialect) -> Self {
        Config {
            input: input.into(),
            output: output.into(),
            periods,
            lookups_dir: None,
            verify: false,
        }
    }
}
