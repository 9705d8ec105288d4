// Biblioteca raíz del crate `timetable_flat`.
// Reexporta los módulos principales y proporciona `run`, que orquesta el flujo
// completo: leer oferta -> normalizar -> escribir salida -> índices -> verificación.
pub mod config;
pub mod error;
pub mod excel;
pub mod lookups;
pub mod models;
pub mod normalizer;
pub mod output;
pub mod report;
pub mod schedule;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{ClockTime, Day, DeliveryType, NormalizedCourseRecord, RawCourseRecord, ResolvedSlot};
pub use normalizer::{Normalized, normalize_all, normalize_record};
pub use schedule::{PeriodDialect, ScheduleParser};

use report::{CoverageReport, RunSummary};
use std::path::PathBuf;
use tracing::{info, warn};

/// Nombres fijos de los índices que consume la capa de presentación
pub const PROFESSORS_FILE: &str = "professors.json";
pub const CLASSROOMS_FILE: &str = "classrooms.json";

/// Lo que produjo una ejecución, para que el binario lo imprima
#[derive(Debug, Clone)]
pub struct RunReport {
    pub raw_records: usize,
    pub processed: usize,
    pub skipped: usize,
    pub summary: RunSummary,
    pub lookups: Option<(PathBuf, PathBuf)>,
    pub coverage: Option<CoverageReport>,
}

/// Ejecuta la conversión completa según `config`.
///
/// La oferta se lee entera antes de escribir nada: si la lectura falla no se
/// toca la salida anterior.
pub fn run(config: &Config) -> Result<RunReport> {
    let raw = excel::leer_oferta(&config.input)?;
    let parser = ScheduleParser::new(config.periods);
    info!("Normalizando {} registros con periodos '{}'", raw.len(), parser.dialect());

    let normalized = normalize_all(&raw, &parser);
    output::write_json_atomic(&config.output, &normalized.records)?;
    info!("Salida escrita en {:?} ({} registros)", config.output, normalized.records.len());

    let lookup_paths = match &config.lookups_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
            let professors_path = dir.join(PROFESSORS_FILE);
            let classrooms_path = dir.join(CLASSROOMS_FILE);
            output::write_json_atomic(&professors_path, &lookups::build_professors(&normalized.records))?;
            output::write_json_atomic(&classrooms_path, &lookups::build_classrooms(&normalized.records))?;
            Some((professors_path, classrooms_path))
        }
        None => None,
    };

    let coverage = if config.verify {
        let report = report::verify_output_file(&raw, &config.output, parser.periods())?;
        if !report.is_consistent() {
            warn!(
                "Cobertura inconsistente: {} filas para un mínimo de {}, {} horarios discrepantes, {} códigos faltantes",
                report.emitted_records,
                report.min_expected_records(),
                report.time_mismatches.len() + report.inverted_spans.len(),
                report.missing_codes.len()
            );
        }
        Some(report)
    } else {
        None
    };

    Ok(RunReport {
        raw_records: raw.len(),
        processed: normalized.processed,
        skipped: normalized.skipped,
        summary: RunSummary::from_records(&normalized.records),
        lookups: lookup_paths,
        coverage,
    })
}
