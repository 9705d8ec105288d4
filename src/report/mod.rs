//! Verificación de la salida contra la fuente y resumen de la ejecución.
//!
//! La verificación no pasa por el normalizador: relee el archivo escrito y
//! recalcula cada sesión directamente con el segmentador y la tabla de
//! periodos, de modo que un fallo del parser aparece como discrepancia.

use crate::error::{Error, Result};
use crate::lookups::build_professors;
use crate::models::{Day, NormalizedCourseRecord, RawCourseRecord};
use crate::normalizer::cleanup::clean_fields;
use crate::normalizer::{is_header_row, is_marked_online};
use crate::schedule::PeriodTable;
use crate::schedule::segmenter::segment;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

struct TokenPatterns {
    classroom_first: Regex,
    day_first: Regex,
}

// Sólo las dos formas de un único código; el resto no se comprueba hora a hora
fn token_patterns() -> &'static TokenPatterns {
    static PATTERNS: OnceLock<TokenPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TokenPatterns {
        classroom_first: Regex::new(r"^[\w.\-]+\s*\(\s*([가-힣])\s*([A-Za-z0-9]+)\s*\)$")
            .expect("patrón sala primero"),
        day_first: Regex::new(r"^([가-힣])([A-Za-z0-9]+)\s*\(\s*[\w.\-]+\s*\)$").expect("patrón día primero"),
    })
}

/// Sesión que la fuente exige encontrar en la salida
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSlot {
    pub code: String,
    pub section: String,
    pub day: Day,
    pub start: String,
    pub end: String,
}

/// Sesiones verificables de un registro crudo: tokens de un solo periodo cuyo
/// día y código existen en la tabla.
pub fn expected_slots(raw: &RawCourseRecord, periods: &PeriodTable) -> Vec<ExpectedSlot> {
    let code = clean_fields(&raw.code, &raw.subject, &raw.professor).code;
    let patterns = token_patterns();
    let mut expected = Vec::new();

    for token in segment(&raw.schedule) {
        let caps = match patterns.classroom_first.captures(&token) {
            Some(caps) => caps,
            None => match patterns.day_first.captures(&token) {
                Some(caps) => caps,
                None => continue,
            },
        };
        let Some(day) = caps[1].chars().next().and_then(Day::from_symbol) else {
            continue;
        };
        let Some((start, end)) = periods.resolve(&caps[2]) else {
            continue;
        };
        expected.push(ExpectedSlot {
            code: code.clone(),
            section: raw.section.trim().to_string(),
            day,
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    expected
}

/// Comparación entre la oferta cruda y la salida generada
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub raw_records: usize,
    pub skipped_records: usize,
    pub emitted_records: usize,
    pub online_records: usize,
    /// Sesiones de la fuente comprobadas hora a hora
    pub checked_slots: usize,
    /// Códigos presentes en la fuente pero no en la salida
    pub missing_codes: Vec<String>,
    /// Códigos presentes en la salida pero no en la fuente
    pub unexpected_codes: Vec<String>,
    /// Sesiones (o centinelas ONLINE) de la fuente sin fila equivalente en la salida
    pub time_mismatches: Vec<String>,
    /// Filas presenciales cuyo fin no es posterior al inicio
    pub inverted_spans: Vec<String>,
}

impl CoverageReport {
    /// Cada registro válido produce al menos una fila
    pub fn min_expected_records(&self) -> usize {
        self.raw_records - self.skipped_records
    }

    pub fn is_consistent(&self) -> bool {
        self.emitted_records >= self.min_expected_records()
            && self.missing_codes.is_empty()
            && self.unexpected_codes.is_empty()
            && self.time_mismatches.is_empty()
            && self.inverted_spans.is_empty()
    }
}

/// Compara la fuente con una salida ya cargada
pub fn verify_coverage(
    raw_records: &[RawCourseRecord],
    output: &[NormalizedCourseRecord],
    periods: &PeriodTable,
) -> CoverageReport {
    let mut report = CoverageReport::default();

    let mut emitted: HashMap<(&str, &str, Day), Vec<(&str, &str)>> = HashMap::new();
    let mut online_codes = BTreeSet::new();
    for record in output {
        if record.is_online() {
            online_codes.insert(record.code.as_str());
            continue;
        }
        if record.end <= record.start {
            report.inverted_spans.push(format!(
                "{} {} {}: {}-{}",
                record.code, record.section, record.day, record.start, record.end
            ));
        }
        emitted
            .entry((record.code.as_str(), record.section.as_str(), record.day))
            .or_default()
            .push((record.start.as_str(), record.end.as_str()));
    }

    let mut source_codes = BTreeSet::new();
    for raw in raw_records.iter().filter(|r| !is_header_row(r)) {
        report.raw_records += 1;
        let fields = clean_fields(&raw.code, &raw.subject, &raw.professor);
        if fields.code.is_empty() || fields.subject.is_empty() {
            report.skipped_records += 1;
            continue;
        }

        if segment(&raw.schedule).is_empty() || is_marked_online(raw) {
            if !online_codes.contains(fields.code.as_str()) {
                report.time_mismatches.push(format!("{}: falta el registro ONLINE", fields.code));
            }
        } else {
            for slot in expected_slots(raw, periods) {
                report.checked_slots += 1;
                let key = (slot.code.as_str(), slot.section.as_str(), slot.day);
                let found = emitted
                    .get(&key)
                    .is_some_and(|times| times.contains(&(slot.start.as_str(), slot.end.as_str())));
                if !found {
                    report.time_mismatches.push(format!(
                        "{} {} {}: se esperaba {}-{}",
                        slot.code, slot.section, slot.day, slot.start, slot.end
                    ));
                }
            }
        }
        source_codes.insert(fields.code);
    }

    let output_codes: BTreeSet<String> = output.iter().map(|r| r.code.clone()).collect();
    report.emitted_records = output.len();
    report.online_records = output.iter().filter(|r| r.is_online()).count();
    report.missing_codes = source_codes.difference(&output_codes).cloned().collect();
    report.unexpected_codes = output_codes.difference(&source_codes).cloned().collect();
    report
}

/// Relee la salida escrita en disco y la verifica contra la fuente
pub fn verify_output_file(
    raw_records: &[RawCourseRecord],
    output_path: &Path,
    periods: &PeriodTable,
) -> Result<CoverageReport> {
    let text = std::fs::read_to_string(output_path).map_err(|e| Error::io(output_path, e))?;
    let output: Vec<NormalizedCourseRecord> = serde_json::from_str(&text)?;
    Ok(verify_coverage(raw_records, &output, periods))
}

/// Estadísticas generales de la salida
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_records: usize,
    pub online_records: usize,
    pub unique_professors: usize,
    pub unique_buildings: usize,
    pub by_day: BTreeMap<Day, usize>,
}

impl RunSummary {
    pub fn from_records(records: &[NormalizedCourseRecord]) -> Self {
        let mut by_day = BTreeMap::new();
        for record in records {
            *by_day.entry(record.day).or_insert(0) += 1;
        }
        let buildings: BTreeSet<&str> = records
            .iter()
            .map(|r| r.building_name.as_str())
            .filter(|b| !b.is_empty())
            .collect();
        RunSummary {
            total_records: records.len(),
            online_records: records.iter().filter(|r| r.is_online()).count(),
            unique_professors: build_professors(records).len(),
            unique_buildings: buildings.len(),
            by_day,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Total de registros: {}", self.total_records)?;
        writeln!(f, "  Registros ONLINE: {}", self.online_records)?;
        writeln!(f, "  Profesores únicos: {}", self.unique_professors)?;
        writeln!(f, "  Edificios únicos: {}", self.unique_buildings)?;
        writeln!(f, "  Distribución por día:")?;
        for day in Day::ALL {
            if let Some(count) = self.by_day.get(&day) {
                writeln!(f, "    {}: {}", day, count)?;
            }
        }
        Ok(())
    }
}
