//! Normalización de la oferta cruda a registros planos (uno por sesión).

pub mod cleanup;

use crate::models::{Day, DeliveryType, NormalizedCourseRecord, RawCourseRecord, ResolvedSlot};
use crate::schedule::ScheduleParser;
use crate::schedule::segmenter::ONLINE_MARKER;
use tracing::debug;

/// Campo obligatorio ausente en un registro crudo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Code,
    Subject,
}

/// Resultado por registro crudo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Siempre al menos un registro (el centinela ONLINE si no hubo sesiones)
    Emitted(Vec<NormalizedCourseRecord>),
    Skipped(MissingField),
}

/// Resultado de normalizar toda la oferta
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<NormalizedCourseRecord>,
    /// Registros crudos procesados (sin contar cabeceras repetidas)
    pub processed: usize,
    pub skipped: usize,
    pub online: usize,
}

/// Una fila cuyo código es la etiqueta de la cabecera es una cabecera repetida
pub fn is_header_row(raw: &RawCourseRecord) -> bool {
    matches!(raw.code.trim(), "과목코드" | "교과목코드")
}

/// `true` si las observaciones marcan el curso como online
pub fn is_marked_online(raw: &RawCourseRecord) -> bool {
    raw.remarks.contains(ONLINE_MARKER)
}

/// Normaliza un registro crudo: limpieza de campos, parseo del horario y
/// expansión a un registro por sesión.
pub fn normalize_record(raw: &RawCourseRecord, parser: &ScheduleParser) -> RecordOutcome {
    let fields = cleanup::clean_fields(&raw.code, &raw.subject, &raw.professor);
    if fields.code.is_empty() {
        return RecordOutcome::Skipped(MissingField::Code);
    }
    if fields.subject.is_empty() {
        return RecordOutcome::Skipped(MissingField::Subject);
    }

    let base = NormalizedCourseRecord {
        code: fields.code,
        subject: fields.subject,
        professor: fields.professor,
        credit: raw.credit.trim().to_string(),
        section: raw.section.trim().to_string(),
        day: Day::Online,
        start: String::new(),
        end: String::new(),
        time: String::new(),
        classroom: String::new(),
        building_code: String::new(),
        building_name: String::new(),
        department: raw.department.trim().to_string(),
        college: raw.college.trim().to_string(),
        student_count: raw.student_count,
        delivery: DeliveryType::Online,
    };

    let slots = parser.parse(&raw.schedule);
    if slots.is_empty() || is_marked_online(raw) {
        return RecordOutcome::Emitted(vec![base]);
    }

    RecordOutcome::Emitted(slots.into_iter().map(|slot| with_slot(&base, slot)).collect())
}

fn with_slot(base: &NormalizedCourseRecord, slot: ResolvedSlot) -> NormalizedCourseRecord {
    let start = slot.start.to_string();
    let end = slot.end.to_string();
    NormalizedCourseRecord {
        day: slot.day,
        time: format!("{}-{}", start, end),
        start,
        end,
        classroom: slot.classroom,
        building_code: slot.building_code,
        building_name: slot.building_name,
        delivery: DeliveryType::Offline,
        ..base.clone()
    }
}

/// Normaliza toda la oferta. Los registros se procesan de forma independiente;
/// uno defectuoso se cuenta y se omite sin detener la ejecución.
pub fn normalize_all(raw_records: &[RawCourseRecord], parser: &ScheduleParser) -> Normalized {
    let mut out = Normalized::default();
    for (idx, raw) in raw_records.iter().enumerate() {
        if is_header_row(raw) {
            continue;
        }
        out.processed += 1;
        match normalize_record(raw, parser) {
            RecordOutcome::Emitted(records) => {
                out.online += records.iter().filter(|r| r.is_online()).count();
                out.records.extend(records);
            }
            RecordOutcome::Skipped(missing) => {
                debug!("registro {} omitido: falta {:?} (código '{}')", idx, missing, raw.code.trim());
                out.skipped += 1;
            }
        }
    }
    out
}
