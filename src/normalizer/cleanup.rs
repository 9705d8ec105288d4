//! Limpieza de campos compuestos del export.
//!
//! Todas las pasadas son idempotentes: aplicarlas sobre un registro ya
//! normalizado no cambia nada.

use crate::models::NormalizedCourseRecord;
use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    code_title: Regex,
    subject_tail: Regex,
    numeric: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        code_title: Regex::new(r"^(?P<code>[A-Z]{3}\d{5})\s+(?P<title>.+)$").expect("patrón código+título"),
        subject_tail: Regex::new(r"^(?P<title>.+?)\s+\d+(?:\.\d+)?\s+\d+\s+\d{2}$").expect("patrón cola de asignatura"),
        numeric: Regex::new(r"^\d+(?:\.\d+)?$").expect("patrón numérico"),
    })
}

/// `"GEN22102 채플2"` -> (`"GEN22102"`, `"채플2"`). El título sólo reemplaza a la
/// asignatura si ésta viene vacía o es puramente numérica.
pub fn split_code_title(code: &str, subject: &str) -> (String, String) {
    let code = code.trim();
    let subject = subject.trim();
    match patterns().code_title.captures(code) {
        Some(caps) => {
            let title = caps["title"].trim();
            let subject = if subject.is_empty() || is_numeric(subject) { title } else { subject };
            (caps["code"].to_string(), subject.to_string())
        }
        None => (code.to_string(), subject.to_string()),
    }
}

/// `"심리학개론 3 1 02"` -> `"심리학개론"` (título + créditos + curso + sección).
/// Se repite hasta que no quede cola, así una segunda pasada no cambia nada.
pub fn strip_subject_tail(subject: &str) -> String {
    let mut current = subject.trim().to_string();
    while let Some(caps) = patterns().subject_tail.captures(&current) {
        let title = caps["title"].trim().to_string();
        if title == current {
            break;
        }
        current = title;
    }
    current
}

/// Colapsa espacios repetidos del campo profesor
pub fn clean_professor(professor: &str) -> String {
    professor.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_numeric(value: &str) -> bool {
    patterns().numeric.is_match(value.trim())
}

/// Campos de curso ya limpios
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanFields {
    pub code: String,
    pub subject: String,
    pub professor: String,
}

pub fn clean_fields(code: &str, subject: &str, professor: &str) -> CleanFields {
    let (code, subject) = split_code_title(code, subject);
    CleanFields {
        code,
        subject: strip_subject_tail(&subject),
        professor: clean_professor(professor),
    }
}

/// Re-aplica la limpieza sobre un registro de salida
pub fn clean_record(record: &mut NormalizedCourseRecord) {
    let fields = clean_fields(&record.code, &record.subject, &record.professor);
    record.code = fields.code;
    record.subject = fields.subject;
    record.professor = fields.professor;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_code_title() {
        assert_eq!(split_code_title("GEN22102 채플2", ""), ("GEN22102".into(), "채플2".into()));
        assert_eq!(split_code_title("GEN22102 채플2", "2"), ("GEN22102".into(), "채플2".into()));
        // con asignatura real sólo se limpia el código
        assert_eq!(split_code_title("GEN22102 채플2", "채플"), ("GEN22102".into(), "채플".into()));
        assert_eq!(split_code_title("PSY1001", "심리학"), ("PSY1001".into(), "심리학".into()));
    }

    #[test]
    fn test_strip_subject_tail() {
        assert_eq!(strip_subject_tail("심리학개론 3 1 02"), "심리학개론");
        assert_eq!(strip_subject_tail("통계학 2.5 3 11"), "통계학");
        assert_eq!(strip_subject_tail("채플2"), "채플2");
        // sección de un dígito: no es la cola del export
        assert_eq!(strip_subject_tail("영어 3 1 2"), "영어 3 1 2");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let inputs = [
            ("GEN22102 채플2", "", "홍  길동"),
            ("PSY1001", "심리학개론 3 1 02", "김철수"),
            ("ABC12345 제목 3 1 02", "1", ""),
            ("X", "T 3 1 02 3 1 02", "a  b,  c"),
        ];
        for (code, subject, professor) in inputs {
            let once = clean_fields(code, subject, professor);
            let twice = clean_fields(&once.code, &once.subject, &once.professor);
            assert_eq!(once, twice);
        }
    }
}
