/// Marcadores que el export usa para "sin horario asignado"
const UNSCHEDULED_PLACEHOLDERS: [&str; 4] = ["", "(?)", "()", "(), ()"];

/// Marca de curso online dentro del texto de horario o de observaciones
pub const ONLINE_MARKER: &str = "온라인";

/// `true` si la cadena de horario no describe ninguna sesión presencial
pub fn is_unscheduled(raw: &str) -> bool {
    let trimmed = raw.trim();
    UNSCHEDULED_PLACEHOLDERS.contains(&trimmed) || trimmed.contains(ONLINE_MARKER)
}

/// Separa la cadena de horario en tokens por comas de primer nivel.
///
/// El corte es conservador: se parte en *todas* las comas, incluso las de una
/// lista de periodos como `"목 A,B(J202)"`. Volver a unir esos fragmentos es
/// responsabilidad del matcher.
pub fn segment(raw: &str) -> Vec<String> {
    if is_unscheduled(raw) {
        return Vec::new();
    }
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_multiple_slots() {
        assert_eq!(segment("W310(수7), W310(금7)"), vec!["W310(수7)", "W310(금7)"]);
    }

    #[test]
    fn test_segment_splits_period_lists() {
        assert_eq!(segment("목 A,B(J202)"), vec!["목 A", "B(J202)"]);
    }

    #[test]
    fn test_segment_placeholders() {
        assert!(segment("").is_empty());
        assert!(segment("  (?) ").is_empty());
        assert!(segment("(), ()").is_empty());
        assert!(segment("온라인 강의").is_empty());
        assert_eq!(segment(" , P203(화A) ,"), vec!["P203(화A)"]);
    }
}
