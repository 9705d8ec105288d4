//! Índices de búsqueda para la capa de presentación (profesores y salas).

use crate::models::NormalizedCourseRecord;
use crate::normalizer::cleanup::is_numeric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassroomEntry {
    pub building: String,
    pub room: String,
}

/// Lista ordenada y sin duplicados de profesores. Los campos con varios
/// docentes ("김철수, 이영희") se separan; los valores numéricos (número de
/// sección colado en la columna) se descartan.
pub fn build_professors(records: &[NormalizedCourseRecord]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for record in records {
        for name in record.professor.split(',') {
            let name = name.trim();
            if name.is_empty() || is_numeric(name) {
                continue;
            }
            names.insert(name.to_string());
        }
    }
    names.into_iter().collect()
}

/// Pares {edificio, sala} ordenados por edificio y luego por el número de la sala
pub fn build_classrooms(records: &[NormalizedCourseRecord]) -> Vec<ClassroomEntry> {
    let unique: BTreeSet<(String, String)> = records
        .iter()
        .map(|r| (r.building_name.trim(), r.classroom.trim()))
        .filter(|(building, room)| !building.is_empty() && !room.is_empty())
        .map(|(building, room)| (building.to_string(), room.to_string()))
        .collect();

    let mut entries: Vec<ClassroomEntry> = unique
        .into_iter()
        .map(|(building, room)| ClassroomEntry { building, room })
        .collect();
    entries.sort_by(|a, b| {
        a.building
            .cmp(&b.building)
            .then_with(|| room_number(&a.room).cmp(&room_number(&b.room)))
            .then_with(|| a.room.cmp(&b.room))
    });
    entries
}

/// Dígitos de la sala como número ("P203" -> 203, "505-1" -> 5051); sin dígitos -> 0
pub fn room_number(room: &str) -> u64 {
    let digits: String = room.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}
