//! Resolución de edificio a partir del código de sala ("W310" -> "W" -> "우남관").

use std::collections::HashMap;

/// Tabla canónica código -> nombre de edificio
const BUILDINGS: [(&str, &str); 28] = [
    ("505", "505관"),
    ("A", "아펜젤러관"),
    ("AM", "아펜젤러기념관"),
    ("AU", "AU관"),
    ("B", "백산관"),
    ("C", "C관"),
    ("DC", "대덕산학협력관"),
    ("DS", "대덕산학협력관"),
    ("E", "정보과학관"),
    ("F", "서재필관"),
    ("G", "자연과학관"),
    ("H", "하워드관"),
    ("HM", "하워드기념관"),
    ("I", "국제교류관"),
    ("J", "J관"),
    ("JU", "J관지하"),
    ("K", "김옥균관"),
    ("M", "M동"),
    ("MC", "M동"),
    ("P", "21세기관"),
    ("PAU", "국제언어생활관지하"),
    ("PU", "21세기관지하"),
    ("S", "소월관"),
    ("SP", "SMART배재관"),
    ("T", "예술관"),
    ("W", "우남관"),
    ("Y", "Y관"),
    ("ZY", "ZY관"),
];

#[derive(Debug, Clone)]
pub struct BuildingResolver {
    names: HashMap<&'static str, &'static str>,
}

impl BuildingResolver {
    pub fn new() -> Self {
        BuildingResolver { names: BUILDINGS.iter().copied().collect() }
    }

    /// Devuelve `(building_code, building_name)`. Un código sin entrada en la
    /// tabla se usa como nombre; una sala vacía da dos cadenas vacías.
    pub fn resolve(&self, classroom: &str) -> (String, String) {
        let code = building_code(classroom);
        if code.is_empty() {
            return (String::new(), String::new());
        }
        let name = self.names.get(code.as_str()).map(|n| n.to_string()).unwrap_or_else(|| code.clone());
        (code, name)
    }

    pub fn name_for(&self, code: &str) -> Option<&'static str> {
        self.names.get(code).copied()
    }
}

impl Default for BuildingResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefijo de edificio: letras ASCII iniciales, o dígitos iniciales ("505-1"),
/// o un nombre en hangul ("체육관101").
pub fn building_code(classroom: &str) -> String {
    let classroom = classroom.trim();
    let leading = |pred: fn(&char) -> bool| classroom.chars().take_while(pred).collect::<String>();

    let alpha = leading(|c| c.is_ascii_alphabetic());
    if !alpha.is_empty() {
        return alpha.to_uppercase();
    }
    let digits = leading(|c| c.is_ascii_digit());
    if !digits.is_empty() {
        return digits;
    }
    leading(|c| ('가'..='힣').contains(c))
}
