// Estructuras de datos principales

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fila cruda de la oferta de cursos, tal como llega del export (JSON u hoja).
/// Los nombres de campo aceptan tanto las cabeceras coreanas del export como
/// claves en inglés.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCourseRecord {
    #[serde(default, alias = "과목코드", alias = "교과목코드", deserialize_with = "string_or_number")]
    pub code: String,
    #[serde(default, alias = "과목명", alias = "교과목명", deserialize_with = "string_or_number")]
    pub subject: String,
    #[serde(default, alias = "분반", alias = "class_number", deserialize_with = "string_or_number")]
    pub section: String,
    #[serde(default, alias = "담당교수", deserialize_with = "string_or_number")]
    pub professor: String,
    #[serde(default, alias = "학점", alias = "credits", deserialize_with = "string_or_number")]
    pub credit: String,
    #[serde(default, alias = "강의실/강의시간", alias = "강의시간", deserialize_with = "string_or_number")]
    pub schedule: String,
    #[serde(default, alias = "비고", deserialize_with = "string_or_number")]
    pub remarks: String,
    #[serde(default, alias = "이수\n구분", alias = "이수구분", alias = "학과", deserialize_with = "string_or_number")]
    pub department: String,
    #[serde(default, alias = "대학", deserialize_with = "string_or_number")]
    pub college: String,
    #[serde(default, alias = "수강\n인원", alias = "수강인원", deserialize_with = "count_or_none")]
    pub student_count: Option<u32>,
}

/// Día canónico de una sesión; `Online` es el centinela de cursos sin sala.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Online,
}

impl Day {
    /// Orden de presentación usado en los resúmenes
    pub const ALL: [Day; 7] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat, Day::Online];

    /// Símbolo coreano de un día (`월`..`토`) -> día canónico
    pub fn from_symbol(symbol: char) -> Option<Day> {
        match symbol {
            '월' => Some(Day::Mon),
            '화' => Some(Day::Tue),
            '수' => Some(Day::Wed),
            '목' => Some(Day::Thu),
            '금' => Some(Day::Fri),
            '토' => Some(Day::Sat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
            Day::Sat => "SAT",
            Day::Online => "ONLINE",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hora de reloj en minutos desde medianoche. Se serializa como "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(u16);

impl ClockTime {
    const MINUTES_PER_DAY: u32 = 24 * 60;

    pub fn from_hm(hour: u16, minute: u16) -> Self {
        ClockTime(((hour as u32 * 60 + minute as u32) % Self::MINUTES_PER_DAY) as u16)
    }

    /// Suma minutos con acarreo de hora; el resultado vuelve a 00:00 pasada la medianoche.
    pub fn plus_minutes(self, minutes: u16) -> Self {
        let total = self.0 as u32 + minutes as u32;
        let (h, m) = (total / 60, total % 60);
        ClockTime::from_hm((h % 24) as u16, m as u16)
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Una sesión concreta ya resuelta: día, rango horario y sala.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSlot {
    pub day: Day,
    pub start: ClockTime,
    pub end: ClockTime,
    pub classroom: String,
    pub building_code: String,
    pub building_name: String,
}

/// Modalidad de la fila de salida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Offline,
    Online,
}

/// Registro plano de salida: un curso por sesión, o el centinela ONLINE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCourseRecord {
    pub code: String,
    pub subject: String,
    pub professor: String,
    pub credit: String,
    pub section: String,
    pub day: Day,
    pub start: String,
    pub end: String,
    pub time: String,
    pub classroom: String,
    pub building_code: String,
    pub building_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub college: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_count: Option<u32>,
    #[serde(rename = "type")]
    pub delivery: DeliveryType,
}

impl NormalizedCourseRecord {
    pub fn is_online(&self) -> bool {
        self.day == Day::Online
    }
}

// Los exports mezclan celdas de texto y numéricas ("3" y 3 en la misma columna).
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

fn count_or_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_carry() {
        assert_eq!(ClockTime::from_hm(9, 30).plus_minutes(75).to_string(), "10:45");
        assert_eq!(ClockTime::from_hm(12, 0).plus_minutes(30).to_string(), "12:30");
        // sin manejo especial de medianoche: se envuelve módulo un día
        assert_eq!(ClockTime::from_hm(23, 30).plus_minutes(45).to_string(), "00:15");
    }

    #[test]
    fn test_raw_record_korean_keys() {
        let json = r#"{"과목코드":"PSY1001","과목명":"심리학개론","분반":"01","담당교수":"김철수",
            "학점":3,"강의실/강의시간":"W310(수7)","비고":"","이수\n구분":"교양","수강\n인원":"35"}"#;
        let raw: RawCourseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.code, "PSY1001");
        assert_eq!(raw.credit, "3");
        assert_eq!(raw.schedule, "W310(수7)");
        assert_eq!(raw.department, "교양");
        assert_eq!(raw.student_count, Some(35));
    }

    #[test]
    fn test_day_serialization() {
        assert_eq!(serde_json::to_string(&Day::Wed).unwrap(), "\"WED\"");
        assert_eq!(serde_json::to_string(&Day::Online).unwrap(), "\"ONLINE\"");
        assert_eq!(Day::from_symbol('일'), None);
    }
}
