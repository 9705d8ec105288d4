use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use crate::error::Result;

/// Convierte un `Data` de calamine a String. Los flotantes enteros (3.0) se
/// escriben sin decimales para que "학점" y "분반" queden como en el export.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normaliza encabezados eliminando espacios (incluidos saltos de línea como
/// en "이수\n구분") y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lee la primera hoja con contenido y la devuelve como filas de texto.
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_owned();

    for name in names.iter() {
        let range = workbook.worksheet_range(name)?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect())
            .filter(|row: &Vec<String>| row.iter().any(|c| !c.is_empty()))
            .collect();
        if !rows.is_empty() {
            return Ok(rows);
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::String("  W310(수7) ".into())), "W310(수7)");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("이수\n구분"), "이수구분");
        assert_eq!(normalize_header(" Student Count "), "studentcount");
    }
}
