use crate::error::{Error, Result};
use crate::excel::io::normalize_header;
use crate::models::RawCourseRecord;

/// Columnas reconocidas de la oferta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Code,
    Subject,
    Section,
    Professor,
    Credit,
    Schedule,
    Remarks,
    Department,
    College,
    StudentCount,
}

/// Identifica la columna a partir de un encabezado ya normalizado
fn column_for(header: &str) -> Option<Column> {
    let h = header;
    if h.contains("과목코드") || h == "code" {
        Some(Column::Code)
    } else if h.contains("과목명") || h == "subject" {
        Some(Column::Subject)
    } else if h == "분반" || h == "section" || h == "class_number" {
        Some(Column::Section)
    } else if h.contains("교수") || h == "professor" {
        Some(Column::Professor)
    } else if h == "학점" || h == "credit" || h == "credits" {
        Some(Column::Credit)
    } else if h.contains("강의시간") || h == "schedule" {
        Some(Column::Schedule)
    } else if h == "비고" || h == "remarks" {
        Some(Column::Remarks)
    } else if h == "이수구분" || h == "학과" || h == "department" {
        Some(Column::Department)
    } else if h == "대학" || h == "college" {
        Some(Column::College)
    } else if h == "수강인원" || h == "student_count" || h == "studentcount" {
        Some(Column::StudentCount)
    } else {
        None
    }
}

/// Índices de columna detectados en la fila de encabezado
#[derive(Debug, Clone, Default)]
struct HeaderIndex {
    code: Option<usize>,
    subject: Option<usize>,
    section: Option<usize>,
    professor: Option<usize>,
    credit: Option<usize>,
    schedule: Option<usize>,
    remarks: Option<usize>,
    department: Option<usize>,
    college: Option<usize>,
    student_count: Option<usize>,
}

impl HeaderIndex {
    fn from_row(row: &[String]) -> Self {
        let mut idx = HeaderIndex::default();
        for (i, cell) in row.iter().enumerate() {
            let slot = match column_for(&normalize_header(cell)) {
                Some(Column::Code) => &mut idx.code,
                Some(Column::Subject) => &mut idx.subject,
                Some(Column::Section) => &mut idx.section,
                Some(Column::Professor) => &mut idx.professor,
                Some(Column::Credit) => &mut idx.credit,
                Some(Column::Schedule) => &mut idx.schedule,
                Some(Column::Remarks) => &mut idx.remarks,
                Some(Column::Department) => &mut idx.department,
                Some(Column::College) => &mut idx.college,
                Some(Column::StudentCount) => &mut idx.student_count,
                None => continue,
            };
            // la primera columna que coincide gana
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        idx
    }
}

fn cell(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i)).map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Convierte las filas de una hoja en registros crudos. El encabezado se busca
/// en las tres primeras filas (algunos exports traen un título encima).
pub fn records_from_rows(rows: &[Vec<String>]) -> Result<Vec<RawCourseRecord>> {
    let (header_pos, index) = rows
        .iter()
        .take(3)
        .enumerate()
        .map(|(pos, row)| (pos, HeaderIndex::from_row(row)))
        .find(|(_, idx)| idx.code.is_some())
        .ok_or_else(|| Error::MissingColumn("과목코드".to_string()))?;

    let mut records = Vec::new();
    for row in rows.iter().skip(header_pos + 1) {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        records.push(RawCourseRecord {
            code: cell(row, index.code),
            subject: cell(row, index.subject),
            section: cell(row, index.section),
            professor: cell(row, index.professor),
            credit: cell(row, index.credit),
            schedule: cell(row, index.schedule),
            remarks: cell(row, index.remarks),
            department: cell(row, index.department),
            college: cell(row, index.college),
            student_count: cell(row, index.student_count).parse::<u32>().ok(),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_records_from_rows_with_title_row() {
        let rows = vec![
            row(&["2025-2학기 개설강좌 리스트"]),
            row(&["No", "과목코드", "과목명", "분반", "학점", "담당교수", "강의실/강의시간", "비고", "수강\n인원"]),
            row(&["1", "PSY1001", "심리학개론", "01", "3", "김철수", "W310(수7)", "", "35"]),
            row(&["", "", "", "", "", "", "", "", ""]),
            row(&["2", "GEN22102 채플2", "", "02", "1", "이영희", "(?)", "온라인", ""]),
        ];
        let records = records_from_rows(&rows).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "PSY1001");
        assert_eq!(records[0].schedule, "W310(수7)");
        assert_eq!(records[0].student_count, Some(35));
        assert_eq!(records[1].remarks, "온라인");
        assert_eq!(records[1].student_count, None);
    }

    #[test]
    fn test_missing_code_column() {
        let rows = vec![row(&["이름", "시간"]), row(&["a", "b"])];
        assert!(matches!(records_from_rows(&rows), Err(Error::MissingColumn(_))));
    }
}
