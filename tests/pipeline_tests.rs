use std::path::{Path, PathBuf};
use timetable_flat::lookups::ClassroomEntry;
use timetable_flat::report::verify_output_file;
use timetable_flat::schedule::PeriodTable;
use timetable_flat::excel::leer_oferta;
use timetable_flat::{Config, Day, DeliveryType, NormalizedCourseRecord, PeriodDialect, run};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/oferta_sample.json")
}

fn read_output(path: &Path) -> Vec<NormalizedCourseRecord> {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_run_sample_uniform() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("courses.json");
    let report = run(&Config::new(fixture(), output.clone(), PeriodDialect::Uniform)).unwrap();

    assert_eq!(report.raw_records, 8);
    assert_eq!(report.processed, 7);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.summary.total_records, 8);
    assert_eq!(report.summary.online_records, 2);
    assert!(report.lookups.is_none());
    assert!(report.coverage.is_none());

    let records = read_output(&output);
    assert_eq!(records.len(), 8);

    let psy: Vec<_> = records.iter().filter(|r| r.code == "PSY1001").collect();
    assert_eq!(psy.len(), 2);
    assert_eq!(psy[0].subject, "심리학개론");
    assert_eq!(psy[0].day, Day::Wed);
    assert_eq!(psy[0].time, "12:00-12:30");
    assert_eq!(psy[1].day, Day::Fri);
    assert_eq!(psy[0].student_count, Some(42));

    let chapel = records.iter().find(|r| r.code == "GEN22102").unwrap();
    assert_eq!(chapel.subject, "채플2");
    assert_eq!(chapel.day, Day::Online);
    assert_eq!(chapel.delivery, DeliveryType::Online);

    // observación "온라인" gana sobre un horario parseable
    let capstone = records.iter().find(|r| r.code == "CSE4001").unwrap();
    assert!(capstone.is_online());
    assert_eq!(capstone.professor, "최 지훈");

    let music: Vec<_> = records.iter().filter(|r| r.code == "MUS1100").collect();
    assert_eq!(music.len(), 1);
    assert_eq!(music[0].day, Day::Sat);

    // sin centinelas ONLINE duplicados para un mismo curso
    assert!(records.iter().filter(|r| r.code == "GEN22102").count() == 1);
}

#[test]
fn test_output_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("courses.json");
    run(&Config::new(fixture(), output.clone(), PeriodDialect::Uniform)).unwrap();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["day"], "WED");
    assert_eq!(first["type"], "offline");
    assert_eq!(first["start"], "12:00");
    assert_eq!(first["building_code"], "W");

    let online = value
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["code"] == "GEN22102")
        .unwrap();
    assert_eq!(online["day"], "ONLINE");
    assert_eq!(online["type"], "online");
    assert_eq!(online["time"], "");
    assert!(online.get("student_count").is_none());
}

#[test]
fn test_dialect_changes_times_not_counts() {
    let dir = tempfile::tempdir().unwrap();
    let uniform_out = dir.path().join("uniform.json");
    let mixed_out = dir.path().join("mixed.json");
    run(&Config::new(fixture(), uniform_out.clone(), PeriodDialect::Uniform)).unwrap();
    run(&Config::new(fixture(), mixed_out.clone(), PeriodDialect::Mixed)).unwrap();

    let uniform = read_output(&uniform_out);
    let mixed = read_output(&mixed_out);
    assert_eq!(uniform.len(), mixed.len());

    let eng = |records: &[NormalizedCourseRecord]| records.iter().find(|r| r.code == "ENG2002").unwrap().time.clone();
    assert_eq!(eng(&uniform), "14:00-14:50");
    assert_eq!(eng(&mixed), "16:30-17:45");
}

#[test]
fn test_lookups_and_verify() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("courses.json");
    let lookups_dir = dir.path().join("lookups");
    let mut config = Config::new(fixture(), output, PeriodDialect::Uniform);
    config.lookups_dir = Some(lookups_dir.clone());
    config.verify = true;

    let report = run(&config).unwrap();
    let coverage = report.coverage.unwrap();
    assert!(coverage.is_consistent(), "{:?}", coverage);
    assert_eq!(coverage.emitted_records, 8);
    assert_eq!(coverage.min_expected_records(), 6);
    assert_eq!(coverage.checked_slots, 4);

    let (professors_path, classrooms_path) = report.lookups.unwrap();
    assert_eq!(professors_path, lookups_dir.join(timetable_flat::PROFESSORS_FILE));

    let professors: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&professors_path).unwrap()).unwrap();
    assert_eq!(professors.len(), 5);
    assert!(professors.contains(&"이영희".to_string()));
    assert!(professors.contains(&"박민수".to_string()));
    assert!(!professors.iter().any(|p| p == "01"));
    let mut sorted = professors.clone();
    sorted.sort();
    assert_eq!(professors, sorted);

    let classrooms: Vec<ClassroomEntry> =
        serde_json::from_str(&std::fs::read_to_string(&classrooms_path).unwrap()).unwrap();
    let rooms: Vec<&str> = classrooms.iter().map(|c| c.room.as_str()).collect();
    assert_eq!(classrooms.len(), 4);
    for room in ["W310", "P203", "J202", "ZZ101"] {
        assert!(rooms.contains(&room), "falta la sala {}", room);
    }
}

#[test]
fn test_failed_read_leaves_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("courses.json");
    std::fs::write(&output, "[]").unwrap();

    let missing = dir.path().join("no_existe.json");
    assert!(run(&Config::new(missing, output.clone(), PeriodDialect::Uniform)).is_err());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn test_rerun_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("courses.json");
    std::fs::write(&output, "basura previa").unwrap();
    run(&Config::new(fixture(), output.clone(), PeriodDialect::Uniform)).unwrap();
    assert_eq!(read_output(&output).len(), 8);
    assert!(!dir.path().join("courses.json.tmp").exists());
}

#[test]
fn test_verify_catches_edited_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("courses.json");
    let mut config = Config::new(fixture(), output.clone(), PeriodDialect::Uniform);
    config.verify = true;
    assert!(run(&config).unwrap().coverage.unwrap().is_consistent());

    // la salida se modifica a mano después de escribirse
    let mut records = read_output(&output);
    let eng = records.iter_mut().find(|r| r.code == "ENG2002").unwrap();
    eng.start = "13:00".to_string();
    std::fs::write(&output, serde_json::to_string_pretty(&records).unwrap()).unwrap();

    let raw = leer_oferta(fixture()).unwrap();
    let report = verify_output_file(&raw, &output, &PeriodTable::new(PeriodDialect::Uniform)).unwrap();
    assert!(!report.is_consistent());
    assert_eq!(report.time_mismatches.len(), 1);
    assert!(report.time_mismatches[0].starts_with("ENG2002"));
}
