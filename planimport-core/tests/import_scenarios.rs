// End-to-end imports through the public facade.
use chrono::{NaiveDate, NaiveTime};
use planimport_core::{
    AvailabilityStatus, Cell, ImportFile, SequentialIds, Table, parse, parse_path, parse_table,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn vevent(uid: &str, summary: &str, day: u32, with_end: bool) -> String {
    let mut out = format!(
        "BEGIN:VEVENT\r\nUID:{uid}\r\nSUMMARY:{summary}\r\nDTSTART:202503{day:02}T080000Z\r\n"
    );
    if with_end {
        out.push_str(&format!("DTEND:202503{day:02}T170000Z\r\n"));
    }
    out.push_str("END:VEVENT\r\n");
    out
}

#[test]
fn ics_with_one_event_missing_dtend() {
    let mut ics = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//EN\r\n");
    ics.push_str(&vevent("1", "Cours", 3, true));
    ics.push_str(&vevent("2", "Entreprise", 4, true));
    ics.push_str(&vevent("3", "Vacances", 5, false));
    ics.push_str(&vevent("4", "Absent", 6, true));
    ics.push_str(&vevent("5", "Disponible", 7, true));
    ics.push_str("END:VCALENDAR\r\n");

    let mut ids = SequentialIds::new("evt");
    let result = parse(&ImportFile::new("planning.ics", ics), "student-1", &mut ids);

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.events.len(), 4);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("Événement 3"));
    assert!(result.errors.is_empty());

    let statuses: Vec<_> = result.events.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![
            AvailabilityStatus::School,
            AvailabilityStatus::Company,
            AvailabilityStatus::Unavailable,
            AvailabilityStatus::Available,
        ]
    );
    assert!(result.events.iter().all(|e| e.subject_id == "student-1"));
    assert_eq!(result.events[0].id, "evt-1");
}

#[test]
fn empty_ics_file_is_rejected() {
    let mut ids = SequentialIds::new("evt");
    let result = parse(&ImportFile::new("vide.ics", Vec::new()), "s", &mut ids);

    assert!(!result.success);
    assert!(result.events.is_empty());
    assert_eq!(result.errors, vec!["Le fichier est vide"]);
}

#[test]
fn corrupt_ics_is_structural_not_zero_yield() {
    let mut ids = SequentialIds::new("evt");
    let corrupt = parse(&ImportFile::new("x.ics", "garbage"), "s", &mut ids);
    let no_events = parse(
        &ImportFile::new("x.ics", "BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n"),
        "s",
        &mut ids,
    );

    assert!(corrupt.errors[0].starts_with("Fichier invalide"));
    assert_eq!(no_events.errors, vec!["Aucun événement trouvé dans le fichier"]);
}

#[test]
fn csv_with_french_headers() {
    let mut csv = String::from("Date début,Date fin,Type\n");
    for day in 1..=10 {
        let kind = if day == 4 { "Vacances" } else { "Entreprise" };
        csv.push_str(&format!("{day:02}/09/2025,{day:02}/09/2025,{kind}\n"));
    }

    let mut ids = SequentialIds::new("evt");
    let result = parse(&ImportFile::new("export.CSV", csv), "s", &mut ids);

    assert!(result.success);
    assert_eq!(result.events.len(), 10);
    assert!(result.warnings.is_empty());

    let vacation = &result.events[3];
    assert_eq!(vacation.status, AvailabilityStatus::Vacation);
    assert_eq!(vacation.start_date, ymd(2025, 9, 4).and_time(NaiveTime::MIN));
    assert_eq!(vacation.note.as_deref(), Some("Vacances"));
    assert_eq!(
        result.events.iter().filter(|e| e.status == AvailabilityStatus::Company).count(),
        9
    );
}

#[test]
fn csv_inverted_range_is_isolated_to_one_warning() {
    let mut csv = String::from("Date début;Date fin;Type\n");
    for day in 1..=10 {
        // Data row 4 sits on physical line 5
        let end = if day == 4 { 1 } else { day };
        csv.push_str(&format!("{day:02}/10/2025;{end:02}/10/2025;Cours\n"));
    }

    let mut ids = SequentialIds::new("evt");
    let result = parse(&ImportFile::new("export.csv", csv), "s", &mut ids);

    assert!(result.success);
    assert_eq!(result.events.len(), 9);
    assert_eq!(
        result.warnings,
        vec!["Ligne 5 : la date de fin précède la date de début"]
    );
}

#[test]
fn csv_warnings_count_blank_lines() {
    let mut ids = SequentialIds::new("evt");
    let file = ImportFile::new("a.csv", "Date,Type\n\nhier,Cours\n");
    let result = parse(&file, "student-1", &mut ids);
    assert_eq!(result.warnings, vec!["Ligne 3 : date invalide"]);

    let file = ImportFile::new(
        "b.csv",
        "Date,Type\n13/01/2025,Cours\nok\n\n\nhier,Cours\n14/01/2025,Entreprise\n",
    );
    let result = parse(&file, "student-1", &mut ids);
    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.events.len(), 2);
    assert_eq!(
        result.warnings,
        vec!["Ligne 3 : date invalide", "Ligne 6 : date invalide"]
    );
}

#[test]
fn csv_two_digit_year_is_rejected() {
    let mut ids = SequentialIds::new("evt");
    let file = ImportFile::new("a.csv", "Date,Type\n13/01/25,Cours\n14/01/2025,Cours\n");
    let result = parse(&file, "student-1", &mut ids);

    assert!(result.success);
    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].start_date.date(), ymd(2025, 1, 14));
    assert_eq!(result.warnings, vec!["Ligne 2 : date invalide"]);
}

#[test]
fn csv_with_only_bad_rows_is_zero_yield() {
    let mut ids = SequentialIds::new("evt");
    let result = parse(
        &ImportFile::new("bad.csv", "Date,Type\nhier,Cours\n"),
        "s",
        &mut ids,
    );

    assert!(!result.success);
    assert_eq!(result.errors, vec!["Aucun événement valide trouvé dans le fichier"]);
    assert_eq!(result.warnings, vec!["Ligne 2 : date invalide"]);
}

#[test]
fn unsupported_extension_lists_supported_ones() {
    let mut ids = SequentialIds::new("evt");
    let result = parse(&ImportFile::new("notes.txt", "13/01/2025"), "s", &mut ids);

    assert!(!result.success);
    assert!(result.events.is_empty());
    assert!(result.errors[0].contains(".ics, .xlsx, .xls, .csv"));
}

#[test]
fn sheet_with_title_and_blank_rows() {
    let table = Table::new(vec![
        vec![Cell::from("Calendrier de l'alternant"), Cell::Empty, Cell::Empty, Cell::Empty],
        vec![Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
        vec![
            Cell::from("Date de début"),
            Cell::from("Date de fin"),
            Cell::from("Statut"),
            Cell::from("Remarque"),
        ],
        vec![Cell::Number(45670.0), Cell::Number(45674.0), Cell::from("Formation"), Cell::Empty],
        vec![Cell::Number(45677.0), Cell::from("oops"), Cell::from("Entreprise"), Cell::Empty],
    ]);

    let mut ids = SequentialIds::new("evt");
    let result = parse_table(&table, "s", &mut ids);

    assert!(result.success);
    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].start_date.date(), ymd(2025, 1, 13));
    assert_eq!(result.events[0].end_date.date(), ymd(2025, 1, 17));
    assert_eq!(result.events[0].status, AvailabilityStatus::School);
    // Header on sheet row 3, so the first data row is row 4
    assert_eq!(result.warnings, vec!["Ligne 5 : date invalide"]);
}

#[test]
fn weekly_grid_school_code() {
    let table = Table::from_text_rows([
        vec!["Planning 2024-2025", "", "", "", "", "", ""],
        vec!["N° Semaine", "Date", "LU", "MA", "ME", "JE", "VE"],
        vec!["3", "13/01/2025", "7", "", "", "", ""],
    ]);

    let mut ids = SequentialIds::new("evt");
    let result = parse_table(&table, "s", &mut ids);

    assert!(result.success);
    assert_eq!(result.events.len(), 5);
    let monday = &result.events[0];
    assert_eq!(monday.start_date.date(), ymd(2025, 1, 13));
    assert_eq!(monday.status, AvailabilityStatus::School);
    assert!(result.events[1..]
        .iter()
        .all(|e| e.status == AvailabilityStatus::Company));
}

#[test]
fn table_without_header_names_both_layouts() {
    let table = Table::from_text_rows([vec!["a"], vec!["b", "c"]]);
    let mut ids = SequentialIds::new("evt");
    let result = parse_table(&table, "s", &mut ids);

    assert!(!result.success);
    assert!(result.errors[0].contains("planning hebdomadaire"));
    assert!(result.errors[0].contains("liste d'événements"));
}

#[test]
fn invalid_workbook_bytes_fail_cleanly() {
    let mut ids = SequentialIds::new("evt");
    let result = parse(&ImportFile::new("planning.xlsx", "not a zip"), "s", &mut ids);

    assert!(!result.success);
    assert!(result.errors[0].starts_with("Fichier invalide"));
}

#[test]
fn day_bounds_hold_for_every_event() {
    let csv = "Start,End,Type\n2024-02-28,2024-03-01,Cours\n2024-12-31,2024-12-31,Congé\n";
    let mut ids = SequentialIds::new("evt");
    let result = parse(&ImportFile::new("a.csv", csv), "s", &mut ids);

    for event in &result.events {
        assert_eq!(event.start_date.time(), NaiveTime::MIN);
        let next_day = event.end_date.date().succ_opt().unwrap().and_time(NaiveTime::MIN);
        assert_eq!(next_day - event.end_date, chrono::Duration::milliseconds(1));
        assert!(event.end_date >= event.start_date);
    }
}

#[tokio::test]
async fn parse_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dispo.csv");
    std::fs::write(&path, "Date;Type\n13/01/2025;Disponible\n").unwrap();

    let mut ids = SequentialIds::new("evt");
    let result = parse_path(&path, "s", &mut ids).await;

    assert!(result.success);
    assert_eq!(result.events[0].status, AvailabilityStatus::Available);
}

#[tokio::test]
async fn parse_path_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut ids = SequentialIds::new("evt");
    let result = parse_path(dir.path().join("absent.ics"), "s", &mut ids).await;

    assert!(!result.success);
    assert!(result.errors[0].starts_with("Impossible de lire le fichier"));
}
