use chrono::NaiveDate;
use encuestas_dashboard::data::{
    summary_from_csv, summary_to_csv, DataLoader, DataProcessor, DateFilter,
};
use encuestas_dashboard::stats::{Aggregator, CANONICAL_PARTIES};
use std::fs;

const EXPORT: &str = "\
START_DATE,interaction_user,STATUS,partido1_preferencia,partido1_apoyo,partido2_preferencia,partido2_apoyo,gobierno_calificacion
2025-05-14 09:01:12,True,completed,Morena,Programas sociales,PT,Costumbre,Bueno
2025-05-14 09:03:40,true,completed,PAN,Propuestas,PRI,Propuestas,Malo
2025-05-14 09:05:02,false,completed,,,,,
2025-05-14 09:07:55,false,no-answer,,,,,
2025-05-15 10:11:00,TRUE,completed,Morena,Programas sociales,Ninguno,Costumbre,Muy bueno
2025-05-15 10:15:30,true,busy,Movimiento Ciudadano,Candidato,PAN,Candidato,Excelente
2025-05-15 10:20:00,false,failed,,,,,
,true,completed,PRI,Propuestas,PRI,Propuestas,Bueno
sin fecha,true,completed,PRI,Propuestas,PRI,Propuestas,Bueno
";

fn load() -> (tempfile::TempDir, Vec<encuestas_dashboard::data::SurveyRecord>, usize) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encuestas.csv");
    fs::write(&path, EXPORT).unwrap();

    let mut loader = DataLoader::new();
    loader.load_csv(&path).unwrap();
    let dropped = loader.dropped_rows();
    (dir, loader.into_records(), dropped)
}

#[test]
fn whole_period() {
    let (_dir, records, dropped) = load();
    assert_eq!(records.len(), 7);
    assert_eq!(dropped, 2);

    let result = Aggregator::refresh(&records, &DateFilter::All).unwrap();

    assert_eq!(result.summary.count("Survey completed"), Some(4));
    assert_eq!(result.summary.count("Call connected"), Some(1));
    assert_eq!(result.summary.count("Call not answered"), Some(2));
    assert_eq!(result.summary.total(), 7);

    assert_eq!(result.preference_1.rows.len(), CANONICAL_PARTIES.len());
    assert_eq!(result.preference_1.rows[0].party, "Morena");
    assert_eq!(result.preference_1.rows[0].count, 2);
    assert_eq!(result.preference_2.count("PRI"), 1);

    assert_eq!(result.cross_tab_1.count("Programas sociales", "Morena"), 2);
    assert_eq!(result.cross_tab_2.reasons, vec!["Candidato", "Costumbre", "Propuestas"]);

    let approval: Vec<u64> = result.approval.buckets.iter().map(|b| b.count).collect();
    assert_eq!(approval, vec![0, 1, 0, 1, 1]);
}

#[test]
fn single_day_and_missing_day() {
    let (_dir, records, _) = load();

    let dates = DataProcessor::distinct_dates(&records);
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 5, 14).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
        ]
    );

    let day = Aggregator::refresh(&records, &DateFilter::Day(dates[1])).unwrap();
    assert_eq!(day.summary.total(), 3);
    assert_eq!(day.preference_1.count("PAN"), 0);
    assert_eq!(day.approval.count("Muy bueno"), 1);

    let missing = "2025-06-01".parse::<DateFilter>().unwrap();
    assert!(Aggregator::refresh(&records, &missing).is_none());
}

#[test]
fn day_without_surveys_still_ranks_all_parties() {
    let records: Vec<_> = load()
        .1
        .into_iter()
        .filter(|r| !r.interaction_flag)
        .collect();

    let result = Aggregator::aggregate(&records);
    let parties: Vec<&str> = result
        .preference_2
        .rows
        .iter()
        .map(|r| r.party.as_str())
        .collect();
    assert_eq!(parties, CANONICAL_PARTIES.to_vec());
    assert!(result.cross_tab_1.is_empty());
    assert_eq!(result.approval.total(), 0);
    assert_eq!(result.summary.count("Survey completed"), None);
}

#[test]
fn summary_download_round_trip() {
    let (_dir, records, _) = load();
    let summary = Aggregator::aggregate(&records).summary;

    let bytes = summary_to_csv(&summary).unwrap();
    assert!(String::from_utf8(bytes.clone())
        .unwrap()
        .starts_with("tipo_interaccion,conteo\n"));

    let parsed = summary_from_csv(&bytes).unwrap();
    let expected: Vec<(String, u64)> = summary
        .rows
        .iter()
        .map(|r| (r.label.clone(), r.count))
        .collect();
    assert_eq!(parsed, expected);
}
