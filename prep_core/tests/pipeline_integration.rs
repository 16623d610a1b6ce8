//! End-to-end tests for the preprocessing pipeline over files on disk.
//!
//! These tests ensure that:
//! 1. Every supported format loads and flows through the full transform chain
//! 2. The quality gate halts the run with the offending columns
//! 3. Unsupported extensions fail before any reading happens

use std::io::Write;
use std::path::Path;

use tabular_prep::core::{Cell, ColumnKind};
use tabular_prep::{
    process, LoadOptions, PrepError, PreprocessConfig, PreprocessPipeline, TableLoader,
};
use tempfile::NamedTempFile;

// ==================== Helper Functions ====================

fn write_fixture(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

const RAW_TRANSACTIONS: &str = "\
Transaction ID #,Fech@_Registro,Nombre Cliente (RAW),No. Cliente,Monto $$,Score (1-5),Notes & Comments,¿Es_Fraude?
1,2025-01-01,José,C-001,$1000,Uno,,0
2,2025-01-02,María,C-002,\"$2,000\",Dos,Revisar,1
3,2025-01-03,nan,C-003,$3000,Tres,  ,0
";

// ==================== Delimited Files ====================

#[test]
fn test_csv_end_to_end() {
    let file = write_fixture(".csv", RAW_TRANSACTIONS.as_bytes());

    let (table, report) = process(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(
        &table.column_names()[..8],
        &[
            "transaction_id",
            "fecha_registro",
            "nombre_cliente_raw",
            "num_cliente",
            "monto",
            "score",
            "comentarios",
            "fraude",
        ]
    );

    for name in ["monto", "score", "fraude", "num_cliente"] {
        assert!(table.column(name).unwrap().is_numeric(), "{} should be numeric", name);
    }
    for name in ["monto", "score", "fraude"] {
        assert!(table.contains(&format!("{}_nan", name)), "missing flag for {}", name);
    }

    assert_eq!(
        table.column("monto").unwrap().numbers(),
        vec![Some(1000.0), Some(2000.0), Some(3000.0)]
    );
    assert_eq!(
        table.column("score").unwrap().numbers(),
        vec![Some(1.0), Some(2.0), Some(3.0)]
    );
    assert_eq!(
        table.column("num_cliente").unwrap().numbers(),
        vec![Some(1.0), Some(2.0), Some(3.0)]
    );
    assert_eq!(table.column("fecha_registro").unwrap().kind(), ColumnKind::Date);

    let nombres = table.column("nombre_cliente_raw").unwrap();
    assert_eq!(nombres.get(0), Some(&Cell::text("Jose")));
    assert!(nombres.get(2).unwrap().is_missing());

    // Flags never show up in the report
    assert_eq!(report.len(), 8);
    assert!(report.iter().all(|(name, _)| !name.ends_with("_nan")));
    assert_eq!(report.get("comentarios"), Some(2));
    assert_eq!(report.get("nombre_cliente_raw"), Some(1));
    assert_eq!(report.get("monto"), Some(0));
    assert_eq!(table.width(), 16);
}

#[test]
fn test_semicolon_latin1_csv_with_config() {
    let content = b"Monto;Cliente\n$10;Jos\xe9\n$20;Ana\n";
    let file = write_fixture(".txt", content);

    let config = PreprocessConfig::from_toml_str(
        r#"
        critical_columns = ["monto"]

        [load]
        delimiter = ";"
        encoding = "latin1"
        "#,
    )
    .unwrap();

    let result = PreprocessPipeline::with_config(config).process(file.path()).unwrap();
    let clientes = result.table.column("cliente").unwrap();

    assert_eq!(clientes.get(0), Some(&Cell::text("Jose")));
    assert_eq!(
        result.table.column("monto").unwrap().numbers(),
        vec![Some(10.0), Some(20.0)]
    );
}

#[test]
fn test_header_collision_keeps_last_column() {
    let content = "Monto,Amount,Fraude\n$1,$5,0\n$2,$6,1\n";
    let file = write_fixture(".csv", content.as_bytes());

    let (table, _) = process(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(&table.column_names()[..2], &["monto", "fraude"]);
    assert_eq!(
        table.column("monto").unwrap().numbers(),
        vec![Some(5.0), Some(6.0)]
    );
}

// ==================== Quality Gate ====================

#[test]
fn test_gate_failure_halts_processing() {
    let content = "Monto,Fraude\n$100,0\n,1\nabc,0\n$400,\n";
    let file = write_fixture(".csv", content.as_bytes());

    let err = process(file.path(), &LoadOptions::default()).unwrap_err();

    assert!(err.is_quality_failure());
    let breaches = err.breaches();
    assert_eq!(breaches.len(), 2);

    assert_eq!(breaches[0].column, "fraude");
    assert_eq!(breaches[0].missing, 1);
    assert!((breaches[0].ratio - 0.25).abs() < 1e-12);

    assert_eq!(breaches[1].column, "monto");
    assert_eq!(breaches[1].missing, 2);
    assert!((breaches[1].ratio - 0.5).abs() < 1e-12);

    let message = err.to_string();
    assert!(message.contains("monto"));
    assert!(message.contains("fraude"));
}

#[test]
fn test_gate_threshold_is_configurable() {
    let content = "Monto,Fraude\n$100,0\n,1\n$300,0\n$400,1\n";
    let file = write_fixture(".csv", content.as_bytes());

    let strict = PreprocessPipeline::new().process(file.path());
    assert!(matches!(strict, Err(PrepError::CriticalQualityFailure { .. })));

    let config = PreprocessConfig {
        null_threshold: 0.25,
        ..PreprocessConfig::default()
    };
    let relaxed = PreprocessPipeline::with_config(config).process(file.path()).unwrap();
    assert_eq!(relaxed.report.get("monto"), Some(1));
    assert_eq!(relaxed.report.missing_ratio("monto"), Some(0.25));
}

// ==================== Other Formats ====================

#[test]
fn test_json_records_end_to_end() {
    let content = r#"[
        {"Monto $$": "$1,500", "Score": "cinco", "¿Es Fraude?": 0, "Comentario": "Ñandú"},
        {"Monto $$": 250.5, "Score": "cuatro", "¿Es Fraude?": 1, "Comentario": null}
    ]"#;
    let file = write_fixture(".json", content.as_bytes());

    let (table, report) = process(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(
        table.column("monto").unwrap().numbers(),
        vec![Some(1500.0), Some(250.5)]
    );
    assert_eq!(
        table.column("score").unwrap().numbers(),
        vec![Some(5.0), Some(4.0)]
    );
    assert_eq!(
        table.column("comentarios").unwrap().get(0),
        Some(&Cell::text("Nandu"))
    );
    assert_eq!(report.get("comentarios"), Some(1));
    assert_eq!(
        table.column("comentarios_nan").unwrap().numbers(),
        vec![Some(0.0), Some(1.0)]
    );
}

#[test]
fn test_xlsx_dates_survive_cleaning() {
    let file = NamedTempFile::with_suffix(".xlsx").unwrap();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let date_format = rust_xlsxwriter::Format::new().set_num_format("dd/mm/yyyy");

    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Fecha_Registro").unwrap();
    sheet.write_string(0, 1, "Importe").unwrap();
    sheet.write_string(0, 2, "Fraude").unwrap();
    // Excel serial days for 2025-01-01 and 2025-01-02
    sheet.write_number_with_format(1, 0, 45658.0, &date_format).unwrap();
    sheet.write_number_with_format(2, 0, 45659.0, &date_format).unwrap();
    sheet.write_string(1, 1, "$1,200").unwrap();
    sheet.write_number(2, 1, 300.0).unwrap();
    sheet.write_number(1, 2, 0.0).unwrap();
    sheet.write_number(2, 2, 1.0).unwrap();
    workbook.save(file.path()).unwrap();

    let (table, report) = process(file.path(), &LoadOptions::default()).unwrap();

    let fechas = table.column("fecha_registro").unwrap();
    assert_eq!(fechas.kind(), ColumnKind::Date);
    assert_eq!(
        fechas.get(1),
        Some(&Cell::Date(chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()))
    );
    assert_eq!(
        table.column("monto").unwrap().numbers(),
        vec![Some(1200.0), Some(300.0)]
    );
    assert_eq!(report.get("fecha_registro"), Some(0));
}

#[test]
fn test_unsupported_format() {
    let file = write_fixture(".parquet", b"PAR1");

    let err = process(file.path(), &LoadOptions::default()).unwrap_err();
    match err {
        PrepError::UnsupportedFormat { extension } => assert_eq!(extension, ".parquet"),
        other => panic!("Expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_read_failure() {
    let result = process(Path::new("/nonexistent/transacciones.csv"), &LoadOptions::default());
    assert!(matches!(result, Err(PrepError::ReadFailure { .. })));
}

#[test]
fn test_registered_extension_is_used() {
    let file = write_fixture(".dat", b"Monto,Fraude\n$7,0\n");

    let mut loader = TableLoader::new();
    loader.register("dat", tabular_prep::io::ReaderKind::Delimited);

    let result = PreprocessPipeline::new()
        .with_loader(loader)
        .process(file.path())
        .unwrap();
    assert_eq!(result.table.column("monto").unwrap().numbers(), vec![Some(7.0)]);
}
