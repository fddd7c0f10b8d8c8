use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, LargeStringArray, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use gradview::data::loader::{LoadError, load_file};
use gradview::data::model::Record;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn csv_columns_may_come_in_any_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "cleaned_data.csv",
        "admission_year, salary ,employed,sector,state,course\n\
         2021,4500.50,Sim,Tecnologia,SP,Computação\n\
         2019,0,Não,Saúde,BA,Enfermagem\n",
    );

    let table = load_file(&path).unwrap();
    assert_eq!(
        table.to_records(),
        vec![
            Record {
                state: "SP".into(),
                sector: "Tecnologia".into(),
                employed: "Sim".into(),
                salary: 4500.5,
                admission_year: 2021,
            },
            Record {
                state: "BA".into(),
                sector: "Saúde".into(),
                employed: "Não".into(),
                salary: 0.0,
                admission_year: 2019,
            },
        ]
    );
}

#[test]
fn csv_with_only_a_header_is_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "empty.csv", "state,sector,employed,salary,admission_year\n");
    let table = load_file(&path).unwrap();
    assert!(table.is_empty());
}

#[test]
fn csv_missing_column_is_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "data.csv",
        "state,sector,employed,salary\nSP,Saúde,Sim,3000\n",
    );
    match load_file(&path) {
        Err(LoadError::MissingColumn(col)) => assert_eq!(col, "admission_year"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn csv_unparsable_value_is_malformed_with_row_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "data.csv",
        "state,sector,employed,salary,admission_year\n\
         SP,Saúde,Sim,3000,2020\n\
         RJ,Saúde,Sim,three thousand,2020\n",
    );
    match load_file(&path) {
        Err(LoadError::Malformed { row, .. }) => assert_eq!(row, 2),
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn csv_negative_salary_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "data.csv",
        "state,sector,employed,salary,admission_year\nSP,Saúde,Sim,-10,2020\n",
    );
    assert!(matches!(load_file(&path), Err(LoadError::Malformed { row: 1, .. })));
}

#[test]
fn loading_twice_gives_equal_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "data.csv",
        "state,sector,employed,salary,admission_year\nSP,Saúde,Sim,3000,2020\nMG,Comércio,Não,0,2023\n",
    );
    assert_eq!(load_file(&path).unwrap(), load_file(&path).unwrap());
}

#[test]
fn json_records_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "data.json",
        r#"[
            {"state": "PR", "sector": "Indústria", "employed": "Sim", "salary": 3600, "admission_year": 2022},
            {"state": "SC", "sector": "Serviços", "employed": "Não", "salary": 0.0, "admission_year": 2024}
        ]"#,
    );
    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.salaries(), &[3600.0, 0.0]);
    assert_eq!(table.admission_years(), &[2022, 2024]);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "data.json", r#"[{"state": "PR"}]"#);
    assert!(matches!(load_file(&path), Err(LoadError::Json(_))));
}

#[test]
fn parquet_with_wide_types_is_cast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("state", DataType::LargeUtf8, false),
        Field::new("sector", DataType::Utf8, false),
        Field::new("employed", DataType::Utf8, false),
        Field::new("salary", DataType::Int64, false),
        Field::new("admission_year", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(LargeStringArray::from(vec!["SP", "RS"])),
            Arc::new(StringArray::from(vec!["Tecnologia", "Educação"])),
            Arc::new(StringArray::from(vec!["Sim", "Não"])),
            Arc::new(Int64Array::from(vec![5200, 0])),
            Arc::new(Int64Array::from(vec![2020, 2023])),
        ],
    )
    .unwrap();

    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(&path).unwrap();
    assert_eq!(table.states(), &["SP".to_string(), "RS".to_string()]);
    assert_eq!(table.salaries(), &[5200.0, 0.0]);
    assert_eq!(table.admission_years(), &[2020, 2023]);
}

#[test]
fn parquet_missing_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.parquet");

    let schema = Arc::new(Schema::new(vec![Field::new("state", DataType::Utf8, false)]));
    let batch =
        RecordBatch::try_new(schema.clone(), vec![Arc::new(StringArray::from(vec!["SP"]))]).unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    assert!(matches!(load_file(&path), Err(LoadError::MissingColumn(c)) if c == "sector"));
}

#[test]
fn garbage_parquet_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "data.parquet", "definitely not parquet");
    assert!(matches!(load_file(&path), Err(LoadError::Parquet(_))));
}

#[test]
fn parquet_fractional_year_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("state", DataType::Utf8, false),
        Field::new("sector", DataType::Utf8, false),
        Field::new("employed", DataType::Utf8, false),
        Field::new("salary", DataType::Float64, false),
        Field::new("admission_year", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["SP", "RJ"])),
            Arc::new(StringArray::from(vec!["Saúde", "Saúde"])),
            Arc::new(StringArray::from(vec!["Sim", "Sim"])),
            Arc::new(Float64Array::from(vec![3000.0, 3100.0])),
            Arc::new(Float64Array::from(vec![2021.0, 2020.7])),
        ],
    )
    .unwrap();

    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    assert!(matches!(load_file(&path), Err(LoadError::Malformed { row: 2, .. })));
}
