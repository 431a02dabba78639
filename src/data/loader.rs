use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::clean::clean;
use super::model::{FundingDataset, RawRecord};

/// Columns every input file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Industry",
    "Funding_Stage",
    "Year",
    "Funding_Amount",
    "Contact_Email",
    "City",
];

/// Input file does not match the expected funding-record schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load, clean, and index a funding dataset from a file. Dispatch by
/// extension.
///
/// Supported formats:
/// * `.csv`     – header row with the columns in [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "Industry": ..., "Year": ..., ... }, ...]`
/// * `.parquet` – flat scalar columns with the same names
///
/// The schema is validated before rows are parsed; a missing column aborts
/// the load with an error naming it.
pub fn load_file(path: &Path) -> Result<FundingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    Ok(FundingDataset::from_records(clean(raw)))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming at least the required columns. An empty
/// `Contact_Email` cell is treated as null.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &'static str| -> Result<usize, SchemaError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(SchemaError::MissingColumn(name))
    };
    let industry_idx = col("Industry")?;
    let stage_idx = col("Funding_Stage")?;
    let year_idx = col("Year")?;
    let amount_idx = col("Funding_Amount")?;
    let email_idx = col("Contact_Email")?;
    let city_idx = col("City")?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let year: i32 = cell(year_idx)
            .parse()
            .with_context(|| format!("CSV row {row_no}: Year '{}' is not an integer", cell(year_idx)))?;
        let amount: f64 = cell(amount_idx).parse().with_context(|| {
            format!(
                "CSV row {row_no}: Funding_Amount '{}' is not a number",
                cell(amount_idx)
            )
        })?;

        let email = cell(email_idx);
        rows.push(RawRecord {
            industry: cell(industry_idx).to_string(),
            stage: cell(stage_idx).to_string(),
            year,
            amount,
            contact_email: (!email.is_empty()).then(|| email.to_string()),
            city: cell(city_idx).to_string(),
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Industry": "Fintech",
///     "Funding_Stage": "Seed",
///     "Year": 2021,
///     "Funding_Amount": 5000000.0,
///     "Contact_Email": "founder@acme.io",
///     "City": "Bangalore"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |name: &'static str| -> Result<&JsonValue> {
            obj.get(name)
                .ok_or(SchemaError::MissingColumn(name))
                .with_context(|| format!("Row {i}"))
        };

        let industry = field("Industry")?
            .as_str()
            .with_context(|| format!("Row {i}: Industry is not a string"))?;
        let stage = field("Funding_Stage")?
            .as_str()
            .with_context(|| format!("Row {i}: Funding_Stage is not a string"))?;
        let year = field("Year")?
            .as_i64()
            .with_context(|| format!("Row {i}: Year is not an integer"))? as i32;
        let amount = field("Funding_Amount")?
            .as_f64()
            .with_context(|| format!("Row {i}: Funding_Amount is not a number"))?;
        let city = field("City")?
            .as_str()
            .with_context(|| format!("Row {i}: City is not a string"))?;

        // Nullable: a missing key, JSON null, or empty string all mean "no email".
        let contact_email = match obj.get("Contact_Email") {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) if s.is_empty() => None,
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(other) => bail!("Row {i}: Contact_Email is not a string: {other}"),
        };

        rows.push(RawRecord {
            industry: industry.to_string(),
            stage: stage.to_string(),
            year,
            amount,
            contact_email,
            city: city.to_string(),
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load funding records from a Parquet file with flat scalar columns.
///
/// Accepts Utf8/LargeUtf8 for the string columns, Int32/Int64 for `Year`,
/// and Int32/Int64/Float32/Float64 for `Funding_Amount`. Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    // Schema check up front so a missing column fails before any row work.
    let schema = builder.schema().clone();
    for name in REQUIRED_COLUMNS {
        if schema.index_of(name).is_err() {
            return Err(SchemaError::MissingColumn(name).into());
        }
    }

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let batch_schema = batch.schema();
        let column = |name: &str| -> Result<ArrayRef> {
            let idx = batch_schema
                .index_of(name)
                .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
            Ok(batch.column(idx).clone())
        };

        let industry_col = column("Industry")?;
        let stage_col = column("Funding_Stage")?;
        let year_col = column("Year")?;
        let amount_col = column("Funding_Amount")?;
        let email_col = column("Contact_Email")?;
        let city_col = column("City")?;

        for row in 0..batch.num_rows() {
            rows.push(RawRecord {
                industry: string_value(&industry_col, row)
                    .with_context(|| format!("Row {row}: reading 'Industry'"))?,
                stage: string_value(&stage_col, row)
                    .with_context(|| format!("Row {row}: reading 'Funding_Stage'"))?,
                year: int_value(&year_col, row)
                    .with_context(|| format!("Row {row}: reading 'Year'"))? as i32,
                amount: float_value(&amount_col, row)
                    .with_context(|| format!("Row {row}: reading 'Funding_Amount'"))?,
                contact_email: nullable_string_value(&email_col, row)
                    .with_context(|| format!("Row {row}: reading 'Contact_Email'"))?,
                city: string_value(&city_col, row)
                    .with_context(|| format!("Row {row}: reading 'City'"))?,
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn string_value(col: &ArrayRef, row: usize) -> Result<String> {
    nullable_string_value(col, row)?.context("unexpected null value")
}

fn nullable_string_value(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let s = match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            arr.value(row).to_string()
        }
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        other => bail!("expected a string column, got {other:?}"),
    };
    // Empty strings behave like nulls, as in the CSV loader.
    Ok((!s.is_empty()).then_some(s))
}

fn int_value(col: &ArrayRef, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("unexpected null value");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row))
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

fn float_value(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("unexpected null value");
    }
    match col.data_type() {
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Int32 | DataType::Int64 => int_value(col, row).map(|v| v as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    const CSV_HEADER: &str = "Industry,Funding_Stage,Year,Funding_Amount,Contact_Email,City";

    fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).expect("create temp file");
        f.write_all(contents.as_bytes()).expect("write temp file");
        (dir, path)
    }

    #[test]
    fn loads_and_cleans_csv() {
        let (_dir, path) = write_temp(
            "funding.csv",
            &format!(
                "{CSV_HEADER}\n\
                 Fintech,Seed,2019,5000000,founder@acme.io,Pune\n\
                 Fintech,Seed,2019,5000000,founder@acme.io,Pune\n\
                 Health,Series A,2020,2000000,,Delhi\n"
            ),
        );

        let ds = load_file(&path).expect("load csv");
        // Duplicate row dropped by the cleaning stage.
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].email_domain.as_deref(), Some("acme.io"));
        assert!((ds.records[0].funding_millions - 5.0).abs() < 1e-9);
        // Empty email cell is null.
        assert_eq!(ds.records[1].contact_email, None);
        assert_eq!(ds.records[1].email_domain, None);
        assert_eq!(ds.year_bounds, Some((2019, 2020)));
    }

    #[test]
    fn csv_missing_column_fails_naming_it() {
        let (_dir, path) = write_temp(
            "funding.csv",
            "Industry,Funding_Stage,Year,Contact_Email,City\n\
             Fintech,Seed,2019,founder@acme.io,Pune\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Funding_Amount"), "{err:#}");
    }

    #[test]
    fn csv_bad_year_reports_row_context() {
        let (_dir, path) = write_temp(
            "funding.csv",
            &format!("{CSV_HEADER}\nFintech,Seed,not-a-year,5000000,,Pune\n"),
        );

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Year"), "{err:#}");
    }

    #[test]
    fn loads_json_records() {
        let (_dir, path) = write_temp(
            "funding.json",
            r#"[
                {"Industry": "Fintech", "Funding_Stage": "Seed", "Year": 2019,
                 "Funding_Amount": 5000000.0, "Contact_Email": "a@x.io", "City": "Pune"},
                {"Industry": "Health", "Funding_Stage": "Series A", "Year": 2020,
                 "Funding_Amount": 2000000.0, "Contact_Email": null, "City": "Delhi"}
            ]"#,
        );

        let ds = load_file(&path).expect("load json");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].email_domain.as_deref(), Some("x.io"));
        assert_eq!(ds.records[1].contact_email, None);
    }

    #[test]
    fn json_missing_column_fails_naming_it() {
        let (_dir, path) = write_temp(
            "funding.json",
            r#"[{"Industry": "Fintech", "Funding_Stage": "Seed", "Year": 2019,
                 "Contact_Email": null, "City": "Pune"}]"#,
        );

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Funding_Amount"), "{err:#}");
    }

    fn write_parquet(path: &std::path::Path, include_amount: bool) {
        use arrow::array::ArrayRef;
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let mut columns: Vec<(&str, ArrayRef)> = vec![
            ("Industry", Arc::new(StringArray::from(vec!["Fintech", "Health"]))),
            ("Funding_Stage", Arc::new(StringArray::from(vec!["Seed", "Series A"]))),
            ("Year", Arc::new(Int64Array::from(vec![2019, 2020]))),
        ];
        if include_amount {
            columns.push((
                "Funding_Amount",
                Arc::new(Float64Array::from(vec![5_000_000.0, 2_000_000.0])),
            ));
        }
        columns.push((
            "Contact_Email",
            Arc::new(StringArray::from(vec![Some("a@x.io"), None])),
        ));
        columns.push(("City", Arc::new(StringArray::from(vec!["Pune", "Delhi"]))));

        let batch = RecordBatch::try_from_iter(columns).expect("record batch");
        let file = std::fs::File::create(path).expect("create parquet file");
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).expect("parquet writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");
    }

    #[test]
    fn loads_parquet_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("funding.parquet");
        write_parquet(&path, true);

        let ds = load_file(&path).expect("load parquet");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].email_domain.as_deref(), Some("x.io"));
        assert_eq!(ds.records[1].contact_email, None);
        assert!((ds.records[0].funding_millions - 5.0).abs() < 1e-9);
    }

    #[test]
    fn parquet_missing_column_fails_naming_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("funding.parquet");
        write_parquet(&path, false);

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Funding_Amount"), "{err:#}");
    }

    #[test]
    fn rejects_unknown_extension() {
        let (_dir, path) = write_temp("funding.xlsx", "not a spreadsheet");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
