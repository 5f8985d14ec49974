use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{DataRecord, DataValue, Dimension};
use crate::explanation::{ChunkContext, ExplanationChunk};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a data chunk from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `{ "dimensions": [...], "values": [...], ...metadata }`
/// * `.csv`     – header row of `name [unit]` labels, one row per tuple
/// * `.parquet` – one column per dimension, optional `unit` field metadata
pub fn load_file(path: &Path) -> Result<ExplanationChunk> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let chunk = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    if let Some(record) = chunk.as_data() {
        log::info!(
            "Loaded {} record with {} row(s) from {}",
            record.kind(),
            record.len(),
            path.display()
        );
    }
    Ok(chunk)
}

/// Pick the record variant from the number of dimensions.
///
/// Every row must hold exactly one value per dimension.
pub fn build_record(dimensions: Vec<Dimension>, rows: Vec<Vec<DataValue>>) -> Result<DataRecord> {
    let width = dimensions.len();
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        bail!("Row {i}: expected {width} value(s) but found {}", row.len());
    }

    let mut dims = dimensions.into_iter();
    let mut next_dim = || dims.next().context("missing dimension");

    let record = match width {
        1 => DataRecord::one_dim(
            next_dim()?,
            rows.into_iter().flatten().collect(),
        ),
        2 => DataRecord::two_dim(next_dim()?, next_dim()?, into_tuples(rows)?),
        3 => DataRecord::three_dim(next_dim()?, next_dim()?, next_dim()?, into_tuples(rows)?),
        0 => bail!("A data record needs at least one dimension"),
        n => bail!("A data record has at most three dimensions, found {n}"),
    };
    Ok(record)
}

fn into_tuples<const N: usize>(rows: Vec<Vec<DataValue>>) -> Result<Vec<[DataValue; N]>> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            <[DataValue; N]>::try_from(row).map_err(|row| {
                anyhow::anyhow!("Row {i}: expected {N} values but found {}", row.len())
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct JsonDimension {
    name: String,
    #[serde(default)]
    unit: Option<String>,
}

impl From<JsonDimension> for Dimension {
    fn from(d: JsonDimension) -> Self {
        match d.unit {
            Some(unit) => Dimension::with_unit(d.name, unit),
            None => Dimension::new(d.name),
        }
    }
}

/// Expected JSON schema:
///
/// ```json
/// {
///   "context": "positive",
///   "group": "measurements",
///   "rule": "r12",
///   "tags": ["lab", "daily"],
///   "dimensions": [{ "name": "time", "unit": "s" }, { "name": "temp", "unit": "C" }],
///   "values": [[0, 21.5], [10, 21.9]]
/// }
/// ```
///
/// A single dimension takes either `"value": x` (scalar) or
/// `"values": [x, y, ...]`. Two or three dimensions take arrays of pairs or
/// triples. Only `dimensions` is mandatory.
#[derive(Debug, Deserialize)]
struct JsonChunk {
    #[serde(default)]
    context: Option<JsonValue>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    dimensions: Vec<JsonDimension>,
    #[serde(default)]
    value: Option<JsonValue>,
    #[serde(default)]
    values: Option<Vec<JsonValue>>,
}

fn load_json(path: &Path) -> Result<ExplanationChunk> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse the JSON chunk layout from a string.
pub fn parse_json(text: &str) -> Result<ExplanationChunk> {
    let doc: JsonChunk = serde_json::from_str(text).context("parsing JSON")?;

    let context = match &doc.context {
        None => ChunkContext::default(),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(ChunkContext)
            .with_context(|| format!("Context {n} is not a 32-bit integer"))?,
        Some(JsonValue::String(s)) => {
            ChunkContext::parse(s).with_context(|| format!("Unknown context '{s}'"))?
        }
        Some(other) => bail!("Context must be a number or a name, got {other}"),
    };

    let dimensions: Vec<Dimension> = doc.dimensions.into_iter().map(Into::into).collect();

    let record = match (doc.value, doc.values) {
        (Some(_), Some(_)) => bail!("Use either 'value' or 'values', not both"),
        (Some(value), None) => {
            let [dimension]: [Dimension; 1] = dimensions.try_into().map_err(|d: Vec<_>| {
                anyhow::anyhow!("A scalar 'value' needs exactly one dimension, found {}", d.len())
            })?;
            DataRecord::scalar(dimension, json_to_value(&value))
        }
        (None, Some(values)) => {
            let width = dimensions.len();
            let rows = values
                .iter()
                .enumerate()
                .map(|(i, v)| json_to_row(v, width, i))
                .collect::<Result<Vec<_>>>()?;
            build_record(dimensions, rows)?
        }
        (None, None) => bail!("Missing 'value' or 'values'"),
    };

    let mut chunk = ExplanationChunk::data(record)
        .with_context(context)
        .with_tags(doc.tags);
    chunk.group = doc.group;
    chunk.rule = doc.rule;
    Ok(chunk)
}

fn json_to_row(val: &JsonValue, width: usize, row: usize) -> Result<Vec<DataValue>> {
    if width == 1 {
        return Ok(vec![json_to_value(val)]);
    }
    let arr = val
        .as_array()
        .with_context(|| format!("Row {row}: expected an array of {width} values"))?;
    Ok(arr.iter().map(json_to_value).collect())
}

fn json_to_value(val: &JsonValue) -> DataValue {
    match val {
        JsonValue::String(s) => DataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                DataValue::Float(f)
            } else {
                DataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => DataValue::Bool(*b),
        JsonValue::Null => DataValue::Null,
        other => DataValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with one label per dimension (`name` or
/// `name [unit]`), then one row per value tuple.
fn load_csv(path: &Path) -> Result<ExplanationChunk> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<ExplanationChunk> {
    let dimensions: Vec<Dimension> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(Dimension::parse_label)
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_value_type).collect());
    }

    Ok(ExplanationChunk::data(build_record(dimensions, rows)?))
}

/// Parse CSV text held in memory.
pub fn parse_csv(text: &str) -> Result<ExplanationChunk> {
    read_csv(csv::Reader::from_reader(text.as_bytes()))
}

/// Classify a cell. Numbers are only typed when they print back as the exact
/// cell text, so `007` or `1.50` stay strings and render as written.
fn guess_value_type(s: &str) -> DataValue {
    if s.is_empty() {
        return DataValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        if i.to_string() == s {
            return DataValue::Integer(i);
        }
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.to_string() == s {
            return DataValue::Float(f);
        }
    }
    if s == "true" || s == "false" {
        return DataValue::Bool(s == "true");
    }
    DataValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Field metadata key holding a column's unit.
pub const UNIT_METADATA_KEY: &str = "unit";

/// Load a Parquet file holding one column per dimension.
///
/// Expected schema:
/// - 1 to 3 columns; the column name is the dimension name
/// - optional field metadata `unit`
/// - optional schema metadata `context`, `group`, `rule`, `tags`
///   (tags comma separated)
fn load_parquet(path: &Path) -> Result<ExplanationChunk> {
    load_parquet_batched(path, None)
}

fn load_parquet_batched(path: &Path, batch_size: Option<usize>) -> Result<ExplanationChunk> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let mut builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    if let Some(size) = batch_size {
        builder = builder.with_batch_size(size);
    }

    let schema = builder.schema().clone();
    let dimensions: Vec<Dimension> = schema
        .fields()
        .iter()
        .map(|f| match f.metadata().get(UNIT_METADATA_KEY) {
            Some(unit) => Dimension::with_unit(f.name().clone(), unit.clone()),
            None => Dimension::new(f.name().clone()),
        })
        .collect();

    let reader = builder.build().context("building parquet reader")?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        // Row numbers in errors count from the start of the file.
        let first_row = rows.len();
        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .zip(schema.fields().iter())
                .map(|(col, field)| {
                    extract_value(col, row).with_context(|| {
                        format!("Row {}: failed to read '{}'", first_row + row, field.name())
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(values);
        }
    }

    let chunk = ExplanationChunk::data(build_record(dimensions, rows)?);
    apply_schema_metadata(chunk, schema.metadata())
}

fn apply_schema_metadata(
    mut chunk: ExplanationChunk,
    metadata: &HashMap<String, String>,
) -> Result<ExplanationChunk> {
    if let Some(ctx) = metadata.get("context") {
        chunk.context =
            ChunkContext::parse(ctx).with_context(|| format!("Unknown context '{ctx}'"))?;
    }
    chunk.group = metadata.get("group").cloned();
    chunk.rule = metadata.get("rule").cloned();
    if let Some(tags) = metadata.get("tags") {
        chunk.tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
    }
    Ok(chunk)
}

/// Extract a single value from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Result<DataValue> {
    if col.is_null(row) {
        return Ok(DataValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => DataValue::String(
            col.as_string_opt::<i32>()
                .context("expected StringArray")?
                .value(row)
                .to_string(),
        ),
        DataType::LargeUtf8 => DataValue::String(
            col.as_string_opt::<i64>()
                .context("expected LargeStringArray")?
                .value(row)
                .to_string(),
        ),
        DataType::Int32 => DataValue::Integer(
            col.as_primitive_opt::<Int32Type>()
                .context("expected Int32Array")?
                .value(row)
                .into(),
        ),
        DataType::Int64 => DataValue::Integer(
            col.as_primitive_opt::<Int64Type>()
                .context("expected Int64Array")?
                .value(row),
        ),
        DataType::Float32 => DataValue::Float(
            col.as_primitive_opt::<Float32Type>()
                .context("expected Float32Array")?
                .value(row)
                .into(),
        ),
        DataType::Float64 => DataValue::Float(
            col.as_primitive_opt::<Float64Type>()
                .context("expected Float64Array")?
                .value(row),
        ),
        DataType::Boolean => DataValue::Bool(
            col.as_boolean_opt()
                .context("expected BooleanArray")?
                .value(row),
        ),
        DataType::List(_)
        | DataType::LargeList(_)
        | DataType::FixedSizeList(..)
        | DataType::Struct(_)
        | DataType::Map(..) => bail!("nested {} values are not supported", col.data_type()),
        DataType::Date32 | DataType::Date64 => {
            DataValue::Date(array_value_to_string(col, row).context("formatting date")?)
        }
        _ => DataValue::String(array_value_to_string(col, row).context("formatting value")?),
    };
    Ok(value)
}
