use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use explain_txt::data::loader::load_file;
use explain_txt::{
    ChunkContext, DataRecord, Dimension, ExplanationChunk, ReportChunkBuilder, TextStream,
    TxtDataChunkBuilder,
};

fn tagged(record: DataRecord) -> ExplanationChunk {
    ExplanationChunk::data(record)
        .with_context(ChunkContext::POSITIVE)
        .with_group("testGroup")
        .with_rule("testRule")
        .with_tags(["tag1", "tag2"])
}

fn single_data_plain() -> ExplanationChunk {
    ExplanationChunk::data(DataRecord::scalar(Dimension::new("testName"), "value"))
}

fn single_data() -> ExplanationChunk {
    tagged(DataRecord::scalar(
        Dimension::with_unit("testName", "testUnit"),
        "value",
    ))
}

fn one_dim_data() -> ExplanationChunk {
    tagged(DataRecord::one_dim(
        Dimension::with_unit("testName", "testUnit"),
        vec!["value1".into(), "value2".into()],
    ))
}

fn two_dim_data() -> ExplanationChunk {
    tagged(DataRecord::two_dim(
        Dimension::with_unit("testName1", "testUnit1"),
        Dimension::with_unit("testName2", "testUnit2"),
        vec![["value1".into(), "value2".into()]],
    ))
}

fn three_dim_data() -> ExplanationChunk {
    tagged(DataRecord::three_dim(
        Dimension::with_unit("testName1", "testUnit1"),
        Dimension::with_unit("testName2", "testUnit2"),
        Dimension::with_unit("testName3", "testUnit3"),
        vec![
            ["value1".into(), "value2".into(), "value3".into()],
            ["value4".into(), "value5".into(), "value6".into()],
        ],
    ))
}

/// Render `chunk` into a fresh file and return its path.
fn render_to_file(dir: &TempDir, name: &str, chunk: &ExplanationChunk, headers: bool) -> PathBuf {
    let path = dir.path().join(name);
    let mut stream = TextStream::new(File::create(&path).unwrap());
    TxtDataChunkBuilder::new()
        .build_report_chunk(Some(chunk), Some(&mut stream), headers)
        .unwrap();
    stream.flush().unwrap();
    drop(stream);
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    BufReader::new(File::open(path).unwrap())
        .lines()
        .map(Result::unwrap)
        .collect()
}

/// Lines after the metadata header, which is `skip` lines long.
fn content_lines(path: &Path, skip: usize) -> Vec<String> {
    read_lines(path).into_iter().skip(skip).collect()
}

#[test]
fn single_data_default_metadata_with_headers() {
    let dir = TempDir::new().unwrap();
    let path = render_to_file(&dir, "tekst.txt", &single_data_plain(), true);

    assert_eq!(
        content_lines(&path, 1),
        ["testName", "-------------------", "value", ""]
    );
}

#[test]
fn single_data_all_metadata_with_headers() {
    let dir = TempDir::new().unwrap();
    let path = render_to_file(&dir, "tekst.txt", &single_data(), true);

    let lines = read_lines(&path);
    assert_eq!(
        lines,
        [
            "Context: POSITIVE",
            "Group: testGroup",
            "Rule: testRule",
            "Tags: tag1 tag2",
            "testName [testUnit]",
            "-------------------",
            "value",
            "",
        ]
    );
}

#[test]
fn single_data_without_headers_starts_with_labels() {
    let dir = TempDir::new().unwrap();
    let path = render_to_file(&dir, "tekst.txt", &single_data(), false);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "testName [testUnit]\n-------------------\nvalue\n\n"
    );
}

#[test]
fn renders_one_dim_data() {
    let dir = TempDir::new().unwrap();
    let path = render_to_file(&dir, "tekst.txt", &one_dim_data(), true);

    assert_eq!(
        content_lines(&path, 4),
        ["testName [testUnit]", "-------------------", "value1", "value2", ""]
    );
}

#[test]
fn renders_two_dim_data() {
    let dir = TempDir::new().unwrap();
    let path = render_to_file(&dir, "tekst.txt", &two_dim_data(), true);

    assert_eq!(
        content_lines(&path, 4),
        [
            "testName1 [testUnit1]       testName2 [testUnit2]",
            "-------------------",
            "value1       value2",
            "",
        ]
    );
}

#[test]
fn renders_three_dim_data() {
    let dir = TempDir::new().unwrap();
    let path = render_to_file(&dir, "tekst.txt", &three_dim_data(), true);

    assert_eq!(
        content_lines(&path, 4),
        [
            "testName1 [testUnit1]       testName2 [testUnit2]       testName3 [testUnit3]",
            "-------------------",
            "value1       value2       value3",
            "value4       value5       value6",
            "",
        ]
    );
}

#[test]
fn every_variant_without_headers_begins_with_labels_then_separator() {
    let dir = TempDir::new().unwrap();
    let chunks = [single_data(), one_dim_data(), two_dim_data(), three_dim_data()];

    for (i, chunk) in chunks.iter().enumerate() {
        let path = render_to_file(&dir, &format!("chunk{i}.txt"), chunk, false);
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let labels: Vec<String> = chunk
            .as_data()
            .unwrap()
            .dimensions()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines[0], labels.join("       "));
        assert_eq!(lines[1], "-------------------");
        // Exactly one trailing blank line and nothing after it.
        assert!(text.ends_with("\n\n"));
        assert!(!text.ends_with("\n\n\n"));
    }
}

#[test]
fn rendering_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let first = render_to_file(&dir, "first.txt", &three_dim_data(), true);
    let second = render_to_file(&dir, "second.txt", &three_dim_data(), true);

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn failed_validation_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tekst.txt");
    let mut stream = TextStream::new(File::create(&path).unwrap());

    let err = TxtDataChunkBuilder::new()
        .build_report_chunk(Some(&ExplanationChunk::text("test")), Some(&mut stream), true)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The ExplanationChunk must be type of DataExplanationChunk"
    );

    stream.flush().unwrap();
    drop(stream);
    assert!(fs::read(&path).unwrap().is_empty());
}

#[test]
fn loaded_json_renders_with_headers() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.json");
    fs::write(
        &input,
        r#"{
            "context": -10,
            "group": "testGroup",
            "rule": "testRule",
            "tags": ["tag1", "tag2"],
            "dimensions": [{ "name": "testName1", "unit": "testUnit1" }, { "name": "testName2", "unit": "testUnit2" }],
            "values": [["value1", "value2"]]
        }"#,
    )
    .unwrap();

    let chunk = load_file(&input).unwrap();
    assert_eq!(chunk, two_dim_data());

    let path = render_to_file(&dir, "tekst.txt", &chunk, true);
    assert_eq!(read_lines(&path)[0], "Context: POSITIVE");
    assert_eq!(read_lines(&path)[6], "value1       value2");
}

#[test]
fn loaded_csv_renders_numbers_naturally() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(&input, "time [s],temperature [C]\n0,21.5\n10,22\n").unwrap();

    let chunk = load_file(&input).unwrap();
    let path = render_to_file(&dir, "tekst.txt", &chunk, false);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "time [s]       temperature [C]\n-------------------\n0       21.5\n10       22\n\n"
    );
}

#[test]
fn loaded_parquet_keeps_units_and_metadata() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.parquet");

    let schema = Arc::new(
        Schema::new(vec![
            Field::new("sample", DataType::Utf8, false),
            Field::new("concentration", DataType::Float64, true).with_metadata(HashMap::from([(
                "unit".to_string(),
                "mg/l".to_string(),
            )])),
        ])
        .with_metadata(HashMap::from([
            ("context".to_string(), "warning".to_string()),
            ("tags".to_string(), "a, b".to_string()),
        ])),
    );
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["A", "B"])),
            Arc::new(Float64Array::from(vec![Some(0.5), None])),
        ],
    )
    .unwrap();
    let mut writer = ArrowWriter::try_new(File::create(&input).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let chunk = load_file(&input).unwrap();
    assert_eq!(chunk.context, ChunkContext::WARNING);
    assert_eq!(chunk.tags, ["a", "b"]);

    let path = render_to_file(&dir, "tekst.txt", &chunk, true);
    assert_eq!(
        read_lines(&path),
        [
            "Context: WARNING",
            "Tags: a b",
            "sample       concentration [mg/l]",
            "-------------------",
            "A       0.5",
            "B       null",
            "",
        ]
    );
}
