use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Round to two decimals so the rendered samples stay readable.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn write_scalar_json(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("sample_scalar.json");
    let doc = serde_json::json!({
        "context": "positive",
        "group": "calibration",
        "rule": "reference-temperature",
        "tags": ["lab", "reference"],
        "dimensions": [{ "name": "temperature", "unit": "C" }],
        "value": 21.5
    });
    let text = serde_json::to_string_pretty(&doc)?;
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn write_two_dim_csv(dir: &Path, rng: &mut SimpleRng) -> Result<PathBuf> {
    let path = dir.join("sample_two_dim.csv");
    let mut writer = csv::Writer::from_path(&path).context("creating CSV")?;
    writer.write_record(["time [s]", "temperature [C]"])?;
    for step in 0..6 {
        let t = step * 10;
        let temp = round2(rng.gauss(21.5 + 0.05 * t as f64, 0.2));
        writer.write_record([t.to_string(), temp.to_string()])?;
    }
    writer.flush()?;
    Ok(path)
}

fn write_three_dim_parquet(dir: &Path, rng: &mut SimpleRng) -> Result<PathBuf> {
    let mut times = Vec::new();
    let mut temps = Vec::new();
    let mut pressures = Vec::new();
    for step in 0..8_i64 {
        times.push(step * 15);
        temps.push(round2(rng.gauss(20.0 + step as f64 * 0.3, 0.1)));
        pressures.push(round2(rng.gauss(101.3, 0.4)));
    }

    let unit = |u: &str| HashMap::from([("unit".to_string(), u.to_string())]);
    let schema = Arc::new(
        Schema::new(vec![
            Field::new("time", DataType::Int64, false).with_metadata(unit("s")),
            Field::new("temperature", DataType::Float64, false).with_metadata(unit("C")),
            Field::new("pressure", DataType::Float64, false).with_metadata(unit("kPa")),
        ])
        .with_metadata(HashMap::from([
            ("context".to_string(), "warning".to_string()),
            ("group".to_string(), "reactor".to_string()),
            ("rule".to_string(), "pressure-drift".to_string()),
            ("tags".to_string(), "sensor,hourly".to_string()),
        ])),
    );

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(times)),
            Arc::new(Float64Array::from(temps)),
            Arc::new(Float64Array::from(pressures)),
        ],
    )
    .context("building record batch")?;

    let path = dir.join("sample_three_dim.parquet");
    let file = std::fs::File::create(&path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(path)
}

#[derive(Debug, Parser)]
#[command(
    name = "generate_sample",
    about = "Write sample scalar, 2D and 3D data files for explain-txt"
)]
struct Args {
    /// Directory to write the sample files into
    #[arg(default_value = ".")]
    dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let Args { dir } = Args::parse();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let written = [
        write_scalar_json(&dir)?,
        write_two_dim_csv(&dir, &mut rng)?,
        write_three_dim_parquet(&dir, &mut rng)?,
    ];

    for path in &written {
        log::info!("Wrote {}", path.display());
        println!("{}", path.display());
    }
    Ok(())
}
