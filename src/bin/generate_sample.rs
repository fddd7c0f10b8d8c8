use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use gradview::data::model::Record;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const STATES: &[&str] = &["BA", "MG", "PE", "PR", "RJ", "RS", "SC", "SP"];

/// (sector, mean salary, chance of being employed)
const SECTORS: &[(&str, f64, f64)] = &[
    ("Comércio", 2400.0, 0.72),
    ("Educação", 3100.0, 0.80),
    ("Indústria", 3600.0, 0.78),
    ("Saúde", 4200.0, 0.85),
    ("Serviços", 2800.0, 0.70),
    ("Tecnologia", 5600.0, 0.90),
];

const N_RECORDS: usize = 600;

fn generate(rng: &mut SimpleRng) -> Vec<Record> {
    (0..N_RECORDS)
        .map(|_| {
            let state = rng.pick(STATES);
            let (sector, mean_salary, p_employed) =
                SECTORS[(rng.next_u64() % SECTORS.len() as u64) as usize];
            let employed = rng.next_f64() < p_employed;
            // Unemployed graduates report no salary in the cleaned data.
            let salary = if employed {
                (rng.gauss(mean_salary, mean_salary * 0.25).max(1320.0) * 100.0).round() / 100.0
            } else {
                0.0
            };
            Record {
                state: state.to_string(),
                sector: sector.to_string(),
                employed: if employed { "Sim" } else { "Não" }.to_string(),
                salary,
                admission_year: 2019 + (rng.next_u64() % 6) as i32,
            }
        })
        .collect()
}

fn write_csv(path: &str, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

fn write_parquet(path: &str, records: &[Record]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("state", DataType::Utf8, false),
        Field::new("sector", DataType::Utf8, false),
        Field::new("employed", DataType::Utf8, false),
        Field::new("salary", DataType::Float64, false),
        Field::new("admission_year", DataType::Int32, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.state.as_str()))),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.sector.as_str()))),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.employed.as_str()))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.salary))),
            Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.admission_year))),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    write_csv("cleaned_data.csv", &records)?;
    write_parquet("cleaned_data.parquet", &records)?;

    log::info!("generated {} records", records.len());
    println!(
        "Wrote {} graduate records to cleaned_data.csv and cleaned_data.parquet",
        records.len()
    );
    Ok(())
}
