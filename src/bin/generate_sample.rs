use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use chrono::{Duration, NaiveDate};
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic startup funding dataset as CSV and Parquet.
#[derive(Parser)]
#[command(name = "generate_sample", about)]
struct Args {
    /// Number of funding rows
    #[arg(long, default_value_t = 600)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// `(startup, vertical, subvertical, city)`
const STARTUPS: &[(&str, &str, &str, &str)] = &[
    ("Ola", "Transport", "Cab Aggregator", "Bengaluru"),
    ("Swiggy", "Consumer Internet", "Food Delivery", "Bengaluru"),
    ("Zomato", "Consumer Internet", "Restaurant Discovery", "Gurgaon"),
    ("Paytm", "FinTech", "Digital Payments", "Noida"),
    ("Byju's", "EdTech", "0", "Bengaluru"),
    ("Unacademy", "EdTech", "", "Bengaluru"),
    ("Flipkart", "E-Commerce", "Online Marketplace", "Bengaluru"),
    ("OYO Rooms", "Hospitality", "Budget Hotels", "Gurgaon"),
    ("Lenskart", "E-Commerce", "Eyewear", "New Delhi"),
    ("Practo", "Healthcare", "Doctor Discovery", "Bengaluru"),
    ("Rivigo", "Logistics", "Trucking", "Gurgaon"),
    ("PolicyBazaar", "FinTech", "Insurance Marketplace", "Gurgaon"),
];

const INVESTORS: &[&str] = &[
    "Accel Partners",
    "Accel",
    "Tiger Global Management",
    "Sequoia Capital",
    "SoftBank Group",
    "Info Edge",
    "Matrix Partners",
    "Kalaari Capital",
    "Nexus Venture Partners",
    "Naspers",
    "Steadview Capital",
];

const ROUNDS: &[&str] = &["Seed Funding", "Series A", "Series B", "Series C", "Private Equity", ""];

#[derive(Debug, Serialize)]
struct Row {
    date: String,
    startup: String,
    vertical: String,
    subvertical: String,
    city: String,
    round: String,
    amount: String,
    investors: String,
}

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default();
    (0..n)
        .map(|i| {
            let (startup, vertical, subvertical, city) = STARTUPS[rng.below(STARTUPS.len())];
            let date = start + Duration::days(rng.below(6 * 365) as i64);

            let n_investors = 1 + rng.below(3);
            let mut investors: Vec<&str> = (0..n_investors).map(|_| rng.pick(INVESTORS)).collect();
            investors.sort_unstable();
            investors.dedup();

            // Log-normal amounts in crore, roughly 0.5 to a few thousand.
            let amount = rng.gauss(3.0, 1.6).exp();

            let mut row = Row {
                date: date.format("%Y-%m-%d").to_string(),
                startup: startup.to_string(),
                vertical: vertical.to_string(),
                subvertical: subvertical.to_string(),
                city: city.to_string(),
                round: rng.pick(ROUNDS).to_string(),
                amount: format!("{amount:.2}"),
                investors: investors.join(", "),
            };

            // A handful of rows the cleaner is expected to drop.
            match i % 97 {
                13 => row.date = "05/072018".to_string(),
                29 => row.amount = "Undisclosed".to_string(),
                53 => row.investors = " ".to_string(),
                71 => row.startup = String::new(),
                _ => {}
            }
            row
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn to_batch(rows: &[Row]) -> Result<RecordBatch> {
    let column = |f: fn(&Row) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let names = ["date", "startup", "vertical", "subvertical", "city", "round", "amount", "investors"];
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));

    RecordBatch::try_new(
        schema,
        vec![
            column(|r| r.date.as_str()),
            column(|r| r.startup.as_str()),
            column(|r| r.vertical.as_str()),
            column(|r| r.subvertical.as_str()),
            column(|r| r.city.as_str()),
            column(|r| r.round.as_str()),
            column(|r| r.amount.as_str()),
            column(|r| r.investors.as_str()),
        ],
    )
    .context("building record batch")
}

fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let rows = generate(&mut rng, args.rows);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let csv_path = args.out_dir.join("startup_cleaned.csv");
    write_csv(&rows, &csv_path)?;

    let batch = to_batch(&rows)?;
    let parquet_path = args.out_dir.join("startup_cleaned.parquet");
    write_parquet(&batch, &parquet_path)?;

    println!("{}", pretty_format_batches(&[batch.slice(0, batch.num_rows().min(5))])?);
    println!(
        "Wrote {} funding rows to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
