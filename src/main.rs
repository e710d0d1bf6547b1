use anomaly_engine::{detect_anomalies, Dataset, DetectionReport};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anomaly-engine")]
#[command(version = "0.1.0")]
#[command(about = "Flags statistically unusual rows in tabular datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect anomalies in a CSV file
    Csv {
        /// Name for the dataset
        #[arg(short, long)]
        name: String,

        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Expected fraction of anomalous rows, in (0, 0.5]
        #[arg(short, long, default_value_t = 0.05)]
        contamination: f64,

        /// Random seed for reproducible runs
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Number of isolation trees
        #[arg(short, long, default_value_t = 100)]
        trees: usize,

        /// Write the labeled table to this path as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect anomalies in a JSON file
    Json {
        /// Name for the dataset
        #[arg(short, long)]
        name: String,

        /// Path to JSON file (array of objects)
        #[arg(short, long)]
        file: PathBuf,

        /// Expected fraction of anomalous rows, in (0, 0.5]
        #[arg(short, long, default_value_t = 0.05)]
        contamination: f64,

        /// Random seed for reproducible runs
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Number of isolation trees
        #[arg(short, long, default_value_t = 100)]
        trees: usize,

        /// Write the labeled table to this path as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Csv {
            name,
            file,
            contamination,
            seed,
            trees,
            output,
        } => {
            let content = fs::read_to_string(&file)?;
            let dataset = Dataset::from_csv(name, &content)?;
            run_detection(&dataset, contamination, seed, trees, output)
        }

        Commands::Json {
            name,
            file,
            contamination,
            seed,
            trees,
            output,
        } => {
            let content = fs::read_to_string(&file)?;
            let dataset = Dataset::from_json(name, &content)?;
            run_detection(&dataset, contamination, seed, trees, output)
        }
    }
}

fn run_detection(
    dataset: &Dataset,
    contamination: f64,
    seed: u64,
    trees: usize,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!(
        "Loaded dataset '{}' with {} records",
        dataset.name,
        dataset.len()
    );
    println!("Columns: {:?}", dataset.columns);

    let report = detect_anomalies(dataset, contamination, seed, trees)?;

    for notice in &report.notices {
        println!("note: {}", notice);
    }

    let anomalies = report.anomaly_count();
    println!("\n=== Anomaly Count ===");
    println!("Anomaly: {}", anomalies);
    println!("Normal:  {}", report.dataset.len() - anomalies);

    print_preview(&report, 10);

    if let Some(path) = output {
        fs::write(&path, report.dataset.to_csv()?)?;
        println!("\nLabeled table written to {}", path.display());
    }

    Ok(())
}

fn print_preview(report: &DetectionReport, limit: usize) {
    println!("\n=== Labeled Preview ===");
    println!("{}", report.dataset.columns.join(","));
    for point in report.dataset.data.iter().take(limit) {
        let row: Vec<&str> = report
            .dataset
            .columns
            .iter()
            .map(|column| point.get_field(column).map(String::as_str).unwrap_or(""))
            .collect();
        println!("{}", row.join(","));
    }
}
