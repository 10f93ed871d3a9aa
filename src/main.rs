use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use insightboard::model::{Field, Filters};
use insightboard::report::build_report;
use insightboard::source::{self, DataSource, FileSource, Format};
use insightboard::unique_values;

#[derive(Parser, Debug)]
#[command(name = "insightboard")]
#[command(about = "Filter and aggregate an insight dataset into chart-ready series", long_about = None)]
struct Args {
    /// Dataset file (JSON array or CSV). Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Input format; inferred from the file extension, JSON for stdin.
    #[arg(long, value_parser = parse_format)]
    format: Option<Format>,

    /// Print the distinct values of a field instead of the report.
    #[arg(long, value_name = "FIELD", value_parser = parse_field)]
    list: Option<Field>,

    // Filter flags; omitted flags leave the field unconstrained.
    #[arg(long)]
    end_year: Option<String>,
    #[arg(long)]
    topic: Option<String>,
    #[arg(long)]
    sector: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    pestle: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    country: Option<String>,
}

fn parse_format(s: &str) -> Result<Format> {
    match s {
        "json" => Ok(Format::Json),
        "csv" => Ok(Format::Csv),
        other => Err(anyhow!("Unknown format '{}' (expected json or csv)", other)),
    }
}

fn parse_field(s: &str) -> Result<Field> {
    Field::from_name(s).ok_or_else(|| anyhow!("Unknown field '{}'", s))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let records = load_records(&args)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Some(field) = args.list {
        for value in unique_values(&records, field) {
            writeln!(handle, "{}", value).context("Failed to write to stdout")?;
        }
        return Ok(());
    }

    let filters = Filters {
        end_year: args.end_year.unwrap_or_default(),
        topic: args.topic.unwrap_or_default(),
        sector: args.sector.unwrap_or_default(),
        region: args.region.unwrap_or_default(),
        pestle: args.pestle.unwrap_or_default(),
        source: args.source.unwrap_or_default(),
        country: args.country.unwrap_or_default(),
        city: String::new(),
    };

    let report = build_report(&records, &filters);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    writeln!(handle, "{}", json).context("Failed to write report to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}

fn load_records(args: &Args) -> Result<Vec<insightboard::Insight>> {
    match &args.input {
        Some(path) => {
            let format = match args.format {
                Some(f) => f,
                None => Format::from_path(path)
                    .ok_or_else(|| anyhow!("Cannot infer format of '{}'", path.display()))?,
            };
            let mut file_source = FileSource::new(path.clone(), format);
            file_source
                .fetch_all()
                .with_context(|| format!("Failed to load '{}'", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read dataset from stdin")?;
            match args.format.unwrap_or(Format::Json) {
                Format::Json => source::read_json(buf.as_bytes()),
                Format::Csv => source::read_csv(buf.as_bytes()),
            }
            .context("Failed to parse dataset from stdin")
        }
    }
}
