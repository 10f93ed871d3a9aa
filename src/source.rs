use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::model::Insight;

/// External data-loading collaborator. The core only ever sees the fully
/// materialized collection; how it was produced (bundled file, remote store,
/// one-time seeding) is this trait's concern.
pub trait DataSource {
    /// Idempotent initialization guard. Safe to call any number of times;
    /// only the first call per session does work.
    fn ensure_seeded(&mut self) -> Result<()>;

    /// The full record collection.
    fn fetch_all(&mut self) -> Result<Vec<Insight>>;
}

/// Input format of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Format::Json),
            Some("csv") => Some(Format::Csv),
            _ => None,
        }
    }
}

/// Parse a JSON array of record objects (the bundled dataset format).
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Insight>> {
    let mut records: Vec<Insight> =
        serde_json::from_reader(reader).context("Input data must be a JSON array of records")?;
    assign_missing_ids(&mut records);
    Ok(records)
}

/// Parse CSV with a header row matching the dataset keys.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Insight>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (line, result) in csv_reader.deserialize().enumerate() {
        let record: Insight =
            result.with_context(|| format!("Failed to parse CSV record {}", line + 1))?;
        records.push(record);
    }
    assign_missing_ids(&mut records);
    Ok(records)
}

// The bundled dataset carries no identifiers; a backing store would assign
// them on insert. Give unidentified records their 1-based load position.
fn assign_missing_ids(records: &mut [Insight]) {
    for (i, record) in records.iter_mut().enumerate() {
        if record.id == 0 {
            record.id = i as i64 + 1;
        }
    }
}

/// A dataset file on disk. Loads once on first access and serves the cached
/// collection afterwards.
pub struct FileSource {
    path: PathBuf,
    format: Format,
    records: Option<Vec<Insight>>,
}

impl FileSource {
    pub fn new(path: PathBuf, format: Format) -> Self {
        Self {
            path,
            format,
            records: None,
        }
    }

    /// Open a dataset file, inferring the format from its extension.
    pub fn open(path: PathBuf) -> Result<Self> {
        let format = Format::from_path(&path)
            .ok_or_else(|| anyhow!("Cannot infer format of '{}'", path.display()))?;
        Ok(Self::new(path, format))
    }
}

impl DataSource for FileSource {
    fn ensure_seeded(&mut self) -> Result<()> {
        if self.records.is_some() {
            return Ok(());
        }
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open '{}'", self.path.display()))?;
        let records = match self.format {
            Format::Json => read_json(file)?,
            Format::Csv => read_csv(file)?,
        };
        self.records = Some(records);
        Ok(())
    }

    fn fetch_all(&mut self) -> Result<Vec<Insight>> {
        self.ensure_seeded()?;
        Ok(self.records.clone().unwrap_or_default())
    }
}
