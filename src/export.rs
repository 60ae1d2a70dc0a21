use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{error::AppResult, models::NormalizedRecord};

pub const JSON_FILE: &str = "movies_raw.json";
pub const CSV_FILE: &str = "movies.csv";

#[derive(Clone, Debug)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self { json: dir.join(JSON_FILE), csv: dir.join(CSV_FILE) }
    }

    /// Writes both files, even for an empty batch.
    pub fn write_all(&self, records: &[NormalizedRecord]) -> AppResult<()> {
        write_json(&self.json, records)?;
        info!(path = %self.json.display(), records = records.len(), "wrote json export");
        write_csv(&self.csv, records)?;
        info!(path = %self.csv.display(), records = records.len(), "wrote csv export");
        Ok(())
    }
}

pub fn write_json(path: &Path, records: &[NormalizedRecord]) -> AppResult<()> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(records)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn read_json(path: &Path) -> AppResult<Vec<NormalizedRecord>> {
    let body = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&body)?)
}

pub fn write_csv(path: &Path, records: &[NormalizedRecord]) -> AppResult<()> {
    ensure_parent(path)?;
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(NormalizedRecord::COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_csv(path: &Path) -> AppResult<Vec<NormalizedRecord>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        out.push(row?);
    }
    Ok(out)
}

fn ensure_parent(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
