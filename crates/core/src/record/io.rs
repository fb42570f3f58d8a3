//! Loading and saving records from files.
//!
//! Supported sources:
//! - `.json`: a single object, or an array of objects
//! - `.yaml` / `.yml`: a single mapping, or a sequence of mappings
//! - `.md`: YAML frontmatter, one record per document

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::Record;
use crate::frontmatter::{self, FrontmatterParseError};

#[derive(Debug, Error)]
pub enum RecordIoError {
    #[error("unsupported record file extension: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read record file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write record file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {0}: {1}")]
    Json(String, #[source] serde_json::Error),

    #[error("failed to parse YAML in {0}: {1}")]
    Yaml(String, #[source] serde_yaml::Error),

    #[error("failed to parse frontmatter in {0}: {1}")]
    Frontmatter(String, #[source] FrontmatterParseError),

    #[error("{0} has no frontmatter")]
    MissingFrontmatter(String),

    #[error("{0} must contain an object or a list of objects")]
    NotRecords(String),
}

/// On-disk record format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
    Markdown,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Result<Self, RecordIoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(RecordIoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Records loaded from one file, with enough shape information to save
/// them back the way they came in.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    pub format: RecordFormat,
    pub records: Vec<Record>,
    /// The file held a single record rather than a list.
    pub single: bool,
}

/// Load every record in `path`.
pub fn load_records(path: &Path) -> Result<RecordBatch, RecordIoError> {
    let format = RecordFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .map_err(|source| RecordIoError::Read { path: path.to_path_buf(), source })?;
    let path_str = path.display().to_string();

    let value: Value = match format {
        RecordFormat::Json => serde_json::from_str(&content)
            .map_err(|e| RecordIoError::Json(path_str.clone(), e))?,
        RecordFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| RecordIoError::Yaml(path_str.clone(), e))?,
        RecordFormat::Markdown => {
            let doc = frontmatter::parse(&content)
                .map_err(|e| RecordIoError::Frontmatter(path_str.clone(), e))?;
            let fm = doc
                .frontmatter
                .ok_or_else(|| RecordIoError::MissingFrontmatter(path_str.clone()))?;
            return Ok(RecordBatch { format, records: vec![fm.to_record()], single: true });
        }
    };

    let (records, single) = match value {
        Value::Object(_) => (vec![Record::from_json(value)], true),
        Value::Array(items) => {
            if !items.iter().all(Value::is_object) {
                return Err(RecordIoError::NotRecords(path_str));
            }
            (items.into_iter().map(Record::from_json).collect(), false)
        }
        _ => return Err(RecordIoError::NotRecords(path_str)),
    };

    tracing::debug!(path = %path_str, count = records.len(), "loaded records");
    Ok(RecordBatch { format, records, single })
}

/// Save record values (not annotations) back to `path`.
///
/// Markdown files are re-read so the body and the original field order are
/// kept; only frontmatter values change.
pub fn save_records(path: &Path, batch: &RecordBatch) -> Result<(), RecordIoError> {
    let path_str = path.display().to_string();

    let content = match batch.format {
        RecordFormat::Markdown => {
            let original = fs::read_to_string(path)
                .map_err(|source| RecordIoError::Read { path: path.to_path_buf(), source })?;
            let mut doc = frontmatter::parse(&original)
                .map_err(|e| RecordIoError::Frontmatter(path_str.clone(), e))?;
            let (Some(fm), Some(record)) = (doc.frontmatter.as_mut(), batch.records.first())
            else {
                return Err(RecordIoError::MissingFrontmatter(path_str));
            };
            fm.apply_record(record);
            frontmatter::serialize(&doc)
        }
        RecordFormat::Json => {
            let value = batch_to_value(batch);
            let mut s = serde_json::to_string_pretty(&value)
                .map_err(|e| RecordIoError::Json(path_str.clone(), e))?;
            s.push('\n');
            s
        }
        RecordFormat::Yaml => serde_yaml::to_string(&batch_to_value(batch))
            .map_err(|e| RecordIoError::Yaml(path_str.clone(), e))?,
    };

    fs::write(path, content)
        .map_err(|source| RecordIoError::Write { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path_str, count = batch.records.len(), "saved records");
    Ok(())
}

fn batch_to_value(batch: &RecordBatch) -> Value {
    let mut values = batch.records.iter().map(|r| Value::Object(r.to_values()));
    if batch.single
        && let Some(first) = values.next()
    {
        return first;
    }
    Value::Array(values.collect())
}
