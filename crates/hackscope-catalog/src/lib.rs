//! Catalog loading + validation for hackathon records.
//!
//! The discovery pipeline consumes an already-fetched, immutable record
//! list; this crate owns reading that list from catalog documents (JSON
//! or YAML with a top-level `hackathons:` sequence) and flagging records
//! that look wrong without ever failing a load over them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use hackscope_core::HackathonRecord;
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

pub const CRATE_NAME: &str = "hackscope-catalog";

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    hackathons: Vec<HackathonRecord>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unsupported catalog extension for {path}: expected .json, .yaml or .yml")]
    UnsupportedExtension { path: String },
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogFormat {
    Json,
    Yaml,
}

fn format_for(path: &Path) -> Option<CatalogFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(CatalogFormat::Json),
        "yaml" | "yml" => Some(CatalogFormat::Yaml),
        _ => None,
    }
}

/// Loads one catalog document; the format is chosen by file extension.
pub async fn load_catalog_file(path: &Path) -> Result<Vec<HackathonRecord>, CatalogError> {
    let display = path.display().to_string();
    let format = format_for(path).ok_or_else(|| CatalogError::UnsupportedExtension {
        path: display.clone(),
    })?;
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: display.clone(),
            source,
        })?;
    let parsed: CatalogFile = match format {
        CatalogFormat::Json => serde_json::from_str(&text).map_err(|err| CatalogError::Parse {
            path: display,
            message: err.to_string(),
        })?,
        CatalogFormat::Yaml => serde_yaml::from_str(&text).map_err(|err| CatalogError::Parse {
            path: display,
            message: err.to_string(),
        })?,
    };
    Ok(parsed.hackathons)
}

/// Loads the workspace catalog: `catalog/hackathons.json`, falling back
/// to `catalog/hackathons.yaml`.
pub async fn load_workspace_catalog(root: &Path) -> anyhow::Result<Vec<HackathonRecord>> {
    let json_path = root.join("catalog").join("hackathons.json");
    if fs::try_exists(&json_path)
        .await
        .with_context(|| format!("checking {}", json_path.display()))?
    {
        return Ok(load_catalog_file(&json_path).await?);
    }

    let yaml_path = root.join("catalog").join("hackathons.yaml");
    if fs::try_exists(&yaml_path)
        .await
        .with_context(|| format!("checking {}", yaml_path.display()))?
    {
        return Ok(load_catalog_file(&yaml_path).await?);
    }

    anyhow::bail!("no catalog document found under {}", root.display())
}

/// One suspicious record flagged by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogWarning {
    pub id: Uuid,
    pub message: String,
}

/// Checks a loaded catalog for records that look wrong. Warnings are
/// advisory: the pipeline tolerates all of these via its defaulting
/// rules, so a load never fails over them.
pub fn validate(records: &[HackathonRecord]) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id) {
            warnings.push(CatalogWarning {
                id: record.id,
                message: "duplicate id".to_string(),
            });
        }
        if record.end_date < record.start_date {
            warnings.push(CatalogWarning {
                id: record.id,
                message: "end date precedes start date".to_string(),
            });
        }
        if record.title.trim().is_empty() {
            warnings.push(CatalogWarning {
                id: record.id,
                message: "empty title".to_string(),
            });
        }
    }

    for warning in &warnings {
        warn!(id = %warning.id, "catalog: {}", warning.message);
    }
    warnings
}
