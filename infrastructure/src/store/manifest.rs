//! Manifest loading
//!
//! Reads resource declarations from a file or a directory of files. YAML
//! files may hold several `---`-separated documents; JSON files hold one
//! object or an array of objects. Resources without a namespace are placed
//! in the default namespace.

use ark_domain::Manifest;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading manifests
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load every manifest under `path` (a file, or a directory scanned
/// non-recursively for `.yaml`, `.yml` and `.json` files in name order).
pub fn load_manifests(path: &Path, default_namespace: &str) -> Result<Vec<Manifest>, ManifestError> {
    let files = if path.is_dir() {
        manifest_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut manifests = Vec::new();
    for file in files {
        let loaded = load_file(&file)?;
        debug!(path = %file.display(), count = loaded.len(), "Loaded manifests");
        manifests.extend(loaded);
    }

    for manifest in &mut manifests {
        let meta = manifest.metadata_mut();
        if meta.namespace.is_empty() {
            meta.namespace = default_namespace.to_string();
        }
    }
    Ok(manifests)
}

fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let io_err = |source| ManifestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_manifest = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e, "yaml" | "yml" | "json"));
        if path.is_file() && is_manifest {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(path: &Path) -> Result<Vec<Manifest>, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        parse_json(&text).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        parse_yaml(&text).map_err(|source| ManifestError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parse a multi-document YAML stream, skipping empty documents
pub fn parse_yaml(text: &str) -> Result<Vec<Manifest>, serde_yaml::Error> {
    let mut manifests = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        manifests.push(serde_yaml::from_value(value)?);
    }
    Ok(manifests)
}

/// Parse a JSON object or array of objects
pub fn parse_json(text: &str) -> Result<Vec<Manifest>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    match value {
        serde_json::Value::Array(items) => items.into_iter().map(serde_json::from_value).collect(),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}
