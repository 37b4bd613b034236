use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::centroids;
use crate::config::CombineConfig;
use crate::error::{CombineError, Result};

pub const SOURCE_SUFFIX: &str = ".json";

// What a parsed source file turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum SourceShape {
    /// Has a `features` key; entries are taken as-is, in array order.
    Collection(Vec<Value>),
    /// Bare parcel record with both `geometry` and `properties`.
    Feature { geometry: Value, properties: Value },
    Unrecognized,
}

/// A GeoJSON Feature built from a bare parcel record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelFeature {
    pub geometry: Value,
    pub properties: Value,
}

impl ParcelFeature {
    pub fn into_value(self) -> Value {
        json!({
            "type": "Feature",
            "geometry": self.geometry,
            "properties": self.properties,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub files_read: usize,
    pub files_skipped: usize,
    pub features: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub features: Vec<Value>,
    pub summary: CollectSummary,
}

// Presence-of-key checks only: `features` wins over `geometry` + `properties`.
// A `features` member that is not an array aborts the run.
pub fn classify(path: &Path, value: Value) -> Result<SourceShape> {
    let Value::Object(mut object) = value else {
        return Ok(SourceShape::Unrecognized);
    };

    if let Some(features) = object.remove("features") {
        return match features {
            Value::Array(features) => Ok(SourceShape::Collection(features)),
            _ => Err(CombineError::InvalidFeatures {
                path: path.to_path_buf(),
            }),
        };
    }

    if object.contains_key("geometry") && object.contains_key("properties") {
        let geometry = object.remove("geometry").unwrap_or(Value::Null);
        let properties = object.remove("properties").unwrap_or(Value::Null);
        return Ok(SourceShape::Feature {
            geometry,
            properties,
        });
    }

    Ok(SourceShape::Unrecognized)
}

// Lists `*.json` entries of a directory, sorted by file name so output order
// does not depend on the filesystem.
pub fn list_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir_error = |source| CombineError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        // Raw bytes, so names that are not valid UTF-8 still match.
        if entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(SOURCE_SUFFIX.as_bytes())
        {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub fn load_source(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|source| CombineError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| {
        if source.is_io() {
            CombineError::ReadFile {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            CombineError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Reads every source file in `dir` and returns the features in encounter
/// order. Stops at the first unreadable or malformed file.
pub fn collect(dir: &Path) -> Result<Collected> {
    let files = list_source_files(dir)?;
    log::info!("Found {} source files in {}", files.len(), dir.display());

    let mut collected = Collected::default();

    for (file_index, file) in files.iter().enumerate() {
        log::debug!("Reading file {}/{}: {}", file_index + 1, files.len(), file.display());
        let data = load_source(file)?;
        collected.summary.files_read += 1;

        match classify(file, data)? {
            SourceShape::Collection(features) => {
                log::debug!("{} features in {}", features.len(), file.display());
                collected.features.extend(features);
            }
            SourceShape::Feature {
                geometry,
                properties,
            } => {
                collected.features.push(
                    ParcelFeature {
                        geometry,
                        properties,
                    }
                    .into_value(),
                );
            }
            SourceShape::Unrecognized => {
                let name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.display().to_string());
                log::warn!("Unexpected format, skipping: {}", name);
                collected.summary.files_skipped += 1;
            }
        }
    }

    collected.summary.features = collected.features.len();
    Ok(collected)
}

pub fn feature_collection(features: &[Value]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

// Writes the collection as indented JSON, creating or truncating the file.
pub fn write(features: &[Value], output_path: &Path) -> Result<()> {
    let write_error = |source| CombineError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let file = File::create(output_path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &feature_collection(features)).map_err(
        |source| {
            if source.is_io() {
                write_error(source.into())
            } else {
                CombineError::Serialize { source }
            }
        },
    )?;
    writer.flush().map_err(write_error)?;

    log::info!(
        "{} written with {} features",
        output_path.display(),
        features.len()
    );
    Ok(())
}

pub fn combine(config: &CombineConfig) -> Result<CollectSummary> {
    log::info!("=== Combining parcels from {} ===", config.source_dir.display());

    let collected = collect(&config.source_dir)?;
    log::info!(
        "Collected {} features from {} files ({} skipped)",
        collected.summary.features,
        collected.summary.files_read,
        collected.summary.files_skipped
    );

    if log::log_enabled!(log::Level::Info) {
        if let Some(rect) = centroids::extent(&collected.features) {
            log::info!(
                "Extent bounds: ({:.6}, {:.6}) to ({:.6}, {:.6})",
                rect.min().x,
                rect.min().y,
                rect.max().x,
                rect.max().y
            );
        }
    }

    write(&collected.features, &config.output_file)?;

    if let Some(centroids_file) = &config.centroids_file {
        let points = centroids::centroid_features(&collected.features)?;
        write(&points, centroids_file)?;
    }

    Ok(collected.summary)
}
