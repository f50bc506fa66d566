//! File-backed record store
//!
//! Records are kept as one YAML file each, grouped by kind:
//!
//! ```text
//! <root>/
//! ├── bundle.yaml
//! ├── profiles/<name>.yaml
//! ├── rules/<name>.yaml
//! ├── variables/<name>.yaml
//! └── tailorings/<name>-tp.xml
//! ```

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use xccdf_bundle::parser::RecordKind;

use crate::error::{CliError, Result};

const BUNDLE_FILE: &str = "bundle.yaml";
const TAILORINGS_DIR: &str = "tailorings";

/// Whether the last parse of a bundle succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataStreamStatus {
    Valid,
    Invalid,
}

/// A parsed content bundle and the outcome of its last parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStatus {
    pub name: String,

    pub namespace: String,

    /// Content file name, relative to the content root
    pub content_file: String,

    pub data_stream_status: DataStreamStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl BundleStatus {
    /// Status for a bundle, valid unless `error` is set
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        content_file: impl Into<String>,
        error: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            content_file: content_file.into(),
            data_stream_status: if error.is_some() {
                DataStreamStatus::Invalid
            } else {
                DataStreamStatus::Valid
            },
            error_message: error,
        }
    }
}

/// Store rooted at a directory
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Open a store, creating its directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        create_dir(&root)?;
        Ok(Self { root })
    }

    fn record_path(&self, kind: RecordKind, name: &str) -> Result<PathBuf> {
        check_record_name(name)?;
        Ok(self.root.join(kind.plural()).join(format!("{}.yaml", name)))
    }

    /// Persist a new record
    ///
    /// Fails with [`CliError::AlreadyExists`] if a record of that kind and
    /// name is already stored; the stored record is left untouched.
    pub fn create<T: Serialize>(&self, kind: RecordKind, name: &str, record: &T) -> Result<()> {
        let path = self.record_path(kind, name)?;
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }

        let yaml = serde_yaml::to_string(record)?;
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(CliError::AlreadyExists {
                    kind,
                    name: name.to_string(),
                })
            }
            Err(source) => return Err(CliError::FileWrite { path, source }),
        };
        write_or_remove(file, path, yaml.as_bytes())
    }

    /// Load a stored record
    pub fn get<T: DeserializeOwned>(&self, kind: RecordKind, name: &str) -> Result<T> {
        let path = self.record_path(kind, name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CliError::NotFound {
                    kind,
                    name: name.to_string(),
                })
            }
            Err(source) => return Err(CliError::FileRead { path, source }),
        };
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Record the outcome of a parse run, replacing any earlier status
    pub fn update_bundle_status(&self, status: &BundleStatus) -> Result<()> {
        let path = self.root.join(BUNDLE_FILE);
        let yaml = serde_yaml::to_string(status)?;
        fs::write(&path, yaml).map_err(|source| CliError::FileWrite { path, source })
    }

    /// The status written by the last parse run
    pub fn bundle_status(&self) -> Result<BundleStatus> {
        let path = self.root.join(BUNDLE_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CliError::NoBundle {
                    path: self.root.clone(),
                })
            }
            Err(source) => return Err(CliError::FileRead { path, source }),
        };
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write a tailoring document, replacing an earlier one of the same name
    pub fn write_tailoring(&self, name: &str, xml: &str) -> Result<PathBuf> {
        check_record_name(name)?;
        let dir = self.root.join(TAILORINGS_DIR);
        create_dir(&dir)?;

        let path = dir.join(format!("{}-tp.xml", name));
        fs::write(&path, xml).map_err(|source| CliError::FileWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Write a freshly created file, removing it again if the write fails
fn write_or_remove<W: Write>(mut file: W, path: PathBuf, contents: &[u8]) -> Result<()> {
    let Err(source) = file.write_all(contents) else {
        return Ok(());
    };
    drop(file);
    if let Err(e) = fs::remove_file(&path) {
        tracing::warn!(path = %path.display(), error = %e, "Couldn't remove partial record");
    }
    Err(CliError::FileWrite { path, source })
}

/// Reject names that would resolve outside their store directory
pub fn check_record_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CliError::invalid("name", "name is empty"));
    }
    if name.contains(['/', '\\']) || name.contains("..") || name.starts_with('.') {
        return Err(CliError::invalid(
            "name",
            format!("'{}' is not a plain file name", name),
        ));
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| CliError::OutputDirCreation {
        path: path.to_path_buf(),
        source,
    })
}
