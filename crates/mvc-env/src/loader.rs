//! Resource loading strategies
//!
//! A [`ResourceLoader`] turns a location string into a [`Resource`]. Two
//! strategies exist:
//!
//! - **File system**: plain locations resolve relative to a working directory
//!   (the process working directory unless overridden). A leading slash does
//!   not make a plain location absolute; use `file:/abs/path` for that.
//! - **Classpath**: plain locations are searched, in order, across a list of
//!   resource roots. The first root that contains the location wins.
//!
//! Whatever the strategy, `classpath:` locations are always searched across
//! the classpath roots and `file:` locations always resolve on the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::path::{CLASSPATH_PREFIX, FILE_PREFIX, ResourcePath};
use crate::{Error, Result};

/// How plain (unprefixed) locations are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    FileSystem,
    Classpath,
}

/// Resolves location strings to resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLoader {
    kind: LoaderKind,
    working_dir: PathBuf,
    classpath_roots: Vec<PathBuf>,
}

impl ResourceLoader {
    /// Loader resolving plain locations against the working directory.
    pub fn file_system() -> Self {
        Self::with_kind(LoaderKind::FileSystem)
    }

    /// Loader resolving plain locations against the classpath roots.
    ///
    /// Until roots are configured, the working directory is the only root.
    pub fn classpath() -> Self {
        Self::with_kind(LoaderKind::Classpath)
    }

    fn with_kind(kind: LoaderKind) -> Self {
        let working_dir = std::env::current_dir().unwrap_or_default();
        Self {
            kind,
            classpath_roots: vec![working_dir.clone()],
            working_dir,
        }
    }

    /// Override the directory plain filesystem locations resolve against.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Replace the classpath roots. An empty list leaves the current roots.
    pub fn with_classpath_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        if !roots.is_empty() {
            self.classpath_roots = roots;
        }
        self
    }

    pub fn kind(&self) -> LoaderKind {
        self.kind
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn classpath_roots(&self) -> &[PathBuf] {
        &self.classpath_roots
    }

    /// Resolve a location. Never fails; check [`Resource::exists`].
    pub fn resource(&self, location: &str) -> Resource {
        let path = ResourcePath::new(location);
        let native = match path.prefix() {
            CLASSPATH_PREFIX => self.search_classpath(&path),
            FILE_PREFIX => Some(self.file_path(&path)),
            _ => match self.kind {
                LoaderKind::FileSystem => Some(path.under(&self.working_dir)),
                LoaderKind::Classpath => self.search_classpath(&path),
            },
        };

        tracing::trace!(location, ?native, "Resolved resource location");
        Resource {
            location: location.to_string(),
            path: native,
        }
    }

    fn file_path(&self, path: &ResourcePath) -> PathBuf {
        if path.is_absolute() {
            PathBuf::from(path.as_str())
        } else {
            path.under(&self.working_dir)
        }
    }

    fn search_classpath(&self, path: &ResourcePath) -> Option<PathBuf> {
        let candidates: Vec<PathBuf> = self
            .classpath_roots
            .iter()
            .map(|root| path.under(root))
            .collect();

        candidates
            .iter()
            .find(|candidate| candidate.exists())
            .or_else(|| candidates.first())
            .cloned()
    }
}

impl Default for ResourceLoader {
    fn default() -> Self {
        Self::file_system()
    }
}

/// A resolved resource. It may or may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    location: String,
    path: Option<PathBuf>,
}

impl Resource {
    /// The location string this resource was resolved from.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Native path the location resolved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn exists(&self) -> bool {
        self.path.as_deref().is_some_and(Path::exists)
    }

    /// Canonical filesystem path for an existing resource.
    pub fn real_path(&self) -> Option<PathBuf> {
        self.path
            .as_deref()
            .and_then(|path| dunce::canonicalize(path).ok())
    }

    pub fn read_to_string(&self) -> Result<String> {
        let path = self.existing_path()?;
        fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let path = self.existing_path()?;
        fs::read(path).map_err(|e| Error::io(path, e))
    }

    /// Deserialize the resource as a document.
    ///
    /// Format is detected from the file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let path = self.existing_path()?;
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        // Reject unknown formats before touching the file.
        if !matches!(extension.as_str(), "toml" | "json" | "yaml" | "yml") {
            return Err(Error::UnsupportedFormat { extension });
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let parse_error = |format: &str, message: String| Error::DocumentParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => {
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            _ => serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string())),
        }
    }

    fn existing_path(&self) -> Result<&Path> {
        match self.path.as_deref() {
            Some(path) if path.exists() => Ok(path),
            _ => Err(Error::ResourceNotFound {
                location: self.location.clone(),
            }),
        }
    }
}
