//! Versioned artifact storage.
//!
//! Artifacts are named `<prefix>_v<major>.<minor>.<patch>.<ext>` inside the
//! output directory. The next version is derived from the directory contents
//! alone: the greatest existing version for the prefix with its patch
//! incremented, or `1.0.0` when there is none. Files are created with
//! create-new semantics, so a concurrent writer that takes a version first
//! makes this store move on to the following one instead of overwriting it.

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{config::OutputConfig, error::StratumError};

/// How many versions [`VersionStore::store`] tries before giving up.
pub const MAX_ATTEMPTS: usize = 16;

/// A `(major, minor, patch)` artifact version, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Version {
    /// The version of the first artifact for a prefix.
    pub const FIRST: Version = Version::new(1, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(self) -> u64 {
        self.major
    }

    pub fn minor(self) -> u64 {
        self.minor
    }

    pub fn patch(self) -> u64 {
        self.patch
    }

    /// The same version with the patch number incremented.
    pub fn next_patch(self) -> Self {
        Self {
            patch: self.patch.saturating_add(1),
            ..self
        }
    }

    /// Parses `major.minor.patch`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Keeps ASCII letters, digits, `_` and `-`. Returns `fallback` if nothing
/// is left.
pub fn sanitize_prefix(prefix: &str, fallback: &str) -> String {
    let sanitized: String = prefix
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect();

    if sanitized.is_empty() {
        fallback.to_string()
    } else {
        sanitized
    }
}

/// Generation parameters recorded next to an artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    prompt: String,
    multiplier: f64,
    components: usize,
}

impl Provenance {
    pub fn new(prompt: impl Into<String>, multiplier: f64, components: usize) -> Self {
        Self {
            prompt: prompt.into(),
            multiplier,
            components,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Renders the sidecar Markdown.
    pub fn to_markdown(&self) -> String {
        format!(
            "# Diagram Source Prompt\n\n```text\n{}\n```\n\n**Generated Config**:\n- Multiplier: {:?}\n- Components: {}\n",
            self.prompt, self.multiplier, self.components
        )
    }
}

/// Allocates artifact paths and writes artifacts and sidecars.
#[derive(Debug, Clone)]
pub struct VersionStore {
    directory: PathBuf,
    extension: String,
    sidecar_directory: String,
    sidecar_extension: String,
    fallback_prefix: String,
}

impl VersionStore {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: config.directory().to_path_buf(),
            extension: config.extension().to_string(),
            sidecar_directory: config.sidecar_directory().to_string(),
            sidecar_extension: config.sidecar_extension().to_string(),
            fallback_prefix: config.fallback_prefix().to_string(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Sanitizes a prefix with this store's fallback.
    pub fn sanitize(&self, prefix: &str) -> String {
        sanitize_prefix(prefix, &self.fallback_prefix)
    }

    fn file_name(&self, prefix: &str, version: Version) -> String {
        format!("{prefix}_v{version}.{}", self.extension)
    }

    /// Reads the version out of an artifact file name for `prefix`.
    fn version_of(&self, prefix: &str, file_name: &str) -> Option<Version> {
        let rest = file_name.strip_prefix(prefix)?.strip_prefix("_v")?;
        let rest = rest.strip_suffix(self.extension.as_str())?.strip_suffix('.')?;
        Version::parse(rest)
    }

    /// The greatest existing version for an already sanitized prefix.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory exists but cannot be listed.
    pub fn latest_version(&self, prefix: &str) -> io::Result<Option<Version>> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        let mut latest = None;
        for entry in entries {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if let Some(version) = self.version_of(prefix, &name) {
                latest = latest.max(Some(version));
            }
        }
        Ok(latest)
    }

    /// Computes the next unused artifact path for `prefix`, creating the
    /// output directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Io`] if the directory cannot be created or read.
    pub fn next_path(&self, prefix: &str) -> Result<(PathBuf, Version), StratumError> {
        fs::create_dir_all(&self.directory)?;
        let prefix = self.sanitize(prefix);
        let version = self
            .latest_version(&prefix)?
            .map_or(Version::FIRST, Version::next_patch);

        let path = self.directory.join(self.file_name(&prefix, version));
        debug!(path:? = path, version:% = version; "Next artifact path");
        Ok((path, version))
    }

    /// Writes `text` to `path`, which must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Persist`]; an existing file shows up as an
    /// [`io::ErrorKind::AlreadyExists`] source.
    pub fn persist(&self, path: &Path, text: &str) -> Result<(), StratumError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| StratumError::new_persist_error(path, err))?;
        file.write_all(text.as_bytes())
            .map_err(|err| StratumError::new_persist_error(path, err))
    }

    /// Writes `text` as the next version for `prefix`.
    ///
    /// If another writer creates the chosen file first, the next version is
    /// recomputed and tried, up to [`MAX_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Persist`] if writing fails or every attempt
    /// collides, and [`StratumError::Io`] if the directory cannot be read.
    pub fn store(&self, prefix: &str, text: &str) -> Result<(PathBuf, Version), StratumError> {
        let mut attempt = 1;
        loop {
            let (path, version) = self.next_path(prefix)?;
            match self.persist(&path, text) {
                Ok(()) => {
                    info!(path:? = path, version:% = version; "Saved diagram");
                    return Ok((path, version));
                }
                Err(StratumError::Persist { source, .. })
                    if source.kind() == io::ErrorKind::AlreadyExists && attempt < MAX_ATTEMPTS =>
                {
                    warn!(path:? = path, attempt; "Artifact already exists, retrying with next version");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Path of the sidecar belonging to `artifact`.
    pub fn sidecar_path(&self, artifact: &Path) -> PathBuf {
        let stem = artifact
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = artifact.parent().unwrap_or(&self.directory);
        parent
            .join(&self.sidecar_directory)
            .join(format!("{stem}.{}", self.sidecar_extension))
    }

    /// Writes the provenance sidecar for `artifact`.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Persist`] if the sidecar cannot be written.
    pub fn persist_sidecar(
        &self,
        artifact: &Path,
        provenance: &Provenance,
    ) -> Result<PathBuf, StratumError> {
        let path = self.sidecar_path(artifact);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|err| StratumError::new_persist_error(dir, err))?;
        }
        fs::write(&path, provenance.to_markdown())
            .map_err(|err| StratumError::new_persist_error(&path, err))?;

        debug!(path:? = path; "Saved provenance sidecar");
        Ok(path)
    }
}
