//! Semantic-version gating and installed-version detection.

use crate::error::{Error, Result};
use semver::Version;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// True if `version` is at or above `threshold`, using semver ordering
/// (pre-release segments order below their corresponding release).
pub fn at_least(version: &Version, threshold: &Version) -> bool {
    version >= threshold
}

#[derive(Deserialize)]
struct PackageJson {
    version: Option<String>,
}

/// Detects the installed `@vue/test-utils` version by walking parent
/// directories of `start_dir` for `node_modules/@vue/test-utils/package.json`.
///
/// Failing to find one is a fatal configuration error for version-dependent
/// rules; there is no silent guessing.
pub fn detect_version(start_dir: &Path) -> Result<Version> {
    for dir in start_dir.ancestors() {
        let manifest = dir
            .join("node_modules")
            .join("@vue")
            .join("test-utils")
            .join("package.json");
        if !manifest.is_file() {
            continue;
        }
        let text = fs::read_to_string(&manifest)
            .map_err(|e| Error::FileSystem(format!("{}: {e}", manifest.display())))?;
        let package: PackageJson = match serde_json::from_str(&text) {
            Ok(package) => package,
            Err(e) => {
                debug!(manifest = %manifest.display(), error = %e, "Unparseable package.json");
                continue;
            }
        };
        if let Some(raw) = package.version {
            let version = Version::parse(&raw).map_err(|_| Error::InvalidVersion(raw))?;
            debug!(%version, manifest = %manifest.display(), "Detected VTU version");
            return Ok(version);
        }
    }
    Err(Error::VersionUndetectable)
}
