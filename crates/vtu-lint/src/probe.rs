//! Module probing: the external "type oracle" behind the component-selector
//! classifier.
//!
//! The classifier needs to know whether an imported binding is object- or
//! function-like. That knowledge lives outside the syntax tree, so it is
//! modeled as an injected capability: hosts that can inspect modules supply
//! a [`ModuleProbe`] that returns export shapes, and the filesystem adapter
//! used by default only resolves specifiers to paths (a Rust process cannot
//! execute a JavaScript module), which feeds the heuristic fallback.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Coarse runtime type of one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Object,
    Function,
    Other,
}

/// The exported shape of a loaded module.
#[derive(Debug, Clone, Default)]
pub struct ModuleShape {
    pub default_export: Option<ExportKind>,
    pub named_exports: HashMap<String, ExportKind>,
}

impl ModuleShape {
    /// The kind bound by an import: a named export when `imported` names one,
    /// the default export otherwise.
    pub fn export(&self, imported: Option<&str>) -> Option<ExportKind> {
        match imported {
            Some(name) => self.named_exports.get(name).copied(),
            None => self.default_export,
        }
    }
}

/// What probing a module specifier produced.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    /// The module was resolved and loaded; its exports are known.
    Shape(ModuleShape),
    /// The module resolved to a file or package on disk but could not be
    /// loaded in this environment.
    Unloadable { resolved_path: PathBuf },
    /// The specifier does not resolve to anything installed.
    Unresolved,
}

/// Capability to resolve and inspect an imported module.
///
/// Failures are non-fatal by construction: every outcome is a valid answer
/// and the classifier degrades to its heuristic.
pub trait ModuleProbe {
    /// Probes `specifier` as imported from `base_file`.
    fn probe(&self, specifier: &str, base_file: &Path) -> ProbeOutcome;
}

/// Filesystem adapter performing Node-style resolution.
///
/// Relative specifiers resolve against the importing file's directory with
/// extension guessing; bare specifiers walk parent directories looking for
/// `node_modules/<specifier>`. Since the module itself cannot be executed,
/// a successful resolution is always reported as [`ProbeOutcome::Unloadable`]
/// with the resolved path.
#[derive(Debug, Default)]
pub struct FsModuleProbe;

const RESOLVE_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs", ".json", ".vue"];

impl FsModuleProbe {
    fn resolve_as_file(candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }
        let raw = candidate.as_os_str().to_string_lossy().into_owned();
        for ext in RESOLVE_EXTENSIONS {
            let with_ext = PathBuf::from(format!("{raw}{ext}"));
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }
        let index = candidate.join("index.js");
        if index.is_file() {
            return Some(index);
        }
        // A package directory with a manifest counts as resolved even when
        // its entry point cannot be determined.
        if candidate.join("package.json").is_file() {
            return Some(candidate.to_path_buf());
        }
        None
    }

    fn resolve(&self, specifier: &str, base_file: &Path) -> Option<PathBuf> {
        if specifier.starts_with("./") || specifier.starts_with("../") {
            let base_dir = base_file.parent().unwrap_or(base_file);
            return Self::resolve_as_file(&base_dir.join(specifier));
        }
        let start = if base_file.is_dir() {
            base_file
        } else {
            base_file.parent().unwrap_or(base_file)
        };
        for dir in start.ancestors() {
            let candidate = dir.join("node_modules").join(specifier);
            if let Some(resolved) = Self::resolve_as_file(&candidate) {
                return Some(resolved);
            }
        }
        None
    }
}

impl ModuleProbe for FsModuleProbe {
    fn probe(&self, specifier: &str, base_file: &Path) -> ProbeOutcome {
        match self.resolve(specifier, base_file) {
            Some(resolved_path) => {
                debug!(specifier, resolved = %resolved_path.display(), "Resolved module");
                ProbeOutcome::Unloadable { resolved_path }
            }
            None => {
                debug!(specifier, "Module did not resolve");
                ProbeOutcome::Unresolved
            }
        }
    }
}

/// A probe answering from a fixed table. Intended for tests and for hosts
/// that precompute module shapes.
#[derive(Debug, Default)]
pub struct StaticProbe {
    modules: HashMap<String, ProbeOutcome>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, specifier: &str, outcome: ProbeOutcome) -> Self {
        self.modules.insert(specifier.to_string(), outcome);
        self
    }
}

impl ModuleProbe for StaticProbe {
    fn probe(&self, specifier: &str, _base_file: &Path) -> ProbeOutcome {
        self.modules
            .get(specifier)
            .cloned()
            .unwrap_or(ProbeOutcome::Unresolved)
    }
}
