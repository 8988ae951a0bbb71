//! Deprecation lint rules for Vue Test Utils test files.
//!
//! This crate flags usages of the deprecated Vue Test Utils (VTU) wrapper
//! API in JavaScript test sources and, where a rewrite is mechanical and
//! safe, attaches text edits that fix them. Four rules ship:
//!
//! - `missing-await` — wrapper methods that update the component must be
//!   awaited
//! - `no-deprecated-mount-options` — mount options removed or moved in VTU 2
//! - `no-deprecated-selectors` — selector functions called with component
//!   selectors
//! - `no-deprecated-wrapper-functions` — wrapper instance methods removed in
//!   VTU 2
//!
//! Analysis is purely static: a single synchronous pass over one file's
//! syntax tree, no execution of the target program. Fixes never produce
//! syntactically invalid output; when a rewrite would be unsafe on the
//! resolved VTU version, the diagnostic is reported without one.
//!
//! # Example
//!
//! ```
//! use vtu_lint::{Linter, RuleOptions, Settings};
//!
//! let settings = Settings {
//!     vtu_version: Some("1.2.0".to_string()),
//! };
//! let linter = Linter::new(RuleOptions::default(), settings, ".").unwrap();
//! let diagnostics = linter.check("() => wrapper.trigger('click')", None).unwrap();
//! assert_eq!(diagnostics.len(), 1);
//! assert!(diagnostics[0].fix.is_some());
//! ```

mod ast;
mod classify;
mod config;
mod diagnostic;
mod error;
mod fixer;
mod knowledge;
mod parser;
mod probe;
mod rules;
mod scope;
mod version;

pub use config::{RuleOptions, Settings};
pub use diagnostic::{Diagnostic, Fix, MessageId, RuleId, TextEdit};
pub use error::{Error, Result};
pub use fixer::apply_fixes;
pub use probe::{ExportKind, FsModuleProbe, ModuleProbe, ModuleShape, ProbeOutcome, StaticProbe};

use rules::RuleContext;
use semver::Version;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The lint engine for one configuration.
///
/// The VTU version is resolved exactly once, at construction: an explicit
/// setting wins, otherwise the installed package's declared version is read
/// from `node_modules` under the base directory. Rules that depend on the
/// version fail fast at check time when neither was available.
pub struct Linter {
    options: RuleOptions,
    version: Option<Version>,
    probe: Box<dyn ModuleProbe>,
    base_dir: PathBuf,
}

impl Linter {
    /// Creates a linter resolving modules and the VTU version relative to
    /// `base_dir`, probing modules through the filesystem.
    pub fn new(
        options: RuleOptions,
        settings: Settings,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        Self::with_probe(options, settings, base_dir, Box::new(FsModuleProbe))
    }

    /// Creates a linter with a custom module probe.
    pub fn with_probe(
        options: RuleOptions,
        settings: Settings,
        base_dir: impl Into<PathBuf>,
        probe: Box<dyn ModuleProbe>,
    ) -> Result<Self> {
        let base_dir = base_dir.into();
        let version = match settings.vtu_version {
            Some(raw) => {
                Some(Version::parse(&raw).map_err(|_| Error::InvalidVersion(raw))?)
            }
            None => match version::detect_version(&base_dir) {
                Ok(version) => Some(version),
                Err(Error::VersionUndetectable) => {
                    debug!("No VTU version configured or detectable");
                    None
                }
                Err(e) => return Err(e),
            },
        };
        Ok(Self {
            options,
            version,
            probe,
            base_dir,
        })
    }

    /// The resolved VTU version, if any.
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Lints `source`, running every rule. `file` is the analyzed file's
    /// path, used as the module-resolution base; pass `None` for sources
    /// with no backing file (resolution then uses the base directory).
    pub fn check(&self, source: &str, file: Option<&Path>) -> Result<Vec<Diagnostic>> {
        let parsed = parser::parse(source)?;
        let resolve_base = file.unwrap_or(&self.base_dir);
        let ctx = RuleContext {
            tree: &parsed.tree,
            scopes: &parsed.scopes,
            source,
            resolve_base,
            options: &self.options,
            version: self.version.as_ref(),
            probe: self.probe.as_ref(),
        };
        rules::run_all(&ctx)
    }

    /// Lints `source` with a single rule. Useful for hosts that enable
    /// rules individually.
    pub fn check_rule(
        &self,
        rule: RuleId,
        source: &str,
        file: Option<&Path>,
    ) -> Result<Vec<Diagnostic>> {
        let parsed = parser::parse(source)?;
        let resolve_base = file.unwrap_or(&self.base_dir);
        let ctx = RuleContext {
            tree: &parsed.tree,
            scopes: &parsed.scopes,
            source,
            resolve_base,
            options: &self.options,
            version: self.version.as_ref(),
            probe: self.probe.as_ref(),
        };
        let mut diagnostics = Vec::new();
        match rule {
            RuleId::MissingAwait => rules::missing_await::run(&ctx, &mut diagnostics)?,
            RuleId::NoDeprecatedMountOptions => {
                rules::no_deprecated_mount_options::run(&ctx, &mut diagnostics)?
            }
            RuleId::NoDeprecatedSelectors => {
                rules::no_deprecated_selectors::run(&ctx, &mut diagnostics)?
            }
            RuleId::NoDeprecatedWrapperFunctions => {
                rules::no_deprecated_wrapper_functions::run(&ctx, &mut diagnostics)?
            }
        }
        diagnostics.sort_by_key(|d| (d.span.start, d.span.end));
        Ok(diagnostics)
    }
}
