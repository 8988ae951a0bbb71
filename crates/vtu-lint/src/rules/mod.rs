//! Rule drivers: tree visitors that tie the classifiers, the knowledge base,
//! and the version gate together into diagnostics.

pub(crate) mod missing_await;
pub(crate) mod no_deprecated_mount_options;
pub(crate) mod no_deprecated_selectors;
pub(crate) mod no_deprecated_wrapper_functions;

use crate::ast::SyntaxTree;
use crate::config::RuleOptions;
use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::probe::ModuleProbe;
use crate::scope::ScopeTree;
use semver::Version;
use std::path::Path;

/// Everything a rule sees while visiting one file. Rules hold no state of
/// their own; each visit reads this context and appends diagnostics.
pub(crate) struct RuleContext<'a> {
    pub tree: &'a SyntaxTree,
    pub scopes: &'a ScopeTree,
    pub source: &'a str,
    /// Module-resolution base: the analyzed file's path, or the configured
    /// base directory when linting text with no file.
    pub resolve_base: &'a Path,
    pub options: &'a RuleOptions,
    /// Resolved once at linter construction; `None` when neither configured
    /// nor detectable.
    pub version: Option<&'a Version>,
    pub probe: &'a dyn ModuleProbe,
}

impl RuleContext<'_> {
    /// The resolved version, or the fatal configuration error when a
    /// version-dependent rule runs without one.
    pub(crate) fn require_version(&self) -> Result<&Version> {
        self.version.ok_or(Error::VersionUndetectable)
    }
}

/// Runs every rule over the file, in registration order.
pub(crate) fn run_all(ctx: &RuleContext<'_>) -> Result<Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();
    missing_await::run(ctx, &mut diagnostics)?;
    no_deprecated_mount_options::run(ctx, &mut diagnostics)?;
    no_deprecated_selectors::run(ctx, &mut diagnostics)?;
    no_deprecated_wrapper_functions::run(ctx, &mut diagnostics)?;
    diagnostics.sort_by_key(|d| (d.span.start, d.span.end));
    Ok(diagnostics)
}
