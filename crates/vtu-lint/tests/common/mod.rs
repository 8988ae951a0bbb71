#![allow(dead_code)]

use vtu_lint::{apply_fixes, Diagnostic, Linter, RuleId, RuleOptions, Settings};

pub fn linter(version: &str) -> Linter {
    linter_with(Some(version), RuleOptions::default())
}

pub fn linter_with(version: Option<&str>, options: RuleOptions) -> Linter {
    let settings = Settings {
        vtu_version: version.map(str::to_string),
    };
    // The temp dir has no node_modules, so a `None` version stays unresolved
    // instead of picking up whatever happens to be installed around the
    // test runner.
    Linter::new(options, settings, std::env::temp_dir()).unwrap()
}

pub fn check(linter: &Linter, rule: RuleId, code: &str) -> Vec<Diagnostic> {
    linter.check_rule(rule, code, None).unwrap()
}

/// Re-lints and re-applies fixes until none apply, mirroring how editor
/// hosts drive fix application.
pub fn fix_to_fixpoint(linter: &Linter, rule: RuleId, code: &str) -> String {
    let mut source = code.to_string();
    for _ in 0..10 {
        let diagnostics = linter.check_rule(rule, &source, None).unwrap();
        let (next, applied) = apply_fixes(&source, &diagnostics);
        if applied == 0 {
            return next;
        }
        source = next;
    }
    source
}

pub fn data<'a>(diagnostic: &'a Diagnostic, key: &str) -> &'a str {
    diagnostic
        .data
        .get(key)
        .map(String::as_str)
        .unwrap_or_else(|| panic!("diagnostic has no data key `{key}`"))
}
