//! Static knowledge about the deprecated Vue Test Utils surface.
//!
//! Three domains: mount options, selector functions, and wrapper instance
//! methods. Each table maps a deprecated name to its message data, an
//! optional replacement, and whether a structural fixer exists. The rules
//! decide when an entry applies; version thresholds live here alongside the
//! names they gate.

use once_cell::sync::Lazy;
use semver::Version;
use std::collections::{HashMap, HashSet};

/// Accessor names that, called on a wrapper, yield another wrapper.
pub static WRAPPER_RETURNING_FUNCTIONS: &[&str] = &[
    "find",
    "findAll",
    "findComponent",
    "findAllComponents",
    "get",
    "getComponent",
    "at",
];

/// Wrapper methods that mutate the mounted component and must be awaited.
pub static UPDATE_TRIGGERING_FUNCTIONS: &[&str] = &[
    "setChecked",
    "setData",
    "setMethods",
    "setProps",
    "setSelected",
    "setValue",
    "trigger",
];

/// Selector functions that no longer accept component selectors, and the
/// component-aware function replacing each.
pub static DEPRECATED_SELECTOR_FUNCTIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| {
        HashMap::from([
            ("find", "findComponent"),
            ("findAll", "findAllComponents"),
            ("get", "getComponent"),
        ])
    });

/// Wrapper members that only exist on component wrappers, not DOM wrappers.
pub static COMPONENT_ONLY_WRAPPER_MEMBERS: &[&str] =
    &["vm", "props", "setData", "setProps", "emitted"];

/// How a deprecated mount option is repaired, when it can be mechanically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOptionFix {
    /// Rename the key to `attachTo` and rewrite the value to `document.body`.
    AttachToDocument,
}

/// One removed or deprecated mount option.
#[derive(Debug, Clone)]
pub struct MountOptionEntry {
    /// Suggested replacement option path, if one exists.
    pub replacement: Option<&'static str>,
    pub fix: Option<MountOptionFix>,
}

/// Mount options removed, moved, or trivially replaceable in VTU 2.
pub static REMOVED_MOUNT_OPTIONS: Lazy<HashMap<&'static str, MountOptionEntry>> =
    Lazy::new(|| {
        let entry = |replacement, fix| MountOptionEntry { replacement, fix };
        HashMap::from([
            // deprecated or replaceable in vtu 1/vue 2
            (
                "attachToDocument",
                entry(Some("attachTo"), Some(MountOptionFix::AttachToDocument)),
            ),
            ("parentComponent", entry(None, None)),
            ("filters", entry(None, None)),
            // removed or moved in vtu 2
            ("context", entry(None, None)),
            ("listeners", entry(Some("props"), None)),
            ("stubs", entry(Some("global.stubs"), None)),
            ("mocks", entry(Some("global.mocks"), None)),
            ("propsData", entry(Some("props"), None)),
            ("provide", entry(Some("global.provide"), None)),
            ("localVue", entry(Some("global"), None)),
            ("scopedSlots", entry(Some("slots"), None)),
            // not explicitly removed but has trivial replacement
            ("components", entry(Some("global.components"), None)),
            ("directives", entry(Some("global.directives"), None)),
            ("mixins", entry(Some("global.mixins"), None)),
            ("store", entry(Some("global.plugins"), None)),
            ("router", entry(Some("global.plugins"), None)),
        ])
    });

/// Mount options valid on VTU 2.
pub static VALID_MOUNT_OPTIONS_V2: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["attachTo", "attrs", "data", "props", "slots", "global", "shallow"])
});

/// Mount options valid on VTU 1.
pub static VALID_MOUNT_OPTIONS_V1: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "context",
        "data",
        "slots",
        "scopedSlots",
        "stubs",
        "mocks",
        "localVue",
        "attachTo",
        "attrs",
        "propsData",
        "provide",
        "listeners",
        // these options technically rely on configuration merging with the
        // underlying component but are common practice and have an
        // autofixable replacement in VTU 2
        "components",
        "directives",
        "mixins",
        "store",
        "router",
    ])
});

/// Entry points that mount a component and take a mount-options object.
pub static MOUNT_FUNCTION_NAMES: &[&str] = &["mount", "shallowMount"];

/// The module specifier mount functions must originate from.
pub static VTU_MODULE: &str = "@vue/test-utils";

/// Wrapper instance methods removed in VTU 2, with replacement suggestions
/// where one exists. Only `contains` has a mechanical rewrite.
pub static DEPRECATED_WRAPPER_FUNCTIONS: Lazy<HashMap<&'static str, Option<&'static str>>> =
    Lazy::new(|| {
        HashMap::from([
            ("emittedByOrder", Some("emitted()")),
            ("contains", Some("exists()")),
            ("is", Some("classes(), attributes(), or element.tagName")),
            (
                "isEmpty",
                Some("exists(), isVisible(), or a custom matcher from jest-dom"),
            ),
            ("isVueInstance", None),
            ("name", Some("vm.$options.name")),
            ("setMethods", None),
            // rolled into setValue() in VTU 2, but setValue does not cover
            // them reliably on VTU 1, so no suggestion is offered
            ("setSelected", None),
            ("setChecked", None),
        ])
    });

/// `sync` stopped having any effect at this version.
pub static SYNC_REMOVED_AT: Lazy<Version> =
    Lazy::new(|| Version::parse("1.0.0-beta.30").expect("valid threshold"));

/// The next-major boundary separating the two valid-option whitelists.
pub static NEXT_MAJOR: Lazy<Version> =
    Lazy::new(|| Version::parse("2.0.0").expect("valid threshold"));

/// First version where `get('div').getComponent(...)`-style chains are valid,
/// making the selector rename safe inside a chain.
pub static CHAINED_SELECTOR_FIX_SAFE_AT: Lazy<Version> =
    Lazy::new(|| Version::parse("1.3.0").expect("valid threshold"));
