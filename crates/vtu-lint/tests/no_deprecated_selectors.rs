mod common;

use common::{check, data, fix_to_fixpoint, linter};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use vtu_lint::{
    ExportKind, Linter, MessageId, ModuleShape, ProbeOutcome, RuleId, RuleOptions, Settings,
    StaticProbe,
};

const RULE: RuleId = RuleId::NoDeprecatedSelectors;

fn vue_import(code: &str) -> String {
    format!("import MyComponent from './MyComponent.vue';\n{code}")
}

#[test]
fn string_selectors_are_valid() {
    let linter = linter("1.2.0");
    for code in [
        "wrapper.find('div');",
        "wrapper.findAll('.btn');",
        "wrapper.get('#app');",
        "const button = 'button'; wrapper.get(button);",
    ] {
        assert_eq!(check(&linter, RULE, code).len(), 0, "{code} should pass");
    }
}

#[test]
fn component_aware_functions_are_valid() {
    let linter = linter("1.2.0");
    let code = vue_import("wrapper.findComponent(MyComponent); wrapper.getComponent({ name: 'X' });");
    assert_eq!(check(&linter, RULE, &code).len(), 0);
}

#[test]
fn object_selectors_are_reported_and_renamed() {
    let linter = linter("1.2.0");
    let code = "wrapper.find({ name: 'MyComponent' });";
    let diagnostics = check(&linter, RULE, code);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message_id,
        MessageId::DeprecatedComponentSelector
    );
    assert_eq!(data(&diagnostics[0], "functionName"), "find");
    assert_eq!(
        fix_to_fixpoint(&linter, RULE, code),
        "wrapper.findComponent({ name: 'MyComponent' });"
    );
}

#[test]
fn vue_imports_are_component_selectors() {
    let linter = linter("1.2.0");
    for (call, renamed) in [
        ("wrapper.find(MyComponent);", "wrapper.findComponent(MyComponent);"),
        (
            "wrapper.findAll(MyComponent);",
            "wrapper.findAllComponents(MyComponent);",
        ),
        ("wrapper.get(MyComponent);", "wrapper.getComponent(MyComponent);"),
    ] {
        let code = vue_import(call);
        let diagnostics = check(&linter, RULE, &code);
        assert_eq!(diagnostics.len(), 1, "{call} should be reported");
        assert_eq!(fix_to_fixpoint(&linter, RULE, &code), vue_import(renamed));
    }
}

#[test]
fn rename_at_the_chain_root_is_safe_on_any_version() {
    let linter = linter("1.2.0");
    let code = vue_import("wrapper.get(MyComponent).text();");
    assert_eq!(
        fix_to_fixpoint(&linter, RULE, &code),
        vue_import("wrapper.getComponent(MyComponent).text();")
    );
}

#[test]
fn chained_rename_is_suppressed_before_1_3() {
    let linter = linter("1.2.2");
    let code = vue_import("wrapper.get('div').get(MyComponent);");
    let diagnostics = check(&linter, RULE, &code);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].fix.is_none());
    assert_eq!(fix_to_fixpoint(&linter, RULE, &code), code);
}

#[test]
fn chained_rename_applies_from_1_3() {
    let linter = linter("1.3.0");
    let code = vue_import("wrapper.get('div').get(MyComponent);");
    assert_eq!(
        fix_to_fixpoint(&linter, RULE, &code),
        vue_import("wrapper.get('div').getComponent(MyComponent);")
    );
}

#[test]
fn component_members_off_a_deprecated_selector_are_reported() {
    let linter = linter("1.2.0");
    for member in ["vm", "props", "setData", "setProps", "emitted"] {
        let code = format!("wrapper.get('div').{member};");
        let diagnostics = check(&linter, RULE, &code);
        assert_eq!(diagnostics.len(), 1, "{code} should be reported");
        assert_eq!(
            diagnostics[0].message_id,
            MessageId::MemberUsageFromDeprecatedSelector
        );
        assert_eq!(data(&diagnostics[0], "functionName"), "get");
        assert_eq!(data(&diagnostics[0], "missingMemberName"), member);
        assert_eq!(data(&diagnostics[0], "alternateFunctionName"), "getComponent");
        assert!(diagnostics[0].fix.is_none());
    }
}

#[test]
fn member_usage_judges_the_selector_behind_at() {
    let linter = linter("1.2.0");
    let diagnostics = check(&linter, RULE, "wrapper.findAll('div').at(0).vm;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(data(&diagnostics[0], "functionName"), "findAll");
    assert_eq!(
        data(&diagnostics[0], "alternateFunctionName"),
        "findAllComponents"
    );
}

#[test]
fn members_off_component_aware_selectors_are_valid() {
    let linter = linter("1.2.0");
    for code in [
        "wrapper.vm;",
        "wrapper.getComponent('div').vm;",
        "wrapper.findAllComponents('div').at(0).emitted;",
        "wrapper.get('div').getComponent('div').props;",
    ] {
        assert_eq!(check(&linter, RULE, code).len(), 0, "{code} should pass");
    }
}

#[test]
fn probed_module_shapes_classify_imports() {
    let shape = ModuleShape {
        default_export: None,
        named_exports: HashMap::from([
            ("Widget".to_string(), ExportKind::Object),
            ("VERSION".to_string(), ExportKind::Other),
        ]),
    };
    let probe = StaticProbe::new().with_module("widget-lib", ProbeOutcome::Shape(shape));
    let settings = Settings {
        vtu_version: Some("1.2.0".to_string()),
    };
    let linter = Linter::with_probe(
        RuleOptions::default(),
        settings,
        std::env::temp_dir(),
        Box::new(probe),
    )
    .unwrap();

    let reported = "import { Widget } from 'widget-lib';\nwrapper.find(Widget);";
    assert_eq!(check(&linter, RULE, reported).len(), 1);

    let passed = "import { VERSION } from 'widget-lib';\nwrapper.find(VERSION);";
    assert_eq!(check(&linter, RULE, passed).len(), 0);
}
