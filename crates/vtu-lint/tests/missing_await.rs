mod common;

use common::{check, data, fix_to_fixpoint, linter_with};
use pretty_assertions::assert_eq;
use vtu_lint::{MessageId, RuleId, RuleOptions};

const RULE: RuleId = RuleId::MissingAwait;

fn check_one(code: &str) -> Vec<vtu_lint::Diagnostic> {
    let linter = linter_with(None, RuleOptions::default());
    check(&linter, RULE, code)
}

fn fixed(code: &str) -> String {
    let linter = linter_with(None, RuleOptions::default());
    fix_to_fixpoint(&linter, RULE, code)
}

#[test]
fn awaited_calls_are_valid() {
    for code in [
        "async () => { await wrapper.trigger('click'); }",
        "async () => await wrapper.setProps({ msg: 'hello' })",
        "async () => { await wrapper.vm.$emit('custom'); }",
        "async () => { await wrapper.find('button').trigger('click'); }",
    ] {
        assert_eq!(check_one(code).len(), 0, "{code} should be valid");
    }
}

#[test]
fn non_wrapper_receivers_are_valid() {
    for code in [
        "() => somethingElse.trigger('click')",
        "() => emitter.vm.$emit('custom')",
        "() => wrapper.html()",
    ] {
        assert_eq!(check_one(code).len(), 0, "{code} should be valid");
    }
}

#[test]
fn every_update_triggering_method_is_reported() {
    for method in [
        "setChecked",
        "setData",
        "setMethods",
        "setProps",
        "setSelected",
        "setValue",
        "trigger",
    ] {
        let code = format!("() => wrapper.{method}()");
        let diagnostics = check_one(&code);
        assert_eq!(diagnostics.len(), 1, "{code} should be reported");
        assert_eq!(diagnostics[0].message_id, MessageId::MissingAwait);
        assert_eq!(data(&diagnostics[0], "identifier"), method);
    }
}

#[test]
fn fix_awaits_and_promotes_the_enclosing_arrow() {
    assert_eq!(
        fixed("() => wrapper.trigger('click')"),
        "async () => await wrapper.trigger('click')"
    );
}

#[test]
fn fix_inside_an_already_async_function_only_awaits() {
    assert_eq!(
        fixed("async () => { wrapper.setValue('text'); }"),
        "async () => { await wrapper.setValue('text'); }"
    );
}

#[test]
fn top_level_call_is_awaited_without_a_function_to_promote() {
    assert_eq!(fixed("wrapper.trigger('click')"), "await wrapper.trigger('click')");
}

#[test]
fn function_declarations_are_not_promoted() {
    assert_eq!(
        fixed("function run() { wrapper.trigger('click'); }"),
        "function run() { await wrapper.trigger('click'); }"
    );
}

#[test]
fn emit_through_vm_is_reported_with_a_compound_identifier() {
    let diagnostics = check_one("() => wrapper.vm.$emit('change')");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(data(&diagnostics[0], "identifier"), "vm.$emit");
    assert_eq!(
        fixed("() => wrapper.vm.$emit('change')"),
        "async () => await wrapper.vm.$emit('change')"
    );
}

#[test]
fn emit_off_a_selector_chain_is_reported() {
    let code = "() => wrapper.findComponent(MyComponent).vm.$emit('change')";
    let diagnostics = check_one(code);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        fixed(code),
        "async () => await wrapper.findComponent(MyComponent).vm.$emit('change')"
    );
}

#[test]
fn two_calls_in_one_function_converge_over_two_passes() {
    let code = "() => { wrapper.setProps({ a: 1 }); wrapper.trigger('click'); }";
    assert_eq!(check_one(code).len(), 2);
    assert_eq!(
        fixed(code),
        "async () => { await wrapper.setProps({ a: 1 }); await wrapper.trigger('click'); }"
    );
}

#[test]
fn configured_wrapper_names_apply() {
    let options = RuleOptions {
        wrapper_names: vec!["cmp".to_string()],
        ..RuleOptions::default()
    };
    let linter = linter_with(None, options);
    assert_eq!(check(&linter, RULE, "() => cmp.trigger('click')").len(), 1);
    assert_eq!(check(&linter, RULE, "() => wrapper.trigger('click')").len(), 0);
}
