use std::fs;

use caexpr::{
    ast::Identifier,
    error::Diagnostic,
    get_result,
    interpreter::{
        evaluator::core::{Context, OrdinarySymbol},
        parser::fragments::read_expression,
        value::core::{Domain, Value},
    },
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// One block of a `.ca` file.
///
/// ```text
/// # comment
/// domain: b
/// set: A=6
/// set: ARR(2)='TEXT'
/// symbol: FIELD=100,F,8
/// expr: &A EQ L'FIELD-2
/// value: 1
/// codes: CE004 CE006
/// undefined: {X, Y}
/// ```
///
/// Blocks are separated by blank lines. `value` uses the printed form of
/// values; `codes` defaults to none and `undefined` is only checked when
/// present.
#[derive(Debug, Default)]
struct Scenario {
    line:      usize,
    domain:    Option<Domain>,
    context:   Context,
    expr:      Option<String>,
    value:     Option<String>,
    codes:     Vec<String>,
    undefined: Option<String>,
}

#[test]
fn scenario_files_pass() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scenarios").into_iter()
                                       .filter_map(Result::ok)
                                       .filter(|e| e.path().extension().is_some_and(|ext| ext == "ca"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for scenario in parse_scenarios(&content) {
            count += 1;
            run(scenario, &path.display().to_string());
        }
    }

    assert!(count > 0, "No scenarios found in tests/scenarios");
}

fn run(mut scenario: Scenario, file: &str) {
    let at = format!("{file}:{}", scenario.line);
    let source = scenario.expr
                         .take()
                         .unwrap_or_else(|| panic!("{at}: missing 'expr'"));
    let domain = scenario.domain.unwrap_or(Domain::Integer);

    if let Some(expected) = &scenario.undefined {
        let expr = read_expression(&source).unwrap_or_else(|e| panic!("{at}: {e}"));
        assert_eq!(&expr.undefined_attributed_symbols(&scenario.context).to_string(),
                   expected,
                   "{at}: undefined symbols of {source:?}");
    }

    let value = get_result(&source, domain, &mut scenario.context).unwrap_or_else(|e| panic!("{at}: {e}"));
    let codes: Vec<&str> = scenario.context
                                   .diagnostics
                                   .iter()
                                   .map(Diagnostic::code)
                                   .collect();

    if let Some(expected) = &scenario.value {
        assert_eq!(&value.to_string(), expected, "{at}: value of {source:?}");
    }
    assert_eq!(codes, scenario.codes, "{at}: diagnostics of {source:?}");
}

fn parse_scenarios(content: &str) -> Vec<Scenario> {
    let mut scenarios = Vec::new();
    let mut current: Option<Scenario> = None;

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            scenarios.extend(current.take());
            continue;
        }

        let scenario = current.get_or_insert_with(|| Scenario { line: number + 1,
                                                                ..Scenario::default() });
        let (key, value) = line.split_once(':')
                               .unwrap_or_else(|| panic!("line {}: expected 'key: value'", number + 1));
        let value = value.trim();

        match key.trim() {
            "domain" => scenario.domain = Some(value.parse().unwrap_or_else(|e| panic!("{e}"))),
            "set" => assign(&mut scenario.context, value),
            "symbol" => define(&mut scenario.context, value),
            "expr" => scenario.expr = Some(value.to_string()),
            "value" => scenario.value = Some(value.to_string()),
            "codes" => scenario.codes = value.split_whitespace().map(String::from).collect(),
            "undefined" => scenario.undefined = Some(value.to_string()),
            other => panic!("line {}: unknown key '{other}'", number + 1),
        }
    }
    scenarios.extend(current);

    scenarios
}

fn parse_value(text: &str) -> Value {
    if let Some(quoted) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        return Value::from(quoted);
    }
    Value::Integer(text.parse().unwrap_or_else(|e| panic!("bad value '{text}': {e}")))
}

fn assign(context: &mut Context, assignment: &str) {
    let (target, value) = assignment.split_once('=')
                                    .unwrap_or_else(|| panic!("bad assignment '{assignment}'"));
    let value = parse_value(value.trim());

    match target.trim().split_once('(') {
        Some((name, index)) => {
            let index = index.trim_end_matches(')')
                             .parse()
                             .unwrap_or_else(|e| panic!("bad subscript in '{assignment}': {e}"));
            context.set_element(name, index, value);
        },
        None => context.set_variable(target.trim(), value),
    }
}

fn define(context: &mut Context, definition: &str) {
    let (name, rest) = definition.split_once('=')
                                 .unwrap_or_else(|| panic!("bad symbol '{definition}'"));
    let mut parts = rest.split(',').map(str::trim);
    let mut symbol = OrdinarySymbol::new(parts.next().and_then(|v| v.parse().ok()).unwrap_or(0));

    if let Some(kind) = parts.next().and_then(|kind| kind.chars().next()) {
        symbol = symbol.with_type(kind);
    }
    if let Some(length) = parts.next().and_then(|length| length.parse().ok()) {
        symbol = symbol.with_length(length);
    }

    context.define_symbol(Identifier::new(name.trim()), symbol);
}
