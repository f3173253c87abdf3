use caexpr::{
    ast::{ConcatFragment, Range, VariableSymbol},
    error::Diagnostic,
    get_result,
    interpreter::{
        evaluator::{concat::evaluate_chain, core::Context},
        value::core::{Domain, Value},
    },
};
use pretty_assertions::assert_eq;

fn text(s: &str) -> ConcatFragment {
    ConcatFragment::Text(s.to_string())
}

fn var(name: &str) -> ConcatFragment {
    ConcatFragment::Variable(VariableSymbol::basic(name, Range::columns(0, name.len() + 1)))
}

fn context() -> Context {
    let mut context = Context::new();
    context.set_variable("A2", -10);
    context.set_variable("C", "XYZ");
    context.set_variable("B", false);
    context
}

#[test]
fn negative_integers_lose_their_sign() {
    let mut context = context();

    let chain = [text("5-10*"), var("A2")];
    assert_eq!(evaluate_chain(&chain, &mut context), "5-10*10");

    assert_eq!(get_result("'5-10*&A2'", Domain::Character, &mut context),
               Ok(Value::from("5-10*10")));
    assert!(context.diagnostics.is_empty());
}

#[test]
fn values_are_substituted_by_domain() {
    let mut context = context();
    let chain = [var("C"), text("-"), var("B"), text("-"), var("A2")];

    assert_eq!(evaluate_chain(&chain, &mut context), "XYZ-0-10");
}

#[test]
fn dot_and_equals_render_as_themselves() {
    let mut context = context();
    let chain = [text("A"), ConcatFragment::Dot, text("B"), ConcatFragment::Equals, var("C")];

    assert_eq!(evaluate_chain(&chain, &mut context), "A.B=XYZ");
    assert_eq!(get_result("'A.B=C'", Domain::Character, &mut context), Ok(Value::from("A.B=C")));
}

#[test]
fn a_period_ends_a_variable_name() {
    let mut context = context();

    assert_eq!(get_result("'&C.D'", Domain::Character, &mut context), Ok(Value::from("XYZD")));
    assert_eq!(get_result("'&C..D'", Domain::Character, &mut context),
               Ok(Value::from("XYZ.D")));
    assert_eq!(get_result("'X&c'", Domain::Character, &mut context), Ok(Value::from("XXYZ")));
    assert!(context.diagnostics.is_empty());
}

#[test]
fn quotes_and_ampersands_in_strings() {
    let mut context = context();

    assert_eq!(get_result("'IT''S'", Domain::Character, &mut context), Ok(Value::from("IT'S")));
    assert_eq!(get_result("'A&&B'", Domain::Character, &mut context), Ok(Value::from("A&&B")));
}

#[test]
fn sublists_concatenate_without_separators() {
    let mut context = context();
    let nested = [text("<"),
                  ConcatFragment::Sublist(vec![vec![text("P"), var("C")], vec![var("A2")], vec![]]),
                  text(">")];
    let flat = [text("<"), text("P"), var("C"), var("A2"), text(">")];

    assert_eq!(evaluate_chain(&nested, &mut context), "<PXYZ10>");
    assert_eq!(evaluate_chain(&nested, &mut context), evaluate_chain(&flat, &mut context));
}

#[test]
fn undefined_variables_contribute_nothing() {
    let mut context = context();
    let chain = [text("A"), var("NOPE"), text("B")];

    assert_eq!(evaluate_chain(&chain, &mut context), "AB");
    let codes: Vec<_> = context.diagnostics.iter().map(Diagnostic::code).collect();
    assert_eq!(codes, ["CE006"]);
}

#[test]
fn concatenation_operator_joins_terms() {
    let mut context = context();

    assert_eq!(get_result("'&C'.'-'.'&A2'", Domain::Character, &mut context),
               Ok(Value::from("XYZ-10")));
    assert_eq!(get_result("&C.'!'", Domain::Character, &mut context), Ok(Value::from("XYZ!")));
    assert!(context.diagnostics.is_empty());
}
