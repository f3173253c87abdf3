use caexpr::{
    ast::{Attribute, AttributeSubject, Expr, Identifier, Range},
    interpreter::{
        evaluator::core::{Context, DependencySolver, OrdinarySymbol},
        parser::fragments::read_expression,
        value::{
            core::{Domain, Value},
            undefined::UndefinedSymbols,
        },
    },
};
use pretty_assertions::assert_eq;

fn undefined(source: &str, solver: &dyn DependencySolver) -> Vec<String> {
    read_expression(source).unwrap_or_else(|e| panic!("{source:?}: {e}"))
                           .undefined_attributed_symbols(solver)
                           .iter()
                           .map(ToString::to_string)
                           .collect()
}

#[test]
fn attribute_of_undefined_symbol_becomes_defined() {
    let expr = Expr::attribute(AttributeSubject::Symbol(Identifier::from("SYM")),
                               Attribute::Length,
                               Range::columns(0, 5));
    let mut context = Context::new();

    let before = expr.undefined_attributed_symbols(&context);
    assert_eq!(before, UndefinedSymbols::from_iter([Identifier::from("SYM")]));

    context.define_symbol("SYM", OrdinarySymbol::new(0));
    assert!(expr.clone().undefined_attributed_symbols(&context).is_empty());
}

#[test]
fn every_ordinary_symbol_attribute_counts() {
    let context = Context::new();

    assert_eq!(undefined("L'A+S'B+I'C+D'D", &context), ["A", "B", "C", "D"]);
    assert_eq!(undefined("T'X EQ 'F'", &context), ["X"]);
    assert_eq!(undefined("O'OP EQ 'U'", &context), ["OP"]);
    assert!(undefined("K'&V+N'&W+PLAIN", &context).is_empty());
}

#[test]
fn defined_attribute_waits_for_the_symbol() {
    let mut expr = Expr::attribute(AttributeSubject::Symbol(Identifier::from("X")),
                                   Attribute::Defined,
                                   Range::columns(0, 3));
    let mut context = Context::new();
    expr.resolve(Domain::Integer, &mut context);

    assert_eq!(expr.undefined_attributed_symbols(&context).to_string(), "{X}");
    assert_eq!(expr.evaluate_as(Domain::Integer, &mut context), Value::Integer(0));

    context.define_symbol("X", OrdinarySymbol::new(4));
    assert!(expr.undefined_attributed_symbols(&context).is_empty());
    assert_eq!(expr.evaluate_as(Domain::Integer, &mut context), Value::Integer(1));
}

#[test]
fn defined_symbols_are_left_out() {
    let mut context = Context::new();
    context.define_symbol("A", OrdinarySymbol::new(1));

    assert_eq!(undefined("L'A+L'B+L'B", &context), ["B"]);
}

#[test]
fn nested_pieces_are_searched() {
    let context = Context::new();

    assert_eq!(undefined("&ARR(L'SUB)", &context), ["SUB"]);
    assert_eq!(undefined("&(V&I(L'INNER))", &context), ["INNER"]);
    assert_eq!(undefined("(L'DUP)'AB'", &context), ["DUP"]);
    assert_eq!(undefined("'ABC'(L'FROM,S'COUNT)", &context), ["COUNT", "FROM"]);
    assert_eq!(undefined("(1+(L'DEEP))", &context), ["DEEP"]);
}

#[test]
fn resolved_and_unresolved_trees_agree() {
    let context = Context::new();
    let source = "L'A*2+(L'B-&ARR(I'C))";

    let unresolved = read_expression(source).unwrap();
    let mut resolved = unresolved.clone();
    let mut diagnostics = Vec::new();
    resolved.resolve(Domain::Integer, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(unresolved.undefined_attributed_symbols(&context),
               resolved.undefined_attributed_symbols(&context));
    assert_eq!(resolved.undefined_attributed_symbols(&context).to_string(), "{A, B, C}");
}
