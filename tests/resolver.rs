use caexpr::{
    ast::{BinaryOperator, Expr, ListState, Range},
    error::{Diagnostic, DiagnosticKind},
    interpreter::{
        evaluator::core::Context,
        parser::{
            fragments::read_expression,
            policy::{OperatorEntry, Policy},
        },
        value::core::{Domain, Value},
    },
};
use pretty_assertions::assert_eq;

fn resolve(source: &str, domain: Domain) -> (Expr, Vec<Diagnostic>) {
    let mut expr = read_expression(source).unwrap_or_else(|e| panic!("cannot read {source:?}: {e}"));
    let mut diagnostics = Vec::new();
    expr.resolve(domain, &mut diagnostics);
    (expr, diagnostics)
}

fn tree(source: &str, domain: Domain) -> String {
    let (expr, diagnostics) = resolve(source, domain);
    assert!(diagnostics.is_empty(), "{source:?}: {diagnostics:?}");
    expr.to_string()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(Diagnostic::code).collect()
}

#[test]
fn tighter_operators_bind_first() {
    assert_eq!(tree("3+4*2", Domain::Integer), "(3 + (4 * 2))");
    assert_eq!(tree("3*4+2", Domain::Integer), "((3 * 4) + 2)");
    assert_eq!(tree("10 SLL 10 AND 2", Domain::Integer), "(10 SLL (10 AND 2))");
    assert_eq!(tree("10 OR 1+1", Domain::Integer), "(10 OR (1 + 1))");
    assert_eq!(tree("1 OR 2 XOR 3 AND 4", Domain::Integer),
               "((1 OR 2) XOR (3 AND 4))");
}

#[test]
fn equal_priorities_associate_left() {
    assert_eq!(tree("10-4-3", Domain::Integer), "((10 - 4) - 3)");
    assert_eq!(tree("64/4/2", Domain::Integer), "((64 / 4) / 2)");
    assert_eq!(tree("1+2-3+4", Domain::Integer), "(((1 + 2) - 3) + 4)");
}

#[test]
fn unary_operators_nest() {
    assert_eq!(tree("3+-4", Domain::Integer), "(3 + (- 4))");
    assert_eq!(tree("- - - 5", Domain::Integer), "(- (- (- 5)))");
    assert_eq!(tree("+++&A*---&B", Domain::Integer),
               "((+ (+ (+ &A))) * (- (- (- &B))))");
    assert_eq!(tree("-4*2", Domain::Integer), "((- 4) * 2)");
    assert_eq!(tree("NOT 1 EQ 2", Domain::Boolean), "(NOT (1 EQ 2))");
}

#[test]
fn parenthesized_lists_resolve_in_place() {
    assert_eq!(tree("(3+4)*2", Domain::Integer), "((3 + 4) * 2)");
    assert_eq!(tree("((1))", Domain::Integer), "1");
}

#[test]
fn two_token_operators_merge() {
    assert_eq!(tree("1 EQ 1 AND NOT 2 GT 3", Domain::Boolean),
               "((1 EQ 1) AND NOT (2 GT 3))");
    assert_eq!(tree("6 AND NOT 4", Domain::Integer), "(6 AND NOT 4)");
}

#[test]
fn merged_operator_priority_governs_shape() {
    use caexpr::{ast::BinaryOperator as B, interpreter::value::core::Domain::Boolean as BOOL};

    // `AND NOT` binds tighter than `OR` here, `AND` looser.
    let operators = [OperatorEntry::binary("OR", 5, B::Or, BOOL, BOOL),
                     OperatorEntry::binary("AND", 7, B::And, BOOL, BOOL).with_not_form(),
                     OperatorEntry::binary("AND NOT", 3, B::AndNot, BOOL, BOOL)];
    let policy = Policy::new(Domain::Boolean, &operators);

    let mut context = Context::new();
    let mut merged = read_expression("1 OR 0 AND NOT 1").unwrap();
    merged.resolve_with(&policy, &mut context);
    assert_eq!(merged.to_string(), "(1 OR (0 AND NOT 1))");
    assert_eq!(merged.evaluate(&mut context), Value::Boolean(true));

    let mut plain = read_expression("1 OR 0 AND 1").unwrap();
    plain.resolve_with(&policy, &mut context);
    assert_eq!(plain.to_string(), "((1 OR 0) AND 1)");
    assert_eq!(plain.evaluate(&mut context), Value::Boolean(true));

    assert!(context.diagnostics.is_empty());
}

#[test]
fn comparison_operands_follow_their_kind() {
    let operand_domain = |source: &str| {
        let (expr, diagnostics) = resolve(source, Domain::Boolean);
        assert!(diagnostics.is_empty(), "{source:?}: {diagnostics:?}");
        match expr.root() {
            Expr::Binary { op, operand_domain, .. } => {
                assert!(op.is_relational());
                *operand_domain
            },
            other => panic!("expected a comparison, found {other}"),
        }
    };

    assert_eq!(operand_domain("'AB' EQ 'AB'"), Domain::Character);
    assert_eq!(operand_domain("&X EQ 'AB'"), Domain::Character);
    assert_eq!(operand_domain("(UPPER 'a') EQ 'A'"), Domain::Character);
    assert_eq!(operand_domain("T'SYM EQ 'F'"), Domain::Character);
    assert_eq!(operand_domain("('ABC' INDEX 'B') EQ 2"), Domain::Integer);
    assert_eq!(operand_domain("&X+1 LT 3"), Domain::Integer);
}

#[test]
fn arithmetic_under_a_comparison_stays_arithmetic() {
    let (expr, _) = resolve("&A+1 EQ 3", Domain::Boolean);

    let Expr::Binary { left, domain, .. } = expr.root() else {
        panic!("expected a comparison");
    };
    assert_eq!(*domain, Domain::Boolean);
    assert!(matches!(left.as_ref(),
                     Expr::Binary { op: BinaryOperator::Add,
                                    domain: Domain::Integer,
                                    .. }));
}

#[test]
fn empty_list_reports_missing_operand() {
    let (expr, diagnostics) = resolve("", Domain::Integer);

    assert_eq!(codes(&diagnostics), ["CE003"]);
    assert!(matches!(expr,
                     Expr::List { state: ListState::Resolved { recovered: true, .. },
                                  .. }));
    assert_eq!(expr.to_string(), "0");
}

#[test]
fn dangling_operator_is_anchored_past_the_last_fragment() {
    let (expr, diagnostics) = resolve("3+", Domain::Integer);

    assert_eq!(diagnostics,
               [Diagnostic::new(DiagnosticKind::MissingOperand, Range::columns(2, 3))]);
    assert_eq!(diagnostics[0].to_string(), "CE003 at 1:3-1:4: operand expected");
    assert_eq!(expr.to_string(), "0");
}

#[test]
fn unknown_operator_is_reported_once_against_the_whole_list() {
    let (_, diagnostics) = resolve("3 4", Domain::Integer);
    assert_eq!(diagnostics,
               [Diagnostic::new(DiagnosticKind::InvalidOperator, Range::columns(0, 3))]);

    let (_, diagnostics) = resolve("1 AND 2 FOO", Domain::Integer);
    assert_eq!(diagnostics,
               [Diagnostic::new(DiagnosticKind::InvalidOperator, Range::columns(0, 11))]);

    let (_, diagnostics) = resolve("1 FOO 2 BAR 3", Domain::Integer);
    assert_eq!(codes(&diagnostics), ["CE001"]);

    // `.` is a character operator, not an arithmetic one.
    let (_, diagnostics) = resolve("1 . 2", Domain::Integer);
    assert_eq!(codes(&diagnostics), ["CE001"]);
}

#[test]
fn nested_failure_only_replaces_the_nested_list() {
    let mut context = Context::new();
    let mut expr = read_expression("1+(2 3)").unwrap();
    expr.resolve(Domain::Integer, &mut context);

    assert_eq!(expr.to_string(), "(1 + 0)");
    assert_eq!(expr.evaluate(&mut context), Value::Integer(1));
    assert_eq!(codes(&context.diagnostics), ["CE001"]);
}

#[test]
fn recovered_list_evaluates_to_the_default_without_new_diagnostics() {
    for (domain, default) in [(Domain::Integer, Value::Integer(0)),
                              (Domain::Boolean, Value::Boolean(false)),
                              (Domain::Character, Value::from(""))]
    {
        let mut context = Context::new();
        let mut expr = read_expression("1 2").unwrap();
        expr.resolve(domain, &mut context);

        assert_eq!(expr.evaluate(&mut context), default);
        assert_eq!(codes(&context.diagnostics), ["CE001"], "{domain}");
    }
}

#[test]
fn resolving_twice_changes_nothing() {
    let (mut good, _) = resolve("3+4*2", Domain::Integer);
    let before = good.clone();
    let mut diagnostics = Vec::new();
    good.resolve(Domain::Integer, &mut diagnostics);
    assert_eq!(good, before);

    let (mut bad, first) = resolve("3+", Domain::Integer);
    bad.resolve(Domain::Integer, &mut diagnostics);
    assert_eq!(first.len(), 1);
    assert!(diagnostics.is_empty());
}

#[test]
fn unresolved_lists_evaluate_to_zero() {
    let mut context = Context::new();
    let expr = read_expression("1+2").unwrap();

    assert!(!expr.is_resolved());
    assert_eq!(expr.evaluate(&mut context), Value::Integer(0));
    assert_eq!(codes(&context.diagnostics), ["CE012"]);
}

#[test]
fn lists_evaluate_in_the_domain_they_were_resolved_to() {
    let mut context = Context::new();

    let mut sum = read_expression("1+2").unwrap();
    sum.resolve(Domain::Boolean, &mut context);
    assert_eq!(sum.domain(), Some(Domain::Boolean));
    assert_eq!(sum.evaluate(&mut context), Value::Boolean(false));
    assert_eq!(codes(&context.diagnostics), ["CE004"]);

    let mut flag = read_expression("2-1").unwrap();
    flag.resolve(Domain::Boolean, &mut context);
    assert_eq!(flag.evaluate(&mut context), Value::Boolean(true));

    let mut text = read_expression("'AB'").unwrap();
    text.resolve(Domain::Integer, &mut context);
    assert_eq!(text.evaluate(&mut context), Value::Integer(0));
    assert_eq!(codes(&context.diagnostics), ["CE004", "CE004"]);
}
