use caexpr::{
    error::Diagnostic,
    get_result,
    interpreter::{
        evaluator::core::{Context, MAX_STRING_LENGTH},
        parser::fragments::read_expression,
        value::core::{Domain, Value},
    },
};
use pretty_assertions::assert_eq;

fn eval_in(source: &str, domain: Domain, context: &mut Context) -> (Value, Vec<&'static str>) {
    let value = get_result(source, domain, context).unwrap_or_else(|e| panic!("cannot read {source:?}: {e}"));
    let codes = context.take_diagnostics().iter().map(Diagnostic::code).collect();
    (value, codes)
}

fn eval(source: &str, domain: Domain) -> (Value, Vec<&'static str>) {
    eval_in(source, domain, &mut Context::new())
}

fn assert_value(source: &str, domain: Domain, expected: impl Into<Value>) {
    let (value, codes) = eval(source, domain);
    assert_eq!(value, expected.into(), "{source:?}");
    assert!(codes.is_empty(), "{source:?} reported {codes:?}");
}

fn assert_reported(source: &str, domain: Domain, expected: impl Into<Value>, code: &str) {
    let (value, codes) = eval(source, domain);
    assert_eq!(value, expected.into(), "{source:?}");
    assert_eq!(codes, [code], "{source:?}");
}

#[test]
fn arithmetic_scenarios() {
    assert_value("3+-4", Domain::Integer, -1);
    assert_value("3+4*2", Domain::Integer, 11);
    assert_value("(10 OR 1+1)", Domain::Integer, 10);
    assert_value("(10 SLL 10 AND 2)", Domain::Integer, 40);
    assert_value("10-4-3", Domain::Integer, 3);
    assert_value("-7/2", Domain::Integer, -3);
    assert_value("(3+4)*2", Domain::Integer, 14);
}

#[test]
fn stacked_signs() {
    let mut context = Context::new();
    context.set_variable("A", 6);
    context.set_variable("B", 4);

    assert_eq!(eval_in("+++&A*---&B", Domain::Integer, &mut context),
               (Value::Integer(-24), vec![]));
}

#[test]
fn division_by_zero_is_zero() {
    assert_value("10/0", Domain::Integer, 0);
    assert_value("0/0", Domain::Integer, 0);
}

#[test]
fn overflow_is_reported() {
    assert_reported("2147483647+1", Domain::Integer, 0, "CE005");
    assert_reported("65536*65536", Domain::Integer, 0, "CE005");
    assert_reported("-2147483647-2", Domain::Integer, 0, "CE005");
    assert_reported("1 SLA 31", Domain::Integer, 0, "CE005");
    assert_value("-1 SLA 31", Domain::Integer, i32::MIN);
}

#[test]
fn shifts() {
    assert_value("1 SLL 31", Domain::Integer, i32::MIN);
    assert_value("1 SLL 32", Domain::Integer, 0);
    assert_value("-16 SRA 2", Domain::Integer, -4);
    assert_value("-1 SRL 28", Domain::Integer, 15);
    assert_value("-1 SRA 40", Domain::Integer, -1);
    // Only the low six bits of the amount count.
    assert_value("1 SLL 65", Domain::Integer, 2);
}

#[test]
fn bitwise_operators() {
    assert_value("12 AND 10", Domain::Integer, 8);
    assert_value("12 OR 10", Domain::Integer, 14);
    assert_value("12 XOR 10", Domain::Integer, 6);
    assert_value("6 AND NOT 4", Domain::Integer, 2);
    assert_value("NOT 0", Domain::Integer, -1);
}

#[test]
fn character_operands_of_arithmetic_operators() {
    assert_value("('ABC' INDEX 'B')", Domain::Integer, 2);
    assert_value("'ABC' INDEX 'X'", Domain::Integer, 0);
    assert_value("'ABC' INDEX ''", Domain::Integer, 0);
    assert_value("'XYZB' FIND 'AB'", Domain::Integer, 4);
    assert_value("1+'ABCABC' INDEX 'CA'", Domain::Integer, 4);
}

#[test]
fn binary_expressions() {
    assert_value("1 EQ 1", Domain::Boolean, true);
    assert_value("1 EQ 1 AND NOT 2 GT 3", Domain::Boolean, true);
    assert_value("NOT (1 EQ 2)", Domain::Boolean, true);
    assert_value("1", Domain::Boolean, true);
    assert_value("0 OR 0", Domain::Boolean, false);
    assert_value("1 XOR 1", Domain::Boolean, false);
    assert_value("'ABC' EQ 'ABC'", Domain::Boolean, true);
    assert_value("'B' GT 'AA'", Domain::Boolean, false);
    assert_value("'AB' LT 'AC'", Domain::Boolean, true);
    assert_value("('ABC' INDEX 'B') EQ 2", Domain::Boolean, true);

    let mut context = Context::new();
    context.set_variable("A", 6);
    assert_eq!(eval_in("&A+1 GE 7 AND &A LT 10", Domain::Boolean, &mut context),
               (Value::Boolean(true), vec![]));
}

#[test]
fn integers_other_than_zero_and_one_are_not_binary() {
    assert_reported("2", Domain::Boolean, false, "CE004");
}

#[test]
fn result_domain_is_checked() {
    assert_reported("'ABC'", Domain::Integer, 0, "CE004");
    assert_reported("5", Domain::Character, "", "CE004");
    assert_reported("'A' EQ 1", Domain::Boolean, false, "CE004");
}

#[test]
fn character_functions() {
    assert_value("'AB'.'CD'", Domain::Character, "ABCD");
    assert_value("UPPER 'abc'", Domain::Character, "ABC");
    assert_value("LOWER 'ABC'", Domain::Character, "abc");
    assert_value("DOUBLE 'A''B'", Domain::Character, "A''B");
    assert_value("SIGNED -5", Domain::Character, "-5");
    assert_value("SIGNED 5", Domain::Character, "5");
    assert_value("BYTE 65", Domain::Character, "A");
    assert_value("UPPER 'ab'.'cd'", Domain::Character, "ABcd");
    assert_reported("BYTE 256", Domain::Character, "", "CE010");
    assert_reported("BYTE -1", Domain::Character, "", "CE010");
}

#[test]
fn substrings() {
    assert_value("'ABCDE'(2,3)", Domain::Character, "BCD");
    assert_value("'ABCDE'(3,*)", Domain::Character, "CDE");
    assert_value("'ABC'(2,5)", Domain::Character, "BC");
    assert_value("'ABC'(4,0)", Domain::Character, "");
    assert_value("'ABCDE'(1+1,2*1)", Domain::Character, "BC");
    assert_reported("'ABC'(5,1)", Domain::Character, "", "CE008");
    assert_reported("'ABC'(0,1)", Domain::Character, "", "CE008");
    assert_reported("'ABC'(1,-1)", Domain::Character, "", "CE008");
}

#[test]
fn duplication() {
    assert_value("(3)'AB'", Domain::Character, "ABABAB");
    assert_value("(0)'AB'", Domain::Character, "");
    assert_value("(2)'ABC'(2,1)", Domain::Character, "BB");
    assert_reported("(-1)'AB'", Domain::Character, "", "CE009");
}

#[test]
fn long_strings_are_truncated() {
    let (value, codes) = eval("(5000)'A'", Domain::Character);
    assert_eq!(value, Value::Text("A".repeat(MAX_STRING_LENGTH)));
    assert_eq!(codes, ["CE011"]);

    let (value, codes) = eval("(3000)'A'.(3000)'B'", Domain::Character);
    assert_eq!(value.as_text().map(str::len), Some(MAX_STRING_LENGTH));
    assert_eq!(codes, ["CE011"]);
}

#[test]
fn variable_symbols() {
    let mut context = Context::new();
    context.set_variable("A", 6);
    context.set_variable("TEXT", "HELLO");
    context.set_variable("FLAG", true);
    context.set_element("ARR", 1, 10);
    context.set_element("ARR", 2, 20);
    context.set_variable("N", 2);
    context.set_variable("V2", 42);

    assert_eq!(eval_in("&A*2", Domain::Integer, &mut context), (Value::Integer(12), vec![]));
    assert_eq!(eval_in("&ARR(2)+&ARR(1)", Domain::Integer, &mut context),
               (Value::Integer(30), vec![]));
    assert_eq!(eval_in("&ARR(&N)", Domain::Integer, &mut context), (Value::Integer(20), vec![]));
    assert_eq!(eval_in("&(V&N)+1", Domain::Integer, &mut context), (Value::Integer(43), vec![]));
    assert_eq!(eval_in("&text", Domain::Character, &mut context), (Value::from("HELLO"), vec![]));
    assert_eq!(eval_in("&FLAG", Domain::Boolean, &mut context), (Value::Boolean(true), vec![]));

    assert_eq!(eval_in("&MISSING+1", Domain::Integer, &mut context),
               (Value::Integer(1), vec!["CE006"]));
    assert_eq!(eval_in("&ARR(3)", Domain::Integer, &mut context), (Value::Integer(0), vec!["CE006"]));
    assert_eq!(eval_in("&TEXT", Domain::Integer, &mut context), (Value::Integer(0), vec!["CE004"]));
}

#[test]
fn ordinary_symbols() {
    use caexpr::interpreter::evaluator::core::OrdinarySymbol;

    let mut context = Context::new();
    context.define_symbol("LEN", OrdinarySymbol::new(80));

    assert_eq!(eval_in("LEN/2", Domain::Integer, &mut context), (Value::Integer(40), vec![]));
    assert_eq!(eval_in("UNKNOWN+1", Domain::Integer, &mut context),
               (Value::Integer(1), vec!["CE007"]));
}

#[test]
fn evaluation_is_repeatable() {
    let mut context = Context::new();
    context.set_variable("A", 5);

    let mut expr = read_expression("&A*&A-1").unwrap();
    expr.resolve(Domain::Integer, &mut context);

    assert_eq!(expr.evaluate(&mut context), Value::Integer(24));
    assert_eq!(expr.evaluate(&mut context), Value::Integer(24));

    context.set_variable("A", 3);
    assert_eq!(expr.evaluate(&mut context), Value::Integer(8));
    assert!(context.diagnostics.is_empty());
}

#[test]
fn reading_errors() {
    use caexpr::error::ParseError;

    let mut context = Context::new();
    let read = |source: &str, context: &mut Context| get_result(source, Domain::Integer, context);

    assert_eq!(read("3 ?", &mut context),
               Err(ParseError::InvalidInput { text:   "?".to_string(),
                                              column: 3, }));
    assert_eq!(read("(1", &mut context), Err(ParseError::ExpectedClosingParen { column: 3 }));
    assert!(matches!(read("1)", &mut context),
                     Err(ParseError::UnexpectedToken { column: 2, .. })));
    assert_eq!(read("2147483648", &mut context),
               Err(ParseError::LiteralTooLarge { column: 1 }));
    assert!(context.diagnostics.is_empty());
}
