use std::process::ExitCode;

use caexpr::{
    ast::Identifier,
    interpreter::{
        evaluator::core::{Context, OrdinarySymbol},
        parser::fragments::read_expression,
        value::core::{Domain, Value},
    },
};
use clap::Parser;

/// caexpr resolves and evaluates conditional-assembly expressions such as
/// `(&N+1)*L'FIELD` or `'&PREFIX.X'(2,*)`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Domain the expression is resolved to: `a` (SETA), `b` (SETB) or `c`
    /// (SETC).
    #[arg(short, long, default_value = "a")]
    domain: Domain,

    /// Assigns a variable symbol, `NAME=VALUE` or `NAME(INDEX)=VALUE`.
    /// Quoted values are character values, everything else is arithmetic.
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<Assignment>,

    /// Defines an ordinary symbol, `NAME=VALUE[,TYPE[,LENGTH]]`.
    #[arg(long = "symbol",
          value_name = "NAME=VALUE[,TYPE[,LENGTH]]",
          value_parser = parse_definition)]
    symbols: Vec<SymbolDefinition>,

    /// Prints the resolved tree.
    #[arg(short, long)]
    tree: bool,

    /// Prints the ordinary symbols whose attributes are still undefined.
    #[arg(long)]
    dependencies: bool,

    /// Increases logging; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only logs errors.
    #[arg(short, long)]
    quiet: bool,

    expression: String,
}

fn main() -> ExitCode {
    let Args { domain,
               set,
               symbols,
               tree,
               dependencies,
               verbose,
               quiet,
               expression, } = Args::parse();
    setup_logging(verbose, quiet);

    let mut context = Context::new();
    load_symbols(set, symbols, &mut context);

    let mut expr = match read_expression(&expression) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    if dependencies {
        println!("undefined: {}", expr.undefined_attributed_symbols(&context));
    }

    expr.resolve(domain, &mut context);
    if tree {
        println!("{expr}");
    }

    let value = expr.evaluate_as(domain, &mut context);
    println!("{value}");

    let diagnostics = context.take_diagnostics();
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let formatter = tracing_subscriber::fmt::layer().with_target(false)
                                                    .with_writer(std::io::stderr)
                                                    .with_level(true);

    tracing_subscriber::registry().with(formatter)
                                  .with(filter)
                                  .init();
}

/// A `--set` argument: a variable, an optional subscript and the value.
#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    name:  String,
    index: Option<i32>,
    value: Value,
}

/// A `--symbol` argument.
#[derive(Debug, Clone, PartialEq)]
struct SymbolDefinition {
    name:   Identifier,
    symbol: OrdinarySymbol,
}

fn load_symbols(assignments: Vec<Assignment>, definitions: Vec<SymbolDefinition>, context: &mut Context) {
    for Assignment { name, index, value } in assignments {
        match index {
            Some(index) => context.set_element(name, index, value),
            None => context.set_variable(name, value),
        }
    }
    for SymbolDefinition { name, symbol } in definitions {
        context.define_symbol(name, symbol);
    }
}

/// Parses `NAME=VALUE` or `NAME(INDEX)=VALUE`.
fn parse_assignment(assignment: &str) -> Result<Assignment, String> {
    let (target, value) = assignment.split_once('=')
                                    .ok_or_else(|| format!("expected NAME=VALUE, found '{assignment}'"))?;
    let value = parse_value(value);
    let target = target.trim().trim_start_matches('&').to_ascii_uppercase();

    match target.split_once('(') {
        Some((name, index)) => {
            let index = index.trim_end_matches(')')
                             .parse::<i32>()
                             .map_err(|_| format!("invalid subscript in '{assignment}'"))?;
            Ok(Assignment { name: name.to_string(),
                            index: Some(index),
                            value })
        },
        None => Ok(Assignment { name: target,
                                index: None,
                                value }),
    }
}

fn parse_value(text: &str) -> Value {
    let text = text.trim();
    if let Some(quoted) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        return Value::from(quoted.replace("''", "'"));
    }
    text.parse::<i32>().map_or_else(|_| Value::from(text), Value::Integer)
}

/// Parses `NAME=VALUE[,TYPE[,LENGTH]]`.
fn parse_definition(definition: &str) -> Result<SymbolDefinition, String> {
    let invalid = || format!("expected NAME=VALUE[,TYPE[,LENGTH]], found '{definition}'");

    let (name, rest) = definition.split_once('=').ok_or_else(invalid)?;
    let mut parts = rest.split(',').map(str::trim);

    let value = parts.next()
                     .and_then(|v| v.parse::<i32>().ok())
                     .ok_or_else(invalid)?;
    let mut symbol = OrdinarySymbol::new(value);

    if let Some(kind) = parts.next() {
        let kind = kind.chars().next().ok_or_else(invalid)?;
        symbol = symbol.with_type(kind.to_ascii_uppercase());
    }
    if let Some(length) = parts.next() {
        symbol = symbol.with_length(length.parse().map_err(|_| invalid())?);
    }

    Ok(SymbolDefinition { name: Identifier::new(name.trim().to_ascii_uppercase()),
                          symbol })
}

#[cfg(test)]
mod tests {
    use caexpr::interpreter::evaluator::core::EvaluationContext;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn assignments_parse_into_typed_values() {
        assert_eq!(parse_assignment("&n=-3"),
                   Ok(Assignment { name:  "N".to_string(),
                                   index: None,
                                   value: Value::Integer(-3), }));
        assert_eq!(parse_assignment("ARR(2)='IT''S'"),
                   Ok(Assignment { name:  "ARR".to_string(),
                                   index: Some(2),
                                   value: Value::from("IT'S"), }));
        assert_eq!(parse_assignment("P=ABC").map(|a| a.value), Ok(Value::from("ABC")));
        assert!(parse_assignment("NOVALUE").is_err());
        assert!(parse_assignment("ARR(X)=1").is_err());
    }

    #[test]
    fn definitions_parse_type_and_length() {
        assert_eq!(parse_definition("field=100,f,8"),
                   Ok(SymbolDefinition { name:   Identifier::new("FIELD"),
                                         symbol: OrdinarySymbol::new(100).with_type('F')
                                                                         .with_length(8), }));
        assert!(parse_definition("FIELD=abc").is_err());
        assert!(parse_definition("FIELD=1,F,long").is_err());
    }

    #[test]
    fn malformed_arguments_are_rejected_by_clap() {
        let error = Args::try_parse_from(["caexpr", "--set", "NOVALUE", "1"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);

        let args = Args::try_parse_from(["caexpr", "-s", "A=6", "--symbol", "F=1,C,2", "&A+L'F"]).unwrap();
        let mut context = Context::new();
        load_symbols(args.set, args.symbols, &mut context);
        assert_eq!(context.symbol_value(&Identifier::new("F")), Some(1));
        assert_eq!(context.variable_value(&Identifier::new("A"), &[]), Some(Value::Integer(6)));
    }
}
