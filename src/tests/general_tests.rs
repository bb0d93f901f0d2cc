use test_case::test_case;

use crate::{Environment, EvalError, Program, RuleValue};

#[test_case("1 + 2", 3.into(); "addition")]
#[test_case("7 - 10", (-3).into(); "subtraction")]
#[test_case("6 * 7", 42.into(); "multiplication")]
#[test_case("7 / 2", 3.into(); "integer division")]
#[test_case("7.0 / 2", 3.5.into(); "float division")]
#[test_case("7 % 2", 1.into(); "modulo")]
#[test_case("2 + 3 * 4", 14.into(); "precedence")]
#[test_case("(2 + 3) * 4", 20.into(); "grouping")]
#[test_case("-5 + 3", (-2).into(); "unary minus")]
#[test_case("- -5", 5.into(); "double negation")]
#[test_case("1 + 2.5", 3.5.into(); "int float promotion")]
#[test_case("true + 1", 2.into(); "bool int promotion")]
#[test_case("'foo' + 'bar'", "foobar".into(); "string concat")]
#[test_case("1 < 2", true.into(); "less than")]
#[test_case("2 <= 2", true.into(); "less equal")]
#[test_case("3 == 3.0", true.into(); "numeric equality across types")]
#[test_case("'a' != 'b'", true.into(); "string inequality")]
#[test_case("'abc' < 'abd'", true.into(); "string ordering")]
#[test_case("true && false", false.into(); "and")]
#[test_case("true || false", true.into(); "or")]
#[test_case("!false", true.into(); "not")]
#[test_case("1 && 'x'", true.into(); "truthiness in and")]
#[test_case("0 || 2", true.into(); "truthiness in or")]
#[test_case("true ? 1 : 2", 1.into(); "conditional true")]
#[test_case("false ? 1 : 2", 2.into(); "conditional false")]
#[test_case("false ? 1 : true ? 2 : 3", 2.into(); "nested conditional")]
#[test_case("2 in [1, 2, 3]", true.into(); "int in list")]
#[test_case("'x' in ['a', 'b']", false.into(); "missing from list")]
#[test_case("'a' in {'a': 1}", true.into(); "key in map")]
#[test_case("'ell' in 'hello'", true.into(); "substring in string")]
#[test_case("[1, 2, 3][1]", 2.into(); "list index")]
#[test_case("[1, 2, 3][-1]", 3.into(); "negative list index")]
#[test_case("{'a': 1}['a']", 1.into(); "map index")]
#[test_case("{'a': 1, 'a': 2}['a']", 2.into(); "repeated map key keeps later entry")]
#[test_case("'abc'[0]", "a".into(); "string index")]
#[test_case("'abc'[-1]", "c".into(); "negative string index")]
#[test_case("len('héllo')", 5.into(); "len counts characters")]
#[test_case("upper('ok') == 'OK'", true.into(); "upper")]
#[test_case("lower('OK')", "ok".into(); "lower")]
#[test_case("substring('hello', 1, 3)", "el".into(); "substring")]
#[test_case("int('42')", 42.into(); "int from string")]
#[test_case("float(3)", 3.0.into(); "float from int")]
#[test_case("str(42)", "42".into(); "str from int")]
#[test_case("bool([])", false.into(); "empty list is falsy")]
#[test_case("isinstance('x', str)", true.into(); "isinstance str")]
#[test_case("isinstance(to_date('2024-01-01', '%Y-%m-%d'), timestamp)", true.into(); "isinstance timestamp")]
#[test_case("to_date('2024-01-02', '%Y-%m-%d') - to_date('2024-01-01', '%Y-%m-%d') == duration('1d')", true.into(); "timestamp difference")]
#[test_case("null == null", true.into(); "null equality")]
fn test_eval(rule: &str, expected: RuleValue) {
    let env = Environment::new();

    assert_eq!(env.eval_rule(rule).unwrap(), expected, "rule: {}", rule);
}

#[test_case("1 / 0"; "int division by zero")]
#[test_case("1 % 0"; "modulo by zero")]
#[test_case("1 + 'x'"; "invalid operand types")]
#[test_case("-'x'"; "negate string")]
#[test_case("'a' < 1"; "ordering across types")]
#[test_case("1 in 2"; "in on int")]
#[test_case("[1][5]"; "index out of bounds")]
#[test_case("'abc'[5]"; "string index out of bounds")]
#[test_case("'abc'['a']"; "string index must be int")]
#[test_case("{'a': 1}['b']"; "missing map key")]
#[test_case("missing"; "unbound identifier")]
#[test_case("missing(1)"; "unbound function")]
#[test_case("len"; "function name is not a value")]
#[test_case("int('3.5')"; "non integral string to int")]
fn test_eval_err(rule: &str) {
    let env = Environment::new();

    assert!(env.eval_rule(rule).is_err(), "rule: {}", rule);
}

#[test_case("for x in range(10)"; "for loop")]
#[test_case("while true"; "while loop")]
#[test_case("x = 1"; "assignment")]
#[test_case("import os"; "import")]
#[test_case("lambda x: x"; "lambda")]
#[test_case("().__class__"; "attribute probe")]
fn test_statement_forms_rejected(rule: &str) {
    let env = Environment::new();

    assert!(env.eval_rule(rule).is_err(), "rule: {}", rule);
}

#[test]
fn test_short_circuit_skips_errors() {
    let env = Environment::new();

    // the right side would fail on its own
    assert_eq!(
        env.eval_rule("false && missing").unwrap(),
        RuleValue::from_bool(false)
    );
    assert_eq!(
        env.eval_rule("true || 1 / 0").unwrap(),
        RuleValue::from_bool(true)
    );
}

#[test]
fn test_conditional_only_runs_taken_branch() {
    let env = Environment::new();

    assert_eq!(
        env.eval_rule("true ? 'ok' : 1 / 0").unwrap(),
        RuleValue::from_str("ok")
    );
}

#[test]
fn test_compiled_program_reuse() {
    let prog = Program::from_source("threshold < value").unwrap();

    let mut env = Environment::new();
    env.bind_param("threshold", 10.into());
    env.bind_param("value", 20.into());
    assert_eq!(env.run_program(&prog).unwrap(), RuleValue::from_bool(true));

    env.bind_param("value", 5.into());
    assert_eq!(env.run_program(&prog).unwrap(), RuleValue::from_bool(false));
}

#[test]
fn test_invalid_result_error_message() {
    let env = Environment::new();

    match env.eval_rule("[1, 2]") {
        Err(err @ EvalError::InvalidResult) => {
            assert_eq!(err.to_string(), "La regla no devolvió un resultado válido.")
        }
        other => panic!("expected invalid result error, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_carries_location() {
    let env = Environment::new();

    match env.eval_rule("1 +") {
        Err(EvalError::Syntax(err)) => {
            assert!(err.to_string().starts_with("Syntax error at"))
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}
