//! Rule-based rewriting and simplification through the public API.

use mathex_compute::{
    numerical::error::kind,
    primitive::float,
    simplify,
    simplify_with_steps,
    ErrorCategory,
    Evaluator,
    Expr,
    RewriteRule,
    Rewriter,
    Substitutions,
};
use mathex_parser::parse;
use pretty_assertions::assert_eq;

fn expr(source: &str) -> Expr {
    parse(source).unwrap()
}

#[test]
fn structurally_equal_operands() {
    let evaluator = Evaluator::default();
    let rules = [
        RewriteRule::parse("__exp - __exp", None, "0").unwrap(),
        RewriteRule::parse("__exp1 - __exp2", Some("same(__exp1, __exp2)"), "0").unwrap(),
    ];

    for rule in &rules {
        let rewriter = Rewriter::new(&evaluator, vec![rule]);
        assert_eq!(rewriter.rewrite(&expr("x*2 - x*2")).unwrap(), expr("0"));
        assert_eq!(rewriter.rewrite(&expr("x - y")).unwrap(), expr("x - y"));
        assert_eq!(rewriter.rewrite(&expr("x*2 - 2*x")).unwrap(), expr("x*2 - 2*x"));
    }
}

#[test]
fn simplify_reaches_a_fixpoint() {
    let sources = [
        "x",
        "42",
        "x + 0 - (y * 1)",
        "2 * 3 + x * 1 + 0",
        "(a + b) * (a + b)",
        "sqrt(x^2) + sqrt(4)",
        "exp(x) * exp(2) * 1",
        "-(-(x + x))",
        "nthroot(x^4, 4) / 1",
        "sin(pi / 2) * y + 0 * z",
        "dtor(rtod(a - a))",
        "max(x, 1 + 1, 3!) ^ 1",
        "random() + random()",
        "f(0 + x, g(1 * y))",
    ];

    for source in sources {
        let once = simplify(&expr(source)).unwrap();
        let twice = simplify(&once).unwrap();
        assert_eq!(twice, once, "simplifying `{}` gave `{}`, then `{}`", source, once, twice);
    }
}

#[test]
fn simplify_examples() {
    let simplified = |source: &str| simplify(&expr(source)).unwrap().to_string();

    assert_eq!(simplified("2 * 3 + x * 1 + 0"), "6 + x");
    assert_eq!(simplified("(a + b) * (a + b)"), "(a + b) ^ 2");
    assert_eq!(simplified("-(-(x + x))"), "x * 2");
    assert_eq!(simplified("sin(pi / 2) * y + 0 * z"), "sin(pi / 2) * y");
    assert_eq!(simplified("f(0 + x, g(1 * y))"), "f(x, g(y))");

    // impure functions are never replaced by their value
    assert_eq!(simplified("random(1 + 1) * 1"), "random(2)");
}

#[test]
fn simplify_steps() {
    let mut steps = Vec::new();
    let result = simplify_with_steps(&expr("0 + x * 1"), &mut steps).unwrap();
    assert_eq!(result, expr("x"));

    let rules = steps.iter().map(|step| step.rule.as_str()).collect::<Vec<_>>();
    assert_eq!(rules, vec!["__exp1 * 1 => __exp1", "0 + __exp1 => __exp1"]);
    assert_eq!(steps[1].before, expr("0 + x"));
    assert_eq!(steps[1].after, expr("x"));
}

#[test]
fn evaluator_rules_run_before_evaluation() {
    let mut evaluator = Evaluator::default();
    let none = Substitutions::new();

    // `undefined` is never evaluated once the rule removes it
    assert!(evaluator.evaluate_str("undefined * 0", &none).is_err());
    evaluator.add_rule_str("__exp1 * 0", None, "0").unwrap();
    assert_eq!(evaluator.evaluate_str("undefined * 0", &none).unwrap(), 0);
    assert_eq!(evaluator.rules().len(), 1);

    evaluator.add_rule(RewriteRule::parse("half(__exp1)", None, "__exp1 / 2").unwrap());
    assert_eq!(evaluator.evaluate_str("half(9)", &none).unwrap(), 4.5);
}

#[test]
fn predicates_see_substitutions() {
    let mut evaluator = Evaluator::default();
    evaluator.add_rule_str("__exp1 / __exp1", Some("__exp1 != 0"), "1").unwrap();
    evaluator.add_rule_str("choose(__exp1, __exp2)", Some("__exp1 > __exp2"), "__exp1").unwrap();
    evaluator.add_rule_str("choose(__exp1, __exp2)", Some("__exp1 <= __exp2"), "__exp2").unwrap();

    let mut values = Substitutions::new();
    values.insert("a".to_string(), float(3));
    values.insert("b".to_string(), float(8));
    assert_eq!(evaluator.evaluate_str("choose(a, b) + a / a", &values).unwrap(), 9);

    values.insert("a".to_string(), float(0));
    let err = evaluator.evaluate_str("a / a", &values).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Domain);
}

#[test]
fn rules_use_the_evaluator_catalog() {
    let mut evaluator = Evaluator::default();
    evaluator.catalog_mut().add_tokens(["plus"], "add").unwrap();
    evaluator.add_rule_str("__exp1 plus __exp1", None, "2 * __exp1").unwrap();

    let rule = &evaluator.rules()[0];
    assert_eq!(rule.to_string(), "__exp1 + __exp1 => 2 * __exp1");

    let mut values = Substitutions::new();
    values.insert("x".to_string(), float(5));
    assert_eq!(evaluator.evaluate_str("x plus x", &values).unwrap(), 10);
}

#[test]
fn runaway_rules() {
    let mut evaluator = Evaluator::default();
    evaluator.config_mut().max_rewrite_iterations = 10;
    evaluator.add_rule_str("__var1", None, "__var1 + 0").unwrap();

    let err = evaluator.evaluate_str("x", &Substitutions::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NonTerminatingRewrite);
    assert_eq!(err.kind::<kind::NonTerminatingRewrite>().unwrap().iterations, 10);
}

#[test]
fn malformed_rules() {
    let mut evaluator = Evaluator::default();
    assert!(evaluator.add_rule_str("__exp1 +", None, "1").is_err());
    assert!(evaluator.add_rule_str("__num1", None, "__num2").is_err());
    assert!(evaluator.add_rule_str("__func1(x)", None, "0").is_err());
    assert!(evaluator.rules().is_empty());
}
