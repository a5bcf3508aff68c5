//! Pattern-based rewriting of expression trees.
//!
//! A [`RewriteRule`] replaces subtrees that match its pattern with its replacement, optionally
//! only when a predicate holds. A [`Rewriter`] applies a list of rules to every node of an
//! expression, bottom-up, until none of them applies anymore.
//!
//! ```
//! use mathex_compute::{Evaluator, RewriteRule, Rewriter};
//! use mathex_parser::parse;
//!
//! let rule = RewriteRule::parse("__exp1 - __exp2", Some("same(__exp1, __exp2)"), "0").unwrap();
//! let evaluator = Evaluator::default();
//! let rewriter = Rewriter::new(&evaluator, vec![&rule]);
//!
//! let rewritten = rewriter.rewrite(&parse("x * 2 - x * 2").unwrap()).unwrap();
//! assert_eq!(rewritten.to_string(), "0");
//! ```

use mathex_error::Error;
use mathex_parser::{Expr, Parser};
use once_cell::sync::Lazy;
use std::fmt;
use tracing::{debug, trace, warn};
use crate::numerical::{
    error::kind::{NonTerminatingRewrite, UnboundPlaceholder},
    eval::{Evaluator, Substitutions},
};
use crate::primitive::is_truthy;
use super::{step::Step, step_collector::StepCollector, template::Template};

/// Substitutions used when the caller does not provide any.
static NO_SUBSTITUTIONS: Lazy<Substitutions> = Lazy::new(Substitutions::new);

/// A rule that replaces expressions matching a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRule {
    pattern: Template,
    predicate: Option<Template>,
    replacement: Template,

    /// The rule written as source, such as `__exp1 + 0 => __exp1`.
    source: String,
}

impl RewriteRule {
    /// Creates a rule from already parsed expressions.
    ///
    /// Fails if a placeholder is written with arguments, or if the predicate or the replacement
    /// use a placeholder that the pattern does not bind.
    pub fn new(pattern: &Expr, predicate: Option<&Expr>, replacement: &Expr) -> Result<Self, Error> {
        let source = match predicate {
            Some(predicate) => format!("{} => {} if {}", pattern, replacement, predicate),
            None => format!("{} => {}", pattern, replacement),
        };
        let pattern = Template::from_expr(pattern)?;
        let predicate = predicate.map(Template::from_expr).transpose()?;
        let replacement = Template::from_expr(replacement)?;

        let bound = pattern.placeholders();
        for template in predicate.iter().chain([&replacement]) {
            if let Some(name) = template.placeholders().difference(&bound).next() {
                return Err(Error::without_spans(UnboundPlaceholder { name: name.to_string() }));
            }
        }

        Ok(Self { pattern, predicate, replacement, source })
    }

    /// Parses a rule with the default operator catalog and parser configuration.
    pub fn parse(pattern: &str, predicate: Option<&str>, replacement: &str) -> Result<Self, Error> {
        Self::parse_with(&Parser::default(), pattern, predicate, replacement)
    }

    /// Parses a rule with the given parser.
    pub fn parse_with(
        parser: &Parser<'_>,
        pattern: &str,
        predicate: Option<&str>,
        replacement: &str,
    ) -> Result<Self, Error> {
        let pattern = parser.parse(pattern)?;
        let predicate = predicate.map(|source| parser.parse(source)).transpose()?;
        let replacement = parser.parse(replacement)?;
        Self::new(&pattern, predicate.as_ref(), &replacement)
    }

    /// Returns the pattern.
    pub fn pattern(&self) -> &Template {
        &self.pattern
    }

    /// Returns the predicate, if any.
    pub fn predicate(&self) -> Option<&Template> {
        self.predicate.as_ref()
    }

    /// Returns the replacement.
    pub fn replacement(&self) -> &Template {
        &self.replacement
    }

    /// Applies the rule to the root of the expression. Returns [`None`] if the pattern does not
    /// match, or if the predicate does not evaluate to a non-zero value.
    pub fn apply(&self, expr: &Expr, evaluator: &Evaluator, substitutions: &Substitutions) -> Option<Expr> {
        let bindings = self.pattern.matches(expr)?;

        if let Some(predicate) = &self.predicate {
            let condition = predicate.instantiate(&bindings);
            match evaluator.evaluate_tree(&condition, substitutions) {
                Ok(value) if is_truthy(&value) => {},
                _ => return None,
            }
        }

        Some(self.replacement.instantiate(&bindings))
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Applies rewrite rules to expressions until they reach a fixpoint.
///
/// Each pass visits the tree bottom-up. At each node, the rules are tried in order and the first
/// one that changes the node wins. If no rule applies and constant folding is enabled, calls to
/// pure functions whose arguments are all numbers are replaced by their value. Passes repeat
/// until one changes nothing.
#[derive(Debug, Clone)]
pub struct Rewriter<'a> {
    evaluator: &'a Evaluator,
    rules: Vec<&'a RewriteRule>,
    substitutions: &'a Substitutions,
    folding: bool,
}

impl<'a> Rewriter<'a> {
    /// Creates a rewriter that applies the given rules, using the evaluator to check predicates.
    pub fn new(evaluator: &'a Evaluator, rules: Vec<&'a RewriteRule>) -> Self {
        Self {
            evaluator,
            rules,
            substitutions: &NO_SUBSTITUTIONS,
            folding: false,
        }
    }

    /// Sets the substitutions used to evaluate predicates and fold constants.
    pub fn with_substitutions(mut self, substitutions: &'a Substitutions) -> Self {
        self.substitutions = substitutions;
        self
    }

    /// Enables or disables constant folding.
    pub fn with_folding(mut self, folding: bool) -> Self {
        self.folding = folding;
        self
    }

    /// Rewrites the expression.
    pub fn rewrite(&self, expr: &Expr) -> Result<Expr, Error> {
        self.rewrite_with_steps(expr, &mut ())
    }

    /// Rewrites the expression, recording every rule application in `steps`.
    pub fn rewrite_with_steps(
        &self,
        expr: &Expr,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Expr, Error> {
        let max_passes = self.evaluator.config().max_rewrite_iterations;
        let mut current = expr.clone();
        let mut passes = 0;

        while let Some(next) = self.pass(&current, steps) {
            passes += 1;
            if passes > max_passes {
                warn!(passes = max_passes, expr = %expr, "rewriting did not reach a fixpoint");
                return Err(Error::without_spans(NonTerminatingRewrite { iterations: max_passes }));
            }
            current = next;
        }

        debug!(passes, result = %current, "rewriting reached a fixpoint");
        Ok(current)
    }

    /// Rewrites the children of the node, then the node itself. Returns [`None`] if nothing
    /// changed.
    fn pass(&self, expr: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
        let children = match expr {
            Expr::Function { name, args } => {
                let mut changed = false;
                let mut new_args = Vec::with_capacity(args.len());
                for arg in args {
                    match self.pass(arg, steps) {
                        Some(new_arg) => {
                            changed = true;
                            new_args.push(new_arg);
                        },
                        None => new_args.push(arg.clone()),
                    }
                }
                changed.then(|| Expr::Function { name: name.clone(), args: new_args })
            },
            Expr::Number(_) | Expr::Variable(_) => None,
        };

        let node = children.as_ref().unwrap_or(expr);
        self.apply_rules(node, steps)
            .or_else(|| self.fold(node))
            .or(children)
    }

    /// Applies the first rule that changes the node.
    fn apply_rules(&self, node: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
        for rule in &self.rules {
            let Some(after) = rule.apply(node, self.evaluator, self.substitutions) else {
                continue;
            };
            if after == *node {
                continue;
            }

            debug!(rule = %rule, before = %node, after = %after, "applied rewrite rule");
            steps.push(Step {
                rule: rule.to_string(),
                before: node.clone(),
                after: after.clone(),
            });
            return Some(after);
        }

        None
    }

    /// Replaces a call to a pure function whose arguments are all numbers with its value.
    ///
    /// A negative value is written as the negation of its magnitude, which is how the parser
    /// reads a negative literal back.
    fn fold(&self, node: &Expr) -> Option<Expr> {
        if !self.folding {
            return None;
        }

        let (name, args) = node.as_function()?;
        if args.is_empty() || !args.iter().all(|arg| matches!(arg, Expr::Number(_))) {
            return None;
        }

        let value = self.evaluator.eval_pure_call(name, args, self.substitutions)?;
        if !value.is_finite() {
            return None;
        }

        trace!(expr = %node, value = %value, "folded constant");
        let folded = if value.is_sign_negative() && !value.is_zero() {
            Expr::function("negate", [Expr::Number(-value)])
        } else {
            Expr::Number(value.abs())
        };

        // `negate(2)` folds to itself
        (folded != *node).then_some(folded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::{error::kind, func::{Arity, CallCtxt, Function}};
    use crate::primitive::float;
    use mathex_error::ErrorCategory;
    use mathex_parser::parse;
    use pretty_assertions::assert_eq;

    fn rewrite(rules: &[RewriteRule], source: &str) -> Result<Expr, Error> {
        let evaluator = Evaluator::default();
        let rewriter = Rewriter::new(&evaluator, rules.iter().collect());
        rewriter.rewrite(&parse(source).unwrap())
    }

    #[test]
    fn same_predicate() {
        let rules = [RewriteRule::parse("__exp1 - __exp2", Some("same(__exp1, __exp2)"), "0").unwrap()];
        assert_eq!(rewrite(&rules, "x*2 - x*2").unwrap(), parse("0").unwrap());
        assert_eq!(rewrite(&rules, "x - y").unwrap(), parse("x - y").unwrap());
    }

    #[test]
    fn repeated_placeholder() {
        let rules = [RewriteRule::parse("__exp - __exp", None, "0").unwrap()];
        assert_eq!(rewrite(&rules, "x*2 - x*2").unwrap(), parse("0").unwrap());
        assert_eq!(rewrite(&rules, "x - y").unwrap(), parse("x - y").unwrap());
    }

    #[test]
    fn bottom_up() {
        let rules = [RewriteRule::parse("__exp1 + 0", None, "__exp1").unwrap()];
        assert_eq!(rewrite(&rules, "((x + 0) + 0) * (y + 0)").unwrap(), parse("x * y").unwrap());
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = [
            RewriteRule::parse("__var1 * 2", None, "__var1 + __var1").unwrap(),
            RewriteRule::parse("__exp1 * 2", None, "0").unwrap(),
        ];
        assert_eq!(rewrite(&rules, "x * 2").unwrap(), parse("x + x").unwrap());
        assert_eq!(rewrite(&rules, "3 * 2").unwrap(), parse("0").unwrap());
    }

    #[test]
    fn predicate_uses_substitutions() {
        let rule = RewriteRule::parse("__exp1 / __exp1", Some("__exp1 != 0"), "1").unwrap();
        let evaluator = Evaluator::default();
        let expr = parse("x / x").unwrap();

        let unknown = Rewriter::new(&evaluator, vec![&rule]).rewrite(&expr).unwrap();
        assert_eq!(unknown, expr);

        let mut subs = Substitutions::new();
        subs.insert("x".to_string(), float(2));
        let known = Rewriter::new(&evaluator, vec![&rule])
            .with_substitutions(&subs)
            .rewrite(&expr)
            .unwrap();
        assert_eq!(known, parse("1").unwrap());

        subs.insert("x".to_string(), float(0));
        let zero = Rewriter::new(&evaluator, vec![&rule])
            .with_substitutions(&subs)
            .rewrite(&expr)
            .unwrap();
        assert_eq!(zero, expr);
    }

    #[test]
    fn folding() {
        let mut evaluator = Evaluator::default();
        evaluator.register(
            Function::new("counter", Arity::Exact(1), |args, _| Ok(args[0].clone())).impure()
        ).unwrap();

        let rewriter = Rewriter::new(&evaluator, Vec::new()).with_folding(true);
        let folded = rewriter.rewrite(&parse("x + 2 * 3 + counter(1) + random(5)").unwrap()).unwrap();
        assert_eq!(folded, parse("x + 6 + counter(1) + random(5)").unwrap());

        let unchanged = Rewriter::new(&evaluator, Vec::new()).rewrite(&parse("2 * 3").unwrap()).unwrap();
        assert_eq!(unchanged, parse("2 * 3").unwrap());

        // division by zero is left alone
        assert_eq!(rewriter.rewrite(&parse("1 / 0").unwrap()).unwrap(), parse("1 / 0").unwrap());
    }

    #[test]
    fn folding_negative_values() {
        let evaluator = Evaluator::default();
        let rewriter = Rewriter::new(&evaluator, Vec::new()).with_folding(true);

        let folded = rewriter.rewrite(&parse("x - (3 - 5)").unwrap()).unwrap();
        assert_eq!(folded, parse("x - -2").unwrap());
        assert_eq!(folded.to_string(), "x - -2");
        assert_eq!(parse(&folded.to_string()).unwrap(), folded);

        assert_eq!(rewriter.rewrite(&parse("-2").unwrap()).unwrap(), parse("-2").unwrap());
        assert_eq!(rewriter.rewrite(&parse("2 - 2").unwrap()).unwrap(), parse("0").unwrap());
    }

    #[test]
    fn folding_inexact_values() {
        let evaluator = Evaluator::default();
        let rewriter = Rewriter::new(&evaluator, Vec::new()).with_folding(true);

        let folded = rewriter.rewrite(&parse("0.1 + 0.2").unwrap()).unwrap();
        let Expr::Number(value) = &folded else {
            panic!("expected a number, got {}", folded);
        };
        assert_eq!(value.to_f64(), 0.1 + 0.2);
        assert_eq!(parse(&folded.to_string()).unwrap(), folded);
    }

    #[test]
    fn folding_skips_overridden_and_resolved_calls() {
        let mut evaluator = Evaluator::default();
        evaluator.set_function_overrider(|name: &str, args: &[Expr], ctxt: &CallCtxt<'_>| {
            if name == "add" {
                Ok(Some(ctxt.eval(&args[0])? * ctxt.eval(&args[1])?))
            } else {
                Ok(None)
            }
        });
        evaluator.set_function_resolver(|name: &str| {
            (name == "seven").then(|| Function::new("seven", Arity::Exact(1), |_, ctxt| Ok(ctxt.float(7))))
        });

        let rewriter = Rewriter::new(&evaluator, Vec::new()).with_folding(true);
        let source = parse("(2 + 3) * seven(1) + 2 * 3").unwrap();
        let folded = rewriter.rewrite(&source).unwrap();
        assert_eq!(folded, parse("(2 + 3) * seven(1) + 6").unwrap());

        // evaluation still goes through the overrider
        assert_eq!(evaluator.evaluate_tree(&folded, &Substitutions::new()).unwrap(), 6 * 7 * 6);
    }

    #[test]
    fn steps() {
        let rules = [RewriteRule::parse("__exp1 * 1", None, "__exp1").unwrap()];
        let evaluator = Evaluator::default();
        let mut steps = Vec::new();
        Rewriter::new(&evaluator, rules.iter().collect())
            .rewrite_with_steps(&parse("(a * 1) * 1").unwrap(), &mut steps)
            .unwrap();

        assert_eq!(steps, vec![
            Step {
                rule: "__exp1 * 1 => __exp1".to_string(),
                before: parse("a * 1").unwrap(),
                after: parse("a").unwrap(),
            },
            Step {
                rule: "__exp1 * 1 => __exp1".to_string(),
                before: parse("a * 1").unwrap(),
                after: parse("a").unwrap(),
            },
        ]);
    }

    #[test]
    fn non_terminating() {
        let rules = [RewriteRule::parse("__exp1 + __exp2", None, "__exp2 + __exp1").unwrap()];
        let err = rewrite(&rules, "a + b").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NonTerminatingRewrite);

        let mut evaluator = Evaluator::default();
        evaluator.config_mut().max_rewrite_iterations = 3;
        let err = Rewriter::new(&evaluator, rules.iter().collect())
            .rewrite(&parse("a + b").unwrap())
            .unwrap_err();
        assert_eq!(err.kind::<kind::NonTerminatingRewrite>().unwrap().iterations, 3);
    }

    #[test]
    fn invalid_rules() {
        let err = RewriteRule::parse("__exp1 + 1", None, "__exp2").unwrap_err();
        assert!(err.is::<kind::UnboundPlaceholder>());

        let err = RewriteRule::parse("__exp1", Some("__num1 > 0"), "1").unwrap_err();
        assert!(err.is::<kind::UnboundPlaceholder>());

        let err = RewriteRule::parse("__exp1(x)", None, "1").unwrap_err();
        assert!(err.is::<kind::PlaceholderWithArguments>());
        assert_eq!(err.category(), ErrorCategory::Syntax);

        assert_eq!(RewriteRule::parse("1 +", None, "1").unwrap_err().category(), ErrorCategory::Syntax);
    }

    #[test]
    fn display() {
        let rule = RewriteRule::parse("__exp1/__exp1", Some("__exp1 != 0"), "1").unwrap();
        assert_eq!(rule.to_string(), "__exp1 / __exp1 => 1 if __exp1 != 0");
    }
}
