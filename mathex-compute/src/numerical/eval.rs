use mathex_error::Error;
use mathex_parser::{Expr, OperatorCatalog, Parser, ParserConfig};
use rug::Float;
use std::{borrow::Cow, collections::HashMap, fmt};
use tracing::trace;
use crate::funcs;
use crate::symbolic::{
    rewrite::{RewriteRule, Rewriter},
    rules::DEFAULT_RULES,
    step::Step,
    step_collector::StepCollector,
};
use super::{
    config::EvalConfig,
    error::kind::{InvalidArgumentCount, OutOfDomain, UnknownFunction, UnknownVariable},
    func::{Body, CallCtxt, Function},
    function_set::FunctionSet,
    resolve::{FunctionOverrider, FunctionResolver, VariableResolver},
};

/// Values for the variables of an expression, keyed by variable name.
pub type Substitutions = HashMap<String, Float>;

/// Evaluates expression trees to numbers.
///
/// An evaluator owns its function table, rewrite rules, dynamic resolvers and configuration.
/// Registration requires `&mut self`, while evaluation only requires `&self`, so a configured
/// evaluator can be shared between threads.
pub struct Evaluator {
    functions: FunctionSet,
    rules: Vec<RewriteRule>,
    variable_resolver: Option<Box<dyn VariableResolver>>,
    function_resolver: Option<Box<dyn FunctionResolver>>,
    function_overrider: Option<Box<dyn FunctionOverrider>>,
    config: EvalConfig,
    catalog: OperatorCatalog,
    parser_config: ParserConfig,
}

impl Default for Evaluator {
    /// Creates an evaluator with the default function library, operator catalog and
    /// configuration.
    fn default() -> Self {
        Self::with_functions(funcs::all())
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("functions", &self.functions)
            .field("rules", &self.rules)
            .field("variable_resolver", &self.variable_resolver.is_some())
            .field("function_resolver", &self.function_resolver.is_some())
            .field("function_overrider", &self.function_overrider.is_some())
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("parser_config", &self.parser_config)
            .finish()
    }
}

impl Evaluator {
    /// Creates an evaluator with the default function library and the given configuration.
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an evaluator without any functions.
    pub fn empty() -> Self {
        Self::with_functions(FunctionSet::new())
    }

    /// Creates an evaluator with the given function table.
    pub fn with_functions(functions: FunctionSet) -> Self {
        Self {
            functions,
            rules: Vec::new(),
            variable_resolver: None,
            function_resolver: None,
            function_overrider: None,
            config: EvalConfig::default(),
            catalog: OperatorCatalog::default(),
            parser_config: ParserConfig::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Returns a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut EvalConfig {
        &mut self.config
    }

    /// Returns the function table.
    pub fn functions(&self) -> &FunctionSet {
        &self.functions
    }

    /// Returns the rules applied before every evaluation, in the order they are tried.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Returns the operator catalog used by [`Evaluator::evaluate_str`].
    pub fn catalog(&self) -> &OperatorCatalog {
        &self.catalog
    }

    /// Returns a mutable reference to the operator catalog used by [`Evaluator::evaluate_str`].
    pub fn catalog_mut(&mut self) -> &mut OperatorCatalog {
        &mut self.catalog
    }

    /// Returns a mutable reference to the parser configuration used by
    /// [`Evaluator::evaluate_str`].
    pub fn parser_config_mut(&mut self) -> &mut ParserConfig {
        &mut self.parser_config
    }

    /// Returns a parser that uses this evaluator's catalog and parser configuration.
    pub fn parser(&self) -> Parser<'_> {
        Parser::new(&self.catalog, self.parser_config)
    }

    /// Registers a function. Fails if the name is already used by a function or an alias.
    pub fn register(&mut self, function: Function) -> Result<(), Error> {
        self.functions.register(function)
    }

    /// Removes a name from the function table.
    ///
    /// Unregistering a function's own name also removes all of its aliases. Unregistering an
    /// alias removes only that alias, and returns the function it pointed to.
    pub fn unregister(&mut self, name: &str) -> Result<Function, Error> {
        self.functions.unregister(name)
    }

    /// Adds an alias for an existing function.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<(), Error> {
        self.functions.add_alias(alias, target)
    }

    /// Removes an alias.
    pub fn remove_alias(&mut self, alias: &str) -> Result<(), Error> {
        self.functions.remove_alias(alias)
    }

    /// Sets the resolver consulted for variables missing from the substitutions.
    pub fn set_variable_resolver(&mut self, resolver: impl VariableResolver + 'static) {
        self.variable_resolver = Some(Box::new(resolver));
    }

    /// Sets the resolver consulted for functions missing from the function table.
    pub fn set_function_resolver(&mut self, resolver: impl FunctionResolver + 'static) {
        self.function_resolver = Some(Box::new(resolver));
    }

    /// Sets the overrider consulted before the function table for every call.
    pub fn set_function_overrider(&mut self, overrider: impl FunctionOverrider + 'static) {
        self.function_overrider = Some(Box::new(overrider));
    }

    /// Adds a rule that is applied to every expression before it is evaluated.
    pub fn add_rule(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    /// Parses and adds a rule that is applied to every expression before it is evaluated.
    pub fn add_rule_str(
        &mut self,
        pattern: &str,
        predicate: Option<&str>,
        replacement: &str,
    ) -> Result<(), Error> {
        let rule = RewriteRule::parse_with(&self.parser(), pattern, predicate, replacement)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Evaluates the expression. The registered rewrite rules are applied first.
    pub fn evaluate(&self, expr: &Expr, substitutions: &Substitutions) -> Result<Float, Error> {
        if self.rules.is_empty() {
            return self.evaluate_tree(expr, substitutions);
        }

        let rewritten = Rewriter::new(self, self.rules.iter().collect())
            .with_substitutions(substitutions)
            .rewrite(expr)?;
        self.evaluate_tree(&rewritten, substitutions)
    }

    /// Parses the source with this evaluator's catalog and parser configuration, then evaluates
    /// it.
    pub fn evaluate_str(&self, source: &str, substitutions: &Substitutions) -> Result<Float, Error> {
        let expr = self.parser().parse(source)?;
        self.evaluate(&expr, substitutions)
    }

    /// Simplifies the expression with the default rules, the registered rules, and constant
    /// folding.
    pub fn simplify(&self, expr: &Expr) -> Result<Expr, Error> {
        self.simplify_with_steps(expr, &mut ())
    }

    /// Simplifies the expression, recording every rule application in `steps`.
    pub fn simplify_with_steps(
        &self,
        expr: &Expr,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Expr, Error> {
        let rules = self.rules.iter().chain(DEFAULT_RULES.iter()).collect();
        Rewriter::new(self, rules)
            .with_folding(true)
            .rewrite_with_steps(expr, steps)
    }

    /// Evaluates the expression without applying any rewrite rules.
    pub fn evaluate_tree(&self, expr: &Expr, substitutions: &Substitutions) -> Result<Float, Error> {
        match expr {
            Expr::Number(value) => Ok(self.round(value)),
            Expr::Variable(name) => self.eval_variable(name, substitutions),
            Expr::Function { name, args } => self.eval_call(name, args, substitutions),
        }
    }

    /// Rounds the value to the precision of the numeric mode.
    fn round(&self, value: &Float) -> Float {
        Float::with_val(self.config.mode.precision(), value)
    }

    /// Looks the variable up in the substitutions, then the variable resolver.
    fn lookup_variable(&self, name: &str, substitutions: &Substitutions) -> Option<Float> {
        if let Some(value) = substitutions.get(name) {
            return Some(value.clone());
        }

        let value = self.variable_resolver.as_ref()?.resolve_variable(name)?;
        trace!(name, "variable supplied by resolver");
        Some(value)
    }

    /// Looks the function up in the function table, then the function resolver.
    fn lookup_function(&self, name: &str) -> Option<Cow<'_, Function>> {
        if let Some(function) = self.functions.get(name) {
            return Some(Cow::Borrowed(function));
        }

        let function = self.function_resolver.as_ref()?.resolve_function(name)?;
        trace!(name, "function supplied by resolver");
        Some(Cow::Owned(function))
    }

    /// Computes a call for constant folding, or returns [`None`] if the call must be kept.
    ///
    /// Only pure functions of the function table are folded. Calls that the function overrider
    /// handles are kept, since the overrider may answer differently later, and so are functions
    /// that only the function resolver knows.
    pub(crate) fn eval_pure_call(
        &self,
        name: &str,
        args: &[Expr],
        substitutions: &Substitutions,
    ) -> Option<Float> {
        let ctxt = CallCtxt { evaluator: self, substitutions, name };
        if let Some(overrider) = &self.function_overrider {
            if !matches!(overrider.override_function(name, args, &ctxt), Ok(None)) {
                return None;
            }
        }

        let function = self.functions.get(name).filter(|function| function.pure)?;
        self.invoke(function, args, &ctxt).ok()
    }

    fn eval_variable(&self, name: &str, substitutions: &Substitutions) -> Result<Float, Error> {
        if let Some(value) = self.lookup_variable(name, substitutions) {
            return Ok(self.round(&value));
        }

        if self.config.argumentless_functions {
            if let Some(function) = self.lookup_function(name) {
                if function.arity.accepts(0) {
                    let ctxt = CallCtxt { evaluator: self, substitutions, name };
                    return self.invoke(&function, &[], &ctxt);
                }
            }
        }

        Err(Error::without_spans(UnknownVariable { name: name.to_string() }))
    }

    fn eval_call(&self, name: &str, args: &[Expr], substitutions: &Substitutions) -> Result<Float, Error> {
        let ctxt = CallCtxt { evaluator: self, substitutions, name };

        if let Some(overrider) = &self.function_overrider {
            if let Some(value) = overrider.override_function(name, args, &ctxt)? {
                return Ok(self.round(&value));
            }
        }

        if let Some(function) = self.lookup_function(name) {
            return self.invoke(&function, args, &ctxt);
        }

        if args.is_empty() && self.config.argumentless_functions {
            if let Some(value) = self.lookup_variable(name, substitutions) {
                return Ok(self.round(&value));
            }
        }

        Err(Error::without_spans(UnknownFunction {
            name: name.to_string(),
            suggestions: self.functions.similar(name),
        }))
    }

    /// Checks the arity of the function, then calls it.
    fn invoke(&self, function: &Function, args: &[Expr], ctxt: &CallCtxt<'_>) -> Result<Float, Error> {
        if !function.arity.accepts(args.len()) {
            return Err(Error::without_spans(InvalidArgumentCount {
                name: ctxt.name.to_string(),
                expected: function.arity,
                given: args.len(),
            }));
        }

        let value = match &function.body {
            Body::Eager(body) => {
                let values = args.iter()
                    .map(|arg| self.evaluate_tree(arg, ctxt.substitutions))
                    .collect::<Result<Vec<_>, _>>()?;
                let value = body(&values, ctxt)?;

                // a pole, such as a registered `1 / x` at zero
                if value.is_infinite() && values.iter().all(Float::is_finite) {
                    return Err(out_of_domain(ctxt.name));
                }
                value
            },
            Body::Lazy(body) => body(args, ctxt)?,
        };

        if value.is_nan() {
            return Err(out_of_domain(ctxt.name));
        }

        Ok(self.round(&value))
    }
}

fn out_of_domain(name: &str) -> Error {
    Error::without_spans(OutOfDomain {
        name: name.to_string(),
        reason: "the given arguments".to_string(),
    })
}

/// Parses and evaluates the source with a default [`Evaluator`].
pub fn evaluate(source: &str) -> Result<Float, Error> {
    Evaluator::default().evaluate_str(source, &Substitutions::new())
}
