//! Expression trees with placeholders, used as the patterns and replacements of
//! [`RewriteRule`](super::rewrite::RewriteRule)s.

use mathex_error::Error;
use mathex_parser::Expr;
use rug::Float;
use std::collections::{BTreeSet, HashMap};
use crate::numerical::error::kind::PlaceholderWithArguments;

/// The subtrees bound to each placeholder by a successful match, keyed by placeholder name.
pub type Bindings = HashMap<String, Expr>;

/// The kind of node a placeholder can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Matches a number, spelled `__num`.
    Number,

    /// Matches any function call, regardless of name and arguments, spelled `__func`.
    Function,

    /// Matches a variable, spelled `__var`.
    Variable,

    /// Matches any expression, spelled `__exp`.
    Expression,
}

impl PlaceholderKind {
    const PREFIXES: [(&'static str, PlaceholderKind); 4] = [
        ("__num", PlaceholderKind::Number),
        ("__func", PlaceholderKind::Function),
        ("__var", PlaceholderKind::Variable),
        ("__exp", PlaceholderKind::Expression),
    ];

    /// Returns the kind of placeholder the name spells, if it is one. Any suffix is allowed after
    /// the prefix, so `__exp`, `__exp1` and `__exp_lhs` are all expression placeholders.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    /// Returns true if this placeholder can match the expression.
    pub fn accepts(self, expr: &Expr) -> bool {
        match self {
            PlaceholderKind::Number => matches!(expr, Expr::Number(_)),
            PlaceholderKind::Function => matches!(expr, Expr::Function { .. }),
            PlaceholderKind::Variable => matches!(expr, Expr::Variable(_)),
            PlaceholderKind::Expression => true,
        }
    }
}

/// An expression tree that may contain placeholders.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Matches a number with the same value.
    Number(Float),

    /// Matches a variable with the same name.
    Variable(String),

    /// Matches a function with the same name, ignoring case, whose arguments match.
    Function {
        name: String,
        args: Vec<Template>,
    },

    /// Matches any node of the given kind. Every occurrence of the same placeholder must match
    /// structurally equal subtrees.
    Placeholder {
        kind: PlaceholderKind,
        name: String,
    },
}

impl Template {
    /// Converts an expression to a template. Variables and calls without arguments whose names
    /// start with a placeholder prefix become placeholders.
    pub fn from_expr(expr: &Expr) -> Result<Self, Error> {
        Ok(match expr {
            Expr::Number(value) => Template::Number(value.clone()),
            Expr::Variable(name) => match PlaceholderKind::from_name(name) {
                Some(kind) => Template::Placeholder { kind, name: name.clone() },
                None => Template::Variable(name.clone()),
            },
            Expr::Function { name, args } => match PlaceholderKind::from_name(name) {
                Some(kind) if args.is_empty() => Template::Placeholder { kind, name: name.clone() },
                Some(_) => return Err(Error::without_spans(PlaceholderWithArguments { name: name.clone() })),
                None => Template::Function {
                    name: name.clone(),
                    args: args.iter().map(Template::from_expr).collect::<Result<_, _>>()?,
                },
            },
        })
    }

    /// Returns the names of every placeholder in the template.
    pub fn placeholders(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_placeholders(&mut names);
        names
    }

    fn collect_placeholders<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Template::Placeholder { name, .. } => {
                names.insert(name.as_str());
            },
            Template::Function { args, .. } => {
                for arg in args {
                    arg.collect_placeholders(names);
                }
            },
            Template::Number(_) | Template::Variable(_) => {},
        }
    }

    /// Matches the template against the expression, returning the bindings of each placeholder
    /// if it matches.
    pub fn matches(&self, expr: &Expr) -> Option<Bindings> {
        let mut bindings = Bindings::new();
        self.match_into(expr, &mut bindings).then_some(bindings)
    }

    fn match_into(&self, expr: &Expr, bindings: &mut Bindings) -> bool {
        match (self, expr) {
            (Template::Number(a), Expr::Number(b)) => a == b,
            (Template::Variable(a), Expr::Variable(b)) => a == b,
            (
                Template::Function { name: pattern_name, args: pattern_args },
                Expr::Function { name, args },
            ) => {
                pattern_name.eq_ignore_ascii_case(name)
                    && pattern_args.len() == args.len()
                    && pattern_args.iter()
                        .zip(args)
                        .all(|(pattern, arg)| pattern.match_into(arg, bindings))
            },
            (Template::Placeholder { kind, name }, expr) => {
                if !kind.accepts(expr) {
                    return false;
                }
                match bindings.get(name) {
                    Some(bound) => bound == expr,
                    None => {
                        bindings.insert(name.clone(), expr.clone());
                        true
                    },
                }
            },
            _ => false,
        }
    }

    /// Builds an expression from the template, replacing each placeholder with its binding.
    /// Placeholders without a binding are left as variables.
    pub fn instantiate(&self, bindings: &Bindings) -> Expr {
        match self {
            Template::Number(value) => Expr::Number(value.clone()),
            Template::Variable(name) => Expr::Variable(name.clone()),
            Template::Function { name, args } => Expr::Function {
                name: name.clone(),
                args: args.iter().map(|arg| arg.instantiate(bindings)).collect(),
            },
            Template::Placeholder { name, .. } => bindings
                .get(name)
                .cloned()
                .unwrap_or_else(|| Expr::Variable(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathex_parser::parse;
    use pretty_assertions::assert_eq;

    fn template(source: &str) -> Template {
        Template::from_expr(&parse(source).unwrap()).unwrap()
    }

    #[test]
    fn placeholder_kinds() {
        assert_eq!(PlaceholderKind::from_name("__num"), Some(PlaceholderKind::Number));
        assert_eq!(PlaceholderKind::from_name("__func2"), Some(PlaceholderKind::Function));
        assert_eq!(PlaceholderKind::from_name("__var_x"), Some(PlaceholderKind::Variable));
        assert_eq!(PlaceholderKind::from_name("__exp1"), Some(PlaceholderKind::Expression));
        assert_eq!(PlaceholderKind::from_name("__other"), None);
        assert_eq!(PlaceholderKind::from_name("x"), None);
    }

    #[test]
    fn conversion() {
        assert_eq!(template("__exp1 + x"), Template::Function {
            name: "add".to_string(),
            args: vec![
                Template::Placeholder { kind: PlaceholderKind::Expression, name: "__exp1".to_string() },
                Template::Variable("x".to_string()),
            ],
        });
        assert_eq!(
            template("__num()"),
            Template::Placeholder { kind: PlaceholderKind::Number, name: "__num".to_string() },
        );
    }

    #[test]
    fn placeholder_with_arguments() {
        let err = Template::from_expr(&parse("1 + __exp1(2)").unwrap()).unwrap_err();
        assert_eq!(
            err.kind::<PlaceholderWithArguments>(),
            Some(&PlaceholderWithArguments { name: "__exp1".to_string() }),
        );
    }

    #[test]
    fn structural_match() {
        let pattern = template("__exp1 * __num1");
        let bindings = pattern.matches(&parse("(x + 1) * 3").unwrap()).unwrap();
        assert_eq!(bindings["__exp1"], parse("x + 1").unwrap());
        assert_eq!(bindings["__num1"], parse("3").unwrap());

        assert!(pattern.matches(&parse("3 * x").unwrap()).is_none());
        assert!(pattern.matches(&parse("3 + 3").unwrap()).is_none());
    }

    #[test]
    fn kinds_restrict_matches() {
        let pattern = template("__func1 + __var1");
        assert!(pattern.matches(&parse("sin(x) + y").unwrap()).is_some());
        assert!(pattern.matches(&parse("sin(x) + 2").unwrap()).is_none());
        assert!(pattern.matches(&parse("z + y").unwrap()).is_none());
    }

    #[test]
    fn repeated_placeholders() {
        let pattern = template("__exp - __exp");
        assert!(pattern.matches(&parse("x * 2 - x * 2").unwrap()).is_some());
        assert!(pattern.matches(&parse("x - y").unwrap()).is_none());
    }

    #[test]
    fn names_ignore_case() {
        let pattern = template("SIN(__exp1)");
        assert!(pattern.matches(&parse("sin(x)").unwrap()).is_some());
        assert!(pattern.matches(&parse("sin(x, y)").unwrap()).is_none());
    }

    #[test]
    fn instantiation() {
        let pattern = template("__exp1 + __exp2");
        let replacement = template("__exp2 + __exp1 + __unbound");
        let bindings = pattern.matches(&parse("a + b * c").unwrap()).unwrap();
        assert_eq!(replacement.instantiate(&bindings), parse("b * c + a + __unbound").unwrap());
    }

    #[test]
    fn placeholder_names() {
        let tmpl = template("__exp1 * f(__num2, __exp1, x)");
        let names = tmpl.placeholders();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["__exp1", "__num2"]);
    }
}
