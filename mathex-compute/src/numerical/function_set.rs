use levenshtein::levenshtein;
use mathex_error::Error;
use std::collections::HashMap;
use super::{error::kind, func::Function};

/// The table of native functions and aliases of an [`Evaluator`](super::eval::Evaluator).
///
/// Function names and aliases are case-insensitive, and share a single namespace: a name can
/// either be a function or an alias, but not both.
#[derive(Debug, Clone, Default)]
pub struct FunctionSet {
    /// The functions, keyed by lowercase canonical name.
    functions: HashMap<String, Function>,

    /// The aliases, mapping lowercase alias to lowercase canonical name.
    aliases: HashMap<String, String>,
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

impl FunctionSet {
    /// Creates an empty function set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the name is used by a function or an alias.
    pub fn contains(&self, name: &str) -> bool {
        let name = normalize(name);
        self.functions.contains_key(&name) || self.aliases.contains_key(&name)
    }

    /// Returns the canonical name that `name` refers to, following an alias if needed.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        let name = normalize(name);
        if let Some(target) = self.aliases.get(&name) {
            return Some(target.as_str());
        }
        self.functions.get_key_value(&name).map(|(key, _)| key.as_str())
    }

    /// Returns the function with the given name or alias.
    pub fn get(&self, name: &str) -> Option<&Function> {
        let canonical = self.canonical_name(name)?;
        self.functions.get(canonical)
    }

    /// Adds a function.
    pub fn register(&mut self, function: Function) -> Result<(), Error> {
        if self.contains(&function.name) {
            return Err(Error::without_spans(kind::FunctionAlreadyExists { name: function.name }));
        }
        self.insert(function);
        Ok(())
    }

    /// Adds a function without checking for name collisions, replacing any previous function of
    /// the same name.
    pub(crate) fn insert(&mut self, mut function: Function) {
        function.name = normalize(&function.name);
        self.functions.insert(function.name.clone(), function);
    }

    /// Adds an alias without checking that the target exists.
    pub(crate) fn insert_alias(&mut self, alias: &str, target: &str) {
        self.aliases.insert(normalize(alias), normalize(target));
    }

    /// Removes a name.
    ///
    /// If `name` is an alias, only the alias is removed, and a copy of the function it referred
    /// to is returned. If it is a function's canonical name, the function is removed along with
    /// every alias that refers to it.
    pub fn unregister(&mut self, name: &str) -> Result<Function, Error> {
        let name = normalize(name);
        if let Some(target) = self.aliases.remove(&name) {
            return self.functions.get(&target).cloned().ok_or_else(|| does_not_exist(&name));
        }

        let function = self.functions.remove(&name).ok_or_else(|| does_not_exist(&name))?;
        self.aliases.retain(|_, target| *target != name);
        Ok(function)
    }

    /// Adds an alias for an existing function. If `target` is itself an alias, the new alias
    /// refers to the same function.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<(), Error> {
        let canonical = self.canonical_name(target)
            .map(str::to_string)
            .ok_or_else(|| does_not_exist(target))?;
        if self.contains(alias) {
            return Err(Error::without_spans(kind::FunctionAlreadyExists { name: alias.to_string() }));
        }
        self.aliases.insert(normalize(alias), canonical);
        Ok(())
    }

    /// Removes an alias. The function it refers to is kept.
    pub fn remove_alias(&mut self, alias: &str) -> Result<(), Error> {
        self.aliases
            .remove(&normalize(alias))
            .map(|_| ())
            .ok_or_else(|| does_not_exist(alias))
    }

    /// Returns the canonical names of every function, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Returns every alias with the canonical name it refers to, in no particular order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(alias, target)| (alias.as_str(), target.as_str()))
    }

    /// Returns the sorted names and aliases that are within an edit distance of 1 of `name`.
    pub fn similar(&self, name: &str) -> Vec<String> {
        let name = normalize(name);
        let mut similar = self.functions
            .keys()
            .chain(self.aliases.keys())
            .filter(|candidate| levenshtein(candidate, &name) < 2)
            .cloned()
            .collect::<Vec<_>>();
        similar.sort();
        similar
    }
}

fn does_not_exist(name: &str) -> Error {
    Error::without_spans(kind::FunctionDoesNotExist { name: name.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::func::Arity;
    use pretty_assertions::assert_eq;

    fn set() -> FunctionSet {
        let mut set = FunctionSet::new();
        set.register(Function::new("Square", Arity::Exact(1), |args, _| Ok(args[0].clone().square())))
            .unwrap();
        set
    }

    #[test]
    fn case_insensitive() {
        let set = set();
        assert!(set.get("square").is_some());
        assert!(set.get("SQUARE").is_some());
        assert_eq!(set.canonical_name("sQuArE"), Some("square"));
    }

    #[test]
    fn duplicate_registration() {
        let mut set = set();
        let err = set.register(Function::new("square", Arity::ANY, |_, ctxt| Ok(ctxt.float(0))))
            .unwrap_err();
        assert!(err.is::<kind::FunctionAlreadyExists>());
    }

    #[test]
    fn aliases() {
        let mut set = set();
        set.add_alias("sq", "square").unwrap();
        set.add_alias("sq2", "SQ").unwrap();
        assert_eq!(set.canonical_name("sq2"), Some("square"));
        assert!(set.add_alias("sq", "square").unwrap_err().is::<kind::FunctionAlreadyExists>());
        assert!(set.add_alias("x", "nope").unwrap_err().is::<kind::FunctionDoesNotExist>());

        set.remove_alias("sq").unwrap();
        assert!(set.get("sq").is_none());
        assert!(set.get("square").is_some());
        assert!(set.remove_alias("sq").unwrap_err().is::<kind::FunctionDoesNotExist>());
    }

    #[test]
    fn unregister_removes_aliases() {
        let mut set = set();
        set.add_alias("sq", "square").unwrap();
        let removed = set.unregister("Square").unwrap();
        assert_eq!(removed.name, "square");
        assert!(!set.contains("square"));
        assert!(!set.contains("sq"));
        assert!(set.unregister("square").unwrap_err().is::<kind::FunctionDoesNotExist>());
    }

    #[test]
    fn unregister_alias_only() {
        let mut set = set();
        set.add_alias("sq", "square").unwrap();
        set.add_alias("pow2", "square").unwrap();

        let target = set.unregister("SQ").unwrap();
        assert_eq!(target.name, "square");
        assert!(!set.contains("sq"));
        assert!(set.get("square").is_some());
        assert_eq!(set.canonical_name("pow2"), Some("square"));
    }

    #[test]
    fn similar_names() {
        let mut set = set();
        set.register(Function::new("squares", Arity::ANY, |_, ctxt| Ok(ctxt.float(0)))).unwrap();
        set.add_alias("squarr", "square").unwrap();
        assert_eq!(set.similar("squar"), vec!["square", "squarr"]);
        assert_eq!(set.similar("cube"), Vec::<String>::new());
    }
}
