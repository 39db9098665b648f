//! In-memory representation of configuration rules.

use super::error::ConfigError;
use super::expr::{CompareOp, Expr};
use super::object::Object;
use super::value::Binding;

/// Which pattern a rule applies to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MatchKind {
    /// The query before matching.
    Query,
    /// The font selected by matching.
    Result,
}

/// How the values of a list must satisfy a test.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Qualifier {
    /// Some value matches; the first one marks the edit position.
    Any,
    /// Every value matches. Also holds when the object is absent.
    All,
    /// The first value matches.
    First,
    /// Some value other than the first matches.
    NotFirst,
}

/// Condition on one object of a pattern.
#[derive(Clone, Debug)]
pub struct Test {
    /// Pattern to test. Defaults to the kind of the directive.
    pub kind: Option<MatchKind>,
    pub qualifier: Qualifier,
    pub object: Object,
    pub op: CompareOp,
    pub expr: Expr,
}

impl Test {
    /// Creates a test with the `Any` qualifier against the directive's own
    /// pattern.
    pub fn new(object: Object, op: impl Into<CompareOp>, expr: Expr) -> Self {
        Self {
            kind: None,
            qualifier: Qualifier::Any,
            object,
            op: op.into(),
            expr,
        }
    }

    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Tests the given pattern instead of the directive's own.
    pub fn on(mut self, kind: MatchKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Edit operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EditOp {
    /// Replace the matched value, or the whole list without a match.
    Assign,
    /// Replace the whole list.
    AssignReplace,
    /// Insert before the matched value, or at the front without a match.
    Prepend,
    /// Insert at the front.
    PrependFirst,
    /// Insert after the matched value, or at the end without a match.
    Append,
    /// Insert at the end.
    AppendLast,
    /// Remove the matched value, or the whole list without a match.
    Delete,
    /// Remove the whole list.
    DeleteAll,
}

/// Modification of one object.
#[derive(Clone, Debug)]
pub struct Edit {
    pub object: Object,
    pub op: EditOp,
    pub binding: Binding,
    pub expr: Expr,
}

impl Edit {
    /// Creates an edit with weak binding.
    pub fn new(object: Object, op: EditOp, expr: Expr) -> Self {
        Self {
            object,
            op,
            binding: Binding::Weak,
            expr,
        }
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Checks constant values against the type constraint of the object.
    fn validate(&self) -> Result<(), ConfigError> {
        for value in self.expr.constant_values() {
            if !self.object.accepts(value) {
                return Err(ConfigError::InvalidEditType {
                    object: self.object.to_string(),
                    found: value.ty().name(),
                });
            }
        }
        Ok(())
    }
}

/// Set of tests and the edits applied when all of them hold.
#[derive(Clone, Debug)]
pub struct Directive {
    pub kind: MatchKind,
    pub tests: Vec<Test>,
    pub edits: Vec<Edit>,
}

impl Directive {
    pub fn new(kind: MatchKind) -> Self {
        Self {
            kind,
            tests: Vec::new(),
            edits: Vec::new(),
        }
    }

    pub fn test(mut self, test: Test) -> Self {
        self.tests.push(test);
        self
    }

    pub fn edit(mut self, edit: Edit) -> Self {
        self.edits.push(edit);
        self
    }

    /// Returns the largest object referenced by the directive.
    pub(crate) fn max_object(&self) -> Object {
        self.tests
            .iter()
            .map(|t| t.object)
            .chain(self.edits.iter().map(|e| e.object))
            .max()
            .unwrap_or(Object(0))
    }
}

/// Directives from one configuration source.
#[derive(Clone, Debug)]
pub struct RuleSet {
    pub name: String,
    pub description: String,
    pub enabled: bool,
    directives: Vec<Directive>,
}

impl RuleSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: String::new(),
            enabled: true,
            directives: Vec::new(),
        }
    }

    /// Adds a directive after checking that constant edit values fit their
    /// objects.
    pub fn add(&mut self, directive: Directive) -> Result<(), ConfigError> {
        for edit in &directive.edits {
            edit.validate()?;
        }
        self.directives.push(directive);
        Ok(())
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub(crate) fn max_object(&self) -> Object {
        self.directives
            .iter()
            .map(|d| d.max_object())
            .max()
            .unwrap_or(Object(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Opcode;

    #[test]
    fn edit_types_are_checked() {
        let mut rules = RuleSet::new("test");
        let bad = Directive::new(MatchKind::Query).edit(Edit::new(
            Object::FAMILY,
            EditOp::Append,
            Expr::list([Expr::value("Foo"), Expr::value(12)]),
        ));
        assert_eq!(
            rules.add(bad),
            Err(ConfigError::InvalidEditType {
                object: "family".into(),
                found: "integer",
            })
        );
        let good = Directive::new(MatchKind::Query)
            .test(Test::new(Object::FAMILY, Opcode::Equal, Expr::value("mono")))
            .edit(Edit::new(Object::WEIGHT, EditOp::Assign, Expr::named("bold")));
        assert!(rules.add(good).is_ok());
        assert_eq!(rules.directives().len(), 1);
        assert_eq!(rules.max_object(), Object::WEIGHT);
    }
}
