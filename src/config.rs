//! Configuration state and pattern substitution.

use super::constants;
use super::error::ConfigError;
use super::expr::{compare_value, EvalContext, Opcode};
use super::fontset::FontSet;
use super::lang::{self, Langset};
use super::list::ValueList;
use super::object::{Object, ObjectRegistry};
use super::pattern::Pattern;
use super::rule::{Directive, Edit, EditOp, MatchKind, Qualifier, RuleSet, Test};
use super::text;
use super::value::{Binding, Value};
use hashbrown::HashMap;
use once_cell::sync::Lazy;

static PRGNAME: Lazy<Option<String>> = Lazy::new(|| {
    let arg0 = std::env::args_os().next()?;
    let name = std::path::Path::new(&arg0).file_name()?;
    Some(name.to_string_lossy().into_owned())
});

/// Rules, custom objects and fonts used for substitution and matching.
///
/// A configuration is read-only once built and may be shared between
/// threads.
#[derive(Clone, Debug)]
pub struct Config {
    rule_sets: Vec<RuleSet>,
    registry: ObjectRegistry,
    max_custom: usize,
    default_langs: Option<Vec<String>>,
    prgname: Option<String>,
    fonts: FontSet,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self {
            rule_sets: Vec::new(),
            registry: ObjectRegistry::new(),
            max_custom: 0,
            default_langs: None,
            prgname: (*PRGNAME).clone(),
            fonts: FontSet::new(),
        }
    }

    /// Uses the given languages instead of those from the environment.
    pub fn with_default_langs<S: Into<String>>(mut self, langs: impl IntoIterator<Item = S>) -> Self {
        self.default_langs = Some(langs.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the program name added to queries. `None` disables it.
    pub fn with_prgname(mut self, name: Option<&str>) -> Self {
        self.prgname = name.map(String::from);
        self
    }

    /// Returns the default languages.
    pub fn default_langs(&self) -> &[String] {
        match &self.default_langs {
            Some(langs) => langs,
            None => lang::default_langs(),
        }
    }

    /// Registers a custom object.
    ///
    /// Registering the same custom name twice returns the same object; the
    /// names of built-in objects are rejected.
    pub fn register_object(&mut self, name: &str) -> Result<Object, ConfigError> {
        if Object::from_name(name).is_some() {
            return Err(ConfigError::DuplicateObject(name.to_owned()));
        }
        Ok(self.registry.register(name))
    }

    /// Returns the built-in or custom object with the given name.
    pub fn object_from_name(&self, name: &str) -> Result<Object, ConfigError> {
        self.registry
            .lookup(name)
            .ok_or_else(|| ConfigError::UnknownObject(name.to_owned()))
    }

    /// Returns the custom object registry.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Appends a rule set. Rule sets are applied in insertion order.
    pub fn add_rule_set(&mut self, rules: RuleSet) {
        let max = rules.max_object();
        if let Some(offset) = max.0.checked_sub(Object::FIRST_CUSTOM) {
            self.max_custom = self.max_custom.max(offset as usize);
        }
        self.rule_sets.push(rules);
    }

    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    /// Replaces the application font set.
    pub fn set_fonts(&mut self, fonts: FontSet) {
        self.fonts = fonts;
    }

    pub fn add_font(&mut self, font: Pattern) {
        self.fonts.push(font);
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Applies the rules of the given kind to `pattern`.
    ///
    /// When substituting a result, `query` is the pattern that was matched
    /// and is visible to tests and fields that target the query.
    pub fn substitute(&self, pattern: &mut Pattern, query: Option<&Pattern>, kind: MatchKind) {
        if kind == MatchKind::Query {
            self.substitute_lang(pattern);
            if !pattern.contains(Object::PRGNAME) {
                if let Some(name) = &self.prgname {
                    pattern.add(Object::PRGNAME, name.as_str(), true);
                }
            }
        }
        let size = Object::FIRST_CUSTOM as usize + self.max_custom + 2;
        let mut scratch = Scratch {
            value_pos: vec![None; size],
            tst: vec![None; size],
        };
        let mut table = FamilyTable::new(pattern);
        for rules in self.rule_sets.iter().filter(|rules| rules.enabled) {
            for directive in rules.directives() {
                if directive.kind != kind {
                    continue;
                }
                scratch.reset();
                let cx = Substitution {
                    kind,
                    query,
                    directive,
                };
                if !cx.run_tests(pattern, &table, &mut scratch) {
                    continue;
                }
                log::debug!("rule set {:?}: directive matched", rules.name);
                for edit in &directive.edits {
                    cx.apply_edit(pattern, edit, &mut table, &mut scratch);
                }
            }
        }
    }

    /// Adds the default languages to `LANG` unless one of them, or `und`,
    /// is already requested.
    fn substitute_lang(&self, pattern: &mut Pattern) {
        let und: Langset = ["und"].into_iter().collect();
        for lang in self.default_langs() {
            let wanted: Langset = [lang.as_str()].into_iter().collect();
            let present = pattern.get(Object::LANG).map_or(false, |list| {
                list.values().any(|v| match v {
                    Value::Langset(ls) => ls.includes(&wanted) || ls.includes(&und),
                    Value::String(s) => {
                        text::eq_ignore_case(s, lang) || text::eq_ignore_case(s, "und")
                    }
                    _ => false,
                })
            });
            if present {
                break;
            }
            pattern.add_weak(Object::LANG, lang.as_str(), true);
        }
    }

    /// Adds weak defaults for the objects used by matching.
    pub fn default_substitute(&self, pattern: &mut Pattern) {
        add_default(pattern, Object::WEIGHT, constants::WEIGHT_REGULAR.into());
        add_default(pattern, Object::SLANT, constants::SLANT_ROMAN.into());
        add_default(pattern, Object::WIDTH, constants::WIDTH_NORMAL.into());
        let size = match pattern.get_at(Object::SIZE, 0) {
            Ok(Value::Range(r)) => (r.begin + r.end) / 2.0,
            Ok(v) => v.as_f64().unwrap_or(12.0),
            Err(_) => 12.0,
        };
        add_default(pattern, Object::SIZE, size.into());
        add_default(pattern, Object::SCALE, 1.0.into());
        add_default(pattern, Object::DPI, 75.0.into());
        if !pattern.contains(Object::PIXEL_SIZE) {
            let scale = pattern.get_float(Object::SCALE, 0).unwrap_or(1.0);
            let dpi = pattern.get_float(Object::DPI, 0).unwrap_or(75.0);
            pattern.add_weak(Object::PIXEL_SIZE, size * scale * dpi / 72.0, true);
        }
        add_default(pattern, Object::FONT_VERSION, constants::FONT_VERSION_ANY.into());
        add_default(pattern, Object::HINTING, true.into());
        add_default(pattern, Object::VERTICAL_LAYOUT, false.into());
        add_default(pattern, Object::AUTOHINT, false.into());
        if !pattern.contains(Object::NAME_LANG) {
            let lang = self.default_langs().first().map_or("en", |s| s.as_str());
            pattern.add_weak(Object::NAME_LANG, lang, true);
        }
        let namelang = pattern
            .get_string(Object::NAME_LANG, 0)
            .map(String::from)
            .unwrap_or_else(|_| "en".into());
        for object in [Object::FAMILY_LANG, Object::STYLE_LANG, Object::FULLNAME_LANG] {
            if !pattern.contains(object) {
                pattern.add_weak(object, namelang.as_str(), true);
                pattern.add_weak(object, "en-us", true);
            }
        }
    }
}

fn add_default(pattern: &mut Pattern, object: Object, value: Value) {
    if !pattern.contains(object) {
        pattern.add_weak(object, value, true);
    }
}

/// Per-directive state: the matched value position and the test that
/// claimed each object.
struct Scratch<'a> {
    value_pos: Vec<Option<usize>>,
    tst: Vec<Option<&'a Test>>,
}

impl Scratch<'_> {
    fn reset(&mut self) {
        self.value_pos.fill(None);
        self.tst.fill(None);
    }

    fn pos(&self, object: Object) -> Option<usize> {
        self.value_pos.get(object.0 as usize).copied().flatten()
    }

    fn set_pos(&mut self, object: Object, pos: Option<usize>) {
        if let Some(slot) = self.value_pos.get_mut(object.0 as usize) {
            *slot = pos;
        }
    }
}

/// Family names of the pattern being substituted, counted by their case
/// folded and blank stripped forms.
struct FamilyTable {
    by_case: HashMap<String, usize>,
    by_blanks: HashMap<String, usize>,
}

impl FamilyTable {
    fn new(pattern: &Pattern) -> Self {
        let mut table = Self {
            by_case: HashMap::new(),
            by_blanks: HashMap::new(),
        };
        if let Some(list) = pattern.get(Object::FAMILY) {
            for name in list.values().filter_map(Value::as_str) {
                table.add(name);
            }
        }
        table
    }

    fn add(&mut self, name: &str) {
        *self.by_case.entry(text::fold_key(name, false)).or_default() += 1;
        *self.by_blanks.entry(text::fold_key(name, true)).or_default() += 1;
    }

    fn del(&mut self, name: &str) {
        for (map, key) in [
            (&mut self.by_case, text::fold_key(name, false)),
            (&mut self.by_blanks, text::fold_key(name, true)),
        ] {
            if let Some(count) = map.get_mut(&key) {
                *count -= 1;
                if *count == 0 {
                    map.remove(&key);
                }
            }
        }
    }

    fn contains(&self, name: &str, ignore_blanks: bool) -> bool {
        if ignore_blanks {
            self.by_blanks.contains_key(&text::fold_key(name, true))
        } else {
            self.by_case.contains_key(&text::fold_key(name, false))
        }
    }
}

/// State shared by the tests and edits of one directive.
struct Substitution<'a> {
    kind: MatchKind,
    query: Option<&'a Pattern>,
    directive: &'a Directive,
}

impl<'a> Substitution<'a> {
    fn run_tests(&self, pattern: &Pattern, table: &FamilyTable, scratch: &mut Scratch<'a>) -> bool {
        let cx = EvalContext {
            kind: self.kind,
            pattern,
            query: self.query,
        };
        for test in &self.directive.tests {
            let test_kind = test.kind.unwrap_or(self.directive.kind);
            let same_kind = test_kind == self.kind;
            let (target, table) = if self.kind == MatchKind::Result && test_kind == MatchKind::Query {
                (self.query, None)
            } else {
                (Some(pattern), Some(table))
            };
            let idx = test.object.0 as usize;
            if same_kind {
                if let Some(slot) = scratch.tst.get_mut(idx) {
                    if slot.is_none() {
                        *slot = Some(test);
                    }
                }
            }
            let Some(list) = target.and_then(|p| p.get(test.object)) else {
                if test.qualifier == Qualifier::All {
                    scratch.set_pos(test.object, None);
                    continue;
                }
                log::trace!("test on {} failed: object absent", test.object);
                return false;
            };
            let pos = match_value_list(&cx, test, list, table);
            if same_kind && scratch.pos(test.object).is_none() {
                scratch.set_pos(test.object, pos);
            }
            let passed = match (pos, test.qualifier) {
                (None, _) => false,
                (Some(p), Qualifier::First) => p == 0,
                (Some(p), Qualifier::NotFirst) => p != 0,
                _ => true,
            };
            log::trace!("test on {}: {}", test.object, if passed { "passed" } else { "failed" });
            if !passed {
                return false;
            }
        }
        true
    }

    fn apply_edit(
        &self,
        pattern: &mut Pattern,
        edit: &Edit,
        table: &mut FamilyTable,
        scratch: &mut Scratch<'a>,
    ) {
        let object = edit.object;
        let cx = EvalContext {
            kind: self.kind,
            pattern: &*pattern,
            query: self.query,
        };
        let mut list = edit.expr.eval_list(&cx, edit.binding);
        list.retain(|elt| {
            let ok = object.accepts(&elt.value);
            if !ok {
                log::warn!(
                    "skipping {} value in edit of {object}",
                    elt.value.ty().name()
                );
            }
            ok
        });
        let len = pattern.get(object).map_or(0, |l| l.len());
        let pos = scratch.pos(object).filter(|&p| p < len);
        let mut edits = ListEdit {
            pattern,
            object,
            table,
        };
        let new_pos = match (edit.op, pos) {
            (EditOp::Assign, Some(p)) => {
                let inserted = list.len();
                edits.insert(p + 1, list, Some(p));
                edits.delete(p);
                (inserted != 0).then_some(p)
            }
            (EditOp::Assign, None) | (EditOp::AssignReplace, _) => {
                edits.delete_all();
                edits.insert(0, list, None);
                None
            }
            (EditOp::Prepend, Some(p)) => {
                let inserted = list.len();
                edits.insert(p, list, Some(p));
                Some(p + inserted)
            }
            (EditOp::Prepend, None) | (EditOp::PrependFirst, _) => {
                let inserted = list.len();
                edits.insert(0, list, None);
                pos.map(|p| p + inserted)
            }
            (EditOp::Append, Some(p)) => {
                edits.insert(p + 1, list, Some(p));
                Some(p)
            }
            (EditOp::Append, None) | (EditOp::AppendLast, _) => {
                edits.insert(len, list, None);
                pos
            }
            (EditOp::Delete, Some(p)) => {
                edits.delete(p);
                None
            }
            (EditOp::Delete, None) | (EditOp::DeleteAll, _) => {
                edits.delete_all();
                None
            }
        };
        scratch.set_pos(object, new_pos);
        pattern.canon(object);
    }
}

/// Inserts and removes values of one object, keeping the family table in
/// sync.
struct ListEdit<'p, 't> {
    pattern: &'p mut Pattern,
    object: Object,
    table: &'t mut FamilyTable,
}

impl ListEdit<'_, '_> {
    /// Inserts `values` at `index`. Values bound as `Same` take the binding
    /// of the element at `anchor`, or weak without one.
    fn insert(&mut self, index: usize, mut values: ValueList, anchor: Option<usize>) {
        if values.is_empty() {
            return;
        }
        let list = self.pattern.list_mut(self.object);
        let same = anchor
            .and_then(|a| list.get(a))
            .map_or(Binding::Weak, |elt| elt.binding);
        for elt in values.iter_mut() {
            if elt.binding == Binding::Same {
                elt.binding = same;
            }
        }
        if self.object == Object::FAMILY {
            for name in values.values().filter_map(Value::as_str) {
                self.table.add(name);
            }
        }
        list.insert_list(index.min(list.len()), values);
    }

    fn delete(&mut self, index: usize) {
        let list = self.pattern.list_mut(self.object);
        if index >= list.len() {
            return;
        }
        let elt = list.remove(index);
        if self.object == Object::FAMILY {
            if let Some(name) = elt.value.as_str() {
                self.table.del(name);
            }
        }
    }

    fn delete_all(&mut self) {
        if self.object == Object::FAMILY {
            if let Some(list) = self.pattern.get(Object::FAMILY) {
                for name in list.values().filter_map(Value::as_str) {
                    self.table.del(name);
                }
            }
        }
        self.pattern.del(self.object);
    }
}

/// Returns the position of the value that satisfies `test`, if any.
///
/// Each element of a comma list in the test expression is tried in turn.
fn match_value_list(
    cx: &EvalContext,
    test: &Test,
    values: &ValueList,
    table: Option<&FamilyTable>,
) -> Option<usize> {
    let mut ret = None;
    for expr in test.expr.items() {
        let value = expr.eval(cx);
        if test.object == Object::FAMILY {
            if let (Some(table), Some(name)) = (table, value.as_str()) {
                let known = table.contains(name, test.op.ignore_blanks);
                // Shortcut only: an unknown name cannot match any value below.
                match test.op.opcode {
                    Opcode::Equal | Opcode::Listing if !known => continue,
                    Opcode::NotEqual if test.qualifier == Qualifier::All => {
                        return (!known).then_some(0);
                    }
                    _ => {}
                }
            }
        }
        for (i, v) in values.values().enumerate() {
            if compare_value(v, test.op, &value) {
                if ret.is_none() {
                    ret = Some(i);
                }
                if test.qualifier != Qualifier::All {
                    break;
                }
            } else if test.qualifier == Qualifier::All {
                ret = None;
                break;
            }
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{CompareOp, Expr, Opcode};

    fn config(directives: Vec<Directive>) -> Config {
        let mut rules = RuleSet::new("test");
        for d in directives {
            rules.add(d).unwrap();
        }
        let mut config = Config::new()
            .with_default_langs(["en"])
            .with_prgname(None);
        config.add_rule_set(rules);
        config
    }

    fn families(pat: &Pattern) -> Vec<String> {
        pat.get(Object::FAMILY)
            .map(|l| l.values().filter_map(|v| v.as_str()).map(String::from).collect())
            .unwrap_or_default()
    }

    fn family_test(name: &str) -> Test {
        Test::new(Object::FAMILY, Opcode::Equal, Expr::value(name))
    }

    fn family_edit(op: EditOp, names: &[&str]) -> Edit {
        Edit::new(
            Object::FAMILY,
            op,
            Expr::list(names.iter().map(|n| Expr::value(*n))),
        )
    }

    fn query(names: &[&str]) -> Pattern {
        let mut pat = Pattern::new();
        for name in names {
            pat.add(Object::FAMILY, *name, true);
        }
        pat
    }

    fn run(op: EditOp, names: &[&str]) -> Vec<String> {
        let config = config(vec![Directive::new(MatchKind::Query)
            .test(family_test("b"))
            .edit(family_edit(op, &["x", "y"]))]);
        let mut pat = query(names);
        config.substitute(&mut pat, None, MatchKind::Query);
        families(&pat)
    }

    #[test_log::test]
    fn edit_operations() {
        assert_eq!(run(EditOp::Assign, &["a", "b", "c"]), ["a", "x", "y", "c"]);
        assert_eq!(run(EditOp::AssignReplace, &["a", "b", "c"]), ["x", "y"]);
        assert_eq!(run(EditOp::Prepend, &["a", "b", "c"]), ["a", "x", "y", "b", "c"]);
        assert_eq!(run(EditOp::PrependFirst, &["a", "b", "c"]), ["x", "y", "a", "b", "c"]);
        assert_eq!(run(EditOp::Append, &["a", "b", "c"]), ["a", "b", "x", "y", "c"]);
        assert_eq!(run(EditOp::AppendLast, &["a", "b", "c"]), ["a", "b", "c", "x", "y"]);
        assert_eq!(run(EditOp::Delete, &["a", "b", "c"]), ["a", "c"]);
        assert_eq!(run(EditOp::DeleteAll, &["a", "b", "c"]), Vec::<String>::new());
        assert_eq!(run(EditOp::Append, &["a", "c"]), ["a", "c"]);
    }

    #[test_log::test]
    fn edits_without_match_position_fall_through() {
        let config = config(vec![Directive::new(MatchKind::Query)
            .test(Test::new(Object::WEIGHT, Opcode::Equal, Expr::named("bold")))
            .edit(family_edit(EditOp::Append, &["z"]))
            .edit(family_edit(EditOp::Prepend, &["w"]))]);
        let mut pat = query(&["a"]);
        pat.add(Object::WEIGHT, 200, true);
        config.substitute(&mut pat, None, MatchKind::Query);
        assert_eq!(families(&pat), ["w", "a", "z"]);
    }

    #[test_log::test]
    fn assign_keeps_position_for_following_edits() {
        let config = config(vec![Directive::new(MatchKind::Query)
            .test(family_test("b"))
            .edit(family_edit(EditOp::Assign, &["x"]))
            .edit(family_edit(EditOp::Append, &["y"]))]);
        let mut pat = query(&["a", "b", "c"]);
        config.substitute(&mut pat, None, MatchKind::Query);
        assert_eq!(families(&pat), ["a", "x", "y", "c"]);
    }

    #[test_log::test]
    fn same_binding_follows_matched_value() {
        let config = config(vec![Directive::new(MatchKind::Query)
            .test(family_test("b"))
            .edit(family_edit(EditOp::Append, &["x"]).with_binding(Binding::Same))
            .edit(family_edit(EditOp::AppendLast, &["y"]).with_binding(Binding::Same))]);
        let mut pat = query(&["b"]);
        config.substitute(&mut pat, None, MatchKind::Query);
        let list = pat.get(Object::FAMILY).unwrap();
        assert_eq!(list.get(1).unwrap().binding, Binding::Strong);
        assert_eq!(list.get(2).unwrap().binding, Binding::Weak);
    }

    #[test_log::test]
    fn qualifiers() {
        let check = |qualifier, names: &[&str]| {
            let config = config(vec![Directive::new(MatchKind::Query)
                .test(family_test("b").with_qualifier(qualifier))
                .edit(Edit::new(Object::STYLE, EditOp::Assign, Expr::value("hit")))]);
            let mut pat = query(names);
            config.substitute(&mut pat, None, MatchKind::Query);
            pat.contains(Object::STYLE)
        };
        assert!(check(Qualifier::Any, &["a", "b"]));
        assert!(!check(Qualifier::First, &["a", "b"]));
        assert!(check(Qualifier::First, &["b", "a"]));
        assert!(check(Qualifier::NotFirst, &["a", "b"]));
        assert!(!check(Qualifier::NotFirst, &["b", "a"]));
        assert!(!check(Qualifier::All, &["a", "b"]));
        assert!(check(Qualifier::All, &["b", "B"]));
    }

    #[test_log::test]
    fn absent_object_passes_only_for_all() {
        let directive = |qualifier| {
            Directive::new(MatchKind::Query)
                .test(
                    Test::new(Object::STYLE, Opcode::Equal, Expr::value("Bold"))
                        .with_qualifier(qualifier),
                )
                .edit(Edit::new(Object::WEIGHT, EditOp::Assign, Expr::named("bold")))
        };
        for (qualifier, expected) in [(Qualifier::All, true), (Qualifier::Any, false)] {
            let config = config(vec![directive(qualifier)]);
            let mut pat = query(&["a"]);
            config.substitute(&mut pat, None, MatchKind::Query);
            assert_eq!(pat.contains(Object::WEIGHT), expected);
        }
    }

    #[test_log::test]
    fn family_table_fast_paths() {
        let config = config(vec![
            Directive::new(MatchKind::Query)
                .test(Test::new(
                    Object::FAMILY,
                    Opcode::Equal,
                    Expr::list([Expr::value("missing"), Expr::value("Deja Vu")]),
                ))
                .edit(Edit::new(Object::STYLE, EditOp::Append, Expr::value("first"))),
            Directive::new(MatchKind::Query)
                .test(Test::new(
                    Object::FAMILY,
                    CompareOp::from(Opcode::Equal).ignoring_blanks(),
                    Expr::value("dejavu"),
                ))
                .edit(Edit::new(Object::STYLE, EditOp::Append, Expr::value("second"))),
            Directive::new(MatchKind::Query)
                .test(
                    Test::new(Object::FAMILY, Opcode::NotEqual, Expr::value("serif"))
                        .with_qualifier(Qualifier::All),
                )
                .edit(family_edit(EditOp::AppendLast, &["serif"])),
            Directive::new(MatchKind::Query)
                .test(
                    Test::new(Object::FAMILY, Opcode::NotEqual, Expr::value("serif"))
                        .with_qualifier(Qualifier::All),
                )
                .edit(family_edit(EditOp::AppendLast, &["never"])),
        ]);
        let mut pat = query(&["deja vu"]);
        config.substitute(&mut pat, None, MatchKind::Query);
        let styles: Vec<_> = pat
            .get(Object::STYLE)
            .unwrap()
            .values()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(styles, ["first", "second"]);
        assert_eq!(families(&pat), ["deja vu", "serif"]);
    }

    #[test_log::test]
    fn result_rules_can_test_the_query() {
        let config = config(vec![Directive::new(MatchKind::Result)
            .test(
                Test::new(Object::FAMILY, Opcode::Equal, Expr::value("mono"))
                    .on(MatchKind::Query),
            )
            .edit(Edit::new(
                Object::SPACING,
                EditOp::Assign,
                Expr::named("mono"),
            ))]);
        let query = query(&["mono"]);
        let mut font = self::query(&["DejaVu Sans Mono"]);
        config.substitute(&mut font, Some(&query), MatchKind::Result);
        assert_eq!(font.get_integer(Object::SPACING, 0), Ok(constants::MONO));
        let mut font = self::query(&["DejaVu Sans Mono"]);
        config.substitute(&mut font, Some(&query), MatchKind::Query);
        assert!(!font.contains(Object::SPACING));
    }

    #[test_log::test]
    fn ill_typed_edit_values_are_skipped() {
        let config = config(vec![Directive::new(MatchKind::Query).edit(Edit::new(
            Object::FAMILY,
            EditOp::AppendLast,
            Expr::list([Expr::field(Object::WEIGHT), Expr::value("ok")]),
        ))]);
        let mut pat = query(&["a"]);
        pat.add(Object::WEIGHT, 80, true);
        config.substitute(&mut pat, None, MatchKind::Query);
        assert_eq!(families(&pat), ["a", "ok"]);
    }

    #[test_log::test]
    fn default_languages_are_added_weakly() {
        let config = Config::new()
            .with_default_langs(["de", "en"])
            .with_prgname(Some("viewer"));
        let mut pat = Pattern::new();
        config.substitute(&mut pat, None, MatchKind::Query);
        let langs: Vec<_> = pat
            .get(Object::LANG)
            .unwrap()
            .iter()
            .map(|elt| (elt.value.as_str().unwrap(), elt.binding))
            .collect();
        assert_eq!(langs, [("de", Binding::Weak), ("en", Binding::Weak)]);
        assert_eq!(pat.get_string(Object::PRGNAME, 0), Ok("viewer"));

        let mut pat = Pattern::new();
        pat.add(Object::LANG, "de", true);
        config.substitute(&mut pat, None, MatchKind::Query);
        assert_eq!(pat.get(Object::LANG).unwrap().len(), 1);

        let mut pat = Pattern::new();
        pat.add(Object::LANG, "und", true);
        config.substitute(&mut pat, None, MatchKind::Query);
        assert_eq!(pat.get(Object::LANG).unwrap().len(), 1);
    }

    #[test]
    fn custom_objects() {
        let mut config = Config::new();
        let obj = config.register_object("myhint").unwrap();
        assert_eq!(config.object_from_name("MyHint"), Ok(obj));
        assert_eq!(
            config.object_from_name("nothing"),
            Err(ConfigError::UnknownObject("nothing".into()))
        );
        assert!(config.register_object("family").is_err());
        let mut rules = RuleSet::new("custom");
        rules
            .add(Directive::new(MatchKind::Query).edit(Edit::new(
                obj,
                EditOp::Assign,
                Expr::value(1),
            )))
            .unwrap();
        config.add_rule_set(rules);
        let mut pat = Pattern::new();
        config.substitute(&mut pat, None, MatchKind::Query);
        assert_eq!(pat.get_integer(obj, 0), Ok(1));
    }

    #[test]
    fn defaults() {
        let config = Config::new().with_default_langs(["fr"]);
        let mut pat = Pattern::new();
        pat.add(Object::SIZE, 24.0, true);
        pat.add(Object::WEIGHT, constants::WEIGHT_BOLD, true);
        config.default_substitute(&mut pat);
        assert_eq!(pat.get_integer(Object::WEIGHT, 0), Ok(constants::WEIGHT_BOLD));
        assert_eq!(pat.get_integer(Object::SLANT, 0), Ok(constants::SLANT_ROMAN));
        assert_eq!(pat.get_float(Object::PIXEL_SIZE, 0), Ok(25.0));
        assert_eq!(pat.get_string(Object::NAME_LANG, 0), Ok("fr"));
        assert_eq!(pat.get_string(Object::FAMILY_LANG, 1), Ok("en-us"));
    }
}
