//! Font patterns, substitution rules, scanning and matching.
//!
//! A [`Pattern`] is a set of typed properties describing either a font or a
//! request for one. Font files are turned into patterns by the [`Scanner`],
//! collected into a [`FontSet`] and persisted with [`FontSet::dump`]. A
//! [`Config`] holds substitution rules and the available fonts, and answers
//! queries with [`Config::font_match`] and [`Config::font_sort`].

mod cache;
mod charset;
mod config;
mod error;
mod expr;
mod fontset;
mod list;
mod matching;
mod name;
mod object;
mod pattern;
mod rule;
mod text;
mod value;

pub mod constants;
pub mod lang;
pub mod scan;

pub use charset::{Charset, Leaf, MAX_CHAR};
pub use config::Config;
pub use error::{ConfigError, Error, GetError, Result};
pub use expr::{BinaryOp, CompareOp, Expr, Opcode, UnaryOp};
pub use fontset::FontSet;
pub use lang::{lang_compare, LangResult, Langset};
pub use list::{ValueElt, ValueList};
pub use matching::{score, Score};
pub use object::{Constraint, Object, ObjectRegistry};
pub use pattern::Pattern;
pub use rule::{Directive, Edit, EditOp, MatchKind, Qualifier, RuleSet, Test};
pub use scan::Scanner;
pub use value::{Binding, BoolValue, Matrix, Range, Value, ValueType};
