//! Rule expressions and value comparison.

use super::constants;
use super::lang::Langset;
use super::list::{ValueElt, ValueList};
use super::object::Object;
use super::pattern::Pattern;
use super::rule::MatchKind;
use super::text;
use super::value::{Binding, BoolValue, Matrix, Value};
use std::sync::Arc;

/// Comparison operator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    More,
    MoreEqual,
    Contains,
    NotContains,
    /// Like `Equal` for strings, like `Contains` for sets.
    Listing,
}

/// Comparison operator with its flags.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CompareOp {
    pub opcode: Opcode,
    /// String comparisons ignore spaces.
    pub ignore_blanks: bool,
}

impl CompareOp {
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            ignore_blanks: false,
        }
    }

    /// Returns the operator with blank insensitive string comparison.
    pub const fn ignoring_blanks(self) -> Self {
        Self {
            opcode: self.opcode,
            ignore_blanks: true,
        }
    }
}

impl From<Opcode> for CompareOp {
    fn from(opcode: Opcode) -> Self {
        Self::new(opcode)
    }
}

/// Arithmetic and logical binary operators.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Or,
    And,
    Plus,
    Minus,
    Times,
    Divide,
}

/// Unary numeric and logical functions.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Not,
    Floor,
    Ceil,
    Round,
    Trunc,
}

/// Expression tree used by rule tests and edits.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Literal value. `Value::Void` is the nil constant.
    Const(Value),
    /// Matrix whose elements are computed.
    Matrix(Box<[Expr; 4]>),
    /// First value of an object, optionally taken from a specific pattern.
    Field {
        object: Object,
        target: Option<MatchKind>,
    },
    /// Named constant such as `bold`.
    Named(String),
    /// `cond ? then : else`
    Quest(Box<Expr>, Box<Expr>, Box<Expr>),
    Compare(CompareOp, Box<Expr>, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    /// Value list separator.
    Comma(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Const(value.into())
    }

    pub fn field(object: Object) -> Self {
        Self::Field {
            object,
            target: None,
        }
    }

    pub fn named(name: &str) -> Self {
        Self::Named(name.to_owned())
    }

    pub fn compare(op: impl Into<CompareOp>, left: Expr, right: Expr) -> Self {
        Self::Compare(op.into(), Box::new(left), Box::new(right))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Self::Unary(op, Box::new(expr))
    }

    pub fn quest(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Self::Quest(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    /// Builds a comma list from the given expressions.
    pub fn list(exprs: impl IntoIterator<Item = Expr>) -> Self {
        let mut exprs: Vec<_> = exprs.into_iter().collect();
        let mut tail = exprs.pop().unwrap_or(Self::Const(Value::Void));
        while let Some(head) = exprs.pop() {
            tail = Self::Comma(Box::new(head), Box::new(tail));
        }
        tail
    }

    /// Returns the constant value if the expression is a plain constant or a
    /// list of constants. Used to type check edits up front.
    pub(crate) fn constant_values(&self) -> Vec<&Value> {
        match self {
            Self::Const(v) => vec![v],
            Self::Comma(l, r) => {
                let mut values = l.constant_values();
                values.extend(r.constant_values());
                values
            }
            _ => Vec::new(),
        }
    }

    /// Evaluates the expression to a single value.
    pub fn eval(&self, cx: &EvalContext) -> Value {
        match self {
            Self::Const(v) => v.clone(),
            Self::Matrix(elts) => {
                let mut m = [0.0; 4];
                for (dst, expr) in m.iter_mut().zip(elts.iter()) {
                    match expr.eval(cx).as_f64() {
                        Some(v) => *dst = v,
                        None => return Value::Void,
                    }
                }
                Value::Matrix(Matrix {
                    xx: m[0],
                    xy: m[1],
                    yx: m[2],
                    yy: m[3],
                })
            }
            Self::Field { object, target } => cx.field(*object, *target),
            Self::Named(name) => match constants::constant(name) {
                Some(c) => Value::Integer(c.value),
                None => Value::Void,
            },
            Self::Quest(cond, then, otherwise) => match cond.eval(cx) {
                Value::Bool(BoolValue::False) => otherwise.eval(cx),
                Value::Bool(_) => then.eval(cx),
                _ => Value::Void,
            },
            Self::Compare(op, l, r) => {
                let left = l.eval(cx);
                let right = r.eval(cx);
                Value::Bool(compare_value(&left, *op, &right).into())
            }
            Self::Binary(op, l, r) => binary(*op, l.eval(cx), r.eval(cx)),
            Self::Unary(op, e) => unary(*op, e.eval(cx)),
            Self::Comma(l, _) => l.eval(cx),
        }
    }

    /// Returns the elements of a comma list. Any other expression is a list
    /// of one.
    pub(crate) fn items(&self) -> Vec<&Expr> {
        let mut items = Vec::new();
        let mut expr = self;
        while let Self::Comma(l, r) = expr {
            items.push(&**l);
            expr = &**r;
        }
        items.push(expr);
        items
    }

    /// Evaluates the expression to a list of values with the given binding.
    ///
    /// Each comma separated element contributes one value; void values are
    /// dropped.
    pub fn eval_list(&self, cx: &EvalContext, binding: Binding) -> ValueList {
        self.items()
            .into_iter()
            .map(|e| e.eval(cx))
            .filter(|v| !matches!(v, Value::Void))
            .map(|v| ValueElt::new(v, binding))
            .collect()
    }
}

/// Patterns visible to an expression.
pub struct EvalContext<'a> {
    /// Kind of substitution in progress.
    pub kind: MatchKind,
    /// Pattern being edited.
    pub pattern: &'a Pattern,
    /// Original query while substituting a result.
    pub query: Option<&'a Pattern>,
}

impl EvalContext<'_> {
    fn field(&self, object: Object, target: Option<MatchKind>) -> Value {
        let source = match (self.kind, target) {
            (MatchKind::Result, Some(MatchKind::Query)) => self.query.unwrap_or(self.pattern),
            (MatchKind::Query, Some(MatchKind::Result)) => {
                log::warn!("font field {object} referenced while substituting a query");
                return Value::Void;
            }
            _ => self.pattern,
        };
        source
            .get_at(object, 0)
            .cloned()
            .unwrap_or(Value::Void)
    }
}

fn truthy(b: BoolValue) -> bool {
    b != BoolValue::False
}

/// Converts `v` to the type it must have to be combined with `other`.
fn promote(v: Value, other: &Value) -> Value {
    match (v, other) {
        (Value::Integer(i), Value::Range(_)) => Value::Range(super::value::Range::point(i as f64)),
        (Value::Integer(i), _) => Value::Float(i as f64),
        (Value::Float(f), Value::Range(_)) => Value::Range(super::value::Range::point(f)),
        (Value::String(s), Value::Langset(_)) => {
            let mut set = Langset::new();
            set.add(&s);
            Value::Langset(Arc::new(set))
        }
        (Value::Void, Value::Matrix(_)) => Value::Matrix(Matrix::IDENTITY),
        (v, _) => v,
    }
}

fn promote_pair(left: &Value, right: &Value) -> (Value, Value) {
    let l = promote(left.clone(), right);
    let r = promote(right.clone(), &l);
    (l, r)
}

fn binary(op: BinaryOp, left: Value, right: Value) -> Value {
    use BinaryOp::*;
    let (l, r) = promote_pair(&left, &right);
    match (l, r) {
        (Value::Float(a), Value::Float(b)) => {
            let v = match op {
                Plus => a + b,
                Minus => a - b,
                Times => a * b,
                Divide => a / b,
                _ => return Value::Void,
            };
            if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
                Value::Integer(v as i32)
            } else {
                Value::Float(v)
            }
        }
        (Value::Bool(a), Value::Bool(b)) => match op {
            Or => Value::Bool((truthy(a) || truthy(b)).into()),
            And => Value::Bool((truthy(a) && truthy(b)).into()),
            _ => Value::Void,
        },
        (Value::String(a), Value::String(b)) => match op {
            Plus => Value::String(a + &b),
            _ => Value::Void,
        },
        (Value::Matrix(a), Value::Matrix(b)) => match op {
            Times => Value::Matrix(a.multiply(&b)),
            _ => Value::Void,
        },
        (Value::Charset(a), Value::Charset(b)) => match op {
            Plus => Value::Charset(Arc::new(a.union(&b))),
            Minus => Value::Charset(Arc::new(a.subtract(&b))),
            _ => Value::Void,
        },
        (Value::Langset(a), Value::Langset(b)) => match op {
            Plus => Value::Langset(Arc::new(a.union(&b))),
            Minus => Value::Langset(Arc::new(a.subtract(&b))),
            _ => Value::Void,
        },
        _ => Value::Void,
    }
}

fn unary(op: UnaryOp, value: Value) -> Value {
    let round = |f: f64| -> Value {
        let v = match op {
            UnaryOp::Floor => f.floor(),
            UnaryOp::Ceil => f.ceil(),
            UnaryOp::Round => (f + 0.5).floor(),
            _ => f.trunc(),
        };
        Value::Integer(v as i32)
    };
    match (op, value) {
        (UnaryOp::Not, Value::Bool(b)) => Value::Bool((!truthy(b)).into()),
        (UnaryOp::Not, _) => Value::Void,
        (_, Value::Integer(i)) => Value::Integer(i),
        (_, Value::Float(f)) => round(f),
        _ => Value::Void,
    }
}

/// Compares a pattern value on the left with a test value on the right.
pub fn compare_value(left: &Value, op: CompareOp, right: &Value) -> bool {
    use Opcode::*;
    if matches!(left, Value::Void) || matches!(right, Value::Void) {
        // Void equals everything.
        return matches!(op.opcode, Equal | Contains | Listing);
    }
    let (l, r) = promote_pair(left, right);
    let negated = matches!(op.opcode, NotEqual | NotContains);
    if l.ty() != r.ty() {
        return negated;
    }
    let positive = match (&l, &r) {
        (Value::Float(a), Value::Float(b)) => match op.opcode {
            Equal | Contains | Listing | NotEqual | NotContains => a == b,
            Less => return a < b,
            LessEqual => return a <= b,
            More => return a > b,
            MoreEqual => return a >= b,
        },
        (Value::Bool(a), Value::Bool(b)) => match op.opcode {
            Equal | Contains | Listing | NotEqual | NotContains => {
                a == b || *a == BoolValue::DontCare || *b == BoolValue::DontCare
            }
            _ => return false,
        },
        (Value::String(a), Value::String(b)) => match op.opcode {
            Equal | Listing | NotEqual => {
                if op.ignore_blanks {
                    text::eq_ignore_blanks_and_case(a, b)
                } else {
                    text::eq_ignore_case(a, b)
                }
            }
            Contains | NotContains => text::contains_ignore_case(a, b),
            _ => return false,
        },
        (Value::Matrix(a), Value::Matrix(b)) => match op.opcode {
            Equal | Contains | Listing | NotEqual | NotContains => a == b,
            _ => return false,
        },
        (Value::Charset(a), Value::Charset(b)) => match op.opcode {
            Equal | NotEqual => a.equal(b),
            Contains | Listing | NotContains => b.is_subset(a),
            _ => return false,
        },
        (Value::Langset(a), Value::Langset(b)) => match op.opcode {
            Equal | NotEqual => a.equal(b),
            Contains | Listing | NotContains => a.includes(b),
            _ => return false,
        },
        (Value::Range(a), Value::Range(b)) => match op.opcode {
            Equal | Contains | Listing | NotEqual | NotContains => {
                a.begin <= b.begin && b.end <= a.end
            }
            Less => return a.end < b.begin,
            LessEqual => return a.end <= b.begin,
            More => return a.begin > b.end,
            MoreEqual => return a.begin >= b.end,
        },
        _ => return false,
    };
    positive != negated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Charset;
    use crate::value::Range;

    fn cx(pattern: &Pattern) -> EvalContext<'_> {
        EvalContext {
            kind: MatchKind::Query,
            pattern,
            query: None,
        }
    }

    fn eq() -> CompareOp {
        Opcode::Equal.into()
    }

    #[test]
    fn string_comparison() {
        let a = Value::from("DejaVu Sans");
        assert!(compare_value(&a, eq(), &"dejavu sans".into()));
        assert!(!compare_value(&a, eq(), &"dejavusans".into()));
        assert!(compare_value(&a, eq().ignoring_blanks(), &"dejavusans".into()));
        assert!(compare_value(&a, Opcode::Contains.into(), &"SANS".into()));
        assert!(compare_value(&a, Opcode::NotEqual.into(), &"Verdana".into()));
        assert!(compare_value(&a, Opcode::NotContains.into(), &"Serif".into()));
    }

    #[test]
    fn numeric_promotion() {
        assert!(compare_value(&Value::Integer(200), eq(), &Value::Float(200.0)));
        assert!(compare_value(&Value::Integer(100), Opcode::Less.into(), &Value::Integer(200)));
        let range = Value::Range(Range::new(100.0, 200.0));
        assert!(compare_value(&range, Opcode::Contains.into(), &Value::Integer(150)));
        assert!(!compare_value(&range, eq(), &Value::Integer(250)));
        assert!(compare_value(&range, Opcode::Less.into(), &Value::Integer(250)));
        assert!(compare_value(&range, Opcode::MoreEqual.into(), &Value::Integer(50)));
    }

    #[test]
    fn mismatched_types() {
        let s = Value::from("bold");
        assert!(!compare_value(&s, eq(), &Value::Integer(200)));
        assert!(compare_value(&s, Opcode::NotEqual.into(), &Value::Integer(200)));
    }

    #[test]
    fn bools_and_void() {
        let dc = Value::Bool(BoolValue::DontCare);
        assert!(compare_value(&dc, eq(), &true.into()));
        assert!(compare_value(&true.into(), eq(), &true.into()));
        assert!(!compare_value(&false.into(), eq(), &true.into()));
        assert!(compare_value(&Value::Void, eq(), &Value::Void));
        let weight = Value::Integer(200);
        for op in [Opcode::Equal, Opcode::Contains, Opcode::Listing] {
            assert!(compare_value(&Value::Void, op.into(), &weight));
            assert!(compare_value(&weight, op.into(), &Value::Void));
        }
        for op in [Opcode::NotEqual, Opcode::NotContains, Opcode::Less, Opcode::More] {
            assert!(!compare_value(&Value::Void, op.into(), &weight));
        }
    }

    #[test]
    fn void_expression_matches_element() {
        let mut pat = Pattern::new();
        pat.add(Object::WEIGHT, 80, true);
        let void = Expr::named("wobbly").eval(&cx(&pat));
        let element = pat.get_at(Object::WEIGHT, 0).unwrap();
        assert!(compare_value(element, Opcode::Equal.into(), &void));
        assert!(!compare_value(element, Opcode::NotEqual.into(), &void));
    }

    #[test]
    fn sets() {
        let big: Charset = (0x20..0x80).collect();
        let small: Charset = (0x41..0x5B).collect();
        let big = Value::from(big);
        let small = Value::from(small);
        assert!(compare_value(&big, Opcode::Contains.into(), &small));
        assert!(!compare_value(&small, Opcode::Contains.into(), &big));
        assert!(compare_value(&small, Opcode::NotContains.into(), &big));
        let langs: Langset = ["en", "fr"].into_iter().collect();
        let langs = Value::from(langs);
        assert!(compare_value(&langs, Opcode::Contains.into(), &"en-us".into()));
        assert!(!compare_value(&langs, Opcode::Contains.into(), &"de".into()));
    }

    #[test]
    fn arithmetic() {
        let pat = Pattern::new();
        let cx = cx(&pat);
        let e = Expr::binary(BinaryOp::Times, Expr::value(2.5), Expr::value(2));
        assert!(matches!(e.eval(&cx), Value::Integer(5)));
        let e = Expr::binary(BinaryOp::Divide, Expr::value(1), Expr::value(4));
        assert!(matches!(e.eval(&cx), Value::Float(f) if f == 0.25));
        let e = Expr::binary(BinaryOp::Plus, Expr::value("Foo"), Expr::value(" Bar"));
        assert_eq!(e.eval(&cx).as_str(), Some("Foo Bar"));
        let e = Expr::binary(BinaryOp::Plus, Expr::value("Foo"), Expr::value(1));
        assert!(matches!(e.eval(&cx), Value::Void));
        let e = Expr::unary(UnaryOp::Round, Expr::value(2.5));
        assert!(matches!(e.eval(&cx), Value::Integer(3)));
        let e = Expr::unary(UnaryOp::Trunc, Expr::value(-2.5));
        assert!(matches!(e.eval(&cx), Value::Integer(-2)));
        let e = Expr::unary(UnaryOp::Floor, Expr::value(-2.5));
        assert!(matches!(e.eval(&cx), Value::Integer(-3)));
    }

    #[test]
    fn logic_and_fields() {
        let mut pat = Pattern::new();
        pat.add(Object::WEIGHT, 200, true);
        let cx = cx(&pat);
        let is_bold = Expr::compare(
            Opcode::MoreEqual,
            Expr::field(Object::WEIGHT),
            Expr::named("bold"),
        );
        let e = Expr::quest(is_bold.clone(), Expr::value("heavy"), Expr::value("light"));
        assert_eq!(e.eval(&cx).as_str(), Some("heavy"));
        let e = Expr::binary(BinaryOp::And, is_bold, Expr::unary(UnaryOp::Not, Expr::value(false)));
        assert!(matches!(e.eval(&cx), Value::Bool(BoolValue::True)));
        let font_field = Expr::Field {
            object: Object::WEIGHT,
            target: Some(MatchKind::Result),
        };
        assert!(matches!(font_field.eval(&cx), Value::Void));
        assert!(matches!(Expr::named("wobbly").eval(&cx), Value::Void));
    }

    #[test]
    fn comma_lists_drop_void() {
        let pat = Pattern::new();
        let e = Expr::list([
            Expr::value("A"),
            Expr::field(Object::FAMILY),
            Expr::value("B"),
        ]);
        let list = e.eval_list(&cx(&pat), Binding::Weak);
        let values: Vec<_> = list.values().filter_map(|v| v.as_str()).collect();
        assert_eq!(values, ["A", "B"]);
        assert!(list.iter().all(|elt| elt.binding == Binding::Weak));
    }

    #[test]
    fn matrix_expressions() {
        let pat = Pattern::new();
        let e = Expr::Matrix(Box::new([
            Expr::value(1),
            Expr::value(0.2),
            Expr::value(0),
            Expr::value(1),
        ]));
        let skew = e.eval(&cx(&pat));
        let e = Expr::binary(BinaryOp::Times, Expr::Const(skew), Expr::value(Value::Void));
        assert!(matches!(e.eval(&cx(&pat)), Value::Matrix(m) if m.xy == 0.2));
    }
}
