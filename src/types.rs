extern crate derive_more;
use crate::environment::Environment;
use crate::{evaluator, printer};
use derive_more::{Deref, DerefMut};
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

#[derive(Deref, DerefMut, Debug)]
pub struct LispList(pub Vec<LispObject>);

pub type LispInt = i64;
pub type LispFloat = f64;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct LispSymbol(pub String);

impl AsRef<str> for LispSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LispSymbol {
    fn from(name: &str) -> Self {
        Self(String::from(name))
    }
}

impl fmt::Display for LispSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A number as seen by the arithmetic primitives. Integers survive integer
/// arithmetic; as soon as a float participates the result is a float.
#[derive(Debug, Clone, Copy)]
pub enum LispNumber {
    Int(LispInt),
    Float(LispFloat),
}

impl LispNumber {
    pub fn as_float(&self) -> LispFloat {
        match self {
            LispNumber::Int(n) => *n as LispFloat,
            LispNumber::Float(f) => *f,
        }
    }
}

impl From<LispNumber> for LispObject {
    fn from(n: LispNumber) -> Self {
        match n {
            LispNumber::Int(n) => LispObject::Integer(n),
            LispNumber::Float(f) => LispObject::Float(f),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[LispObject]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

#[derive(Clone)]
pub struct Closure {
    pub parameters: Vec<LispSymbol>,
    pub body: LispObject,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

/// An expression and a value at once. A `List` read from source is syntax; the
/// same `List` handed back by `quote` is plain data. Nothing in the type marks
/// the difference; only the evaluator's context decides.
#[derive(Debug, Clone)]
pub enum LispObject {
    /// The result of `define`, `set!` and `print`. Never shown by the REPL.
    Unspecified,
    Bool(bool),
    Integer(LispInt),
    Float(LispFloat),
    Symbol(LispSymbol),
    List(Rc<LispList>),
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

/// Only `#f`, the empty list and the unspecified value count as false.
/// Numeric zero is truthy.
pub(crate) fn truthy(obj: &LispObject) -> bool {
    use LispObject::*;
    match obj {
        Integer(_) | Float(_) | Symbol(_) | Primitive(_) | Closure(_) => true,
        List(elements) => !elements.is_empty(),
        Bool(t) => *t,
        Unspecified => false,
    }
}

pub(crate) fn callable(obj: &LispObject) -> bool {
    match obj {
        LispObject::Primitive(_) | LispObject::Closure(_) => true,
        _ => false,
    }
}

/// `eq?`: identity for lists and procedures, value equality for atoms.
pub(crate) fn identical(x: &LispObject, y: &LispObject) -> bool {
    use LispObject::*;
    match (x, y) {
        (List(a), List(b)) => Rc::ptr_eq(a, b),
        (Closure(a), Closure(b)) => Rc::ptr_eq(a, b),
        (List(_), _) | (_, List(_)) | (Closure(_), _) | (_, Closure(_)) => false,
        _ => x == y,
    }
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotANumber,
    NotAnInt,
    NotAList,
    NotASymbol,
    NotCallable,
}

impl LispObject {
    pub(crate) fn as_number(&self) -> Result<LispNumber, TypeMismatch> {
        match self {
            LispObject::Integer(n) => Ok(LispNumber::Int(*n)),
            LispObject::Float(f) => Ok(LispNumber::Float(*f)),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub(crate) fn as_int(&self) -> Result<LispInt, TypeMismatch> {
        match self {
            LispObject::Integer(n) => Ok(*n),
            _ => Err(TypeMismatch::NotAnInt),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&LispList, TypeMismatch> {
        match self {
            LispObject::List(elements) => Ok(elements),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_symbol(&self) -> Result<&LispSymbol, TypeMismatch> {
        match self {
            LispObject::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub(crate) fn is_list(&self) -> bool {
        match self {
            LispObject::List(_) => true,
            _ => false,
        }
    }

    pub(crate) fn is_number(&self) -> bool {
        match self {
            LispObject::Integer(_) | LispObject::Float(_) => true,
            _ => false,
        }
    }

    pub(crate) fn is_symbol(&self) -> bool {
        match self {
            LispObject::Symbol(_) => true,
            _ => false,
        }
    }
}

impl LispObject {
    pub(crate) fn new_list() -> Self {
        Self::List(Rc::new(LispList(Vec::new())))
    }
    pub(crate) fn wrap_list(elements: Vec<LispObject>) -> Self {
        Self::List(Rc::new(LispList(elements)))
    }
    pub(crate) fn new_symbol(name: &str) -> Self {
        Self::Symbol(LispSymbol::from(name))
    }
}

impl fmt::Display for LispObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printer::pr_str(self))
    }
}

impl PartialEq for LispObject {
    fn eq(&self, other: &Self) -> bool {
        use LispObject::*;
        match (self, other) {
            (Integer(x), Integer(y)) => x == y,
            (Float(x), Float(y)) => x == y,
            // `(= 1 1.0)` holds, as in the numeric semantics of the host.
            (Integer(x), Float(y)) | (Float(y), Integer(x)) => (*x as LispFloat) == *y,
            (Bool(x), Bool(y)) => x == y,
            (Symbol(x), Symbol(y)) => x == y,
            (List(x), List(y)) => equal_sequences(x, y),
            (Primitive(x), Primitive(y)) => std::ptr::eq(*x, *y),
            (Closure(x), Closure(y)) => Rc::ptr_eq(x, y),
            (Unspecified, Unspecified) => true,
            (_, _) => false,
        }
    }
}

fn equal_sequences(xs: &[LispObject], ys: &[LispObject]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x == y)
}

pub(crate) fn pretty_print_args(args: &[LispObject]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_truthy() {
        assert!(truthy(&LispObject::Integer(0)));
        assert!(truthy(&LispObject::Float(0.0)));
    }

    #[test]
    fn empty_list_and_false_are_falsey() {
        assert!(!truthy(&LispObject::new_list()));
        assert!(!truthy(&LispObject::Bool(false)));
        assert!(!truthy(&LispObject::Unspecified));
        assert!(truthy(&LispObject::wrap_list(vec![LispObject::Integer(1)])));
    }

    #[test]
    fn cross_type_numeric_equality() {
        assert_eq!(LispObject::Integer(1), LispObject::Float(1.0));
        assert_ne!(LispObject::Integer(1), LispObject::Float(1.5));
    }

    #[test]
    fn identity_distinguishes_equal_lists() {
        let a = LispObject::wrap_list(vec![LispObject::Integer(1)]);
        let b = LispObject::wrap_list(vec![LispObject::Integer(1)]);
        assert_eq!(a, b);
        assert!(!identical(&a, &b));
        assert!(identical(&a, &a.clone()));
    }
}
