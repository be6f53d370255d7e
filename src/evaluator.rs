use crate::environment::{Environment, UnknownSymbol};
use crate::types::{pretty_print_args, Closure, LispObject, PrimitiveFn, TypeMismatch};
use crate::{environment, special_forms, types};

use std::fmt;
use std::ops::Range;
use std::rc::Rc;

pub type Result<T = LispObject> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnknownSymbol(environment::UnknownSymbol),
    Define(special_forms::DefineError),
    Set(special_forms::SetError),
    Lambda(special_forms::LambdaError),
    TypeMismatch(types::TypeMismatch),
    BadArgCount(types::BadArgCount),
    BadIndex(isize, Range<usize>),
    DivideByZero,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(UnknownSymbol(s)) => write!(f, "'{}' not found", s),
            Error::Define(e) => write!(f, "define: {:?}", e),
            Error::Set(e) => write!(f, "set!: {:?}", e),
            Error::Lambda(e) => write!(f, "lambda: {:?}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {:?}", e),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::BadIndex(i, r) => {
                write!(f, "bad index: {} not in range [{}, {})", i, r.start, r.end)
            }
            Error::DivideByZero => write!(f, "cannot divide by zero!"),
        }
    }
}

impl From<types::TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

/// Evaluate an expression against an environment.
///
/// This is a plain recursive descent over the tree: no tail-call
/// optimisation, so deeply recursive user programs are bounded by the host
/// call stack. That is a known limitation, not a managed error.
pub fn eval(ast: &LispObject, env: &Rc<Environment>) -> Result {
    log::trace!("eval {:?}", ast);
    match ast {
        LispObject::Symbol(s) => env.fetch(s).map_err(Error::UnknownSymbol),
        LispObject::List(forms) => apply_form(forms, env),
        _ => Ok(ast.clone()),
    }
}

fn apply_form(forms: &[LispObject], env: &Rc<Environment>) -> Result {
    if forms.is_empty() {
        return Ok(LispObject::new_list());
    }
    if let LispObject::Symbol(name) = &forms[0] {
        match name.as_ref() {
            "quote" => return special_forms::apply_quote(&forms[1..]),
            "if" => return special_forms::apply_if(&forms[1..], env),
            "define" => return special_forms::apply_define(&forms[1..], env),
            "set!" => return special_forms::apply_set(&forms[1..], env),
            "lambda" => return special_forms::apply_lambda(&forms[1..], env),
            // Any other initial symbol is an ordinary call, handled below.
            _ => (),
        };
    };
    let evaluated = evaluate_sequence_elementwise(forms, env)?;
    let (callable, args) = evaluated.split_first().unwrap();
    apply(callable, args)
}

/// Invoke a callable value with already-evaluated arguments. Also the engine
/// behind the `apply` and `map` primitives.
pub(crate) fn apply(callable: &LispObject, args: &[LispObject]) -> Result {
    match callable {
        LispObject::Primitive(f) => call_primitive(f, args),
        LispObject::Closure(f) => call_closure(f, args),
        _ => Err(Error::TypeMismatch(TypeMismatch::NotCallable)),
    }
}

pub fn evaluate_sequence_elementwise(
    seq: &[LispObject],
    env: &Rc<Environment>,
) -> std::result::Result<Vec<LispObject>, Error> {
    let mapped: std::result::Result<Vec<LispObject>, Error> =
        seq.iter().map(|obj| eval(obj, env)).collect();
    mapped
}

pub fn call_primitive(func: &'static PrimitiveFn, args: &[LispObject]) -> Result {
    func.arity
        .validate_for(args.len(), func.name)
        .map_err(Error::BadArgCount)?;
    log::trace!("call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("call to {} failed: {}", func.name, e),
    }
    result
}

fn call_closure(func: &Closure, args: &[LispObject]) -> Result {
    log::trace!("call closure with {}", pretty_print_args(args));
    // No arity check: parameters zip with arguments pairwise and the shorter
    // side wins, as in the environment's binding policy.
    let env = Environment::with_bindings(&func.parameters, args, &func.parent);
    eval(&func.body, &env)
}
