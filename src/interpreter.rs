use crate::environment::Environment;
use crate::{evaluator, printer, reader, LispObject};
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<LispObject, Error>;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

pub fn parse(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

pub fn eval(obj: &LispObject, env: &Rc<Environment>) -> Result {
    evaluator::eval(obj, env).map_err(Error::Eval)
}

/// Read-evaluate-print for one line. `None` means the result is unspecified
/// and the REPL should print nothing, e.g. after a `define`.
pub fn rep(line: &str, env: &Rc<Environment>) -> std::result::Result<Option<String>, Error> {
    let value = parse(line).and_then(|ast| eval(&ast, env))?;
    match value {
        LispObject::Unspecified => Ok(None),
        obj => Ok(Some(printer::pr_str(&obj))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rep_prints_values_and_swallows_definitions() {
        let env = Rc::new(Environment::default());
        assert_eq!(rep("(define x 2)", &env).unwrap(), None);
        assert_eq!(rep("(* x 21)", &env).unwrap(), Some(String::from("42")));
    }

    #[test]
    fn rep_surfaces_both_error_kinds() {
        let env = Rc::new(Environment::default());
        assert!(matches!(rep("(", &env), Err(Error::Read(_))));
        assert!(matches!(rep("(bogus)", &env), Err(Error::Eval(_))));
    }
}
