use crate::environment::Environment;
use crate::evaluator::{eval, Error, Result};
use crate::types::{truthy, Arity, Closure, LispObject, LispSymbol};
use std::rc::Rc;

pub fn apply_quote(args: &[LispObject]) -> Result {
    Arity::exactly(1)
        .validate_for(args.len(), "quote")
        .map_err(Error::BadArgCount)?;
    Ok(args[0].clone())
}

pub fn apply_if(args: &[LispObject], env: &Rc<Environment>) -> Result {
    Arity::exactly(3)
        .validate_for(args.len(), "if")
        .map_err(Error::BadArgCount)?;
    let condition = eval(&args[0], env)?;
    if truthy(&condition) {
        eval(&args[1], env)
    } else {
        eval(&args[2], env)
    }
}

#[derive(Debug)]
pub enum DefineError {
    WrongArgCount(usize),
    KeyNotASymbol,
}

pub fn apply_define(args: &[LispObject], env: &Rc<Environment>) -> Result {
    let (key, value) = match args.len() {
        2 => Ok((&args[0], &args[1])),
        n => Err(Error::Define(DefineError::WrongArgCount(n))),
    }?;
    let key = match key {
        LispObject::Symbol(s) => Ok(s),
        _ => Err(Error::Define(DefineError::KeyNotASymbol)),
    }?;
    // Binding happens only once the value has evaluated in full; a failure
    // here leaves no partial binding behind.
    let value = eval(value, env)?;
    log::debug!("define {} as {}", key, value);
    env.set(key.clone(), value);
    Ok(LispObject::Unspecified)
}

#[derive(Debug)]
pub enum SetError {
    WrongArgCount(usize),
    KeyNotASymbol,
}

pub fn apply_set(args: &[LispObject], env: &Rc<Environment>) -> Result {
    let (key, value) = match args.len() {
        2 => Ok((&args[0], &args[1])),
        n => Err(Error::Set(SetError::WrongArgCount(n))),
    }?;
    let key = match key {
        LispObject::Symbol(s) => Ok(s),
        _ => Err(Error::Set(SetError::KeyNotASymbol)),
    }?;
    let value = eval(value, env)?;
    env.assign(key, value).map_err(Error::UnknownSymbol)?;
    Ok(LispObject::Unspecified)
}

#[derive(Debug)]
pub enum LambdaError {
    WrongArgCount(usize),
    ParametersNotGivenAsList,
    ParameterNotASymbol,
}

pub fn apply_lambda(args: &[LispObject], env: &Rc<Environment>) -> Result {
    // Exactly two arguments: a list of parameter symbols, then the body,
    // which is stored unevaluated.
    let (parameters, body) = match args.len() {
        2 => Ok((&args[0], &args[1])),
        n => Err(Error::Lambda(LambdaError::WrongArgCount(n))),
    }?;
    let parameters = parameters
        .as_list()
        .or(Err(LambdaError::ParametersNotGivenAsList))
        .map_err(Error::Lambda)?;
    let extract_symbol = |obj: &LispObject| match obj {
        LispObject::Symbol(s) => Ok(s.clone()),
        _ => Err(LambdaError::ParameterNotASymbol),
    };
    let parameters: std::result::Result<Vec<LispSymbol>, _> =
        parameters.iter().map(extract_symbol).collect();

    let closure = Closure {
        parameters: parameters.map_err(Error::Lambda)?,
        body: body.clone(),
        parent: Rc::clone(env),
    };
    Ok(LispObject::Closure(Rc::new(closure)))
}
