use crate::types::{LispFloat, LispObject};
use itertools::Itertools;

/// Human-readable rendering of a value. Consumes the evaluator's output; no
/// interpreter logic lives here.
pub fn pr_str(object: &LispObject) -> String {
    match object {
        LispObject::List(elements) => format!("({})", elements.iter().map(pr_str).join(" ")),
        LispObject::Integer(value) => value.to_string(),
        LispObject::Float(value) => pr_float(*value),
        LispObject::Symbol(name) => name.to_string(),
        LispObject::Bool(true) => String::from("#t"),
        LispObject::Bool(false) => String::from("#f"),
        LispObject::Primitive(func) => format!("#<primitive {}>", func.name),
        LispObject::Closure(closure) => {
            format!("#<procedure ({})>", closure.parameters.iter().join(" "))
        }
        LispObject::Unspecified => String::new(),
    }
}

// Keep integral floats visibly floats: any that survive to printing came
// from arithmetic, not the reader.
fn pr_float(value: LispFloat) -> String {
    if value.is_finite() && value == value.trunc() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
