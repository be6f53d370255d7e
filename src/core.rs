use crate::types::{
    callable, identical, truthy, Arity, LispFloat, LispInt, LispNumber, LispObject, PrimitiveFn,
};
use crate::{evaluator, printer};
use itertools::Itertools;
use std::collections::HashMap;

fn grab_numbers(args: &[LispObject]) -> evaluator::Result<Vec<LispNumber>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(|o| o.as_number()).collect();
    type_check.map_err(evaluator::Error::TypeMismatch)
}

fn arithmetic_(
    args: &[LispObject],
    int_op: fn(LispInt, LispInt) -> LispInt,
    float_op: fn(LispFloat, LispFloat) -> LispFloat,
) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [LispNumber::Int(x), LispNumber::Int(y)] => Ok(LispObject::Integer(int_op(*x, *y))),
        [x, y] => Ok(LispObject::Float(float_op(x.as_float(), y.as_float()))),
        _ => unreachable!(),
    }
}

const SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: |args| arithmetic_(args, LispInt::wrapping_add, |x, y| x + y),
    arity: Arity::exactly(2),
};

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: |args| arithmetic_(args, LispInt::wrapping_sub, |x, y| x - y),
    arity: Arity::exactly(2),
};

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: |args| arithmetic_(args, LispInt::wrapping_mul, |x, y| x * y),
    arity: Arity::exactly(2),
};

const DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::exactly(2),
};

// True division: the result is a float even for evenly dividing integers.
fn div_(args: &[LispObject]) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [_, y] if y.as_float() == 0.0 => Err(evaluator::Error::DivideByZero),
        [x, y] => Ok(LispObject::Float(x.as_float() / y.as_float())),
        _ => unreachable!(),
    }
}

fn comparison_(args: &[LispObject], comp: fn(&LispFloat, &LispFloat) -> bool) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(LispObject::Bool(comp(&x.as_float(), &y.as_float()))),
        _ => unreachable!(),
    }
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            const $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[LispObject]| comparison_(args, LispFloat:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);

const NUM_EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: |args| Ok(LispObject::Bool(args[0] == args[1])),
    arity: Arity::exactly(2),
};

const IDENTICAL_TEST: PrimitiveFn = PrimitiveFn {
    name: "eq?",
    fn_ptr: |args| Ok(LispObject::Bool(identical(&args[0], &args[1]))),
    arity: Arity::exactly(2),
};

const EQUAL_TEST: PrimitiveFn = PrimitiveFn {
    name: "equal?",
    fn_ptr: |args| Ok(LispObject::Bool(args[0] == args[1])),
    arity: Arity::exactly(2),
};

const ABS: PrimitiveFn = PrimitiveFn {
    name: "abs",
    fn_ptr: abs_,
    arity: Arity::exactly(1),
};

fn abs_(args: &[LispObject]) -> evaluator::Result {
    match args[0].as_number()? {
        LispNumber::Int(n) => Ok(LispObject::Integer(n.wrapping_abs())),
        LispNumber::Float(f) => Ok(LispObject::Float(f.abs())),
    }
}

const EXPT: PrimitiveFn = PrimitiveFn {
    name: "expt",
    fn_ptr: expt_,
    arity: Arity::exactly(2),
};

fn expt_(args: &[LispObject]) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [LispNumber::Int(x), LispNumber::Int(y)] if (0..=u32::max_value() as LispInt).contains(y) => {
            Ok(LispObject::Integer(x.wrapping_pow(*y as u32)))
        }
        [x, y] => Ok(LispObject::Float(x.as_float().powf(y.as_float()))),
        _ => unreachable!(),
    }
}

const ROUND: PrimitiveFn = PrimitiveFn {
    name: "round",
    fn_ptr: round_,
    arity: Arity::exactly(1),
};

// Round half to even, as the original's host rounding does.
fn round_(args: &[LispObject]) -> evaluator::Result {
    match args[0].as_number()? {
        LispNumber::Int(n) => Ok(LispObject::Integer(n)),
        LispNumber::Float(f) => Ok(LispObject::Integer(f.round_ties_even() as LispInt)),
    }
}

const MAX: PrimitiveFn = PrimitiveFn {
    name: "max",
    fn_ptr: |args| extremum_(args, |x, y| x > y),
    arity: Arity::at_least(1),
};

const MIN: PrimitiveFn = PrimitiveFn {
    name: "min",
    fn_ptr: |args| extremum_(args, |x, y| x < y),
    arity: Arity::at_least(1),
};

fn extremum_(args: &[LispObject], wins: fn(LispFloat, LispFloat) -> bool) -> evaluator::Result {
    let numbers = grab_numbers(args)?;
    let mut best = numbers[0];
    for candidate in &numbers[1..] {
        if wins(candidate.as_float(), best.as_float()) {
            best = *candidate;
        }
    }
    Ok(best.into())
}

macro_rules! math_primitive {
    ($NAME:ident, $METHOD:ident) => {
        paste::item! {
            const [<$NAME:upper>]: PrimitiveFn = PrimitiveFn {
                name: stringify!($NAME),
                fn_ptr: |args: &[LispObject]| {
                    let x = args[0].as_number()?;
                    Ok(LispObject::Float(x.as_float().$METHOD()))
                },
                arity: Arity::exactly(1),
            };
        }
    };
}

math_primitive!(sin, sin);
math_primitive!(cos, cos);
math_primitive!(tan, tan);
math_primitive!(asin, asin);
math_primitive!(acos, acos);
math_primitive!(atan, atan);
math_primitive!(exp, exp);
math_primitive!(log, ln);
math_primitive!(sqrt, sqrt);

const FLOOR: PrimitiveFn = PrimitiveFn {
    name: "floor",
    fn_ptr: |args| rounding_(args, LispFloat::floor),
    arity: Arity::exactly(1),
};

const CEIL: PrimitiveFn = PrimitiveFn {
    name: "ceil",
    fn_ptr: |args| rounding_(args, LispFloat::ceil),
    arity: Arity::exactly(1),
};

fn rounding_(args: &[LispObject], round: fn(LispFloat) -> LispFloat) -> evaluator::Result {
    match args[0].as_number()? {
        LispNumber::Int(n) => Ok(LispObject::Integer(n)),
        LispNumber::Float(f) => Ok(LispObject::Integer(round(f) as LispInt)),
    }
}

const BEGIN: PrimitiveFn = PrimitiveFn {
    name: "begin",
    fn_ptr: begin_,
    arity: Arity::at_least(1),
};

// The arguments were already evaluated left to right by ordinary
// application; all that is left is to hand back the last result.
fn begin_(args: &[LispObject]) -> evaluator::Result {
    Ok(args.last().unwrap().clone())
}

const CAR: PrimitiveFn = PrimitiveFn {
    name: "car",
    fn_ptr: car_,
    arity: Arity::exactly(1),
};

fn car_(args: &[LispObject]) -> evaluator::Result {
    let list = args[0].as_list()?;
    list.first()
        .cloned()
        .ok_or_else(|| evaluator::Error::BadIndex(0, 0..0))
}

const CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

// Everything after the head. The cdr of the empty list is the empty list,
// matching the original's slice semantics rather than erroring.
fn cdr_(args: &[LispObject]) -> evaluator::Result {
    let list = args[0].as_list()?;
    match list.split_first() {
        Some((_, tail)) => Ok(LispObject::wrap_list(tail.to_vec())),
        None => Ok(LispObject::new_list()),
    }
}

const CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

fn cons_(args: &[LispObject]) -> evaluator::Result {
    let head = &args[0];
    let tail = args[1].as_list()?;

    let mut elements = Vec::with_capacity(tail.len() + 1);
    elements.push(head.clone());
    elements.extend(tail.iter().map(LispObject::clone));
    Ok(LispObject::wrap_list(elements))
}

const APPEND: PrimitiveFn = PrimitiveFn {
    name: "append",
    fn_ptr: append_,
    arity: Arity::exactly(2),
};

fn append_(args: &[LispObject]) -> evaluator::Result {
    let mut elements = args[0].as_list()?.to_vec();
    elements.extend(args[1].as_list()?.iter().map(LispObject::clone));
    Ok(LispObject::wrap_list(elements))
}

const LENGTH: PrimitiveFn = PrimitiveFn {
    name: "length",
    fn_ptr: length_,
    arity: Arity::exactly(1),
};

fn length_(args: &[LispObject]) -> evaluator::Result {
    let list = args[0].as_list()?;
    Ok(LispObject::Integer(list.len() as LispInt))
}

const LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: |args| Ok(LispObject::wrap_list(args.to_vec())),
    arity: Arity::at_least(0),
};

const APPLY: PrimitiveFn = PrimitiveFn {
    name: "apply",
    fn_ptr: apply_,
    arity: Arity::exactly(2),
};

fn apply_(args: &[LispObject]) -> evaluator::Result {
    let call_args = args[1].as_list()?;
    evaluator::apply(&args[0], call_args)
}

const MAP: PrimitiveFn = PrimitiveFn {
    name: "map",
    fn_ptr: map_,
    arity: Arity::exactly(2),
};

fn map_(args: &[LispObject]) -> evaluator::Result {
    let result: Result<Vec<_>, _> = args[1]
        .as_list()?
        .chunks_exact(1)
        .map(|obj| evaluator::apply(&args[0], obj))
        .collect();
    Ok(LispObject::wrap_list(result?))
}

const NOT: PrimitiveFn = PrimitiveFn {
    name: "not",
    fn_ptr: |args| Ok(LispObject::Bool(!truthy(&args[0]))),
    arity: Arity::exactly(1),
};

const NULL_TEST: PrimitiveFn = PrimitiveFn {
    name: "null?",
    fn_ptr: null_test_,
    arity: Arity::exactly(1),
};

fn null_test_(args: &[LispObject]) -> evaluator::Result {
    let is_empty = match &args[0] {
        LispObject::List(elements) => elements.is_empty(),
        _ => false,
    };
    Ok(LispObject::Bool(is_empty))
}

const LIST_TEST: PrimitiveFn = PrimitiveFn {
    name: "list?",
    fn_ptr: |args| Ok(LispObject::Bool(args[0].is_list())),
    arity: Arity::exactly(1),
};

const NUMBER_TEST: PrimitiveFn = PrimitiveFn {
    name: "number?",
    fn_ptr: |args| Ok(LispObject::Bool(args[0].is_number())),
    arity: Arity::exactly(1),
};

const SYMBOL_TEST: PrimitiveFn = PrimitiveFn {
    name: "symbol?",
    fn_ptr: |args| Ok(LispObject::Bool(args[0].is_symbol())),
    arity: Arity::exactly(1),
};

const PROCEDURE_TEST: PrimitiveFn = PrimitiveFn {
    name: "procedure?",
    fn_ptr: |args| Ok(LispObject::Bool(callable(&args[0]))),
    arity: Arity::exactly(1),
};

const PRINT: PrimitiveFn = PrimitiveFn {
    name: "print",
    fn_ptr: print_,
    arity: Arity::at_least(0),
};

fn print_(args: &[LispObject]) -> evaluator::Result {
    let text = args.iter().map(|arg| printer::pr_str(arg)).join(" ");
    println!("{}", text);
    Ok(LispObject::Unspecified)
}

pub const CONSTANTS: [(&str, LispFloat); 5] = [
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("tau", std::f64::consts::PI * 2.0),
    ("inf", std::f64::INFINITY),
    ("nan", std::f64::NAN),
];

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for func in [
            // Arithmetic
            SUM,
            SUB,
            MUL,
            DIV,
            ABS,
            EXPT,
            ROUND,
            MAX,
            MIN,
            // Comparisons and equality
            GT,
            GE,
            LT,
            LE,
            NUM_EQUAL,
            IDENTICAL_TEST,
            EQUAL_TEST,
            // Transcendental functions
            SIN,
            COS,
            TAN,
            ASIN,
            ACOS,
            ATAN,
            EXP,
            LOG,
            SQRT,
            FLOOR,
            CEIL,
            // Working with lists
            CAR,
            CDR,
            CONS,
            APPEND,
            LENGTH,
            LIST,
            APPLY,
            MAP,
            // Predicates
            NOT,
            NULL_TEST,
            LIST_TEST,
            NUMBER_TEST,
            SYMBOL_TEST,
            PROCEDURE_TEST,
            // Sequencing and output
            BEGIN,
            PRINT,
        ].iter() {
            map.insert(func.name, func);
        }
        map
    };
}
