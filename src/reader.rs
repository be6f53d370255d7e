use crate::tokens::{tokenize, Token};
use crate::types::{LispFloat, LispInt, LispObject};
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

pub type Result<T = LispObject> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedEndOfInput,
    UnmatchedCloseParen,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error: {}",
            match self {
                Error::UnexpectedEndOfInput => "unexpected end of input",
                Error::UnmatchedCloseParen => "unexpected closing parenthesis",
            }
        )
    }
}

/// Read one expression from the input. Tokens after the first complete
/// expression are silently ignored; callers hand us one line at a time.
pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input);
    let mut reader = tokens.iter().peekable();
    read_form(&mut reader)
}

fn read_form(reader: &mut Reader) -> Result {
    match reader.next() {
        Some(Token::OpenParen) => read_list(reader),
        Some(Token::CloseParen) => Err(Error::UnmatchedCloseParen),
        Some(Token::Atom(chars)) => Ok(read_atom(chars)),
        None => Err(Error::UnexpectedEndOfInput),
    }
}

fn read_list(reader: &mut Reader) -> Result {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseParen) => {
                let _close = reader.next();
                return Ok(LispObject::wrap_list(elements));
            }
            Some(_) => elements.push(read_form(reader)?),
            None => return Err(Error::UnexpectedEndOfInput),
        }
    }
}

/// Numbers become numbers, every other token is a symbol. Numeric tokens
/// whose value is integral read as integers, so `2.0` is the integer 2.
fn read_atom(chars: &str) -> LispObject {
    if !looks_numeric(chars) {
        return LispObject::new_symbol(chars);
    }
    match chars.parse::<LispInt>() {
        Ok(n) => LispObject::Integer(n),
        Err(_) => match chars.parse::<LispFloat>() {
            Ok(f) if is_integral(f) => LispObject::Integer(f as LispInt),
            Ok(f) => LispObject::Float(f),
            // The heuristic admits a few tokens no float grammar accepts,
            // e.g. `--5` or `1e2e3`. Treat those as symbols.
            Err(_) => LispObject::new_symbol(chars),
        },
    }
}

/// The original's permissive numeric test: strip leading minus signs, then
/// one `.`, one `e-` and one `e`, and ask whether only digits remain.
fn looks_numeric(token: &str) -> bool {
    let stripped = token.trim_start_matches('-');
    let stripped = stripped.replacen('.', "", 1);
    let stripped = stripped.replacen("e-", "", 1);
    let stripped = stripped.replacen('e', "", 1);
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

fn is_integral(f: LispFloat) -> bool {
    f.is_finite()
        && f == f.trunc()
        && f >= LispInt::min_value() as LispFloat
        && f <= LispInt::max_value() as LispFloat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LispSymbol;

    #[test]
    fn reads_nested_call() {
        let expr = read_str("(+ 1 (quote x))").unwrap();
        let list = expr.as_list().unwrap();
        assert_eq!(list[0], LispObject::new_symbol("+"));
        assert_eq!(list[1], LispObject::Integer(1));
        let inner = list[2].as_list().unwrap();
        assert_eq!(inner[0], LispObject::new_symbol("quote"));
        assert_eq!(inner[1], LispObject::new_symbol("x"));
    }

    #[test]
    fn classifies_atoms() {
        assert_eq!(read_str("42").unwrap(), LispObject::Integer(42));
        assert_eq!(read_str("-7").unwrap(), LispObject::Integer(-7));
        assert_eq!(read_str("3.5").unwrap(), LispObject::Float(3.5));
        assert_eq!(read_str("-0.5").unwrap(), LispObject::Float(-0.5));
        assert_eq!(read_str("1e3").unwrap(), LispObject::Integer(1000));
        assert_eq!(read_str("1.5e-1").unwrap(), LispObject::Float(0.15));
        assert_eq!(
            read_str("banana").unwrap(),
            LispObject::Symbol(LispSymbol::from("banana"))
        );
    }

    #[test]
    fn integral_floats_read_as_integers() {
        assert_eq!(read_str("2.0").unwrap(), LispObject::Integer(2));
    }

    #[test]
    fn heuristic_misfires_fall_back_to_symbols() {
        assert_eq!(read_str("--5").unwrap(), LispObject::new_symbol("--5"));
        assert_eq!(read_str("1.2.3").unwrap(), LispObject::new_symbol("1.2.3"));
    }

    #[test]
    fn empty_input_is_a_syntax_error() {
        assert!(matches!(read_str(""), Err(Error::UnexpectedEndOfInput)));
    }

    #[test]
    fn unterminated_list_is_a_syntax_error() {
        assert!(matches!(
            read_str("(+ 1 2"),
            Err(Error::UnexpectedEndOfInput)
        ));
        assert!(matches!(read_str("(a (b c)"), Err(Error::UnexpectedEndOfInput)));
    }

    #[test]
    fn stray_close_paren_is_a_syntax_error() {
        assert!(matches!(read_str(")"), Err(Error::UnmatchedCloseParen)));
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        assert_eq!(read_str("1 2 3").unwrap(), LispObject::Integer(1));
        assert_eq!(
            read_str("(list) extra").unwrap().as_list().unwrap().len(),
            0
        );
    }
}
