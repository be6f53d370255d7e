use regex::Regex;

/// One lexical token. Parentheses are their own tokens; everything else is an
/// undifferentiated run of characters, classified later by the reader.
#[derive(Debug, Eq, PartialEq)]
pub enum Token<'a> {
    OpenParen,
    CloseParen,
    Atom(&'a str),
}

/// Split the input on parentheses and whitespace. There are no comments,
/// string literals or quote sugar to worry about, so this cannot fail: input
/// with no token characters left just ends the stream.
pub fn tokenize(input: &str) -> Vec<Token> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r"(?x)
                \s*              # leading whitespace, ignored
                (                # token capture group
                    [()]         # a parenthesis is always its own token
                    |[^\s()]+    # anything else up to whitespace or a paren
                )
            "
        )
        .unwrap();
    }
    let mut input = input;
    let mut tokens = Vec::new();
    while let Some(caps) = TOKEN_RE.captures(input) {
        let token = match caps.get(1).unwrap().as_str() {
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            chars => Token::Atom(chars),
        };
        tokens.push(token);
        input = &input[caps.get(0).unwrap().end()..];
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n ").is_empty());
    }

    #[test]
    fn parens_are_their_own_tokens() {
        let tokens = tokenize("(+ 1(  2))");
        assert_eq!(
            tokens,
            vec![
                Token::OpenParen,
                Token::Atom("+"),
                Token::Atom("1"),
                Token::OpenParen,
                Token::Atom("2"),
                Token::CloseParen,
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn no_quote_sugar() {
        let tokens = tokenize("'x");
        assert_eq!(tokens, vec![Token::Atom("'x")]);
    }

    #[test]
    fn round_trip_preserves_structure() {
        let input = "( define x ( quote ( 1 2 3 ) ) )";
        let rejoined: Vec<&str> = tokenize(input)
            .iter()
            .map(|token| match token {
                Token::OpenParen => "(",
                Token::CloseParen => ")",
                Token::Atom(chars) => chars,
            })
            .collect();
        assert_eq!(rejoined.join(" "), input);
    }
}
