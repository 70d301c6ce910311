//! Lexer (tokenizer) for the calculator's Maple-flavored grammar.
//!
//! Converts a source string into a sequence of [`SpannedToken`] values,
//! each carrying its [`Span`] byte range in the original source.

use crate::error::ParseError;
use crate::token::{Span, SpannedToken, Token};

/// Replace common Unicode math operator lookalikes with ASCII equivalents.
/// This allows text pasted from PDFs and papers to parse correctly.
fn normalize_unicode(input: &str) -> String {
    input
        .replace('\u{00B7}', "*") // MIDDLE DOT -> star
        .replace('\u{2212}', "-") // MINUS SIGN -> hyphen-minus
        .replace('\u{00D7}', "*") // MULTIPLICATION SIGN -> star
        .replace('\u{2013}', "-") // EN DASH -> hyphen-minus
        .replace('\u{2014}', "-") // EM DASH -> hyphen-minus
}

/// Tokenize a source string into a sequence of spanned tokens.
///
/// The returned vector always ends with a [`Token::Eof`] token whose span
/// points to the end of the input string. Unicode math operators are
/// normalized to ASCII equivalents before byte-level lexing.
///
/// # Errors
///
/// Returns [`ParseError`] if an unrecognized character is encountered.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let normalized = normalize_unicode(input);
    let bytes = normalized.as_bytes();
    let mut pos = 0usize;
    let mut tokens = Vec::new();

    while pos < bytes.len() {
        let b = bytes[pos];

        if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
            pos += 1;
            continue;
        }

        // `#` line comments.
        if b == b'#' {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }

        // Ditto operator vs string literal disambiguation: a bare `"`
        // followed by a delimiter/operator/whitespace/EOF is the ditto
        // operator (reference to the last result); otherwise it opens a
        // string literal.
        if b == b'"' {
            let next = if pos + 1 < bytes.len() { bytes[pos + 1] } else { 0 };
            let is_ditto = pos + 1 >= bytes.len()
                || matches!(
                    next,
                    b',' | b')' | b';' | b':' | b'+' | b'-' | b'*' | b'/' | b'^' | b']' | b' ' | b'\t' | b'\n' | b'\r'
                );
            if is_ditto {
                tokens.push(SpannedToken { token: Token::Ditto, span: Span::new(pos, pos + 1) });
                pos += 1;
                continue;
            }
            let start = pos;
            pos += 1;
            let mut value = String::new();
            while pos < bytes.len() && bytes[pos] != b'"' {
                if bytes[pos] == b'\\' && pos + 1 < bytes.len() {
                    match bytes[pos + 1] {
                        b'\\' => {
                            value.push('\\');
                            pos += 2;
                        }
                        b'"' => {
                            value.push('"');
                            pos += 2;
                        }
                        b'n' => {
                            value.push('\n');
                            pos += 2;
                        }
                        _ => {
                            value.push(bytes[pos] as char);
                            pos += 1;
                        }
                    }
                } else {
                    value.push(bytes[pos] as char);
                    pos += 1;
                }
            }
            if pos >= bytes.len() {
                return Err(ParseError::new("unterminated string literal".to_string(), Span::new(start, pos)));
            }
            pos += 1;
            tokens.push(SpannedToken { token: Token::StringLit(value), span: Span::new(start, pos) });
            continue;
        }

        let single = match b {
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Star),
            b'/' => Some(Token::Slash),
            b'^' => Some(Token::Caret),
            b'%' => Some(Token::Percent),
            b'(' => Some(Token::LParen),
            b')' => Some(Token::RParen),
            b'[' => Some(Token::LBracket),
            b']' => Some(Token::RBracket),
            b',' => Some(Token::Comma),
            b';' => Some(Token::Semi),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push(SpannedToken { token, span: Span::new(pos, pos + 1) });
            pos += 1;
            continue;
        }

        // `:` alone is Colon, `:=` is Assign.
        if b == b':' {
            if pos + 1 < bytes.len() && bytes[pos + 1] == b'=' {
                tokens.push(SpannedToken { token: Token::Assign, span: Span::new(pos, pos + 2) });
                pos += 2;
            } else {
                tokens.push(SpannedToken { token: Token::Colon, span: Span::new(pos, pos + 1) });
                pos += 1;
            }
            continue;
        }

        if b.is_ascii_digit() {
            let start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            let word = &normalized[start..pos];
            let token = match word.parse::<i64>() {
                Ok(n) => Token::Integer(n),
                Err(_) => Token::BigInteger(word.to_string()),
            };
            tokens.push(SpannedToken { token, span: Span::new(start, pos) });
            continue;
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            let start = pos;
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            let word = &normalized[start..pos];
            let token = if word == "infinity" { Token::Infinity } else { Token::Ident(word.to_string()) };
            tokens.push(SpannedToken { token, span: Span::new(start, pos) });
            continue;
        }

        return Err(ParseError::new(format!("unexpected character '{}'", b as char), Span::new(pos, pos + 1)));
    }

    tokens.push(SpannedToken { token: Token::Eof, span: Span::new(bytes.len(), bytes.len()) });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn integer_literal() {
        assert_eq!(tokens("42"), vec![Token::Integer(42), Token::Eof]);
    }

    #[test]
    fn big_integer_literal() {
        let toks = tokens("99999999999999999999999");
        assert_eq!(toks, vec![Token::BigInteger("99999999999999999999999".to_string()), Token::Eof]);
    }

    #[test]
    fn identifiers_and_infinity() {
        let toks = tokens("x infinity");
        assert_eq!(toks, vec![Token::Ident("x".to_string()), Token::Infinity, Token::Eof]);
    }

    #[test]
    fn function_call_tokens() {
        let toks = tokens("gamma(x, 10)");
        assert_eq!(
            toks,
            vec![
                Token::Ident("gamma".to_string()),
                Token::LParen,
                Token::Ident("x".to_string()),
                Token::Comma,
                Token::Integer(10),
                Token::RParen,
                Token::Eof
            ]
        );
    }

    #[test]
    fn assignment_tokens() {
        let toks = tokens("f := sqrt(2)");
        assert_eq!(
            toks,
            vec![
                Token::Ident("f".to_string()),
                Token::Assign,
                Token::Ident("sqrt".to_string()),
                Token::LParen,
                Token::Integer(2),
                Token::RParen,
                Token::Eof
            ]
        );
    }

    #[test]
    fn operators_and_parens() {
        assert_eq!(
            tokens("(1+2)*3-4/5^6"),
            vec![
                Token::LParen,
                Token::Integer(1),
                Token::Plus,
                Token::Integer(2),
                Token::RParen,
                Token::Star,
                Token::Integer(3),
                Token::Minus,
                Token::Integer(4),
                Token::Slash,
                Token::Integer(5),
                Token::Caret,
                Token::Integer(6),
                Token::Eof
            ]
        );
    }

    #[test]
    fn ditto_bare_quote() {
        assert_eq!(tokens("\" + 1"), vec![Token::Ditto, Token::Plus, Token::Integer(1), Token::Eof]);
    }

    #[test]
    fn percent_ditto() {
        assert_eq!(tokens("% + 1"), vec![Token::Percent, Token::Plus, Token::Integer(1), Token::Eof]);
    }

    #[test]
    fn string_literal() {
        let toks = tokens("\"hello world\"");
        assert_eq!(toks, vec![Token::StringLit("hello world".to_string()), Token::Eof]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(tokenize("\"hello").is_err());
    }

    #[test]
    fn semicolon_and_colon_terminators() {
        assert_eq!(tokens("1;2:"), vec![Token::Integer(1), Token::Semi, Token::Integer(2), Token::Colon, Token::Eof]);
    }

    #[test]
    fn line_comment_is_skipped() {
        assert_eq!(tokens("1 + 2 # a comment\n"), tokens("1 + 2"));
    }

    #[test]
    fn unicode_operator_lookalikes_normalize() {
        assert_eq!(tokens("2\u{00D7}3"), tokens("2*3"));
    }

    #[test]
    fn unexpected_character_is_an_error() {
        assert!(tokenize("1 @ 2").is_err());
    }
}
