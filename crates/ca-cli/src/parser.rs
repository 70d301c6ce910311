//! Recursive-descent parser for the calculator grammar.
//!
//! Statement = [ Ident ":=" ] Expr [ ";" | ":" ]
//! Expr      = Term { ("+" | "-") Term }
//! Term      = Power { ("*" | "/") Power }
//! Power     = Unary [ "^" Power ]              (right-associative)
//! Unary     = "-" Unary | Primary
//! Primary   = Integer | BigInteger | "infinity" | "%" | '"' (ditto)
//!           | Ident [ "(" [ Expr { "," Expr } ] ")" ]
//!           | "(" Expr ")"
//!           | "[" [ Expr { "," Expr } ] "]"

use crate::ast::{AstNode, BinOp, Stmt, Terminator};
use crate::error::ParseError;
use crate::lexer::tokenize;
use crate::token::{SpannedToken, Token};

/// Internal parser state holding the token stream and current position.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn span_here(&self) -> crate::token::Span {
        self.tokens[self.pos].span
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), ParseError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::new(format!("expected {}", what), self.span_here()))
        }
    }

    fn parse_program(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while *self.peek() != Token::Eof {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let node = if let Token::Ident(name) = self.peek().clone() {
            if matches!(self.tokens.get(self.pos + 1).map(|t| &t.token), Some(Token::Assign)) {
                self.advance(); // name
                self.advance(); // :=
                let value = self.parse_expr()?;
                AstNode::Assign { name, value: Box::new(value) }
            } else {
                self.parse_expr()?
            }
        } else {
            self.parse_expr()?
        };

        let terminator = match self.peek() {
            Token::Semi => {
                self.advance();
                Terminator::Semi
            }
            Token::Colon => {
                self.advance();
                Terminator::Colon
            }
            _ => Terminator::Implicit,
        };
        Ok(Stmt { node, terminator })
    }

    fn parse_expr(&mut self) -> Result<AstNode, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = AstNode::BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut lhs = self.parse_power()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_power()?;
            lhs = AstNode::BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_power(&mut self) -> Result<AstNode, ParseError> {
        let base = self.parse_unary()?;
        if *self.peek() == Token::Caret {
            self.advance();
            let exp = self.parse_power()?; // right-associative
            return Ok(AstNode::BinOp { op: BinOp::Pow, lhs: Box::new(base), rhs: Box::new(exp) });
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        if *self.peek() == Token::Minus {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(AstNode::Neg(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let span = self.span_here();
        match self.advance() {
            Token::Integer(n) => Ok(AstNode::Integer(n)),
            Token::BigInteger(s) => Ok(AstNode::BigInteger(s)),
            Token::Infinity => Ok(AstNode::Infinity),
            Token::Percent | Token::Ditto => Ok(AstNode::LastResult),
            Token::Ident(name) => {
                if *self.peek() == Token::LParen {
                    self.advance();
                    let args = self.parse_arg_list(&Token::RParen)?;
                    self.expect(&Token::RParen, "')'")?;
                    Ok(AstNode::FuncCall { name, args })
                } else {
                    Ok(AstNode::Variable(name))
                }
            }
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::LBracket => {
                let items = self.parse_arg_list(&Token::RBracket)?;
                self.expect(&Token::RBracket, "']'")?;
                Ok(AstNode::List(items))
            }
            other => Err(ParseError::new(format!("unexpected token {:?}", other), span)),
        }
    }

    fn parse_arg_list(&mut self, closing: &Token) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();
        if self.peek() == closing {
            return Ok(args);
        }
        args.push(self.parse_expr()?);
        while *self.peek() == Token::Comma {
            self.advance();
            args.push(self.parse_expr()?);
        }
        Ok(args)
    }
}

/// Parse a source string into a list of statements.
///
/// Tokenizes the input, then parses the token stream into statements
/// separated by `;` (print) or `:` (suppress).
///
/// # Errors
///
/// Returns [`ParseError`] on lexer or parser errors with byte-offset spans.
pub fn parse(input: &str) -> Result<Vec<Stmt>, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &str) -> AstNode {
        parse(input).unwrap().into_iter().next().unwrap().node
    }

    #[test]
    fn parses_integer() {
        assert_eq!(parse_one("42"), AstNode::Integer(42));
    }

    #[test]
    fn precedence_of_mul_over_add() {
        let node = parse_one("1 + 2 * 3");
        assert_eq!(
            node,
            AstNode::BinOp {
                op: BinOp::Add,
                lhs: Box::new(AstNode::Integer(1)),
                rhs: Box::new(AstNode::BinOp {
                    op: BinOp::Mul,
                    lhs: Box::new(AstNode::Integer(2)),
                    rhs: Box::new(AstNode::Integer(3)),
                }),
            }
        );
    }

    #[test]
    fn power_is_right_associative() {
        let node = parse_one("2^3^2");
        assert_eq!(
            node,
            AstNode::BinOp {
                op: BinOp::Pow,
                lhs: Box::new(AstNode::Integer(2)),
                rhs: Box::new(AstNode::BinOp {
                    op: BinOp::Pow,
                    lhs: Box::new(AstNode::Integer(3)),
                    rhs: Box::new(AstNode::Integer(2)),
                }),
            }
        );
    }

    #[test]
    fn parens_override_precedence() {
        let node = parse_one("(1 + 2) * 3");
        assert_eq!(
            node,
            AstNode::BinOp {
                op: BinOp::Mul,
                lhs: Box::new(AstNode::BinOp {
                    op: BinOp::Add,
                    lhs: Box::new(AstNode::Integer(1)),
                    rhs: Box::new(AstNode::Integer(2)),
                }),
                rhs: Box::new(AstNode::Integer(3)),
            }
        );
    }

    #[test]
    fn unary_minus_binds_tighter_than_power() {
        // Maple semantics: -2^2 == -(2^2) == -4, i.e. unary minus applies
        // to the whole power expression, not just the base.
        let node = parse_one("-2^2");
        assert_eq!(
            node,
            AstNode::Neg(Box::new(AstNode::BinOp {
                op: BinOp::Pow,
                lhs: Box::new(AstNode::Integer(2)),
                rhs: Box::new(AstNode::Integer(2)),
            }))
        );
    }

    #[test]
    fn function_call_with_args() {
        let node = parse_one("gamma(x, 10)");
        assert_eq!(
            node,
            AstNode::FuncCall { name: "gamma".to_string(), args: vec![AstNode::Variable("x".to_string()), AstNode::Integer(10)] }
        );
    }

    #[test]
    fn nullary_function_call() {
        let node = parse_one("pi()");
        assert_eq!(node, AstNode::FuncCall { name: "pi".to_string(), args: vec![] });
    }

    #[test]
    fn list_literal() {
        let node = parse_one("[1, 2, 3]");
        assert_eq!(node, AstNode::List(vec![AstNode::Integer(1), AstNode::Integer(2), AstNode::Integer(3)]));
    }

    #[test]
    fn assignment_statement() {
        let stmt = parse("f := sqrt(2);").unwrap().into_iter().next().unwrap();
        assert_eq!(stmt.terminator, Terminator::Semi);
        assert_eq!(
            stmt.node,
            AstNode::Assign { name: "f".to_string(), value: Box::new(AstNode::FuncCall { name: "sqrt".to_string(), args: vec![AstNode::Integer(2)] }) }
        );
    }

    #[test]
    fn ditto_and_percent_are_last_result() {
        assert_eq!(parse_one("%"), AstNode::LastResult);
        assert_eq!(parse_one("\" "), AstNode::LastResult);
    }

    #[test]
    fn colon_suppresses_and_semicolon_prints() {
        let stmts = parse("1; 2:").unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].terminator, Terminator::Semi);
        assert_eq!(stmts[1].terminator, Terminator::Colon);
    }

    #[test]
    fn multiple_statements_on_one_line() {
        let stmts = parse("x := 1; y := 2; x + y").unwrap();
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[2].terminator, Terminator::Implicit);
    }

    #[test]
    fn unexpected_token_is_a_parse_error() {
        assert!(parse("1 + ").is_err());
        assert!(parse(")").is_err());
    }

    #[test]
    fn unmatched_paren_is_a_parse_error() {
        assert!(parse("(1 + 2").is_err());
    }
}
