//! # Parser
//!
//! Precedence-climbing parser from tokens to an expression AST.
//!
//! A rule body is one expression, optionally wrapped in
//! `return <expr>;`. Anything after that is a compile error.

use super::token::Token;
use super::CompileError;
use crate::core::Value;

/// Binary operators, loosest-binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
}

impl BinOp {
    /// Operator text for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// `-`
    Neg,
    /// `!`
    Not,
}

/// Expression AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal(Value),
    /// Parameter reference
    Ident(String),
    /// Property access, e.g. `str.length`
    Property(Box<Expr>, String),
    /// Unary operation
    Unary(UnOp, Box<Expr>),
    /// Binary operation
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

/// Parse a full rule body: `[return] expr [;]`.
pub fn parse_body(tokens: &[Token]) -> Result<Expr, CompileError> {
    let mut parser = Parser { tokens, pos: 0 };

    if parser.peek() == Some(&Token::Return) {
        parser.pos += 1;
    }

    let expr = parser.expression(0)?;

    if parser.peek() == Some(&Token::Semi) {
        parser.pos += 1;
    }

    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(CompileError::TrailingInput(tok.describe())),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

/// Binding power of an infix token, if it is one.
fn infix_power(token: &Token) -> Option<(BinOp, u8)> {
    let (op, power) = match token {
        Token::Or => (BinOp::Or, 1),
        Token::And => (BinOp::And, 2),
        Token::Eq => (BinOp::Eq, 3),
        Token::Ne => (BinOp::Ne, 3),
        Token::Lt => (BinOp::Lt, 4),
        Token::Le => (BinOp::Le, 4),
        Token::Gt => (BinOp::Gt, 4),
        Token::Ge => (BinOp::Ge, 4),
        Token::Plus => (BinOp::Add, 5),
        Token::Minus => (BinOp::Sub, 5),
        Token::Star => (BinOp::Mul, 6),
        Token::Slash => (BinOp::Div, 6),
        Token::Percent => (BinOp::Rem, 6),
        _ => return None,
    };
    Some((op, power))
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self, min_power: u8) -> Result<Expr, CompileError> {
        let mut lhs = self.prefix()?;

        while let Some((op, power)) = self.peek().and_then(infix_power) {
            if power < min_power {
                break;
            }
            self.pos += 1;
            // Left-associative: the right side binds one level tighter.
            let rhs = self.expression(power + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }

        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Expr, CompileError> {
        let token = self.next().ok_or(CompileError::UnexpectedEnd)?.clone();

        let expr = match token {
            Token::Int(i) => Expr::Literal(Value::Int(i)),
            Token::Float(f) => Expr::Literal(Value::Float(f)),
            Token::Str(s) => Expr::Literal(Value::Str(s)),
            Token::True => Expr::Literal(Value::Bool(true)),
            Token::False => Expr::Literal(Value::Bool(false)),
            Token::Null => Expr::Literal(Value::Null),
            Token::Ident(name) => Expr::Ident(name),
            Token::Minus => {
                let inner = self.prefix()?;
                Expr::Unary(UnOp::Neg, Box::new(inner))
            }
            Token::Not => {
                let inner = self.prefix()?;
                Expr::Unary(UnOp::Not, Box::new(inner))
            }
            Token::LParen => {
                let inner = self.expression(0)?;
                match self.next() {
                    Some(Token::RParen) => inner,
                    Some(tok) => return Err(CompileError::UnexpectedToken(tok.describe())),
                    None => return Err(CompileError::UnexpectedEnd),
                }
            }
            other => return Err(CompileError::UnexpectedToken(other.describe())),
        };

        self.postfix(expr)
    }

    fn postfix(&mut self, mut expr: Expr) -> Result<Expr, CompileError> {
        while self.peek() == Some(&Token::Dot) {
            self.pos += 1;
            match self.next() {
                Some(Token::Ident(name)) => {
                    expr = Expr::Property(Box::new(expr), name.clone());
                }
                Some(tok) => return Err(CompileError::UnexpectedToken(tok.describe())),
                None => return Err(CompileError::UnexpectedEnd),
            }
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::token::tokenize;

    fn parse(source: &str) -> Result<Expr, CompileError> {
        parse_body(&tokenize(source)?)
    }

    #[test]
    fn test_return_and_semicolon_are_optional() {
        assert_eq!(parse("return 1;").unwrap(), parse("1").unwrap());
        assert_eq!(parse("return a;").unwrap(), parse("a").unwrap());
    }

    #[test]
    fn test_precedence() {
        // 2*a+2*b parses as (2*a)+(2*b)
        let expr = parse("2*a+2*b").unwrap();
        match expr {
            Expr::Binary(BinOp::Add, lhs, rhs) => {
                assert!(matches!(*lhs, Expr::Binary(BinOp::Mul, _, _)));
                assert!(matches!(*rhs, Expr::Binary(BinOp::Mul, _, _)));
            }
            other => panic!("unexpected parse: {:?}", other),
        }

        // val % 7 == 0 parses as (val % 7) == 0
        let expr = parse("val % 7 == 0").unwrap();
        assert!(matches!(expr, Expr::Binary(BinOp::Eq, _, _)));
    }

    #[test]
    fn test_logical_binds_loosest() {
        let expr = parse("a == 1 && b == 2 || c == 3").unwrap();
        assert!(matches!(expr, Expr::Binary(BinOp::Or, _, _)));
    }

    #[test]
    fn test_parentheses_override() {
        let expr = parse("2 * (a + b)").unwrap();
        match expr {
            Expr::Binary(BinOp::Mul, _, rhs) => {
                assert!(matches!(*rhs, Expr::Binary(BinOp::Add, _, _)));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_property_chain() {
        let expr = parse("str.length").unwrap();
        assert_eq!(
            expr,
            Expr::Property(Box::new(Expr::Ident("str".into())), "length".into())
        );
    }

    #[test]
    fn test_malformed_bodies_fail() {
        assert!(matches!(parse("return ;"), Err(CompileError::UnexpectedToken(_))));
        assert_eq!(parse("a +"), Err(CompileError::UnexpectedEnd));
        assert_eq!(parse("(a"), Err(CompileError::UnexpectedEnd));
        assert!(matches!(parse("1 2"), Err(CompileError::TrailingInput(_))));
        assert!(matches!(parse("a; b;"), Err(CompileError::TrailingInput(_))));
    }
}
