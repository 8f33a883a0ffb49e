use crate::ast::Node;
use crate::error::ParseError;
use crate::lexer::{Lexer, Token};
use log::trace;
use std::mem;

mod expr;
mod stmt;

/// Parses exactly one statement. Trailing tokens are a syntax error.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let mut parser = Parser::new(source)?;
    let node = parser.parse_stmt()?;
    parser.expect_eof()?;
    Ok(node)
}

/// Parses statements until the end of input.
pub fn parse_program(source: &str) -> Result<Vec<Node>, ParseError> {
    let mut parser = Parser::new(source)?;
    let mut program = Vec::new();
    while parser.current_token != Token::Eof {
        program.push(parser.parse_stmt()?);
    }
    Ok(program)
}

pub struct Parser<'a> {
    /// Cached token for peeking.
    current_token: Token,
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        Ok(Self {
            current_token: lexer.next_token()?,
            lexer,
        })
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn next(&mut self) -> Result<Token, ParseError> {
        let token = self.lexer.next_token()?;
        trace!("next token: {:?}", token);
        Ok(mem::replace(&mut self.current_token, token))
    }

    /// Returns the token after `self.current_token` without consuming anything.
    fn peek(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.peek()?)
    }

    /// Predicate that tests whether the current token has the same discriminant and eats it if yes as a side effect.
    fn eat(&mut self, tok: Token) -> Result<bool, ParseError> {
        if mem::discriminant(&self.current_token) == mem::discriminant(&tok) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, tok: Token) -> Result<(), ParseError> {
        if self.eat(tok.clone())? {
            Ok(())
        } else {
            Err(self.expected(&tok))
        }
    }

    /// Consumes an identifier and returns its name.
    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if let Token::Identifier(ref ident) = self.current_token {
            let ident = ident.clone();
            self.next()?;
            Ok(ident)
        } else {
            Err(self.expected(&Token::Identifier(String::new())))
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        match self.current_token {
            Token::Eof => Ok(()),
            _ => Err(self.unexpected()),
        }
    }

    /// Builds an "Expected X, got Y" error against the current token.
    fn expected(&self, tok: &Token) -> ParseError {
        ParseError::Expected {
            expected: tok.describe(),
            found: self.current_token.describe(),
        }
    }

    /// Builds an unexpected token error for the current token.
    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken(self.current_token.to_string())
    }
}
