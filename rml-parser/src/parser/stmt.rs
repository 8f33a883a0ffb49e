use super::*;
use crate::ast::{ConditionalBranch, FunctionDef};
use std::rc::Rc;

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> Result<Node, ParseError> {
        trace!("statement starting at {:?}", self.current_token);
        if matches!(self.current_token, Token::Identifier(_)) && self.peek()? == Token::Equals {
            return self.parse_assignment();
        }
        match self.current_token {
            Token::If => self.parse_if_stmt(),
            Token::While => self.parse_while_stmt(),
            Token::Func => self.parse_fn_declaration(),
            Token::Return => self.parse_return_stmt(),
            Token::Hyouji => self.parse_output_stmt(),
            // expression statement (function calls included)
            _ => self.parse_comparison(),
        }
    }

    /// Parses statements up to the closing `}` or the end of input.
    /// A single statement is returned as is, anything else becomes a [`Node::Block`].
    fn parse_stmts(&mut self) -> Result<Node, ParseError> {
        let mut body = Vec::new();
        while self.current_token != Token::CloseBrace && self.current_token != Token::Eof {
            body.push(self.parse_stmt()?);
        }

        if body.len() == 1 {
            Ok(body.remove(0))
        } else {
            Ok(Node::Block(body))
        }
    }

    /// Parses `{ statements }`.
    fn parse_block(&mut self) -> Result<Node, ParseError> {
        self.expect(Token::OpenBrace)?;
        let body = self.parse_stmts()?;
        self.expect(Token::CloseBrace)?;
        Ok(body)
    }

    /// Parses `< comparison >`.
    fn parse_condition(&mut self) -> Result<Node, ParseError> {
        self.expect(Token::LessThan)?;
        let condition = self.parse_comparison()?;
        self.expect(Token::GreaterThan)?;
        Ok(condition)
    }

    fn parse_assignment(&mut self) -> Result<Node, ParseError> {
        let name = self.expect_ident()?;
        self.expect(Token::Equals)?;
        let value = self.parse_comparison()?;
        Ok(Node::Assignment {
            name,
            value: Box::new(value),
        })
    }

    /// Parses one `if`, `else-if` or `else` branch.
    /// `else` takes no condition and gets an always-true one.
    fn parse_branch(&mut self, keyword: Token) -> Result<ConditionalBranch, ParseError> {
        let has_condition = keyword != Token::Else;
        self.expect(keyword)?;
        let condition = if has_condition {
            self.parse_condition()?
        } else {
            Node::BooleanLiteral(true)
        };
        let body = self.parse_block()?;
        Ok(ConditionalBranch { condition, body })
    }

    fn parse_if_stmt(&mut self) -> Result<Node, ParseError> {
        let if_branch = self.parse_branch(Token::If)?;

        let mut else_ifs = Vec::new();
        while self.current_token == Token::ElseIf {
            else_ifs.push(self.parse_branch(Token::ElseIf)?);
        }

        let else_body = if self.current_token == Token::Else {
            Some(Box::new(self.parse_branch(Token::Else)?.body))
        } else {
            None
        };

        Ok(Node::IfStatement {
            condition: Box::new(if_branch.condition),
            then_body: Box::new(if_branch.body),
            else_ifs,
            else_body,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Node, ParseError> {
        self.expect(Token::While)?;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(Node::WhileStatement {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    fn parse_fn_declaration(&mut self) -> Result<Node, ParseError> {
        self.expect(Token::Func)?;
        let name = self.expect_ident()?;
        self.expect(Token::OpenParen)?;
        let mut params = Vec::new();
        if !self.eat(Token::CloseParen)? {
            loop {
                params.push(self.expect_ident()?);

                if self.eat(Token::CloseParen)? {
                    break;
                }
                self.expect(Token::Comma)?;
            }
        }

        let body = self.parse_block()?;

        Ok(Node::FunctionDef(Rc::new(FunctionDef { name, params, body })))
    }

    fn parse_return_stmt(&mut self) -> Result<Node, ParseError> {
        self.expect(Token::Return)?;
        let expr = if self.current_token.starts_expr() {
            Some(Box::new(self.parse_comparison()?))
        } else {
            None
        };
        Ok(Node::ReturnStatement(expr))
    }

    fn parse_output_stmt(&mut self) -> Result<Node, ParseError> {
        self.expect(Token::Hyouji)?;
        self.expect(Token::OpenParen)?;
        let expr = self.parse_comparison()?;
        self.expect(Token::CloseParen)?;
        Ok(Node::OutputStatement(Box::new(expr)))
    }
}
