use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression, comparisons included.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Node, ParseError> {
        match self.current_token {
            Token::IntLit(_) | Token::StringLit(_) | Token::True | Token::False => {
                self.parse_literal_expr()
            }
            Token::Identifier(_) => self.parse_identifier_or_call_expr(),
            Token::OpenParen => {
                self.next()?;
                let expr = self.parse_comparison()?;
                self.expect(Token::CloseParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_comparison`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Node, ParseError> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current_token.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }
            if self.closes_condition()? {
                break;
            }

            // self.current_token is a valid binop
            let op = self.next()?;
            let rhs = self.parse_expr_bp(r_bp)?;

            let lhs_node = Box::new(lhs);
            let rhs_node = Box::new(rhs);
            lhs = if op.is_comparison() {
                Node::ComparisonOp {
                    lhs: lhs_node,
                    op,
                    rhs: rhs_node,
                }
            } else {
                Node::BinaryOp {
                    lhs: lhs_node,
                    op,
                    rhs: rhs_node,
                }
            };
        }

        Ok(lhs)
    }

    /// A `>` directly followed by `{` ends a condition instead of starting a comparison.
    fn closes_condition(&mut self) -> Result<bool, ParseError> {
        Ok(self.current_token == Token::GreaterThan && self.peek()? == Token::OpenBrace)
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be an integer, a string or a boolean.
    fn parse_literal_expr(&mut self) -> Result<Node, ParseError> {
        let val = match self.current_token {
            Token::IntLit(val) => Node::IntegerLiteral(val),
            Token::StringLit(ref val) => Node::StringLiteral(val.clone()),
            Token::True => Node::BooleanLiteral(true),
            Token::False => Node::BooleanLiteral(false),
            _ => return Err(self.unexpected()),
        };
        self.next()?; // eat parsed token
        Ok(val)
    }

    /* Expressions.Identifier */
    /// Parses a variable or a call expression.
    fn parse_identifier_or_call_expr(&mut self) -> Result<Node, ParseError> {
        let name = self.expect_ident()?;

        if self.eat(Token::OpenParen)? {
            // parse call expression
            let mut args = Vec::new();

            if !self.eat(Token::CloseParen)? {
                loop {
                    args.push(self.parse_comparison()?);

                    if self.eat(Token::CloseParen)? {
                        break;
                    }
                    self.expect(Token::Comma)?;
                }
            }

            Ok(Node::FunctionCall { name, args })
        } else {
            // parse variable expression
            Ok(Node::Variable(name))
        }
    }
}
