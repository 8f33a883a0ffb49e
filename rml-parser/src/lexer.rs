use crate::error::LexError;
use logos::Logos;
use std::fmt;

#[derive(Debug, Logos, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
#[logos(error = LexError)]
pub enum Token {
    // literals
    #[regex(r"[0-9]+", lex_int)]
    IntLit(i64),
    #[token("\"", lex_string)]
    #[token("'", lex_string)]
    StringLit(String),

    // identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(\?!|!\?|\?|!)?", |lex| lex.slice().to_string())]
    Identifier(String),

    // keywords
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("else-if")]
    ElseIf,
    #[token("while")]
    While,
    #[token("func")]
    Func,
    #[token("return")]
    Return,
    #[token("hyouji")]
    Hyouji,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    // - assignment
    #[token("=")]
    Equals,
    // - comparison
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    #[token("=<")]
    EqualsLess,
    #[token("=>")]
    EqualsGreater,
    /// Also opens a condition (`if < cond > { }`).
    #[token("<")]
    LessThan,
    /// Also closes a condition when directly followed by `{`.
    #[token(">")]
    GreaterThan,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,

    /// Only generated by [`Lexer`] when the underlying lexer is exhausted.
    Eof,
}

impl Token {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Comparison */
            Token::EqualsEquals
            | Token::NotEquals
            | Token::LessThan
            | Token::GreaterThan
            | Token::EqualsLess
            | Token::EqualsGreater => Some((4, 5)),
            /* Additive */
            Token::Plus | Token::Minus => Some((6, 7)),
            /* Multiplicative */
            Token::Asterisk | Token::Slash => Some((8, 9)),
            _ => None,
        }
    }

    /// Returns `true` if the token is one of the six comparison operators.
    pub fn is_comparison(&self) -> bool {
        matches!(self.binop_bp(), Some((4, 5)))
    }

    /// Returns `true` if an expression can start with this token.
    pub fn starts_expr(&self) -> bool {
        matches!(
            self,
            Token::IntLit(_)
                | Token::StringLit(_)
                | Token::Identifier(_)
                | Token::True
                | Token::False
                | Token::OpenParen
        )
    }

    /// The name of the token kind, used in "Expected X, got Y" messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::IntLit(_) => "int",
            Token::StringLit(_) => "string",
            Token::Identifier(_) => "identifier",
            Token::True => "true",
            Token::False => "false",
            Token::If => "if",
            Token::Else => "else",
            Token::ElseIf => "else_if",
            Token::While => "while",
            Token::Func => "func",
            Token::Return => "return",
            Token::Hyouji => "hyouji",
            Token::Plus => "plus",
            Token::Minus => "minus",
            Token::Asterisk => "asterisk",
            Token::Slash => "slash",
            Token::Equals => "equals",
            Token::EqualsEquals => "equal_equal",
            Token::NotEquals => "not_equal",
            Token::EqualsLess => "equal_less",
            Token::EqualsGreater => "equal_greater",
            Token::LessThan => "less",
            Token::GreaterThan => "greater",
            Token::OpenParen => "l_paren",
            Token::CloseParen => "r_paren",
            Token::OpenBrace => "l_brace",
            Token::CloseBrace => "r_brace",
            Token::Comma => "comma",
            Token::Eof => "eol",
        }
    }
}

/// Prints the token the way it is spelled in source code.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::IntLit(val) => return write!(f, "{}", val),
            Token::StringLit(val) => return write!(f, "{:?}", val),
            Token::Identifier(ident) => return write!(f, "{}", ident),
            Token::True => "true",
            Token::False => "false",
            Token::If => "if",
            Token::Else => "else",
            Token::ElseIf => "else-if",
            Token::While => "while",
            Token::Func => "func",
            Token::Return => "return",
            Token::Hyouji => "hyouji",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Equals => "=",
            Token::EqualsEquals => "==",
            Token::NotEquals => "!=",
            Token::EqualsLess => "=<",
            Token::EqualsGreater => "=>",
            Token::LessThan => "<",
            Token::GreaterThan => ">",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::Comma => ",",
            Token::Eof => "end of input",
        };
        f.write_str(text)
    }
}

fn lex_int(lex: &mut logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice()
        .parse()
        .map_err(|_| LexError::IntegerOutOfRange(lex.slice().to_string()))
}

/// Scans the body of a string literal. `lex.slice()` is the opening quote.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let quote = lex.slice().chars().next().unwrap_or('"');
    let mut value = String::new();
    let mut chars = lex.remainder().char_indices();

    while let Some((offset, c)) = chars.next() {
        if c == quote {
            lex.bump(offset + c.len_utf8());
            return Ok(value);
        }
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some((_, 'n')) => value.push('\n'),
            Some((_, 't')) => value.push('\t'),
            Some((_, 'r')) => value.push('\r'),
            Some((_, '"')) => value.push('"'),
            Some((_, '\'')) => value.push('\''),
            Some((_, '\\')) => value.push('\\'),
            Some((_, other)) => return Err(LexError::UnknownEscapeSequence(other)),
            None => return Err(LexError::UnterminatedStringEscape),
        }
    }

    Err(LexError::UnterminatedString)
}

/// Pull-based lexer with one token of lookahead.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    /// Token buffered by [`Lexer::peek`].
    peeked: Option<Result<Token, LexError>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: Token::lexer(source),
            peeked: None,
        }
    }

    /// Returns the next token and advances. Yields [`Token::Eof`] forever once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.lex(),
        }
    }

    /// Returns the next token without advancing.
    pub fn peek(&mut self) -> Result<Token, LexError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lex());
        }
        self.peeked.clone().unwrap_or(Ok(Token::Eof))
    }

    fn lex(&mut self) -> Result<Token, LexError> {
        match self.inner.next() {
            None => Ok(Token::Eof),
            Some(Ok(token)) => Ok(token),
            // logos reports unmatched input with the default error, fill in the offending text
            Some(Err(LexError::UnknownCharacter(text))) if text.is_empty() => {
                Err(LexError::UnknownCharacter(self.inner.slice().to_string()))
            }
            Some(Err(err)) => Err(err),
        }
    }
}
