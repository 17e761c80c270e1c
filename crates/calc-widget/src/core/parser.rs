//! Tokenizer and recursive-descent parser for keypad expressions
//!
//! The grammar is deliberately small: four binary operators, unary minus
//! and a postfix percent bound to a single literal. Anything else is a
//! parse error, nothing is ever executed.

use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (or unary minus, depending on position)
    Operator(Operation),
    /// Postfix percent
    Percent,
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Literal scaled by 0.01
    Percent(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new percent node
    #[must_use]
    pub fn percent(inner: AstNode) -> Self {
        Self::Percent(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
///
/// Accepts both the display glyphs (`×`, `÷`, `−`) and their ASCII forms.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '%' => {
                self.advance();
                Token::Percent
            }
            _ => match Operation::from_char(ch) {
                Some(op) => {
                    self.advance();
                    Token::Operator(op)
                }
                None => {
                    return Err(CalcError::parse(format!("Unexpected character: '{ch}'")));
                }
            },
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::parse(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= '-' unary | primary
/// primary    ::= NUMBER '%'?
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses tokens into an AST, requiring every token to be consumed
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::parse(format!(
                "Unexpected token {token:?} at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn binary_operator(&self, precedence: u8) -> Option<Operation> {
        match self.current() {
            Some(Token::Operator(op)) if op.precedence() == precedence => Some(*op),
            _ => None,
        }
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.binary_operator(1) {
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.binary_operator(2) {
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        if matches!(self.current(), Some(Token::Operator(Operation::Subtract))) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(AstNode::negate(inner));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::parse("Unexpected end of expression"))?;

        let literal = match token {
            Token::Number(n) => AstNode::number(*n),
            other => return Err(CalcError::parse(format!("Unexpected token: {other:?}"))),
        };

        if matches!(self.current(), Some(Token::Percent)) {
            self.advance();
            return Ok(AstNode::percent(literal));
        }

        Ok(literal)
    }
}
