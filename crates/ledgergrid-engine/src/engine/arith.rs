//! Arithmetic over fully substituted expressions.
//!
//! A recursive descent parser with the usual precedence: unary sign binds
//! tightest, then `*` and `/`, then `+` and `-`. Only numbers, the four
//! operators and parentheses are accepted; anything else is an error.

use super::error::{FormulaError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Eof,
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let single = match c {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
                continue;
            }
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Star),
            b'/' => Some(Token::Slash),
            b'(' => Some(Token::LeftParen),
            b')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push((token, pos));
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() || c == b'.' {
            let start = pos;
            pos = scan_number(bytes, pos);
            let text = &input[start..pos];
            let value = text
                .parse::<f64>()
                .map_err(|_| FormulaError::InvalidNumber(text.to_string()))?;
            tokens.push((Token::Number(value), start));
            continue;
        }

        let ch = input[pos..].chars().next().unwrap_or('?');
        return Err(FormulaError::UnexpectedChar { ch, pos });
    }

    tokens.push((Token::Eof, input.len()));
    Ok(tokens)
}

/// Returns the end offset of a number literal starting at `pos`.
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            pos = exp;
        }
    }
    pos
}

struct ArithParser {
    tokens: Vec<(Token, usize)>,
    index: usize,
}

impl ArithParser {
    fn peek(&self) -> Token {
        self.tokens.get(self.index).map(|t| t.0).unwrap_or(Token::Eof)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.index).map(|t| t.1).unwrap_or(0)
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    fn parse_expression(&mut self) -> Result<f64> {
        let mut left = self.parse_term()?;
        loop {
            match self.peek() {
                Token::Plus => {
                    self.advance();
                    left += self.parse_term()?;
                }
                Token::Minus => {
                    self.advance();
                    left -= self.parse_term()?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_term(&mut self) -> Result<f64> {
        let mut left = self.parse_unary()?;
        loop {
            match self.peek() {
                Token::Star => {
                    self.advance();
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.advance();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    left /= right;
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<f64> {
        match self.peek() {
            Token::Minus => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            Token::Plus => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<f64> {
        match self.peek() {
            Token::Number(n) => {
                self.advance();
                Ok(n)
            }
            Token::LeftParen => {
                self.advance();
                let value = self.parse_expression()?;
                if self.peek() != Token::RightParen {
                    return Err(FormulaError::UnbalancedParens);
                }
                self.advance();
                Ok(value)
            }
            Token::Eof => Err(FormulaError::UnexpectedEnd),
            Token::RightParen => Err(FormulaError::UnbalancedParens),
            _ => Err(FormulaError::UnexpectedToken(self.position())),
        }
    }
}

/// Evaluate an arithmetic expression containing only numbers, `+ - * /` and parentheses.
pub fn eval_arithmetic(expr: &str) -> Result<f64> {
    let mut parser = ArithParser {
        tokens: tokenize(expr)?,
        index: 0,
    };
    let value = parser.parse_expression()?;

    match parser.peek() {
        Token::Eof => {}
        Token::RightParen => return Err(FormulaError::UnbalancedParens),
        _ => return Err(FormulaError::UnexpectedToken(parser.position())),
    }

    if !value.is_finite() {
        return Err(FormulaError::NonFinite);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(eval_arithmetic("2+3*4"), Ok(14.0));
        assert_eq!(eval_arithmetic("(2+3)*4"), Ok(20.0));
        assert_eq!(eval_arithmetic("10-4-3"), Ok(3.0));
        assert_eq!(eval_arithmetic("24/4/3"), Ok(2.0));
    }

    #[test]
    fn test_unary_and_negative_literals() {
        assert_eq!(eval_arithmetic("-3"), Ok(-3.0));
        assert_eq!(eval_arithmetic("2-(-3)"), Ok(5.0));
        assert_eq!(eval_arithmetic("2*-3"), Ok(-6.0));
        assert_eq!(eval_arithmetic("--4"), Ok(4.0));
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(eval_arithmetic("0.5 + .25"), Ok(0.75));
        assert_eq!(eval_arithmetic("1e3"), Ok(1000.0));
        assert_eq!(eval_arithmetic("2.5E-1"), Ok(0.25));
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(eval_arithmetic("1+"), Err(FormulaError::UnexpectedEnd));
        assert_eq!(eval_arithmetic(""), Err(FormulaError::UnexpectedEnd));
        assert_eq!(eval_arithmetic("(1+2"), Err(FormulaError::UnbalancedParens));
        assert_eq!(eval_arithmetic("1+2)"), Err(FormulaError::UnbalancedParens));
        assert_eq!(eval_arithmetic("1 2"), Err(FormulaError::UnexpectedToken(2)));
        assert!(matches!(
            eval_arithmetic("P1+1"),
            Err(FormulaError::UnexpectedChar { ch: 'P', pos: 0 })
        ));
        assert!(eval_arithmetic(".").is_err());
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval_arithmetic("1/0"), Err(FormulaError::DivisionByZero));
        assert_eq!(eval_arithmetic("1/(2-2)"), Err(FormulaError::DivisionByZero));
    }
}
