//! C#-style type expressions used in manifest field declarations.
//!
//! ```text
//! type   := path args? suffix*
//! path   := ident ("." ident)*
//! args   := "<" type ("," type)* ">"
//! suffix := "?" | "[" "]"
//! ```
//!
//! Examples: `int`, `string?`, `AssetCode?`, `int[]`, `CompanyAsset?[]?`,
//! `IReadOnlyCollection<CompanyAsset>`, `System.Collections.Generic.Dictionary<int, string>`.
//!
//! Parsing is purely syntactic; names are resolved by the manifest loader.

use std::fmt;

use thiserror::Error;

/// Parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named {
        /// Dotted name segments; the last one is the simple name.
        path: Vec<String>,
        args: Vec<TypeExpr>,
        nullable: bool,
    },
    Array {
        element: Box<TypeExpr>,
        nullable: bool,
    },
}

impl TypeExpr {
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Named { nullable, .. } | Self::Array { nullable, .. } => *nullable,
        }
    }

    fn set_nullable(&mut self) {
        match self {
            Self::Named { nullable, .. } | Self::Array { nullable, .. } => *nullable = true,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named {
                path,
                args,
                nullable,
            } => {
                f.write_str(&path.join("."))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            Self::Array { element, nullable } => {
                write!(f, "{element}[]")?;
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type expression '{input}' at column {column}: {message}")]
pub struct TypeExprError {
    pub input: String,
    pub column: usize,
    pub message: String,
}

/// Parse a complete type expression.
pub fn parse(input: &str) -> Result<TypeExpr, TypeExprError> {
    let mut parser = Parser { input, pos: 0 };
    let ty = parser.parse_type()?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(ty),
        Some(c) => Err(parser.error(format!("unexpected '{c}'"))),
    }
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeExprError> {
        if self.eat(expected) {
            Ok(())
        } else {
            let found = self
                .peek()
                .map_or_else(|| "end of input".to_string(), |c| format!("'{c}'"));
            Err(self.error(format!("expected '{expected}', found {found}")))
        }
    }

    fn error(&self, message: impl Into<String>) -> TypeExprError {
        TypeExprError {
            input: self.input.to_string(),
            column: self.input[..self.pos].chars().count() + 1,
            message: message.into(),
        }
    }

    fn ident(&mut self) -> Result<String, TypeExprError> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            let ok = if self.pos == start {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || c == '_'
            };
            if !ok {
                break;
            }
            self.pos += c.len_utf8();
        }
        if self.pos == start {
            return Err(self.error("expected a type name"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_type(&mut self) -> Result<TypeExpr, TypeExprError> {
        let mut path = vec![self.ident()?];
        while self.eat('.') {
            path.push(self.ident()?);
        }

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('>')?;
        }

        let mut ty = TypeExpr::Named {
            path,
            args,
            nullable: false,
        };

        loop {
            if self.eat('?') {
                if ty.is_nullable() {
                    return Err(self.error("duplicate '?'"));
                }
                ty.set_nullable();
            } else if self.eat('[') {
                self.expect(']')?;
                ty = TypeExpr::Array {
                    element: Box::new(ty),
                    nullable: false,
                };
            } else {
                break;
            }
        }

        Ok(ty)
    }
}
