//! Selector string parser
//!
//! Hand-rolled recursive-descent parser over the selector grammar. Errors
//! carry the character position of the offending input; nothing is recovered.

use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    SelectorList, SimpleSelector,
};
use crate::SelectorError;

pub(crate) fn parse(input: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    if parser.at_end() {
        return Err(SelectorError::Empty);
    }

    let mut list = Vec::new();
    loop {
        list.push(parser.parse_complex()?);
        parser.skip_ws();
        match parser.peek() {
            None => break,
            Some(',') => {
                parser.bump();
                parser.skip_ws();
            }
            Some(found) => {
                return Err(SelectorError::Unexpected {
                    pos: parser.pos,
                    found,
                });
            }
        }
    }

    tracing::trace!(selectors = list.len(), "parsed selector list");
    Ok(SelectorList(list))
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Skip whitespace, returning whether any was consumed
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn is_ident_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
    }

    fn starts_simple(c: char) -> bool {
        c == '*' || c == '#' || c == '.' || c == '[' || c == ':' || Self::is_ident_char(c)
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(found) => SelectorError::Unexpected {
                    pos: self.pos,
                    found,
                },
                None => SelectorError::Empty,
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let Some(c) = self.peek() else { break };

            let combinator = match c {
                '>' => {
                    self.bump();
                    self.skip_ws();
                    Combinator::Child
                }
                '+' => {
                    self.bump();
                    self.skip_ws();
                    Combinator::NextSibling
                }
                '~' => {
                    self.bump();
                    self.skip_ws();
                    Combinator::SubsequentSibling
                }
                _ if had_ws && Self::starts_simple(c) => Combinator::Descendant,
                _ => break,
            };

            compounds.push(self.parse_compound()?);
            combinators.push(combinator);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut parts = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                '*' => {
                    self.bump();
                    parts.push(SimpleSelector::Universal);
                }
                '#' => {
                    self.bump();
                    parts.push(SimpleSelector::Id(self.ident()?));
                }
                '.' => {
                    self.bump();
                    parts.push(SimpleSelector::Class(self.ident()?));
                }
                '[' => {
                    parts.push(SimpleSelector::Attribute(self.parse_attribute()?));
                }
                ':' => {
                    self.bump();
                    if self.peek() == Some(':') {
                        self.bump();
                    }
                    let name = self.ident().unwrap_or_default();
                    return Err(SelectorError::UnsupportedPseudo(name));
                }
                _ if Self::is_ident_char(c) => {
                    parts.push(SimpleSelector::Type(self.ident()?));
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(match self.peek() {
                Some(found) => SelectorError::Unexpected {
                    pos: self.pos,
                    found,
                },
                None => SelectorError::Empty,
            });
        }
        Ok(CompoundSelector { parts })
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.bump(); // '['
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();

        let matcher = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.bump();
                Some(AttributeMatcher::Exact(self.attribute_value()?))
            }
            Some(op @ ('~' | '|' | '^' | '$' | '*')) => {
                self.bump();
                if self.bump() != Some('=') {
                    return Err(SelectorError::Unexpected {
                        pos: self.pos.saturating_sub(1),
                        found: op,
                    });
                }
                let value = self.attribute_value()?;
                Some(match op {
                    '~' => AttributeMatcher::Contains(value),
                    '|' => AttributeMatcher::DashMatch(value),
                    '^' => AttributeMatcher::Prefix(value),
                    '$' => AttributeMatcher::Suffix(value),
                    _ => AttributeMatcher::Substring(value),
                })
            }
            Some(found) => {
                return Err(SelectorError::Unexpected {
                    pos: self.pos,
                    found,
                });
            }
            None => return Err(SelectorError::UnterminatedAttribute),
        };

        self.skip_ws();
        let mut case_insensitive = false;
        if matches!(self.peek(), Some('i' | 'I')) {
            self.bump();
            case_insensitive = true;
            self.skip_ws();
        }

        match self.bump() {
            Some(']') => Ok(AttributeSelector {
                name,
                matcher,
                case_insensitive,
            }),
            Some(found) => Err(SelectorError::Unexpected {
                pos: self.pos - 1,
                found,
            }),
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        self.skip_ws();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == quote {
                        let value: String = self.chars[start..self.pos].iter().collect();
                        self.bump();
                        return Ok(value);
                    }
                    self.pos += 1;
                }
                Err(SelectorError::UnterminatedAttribute)
            }
            Some(_) => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c != ']' && !c.is_whitespace())
                {
                    self.pos += 1;
                }
                Ok(self.chars[start..self.pos].iter().collect())
            }
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }
}
