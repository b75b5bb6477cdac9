//! Selector parsing and matching.
//!
//! Supports the selector forms needed for structural queries over the tree:
//! tag, `#id`, `.class`, `[attr]`, `[attr="value"]`, `*`, compounds of those,
//! descendant (space) and child (`>`) combinators, and comma-separated
//! groups. Tag matching is ASCII case-insensitive (browser convention);
//! class, id and attribute-value comparisons are exact.

use crate::dom::errors::SelectorError;
use crate::dom::node::{Document, Element, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    /// First compound of a complex selector.
    None,
    /// Space: any ancestor.
    Descendant,
    /// `>`: direct parent.
    Child,
}

#[derive(Debug, Clone)]
struct AttrSelector {
    name: String,
    /// `None` means presence check only.
    value: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    universal: bool,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

/// One complex selector: compounds linked by combinators. The combinator
/// stored with a compound relates it to the compound before it.
#[derive(Debug, Clone)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

/// A parsed selector list, ready to match against a [`Document`].
#[derive(Debug, Clone)]
pub struct Selector {
    groups: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
        .parse_list()
    }

    /// True when the element at `id` matches any group of this selector.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.groups
            .iter()
            .any(|complex| complex_matches(doc, id, &complex.parts))
    }
}

impl Document {
    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.elements()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }
}

fn complex_matches(doc: &Document, id: NodeId, parts: &[(Combinator, Compound)]) -> bool {
    let (last_combinator, last) = parts.last().expect("complex selector is never empty");
    compound_matches(doc, id, last)
        && matches_prefix(doc, id, &parts[..parts.len() - 1], *last_combinator)
}

/// `id` matched the compound to the right of `parts`; `combinator` links it
/// to the compound at the end of `parts`.
fn matches_prefix(
    doc: &Document,
    id: NodeId,
    parts: &[(Combinator, Compound)],
    combinator: Combinator,
) -> bool {
    match combinator {
        Combinator::None => true,
        Combinator::Child => {
            let Some(parent) = element_parent(doc, id) else {
                return false;
            };
            let (prev_combinator, prev) = parts.last().expect("child combinator needs a left side");
            compound_matches(doc, parent, prev)
                && matches_prefix(doc, parent, &parts[..parts.len() - 1], *prev_combinator)
        }
        Combinator::Descendant => {
            let (prev_combinator, prev) = parts
                .last()
                .expect("descendant combinator needs a left side");
            let mut current = element_parent(doc, id);
            while let Some(ancestor) = current {
                if compound_matches(doc, ancestor, prev)
                    && matches_prefix(doc, ancestor, &parts[..parts.len() - 1], *prev_combinator)
                {
                    return true;
                }
                current = element_parent(doc, ancestor);
            }
            false
        }
    }
}

fn element_parent(doc: &Document, id: NodeId) -> Option<NodeId> {
    let parent = doc.parent(id)?;
    doc.element(parent).map(|_| parent)
}

fn compound_matches(doc: &Document, id: NodeId, compound: &Compound) -> bool {
    let Some(element) = doc.element(id) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if !element.name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(expected) = &compound.id {
        if element.attr("id") != Some(expected.as_str()) {
            return false;
        }
    }
    if !compound.classes.iter().all(|c| element.has_class(c)) {
        return false;
    }
    compound.attrs.iter().all(|attr| attr_matches(element, attr))
}

fn attr_matches(element: &Element, selector: &AttrSelector) -> bool {
    match &selector.value {
        None => element.has_attr(&selector.name),
        Some(expected) => element.attr(&selector.name) == Some(expected.as_str()),
    }
}

struct SelectorParser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    fn parse_list(mut self) -> Result<Selector, SelectorError> {
        if self.input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut groups = vec![self.parse_complex()?];
        loop {
            self.skip_whitespace();
            if self.eat(b',') {
                groups.push(self.parse_complex()?);
            } else {
                break;
            }
        }
        if self.pos < self.bytes.len() {
            return Err(self.unexpected());
        }
        Ok(Selector { groups })
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        self.skip_whitespace();
        let mut parts = vec![(Combinator::None, self.parse_compound()?)];
        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None | Some(b',') => break,
                Some(b'>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    parts.push((Combinator::Child, self.parse_compound()?));
                }
                Some(_) if had_space => {
                    parts.push((Combinator::Descendant, self.parse_compound()?));
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(Complex { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    compound.universal = true;
                }
                Some(b'.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some(b'#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                Some(b'[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attr_selector()?);
                }
                Some(byte)
                    if self.pos == start && (byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_') =>
                {
                    compound.tag = Some(self.ident()?);
                }
                _ => break,
            }
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn attr_selector(&mut self) -> Result<AttrSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        let value = if self.eat(b'=') {
            self.skip_whitespace();
            Some(self.attr_value()?)
        } else {
            None
        };
        self.skip_whitespace();
        if !self.eat(b']') {
            return Err(SelectorError::UnterminatedAttribute);
        }
        Ok(AttrSelector { name, value })
    }

    fn attr_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while let Some(byte) = self.peek() {
                    if byte == quote {
                        let value = self.input[start..self.pos].to_string();
                        self.pos += 1;
                        return Ok(value);
                    }
                    self.pos += 1;
                }
                Err(SelectorError::UnterminatedAttribute)
            }
            _ => self.ident(),
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self) -> SelectorError {
        SelectorError::UnexpectedToken {
            found: self.input[self.pos..].chars().next().unwrap_or(' '),
            position: self.pos,
        }
    }
}
