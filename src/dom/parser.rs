//! Lenient, single-pass, case-preserving HTML parser.
//!
//! Builds the arena tree in parse order (which is document pre-order). Never
//! fails: malformed input degrades to text nodes or ignored close tags. No
//! entity decoding is performed, so stored text serializes back verbatim.

use crate::dom::node::{is_void, Attribute, Document, Element, NodeData, NodeId};
use memchr::memmem;

pub fn parse(source: &str) -> Document {
    Parser::new(source).run()
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    doc: Document,
    /// Open-element stack; index 0 is the synthetic root and is never popped.
    stack: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            doc,
            stack: vec![root],
        }
    }

    fn run(mut self) -> Document {
        let mut text_start = 0;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.pos += 1;
                continue;
            }
            let next = self.bytes.get(self.pos + 1).copied();
            match next {
                Some(b'!') | Some(b'?') if self.starts_with("<!--") => {
                    self.flush_text(text_start);
                    self.consume_comment();
                    text_start = self.pos;
                }
                Some(b'!') | Some(b'?') => {
                    self.flush_text(text_start);
                    self.consume_declaration();
                    text_start = self.pos;
                }
                Some(b'/') => {
                    self.flush_text(text_start);
                    self.consume_close_tag();
                    text_start = self.pos;
                }
                Some(byte) if byte.is_ascii_alphabetic() => {
                    self.flush_text(text_start);
                    self.consume_open_tag();
                    text_start = self.pos;
                }
                // Stray `<` stays part of the surrounding text.
                _ => self.pos += 1,
            }
        }
        self.flush_text(text_start);
        self.doc
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.bytes[self.pos..].starts_with(needle.as_bytes())
    }

    fn top(&self) -> NodeId {
        *self.stack.last().expect("stack always holds the root")
    }

    fn flush_text(&mut self, start: usize) {
        if start < self.pos {
            let text = self.source[start..self.pos].to_string();
            self.doc.push_node(self.top(), NodeData::Text(text));
        }
    }

    /// `<!--` ... `-->`; an unterminated comment swallows the rest of the
    /// input, matching the tag scanner's view of the text.
    fn consume_comment(&mut self) {
        let content_start = self.pos + 4;
        match memmem::find(&self.bytes[content_start..], b"-->") {
            Some(rel) => {
                let content = self.source[content_start..content_start + rel].to_string();
                self.doc.push_node(self.top(), NodeData::Comment(content));
                self.pos = content_start + rel + 3;
            }
            None => {
                let content = self.source[content_start..].to_string();
                self.doc.push_node(self.top(), NodeData::Comment(content));
                self.pos = self.bytes.len();
            }
        }
    }

    /// `<!DOCTYPE ...>` and `<?...?>` declarations, stored raw.
    fn consume_declaration(&mut self) {
        let content_start = self.pos + 1;
        let end = memchr::memchr(b'>', &self.bytes[content_start..])
            .map(|rel| content_start + rel)
            .unwrap_or(self.bytes.len());
        let raw = self.source[content_start..end].to_string();
        self.doc.push_node(self.top(), NodeData::Doctype(raw));
        self.pos = (end + 1).min(self.bytes.len());
    }

    fn consume_close_tag(&mut self) {
        let name_start = self.pos + 2;
        let name_end = self.scan_name(name_start);
        let name = &self.source[name_start..name_end];
        let end = memchr::memchr(b'>', &self.bytes[name_end..])
            .map(|rel| name_end + rel + 1)
            .unwrap_or(self.bytes.len());
        self.pos = end;

        // Pop to the nearest open element with this name; a close tag with no
        // matching open element is ignored.
        if let Some(depth) = self
            .stack
            .iter()
            .rposition(|id| {
                self.doc
                    .tag_name(*id)
                    .is_some_and(|open| open.eq_ignore_ascii_case(name))
            })
        {
            self.stack.truncate(depth);
        }
    }

    fn consume_open_tag(&mut self) {
        let name_start = self.pos + 1;
        let name_end = self.scan_name(name_start);
        let name = self.source[name_start..name_end].to_string();
        self.pos = name_end;

        let mut attrs = Vec::new();
        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos).copied() {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    if self.bytes.get(self.pos + 1) == Some(&b'>') {
                        self_closing = true;
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
                Some(_) => attrs.push(self.consume_attribute()),
            }
        }

        let void = is_void(&name);
        let element = Element { name, attrs };
        let id = self.doc.push_node(self.top(), NodeData::Element(element));
        if !void && !self_closing {
            self.stack.push(id);
        }
    }

    fn consume_attribute(&mut self) -> Attribute {
        let name_start = self.pos;
        while let Some(byte) = self.bytes.get(self.pos) {
            if byte.is_ascii_whitespace() || matches!(*byte, b'=' | b'>' | b'/') {
                break;
            }
            self.pos += 1;
        }
        let name = self.source[name_start..self.pos].to_string();

        self.skip_whitespace();
        if self.bytes.get(self.pos) != Some(&b'=') {
            return Attribute { name, value: None };
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.bytes.get(self.pos).copied() {
            Some(quote @ (b'"' | b'\'')) => {
                let value_start = self.pos + 1;
                let end = memchr::memchr(quote, &self.bytes[value_start..])
                    .map(|rel| value_start + rel)
                    .unwrap_or(self.bytes.len());
                self.pos = (end + 1).min(self.bytes.len());
                self.source[value_start..end].to_string()
            }
            _ => {
                let value_start = self.pos;
                while let Some(byte) = self.bytes.get(self.pos) {
                    if byte.is_ascii_whitespace() || *byte == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
                self.source[value_start..self.pos].to_string()
            }
        };
        Attribute {
            name,
            value: Some(value),
        }
    }

    /// Tag names: leading ASCII letter, then letters, digits, `-`, `_`, `:`.
    fn scan_name(&self, start: usize) -> usize {
        let mut end = start;
        while let Some(byte) = self.bytes.get(end) {
            if byte.is_ascii_alphanumeric() || matches!(*byte, b'-' | b'_' | b':') {
                end += 1;
            } else {
                break;
            }
        }
        end
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|byte| byte.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;

    #[test]
    fn builds_nested_elements_in_document_order() {
        let doc = parse("<ul><li>a</li><li>b</li></ul>");
        let names: Vec<_> = doc
            .elements()
            .filter_map(|id| doc.tag_name(id).map(str::to_string))
            .collect();
        assert_eq!(names, ["ul", "li", "li"]);

        let ul = doc.elements_named("ul")[0];
        let lis = doc.elements_named("li");
        assert_eq!(doc.parent(lis[0]), Some(ul));
        assert_eq!(doc.parent(lis[1]), Some(ul));
    }

    #[test]
    fn preserves_tag_name_case() {
        let doc = parse("<LI>x</LI>");
        assert_eq!(doc.tag_name(doc.elements_named("LI")[0]), Some("LI"));
        assert!(doc.elements_named("li").is_empty());
    }

    #[test]
    fn close_tag_matching_is_case_insensitive() {
        let doc = parse("<div><LI>x</li>after</div>");
        let div = doc.elements_named("div")[0];
        // </li> closed the <LI>, so "after" belongs to the div.
        assert_eq!(doc.outer_html(div), "<div><LI>x</LI>after</div>");
    }

    #[test]
    fn comment_contents_never_become_elements() {
        let doc = parse("<!-- <li>ghost</li> --><li>real</li>");
        assert_eq!(doc.elements_named("li").len(), 1);
    }

    #[test]
    fn attribute_styles() {
        let doc = parse("<input type=\"text\" name='user' disabled value=abc>");
        let input = doc.element(doc.elements_named("input")[0]).unwrap();
        assert_eq!(input.attr("type"), Some("text"));
        assert_eq!(input.attr("name"), Some("user"));
        assert!(input.has_attr("disabled"));
        assert_eq!(input.attr("value"), Some("abc"));
        assert_eq!(input.attrs.len(), 4);
    }

    #[test]
    fn void_and_self_closing_tags_do_not_nest() {
        let doc = parse("<p>a<br>b</p><item/><p>c</p>");
        let ps = doc.elements_named("p");
        assert_eq!(ps.len(), 2);
        // The second paragraph is not a child of <item/>.
        assert_eq!(doc.parent(ps[1]), Some(doc.root()));
    }

    #[test]
    fn doctype_is_kept_but_is_not_an_element() {
        let doc = parse("<!DOCTYPE html>\n<html></html>");
        let root_children = doc.children(doc.root());
        assert!(matches!(doc.data(root_children[0]), NodeData::Doctype(raw) if raw == "!DOCTYPE html"));
        assert_eq!(doc.elements_named("html").len(), 1);
    }

    #[test]
    fn unmatched_close_tag_is_ignored() {
        let doc = parse("<div>a</span>b</div>");
        let div = doc.elements_named("div")[0];
        assert_eq!(doc.outer_html(div), "<div>ab</div>");
    }

    #[test]
    fn stray_angle_bracket_stays_in_text() {
        let doc = parse("<p>1 < 2</p>");
        let p = doc.elements_named("p")[0];
        assert_eq!(doc.outer_html(p), "<p>1 < 2</p>");
    }

    #[test]
    fn text_between_elements_is_preserved_exactly() {
        let doc = parse("<ul>\n    <li>a</li>\n</ul>");
        let ul = doc.elements_named("ul")[0];
        assert_eq!(doc.outer_html(ul), "<ul>\n    <li>a</li>\n</ul>");
    }
}
