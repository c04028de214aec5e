//! XML literal mode.
//!
//! An XML literal starts where an operand is expected and `<` is followed by a name, `!` or `?`.
//! From there the lexer switches between tag, content and embedded-code modes until the root
//! element closes. Whitespace-only text between tags is dropped; the predefined entities and
//! numeric character references are decoded in text and attribute values.

use super::{Lexer, Mode, TokenKind};
use crate::ast::{Location, Span};
use crate::diagnostics::DiagnosticCode;

fn is_xml_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_xml_name_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

impl Lexer<'_> {
    /// Decide whether the `<` just consumed opens an XML literal.
    pub(super) fn xml_literal_ahead(&self) -> bool {
        let rest = self.rest();
        let opens = rest.chars().next().is_some_and(is_xml_name_start)
            || rest.starts_with("!--")
            || rest.starts_with("![CDATA[")
            || rest.starts_with('?');
        opens && self.expects_operand()
    }

    /// Start an XML literal; the `<` is already consumed.
    pub(super) fn begin_xml(&mut self, start: Location) {
        if self.scan_xml_markup(start) {
            return;
        }
        self.add_token(TokenKind::XmlOpenTag, start);
        self.modes.push(Mode::Tag { closing: false });
    }

    /// Comments, CDATA sections and processing instructions after a consumed `<`.
    fn scan_xml_markup(&mut self, start: Location) -> bool {
        if self.rest().starts_with("!--") {
            self.advance_bytes(3);
            let body = self.take_until("-->");
            self.add_token(TokenKind::XmlComment(body), start);
        } else if self.rest().starts_with("![CDATA[") {
            self.advance_bytes(8);
            let body = self.take_until("]]>");
            self.add_token(TokenKind::XmlCData(body), start);
        } else if self.peek() == Some('?') {
            self.advance();
            let body = self.take_until("?>");
            let declaration = body.strip_prefix("xml").is_some_and(|r| r.is_empty() || r.starts_with(char::is_whitespace));
            self.add_token(TokenKind::XmlProcessingInstruction(body), start);
            if declaration && matches!(self.modes.last(), None | Some(Mode::Embedded)) {
                self.modes.push(Mode::Prolog);
            }
        } else {
            return false;
        }
        true
    }

    fn take_until(&mut self, terminator: &str) -> String {
        let rest = self.rest();
        match rest.find(terminator) {
            Some(idx) => {
                self.advance_bytes(idx + terminator.len());
                rest[..idx].to_string()
            }
            None => {
                self.advance_bytes(rest.len());
                let span = Span::point(self.here());
                self.error(DiagnosticCode::UnterminatedXml, format!("expected '{terminator}'"), span);
                rest.to_string()
            }
        }
    }

    fn skip_xml_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    // ========================================================================
    // Modes
    // ========================================================================

    pub(super) fn scan_xml_tag(&mut self, closing: bool) {
        self.skip_xml_whitespace();
        let start = self.here();
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '>' => {
                self.add_token(TokenKind::XmlCloseTag, start);
                self.modes.pop();
                if closing {
                    self.modes.pop();
                    self.finish_element();
                } else {
                    self.modes.push(Mode::Content);
                }
            }
            '/' if self.peek() == Some('>') => {
                self.advance();
                self.add_token(TokenKind::XmlEmptyTagClose, start);
                self.modes.pop();
                self.finish_element();
            }
            '=' => self.add_token(TokenKind::XmlEq, start),
            '"' | '\'' => {
                let rest = self.rest();
                let (raw, consumed) = match rest.find(c) {
                    Some(idx) => (&rest[..idx], idx + 1),
                    None => (rest, rest.len()),
                };
                self.advance_bytes(consumed);
                if consumed == raw.len() {
                    let span = Span::new(start, self.here());
                    self.error(DiagnosticCode::UnterminatedXml, "unterminated attribute value", span);
                }
                self.add_token(TokenKind::XmlAttributeValue(decode_entities(raw)), start);
            }
            '<' if self.rest().starts_with("%=") => {
                self.advance_bytes(2);
                self.add_token(TokenKind::XmlEmbedOpen, start);
                self.modes.push(Mode::Embedded);
            }
            c if is_xml_name_start(c) => {
                while self.peek().is_some_and(is_xml_name_continue) {
                    self.advance();
                }
                let source = self.source;
                let name = &source[start.offset..self.current_pos];
                self.add_token(TokenKind::XmlName(name.to_string()), start);
            }
            _ => {
                let span = Span::new(start, self.here());
                self.error(DiagnosticCode::InvalidCharacter, format!("unexpected character '{c}' in XML tag"), span);
            }
        }
    }

    pub(super) fn scan_xml_content(&mut self) {
        let start = self.here();
        let rest = self.rest();

        if rest.starts_with("<%=") {
            self.advance_bytes(3);
            self.add_token(TokenKind::XmlEmbedOpen, start);
            self.modes.push(Mode::Embedded);
        } else if rest.starts_with("</") {
            self.advance_bytes(2);
            self.add_token(TokenKind::XmlOpenEndTag, start);
            self.modes.push(Mode::Tag { closing: true });
        } else if rest.starts_with('<') {
            self.advance();
            if !self.scan_xml_markup(start) {
                self.add_token(TokenKind::XmlOpenTag, start);
                self.modes.push(Mode::Tag { closing: false });
            }
        } else {
            let len = rest.find('<').unwrap_or(rest.len());
            self.advance_bytes(len);
            let raw = &rest[..len];
            if !raw.trim().is_empty() {
                self.add_token(TokenKind::XmlText(decode_entities(raw)), start);
            }
        }
    }

    /// Between an `<?xml ...?>` declaration and the root element.
    pub(super) fn scan_xml_prolog(&mut self) {
        self.skip_xml_whitespace();
        let start = self.here();
        if self.peek() != Some('<') {
            self.modes.pop();
            return;
        }
        self.advance();
        if !self.scan_xml_markup(start) {
            self.add_token(TokenKind::XmlOpenTag, start);
            self.modes.push(Mode::Tag { closing: false });
        }
    }

    /// An element just closed; if it was a document root, leave the prolog too.
    fn finish_element(&mut self) {
        if self.modes.last() == Some(&Mode::Prolog) {
            self.modes.pop();
        }
    }
}

/// Decode `&lt;`, `&gt;`, `&amp;`, `&quot;`, `&apos;` and `&#...;` references.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        let Some(end) = rest.find(';') else {
            break;
        };
        let entity = &rest[1..end];
        let decoded = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                .and_then(Result::ok)
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::decode_entities;
    use crate::lexer::{TokenKind, lex};

    #[test]
    fn entities_are_decoded() {
        assert_eq!(decode_entities("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&bogus; x"), "&bogus; x");
    }

    #[test]
    fn document_with_declaration() {
        let lexed = lex("Dim d = <?xml version=\"1.0\"?>\n<root/>\nDim y = 1");
        assert!(lexed.diagnostics.is_empty(), "{:?}", lexed.diagnostics);
        let kinds: Vec<_> = lexed.tokens.iter().map(|t| &t.kind).collect();
        assert_eq!(kinds[3], &TokenKind::XmlProcessingInstruction("xml version=\"1.0\"".into()));
        assert_eq!(kinds[4], &TokenKind::XmlOpenTag);
        assert_eq!(kinds[5], &TokenKind::XmlName("root".into()));
        assert_eq!(kinds[6], &TokenKind::XmlEmptyTagClose);
        assert_eq!(kinds[7], &TokenKind::Eol);
    }

    #[test]
    fn nested_elements_and_comments() {
        let lexed = lex("x = <a><!-- c --><b>t &amp; u</b><![CDATA[<raw>]]></a>");
        assert!(lexed.diagnostics.is_empty(), "{:?}", lexed.diagnostics);
        let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind.clone()).collect();
        assert!(kinds.contains(&TokenKind::XmlComment(" c ".into())));
        assert!(kinds.contains(&TokenKind::XmlText("t & u".into())));
        assert!(kinds.contains(&TokenKind::XmlCData("<raw>".into())));
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::XmlOpenEndTag).count(), 2);
    }

    #[test]
    fn unterminated_literal_is_reported() {
        let lexed = lex("x = <a><b>");
        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.diagnostics[0].code, crate::diagnostics::DiagnosticCode::UnterminatedXml);
        assert_eq!(lexed.tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
    }
}
