/// XML literals.
///
/// The lexer has already switched modes, so the parser only sees `Xml*` tokens plus ordinary
/// tokens inside `<%= ... %>` holes.
impl<'a> Parser<'a> {
    /// A document (`<?xml ...?>` prolog + root) or a single node.
    fn xml_literal(&mut self) -> XmlNode {
        let declaration = match &self.current().kind {
            TokenKind::XmlProcessingInstruction(body) if is_xml_declaration(body) => Some(body.clone()),
            _ => None,
        };
        if let Some(declaration) = declaration {
            self.advance();
            let mut prolog = Vec::new();
            while matches!(
                self.current().kind,
                TokenKind::XmlComment(_) | TokenKind::XmlProcessingInstruction(_)
            ) {
                prolog.push(self.xml_node());
            }
            let root = self.xml_node();
            return XmlNode::Document {
                declaration,
                prolog,
                root: Box::new(root),
            };
        }
        self.xml_node().node
    }

    fn xml_node(&mut self) -> Spanned<XmlNode> {
        let start = self.start();
        let token = self.current();
        let node = match &token.kind {
            TokenKind::XmlOpenTag => return self.xml_element(),
            TokenKind::XmlText(text) => XmlNode::Text(text.clone()),
            TokenKind::XmlComment(text) => XmlNode::Comment(text.clone()),
            TokenKind::XmlCData(text) => XmlNode::CData(text.clone()),
            TokenKind::XmlProcessingInstruction(text) => XmlNode::ProcessingInstruction(text.clone()),
            TokenKind::XmlEmbedOpen => XmlNode::Embedded(Box::new(self.xml_embedded())),
            _ => {
                self.expected(DiagnosticCode::ExpectedExpression, "XML element");
                return Spanned::new(XmlNode::Text(String::new()), Span::point(start));
            }
        };
        if !matches!(node, XmlNode::Embedded(_)) {
            self.advance();
        }
        Spanned::new(node, self.span_from(start))
    }

    /// `<name attrs>content</name>` or `<name attrs/>`
    fn xml_element(&mut self) -> Spanned<XmlNode> {
        let start = self.start();
        self.advance();
        let name = self.xml_name();

        let mut attributes = Vec::new();
        loop {
            let attr_start = self.start();
            let attribute = match &self.current().kind {
                TokenKind::XmlName(attr) => {
                    let name = attr.clone();
                    self.advance();
                    XmlAttribute::Named {
                        name,
                        value: self.xml_attribute_value(),
                    }
                }
                TokenKind::XmlEmbedOpen => XmlAttribute::Embedded(Box::new(self.xml_embedded())),
                _ => break,
            };
            attributes.push(Spanned::new(attribute, self.span_from(attr_start)));
        }

        if self.match_token(&TokenKind::XmlEmptyTagClose) {
            let element = XmlNode::Element {
                name,
                attributes,
                content: Vec::new(),
                empty: true,
            };
            return Spanned::new(element, self.span_from(start));
        }
        if !self.match_token(&TokenKind::XmlCloseTag) {
            self.expected(DiagnosticCode::ExpectedToken, "'>'");
        }

        let mut content = Vec::new();
        while self.current().kind.is_xml() && !matches!(self.current().kind, TokenKind::XmlOpenEndTag) {
            let before = self.pos;
            content.push(self.xml_node());
            if self.pos == before {
                break;
            }
        }

        if self.match_token(&TokenKind::XmlOpenEndTag) {
            let end_start = self.start();
            if matches!(self.current().kind, TokenKind::XmlName(_) | TokenKind::XmlEmbedOpen) {
                let end_name = self.xml_name();
                if let (XmlName::Literal(open), XmlName::Literal(close)) = (&name, &end_name) {
                    if open != close {
                        self.error_at(
                            DiagnosticCode::InvalidExpression,
                            format!("end tag '{close}' does not match start tag '{open}'"),
                            self.span_from(end_start),
                        );
                    }
                }
            }
            if !self.match_token(&TokenKind::XmlCloseTag) {
                self.expected(DiagnosticCode::ExpectedToken, "'>'");
            }
        } else {
            let expected = match &name {
                XmlName::Literal(name) => format!("'</{name}>'"),
                XmlName::Embedded(_) => "'</>'".to_string(),
            };
            self.expected(DiagnosticCode::ExpectedToken, &expected);
        }

        let element = XmlNode::Element {
            name,
            attributes,
            content,
            empty: false,
        };
        Spanned::new(element, self.span_from(start))
    }

    fn xml_name(&mut self) -> XmlName {
        match &self.current().kind {
            TokenKind::XmlName(name) => {
                let name = name.clone();
                self.advance();
                XmlName::Literal(name)
            }
            TokenKind::XmlEmbedOpen => XmlName::Embedded(Box::new(self.xml_embedded())),
            _ => {
                self.expected(DiagnosticCode::ExpectedIdentifier, "XML name");
                XmlName::Literal(String::new())
            }
        }
    }

    /// `= "value"` or `= <%= expr %>` after an attribute name.
    fn xml_attribute_value(&mut self) -> XmlAttributeValue {
        if !self.match_token(&TokenKind::XmlEq) {
            self.expected(DiagnosticCode::ExpectedToken, "'='");
            return XmlAttributeValue::Literal(String::new());
        }
        match &self.current().kind {
            TokenKind::XmlAttributeValue(value) => {
                let value = value.clone();
                self.advance();
                XmlAttributeValue::Literal(value)
            }
            TokenKind::XmlEmbedOpen => XmlAttributeValue::Embedded(Box::new(self.xml_embedded())),
            _ => {
                self.expected(DiagnosticCode::ExpectedToken, "attribute value");
                XmlAttributeValue::Literal(String::new())
            }
        }
    }

    /// `<%= expr %>`
    fn xml_embedded(&mut self) -> Spanned<Expr> {
        self.advance();
        let expr = self.expression();
        if !self.match_token(&TokenKind::XmlEmbedClose) {
            self.expected(DiagnosticCode::ExpectedToken, "'%>'");
        }
        expr
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.current().kind == *kind {
            self.advance();
            true
        } else {
            false
        }
    }
}

/// `xml version="1.0"` as opposed to an ordinary processing instruction.
fn is_xml_declaration(body: &str) -> bool {
    body.strip_prefix("xml")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
