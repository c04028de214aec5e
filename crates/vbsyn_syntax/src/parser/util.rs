/// Small shared parsing helpers.
impl<'a> Parser<'a> {
    /// `[Global.]A.B.C`: namespace names, attribute names and the name part of a type.
    fn qualified_name(&mut self) -> QualifiedName {
        let mut name = QualifiedName::default();
        if self.match_keyword(KeywordId::Global) {
            name.global = true;
            self.expect_punct(PunctuationId::Dot);
            name.segments.push(self.member_name());
        } else {
            name.segments.push(self.identifier());
        }
        while self.qualified_name_continues() {
            self.advance();
            name.segments.push(self.member_name());
        }
        name
    }
}
