/// Query expressions (`From x In xs Where ... Select ...`).
///
/// A query is a run of clauses; it ends at the first token that does not open another clause.
/// Clause keywords are mostly contextual, so they only act as clause openers here.
impl<'a> Parser<'a> {
    fn query_expression(&mut self) -> Spanned<Expr> {
        let start = self.start();
        let mut clauses = Vec::new();
        while let Some(clause) = self.query_clause() {
            clauses.push(clause);
        }
        Spanned::new(Expr::Query(clauses), self.span_from(start))
    }

    fn query_clause(&mut self) -> Option<Spanned<QueryClause>> {
        let start = self.start();
        let clause = match self.current().keyword_id()? {
            KeywordId::From if self.identifier_like_at(1) => {
                self.advance();
                QueryClause::From(self.range_variables())
            }
            KeywordId::Aggregate => {
                self.advance();
                let variables = self.range_variables();
                let mut clauses = Vec::new();
                while let Some(clause) = self.query_clause() {
                    clauses.push(clause);
                }
                self.expect_keyword(KeywordId::Into);
                QueryClause::Aggregate {
                    variables,
                    clauses,
                    into: self.field_list(),
                }
            }
            KeywordId::Select => {
                self.advance();
                QueryClause::Select(self.field_list())
            }
            KeywordId::Where => {
                self.advance();
                QueryClause::Where(self.expression())
            }
            KeywordId::Order if self.check_keyword_at(1, KeywordId::By) => {
                self.advance();
                self.advance();
                let mut orderings = vec![self.ordering()];
                while self.match_punct(PunctuationId::Comma) {
                    orderings.push(self.ordering());
                }
                QueryClause::OrderBy(orderings)
            }
            KeywordId::Join => {
                self.advance();
                let (variable, conditions) = self.join_source();
                QueryClause::Join { variable, conditions }
            }
            KeywordId::Group if self.check_keyword_at(1, KeywordId::Join) => {
                self.advance();
                self.advance();
                let (variable, conditions) = self.join_source();
                self.expect_keyword(KeywordId::Into);
                QueryClause::GroupJoin {
                    variable,
                    conditions,
                    into: self.field_list(),
                }
            }
            KeywordId::Group => {
                self.advance();
                let items = if self.check_keyword(KeywordId::By) { Vec::new() } else { self.field_list() };
                self.expect_keyword(KeywordId::By);
                let keys = self.field_list();
                self.expect_keyword(KeywordId::Into);
                QueryClause::GroupBy {
                    items,
                    keys,
                    into: self.field_list(),
                }
            }
            KeywordId::Let => {
                self.advance();
                QueryClause::Let(self.field_list())
            }
            KeywordId::Distinct => {
                self.advance();
                QueryClause::Distinct
            }
            KeywordId::Skip => {
                self.advance();
                if self.match_keyword(KeywordId::While) {
                    QueryClause::SkipWhile(self.expression())
                } else {
                    QueryClause::Skip(self.expression())
                }
            }
            KeywordId::Take => {
                self.advance();
                if self.match_keyword(KeywordId::While) {
                    QueryClause::TakeWhile(self.expression())
                } else {
                    QueryClause::Take(self.expression())
                }
            }
            _ => return None,
        };
        Some(Spanned::new(clause, self.span_from(start)))
    }

    fn range_variables(&mut self) -> Vec<Spanned<RangeVariable>> {
        let mut variables = vec![self.range_variable()];
        while self.match_punct(PunctuationId::Comma) {
            variables.push(self.range_variable());
        }
        variables
    }

    /// `x [As T] In source`
    fn range_variable(&mut self) -> Spanned<RangeVariable> {
        let start = self.start();
        let name = self.identifier();
        let ty = self.as_clause();
        self.expect_keyword(KeywordId::In);
        let source = self.expression();
        Spanned::new(RangeVariable { name, ty, source }, self.span_from(start))
    }

    /// `y In ys On a Equals b [And c Equals d]`
    fn join_source(&mut self) -> (Spanned<RangeVariable>, Vec<Spanned<JoinCondition>>) {
        let variable = self.range_variable();
        self.expect_keyword(KeywordId::On);
        let mut conditions = vec![self.join_condition()];
        while self.match_keyword(KeywordId::And) {
            conditions.push(self.join_condition());
        }
        (variable, conditions)
    }

    fn join_condition(&mut self) -> Spanned<JoinCondition> {
        let start = self.start();
        // Operands stop below `And`, which separates conditions.
        let left = self.binary(PrecedenceTier::LogicalNot);
        self.expect_keyword(KeywordId::Equals);
        let right = self.binary(PrecedenceTier::LogicalNot);
        Spanned::new(JoinCondition { left, right }, self.span_from(start))
    }

    fn ordering(&mut self) -> Spanned<Ordering> {
        let start = self.start();
        let expr = self.expression();
        let descending = if self.match_keyword(KeywordId::Descending) {
            true
        } else {
            self.match_keyword(KeywordId::Ascending);
            false
        };
        Spanned::new(Ordering { expr, descending }, self.span_from(start))
    }

    fn field_list(&mut self) -> Vec<Spanned<FieldInitializer>> {
        let mut fields = vec![self.field_initializer(true)];
        while self.match_punct(PunctuationId::Comma) {
            fields.push(self.field_initializer(true));
        }
        fields
    }
}
