//! Query building for item lookups.
//!
//! Query text may end with the fuzzy marker `?`. Marked text matches
//! loosely: tokens of `FUZZY_MIN_LEN` characters or more tolerate one edit
//! and the last token matches as a prefix. Unmarked text matches exact
//! tokens.

use tantivy::query::{BooleanQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::Term;

use shopsearch_core::traits::FUZZY_MARKER;

use crate::tantivy_utils::analyze;

const FUZZY_MIN_LEN: usize = 4;

/// Analyzed query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText {
	pub tokens: Vec<String>,
	pub fuzzy: bool,
}

impl QueryText {
	pub fn parse(text: &str) -> Self {
		let fuzzy = text.trim_end().ends_with(FUZZY_MARKER);
		let body = text.replace(FUZZY_MARKER, " ");
		Self { tokens: analyze(&body), fuzzy }
	}

	pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

	fn token_query(&self, field: Field, idx: usize) -> Box<dyn Query> {
		let token = &self.tokens[idx];
		let term = Term::from_field_text(field, token);
		if !self.fuzzy {
			return Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
		}
		let distance = if token.chars().count() >= FUZZY_MIN_LEN { 1 } else { 0 };
		if idx + 1 == self.tokens.len() {
			Box::new(FuzzyTermQuery::new_prefix(term, distance, true))
		} else {
			Box::new(FuzzyTermQuery::new(term, distance, true))
		}
	}

	fn token_in_fields(&self, fields: &[Field], idx: usize) -> Box<dyn Query> {
		if fields.len() == 1 {
			return self.token_query(fields[0], idx);
		}
		let clauses = fields.iter().map(|f| (Occur::Should, self.token_query(*f, idx))).collect();
		Box::new(BooleanQuery::new(clauses))
	}

	/// Every token must occur in at least one of `fields`. `None` when the
	/// text has no tokens.
	pub fn all_tokens(&self, fields: &[Field]) -> Option<Box<dyn Query>> {
		self.combine(fields, Occur::Must)
	}

	/// Any token in any of `fields`.
	pub fn any_token(&self, fields: &[Field]) -> Option<Box<dyn Query>> {
		self.combine(fields, Occur::Should)
	}

	fn combine(&self, fields: &[Field], occur: Occur) -> Option<Box<dyn Query>> {
		if self.is_empty() || fields.is_empty() {
			return None;
		}
		let clauses = (0..self.tokens.len()).map(|i| (occur, self.token_in_fields(fields, i))).collect();
		Some(Box::new(BooleanQuery::new(clauses)))
	}
}

/// Conjunction of the present clauses; `None` when no clause is present, so a
/// lookup with nothing to look for finds nothing.
pub fn must_all(clauses: Vec<Option<Box<dyn Query>>>) -> Option<Box<dyn Query>> {
	let clauses: Vec<(Occur, Box<dyn Query>)> = clauses.into_iter().flatten().map(|q| (Occur::Must, q)).collect();
	if clauses.is_empty() {
		return None;
	}
	Some(Box::new(BooleanQuery::new(clauses)))
}

pub fn id_query(field: Field, id: i64) -> Box<dyn Query> {
	Box::new(TermQuery::new(Term::from_field_i64(field, id), IndexRecordOption::Basic))
}

/// Literal, case-insensitive prefix on a raw (untokenized) field.
pub fn prefix_query(field: Field, prefix: &str) -> tantivy::Result<Box<dyn Query>> {
	let pattern = format!("{}.*", regex::escape(&prefix.to_lowercase()));
	Ok(Box::new(RegexQuery::from_pattern(&pattern, field)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn marker_switches_to_fuzzy() {
		let q = QueryText::parse("Red Shoe?");
		assert!(q.fuzzy);
		assert_eq!(q.tokens, vec!["red", "shoe"]);

		let q = QueryText::parse("red shoe");
		assert!(!q.fuzzy);
	}

	#[test]
	fn bare_marker_has_no_tokens() {
		let q = QueryText::parse("?");
		assert!(q.fuzzy);
		assert!(q.is_empty());
		assert!(q.all_tokens(&[]).is_none());
	}

	#[test]
	fn no_clauses_means_no_query() {
		assert!(must_all(vec![None, None]).is_none());
		let mut builder = tantivy::schema::Schema::builder();
		let field = builder.add_i64_field("id", tantivy::schema::INDEXED);
		assert!(must_all(vec![None, Some(id_query(field, 1))]).is_some());
	}
}
