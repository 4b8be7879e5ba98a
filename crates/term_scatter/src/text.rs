//! Source documents and the tokenizer.
//!
//! Tokenization is intentionally minimal: only literal `.` characters are
//! removed before splitting, so other punctuation that is neither a word
//! character nor `'` acts as a delimiter while a period joins its neighbours
//! (`"end.Next"` becomes `"endnext"`). The behavior is kept as-is for
//! compatibility with existing documents and presets.
use std::ops::Index;
use std::sync::LazyLock;

use regex::Regex;

/// Runs of characters that are neither ASCII word characters nor apostrophes.
static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_']+").expect("delimiter pattern is valid"));

/// Raw text of a fetched document. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    text: String,
}

impl SourceDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<String> for SourceDocument {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SourceDocument {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Ordered lowercase tokens in document order.
///
/// Empty tokens produced by leading or trailing delimiters are kept; they never
/// match a non-empty watch term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Ascending indices of tokens exactly equal to `term`.
    pub fn positions<'a>(&'a self, term: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(_, token)| token.as_str() == term)
            .map(|(i, _)| i)
    }

    /// Number of tokens exactly equal to `term`.
    pub fn count(&self, term: &str) -> usize {
        self.positions(term).count()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.tokens
    }
}

impl Index<usize> for TokenSequence {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Tokenize a document: strip `.`, lowercase, split on non-word runs.
pub fn tokenize(doc: &SourceDocument) -> TokenSequence {
    tokenize_str(doc.text())
}

/// Tokenize raw text. See [`tokenize`].
pub fn tokenize_str(text: &str) -> TokenSequence {
    let stripped = text.replace('.', "").to_lowercase();
    DELIMITER.split(&stripped).collect()
}
