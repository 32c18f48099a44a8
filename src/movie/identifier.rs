use serde::Serialize;
use std::collections::hash_set::{self, HashSet};
use std::fmt;

/// Digit-string identifier of a title in the external movie catalog
///
/// Always non-empty and made only of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MovieIdentifier(String);

impl MovieIdentifier {
    /// Parses a cross-reference value from the listing API
    ///
    /// Surrounding whitespace and a leading `tt` prefix are tolerated.
    /// Returns `None` for anything that is not a non-empty run of digits.
    ///
    /// # Example
    ///
    /// ```
    /// use frame_tally::movie::MovieIdentifier;
    ///
    /// assert_eq!(MovieIdentifier::parse("1392190").unwrap().as_str(), "1392190");
    /// assert_eq!(MovieIdentifier::parse("tt1392190").unwrap().as_str(), "1392190");
    /// assert!(MovieIdentifier::parse("n/a").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix("tt").unwrap_or(trimmed);

        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    /// Builds an identifier from the digit characters of `text`, in order
    ///
    /// Returns `None` if `text` carries no digits.
    pub fn from_digits(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            None
        } else {
            Some(Self(digits))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated set of movie identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    ids: HashSet<MovieIdentifier>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an identifier, returning `false` if it was already present
    pub fn insert(&mut self, id: MovieIdentifier) -> bool {
        self.ids.insert(id)
    }

    /// Merges another set into this one (set union)
    pub fn merge(&mut self, other: IdentifierSet) {
        self.ids.extend(other.ids);
    }

    pub fn contains(&self, id: &MovieIdentifier) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, MovieIdentifier> {
        self.ids.iter()
    }
}

impl FromIterator<MovieIdentifier> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = MovieIdentifier>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<MovieIdentifier> for IdentifierSet {
    fn extend<I: IntoIterator<Item = MovieIdentifier>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

impl IntoIterator for IdentifierSet {
    type Item = MovieIdentifier;
    type IntoIter = hash_set::IntoIter<MovieIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a IdentifierSet {
    type Item = &'a MovieIdentifier;
    type IntoIter = hash_set::Iter<'a, MovieIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
