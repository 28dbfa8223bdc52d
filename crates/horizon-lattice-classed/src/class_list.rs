//! Class name merging.
//!
//! A [`ClassList`] is an ordered set of class tokens. Pushing a token that is
//! already present is a no-op, so the first occurrence always keeps its
//! position and no token is ever emitted twice.

use std::fmt;

/// An ordered, deduplicated list of class tokens.
///
/// # Example
///
/// ```
/// use horizon_lattice_classed::ClassList;
///
/// let mut list = ClassList::parse("px-4 py-2");
/// list.push_str("py-2 bg-blue-100");
/// assert_eq!(list.to_string(), "px-4 py-2 bg-blue-100");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create an empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated class string.
    pub fn parse(classes: &str) -> Self {
        let mut list = Self::new();
        list.push_str(classes);
        list
    }

    /// Add a single token. Returns `false` if it was already present or empty.
    pub fn push(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if token.is_empty() || self.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    /// Split `classes` on whitespace and add every token.
    pub fn push_str(&mut self, classes: &str) {
        for token in classes.split_whitespace() {
            if !self.contains(token) {
                self.tokens.push(token.to_string());
            }
        }
    }

    /// Append all tokens from another list, keeping first occurrences.
    pub fn extend_from(&mut self, other: &ClassList) {
        for token in &other.tokens {
            if !self.contains(token) {
                self.tokens.push(token.clone());
            }
        }
    }

    /// Append any class input (strings, empties, nested lists).
    pub fn push_input(&mut self, input: &ClassInput) {
        match input {
            ClassInput::Str(s) => self.push_str(s),
            ClassInput::List(list) => self.extend_from(list),
            ClassInput::Many(items) => {
                for item in items {
                    self.push_input(item);
                }
            }
            ClassInput::Empty => {}
        }
    }

    /// Check whether a token is present.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Iterate over tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consume the list into its tokens.
    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        Self::parse(classes)
    }
}

impl From<String> for ClassList {
    fn from(classes: String) -> Self {
        Self::parse(&classes)
    }
}

impl From<&String> for ClassList {
    fn from(classes: &String) -> Self {
        Self::parse(classes)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.push_str(item.as_ref());
        }
        list
    }
}

/// One item handed to [`merge_classes`].
///
/// Mirrors the loose inputs a caller tends to have on hand: a string, a
/// missing/disabled value, an already-built list, or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassInput {
    /// A whitespace-separated class string.
    Str(String),
    /// An already-built class list.
    List(ClassList),
    /// A nested sequence of inputs.
    Many(Vec<ClassInput>),
    /// Nothing (`None`, `false`).
    Empty,
}

impl From<&str> for ClassInput {
    fn from(s: &str) -> Self {
        ClassInput::Str(s.to_string())
    }
}

impl From<String> for ClassInput {
    fn from(s: String) -> Self {
        ClassInput::Str(s)
    }
}

impl From<ClassList> for ClassInput {
    fn from(list: ClassList) -> Self {
        ClassInput::List(list)
    }
}

impl From<bool> for ClassInput {
    /// `false` is dropped. `true` carries no class name and is dropped as well.
    fn from(_: bool) -> Self {
        ClassInput::Empty
    }
}

impl<T: Into<ClassInput>> From<Option<T>> for ClassInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(ClassInput::Empty, Into::into)
    }
}

impl<T: Into<ClassInput>> From<Vec<T>> for ClassInput {
    fn from(items: Vec<T>) -> Self {
        ClassInput::Many(items.into_iter().map(Into::into).collect())
    }
}

/// Merge class inputs into a single whitespace-separated string.
///
/// Inputs are flattened, split on whitespace and deduplicated keeping the
/// first occurrence of every token.
///
/// ```
/// use horizon_lattice_classed::merge_classes;
///
/// assert_eq!(merge_classes(["a", "b", "a"]), "a b");
/// assert_eq!(merge_classes(Vec::<&str>::new()), "");
/// ```
pub fn merge_classes<I>(inputs: I) -> String
where
    I: IntoIterator,
    I::Item: Into<ClassInput>,
{
    let mut list = ClassList::new();
    for input in inputs {
        list.push_input(&input.into());
    }
    list.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_dedups_first_occurrence() {
        assert_eq!(merge_classes(["a", "b", "a"]), "a b");
        assert_eq!(merge_classes(["b a", "a c b"]), "b a c");
    }

    #[test]
    fn merge_drops_empty_inputs() {
        let inputs: Vec<ClassInput> = vec![
            "".into(),
            None::<&str>.into(),
            false.into(),
            "  x   y ".into(),
        ];
        assert_eq!(merge_classes(inputs), "x y");
    }

    #[test]
    fn merge_flattens_nested() {
        let inputs: Vec<ClassInput> = vec![
            "a".into(),
            vec![ClassInput::from("b"), vec!["c", "a"].into()].into(),
            Some("d").into(),
        ];
        assert_eq!(merge_classes(inputs), "a b c d");
    }

    #[test]
    fn merge_all_empty_is_empty_string() {
        let inputs: Vec<ClassInput> = vec![ClassInput::Empty, "   ".into()];
        assert_eq!(merge_classes(inputs), "");
    }

    #[test]
    fn push_reports_duplicates() {
        let mut list = ClassList::new();
        assert!(list.push("a"));
        assert!(!list.push("a"));
        assert!(!list.push(""));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn extend_keeps_existing_positions() {
        let mut list = ClassList::parse("x y");
        list.extend_from(&ClassList::parse("y z x"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }
}
