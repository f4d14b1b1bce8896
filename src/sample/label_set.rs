use serde::{Serialize, Deserialize};

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};


/// The distinct labels of an instance set in canonical order.
/// If every label is an integer, labels are ordered numerically.
/// Otherwise, labels are ordered lexicographically.
/// A label's position in this order indexes the weight storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    names: Vec<String>,
    name_to_index: HashMap<String, usize>,
}


impl LabelSet {
    /// Construct a label set from the given (possibly repeated) labels.
    pub fn new<I, S>(labels: I) -> Self
        where I: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        let distinct = labels.into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<BTreeSet<_>>();
        let mut names = distinct.into_iter().collect::<Vec<_>>();

        let all_integers = names.iter().all(|s| s.parse::<i64>().is_ok());
        if all_integers {
            names.sort_by(|a, b| numeric_order(a, b));
        }

        Self::from_ordered(names)
    }


    /// Construct a label set that keeps the given order.
    /// Used when reading a model, whose label order is fixed.
    pub(crate) fn from_ordered(names: Vec<String>) -> Self {
        let name_to_index = names.iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self { names, name_to_index }
    }


    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }


    /// Returns `true` if there is no label.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }


    /// Returns the canonical index of `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }


    /// Returns the label at `index`.
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }


    /// Returns the labels in canonical order.
    pub fn names(&self) -> &[String] {
        &self.names[..]
    }


    /// Returns an iterator over the labels in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }
}


impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for LabelSet {}


impl From<Vec<String>> for LabelSet {
    fn from(names: Vec<String>) -> Self {
        Self::from_ordered(names)
    }
}


impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.names
    }
}


fn numeric_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
