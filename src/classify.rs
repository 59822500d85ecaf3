use serde_yaml::Number;

use crate::collect::ValueTree;
use crate::template::{Mapping, Node};

/// Placeholder marking rules: a delimiter wrapping marked strings and a
/// sentinel integer marking numeric leaves.
#[derive(Debug, Clone)]
pub struct Markers {
    delimiter: String,
    sentinel: i64,
}

impl Markers {
    pub fn new(delimiter: impl Into<String>, sentinel: i64) -> Self {
        Markers {
            delimiter: delimiter.into(),
            sentinel,
        }
    }

    /// A string is marked iff its first K and last K bytes equal the
    /// delimiter (K = delimiter length); strings shorter than 2K never
    /// match. An empty delimiter marks every string.
    pub fn is_marked_text(&self, text: &str) -> bool {
        text.len() >= 2 * self.delimiter.len()
            && text.starts_with(&self.delimiter)
            && text.ends_with(&self.delimiter)
    }

    pub fn is_sentinel(&self, number: &Number) -> bool {
        number.as_i64() == Some(self.sentinel)
    }

    /// Strip delimiter occurrences from a marked literal to form its prompt
    /// label.
    pub fn strip(&self, text: &str) -> String {
        if self.delimiter.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.delimiter, "")
        }
    }
}

/// Build the shape tree: the subset of the template reachable to at least
/// one placeholder leaf. Non-qualifying leaves and branches that end up
/// empty are absent from the result, so callers must treat "key absent" as
/// "not a placeholder".
pub fn classify(template: &Mapping, markers: &Markers) -> Mapping {
    let mut shape = Mapping::new();
    for (key, node) in template {
        match node {
            Node::Text(text) => {
                if markers.is_marked_text(text) {
                    shape.insert(key.clone(), node.clone());
                }
            }
            Node::Number(number) => {
                if markers.is_sentinel(number) {
                    shape.insert(key.clone(), node.clone());
                }
            }
            Node::Mapping(entries) => {
                let sub = classify(entries, markers);
                if !sub.is_empty() {
                    shape.insert(key.clone(), Node::Mapping(sub));
                }
            }
            // These can never be placeholders.
            Node::Bool(_) | Node::Null | Node::Sequence(_) => {}
        }
    }
    shape
}

/// Remove every answered leaf from a shape tree, dropping any branch the
/// removal leaves empty. Used after the constants pass so the deployment
/// loop never re-prompts for a constant.
pub fn prune_answered(shape: &Mapping, answers: &ValueTree) -> Mapping {
    let mut kept = Mapping::new();
    for (key, node) in shape {
        let answer = answers.get(key);
        match node {
            Node::Mapping(entries) => {
                let sub = match answer {
                    Some(sub_answers) => prune_answered(entries, sub_answers),
                    None => entries.clone(),
                };
                if !sub.is_empty() {
                    kept.insert(key.clone(), Node::Mapping(sub));
                }
            }
            _ => {
                if !matches!(answer, Some(ValueTree::Leaf(_))) {
                    kept.insert(key.clone(), node.clone());
                }
            }
        }
    }
    kept
}
