use indexmap::IndexMap;
use serde_yaml::Number;

use crate::classify::Markers;
use crate::error::{RestampError, Result};
use crate::template::{Mapping, Node};

/// What kind of value a prompt expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Text,
    Number,
}

/// The interactive input capability. One outstanding request at a time;
/// implementations own any retry or validation policy of their own.
pub trait InputSource {
    fn request(&mut self, label: &str, kind: AnswerKind) -> Result<String>;
}

/// Sparse tree of collected answers, keyed by template path. Unanswered
/// paths are absent.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTree {
    Leaf(Node),
    Branch(IndexMap<String, ValueTree>),
}

impl ValueTree {
    pub fn empty() -> ValueTree {
        ValueTree::Branch(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&ValueTree> {
        match self {
            ValueTree::Branch(entries) => entries.get(key),
            ValueTree::Leaf(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ValueTree::Branch(entries) => entries.is_empty(),
            ValueTree::Leaf(_) => false,
        }
    }
}

/// Walk a shape tree depth-first in key insertion order, requesting one
/// value per placeholder leaf. An empty answer means "no answer" and leaves
/// the path absent. The traversal never mutates the shape; constants-pass
/// pruning is a separate step over the returned tree.
pub fn collect(
    shape: &Mapping,
    markers: &Markers,
    input: &mut dyn InputSource,
) -> Result<ValueTree> {
    let mut answers = IndexMap::new();
    for (key, node) in shape {
        match node {
            Node::Mapping(entries) => {
                let sub = collect(entries, markers, input)?;
                if !sub.is_empty() {
                    answers.insert(key.clone(), sub);
                }
            }
            Node::Text(text) => {
                let label = markers.strip(text);
                let answer = input.request(&label, AnswerKind::Text)?;
                if !answer.is_empty() {
                    answers.insert(key.clone(), ValueTree::Leaf(Node::Text(answer)));
                }
            }
            Node::Number(_) => {
                let answer = input.request(key, AnswerKind::Number)?;
                if !answer.is_empty() {
                    let number = parse_number(key, &answer)?;
                    answers.insert(key.clone(), ValueTree::Leaf(Node::Number(number)));
                }
            }
            // classify never emits these.
            Node::Bool(_) | Node::Null | Node::Sequence(_) => {}
        }
    }
    Ok(ValueTree::Branch(answers))
}

fn parse_number(label: &str, raw: &str) -> Result<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(Number::from(n));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Number::from(f)),
        _ => Err(RestampError::ValidationFailed {
            label: label.to_string(),
            message: "expected a number".into(),
        }),
    }
}

/// inquire-backed input source used by the binary.
pub struct ConsoleInput;

impl InputSource for ConsoleInput {
    fn request(&mut self, label: &str, kind: AnswerKind) -> Result<String> {
        let message = format!("Enter a value for {label}:");
        let mut prompt = inquire::Text::new(&message);
        if kind == AnswerKind::Number {
            // Blank stays allowed so the operator can skip the placeholder.
            prompt = prompt.with_validator(|input: &str| {
                let numeric = input.parse::<i64>().is_ok()
                    || matches!(input.parse::<f64>(), Ok(f) if f.is_finite());
                if input.is_empty() || numeric {
                    Ok(inquire::validator::Validation::Valid)
                } else {
                    Ok(inquire::validator::Validation::Invalid(
                        inquire::validator::ErrorMessage::Custom(
                            "Must be a valid number".to_string(),
                        ),
                    ))
                }
            });
        }
        prompt.prompt().map_err(|_| RestampError::PromptCancelled)
    }
}
