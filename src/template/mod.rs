use std::path::Path;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_yaml::{Number, Value};

use crate::error::{RestampError, Result};

/// Insertion-ordered mapping of keys to template nodes.
pub type Mapping = IndexMap<String, Node>;

/// A node of the template tree.
///
/// Only `Text` and `Number` leaves can ever be placeholders; the remaining
/// scalar variants and sequences are concrete values carried through to the
/// output untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

impl Node {
    /// Convert a decoded YAML value into a template node.
    ///
    /// Fails on mapping keys that are not strings; YAML tags are dropped in
    /// favor of the tagged value.
    pub fn from_yaml(value: Value) -> Result<Node> {
        match value {
            Value::Null => Ok(Node::Null),
            Value::Bool(b) => Ok(Node::Bool(b)),
            Value::Number(n) => Ok(Node::Number(n)),
            Value::String(s) => Ok(Node::Text(s)),
            Value::Sequence(items) => Ok(Node::Sequence(
                items.into_iter().map(Node::from_yaml).collect::<Result<_>>()?,
            )),
            Value::Mapping(entries) => {
                let mut mapping = Mapping::with_capacity(entries.len());
                for (key, value) in entries {
                    let Value::String(key) = key else {
                        return Err(RestampError::TemplateInvalid {
                            reason: "mapping keys must be strings".into(),
                        });
                    };
                    mapping.insert(key, Node::from_yaml(value)?);
                }
                Ok(Node::Mapping(mapping))
            }
            Value::Tagged(tagged) => Node::from_yaml(tagged.value),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::Text(s) => serializer.serialize_str(s),
            Node::Sequence(items) => serializer.collect_seq(items),
            Node::Mapping(entries) => serializer.collect_map(entries),
        }
    }
}

/// Decode a template document from text. The root must be a mapping.
pub fn parse_document(text: &str, path: &Path) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| RestampError::TemplateParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    match Node::from_yaml(value)? {
        Node::Mapping(mapping) => Ok(mapping),
        _ => Err(RestampError::TemplateInvalid {
            reason: "template root must be a mapping".into(),
        }),
    }
}

/// Read and decode the template file at `path`.
pub fn load(path: &Path) -> Result<Mapping> {
    let text = std::fs::read_to_string(path).map_err(|e| RestampError::TemplateRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_document(&text, path)
}

/// Encode a document back to YAML text.
pub fn encode(document: &Mapping) -> Result<String> {
    serde_yaml::to_string(document).map_err(|e| RestampError::Encode { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Mapping> {
        parse_document(text, Path::new("test.yml"))
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let doc = parse("zebra: 1\napple: 2\nmango: 3\n").unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_parse_nested_scalars() {
        let doc = parse("a: text\nb:\n  c: 5\n  d: true\n  e: null\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Node::Text("text".into())));
        let Some(Node::Mapping(b)) = doc.get("b") else {
            panic!("b should be a mapping");
        };
        assert_eq!(b.get("c"), Some(&Node::Number(Number::from(5))));
        assert_eq!(b.get("d"), Some(&Node::Bool(true)));
        assert_eq!(b.get("e"), Some(&Node::Null));
    }

    #[test]
    fn test_parse_rejects_non_mapping_root() {
        let result = parse("- just\n- a\n- list\n");
        assert!(matches!(
            result,
            Err(RestampError::TemplateInvalid { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_string_keys() {
        let result = parse("1: one\n2: two\n");
        assert!(matches!(
            result,
            Err(RestampError::TemplateInvalid { .. })
        ));
    }

    #[test]
    fn test_parse_reports_yaml_errors() {
        let result = parse("a: [unclosed\n");
        assert!(matches!(result, Err(RestampError::TemplateParse { .. })));
    }

    #[test]
    fn test_encode_round_trip() {
        let text = "name: '%%service%%'\nreplicas: 3\nnested:\n  port: -99999\n  tags:\n  - web\n  - prod\n";
        let doc = parse(text).unwrap();
        let encoded = encode(&doc).unwrap();
        let reparsed = parse(&encoded).unwrap();
        assert_eq!(doc, reparsed);
    }
}
