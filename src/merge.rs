use crate::collect::ValueTree;
use crate::template::{Mapping, Node};

/// Merge collected answers into a template (or a prior document of the same
/// shape), producing a document with exactly the template's key set at every
/// level. Only leaf values change: a path present in the answer tree takes
/// the answered value, every other path keeps the template's value. Answer
/// paths the template lacks are ignored.
pub fn merge(template: &Mapping, answers: &ValueTree) -> Mapping {
    template
        .iter()
        .map(|(key, node)| (key.clone(), merge_node(node, answers.get(key))))
        .collect()
}

fn merge_node(node: &Node, answer: Option<&ValueTree>) -> Node {
    match node {
        Node::Mapping(entries) => Node::Mapping(
            entries
                .iter()
                .map(|(key, child)| {
                    (key.clone(), merge_node(child, answer.and_then(|a| a.get(key))))
                })
                .collect(),
        ),
        // A Branch aligned with a scalar carries no usable value; the
        // template wins, same as an absent answer.
        _ => match answer {
            Some(ValueTree::Leaf(value)) => value.clone(),
            _ => node.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use indexmap::IndexMap;
    use serde_yaml::Number;

    use super::*;
    use crate::template::parse_document;

    fn parse(text: &str) -> Mapping {
        parse_document(text, Path::new("test.yml")).unwrap()
    }

    fn leaf(text: &str) -> ValueTree {
        ValueTree::Leaf(Node::Text(text.into()))
    }

    fn branch(entries: Vec<(&str, ValueTree)>) -> ValueTree {
        ValueTree::Branch(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_merge_with_no_answers_is_identity() {
        let template = parse("a: '%%foo%%'\nb:\n  c: 5\n  d: [1, 2]\n");
        let merged = merge(&template, &ValueTree::empty());
        assert_eq!(merged, template);
    }

    #[test]
    fn test_merge_replaces_answered_leaves_only() {
        let template = parse("a: '%%foo%%'\nb:\n  c: '%%bar%%'\n  d: 5\n");
        let answers = branch(vec![
            ("a", leaf("X")),
            ("b", branch(vec![("c", leaf("P"))])),
        ]);

        let merged = merge(&template, &answers);

        assert_eq!(merged.get("a"), Some(&Node::Text("X".into())));
        let Some(Node::Mapping(b)) = merged.get("b") else {
            panic!("b should still be a mapping");
        };
        assert_eq!(b.get("c"), Some(&Node::Text("P".into())));
        assert_eq!(b.get("d"), Some(&Node::Number(Number::from(5))));
    }

    #[test]
    fn test_merge_preserves_key_set_at_every_level() {
        let template = parse("a: '%%foo%%'\nb:\n  c: '%%bar%%'\n  d: 5\n");
        // "ghost" has no counterpart in the template and must not appear.
        let answers = branch(vec![
            ("ghost", leaf("nope")),
            ("b", branch(vec![("c", leaf("P")), ("ghost", leaf("nope"))])),
        ]);

        let merged = merge(&template, &answers);

        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        let Some(Node::Mapping(b)) = merged.get("b") else {
            panic!("b should still be a mapping");
        };
        let b_keys: Vec<&str> = b.keys().map(String::as_str).collect();
        assert_eq!(b_keys, vec!["c", "d"]);
    }

    #[test]
    fn test_merge_ignores_branch_answer_at_scalar() {
        let template = parse("a: '%%foo%%'\n");
        let answers = branch(vec![("a", branch(vec![("x", leaf("nope"))]))]);
        let merged = merge(&template, &answers);
        assert_eq!(merged.get("a"), Some(&Node::Text("%%foo%%".into())));
    }

    #[test]
    fn test_merge_ignores_leaf_answer_at_mapping() {
        let template = parse("b:\n  c: 5\n");
        let answers = branch(vec![("b", leaf("nope"))]);
        let merged = merge(&template, &answers);
        assert_eq!(merged, template);
    }

    #[test]
    fn test_merge_passes_are_independent() {
        let template = parse("a: '%%foo%%'\nb:\n  c: '%%bar%%'\n");
        let first = merge(&template, &branch(vec![("a", leaf("X"))]));
        let second = merge(&template, &branch(vec![("a", leaf("Y"))]));

        assert_eq!(first.get("a"), Some(&Node::Text("X".into())));
        assert_eq!(second.get("a"), Some(&Node::Text("Y".into())));
        // The template itself is untouched by either pass.
        assert_eq!(template.get("a"), Some(&Node::Text("%%foo%%".into())));
    }

    #[test]
    fn test_merge_numeric_answer_into_sentinel_leaf() {
        let template = parse("port: -99999\n");
        let mut root = IndexMap::new();
        root.insert(
            "port".to_string(),
            ValueTree::Leaf(Node::Number(Number::from(8080))),
        );
        let merged = merge(&template, &ValueTree::Branch(root));
        assert_eq!(merged.get("port"), Some(&Node::Number(Number::from(8080))));
    }
}
