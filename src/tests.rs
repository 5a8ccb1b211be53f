use crate::ast::ExprKind;
use crate::error::Error;
use crate::neighbors::{has_negative, neighbors};
use crate::{parse_input, parse_output, parser};

// ── Shared fixture runners ──────────────────────────────────────────

/// Embed fixture files at compile time.
const PARSE_FIXTURES: &str = include_str!("../test-data/fixtures/parse.json");
const PARSE_ERROR_FIXTURES: &str = include_str!("../test-data/fixtures/parse-errors.json");

#[test]
fn test_fixture_parse() {
    let fixtures: Vec<serde_json::Value> = serde_json::from_str(PARSE_FIXTURES).unwrap();

    for fixture in &fixtures {
        let name = fixture["name"].as_str().unwrap();
        let input = fixture["input"].as_str().unwrap();
        let direction = fixture["direction"].as_str().unwrap();
        let expected = &fixture["expected"];

        let actual_json = match direction {
            "input" => parse_input(input)
                .unwrap_or_else(|e| panic!("Fixture '{}': unexpected error: {}", name, e))
                .to_json(),
            "output" => parse_output(input)
                .unwrap_or_else(|e| panic!("Fixture '{}': unexpected error: {}", name, e))
                .to_json(),
            other => panic!("Fixture '{}': unknown direction '{}'", name, other),
        };
        let actual: serde_json::Value = serde_json::from_str(&actual_json)
            .unwrap_or_else(|e| panic!("Fixture '{}': emitted invalid JSON: {}", name, e));
        assert_eq!(&actual, expected, "Fixture '{}' mismatch", name);
    }
}

#[test]
fn test_fixture_parse_errors() {
    let fixtures: Vec<serde_json::Value> = serde_json::from_str(PARSE_ERROR_FIXTURES).unwrap();

    for fixture in &fixtures {
        let name = fixture["name"].as_str().unwrap();
        let input = fixture["input"].as_str().unwrap();
        let message = fixture["message"].as_str().unwrap();

        let err = match parse_output(input) {
            Err(Error::Parse(e)) => e,
            Ok(_) => panic!("Fixture '{}': expected a parse error but got none", name),
            Err(other) => panic!(
                "Fixture '{}': expected a parse error, got: {:?}",
                name, other
            ),
        };
        assert_eq!(err.code, "literal-syntax-error", "Fixture '{}'", name);
        assert!(
            err.message.contains(message),
            "Fixture '{}': message {:?} does not contain {:?}",
            name,
            err.message,
            message
        );
        if let Some(line) = fixture.get("line").and_then(|v| v.as_u64()) {
            assert_eq!(err.begin.line, line as usize, "Fixture '{}' line", name);
        }
        if let Some(column) = fixture.get("column").and_then(|v| v.as_u64()) {
            assert_eq!(err.begin.column, column as usize, "Fixture '{}' column", name);
        }
    }
}

// ── Shape and coordinates ───────────────────────────────────────────

#[test]
fn test_round_trip_two_by_two() {
    let pattern = parse_output("[[a, b], [c, d]]").unwrap();
    assert_eq!(pattern.shape, vec![2, 2]);
    assert_eq!(pattern.index[&vec![0, 0]], "a");
    assert_eq!(pattern.index[&vec![0, 1]], "b");
    assert_eq!(pattern.index[&vec![1, 0]], "c");
    assert_eq!(pattern.index[&vec![1, 1]], "d");
    assert_eq!(pattern.index.len(), 4);
}

#[test]
fn test_nonuniform_rejected() {
    let err = parse_output("[[a, b], [c]]").unwrap_err();
    match err {
        Error::Shape(e) => {
            assert_eq!(e.left, vec![2, 2]);
            assert_eq!(e.right, vec![2, 1]);
            assert!(format!("{}", e).contains("non-rectangular"));
        }
        other => panic!("Expected a shape error, got: {:?}", other),
    }
}

#[test]
fn test_nonuniform_depth_rejected() {
    assert!(matches!(
        parse_output("[a, [b, c]]"),
        Err(Error::Shape(_))
    ));
}

#[test]
fn test_out_index_is_a_bijection_over_leaves() {
    let literal = "[[a, b, c], [d, e, f]]";
    let tree = parser::parse(literal).unwrap();
    let pattern = parse_output(literal).unwrap();
    // A BTreeMap cannot hold duplicate keys, so equal sizes mean every leaf
    // got its own coordinate.
    assert_eq!(tree.leaves().count(), pattern.index.len());
}

#[test]
fn test_indices_reproduce_shape() {
    let pattern = parse_output("[[a, b, c], [d, e, f]]").unwrap();
    for indice in pattern.index.keys() {
        assert_eq!(indice.len(), pattern.shape.len());
    }
    for (axis, &dim) in pattern.shape.iter().enumerate() {
        let max = pattern
            .index
            .keys()
            .map(|indice| indice[axis])
            .max()
            .unwrap();
        assert_eq!(max as i64 + 1, dim);
    }
}

#[test]
fn test_root_leaf_has_empty_indice() {
    let tree = parser::parse("a").unwrap();
    assert_eq!(tree.indice(tree.root()), Vec::<usize>::new());
}

#[test]
fn test_in_index_last_occurrence_wins() {
    let pattern = parse_input("[[a, a], [b, a]]").unwrap();
    assert_eq!(pattern.index["a"], vec![1, 1]);
    assert_eq!(pattern.index["b"], vec![1, 0]);
    assert_eq!(pattern.index.len(), 2);
}

// ── Ellipsis ────────────────────────────────────────────────────────

#[test]
fn test_ellipsis_contributes_no_leaf() {
    let tree = parser::parse("[a, b, ...]").unwrap();
    match &tree.node(tree.root()).kind {
        ExprKind::List { children, length } => {
            assert_eq!(*length, -1);
            assert_eq!(children.len(), 2);
        }
        other => panic!("Expected a list at the root, got: {:?}", other),
    }
    assert_eq!(tree.leaves().count(), 2);
}

#[test]
fn test_ellipsis_does_not_relax_uniformity() {
    assert!(matches!(
        parse_output("[[a, b], [c], ...]"),
        Err(Error::Shape(_))
    ));
}

// ── Tags ────────────────────────────────────────────────────────────

#[test]
fn test_tag_presence_covers_every_coordinate() {
    let pattern = parse_output("[[f(a), b], [c, f(d)]]").unwrap();
    let presence = &pattern.tags["f"];
    assert_eq!(presence.len(), pattern.index.len());
    assert_eq!(presence[&vec![0, 0]], true);
    assert_eq!(presence[&vec![0, 1]], false);
    assert_eq!(presence[&vec![1, 0]], false);
    assert_eq!(presence[&vec![1, 1]], true);
}

#[test]
fn test_tag_flag_count_matches_tagged_leaves() {
    let pattern = parse_output("[big(a), big(b), c]").unwrap();
    let presence = &pattern.tags["big"];
    assert_eq!(presence.len(), 3);
    assert_eq!(presence.values().filter(|&&flag| flag).count(), 2);
}

#[test]
fn test_untagged_literal_has_no_tags() {
    let pattern = parse_output("[[a, b], [c, d]]").unwrap();
    assert!(pattern.tags.is_empty());
}

#[test]
fn test_nested_call_keeps_outermost_tag() {
    let tree = parser::parse("f(g(a))").unwrap();
    match &tree.node(tree.root()).kind {
        ExprKind::Leaf { identifier, tag } => {
            assert_eq!(identifier, "a");
            assert_eq!(tag.as_deref(), Some("f"));
        }
        other => panic!("Expected a leaf, got: {:?}", other),
    }

    let pattern = parse_output("[f(g(a)), b]").unwrap();
    assert!(pattern.tags.contains_key("f"));
    assert!(!pattern.tags.contains_key("g"));
}

#[test]
fn test_tag_on_list_is_ignored() {
    let pattern = parse_output("[f([a, b]), [c, d]]").unwrap();
    assert_eq!(pattern.shape, vec![2, 2]);
    assert!(pattern.tags.is_empty());
}

// ── Neighbors ───────────────────────────────────────────────────────

#[test]
fn test_neighbors_of_two_dimensional_point() {
    let (previous, next) = neighbors(&[1, 1]);
    assert_eq!(previous, vec![vec![0, 1], vec![1, 0]]);
    assert_eq!(next, vec![vec![2, 1], vec![1, 2]]);
}

#[test]
fn test_neighbors_of_empty_point() {
    let (previous, next) = neighbors(&[]);
    assert!(previous.is_empty());
    assert!(next.is_empty());
}

#[test]
fn test_has_negative() {
    assert!(has_negative(&[0, -1]));
    assert!(!has_negative(&[0, 0]));
}

// ── JSON ────────────────────────────────────────────────────────────

#[test]
fn test_pretty_and_compact_json_agree() {
    let pattern = parse_output("[[f(a), b], [c, d]]").unwrap();
    let compact: serde_json::Value = serde_json::from_str(&pattern.to_json()).unwrap();
    let pretty: serde_json::Value = serde_json::from_str(&pattern.to_json_pretty()).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn test_identifier_escaping_in_json() {
    // Identifiers can't contain quotes today, but the writer must still emit
    // valid JSON for every string it is handed.
    let pattern = parse_input("[alpha_1, beta]").unwrap();
    let value: serde_json::Value = serde_json::from_str(&pattern.to_json()).unwrap();
    assert_eq!(value["index"]["alpha_1"], serde_json::json!([0]));
}
