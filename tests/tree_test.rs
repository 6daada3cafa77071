//! Navigation tests for DocumentTree

use rstest::{fixture, rstest};

use doctree::domain::{AttrValue, Attribute, DocumentTree, NodeId};
use doctree::util::testing;

struct Abc {
    tree: DocumentTree,
    r: NodeId,
    a: NodeId,
    b: NodeId,
    c: NodeId,
}

// R
// ├── A
// ├── B
// └── C
#[fixture]
fn abc() -> Abc {
    testing::init_test_setup();
    let mut tree = DocumentTree::new();
    let r = tree.create_element("R", []).unwrap();
    let a = tree.create_element("A", []).unwrap();
    let b = tree.create_element("B", []).unwrap();
    let c = tree.create_element("C", []).unwrap();
    for child in [a, b, c] {
        tree.append_child(r, child).unwrap();
    }
    Abc { tree, r, a, b, c }
}

// ============================================================
// Scenario: root with three children
// ============================================================

#[rstest]
fn given_three_children_when_navigating_from_middle_then_sees_both_neighbours(abc: Abc) {
    let Abc { tree, r, a, b, c } = abc;

    assert_eq!(tree.position_in_parent(b), Some(1));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.previous_sibling(b), Some(a));
    assert_eq!(tree.depth(b), 1);
    assert_eq!(tree.root(b), r);
    assert_eq!(tree.path(b), vec![1]);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn given_ith_child_when_navigating_then_matches_parent_children(abc: Abc, #[case] i: usize) {
    let tree = &abc.tree;
    let node = tree.child_at(abc.r, i).unwrap();

    assert_eq!(tree.position_in_parent(node), Some(i));
    assert_eq!(tree.next_sibling(node), tree.child_at(abc.r, i + 1));
    let expected_previous = i.checked_sub(1).and_then(|p| tree.child_at(abc.r, p));
    assert_eq!(tree.previous_sibling(node), expected_previous);
}

#[rstest]
fn given_root_when_navigating_then_everything_is_absent(abc: Abc) {
    let tree = &abc.tree;

    assert_eq!(tree.position_in_parent(abc.r), None);
    assert_eq!(tree.depth(abc.r), 0);
    assert_eq!(tree.root(abc.r), abc.r);
    assert!(tree.path(abc.r).is_empty());
    assert_eq!(tree.next_sibling(abc.r), None);
    assert_eq!(tree.previous_sibling(abc.r), None);
}

#[rstest]
fn given_detached_node_when_navigating_then_it_is_its_own_root(mut abc: Abc) {
    abc.tree.detach(abc.c).unwrap();

    assert_eq!(abc.tree.root(abc.c), abc.c);
    assert_eq!(abc.tree.depth(abc.c), 0);
    assert_eq!(abc.tree.next_sibling(abc.b), None);
}

// ============================================================
// Paths
// ============================================================

#[rstest]
fn given_deep_tree_when_resolving_paths_then_every_node_round_trips(mut abc: Abc) {
    let b0 = abc.tree.create_element("b0", []).unwrap();
    let b1 = abc.tree.create_text("b1", []);
    let b10 = abc.tree.create_element("b1-inner", []).unwrap();
    abc.tree.append_child(abc.b, b0).unwrap();
    abc.tree.append_child(abc.b, b1).unwrap();
    abc.tree.append_child(b0, b10).unwrap();

    assert_eq!(abc.tree.path(b10), vec![1, 0, 0]);
    let all: Vec<_> = abc.tree.descendants(abc.r).collect();
    assert_eq!(all.len(), 7);
    for id in all {
        let path = abc.tree.path(id);
        assert_eq!(path.len(), abc.tree.depth(id));
        assert_eq!(abc.tree.resolve_path(abc.r, &path), Some(id));
    }
}

#[rstest]
fn given_path_past_leaves_when_resolving_then_absent(abc: Abc) {
    assert_eq!(abc.tree.resolve_path(abc.r, &[3]), None);
    assert_eq!(abc.tree.resolve_path(abc.r, &[0, 0]), None);
}

// ============================================================
// Ownership
// ============================================================

#[rstest]
fn given_child_of_one_parent_when_appended_to_another_then_has_single_parent(mut abc: Abc) {
    abc.tree.append_child(abc.a, abc.c).unwrap();

    assert_eq!(abc.tree.parent(abc.c), Some(abc.a));
    assert_eq!(abc.tree.children(abc.r), &[abc.a, abc.b]);
    assert_eq!(abc.tree.path(abc.c), vec![0, 0]);
    assert_eq!(abc.tree.depth(abc.c), 2);
}

#[rstest]
fn given_removed_subtree_when_looking_up_then_handles_are_dead(mut abc: Abc) {
    let inner = abc.tree.create_text("inner", []);
    abc.tree.append_child(abc.b, inner).unwrap();

    abc.tree.remove(abc.b).unwrap();

    assert!(abc.tree.node(abc.b).is_none());
    assert!(abc.tree.node(inner).is_none());
    assert_eq!(abc.tree.next_sibling(abc.a), Some(abc.c));
    assert_eq!(abc.tree.len(), 3);
}

// ============================================================
// Attributes on attached nodes
// ============================================================

#[rstest]
fn given_attribute_set_twice_when_reading_then_latest_value_wins(mut abc: Abc) {
    let node = abc.tree.node_mut(abc.a).unwrap();
    node.set_attribute(Attribute::new("bold", true).unwrap());
    node.set_attribute(Attribute::new("bold", false).unwrap());

    let node = abc.tree.node(abc.a).unwrap();
    assert_eq!(node.attribute_count(), 1);
    assert_eq!(node.get_attribute("bold"), Some(&AttrValue::Bool(false)));
    assert!(node.has_attribute("bold"));
    assert!(!node.has_attribute(&Attribute::new("bold", true).unwrap()));
}
