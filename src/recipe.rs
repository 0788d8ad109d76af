//! Recipe/usage lists for a node.
//!
//! The "recipe" of a node is the labels of everything feeding into it and its
//! "usage" is the labels of everything it feeds. Both are recomputed by a full
//! scan of the edge list on every call; nothing is cached.

use crate::types::{Blueprint, NodeId};

/// Shown in place of a source label whose node no longer exists.
pub const UNKNOWN_INPUT_LABEL: &str = "unknown input";
/// Shown in place of a target label whose node no longer exists.
pub const UNKNOWN_OUTPUT_LABEL: &str = "unknown output";

/// Labels of the nodes supplying `node_id`, in edge order.
pub fn inputs_of(blueprint: &Blueprint, node_id: &NodeId) -> Vec<String> {
    blueprint
        .edges
        .iter()
        .filter(|e| &e.target == node_id)
        .map(|e| {
            blueprint
                .node_label(&e.source)
                .unwrap_or(UNKNOWN_INPUT_LABEL)
                .to_string()
        })
        .collect()
}

/// Labels of the nodes supplied by `node_id`, in edge order.
pub fn outputs_of(blueprint: &Blueprint, node_id: &NodeId) -> Vec<String> {
    blueprint
        .edges
        .iter()
        .filter(|e| &e.source == node_id)
        .map(|e| {
            blueprint
                .node_label(&e.target)
                .unwrap_or(UNKNOWN_OUTPUT_LABEL)
                .to_string()
        })
        .collect()
}

/// Everything the details panel shows for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    /// Label of the node itself
    pub label: String,
    /// Labels of supplying nodes
    pub inputs: Vec<String>,
    /// Labels of supplied nodes
    pub outputs: Vec<String>,
}

impl RecipeView {
    /// Builds the view for `node_id`, or `None` if the node does not exist.
    pub fn for_node(blueprint: &Blueprint, node_id: &NodeId) -> Option<Self> {
        let label = blueprint.node_label(node_id)?.to_string();
        Some(Self {
            label,
            inputs: inputs_of(blueprint, node_id),
            outputs: outputs_of(blueprint, node_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Position};
    use proptest::prelude::*;

    #[test]
    fn test_item_to_machine_scenario() {
        let mut bp = Blueprint::new();
        let a = bp.add_node("A", Category::Item, Position::default());
        let b = bp.add_node("B", Category::Machine, Position::default());
        bp.add_edge(a.clone(), b.clone());

        assert_eq!(inputs_of(&bp, &b), vec!["A".to_string()]);
        assert!(outputs_of(&bp, &b).is_empty());
        assert!(inputs_of(&bp, &a).is_empty());
        assert_eq!(outputs_of(&bp, &a), vec!["B".to_string()]);
    }

    #[test]
    fn test_lists_follow_edge_insertion_order() {
        let mut bp = Blueprint::new();
        let furnace = bp.add_node("Furnace", Category::Machine, Position::default());
        let coal = bp.add_node("Coal", Category::Item, Position::default());
        let ore = bp.add_node("Ore", Category::Item, Position::default());
        let plate = bp.add_node("Plate", Category::Item, Position::default());

        bp.add_edge(ore.clone(), furnace.clone());
        bp.add_edge(furnace.clone(), plate.clone());
        bp.add_edge(coal.clone(), furnace.clone());
        bp.add_edge(ore.clone(), furnace.clone());

        assert_eq!(inputs_of(&bp, &furnace), vec!["Ore", "Coal", "Ore"]);
        assert_eq!(outputs_of(&bp, &furnace), vec!["Plate"]);
    }

    #[test]
    fn test_dangling_endpoints_use_placeholders() {
        let mut bp = Blueprint::new();
        let mixer = bp.add_node("Mixer", Category::Machine, Position::default());
        bp.add_edge(NodeId::from("gone"), mixer.clone());
        bp.add_edge(mixer.clone(), NodeId::from("also-gone"));

        assert_eq!(inputs_of(&bp, &mixer), vec![UNKNOWN_INPUT_LABEL]);
        assert_eq!(outputs_of(&bp, &mixer), vec![UNKNOWN_OUTPUT_LABEL]);
    }

    #[test]
    fn test_empty_label_is_not_replaced() {
        let mut bp = Blueprint::new();
        let blank = bp.add_node("", Category::Item, Position::default());
        let press = bp.add_node("Press", Category::Machine, Position::default());
        bp.add_edge(blank, press.clone());

        assert_eq!(inputs_of(&bp, &press), vec![String::new()]);
    }

    #[test]
    fn test_self_loop_appears_in_both_lists() {
        let mut bp = Blueprint::new();
        let loopy = bp.add_node("Recycler", Category::Machine, Position::default());
        bp.add_edge(loopy.clone(), loopy.clone());

        assert_eq!(inputs_of(&bp, &loopy), vec!["Recycler"]);
        assert_eq!(outputs_of(&bp, &loopy), vec!["Recycler"]);
    }

    #[test]
    fn test_recipe_view_for_missing_node() {
        let bp = Blueprint::new();
        assert!(RecipeView::for_node(&bp, &NodeId::from("nope")).is_none());
    }

    #[test]
    fn test_recipe_view_reflects_renames() {
        let mut bp = Blueprint::new();
        let a = bp.add_node("A", Category::Item, Position::default());
        let b = bp.add_node("B", Category::Machine, Position::default());
        bp.add_edge(a.clone(), b.clone());
        bp.update_node_label(&a, "Sand");

        let view = RecipeView::for_node(&bp, &b).unwrap();
        assert_eq!(view.label, "B");
        assert_eq!(view.inputs, vec!["Sand"]);
        assert!(view.outputs.is_empty());
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop_oneof![Just(Category::Item), Just(Category::Machine)]
    }

    fn arb_blueprint() -> impl Strategy<Value = Blueprint> {
        (
            prop::collection::vec(
                ("[a-zA-Z ]{0,12}", arb_category(), -1.0e4f32..1.0e4, -1.0e4f32..1.0e4),
                1..8,
            ),
            prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 0..16),
        )
            .prop_map(|(nodes, edges)| {
                let mut bp = Blueprint::new();
                let ids: Vec<NodeId> = nodes
                    .into_iter()
                    .map(|(label, category, x, y)| bp.add_node(label, category, Position::new(x, y)))
                    .collect();
                for (s, t) in edges {
                    bp.add_edge(s.get(&ids).clone(), t.get(&ids).clone());
                }
                bp
            })
    }

    proptest! {
        #[test]
        fn prop_json_roundtrip_is_lossless(bp in arb_blueprint()) {
            let json = bp.to_json().unwrap();
            prop_assert_eq!(Blueprint::from_json(&json).unwrap(), bp);
        }

        #[test]
        fn prop_every_edge_shows_in_both_lists(bp in arb_blueprint()) {
            for edge in &bp.edges {
                let source_label = bp.node_label(&edge.source).unwrap().to_string();
                let target_label = bp.node_label(&edge.target).unwrap().to_string();
                prop_assert!(outputs_of(&bp, &edge.source).contains(&target_label));
                prop_assert!(inputs_of(&bp, &edge.target).contains(&source_label));
            }
            for node in &bp.nodes {
                let incoming = bp.edges.iter().filter(|e| e.target == node.id).count();
                let outgoing = bp.edges.iter().filter(|e| e.source == node.id).count();
                prop_assert_eq!(inputs_of(&bp, &node.id).len(), incoming);
                prop_assert_eq!(outputs_of(&bp, &node.id).len(), outgoing);
            }
        }
    }
}
