//! Built-in sample blueprint shown when the editor starts.

use crate::types::*;

/// A three-stage oil chain: crude oil is pumped into a distillation tower.
///
/// Node ids `1`, `2`, `3` and edge ids `e1-2`, `e2-3` are fixed so that the
/// sample matches files exported from earlier versions of the tool.
pub fn crude_oil_chain() -> Blueprint {
    let mut bp = Blueprint::new();

    bp.nodes.push(BlueprintNode::with_id(
        NodeId::from("1"),
        "Crude Oil",
        Category::Item,
        Position::new(100.0, 100.0),
    ));
    bp.nodes.push(BlueprintNode::with_id(
        NodeId::from("2"),
        "Pump",
        Category::Machine,
        Position::new(500.0, 100.0),
    ));
    bp.nodes.push(BlueprintNode::with_id(
        NodeId::from("3"),
        "Distillation Tower",
        Category::Machine,
        Position::new(900.0, 100.0),
    ));

    bp.edges.push(BlueprintEdge {
        id: EdgeId::from("e1-2"),
        source: NodeId::from("1"),
        target: NodeId::from("2"),
    });
    bp.edges.push(BlueprintEdge {
        id: EdgeId::from("e2-3"),
        source: NodeId::from("2"),
        target: NodeId::from("3"),
    });

    bp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{inputs_of, outputs_of};

    #[test]
    fn crude_oil_chain_is_linear() {
        let bp = crude_oil_chain();
        assert_eq!(bp.nodes.len(), 3);
        assert_eq!(bp.edges.len(), 2);

        let pump = NodeId::from("2");
        assert_eq!(inputs_of(&bp, &pump), vec!["Crude Oil"]);
        assert_eq!(outputs_of(&bp, &pump), vec!["Distillation Tower"]);
        assert!(inputs_of(&bp, &NodeId::from("1")).is_empty());
        assert!(outputs_of(&bp, &NodeId::from("3")).is_empty());
    }
}
