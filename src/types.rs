//! Core data types for the blueprint editor.
//!
//! A [`Blueprint`] is the graph store: an ordered list of nodes (items and
//! machines) and an ordered list of directed supply edges between them. It is
//! the only state that is written to and read from blueprint files.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Rendering tag written into every node object of an exported file.
pub const NODE_RENDER_TAG: &str = "custom";

/// Unique identifier for blueprint nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Unique identifier for supply edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Classification of a node. Only affects how the node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A raw or intermediate material
    Item,
    /// A processing unit
    Machine,
}

impl Category {
    /// Label given to nodes created from the context menu.
    pub fn default_label(self) -> &'static str {
        match self {
            Category::Item => "New Item",
            Category::Machine => "New Machine",
        }
    }

    /// Human-readable name of the category.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Item => "Item",
            Category::Machine => "Machine",
        }
    }
}

/// Position of a node on the canvas, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// Creates a position from its coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// User-facing payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label, free text (may be empty)
    pub label: String,
    /// Item or machine. Older files store this under `type`.
    #[serde(alias = "type")]
    pub category: Category,
}

fn default_render_tag() -> String {
    NODE_RENDER_TAG.to_string()
}

/// A single node of the blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintNode {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Rendering tag, always `custom` for nodes created by this tool
    #[serde(rename = "type", default = "default_render_tag")]
    pub render_tag: String,
    /// Position on the canvas
    pub position: Position,
    /// Label and category
    pub data: NodeData,
}

impl BlueprintNode {
    /// Creates a node with a freshly generated id.
    pub fn new(label: impl Into<String>, category: Category, position: Position) -> Self {
        Self::with_id(NodeId::generate(), label, category, position)
    }

    /// Creates a node with the given id.
    pub fn with_id(
        id: NodeId,
        label: impl Into<String>,
        category: Category,
        position: Position,
    ) -> Self {
        Self {
            id,
            render_tag: default_render_tag(),
            position,
            data: NodeData {
                label: label.into(),
                category,
            },
        }
    }

    /// The node's display label.
    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// The node's category.
    pub fn category(&self) -> Category {
        self.data.category
    }
}

/// A directed supply relationship: `source` feeds `target`.
///
/// Endpoints are not checked against the node list; a dangling id is kept
/// as-is and shown with a placeholder label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintEdge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// ID of the supplying node
    pub source: NodeId,
    /// ID of the supplied node
    pub target: NodeId,
}

impl BlueprintEdge {
    /// Creates an edge with a freshly generated id.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::generate(),
            source,
            target,
        }
    }
}

/// The graph store: every node and edge of the production chain.
///
/// Nodes and edges keep insertion order, which is also the order used by the
/// input/output lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Blueprint {
    /// All nodes, in insertion order
    pub nodes: Vec<BlueprintNode>,
    /// All edges, in insertion order
    pub edges: Vec<BlueprintEdge>,
}

impl Blueprint {
    /// Creates an empty blueprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the blueprint to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a blueprint from JSON text.
    ///
    /// Both top-level `nodes` and `edges` arrays are required.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replaces the whole graph with the one parsed from `json`.
    ///
    /// On error the current nodes and edges are left exactly as they were.
    pub fn replace_from_json(&mut self, json: &str) -> Result<(), LoadError> {
        *self = Self::from_json(json)?;
        Ok(())
    }

    /// Appends a new node and returns its id.
    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        category: Category,
        position: Position,
    ) -> NodeId {
        let node = BlueprintNode::new(label, category, position);
        let id = node.id.clone();
        log::debug!("added {} node {}", category.display_name(), id);
        self.nodes.push(node);
        id
    }

    /// Appends a directed edge from `source` to `target` and returns its id.
    ///
    /// Duplicate edges and self-loops are accepted.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> EdgeId {
        let edge = BlueprintEdge::new(source, target);
        let id = edge.id.clone();
        log::debug!("added edge {} ({} -> {})", id, edge.source, edge.target);
        self.edges.push(edge);
        id
    }

    /// Renames a node. Any text is accepted, including the empty string.
    pub fn update_node_label(&mut self, id: &NodeId, new_label: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.data.label = new_label.into();
            log::debug!("renamed node {} to {:?}", id, node.data.label);
        }
    }

    /// Moves a node to a new position.
    pub fn update_node_position(&mut self, id: &NodeId, new_position: Position) {
        if let Some(node) = self.node_mut(id) {
            node.position = new_position;
        }
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&BlueprintNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Looks up a node by id for mutation.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut BlueprintNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// Returns the label of the node with the given id, if it exists.
    pub fn node_label(&self, id: &NodeId) -> Option<&str> {
        self.node(id).map(|n| n.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_node_chain() -> (Blueprint, NodeId, NodeId) {
        let mut bp = Blueprint::new();
        let a = bp.add_node("A", Category::Item, Position::new(0.0, 0.0));
        let b = bp.add_node("B", Category::Machine, Position::new(200.0, 0.0));
        bp.add_edge(a.clone(), b.clone());
        (bp, a, b)
    }

    #[test]
    fn test_blueprint_default_is_empty() {
        let bp = Blueprint::default();
        assert!(bp.nodes.is_empty());
        assert!(bp.edges.is_empty());
    }

    #[test]
    fn test_add_nodes_yields_distinct_ids() {
        let mut bp = Blueprint::new();
        let ids: Vec<NodeId> = (0..50)
            .map(|i| bp.add_node(format!("n{i}"), Category::Item, Position::default()))
            .collect();

        assert_eq!(bp.nodes.len(), 50);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_add_node_sets_attributes() {
        let mut bp = Blueprint::new();
        let id = bp.add_node("Iron Ore", Category::Item, Position::new(10.0, 20.0));

        let node = bp.node(&id).unwrap();
        assert_eq!(node.label(), "Iron Ore");
        assert_eq!(node.category(), Category::Item);
        assert_eq!(node.position, Position::new(10.0, 20.0));
        assert_eq!(node.render_tag, NODE_RENDER_TAG);
    }

    #[test]
    fn test_add_edge_allows_duplicates_and_self_loops() {
        let (mut bp, a, b) = two_node_chain();
        bp.add_edge(a.clone(), b.clone());
        bp.add_edge(a.clone(), a.clone());

        assert_eq!(bp.edges.len(), 3);
        assert_ne!(bp.edges[0].id, bp.edges[1].id);
        assert_eq!(bp.edges[2].source, a);
        assert_eq!(bp.edges[2].target, a);
    }

    #[test]
    fn test_add_edge_accepts_dangling_endpoints() {
        let mut bp = Blueprint::new();
        bp.add_edge(NodeId::from("ghost"), NodeId::from("phantom"));
        assert_eq!(bp.edges.len(), 1);
        assert!(bp.nodes.is_empty());
    }

    #[test]
    fn test_rename_changes_only_label() {
        let (mut bp, a, _b) = two_node_chain();
        let edges_before = bp.edges.clone();
        let position_before = bp.node(&a).unwrap().position;

        bp.update_node_label(&a, "Copper Ore");

        let node = bp.node(&a).unwrap();
        assert_eq!(node.label(), "Copper Ore");
        assert_eq!(node.category(), Category::Item);
        assert_eq!(node.position, position_before);
        assert_eq!(bp.edges, edges_before);
    }

    #[test]
    fn test_rename_to_empty_string() {
        let (mut bp, a, _b) = two_node_chain();
        bp.update_node_label(&a, "");
        assert_eq!(bp.node_label(&a), Some(""));
    }

    #[test]
    fn test_update_unknown_node_is_noop() {
        let (mut bp, _a, _b) = two_node_chain();
        let before = bp.clone();
        bp.update_node_label(&NodeId::from("missing"), "x");
        bp.update_node_position(&NodeId::from("missing"), Position::new(1.0, 1.0));
        assert_eq!(bp, before);
    }

    #[test]
    fn test_update_node_position() {
        let (mut bp, _a, b) = two_node_chain();
        bp.update_node_position(&b, Position::new(-40.5, 300.25));
        assert_eq!(bp.node(&b).unwrap().position, Position::new(-40.5, 300.25));
    }

    #[test]
    fn test_serialization_field_names() {
        let mut bp = Blueprint::new();
        let id = bp.add_node("Pump", Category::Machine, Position::new(500.0, 100.0));
        bp.add_edge(id.clone(), id.clone());

        let value: serde_json::Value = serde_json::from_str(&bp.to_json().unwrap()).unwrap();
        let node = &value["nodes"][0];
        assert_eq!(node["id"], json!(id.as_str()));
        assert_eq!(node["type"], json!("custom"));
        assert_eq!(node["position"], json!({"x": 500.0, "y": 100.0}));
        assert_eq!(node["data"], json!({"label": "Pump", "category": "machine"}));

        let edge = &value["edges"][0];
        assert_eq!(edge["source"], json!(id.as_str()));
        assert_eq!(edge["target"], json!(id.as_str()));
        assert!(edge["id"].is_string());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let (mut bp, a, _b) = two_node_chain();
        bp.update_node_label(&a, "");
        bp.update_node_position(&a, Position::new(0.1, -7.3));
        bp.add_edge(NodeId::from("dangling"), a);

        let json = bp.to_json().unwrap();
        let restored = Blueprint::from_json(&json).unwrap();

        assert_eq!(restored, bp);
    }

    #[test]
    fn test_loads_legacy_document() {
        let legacy = r#"{
          "nodes": [
            {"id": "1", "type": "custom", "position": {"x": 100, "y": 100},
             "data": {"label": "Crude Oil", "type": "item"},
             "width": 140, "height": 58, "selected": false},
            {"id": "2", "position": {"x": 500, "y": 100},
             "data": {"label": "Pump", "type": "machine"}}
          ],
          "edges": [
            {"id": "e1-2", "source": "1", "target": "2", "sourceHandle": null}
          ]
        }"#;

        let bp = Blueprint::from_json(legacy).unwrap();
        assert_eq!(bp.nodes.len(), 2);
        assert_eq!(bp.nodes[0].category(), Category::Item);
        assert_eq!(bp.nodes[1].category(), Category::Machine);
        assert_eq!(bp.nodes[1].render_tag, NODE_RENDER_TAG);
        assert_eq!(bp.edges[0].id, EdgeId::from("e1-2"));
        assert_eq!(bp.edges[0].source, NodeId::from("1"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = Blueprint::from_json("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_missing_top_level_shape_is_rejected() {
        assert!(matches!(
            Blueprint::from_json(r#"{"nodes": []}"#).unwrap_err(),
            LoadError::Shape(_)
        ));
        assert!(matches!(
            Blueprint::from_json("[1, 2, 3]").unwrap_err(),
            LoadError::Shape(_)
        ));
        assert!(matches!(
            Blueprint::from_json(r#"{"nodes": [{"id": "1"}], "edges": []}"#).unwrap_err(),
            LoadError::Shape(_)
        ));
    }

    #[test]
    fn test_replace_from_json_replaces_wholesale() {
        let (mut bp, _a, _b) = two_node_chain();
        let mut other = Blueprint::new();
        other.add_node("Only", Category::Machine, Position::default());
        let json = other.to_json().unwrap();

        bp.replace_from_json(&json).unwrap();

        assert_eq!(bp, other);
        assert!(bp.edges.is_empty());
    }

    #[test]
    fn test_replace_from_json_failure_keeps_graph() {
        let (mut bp, _a, _b) = two_node_chain();
        let before = bp.clone();

        assert!(bp.replace_from_json("{not json").is_err());
        assert!(bp.replace_from_json(r#"{"edges": []}"#).is_err());

        assert_eq!(bp, before);
    }
}
