use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque, stable block identifier assigned by the editor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

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
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Canvas coordinates of a block. Only used to order root blocks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reading order: top to bottom, then left to right.
    pub fn reading_order(&self, other: &Position) -> std::cmp::Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}

fn enabled_by_default() -> bool {
    true
}

/// One block instance on the canvas.
///
/// Links to other blocks are stored by id: `inputs` hold value (expression)
/// children, `statements` hold the head of a nested statement chain, and
/// `next` continues the chain this block belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Type tag selecting the translation rule (e.g. `event_keyboard`).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, NodeId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub statements: BTreeMap<String, NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NodeId>,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl Node {
    /// Create an enabled node with no fields or links at the canvas origin.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            kind: kind.into(),
            fields: BTreeMap::new(),
            inputs: BTreeMap::new(),
            statements: BTreeMap::new(),
            next: None,
            position: Position::default(),
            enabled: true,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, child: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), NodeId::new(child));
        self
    }

    pub fn with_statements(mut self, name: impl Into<String>, head: impl Into<String>) -> Self {
        self.statements.insert(name.into(), NodeId::new(head));
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(NodeId::new(next));
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Every id this node links to, in a fixed order: inputs, statements, next.
    pub fn links(&self) -> impl Iterator<Item = &NodeId> {
        self.inputs
            .values()
            .chain(self.statements.values())
            .chain(self.next.iter())
    }
}

/// The block graph authored in the editor.
///
/// Nodes are kept in insertion order, which is the final tie-break when two
/// root blocks share a canvas position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn with(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// Parse the JSON form the editor bridge sends.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_order_prefers_y() {
        let upper_right = Position::new(500.0, 10.0);
        let lower_left = Position::new(0.0, 20.0);
        assert!(upper_right.reading_order(&lower_left).is_lt());
    }

    #[test]
    fn test_reading_order_ties_on_x() {
        let left = Position::new(10.0, 10.0);
        let right = Position::new(20.0, 10.0);
        assert!(left.reading_order(&right).is_lt());
        assert!(left.reading_order(&left).is_eq());
    }

    #[test]
    fn test_node_builder() {
        let node = Node::new("a", "control_if")
            .with_input("CONDITION", "cond")
            .with_statements("DO", "body")
            .with_next("b")
            .at(3.0, 4.0);
        assert_eq!(node.kind, "control_if");
        assert_eq!(node.next, Some(NodeId::new("b")));
        assert_eq!(node.position, Position::new(3.0, 4.0));
        let links: Vec<&str> = node.links().map(NodeId::as_str).collect();
        assert_eq!(links, vec!["cond", "body", "b"]);
    }

    #[test]
    fn test_workspace_json_defaults() {
        let ws = Workspace::from_json(
            r#"{"nodes":[{"id":"k1","type":"event_keyboard","fields":{"x":"KeyA"}}]}"#,
        )
        .unwrap();
        let node = &ws.nodes[0];
        assert!(node.enabled, "enabled must default to true");
        assert_eq!(node.position, Position::default());
        assert_eq!(node.fields.get("x").map(String::as_str), Some("KeyA"));
        assert!(node.next.is_none());
    }

    #[test]
    fn test_workspace_json_uses_type_key() {
        let ws = Workspace::new().with(Node::new("n", "event_gameStart"));
        let json = ws.to_json().unwrap();
        assert!(json.contains("\"type\":\"event_gameStart\""));
        assert!(!json.contains("\"kind\""));
        let back = Workspace::from_json(&json).unwrap();
        assert_eq!(back, ws);
    }

    #[test]
    fn test_workspace_lookup() {
        let mut ws = Workspace::new();
        ws.push(Node::new("a", "event_gameStart"));
        ws.push(Node::new("b", "appearance_show"));
        assert_eq!(ws.len(), 2);
        assert_eq!(ws.get(&NodeId::new("b")).map(|n| n.kind.as_str()), Some("appearance_show"));
        assert!(ws.get(&NodeId::new("c")).is_none());
        ws.get_mut(&NodeId::new("a")).unwrap().enabled = false;
        assert!(!ws.nodes[0].enabled);
    }
}
