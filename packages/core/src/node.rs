use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Style mapping (CSS-like keys to JSON values).
pub type StyleMap = serde_json::Map<String, Value>;

/// Prop mapping. The `lazy` key is reserved: a truthy value defers mounting.
pub type PropMap = serde_json::Map<String, Value>;

/// Unique per-node identifier, formatted `<prefix><integer>` (e.g. `wc12`).
///
/// A freshly built part carries an unassigned (empty) id until the insert
/// operation assigns one from the session's key generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// False until the key generator has assigned a value.
    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }

    /// Trailing decimal digit run of the identifier: `wc12` → `Some(12)`.
    pub fn numeric_suffix(&self) -> Option<u64> {
        let digits = self
            .0
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if digits == 0 {
            return None;
        }
        self.0[self.0.len() - digits..].parse().ok()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// One entry in the page's configuration tree; renders to one component
/// instance. Serialized shape is the persisted page format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: NodeId,

    /// Reference into the external component catalog.
    pub component_name: String,

    #[serde(default)]
    pub style: StyleMap,

    #[serde(default)]
    pub props: PropMap,

    /// Absence means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    /// Ordered children; always a sequence when present, never a single node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    pub fn new(component_name: impl Into<String>) -> Self {
        Node {
            id: NodeId::default(),
            component_name: component_name.into(),
            style: StyleMap::new(),
            props: PropMap::new(),
            hidden: None,
            children: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = NodeId::new(id);
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = if hidden { Some(true) } else { None };
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// Children as a slice; absent children read as empty.
    pub fn child_nodes(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Children sequence, created on first use.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        self.children.get_or_insert_with(Vec::new)
    }

    /// Whether `id` names this node or any descendant.
    pub fn contains(&self, id: &NodeId) -> bool {
        if &self.id == id {
            return true;
        }
        self.child_nodes().iter().any(|child| child.contains(id))
    }
}
