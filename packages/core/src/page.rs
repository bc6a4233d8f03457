use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Persisted page document: tree plus page metadata, as loaded from and
/// saved to the page store. Round-trips exactly; derived presentation fields
/// never appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(default)]
    pub tree: Vec<Node>,
}

impl PageDocument {
    pub fn new(tree: Vec<Node>) -> Self {
        PageDocument {
            pid: None,
            page: None,
            tree,
        }
    }
}
