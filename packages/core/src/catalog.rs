use crate::node::{PropMap, StyleMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Override configuration handed to the part builder: which catalog
/// component to instantiate and what to merge over its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartConfig {
    pub component_name: String,

    #[serde(default)]
    pub props: PropMap,

    #[serde(default)]
    pub style: StyleMap,

    /// When present, replaces the catalog's `defaultChildren` template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_config: Option<Vec<PartConfig>>,
}

impl PartConfig {
    pub fn new(component_name: impl Into<String>) -> Self {
        PartConfig {
            component_name: component_name.into(),
            props: PropMap::new(),
            style: StyleMap::new(),
            children_config: None,
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: PartConfig) -> Self {
        self.children_config.get_or_insert_with(Vec::new).push(child);
        self
    }
}

/// Per-component catalog record: display metadata, default configuration,
/// and whether instances may hold children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub display_name: String,

    #[serde(default)]
    pub default_style: StyleMap,

    #[serde(default)]
    pub default_props: PropMap,

    /// Template subtree instantiated when a part config supplies none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_children: Option<Vec<PartConfig>>,

    #[serde(default)]
    pub has_child_capability: bool,
}

impl CatalogEntry {
    pub fn new(display_name: impl Into<String>) -> Self {
        CatalogEntry {
            display_name: display_name.into(),
            default_style: StyleMap::new(),
            default_props: PropMap::new(),
            default_children: None,
            has_child_capability: false,
        }
    }

    pub fn with_child_capability(mut self) -> Self {
        self.has_child_capability = true;
        self
    }

    pub fn with_default_style(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.default_style.insert(key.into(), value.into());
        self
    }

    pub fn with_default_prop(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.default_props.insert(key.into(), value.into());
        self
    }

    pub fn with_default_child(mut self, child: PartConfig) -> Self {
        self.default_children.get_or_insert_with(Vec::new).push(child);
        self
    }
}

/// Read-only registry mapping component names to catalog records.
pub trait Catalog {
    fn lookup(&self, component_name: &str) -> Option<&CatalogEntry>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn lookup(&self, component_name: &str) -> Option<&CatalogEntry> {
        (**self).lookup(component_name)
    }
}

/// In-memory catalog, deserializable from the component-menu payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentMenu {
    entries: HashMap<String, CatalogEntry>,
}

impl ComponentMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component_name: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(component_name.into(), entry);
    }

    pub fn with_entry(mut self, component_name: impl Into<String>, entry: CatalogEntry) -> Self {
        self.insert(component_name, entry);
        self
    }
}

impl Catalog for ComponentMenu {
    fn lookup(&self, component_name: &str) -> Option<&CatalogEntry> {
        self.entries.get(component_name)
    }
}
