//! Part building: catalog entry + override config → fresh subtree.

use crate::errors::EditorError;
use pagecraft_core::{Catalog, Node, NodeId, PartConfig};
use serde_json::Value;

/// Materialize a component part from its catalog defaults and an override
/// config.
///
/// Props are layered defaults → `{lazy: true}` → overrides (override wins,
/// so a config may opt out of lazy mounting); style is defaults → overrides.
/// Children come from the config's `childrenConfig` when present, otherwise
/// from the catalog's `defaultChildren` template, built recursively.
///
/// No ids are assigned here: the insert operation owns the id space and keys
/// the subtree when it lands in a tree.
pub fn build_part<C: Catalog>(config: &PartConfig, catalog: &C) -> Result<Node, EditorError> {
    let entry = catalog
        .lookup(&config.component_name)
        .ok_or_else(|| EditorError::UnknownComponent(config.component_name.clone()))?;

    let mut props = entry.default_props.clone();
    props.insert("lazy".to_string(), Value::Bool(true));
    for (key, value) in &config.props {
        props.insert(key.clone(), value.clone());
    }

    let mut style = entry.default_style.clone();
    for (key, value) in &config.style {
        style.insert(key.clone(), value.clone());
    }

    let child_configs = config
        .children_config
        .as_ref()
        .or(entry.default_children.as_ref());
    let children = match child_configs {
        Some(configs) => Some(
            configs
                .iter()
                .map(|child| build_part(child, catalog))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    Ok(Node {
        id: NodeId::default(),
        component_name: config.component_name.clone(),
        style,
        props,
        hidden: None,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::{CatalogEntry, ComponentMenu};
    use serde_json::json;

    fn menu() -> ComponentMenu {
        ComponentMenu::new()
            .with_entry(
                "Banner",
                CatalogEntry::new("Banner")
                    .with_default_style("height", "200px")
                    .with_default_prop("interval", 3),
            )
            .with_entry(
                "Row",
                CatalogEntry::new("Row")
                    .with_child_capability()
                    .with_default_child(PartConfig::new("Banner")),
            )
    }

    #[test]
    fn defaults_merge_under_overrides() {
        let config = PartConfig::new("Banner")
            .with_style("height", "320px")
            .with_prop("interval", 5);

        let node = build_part(&config, &menu()).unwrap();

        assert_eq!(node.style["height"], json!("320px"));
        assert_eq!(node.props["interval"], json!(5));
        assert_eq!(node.props["lazy"], json!(true));
        assert!(!node.id.is_assigned());
    }

    #[test]
    fn lazy_baseline_can_be_overridden() {
        let config = PartConfig::new("Banner").with_prop("lazy", false);
        let node = build_part(&config, &menu()).unwrap();
        assert_eq!(node.props["lazy"], json!(false));
    }

    #[test]
    fn default_children_template_is_used_when_config_has_none() {
        let node = build_part(&PartConfig::new("Row"), &menu()).unwrap();
        let children = node.child_nodes();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].component_name, "Banner");
        assert_eq!(children[0].style["height"], json!("200px"));
    }

    #[test]
    fn children_config_replaces_the_template() {
        let config = PartConfig::new("Row")
            .with_child(PartConfig::new("Banner"))
            .with_child(PartConfig::new("Banner"));

        let node = build_part(&config, &menu()).unwrap();
        assert_eq!(node.child_nodes().len(), 2);
    }

    #[test]
    fn unknown_component_fails_fast() {
        let err = build_part(&PartConfig::new("Carousel"), &menu()).unwrap_err();
        assert_eq!(err, EditorError::UnknownComponent("Carousel".to_string()));
    }
}
