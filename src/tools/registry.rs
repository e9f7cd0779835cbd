//! Static operation registry.
//!
//! One entry per provider capability, fixed for the process lifetime. The
//! dispatcher's validation and the advertised menu both read this table.

use crate::tools::ToolDescription;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Registry entry: wire name, human description, required argument names,
/// and the advertised input schema.
pub(super) struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: &'static [&'static str],
    pub input_schema: Value,
}

impl ToolSpec {
    pub fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema.clone(),
        }
    }
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

static REGISTRY: Lazy<Vec<ToolSpec>> = Lazy::new(|| {
    vec![
        ToolSpec {
            name: "listHeroes",
            description: "Get a list of all Marvel Rivals heroes",
            required: &[],
            input_schema: object_schema(json!({}), &[]),
        },
        ToolSpec {
            name: "getHeroAbilities",
            description: "Get abilities for a specific hero",
            required: &["identifier"],
            input_schema: object_schema(
                json!({
                    "identifier": {"type": "string", "description": "Hero ID or slug"},
                }),
                &["identifier"],
            ),
        },
        ToolSpec {
            name: "getHeroInfo",
            description: "Get detailed information about a hero including abilities",
            required: &["identifier"],
            input_schema: object_schema(
                json!({
                    "identifier": {"type": "string", "description": "Hero ID or slug"},
                }),
                &["identifier"],
            ),
        },
        ToolSpec {
            name: "getHeroSkins",
            description: "Get skins for a specific hero",
            required: &["id"],
            input_schema: object_schema(
                json!({
                    "id": {"type": "string", "description": "Hero ID"},
                }),
                &["id"],
            ),
        },
        ToolSpec {
            name: "listSkins",
            description: "Get a list of all available skins",
            required: &[],
            input_schema: object_schema(json!({}), &[]),
        },
        ToolSpec {
            name: "listAchievements",
            description: "Get a list of all achievements",
            required: &[],
            input_schema: object_schema(json!({}), &[]),
        },
        ToolSpec {
            name: "searchAchievement",
            description: "Search for achievements by name",
            required: &["name"],
            input_schema: object_schema(
                json!({
                    "name": {"type": "string", "description": "Achievement name to search for"},
                }),
                &["name"],
            ),
        },
        ToolSpec {
            name: "listItems",
            description: "Get a list of all items",
            required: &[],
            input_schema: object_schema(json!({}), &[]),
        },
        ToolSpec {
            name: "getItemsByType",
            description: "Get items filtered by type",
            required: &["type"],
            input_schema: object_schema(
                json!({
                    "type": {
                        "type": "string",
                        "enum": ["NAMEPLATE", "MVP", "EMOTE", "SPRAY"],
                        "description": "Item type",
                    },
                }),
                &["type"],
            ),
        },
        ToolSpec {
            name: "listMaps",
            description: "Get a list of all game maps",
            required: &[],
            input_schema: object_schema(json!({}), &[]),
        },
        ToolSpec {
            name: "filterMaps",
            description: "Get maps filtered by type or mode",
            required: &["filter"],
            input_schema: object_schema(
                json!({
                    "filter": {
                        "type": "string",
                        "enum": ["convoy", "convergence", "competitive", "casual"],
                        "description": "Filter type",
                    },
                }),
                &["filter"],
            ),
        },
        ToolSpec {
            name: "getPlayerProfile",
            description: "Get detailed player profile information",
            required: &["identifier"],
            input_schema: object_schema(
                json!({
                    "identifier": {"type": "string", "description": "Player ID or username"},
                }),
                &["identifier"],
            ),
        },
        ToolSpec {
            name: "searchPlayer",
            description: "Search for a player by username",
            required: &["username"],
            input_schema: object_schema(
                json!({
                    "username": {"type": "string", "description": "Username to search for"},
                }),
                &["username"],
            ),
        },
        ToolSpec {
            name: "getPlayerMatchHistory",
            description: "Get match history for a player",
            required: &["identifier"],
            input_schema: object_schema(
                json!({
                    "identifier": {"type": "string", "description": "Player ID"},
                }),
                &["identifier"],
            ),
        },
    ]
});

pub(super) fn all() -> &'static [ToolSpec] {
    &REGISTRY
}

pub(super) fn find(name: &str) -> Option<&'static ToolSpec> {
    REGISTRY.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = all().iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn test_required_arguments_appear_in_schema() {
        for spec in all() {
            let properties = spec.input_schema["properties"]
                .as_object()
                .unwrap_or_else(|| panic!("{} has no properties object", spec.name));
            for required in spec.required {
                assert!(
                    properties.contains_key(*required),
                    "{} requires {required} but does not describe it",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_find_is_exact() {
        assert!(find("listHeroes").is_some());
        assert!(find("listheroes").is_none());
        assert!(find("doStuff").is_none());
    }
}
