//! Serde model of the JSON monster definition files.
//!
//! Type tags stay plain strings so an unknown tag can degrade to a no-op with a
//! warning instead of failing the whole file.

use serde::{Deserialize, Serialize};

/// One monster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDefinition {
    pub name: String,
    pub max_hp: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub skill_set: Vec<SkillDescriptor>,
}

/// A skill entry. Which optional fields are required depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// Children of a `special` (nested) skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_set: Option<Vec<SkillDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ailment_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ailment_set: Option<Vec<AilmentDescriptor>>,
}

impl SkillDescriptor {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            value: None,
            duration: None,
            target_name: None,
            skill_set: None,
            ailment_name: None,
            ailment_set: None,
        }
    }
}

/// An entry of an `attach_ailment` skill's ailment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AilmentDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}
