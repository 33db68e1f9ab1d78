//! Builds monster templates and registries from definition files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use super::descriptors::{AilmentDescriptor, MonsterDefinition, SkillDescriptor};
use crate::combat::{MonsterRegistry, MonsterTemplate, Skill, SkillEffect, SkillNode, SkillTree};
use crate::error::{DuelError, Result};

/// Parse a single definition from JSON text.
pub fn parse_definition(json: &str) -> serde_json::Result<MonsterDefinition> {
    serde_json::from_str(json)
}

/// Read and parse one monster file.
pub fn load_monster_file(path: &Path) -> Result<MonsterDefinition> {
    let json = fs::read_to_string(path).map_err(|source| DuelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definition(&json).map_err(|source| DuelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every `*.json` file in `dir`, ordered by file name.
pub fn load_definitions_dir(dir: &Path) -> Result<Vec<MonsterDefinition>> {
    let io_err = |source: std::io::Error| DuelError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_err)?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    paths.iter().map(|path| load_monster_file(path)).collect()
}

/// Build a registry from definitions and check every transform target
/// resolves, so no battle can start with a dangling reference.
pub fn build_registry(definitions: &[MonsterDefinition]) -> Result<MonsterRegistry> {
    let mut registry = MonsterRegistry::new();
    for definition in definitions {
        registry.insert(build_template(definition)?)?;
    }
    registry.validate_references()?;
    debug!(monsters = registry.len(), "Monster registry built");
    Ok(registry)
}

/// Load a directory of definitions straight into a registry.
pub fn load_registry(dir: &Path) -> Result<MonsterRegistry> {
    build_registry(&load_definitions_dir(dir)?)
}

pub fn build_template(definition: &MonsterDefinition) -> Result<MonsterTemplate> {
    let skills = build_tree(&definition.name, &definition.skill_set)?;
    let template = MonsterTemplate::new(definition.name.clone(), definition.max_hp, skills);
    Ok(match &definition.image {
        Some(image) => template.with_image(image.clone()),
        None => template,
    })
}

fn build_tree(name: &str, descriptors: &[SkillDescriptor]) -> Result<SkillTree> {
    let children = descriptors
        .iter()
        .map(build_node)
        .collect::<Result<Vec<_>>>()?;
    SkillTree::new(name, children)
}

/// Unknown type tags become silent no-ops, so sibling skills keep their
/// share of the sample interval.
fn build_node(d: &SkillDescriptor) -> Result<SkillNode> {
    let effect = match d.kind.as_str() {
        "attack" => SkillEffect::Attack {
            value: required(d, d.value, "value")?,
        },
        "selfDestruct" => SkillEffect::SelfDestruct {
            value: required(d, d.value, "value")?,
        },
        "attackBoth" => SkillEffect::AttackBoth {
            value: required(d, d.value, "value")?,
        },
        "miss" => SkillEffect::Miss,
        "buff" => SkillEffect::Buff {
            value: required(d, d.value, "value")?,
        },
        "restore" => SkillEffect::Restore {
            value: required(d, d.value, "value")?,
        },
        "barrier" => SkillEffect::Barrier {
            duration: required(d, d.duration, "duration")?,
        },
        "transform" => SkillEffect::Transform {
            target: required(d, d.target_name.clone(), "target_name")?,
        },
        "transformOpponent" => SkillEffect::TransformOpponent,
        "gacya" => SkillEffect::Gacya {
            value: required(d, d.value, "value")?,
        },
        "special" => {
            let children = d.skill_set.as_deref().ok_or_else(|| missing(d, "skill_set"))?;
            return build_tree(&d.name, children).map(SkillNode::Branch);
        }
        "attach_ailment" => {
            let ailment_name = d.ailment_name.as_deref().ok_or_else(|| missing(d, "ailment_name"))?;
            let ailments = d.ailment_set.as_deref().ok_or_else(|| missing(d, "ailment_set"))?;
            SkillEffect::AttachAilment {
                ailments: Arc::new(build_ailment_tree(ailment_name, ailments)?),
            }
        }
        other => {
            warn!(skill = %d.name, kind = other, "Unknown skill type; treating it as a no-op");
            SkillEffect::Nothing
        }
    };
    Ok(SkillNode::Leaf(Skill::new(d.name.clone(), effect)))
}

fn build_ailment_tree(name: &str, descriptors: &[AilmentDescriptor]) -> Result<SkillTree> {
    let skills = descriptors.iter().map(build_ailment).collect();
    SkillTree::from_skills(name, skills)
}

fn build_ailment(d: &AilmentDescriptor) -> Skill {
    let effect = match d.kind.as_str() {
        "remove" => SkillEffect::CureAilment,
        "cancel_action" => SkillEffect::SealAction,
        "cancel_support" => SkillEffect::SealSupport,
        other => {
            warn!(ailment = %d.name, kind = other, "Unknown ailment type; treating it as a no-op");
            SkillEffect::Nothing
        }
    };
    Skill::new(d.name.clone(), effect)
}

fn required<T>(d: &SkillDescriptor, field: Option<T>, name: &'static str) -> Result<T> {
    field.ok_or_else(|| missing(d, name))
}

fn missing(d: &SkillDescriptor, field: &'static str) -> DuelError {
    DuelError::MissingField {
        skill: d.name.clone(),
        field,
    }
}
