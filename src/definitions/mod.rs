//! Monster definition files and the loader that turns them into templates.

mod descriptors;
mod loader;

pub use descriptors::{AilmentDescriptor, MonsterDefinition, SkillDescriptor};
pub use loader::{
    build_registry, build_template, load_definitions_dir, load_monster_file, load_registry,
    parse_definition,
};
