//! Battle core: skills, ailments and monsters.

pub mod ailment;
pub mod gacya;
pub mod monster;
pub mod random;
pub mod registry;
pub mod skill;

pub use ailment::{AilmentKind, TemporaryAilment};
pub use monster::{Monster, MonsterTemplate};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use registry::MonsterRegistry;
pub use skill::{Skill, SkillEffect, SkillNode, SkillTree};
