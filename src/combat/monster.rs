//! Monster combat entity.

use std::collections::HashMap;
use std::sync::Arc;

use super::ailment::{AilmentKind, TemporaryAilment};
use super::skill::{Skill, SkillTree};

/// The identity half of a monster: what a transform swaps in and out.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterTemplate {
    pub name: String,
    pub max_hp: i32,
    pub skills: Arc<SkillTree>,
    /// Display image reference (opaque to the engine).
    pub image: Option<String>,
}

impl MonsterTemplate {
    pub fn new(name: impl Into<String>, max_hp: i32, skills: SkillTree) -> Self {
        Self {
            name: name.into(),
            max_hp,
            skills: Arc::new(skills),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A monster taking part in battles.
///
/// Keeps the template it was created from separately from its current one,
/// so a hard reset can undo transformations.
#[derive(Debug, Clone)]
pub struct Monster {
    initial: MonsterTemplate,
    current: MonsterTemplate,
    hp: i32,
    /// Additive attack modifier; only resets with the monster.
    buff: i32,
    permanent_ailment: Arc<SkillTree>,
    temporary_ailments: HashMap<AilmentKind, TemporaryAilment>,
}

impl Monster {
    pub fn new(template: MonsterTemplate) -> Self {
        let mut monster = Self {
            current: template.clone(),
            hp: template.max_hp,
            initial: template,
            buff: 0,
            permanent_ailment: SkillTree::no_ailment(),
            temporary_ailments: HashMap::new(),
        };
        monster.reset(true);
        monster
    }

    /// Clear buff and all ailments. A hard reset also reverts any
    /// transformation and restores full HP.
    pub fn reset(&mut self, hard: bool) {
        self.buff = 0;
        self.permanent_ailment = SkillTree::no_ailment();
        self.temporary_ailments.clear();

        if hard {
            self.current = self.initial.clone();
            self.hp = self.current.max_hp;
        }
    }

    /// Become `other`: adopt its template, clamp HP to the new maximum and
    /// soft reset.
    pub fn copy_template_from(&mut self, other: &MonsterTemplate) {
        self.current = other.clone();
        self.hp = self.hp.min(self.current.max_hp);
        self.reset(false);
    }

    /// Advance every temporary ailment by one turn.
    pub fn tick(&mut self) {
        for ailment in self.temporary_ailments.values_mut() {
            ailment.tick();
        }
    }

    /// Store an ailment, replacing any existing one of the same kind.
    pub fn add_temporary_ailment(&mut self, ailment: TemporaryAilment) {
        self.temporary_ailments.insert(ailment.kind(), ailment);
    }

    pub fn temporary_ailment(&self, kind: AilmentKind) -> Option<&TemporaryAilment> {
        self.temporary_ailments.get(&kind)
    }

    pub fn is_afflicted(&self, kind: AilmentKind) -> bool {
        self.temporary_ailment(kind)
            .is_some_and(TemporaryAilment::is_active)
    }

    pub fn get_skill(&self, x: f64) -> &Skill {
        self.current.skills.get(x)
    }

    pub fn get_permanent_ailment(&self, x: f64) -> &Skill {
        self.permanent_ailment.get(x)
    }

    pub fn skill_tree(&self) -> Arc<SkillTree> {
        Arc::clone(&self.current.skills)
    }

    pub fn permanent_ailment(&self) -> Arc<SkillTree> {
        Arc::clone(&self.permanent_ailment)
    }

    pub fn set_permanent_ailment(&mut self, ailment: Arc<SkillTree>) {
        self.permanent_ailment = ailment;
    }

    pub fn clear_permanent_ailment(&mut self) {
        self.permanent_ailment = SkillTree::no_ailment();
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Heal, capped at max HP.
    pub fn restore(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount).min(self.current.max_hp);
    }

    pub fn add_buff(&mut self, amount: i32) {
        self.buff = self.buff.saturating_add(amount);
    }

    pub fn is_down(&self) -> bool {
        self.hp <= 0
    }

    pub fn name(&self) -> &str {
        &self.current.name
    }

    pub fn max_hp(&self) -> i32 {
        self.current.max_hp
    }

    pub fn image(&self) -> Option<&str> {
        self.current.image.as_deref()
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn buff(&self) -> i32 {
        self.buff
    }

    pub fn initial_template(&self) -> &MonsterTemplate {
        &self.initial
    }
}
