//! Skills, skill trees and their effects.
//!
//! A skill tree resolves a uniform sample in [0, 1) into exactly one leaf by
//! recursive equal subdivision: with `n` children the sample picks child
//! `floor(x * n)` and a nested tree receives the fractional remainder. A
//! leaf's probability is therefore the product of `1 / n` along its path.
//!
//! Skill definitions are immutable and shared (`Arc`) between every monster
//! and every battle that references them.

use std::sync::{Arc, OnceLock};

use super::ailment::{AilmentKind, TemporaryAilment};
use super::gacya::gacya_damage;
use super::monster::Monster;
use super::random::RandomSource;
use super::registry::MonsterRegistry;
use crate::error::{DuelError, Result};

/// What a skill does when it fires.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEffect {
    /// `target.hp -= value + caster.buff`.
    Attack { value: i32 },
    /// `caster.hp -= value + caster.buff`.
    SelfDestruct { value: i32 },
    /// Attack followed by self-destruct with the same base value.
    AttackBoth { value: i32 },
    Miss,
    /// Permanent additive attack bonus for the caster.
    Buff { value: i32 },
    /// Heal the caster, capped at max HP.
    Restore { value: i32 },
    /// Make the caster invulnerable for `duration` turns.
    Barrier { duration: u32 },
    /// Caster takes on the named monster's template.
    Transform { target: String },
    /// Caster takes on one of the opponent's transform destinations.
    TransformOpponent,
    /// Self-damage, then three dice decide bonus damage to the target.
    Gacya { value: i32 },
    /// Replace the target's permanent-ailment tree.
    AttachAilment { ailments: Arc<SkillTree> },

    // Permanent-ailment effects. These only appear inside ailment trees and
    // always act on the afflicted monster (the caster of its turn).
    /// Clear the caster's permanent ailment.
    CureAilment,
    /// Seal the caster's attacks for this turn.
    SealAction,
    /// Seal the caster's support skills for this turn.
    SealSupport,
    /// Resolves silently with no effect.
    Nothing,
}

/// A named combat action.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    name: String,
    effect: SkillEffect,
}

impl Skill {
    pub fn new(name: impl Into<String>, effect: SkillEffect) -> Self {
        Self {
            name: name.into(),
            effect,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn effect(&self) -> &SkillEffect {
        &self.effect
    }

    /// Apply this skill for one turn.
    ///
    /// Returns the log line describing what happened, or `None` for effects
    /// that resolve silently. Only a reference to a monster missing from
    /// `registry` is an error.
    pub fn apply(
        &self,
        caster: &mut Monster,
        target: &mut Monster,
        registry: &MonsterRegistry,
        rng: &mut impl RandomSource,
    ) -> Result<Option<String>> {
        let line = match &self.effect {
            SkillEffect::Attack { value } => self.attack(caster, target, *value),
            SkillEffect::SelfDestruct { value } => self.self_destruct(caster, *value),
            SkillEffect::AttackBoth { value } => {
                let attack = self.attack(caster, target, *value);
                let recoil = self.self_destruct(caster, *value);
                format!("{attack} {recoil}")
            }
            SkillEffect::Miss => format!("[{}] uses {}. It misses.", caster.name(), self.name),
            SkillEffect::Buff { value } => {
                if caster.is_afflicted(AilmentKind::CancelSupport) {
                    return Ok(Some(self.fizzle(caster)));
                }
                caster.add_buff(*value);
                format!(
                    "[{}] uses {}. [{}]'s attack rises by {}.",
                    caster.name(),
                    self.name,
                    caster.name(),
                    value
                )
            }
            SkillEffect::Restore { value } => {
                if caster.is_afflicted(AilmentKind::CancelSupport) {
                    return Ok(Some(self.fizzle(caster)));
                }
                caster.restore(*value);
                format!(
                    "[{}] uses {}. [{}] recovers {} HP.",
                    caster.name(),
                    self.name,
                    caster.name(),
                    value
                )
            }
            SkillEffect::Barrier { duration } => {
                caster.add_temporary_ailment(TemporaryAilment::with_duration(
                    AilmentKind::Barrier,
                    *duration,
                ));
                format!(
                    "[{}] uses {}. [{}] is invulnerable for {} turns.",
                    caster.name(),
                    self.name,
                    caster.name(),
                    duration
                )
            }
            SkillEffect::Transform { target: into } => {
                let template = registry.require(into)?;
                let old_name = caster.name().to_string();
                caster.copy_template_from(template);
                format!("[{}] transforms into [{}].", old_name, caster.name())
            }
            SkillEffect::TransformOpponent => {
                let tree = target.skill_tree();
                let options: Vec<&str> = tree.transform_targets().collect();
                if options.is_empty() {
                    return Ok(Some(format!("[{}] fails to transform.", caster.name())));
                }
                let pick = options[rng.pick_index(options.len())];
                let template = registry.require(pick)?;
                let old_name = caster.name().to_string();
                caster.copy_template_from(template);
                format!("[{}] transforms into [{}].", old_name, caster.name())
            }
            SkillEffect::Gacya { value } => {
                caster.take_damage(value.saturating_add(caster.buff()));
                let dice = [rng.roll_d6(), rng.roll_d6(), rng.roll_d6()];
                let damage = gacya_damage(dice);
                target.take_damage(damage);
                format!(
                    "[{}] spins the gacha and rolls {},{},{}. [{}] takes {} damage.",
                    caster.name(),
                    dice[0],
                    dice[1],
                    dice[2],
                    target.name(),
                    damage
                )
            }
            SkillEffect::AttachAilment { ailments } => {
                target.set_permanent_ailment(Arc::clone(ailments));
                format!(
                    "[{}] uses {}. [{}] is afflicted with {}.",
                    caster.name(),
                    self.name,
                    target.name(),
                    ailments.name()
                )
            }
            SkillEffect::CureAilment => {
                caster.clear_permanent_ailment();
                format!("[{}] recovers from its ailment.", caster.name())
            }
            SkillEffect::SealAction => {
                caster.add_temporary_ailment(TemporaryAilment::with_duration(
                    AilmentKind::CancelAction,
                    1,
                ));
                return Ok(None);
            }
            SkillEffect::SealSupport => {
                caster.add_temporary_ailment(TemporaryAilment::with_duration(
                    AilmentKind::CancelSupport,
                    1,
                ));
                return Ok(None);
            }
            SkillEffect::Nothing => return Ok(None),
        };

        Ok(Some(line))
    }

    fn attack(&self, caster: &Monster, target: &mut Monster, value: i32) -> String {
        if caster.is_afflicted(AilmentKind::CancelAction) {
            return self.fizzle(caster);
        }
        if target.is_afflicted(AilmentKind::Barrier) {
            return format!(
                "[{}] uses {}. [{}] nullifies the attack.",
                caster.name(),
                self.name,
                target.name()
            );
        }

        let damage = value.saturating_add(caster.buff());
        target.take_damage(damage);
        format!(
            "[{}] uses {}. [{}] takes {}(+{}) damage.",
            caster.name(),
            self.name,
            target.name(),
            damage,
            caster.buff()
        )
    }

    fn self_destruct(&self, caster: &mut Monster, value: i32) -> String {
        let damage = value.saturating_add(caster.buff());
        caster.take_damage(damage);
        format!(
            "[{}] uses {}. [{}] takes {}(+{}) damage.",
            caster.name(),
            self.name,
            caster.name(),
            damage,
            caster.buff()
        )
    }

    fn fizzle(&self, caster: &Monster) -> String {
        format!("[{}]'s {} fizzles.", caster.name(), self.name)
    }
}

/// A child of a skill tree: a concrete skill or a nested tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillNode {
    Leaf(Skill),
    Branch(SkillTree),
}

impl From<Skill> for SkillNode {
    fn from(skill: Skill) -> Self {
        SkillNode::Leaf(skill)
    }
}

impl From<SkillTree> for SkillNode {
    fn from(tree: SkillTree) -> Self {
        SkillNode::Branch(tree)
    }
}

/// An ordered, non-empty collection of skills resolved by a uniform sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillTree {
    name: String,
    children: Vec<SkillNode>,
}

impl SkillTree {
    pub fn new(name: impl Into<String>, children: Vec<SkillNode>) -> Result<Self> {
        let name = name.into();
        if children.is_empty() {
            return Err(DuelError::EmptySkillTree { name });
        }
        Ok(Self { name, children })
    }

    pub fn from_skills(name: impl Into<String>, skills: Vec<Skill>) -> Result<Self> {
        Self::new(name, skills.into_iter().map(SkillNode::from).collect())
    }

    /// The shared "no ailment" tree: a single leaf that does nothing.
    pub fn no_ailment() -> Arc<SkillTree> {
        static NO_AILMENT: OnceLock<Arc<SkillTree>> = OnceLock::new();
        Arc::clone(NO_AILMENT.get_or_init(|| {
            Arc::new(SkillTree {
                name: "none".to_string(),
                children: vec![SkillNode::Leaf(Skill::new("nothing", SkillEffect::Nothing))],
            })
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[SkillNode] {
        &self.children
    }

    /// Resolve a sample in [0, 1) to a leaf skill.
    ///
    /// Samples outside the interval clamp to the leftmost or rightmost child
    /// at each level.
    pub fn get(&self, x: f64) -> &Skill {
        let mut tree = self;
        let mut x = x;
        loop {
            let n = tree.children.len();
            let scaled = x * n as f64;
            // NaN and negatives saturate to 0 in the cast
            let index = (scaled.floor() as usize).min(n - 1);
            match &tree.children[index] {
                SkillNode::Leaf(skill) => return skill,
                SkillNode::Branch(child) => {
                    x = scaled - index as f64;
                    tree = child;
                }
            }
        }
    }

    /// Destinations of the transform skills directly in this tree.
    ///
    /// Nested trees are not searched; opponent transforms only copy
    /// transforms a monster can pick at the top level.
    pub fn transform_targets(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|node| match node {
            SkillNode::Leaf(Skill {
                effect: SkillEffect::Transform { target },
                ..
            }) => Some(target.as_str()),
            _ => None,
        })
    }

    /// All leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&Skill> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Skill>) {
        for node in &self.children {
            match node {
                SkillNode::Leaf(skill) => out.push(skill),
                SkillNode::Branch(child) => child.collect_leaves(out),
            }
        }
    }

    /// Every monster name referenced by a transform anywhere below this
    /// tree, including inside attached ailment trees.
    pub fn referenced_monsters(&self) -> Vec<&str> {
        self.leaves()
            .into_iter()
            .flat_map(|skill| match &skill.effect {
                SkillEffect::Transform { target } => vec![target.as_str()],
                SkillEffect::AttachAilment { ailments } => ailments.referenced_monsters(),
                _ => Vec::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::monster::MonsterTemplate;
    use crate::combat::random::ScriptedSource;

    fn leaf(name: &str) -> SkillNode {
        Skill::new(name, SkillEffect::Miss).into()
    }

    fn tree(name: &str, children: Vec<SkillNode>) -> SkillTree {
        SkillTree::new(name, children).unwrap()
    }

    fn duel(left: Vec<Skill>, right: Vec<Skill>) -> (Monster, Monster) {
        let left = MonsterTemplate::new("Left", 100, SkillTree::from_skills("left", left).unwrap());
        let right =
            MonsterTemplate::new("Right", 100, SkillTree::from_skills("right", right).unwrap());
        (Monster::new(left), Monster::new(right))
    }

    fn miss() -> Skill {
        Skill::new("Wait", SkillEffect::Miss)
    }

    fn apply(skill: &Skill, caster: &mut Monster, target: &mut Monster) -> Option<String> {
        let registry = MonsterRegistry::default();
        let mut rng = ScriptedSource::default();
        skill.apply(caster, target, &registry, &mut rng).unwrap()
    }

    // ── Tree resolution ──────────────────────────────────────────────

    #[test]
    fn test_empty_tree_rejected() {
        let err = SkillTree::new("empty", Vec::new()).unwrap_err();
        assert!(matches!(err, DuelError::EmptySkillTree { .. }));
    }

    #[test]
    fn test_flat_tree_partitions_evenly() {
        let t = tree("flat", vec![leaf("a"), leaf("b"), leaf("c"), leaf("d")]);
        let names = ["a", "b", "c", "d"];
        let steps = 1000;
        let mut first_seen = [None; 4];
        let mut last_seen = [None; 4];
        let mut previous = 0usize;

        for i in 0..steps {
            let x = i as f64 / steps as f64;
            let name = t.get(x).name();
            let index = names.iter().position(|n| *n == name).unwrap();
            assert!(index >= previous, "partition must be contiguous");
            previous = index;
            first_seen[index].get_or_insert(i);
            last_seen[index] = Some(i);
        }

        for index in 0..4 {
            let first = first_seen[index].unwrap();
            let last = last_seen[index].unwrap();
            assert_eq!(last - first + 1, steps / 4, "child {index} width");
        }
    }

    #[test]
    fn test_nested_tree_subdivides_its_interval() {
        // [a | [b c] | d]: b covers [1/3, 1/2), c covers [1/2, 2/3)
        let t = tree(
            "root",
            vec![leaf("a"), tree("inner", vec![leaf("b"), leaf("c")]).into(), leaf("d")],
        );
        assert_eq!(t.get(0.0).name(), "a");
        assert_eq!(t.get(0.34).name(), "b");
        assert_eq!(t.get(0.49).name(), "b");
        assert_eq!(t.get(0.51).name(), "c");
        assert_eq!(t.get(0.66).name(), "c");
        assert_eq!(t.get(0.67).name(), "d");
    }

    #[test]
    fn test_extremes_resolve_to_outer_leaves() {
        let t = tree(
            "root",
            vec![
                tree("left", vec![leaf("first"), leaf("x")]).into(),
                leaf("y"),
                tree("right", vec![leaf("z"), tree("deep", vec![leaf("w"), leaf("last")]).into()])
                    .into(),
            ],
        );
        assert_eq!(t.get(0.0).name(), "first");
        assert_eq!(t.get(1.0 - f64::EPSILON).name(), "last");
        assert_eq!(t.get(1.0).name(), "last");
        assert_eq!(t.get(-0.5).name(), "first");
        assert_eq!(t.get(f64::NAN).name(), "first");
    }

    #[test]
    fn test_same_sample_same_leaf() {
        let t = tree("root", vec![leaf("a"), tree("n", vec![leaf("b"), leaf("c")]).into()]);
        for i in 0..100 {
            let x = i as f64 / 100.0;
            assert_eq!(t.get(x), t.get(x));
        }
    }

    #[test]
    fn test_transform_targets_top_level_only() {
        let t = tree(
            "root",
            vec![
                Skill::new("Evolve", SkillEffect::Transform { target: "Dragon".into() }).into(),
                tree(
                    "special",
                    vec![Skill::new("Hidden", SkillEffect::Transform { target: "God".into() })
                        .into()],
                )
                .into(),
            ],
        );
        let targets: Vec<&str> = t.transform_targets().collect();
        assert_eq!(targets, vec!["Dragon"]);
        assert_eq!(t.referenced_monsters(), vec!["Dragon", "God"]);
    }

    // ── Effects ──────────────────────────────────────────────────────

    #[test]
    fn test_attack_adds_buff() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let buff = Skill::new("Focus", SkillEffect::Buff { value: 5 });
        let attack = Skill::new("Slash", SkillEffect::Attack { value: 10 });

        apply(&buff, &mut caster, &mut target);
        apply(&attack, &mut caster, &mut target);

        assert_eq!(target.hp(), 85);
        assert_eq!(caster.buff(), 5);
    }

    #[test]
    fn test_barrier_nullifies_attack() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let barrier = Skill::new("Guard", SkillEffect::Barrier { duration: 2 });
        apply(&barrier, &mut target, &mut caster);

        let attack = Skill::new("Slash", SkillEffect::Attack { value: 10 });
        let line = apply(&attack, &mut caster, &mut target).unwrap();

        assert_eq!(target.hp(), 100);
        assert!(line.contains("nullifies"));
    }

    #[test]
    fn test_cancel_action_seals_attack_not_self_destruct() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        caster.add_temporary_ailment(TemporaryAilment::with_duration(AilmentKind::CancelAction, 1));

        let attack = Skill::new("Slash", SkillEffect::Attack { value: 10 });
        let line = apply(&attack, &mut caster, &mut target).unwrap();
        assert!(line.contains("fizzles"));
        assert_eq!(target.hp(), 100);

        let boom = Skill::new("Boom", SkillEffect::SelfDestruct { value: 10 });
        apply(&boom, &mut caster, &mut target);
        assert_eq!(caster.hp(), 90);
    }

    #[test]
    fn test_cancel_action_leaves_support_working() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        caster.add_temporary_ailment(TemporaryAilment::with_duration(AilmentKind::CancelAction, 1));
        apply(&Skill::new("Focus", SkillEffect::Buff { value: 3 }), &mut caster, &mut target);
        assert_eq!(caster.buff(), 3);
    }

    #[test]
    fn test_cancel_support_seals_buff_and_restore() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        caster.take_damage(50);
        caster.add_temporary_ailment(TemporaryAilment::with_duration(
            AilmentKind::CancelSupport,
            1,
        ));

        apply(&Skill::new("Focus", SkillEffect::Buff { value: 3 }), &mut caster, &mut target);
        apply(&Skill::new("Heal", SkillEffect::Restore { value: 20 }), &mut caster, &mut target);
        assert_eq!(caster.buff(), 0);
        assert_eq!(caster.hp(), 50);

        apply(&Skill::new("Slash", SkillEffect::Attack { value: 10 }), &mut caster, &mut target);
        assert_eq!(target.hp(), 90);
    }

    #[test]
    fn test_restore_caps_at_max_hp() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        caster.take_damage(10);
        apply(&Skill::new("Heal", SkillEffect::Restore { value: 25 }), &mut caster, &mut target);
        assert_eq!(caster.hp(), 100);
    }

    #[test]
    fn test_attack_both_hits_both_sides() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        caster.add_buff(2);
        apply(
            &Skill::new("Headbutt", SkillEffect::AttackBoth { value: 10 }),
            &mut caster,
            &mut target,
        );
        assert_eq!(target.hp(), 88);
        assert_eq!(caster.hp(), 88);
    }

    #[test]
    fn test_attack_both_into_barrier_still_recoils() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        target.add_temporary_ailment(TemporaryAilment::with_duration(AilmentKind::Barrier, 1));
        apply(
            &Skill::new("Headbutt", SkillEffect::AttackBoth { value: 10 }),
            &mut caster,
            &mut target,
        );
        assert_eq!(target.hp(), 100);
        assert_eq!(caster.hp(), 90);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let line = apply(&miss(), &mut caster, &mut target).unwrap();
        assert!(line.contains("misses"));
        assert_eq!((caster.hp(), target.hp()), (100, 100));
    }

    #[test]
    fn test_huge_values_saturate() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let pump = Skill::new("Pump", SkillEffect::Buff { value: i32::MAX });
        apply(&pump, &mut caster, &mut target);
        apply(&pump, &mut caster, &mut target);
        assert_eq!(caster.buff(), i32::MAX);

        let slam = Skill::new("Slam", SkillEffect::Attack { value: i32::MAX });
        apply(&slam, &mut caster, &mut target);
        apply(&slam, &mut caster, &mut target);
        assert_eq!(target.hp(), i32::MIN);

        let heal = Skill::new("Heal", SkillEffect::Restore { value: i32::MAX });
        apply(&heal, &mut target, &mut caster);
        assert_eq!(target.hp(), -1);
    }

    #[test]
    fn test_gacya_self_damage_and_jackpot() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        caster.add_buff(4);
        let registry = MonsterRegistry::default();
        let mut rng = ScriptedSource::default().with_dice(vec![6, 6, 6]);
        let gacya = Skill::new("Spin", SkillEffect::Gacya { value: 10 });

        gacya.apply(&mut caster, &mut target, &registry, &mut rng).unwrap();

        assert_eq!(caster.hp(), 86);
        assert_eq!(target.hp(), -200);
    }

    #[test]
    fn test_gacya_ignores_barrier() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        target.add_temporary_ailment(TemporaryAilment::with_duration(AilmentKind::Barrier, 3));
        let registry = MonsterRegistry::default();
        let mut rng = ScriptedSource::default().with_dice(vec![2, 2, 5]);
        let gacya = Skill::new("Spin", SkillEffect::Gacya { value: 1 });

        gacya.apply(&mut caster, &mut target, &registry, &mut rng).unwrap();

        assert_eq!(target.hp(), 40);
    }

    #[test]
    fn test_attach_ailment_replaces_target_tree() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let poison = Arc::new(
            SkillTree::from_skills(
                "Poison",
                vec![
                    Skill::new("seal", SkillEffect::SealAction),
                    Skill::new("cure", SkillEffect::CureAilment),
                ],
            )
            .unwrap(),
        );
        let skill = Skill::new(
            "Spores",
            SkillEffect::AttachAilment {
                ailments: Arc::clone(&poison),
            },
        );

        apply(&skill, &mut caster, &mut target);

        assert_eq!(target.permanent_ailment().name(), "Poison");
        assert_eq!(caster.permanent_ailment().name(), "none");
    }

    #[test]
    fn test_ailment_effects_act_on_caster() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let seal = Skill::new("seal", SkillEffect::SealSupport);
        assert!(apply(&seal, &mut caster, &mut target).is_none());
        assert!(caster.is_afflicted(AilmentKind::CancelSupport));
        assert!(!target.is_afflicted(AilmentKind::CancelSupport));

        let seal_action = Skill::new("seal", SkillEffect::SealAction);
        assert!(apply(&seal_action, &mut caster, &mut target).is_none());
        assert_eq!(
            caster
                .temporary_ailment(AilmentKind::CancelAction)
                .map(|a| a.remaining_turns()),
            Some(1)
        );
    }

    #[test]
    fn test_cure_clears_caster_ailment() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let poison = Arc::new(SkillTree::from_skills("Poison", vec![miss()]).unwrap());
        caster.set_permanent_ailment(poison);

        let line = apply(&Skill::new("cure", SkillEffect::CureAilment), &mut caster, &mut target);

        assert!(line.is_some());
        assert_eq!(caster.permanent_ailment().name(), "none");
    }

    #[test]
    fn test_nothing_is_silent() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        assert!(apply(&Skill::new("x", SkillEffect::Nothing), &mut caster, &mut target).is_none());
    }

    #[test]
    fn test_transform_unknown_target_errors() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let registry = MonsterRegistry::default();
        let mut rng = ScriptedSource::default();
        let skill = Skill::new("Evolve", SkillEffect::Transform { target: "Ghost".into() });

        let err = skill
            .apply(&mut caster, &mut target, &registry, &mut rng)
            .unwrap_err();

        assert!(matches!(err, DuelError::UnknownMonster { ref name } if name == "Ghost"));
        assert_eq!(caster.name(), "Left");
    }

    #[test]
    fn test_transform_copies_template() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let mut registry = MonsterRegistry::default();
        registry
            .insert(MonsterTemplate::new(
                "Dragon",
                60,
                SkillTree::from_skills(
                    "dragon",
                    vec![Skill::new("Fire", SkillEffect::Attack { value: 40 })],
                )
                .unwrap(),
            ))
            .unwrap();
        caster.add_buff(9);
        let mut rng = ScriptedSource::default();
        let skill = Skill::new("Evolve", SkillEffect::Transform { target: "Dragon".into() });

        let line = skill
            .apply(&mut caster, &mut target, &registry, &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(line, "[Left] transforms into [Dragon].");
        assert_eq!(caster.name(), "Dragon");
        assert_eq!(caster.max_hp(), 60);
        assert_eq!(caster.hp(), 60);
        assert_eq!(caster.buff(), 0);
        assert_eq!(caster.get_skill(0.0).name(), "Fire");
    }

    #[test]
    fn test_transform_opponent_without_options_fails_softly() {
        let (mut caster, mut target) = duel(vec![miss()], vec![miss()]);
        let line = apply(
            &Skill::new("Mimic", SkillEffect::TransformOpponent),
            &mut caster,
            &mut target,
        )
        .unwrap();
        assert!(line.contains("fails"));
        assert_eq!(caster.name(), "Left");
    }

    #[test]
    fn test_transform_opponent_uses_targets_options() {
        let evolve_fish = Skill::new("Hatch", SkillEffect::Transform { target: "Fish".into() });
        let evolve_bird = Skill::new("Hatch", SkillEffect::Transform { target: "Bird".into() });
        let (mut caster, mut target) = duel(vec![miss()], vec![evolve_fish, miss(), evolve_bird]);

        let mut registry = MonsterRegistry::default();
        for (name, hp) in [("Fish", 30), ("Bird", 40)] {
            registry
                .insert(MonsterTemplate::new(
                    name,
                    hp,
                    SkillTree::from_skills(name, vec![miss()]).unwrap(),
                ))
                .unwrap();
        }
        let mut rng = ScriptedSource::default().with_picks(vec![1]);

        Skill::new("Mimic", SkillEffect::TransformOpponent)
            .apply(&mut caster, &mut target, &registry, &mut rng)
            .unwrap();

        assert_eq!(caster.name(), "Bird");
        assert_eq!(caster.hp(), 40);
        assert_eq!(target.name(), "Right");
    }
}
