//! Temporary, duration-counted status effects.

use serde::{Deserialize, Serialize};

/// The three orthogonal temporary ailments. A monster holds at most one of
/// each kind; re-attaching a kind refreshes its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AilmentKind {
    /// Incoming damage-dealing skills are nullified.
    Barrier,
    /// The afflicted monster's own damage-dealing skills fizzle.
    CancelAction,
    /// The afflicted monster's buff/restore skills fizzle.
    CancelSupport,
}

impl AilmentKind {
    pub fn id(self) -> &'static str {
        match self {
            AilmentKind::Barrier => "barrier",
            AilmentKind::CancelAction => "cancelAction",
            AilmentKind::CancelSupport => "cancelSupport",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AilmentKind::Barrier => "Invulnerable",
            AilmentKind::CancelAction => "Attacks sealed",
            AilmentKind::CancelSupport => "Support sealed",
        }
    }
}

/// A temporary ailment with its remaining duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryAilment {
    kind: AilmentKind,
    remaining_turns: u32,
}

impl TemporaryAilment {
    /// Create an inactive ailment (zero remaining turns).
    pub fn new(kind: AilmentKind) -> Self {
        Self {
            kind,
            remaining_turns: 0,
        }
    }

    /// Create an ailment already set to `duration` turns.
    pub fn with_duration(kind: AilmentKind, duration: u32) -> Self {
        let mut ailment = Self::new(kind);
        ailment.reset(duration);
        ailment
    }

    pub fn kind(&self) -> AilmentKind {
        self.kind
    }

    pub fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    pub fn reset(&mut self, duration: u32) {
        self.remaining_turns = duration;
    }

    /// Advance one turn. Floors at zero.
    pub fn tick(&mut self) {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_turns > 0
    }
}
