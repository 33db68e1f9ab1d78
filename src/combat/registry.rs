//! Name-indexed collection of monster templates.

use std::collections::HashMap;

use super::monster::{Monster, MonsterTemplate};
use crate::error::{DuelError, Result};

/// Every monster template known to a simulation run, in insertion order.
///
/// Built once, then shared by reference with everything that resolves
/// monsters by name (transform skills, the roster driver).
#[derive(Debug, Clone, Default)]
pub struct MonsterRegistry {
    templates: Vec<MonsterTemplate>,
    index: HashMap<String, usize>,
}

impl MonsterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: MonsterTemplate) -> Result<()> {
        if self.index.contains_key(&template.name) {
            return Err(DuelError::DuplicateMonster {
                name: template.name,
            });
        }
        self.index.insert(template.name.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MonsterTemplate> {
        self.index.get(name).map(|&i| &self.templates[i])
    }

    /// Like `get`, but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<&MonsterTemplate> {
        self.get(name).ok_or_else(|| DuelError::UnknownMonster {
            name: name.to_string(),
        })
    }

    /// A fresh monster instance built from the named template.
    pub fn spawn(&self, name: &str) -> Result<Monster> {
        self.require(name).map(|t| Monster::new(t.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonsterTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Check that every transform target in every template is registered.
    pub fn validate_references(&self) -> Result<()> {
        for template in &self.templates {
            for name in template.skills.referenced_monsters() {
                if !self.contains(name) {
                    return Err(DuelError::UnknownMonster {
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
