//! Skill-frequency entries.

use serde::{Deserialize, Serialize};

/// Occurrence count for one skill name within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

impl SkillCount {
    pub fn new(skill: impl Into<String>, count: usize) -> Self {
        Self {
            skill: skill.into(),
            count,
        }
    }
}
