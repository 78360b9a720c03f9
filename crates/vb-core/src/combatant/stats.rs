//! Combatant stat model.
//!
//! Stats live in a sparse map; a key that was never set reads as 0.
//! `current_stats` on a combatant is always derived from a base block plus
//! equipment bonuses plus status modifiers, via [`Combatant::recalculate`].
//!
//! [`Combatant::recalculate`]: crate::combatant::Combatant::recalculate

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The six combat attributes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum StatKind {
    /// Hit points (as a stat: the maximum pool size)
    #[serde(rename = "HP")]
    #[strum(serialize = "HP")]
    Hp,
    /// Magic points (as a stat: the maximum pool size)
    #[serde(rename = "MP")]
    #[strum(serialize = "MP")]
    Mp,
    /// Physical attack
    #[serde(rename = "ATK")]
    #[strum(serialize = "ATK")]
    Atk,
    /// Physical defense
    #[serde(rename = "DEF")]
    #[strum(serialize = "DEF")]
    Def,
    /// Speed; decides turn order
    #[serde(rename = "VEL")]
    #[strum(serialize = "VEL")]
    Vel,
    /// Magic power; doubles as magic resistance when defending
    #[serde(rename = "MAG")]
    #[strum(serialize = "MAG")]
    Mag,
}

/// A sparse stat-name → value map. Missing keys read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatBlock {
    values: HashMap<StatKind, i32>,
}

impl StatBlock {
    /// Create an empty block (every stat reads as 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, stat: StatKind, value: i32) -> Self {
        self.set(stat, value);
        self
    }

    /// Read a stat; 0 if never set.
    pub fn get(&self, stat: StatKind) -> i32 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    /// Set a stat to an absolute value.
    pub fn set(&mut self, stat: StatKind, value: i32) {
        self.values.insert(stat, value);
    }

    /// Add a signed delta to a stat.
    pub fn add(&mut self, stat: StatKind, delta: i32) {
        *self.values.entry(stat).or_insert(0) += delta;
    }

    /// Add every entry of `other` into this block.
    pub fn merge(&mut self, other: &StatBlock) {
        for (&stat, &value) in &other.values {
            self.add(stat, value);
        }
    }

    /// Iterate over the set entries.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }

    /// True if no stat has ever been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(StatKind, i32)> for StatBlock {
    fn from_iter<I: IntoIterator<Item = (StatKind, i32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stat_reads_as_zero() {
        let block = StatBlock::new();
        assert_eq!(block.get(StatKind::Atk), 0);
        assert_eq!(block.get(StatKind::Hp), 0);
    }

    #[test]
    fn test_with_and_add() {
        let mut block = StatBlock::new().with(StatKind::Atk, 10);
        block.add(StatKind::Atk, -3);
        block.add(StatKind::Def, 5);
        assert_eq!(block.get(StatKind::Atk), 7);
        assert_eq!(block.get(StatKind::Def), 5);
    }

    #[test]
    fn test_merge_sums_entries() {
        let mut a = StatBlock::new()
            .with(StatKind::Hp, 100)
            .with(StatKind::Atk, 10);
        let b = StatBlock::new()
            .with(StatKind::Atk, 5)
            .with(StatKind::Mag, 2);
        a.merge(&b);
        assert_eq!(a.get(StatKind::Hp), 100);
        assert_eq!(a.get(StatKind::Atk), 15);
        assert_eq!(a.get(StatKind::Mag), 2);
    }

    #[test]
    fn test_serializes_with_short_stat_names() {
        let block = StatBlock::new().with(StatKind::Vel, 12);
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"VEL":12}"#);
        let back: StatBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
