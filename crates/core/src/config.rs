use crate::CardType;
use serde::{Deserialize, Serialize};

/// Point table behind the Faint Memory score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FaintMemoryRules {
    pub shared_points: u32,
    pub monster_points: u32,
    pub forbidden_points: u32,
    pub hirameki_points: u32,
    pub god_hirameki_points: u32,
    /// Points for the 1st, 2nd, ... removal across the whole deck. The last entry repeats.
    pub removal_tiers: Vec<u32>,
    pub copy_tiers: Vec<u32>,
    pub character_removal_bonus: u32,
    pub conversion_points: u32,
}

impl Default for FaintMemoryRules {
    fn default() -> Self {
        Self {
            shared_points: 20,
            monster_points: 80,
            forbidden_points: 20,
            hirameki_points: 10,
            god_hirameki_points: 20,
            removal_tiers: vec![0, 10, 30, 50, 70],
            copy_tiers: vec![0, 10, 30, 50, 70],
            character_removal_bonus: 20,
            conversion_points: 10,
        }
    }
}

impl FaintMemoryRules {
    pub fn acquisition_points(&self, kind: CardType) -> u32 {
        match kind {
            CardType::Character => 0,
            CardType::Shared => self.shared_points,
            CardType::Monster => self.monster_points,
            CardType::Forbidden => self.forbidden_points,
        }
    }

    /// `order` is 1-based.
    pub fn removal_tier(&self, order: u32) -> u32 {
        tier_at(&self.removal_tiers, order)
    }

    /// `order` is 1-based.
    pub fn copy_tier(&self, order: u32) -> u32 {
        tier_at(&self.copy_tiers, order)
    }
}

fn tier_at(tiers: &[u32], order: u32) -> u32 {
    let Some(last) = tiers.last() else {
        return 0;
    };
    let idx = order.saturating_sub(1) as usize;
    tiers.get(idx).copied().unwrap_or(*last)
}
