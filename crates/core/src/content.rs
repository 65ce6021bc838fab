use serde::{Deserialize, Serialize};

pub mod keys {
    pub const ENEMY_BASIC: &str = "basic";
    pub const ENEMY_STRONG: &str = "strong";
    pub const ENEMY_FIRE: &str = "fire";
    pub const ENEMY_FAST: &str = "fast";
    pub const ENEMY_TANK: &str = "tank";

    pub const REWARD_ZOMBIE_FAST: &str = "zombie_fast";
    pub const REWARD_ZOMBIE_STRONG: &str = "zombie_strong";
    pub const REWARD_ZOMBIE_TANK: &str = "zombie_tank";
}

/// Damage one enemy deals per attack tick; also the divisor for obstacle path costs.
pub const ENEMY_ATTACK: i32 = 10;
pub const ENEMY_BASE_HEALTH: i32 = 30;
pub const ENEMY_BASE_SPEED: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyArchetype {
    Basic,
    Strong,
    Fire,
    Fast,
    Tank,
}

/// Percent multipliers applied to the base enemy stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchetypeModifiers {
    pub speed_pct: u32,
    pub attack_pct: u32,
    pub health_pct: u32,
    pub threat_cost: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    pub attack: i32,
    pub speed: u32,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 5] = [
        EnemyArchetype::Basic,
        EnemyArchetype::Strong,
        EnemyArchetype::Fire,
        EnemyArchetype::Fast,
        EnemyArchetype::Tank,
    ];

    pub const fn modifiers(self) -> ArchetypeModifiers {
        match self {
            EnemyArchetype::Basic => {
                ArchetypeModifiers { speed_pct: 100, attack_pct: 100, health_pct: 100, threat_cost: 1 }
            }
            EnemyArchetype::Strong => {
                ArchetypeModifiers { speed_pct: 100, attack_pct: 150, health_pct: 150, threat_cost: 4 }
            }
            EnemyArchetype::Fire => {
                ArchetypeModifiers { speed_pct: 100, attack_pct: 120, health_pct: 100, threat_cost: 3 }
            }
            EnemyArchetype::Fast => {
                ArchetypeModifiers { speed_pct: 150, attack_pct: 100, health_pct: 70, threat_cost: 2 }
            }
            EnemyArchetype::Tank => {
                ArchetypeModifiers { speed_pct: 100, attack_pct: 60, health_pct: 180, threat_cost: 5 }
            }
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            EnemyArchetype::Basic => keys::ENEMY_BASIC,
            EnemyArchetype::Strong => keys::ENEMY_STRONG,
            EnemyArchetype::Fire => keys::ENEMY_FIRE,
            EnemyArchetype::Fast => keys::ENEMY_FAST,
            EnemyArchetype::Tank => keys::ENEMY_TANK,
        }
    }

    pub fn stats(self) -> EnemyStats {
        let modifiers = self.modifiers();
        let mut speed = scale(ENEMY_BASE_SPEED as i32, modifiers.speed_pct) as u32;
        if modifiers.speed_pct > 100 {
            // A speed bonus always buys at least one extra step.
            speed = speed.max(ENEMY_BASE_SPEED + 1);
        }
        EnemyStats {
            health: scale(ENEMY_BASE_HEALTH, modifiers.health_pct).max(1),
            attack: scale(ENEMY_ATTACK, modifiers.attack_pct).max(1),
            speed,
        }
    }
}

fn scale(base: i32, pct: u32) -> i32 {
    base * pct as i32 / 100
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardCard {
    ZombieFast,
    ZombieStrong,
    ZombieTank,
}

/// Cards a procedurally generated level can award.
pub const REWARD_POOL: [RewardCard; 3] =
    [RewardCard::ZombieFast, RewardCard::ZombieStrong, RewardCard::ZombieTank];

impl RewardCard {
    pub fn key(self) -> &'static str {
        match self {
            RewardCard::ZombieFast => keys::REWARD_ZOMBIE_FAST,
            RewardCard::ZombieStrong => keys::REWARD_ZOMBIE_STRONG,
            RewardCard::ZombieTank => keys::REWARD_ZOMBIE_TANK,
        }
    }

    /// Archetype unlocked by collecting this card.
    pub fn unlocks(self) -> EnemyArchetype {
        match self {
            RewardCard::ZombieFast => EnemyArchetype::Fast,
            RewardCard::ZombieStrong => EnemyArchetype::Strong,
            RewardCard::ZombieTank => EnemyArchetype::Tank,
        }
    }
}
