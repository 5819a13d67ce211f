//! World configuration with documented constants
//!
//! Every tunable read by the generator, the economy, and the migration
//! scheduler lives here. The config is built once before generation and
//! passed by reference into every component; nothing reads it globally.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Tunables for world generation and the per-turn economic model
///
/// Defaults produce a temperate 60%-ocean world with sparse towns.
/// Changing them shifts pacing, not correctness: degenerate values give
/// degenerate but well-defined worlds (an all-ocean map is legal output).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the world RNG. Two runs with the same seed and geometry
    /// produce byte-identical worlds.
    pub seed: u64,

    // === LAND SHAPING ===
    /// Percentage of the map that stays ocean after land shaping.
    pub ocean_percent: u32,

    /// Upper bound on the random continent size roll; walk length grows
    /// with the square of the roll.
    pub continent_size: u32,

    /// Percent chance that a land mass grows as an archipelago chain
    /// instead of a single continent.
    pub archipelago_ratio: u32,

    /// Percent chance an isolated ocean pocket becomes a lake rather
    /// than being filled in as land.
    pub lake_percent: u32,

    /// Search bound for the isolated-ocean flood fill. Pockets whose
    /// connected ocean bottoms out within this many cells get
    /// reclassified.
    pub sea_limit: u32,

    /// Percent chance per bridge cell of severing a peninsula
    /// land-bridge; doubled when a neighboring bridge cell is fully
    /// coastal.
    pub severance_rate: u32,

    // === TERRAIN GROWTH ===
    /// Spacing divisor for terrain anchor seeding. Smaller values seed
    /// more anchors and produce patchier terrain.
    pub terrain_granularity: u32,

    /// Percent chance per growth pass that a cell takes an out-of-place
    /// terrain instead of copying a neighbor.
    pub odd_terrain_chance: u32,

    /// Percent chance that a settled land region carries a gate.
    pub gate_chance: u32,

    /// Percent weight for spontaneous town seeding, scaled by terrain
    /// economy score and distance from the poles.
    pub town_probability: u32,

    // === ECONOMY ===
    /// Monthly upkeep per peasant, the floor wages must beat for a
    /// pillaged region to count as recovered.
    pub maintenance_cost: i32,

    /// Maximum hop depth when tracing connected roads for the wage
    /// bonus.
    pub road_trace_depth: u32,

    /// Cap on the total development-equivalent a road network can add.
    pub road_bonus_cap: i32,

    /// Divisor turning region wealth into entertainment income.
    pub entertainment_fraction: i32,

    /// Percent chance an eligible advanced item gets a market listing.
    pub advanced_market_chance: u32,

    /// Percent chance an eligible magic item gets a market listing.
    pub magic_market_chance: u32,

    /// Quota of sell listings per market setup.
    pub max_sell_markets: usize,

    /// Quota of buy listings per market setup.
    pub max_buy_markets: usize,

    // === TOWNS ===
    /// Accumulated market activity needed to count as a village / town /
    /// city. Must be strictly increasing.
    pub village_activity: i32,
    pub town_activity: i32,
    pub city_activity: i32,

    /// Target populations per tier; growth converges toward these.
    pub village_pop: i32,
    pub town_pop: i32,
    pub city_pop: i32,

    /// Percent of the gap to the target population closed per turn.
    pub town_growth_rate: i32,

    // === DECAY ===
    /// Base monthly decay click budget per structure.
    pub decay_base: u32,

    /// Extra click budget in harsh terrain or winter weather.
    pub weather_decay_bonus: u32,

    /// Extra click budget while a region is recovering from pillage,
    /// scaled by the fraction of development still missing below the
    /// recovery floor.
    pub pillage_decay_bonus: u32,

    // === MIGRATION ===
    /// Development-score penalty per hop when scoring migration
    /// targets.
    pub migration_hop_cost: i32,

    /// Weight of the free-space fraction in the attractiveness score.
    pub migration_space_weight: i32,

    /// Divisor of source population giving the per-turn emigrant
    /// supply.
    pub emigration_divisor: i32,

    /// Cap on the development-differential migration multiplier.
    pub migration_multiplier_cap: i32,

    // === DISTANCE ===
    /// Extra distance per vertical level crossed.
    pub level_penalty: i32,

    /// Default BFS budget for graph-geometry distance queries.
    pub distance_budget: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,

            // Land shaping
            ocean_percent: 60,
            continent_size: 16,
            archipelago_ratio: 25,
            lake_percent: 30,
            sea_limit: 8,
            severance_rate: 10,

            // Terrain growth
            terrain_granularity: 3,
            odd_terrain_chance: 4,
            gate_chance: 4,
            town_probability: 6,

            // Economy
            maintenance_cost: 10,
            road_trace_depth: 8,
            road_bonus_cap: 45,
            entertainment_fraction: 20,
            advanced_market_chance: 25,
            magic_market_chance: 8,
            max_sell_markets: 6,
            max_buy_markets: 6,

            // Towns
            village_activity: 50,
            town_activity: 150,
            city_activity: 400,
            village_pop: 800,
            town_pop: 1600,
            city_pop: 3200,
            town_growth_rate: 5,

            // Decay
            decay_base: 3,
            weather_decay_bonus: 2,
            pillage_decay_bonus: 4,

            // Migration
            migration_hop_cost: 8,
            migration_space_weight: 20,
            emigration_divisor: 5,
            migration_multiplier_cap: 3,

            // Distance
            level_penalty: 4,
            distance_budget: 10,
        }
    }
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.ocean_percent > 100 {
            return Err(format!(
                "ocean_percent ({}) must be a percentage",
                self.ocean_percent
            ));
        }
        if self.lake_percent > 100 || self.archipelago_ratio > 100 {
            return Err("lake_percent and archipelago_ratio must be percentages".into());
        }
        if self.terrain_granularity == 0 {
            return Err("terrain_granularity must be at least 1".into());
        }
        if !(self.village_activity < self.town_activity && self.town_activity < self.city_activity)
        {
            return Err(format!(
                "tier activity thresholds must be strictly increasing ({} / {} / {})",
                self.village_activity, self.town_activity, self.city_activity
            ));
        }
        if self.village_pop < 2 {
            return Err("village_pop must be at least 2".into());
        }
        if !(self.village_pop < self.town_pop && self.town_pop < self.city_pop) {
            return Err("tier population targets must be strictly increasing".into());
        }
        if self.emigration_divisor <= 0 {
            return Err("emigration_divisor must be positive".into());
        }
        if !(1..=100).contains(&self.town_growth_rate) {
            return Err(format!(
                "town_growth_rate ({}) must be in 1..=100",
                self.town_growth_rate
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bad_tier_thresholds_rejected() {
        let mut config = WorldConfig::default();
        config.town_activity = config.village_activity;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = WorldConfig::from_toml_str("ocean_percent = 40\nseed = 99").unwrap();
        assert_eq!(config.ocean_percent, 40);
        assert_eq!(config.seed, 99);
        // untouched keys keep defaults
        assert_eq!(config.sea_limit, WorldConfig::default().sea_limit);
    }
}
