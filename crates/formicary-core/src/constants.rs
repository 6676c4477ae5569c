//! Simulation constants and tuning parameters.

// --- Colony ---

/// Food a colony starts with unless configured otherwise.
pub const DEFAULT_FOOD: u32 = 2;

/// Seed used when no seed is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Name of the hive place.
pub const HIVE_NAME: &str = "Hive";

/// Name of the base place at the end of every tunnel.
pub const BASE_NAME: &str = "AntQueen";

// --- Layout ---

pub const DEFAULT_TUNNELS: usize = 3;

pub const DEFAULT_TUNNEL_LENGTH: usize = 9;

/// Every n-th step of a wet tunnel is water.
pub const DEFAULT_MOAT_FREQUENCY: usize = 3;

// --- Ants ---

/// Food a harvester adds each turn.
pub const HARVESTER_FOOD_PER_TURN: u32 = 1;

/// Turns a hungry ant spends digesting after eating.
pub const HUNGRY_DIGEST_TURNS: u32 = 3;

/// Hop bound (exclusive) of the short thrower.
pub const SHORT_THROWER_MAX_RANGE: u32 = 4;

/// Hop bound (inclusive) of the long thrower.
pub const LONG_THROWER_MIN_RANGE: u32 = 5;

/// Multiplier applied once to each ant behind the queen.
pub const QUEEN_BUFF_FACTOR: f64 = 2.0;

// --- Bees ---

/// Largest single hit the boss can register.
pub const BOSS_DAMAGE_CAP: f64 = 8.0;
