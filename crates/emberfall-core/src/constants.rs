//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena bounds ---

/// Arena half-width in world units (x extent).
pub const ARENA_HALF_WIDTH: f64 = 60.0;

/// Arena half-height in world units (y extent).
pub const ARENA_HALF_HEIGHT: f64 = 40.0;

// --- Hero (player-controlled target) ---

/// Unit id reserved for the hero.
pub const HERO_ID: u32 = 0;

pub const HERO_MAX_HEALTH: u32 = 300;

pub const HERO_RADIUS: f64 = 0.6;

/// Maximum commanded hero speed (units/s).
pub const HERO_MAX_SPEED: f64 = 8.0;

// --- Hit reaction ---

/// Invulnerability window granted to a unit on taking a hit (seconds).
pub const ON_HIT_INVULN_SECS: f64 = 0.4;

/// Duration of the orthogonal damage-flash sequence (seconds).
pub const HURT_FLASH_SECS: f64 = 0.25;

// --- Death & succession ---

/// Delay between entering Death and removal (fade-out), seconds.
pub const DEATH_FADE_SECS: f64 = 1.5;

/// Default successor starting-health fraction when a profile omits one.
pub const SUCCESSION_DEFAULT_FRACTION: f64 = 0.7;

// --- Leap attacks ---

/// Vertical launch speed for airborne attacks (units/s).
pub const LEAP_VERTICAL_SPEED: f64 = 9.0;

/// Vertical deceleration while airborne (units/s²).
pub const LEAP_GRAVITY: f64 = 30.0;

/// Horizontal dash speed while airborne (units/s).
pub const LEAP_DASH_SPEED: f64 = 14.0;

/// Maximum time to wait for the landing predicate before forcing progress.
pub const LEAP_MAX_AIR_SECS: f64 = 1.2;

// --- Defend (disengage) ---

/// Backward hop speed while in Defend (units/s).
pub const DEFEND_HOP_SPEED: f64 = 10.0;

/// Duration of the Defend disengage before returning to React (seconds).
pub const DEFEND_SECS: f64 = 0.5;

// --- Patrol ---

/// Patrol movement speed as a fraction of the archetype's move speed.
pub const PATROL_SPEED_FACTOR: f64 = 0.5;

/// Seconds between patrol waypoint re-rolls.
pub const PATROL_RETARGET_SECS: f64 = 3.0;

/// Distance at which a patrol waypoint counts as reached.
pub const PATROL_ARRIVE_RANGE: f64 = 1.0;

/// Seconds an Idle patroller lingers before wandering.
pub const IDLE_LINGER_SECS: f64 = 1.0;

// --- Projectiles ---

/// Projectile collider radius (units).
pub const PROJECTILE_RADIUS: f64 = 0.3;

/// Default projectile lifetime (seconds).
pub const PROJECTILE_LIFETIME_SECS: f64 = 4.0;

/// Maximum turn rate for homing projectiles (rad/s).
pub const HOMING_TURN_RATE: f64 = 2.5;

// --- Perception ---

/// Multiplier on aggro radius beyond which an acquired target is dropped.
pub const TARGET_DROP_FACTOR: f64 = 1.5;

// --- Melee engagement ---

/// Gap kept between collider edges when a melee chaser closes in.
pub const MELEE_STANDOFF: f64 = 0.4;

/// Tolerance band around a ranged archetype's preferred range.
pub const KITE_BAND_FACTOR: f64 = 0.2;
