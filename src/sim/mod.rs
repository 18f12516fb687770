//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (1/60 s, frame-count based)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod effects;
pub mod state;
pub mod tick;
pub mod universe;
pub mod world;

pub use effects::{EffectJob, EffectKind, EffectParticle};
pub use state::{
    BlackHole, GameEvent, GamePhase, GameState, LifeSystem, MultiverseState, Planet, Player, Star,
    SurfaceSize, TimeWarpZone, Wormhole,
};
pub use tick::{tick, TickInput};
pub use universe::{universe_color, universe_props, PhysicsParams, UniverseProps, MAX_UNIVERSES};
pub use world::World;
