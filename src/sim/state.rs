//! Game state and core simulation types
//!
//! One session owns exactly one player, one life system and one multiverse
//! state. Worlds are regenerated wholesale on every universe switch.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::effects::EffectJob;
use super::universe::{universe_color, PhysicsParams, MAX_UNIVERSES};
use super::world::World;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start menu shown, simulation inert
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, simulation inert
    GameOver,
}

/// Live display-surface size, re-read on host resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle in radians
    pub rotation: f32,
    pub radius: f32,
    /// Held input intents, set/cleared by the host on key edges
    pub thrusting: bool,
    pub rotating_left: bool,
    pub rotating_right: bool,
}

impl Player {
    /// Fresh ship at the surface center (every universe (re)start)
    pub fn spawn(surface: SurfaceSize) -> Self {
        Self {
            pos: surface.center(),
            vel: Vec2::ZERO,
            rotation: 0.0,
            radius: PLAYER_RADIUS,
            thrusting: false,
            rotating_left: false,
            rotating_right: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A gravity well. Direct contact is fatal.
#[derive(Debug, Clone)]
pub struct BlackHole {
    pub pos: Vec2,
    /// Orbit pivot (spawn position)
    pub center: Vec2,
    pub radius: f32,
    pub strength: f32,
    /// Cosmetic accretion-ring angle, independent of orbit motion
    pub rotation_angle: f32,
    pub orbit_angle: f32,
    pub wobble_phase: f32,
}

/// A collectible planet. Stays in the container when collected;
/// iteration must skip collected planets.
#[derive(Debug, Clone)]
pub struct Planet {
    pub pos: Vec2,
    pub center: Vec2,
    pub radius: f32,
    /// HSL hue, 0..360
    pub hue: f32,
    pub collected: bool,
    pub orbit_angle: f32,
    pub wobble_phase: f32,
    /// Universe-5 quantum rule: index of the entangled partner planet.
    /// Inert metadata, no gameplay effect.
    pub entangled_with: Option<usize>,
}

/// One endpoint of a wormhole pair
#[derive(Debug, Clone)]
pub struct Wormhole {
    pub pos: Vec2,
    pub radius: f32,
    /// Drives ring pulsation; pair members start offset by pi
    pub phase: f32,
    pub hue: f32,
    /// Index of the paired endpoint in the wormhole container
    pub pair: usize,
}

/// Region that rescales the displayed game-speed multiplier while occupied
#[derive(Debug, Clone)]
pub struct TimeWarpZone {
    pub pos: Vec2,
    pub radius: f32,
    pub time_scale: f32,
}

impl TimeWarpZone {
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }
}

/// Decorative background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
}

/// Orbital motion parameters, owned per world instance so the universe-3
/// speed rule cannot leak into later universes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub orbit_speed: f32,
    pub wobble_speed: f32,
    pub wobble_amount: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            orbit_speed: ORBIT_SPEED,
            wobble_speed: WOBBLE_SPEED,
            wobble_amount: WOBBLE_AMOUNT,
        }
    }
}

/// Continuously draining life resource
#[derive(Debug, Clone)]
pub struct LifeSystem {
    pub max_life: f32,
    pub current_life: f32,
    pub drain_rate: f32,
    pub collect_bonus: f32,
    pub wormhole_consumption: f32,
}

impl Default for LifeSystem {
    fn default() -> Self {
        Self {
            max_life: MAX_LIFE,
            current_life: MAX_LIFE,
            drain_rate: LIFE_DRAIN_RATE,
            collect_bonus: COLLECT_BONUS,
            wormhole_consumption: WORMHOLE_CONSUMPTION,
        }
    }
}

impl LifeSystem {
    pub fn reset(&mut self) {
        self.current_life = self.max_life;
    }

    /// Add life, clamped to the maximum
    pub fn gain(&mut self, amount: f32) {
        self.current_life = (self.current_life + amount).min(self.max_life);
    }

    /// Ceiling-rounded display value, never negative
    pub fn display(&self) -> u32 {
        self.current_life.max(0.0).ceil() as u32
    }
}

/// Session progress through the five universes
#[derive(Debug, Clone, Copy)]
pub struct MultiverseState {
    pub current_universe: u32,
    pub max_universes: u32,
}

impl Default for MultiverseState {
    fn default() -> Self {
        Self {
            current_universe: 1,
            max_universes: MAX_UNIVERSES,
        }
    }
}

/// Discrete happenings the host may want to surface (messages, HUD flashes)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    PlanetCollected { score: u64 },
    WormholeTransit,
    UniverseSwitched { universe: u32 },
    GameOver { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub surface: SurfaceSize,
    pub player: Player,
    pub world: World,
    /// Physics baked from the current universe's multipliers
    pub physics: PhysicsParams,
    pub life: LifeSystem,
    pub multiverse: MultiverseState,
    /// Cumulative across universe switches, zeroed on restart
    pub score: u64,
    pub planets_collected: u32,
    /// Frame counter within the current universe
    pub time_ticks: u64,
    /// Derived time multiplier from time-warp occupancy (display only)
    pub game_speed: f32,
    /// Short-lived particle effect jobs, advanced once per frame
    pub effects: Vec<EffectJob>,
    /// Pending events for the host to drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the menu phase with a universe-1 world
    /// already generated (it backs the menu screen).
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let surface = SurfaceSize::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::generate(1, surface, &mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            surface,
            player: Player::spawn(surface),
            world,
            physics: PhysicsParams::for_universe(1),
            life: LifeSystem::default(),
            multiverse: MultiverseState::default(),
            score: 0,
            planets_collected: 0,
            time_ticks: 0,
            game_speed: 1.0,
            effects: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Full reset into Playing. Start and restart are the same transition.
    pub fn start(&mut self) {
        self.multiverse.current_universe = 1;
        self.score = 0;
        self.planets_collected = 0;
        self.enter_universe();
        self.effects.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("session started (seed {})", self.seed);
    }

    /// (Re)enter the current universe: fresh world, fresh player, full life,
    /// physics re-derived. Score and collection tally are untouched.
    pub fn enter_universe(&mut self) {
        let universe = self.multiverse.current_universe;
        self.world = World::generate(universe, self.surface, &mut self.rng);
        self.player = Player::spawn(self.surface);
        self.physics = PhysicsParams::for_universe(universe);
        self.life.reset();
        self.time_ticks = 0;
        self.game_speed = 1.0;
    }

    /// Host resize notification; bounds are live inputs to the step
    pub fn set_surface_size(&mut self, width: f32, height: f32) {
        self.surface = SurfaceSize::new(width, height);
    }

    /// Elapsed whole seconds in the current universe
    pub fn elapsed_secs(&self) -> u64 {
        self.time_ticks / 60
    }

    /// Current universe's signature player color
    pub fn player_color(&self) -> &'static str {
        universe_color(self.multiverse.current_universe)
    }
}
