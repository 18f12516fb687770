//! Fixed timestep simulation tick
//!
//! Advances one 1/60 s frame in strict order: player integration, orbital
//! motion, gravity, collisions, wormhole transit, time warp, life drain.
//! Units are per-frame (frame-count based, not wall-clock).

use glam::Vec2;
use rand::Rng;

use super::effects::EffectJob;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{heading, wrap_position};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held intents (key state), effective only while Playing
    pub thrusting: bool,
    pub rotating_left: bool,
    pub rotating_right: bool,
    /// One-shot: start from Menu, restart from GameOver (same transition)
    pub start: bool,
}

/// Advance the session by one fixed frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Effect jobs run in every phase; they never touch core state
    for job in &mut state.effects {
        job.advance();
    }
    state.effects.retain(|job| job.alive());

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            if input.start {
                state.start();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // Intents land on the player only while Playing
    state.player.thrusting = input.thrusting;
    state.player.rotating_left = input.rotating_left;
    state.player.rotating_right = input.rotating_right;

    state.time_ticks += 1;

    integrate_player(state);
    update_objects(state);
    apply_gravity(state);
    if check_collisions(state) {
        // Fatal black hole contact ends the frame's gameplay work
        return;
    }
    check_wormhole_transit(state);
    update_time_warp(state);
    drain_life(state);
}

/// Step 1: rotation intents, thrust, speed clamp, friction, integration,
/// toroidal wrap at the live surface bounds.
fn integrate_player(state: &mut GameState) {
    let physics = state.physics;
    let player = &mut state.player;

    if player.rotating_left {
        player.rotation -= physics.rotation_speed;
    }
    if player.rotating_right {
        player.rotation += physics.rotation_speed;
    }

    if player.thrusting {
        player.vel += heading(player.rotation) * physics.thrust;
    }

    // Scale down preserving direction when over the cap
    let speed = player.vel.length();
    if speed > physics.max_speed {
        player.vel *= physics.max_speed / speed;
    }

    player.vel *= physics.friction;
    player.pos += player.vel;
    player.pos = wrap_position(player.pos, state.surface.width, state.surface.height);
}

/// Step 2: orbital motion of hazards and collectibles, wormhole pulsation,
/// and the universe-4 teleport countdown.
fn update_objects(state: &mut GameState) {
    let motion = state.world.motion;

    for hole in &mut state.world.black_holes {
        hole.orbit_angle += motion.orbit_speed;
        hole.wobble_phase += motion.wobble_speed;
        hole.pos = hole.center
            + Vec2::new(
                hole.orbit_angle.cos() * motion.wobble_amount,
                hole.wobble_phase.sin() * motion.wobble_amount,
            );
    }

    for planet in &mut state.world.planets {
        if planet.collected {
            continue;
        }
        planet.orbit_angle += motion.orbit_speed * PLANET_ORBIT_FACTOR;
        planet.wobble_phase += motion.wobble_speed * PLANET_WOBBLE_SPEED_FACTOR;
        let wobble = motion.wobble_amount * PLANET_WOBBLE_AMOUNT_FACTOR;
        planet.pos = planet.center
            + Vec2::new(
                planet.orbit_angle.cos() * wobble,
                planet.wobble_phase.sin() * wobble,
            );
    }

    for wormhole in &mut state.world.wormholes {
        wormhole.phase += WORMHOLE_PULSE_SPEED;
    }

    if let Some(countdown) = state.world.teleport_countdown {
        if countdown <= 1 {
            state.world.teleport_countdown = Some(TELEPORT_INTERVAL_TICKS);
            teleport_random_planets(state);
        } else {
            state.world.teleport_countdown = Some(countdown - 1);
        }
    }
}

/// Universe-4 chaos rule: each uncollected planet jumps with probability
/// `TELEPORT_CHANCE` to a uniform spot, re-basing its orbit pivot.
fn teleport_random_planets(state: &mut GameState) {
    let surface = state.surface;
    for planet in &mut state.world.planets {
        if planet.collected || state.rng.random::<f32>() >= TELEPORT_CHANCE {
            continue;
        }
        planet.pos = Vec2::new(
            state.rng.random::<f32>() * surface.width,
            state.rng.random::<f32>() * surface.height,
        );
        planet.center = planet.pos;
    }
}

/// Step 3: inverse-square attraction from every black hole within the
/// activation radius, plus the cosmetic accretion-ring spin.
fn apply_gravity(state: &mut GameState) {
    let g = state.physics.gravitational_constant;
    let player_pos = state.player.pos;

    for hole in &mut state.world.black_holes {
        let delta = hole.pos - player_pos;
        let dist = delta.length();
        // Coincident centers would divide by zero; collision resolution
        // fires before the distance can reach zero in practice
        if dist < GRAVITY_ACTIVATION_RADIUS && dist > MIN_GRAVITY_DISTANCE {
            let force = g * hole.strength / (dist * dist);
            state.player.vel += delta / dist * force;
        }
        hole.rotation_angle += BLACK_HOLE_SPIN;
    }
}

/// Step 4: circle-circle tests against planets (collect) and black holes
/// (fatal). Returns true when contact ended the run.
fn check_collisions(state: &mut GameState) -> bool {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    for planet in &mut state.world.planets {
        if planet.collected {
            continue;
        }
        if planet.pos.distance(player_pos) < player_radius + planet.radius {
            planet.collected = true;
            state.score += PLANET_SCORE;
            state.planets_collected += 1;
            let bonus = state.life.collect_bonus;
            state.life.gain(bonus);
            state.events.push(GameEvent::PlanetCollected { score: state.score });
        }
    }

    for hole in &state.world.black_holes {
        if hole.pos.distance(player_pos) < player_radius + hole.radius {
            game_over(state);
            return true;
        }
    }

    false
}

/// Step 5: at most one transit per frame. A wormhole is inert while life is
/// below the consumption cost.
fn check_wormhole_transit(state: &mut GameState) {
    for i in 0..state.world.wormholes.len() {
        let wormhole = &state.world.wormholes[i];
        let overlap =
            wormhole.pos.distance(state.player.pos) < wormhole.radius + state.player.radius;
        if !overlap {
            continue;
        }
        if state.life.current_life < state.life.wormhole_consumption {
            continue;
        }

        state.life.current_life -= state.life.wormhole_consumption;

        let (exit_pos, exit_radius) = {
            let exit = &state.world.wormholes[wormhole.pair];
            (exit.pos, exit.radius)
        };
        state.player.pos = exit_pos;
        // Heading preserved, magnitude boosted
        state.player.vel *= WORMHOLE_EXIT_BOOST;

        state.effects.push(EffectJob::wormhole_transit(exit_pos, exit_radius));
        state.events.push(GameEvent::WormholeTransit);
        break;
    }
}

/// Step 6: derived game-speed multiplier from time-warp occupancy. The
/// strongest occupied zone wins deterministically; 1.0 outside all zones.
/// Display-only, never scales the step itself.
fn update_time_warp(state: &mut GameState) {
    state.game_speed = state
        .world
        .time_warp_zones
        .iter()
        .filter(|zone| zone.contains(state.player.pos))
        .map(|zone| zone.time_scale)
        .reduce(f32::min)
        .unwrap_or(1.0);
}

/// Step 7: unconditional drain; exhaustion triggers a universe switch or
/// the terminal game over.
fn drain_life(state: &mut GameState) {
    state.life.current_life -= state.life.drain_rate;
    if state.life.current_life <= 0.0 {
        handle_death(state);
    }
}

fn handle_death(state: &mut GameState) {
    if state.multiverse.current_universe < state.multiverse.max_universes {
        state.multiverse.current_universe += 1;
        state.enter_universe();
        let burst = EffectJob::universe_transition(state.surface, &mut state.rng);
        state.effects.push(burst);
        state.events.push(GameEvent::UniverseSwitched {
            universe: state.multiverse.current_universe,
        });
        log::info!(
            "life exhausted, entering universe {}/{}",
            state.multiverse.current_universe,
            state.multiverse.max_universes
        );
    } else {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver {
        final_score: state.score,
    });
    log::info!("game over, final score {}", state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BlackHole, Planet, TimeWarpZone, Wormhole};
    use crate::sim::universe::PhysicsParams;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    /// Fresh session already in Playing, hazards cleared so nothing fires
    /// unless a test places it deliberately.
    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, 800.0, 600.0);
        state.start();
        state.events.clear();
        clear_hazards(&mut state);
        state
    }

    fn clear_hazards(state: &mut GameState) {
        state.world.black_holes.clear();
        state.world.planets.clear();
        state.world.wormholes.clear();
        state.world.time_warp_zones.clear();
    }

    fn black_hole_at(pos: Vec2) -> BlackHole {
        BlackHole {
            pos,
            center: pos,
            radius: BLACK_HOLE_RADIUS,
            strength: BLACK_HOLE_STRENGTH,
            rotation_angle: 0.0,
            orbit_angle: 0.0,
            wobble_phase: 0.0,
        }
    }

    fn planet_at(pos: Vec2) -> Planet {
        Planet {
            pos,
            center: pos,
            radius: PLANET_RADIUS,
            hue: 120.0,
            collected: false,
            orbit_angle: 0.0,
            wobble_phase: 0.0,
            entangled_with: None,
        }
    }

    fn wormhole_pair(entrance: Vec2, exit: Vec2) -> Vec<Wormhole> {
        vec![
            Wormhole {
                pos: entrance,
                radius: WORMHOLE_RADIUS,
                phase: 0.0,
                hue: 200.0,
                pair: 1,
            },
            Wormhole {
                pos: exit,
                radius: WORMHOLE_RADIUS,
                phase: PI,
                hue: 200.0,
                pair: 0,
            },
        ]
    }

    #[test]
    fn test_menu_is_inert_until_start() {
        let mut state = GameState::new(1, 800.0, 600.0);
        let input = TickInput {
            thrusting: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.vel, Vec2::ZERO);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_life_drains_exactly_per_frame() {
        let mut state = playing_state();
        let start_life = state.life.current_life;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        let expected = start_life - 100.0 * LIFE_DRAIN_RATE;
        assert!((state.life.current_life - expected).abs() < 1e-4);
    }

    #[test]
    fn test_collect_planet_scores_once() {
        let mut state = playing_state();
        state.world.planets.push(planet_at(state.player.pos));
        state.life.current_life = 100.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 100);
        assert_eq!(state.planets_collected, 1);
        assert!(state.world.planets[0].collected);
        assert!((state.life.current_life - (100.0 + COLLECT_BONUS - LIFE_DRAIN_RATE)).abs() < 1e-4);

        // Still geometrically overlapping, but collection is idempotent
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 100);
        assert_eq!(state.planets_collected, 1);
    }

    #[test]
    fn test_collect_bonus_clamped_to_max_life() {
        let mut state = playing_state();
        state.world.planets.push(planet_at(state.player.pos));
        state.life.current_life = state.life.max_life;
        tick(&mut state, &TickInput::default());
        assert!(state.life.current_life <= state.life.max_life);
    }

    #[test]
    fn test_black_hole_contact_is_fatal() {
        let mut state = playing_state();
        state.world.black_holes.push(black_hole_at(state.player.pos));
        let life_before = state.life.current_life;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        // The fatal frame skips the remaining gameplay steps
        assert_eq!(state.life.current_life, life_before);
        assert!(state
            .events
            .contains(&GameEvent::GameOver { final_score: 0 }));
    }

    #[test]
    fn test_black_hole_fatal_regardless_of_life_and_universe() {
        let mut state = playing_state();
        state.multiverse.current_universe = 3;
        state.life.current_life = state.life.max_life;
        state.world.black_holes.push(black_hole_at(state.player.pos));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_is_terminal_until_restart() {
        let mut state = playing_state();
        state.world.black_holes.push(black_hole_at(state.player.pos));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_wormhole_transit_relocates_and_deducts() {
        let mut state = playing_state();
        let exit_pos = Vec2::new(650.0, 150.0);
        state.world.wormholes = wormhole_pair(state.player.pos, exit_pos);
        state.life.current_life = 50.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, exit_pos);
        assert_eq!(state.life.display(), 40);
        assert!(
            (state.life.current_life - (50.0 - WORMHOLE_CONSUMPTION - LIFE_DRAIN_RATE)).abs()
                < 1e-4
        );
        assert!(state.events.contains(&GameEvent::WormholeTransit));
        // Transit spawned a particle burst
        assert_eq!(state.effects.len(), 1);
    }

    #[test]
    fn test_wormhole_boost_preserves_heading() {
        let mut state = playing_state();
        state.world.wormholes = wormhole_pair(state.player.pos, Vec2::new(650.0, 150.0));
        state.player.vel = Vec2::new(3.0, 4.0);

        let before = state.player.vel;
        check_wormhole_transit(&mut state);
        let after = state.player.vel;

        assert!((after.length() - before.length() * WORMHOLE_EXIT_BOOST).abs() < 1e-4);
        assert!(
            (after.normalize() - before.normalize()).length() < 1e-5,
            "heading must be preserved"
        );
    }

    #[test]
    fn test_wormhole_inert_below_consumption() {
        let mut state = playing_state();
        let entrance = state.player.pos;
        state.world.wormholes = wormhole_pair(entrance, Vec2::new(650.0, 150.0));
        state.life.current_life = WORMHOLE_CONSUMPTION - 1.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, entrance);
        assert!(
            (state.life.current_life - (WORMHOLE_CONSUMPTION - 1.0 - LIFE_DRAIN_RATE)).abs() < 1e-4
        );
        assert!(!state.events.contains(&GameEvent::WormholeTransit));

        // Repeated overlap keeps refusing without further effect
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, entrance);
    }

    #[test]
    fn test_single_transit_per_frame() {
        let mut state = playing_state();
        // Exit sits on the entrance's doorstep: a same-frame rescan would
        // bounce the player straight back
        let entrance = state.player.pos;
        let exit = entrance + Vec2::new(10.0, 0.0);
        state.world.wormholes = wormhole_pair(entrance, exit);
        state.life.current_life = 100.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, exit);
        assert!(
            (state.life.current_life - (100.0 - WORMHOLE_CONSUMPTION - LIFE_DRAIN_RATE)).abs()
                < 1e-4
        );
    }

    #[test]
    fn test_exhaustion_switches_universe() {
        let mut state = playing_state();
        state.score = 500;
        state.planets_collected = 3;
        state.life.current_life = LIFE_DRAIN_RATE * 0.5;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.multiverse.current_universe, 2);
        assert_eq!(state.score, 500);
        assert_eq!(state.planets_collected, 3);
        assert_eq!(state.life.current_life, state.life.max_life);
        assert_eq!(state.physics, PhysicsParams::for_universe(2));
        // Universe 2 adds two extra black holes
        assert_eq!(state.world.black_holes.len(), BLACK_HOLE_COUNT + 2);
        assert!(state
            .events
            .contains(&GameEvent::UniverseSwitched { universe: 2 }));
        // Transition burst is running
        assert!(state.effects.iter().any(|e| e.alive()));
    }

    #[test]
    fn test_exhaustion_at_max_universe_is_game_over() {
        let mut state = playing_state();
        state.multiverse.current_universe = state.multiverse.max_universes;
        state.score = 900;
        state.life.current_life = LIFE_DRAIN_RATE * 0.5;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state
            .events
            .contains(&GameEvent::GameOver { final_score: 900 }));
    }

    #[test]
    fn test_restart_is_a_full_reset() {
        let mut state = playing_state();
        state.multiverse.current_universe = 4;
        state.score = 1200;
        state.world.black_holes.push(black_hole_at(state.player.pos));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.multiverse.current_universe, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.planets_collected, 0);
        assert_eq!(state.life.current_life, state.life.max_life);
        assert_eq!(state.world.black_holes.len(), BLACK_HOLE_COUNT);
    }

    #[test]
    fn test_toroidal_wrap_all_edges() {
        let mut state = playing_state();
        let (w, h) = (state.surface.width, state.surface.height);

        // Right edge
        state.player.pos = Vec2::new(w - 0.5, h / 2.0);
        state.player.vel = Vec2::new(2.0, 0.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos.x, 0.0);
        assert!((state.player.vel.x - 2.0 * FRICTION).abs() < 1e-4);

        // Left edge
        state.player.pos = Vec2::new(0.5, h / 2.0);
        state.player.vel = Vec2::new(-2.0, 0.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos.x, w);

        // Bottom edge
        state.player.pos = Vec2::new(w / 2.0, h - 0.5);
        state.player.vel = Vec2::new(0.0, 2.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos.y, 0.0);

        // Top edge
        state.player.pos = Vec2::new(w / 2.0, 0.5);
        state.player.vel = Vec2::new(0.0, -2.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos.y, h);
    }

    #[test]
    fn test_thrust_approaches_but_never_exceeds_max_speed() {
        let mut state = playing_state();
        let input = TickInput {
            thrusting: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &input);
            assert!(
                state.player.speed() <= state.physics.max_speed + 1e-3,
                "speed must never exceed the cap"
            );
        }
        // Universe 1: cap is 8, friction keeps equilibrium just below it
        assert!(state.player.speed() > 7.5);
        // No rotation: displacement stays on the initial heading (angle 0)
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.pos.y, 300.0);
    }

    #[test]
    fn test_rotation_intents_turn_the_ship() {
        let mut state = playing_state();
        let input = TickInput {
            rotating_right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert!((state.player.rotation - 10.0 * ROTATION_SPEED).abs() < 1e-5);

        let input = TickInput {
            rotating_left: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut state, &input);
        }
        assert!((state.player.rotation + 10.0 * ROTATION_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_gravity_pulls_within_activation_radius() {
        let mut state = playing_state();
        state
            .world
            .black_holes
            .push(black_hole_at(state.player.pos + Vec2::new(150.0, 0.0)));
        apply_gravity(&mut state);
        assert!(state.player.vel.x > 0.0, "pull toward the hole");
        assert_eq!(state.player.vel.y, 0.0);

        // Out of range: no pull
        let mut far = playing_state();
        far.world
            .black_holes
            .push(black_hole_at(far.player.pos + Vec2::new(250.0, 0.0)));
        apply_gravity(&mut far);
        assert_eq!(far.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_gravity_guards_coincident_centers() {
        let mut state = playing_state();
        state.world.black_holes.push(black_hole_at(state.player.pos));
        apply_gravity(&mut state);
        assert!(state.player.vel.x.is_finite() && state.player.vel.y.is_finite());
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_gravity_strength_follows_inverse_square() {
        let mut near = playing_state();
        near.world
            .black_holes
            .push(black_hole_at(near.player.pos + Vec2::new(50.0, 0.0)));
        apply_gravity(&mut near);

        let mut far = playing_state();
        far.world
            .black_holes
            .push(black_hole_at(far.player.pos + Vec2::new(100.0, 0.0)));
        apply_gravity(&mut far);

        // Half the distance, four times the force
        assert!((near.player.vel.x / far.player.vel.x - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_time_warp_strongest_zone_wins() {
        let mut state = playing_state();
        let pos = state.player.pos;
        state.world.time_warp_zones.push(TimeWarpZone {
            pos,
            radius: TIME_WARP_RADIUS,
            time_scale: 0.8,
        });
        state.world.time_warp_zones.push(TimeWarpZone {
            pos,
            radius: TIME_WARP_RADIUS,
            time_scale: 0.5,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.game_speed, 0.5);

        // Leaving all zones restores the neutral multiplier
        state.player.pos = pos + Vec2::new(300.0, 0.0);
        state.player.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.game_speed, 1.0);
    }

    #[test]
    fn test_orbital_motion_moves_hazards() {
        let mut state = playing_state();
        let center = Vec2::new(600.0, 100.0);
        state.world.black_holes.push(black_hole_at(center));
        tick(&mut state, &TickInput::default());
        let hole = &state.world.black_holes[0];
        assert_eq!(hole.center, center);
        // One frame of orbit+wobble displaces the hole off its pivot
        assert!(hole.pos.distance(center) > 0.0);
        // Position always stays within wobble reach of the pivot
        assert!(hole.pos.distance(center) <= WOBBLE_AMOUNT * 2.0_f32.sqrt() + 1e-3);
    }

    #[test]
    fn test_collected_planets_stop_orbiting() {
        let mut state = playing_state();
        let mut planet = planet_at(Vec2::new(700.0, 500.0));
        planet.collected = true;
        let frozen = planet.pos;
        state.world.planets.push(planet);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.world.planets[0].pos, frozen);
    }

    #[test]
    fn test_universe_four_teleport_countdown_cycles() {
        let mut state = playing_state();
        state.multiverse.current_universe = 4;
        state.enter_universe();
        clear_hazards(&mut state);
        state.world.teleport_countdown = Some(TELEPORT_INTERVAL_TICKS);
        state.life.current_life = state.life.max_life;

        for _ in 0..TELEPORT_INTERVAL_TICKS {
            tick(&mut state, &TickInput::default());
        }
        // The trigger fired and re-armed itself
        assert_eq!(state.world.teleport_countdown, Some(TELEPORT_INTERVAL_TICKS));
    }

    #[test]
    fn test_teleport_trigger_dies_with_the_universe() {
        let mut state = playing_state();
        state.multiverse.current_universe = 4;
        state.enter_universe();
        assert!(state.world.teleport_countdown.is_some());

        // Exhaustion hops to universe 5: the fresh world has no trigger
        state.life.current_life = LIFE_DRAIN_RATE * 0.5;
        state.world.black_holes.clear();
        state.world.wormholes.clear();
        state.world.planets.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.multiverse.current_universe, 5);
        assert!(state.world.teleport_countdown.is_none());
    }

    #[test]
    fn test_teleported_planets_stay_on_surface() {
        let mut state = playing_state();
        state.multiverse.current_universe = 4;
        state.enter_universe();
        state.world.black_holes.clear();
        state.world.wormholes.clear();
        state.player.pos = Vec2::ZERO; // Away from planets

        for _ in 0..(TELEPORT_INTERVAL_TICKS * 3) {
            tick(&mut state, &TickInput::default());
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        for planet in &state.world.planets {
            assert!(planet.center.x >= 0.0 && planet.center.x <= state.surface.width);
            assert!(planet.center.y >= 0.0 && planet.center.y <= state.surface.height);
        }
    }

    #[test]
    fn test_resize_is_a_live_input() {
        let mut state = playing_state();
        state.set_surface_size(1024.0, 768.0);
        state.player.pos = Vec2::new(1023.5, 400.0);
        state.player.vel = Vec2::new(2.0, 0.0);
        tick(&mut state, &TickInput::default());
        // Wraps at the new bound, not the old one
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::new(777, 800.0, 600.0);
            state.start();
            let input = TickInput {
                thrusting: true,
                rotating_right: true,
                ..Default::default()
            };
            for _ in 0..300 {
                tick(&mut state, &input);
            }
            state
        };
        let a = run();
        let b = run();
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.multiverse.current_universe, b.multiverse.current_universe);
    }

    proptest! {
        #[test]
        fn prop_wrap_keeps_coordinates_in_bounds(x in -500.0f32..1500.0, y in -500.0f32..1500.0) {
            let wrapped = wrap_position(Vec2::new(x, y), 800.0, 600.0);
            prop_assert!(wrapped.x >= 0.0 && wrapped.x <= 800.0);
            prop_assert!(wrapped.y >= 0.0 && wrapped.y <= 600.0);
        }

        #[test]
        fn prop_speed_never_exceeds_cap(rotation in 0.0f32..std::f32::consts::TAU, frames in 1usize..200) {
            let mut state = playing_state();
            state.player.rotation = rotation;
            let input = TickInput { thrusting: true, ..Default::default() };
            for _ in 0..frames {
                tick(&mut state, &input);
                prop_assert!(state.player.speed() <= state.physics.max_speed + 1e-3);
            }
        }
    }
}
