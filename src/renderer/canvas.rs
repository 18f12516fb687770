//! Canvas 2D back end
//!
//! Walks the scene description and issues `CanvasRenderingContext2d` calls.
//! Draw order, back to front: background, stars, gravity lenses, time-warp
//! zones, black holes, planets, wormholes, player, effect particles.
//! Strictly a projection of state to pixels; no gameplay side effects.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::scene::{self, particle_fill, star_fill, wormhole_ring_radius, wormhole_spoke_angles};
use crate::settings::Settings;
use crate::sim::{EffectKind, GamePhase, GameState};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Paint one frame from the current state
    pub fn render(&self, state: &GameState, settings: &Settings) {
        let width = state.surface.width as f64;
        let height = state.surface.height as f64;

        self.ctx.set_fill_style_str(scene::BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, width, height);

        if settings.starfield {
            self.draw_stars(state);
        }
        self.draw_gravity_lenses(state);
        self.draw_time_warp_zones(state);
        self.draw_black_holes(state);
        self.draw_planets(state);
        self.draw_wormholes(state);

        // The ship only exists on screen mid-run
        if state.phase == GamePhase::Playing {
            self.draw_player(state);
        }

        if settings.effective_particles() {
            self.draw_effects(state);
        }
    }

    fn draw_stars(&self, state: &GameState) {
        for star in &state.world.stars {
            self.ctx.set_fill_style_str(&star_fill(star));
            self.ctx.fill_rect(
                star.pos.x as f64,
                star.pos.y as f64,
                star.size as f64,
                star.size as f64,
            );
        }
    }

    /// Radial darkening around each black hole; visual only, unrelated to
    /// the physics gravity radius
    fn draw_gravity_lenses(&self, state: &GameState) {
        for hole in &state.world.black_holes {
            let (x, y) = (hole.pos.x as f64, hole.pos.y as f64);
            let Ok(gradient) =
                self.ctx
                    .create_radial_gradient(x, y, 0.0, x, y, scene::GRAVITY_LENS_RADIUS)
            else {
                continue;
            };
            let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0.8)");
            let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.begin_path();
            let _ = self.ctx.arc(x, y, scene::GRAVITY_LENS_RADIUS, 0.0, TAU);
            self.ctx.fill();
        }
    }

    fn draw_time_warp_zones(&self, state: &GameState) {
        for zone in &state.world.time_warp_zones {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                zone.pos.x as f64,
                zone.pos.y as f64,
                zone.radius as f64,
                0.0,
                TAU,
            );
            self.ctx.set_fill_style_str(scene::TIME_WARP_FILL);
            self.ctx.fill();
            self.ctx.set_stroke_style_str(scene::TIME_WARP_STROKE);
            self.ctx.stroke();
        }
    }

    fn draw_black_holes(&self, state: &GameState) {
        for hole in &state.world.black_holes {
            let (x, y) = (hole.pos.x as f64, hole.pos.y as f64);

            // Core
            self.ctx.begin_path();
            let _ = self.ctx.arc(x, y, hole.radius as f64, 0.0, TAU);
            self.ctx.set_fill_style_str("#000000");
            self.ctx.fill();

            // Accretion ring
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                x,
                y,
                hole.radius as f64 + scene::ACCRETION_RING_OFFSET,
                0.0,
                TAU,
            );
            self.ctx.set_stroke_style_str(scene::ACCRETION_RING_COLOR);
            self.ctx.set_line_width(3.0);
            self.ctx.stroke();
        }
    }

    fn draw_planets(&self, state: &GameState) {
        for planet in state.world.uncollected_planets() {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                planet.pos.x as f64,
                planet.pos.y as f64,
                planet.radius as f64,
                0.0,
                TAU,
            );
            self.ctx.set_fill_style_str(&scene::hsl(planet.hue));
            self.ctx.fill();
        }
    }

    fn draw_wormholes(&self, state: &GameState) {
        for wormhole in &state.world.wormholes {
            let (x, y) = (wormhole.pos.x as f64, wormhole.pos.y as f64);
            let color = scene::hsl(wormhole.hue);

            // Pulsating outer ring
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(x, y, wormhole_ring_radius(wormhole) as f64, 0.0, TAU);
            self.ctx.set_stroke_style_str(&color);
            self.ctx.set_line_width(3.0);
            self.ctx.stroke();

            // Inner vortex gradient
            if let Ok(gradient) =
                self.ctx
                    .create_radial_gradient(x, y, 0.0, x, y, wormhole.radius as f64)
            {
                let _ = gradient.add_color_stop(0.0, "rgba(255, 255, 255, 0.3)");
                let _ = gradient.add_color_stop(0.5, &color);
                let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0.8)");
                self.ctx.set_fill_style_canvas_gradient(&gradient);
                self.ctx.begin_path();
                let _ = self.ctx.arc(x, y, wormhole.radius as f64, 0.0, TAU);
                self.ctx.fill();
            }

            // Rotating energy spokes
            self.ctx.set_stroke_style_str(scene::WORMHOLE_SPOKE_COLOR);
            self.ctx.set_line_width(2.0);
            let r = wormhole.radius as f64;
            for angle in wormhole_spoke_angles(wormhole) {
                let (sin, cos) = (angle as f64).sin_cos();
                self.ctx.begin_path();
                self.ctx.move_to(x + cos * r * 0.3, y + sin * r * 0.3);
                self.ctx.line_to(x + cos * r, y + sin * r);
                self.ctx.stroke();
            }
        }
    }

    fn draw_player(&self, state: &GameState) {
        let player = &state.player;
        self.ctx.save();
        let _ = self
            .ctx
            .translate(player.pos.x as f64, player.pos.y as f64);
        let _ = self.ctx.rotate(player.rotation as f64);

        // Oriented triangle in the universe's signature color
        self.ctx.begin_path();
        self.trace_glyph(&scene::PLAYER_GLYPH);
        self.ctx.set_fill_style_str(state.player_color());
        self.ctx.fill();

        if player.thrusting {
            self.ctx.begin_path();
            self.trace_glyph(&scene::THRUST_FLAME);
            self.ctx.set_fill_style_str(scene::THRUST_FLAME_COLOR);
            self.ctx.fill();
        }

        // Ambient glow
        if let Ok(gradient) =
            self.ctx
                .create_radial_gradient(0.0, 0.0, 10.0, 0.0, 0.0, scene::PLAYER_GLOW_RADIUS)
        {
            let _ = gradient.add_color_stop(0.0, "rgba(0, 255, 0, 0.2)");
            let _ = gradient.add_color_stop(1.0, "rgba(0, 255, 0, 0)");
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.begin_path();
            let _ = self.ctx.arc(0.0, 0.0, scene::PLAYER_GLOW_RADIUS, 0.0, TAU);
            self.ctx.fill();
        }

        self.ctx.restore();
    }

    fn trace_glyph(&self, points: &[(f64, f64)]) {
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            self.ctx.move_to(x, y);
        }
        for &(x, y) in iter {
            self.ctx.line_to(x, y);
        }
        self.ctx.close_path();
    }

    fn draw_effects(&self, state: &GameState) {
        for job in &state.effects {
            for particle in &job.particles {
                if particle.life <= 0.0 {
                    continue;
                }
                self.ctx.set_fill_style_str(&particle_fill(particle.life));
                match job.kind {
                    EffectKind::WormholeTransit => {
                        self.ctx.begin_path();
                        let _ = self.ctx.arc(
                            particle.pos.x as f64,
                            particle.pos.y as f64,
                            particle.size as f64,
                            0.0,
                            TAU,
                        );
                        self.ctx.fill();
                    }
                    EffectKind::UniverseTransition => {
                        self.ctx.fill_rect(
                            particle.pos.x as f64,
                            particle.pos.y as f64,
                            particle.size as f64,
                            particle.size as f64,
                        );
                    }
                }
            }
        }
    }
}
