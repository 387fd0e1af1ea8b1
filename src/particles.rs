use rand::seq::SliceRandom;
use rand::Rng;
use std::f64::consts::PI;
use std::ops::Range;

use crate::palette::Rgb;

/// Downward acceleration in cells per second squared
pub const GRAVITY: f64 = 15.0;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// How far outside the viewport a particle may drift before it is culled
const OFFSCREEN_BUFFER: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Correct,
    Incorrect,
    Celebration,
}

/// (angle range, speed range, lifetime range, glyphs)
type BurstProfile = (Range<f64>, Range<f64>, Range<f64>, &'static [char]);

impl BurstKind {
    fn profile(self) -> BurstProfile {
        match self {
            // upward fan; screen y grows downward so the angles are negative
            BurstKind::Correct => (-PI..0.0, 6.0..18.0, 0.8..1.2, &['*', '+', '✦', '•']),
            BurstKind::Incorrect => {
                (PI / 4.0..3.0 * PI / 4.0, 3.0..9.0, 0.5..0.8, &['x', '×', '·'])
            }
            BurstKind::Celebration => {
                (0.0..2.0 * PI, 4.0..16.0, 1.5..2.5, &['✨', '★', '✦', '*'])
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub remaining_life: f64,
    pub initial_life: f64,
    pub color: Rgb,
    pub glyph: char,
}

impl Particle {
    pub fn new(origin: Point, vel_x: f64, vel_y: f64, life: f64, color: Rgb, glyph: char) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            vel_x,
            vel_y,
            remaining_life: life,
            initial_life: life,
            color,
            glyph,
        }
    }

    fn random<R: Rng + ?Sized>(origin: Point, color: Rgb, kind: BurstKind, rng: &mut R) -> Self {
        let (angles, speeds, lives, glyphs) = kind.profile();
        let angle = rng.gen_range(angles);
        let speed = rng.gen_range(speeds);
        let life = rng.gen_range(lives);
        let glyph = *glyphs.choose(rng).unwrap_or(&'*');

        Self::new(
            origin,
            speed * angle.cos() * CELL_ASPECT,
            speed * angle.sin(),
            life,
            color,
            glyph,
        )
    }

    /// Advance by `dt` seconds; returns whether the particle is still alive
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.remaining_life -= dt;
        self.remaining_life > 0.0
    }

    /// Fade factor in `[0, 1]`, derived from the remaining life
    pub fn alpha(&self) -> f64 {
        if self.initial_life <= 0.0 {
            return 0.0;
        }
        (self.remaining_life / self.initial_life).clamp(0.0, 1.0)
    }
}

/// Short-lived particles spawned in bursts and advanced once per tick
#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        origin: Point,
        count: usize,
        color: Rgb,
        kind: BurstKind,
        rng: &mut R,
    ) {
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::random(origin, color, kind, rng));
        }
    }

    #[cfg(test)]
    fn push(&mut self, particle: Particle) {
        if particle.remaining_life > 0.0 {
            self.particles.push(particle);
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.particles.retain_mut(|particle| particle.update(dt));
    }

    /// Drop particles that have drifted well outside a `width` x `height` area
    pub fn cull_outside(&mut self, width: f64, height: f64) {
        self.particles.retain(|p| {
            p.y <= height + OFFSCREEN_BUFFER
                && p.y >= -OFFSCREEN_BUFFER
                && p.x >= -OFFSCREEN_BUFFER
                && p.x <= width + OFFSCREEN_BUFFER
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
