use glam::f32::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::{
    collaborators::BoidView,
    collision::Extent,
    math_helpers::{heading, wrap_position, VecExt},
    options::{SimOptions, BODY_RADIUS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    /// a fish turns red once it has been eaten
    pub const DEATH: Tint = Tint { r: 0xff, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Tint { r, g, b }
    }

    /// packed 0xRRGGBB
    pub fn to_rgb(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Neighbours of a single boid, one set per behaviour radius. Every set
/// holds live boids only and never the boid itself.
#[derive(Debug, Default)]
pub struct NeighbourSets<'a> {
    pub alignment: Vec<&'a Boid>,
    pub cohesion: Vec<&'a Boid>,
    pub separation: Vec<&'a Boid>,
    pub collision: Vec<&'a Boid>,
}

/// The individual steering contributions of one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Steering {
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub separation: Vec2,
    pub collision: Vec2,
    pub predator: Vec2,
}

impl Steering {
    pub fn total(&self, options: &SimOptions) -> Vec2 {
        self.alignment
            + self.cohesion
            + self.separation * options.separation_weight
            + self.collision
            + self.predator
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Boid {
    // sequential id, never reused within one flock
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    size: f32,
    tint: Tint,
    alive: bool,
    fade_alpha: f32,
    above_water: bool,
    ticks_dead: u32,
}

impl Boid {
    /// Creates a new [`Boid`].
    pub fn new(id: usize, position: Vec2, velocity: Vec2, size: f32, tint: Tint) -> Self {
        Boid {
            id,
            position,
            velocity,
            size,
            tint,
            alive: true,
            fade_alpha: 1.,
            above_water: false,
            ticks_dead: 0,
        }
    }

    /// Creates a boid with randomly drawn size, tint and velocity.
    ///
    /// The velocity is not clamped, the first tick brings it under `max_speed`.
    pub fn spawn<R: Rng + ?Sized>(id: usize, position: Vec2, options: &SimOptions, rng: &mut R) -> Self {
        let size = rng.gen_range(options.min_size..=options.max_size);
        let tint = Tint::new(
            rng.gen_range(options.tint_min..=options.tint_max),
            rng.gen_range(options.tint_min..=options.tint_max),
            rng.gen_range(options.tint_min..=options.tint_max),
        );
        let velocity = Vec2::new(
            rng.gen_range(-options.spawn_speed..=options.spawn_speed),
            rng.gen_range(-options.spawn_speed..=options.spawn_speed),
        );

        Boid::new(id, position, velocity, size, tint)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn fade_alpha(&self) -> f32 {
        self.fade_alpha
    }

    pub fn is_above_water(&self) -> bool {
        self.above_water
    }

    /// a dead boid whose fade has completed, due for removal
    pub fn is_faded(&self) -> bool {
        !self.alive && self.fade_alpha <= 0.
    }

    pub fn rotation(&self) -> f32 {
        heading(self.velocity)
    }

    pub fn alpha(&self, options: &SimOptions) -> f32 {
        options.live_alpha * self.fade_alpha
    }

    pub fn extent(&self) -> Extent {
        Extent::Circle {
            center: self.position,
            radius: self.size * BODY_RADIUS,
        }
    }

    pub fn view(&self, options: &SimOptions) -> BoidView {
        BoidView {
            id: self.id,
            position: self.position,
            rotation: self.rotation(),
            alpha: self.alpha(options),
            tint: self.tint,
            size: self.size,
            alive: self.alive,
        }
    }

    pub fn steering(
        &self,
        neighbours: &NeighbourSets,
        predator: Option<Vec2>,
        options: &SimOptions,
    ) -> Steering {
        Steering {
            alignment: self.align(&neighbours.alignment, options),
            cohesion: self.cohesion(&neighbours.cohesion, options),
            separation: self.separation(&neighbours.separation, options),
            collision: self.avoid_collisions(&neighbours.collision, options),
            predator: self.avoid_predator(predator, options),
        }
    }

    /// Steer towards the average heading of the neighbours.
    pub fn align(&self, others: &[&Boid], options: &SimOptions) -> Vec2 {
        if others.is_empty() {
            return Vec2::ZERO;
        }

        let mut avg = Vec2::ZERO;
        for other in others {
            avg += other.velocity;
        }
        avg /= others.len() as f32;

        self.steer(avg, options)
    }

    /// Steer towards the centroid of the neighbours.
    pub fn cohesion(&self, others: &[&Boid], options: &SimOptions) -> Vec2 {
        if others.is_empty() {
            return Vec2::ZERO;
        }

        let mut center = Vec2::ZERO;
        for other in others {
            center += other.position;
        }
        center /= others.len() as f32;

        self.steer(center - self.position, options)
    }

    /// Steer away from crowding neighbours, closer ones weigh more.
    pub fn separation(&self, others: &[&Boid], options: &SimOptions) -> Vec2 {
        if others.is_empty() {
            return Vec2::ZERO;
        }

        self.steer(self.repulsion(others), options)
    }

    /// Average of the inverse-distance weighted vectors pointing from each
    /// neighbour to this boid.
    pub fn repulsion(&self, others: &[&Boid]) -> Vec2 {
        if others.is_empty() {
            return Vec2::ZERO;
        }

        let mut res = Vec2::ZERO;
        for other in others {
            let diff = self.position - other.position;
            let distance = diff.length();
            res += diff.safe_normalize() / distance.max(0.1);
        }

        res / others.len() as f32
    }

    /// Push apart from overlapping neighbours. Summed rather than averaged so
    /// a crowd pushes harder than a single fish.
    pub fn avoid_collisions(&self, others: &[&Boid], options: &SimOptions) -> Vec2 {
        let mut avoidance = Vec2::ZERO;

        for other in others {
            let diff = self.position - other.position;
            let distance = diff.length();
            if distance >= options.collision_radius {
                continue;
            }
            let force = (options.collision_radius - distance) / options.collision_radius;
            avoidance += diff.with_length(force * options.collision_force);
        }

        avoidance
    }

    pub fn avoid_predator(&self, predator: Option<Vec2>, options: &SimOptions) -> Vec2 {
        let predator = match predator {
            Some(p) => p,
            None => return Vec2::ZERO,
        };

        let diff = self.position - predator;
        let distance = diff.length();
        if distance > options.predator_avoidance_radius {
            return Vec2::ZERO;
        }

        let force = (options.predator_avoidance_radius - distance) / options.predator_avoidance_radius;
        diff.with_length(force * options.predator_force)
    }

    /// Reynolds steering: desired velocity at full speed minus the current one
    fn steer(&self, desired: Vec2, options: &SimOptions) -> Vec2 {
        (desired.with_length(options.max_speed) - self.velocity).limit(options.max_force)
    }

    /// Gravity and drag in the air, resistance in the water. Returns whether
    /// the boid is above the surface.
    pub fn apply_buoyancy(&mut self, options: &SimOptions) -> bool {
        self.above_water = self.position.y < options.water_surface_height;

        if self.above_water {
            self.velocity.y += options.gravity;
            self.velocity.x *= options.air_drag;
        } else if self.velocity.y > 0. {
            self.velocity.y *= options.water_resistance;
        }

        self.above_water
    }

    /// Advances the boid by one tick. Steering only takes effect for a live
    /// boid under water, a dead one just drifts and fades.
    pub fn advance(&mut self, steering: &Steering, options: &SimOptions) {
        if !self.alive {
            self.drift(options);
            return;
        }

        if !self.apply_buoyancy(options) {
            self.velocity += steering.total(options);
        }

        self.velocity = self.velocity.limit(options.max_speed);
        self.position = wrap_position(self.position + self.velocity, &options.world);
    }

    /// Dead path: friction, integrate and fade, no steering.
    pub fn drift(&mut self, options: &SimOptions) {
        self.velocity = (self.velocity * options.dead_friction).limit(options.max_speed);
        self.position = wrap_position(self.position + self.velocity, &options.world);

        self.ticks_dead = self.ticks_dead.saturating_add(1);
        self.fade_alpha = (1. - self.ticks_dead as f32 / options.fade_ticks()).max(0.);
    }

    /// Kills the boid. Only the first call has an effect, the return value
    /// tells whether this call was it.
    pub fn die(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        self.alive = false;
        self.tint = Tint::DEATH;
        self.fade_alpha = 1.;
        self.ticks_dead = 0;
        true
    }
}
