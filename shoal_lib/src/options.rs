use serde::{Deserialize, Serialize};

use crate::error::ShoalError;

pub const ALIGNMENT_RADIUS: f32 = 50.;
pub const COHESION_RADIUS: f32 = 100.;
pub const SEPARATION_RADIUS: f32 = 25.;
pub const COLLISION_RADIUS: f32 = 20.;
pub const MIN_SIZE: f32 = 10.;
pub const MAX_SIZE: f32 = 25.;
/// hit circle radius per unit of size: the 576 px wide fish sprite is drawn
/// at `size / 360` and its body circle spans the full width
pub const BODY_RADIUS: f32 = 0.8;
pub const MAX_SPEED: f32 = 2.;
pub const MAX_FORCE: f32 = 0.05;
pub const COLLISION_FORCE: f32 = 0.5;
pub const SHARK_AVOIDANCE_RADIUS: f32 = 250.;
pub const SHARK_FORCE: f32 = 1.8;
pub const BOID_DEATH_TIME: f32 = 5.;

pub const GRAVITY: f32 = 0.2;
pub const WATER_SURFACE_HEIGHT: f32 = 500.;
pub const WATER_RESISTANCE: f32 = 0.92;
pub const AIR_DRAG: f32 = 0.99;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    pub init_boids: usize,
    /// upper bound on the number of boids the flock will ever hold
    pub max_boids: usize,
    pub world: WorldSize,

    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub separation_radius: f32,
    pub collision_radius: f32,

    pub min_size: f32,
    pub max_size: f32,
    pub tint_min: u8,
    pub tint_max: u8,
    /// initial velocity components are drawn from [-spawn_speed, spawn_speed]
    pub spawn_speed: f32,

    pub max_speed: f32,
    pub max_force: f32,
    pub separation_weight: f32,
    pub collision_force: f32,
    pub predator_avoidance_radius: f32,
    pub predator_force: f32,

    /// seconds a dead fish takes to fade out
    pub death_time: f32,
    pub ticks_per_second: f32,
    pub dead_friction: f32,

    pub gravity: f32,
    /// y coordinate of the water line, y grows downwards
    pub water_surface_height: f32,
    pub water_resistance: f32,
    pub air_drag: f32,

    pub live_alpha: f32,

    pub tracker: TrackerType,
    pub seed: Option<u64>,
}

impl Default for SimOptions {
    fn default() -> Self {
        SimOptions {
            init_boids: 50,
            max_boids: 500,
            world: WorldSize::new(2400., 1600.),
            alignment_radius: ALIGNMENT_RADIUS,
            cohesion_radius: COHESION_RADIUS,
            separation_radius: SEPARATION_RADIUS,
            collision_radius: COLLISION_RADIUS,
            min_size: MIN_SIZE,
            max_size: MAX_SIZE,
            tint_min: 80,
            tint_max: 150,
            spawn_speed: 400.,
            max_speed: MAX_SPEED,
            max_force: MAX_FORCE,
            separation_weight: 1.5,
            collision_force: COLLISION_FORCE,
            predator_avoidance_radius: SHARK_AVOIDANCE_RADIUS,
            predator_force: SHARK_FORCE,
            death_time: BOID_DEATH_TIME,
            ticks_per_second: 60.,
            dead_friction: 0.98,
            gravity: GRAVITY,
            water_surface_height: WATER_SURFACE_HEIGHT,
            water_resistance: WATER_RESISTANCE,
            air_drag: AIR_DRAG,
            live_alpha: 0.9,
            tracker: TrackerType::Naive,
            seed: None,
        }
    }
}

impl SimOptions {
    /// Checks the options before any simulation runs. A failing check means
    /// the simulation must not start at all.
    pub fn validate(&self) -> Result<(), ShoalError> {
        if self.init_boids == 0 {
            return Err(ShoalError::invalid("init_boids", "flock must hold at least one boid"));
        }
        if self.init_boids > self.max_boids {
            return Err(ShoalError::invalid(
                "init_boids",
                format!("{} exceeds max_boids of {}", self.init_boids, self.max_boids),
            ));
        }

        for (name, radius) in [
            ("alignment_radius", self.alignment_radius),
            ("cohesion_radius", self.cohesion_radius),
            ("separation_radius", self.separation_radius),
            ("collision_radius", self.collision_radius),
            ("predator_avoidance_radius", self.predator_avoidance_radius),
        ] {
            if !radius.is_finite() || radius < 0. {
                return Err(ShoalError::invalid(name, format!("radius must be finite and non-negative, got {radius}")));
            }
        }

        if !(self.min_size > 0. && self.min_size <= self.max_size && self.max_size.is_finite()) {
            return Err(ShoalError::invalid(
                "min_size",
                format!("size range [{}, {}] is empty or non-positive", self.min_size, self.max_size),
            ));
        }
        if self.tint_min > self.tint_max {
            return Err(ShoalError::invalid(
                "tint_min",
                format!("tint range [{}, {}] is empty", self.tint_min, self.tint_max),
            ));
        }
        if !self.spawn_speed.is_finite() || self.spawn_speed < 0. {
            return Err(ShoalError::invalid("spawn_speed", "must be finite and non-negative"));
        }

        if !(self.world.width > 0. && self.world.width.is_finite()) {
            return Err(ShoalError::invalid("world.width", "must be positive"));
        }
        if !(self.world.height > 0. && self.world.height.is_finite()) {
            return Err(ShoalError::invalid("world.height", "must be positive"));
        }
        if !(0. ..=self.world.height).contains(&self.water_surface_height) {
            return Err(ShoalError::invalid(
                "water_surface_height",
                format!("must lie within [0, {}]", self.world.height),
            ));
        }

        for (name, value) in [
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("death_time", self.death_time),
            ("ticks_per_second", self.ticks_per_second),
        ] {
            if !(value > 0. && value.is_finite()) {
                return Err(ShoalError::invalid(name, format!("must be positive, got {value}")));
            }
        }

        if !self.fade_ticks().is_finite() {
            return Err(ShoalError::invalid(
                "death_time",
                format!("fade of {} ticks overflows", self.fade_ticks()),
            ));
        }

        if !self.gravity.is_finite() {
            return Err(ShoalError::invalid("gravity", format!("must be finite, got {}", self.gravity)));
        }
        for (name, force) in [
            ("separation_weight", self.separation_weight),
            ("collision_force", self.collision_force),
            ("predator_force", self.predator_force),
        ] {
            if !force.is_finite() || force < 0. {
                return Err(ShoalError::invalid(name, format!("must be finite and non-negative, got {force}")));
            }
        }

        for (name, factor) in [
            ("dead_friction", self.dead_friction),
            ("water_resistance", self.water_resistance),
            ("air_drag", self.air_drag),
            ("live_alpha", self.live_alpha),
        ] {
            if !(0. ..=1.).contains(&factor) {
                return Err(ShoalError::invalid(name, format!("must lie within [0, 1], got {factor}")));
            }
        }

        Ok(())
    }

    /// number of ticks a dead fish takes to fade out completely
    pub fn fade_ticks(&self) -> f32 {
        self.death_time * self.ticks_per_second
    }

    /// the largest radius any neighbour query will use
    pub fn max_query_radius(&self) -> f32 {
        self.alignment_radius
            .max(self.cohesion_radius)
            .max(self.separation_radius)
            .max(self.collision_radius)
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    pub fn new(width: f32, height: f32) -> WorldSize {
        WorldSize { width, height }
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "Grid"}
pub enum TrackerType {
    Naive,
    Grid,
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub save_locations: bool,
    pub save_locations_path: Option<String>,
    pub save_locations_timestamp: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            save_locations: false,
            save_locations_path: Some("./".to_owned()),
            save_locations_timestamp: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::SimOptions;
    use crate::error::ShoalError;

    #[test]
    fn defaults_are_valid() {
        assert!(SimOptions::default().validate().is_ok());
    }

    #[test]
    fn fade_ticks_follow_death_time() {
        let options = SimOptions::default();
        assert_eq!(options.fade_ticks(), 300.);
        assert_eq!(options.max_query_radius(), 100.);
    }

    #[rstest]
    #[case::empty_flock(|o: &mut SimOptions| o.init_boids = 0, "init_boids")]
    #[case::over_capacity(|o: &mut SimOptions| o.init_boids = o.max_boids + 1, "init_boids")]
    #[case::negative_radius(|o: &mut SimOptions| o.separation_radius = -1., "separation_radius")]
    #[case::nan_radius(|o: &mut SimOptions| o.cohesion_radius = f32::NAN, "cohesion_radius")]
    #[case::size_range(|o: &mut SimOptions| o.min_size = 30., "min_size")]
    #[case::tint_range(|o: &mut SimOptions| o.tint_min = 200, "tint_min")]
    #[case::flat_world(|o: &mut SimOptions| o.world.width = 0., "world.width")]
    #[case::surface_below_world(|o: &mut SimOptions| o.water_surface_height = 1e6, "water_surface_height")]
    #[case::frozen_clock(|o: &mut SimOptions| o.ticks_per_second = 0., "ticks_per_second")]
    #[case::amplifying_friction(|o: &mut SimOptions| o.dead_friction = 1.5, "dead_friction")]
    #[case::endless_fade(|o: &mut SimOptions| o.death_time = f32::MAX, "death_time")]
    #[case::nan_gravity(|o: &mut SimOptions| o.gravity = f32::NAN, "gravity")]
    #[case::infinite_gravity(|o: &mut SimOptions| o.gravity = f32::INFINITY, "gravity")]
    #[case::nan_separation_weight(|o: &mut SimOptions| o.separation_weight = f32::NAN, "separation_weight")]
    #[case::negative_separation_weight(|o: &mut SimOptions| o.separation_weight = -1., "separation_weight")]
    #[case::infinite_collision_force(|o: &mut SimOptions| o.collision_force = f32::INFINITY, "collision_force")]
    #[case::negative_collision_force(|o: &mut SimOptions| o.collision_force = -0.5, "collision_force")]
    #[case::nan_predator_force(|o: &mut SimOptions| o.predator_force = f32::NAN, "predator_force")]
    #[case::negative_predator_force(|o: &mut SimOptions| o.predator_force = -1.8, "predator_force")]
    fn invalid_options_fail_fast(#[case] break_it: fn(&mut SimOptions), #[case] expected: &str) {
        let mut options = SimOptions::default();
        break_it(&mut options);

        match options.validate() {
            Err(ShoalError::InvalidOption { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected invalid option {expected}, got {other:?}"),
        }
    }
}
