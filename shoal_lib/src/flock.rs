use glam::Vec2;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{
    boid::{Boid, NeighbourSets, Steering},
    collaborators::{BoidView, Environment, OpenWater, PredatorHandle, RenderSink, ScoreSink},
    error::ShoalError,
    math_helpers::wrap_position,
    options::{SimOptions, TrackerType},
};

use self::{grid_tracker::GridTracker, naive_tracker::NaiveTracker, tracker::Tracker};

pub mod grid_tracker;
pub mod naive_tracker;
pub mod tracker;

/// Owns the flock and drives it one tick at a time.
///
/// The predator and the score sink are injected at construction; the manager
/// only ever reads the predator and only ever emits events into the sink.
pub struct BoidManager<P: PredatorHandle, S: ScoreSink> {
    boids: Vec<Boid>,
    tracker: Box<dyn Tracker>,
    environment: Box<dyn Environment>,
    options: SimOptions,
    predator: P,
    score: S,
    rng: Xoshiro256PlusPlus,
    next_id: usize,
    tick: u64,
    eaten: u64,
    // ids removed since the last publish
    retired: Vec<usize>,
}

impl<P: PredatorHandle, S: ScoreSink> BoidManager<P, S> {
    /// Validates the options and spawns `init_boids` fish at random spots
    /// below the water surface.
    pub fn new(options: SimOptions, predator: P, score: S) -> Result<Self, ShoalError> {
        options.validate()?;

        let mut manager = Self::empty(options, predator, score);
        for _ in 0..manager.options.init_boids {
            let position = manager.random_spawn_point();
            manager.spawn_at(position)?;
        }

        info!(
            "spawned {} boids in a {}x{} world",
            manager.boids.len(),
            manager.options.world.width,
            manager.options.world.height
        );
        Ok(manager)
    }

    /// Builds a manager around an explicit flock instead of a random one.
    pub fn from_boids(
        options: SimOptions,
        boids: Vec<Boid>,
        predator: P,
        score: S,
    ) -> Result<Self, ShoalError> {
        options.validate()?;
        if boids.len() > options.max_boids {
            return Err(ShoalError::FlockFull {
                capacity: options.max_boids,
            });
        }

        let mut manager = Self::empty(options, predator, score);
        manager.next_id = boids.iter().map(|b| b.id + 1).max().unwrap_or(0);
        manager.boids = boids;
        Ok(manager)
    }

    fn empty(options: SimOptions, predator: P, score: S) -> Self {
        let rng = match options.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        let tracker: Box<dyn Tracker> = match options.tracker {
            TrackerType::Naive => Box::new(NaiveTracker::new()),
            TrackerType::Grid => Box::new(GridTracker::new(&options)),
        };

        BoidManager {
            boids: Vec::with_capacity(options.init_boids),
            tracker,
            environment: Box::new(OpenWater),
            options,
            predator,
            score,
            rng,
            next_id: 0,
            tick: 0,
            eaten: 0,
            retired: Vec::new(),
        }
    }

    pub fn with_environment(mut self, environment: Box<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }

    fn random_spawn_point(&mut self) -> Vec2 {
        let world = self.options.world;
        let surface = self.options.water_surface_height;
        Vec2::new(
            self.rng.gen::<f32>() * world.width,
            surface + self.rng.gen::<f32>() * (world.height - surface),
        )
    }

    /// Adds a fish at the given spot, returns its id.
    pub fn spawn_at(&mut self, position: Vec2) -> Result<usize, ShoalError> {
        if self.boids.len() >= self.options.max_boids {
            warn!("refusing to spawn, flock is at its capacity of {}", self.options.max_boids);
            return Err(ShoalError::FlockFull {
                capacity: self.options.max_boids,
            });
        }

        let id = self.next_id;
        let position = wrap_position(position, &self.options.world);
        let boid = Boid::spawn(id, position, &self.options, &mut self.rng);
        debug!("spawned boid {} at {:?}", id, boid.position);

        self.boids.push(boid);
        self.next_id += 1;
        Ok(id)
    }

    /// One fixed logical step of the simulation.
    pub fn tick(&mut self) {
        self.tick += 1;

        self.remove_faded();

        // calculation loop, every boid sees the same snapshot
        let steering = self.steering();

        // update loop
        for (boid, steering) in self.boids.iter_mut().zip(steering.iter()) {
            if boid.is_alive() {
                boid.advance(steering, &self.options);
            } else {
                boid.drift(&self.options);
            }
            self.environment.constrain(boid);
        }

        self.check_predator_collisions();
    }

    /// Steering of every boid against the current positions, in flock order.
    /// Dead boids and boids above the surface get none.
    pub fn steering(&mut self) -> Vec<Steering> {
        self.tracker.rebuild(&self.boids);

        let predator = self.predator.position();
        let mut scratch = Vec::new();

        (0..self.boids.len())
            .map(|index| {
                let boid = &self.boids[index];
                if !boid.is_alive() || boid.position.y < self.options.water_surface_height {
                    return Steering::default();
                }

                let neighbours = NeighbourSets {
                    alignment: self.collect(index, self.options.alignment_radius, &mut scratch),
                    cohesion: self.collect(index, self.options.cohesion_radius, &mut scratch),
                    separation: self.collect(index, self.options.separation_radius, &mut scratch),
                    collision: self.collect(index, self.options.collision_radius, &mut scratch),
                };

                boid.steering(&neighbours, predator, &self.options)
            })
            .collect()
    }

    fn collect(&self, index: usize, radius: f32, scratch: &mut Vec<usize>) -> Vec<&Boid> {
        scratch.clear();
        self.tracker.query(&self.boids, index, radius, scratch);
        scratch.iter().map(|i| &self.boids[*i]).collect()
    }

    /// Indices of the live boids strictly within `radius` of `boids()[index]`.
    pub fn neighbours(&mut self, index: usize, radius: f32) -> Vec<usize> {
        self.tracker.rebuild(&self.boids);

        let mut res = Vec::new();
        self.tracker.query(&self.boids, index, radius, &mut res);
        res
    }

    fn remove_faded(&mut self) {
        let retired = &mut self.retired;

        self.boids.retain(|boid| {
            if boid.is_faded() {
                debug!("removing faded boid {}", boid.id);
                retired.push(boid.id);
                false
            } else {
                true
            }
        });
    }

    fn check_predator_collisions(&mut self) {
        let extent = match self.predator.extent() {
            Some(extent) => extent,
            None => return,
        };

        for boid in self.boids.iter_mut() {
            if boid.is_alive() && boid.extent().overlaps(&extent) && boid.die() {
                debug!("boid {} was eaten at tick {}", boid.id, self.tick);
                self.eaten += 1;
                self.score.on_fish_eaten();
            }
        }
    }

    /// Kills the boid with the given id, for deaths signalled from outside.
    /// Returns false if there is no such boid or it was already dead.
    pub fn kill(&mut self, id: usize) -> bool {
        let boid = match self.boids.iter_mut().find(|b| b.id == id) {
            Some(boid) => boid,
            None => return false,
        };

        if !boid.die() {
            return false;
        }

        debug!("boid {} was killed at tick {}", id, self.tick);
        self.eaten += 1;
        self.score.on_fish_eaten();
        true
    }

    /// Pushes the current frame to a renderer, including the boids that left
    /// the flock since the previous frame.
    pub fn publish(&mut self, sink: &mut dyn RenderSink) {
        sink.begin_frame(self.tick);
        for boid in self.boids.iter() {
            sink.draw(&boid.view(&self.options));
        }
        for id in self.retired.drain(..) {
            sink.retire(id);
        }
    }

    pub fn views(&self) -> impl Iterator<Item = BoidView> + '_ {
        self.boids.iter().map(|b| b.view(&self.options))
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// For adapters that reposition a boid, e.g. after an obstacle collision.
    pub fn boid_mut(&mut self, id: usize) -> Option<&mut Boid> {
        self.boids.iter_mut().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.boids.iter().filter(|b| b.is_alive()).count()
    }

    pub fn eaten(&self) -> u64 {
        self.eaten
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn options(&self) -> &SimOptions {
        &self.options
    }

    pub fn predator(&self) -> &P {
        &self.predator
    }

    pub fn predator_mut(&mut self) -> &mut P {
        &mut self.predator
    }

    pub fn score(&self) -> &S {
        &self.score
    }
}
