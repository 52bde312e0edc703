//! Interfaces to the systems around the flock. The flock never reaches into
//! them directly; each one is handed to the [`BoidManager`](crate::flock::BoidManager)
//! and only exposes the capability the simulation needs.

use glam::Vec2;

use crate::{boid::{Boid, Tint}, collision::Extent};

/// Read-only access to whatever hunts the fish.
pub trait PredatorHandle {
    fn position(&self) -> Option<Vec2>;
    fn extent(&self) -> Option<Extent>;
}

/// Stand-in for a scene without a predator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPredator;

impl PredatorHandle for NoPredator {
    fn position(&self) -> Option<Vec2> {
        None
    }

    fn extent(&self) -> Option<Extent> {
        None
    }
}

/// Receives one event per fish that got eaten.
pub trait ScoreSink {
    fn on_fish_eaten(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EatenCounter {
    pub count: u64,
}

impl ScoreSink for EatenCounter {
    fn on_fish_eaten(&mut self) {
        self.count += 1;
    }
}

/// What a renderer needs to draw a single fish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidView {
    pub id: usize,
    pub position: Vec2,
    pub rotation: f32,
    pub alpha: f32,
    pub tint: Tint,
    pub size: f32,
    pub alive: bool,
}

pub trait RenderSink {
    fn begin_frame(&mut self, _tick: u64) {}
    fn draw(&mut self, view: &BoidView);
    /// the boid with this id left the flock, its visual should go too
    fn retire(&mut self, _id: usize) {}
}

/// Static scenery the engine resolves collisions against. An implementation
/// may move or stop a boid after it has been integrated for the tick.
pub trait Environment {
    fn constrain(&self, boid: &mut Boid);
}

/// Nothing in the water.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenWater;

impl Environment for OpenWater {
    fn constrain(&self, _: &mut Boid) {}
}
