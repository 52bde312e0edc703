use crate::boid::Boid;

use super::tracker::Tracker;

/// A naive implementation of boids tracking, which uses an O(N^2) algorithm for
/// finding boid's neighbours.
#[derive(Debug, Default)]
pub struct NaiveTracker;

impl NaiveTracker {
    pub fn new() -> Self {
        NaiveTracker
    }
}

impl Tracker for NaiveTracker {
    fn rebuild(&mut self, _: &[Boid]) {
        // nothing to index
    }

    fn query(&self, boids: &[Boid], index: usize, radius: f32, neighbours: &mut Vec<usize>) {
        let boid = &boids[index];

        for (i_other, b_other) in boids.iter().enumerate() {
            if i_other == index || !b_other.is_alive() {
                continue;
            }

            if boid.position.distance(b_other.position) < radius {
                neighbours.push(i_other);
            }
        }
    }
}
