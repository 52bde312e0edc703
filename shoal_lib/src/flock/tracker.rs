use crate::boid::Boid;

// a tracker indexes the flock's positions once per tick and answers radius
// queries against that index. Implementations must agree on the answers, they
// only differ in how fast they get there.

pub trait Tracker {
    /// rebuild the internal index from the current positions
    fn rebuild(&mut self, boids: &[Boid]);

    /// Collects the indices of live boids strictly within `radius` of
    /// `boids[index]`, excluding the boid itself, in ascending order.
    fn query(&self, boids: &[Boid], index: usize, radius: f32, neighbours: &mut Vec<usize>);
}
