use glam::Vec2;

use crate::{collaborators::PredatorHandle, collision::Extent, options::WorldSize};

/// A shark for headless runs. It cruises at a constant velocity and turns
/// around at the world edges; its collision box is axis aligned.
#[derive(Debug, Clone, Copy)]
pub struct Shark {
    pub position: Vec2,
    pub velocity: Vec2,
    pub half_size: Vec2,
}

impl Shark {
    pub fn new(position: Vec2, velocity: Vec2, half_size: Vec2) -> Self {
        Shark {
            position,
            velocity,
            half_size,
        }
    }

    pub fn patrol(&mut self, world: &WorldSize) {
        self.position += self.velocity;

        if self.position.x < 0. {
            self.position.x = 0.;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > world.width {
            self.position.x = world.width;
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.position.y < 0. {
            self.position.y = 0.;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > world.height {
            self.position.y = world.height;
            self.velocity.y = -self.velocity.y.abs();
        }
    }
}

impl PredatorHandle for Shark {
    fn position(&self) -> Option<Vec2> {
        Some(self.position)
    }

    fn extent(&self) -> Option<Extent> {
        Some(Extent::rect_around(self.position, self.half_size))
    }
}
