use crate::{boid::Boid, options::SimOptions};

use super::tracker::Tracker;

const MIN_CELL_SIZE: f32 = 1.;

/// Uses a uniform grid space division method, where all cells of the underlying
/// table are stored in a 1D array and rebuilt every tick.
///
/// Queries only look at the cells a radius can reach, so for a flock spread
/// over the world this is far cheaper than the naive scan. It returns exactly
/// the same neighbours as [`NaiveTracker`](super::naive_tracker::NaiveTracker).
#[derive(Debug)]
pub struct GridTracker {
    cell_size: f32,
    cols: usize,
    rows: usize,
    table: Vec<Vec<usize>>,
}

impl GridTracker {
    pub fn new(options: &SimOptions) -> Self {
        let cell_size = options.max_query_radius().max(MIN_CELL_SIZE);
        let cols = ((options.world.width / cell_size).ceil() as usize).max(1);
        let rows = ((options.world.height / cell_size).ceil() as usize).max(1);

        GridTracker {
            cell_size,
            cols,
            rows,
            table: vec![Vec::with_capacity(8); cols * rows],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.table.len()
    }

    /// Returns the (column, row) of the cell holding a point. Points outside
    /// the world are clamped onto the border cells, which keeps queries
    /// complete for boids an environment pushed out of bounds.
    fn get_cell(&self, x: f32, y: f32) -> (usize, usize) {
        let col = (x / self.cell_size).floor().clamp(0., (self.cols - 1) as f32) as usize;
        let row = (y / self.cell_size).floor().clamp(0., (self.rows - 1) as f32) as usize;
        (col, row)
    }

    /// Returns "hashed" value representing an index into the 1D table
    pub fn get_table_index(&self, x: f32, y: f32) -> usize {
        let (col, row) = self.get_cell(x, y);
        col + row * self.cols
    }
}

impl Tracker for GridTracker {
    fn rebuild(&mut self, boids: &[Boid]) {
        self.table.iter_mut().for_each(|cell| cell.clear());

        for (index, boid) in boids.iter().enumerate() {
            // dead boids are never anyone's neighbour
            if !boid.is_alive() {
                continue;
            }
            let cell = self.get_table_index(boid.position.x, boid.position.y);
            self.table[cell].push(index);
        }
    }

    fn query(&self, boids: &[Boid], index: usize, radius: f32, neighbours: &mut Vec<usize>) {
        let boid = &boids[index];
        let (col, row) = self.get_cell(boid.position.x, boid.position.y);
        let reach = (radius / self.cell_size).ceil().max(0.) as usize;

        let first = neighbours.len();

        for r in row.saturating_sub(reach)..=(row + reach).min(self.rows - 1) {
            for c in col.saturating_sub(reach)..=(col + reach).min(self.cols - 1) {
                for &i_other in self.table[c + r * self.cols].iter() {
                    if i_other == index {
                        continue;
                    }
                    if boid.position.distance(boids[i_other].position) < radius {
                        neighbours.push(i_other);
                    }
                }
            }
        }

        // cells are visited out of index order
        neighbours[first..].sort_unstable();
    }
}
