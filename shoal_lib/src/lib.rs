use birdwatcher::{Birdwatcher, BoidData};
use collaborators::{PredatorHandle, ScoreSink};
use error::ShoalError;
use flock::BoidManager;
use options::{SaveOptions, SimOptions};

pub use glam;

pub mod boid;
pub mod flock;

pub mod birdwatcher;
pub mod collaborators;
pub mod collision;
pub mod error;
pub mod math_helpers;
pub mod options;
pub mod predator;

/// Runs a headless simulation for `no_ticks` ticks, recording every
/// `sample_rate`-th frame.
pub fn shoal_base<P: PredatorHandle, S: ScoreSink>(
    no_ticks: u64,
    sample_rate: u64,
    options: SimOptions,
    save_options: &SaveOptions,
    predator: P,
    score: S,
) -> Result<Vec<BoidData>, ShoalError> {
    let mut manager = BoidManager::new(options, predator, score)?;
    let mut bird_watcher = Birdwatcher::new(sample_rate);

    (0..no_ticks).for_each(|_| {
        manager.tick();
        bird_watcher.watch(&mut manager);
    });

    bird_watcher.pop_data_save(save_options)
}

#[cfg(test)]
mod tests {
    use crate::{
        collaborators::{EatenCounter, NoPredator},
        options::{SaveOptions, SimOptions},
        shoal_base,
    };

    #[test]
    fn headless_run_records_samples() {
        let options = SimOptions {
            init_boids: 10,
            seed: Some(3),
            ..Default::default()
        };

        let data = shoal_base(20, 5, options, &SaveOptions::default(), NoPredator, EatenCounter::default())
            .unwrap();

        assert_eq!(data.len(), 4 * 10);
        assert!(data.iter().all(|d| d.alive));
    }
}
