use std::{fs::OpenOptions, mem, path::Path};

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::{
    collaborators::{BoidView, PredatorHandle, RenderSink, ScoreSink},
    error::ShoalError,
    flock::BoidManager,
    options::SaveOptions,
};

// so right now, this is more of a bird data acummulator than a birdwatcher,
// it stands in for the renderer in headless runs
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BoidData {
    pub id: usize,
    pub tick: u64,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub alpha: f32,
    pub alive: bool,
}

pub struct Birdwatcher {
    locations: Vec<BoidData>,
    current_tick: u64,
    sampling: bool,
    sample_rate: u64,
}

const PREFIX: &str = "shoal-data";

impl Birdwatcher {
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            locations: Vec::new(),
            current_tick: 0,
            sampling: false,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection
    pub fn watch<P: PredatorHandle, S: ScoreSink>(&mut self, manager: &mut BoidManager<P, S>) {
        manager.publish(self);
    }

    pub fn restart(&mut self) {
        self.locations.clear();
    }

    pub fn data(&self) -> &[BoidData] {
        &self.locations
    }

    pub fn pop_data(&mut self) -> Vec<BoidData> {
        mem::take(&mut self.locations)
    }

    /// Saves the latest data in CSV format, then returns it while emptying the birdwatcher's memory
    ///
    /// Depending on save options, either attempts to overwrite the current file or write's a new timestamped file
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Result<Vec<BoidData>, ShoalError> {
        let data = self.pop_data();

        if !save_options.save_locations {
            return Ok(data);
        }

        if let Some(path) = &save_options.save_locations_path {
            let file_path = Path::new(path).join(Birdwatcher::get_dataset_name(save_options, Utc::now()));

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&file_path)?;
            let mut wtr = csv::Writer::from_writer(file);

            for b in data.iter() {
                wtr.serialize(b)?;
            }
            wtr.flush()?;

            info!("saved {} samples to {}", data.len(), file_path.display());
        }

        Ok(data)
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.save_locations_timestamp {
            true => {
                let datetime_part = now.timestamp_millis();
                format!(
                    "{prefix}_{datetime}.csv",
                    prefix = PREFIX,
                    datetime = datetime_part
                )
            }
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }
}

impl RenderSink for Birdwatcher {
    fn begin_frame(&mut self, tick: u64) {
        self.current_tick = tick;
        self.sampling = tick % self.sample_rate == 0;
    }

    fn draw(&mut self, view: &BoidView) {
        if !self.sampling {
            return;
        }

        self.locations.push(BoidData {
            id: view.id,
            tick: self.current_tick,
            x: view.position.x,
            y: view.position.y,
            rotation: view.rotation,
            alpha: view.alpha,
            alive: view.alive,
        });
    }
}
