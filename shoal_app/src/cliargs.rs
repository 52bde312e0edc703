// config file values are merged under the command line ones, see
// https://docs.rs/clap-serde-derive/latest/clap_serde_derive/
use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Headless boids (Reynolds '86) simulation of a shoal of fish hunted by a shark.
pub struct Args {
    /// Config file, toml or yaml, read if it exists
    #[arg(short, long = "config", default_value = "shoal.toml")]
    pub config_path: std::path::PathBuf,

    /// Log every spawn, death and removal
    #[arg(short, long)]
    pub verbose: bool,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(50)]
    #[arg(short = 'n', long)]
    /// number of boids
    pub no_boids: usize,

    #[default(500)]
    #[arg(long)]
    /// maximum number of boids
    pub max_boids: usize,

    #[default(3600)]
    #[arg(short = 'k', long)]
    /// number of ticks to simulate
    pub ticks: u64,

    #[default(60.)]
    #[arg(long = "tps")]
    /// logical ticks per second
    pub ticks_per_second: f32,

    #[default(4)]
    #[arg(short = 'r', long)]
    /// ratio of ticks/sample_rate, e,g, 4 = sample every 4th tick
    pub sample_rate: u64,

    #[default(false)]
    #[arg(short = 's', long)]
    pub save: bool,

    #[default(false)]
    #[arg(short = 't', long)]
    pub save_timestamp: bool,

    #[default("./".to_owned())]
    #[arg(long)]
    pub save_path: String,

    #[default(2400.)]
    #[arg(short = 'x', long)]
    pub world_width: f32,

    #[default(1600.)]
    #[arg(short = 'y', long)]
    pub world_height: f32,

    #[default(500.)]
    #[arg(long)]
    pub water_surface: f32,

    #[default(50.)]
    #[arg(long = "ali_radius")]
    pub alignment_radius: f32,
    #[default(100.)]
    #[arg(long = "coh_radius")]
    pub cohesion_radius: f32,
    #[default(25.)]
    #[arg(long = "sep_radius")]
    pub separation_radius: f32,
    #[default(20.)]
    #[arg(long = "col_radius")]
    pub collision_radius: f32,

    #[default(2.)]
    #[arg(long = "max_speed")]
    pub max_speed: f32,
    #[default(0.05)]
    #[arg(long = "max_force")]
    pub max_force: f32,

    #[default(3.)]
    #[arg(long = "shark_speed")]
    pub shark_speed: f32,

    #[default(false)]
    #[arg(long)]
    /// use the uniform grid for neighbour queries
    pub grid: bool,

    #[default(0)]
    #[arg(long)]
    /// seed for reproducible runs, 0 draws one from the OS
    pub seed: u64,
}
