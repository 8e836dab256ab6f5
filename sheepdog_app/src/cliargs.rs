use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser, ClapSerde)]
#[command(version, about, long_about = None)]
/// Headless runner for sheepdog levels: two scripted sheepdogs herding a flock.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.yaml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default("levels/level1.txt".to_owned())]
    #[arg(short = 'l', long)]
    /// level file to play
    pub level: String,

    #[default(3600)]
    #[arg(short = 'n', long)]
    /// upper bound on simulated ticks, the run stops earlier once the round is over
    pub ticks: u64,

    #[default(1. / 60.)]
    #[arg(long)]
    /// seconds simulated per tick
    pub dt: f32,

    #[default(0.1)]
    #[arg(long = "max_dt")]
    pub max_dt: f32,

    #[default(0)]
    #[arg(long)]
    /// random seed, 0 draws a fresh one
    pub seed: u64,

    #[default(String::new())]
    #[arg(short = 'i', long)]
    /// CSV of sheepdog inputs: tick,dog,forward,backward,left,right
    pub script: String,

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
    #[arg(long = "save_path")]
    pub save_path: String,

    #[default(400.)]
    #[arg(long = "view_width")]
    pub view_width: f32,

    #[default(250.)]
    #[arg(long = "view_height")]
    pub view_height: f32,
}
