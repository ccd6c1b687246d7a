use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(long, short)]
    pub config: String,
}

impl CommandLineArgs {
    pub fn new_with_path(path: impl ToString) -> Self {
        CommandLineArgs {
            config: path.to_string(),
        }
    }
}

/// The run configuration, read from a YAML file. All sections except `transit`
/// have defaults, so a minimal config only names the two input files.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub transit: Transit,
    #[serde(default)]
    pub demand: Demand,
    #[serde(default)]
    pub simulation: Simulation,
    #[serde(default)]
    pub output: Output,
    #[serde(skip)]
    context: Option<PathBuf>,
}

impl From<CommandLineArgs> for Config {
    fn from(args: CommandLineArgs) -> Self {
        Config::from(args.config.parse::<PathBuf>().unwrap())
    }
}

impl From<PathBuf> for Config {
    fn from(config_path: PathBuf) -> Self {
        let reader = BufReader::new(File::open(&config_path).unwrap_or_else(|e| {
            panic!(
                "Failed to open config file at {:?}. Original error was {}",
                config_path, e
            );
        }));
        let mut config: Config = serde_yaml::from_reader(reader).unwrap_or_else(|e| {
            panic!(
                "Failed to parse config at {:?}. Original error was: {}",
                config_path, e
            )
        });
        config.set_context(Some(config_path));
        config
    }
}

impl Config {
    pub fn set_context(&mut self, context: Option<PathBuf>) {
        self.context = context;
    }

    pub fn context(&self) -> &Option<PathBuf> {
        &self.context
    }
}

/// Input files: stops as `id;name` records, lines as `code;stop_id;...`
/// records. Both are resolved relative to the config file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transit {
    pub stops_file: PathBuf,
    pub lines_file: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Demand {
    #[serde(default = "u32_value_3")]
    pub max_passengers_per_stop: u32,
    #[serde(default = "u64_value_4711")]
    pub random_seed: u64,
}

impl Default for Demand {
    fn default() -> Self {
        Demand {
            max_passengers_per_stop: u32_value_3(),
            random_seed: u64_value_4711(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Simulation {
    #[serde(default = "usize_value_20")]
    pub vehicle_capacity: usize,
    #[serde(default = "u32_value_1")]
    pub max_laps: u32,
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation {
            vehicle_capacity: usize_value_20(),
            max_laps: u32_value_1(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Output {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub write_events: WriteEvents,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            output_dir: default_output_dir(),
            logging: Logging::default(),
            write_events: WriteEvents::default(),
        }
    }
}

/// Have this extra layer of log level enum, as tracing subscriber has no
/// off/none option by default.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub enum Logging {
    #[default]
    Info,
    None,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub enum WriteEvents {
    #[default]
    None,
    Text,
}

fn u32_value_3() -> u32 {
    3
}

fn u64_value_4711() -> u64 {
    4711
}

fn usize_value_20() -> usize {
    20
}

fn u32_value_1() -> u32 {
    1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}
