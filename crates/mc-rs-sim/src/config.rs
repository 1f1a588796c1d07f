use serde::Deserialize;
use std::path::Path;

use mc_rs_living::components::Position;
use mc_rs_living::world::{Difficulty, WorldSettings};

#[derive(Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub spawn: Vec<SpawnEntry>,
    pub player: Option<PlayerSection>,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Feet rest at this height on the flat floor.
    #[serde(default = "default_floor_y")]
    pub floor_y: i32,
    #[serde(default = "default_ai_enabled")]
    pub ai_enabled: bool,
}

fn default_floor_y() -> i32 {
    4
}

fn default_ai_enabled() -> bool {
    true
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            floor_y: default_floor_y(),
            ai_enabled: default_ai_enabled(),
        }
    }
}

impl WorldSection {
    pub fn settings(&self) -> WorldSettings {
        WorldSettings {
            ai_enabled: self.ai_enabled,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SimulationSection {
    /// Ticks to run before stopping. 0 = until Ctrl+C.
    #[serde(default)]
    pub ticks: u64,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Mobs are restored from here on start and written back on shutdown.
    pub save_file: Option<String>,
}

fn default_tick_millis() -> u64 {
    50
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            ticks: 0,
            tick_millis: default_tick_millis(),
            save_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SpawnEntry {
    pub mob: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SpawnEntry {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayerSection {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PlayerSection {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
