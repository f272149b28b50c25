use serde::{Deserialize, Serialize};

use butter_othello::{Color, ReplenishPolicy};

use crate::error::SessionResult;
use crate::hard::DEFAULT_DEPTH;

/// Who controls the two colors
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Two humans on one board
    #[default]
    Pvp,
    CpuEasy,
    CpuHard,
}

impl GameMode {
    pub fn has_cpu(self) -> bool {
        self != GameMode::Pvp
    }
}

/// Session configuration. Missing JSON fields take their defaults.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub mode: GameMode,
    /// Color played by the CPU; ignored in `Pvp`
    pub cpu_color: Color,
    pub replenish: ReplenishPolicy,
    /// Plies searched by the hard CPU
    pub search_depth: u32,
    /// Seed for piece draws and the easy CPU, entropy when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: GameMode::Pvp,
            cpu_color: Color::White,
            replenish: ReplenishPolicy::default(),
            search_depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether `color` is driven by the CPU under these settings
    pub fn is_cpu(&self, color: Color) -> bool {
        self.mode.has_cpu() && color == self.cpu_color
    }
}
