//! Named battery presets (energy, duration), built in or loaded from TOML.
//!
//! ```toml
//! [presets.my-cell]
//! energy = 75
//! time = 12
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Battery output power (W).
    pub energy: u64,
    /// Battery duration (s).
    pub time: u64,
}

pub const BUILTIN_PRESETS: &[(&str, Preset)] = &[
    ("source-ore", Preset { energy: 50, time: 8 }),
    ("valley-low", Preset { energy: 220, time: 40 }),
    ("valley-mid", Preset { energy: 420, time: 40 }),
    ("valley-high", Preset { energy: 1100, time: 40 }),
    ("wuling-low", Preset { energy: 1600, time: 40 }),
];

#[derive(Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: BTreeMap<String, Preset>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetTable {
    entries: BTreeMap<String, Preset>,
}

impl PresetTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN_PRESETS
            .iter()
            .map(|(name, preset)| (name.to_string(), *preset))
            .collect();
        Self { entries }
    }

    /// Merge presets from a TOML document; file entries shadow existing ones.
    /// Returns the number of presets read.
    pub fn merge_toml(&mut self, source: &str) -> Result<usize> {
        let file: PresetFile = toml::from_str(source)
            .map_err(|e| PlanError::validation(format!("invalid presets file: {e}")))?;
        let count = file.presets.len();
        for (name, preset) in file.presets {
            if preset.energy == 0 || preset.time == 0 {
                return Err(PlanError::validation(format!(
                    "preset '{name}': energy and time must be > 0"
                )));
            }
            if self.entries.insert(name.clone(), preset).is_some() {
                tracing::info!("preset '{name}' overridden by presets file");
            }
        }
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Result<Preset> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| PlanError::validation(format!("unknown preset '{name}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}
