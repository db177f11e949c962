use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::direction::{BigramClass, Direction};
use crate::error::{GhostError, Result};

pub const DEFAULT_PROFILE_ID: &str = "8TEUUGQBYB";

/// Mean inter-key latency (ms) for each bigram-direction class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatencyProfile {
    #[serde(rename = "LL")]
    pub left_left: f64,
    #[serde(rename = "LR")]
    pub left_right: f64,
    #[serde(rename = "LS")]
    pub left_space: f64,
    #[serde(rename = "RL")]
    pub right_left: f64,
    #[serde(rename = "RR")]
    pub right_right: f64,
    #[serde(rename = "RS")]
    pub right_space: f64,
    #[serde(rename = "SL")]
    pub space_left: f64,
    #[serde(rename = "SR")]
    pub space_right: f64,
    #[serde(rename = "SS")]
    pub space_space: f64,
}

impl LatencyProfile {
    pub fn latency(&self, class: BigramClass) -> f64 {
        match class {
            BigramClass::LeftLeft => self.left_left,
            BigramClass::LeftRight => self.left_right,
            BigramClass::LeftSpace => self.left_space,
            BigramClass::RightLeft => self.right_left,
            BigramClass::RightRight => self.right_right,
            BigramClass::RightSpace => self.right_space,
            BigramClass::SpaceLeft => self.space_left,
            BigramClass::SpaceRight => self.space_right,
            BigramClass::SpaceSpace => self.space_space,
        }
    }

    pub fn latency_between(&self, first: Direction, second: Direction) -> f64 {
        self.latency(BigramClass::from_pair(first, second))
    }

    fn validate(&self, id: &str) -> Result<()> {
        for class in BigramClass::ALL {
            let value = self.latency(class);
            if !value.is_finite() || value < 0.0 {
                return Err(GhostError::InvalidProfile(format!(
                    "{id}.{class} must be a non-negative number of ms, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Read-only table of reference profiles keyed by identifier
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    profiles: BTreeMap<String, LatencyProfile>,
}

impl ProfileTable {
    /// The five compiled-in reference profiles
    pub fn builtin() -> Result<Self> {
        let file = crate::DATA_DIR
            .get_file("profiles.json")
            .ok_or_else(|| GhostError::InvalidProfile("built-in table missing".into()))?;
        let text = file
            .contents_utf8()
            .ok_or_else(|| GhostError::InvalidProfile("built-in table is not utf-8".into()))?;
        Self::from_json(text)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let profiles: BTreeMap<String, LatencyProfile> = serde_json::from_str(text)?;
        if profiles.is_empty() {
            return Err(GhostError::InvalidProfile("no profiles defined".into()));
        }
        for (id, profile) in &profiles {
            profile.validate(id)?;
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, id: &str) -> Result<&LatencyProfile> {
        self.profiles
            .get(id)
            .ok_or_else(|| GhostError::ProfileNotFound(id.to_string()))
    }

    pub fn lookup(&self, id: &str, first: Direction, second: Direction) -> Result<f64> {
        Ok(self.get(id)?.latency_between(first, second))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Identifier used when nothing else was asked for
    pub fn default_id(&self) -> &str {
        if self.contains(DEFAULT_PROFILE_ID) {
            DEFAULT_PROFILE_ID
        } else {
            self.ids().next().unwrap_or(DEFAULT_PROFILE_ID)
        }
    }

    /// Next identifier in selector order, wrapping around
    pub fn next_id(&self, current: &str) -> &str {
        self.step_id(current, 1)
    }

    pub fn prev_id(&self, current: &str) -> &str {
        self.step_id(current, self.len().saturating_sub(1))
    }

    fn step_id(&self, current: &str, offset: usize) -> &str {
        let ids: Vec<&str> = self.ids().collect();
        match ids.iter().position(|id| *id == current) {
            Some(pos) => ids[(pos + offset) % ids.len()],
            None => self.default_id(),
        }
    }
}
