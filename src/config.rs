//! Rig configuration
//!
//! The two physical measurements the operator takes with the calibration
//! fixture, plus the optional on-disk profile (`rig.json`) that remembers
//! them between runs. Positional argv values always win over the profile.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_PROFILE_PATH: &str = "rig.json";

/// Physical rig geometry, both in millimeters.
/// Zero means "not measured" and forces calibration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurements {
    pub distance_mm: u32,
    pub box_width_mm: u32,
}

impl Measurements {
    /// Both values present and non-zero, same validity rule the original
    /// rig applied to its argv
    pub fn is_complete(&self) -> bool {
        self.distance_mm != 0 && self.box_width_mm != 0
    }
}

/// On-disk rig profile
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RigProfile {
    #[serde(default)]
    pub distance_mm: u32,
    #[serde(default)]
    pub box_width_mm: u32,
    /// Secondary TFT framebuffer device to mirror the calibration frame to,
    /// e.g. "/dev/fb1"
    #[serde(default)]
    pub mirror_device: Option<String>,
}

impl RigProfile {
    /// Save profile to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load profile from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    pub fn measurements(&self) -> Measurements {
        Measurements {
            distance_mm: self.distance_mm,
            box_width_mm: self.box_width_mm,
        }
    }

    /// Profile values overridden by argv measurements where given
    pub fn merged(&self, argv: Option<Measurements>) -> Measurements {
        argv.unwrap_or_else(|| self.measurements())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness() {
        assert!(!Measurements::default().is_complete());
        assert!(!Measurements {
            distance_mm: 1000,
            box_width_mm: 0
        }
        .is_complete());
        assert!(Measurements {
            distance_mm: 1000,
            box_width_mm: 120
        }
        .is_complete());
    }

    #[test]
    fn test_profile_json_round_trip() {
        let profile = RigProfile {
            distance_mm: 850,
            box_width_mm: 110,
            mirror_device: Some("/dev/fb1".to_string()),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: RigProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.distance_mm, 850);
        assert_eq!(back.box_width_mm, 110);
        assert_eq!(back.mirror_device.as_deref(), Some("/dev/fb1"));
    }

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let profile: RigProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.distance_mm, 0);
        assert!(profile.mirror_device.is_none());
        assert!(!profile.measurements().is_complete());
    }

    #[test]
    fn test_argv_beats_profile() {
        let profile = RigProfile {
            distance_mm: 850,
            box_width_mm: 110,
            mirror_device: None,
        };
        let argv = Measurements {
            distance_mm: 1000,
            box_width_mm: 120,
        };
        assert_eq!(profile.merged(Some(argv)), argv);
        assert_eq!(profile.merged(None), profile.measurements());
    }
}
