//! Simulation settings persistence - save/load config to JSON file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::*;

/// Persisted tuning + scene layout. Saved to `Documents/Goldrush/settings.json`.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimSettings {
    #[serde(default)]
    pub forager: ForagerSettings,
    #[serde(default)]
    pub archer: ArcherSettings,
    #[serde(default)]
    pub arrow: ArrowSettings,
    #[serde(default)]
    pub spawner: SpawnerSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Bind the gold counter UI. Off means deliveries are not counted.
    #[serde(default = "default_true")]
    pub gold_counter: bool,
    /// Fixed simulation rate in Hz.
    #[serde(default = "default_fixed_hz")]
    pub fixed_hz: f64,
    /// Stop the headless runner after this much simulated time.
    #[serde(default)]
    pub run_seconds: Option<f32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ForagerSettings {
    pub count: usize,
    pub speed: f32,
    pub home_radius: f32,
    pub dropped_bag_cooldown: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ArcherSettings {
    pub shoot_interval: f32,
    pub shoot_offset: Vec2,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ArrowSettings {
    pub speed: f32,
    pub lifetime: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpawnerSettings {
    pub interval: f32,
    pub launch_speed: f32,
    pub drag: f32,
}

/// Where things are. `None` leaves that collaborator out of the scene.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LayoutSettings {
    pub home_center: Vec2,
    pub shed: Option<Vec2>,
    pub archer: Option<Vec2>,
    pub spawner: Option<Vec2>,
    pub combat_zone_center: Vec2,
    pub combat_zone_size: Vec2,
    pub green_land_center: Vec2,
    pub green_land_size: Vec2,
    pub yellow_land_center: Vec2,
    pub yellow_land_size: Vec2,
}

fn default_true() -> bool { true }
fn default_fixed_hz() -> f64 { FIXED_HZ }

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            forager: ForagerSettings::default(),
            archer: ArcherSettings::default(),
            arrow: ArrowSettings::default(),
            spawner: SpawnerSettings::default(),
            layout: LayoutSettings::default(),
            gold_counter: true,
            fixed_hz: FIXED_HZ,
            run_seconds: None,
        }
    }
}

impl Default for ForagerSettings {
    fn default() -> Self {
        Self {
            count: 1,
            speed: FORAGER_SPEED,
            home_radius: HOME_RADIUS,
            dropped_bag_cooldown: DROPPED_BAG_COOLDOWN,
        }
    }
}

impl Default for ArcherSettings {
    fn default() -> Self {
        Self { shoot_interval: SHOOT_INTERVAL, shoot_offset: Vec2::new(0.5, 0.5) }
    }
}

impl Default for ArrowSettings {
    fn default() -> Self {
        Self { speed: ARROW_SPEED, lifetime: ARROW_LIFETIME }
    }
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self { interval: SPAWN_INTERVAL, launch_speed: BAG_LAUNCH_SPEED, drag: BAG_DRAG }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            home_center: Vec2::new(-8.0, -4.0),
            shed: Some(Vec2::new(-10.0, 2.0)),
            archer: Some(Vec2::new(8.0, 6.0)),
            spawner: Some(Vec2::new(0.0, 6.0)),
            combat_zone_center: Vec2::new(6.0, 0.0),
            combat_zone_size: Vec2::new(8.0, 8.0),
            green_land_center: Vec2::new(6.0, 0.0),
            green_land_size: Vec2::new(8.0, 8.0),
            yellow_land_center: Vec2::new(-2.0, -2.0),
            yellow_land_size: Vec2::new(6.0, 4.0),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let home = std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .ok()?;
    let dir = PathBuf::from(home).join("Documents").join("Goldrush");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("settings.json"))
}

pub fn save_settings(settings: &SimSettings) {
    let Some(path) = settings_path() else { return };
    save_settings_to(settings, &path);
}

pub fn save_settings_to(settings: &SimSettings, path: &Path) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                warn!("Failed to save settings: {}", e);
            }
        }
        Err(e) => warn!("Failed to serialize settings: {}", e),
    }
}

pub fn load_settings() -> SimSettings {
    let Some(path) = settings_path() else { return SimSettings::default() };
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> SimSettings {
    match std::fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("Ignoring malformed settings at {}: {}", path.display(), e);
            SimSettings::default()
        }),
        Err(_) => SimSettings::default(),
    }
}
