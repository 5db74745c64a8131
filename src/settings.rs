//! Game settings and tuning
//!
//! Constructed once at startup and handed to world construction and the frame
//! loop. Persisted in LocalStorage on the web, read from a JSON file natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LoadError;

/// Which prototype to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Grid walker with question blocks
    #[default]
    Quiz,
    /// Side view with gravity and the echo bridge
    Platformer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Quiz => "quiz",
            GameMode::Platformer => "platformer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quiz" | "rpg" => Some(GameMode::Quiz),
            "platformer" | "echo" => Some(GameMode::Platformer),
            _ => None,
        }
    }
}

/// Movement tuning, in pixels per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub terminal_velocity: f32,
    pub echo_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            terminal_velocity: TERMINAL_VELOCITY,
            echo_range: ECHO_INTERACTION_RANGE,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    pub tuning: Tuning,

    // === HUD ===
    /// Show the control hints
    pub show_instructions: bool,

    // === Accessibility ===
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Quiz,
            tuning: Tuning::default(),
            show_instructions: true,
            high_contrast: false,
        }
    }
}

impl Settings {
    pub fn with_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse settings; missing fields take their defaults
    pub fn from_json(source_name: &str, json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::data(source_name, e))
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "echo_quest_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(Self::STORAGE_KEY, &json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("{e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, defaults if it is absent or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        let name = path.display().to_string();
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| LoadError::data(name.as_str(), e))
            .and_then(|json| Self::from_json(&name, &json));
        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {name}");
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
