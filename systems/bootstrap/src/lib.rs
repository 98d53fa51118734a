#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Frontline menu experience.
//!
//! Adapters load a [`MenuConfig`] (from TOML or the built-in roster), run it
//! through [`MenuConfig::validate`], and hand it to [`Bootstrap::commands`]
//! to obtain the batch that configures a fresh session.

use std::{error::Error, fmt};

use frontline_core::{Command, LocaleCode, MapDefinition, SceneId, WeaponDefinition, WeaponStats};
use serde::Deserialize;

fn default_map_menu_scene() -> SceneId {
    SceneId::new("Map Menu")
}

fn default_loadout_scene() -> SceneId {
    SceneId::new("Weapon Menu")
}

fn default_locale() -> LocaleCode {
    LocaleCode::english_us()
}

const fn default_warning_display_ms() -> u64 {
    1000
}

const fn default_warning_fade_ms() -> u64 {
    500
}

/// Display and fade periods of the level warning, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct WarningTimings {
    /// How long the banner stays fully opaque.
    #[serde(default = "default_warning_display_ms")]
    pub display_ms: u64,
    /// How long the fade to invisible takes afterwards.
    #[serde(default = "default_warning_fade_ms")]
    pub fade_ms: u64,
}

impl Default for WarningTimings {
    fn default() -> Self {
        Self {
            display_ms: default_warning_display_ms(),
            fade_ms: default_warning_fade_ms(),
        }
    }
}

/// Complete configuration of the menu experience.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MenuConfig {
    /// Scene identifier of the map selection menu.
    #[serde(default = "default_map_menu_scene")]
    pub map_menu_scene: SceneId,
    /// Scene identifier of the weapon loadout menu.
    #[serde(default = "default_loadout_scene")]
    pub loadout_scene: SceneId,
    /// Locale activated when no saved preference exists.
    #[serde(default = "default_locale")]
    pub default_locale: LocaleCode,
    /// Timing parameters of the level warning banner.
    #[serde(default)]
    pub warning: WarningTimings,
    /// Ordered map descriptors that populate the catalog.
    pub maps: Vec<MapDefinition>,
    /// Ordered weapon descriptors that populate the armory.
    pub weapons: Vec<WeaponDefinition>,
}

impl Default for MenuConfig {
    /// The roster the menu ships with when no config file is provided.
    fn default() -> Self {
        Self {
            map_menu_scene: default_map_menu_scene(),
            loadout_scene: default_loadout_scene(),
            default_locale: default_locale(),
            warning: WarningTimings::default(),
            maps: vec![
                MapDefinition {
                    name: "Dungeon Explorer".to_owned(),
                    label_key: "mapCard.DungeonExplorer".to_owned(),
                    scene: SceneId::new("Map_1"),
                    artwork: "maps/dungeon_explorer".to_owned(),
                    locked: false,
                },
                MapDefinition {
                    name: "Trap Cave".to_owned(),
                    label_key: "mapCard.TrapCave".to_owned(),
                    scene: SceneId::new("Map_2"),
                    artwork: "maps/trap_cave".to_owned(),
                    locked: false,
                },
                MapDefinition {
                    name: "Shutter Island".to_owned(),
                    label_key: "mapCard.ShutterIsland".to_owned(),
                    scene: SceneId::new("Map_3"),
                    artwork: "maps/shutter_island".to_owned(),
                    locked: true,
                },
            ],
            weapons: vec![
                WeaponDefinition {
                    name: "Ranger".to_owned(),
                    artwork: "weapons/ranger".to_owned(),
                    stats: WeaponStats::new(100.0, 5.0, 10.0, 2.0, 30.0),
                    max_level: 6,
                },
                WeaponDefinition {
                    name: "Marauder".to_owned(),
                    artwork: "weapons/marauder".to_owned(),
                    stats: WeaponStats::new(55.0, 3.0, 12.0, 1.5, 24.0),
                    max_level: 6,
                },
                WeaponDefinition {
                    name: "Hornet".to_owned(),
                    artwork: "weapons/hornet".to_owned(),
                    stats: WeaponStats::new(35.0, 2.0, 14.0, 1.2, 40.0),
                    max_level: 6,
                },
                WeaponDefinition {
                    name: "Bulwark".to_owned(),
                    artwork: "weapons/bulwark".to_owned(),
                    stats: WeaponStats::new(160.0, 7.5, 18.0, 3.0, 8.0),
                    max_level: 6,
                },
                WeaponDefinition {
                    name: "Longshot".to_owned(),
                    artwork: "weapons/longshot".to_owned(),
                    stats: WeaponStats::new(240.0, 0.5, 20.0, 3.5, 5.0),
                    max_level: 6,
                },
            ],
        }
    }
}

impl MenuConfig {
    /// Checks the configuration for values the session cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_menu_scene.is_empty() {
            return Err(ConfigError::EmptyMenuScene {
                field: "map_menu_scene",
            });
        }
        if self.loadout_scene.is_empty() {
            return Err(ConfigError::EmptyMenuScene {
                field: "loadout_scene",
            });
        }
        for weapon in &self.weapons {
            if weapon.max_level == 0 {
                return Err(ConfigError::InvalidMaxLevel {
                    weapon: weapon.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Errors reported when a configuration cannot boot the menu.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A menu scene identifier names no scene at all.
    EmptyMenuScene {
        /// Configuration field holding the empty identifier.
        field: &'static str,
    },
    /// A weapon's level cap leaves no room for its base level.
    InvalidMaxLevel {
        /// Name of the offending weapon.
        weapon: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMenuScene { field } => {
                write!(f, "{field} must name a scene")
            }
            Self::InvalidMaxLevel { weapon } => {
                write!(f, "weapon '{weapon}' must have a max level of at least 1")
            }
        }
    }
}

impl Error for ConfigError {}

/// Produces the command batches that boot the menu.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the command batch that configures a fresh session.
    ///
    /// The locale command is idempotent; when the configured default matches
    /// the session's starting locale the session emits nothing for it.
    #[must_use]
    pub fn commands(&self, config: &MenuConfig) -> Vec<Command> {
        vec![
            Command::ConfigureMenu {
                map_menu_scene: config.map_menu_scene.clone(),
                loadout_scene: config.loadout_scene.clone(),
                maps: config.maps.clone(),
                weapons: config.weapons.clone(),
            },
            Command::SetLocale {
                locale: config.default_locale.clone(),
            },
        ]
    }
}
