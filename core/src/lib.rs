#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Frontline menu flow.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative menu session, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the session executes those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values for
//! systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the menu boots.
pub const WELCOME_BANNER: &str = "Welcome to Frontline.";

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the session's map catalog, weapon armory, and menu scenes.
    ConfigureMenu {
        /// Scene identifier of the map selection menu.
        map_menu_scene: SceneId,
        /// Scene identifier of the weapon loadout menu.
        loadout_scene: SceneId,
        /// Ordered map descriptors that populate the catalog.
        maps: Vec<MapDefinition>,
        /// Ordered weapon descriptors that populate the armory.
        weapons: Vec<WeaponDefinition>,
    },
    /// Advances the menu clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Records a difficulty choice for one map's level selector.
    SelectLevel {
        /// Map whose selector should change.
        map: MapId,
        /// New value for the selector, including the explicit unselected state.
        choice: LevelChoice,
    },
    /// Requests a game start from the identified map card.
    StartGame {
        /// Map the player attempted to start.
        map: MapId,
    },
    /// Confirms the loadout and requests the transition into the map scene.
    ConfirmLoadout,
    /// Leaves the loadout menu back to the map selection menu.
    LeaveLoadout,
    /// Makes the identified weapon the active loadout selection.
    SelectWeapon {
        /// Weapon that should become active.
        weapon: WeaponId,
    },
    /// Requests an upgrade of the identified weapon paid via one track.
    UpgradeWeapon {
        /// Weapon targeted by the upgrade.
        weapon: WeaponId,
        /// Currency track the upgrade is paid with.
        track: CurrencyTrack,
    },
    /// Requests that the session switch to the provided locale.
    SetLocale {
        /// Locale that should become active.
        locale: LocaleCode,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the menu clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the catalog and armory were configured.
    MenuConfigured {
        /// Number of map entries loaded into the catalog.
        maps: usize,
        /// Number of weapon entries loaded into the armory.
        weapons: usize,
    },
    /// Confirms that a level selector changed to a distinct new value.
    ///
    /// Emitted exactly once per distinct value; re-selecting the value a
    /// selector already holds produces no event.
    LevelSelected {
        /// Map whose selector changed.
        map: MapId,
        /// Value the selector now holds.
        choice: LevelChoice,
    },
    /// Reports that a game start request was refused.
    GameStartRejected {
        /// Map named in the start request.
        map: MapId,
        /// Specific reason the start was refused.
        reason: StartRejection,
    },
    /// Confirms that the selected-map slot now holds the map's scene.
    MapCommitted {
        /// Map that passed validation.
        map: MapId,
        /// Scene recorded for the later loadout confirmation.
        scene: SceneId,
    },
    /// Requests that the host environment transition to a scene.
    SceneRequested {
        /// Scene the host should load.
        scene: SceneId,
    },
    /// Reports that a loadout confirmation was refused.
    LoadoutRejected {
        /// Specific reason the confirmation was refused.
        reason: ConfirmRejection,
    },
    /// Confirms that a weapon became the active loadout selection.
    WeaponSelected {
        /// Weapon that is now active.
        weapon: WeaponId,
    },
    /// Confirms that a weapon upgrade was applied.
    WeaponUpgraded {
        /// Weapon that was upgraded.
        weapon: WeaponId,
        /// Number of upgrades applied to the weapon so far.
        upgrade_count: u32,
    },
    /// Confirms that the session switched to a distinct new locale.
    LocaleChanged {
        /// Locale that is now active.
        locale: LocaleCode,
    },
}

/// Unique identifier assigned to a map catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId(u32);

impl MapId {
    /// Creates a new map identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an armory weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(u32);

impl WeaponId {
    /// Creates a new weapon identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a scene understood by the host environment's scene loader.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(String);

impl SceneId {
    /// Creates a new scene identifier from the provided name.
    #[must_use]
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self(name.into())
    }

    /// Borrows the scene name understood by the host scene loader.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether the identifier names no scene at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// BCP 47 style locale identifier, for example `en-US` or `vi-VN`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Creates a new locale code from the provided identifier.
    #[must_use]
    pub fn new<T>(code: T) -> Self
    where
        T: Into<String>,
    {
        Self(code.into())
    }

    /// United States English, the default menu locale.
    #[must_use]
    pub fn english_us() -> Self {
        Self::new("en-US")
    }

    /// Vietnamese as spoken in Viet Nam.
    #[must_use]
    pub fn vietnamese_vn() -> Self {
        Self::new("vi-VN")
    }

    /// Borrows the locale identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Closed set of difficulties offered once a map is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Standard difficulty.
    Normal,
    /// Hardest difficulty.
    Superhard,
}

impl Difficulty {
    /// Every difficulty in dropdown option order.
    pub const ALL: [Difficulty; 2] = [Difficulty::Normal, Difficulty::Superhard];

    /// Localization key of the difficulty's display label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Normal => "difficulty.Normal",
            Self::Superhard => "difficulty.Superhard",
        }
    }
}

/// Value held by a level selector.
///
/// The unselected state is first class: it is distinct from every difficulty
/// and is never conflated with the first option of an underlying widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelChoice {
    /// No choice has been made yet.
    #[default]
    Unselected,
    /// The player chose the contained difficulty.
    Chosen(Difficulty),
}

impl LevelChoice {
    /// Reports whether the selector holds an actual difficulty.
    #[must_use]
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Chosen(_))
    }
}

/// One of the two independent currency tracks paying for weapon upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyTrack {
    /// Plentiful currency with a high base cost.
    Credits,
    /// Rare currency with a low base cost.
    Tokens,
}

impl CurrencyTrack {
    /// Both currency tracks in display order.
    pub const ALL: [CurrencyTrack; 2] = [CurrencyTrack::Credits, CurrencyTrack::Tokens];

    /// Cost of the very first upgrade on this track.
    #[must_use]
    pub const fn base_cost(self) -> u32 {
        match self {
            Self::Credits => 2000,
            Self::Tokens => 3,
        }
    }

    /// Amount the cost grows by after every upgrade, on either track.
    #[must_use]
    pub const fn cost_step(self) -> u32 {
        match self {
            Self::Credits => 500,
            Self::Tokens => 2,
        }
    }
}

/// Numeric attributes describing a weapon's behaviour in combat.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Damage dealt per hit.
    pub damage: f32,
    /// Shot dispersion. Lower is asserted to be better by the stat sheet.
    pub dispersion: f32,
    /// Rate of fire. Lower is asserted to be better by the stat sheet.
    pub rate_of_fire: f32,
    /// Reload speed. Lower is asserted to be better by the stat sheet.
    pub reload_speed: f32,
    /// Rounds carried per magazine.
    pub ammunition: f32,
}

impl WeaponStats {
    /// Creates a new stat block with explicit attribute values.
    #[must_use]
    pub const fn new(
        damage: f32,
        dispersion: f32,
        rate_of_fire: f32,
        reload_speed: f32,
        ammunition: f32,
    ) -> Self {
        Self {
            damage,
            dispersion,
            rate_of_fire,
            reload_speed,
            ammunition,
        }
    }

    /// Returns the stats after one upgrade application.
    ///
    /// Damage compounds multiplicatively per upgrade while the remaining
    /// attributes move by fixed deltas, floor-clamped at zero so no attribute
    /// ever turns negative. The decreasing direction of `rate_of_fire` and
    /// `reload_speed` is preserved literally from the stat sheet.
    #[must_use]
    pub fn upgraded(self) -> Self {
        Self {
            damage: self.damage * 1.5,
            dispersion: (self.dispersion - 0.1).max(0.0),
            rate_of_fire: (self.rate_of_fire - 2.0).max(0.0),
            reload_speed: (self.reload_speed - 0.1).max(0.0),
            ammunition: self.ammunition + 1.0,
        }
    }
}

/// Reasons a game start request may be refused by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartRejection {
    /// No startable map with the provided identifier exists.
    UnknownMap,
    /// The map exists but is still locked by progression.
    MapLocked,
    /// The map's level selector holds no difficulty yet.
    LevelNotSelected,
}

/// Reasons a loadout confirmation may be refused by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmRejection {
    /// The selected-map slot is empty, so no target scene is known.
    NoMapSelected,
}

/// Configuration descriptor for one map catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    /// Display name shown when no localization entry exists.
    pub name: String,
    /// Localization key of the display name. Empty falls back to the name.
    #[serde(default)]
    pub label_key: String,
    /// Scene the map transitions into when the game starts.
    pub scene: SceneId,
    /// Opaque handle of the card artwork, resolved by the host environment.
    #[serde(default)]
    pub artwork: String,
    /// Whether progression still locks the map.
    #[serde(default)]
    pub locked: bool,
}

impl MapDefinition {
    /// Localization key used for the card title, falling back to the name.
    #[must_use]
    pub fn display_key(&self) -> &str {
        if self.label_key.is_empty() {
            &self.name
        } else {
            &self.label_key
        }
    }
}

fn default_max_level() -> u32 {
    6
}

/// Configuration descriptor for one armory weapon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    /// Display name of the weapon.
    pub name: String,
    /// Opaque handle of the weapon artwork, resolved by the host environment.
    #[serde(default)]
    pub artwork: String,
    /// Base stat block before any upgrade.
    pub stats: WeaponStats,
    /// Maximum weapon level; level 1 is the base, so `max_level - 1` upgrades
    /// can be applied in total.
    #[serde(default = "default_max_level")]
    pub max_level: u32,
}
