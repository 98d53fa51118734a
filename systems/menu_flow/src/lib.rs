#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure menu-flow system translating user actions into session commands.
//!
//! The system replaces the scattered per-widget callbacks of a conventional
//! menu implementation with a single dispatch point: adapters collect
//! [`UserAction`] values, the system checks them against the screen that is
//! currently on display, and emits the matching [`Command`] batch. Locked
//! map cards are deliberately not filtered here; the session rejects them so
//! the refusal stays observable in the event stream.

use frontline_core::{
    Command, CurrencyTrack, Event, LevelChoice, LocaleCode, MapId, SceneId, WeaponId,
};

/// Screen of the menu flow that is currently on display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Map selection menu with one card per catalog entry.
    MapMenu,
    /// Weapon loadout menu shown between map choice and gameplay.
    Loadout,
    /// The gameplay scene itself; the menu flow is dormant here.
    InMap,
}

/// User intent captured by an adapter, decoupled from any widget technology.
#[derive(Clone, Debug, PartialEq)]
pub enum UserAction {
    /// The player picked a value in a map card's level dropdown.
    SelectLevel {
        /// Map whose dropdown changed.
        map: MapId,
        /// Value the dropdown now shows, including explicit unselection.
        choice: LevelChoice,
    },
    /// The player clicked a map card's body.
    ClickMapCard(MapId),
    /// The player clicked a map card's play button.
    ClickPlay(MapId),
    /// The player clicked a weapon card in the loadout list.
    ClickWeaponCard(WeaponId),
    /// The player clicked one of the upgrade buttons.
    ClickUpgrade(CurrencyTrack),
    /// The player confirmed the loadout.
    ClickDone,
    /// The player asked to go back to the map menu.
    ClickBack,
    /// The player switched the interface language.
    ChangeLocale(LocaleCode),
}

/// Scene identifiers the system needs to recognise screen changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    map_menu_scene: SceneId,
    loadout_scene: SceneId,
}

impl Config {
    /// Creates a new configuration naming both menu scenes.
    #[must_use]
    pub const fn new(map_menu_scene: SceneId, loadout_scene: SceneId) -> Self {
        Self {
            map_menu_scene,
            loadout_scene,
        }
    }
}

/// Menu-flow system that gates user actions by the active screen.
#[derive(Clone, Debug)]
pub struct MenuFlow {
    map_menu_scene: SceneId,
    loadout_scene: SceneId,
    screen: Screen,
    active_weapon: Option<WeaponId>,
}

impl MenuFlow {
    /// Creates a new system instance starting on the map menu.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            map_menu_scene: config.map_menu_scene,
            loadout_scene: config.loadout_scene,
            screen: Screen::MapMenu,
            active_weapon: None,
        }
    }

    /// Screen the system currently considers on display.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Consumes session events and adapter-captured actions to emit commands.
    ///
    /// Events are folded first so that actions in the same pump are judged
    /// against the screen the player actually sees.
    pub fn handle(&mut self, events: &[Event], actions: &[UserAction], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SceneRequested { scene } => {
                    self.screen = if *scene == self.map_menu_scene {
                        Screen::MapMenu
                    } else if *scene == self.loadout_scene {
                        Screen::Loadout
                    } else {
                        Screen::InMap
                    };
                }
                Event::WeaponSelected { weapon } => {
                    self.active_weapon = Some(*weapon);
                }
                _ => {}
            }
        }

        for action in actions {
            if let Some(command) = self.translate(action) {
                out.push(command);
            }
        }
    }

    fn translate(&self, action: &UserAction) -> Option<Command> {
        match action {
            UserAction::SelectLevel { map, choice } => {
                (self.screen == Screen::MapMenu).then(|| Command::SelectLevel {
                    map: *map,
                    choice: *choice,
                })
            }
            // Card body and play button share the same start rules.
            UserAction::ClickMapCard(map) | UserAction::ClickPlay(map) => {
                (self.screen == Screen::MapMenu).then(|| Command::StartGame { map: *map })
            }
            UserAction::ClickWeaponCard(weapon) => {
                (self.screen == Screen::Loadout).then(|| Command::SelectWeapon { weapon: *weapon })
            }
            UserAction::ClickUpgrade(track) => {
                if self.screen != Screen::Loadout {
                    return None;
                }
                let weapon = self.active_weapon?;
                Some(Command::UpgradeWeapon {
                    weapon,
                    track: *track,
                })
            }
            UserAction::ClickDone => (self.screen == Screen::Loadout).then_some(Command::ConfirmLoadout),
            UserAction::ClickBack => (self.screen == Screen::Loadout).then_some(Command::LeaveLoadout),
            UserAction::ChangeLocale(locale) => Some(Command::SetLocale {
                locale: locale.clone(),
            }),
        }
    }
}
