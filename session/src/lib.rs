#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative menu session state for Frontline.
//!
//! The session owns everything the menu flow may mutate: the map catalog,
//! one level selector per map, the selected-map slot bridging the map menu
//! and the loadout menu, the weapon armory with its upgrade ledger, and the
//! active locale. All mutations run through [`apply`], which broadcasts
//! [`Event`] values describing exactly what changed.

use frontline_core::{
    Command, ConfirmRejection, CurrencyTrack, Event, LevelChoice, LocaleCode, MapDefinition,
    MapId, SceneId, StartRejection, WeaponDefinition, WeaponId, WeaponStats,
};

/// One entry of the ordered map catalog.
///
/// Immutable after configuration except the lock flag, which external
/// progression logic clears through [`apply`]-side configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct MapEntry {
    id: MapId,
    name: String,
    label_key: String,
    scene: SceneId,
    artwork: String,
    locked: bool,
}

impl MapEntry {
    fn from_definition(id: MapId, definition: &MapDefinition) -> Self {
        Self {
            id,
            name: definition.name.clone(),
            label_key: definition.display_key().to_owned(),
            scene: definition.scene.clone(),
            artwork: definition.artwork.clone(),
            locked: definition.locked,
        }
    }

    /// Identifier allocated to the entry by the session.
    #[must_use]
    pub const fn id(&self) -> MapId {
        self.id
    }

    /// Display name shown when no localization entry exists.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Localization key of the card title.
    #[must_use]
    pub fn display_key(&self) -> &str {
        &self.label_key
    }

    /// Scene the map transitions into when the game starts.
    #[must_use]
    pub const fn scene(&self) -> &SceneId {
        &self.scene
    }

    /// Opaque artwork handle resolved by the host environment.
    #[must_use]
    pub fn artwork(&self) -> &str {
        &self.artwork
    }

    /// Whether progression still locks the map.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Tracks the difficulty choice made for one map.
///
/// The selector starts unselected regardless of how an underlying widget
/// indexes its options; a widget's zero-index default never counts as a
/// player choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelSelector {
    choice: LevelChoice,
}

impl LevelSelector {
    /// Creates a selector holding the unselected state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            choice: LevelChoice::Unselected,
        }
    }

    /// Replaces the held value, reporting whether it actually changed.
    pub fn set(&mut self, choice: LevelChoice) -> bool {
        if self.choice == choice {
            return false;
        }
        self.choice = choice;
        true
    }

    /// Reports whether the selector holds an actual difficulty.
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.choice.is_selected()
    }

    /// Value the selector currently holds.
    #[must_use]
    pub const fn current(&self) -> LevelChoice {
        self.choice
    }
}

/// Process-scoped slot holding the scene of the most recently committed map.
///
/// Written by a successful start request, read by the loadout confirmation,
/// overwritten by the next successful start. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedMapContext {
    scene: Option<SceneId>,
}

impl SelectedMapContext {
    /// Creates an empty slot, the state at every session start.
    #[must_use]
    pub const fn new() -> Self {
        Self { scene: None }
    }

    fn set(&mut self, scene: SceneId) {
        self.scene = Some(scene);
    }

    /// Scene recorded by the last committed map, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneId> {
        self.scene.as_ref()
    }

    /// Reports whether a map has been committed this session.
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.scene.is_some()
    }

    /// Empties the slot.
    pub fn clear(&mut self) {
        self.scene = None;
    }
}

/// One weapon of the armory together with its upgrade progress.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponEntry {
    id: WeaponId,
    name: String,
    artwork: String,
    stats: WeaponStats,
    upgrade_count: u32,
    max_level: u32,
}

impl WeaponEntry {
    fn from_definition(id: WeaponId, definition: &WeaponDefinition) -> Self {
        Self {
            id,
            name: definition.name.clone(),
            artwork: definition.artwork.clone(),
            stats: definition.stats,
            upgrade_count: 0,
            max_level: definition.max_level,
        }
    }

    /// Identifier allocated to the weapon by the session.
    #[must_use]
    pub const fn id(&self) -> WeaponId {
        self.id
    }

    /// Display name of the weapon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque artwork handle resolved by the host environment.
    #[must_use]
    pub fn artwork(&self) -> &str {
        &self.artwork
    }

    /// Current stat block including every applied upgrade.
    #[must_use]
    pub const fn stats(&self) -> WeaponStats {
        self.stats
    }

    /// Number of upgrades applied so far.
    #[must_use]
    pub const fn upgrade_count(&self) -> u32 {
        self.upgrade_count
    }

    /// Maximum level the weapon can reach; the base level is 1.
    #[must_use]
    pub const fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Current level derived from the upgrade count.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.upgrade_count + 1
    }

    /// Reports whether another upgrade fits under the level cap.
    #[must_use]
    pub const fn can_upgrade(&self) -> bool {
        self.upgrade_count + 1 < self.max_level
    }

    /// Applies one upgrade, all attributes together, reporting success.
    ///
    /// Returns `false` without touching any state once the level cap is
    /// reached; hitting the cap is a capacity limit, not an error.
    fn upgrade(&mut self) -> bool {
        if !self.can_upgrade() {
            return false;
        }
        self.stats = self.stats.upgraded();
        self.upgrade_count += 1;
        true
    }
}

/// Running upgrade cost pair for the active weapon.
///
/// Rebased from the weapon's upgrade count whenever the active selection
/// changes, and advanced by both steps after every successful upgrade of the
/// active weapon, no matter which track paid for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeLedger {
    credits: u32,
    tokens: u32,
}

impl Default for UpgradeLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgradeLedger {
    /// Creates a ledger holding the base cost of both tracks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            credits: CurrencyTrack::Credits.base_cost(),
            tokens: CurrencyTrack::Tokens.base_cost(),
        }
    }

    /// Recomputes both running costs from the provided upgrade count.
    pub fn rebase(&mut self, upgrade_count: u32) {
        self.credits = CurrencyTrack::Credits.base_cost()
            + upgrade_count * CurrencyTrack::Credits.cost_step();
        self.tokens =
            CurrencyTrack::Tokens.base_cost() + upgrade_count * CurrencyTrack::Tokens.cost_step();
    }

    /// Raises both running costs by their respective step.
    pub fn advance(&mut self) {
        self.credits += CurrencyTrack::Credits.cost_step();
        self.tokens += CurrencyTrack::Tokens.cost_step();
    }

    /// Cost of the next upgrade on the provided track.
    #[must_use]
    pub const fn cost(&self, track: CurrencyTrack) -> u32 {
        match track {
            CurrencyTrack::Credits => self.credits,
            CurrencyTrack::Tokens => self.tokens,
        }
    }
}

/// Authoritative state of the menu flow.
#[derive(Debug)]
pub struct Session {
    map_menu_scene: SceneId,
    loadout_scene: SceneId,
    maps: Vec<MapEntry>,
    selectors: Vec<LevelSelector>,
    selected: SelectedMapContext,
    weapons: Vec<WeaponEntry>,
    active_weapon: Option<WeaponId>,
    ledger: UpgradeLedger,
    locale: LocaleCode,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an unconfigured session with an empty catalog and armory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map_menu_scene: SceneId::new(""),
            loadout_scene: SceneId::new(""),
            maps: Vec::new(),
            selectors: Vec::new(),
            selected: SelectedMapContext::new(),
            weapons: Vec::new(),
            active_weapon: None,
            ledger: UpgradeLedger::new(),
            locale: LocaleCode::english_us(),
        }
    }

    fn map_index(&self, map: MapId) -> Option<usize> {
        self.maps.iter().position(|entry| entry.id() == map)
    }

    fn weapon_index(&self, weapon: WeaponId) -> Option<usize> {
        self.weapons.iter().position(|entry| entry.id() == weapon)
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMenu {
            map_menu_scene,
            loadout_scene,
            maps,
            weapons,
        } => {
            session.map_menu_scene = map_menu_scene;
            session.loadout_scene = loadout_scene;
            session.maps = maps
                .iter()
                .enumerate()
                .map(|(index, definition)| {
                    MapEntry::from_definition(MapId::new(index as u32), definition)
                })
                .collect();
            session.selectors = vec![LevelSelector::new(); session.maps.len()];
            session.selected.clear();
            session.weapons = weapons
                .iter()
                .enumerate()
                .map(|(index, definition)| {
                    WeaponEntry::from_definition(WeaponId::new(index as u32), definition)
                })
                .collect();

            out_events.push(Event::MenuConfigured {
                maps: session.maps.len(),
                weapons: session.weapons.len(),
            });

            // The loadout menu opens with the first weapon highlighted.
            session.active_weapon = session.weapons.first().map(WeaponEntry::id);
            session.ledger = UpgradeLedger::new();
            if let Some(weapon) = session.active_weapon {
                out_events.push(Event::WeaponSelected { weapon });
            }
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SelectLevel { map, choice } => {
            let Some(index) = session.map_index(map) else {
                return;
            };
            if session.selectors[index].set(choice) {
                out_events.push(Event::LevelSelected { map, choice });
            }
        }
        Command::StartGame { map } => {
            let Some(index) = session.map_index(map) else {
                out_events.push(Event::GameStartRejected {
                    map,
                    reason: StartRejection::UnknownMap,
                });
                return;
            };
            let entry = &session.maps[index];
            if entry.is_locked() {
                out_events.push(Event::GameStartRejected {
                    map,
                    reason: StartRejection::MapLocked,
                });
                return;
            }
            if !session.selectors[index].has_selection() {
                out_events.push(Event::GameStartRejected {
                    map,
                    reason: StartRejection::LevelNotSelected,
                });
                return;
            }
            // A map without a configured scene is not startable.
            if entry.scene().is_empty() {
                out_events.push(Event::GameStartRejected {
                    map,
                    reason: StartRejection::UnknownMap,
                });
                return;
            }

            let scene = entry.scene().clone();
            session.selected.set(scene.clone());
            out_events.push(Event::MapCommitted { map, scene });
            out_events.push(Event::SceneRequested {
                scene: session.loadout_scene.clone(),
            });
        }
        Command::ConfirmLoadout => match session.selected.scene() {
            Some(scene) => {
                out_events.push(Event::SceneRequested {
                    scene: scene.clone(),
                });
            }
            None => {
                out_events.push(Event::LoadoutRejected {
                    reason: ConfirmRejection::NoMapSelected,
                });
            }
        },
        Command::LeaveLoadout => {
            out_events.push(Event::SceneRequested {
                scene: session.map_menu_scene.clone(),
            });
        }
        Command::SelectWeapon { weapon } => {
            let Some(index) = session.weapon_index(weapon) else {
                return;
            };
            if session.active_weapon == Some(weapon) {
                return;
            }
            session.active_weapon = Some(weapon);
            session.ledger.rebase(session.weapons[index].upgrade_count());
            out_events.push(Event::WeaponSelected { weapon });
        }
        Command::UpgradeWeapon { weapon, track: _ } => {
            let Some(index) = session.weapon_index(weapon) else {
                return;
            };
            if session.weapons[index].upgrade() {
                // The ledger mirrors the active weapon's upgrade count; an
                // upgrade of a background weapon leaves the displayed costs
                // alone until that weapon is selected and the ledger rebases.
                if session.active_weapon == Some(weapon) {
                    session.ledger.advance();
                }
                out_events.push(Event::WeaponUpgraded {
                    weapon,
                    upgrade_count: session.weapons[index].upgrade_count(),
                });
            }
        }
        Command::SetLocale { locale } => {
            if session.locale == locale {
                return;
            }
            session.locale = locale.clone();
            out_events.push(Event::LocaleChanged { locale });
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::{Session, WeaponEntry};
    use frontline_core::{
        CurrencyTrack, LevelChoice, LocaleCode, MapId, SceneId, WeaponId, WeaponStats,
    };

    /// Scene identifier of the map selection menu.
    #[must_use]
    pub fn map_menu_scene(session: &Session) -> &SceneId {
        &session.map_menu_scene
    }

    /// Scene identifier of the weapon loadout menu.
    #[must_use]
    pub fn loadout_scene(session: &Session) -> &SceneId {
        &session.loadout_scene
    }

    /// Number of entries in the map catalog.
    #[must_use]
    pub fn map_count(session: &Session) -> usize {
        session.maps.len()
    }

    /// Reports the lock state of the identified map.
    #[must_use]
    pub fn is_locked(session: &Session, map: MapId) -> Option<bool> {
        session
            .map_index(map)
            .map(|index| session.maps[index].is_locked())
    }

    /// Value currently held by the identified map's level selector.
    #[must_use]
    pub fn level_choice(session: &Session, map: MapId) -> Option<LevelChoice> {
        session
            .map_index(map)
            .map(|index| session.selectors[index].current())
    }

    /// Scene recorded by the last committed map, if any.
    #[must_use]
    pub fn selected_map_scene(session: &Session) -> Option<&SceneId> {
        session.selected.scene()
    }

    /// Weapon currently highlighted in the loadout menu, if any.
    #[must_use]
    pub fn active_weapon(session: &Session) -> Option<WeaponId> {
        session.active_weapon
    }

    /// Active locale of the menu.
    #[must_use]
    pub fn locale(session: &Session) -> &LocaleCode {
        &session.locale
    }

    /// Cost of the active weapon's next upgrade on the provided track.
    ///
    /// Returns `None` when no weapon is active or the active weapon already
    /// reached its level cap, which the presentation renders as the terminal
    /// max-level indicator.
    #[must_use]
    pub fn upgrade_cost(session: &Session, track: CurrencyTrack) -> Option<u32> {
        let weapon = session.active_weapon?;
        let index = session.weapon_index(weapon)?;
        if !session.weapons[index].can_upgrade() {
            return None;
        }
        Some(session.ledger.cost(track))
    }

    /// Captures a read-only view of the map catalog in display order.
    #[must_use]
    pub fn map_view(session: &Session) -> MapView {
        let snapshots = session
            .maps
            .iter()
            .zip(session.selectors.iter())
            .map(|(entry, selector)| MapSnapshot {
                id: entry.id(),
                name: entry.name().to_owned(),
                display_key: entry.display_key().to_owned(),
                scene: entry.scene().clone(),
                artwork: entry.artwork().to_owned(),
                locked: entry.is_locked(),
                choice: selector.current(),
            })
            .collect();
        MapView { snapshots }
    }

    /// Captures a read-only view of the armory in display order.
    #[must_use]
    pub fn weapon_view(session: &Session) -> WeaponView {
        let snapshots = session
            .weapons
            .iter()
            .map(|entry: &WeaponEntry| WeaponSnapshot {
                id: entry.id(),
                name: entry.name().to_owned(),
                artwork: entry.artwork().to_owned(),
                stats: entry.stats(),
                upgrade_count: entry.upgrade_count(),
                level: entry.level(),
                max_level: entry.max_level(),
                can_upgrade: entry.can_upgrade(),
            })
            .collect();
        WeaponView { snapshots }
    }

    /// Read-only snapshot describing the map catalog.
    #[derive(Clone, Debug, Default)]
    pub struct MapView {
        snapshots: Vec<MapSnapshot>,
    }

    impl MapView {
        /// Iterator over the captured map snapshots in display order.
        pub fn iter(&self) -> impl Iterator<Item = &MapSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<MapSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single map card's state.
    #[derive(Clone, Debug, PartialEq)]
    pub struct MapSnapshot {
        /// Identifier allocated to the entry by the session.
        pub id: MapId,
        /// Display name shown when no localization entry exists.
        pub name: String,
        /// Localization key of the card title.
        pub display_key: String,
        /// Scene the map transitions into when the game starts.
        pub scene: SceneId,
        /// Opaque artwork handle resolved by the host environment.
        pub artwork: String,
        /// Whether progression still locks the map.
        pub locked: bool,
        /// Value held by the card's level selector.
        pub choice: LevelChoice,
    }

    /// Read-only snapshot describing the armory.
    #[derive(Clone, Debug, Default)]
    pub struct WeaponView {
        snapshots: Vec<WeaponSnapshot>,
    }

    impl WeaponView {
        /// Iterator over the captured weapon snapshots in display order.
        pub fn iter(&self) -> impl Iterator<Item = &WeaponSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<WeaponSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single weapon's state.
    #[derive(Clone, Debug, PartialEq)]
    pub struct WeaponSnapshot {
        /// Identifier allocated to the weapon by the session.
        pub id: WeaponId,
        /// Display name of the weapon.
        pub name: String,
        /// Opaque artwork handle resolved by the host environment.
        pub artwork: String,
        /// Current stat block including every applied upgrade.
        pub stats: WeaponStats,
        /// Number of upgrades applied so far.
        pub upgrade_count: u32,
        /// Current level derived from the upgrade count.
        pub level: u32,
        /// Maximum level the weapon can reach.
        pub max_level: u32,
        /// Whether another upgrade fits under the level cap.
        pub can_upgrade: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontline_core::Difficulty;

    fn definitions() -> (Vec<MapDefinition>, Vec<WeaponDefinition>) {
        let maps = vec![
            MapDefinition {
                name: "Dungeon Explorer".to_owned(),
                label_key: "mapCard.DungeonExplorer".to_owned(),
                scene: SceneId::new("Map_1"),
                artwork: String::new(),
                locked: false,
            },
            MapDefinition {
                name: "Shutter Island".to_owned(),
                label_key: "mapCard.ShutterIsland".to_owned(),
                scene: SceneId::new("Map_3"),
                artwork: String::new(),
                locked: true,
            },
        ];
        let weapons = vec![WeaponDefinition {
            name: "Ranger".to_owned(),
            artwork: String::new(),
            stats: WeaponStats::new(100.0, 5.0, 10.0, 2.0, 30.0),
            max_level: 6,
        }];
        (maps, weapons)
    }

    fn configured_session() -> Session {
        let (maps, weapons) = definitions();
        let mut session = Session::new();
        let mut events = Vec::new();
        apply(
            &mut session,
            Command::ConfigureMenu {
                map_menu_scene: SceneId::new("Map Menu"),
                loadout_scene: SceneId::new("Weapon Menu"),
                maps,
                weapons,
            },
            &mut events,
        );
        session
    }

    #[test]
    fn configure_allocates_sequential_ids_and_highlights_first_weapon() {
        let (maps, weapons) = definitions();
        let mut session = Session::new();
        let mut events = Vec::new();
        apply(
            &mut session,
            Command::ConfigureMenu {
                map_menu_scene: SceneId::new("Map Menu"),
                loadout_scene: SceneId::new("Weapon Menu"),
                maps,
                weapons,
            },
            &mut events,
        );

        let snapshots = query::map_view(&session).into_vec();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].id, MapId::new(0));
        assert_eq!(snapshots[1].id, MapId::new(1));
        assert_eq!(
            events,
            vec![
                Event::MenuConfigured {
                    maps: 2,
                    weapons: 1
                },
                Event::WeaponSelected {
                    weapon: WeaponId::new(0)
                },
            ]
        );
        assert_eq!(query::active_weapon(&session), Some(WeaponId::new(0)));
    }

    #[test]
    fn selectors_start_unselected_after_configuration() {
        let session = configured_session();
        for snapshot in query::map_view(&session).iter() {
            assert_eq!(snapshot.choice, LevelChoice::Unselected);
        }
    }

    #[test]
    fn repeated_selection_emits_a_single_event() {
        let mut session = configured_session();
        let mut events = Vec::new();
        let choice = LevelChoice::Chosen(Difficulty::Normal);

        apply(
            &mut session,
            Command::SelectLevel {
                map: MapId::new(0),
                choice,
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::SelectLevel {
                map: MapId::new(0),
                choice,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::LevelSelected {
                map: MapId::new(0),
                choice,
            }]
        );
    }

    #[test]
    fn resetting_a_selector_is_a_distinct_change() {
        let mut session = configured_session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::SelectLevel {
                map: MapId::new(0),
                choice: LevelChoice::Chosen(Difficulty::Superhard),
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::SelectLevel {
                map: MapId::new(0),
                choice: LevelChoice::Unselected,
            },
            &mut events,
        );

        assert_eq!(events.len(), 2);
        assert_eq!(
            query::level_choice(&session, MapId::new(0)),
            Some(LevelChoice::Unselected)
        );
    }

    #[test]
    fn start_refuses_unknown_maps() {
        let mut session = configured_session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::StartGame {
                map: MapId::new(99),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::GameStartRejected {
                map: MapId::new(99),
                reason: StartRejection::UnknownMap,
            }]
        );
        assert!(query::selected_map_scene(&session).is_none());
    }

    #[test]
    fn start_refuses_locked_maps_regardless_of_selector_state() {
        let mut session = configured_session();
        let mut events = Vec::new();
        let locked = MapId::new(1);

        apply(
            &mut session,
            Command::SelectLevel {
                map: locked,
                choice: LevelChoice::Chosen(Difficulty::Normal),
            },
            &mut events,
        );
        events.clear();
        apply(&mut session, Command::StartGame { map: locked }, &mut events);

        assert_eq!(
            events,
            vec![Event::GameStartRejected {
                map: locked,
                reason: StartRejection::MapLocked,
            }]
        );
        assert!(query::selected_map_scene(&session).is_none());
    }

    #[test]
    fn start_requires_a_level_selection_before_committing() {
        let mut session = configured_session();
        let mut events = Vec::new();
        let map = MapId::new(0);

        apply(&mut session, Command::StartGame { map }, &mut events);
        assert_eq!(
            events,
            vec![Event::GameStartRejected {
                map,
                reason: StartRejection::LevelNotSelected,
            }]
        );
        assert!(query::selected_map_scene(&session).is_none());

        events.clear();
        apply(
            &mut session,
            Command::SelectLevel {
                map,
                choice: LevelChoice::Chosen(Difficulty::Normal),
            },
            &mut events,
        );
        apply(&mut session, Command::StartGame { map }, &mut events);

        assert_eq!(
            events,
            vec![
                Event::LevelSelected {
                    map,
                    choice: LevelChoice::Chosen(Difficulty::Normal),
                },
                Event::MapCommitted {
                    map,
                    scene: SceneId::new("Map_1"),
                },
                Event::SceneRequested {
                    scene: SceneId::new("Weapon Menu"),
                },
            ]
        );
        assert_eq!(
            query::selected_map_scene(&session),
            Some(&SceneId::new("Map_1"))
        );
    }

    #[test]
    fn confirm_refuses_when_no_map_was_committed() {
        let mut session = configured_session();
        let mut events = Vec::new();

        apply(&mut session, Command::ConfirmLoadout, &mut events);

        assert_eq!(
            events,
            vec![Event::LoadoutRejected {
                reason: ConfirmRejection::NoMapSelected,
            }]
        );
    }

    #[test]
    fn confirm_requests_the_recorded_scene_and_keeps_the_slot() {
        let mut session = configured_session();
        let mut events = Vec::new();
        let map = MapId::new(0);

        apply(
            &mut session,
            Command::SelectLevel {
                map,
                choice: LevelChoice::Chosen(Difficulty::Superhard),
            },
            &mut events,
        );
        apply(&mut session, Command::StartGame { map }, &mut events);
        events.clear();

        apply(&mut session, Command::ConfirmLoadout, &mut events);
        assert_eq!(
            events,
            vec![Event::SceneRequested {
                scene: SceneId::new("Map_1"),
            }]
        );
        assert_eq!(
            query::selected_map_scene(&session),
            Some(&SceneId::new("Map_1"))
        );
    }

    #[test]
    fn leaving_the_loadout_returns_to_the_map_menu() {
        let mut session = configured_session();
        let mut events = Vec::new();

        apply(&mut session, Command::LeaveLoadout, &mut events);

        assert_eq!(
            events,
            vec![Event::SceneRequested {
                scene: SceneId::new("Map Menu"),
            }]
        );
    }

    #[test]
    fn upgrades_stop_silently_at_the_level_cap() {
        let mut session = configured_session();
        let mut events = Vec::new();
        let weapon = WeaponId::new(0);

        for expected_count in 1..=5 {
            apply(
                &mut session,
                Command::UpgradeWeapon {
                    weapon,
                    track: CurrencyTrack::Credits,
                },
                &mut events,
            );
            assert_eq!(
                events.pop(),
                Some(Event::WeaponUpgraded {
                    weapon,
                    upgrade_count: expected_count,
                })
            );
        }

        let before = query::weapon_view(&session).into_vec();
        apply(
            &mut session,
            Command::UpgradeWeapon {
                weapon,
                track: CurrencyTrack::Tokens,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::weapon_view(&session).into_vec(), before);
        assert_eq!(before[0].upgrade_count, 5);
        assert!(!before[0].can_upgrade);
    }

    #[test]
    fn ledger_costs_grow_by_their_steps_after_upgrades() {
        let mut session = configured_session();
        let mut events = Vec::new();
        let weapon = WeaponId::new(0);

        assert_eq!(
            query::upgrade_cost(&session, CurrencyTrack::Credits),
            Some(2000)
        );
        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Tokens), Some(3));

        for _ in 0..2 {
            apply(
                &mut session,
                Command::UpgradeWeapon {
                    weapon,
                    track: CurrencyTrack::Credits,
                },
                &mut events,
            );
        }

        assert_eq!(
            query::upgrade_cost(&session, CurrencyTrack::Credits),
            Some(3000)
        );
        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Tokens), Some(7));
    }

    #[test]
    fn cost_query_reports_the_terminal_state_at_max_level() {
        let mut session = configured_session();
        let mut events = Vec::new();
        let weapon = WeaponId::new(0);

        for _ in 0..5 {
            apply(
                &mut session,
                Command::UpgradeWeapon {
                    weapon,
                    track: CurrencyTrack::Tokens,
                },
                &mut events,
            );
        }

        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Credits), None);
        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Tokens), None);
    }

    fn two_weapon_session() -> Session {
        let mut session = Session::new();
        let mut events = Vec::new();
        apply(
            &mut session,
            Command::ConfigureMenu {
                map_menu_scene: SceneId::new("Map Menu"),
                loadout_scene: SceneId::new("Weapon Menu"),
                maps: Vec::new(),
                weapons: vec![
                    WeaponDefinition {
                        name: "Ranger".to_owned(),
                        artwork: String::new(),
                        stats: WeaponStats::new(100.0, 5.0, 10.0, 2.0, 30.0),
                        max_level: 6,
                    },
                    WeaponDefinition {
                        name: "Marauder".to_owned(),
                        artwork: String::new(),
                        stats: WeaponStats::new(55.0, 3.0, 12.0, 1.5, 24.0),
                        max_level: 6,
                    },
                ],
            },
            &mut events,
        );
        session
    }

    #[test]
    fn selecting_a_weapon_rebases_the_ledger_to_its_upgrade_count() {
        let mut session = two_weapon_session();
        let mut events = Vec::new();

        for _ in 0..2 {
            apply(
                &mut session,
                Command::UpgradeWeapon {
                    weapon: WeaponId::new(0),
                    track: CurrencyTrack::Credits,
                },
                &mut events,
            );
        }
        assert_eq!(
            query::upgrade_cost(&session, CurrencyTrack::Credits),
            Some(3000)
        );
        events.clear();

        apply(
            &mut session,
            Command::SelectWeapon {
                weapon: WeaponId::new(1),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::WeaponSelected {
                weapon: WeaponId::new(1),
            }]
        );
        assert_eq!(
            query::upgrade_cost(&session, CurrencyTrack::Credits),
            Some(2000)
        );
        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Tokens), Some(3));

        apply(
            &mut session,
            Command::SelectWeapon {
                weapon: WeaponId::new(0),
            },
            &mut events,
        );
        assert_eq!(
            query::upgrade_cost(&session, CurrencyTrack::Credits),
            Some(3000)
        );
        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Tokens), Some(7));
    }

    #[test]
    fn reselection_and_unknown_weapon_ids_emit_nothing() {
        let mut session = two_weapon_session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::SelectWeapon {
                weapon: WeaponId::new(0),
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::SelectWeapon {
                weapon: WeaponId::new(9),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::active_weapon(&session), Some(WeaponId::new(0)));
    }

    #[test]
    fn upgrading_a_background_weapon_leaves_the_displayed_cost_alone() {
        let mut session = two_weapon_session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::UpgradeWeapon {
                weapon: WeaponId::new(1),
                track: CurrencyTrack::Credits,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::WeaponUpgraded {
                weapon: WeaponId::new(1),
                upgrade_count: 1,
            }]
        );
        // Weapon 0 is still active, so the costs stay at its base pair.
        assert_eq!(
            query::upgrade_cost(&session, CurrencyTrack::Credits),
            Some(2000)
        );
        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Tokens), Some(3));

        // Selecting the upgraded weapon rebases to its one applied upgrade.
        apply(
            &mut session,
            Command::SelectWeapon {
                weapon: WeaponId::new(1),
            },
            &mut events,
        );
        assert_eq!(
            query::upgrade_cost(&session, CurrencyTrack::Credits),
            Some(2500)
        );
        assert_eq!(query::upgrade_cost(&session, CurrencyTrack::Tokens), Some(5));
    }

    #[test]
    fn locale_changes_emit_only_on_distinct_values() {
        let mut session = configured_session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::SetLocale {
                locale: LocaleCode::english_us(),
            },
            &mut events,
        );
        assert!(events.is_empty());

        apply(
            &mut session,
            Command::SetLocale {
                locale: LocaleCode::vietnamese_vn(),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::LocaleChanged {
                locale: LocaleCode::vietnamese_vn(),
            }]
        );
        assert_eq!(query::locale(&session), &LocaleCode::vietnamese_vn());
    }
}
