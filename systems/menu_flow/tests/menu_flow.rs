use frontline_core::{
    Command, CurrencyTrack, Difficulty, Event, LevelChoice, LocaleCode, MapDefinition, MapId,
    SceneId, WeaponDefinition, WeaponId, WeaponStats,
};
use frontline_session::{apply, Session};
use frontline_system_menu_flow::{Config, MenuFlow, Screen, UserAction};

fn boot() -> (Session, MenuFlow, Vec<Event>) {
    let mut session = Session::new();
    let mut events = Vec::new();
    apply(
        &mut session,
        Command::ConfigureMenu {
            map_menu_scene: SceneId::new("Map Menu"),
            loadout_scene: SceneId::new("Weapon Menu"),
            maps: vec![
                MapDefinition {
                    name: "Dungeon Explorer".to_owned(),
                    label_key: String::new(),
                    scene: SceneId::new("Map_1"),
                    artwork: String::new(),
                    locked: false,
                },
                MapDefinition {
                    name: "Shutter Island".to_owned(),
                    label_key: String::new(),
                    scene: SceneId::new("Map_3"),
                    artwork: String::new(),
                    locked: true,
                },
            ],
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
    let flow = MenuFlow::new(Config::new(
        SceneId::new("Map Menu"),
        SceneId::new("Weapon Menu"),
    ));
    (session, flow, events)
}

/// Feeds pending events plus the provided actions through the flow and the
/// session, returning the freshly emitted events.
fn pump(
    session: &mut Session,
    flow: &mut MenuFlow,
    pending: &[Event],
    actions: &[UserAction],
) -> Vec<Event> {
    let mut commands = Vec::new();
    flow.handle(pending, actions, &mut commands);
    let mut events = Vec::new();
    for command in commands {
        apply(session, command, &mut events);
    }
    events
}

#[test]
fn starting_a_map_walks_through_the_loadout_screen() {
    let (mut session, mut flow, boot_events) = boot();
    let map = MapId::new(0);

    let events = pump(
        &mut session,
        &mut flow,
        &boot_events,
        &[
            UserAction::SelectLevel {
                map,
                choice: LevelChoice::Chosen(Difficulty::Normal),
            },
            UserAction::ClickPlay(map),
        ],
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::MapCommitted { .. })));

    let events = pump(&mut session, &mut flow, &events, &[]);
    assert_eq!(flow.screen(), Screen::Loadout);
    assert!(events.is_empty());

    let events = pump(&mut session, &mut flow, &[], &[UserAction::ClickDone]);
    assert_eq!(
        events,
        vec![Event::SceneRequested {
            scene: SceneId::new("Map_1"),
        }]
    );

    let _ = pump(&mut session, &mut flow, &events, &[]);
    assert_eq!(flow.screen(), Screen::InMap);
}

#[test]
fn loadout_actions_are_dropped_while_the_map_menu_is_shown() {
    let (mut session, mut flow, boot_events) = boot();

    let events = pump(
        &mut session,
        &mut flow,
        &boot_events,
        &[
            UserAction::ClickDone,
            UserAction::ClickBack,
            UserAction::ClickUpgrade(CurrencyTrack::Credits),
            UserAction::ClickWeaponCard(WeaponId::new(1)),
        ],
    );

    assert!(events.is_empty());
}

#[test]
fn map_actions_are_dropped_while_the_loadout_is_shown() {
    let (mut session, mut flow, boot_events) = boot();
    let map = MapId::new(0);

    let events = pump(
        &mut session,
        &mut flow,
        &boot_events,
        &[
            UserAction::SelectLevel {
                map,
                choice: LevelChoice::Chosen(Difficulty::Superhard),
            },
            UserAction::ClickMapCard(map),
        ],
    );
    let _ = pump(&mut session, &mut flow, &events, &[]);
    assert_eq!(flow.screen(), Screen::Loadout);

    let events = pump(
        &mut session,
        &mut flow,
        &[],
        &[UserAction::ClickPlay(map), UserAction::ClickMapCard(map)],
    );
    assert!(events.is_empty());
}

#[test]
fn clicks_on_locked_cards_reach_the_session_and_are_rejected_there() {
    let (mut session, mut flow, boot_events) = boot();
    let locked = MapId::new(1);

    let events = pump(
        &mut session,
        &mut flow,
        &boot_events,
        &[UserAction::ClickMapCard(locked)],
    );

    assert!(matches!(
        events.as_slice(),
        [Event::GameStartRejected { map, .. }] if *map == locked
    ));
}

#[test]
fn upgrades_target_the_weapon_highlighted_by_the_session() {
    let (mut session, mut flow, boot_events) = boot();
    let map = MapId::new(0);

    let events = pump(
        &mut session,
        &mut flow,
        &boot_events,
        &[
            UserAction::SelectLevel {
                map,
                choice: LevelChoice::Chosen(Difficulty::Normal),
            },
            UserAction::ClickPlay(map),
        ],
    );
    let _ = pump(&mut session, &mut flow, &events, &[]);

    let events = pump(
        &mut session,
        &mut flow,
        &[],
        &[UserAction::ClickWeaponCard(WeaponId::new(1))],
    );
    let events = pump(
        &mut session,
        &mut flow,
        &events,
        &[UserAction::ClickUpgrade(CurrencyTrack::Tokens)],
    );

    assert_eq!(
        events,
        vec![Event::WeaponUpgraded {
            weapon: WeaponId::new(1),
            upgrade_count: 1,
        }]
    );
}

#[test]
fn locale_switches_are_legal_on_every_screen() {
    let (mut session, mut flow, boot_events) = boot();

    let events = pump(
        &mut session,
        &mut flow,
        &boot_events,
        &[UserAction::ChangeLocale(LocaleCode::vietnamese_vn())],
    );

    assert_eq!(
        events,
        vec![Event::LocaleChanged {
            locale: LocaleCode::vietnamese_vn(),
        }]
    );
}
