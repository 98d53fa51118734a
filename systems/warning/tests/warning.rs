use std::time::Duration;

use frontline_core::{
    Command, Difficulty, Event, LevelChoice, MapDefinition, MapId, SceneId, WeaponStats,
};
use frontline_session::{apply, Session};
use frontline_system_warning::{BannerVisibility, Config, LevelWarning};

fn configured_session() -> Session {
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
                    name: "Trap Cave".to_owned(),
                    label_key: String::new(),
                    scene: SceneId::new("Map_2"),
                    artwork: String::new(),
                    locked: false,
                },
            ],
            weapons: vec![frontline_core::WeaponDefinition {
                name: "Ranger".to_owned(),
                artwork: String::new(),
                stats: WeaponStats::new(100.0, 5.0, 10.0, 2.0, 30.0),
                max_level: 6,
            }],
        },
        &mut events,
    );
    session
}

fn run(session: &mut Session, warning: &mut LevelWarning, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(session, command, &mut events);
    warning.handle(&events);
    events
}

#[test]
fn refused_start_shows_the_banner_until_the_timers_elapse() {
    let mut session = configured_session();
    let mut warning = LevelWarning::new(Config::new(
        Duration::from_millis(1000),
        Duration::from_millis(500),
    ));
    assert!(!warning.is_visible());

    let events = run(&mut session, &mut warning, Command::StartGame { map: MapId::new(0) });
    assert!(matches!(
        events.as_slice(),
        [Event::GameStartRejected { .. }]
    ));
    assert_eq!(warning.visibility(), BannerVisibility::Visible { alpha: 1.0 });

    // Display period: fully opaque.
    let _ = run(
        &mut session,
        &mut warning,
        Command::Tick {
            dt: Duration::from_millis(900),
        },
    );
    assert_eq!(warning.visibility(), BannerVisibility::Visible { alpha: 1.0 });

    // One tick spanning the display boundary spills into the fade.
    let _ = run(
        &mut session,
        &mut warning,
        Command::Tick {
            dt: Duration::from_millis(350),
        },
    );
    match warning.visibility() {
        BannerVisibility::Visible { alpha } => {
            assert!((alpha - 0.5).abs() < 1e-4, "unexpected alpha {alpha}");
        }
        BannerVisibility::Hidden => panic!("banner hid during the fade"),
    }

    let _ = run(
        &mut session,
        &mut warning,
        Command::Tick {
            dt: Duration::from_millis(250),
        },
    );
    assert_eq!(warning.visibility(), BannerVisibility::Hidden);

    // Further time never re-shows the banner.
    let _ = run(
        &mut session,
        &mut warning,
        Command::Tick {
            dt: Duration::from_secs(5),
        },
    );
    assert_eq!(warning.visibility(), BannerVisibility::Hidden);
}

#[test]
fn a_valid_selection_hides_the_banner_immediately() {
    let mut session = configured_session();
    let mut warning = LevelWarning::default();
    let map = MapId::new(0);

    let _ = run(&mut session, &mut warning, Command::StartGame { map });
    assert!(warning.is_visible());

    let _ = run(
        &mut session,
        &mut warning,
        Command::SelectLevel {
            map,
            choice: LevelChoice::Chosen(Difficulty::Normal),
        },
    );
    assert_eq!(warning.visibility(), BannerVisibility::Hidden);
}

#[test]
fn selections_on_other_cards_do_not_dismiss_the_banner() {
    let mut session = configured_session();
    let mut warning = LevelWarning::default();

    let _ = run(
        &mut session,
        &mut warning,
        Command::StartGame { map: MapId::new(0) },
    );
    assert!(warning.is_visible());

    let _ = run(
        &mut session,
        &mut warning,
        Command::SelectLevel {
            map: MapId::new(1),
            choice: LevelChoice::Chosen(Difficulty::Superhard),
        },
    );
    assert!(warning.is_visible());
}

#[test]
fn retriggering_restarts_the_timer_instead_of_stacking() {
    let mut session = configured_session();
    let mut warning = LevelWarning::new(Config::new(
        Duration::from_millis(1000),
        Duration::from_millis(500),
    ));
    let map = MapId::new(0);

    let _ = run(&mut session, &mut warning, Command::StartGame { map });
    let _ = run(
        &mut session,
        &mut warning,
        Command::Tick {
            dt: Duration::from_millis(950),
        },
    );

    // A second refused click restarts the display period from the top.
    let _ = run(&mut session, &mut warning, Command::StartGame { map });
    let _ = run(
        &mut session,
        &mut warning,
        Command::Tick {
            dt: Duration::from_millis(900),
        },
    );
    assert_eq!(warning.visibility(), BannerVisibility::Visible { alpha: 1.0 });
}

#[test]
fn an_unselection_does_not_dismiss_the_banner() {
    let mut session = configured_session();
    let mut warning = LevelWarning::default();
    let map = MapId::new(1);

    // Choose, then reset to unselected, then fail to start: banner shows.
    let _ = run(
        &mut session,
        &mut warning,
        Command::SelectLevel {
            map,
            choice: LevelChoice::Chosen(Difficulty::Normal),
        },
    );
    let _ = run(
        &mut session,
        &mut warning,
        Command::SelectLevel {
            map,
            choice: LevelChoice::Unselected,
        },
    );
    let _ = run(&mut session, &mut warning, Command::StartGame { map });
    assert!(warning.is_visible());

    // Resetting again emits nothing selected, so the banner stays.
    let _ = run(
        &mut session,
        &mut warning,
        Command::SelectLevel {
            map,
            choice: LevelChoice::Unselected,
        },
    );
    assert!(warning.is_visible());
}
