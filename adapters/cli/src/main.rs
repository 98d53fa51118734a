#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Frontline menu flow.
//!
//! The binary wires the full pipeline together: bootstrap derives the boot
//! commands, the session executes commands and broadcasts events, the
//! menu-flow system gates text-command actions by the active screen, and the
//! warning system tracks the level banner. Each accepted input line is one
//! pump of that pipeline; session events print as the transcript of what
//! happened.

use std::{
    fs,
    io::{self, BufRead},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use frontline_core::{
    Command, CurrencyTrack, Difficulty, Event, LevelChoice, LocaleCode, MapId, SceneId, WeaponId,
    WELCOME_BANNER,
};
use frontline_localization::{LocalePreference, StringCatalog};
use frontline_presentation::{compose_loadout, compose_map_menu, SceneDirector};
use frontline_session::{apply, Session};
use frontline_system_bootstrap::{Bootstrap, MenuConfig};
use frontline_system_menu_flow::{Config as FlowConfig, MenuFlow, Screen, UserAction};
use frontline_system_warning::{Config as WarningConfig, LevelWarning};

/// Command-line interface for the Frontline menu.
#[derive(Debug, Parser)]
#[command(name = "frontline", about = "Drives the Frontline menu flow from a terminal")]
struct Cli {
    /// Path of a TOML menu configuration; the built-in roster applies when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Locale to activate at boot, overriding the saved preference.
    #[arg(long)]
    locale: Option<String>,

    /// Path of the locale preference file.
    #[arg(long, default_value = "frontline-prefs.toml")]
    prefs: PathBuf,

    /// Script of input lines to run instead of reading stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

/// Scene director that reports transitions on stdout.
#[derive(Debug, Default)]
struct PrintingDirector;

impl SceneDirector for PrintingDirector {
    fn load_scene(&mut self, scene: &SceneId) {
        println!("scene: loading '{}'", scene.as_str());
    }
}

/// One parsed input line.
enum Input {
    Action(UserAction),
    Tick(u64),
    Show,
    ShowLoadout,
    Help,
    Quit,
}

struct Driver {
    session: Session,
    flow: MenuFlow,
    warning: LevelWarning,
    catalog: StringCatalog,
    prefs: LocalePreference,
    director: PrintingDirector,
    // Events of the previous pump, folded into the systems on the next one.
    pending: Vec<Event>,
}

impl Driver {
    fn new(config: &MenuConfig, catalog: StringCatalog, prefs: LocalePreference) -> Self {
        Self {
            session: Session::new(),
            flow: MenuFlow::new(FlowConfig::new(
                config.map_menu_scene.clone(),
                config.loadout_scene.clone(),
            )),
            warning: LevelWarning::new(WarningConfig::new(
                Duration::from_millis(config.warning.display_ms),
                Duration::from_millis(config.warning.fade_ms),
            )),
            catalog,
            prefs,
            director: PrintingDirector,
            pending: Vec::new(),
        }
    }

    fn boot(&mut self, config: &MenuConfig) {
        self.run_commands(Bootstrap::default().commands(config));
    }

    /// Runs one pipeline pump: fold pending events, translate actions, apply.
    fn pump(&mut self, actions: Vec<UserAction>, direct: Vec<Command>) {
        let mut commands = direct;
        self.flow.handle(&self.pending, &actions, &mut commands);
        self.pending.clear();
        self.run_commands(commands);
    }

    fn run_commands(&mut self, commands: Vec<Command>) {
        let mut events = Vec::new();
        for command in commands {
            apply(&mut self.session, command, &mut events);
        }
        self.warning.handle(&events);
        for event in &events {
            self.react(event);
        }
        self.pending.extend(events);
    }

    fn react(&mut self, event: &Event) {
        match event {
            Event::MenuConfigured { maps, weapons } => {
                println!("event: configured {maps} maps, {weapons} weapons");
            }
            Event::LevelSelected { map, choice } => {
                println!(
                    "event: map {} level set to {}",
                    map.get(),
                    describe_choice(*choice)
                );
            }
            Event::GameStartRejected { map, reason } => {
                println!("event: start of map {} rejected ({reason:?})", map.get());
            }
            Event::MapCommitted { map, scene } => {
                println!(
                    "event: map {} committed, scene '{}' armed",
                    map.get(),
                    scene.as_str()
                );
            }
            Event::SceneRequested { scene } => {
                self.director.load_scene(scene);
            }
            Event::LoadoutRejected { reason } => {
                println!("event: loadout confirmation rejected ({reason:?})");
            }
            Event::WeaponSelected { weapon } => {
                println!("event: weapon {} selected", weapon.get());
            }
            Event::WeaponUpgraded {
                weapon,
                upgrade_count,
            } => {
                println!(
                    "event: weapon {} upgraded ({upgrade_count} upgrades applied)",
                    weapon.get()
                );
            }
            Event::LocaleChanged { locale } => {
                println!("event: locale changed to {}", locale.as_str());
                if let Err(error) = self.prefs.save(locale) {
                    eprintln!("warning: locale preference not saved: {error:#}");
                }
            }
            Event::TimeAdvanced { .. } => {}
        }
    }

    fn render(&self) {
        // Fold pending events first so the printed screen matches the state.
        match self.peek_screen() {
            Screen::MapMenu => self.render_map_menu(),
            Screen::Loadout => self.render_loadout(),
            Screen::InMap => println!("(in map; the menu flow is dormant)"),
        }
    }

    fn peek_screen(&self) -> Screen {
        let mut flow = self.flow.clone();
        let mut sink = Vec::new();
        flow.handle(&self.pending, &[], &mut sink);
        flow.screen()
    }

    fn render_map_menu(&self) {
        let view = compose_map_menu(&self.session, self.warning.visibility(), &self.catalog);
        println!("-- map menu --");
        for card in &view.cards {
            let lock = if card.lock_icon { " [locked]" } else { "" };
            println!(
                "[{}] {}{} (level: {}, alpha {:.1})",
                card.id.get(),
                card.title,
                lock,
                card.level_caption,
                card.alpha
            );
        }
        if let Some(banner) = &view.banner {
            println!("!! {} (alpha {:.2})", banner.text, banner.alpha);
        }
    }

    fn render_loadout(&self) {
        let view = compose_loadout(&self.session, &self.catalog);
        println!("-- loadout --");
        for weapon in &view.weapons {
            let marker = if weapon.highlighted { "*" } else { " " };
            println!("{marker}[{}] {}", weapon.id.get(), weapon.name);
        }
        for line in &view.stats {
            println!("  {}: {}", line.label, line.value);
        }
        println!("  level: {}", view.level_caption);
        for button in &view.upgrade_buttons {
            println!("  upgrade ({:?}): {}", button.track, button.caption);
        }
        println!("  [{}] [{}]", view.done_caption, view.back_caption);
    }
}

fn describe_choice(choice: LevelChoice) -> &'static str {
    match choice {
        LevelChoice::Unselected => "unselected",
        LevelChoice::Chosen(Difficulty::Normal) => "normal",
        LevelChoice::Chosen(Difficulty::Superhard) => "superhard",
    }
}

fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let input = match verb {
        "show" | "maps" => Input::Show,
        "loadout" => Input::ShowLoadout,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        "select" => {
            let map = parse_id(words.next(), "select <map> <level>")?;
            let choice = match words.next() {
                Some("normal") => LevelChoice::Chosen(Difficulty::Normal),
                Some("superhard") => LevelChoice::Chosen(Difficulty::Superhard),
                Some("none") => LevelChoice::Unselected,
                _ => return Err("usage: select <map> normal|superhard|none".to_owned()),
            };
            Input::Action(UserAction::SelectLevel {
                map: MapId::new(map),
                choice,
            })
        }
        "play" => Input::Action(UserAction::ClickPlay(MapId::new(parse_id(
            words.next(),
            "play <map>",
        )?))),
        "card" => Input::Action(UserAction::ClickMapCard(MapId::new(parse_id(
            words.next(),
            "card <map>",
        )?))),
        "weapon" => Input::Action(UserAction::ClickWeaponCard(WeaponId::new(parse_id(
            words.next(),
            "weapon <id>",
        )?))),
        "upgrade" => {
            let track = match words.next() {
                Some("credits") => CurrencyTrack::Credits,
                Some("tokens") => CurrencyTrack::Tokens,
                _ => return Err("usage: upgrade credits|tokens".to_owned()),
            };
            Input::Action(UserAction::ClickUpgrade(track))
        }
        "done" => Input::Action(UserAction::ClickDone),
        "back" => Input::Action(UserAction::ClickBack),
        "locale" => {
            let code = words
                .next()
                .ok_or_else(|| "usage: locale <code>".to_owned())?;
            Input::Action(UserAction::ChangeLocale(LocaleCode::new(code)))
        }
        "tick" => {
            let ms = words
                .next()
                .and_then(|word| word.parse().ok())
                .ok_or_else(|| "usage: tick <milliseconds>".to_owned())?;
            Input::Tick(ms)
        }
        other => return Err(format!("unknown command '{other}'; try 'help'")),
    };
    Ok(Some(input))
}

fn parse_id(word: Option<&str>, usage: &str) -> Result<u32, String> {
    word.and_then(|word| word.parse().ok())
        .ok_or_else(|| format!("usage: {usage}"))
}

fn print_help() {
    println!("commands:");
    println!("  show                              print the active screen");
    println!("  loadout                           print the loadout view");
    println!("  select <map> normal|superhard|none  set a card's level dropdown");
    println!("  play <map> | card <map>           request a game start");
    println!("  weapon <id>                       highlight a weapon");
    println!("  upgrade credits|tokens            buy an upgrade for the highlighted weapon");
    println!("  done | back                       confirm or leave the loadout");
    println!("  locale <code>                     switch the interface language");
    println!("  tick <milliseconds>               advance the menu clock");
    println!("  quit                              leave");
}

fn load_config(path: Option<&Path>) -> Result<MenuConfig> {
    let config = match path {
        Some(path) => {
            let document = fs::read_to_string(path)
                .with_context(|| format!("failed to read menu config {}", path.display()))?;
            toml::from_str(&document)
                .with_context(|| format!("failed to parse menu config {}", path.display()))?
        }
        None => MenuConfig::default(),
    };
    config.validate().context("menu config rejected")?;
    Ok(config)
}

fn run_line(driver: &mut Driver, line: &str) -> bool {
    match parse_line(line) {
        Ok(Some(Input::Quit)) => return false,
        Ok(Some(Input::Help)) => print_help(),
        Ok(Some(Input::Show)) => driver.render(),
        Ok(Some(Input::ShowLoadout)) => driver.render_loadout(),
        Ok(Some(Input::Tick(ms))) => {
            driver.pump(
                Vec::new(),
                vec![Command::Tick {
                    dt: Duration::from_millis(ms),
                }],
            );
        }
        Ok(Some(Input::Action(action))) => driver.pump(vec![action], Vec::new()),
        Ok(None) => {}
        Err(message) => println!("{message}"),
    }
    true
}

/// Entry point for the Frontline command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    let catalog = StringCatalog::builtin().context("built-in locale documents rejected")?;
    let prefs = LocalePreference::new(cli.prefs.clone());

    // The flag beats the saved preference, which beats the configured
    // default; the boot batch then carries exactly one locale command.
    let locale_override = match cli.locale {
        Some(code) => Some(LocaleCode::new(code)),
        None => prefs.load().context("locale preference rejected")?,
    };
    if let Some(locale) = locale_override {
        config.default_locale = locale;
    }

    let mut driver = Driver::new(&config, catalog, prefs);
    println!("{WELCOME_BANNER}");
    driver.boot(&config);
    driver.render();

    match cli.script {
        Some(path) => {
            let script = fs::read_to_string(&path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            for line in script.lines() {
                if !run_line(&mut driver, line) {
                    break;
                }
            }
        }
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("failed to read input line")?;
                if !run_line(&mut driver, &line) {
                    break;
                }
            }
        }
    }
    Ok(())
}
