#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation contracts between the menu state and a host frontend.
//!
//! The session and the systems know nothing about widgets; this crate
//! flattens their state into plain view structs a frontend can draw
//! directly. Composition resolves every localization key up front, so a
//! view carries finished display strings and the frontend stays free of
//! catalog lookups. Scene transitions cross the boundary in the other
//! direction through [`SceneDirector`].

use frontline_core::{CurrencyTrack, Difficulty, LevelChoice, MapId, SceneId, WeaponId};
use frontline_localization::{keys, tables, StringCatalog};
use frontline_session::{query, Session};
use frontline_system_warning::{BannerVisibility, MESSAGE_KEY};

/// Opacity applied to a locked map card's artwork and title.
pub const LOCKED_CARD_ALPHA: f32 = 0.3;

/// Outbound boundary through which the menu asks the host to switch scenes.
///
/// Scene loading is fire and forget; whatever happens after the request is
/// the host's business and never reported back to the menu.
pub trait SceneDirector {
    /// Requests that the host load the named scene.
    fn load_scene(&mut self, scene: &SceneId);
}

/// One map card of the map menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MapCardView {
    /// Identifier of the backing catalog entry.
    pub id: MapId,
    /// Localized card title.
    pub title: String,
    /// Opaque artwork handle resolved by the host environment.
    pub artwork: String,
    /// Whether progression still locks the card.
    pub locked: bool,
    /// Opacity the card renders at; dimmed while locked.
    pub alpha: f32,
    /// Whether the lock icon overlays the artwork.
    pub lock_icon: bool,
    /// Caption of the level dropdown, placeholder text while unselected.
    pub level_caption: String,
    /// Localized labels of the dropdown's options, in display order.
    pub level_options: Vec<String>,
    /// Localized caption of the play button.
    pub play_caption: String,
}

/// The transient warning banner, present only while it should be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct BannerView {
    /// Localized warning text.
    pub text: String,
    /// Opacity in the range 0.0..=1.0.
    pub alpha: f32,
}

/// Everything the map menu draws in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MapMenuView {
    /// Map cards in catalog order.
    pub cards: Vec<MapCardView>,
    /// Warning banner, absent while hidden.
    pub banner: Option<BannerView>,
}

/// One labeled line of the weapon stat panel.
#[derive(Clone, Debug, PartialEq)]
pub struct StatLineView {
    /// Localized attribute label.
    pub label: String,
    /// Formatted attribute value.
    pub value: String,
}

/// One weapon card of the loadout menu.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponCardView {
    /// Identifier of the backing armory entry.
    pub id: WeaponId,
    /// Display name of the weapon.
    pub name: String,
    /// Opaque artwork handle resolved by the host environment.
    pub artwork: String,
    /// Whether the card renders as the highlighted selection.
    pub highlighted: bool,
}

/// One upgrade purchase button of the loadout menu.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeButtonView {
    /// Currency the button spends.
    pub track: CurrencyTrack,
    /// Cost caption, or the localized terminal marker at the level cap.
    pub caption: String,
    /// Whether the button accepts a click.
    pub enabled: bool,
}

/// Everything the loadout menu draws in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadoutView {
    /// Weapon cards in armory order.
    pub weapons: Vec<WeaponCardView>,
    /// Stat panel of the highlighted weapon, absent when the armory is empty.
    pub stats: Vec<StatLineView>,
    /// Level caption of the highlighted weapon, for example `3/6`.
    pub level_caption: String,
    /// Upgrade purchase buttons, one per currency track.
    pub upgrade_buttons: Vec<UpgradeButtonView>,
    /// Localized caption of the done button.
    pub done_caption: String,
    /// Localized caption of the back button.
    pub back_caption: String,
}

/// Caption shown where a value is unavailable.
const EMPTY_VALUE: &str = "-";

fn whole(value: f32) -> String {
    format!("{value:.0}")
}

fn tenths(value: f32) -> String {
    format!("{value:.1}")
}

fn difficulty_label(catalog: &StringCatalog, session: &Session, difficulty: Difficulty) -> String {
    catalog
        .lookup_or_key(
            query::locale(session),
            tables::DIFFICULTY,
            difficulty.label_key(),
        )
        .to_owned()
}

fn level_caption(catalog: &StringCatalog, session: &Session, choice: LevelChoice) -> String {
    match choice {
        LevelChoice::Unselected => catalog
            .lookup_or_key(
                query::locale(session),
                tables::DROPDOWN,
                keys::DROPDOWN_CHOOSE_LEVEL,
            )
            .to_owned(),
        LevelChoice::Chosen(difficulty) => difficulty_label(catalog, session, difficulty),
    }
}

/// Flattens the session's map catalog and the banner into a map menu view.
#[must_use]
pub fn compose_map_menu(
    session: &Session,
    banner: BannerVisibility,
    catalog: &StringCatalog,
) -> MapMenuView {
    let locale = query::locale(session);
    let play_caption = catalog
        .lookup_or_key(locale, tables::BUTTONS, keys::BUTTON_PLAY)
        .to_owned();
    let level_options: Vec<String> = Difficulty::ALL
        .iter()
        .map(|difficulty| difficulty_label(catalog, session, *difficulty))
        .collect();

    let cards = query::map_view(session)
        .into_vec()
        .into_iter()
        .map(|snapshot| {
            let title = catalog
                .lookup(locale, tables::MAP_LABELS, &snapshot.display_key)
                .unwrap_or(&snapshot.name)
                .to_owned();
            MapCardView {
                id: snapshot.id,
                title,
                artwork: snapshot.artwork,
                locked: snapshot.locked,
                alpha: if snapshot.locked { LOCKED_CARD_ALPHA } else { 1.0 },
                lock_icon: snapshot.locked,
                level_caption: level_caption(catalog, session, snapshot.choice),
                level_options: level_options.clone(),
                play_caption: play_caption.clone(),
            }
        })
        .collect();

    let banner = match banner {
        BannerVisibility::Hidden => None,
        BannerVisibility::Visible { alpha } => Some(BannerView {
            text: catalog
                .lookup_or_key(locale, tables::WARNINGS, MESSAGE_KEY)
                .to_owned(),
            alpha,
        }),
    };

    MapMenuView { cards, banner }
}

/// Flattens the session's armory and ledger into a loadout view.
#[must_use]
pub fn compose_loadout(session: &Session, catalog: &StringCatalog) -> LoadoutView {
    let locale = query::locale(session);
    let active = query::active_weapon(session);

    let snapshots = query::weapon_view(session).into_vec();
    let highlighted = snapshots
        .iter()
        .find(|snapshot| Some(snapshot.id) == active)
        .cloned();

    let weapons = snapshots
        .into_iter()
        .map(|snapshot| WeaponCardView {
            highlighted: Some(snapshot.id) == active,
            id: snapshot.id,
            name: snapshot.name,
            artwork: snapshot.artwork,
        })
        .collect();

    let stat_label = |key: &'static str| {
        catalog
            .lookup_or_key(locale, tables::STATS, key)
            .to_owned()
    };
    let stats = match &highlighted {
        Some(snapshot) => vec![
            StatLineView {
                label: stat_label("stats.Damage"),
                value: whole(snapshot.stats.damage),
            },
            StatLineView {
                label: stat_label("stats.Dispersion"),
                value: tenths(snapshot.stats.dispersion),
            },
            StatLineView {
                label: stat_label("stats.RateOfFire"),
                value: tenths(snapshot.stats.rate_of_fire),
            },
            StatLineView {
                label: stat_label("stats.ReloadSpeed"),
                value: tenths(snapshot.stats.reload_speed),
            },
            StatLineView {
                label: stat_label("stats.Ammunition"),
                value: whole(snapshot.stats.ammunition),
            },
        ],
        None => Vec::new(),
    };

    let level_caption = match &highlighted {
        Some(snapshot) => format!("{}/{}", snapshot.level, snapshot.max_level),
        None => EMPTY_VALUE.to_owned(),
    };

    let max_caption = catalog
        .lookup_or_key(locale, tables::LOADOUT, keys::LOADOUT_MAX_LEVEL)
        .to_owned();
    let upgrade_buttons = CurrencyTrack::ALL
        .iter()
        .map(|track| match query::upgrade_cost(session, *track) {
            Some(cost) => UpgradeButtonView {
                track: *track,
                caption: cost.to_string(),
                enabled: true,
            },
            None => UpgradeButtonView {
                track: *track,
                caption: if highlighted.is_some() {
                    max_caption.clone()
                } else {
                    EMPTY_VALUE.to_owned()
                },
                enabled: false,
            },
        })
        .collect();

    LoadoutView {
        weapons,
        stats,
        level_caption,
        upgrade_buttons,
        done_caption: catalog
            .lookup_or_key(locale, tables::BUTTONS, keys::BUTTON_DONE)
            .to_owned(),
        back_caption: catalog
            .lookup_or_key(locale, tables::BUTTONS, keys::BUTTON_BACK)
            .to_owned(),
    }
}
