#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure warning-banner system for the missing level selection.
//!
//! The banner shows when a game start is refused because no difficulty was
//! chosen, stays fully opaque for a display period, fades out, and then
//! hides. A valid selection on the card that triggered the banner hides it
//! immediately without a fade, and re-triggering while visible restarts the
//! timer instead of stacking a second banner.

use std::time::Duration;

use frontline_core::{Event, MapId, StartRejection};

/// Localization key of the banner message shown to the player.
pub const MESSAGE_KEY: &str = "warning.chooseLevelFirst";

/// Timing parameters required to construct the warning system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    display_duration: Duration,
    fade_duration: Duration,
}

impl Config {
    /// Creates a new configuration with explicit display and fade timings.
    #[must_use]
    pub const fn new(display_duration: Duration, fade_duration: Duration) -> Self {
        Self {
            display_duration,
            fade_duration,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_duration: Duration::from_millis(1000),
            fade_duration: Duration::from_millis(500),
        }
    }
}

/// What an adapter should currently present for the banner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BannerVisibility {
    /// The banner is not on display.
    Hidden,
    /// The banner is on display at the contained opacity.
    Visible {
        /// Opacity in the range 0.0..=1.0; 1.0 while showing, interpolated
        /// towards 0.0 across the fade.
        alpha: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Hidden,
    Showing { remaining: Duration },
    Fading { remaining: Duration },
}

/// Warning system driven by session events.
#[derive(Clone, Debug)]
pub struct LevelWarning {
    display_duration: Duration,
    fade_duration: Duration,
    phase: Phase,
    // Card whose refused start triggered the banner; selections on other
    // cards do not dismiss it.
    map: Option<MapId>,
}

impl Default for LevelWarning {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl LevelWarning {
    /// Creates a new warning system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            display_duration: config.display_duration,
            fade_duration: config.fade_duration,
            phase: Phase::Hidden,
            map: None,
        }
    }

    /// Consumes session events, updating the banner state machine.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::GameStartRejected {
                    map,
                    reason: StartRejection::LevelNotSelected,
                } => {
                    self.phase = Phase::Showing {
                        remaining: self.display_duration,
                    };
                    self.map = Some(*map);
                }
                Event::LevelSelected { map, choice } if choice.is_selected() => {
                    if self.map == Some(*map) {
                        self.hide();
                    }
                }
                Event::TimeAdvanced { dt } => self.advance(*dt),
                _ => {}
            }
        }
    }

    /// What an adapter should currently present for the banner.
    #[must_use]
    pub fn visibility(&self) -> BannerVisibility {
        match self.phase {
            Phase::Hidden => BannerVisibility::Hidden,
            Phase::Showing { .. } => BannerVisibility::Visible { alpha: 1.0 },
            Phase::Fading { remaining } => BannerVisibility::Visible {
                alpha: remaining.as_secs_f32() / self.fade_duration.as_secs_f32(),
            },
        }
    }

    /// Reports whether the banner is currently on display.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Hidden
    }

    fn hide(&mut self) {
        self.phase = Phase::Hidden;
        self.map = None;
    }

    fn advance(&mut self, dt: Duration) {
        if let Phase::Showing { remaining } = self.phase {
            if dt < remaining {
                self.phase = Phase::Showing {
                    remaining: remaining - dt,
                };
                return;
            }
            // Leftover time spills into the fade so one tick spanning both
            // periods still hides the banner exactly once.
            let spill = dt - remaining;
            if spill >= self.fade_duration || self.fade_duration.is_zero() {
                self.hide();
            } else {
                self.phase = Phase::Fading {
                    remaining: self.fade_duration - spill,
                };
            }
            return;
        }

        if let Phase::Fading { remaining } = self.phase {
            if dt < remaining {
                self.phase = Phase::Fading {
                    remaining: remaining - dt,
                };
            } else {
                self.hide();
            }
        }
    }
}
