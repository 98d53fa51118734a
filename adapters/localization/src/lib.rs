#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Locale-keyed string tables and the saved locale preference.
//!
//! The menu treats localization as a plain key to string lookup: one TOML
//! document per locale, each holding named tables of entries. Lookups that
//! miss fall back to the key itself so a missing translation never blanks a
//! label. The only persisted menu state, the player's locale choice, lives
//! in a small TOML preference file next to the binary.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use frontline_core::LocaleCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names of the string tables the menu reads from.
pub mod tables {
    /// Card titles of the map catalog.
    pub const MAP_LABELS: &str = "map_labels";
    /// Difficulty option labels of the level dropdown.
    pub const DIFFICULTY: &str = "difficulty";
    /// Attribute labels of the weapon stat panel.
    pub const STATS: &str = "stats";
    /// Button captions shared across the menus.
    pub const BUTTONS: &str = "buttons";
    /// Placeholder captions of dropdown widgets.
    pub const DROPDOWN: &str = "dropdown";
    /// Captions specific to the loadout menu.
    pub const LOADOUT: &str = "loadout";
    /// Transient warning messages.
    pub const WARNINGS: &str = "warnings";
}

/// Well-known entry keys the menu resolves.
pub mod keys {
    /// Warning shown when starting without a difficulty choice.
    pub const WARNING_CHOOSE_LEVEL: &str = "warning.chooseLevelFirst";
    /// Placeholder of the level dropdown while unselected.
    pub const DROPDOWN_CHOOSE_LEVEL: &str = "dropdown.ChooseLevel";
    /// Terminal indicator shown instead of an upgrade cost at the level cap.
    pub const LOADOUT_MAX_LEVEL: &str = "loadout.MaxLevel";
    /// Caption of the play button on each map card.
    pub const BUTTON_PLAY: &str = "button.Play";
    /// Caption of the loadout back button.
    pub const BUTTON_BACK: &str = "button.Back";
    /// Caption of the loadout done button.
    pub const BUTTON_DONE: &str = "button.Done";
}

const BUILTIN_DOCUMENTS: [(&str, &str); 2] = [
    ("en-US", include_str!("../locales/en-US.toml")),
    ("vi-VN", include_str!("../locales/vi-VN.toml")),
];

type Tables = HashMap<String, HashMap<String, String>>;

/// Errors reported while building a string catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A locale document is not valid TOML-of-tables.
    #[error("locale document '{locale}' is not a valid string table")]
    Parse {
        /// Locale whose document failed to parse.
        locale: String,
        /// Underlying TOML parse failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Locale to table to key to string storage.
#[derive(Clone, Debug, Default)]
pub struct StringCatalog {
    locales: BTreeMap<LocaleCode, Tables>,
}

impl StringCatalog {
    /// Creates an empty catalog with no locale at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog shipped inside the binary: `en-US` and `vi-VN`.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for (locale, document) in BUILTIN_DOCUMENTS {
            catalog.insert_document(LocaleCode::new(locale), document)?;
        }
        Ok(catalog)
    }

    /// Loads every `<locale>.toml` document found in the provided directory.
    ///
    /// The file stem names the locale, mirroring how the built-in documents
    /// are organised on disk.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut catalog = Self::new();
        let entries = fs::read_dir(path)
            .with_context(|| format!("failed to read locale directory {}", path.display()))?;
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to list locale directory {}", path.display()))?;
            let file = entry.path();
            if file.extension().and_then(|extension| extension.to_str()) != Some("toml") {
                continue;
            }
            let Some(stem) = file.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let document = fs::read_to_string(&file)
                .with_context(|| format!("failed to read locale document {}", file.display()))?;
            catalog
                .insert_document(LocaleCode::new(stem), &document)
                .with_context(|| format!("failed to parse locale document {}", file.display()))?;
        }
        Ok(catalog)
    }

    /// Parses one TOML document and stores it under the provided locale.
    pub fn insert_document(
        &mut self,
        locale: LocaleCode,
        document: &str,
    ) -> Result<(), CatalogError> {
        let tables: Tables = toml::from_str(document).map_err(|source| CatalogError::Parse {
            locale: locale.as_str().to_owned(),
            source,
        })?;
        let _ = self.locales.insert(locale, tables);
        Ok(())
    }

    /// Reports whether the catalog carries the provided locale.
    #[must_use]
    pub fn has_locale(&self, locale: &LocaleCode) -> bool {
        self.locales.contains_key(locale)
    }

    /// Locales available in the catalog, in stable order.
    #[must_use]
    pub fn available_locales(&self) -> Vec<&LocaleCode> {
        self.locales.keys().collect()
    }

    /// Resolves an entry, returning `None` when locale, table, or key miss.
    #[must_use]
    pub fn lookup(&self, locale: &LocaleCode, table: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)?
            .get(table)?
            .get(key)
            .map(String::as_str)
    }

    /// Resolves an entry, falling back to the key when the lookup misses.
    #[must_use]
    pub fn lookup_or_key<'a>(&'a self, locale: &LocaleCode, table: &str, key: &'a str) -> &'a str {
        self.lookup(locale, table, key).unwrap_or(key)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PreferenceDocument {
    locale: LocaleCode,
}

/// File-backed store for the player's saved locale choice.
///
/// The absence of the file is not an error; it simply means no choice was
/// saved yet and the configured default applies.
#[derive(Clone, Debug)]
pub struct LocalePreference {
    path: PathBuf,
}

impl LocalePreference {
    /// Creates a store backed by the provided file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing preference file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved locale, if a preference file exists.
    pub fn load(&self) -> Result<Option<LocaleCode>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let document = fs::read_to_string(&self.path).with_context(|| {
            format!("failed to read locale preference {}", self.path.display())
        })?;
        let preference: PreferenceDocument = toml::from_str(&document).with_context(|| {
            format!("failed to parse locale preference {}", self.path.display())
        })?;
        Ok(Some(preference.locale))
    }

    /// Writes the provided locale, creating parent directories as needed.
    pub fn save(&self, locale: &LocaleCode) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create preference directory {}", parent.display())
                })?;
            }
        }
        let document = toml::to_string(&PreferenceDocument {
            locale: locale.clone(),
        })
        .context("failed to serialize locale preference")?;
        fs::write(&self.path, document).with_context(|| {
            format!("failed to write locale preference {}", self.path.display())
        })
    }
}
