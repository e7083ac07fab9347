//! Language packs for the user interface strings
//!
//! A language pack is a plain data table from a closed set of string
//! keys to localized text, plus the name of the question database file
//! for that language. Packs are looked up by the [`Language`] id; there
//! is no per-language code, just per-language data.

use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};

/// The available game languages
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Enum,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Language {
    /// English, the default language
    #[default]
    English,
    /// German
    German,
}

impl Language {
    /// Returns the other language, for the language-toggle menu entry
    pub fn toggled(self) -> Self {
        match self {
            Self::English => Self::German,
            Self::German => Self::English,
        }
    }
}

/// The closed set of localized string keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum StringKey {
    /// File name of the question database for this language
    DatabaseFile,
    /// Menu item and button text for quitting
    Quit,
    /// Menu item for starting a new game
    NewGame,
    /// Text for the winning screen
    Won,
    /// Text for the game over screen
    Lost,
    /// Intro text shown while the game starts
    Intro,
    /// Main menu label
    Menu,
    /// Menu item for switching to the other language
    ToggleLanguage,
    /// Text for the cancel button
    Cancel,
    /// Confirmation text of the quit dialog
    QuitDialog,
}

/// Localized strings and the database file name for one language
#[derive(Debug, Clone)]
pub struct LanguagePack {
    /// The language this pack belongs to
    id: Language,
    /// Human-readable language name
    name: &'static str,
    /// The string table
    strings: EnumMap<StringKey, &'static str>,
}

impl LanguagePack {
    /// Returns the pack for the given language
    pub fn get(id: Language) -> Self {
        match id {
            Language::English => english(),
            Language::German => german(),
        }
    }

    /// Returns the language this pack belongs to
    pub fn id(&self) -> Language {
        self.id
    }

    /// Returns the human-readable language name, e.g. "English"
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up the localized text for a string key
    ///
    /// The key set is a closed enum, so this lookup is total; there is
    /// no "unknown key" case to handle.
    pub fn resolve(&self, key: StringKey) -> &'static str {
        self.strings[key]
    }

    /// Returns the question database file name of this language
    pub fn database_file(&self) -> &'static str {
        self.strings[StringKey::DatabaseFile]
    }
}

/// The English string table
fn english() -> LanguagePack {
    LanguagePack {
        id: Language::English,
        name: "English",
        strings: enum_map! {
            StringKey::DatabaseFile => "en.qdb",
            StringKey::Quit => "Quit",
            StringKey::NewGame => "New game",
            StringKey::Won => "YOU'VE WON - YOU ARE A MILLIONAIRE!",
            StringKey::Lost => "YOU'VE LOST - GAME OVER!",
            StringKey::Intro => "Who Wants To Be A Millionaire?!",
            StringKey::Menu => "Game",
            StringKey::ToggleLanguage => "Change to German",
            StringKey::Cancel => "Cancel",
            StringKey::QuitDialog => "Do you really want to quit?",
        },
    }
}

/// The German string table
fn german() -> LanguagePack {
    LanguagePack {
        id: Language::German,
        name: "German",
        strings: enum_map! {
            StringKey::DatabaseFile => "de.qdb",
            StringKey::Quit => "Beenden",
            StringKey::NewGame => "Neues Spiel",
            StringKey::Won => "Sie haben GEWONNEN!",
            StringKey::Lost => "Sie haben leider verloren!",
            StringKey::Intro => "Wer wird Million\u{e4}r?",
            StringKey::Menu => "Spiel",
            StringKey::ToggleLanguage => "Wechsle zu Englisch",
            StringKey::Cancel => "Abbrechen",
            StringKey::QuitDialog => "M\u{f6}chten Sie wirklich abbrechen?",
        },
    }
}
