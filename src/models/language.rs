//! Display languages and the strings shown in each.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Language used for region names and interface text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Greek,
}

impl Language {
    /// Feature property holding the region name in this language.
    pub const fn name_field(self) -> &'static str {
        match self {
            Self::English => "NAME_1",
            Self::Greek => "NL_NAME_1",
        }
    }

    /// Resolve a feature's region name. `None` when the property is missing
    /// or not a string.
    pub fn resolve_name(self, properties: &Map<String, Value>) -> Option<&str> {
        properties.get(self.name_field()).and_then(Value::as_str)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::English => Self::Greek,
            Self::Greek => Self::English,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Greek => "Ελληνικά",
        }
    }

    pub const fn text(self) -> &'static Text {
        match self {
            Self::English => &ENGLISH,
            Self::Greek => &GREEK,
        }
    }
}

/// Fixed interface strings.
#[derive(Debug)]
pub struct Text {
    pub title: &'static str,
    pub find_region: &'static str,
    pub loading: &'static str,
    pub load_failed: &'static str,
    pub errors: &'static str,
    pub solved: &'static str,
    pub correct: &'static str,
    pub incorrect_was: &'static str,
    pub complete: &'static str,
    pub rank: &'static str,
    pub controls: &'static str,
    pub complete_controls: &'static str,
}

const ENGLISH: Text = Text {
    title: "Greece Geography Quiz",
    find_region: "Find this region on the map:",
    loading: "Loading quiz...",
    load_failed: "Could not load the map data",
    errors: "Errors",
    solved: "Found",
    correct: "Correct!",
    incorrect_was: "Incorrect! That was",
    complete: "All regions found!",
    rank: "Rank",
    controls: "click or arrows+enter  ·  r reset  ·  t language  ·  q quit",
    complete_controls: "r play again  ·  t language  ·  q quit",
};

const GREEK: Text = Text {
    title: "Κουίζ Γεωγραφίας της Ελλάδας",
    find_region: "Βρείτε αυτή την περιοχή στον χάρτη:",
    loading: "Φόρτωση κουίζ...",
    load_failed: "Αδυναμία φόρτωσης των δεδομένων χάρτη",
    errors: "Λάθη",
    solved: "Βρέθηκαν",
    correct: "Σωστά!",
    incorrect_was: "Λάθος! Αυτή ήταν η περιοχή",
    complete: "Βρήκατε όλες τις περιοχές!",
    rank: "Κατάταξη",
    controls: "κλικ ή βέλη+enter  ·  r επανεκκίνηση  ·  t γλώσσα  ·  q έξοδος",
    complete_controls: "r ξανά  ·  t γλώσσα  ·  q έξοδος",
};
