use ratatui::style::Color;

use super::Language;

/// Rank tiers, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Cartographer,
    Explorer,
    Traveler,
    Tourist,
    Lost,
}

impl Rank {
    /// Rank for `errors` wrong clicks over a catalog of `catalog_size` regions.
    ///
    /// The error ratio is compared against 0, 0.1, 0.25 and 0.5; each bound
    /// is inclusive. An empty catalog ranks as if the ratio were the raw error
    /// count.
    pub fn from_errors(errors: usize, catalog_size: usize) -> Self {
        let ratio = if catalog_size == 0 {
            errors as f64
        } else {
            errors as f64 / catalog_size as f64
        };

        if ratio <= 0.0 {
            Self::Cartographer
        } else if ratio <= 0.1 {
            Self::Explorer
        } else if ratio <= 0.25 {
            Self::Traveler
        } else if ratio <= 0.5 {
            Self::Tourist
        } else {
            Self::Lost
        }
    }

    pub const fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Cartographer, Language::English) => "Master Cartographer",
            (Self::Explorer, Language::English) => "Seasoned Explorer",
            (Self::Traveler, Language::English) => "Traveler",
            (Self::Tourist, Language::English) => "Tourist",
            (Self::Lost, Language::English) => "Lost at Sea",
            (Self::Cartographer, Language::Greek) => "Αρχιχαρτογράφος",
            (Self::Explorer, Language::Greek) => "Έμπειρος Εξερευνητής",
            (Self::Traveler, Language::Greek) => "Ταξιδιώτης",
            (Self::Tourist, Language::Greek) => "Τουρίστας",
            (Self::Lost, Language::Greek) => "Χαμένος στο Πέλαγος",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Cartographer => Color::Green,
            Self::Explorer => Color::Cyan,
            Self::Traveler => Color::Yellow,
            Self::Tourist => Color::LightRed,
            Self::Lost => Color::Red,
        }
    }
}
