use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use strum_macros::{EnumIter, IntoStaticStr};

/// Closed catalog of question categories the engine can answer.
///
/// Every variant owns exactly one query template and one render rule; both
/// lookups are exhaustive `match`es, so adding a variant without wiring it up
/// fails to compile.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr,
)]
pub enum Intent {
    FindDirector,
    FindActors,
    FindMoviesByGenre,
    FindMoviesByDirector,
    FindMoviesByLanguage,
    FindMoviesByCompany,
    FindMoviesByCountry,
    FindMusicComposer,
    FindDOP,
    FindRevenue,
    FindMoviesByActor,
    FindLanguagesOfMovie,
    FindCompanyOfMovie,
    FindCountryOfMovie,
    FindAllDetails,
    TopMoviesByGenre,
    TopSuccessfulActors,
    SuccessfulGenresByYear,
    TopDirectorsByRating,
    LanguageSuccess,
    TopCompaniesBySuccess,
    RevenueTopGenres,
    TopMoviesByCountry,
    YearlyRevenueTrend,
    GenrePopularityTrend,
}

impl Display for Intent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

/// Named entity slot a pattern capture or NER span is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
pub enum Slot {
    Movie,
    Person,
    Genre,
    Language,
    Company,
    Country,
    Year,
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

/// Slot values extracted from one question.
///
/// Values are stored normalized (trimmed, lowercased); title-casing for
/// display happens in the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityBinding {
    slots: BTreeMap<Slot, String>,
}

impl EntityBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `slot`, replacing any earlier value.
    pub fn bind(&mut self, slot: Slot, value: &str) {
        self.slots.insert(slot, normalize_span(value));
    }

    #[must_use]
    pub fn with(mut self, slot: Slot, value: &str) -> Self {
        self.bind(slot, value);
        self
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(slot, value)| (*slot, value.as_str()))
    }
}

impl Display for EntityBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .iter()
            .map(|(slot, value)| format!("{slot}: \"{value}\""))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{pairs}}}")
    }
}

/// Trim + lowercase applied to every captured span.
#[must_use]
pub fn normalize_span(span: &str) -> String {
    span.trim().to_lowercase()
}
