use crate::intent::{EntityBinding, Intent, Slot};
use regex::Regex;
use std::sync::LazyLock;

/// One entry of the ordered rule list: an intent, its pattern with named
/// captures, and the slots those captures fill.
#[derive(Debug)]
pub struct PatternRule {
    pub intent: Intent,
    pub pattern: Regex,
    pub slots: &'static [Slot],
}

impl PatternRule {
    fn new(intent: Intent, pattern: &str, slots: &'static [Slot]) -> Self {
        // Anchored at the start only; trailing text is swallowed by the last capture.
        let pattern = Regex::new(&format!("^{pattern}")).expect("pattern rules are valid regex");
        Self {
            intent,
            pattern,
            slots,
        }
    }

    /// Tries this rule against already-normalized text.
    #[must_use]
    pub fn apply(&self, normalized: &str) -> Option<EntityBinding> {
        let captures = self.pattern.captures(normalized)?;
        let mut entities = EntityBinding::new();
        for slot in self.slots {
            let name: &'static str = slot.into();
            let value = captures.name(name)?;
            entities.bind(*slot, value.as_str());
        }
        Some(entities)
    }
}

const MOVIE: &[Slot] = &[Slot::Movie];
const PERSON: &[Slot] = &[Slot::Person];
const NONE: &[Slot] = &[];

/// Rules in priority order. Earlier rules shadow later ones, e.g. "are from"
/// (company) is tried before "are from the country of" (country).
pub static RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule::new(
            Intent::FindDirector,
            r"who\s+(directed|is the director of)\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindActors,
            r"who\s+(acted in|starred in|are the actors in)\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindMoviesByGenre,
            r"(which|what)\s+movies\s+(are|belong to|fall under|classified as)\s+(?P<Genre>.+)\s+genre",
            &[Slot::Genre],
        ),
        PatternRule::new(
            Intent::FindMoviesByDirector,
            r"which movies\s+(did|were)\s+(?P<Person>.+)\s+(direct|directed)",
            PERSON,
        ),
        PatternRule::new(
            Intent::FindMoviesByLanguage,
            r"which movies\s+(are in|speak|use the language)\s+(?P<Language>.+)",
            &[Slot::Language],
        ),
        PatternRule::new(
            Intent::FindMoviesByCompany,
            r"which movies\s+(are produced by|were made by|are from)\s+(?P<Company>.+)",
            &[Slot::Company],
        ),
        PatternRule::new(
            Intent::FindMoviesByCountry,
            r"which movies\s+(were produced in|are from the country of|originated in)\s+(?P<Country>.+)",
            &[Slot::Country],
        ),
        PatternRule::new(
            Intent::FindMusicComposer,
            r"who\s+(composed the music for|is the music composer of)\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindDOP,
            r"who\s+(was the director of photography for|is the dop of)\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindRevenue,
            r"what\s+is the revenue of\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindMoviesByActor,
            r"which movies\s+(did|were)\s+(?P<Person>.+)\s+(act in|star in)",
            PERSON,
        ),
        PatternRule::new(
            Intent::FindLanguagesOfMovie,
            r"what\s+languages\s+does\s+(?P<Movie>.+)\s+have",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindCompanyOfMovie,
            r"which\s+company\s+produced\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindCountryOfMovie,
            r"which\s+country\s+produced\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::FindAllDetails,
            r"give\s+all\s+details\s+of\s+(?P<Movie>.+)",
            MOVIE,
        ),
        PatternRule::new(
            Intent::TopMoviesByGenre,
            r"what are the top 20 movies in each genre",
            NONE,
        ),
        PatternRule::new(
            Intent::TopSuccessfulActors,
            r"who are the top 5 most successful actors",
            NONE,
        ),
        PatternRule::new(
            Intent::SuccessfulGenresByYear,
            r"which genres were most successful in (?P<Year>\d{4})",
            &[Slot::Year],
        ),
        PatternRule::new(
            Intent::TopDirectorsByRating,
            r"who are the top 10 directors by average rating",
            NONE,
        ),
        PatternRule::new(
            Intent::LanguageSuccess,
            r"which languages have the highest-rated movies",
            NONE,
        ),
        PatternRule::new(
            Intent::TopCompaniesBySuccess,
            r"which production companies have the most successful movies",
            NONE,
        ),
        PatternRule::new(
            Intent::RevenueTopGenres,
            r"which genres have generated the most revenue",
            NONE,
        ),
        PatternRule::new(
            Intent::TopMoviesByCountry,
            r"what are the highest-grossing movies by country",
            NONE,
        ),
        PatternRule::new(
            Intent::YearlyRevenueTrend,
            r"what is the yearly box office trend",
            NONE,
        ),
        PatternRule::new(
            Intent::GenrePopularityTrend,
            r"how has genre popularity changed over time",
            NONE,
        ),
    ]
});

/// First matching rule wins. `normalized` must already be trimmed and lowercased.
#[must_use]
pub fn match_rules(rules: &[PatternRule], normalized: &str) -> Option<(Intent, EntityBinding)> {
    rules
        .iter()
        .find_map(|rule| rule.apply(normalized).map(|entities| (rule.intent, entities)))
}
