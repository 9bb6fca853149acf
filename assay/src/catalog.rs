use crate::error::SynthesisError;
use crate::intent::{EntityBinding, Intent, Slot};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TemplateShape {
    /// One entity parameter, small projection.
    Lookup,
    /// Whole-graph ranking or grouping with a fixed order and limit.
    Aggregate,
}

/// A named query parameter and the slot it is bound from.
#[derive(Debug, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub slot: Slot,
}

#[derive(Debug)]
pub struct QueryTemplate {
    pub id: &'static str,
    pub shape: TemplateShape,
    pub cypher: &'static str,
    pub params: &'static [Param],
    /// Columns every result row is expected to carry.
    pub fields: &'static [&'static str],
    /// Truncation baked into `cypher`, if any.
    pub limit: Option<usize>,
}

impl QueryTemplate {
    pub fn required_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.params.iter().map(|param| param.slot)
    }
}

/// A fully bound query, ready for an executor. Pure data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphQuery {
    pub template_id: &'static str,
    pub cypher: &'static str,
    pub params: BTreeMap<&'static str, String>,
}

/// Binds the template's parameters for `intent` from `entities`.
///
/// Fails without building anything when a required slot is missing.
pub fn synthesize(intent: Intent, entities: &EntityBinding) -> Result<GraphQuery, SynthesisError> {
    let template = template(intent);

    let mut params = BTreeMap::new();
    for param in template.params {
        let value = entities
            .get(param.slot)
            .ok_or(SynthesisError::MissingSlot {
                intent,
                slot: param.slot,
            })?;
        params.insert(param.name, value.to_string());
    }

    debug!(template = template.id, ?params, "query synthesized");

    Ok(GraphQuery {
        template_id: template.id,
        cypher: template.cypher,
        params,
    })
}

#[must_use]
pub fn template(intent: Intent) -> &'static QueryTemplate {
    match intent {
        Intent::FindDirector => &FIND_DIRECTOR,
        Intent::FindActors => &FIND_ACTORS,
        Intent::FindMoviesByGenre => &FIND_MOVIES_BY_GENRE,
        Intent::FindMoviesByDirector => &FIND_MOVIES_BY_DIRECTOR,
        Intent::FindMoviesByLanguage => &FIND_MOVIES_BY_LANGUAGE,
        Intent::FindMoviesByCompany => &FIND_MOVIES_BY_COMPANY,
        Intent::FindMoviesByCountry => &FIND_MOVIES_BY_COUNTRY,
        Intent::FindMusicComposer => &FIND_MUSIC_COMPOSER,
        Intent::FindDOP => &FIND_DOP,
        Intent::FindRevenue => &FIND_REVENUE,
        Intent::FindMoviesByActor => &FIND_MOVIES_BY_ACTOR,
        Intent::FindLanguagesOfMovie => &FIND_LANGUAGES_OF_MOVIE,
        Intent::FindCompanyOfMovie => &FIND_COMPANY_OF_MOVIE,
        Intent::FindCountryOfMovie => &FIND_COUNTRY_OF_MOVIE,
        Intent::FindAllDetails => &FIND_ALL_DETAILS,
        Intent::TopMoviesByGenre => &TOP_MOVIES_BY_GENRE,
        Intent::TopSuccessfulActors => &TOP_SUCCESSFUL_ACTORS,
        Intent::SuccessfulGenresByYear => &SUCCESSFUL_GENRES_BY_YEAR,
        Intent::TopDirectorsByRating => &TOP_DIRECTORS_BY_RATING,
        Intent::LanguageSuccess => &LANGUAGE_SUCCESS,
        Intent::TopCompaniesBySuccess => &TOP_COMPANIES_BY_SUCCESS,
        Intent::RevenueTopGenres => &REVENUE_TOP_GENRES,
        Intent::TopMoviesByCountry => &TOP_MOVIES_BY_COUNTRY,
        Intent::YearlyRevenueTrend => &YEARLY_REVENUE_TREND,
        Intent::GenrePopularityTrend => &GENRE_POPULARITY_TREND,
    }
}

const MOVIE_TITLE: &[Param] = &[Param {
    name: "movie_title",
    slot: Slot::Movie,
}];

const MOVIE_LIST: &[&str] = &["movie_title"];

static FIND_DIRECTOR: QueryTemplate = QueryTemplate {
    id: "find_director",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:DIRECTED_BY]-(d:Person)
WHERE toLower(m.title) = toLower($movie_title)
RETURN d.name AS director",
    params: MOVIE_TITLE,
    fields: &["director"],
    limit: None,
};

static FIND_ACTORS: QueryTemplate = QueryTemplate {
    id: "find_actors",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (a:Person)-[:ACTED_IN]-(m:Movie)
WHERE toLower(m.title) = toLower($movie_title)
RETURN a.name AS actor",
    params: MOVIE_TITLE,
    fields: &["actor"],
    limit: None,
};

static FIND_MOVIES_BY_GENRE: QueryTemplate = QueryTemplate {
    id: "find_movies_by_genre",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:BELONGS_TO_GENRE]-(g:Genre)
WHERE toLower(g.name) = toLower($genre_name)
RETURN m.title AS movie_title",
    params: &[Param {
        name: "genre_name",
        slot: Slot::Genre,
    }],
    fields: MOVIE_LIST,
    limit: None,
};

static FIND_MOVIES_BY_DIRECTOR: QueryTemplate = QueryTemplate {
    id: "find_movies_by_director",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (d:Person)-[:DIRECTED_BY]-(m:Movie)
WHERE toLower(d.name) = toLower($director_name)
RETURN m.title AS movie_title",
    params: &[Param {
        name: "director_name",
        slot: Slot::Person,
    }],
    fields: MOVIE_LIST,
    limit: None,
};

static FIND_MOVIES_BY_LANGUAGE: QueryTemplate = QueryTemplate {
    id: "find_movies_by_language",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:SPOKEN_IN]-(l:Language)
WHERE toLower(l.name) = toLower($language_name)
RETURN m.title AS movie_title",
    params: &[Param {
        name: "language_name",
        slot: Slot::Language,
    }],
    fields: MOVIE_LIST,
    limit: None,
};

static FIND_MOVIES_BY_COMPANY: QueryTemplate = QueryTemplate {
    id: "find_movies_by_company",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:PRODUCTION_COMPANY]-(c:Company)
WHERE toLower(c.name) = toLower($company_name)
RETURN m.title AS movie_title",
    params: &[Param {
        name: "company_name",
        slot: Slot::Company,
    }],
    fields: MOVIE_LIST,
    limit: None,
};

static FIND_MOVIES_BY_COUNTRY: QueryTemplate = QueryTemplate {
    id: "find_movies_by_country",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:PRODUCED_IN]-(co:Country)
WHERE toLower(co.name) = toLower($country_name)
RETURN m.title AS movie_title",
    params: &[Param {
        name: "country_name",
        slot: Slot::Country,
    }],
    fields: MOVIE_LIST,
    limit: None,
};

static FIND_MUSIC_COMPOSER: QueryTemplate = QueryTemplate {
    id: "find_music_composer",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:COMPOSED_BY]-(mc:Person)
WHERE toLower(m.title) = toLower($movie_title)
RETURN mc.name AS music_composer",
    params: MOVIE_TITLE,
    fields: &["music_composer"],
    limit: None,
};

static FIND_DOP: QueryTemplate = QueryTemplate {
    id: "find_dop",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:DOP_BY]-(dop:Person)
WHERE toLower(m.title) = toLower($movie_title)
RETURN dop.name AS director_of_photography",
    params: MOVIE_TITLE,
    fields: &["director_of_photography"],
    limit: None,
};

static FIND_REVENUE: QueryTemplate = QueryTemplate {
    id: "find_revenue",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)
WHERE toLower(m.title) = toLower($movie_title)
RETURN m.revenue AS revenue",
    params: MOVIE_TITLE,
    fields: &["revenue"],
    limit: None,
};

static FIND_MOVIES_BY_ACTOR: QueryTemplate = QueryTemplate {
    id: "find_movies_by_actor",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (p:Person)-[:ACTED_IN]-(m:Movie)
WHERE toLower(p.name) = toLower($actor_name)
RETURN m.title AS movie_title",
    params: &[Param {
        name: "actor_name",
        slot: Slot::Person,
    }],
    fields: MOVIE_LIST,
    limit: None,
};

static FIND_LANGUAGES_OF_MOVIE: QueryTemplate = QueryTemplate {
    id: "find_languages_of_movie",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:SPOKEN_IN]-(l:Language)
WHERE toLower(m.title) = toLower($movie_title)
RETURN l.name AS language",
    params: MOVIE_TITLE,
    fields: &["language"],
    limit: None,
};

static FIND_COMPANY_OF_MOVIE: QueryTemplate = QueryTemplate {
    id: "find_company_of_movie",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:PRODUCTION_COMPANY]-(c:Company)
WHERE toLower(m.title) = toLower($movie_title)
RETURN c.name AS company",
    params: MOVIE_TITLE,
    fields: &["company"],
    limit: None,
};

static FIND_COUNTRY_OF_MOVIE: QueryTemplate = QueryTemplate {
    id: "find_country_of_movie",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)-[:PRODUCED_IN]-(co:Country)
WHERE toLower(m.title) = toLower($movie_title)
RETURN co.name AS country",
    params: MOVIE_TITLE,
    fields: &["country"],
    limit: None,
};

static FIND_ALL_DETAILS: QueryTemplate = QueryTemplate {
    id: "find_all_details",
    shape: TemplateShape::Lookup,
    cypher: "MATCH (m:Movie)
WHERE toLower(m.title) = toLower($movie_title)
RETURN m.title AS title, m.release_date AS release_date, m.budget AS budget,
       m.runtime AS runtime, m.vote_average AS vote_average, m.status AS status,
       m.revenue AS revenue, m.original_language AS original_language",
    params: MOVIE_TITLE,
    fields: &[
        "title",
        "release_date",
        "budget",
        "runtime",
        "vote_average",
        "status",
        "revenue",
        "original_language",
    ],
    limit: None,
};

static TOP_MOVIES_BY_GENRE: QueryTemplate = QueryTemplate {
    id: "top_movies_by_genre",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)-[:BELONGS_TO_GENRE]->(g:Genre)
RETURN g.name AS genre, m.title AS movie, m.vote_average AS rating
ORDER BY g.name, m.vote_average DESC
LIMIT 20",
    params: &[],
    fields: &["genre", "movie", "rating"],
    limit: Some(20),
};

static TOP_SUCCESSFUL_ACTORS: QueryTemplate = QueryTemplate {
    id: "top_successful_actors",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (a:Person)-[:ACTED_IN]-(m:Movie)
WHERE m.vote_average > 7.5
RETURN a.name AS actor, COUNT(m) AS successful_movies
ORDER BY successful_movies DESC
LIMIT 5",
    params: &[],
    fields: &["actor", "successful_movies"],
    limit: Some(5),
};

static SUCCESSFUL_GENRES_BY_YEAR: QueryTemplate = QueryTemplate {
    id: "successful_genres_by_year",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)-[:BELONGS_TO_GENRE]->(g:Genre)
WHERE m.release_date STARTS WITH $year
RETURN g.name AS genre, AVG(m.vote_average) AS average_rating
ORDER BY average_rating DESC
LIMIT 10",
    params: &[Param {
        name: "year",
        slot: Slot::Year,
    }],
    fields: &["genre", "average_rating"],
    limit: Some(10),
};

static TOP_DIRECTORS_BY_RATING: QueryTemplate = QueryTemplate {
    id: "top_directors_by_rating",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (d:Person)-[:DIRECTED_BY]-(m:Movie)
RETURN d.name AS director, AVG(m.vote_average) AS avg_rating
ORDER BY avg_rating DESC
LIMIT 10",
    params: &[],
    fields: &["director", "avg_rating"],
    limit: Some(10),
};

static LANGUAGE_SUCCESS: QueryTemplate = QueryTemplate {
    id: "language_success",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)-[:SPOKEN_IN]->(l:Language)
RETURN l.name AS language, AVG(m.vote_average) AS average_rating
ORDER BY average_rating DESC
LIMIT 10",
    params: &[],
    fields: &["language", "average_rating"],
    limit: Some(10),
};

static TOP_COMPANIES_BY_SUCCESS: QueryTemplate = QueryTemplate {
    id: "top_companies_by_success",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)-[:PRODUCTION_COMPANY]->(c:Company)
WHERE m.vote_average > 7.5
RETURN c.name AS company, COUNT(m) AS successful_movies
ORDER BY successful_movies DESC
LIMIT 10",
    params: &[],
    fields: &["company", "successful_movies"],
    limit: Some(10),
};

static REVENUE_TOP_GENRES: QueryTemplate = QueryTemplate {
    id: "revenue_top_genres",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)-[:BELONGS_TO_GENRE]->(g:Genre)
RETURN g.name AS genre, SUM(m.revenue) AS total_revenue
ORDER BY total_revenue DESC
LIMIT 10",
    params: &[],
    fields: &["genre", "total_revenue"],
    limit: Some(10),
};

static TOP_MOVIES_BY_COUNTRY: QueryTemplate = QueryTemplate {
    id: "top_movies_by_country",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)-[:PRODUCED_IN]->(co:Country)
WHERE m.revenue IS NOT NULL
RETURN co.name AS country, m.title AS movie, m.revenue AS revenue
ORDER BY co.name, revenue DESC
LIMIT 20",
    params: &[],
    fields: &["country", "movie", "revenue"],
    limit: Some(20),
};

static YEARLY_REVENUE_TREND: QueryTemplate = QueryTemplate {
    id: "yearly_revenue_trend",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)
WHERE m.release_date IS NOT NULL
RETURN substring(m.release_date, 0, 4) AS year, SUM(m.revenue) AS total_revenue
ORDER BY year ASC",
    params: &[],
    fields: &["year", "total_revenue"],
    limit: None,
};

static GENRE_POPULARITY_TREND: QueryTemplate = QueryTemplate {
    id: "genre_popularity_trend",
    shape: TemplateShape::Aggregate,
    cypher: "MATCH (m:Movie)-[:BELONGS_TO_GENRE]->(g:Genre)
WHERE m.release_date IS NOT NULL
RETURN g.name AS genre, substring(m.release_date, 0, 4) AS year, COUNT(m) AS movie_count
ORDER BY year ASC, movie_count DESC",
    params: &[],
    fields: &["genre", "year", "movie_count"],
    limit: None,
};
