//! Turns result rows into the fixed answer sentences, one rule per intent.
//!
//! Rules never reorder rows. Grouped answers keep groups in first-seen order.

use crate::error::RenderError;
use crate::executor::ResultRow;
use crate::intent::{EntityBinding, Intent, Slot};
use serde_json::Value;

pub const NOT_UNDERSTOOD: &str = "I'm sorry, I couldn't understand your question.";
pub const NO_RESULTS: &str = "I'm sorry, I couldn't find any results.";
pub const EXECUTION_FAILED: &str =
    "I'm sorry, something went wrong while querying the movie database.";
pub const RENDER_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";

/// Shown for money and runtime values the store does not know.
pub const UNKNOWN: &str = "Unknown";

/// Movie lists in lookup answers are cut to this many titles.
pub const LIST_LIMIT: usize = 10;

pub type RenderRule = fn(&EntityBinding, &[ResultRow]) -> Result<String, RenderError>;

#[must_use]
pub fn rule(intent: Intent) -> RenderRule {
    match intent {
        Intent::FindDirector => find_director,
        Intent::FindActors => find_actors,
        Intent::FindMoviesByGenre => find_movies_by_genre,
        Intent::FindMoviesByDirector => find_movies_by_director,
        Intent::FindMoviesByLanguage => find_movies_by_language,
        Intent::FindMoviesByCompany => find_movies_by_company,
        Intent::FindMoviesByCountry => find_movies_by_country,
        Intent::FindMusicComposer => find_music_composer,
        Intent::FindDOP => find_dop,
        Intent::FindRevenue => find_revenue,
        Intent::FindMoviesByActor => find_movies_by_actor,
        Intent::FindLanguagesOfMovie => find_languages_of_movie,
        Intent::FindCompanyOfMovie => find_company_of_movie,
        Intent::FindCountryOfMovie => find_country_of_movie,
        Intent::FindAllDetails => find_all_details,
        Intent::TopMoviesByGenre => top_movies_by_genre,
        Intent::TopSuccessfulActors => top_successful_actors,
        Intent::SuccessfulGenresByYear => successful_genres_by_year,
        Intent::TopDirectorsByRating => top_directors_by_rating,
        Intent::LanguageSuccess => language_success,
        Intent::TopCompaniesBySuccess => top_companies_by_success,
        Intent::RevenueTopGenres => revenue_top_genres,
        Intent::TopMoviesByCountry => top_movies_by_country,
        Intent::YearlyRevenueTrend => yearly_revenue_trend,
        Intent::GenrePopularityTrend => genre_popularity_trend,
    }
}

/// Applies the intent's rule. Malformed rows are an error; callers answer
/// those with [`RENDER_FALLBACK`].
pub fn try_render(
    intent: Intent,
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    if rows.is_empty() {
        return Ok(NO_RESULTS.to_string());
    }
    rule(intent)(entities, rows)
}

// ---------------------------------------------------------------------------
// lookups

fn find_director(entities: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let names = titled_column(rows, "director")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!("The director of '{movie}' is {names}."))
}

fn find_actors(entities: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let names = titled_column(rows, "actor")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!("The actors in '{movie}' are: {names}."))
}

fn find_movies_by_genre(entities: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let movies = movie_list(rows)?;
    let genre = entity(entities, Slot::Genre);
    Ok(format!("Movies in the '{genre}' genre include: {movies}."))
}

fn find_movies_by_director(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let movies = movie_list(rows)?;
    let person = entity(entities, Slot::Person);
    Ok(format!("Movies directed by {person} include: {movies}."))
}

fn find_movies_by_language(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let movies = movie_list(rows)?;
    let language = entity(entities, Slot::Language);
    Ok(format!("Movies in the language '{language}' include: {movies}."))
}

fn find_movies_by_company(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let movies = movie_list(rows)?;
    let company = entity(entities, Slot::Company);
    Ok(format!("Movies produced by '{company}' include: {movies}."))
}

fn find_movies_by_country(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let movies = movie_list(rows)?;
    let country = entity(entities, Slot::Country);
    Ok(format!("Movies produced in '{country}' include: {movies}."))
}

fn find_music_composer(entities: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let names = titled_column(rows, "music_composer")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!("The music composer(s) for '{movie}' is/are {names}."))
}

fn find_dop(entities: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let names = titled_column(rows, "director_of_photography")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!(
        "The director(s) of photography for '{movie}' is/are {names}."
    ))
}

fn find_revenue(entities: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let revenue = money_field(&rows[0], 0, "revenue")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!("The revenue of '{movie}' is {revenue}."))
}

fn find_movies_by_actor(entities: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let movies = movie_list(rows)?;
    let person = entity(entities, Slot::Person);
    Ok(format!("Movies acted in by {person} include: {movies}."))
}

fn find_languages_of_movie(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let languages = titled_column(rows, "language")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!("The languages spoken in '{movie}' are: {languages}."))
}

fn find_company_of_movie(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let companies = titled_column(rows, "company")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!(
        "The production company/companies for '{movie}' include: {companies}."
    ))
}

fn find_country_of_movie(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let countries = titled_column(rows, "country")?;
    let movie = entity(entities, Slot::Movie);
    Ok(format!(
        "The country/countries that produced '{movie}' include: {countries}."
    ))
}

fn find_all_details(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let row = &rows[0];
    let runtime = match optional_number(row, 0, "runtime")? {
        Some(minutes) if minutes > 0.0 => format!("{} minutes", plain(minutes)),
        _ => UNKNOWN.to_string(),
    };
    Ok(format!(
        "Details of '{}':\n\
         - Release Date: {}\n\
         - Budget: {}\n\
         - Runtime: {runtime}\n\
         - Vote Average: {:.2}\n\
         - Status: {}\n\
         - Revenue: {}\n\
         - Original Language: {}",
        text(row, 0, "title")?,
        text(row, 0, "release_date")?,
        money_field(row, 0, "budget")?,
        number(row, 0, "vote_average")?,
        text(row, 0, "status")?,
        money_field(row, 0, "revenue")?,
        text(row, 0, "original_language")?,
    ))
}

// ---------------------------------------------------------------------------
// aggregates

fn top_movies_by_genre(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let groups = grouped(rows, "genre", |row, i| {
        Ok(format!(
            "{} (Rating: {:.2})",
            text(row, i, "movie")?,
            number(row, i, "rating")?
        ))
    })?;
    Ok(format!("Top 20 movies by each genre:\n{groups}"))
}

fn top_successful_actors(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let lines = lines(rows, |row, i| {
        Ok(format!(
            "{} ({} movies)",
            text(row, i, "actor")?,
            plain(number(row, i, "successful_movies")?)
        ))
    })?;
    Ok(format!("Top 5 most successful actors:\n{lines}"))
}

fn successful_genres_by_year(
    entities: &EntityBinding,
    rows: &[ResultRow],
) -> Result<String, RenderError> {
    let lines = lines(rows, |row, i| {
        Ok(format!(
            "{} (Avg. Rating: {:.2})",
            text(row, i, "genre")?,
            number(row, i, "average_rating")?
        ))
    })?;
    let year = entities.get(Slot::Year).unwrap_or_default();
    Ok(format!("Most successful genres in {year}:\n{lines}"))
}

fn top_directors_by_rating(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let lines = lines(rows, |row, i| {
        Ok(format!(
            "{} (Avg. Rating: {:.2})",
            text(row, i, "director")?,
            number(row, i, "avg_rating")?
        ))
    })?;
    Ok(format!("Top 10 directors by average movie rating:\n{lines}"))
}

fn language_success(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let lines = lines(rows, |row, i| {
        Ok(format!(
            "{} (Avg. Rating: {:.2})",
            text(row, i, "language")?,
            number(row, i, "average_rating")?
        ))
    })?;
    Ok(format!("Languages with the highest-rated movies:\n{lines}"))
}

fn top_companies_by_success(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let lines = lines(rows, |row, i| {
        Ok(format!(
            "{} ({} successful movies)",
            text(row, i, "company")?,
            plain(number(row, i, "successful_movies")?)
        ))
    })?;
    Ok(format!(
        "Production companies with the most successful movies:\n{lines}"
    ))
}

fn revenue_top_genres(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let lines = lines(rows, |row, i| {
        Ok(format!(
            "{} (Total Revenue: {})",
            text(row, i, "genre")?,
            money_field(row, i, "total_revenue")?
        ))
    })?;
    Ok(format!("Genres with the highest total revenue:\n{lines}"))
}

fn top_movies_by_country(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let groups = grouped(rows, "country", |row, i| {
        Ok(format!(
            "{} ({})",
            text(row, i, "movie")?,
            money_field(row, i, "revenue")?
        ))
    })?;
    Ok(format!("Highest-grossing movies by country:\n{groups}"))
}

fn yearly_revenue_trend(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let lines = lines(rows, |row, i| {
        Ok(format!(
            "{}: {}",
            text(row, i, "year")?,
            money_field(row, i, "total_revenue")?
        ))
    })?;
    Ok(format!("Yearly box office revenue trend:\n{lines}"))
}

fn genre_popularity_trend(_: &EntityBinding, rows: &[ResultRow]) -> Result<String, RenderError> {
    let groups = grouped(rows, "year", |row, i| {
        Ok(format!(
            "{} ({} movies)",
            text(row, i, "genre")?,
            plain(number(row, i, "movie_count")?)
        ))
    })?;
    Ok(format!("Genre popularity over time:\n{groups}"))
}

// ---------------------------------------------------------------------------
// helpers

fn entity(entities: &EntityBinding, slot: Slot) -> String {
    title_case(entities.get(slot).unwrap_or_default())
}

fn text(row: &ResultRow, index: usize, field: &'static str) -> Result<String, RenderError> {
    match row.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        None | Some(Value::Null) => Err(RenderError::MissingField { row: index, field }),
        Some(_) => Err(RenderError::InvalidField { row: index, field }),
    }
}

fn number(row: &ResultRow, index: usize, field: &'static str) -> Result<f64, RenderError> {
    match row.get(field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or(RenderError::InvalidField { row: index, field }),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| RenderError::InvalidField { row: index, field }),
        None | Some(Value::Null) => Err(RenderError::MissingField { row: index, field }),
        Some(_) => Err(RenderError::InvalidField { row: index, field }),
    }
}

/// Like [`number`], but a null value is reported as `None`.
fn optional_number(
    row: &ResultRow,
    index: usize,
    field: &'static str,
) -> Result<Option<f64>, RenderError> {
    match row.get(field) {
        Some(Value::Null) => Ok(None),
        _ => number(row, index, field).map(Some),
    }
}

/// Money column where null and 0 both mean "not known".
fn money_field(row: &ResultRow, index: usize, field: &'static str) -> Result<String, RenderError> {
    Ok(optional_number(row, index, field)?.map_or_else(|| UNKNOWN.to_string(), money))
}

fn column(rows: &[ResultRow], field: &'static str) -> Result<Vec<String>, RenderError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| text(row, i, field))
        .collect()
}

fn titled_column(rows: &[ResultRow], field: &'static str) -> Result<String, RenderError> {
    Ok(column(rows, field)?
        .iter()
        .map(|name| title_case(name))
        .collect::<Vec<_>>()
        .join(", "))
}

fn movie_list(rows: &[ResultRow]) -> Result<String, RenderError> {
    let limit = rows.len().min(LIST_LIMIT);
    Ok(column(&rows[..limit], "movie_title")?.join(", "))
}

fn lines<F>(rows: &[ResultRow], line: F) -> Result<String, RenderError>
where
    F: Fn(&ResultRow, usize) -> Result<String, RenderError>,
{
    Ok(rows
        .iter()
        .enumerate()
        .map(|(i, row)| line(row, i))
        .collect::<Result<Vec<_>, _>>()?
        .join("\n"))
}

/// One `key: item, item` line per distinct key, in first-seen order.
fn grouped<F>(rows: &[ResultRow], key: &'static str, item: F) -> Result<String, RenderError>
where
    F: Fn(&ResultRow, usize) -> Result<String, RenderError>,
{
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let name = text(row, i, key)?;
        let entry = item(row, i)?;
        match groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, items)) => items.push(entry),
            None => groups.push((name, vec![entry])),
        }
    }

    Ok(groups
        .into_iter()
        .map(|(name, items)| format!("{name}: {}", items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Capitalizes the first letter of every alphabetic run, lowercasing the rest.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

/// `$1,234.50`, or `Unknown` for the stored 0 placeholder.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn money(value: f64) -> String {
    if value == 0.0 {
        return UNKNOWN.to_string();
    }

    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}.{cents}", thousands(whole))
}

fn thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole numbers without a fraction, anything else as-is.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
