use assay::error::RecognizerError;
use assay::intent::{EntityBinding, Intent, Slot};
use assay::recognizer::{
    EntityCategory, EntityRecognizer, NullRecognizer, RULES, RecognizedSpan, Recognition,
    Recognizer, match_rules, normalize_question,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct ScriptedRecognizer {
    spans: Vec<RecognizedSpan>,
    calls: AtomicUsize,
}

impl ScriptedRecognizer {
    fn new(spans: Vec<RecognizedSpan>) -> Self {
        Self {
            spans,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EntityRecognizer for ScriptedRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.spans.clone())
    }
}

#[derive(Debug)]
struct BrokenRecognizer;

#[async_trait]
impl EntityRecognizer for BrokenRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError> {
        Err(RecognizerError::Status {
            status: 503,
            body: "model loading".to_string(),
        })
    }
}

fn patterns_only() -> Recognizer {
    Recognizer::new(Arc::new(NullRecognizer))
}

fn matched(question: &str) -> Option<(Intent, EntityBinding)> {
    patterns_only().match_patterns(question)
}

#[test]
fn test_director_question_binds_movie() {
    let (intent, entities) = matched("Who directed The Matrix?").unwrap();
    assert_eq!(intent, Intent::FindDirector);
    assert_eq!(entities.get(Slot::Movie), Some("the matrix"));
    assert_eq!(entities.len(), 1);
}

#[test]
fn test_matching_ignores_case() {
    let lower = matched("who is the director of inception").unwrap();
    let upper = matched("WHO IS THE DIRECTOR OF INCEPTION").unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.0, Intent::FindDirector);
}

#[test]
fn test_dop_question_matches_after_lowercasing() {
    let (intent, entities) = matched("Who is the DOP of Blade Runner?").unwrap();
    assert_eq!(intent, Intent::FindDOP);
    assert_eq!(entities.get(Slot::Movie), Some("blade runner"));
}

#[test]
fn test_earlier_rule_shadows_later_rule() {
    let (intent, entities) = matched("Which movies are from the country of France?").unwrap();
    assert_eq!(intent, Intent::FindMoviesByCompany);
    assert_eq!(entities.get(Slot::Company), Some("the country of france"));
}

#[test]
fn test_country_rule_reachable_through_other_phrasings() {
    let (intent, entities) = matched("which movies were produced in japan").unwrap();
    assert_eq!(intent, Intent::FindMoviesByCountry);
    assert_eq!(entities.get(Slot::Country), Some("japan"));
}

#[test]
fn test_director_and_actor_questions_split_on_verb() {
    let (intent, entities) = matched("Which movies did Christopher Nolan direct?").unwrap();
    assert_eq!(intent, Intent::FindMoviesByDirector);
    assert_eq!(entities.get(Slot::Person), Some("christopher nolan"));

    let (intent, entities) = matched("which movies did tom hanks act in").unwrap();
    assert_eq!(intent, Intent::FindMoviesByActor);
    assert_eq!(entities.get(Slot::Person), Some("tom hanks"));
}

#[test]
fn test_genre_and_language_questions() {
    let (intent, entities) = matched("which movies belong to science fiction genre").unwrap();
    assert_eq!(intent, Intent::FindMoviesByGenre);
    assert_eq!(entities.get(Slot::Genre), Some("science fiction"));

    let (intent, entities) = matched("which movies are in english").unwrap();
    assert_eq!(intent, Intent::FindMoviesByLanguage);
    assert_eq!(entities.get(Slot::Language), Some("english"));
}

#[test]
fn test_year_is_captured_as_digits() {
    let (intent, entities) = matched("Which genres were most successful in 1999?").unwrap();
    assert_eq!(intent, Intent::SuccessfulGenresByYear);
    assert_eq!(entities.get(Slot::Year), Some("1999"));

    assert!(matched("which genres were most successful in the nineties").is_none());
}

#[test]
fn test_aggregate_questions_bind_nothing() {
    for (question, expected) in [
        ("What are the top 20 movies in each genre?", Intent::TopMoviesByGenre),
        ("Who are the top 5 most successful actors", Intent::TopSuccessfulActors),
        ("What is the yearly box office trend?", Intent::YearlyRevenueTrend),
        ("How has genre popularity changed over time?", Intent::GenrePopularityTrend),
    ] {
        let (intent, entities) = matched(question).unwrap();
        assert_eq!(intent, expected, "{question}");
        assert!(entities.is_empty());
    }
}

#[test]
fn test_patterns_are_anchored_at_start() {
    assert!(matched("tell me who directed the matrix").is_none());
}

#[test]
fn test_normalization_is_idempotent() {
    let once = normalize_question("  Who directed Alien??  ");
    assert_eq!(once, "who directed alien");
    assert_eq!(normalize_question(&once), once);
}

#[test]
fn test_match_rules_uses_first_match() {
    let normalized = normalize_question("who directed heat");
    let (intent, _) = match_rules(&RULES, &normalized).unwrap();
    assert_eq!(intent, Intent::FindDirector);
    assert_eq!(RULES.len(), 25);
}

#[tokio::test]
async fn test_pattern_match_skips_fallback() {
    let fallback = Arc::new(ScriptedRecognizer::new(vec![RecognizedSpan::new(
        EntityCategory::Person,
        "someone",
    )]));
    let recognizer = Recognizer::new(fallback.clone());

    let recognition = recognizer.recognize("who directed jaws").await;
    assert_eq!(recognition.intent(), Some(Intent::FindDirector));
    assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fallback_buckets_spans_by_category() {
    let fallback = Arc::new(ScriptedRecognizer::new(vec![
        RecognizedSpan::new(EntityCategory::Person, "Tom Hanks"),
        RecognizedSpan::new(EntityCategory::Other, "yesterday"),
        RecognizedSpan::new(EntityCategory::CreativeWork, " Big "),
        RecognizedSpan::new(EntityCategory::Organization, ""),
    ]));
    let recognizer = Recognizer::new(fallback.clone());

    let recognition = recognizer.recognize("tom hanks in big").await;
    let expected = EntityBinding::new()
        .with(Slot::Person, "tom hanks")
        .with(Slot::Movie, "big");
    assert_eq!(recognition, Recognition::FindInformation { entities: expected });
    assert_eq!(recognition.label(), "FindInformation");
    assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_last_span_wins_within_a_slot() {
    let recognizer = Recognizer::new(Arc::new(ScriptedRecognizer::new(vec![
        RecognizedSpan::new(EntityCategory::Person, "first"),
        RecognizedSpan::new(EntityCategory::Person, "second"),
    ])));

    let recognition = recognizer.recognize("first and second").await;
    let entities = recognition.entities().unwrap();
    assert_eq!(entities.get(Slot::Person), Some("second"));
}

#[tokio::test]
async fn test_no_rule_and_no_entities_is_unknown() {
    let recognition = patterns_only().recognize("tell me a joke").await;
    assert_eq!(recognition, Recognition::Unknown);
    assert_eq!(recognition.label(), "Unknown");
    assert!(recognition.entities().is_none());
}

#[tokio::test]
async fn test_fallback_failure_is_unknown() {
    let recognizer = Recognizer::new(Arc::new(BrokenRecognizer));
    let recognition = recognizer.recognize("something about tom hanks").await;
    assert_eq!(recognition, Recognition::Unknown);
}

#[test]
fn test_entity_labels_map_to_slots() {
    assert_eq!(EntityCategory::from_label("PERSON").slot(), Some(Slot::Person));
    assert_eq!(EntityCategory::from_label("work_of_art").slot(), Some(Slot::Movie));
    assert_eq!(EntityCategory::from_label("GPE").slot(), Some(Slot::Country));
    assert_eq!(EntityCategory::from_label("ORG").slot(), Some(Slot::Company));
    assert_eq!(EntityCategory::from_label("NORP").slot(), Some(Slot::Genre));
    assert_eq!(EntityCategory::from_label("DATE").slot(), None);
}
