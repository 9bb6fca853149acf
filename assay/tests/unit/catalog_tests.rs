use assay::catalog::{TemplateShape, synthesize, template};
use assay::error::SynthesisError;
use assay::executor::ResultRow;
use assay::intent::{EntityBinding, Intent, Slot};
use assay::recognizer::RULES;
use assay::render::try_render;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

fn full_binding() -> EntityBinding {
    Slot::iter().fold(EntityBinding::new(), |binding, slot| {
        let value = if slot == Slot::Year { "1999" } else { "sample" };
        binding.with(slot, value)
    })
}

#[test]
fn test_every_intent_synthesizes_with_all_slots_bound() {
    let entities = full_binding();
    for intent in Intent::iter() {
        let query = synthesize(intent, &entities).unwrap();
        assert_eq!(query.template_id, template(intent).id);
        assert_eq!(query.params.len(), template(intent).params.len());
    }
}

#[test]
fn test_every_rule_fills_exactly_its_template_slots() {
    assert_eq!(RULES.len(), Intent::iter().count());
    for rule in RULES.iter() {
        let captured: BTreeSet<Slot> = rule.slots.iter().copied().collect();
        let required: BTreeSet<Slot> = template(rule.intent).required_slots().collect();
        assert_eq!(captured, required, "{}", rule.intent);
    }
}

#[test]
fn test_every_intent_has_one_rule() {
    let ruled: BTreeSet<Intent> = RULES.iter().map(|rule| rule.intent).collect();
    let all: BTreeSet<Intent> = Intent::iter().collect();
    assert_eq!(ruled, all);
}

#[test]
fn test_lookups_take_one_parameter() {
    for intent in Intent::iter() {
        let template = template(intent);
        if template.shape == TemplateShape::Lookup {
            assert_eq!(template.params.len(), 1, "{intent}");
            assert_eq!(template.limit, None, "{intent}");
        }
    }
}

#[test]
fn test_missing_slot_fails_synthesis() {
    let entities = EntityBinding::new().with(Slot::Person, "tom hanks");
    let err = synthesize(Intent::FindDirector, &entities).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::MissingSlot {
            intent: Intent::FindDirector,
            slot: Slot::Movie,
        }
    );
}

#[test]
fn test_parameters_carry_normalized_values() {
    let entities = EntityBinding::new().with(Slot::Movie, "  The Matrix ");
    let query = synthesize(Intent::FindDirector, &entities).unwrap();
    assert_eq!(query.params.get("movie_title").map(String::as_str), Some("the matrix"));
    assert!(query.cypher.contains("$movie_title"));
}

#[test]
fn test_parameterless_templates_ignore_bindings() {
    let query = synthesize(Intent::YearlyRevenueTrend, &full_binding()).unwrap();
    assert!(query.params.is_empty());
}

#[test]
fn test_year_template_binds_year() {
    let entities = EntityBinding::new().with(Slot::Year, "2008");
    let query = synthesize(Intent::SuccessfulGenresByYear, &entities).unwrap();
    assert_eq!(query.params.get("year").map(String::as_str), Some("2008"));
}

#[test]
fn test_declared_fields_satisfy_render_rules() {
    let entities = full_binding();
    for intent in Intent::iter() {
        let row = template(intent)
            .fields
            .iter()
            .fold(ResultRow::new(), |row, field| row.with(field, 42));
        assert!(try_render(intent, &entities, &[row]).is_ok(), "{intent}");
    }
}
