//! End-to-end planning and execution over the in-memory store.
//!
//! These tests verify interactions between crates — planner, scope resolver,
//! executor, renderers — not individual components in isolation (those have
//! inline `#[cfg(test)]` modules). The focus is on:
//!
//! 1. Exact-reference lookup through to formatted rows
//! 2. Word-occurrence retrieval with scope filters and prefix expansion
//! 3. Disambiguation surfacing verbatim through the executor
//! 4. Refusals on zero-evidence queries
//! 5. Registry construction from a live store

use proptest::prelude::*;

use tanna::prelude::*;
use tanna_planner::render::OccurrenceRenderOptions;

// ═══════════════════════════════════════════════════════════════════════════
// Test helpers
// ═══════════════════════════════════════════════════════════════════════════

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(
        CollectionType::Tanakh,
        "Genesis",
        "Genesis 1:1",
        "בְּרֵאשִׁית בָּרָא אֱלֹהִים אֵת הַשָּׁמַיִם וְאֵת הָאָרֶץ",
    );
    store.insert(
        CollectionType::Tanakh,
        "Genesis",
        "Genesis 1:3",
        "וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר וַיְהִי אוֹר",
    );
    store.insert(
        CollectionType::Tanakh,
        "Isaiah",
        "Isaiah 9:1",
        "הָעָם הַהֹלְכִים בַּחֹשֶׁךְ רָאוּ אוֹר גָּדוֹל",
    );
    store.insert(
        CollectionType::Tanakh,
        "Psalms",
        "Psalms 119:105",
        "נֵר לְרַגְלִי דְבָרֶךָ וְאוֹר לִנְתִיבָתִי",
    );
    store.insert(
        CollectionType::Mishnah,
        "Berakhot",
        "Berakhot 1:1",
        "מאימתי קורין את שמע בערבית",
    );
    store.insert(
        CollectionType::Mishnah,
        "Berakhot",
        "Berakhot 3:1",
        "מי שמתו מוטל לפניו פטור מקרית שמע",
    );
    store.insert(
        CollectionType::Mishnah,
        "Avot",
        "Avot 3:14",
        "רבי עקיבא אומר חביב אדם שנברא בצלם",
    );
    store.insert(
        CollectionType::Mishnah,
        "Sotah",
        "Sotah 5:1",
        "רבי עקיבא דרש באותו היום",
    );
    store
}

fn registry(store: &MemoryStore) -> WorkRegistry {
    WorkRegistry::from_store(store).expect("list works")
}

fn run(query: &str, store: &MemoryStore, reg: &WorkRegistry) -> PlanOutcome {
    let plan = plan_query(query, reg);
    execute_plan(&plan, query, store, reg, &ExecuteOptions::default()).expect("execute")
}

// ═══════════════════════════════════════════════════════════════════════════
// Exact reference
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn exact_ref_round_trip() {
    let store = seeded_store();
    let reg = registry(&store);
    let plan = plan_query("בראשית 1:1", &reg);
    assert_eq!(plan.intent, QueryIntent::ExactRef);
    assert_eq!(
        plan.ref_.as_ref().map(|r| r.normalized_ref.as_str()),
        Some("Genesis 1:1")
    );

    let outcome = execute_plan(&plan, "בראשית 1:1", &store, &reg, &ExecuteOptions::default())
        .expect("execute");
    let PlanOutcome::Ok(ok) = &outcome else {
        panic!("expected OK, got {outcome:?}");
    };
    assert_eq!(ok.rows.len(), 1);
    assert!(ok.rows[0].ref_.starts_with("בראשית"));
    assert_eq!(ok.citations, vec!["Genesis 1:1".to_owned()]);

    let rendered = render_outcome(&outcome);
    assert!(rendered.contains("נמצאו 1 תוצאות"));
    assert!(rendered.contains("בראשית"));
}

#[test]
fn exact_ref_for_missing_verse_refuses() {
    let store = seeded_store();
    let reg = registry(&store);
    let outcome = run("בראשית 40:7", &store, &reg);
    assert!(matches!(outcome, PlanOutcome::Refusal { .. }));
}

// ═══════════════════════════════════════════════════════════════════════════
// Word occurrences
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn occurrences_scoped_to_a_work() {
    let store = seeded_store();
    let reg = registry(&store);
    let outcome = run("איפה מופיעה המילה \"אור\" בבראשית", &store, &reg);
    let PlanOutcome::Ok(ok) = &outcome else {
        panic!("expected OK, got {outcome:?}");
    };
    assert_eq!(ok.rows.len(), 1);
    assert_eq!(ok.citations, vec!["Genesis 1:3".to_owned()]);
}

#[test]
fn occurrences_scoped_to_a_division_expand_to_its_works() {
    let store = seeded_store();
    let reg = registry(&store);
    // נביאים contains Isaiah but not Genesis or Psalms.
    let outcome = run("איפה מופיעה המילה \"אור\" בנביאים", &store, &reg);
    let PlanOutcome::Ok(ok) = &outcome else {
        panic!("expected OK, got {outcome:?}");
    };
    assert_eq!(ok.rows.len(), 1);
    assert_eq!(ok.citations, vec!["Isaiah 9:1".to_owned()]);
}

#[test]
fn occurrence_rendering_uses_hebrew_numerals() {
    let store = seeded_store();
    let reg = registry(&store);
    let outcome = run("איפה מופיעה המילה \"אור\" בנביאים", &store, &reg);
    let rendered = render_word_occurrences(&outcome, &OccurrenceRenderOptions::default());
    assert!(rendered.contains("‘אור’"));
    assert!(rendered.contains("ישעיהו ט':א'"));
}

#[test]
fn prefixed_forms_count_as_occurrences() {
    let store = seeded_store();
    let reg = registry(&store);
    // Psalms has ואור; the prefix expansion finds it for the bare term.
    let outcome = run("איפה מופיעה המילה \"אור\" בתהלים", &store, &reg);
    let PlanOutcome::Ok(ok) = &outcome else {
        panic!("expected OK, got {outcome:?}");
    };
    assert_eq!(ok.citations, vec!["Psalms 119:105".to_owned()]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Disambiguation and refusal
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn chapter_without_work_surfaces_disambiguation_verbatim() {
    let store = seeded_store();
    let reg = registry(&store);
    let plan = plan_query("איפה מופיעה המילה אור בפרק 3", &reg);
    let expected = plan.disambiguation.clone().expect("disambiguation");

    let outcome = execute_plan(&plan, "q", &store, &reg, &ExecuteOptions::default())
        .expect("execute");
    let PlanOutcome::DisambiguationRequired {
        message,
        suggestions,
    } = &outcome
    else {
        panic!("expected disambiguation, got {outcome:?}");
    };
    assert_eq!(message, &expected.reason);
    assert_eq!(suggestions, &expected.suggestions);

    let rendered = render_outcome(&outcome);
    assert!(rendered.contains("הצעות:"));
}

#[test]
fn list_works_without_corpus_asks_and_with_corpus_aggregates() {
    let store = seeded_store();
    let reg = registry(&store);

    let ambiguous = run("איזה מסכתות מזכירות את רבי עקיבא", &store, &reg);
    assert!(matches!(
        ambiguous,
        PlanOutcome::DisambiguationRequired { .. }
    ));

    let outcome = run("איזה מסכתות במשנה מזכירות את רבי עקיבא", &store, &reg);
    let PlanOutcome::Ok(ok) = &outcome else {
        panic!("expected OK, got {outcome:?}");
    };
    let works: Vec<&str> = ok.works.iter().map(|w| w.work.as_str()).collect();
    assert!(works.contains(&"Avot"));
    assert!(works.contains(&"Sotah"));
    let rendered = render_outcome(&outcome);
    assert!(rendered.contains("מסכתות שנמצאו:"));
}

#[test]
fn zero_evidence_refuses_with_fixed_message() {
    let store = seeded_store();
    let reg = registry(&store);
    let outcome = run("איפה מופיעה המילה \"חשמל\" בבראשית", &store, &reg);
    let PlanOutcome::Refusal { message } = &outcome else {
        panic!("expected refusal, got {outcome:?}");
    };
    assert_eq!(message, "אין לי מספיק מקורות בקורפוס כדי לענות.");
}

// ═══════════════════════════════════════════════════════════════════════════
// Chapter topic
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn chapter_about_fetches_the_chapter_rows() {
    let store = seeded_store();
    let reg = registry(&store);
    let plan = plan_query("על מה מדבר פרק 3 בברכות", &reg);
    assert_eq!(plan.intent, QueryIntent::ChapterAbout);
    assert_eq!(plan.scope.work.as_deref(), Some("Berakhot"));

    let outcome = execute_plan(&plan, "q", &store, &reg, &ExecuteOptions::default())
        .expect("execute");
    let PlanOutcome::Ok(ok) = &outcome else {
        panic!("expected OK, got {outcome:?}");
    };
    assert_eq!(ok.citations, vec!["Berakhot 3:1".to_owned()]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Registry lifecycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn registry_snapshots_the_store() {
    let store = seeded_store();
    let reg = registry(&store);
    assert!(reg.contains(CollectionType::Tanakh, "Genesis"));
    assert!(reg.contains(CollectionType::Mishnah, "Avot"));
    assert!(!reg.contains(CollectionType::Bavli, "Shabbat"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Whole-pipeline invariants
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Planning is total: any input produces a plan with a named rule, and
    /// the plan survives a serde round-trip unchanged.
    #[test]
    fn planning_is_total_and_serializable(query in "\\PC{0,80}") {
        let store = seeded_store();
        let reg = registry(&store);
        let plan = plan_query(&query, &reg);
        prop_assert!(!plan.debug.matched_rule.is_empty());
        if let Some(d) = &plan.disambiguation {
            prop_assert!(!d.suggestions.is_empty());
        }
        let json = serde_json::to_string(&plan).expect("serialize");
        let back: QueryPlan = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(back, plan);
    }
}

#[test]
fn rebuild_after_ingestion_sees_new_works() {
    let mut store = seeded_store();
    let before = registry(&store);
    assert!(!before.contains(CollectionType::Bavli, "Shabbat"));

    store.insert(
        CollectionType::Bavli,
        "Shabbat",
        "Shabbat 2:1",
        "במה מדליקין ובמה אין מדליקין",
    );
    let after = registry(&store);
    assert!(after.contains(CollectionType::Bavli, "Shabbat"));
    // The old snapshot is unaffected.
    assert!(!before.contains(CollectionType::Bavli, "Shabbat"));
}
