use mindlog_core::model::distortion::{
    by_slug, emoji_for_slug, legacy_list, list, sorted_list, to_legacy_v0,
};
use std::collections::BTreeSet;

#[test]
fn catalog_is_fixed_and_in_declaration_order() {
    let entries = list();
    assert_eq!(entries.len(), 12);
    assert_eq!(entries[0].slug, "all-or-nothing");
    assert_eq!(entries[1].slug, "overgeneralization");
    assert_eq!(entries[11].slug, "other-blaming");
}

#[test]
fn slugs_are_unique() {
    let slugs: BTreeSet<&str> = list().iter().map(|entry| entry.slug).collect();
    assert_eq!(slugs.len(), list().len());
}

#[test]
fn by_slug_resolves_catalog_entries() {
    let entry = by_slug("fortune-telling").unwrap();
    assert_eq!(entry.label, "Fortune Telling");
    assert_eq!(entry.emoji, "🔮");
}

#[test]
fn by_slug_rejects_unknown_slugs() {
    let err = by_slug("positive-thinking").unwrap_err();
    assert_eq!(err.slug, "positive-thinking");
    assert!(err.to_string().contains("positive-thinking"));
}

#[test]
fn sorted_list_orders_by_case_insensitive_label() {
    let sorted = sorted_list();
    assert_eq!(sorted.len(), list().len());
    assert_eq!(sorted[0].label, "All or Nothing Thinking");

    let labels: Vec<String> = sorted
        .iter()
        .map(|entry| entry.label.to_uppercase())
        .collect();
    let mut expected = labels.clone();
    expected.sort();
    assert_eq!(labels, expected);
}

#[test]
fn emoji_for_slug_falls_back_to_shrug() {
    assert_eq!(emoji_for_slug("mind-reading"), "🧠");
    assert_eq!(emoji_for_slug("no-such-slug"), "🤷‍");
}

#[test]
fn legacy_view_carries_full_display_strings() {
    let entry = by_slug("labeling").unwrap();
    let legacy = to_legacy_v0(&entry);

    assert_eq!(legacy.slug, "labeling");
    assert_eq!(legacy.label, entry.label);
    assert_eq!(legacy.description, entry.description);
    assert_eq!(legacy.emoji.as_deref(), Some(entry.emoji));
    assert_eq!(legacy.selected, None);
}

#[test]
fn legacy_list_matches_sorted_catalog() {
    let legacy = legacy_list();
    let sorted = sorted_list();

    assert_eq!(legacy.len(), sorted.len());
    for (inline, entry) in legacy.iter().zip(sorted.iter()) {
        assert_eq!(inline.slug, entry.slug);
    }
}

#[test]
fn legacy_shape_serializes_without_absent_fields() {
    let mut legacy = to_legacy_v0(&by_slug("self-blaming").unwrap());
    legacy.emoji = None;

    let json = serde_json::to_value(&legacy).unwrap();
    assert_eq!(json["slug"], "self-blaming");
    assert!(json.get("emoji").is_none());
    assert!(json.get("selected").is_none());
}
