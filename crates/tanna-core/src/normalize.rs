//! Hebrew text normalization for tanna.
//!
//! All corpus text and query terms pass through one pure pipeline before
//! matching. [`normalize_text`] produces two forms:
//!
//! 1. **plain** — NFC Unicode normalization, HTML tags stripped, a narrow set
//!    of HTML entities resolved to spaces, trimmed. This is the display form.
//! 2. **normalized** — additionally stripped of Hebrew vowel/accent marks
//!    (U+0591–U+05C7), final letters (ך ם ן ף ץ) folded to their medial
//!    equivalents, punctuation mapped to spaces, whitespace runs squeezed.
//!    This is the matching form.
//!
//! Raw *query* input goes through the lighter [`normalize_query_input`]
//! first (quote-glyph folding and trailing-quote repair) so the planner's
//! pattern rules see one canonical quoting style.
//!
//! All functions here are total: they never fail and have no side effects.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Inseparable single-letter prefixes that attach to Hebrew words without a
/// space (and, vav, bet, kaf, lamed, mem, he). The leading empty string keeps
/// the bare term itself in every expansion.
const INSEPARABLE_PREFIXES: [&str; 7] = ["", "ו", "ב", "כ", "ל", "מ", "ה"];

/// Punctuation characters collapsed to spaces in the normalized form.
const PUNCTUATION: [char; 13] = [
    '“', '”', '"', '׳', '״', '\'', '’', ',', '.', '–', '—', '-', '·',
];

/// HTML entities resolved to a single space in the plain form.
const SPACE_ENTITIES: [&str; 2] = ["&thinsp;", "&nbsp;"];

/// The two text forms produced by [`normalize_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    /// Markup-stripped display form.
    pub plain: String,
    /// Mark-stripped, final-folded, punctuation-collapsed matching form.
    pub normalized: String,
}

/// Normalize a segment or term into its plain and matching forms.
#[must_use]
pub fn normalize_text(input: &str) -> NormalizedText {
    let nfc: String = input.nfc().collect();
    let mut plain = strip_html_tags(&nfc);
    for entity in SPACE_ENTITIES {
        if plain.contains(entity) {
            plain = plain.replace(entity, " ");
        }
    }

    let mut normalized = String::with_capacity(plain.len());
    for c in plain.chars() {
        if is_hebrew_mark(c) {
            continue;
        }
        if PUNCTUATION.contains(&c) {
            normalized.push(' ');
        } else {
            normalized.push(fold_final(c));
        }
    }
    let normalized = squeeze_whitespace(&normalized);

    NormalizedText {
        plain: plain.trim().to_owned(),
        normalized,
    }
}

/// Normalize raw query input ahead of planning.
///
/// Folds smart and Hebrew quote glyphs to their straight equivalents,
/// squeezes whitespace, and repairs a single unmatched trailing quote (a
/// common artifact of truncated chat input).
#[must_use]
pub fn normalize_query_input(input: &str) -> String {
    let folded: String = input
        .chars()
        .map(|c| match c {
            '”' | '“' | '״' | '„' => '"',
            '‘' | '’' | '‚' | '׳' => '\'',
            other => other,
        })
        .collect();
    let mut q = squeeze_whitespace(&folded);
    for quote in ['"', '\''] {
        let count = q.chars().filter(|&c| c == quote).count();
        if count % 2 != 0 && q.ends_with(quote) {
            q.pop();
            q.truncate(q.trim_end().len());
        }
    }
    q
}

/// Split text into matching-form tokens.
///
/// Tokens are the whitespace-separated words of the normalized form; empty
/// tokens never occur.
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    normalize_text(input)
        .normalized
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Expand a term with its inseparable-prefix variants.
///
/// Returns the bare term first, followed by the ו/ב/כ/ל/מ/ה-prefixed forms,
/// deduplicated while preserving order. Lexical backends use this so a search
/// for `אור` also surfaces `ואור`, `באור`, and so on.
#[must_use]
pub fn expand_prefixes(term: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(INSEPARABLE_PREFIXES.len());
    for prefix in INSEPARABLE_PREFIXES {
        let variant = format!("{prefix}{term}");
        if !out.contains(&variant) {
            out.push(variant);
        }
    }
    out
}

/// Hebrew cantillation, vowel, and point marks (U+0591–U+05C7).
const fn is_hebrew_mark(c: char) -> bool {
    matches!(c, '\u{0591}'..='\u{05C7}')
}

/// Fold a final-form letter to its medial equivalent.
const fn fold_final(c: char) -> char {
    match c {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => other,
    }
}

/// Remove `<...>` tag spans. An unterminated `<` run is kept verbatim.
fn strip_html_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse whitespace runs to single spaces and trim.
fn squeeze_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // ── normalize_text ──────────────────────────────────────────────────

    #[test]
    fn strips_vowel_and_accent_marks() {
        let res = normalize_text("בְּרֵאשִׁית בָּרָא");
        assert_eq!(res.plain, "בְּרֵאשִׁית בָּרָא");
        assert_eq!(res.normalized, "בראשית ברא");
    }

    #[test]
    fn folds_final_letters() {
        let res = normalize_text("לךָ םןףץ");
        assert_eq!(res.normalized, "לכ מנפצ");
    }

    #[test]
    fn resolves_space_entities_and_quotes() {
        let res = normalize_text("שלום&nbsp;עולם &thinsp; \"אמר\"");
        assert_eq!(res.plain, "שלום עולם   \"אמר\"");
        assert_eq!(res.normalized, "שלום עולם אמר");
    }

    #[test]
    fn strips_html_tags() {
        let res = normalize_text("<b>ויאמר</b> אלהים");
        assert_eq!(res.plain, "ויאמר אלהים");
    }

    #[test]
    fn keeps_unterminated_tag_verbatim() {
        let res = normalize_text("טקסט <שבור");
        assert_eq!(res.plain, "טקסט <שבור");
    }

    #[test]
    fn punctuation_collapses_to_spaces() {
        let res = normalize_text("אמר—רבי, עקיבא.");
        assert_eq!(res.normalized, "אמר רבי עקיבא");
    }

    #[test]
    fn total_on_empty_input() {
        let res = normalize_text("");
        assert_eq!(res.plain, "");
        assert_eq!(res.normalized, "");
    }

    #[test]
    fn gershayim_inside_word_becomes_space() {
        // Abbreviations like תנ"ך split on the quote mark in the matching
        // form; resolvers work on the raw token instead.
        let res = normalize_text("תנ״ך");
        assert_eq!(res.normalized, "תנ כ");
    }

    // ── normalize_query_input ───────────────────────────────────────────

    #[test]
    fn folds_hebrew_double_quotes() {
        let out = normalize_query_input("איפה מופיעה המילה ״אור״ בנביאים");
        assert_eq!(out, "איפה מופיעה המילה \"אור\" בנביאים");
    }

    #[test]
    fn folds_single_quote_glyphs() {
        let out = normalize_query_input("מצא את ׳אור׳ שם");
        assert_eq!(out, "מצא את 'אור' שם");
    }

    #[test]
    fn strips_unmatched_trailing_quote() {
        let out = normalize_query_input("שאלה כלשהי \"");
        assert_eq!(out, "שאלה כלשהי");
    }

    #[test]
    fn keeps_matched_quotes() {
        let out = normalize_query_input("\"אור\"");
        assert_eq!(out, "\"אור\"");
    }

    #[test]
    fn collapses_newlines() {
        let out = normalize_query_input("שורה ראשונה\nשורה שניה");
        assert_eq!(out, "שורה ראשונה שורה שניה");
    }

    // ── tokenize ────────────────────────────────────────────────────────

    #[test]
    fn tokenize_drops_punctuation_and_marks() {
        let tokens = tokenize("וַיֹּאמֶר, אֱלֹהִים");
        assert_eq!(tokens, vec!["ויאמר", "אלהים"]);
    }

    #[test]
    fn tokenize_empty_is_empty() {
        assert!(tokenize("   ").is_empty());
    }

    // ── expand_prefixes ─────────────────────────────────────────────────

    #[test]
    fn expansion_includes_bare_and_prefixed_forms() {
        let variants = expand_prefixes("אור");
        assert!(variants.contains(&"אור".to_owned()));
        assert!(variants.contains(&"ואור".to_owned()));
        assert!(variants.contains(&"באור".to_owned()));
    }

    #[test]
    fn expansion_has_no_duplicates() {
        let variants = expand_prefixes("אור");
        let unique: std::collections::BTreeSet<_> = variants.iter().collect();
        assert_eq!(unique.len(), variants.len());
    }

    #[test]
    fn expansion_puts_bare_term_first() {
        assert_eq!(expand_prefixes("אור")[0], "אור");
    }

    // ── Property invariants ─────────────────────────────────────────────

    proptest! {
        #[test]
        fn normalize_is_idempotent_on_normalized_form(
            input in "[ -~א-תךםןףץ\u{0591}-\u{05C7}]{0,64}",
        ) {
            let once = normalize_text(&input).normalized;
            let twice = normalize_text(&once).normalized;
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalized_form_has_no_marks_or_finals(
            input in "[ -~א-תךםןףץ\u{0591}-\u{05C7}]{0,64}",
        ) {
            let norm = normalize_text(&input).normalized;
            prop_assert!(!norm.chars().any(is_hebrew_mark));
            prop_assert!(!norm.chars().any(|c| "ךםןףץ".contains(c)));
            prop_assert!(!norm.contains("  "));
        }

        #[test]
        fn query_normalization_is_trim_stable(input in ".{0,64}") {
            let out = normalize_query_input(&input);
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
