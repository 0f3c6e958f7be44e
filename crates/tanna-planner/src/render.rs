//! Result rendering: Hebrew numerals, reference formatting, and outcome
//! pretty-printers.
//!
//! References are stored canonically (`"Genesis 1:3"`) and rendered for
//! display with the Hebrew work name and gematria numerals (`"בראשית א:ג"`).

use std::sync::LazyLock;

use regex::Regex;

use tanna_core::taxonomy::display_work_name;

use crate::types::{PlanOutcome, ScopeNode};

/// Clip length for occurrence rows.
const OCCURRENCE_MAX_CHARS: usize = 160;

/// Clip length for generic result rows.
const ROW_MAX_CHARS: usize = 120;

static REF_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s+(\d+):(\d+)$").unwrap_or_else(|e| panic!("{e}")));

static HTML_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("&[a-zA-Z0-9#]+;").unwrap_or_else(|e| panic!("{e}")));

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<[^>]*>").unwrap_or_else(|e| panic!("{e}")));

const ONES: [(u32, &str); 9] = [
    (1, "א"),
    (2, "ב"),
    (3, "ג"),
    (4, "ד"),
    (5, "ה"),
    (6, "ו"),
    (7, "ז"),
    (8, "ח"),
    (9, "ט"),
];

const TENS: [(u32, &str); 9] = [
    (90, "צ"),
    (80, "פ"),
    (70, "ע"),
    (60, "ס"),
    (50, "נ"),
    (40, "מ"),
    (30, "ל"),
    (20, "כ"),
    (10, "י"),
];

const HUNDREDS: [(u32, &str); 4] = [(400, "ת"), (300, "ש"), (200, "ר"), (100, "ק")];

/// Render a positive number as gematria letters.
///
/// 15 and 16 are written טו and טז (avoiding letter pairs that spell the
/// divine name) with no punctuation; a single-letter result takes a geresh,
/// a multi-letter result takes a gershayim before the last letter. Zero
/// renders as the decimal digit.
#[must_use]
pub fn number_to_hebrew(num: u32) -> String {
    if num == 0 {
        return num.to_string();
    }
    if num == 15 {
        return "טו".to_owned();
    }
    if num == 16 {
        return "טז".to_owned();
    }
    let mut n = num;
    let mut letters: Vec<&str> = Vec::new();
    for (value, letter) in HUNDREDS {
        while n >= value {
            letters.push(letter);
            n -= value;
        }
    }
    for (value, letter) in TENS {
        if n >= value {
            letters.push(letter);
            n -= value;
            break;
        }
    }
    if n > 0 {
        if let Some((_, letter)) = ONES.iter().find(|(value, _)| *value == n) {
            letters.push(letter);
        }
    }
    if letters.len() == 1 {
        return format!("{}'", letters[0]);
    }
    let last = letters.pop().unwrap_or_default();
    format!("{}״{last}", letters.concat())
}

/// Rewrite a `"<work> <chapter>:<verse>"` reference with Hebrew-numeral
/// chapter and verse. References of any other shape pass through unchanged.
#[must_use]
pub fn format_hebrew_ref(ref_: &str) -> String {
    let Some(caps) = REF_SHAPE.captures(ref_) else {
        return ref_.to_owned();
    };
    let work = caps.get(1).map_or("", |m| m.as_str());
    let chapter = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
    let verse = caps.get(3).and_then(|m| m.as_str().parse::<u32>().ok());
    match (chapter, verse) {
        (Some(c), Some(v)) => {
            format!("{work} {}:{}", number_to_hebrew(c), number_to_hebrew(v))
        }
        _ => ref_.to_owned(),
    }
}

/// Prefix a stored reference with the work's Hebrew display name.
///
/// Strips an existing canonical or Hebrew work prefix from the reference
/// first so the name never doubles.
#[must_use]
pub fn format_ref(work: &str, ref_: &str) -> String {
    let canonical = work.trim();
    if canonical.is_empty() {
        return ref_.trim().to_owned();
    }
    let hebrew = display_work_name(canonical);
    let mut rest = ref_.trim();
    for prefix in [canonical, hebrew.as_str()] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped.trim_start();
            break;
        }
    }
    if rest.starts_with(hebrew.as_str()) {
        return rest.to_owned();
    }
    format!("{hebrew} {rest}")
}

fn clip_chars(text: &str, max: usize, marker: &str) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}{marker}")
}

/// Resolve residual markup in stored display text: the common entities, then
/// any other entity and tag conservatively to spaces, then squeeze.
fn sanitize_display_text(text: &str) -> String {
    let t = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    let t = HTML_ENTITY.replace_all(&t, " ");
    let t = HTML_TAG.replace_all(&t, " ");
    t.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Generic text rendering of any outcome.
///
/// Disambiguations render the reason and a bulleted suggestion list;
/// refusals render their message; answers render the headline plus either
/// the per-work list or the clipped rows and a citation line.
#[must_use]
pub fn render_outcome(outcome: &PlanOutcome) -> String {
    match outcome {
        PlanOutcome::DisambiguationRequired {
            message,
            suggestions,
        } => {
            format!("{message}\nהצעות:\n- {}", suggestions.join("\n- "))
        }
        PlanOutcome::Refusal { message } => message.clone(),
        PlanOutcome::Ok(ok) => {
            if !ok.works.is_empty() {
                let list = ok
                    .works
                    .iter()
                    .map(|w| {
                        if w.count > 0 {
                            format!("{} ({})", w.work, w.count)
                        } else {
                            w.work.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                return format!("{}\n{list}", ok.answer);
            }
            let rows = ok
                .rows
                .iter()
                .map(|r| format!("{}: {}", r.ref_, clip_chars(&r.text, ROW_MAX_CHARS, "...")))
                .collect::<Vec<_>>()
                .join("\n");
            let citations = if ok.citations.is_empty() {
                String::new()
            } else {
                format!("ציטוטים: {}", ok.citations.join(", "))
            };
            [ok.answer.as_str(), rows.as_str(), citations.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Presentation knobs for [`render_word_occurrences`].
#[derive(Debug, Clone, Default)]
pub struct OccurrenceRenderOptions {
    /// Term to show in the headline; defaults to the plan's term.
    pub term: Option<String>,
    /// How many rows are being displayed; defaults to all returned rows.
    pub limit: Option<usize>,
    /// Display offset into the full match set.
    pub offset: usize,
}

/// Headline plus per-row rendering of a word-occurrence answer.
///
/// Rows get Hebrew-numeral references and markup-sanitized, clipped text.
/// Non-answer outcomes render just their message.
#[must_use]
pub fn render_word_occurrences(outcome: &PlanOutcome, opts: &OccurrenceRenderOptions) -> String {
    let ok = match outcome {
        PlanOutcome::Ok(ok) => ok,
        PlanOutcome::DisambiguationRequired { message, .. }
        | PlanOutcome::Refusal { message } => return message.clone(),
    };

    let base_count = ok.totals.map_or(ok.rows.len(), |t| t.scanned);
    let limit = opts.limit.unwrap_or(ok.rows.len());
    let term = opts
        .term
        .clone()
        .or_else(|| ok.plan.term.clone())
        .unwrap_or_default();
    let scope = match (&ok.plan.scope.work, &ok.plan.scope.node) {
        (Some(work), _) => format!("ב{work}"),
        (None, Some(ScopeNode::Subcorpus(name))) => format!("ב{name}"),
        (None, Some(ScopeNode::Corpus(c))) => format!("ב{c}"),
        (None, Some(ScopeNode::Work(name))) => format!("ב{name}"),
        (None, None) => "בקורפוס".to_owned(),
    };

    let headline = if base_count > 0 {
        let showing = if base_count > limit {
            let from = if opts.offset > 0 {
                format!(" החל מ-{}", opts.offset + 1)
            } else {
                String::new()
            };
            format!(" הנה {limit}{from} מהם:")
        } else {
            String::new()
        };
        format!("נמצאו {base_count} מקורות {scope} שבהם מופיעה המילה ‘{term}’.{showing}")
    } else {
        format!("לא נמצאו מקורות {scope} עבור המילה ‘{term}’.")
    };

    let body = ok
        .rows
        .iter()
        .map(|r| {
            format!(
                "{} — {}",
                format_hebrew_ref(&r.ref_),
                clip_chars(&sanitize_display_text(&r.text), OCCURRENCE_MAX_CHARS, "… (מקוצר)")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    if body.is_empty() {
        headline
    } else {
        format!("{headline}\n{body}")
    }
}
