//! Text report for a corpus-wide quotation scan.

use serde::{Deserialize, Serialize};

use tanna_core::taxonomy::display_work_name;

use crate::link::{QuoteDetectionResult, Verdict};

/// Fixed note shown above unconfirmed candidates.
const UNCONFIRMED_NOTE: &str =
    "לא נמצא פסוק תואם בוודאות לפי הכללים השמרניים. אפשר להרחיב כללים/לחפש ידנית.";

/// Aggregate counters accumulated over one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTotals {
    /// How many segments were scanned.
    pub scanned: usize,
    /// How many scanned segments produced at least one candidate.
    pub with_candidates: usize,
    /// Confirmed candidates across all segments.
    pub confirmed: usize,
    /// Unconfirmed candidates across all segments.
    pub unconfirmed: usize,
    /// Whether the scan stopped at its segment limit.
    pub limited: bool,
}

/// One scanned segment together with its quote detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteScanRow {
    /// Display reference of the segment.
    pub ref_: String,
    /// Display text of the segment.
    pub text: String,
    /// Detections for this segment, in candidate order.
    pub detections: Vec<QuoteDetectionResult>,
}

/// Presentation knobs for [`render_quote_report`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Include the matched verse's text under each confirmed candidate.
    pub show_verse_text: bool,
    /// Include the scanned segment's full text under each candidate.
    pub show_source_text: bool,
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}…")
}

/// The Hebrew display name plus remainder of a Scripture reference like
/// `"Genesis 1:3"`.
fn hebrew_target_ref(target_ref: &str) -> String {
    match target_ref.split_once(' ') {
        Some((work, rest)) => format!("{} {rest}", display_work_name(work)),
        None => display_work_name(target_ref),
    }
}

/// Render a scan's rows and totals as a sectioned text report.
///
/// Layout: a header with totals, a `✅` section of confirmed candidates with
/// their top link, a `⚠️` section of unconfirmed candidates, and a
/// partial-display footer when the scan hit its limit.
#[must_use]
pub fn render_quote_report(
    rows: &[QuoteScanRow],
    totals: &ScanTotals,
    opts: &ReportOptions,
) -> String {
    let header = format!(
        "נמצאו {} מקורות עם סימני ציטוט תנ\"ך. שויכו בוודאות {}. ללא שיוך ודאי {}.",
        totals.with_candidates, totals.confirmed, totals.unconfirmed
    );

    let mut confirmed = Vec::new();
    let mut unconfirmed = Vec::new();
    for row in rows {
        for detection in &row.detections {
            let signal = if detection.candidate.signal.is_empty() {
                "ציטוט"
            } else {
                detection.candidate.signal.as_str()
            };
            let intro = format!("{} — {signal}: {}", row.ref_, clip(&detection.candidate.raw, 120));
            if detection.verdict == Verdict::Confirmed && !detection.links.is_empty() {
                let top = &detection.links[0];
                let mut lines = vec![intro];
                lines.push(format!(
                    "שויך ל: {} (ציון {:.2})",
                    hebrew_target_ref(&top.target_ref),
                    top.score
                ));
                if opts.show_verse_text && !top.target_text.is_empty() {
                    lines.push(format!("פסוק: {}", clip(&top.target_text, 90)));
                }
                if opts.show_source_text {
                    lines.push(format!("טקסט מלא: {}", clip(&row.text, 120)));
                }
                confirmed.push(lines.join("\n"));
            } else {
                unconfirmed.push(intro);
            }
        }
    }

    let mut sections = vec![header];
    if !confirmed.is_empty() {
        sections.push("✅ ציטוטים עם שיוך ודאי".to_owned());
        sections.push(confirmed.join("\n\n"));
    }
    if !unconfirmed.is_empty() {
        sections.push("⚠️ ציטוטים ללא שיוך ודאי".to_owned());
        sections.push(UNCONFIRMED_NOTE.to_owned());
        sections.push(unconfirmed.join("\n"));
    }
    if totals.limited {
        sections.push(format!(
            "הצגה חלקית: מוצגים {} מתוך {} מקורות שנסרקו.",
            rows.len(),
            totals.scanned
        ));
    }
    sections.join("\n").trim().to_owned()
}
