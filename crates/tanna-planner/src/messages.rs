//! Fixed catalog of user-facing Hebrew messages.
//!
//! Disambiguation reasons, refusals, and advisory notes are looked up here by
//! reason code and substituted verbatim into outcomes, never computed.

use serde::{Deserialize, Serialize};

/// Why a plan needs disambiguation, refuses, or carries an advisory note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// A book/tractate token could not be resolved.
    UnknownBookOrTractate,
    /// A chapter number appeared without a resolvable work.
    ChapterNeedsWork,
    /// The work named alongside a chapter could not be resolved.
    ChapterUnknownWork,
    /// A tractate-list query did not say Mishnah or Bavli.
    TractatesWhichCorpus,
    /// A well-scoped query found zero evidence.
    InsufficientEvidence,
    /// The query contained no Hebrew at all.
    HebrewOnly,
    /// The query mixed Latin and Hebrew script.
    HebrewPreferred,
}

/// The fixed user-facing string for a reason code.
#[must_use]
pub const fn message(code: ReasonCode) -> &'static str {
    match code {
        ReasonCode::UnknownBookOrTractate => "לא זיהיתי את שם הספר/מסכת.",
        ReasonCode::ChapterNeedsWork => "נדרש לציין ספר/מסכת יחד עם מספר פרק.",
        ReasonCode::ChapterUnknownWork => "לא זיהיתי את שם הספר/מסכת עבור פרק.",
        ReasonCode::TractatesWhichCorpus => "האם הכוונה למסכתות במשנה או בבבלי?",
        ReasonCode::InsufficientEvidence => "אין לי מספיק מקורות בקורפוס כדי לענות.",
        ReasonCode::HebrewOnly => "בשלב זה עדיף לשאול בעברית בלבד. נסה לנסח מחדש בעברית.",
        ReasonCode::HebrewPreferred => "הערה: בשלב זה עדיף לשאול בעברית.",
    }
}
