//! Canonical-name tables and the three-level corpus taxonomy.
//!
//! The taxonomy is static, read-only lookup data: collection → division/seder
//! → individual work. Canonical (English) work names are the join key between
//! this module, the live [`WorkRegistry`](crate::registry::WorkRegistry), and
//! the lexical store; the Hebrew→canonical maps cover the spellings users
//! actually type, including common variants (ישעיה/ישעיהו, תהלים/תהילים).
//!
//! Nothing here is behavior, but the tables are load-bearing: every scope
//! resolution and every Hebrew display name goes through them.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// One of the three canonical text collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    /// Scripture (Torah, Prophets, Writings).
    Tanakh,
    /// The Mishnah, six orders of tractates.
    Mishnah,
    /// The Babylonian Talmud.
    Bavli,
}

impl CollectionType {
    /// All collections, in taxonomy order.
    pub const ALL: [Self; 3] = [Self::Tanakh, Self::Mishnah, Self::Bavli];

    /// The stable lowercase identifier stored alongside segments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tanakh => "tanakh",
            Self::Mishnah => "mishnah",
            Self::Bavli => "bavli",
        }
    }

    /// Parse a stable identifier back into a collection.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tanakh" => Some(Self::Tanakh),
            "mishnah" => Some(Self::Mishnah),
            "bavli" => Some(Self::Bavli),
            _ => None,
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Corpus-level keywords naming Scripture as a whole.
pub const TANAKH_KEYWORDS: [&str; 2] = ["תנ\"ך", "תנך"];

/// The three Scriptural division names (Torah, Prophets, Writings).
pub const DIVISIONS: [&str; 3] = ["תורה", "נביאים", "כתובים"];

/// Hebrew→canonical names for the books of Scripture.
pub const TANAKH_HEB_TO_CANONICAL: &[(&str, &str)] = &[
    ("בראשית", "Genesis"),
    ("שמות", "Exodus"),
    ("ויקרא", "Leviticus"),
    ("במדבר", "Numbers"),
    ("דברים", "Deuteronomy"),
    ("יהושע", "Joshua"),
    ("שופטים", "Judges"),
    ("שמואל א", "I Samuel"),
    ("שמואל ב", "II Samuel"),
    ("מלכים א", "I Kings"),
    ("מלכים ב", "II Kings"),
    ("ישעיהו", "Isaiah"),
    ("ישעיה", "Isaiah"),
    ("ירמיהו", "Jeremiah"),
    ("ירמיה", "Jeremiah"),
    ("יחזקאל", "Ezekiel"),
    ("הושע", "Hosea"),
    ("יואל", "Joel"),
    ("עמוס", "Amos"),
    ("עובדיה", "Obadiah"),
    ("יונה", "Jonah"),
    ("מיכה", "Micah"),
    ("נחום", "Nahum"),
    ("חבקוק", "Habakkuk"),
    ("צפניה", "Zephaniah"),
    ("חגי", "Haggai"),
    ("זכריה", "Zechariah"),
    ("מלאכי", "Malachi"),
    ("תהלים", "Psalms"),
    ("תהילים", "Psalms"),
    ("משלי", "Proverbs"),
    ("איוב", "Job"),
    ("שיר השירים", "Song of Songs"),
    ("רות", "Ruth"),
    ("איכה", "Lamentations"),
    ("קהלת", "Ecclesiastes"),
    ("אסתר", "Esther"),
    ("דניאל", "Daniel"),
    ("עזרא", "Ezra"),
    ("נחמיה", "Nehemiah"),
    ("דברי הימים א", "I Chronicles"),
    ("דברי הימים ב", "II Chronicles"),
];

/// Hebrew→canonical names for the tractates of the Mishnah.
pub const MISHNAH_HEB_TO_CANONICAL: &[(&str, &str)] = &[
    // Zeraim
    ("ברכות", "Berakhot"),
    ("פאה", "Peah"),
    ("דמאי", "Demai"),
    ("כלאים", "Kilayim"),
    ("שביעית", "Sheviit"),
    ("תרומות", "Terumot"),
    ("מעשרות", "Maasrot"),
    ("מעשר שני", "Maaser Sheni"),
    ("חלה", "Challah"),
    ("ערלה", "Orlah"),
    ("ביכורים", "Bikkurim"),
    // Moed
    ("שבת", "Shabbat"),
    ("עירובין", "Eruvin"),
    ("פסחים", "Pesachim"),
    ("שקלים", "Shekalim"),
    ("יומא", "Yoma"),
    ("סוכה", "Sukkah"),
    ("ביצה", "Beitzah"),
    ("ראש השנה", "Rosh Hashanah"),
    ("תענית", "Taanit"),
    ("מגילה", "Megillah"),
    ("מועד קטן", "Moed Katan"),
    ("חגיגה", "Chagigah"),
    // Nashim
    ("יבמות", "Yevamot"),
    ("כתובות", "Ketubot"),
    ("נדרים", "Nedarim"),
    ("נזיר", "Nazir"),
    ("סוטה", "Sotah"),
    ("גיטין", "Gittin"),
    ("קידושין", "Kiddushin"),
    // Nezikin
    ("בבא קמא", "Bava Kamma"),
    ("בבא מציעא", "Bava Metzia"),
    ("בבא בתרא", "Bava Batra"),
    ("סנהדרין", "Sanhedrin"),
    ("מכות", "Makkot"),
    ("שבועות", "Shevuot"),
    ("עדויות", "Eduyot"),
    ("עבודה זרה", "Avodah Zarah"),
    ("אבות", "Avot"),
    ("הוריות", "Horayot"),
    // Kodashim
    ("זבחים", "Zevachim"),
    ("מנחות", "Menachot"),
    ("חולין", "Chullin"),
    ("בכורות", "Bechorot"),
    ("ערכין", "Arakhin"),
    ("תמורה", "Temurah"),
    ("כריתות", "Keritot"),
    ("מעילה", "Meilah"),
    ("תמיד", "Tamid"),
    ("מידות", "Middot"),
    ("קינים", "Kinnim"),
    // Tahorot
    ("כלים", "Kelim"),
    ("אהלות", "Oholot"),
    ("נגעים", "Negaim"),
    ("פרה", "Parah"),
    ("טהרות", "Taharot"),
    ("מקואות", "Mikvaot"),
    ("נדה", "Niddah"),
    ("מכשירין", "Makhshirin"),
    ("זבים", "Zavim"),
    ("טבול יום", "Tevul Yom"),
    ("ידים", "Yadayim"),
    ("עוקצין", "Uktzin"),
];

/// Hebrew→canonical names for the tractates of the Babylonian Talmud.
pub const BAVLI_HEB_TO_CANONICAL: &[(&str, &str)] = &[
    ("ברכות", "Berakhot"),
    ("שבת", "Shabbat"),
    ("עירובין", "Eruvin"),
    ("פסחים", "Pesachim"),
    ("ראש השנה", "Rosh Hashanah"),
    ("יומא", "Yoma"),
    ("סוכה", "Sukkah"),
    ("ביצה", "Beitzah"),
    ("תענית", "Taanit"),
    ("מגילה", "Megillah"),
    ("מועד קטן", "Moed Katan"),
    ("חגיגה", "Chagigah"),
    ("יבמות", "Yevamot"),
    ("כתובות", "Ketubot"),
    ("נדרים", "Nedarim"),
    ("נזיר", "Nazir"),
    ("סוטה", "Sotah"),
    ("גיטין", "Gittin"),
    ("קידושין", "Kiddushin"),
    ("בבא קמא", "Bava Kamma"),
    ("בבא מציעא", "Bava Metzia"),
    ("בבא בתרא", "Bava Batra"),
    ("סנהדרין", "Sanhedrin"),
    ("מכות", "Makkot"),
    ("שבועות", "Shevuot"),
    ("עבודה זרה", "Avodah Zarah"),
    ("הוריות", "Horayot"),
    ("זבחים", "Zevachim"),
    ("מנחות", "Menachot"),
    ("חולין", "Chullin"),
    ("בכורות", "Bechorot"),
    ("ערכין", "Arakhin"),
    ("תמורה", "Temurah"),
    ("כריתות", "Keritot"),
    ("מעילה", "Meilah"),
    ("תמיד", "Tamid"),
    ("נדה", "Niddah"),
];

/// Scriptural division → ordered canonical book list.
pub const TANAKH_DIVISIONS: &[(&str, &[&str])] = &[
    (
        "תורה",
        &["Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy"],
    ),
    (
        "נביאים",
        &[
            "Joshua",
            "Judges",
            "I Samuel",
            "II Samuel",
            "I Kings",
            "II Kings",
            "Isaiah",
            "Jeremiah",
            "Ezekiel",
            "Hosea",
            "Joel",
            "Amos",
            "Obadiah",
            "Jonah",
            "Micah",
            "Nahum",
            "Habakkuk",
            "Zephaniah",
            "Haggai",
            "Zechariah",
            "Malachi",
        ],
    ),
    (
        "כתובים",
        &[
            "Psalms",
            "Proverbs",
            "Job",
            "Song of Songs",
            "Ruth",
            "Lamentations",
            "Ecclesiastes",
            "Esther",
            "Daniel",
            "Ezra",
            "Nehemiah",
            "I Chronicles",
            "II Chronicles",
        ],
    ),
];

/// Mishnaic seder → ordered canonical tractate list.
pub const SEDER_MAP: &[(&str, &[&str])] = &[
    (
        "זרעים",
        &[
            "Berakhot",
            "Peah",
            "Demai",
            "Kilayim",
            "Sheviit",
            "Terumot",
            "Maasrot",
            "Maaser Sheni",
            "Challah",
            "Orlah",
            "Bikkurim",
        ],
    ),
    (
        "מועד",
        &[
            "Shabbat",
            "Eruvin",
            "Pesachim",
            "Shekalim",
            "Yoma",
            "Sukkah",
            "Beitzah",
            "Rosh Hashanah",
            "Taanit",
            "Megillah",
            "Moed Katan",
            "Chagigah",
        ],
    ),
    (
        "נשים",
        &[
            "Yevamot",
            "Ketubot",
            "Nedarim",
            "Nazir",
            "Sotah",
            "Gittin",
            "Kiddushin",
        ],
    ),
    (
        "נזיקין",
        &[
            "Bava Kamma",
            "Bava Metzia",
            "Bava Batra",
            "Sanhedrin",
            "Makkot",
            "Shevuot",
            "Eduyot",
            "Avodah Zarah",
            "Avot",
            "Horayot",
        ],
    ),
    (
        "קדשים",
        &[
            "Zevachim",
            "Menachot",
            "Chullin",
            "Bechorot",
            "Arakhin",
            "Temurah",
            "Keritot",
            "Meilah",
            "Tamid",
            "Middot",
            "Kinnim",
        ],
    ),
    (
        "טהרות",
        &[
            "Kelim",
            "Oholot",
            "Negaim",
            "Parah",
            "Tevul Yom",
            "Yadayim",
            "Uktzin",
            "Mikvaot",
            "Taharot",
        ],
    ),
];

/// Display-name exceptions: canonical works whose preferred Hebrew form is
/// not the first table spelling.
pub const CANONICAL_TO_HEB_OVERRIDE: &[(&str, &str)] = &[
    ("Isaiah", "ישעיהו"),
    ("Jeremiah", "ירמיהו"),
    ("Psalms", "תהלים"),
];

static TANAKH_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TANAKH_HEB_TO_CANONICAL.iter().copied().collect());
static MISHNAH_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| MISHNAH_HEB_TO_CANONICAL.iter().copied().collect());
static BAVLI_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| BAVLI_HEB_TO_CANONICAL.iter().copied().collect());

/// Inverted canonical→Hebrew maps; the first table spelling wins, and the
/// override table takes precedence over all of them at display time.
static CANONICAL_TO_HEB: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut out = HashMap::new();
    for table in [
        TANAKH_HEB_TO_CANONICAL,
        MISHNAH_HEB_TO_CANONICAL,
        BAVLI_HEB_TO_CANONICAL,
    ] {
        for (heb, canonical) in table {
            out.entry(*canonical).or_insert(*heb);
        }
    }
    out
});

/// Resolve a Hebrew token against the static tables, Scripture first.
///
/// Covers works not yet ingested (dry planning); the live registry is always
/// consulted before this fallback.
#[must_use]
pub fn static_canonical(token: &str) -> Option<&'static str> {
    TANAKH_MAP
        .get(token)
        .or_else(|| MISHNAH_MAP.get(token))
        .or_else(|| BAVLI_MAP.get(token))
        .copied()
}

/// The ordered canonical book list of a Scriptural division, if `name` is one.
#[must_use]
pub fn division_books(name: &str) -> Option<&'static [&'static str]> {
    TANAKH_DIVISIONS
        .iter()
        .find(|(div, _)| *div == name)
        .map(|(_, books)| *books)
}

/// The ordered canonical tractate list of a seder, if `name` is one.
#[must_use]
pub fn seder_tractates(name: &str) -> Option<&'static [&'static str]> {
    SEDER_MAP
        .iter()
        .find(|(seder, _)| *seder == name)
        .map(|(_, tractates)| *tractates)
}

/// The preferred Hebrew display spelling of a canonical work, if known.
#[must_use]
pub fn canonical_to_hebrew(canonical: &str) -> Option<&'static str> {
    CANONICAL_TO_HEB_OVERRIDE
        .iter()
        .find(|(c, _)| *c == canonical)
        .map(|(_, heb)| *heb)
        .or_else(|| CANONICAL_TO_HEB.get(canonical).copied())
}

/// Hebrew display name for a canonical work.
///
/// Strips a leading `Mishnah `/`Bavli ` qualifier, consults the override
/// table, then the inverted Hebrew tables. Unknown names fall back to the
/// stripped input so renderers never lose the reference.
#[must_use]
pub fn display_work_name(canonical: &str) -> String {
    let trimmed = canonical.trim();
    let base = ["Mishnah ", "mishnah ", "Bavli ", "bavli "]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed)
        .trim();
    match canonical_to_hebrew(base) {
        Some(heb) => heb.to_owned(),
        None if base.is_empty() => canonical.to_owned(),
        None => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_round_trip() {
        for collection in CollectionType::ALL {
            assert_eq!(CollectionType::parse(collection.as_str()), Some(collection));
        }
        assert_eq!(CollectionType::parse("zohar"), None);
    }

    #[test]
    fn collection_serde_uses_lowercase() {
        let json = serde_json::to_string(&CollectionType::Tanakh).unwrap();
        assert_eq!(json, "\"tanakh\"");
        let back: CollectionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CollectionType::Tanakh);
    }

    #[test]
    fn static_lookup_prefers_scripture() {
        assert_eq!(static_canonical("בראשית"), Some("Genesis"));
        assert_eq!(static_canonical("סוטה"), Some("Sotah"));
        // Shared spellings resolve to the same canonical name either way.
        assert_eq!(static_canonical("ברכות"), Some("Berakhot"));
        assert_eq!(static_canonical("לא קיים"), None);
    }

    #[test]
    fn spelling_variants_share_a_canonical_name() {
        assert_eq!(static_canonical("ישעיה"), static_canonical("ישעיהו"));
        assert_eq!(static_canonical("תהילים"), static_canonical("תהלים"));
    }

    #[test]
    fn divisions_cover_scripture_in_order() {
        let torah = division_books("תורה").unwrap();
        assert_eq!(torah.first(), Some(&"Genesis"));
        assert_eq!(torah.len(), 5);
        let neviim = division_books("נביאים").unwrap();
        assert!(neviim.contains(&"Isaiah"));
        assert_eq!(division_books("משנה"), None);
    }

    #[test]
    fn sedarim_are_six_and_ordered() {
        assert_eq!(SEDER_MAP.len(), 6);
        let zeraim = seder_tractates("זרעים").unwrap();
        assert_eq!(zeraim.first(), Some(&"Berakhot"));
        let nashim = seder_tractates("נשים").unwrap();
        assert!(nashim.contains(&"Sotah"));
        assert_eq!(seder_tractates("תורה"), None);
    }

    #[test]
    fn every_seder_tractate_has_a_hebrew_spelling() {
        for (_, tractates) in SEDER_MAP {
            for tractate in *tractates {
                assert!(
                    canonical_to_hebrew(tractate).is_some(),
                    "missing Hebrew spelling for {tractate}"
                );
            }
        }
    }

    #[test]
    fn every_division_book_has_a_hebrew_spelling() {
        for (_, books) in TANAKH_DIVISIONS {
            for book in *books {
                assert!(
                    canonical_to_hebrew(book).is_some(),
                    "missing Hebrew spelling for {book}"
                );
            }
        }
    }

    #[test]
    fn overrides_win_over_table_inversion() {
        assert_eq!(canonical_to_hebrew("Isaiah"), Some("ישעיהו"));
        assert_eq!(canonical_to_hebrew("Psalms"), Some("תהלים"));
        assert_eq!(canonical_to_hebrew("Atlantis"), None);
    }

    #[test]
    fn display_name_strips_collection_qualifier() {
        assert_eq!(display_work_name("Mishnah Berakhot"), "ברכות");
        assert_eq!(display_work_name("Bavli Sotah"), "סוטה");
        assert_eq!(display_work_name("Genesis"), "בראשית");
    }

    #[test]
    fn display_name_falls_back_to_input() {
        assert_eq!(display_work_name("Unknown Work"), "Unknown Work");
    }
}
