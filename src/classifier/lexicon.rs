// WHY: one canonical word list per concept, built once and shared by every classifier stage
// Entries are stored in normalized form (no diacritics, no tatweel)

use std::collections::HashSet;
use std::sync::OnceLock;

/// Third-person physical action verbs that mark a line as stage direction
/// Cognitive and speech-prone verbs (know, want, love...) are deliberately absent
pub const ACTION_VERBS: &[&str] = &[
    "يتحرك", "تتحرك", "يدخل", "تدخل", "يخرج", "تخرج", "ينظر", "تنظر", "يلتفت", "تلتفت",
    "يرفع", "ترفع", "يخفض", "تخفض", "يضع", "تضع", "يسحب", "تسحب", "يدفع", "تدفع",
    "يقف", "تقف", "يجلس", "تجلس", "يقوم", "تقوم", "ينهض", "تنهض", "يرقد", "ترقد",
    "ينام", "تنام", "يستيقظ", "تستيقظ", "يمشي", "تمشي", "يجري", "تجري", "يركض", "تركض",
    "يقفز", "تقفز", "يسقط", "تسقط", "يصرخ", "تصرخ", "يبكي", "تبكي", "يضحك", "تضحك",
    "يبتسم", "تبتسم", "يغني", "تغني", "يرقص", "ترقص", "يأكل", "تأكل", "يشرب", "تشرب",
    "يكتب", "تكتب", "يقرأ", "تقرأ", "يشم", "تشم", "يلمس", "تلمس", "يمسك", "تمسك",
    "يأخذ", "تأخذ", "يعطي", "تعطي", "يفتح", "تفتح", "يغلق", "تغلق", "يطرق", "تطرق",
    "يشق", "تشق", "يضرب", "تضرب", "يربت", "تربت", "يعانق", "تعانق", "يصفع", "تصفع",
    "يذهب", "تذهب", "يعود", "تعود", "يرحل", "ترحل", "يقترب", "تقترب", "يبتعد", "تبتعد",
    "يلتقط", "تلتقط", "يرمي", "ترمي", "يشير", "تشير", "يهز", "تهز", "يختبئ", "تختبئ",
    "يختفي", "تختفي", "يراقب", "تراقب", "يبحث", "تبحث", "يصعد", "تصعد", "ينزل", "تنزل",
    "يقتل", "تقتل", "يقاتل", "تقاتل", "يموت", "تموت", "يسافر", "تسافر", "ينتقل", "تنتقل",
];

/// First-person-plural camera openers ("we see", "we hear"...)
pub const NARRATIVE_OPENERS: &[&str] = &[
    "نرى", "ننظر", "نسمع", "نلاحظ", "نشاهد", "نشهد",
];

/// Descriptive/observational verbs that open narration lines
pub const OBSERVATIONAL_VERBS: &[&str] = &[
    "يبدو", "تبدو", "يظهر", "تظهر", "يبدأ", "تبدأ", "ينتهي", "تنتهي", "يستمر", "تستمر",
    "يتوقف", "تتوقف", "يحدث", "تحدث", "يكون", "تكون", "يوجد", "توجد", "يسود", "يخيم",
];

/// Standalone location nouns that may follow a bare scene number
pub const LOCATION_NOUNS: &[&str] = &[
    "مسجد", "بيت", "منزل", "شارع", "حديقة", "مدرسة", "جامعة", "مكتب", "محل", "مستشفى",
    "مطعم", "فندق", "سيارة", "غرفة", "قاعة", "ممر", "سطح", "ساحة", "مقبرة", "مخبز",
    "مكتبة", "نهر", "بحر", "جبل", "غابة", "سوق", "مصنع", "بنك", "محكمة", "سجن",
    "موقف", "محطة", "مطار", "ميناء", "كوبري", "كوبرى", "نفق", "مبنى", "قصر", "قصر عدلي",
    "نادي", "ملعب", "ملهى", "بار", "كازينو", "متحف", "مسرح", "سينما", "معرض", "مزرعة",
    "مختبر", "مستودع", "مقهى", "شركة", "كهف", "غرفة الكهف", "كهف المرايا", "مطبخ", "صالة",
];

/// Time-of-day tokens accepted in scene descriptors
pub const TIME_OF_DAY: &[&str] = &[
    "ليل", "ليلا", "الليل", "نهار", "نهارا", "النهار", "ل.", "ن.", "صباح", "صباحا", "الصباح",
    "مساء", "المساء", "فجر", "الفجر", "ظهر", "الظهر", "عصر", "العصر", "مغرب", "المغرب",
    "الغروب", "غروب", "شروق", "الشروق",
];

/// Interior/exterior tokens accepted in scene descriptors
pub const INTERIOR_EXTERIOR: &[&str] = &[
    "داخلي", "خارجي", "د.", "خ.", "داخلي/خارجي",
];

/// Whole-line transition cues, compared after normalization and case folding
pub const TRANSITIONS: &[&str] = &[
    "قطع", "قطع إلى", "إلى", "مزج", "مزج إلى", "ذوبان", "ذوبان إلى", "تلاشي", "تلاشي إلى",
    "تلاشي داخل", "تلاشي خارج", "تتلاشى إلى", "اقتطاع إلى", "تحول إلى", "انتقال إلى",
    "خارج المشهد", "cut to", "fade in", "fade out", "fade to black", "dissolve to",
    "smash cut to", "match cut to", "jump cut to",
];

/// Bullet characters that may prefix a pasted "name: speech" line
pub const BULLETS: &[char] = &[
    '\u{2022}', '\u{00B7}', '\u{25CF}', '\u{25CB}', '\u{25E6}', '\u{25A0}', '\u{25AA}', '\u{25AB}',
    '\u{2023}', '\u{2043}', '*',
];

/// Arabic conjunction prefixes that may attach to a verb ("ويجلس", "فيقف")
const CONJUNCTION_PREFIXES: &[&str] = &["و", "ف"];

/// Definite article that may prefix a location noun
const DEFINITE_ARTICLE: &str = "ال";

/// Efficient lexicon lookup using HashSet for O(1) performance
pub struct Lexicon {
    action_verbs: HashSet<&'static str>,
    narrative_openers: HashSet<&'static str>,
    observational_verbs: HashSet<&'static str>,
    locations: HashSet<&'static str>,
    descriptor_tokens: HashSet<&'static str>,
    transitions: HashSet<&'static str>,
}

impl Lexicon {
    /// Build the lexicon from the canonical lists
    pub fn new() -> Self {
        Self {
            action_verbs: ACTION_VERBS.iter().copied().collect(),
            narrative_openers: NARRATIVE_OPENERS.iter().copied().collect(),
            observational_verbs: OBSERVATIONAL_VERBS.iter().copied().collect(),
            locations: LOCATION_NOUNS.iter().copied().collect(),
            descriptor_tokens: TIME_OF_DAY
                .iter()
                .chain(INTERIOR_EXTERIOR.iter())
                .copied()
                .collect(),
            transitions: TRANSITIONS.iter().copied().collect(),
        }
    }

    /// Process-wide instance, built on first use
    pub fn shared() -> &'static Lexicon {
        static SHARED: OnceLock<Lexicon> = OnceLock::new();
        SHARED.get_or_init(Lexicon::new)
    }

    /// Check if a single word is an action verb, allowing an attached "و"/"ف"
    pub fn is_action_verb(&self, word: &str) -> bool {
        let word = trim_word(word);
        if self.action_verbs.contains(word) {
            return true;
        }
        CONJUNCTION_PREFIXES.iter().any(|prefix| {
            word.strip_prefix(prefix)
                .map(|rest| self.action_verbs.contains(rest))
                .unwrap_or(false)
        })
    }

    /// Check if a word is a camera opener or an observational verb
    pub fn is_narrative_opener(&self, word: &str) -> bool {
        let word = trim_word(word);
        self.narrative_openers.contains(word) || self.observational_verbs.contains(word)
    }

    /// First word of a normalized line, skipping one leading dash
    pub fn first_word<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = line.trim_start();
        let line = line.strip_prefix('-').unwrap_or(line);
        line.split_whitespace().next()
    }

    /// True when the first word (after an optional dash) is an action verb
    pub fn starts_with_action_verb(&self, line: &str) -> bool {
        self.first_word(line)
            .map(|word| self.is_action_verb(word))
            .unwrap_or(false)
    }

    /// True when the first word (after an optional dash) is a narrative opener
    pub fn starts_with_narrative_opener(&self, line: &str) -> bool {
        self.first_word(line)
            .map(|word| self.is_narrative_opener(word))
            .unwrap_or(false)
    }

    /// True when any word of the line is an action verb
    pub fn contains_action_verb(&self, line: &str) -> bool {
        line.split_whitespace().any(|word| self.is_action_verb(word))
    }

    /// True when an action verb sits between two other words (not first, not last)
    pub fn has_embedded_action_verb(&self, line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 3 {
            return false;
        }
        words[1..words.len() - 1]
            .iter()
            .any(|word| self.is_action_verb(word))
    }

    /// Check if the entire line is a location noun, with or without the definite article
    pub fn is_location(&self, line: &str) -> bool {
        let line = line.trim();
        if self.locations.contains(line) {
            return true;
        }
        line.strip_prefix(DEFINITE_ARTICLE)
            .map(|rest| !rest.is_empty() && self.locations.contains(rest))
            .unwrap_or(false)
    }

    /// Check if a single token is a time-of-day or interior/exterior marker
    pub fn is_descriptor_token(&self, token: &str) -> bool {
        self.descriptor_tokens.contains(token)
    }

    /// Check if a normalized line is exactly one of the transition cues
    /// A single trailing ":" or "." is ignored and Latin text is case folded
    pub fn is_transition(&self, line: &str) -> bool {
        let line = line.trim();
        let line = line
            .strip_suffix(':')
            .or_else(|| line.strip_suffix('.'))
            .unwrap_or(line)
            .trim_end();
        if line.is_empty() {
            return false;
        }
        if self.transitions.contains(line) {
            return true;
        }
        let folded = line.to_lowercase();
        self.transitions.contains(folded.as_str())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop punctuation glued to a word so "يجلس." and "يجلس," still match
fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| {
        matches!(c, '.' | ',' | '!' | '?' | '\u{061F}' | '\u{061B}' | ';' | ':' | '"' | '\u{2026}')
    })
}

/// Split a descriptor phrase into tokens on whitespace, dashes, slashes and commas
pub fn descriptor_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || matches!(c, '-' | '/' | ','))
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> &'static Lexicon {
        Lexicon::shared()
    }

    fn assert_unique(name: &str, list: &[&str]) {
        let mut seen = HashSet::new();
        for entry in list {
            assert!(seen.insert(*entry), "duplicate entry {entry:?} in {name}");
        }
    }

    #[test]
    fn test_lexicons_are_deduplicated() {
        assert_unique("ACTION_VERBS", ACTION_VERBS);
        assert_unique("NARRATIVE_OPENERS", NARRATIVE_OPENERS);
        assert_unique("OBSERVATIONAL_VERBS", OBSERVATIONAL_VERBS);
        assert_unique("LOCATION_NOUNS", LOCATION_NOUNS);
        assert_unique("TIME_OF_DAY", TIME_OF_DAY);
        assert_unique("INTERIOR_EXTERIOR", INTERIOR_EXTERIOR);
        assert_unique("TRANSITIONS", TRANSITIONS);
    }

    #[test]
    fn test_lexicon_entries_are_arabic_or_lowercase() {
        for entry in ACTION_VERBS.iter().chain(NARRATIVE_OPENERS).chain(OBSERVATIONAL_VERBS) {
            assert!(
                entry.chars().all(crate::classifier::normalization::is_arabic_letter),
                "non-Arabic token {entry:?} in verb lists"
            );
        }
        for entry in TRANSITIONS {
            assert_eq!(entry.to_lowercase(), *entry);
        }
    }

    #[test]
    fn test_action_verb_lookup() {
        let lexicon = lexicon();
        assert!(lexicon.is_action_verb("يدخل"));
        assert!(lexicon.is_action_verb("ويجلس"));
        assert!(lexicon.is_action_verb("يجلس."));
        assert!(!lexicon.is_action_verb("يعرف"));
        assert!(!lexicon.is_action_verb("أحمد"));

        assert!(lexicon.starts_with_action_verb("يدخل أحمد إلى الغرفة."));
        assert!(lexicon.starts_with_action_verb("- تقف سارة"));
        assert!(!lexicon.starts_with_action_verb("أحمد يدخل"));
        assert!(lexicon.contains_action_verb("أحمد يدخل"));
    }

    #[test]
    fn test_narrative_openers() {
        let lexicon = lexicon();
        assert!(lexicon.starts_with_narrative_opener("نرى فراغا مضيئا"));
        assert!(lexicon.starts_with_narrative_opener("- نسمع صوت الباب"));
        assert!(lexicon.starts_with_narrative_opener("يبدو المكان هادئا"));
        assert!(!lexicon.starts_with_narrative_opener("أحمد يرى"));
    }

    #[test]
    fn test_embedded_action_verb() {
        let lexicon = lexicon();
        assert!(lexicon.has_embedded_action_verb("ثم يجلس على الكرسي"));
        assert!(!lexicon.has_embedded_action_verb("يجلس على الكرسي"));
        assert!(!lexicon.has_embedded_action_verb("أنا لا أجلس"));
        assert!(!lexicon.has_embedded_action_verb("اجلس"));
    }

    #[test]
    fn test_location_lookup() {
        let lexicon = lexicon();
        assert!(lexicon.is_location("بيت"));
        assert!(lexicon.is_location("البيت"));
        assert!(lexicon.is_location("غرفة الكهف"));
        assert!(!lexicon.is_location("بيت أحمد الكبير"));
        assert!(!lexicon.is_location("ال"));
    }

    #[test]
    fn test_transition_lookup() {
        let lexicon = lexicon();
        assert!(lexicon.is_transition("قطع إلى:"));
        assert!(lexicon.is_transition("قطع"));
        assert!(lexicon.is_transition("CUT TO:"));
        assert!(lexicon.is_transition("Fade Out."));
        assert!(!lexicon.is_transition("قطع الحبل بسرعة"));
        assert!(!lexicon.is_transition(":"));
    }

    #[test]
    fn test_descriptor_tokens() {
        let tokens: Vec<&str> = descriptor_tokens("ليل - داخلي/خارجي").collect();
        assert_eq!(tokens, vec!["ليل", "داخلي", "خارجي"]);
        assert!(lexicon().is_descriptor_token("د."));
        assert!(!lexicon().is_descriptor_token("قليل"));
    }
}
