// WHY: decomposes a scene header into number + descriptor and picks the combined or number-only render

use serde::{Deserialize, Serialize};

use super::lexicon::{descriptor_tokens, Lexicon};
use super::shapes::SceneHeaderParts;
use super::BlockType;

/// What kind of text follows the scene number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorKind {
    /// Contains a time-of-day or interior/exterior token
    TimeLocation,
    /// Dash-joined compound place, e.g. "بيت أحمد - الصالة"
    CompoundLocation,
    /// Anything else
    PlainText,
}

/// Parsed scene header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneHeaderInfo {
    pub scene_number: u64,
    pub head: String,
    pub descriptor: Option<String>,
    pub descriptor_kind: Option<DescriptorKind>,
    pub is_time_location_combined: bool,
}

impl SceneHeaderInfo {
    /// Build the header from the matched parts of a normalized line
    pub fn from_parts(parts: &SceneHeaderParts<'_>, lexicon: &Lexicon) -> Self {
        let scene_number = parse_scene_number(parts.digits);
        let rest = parts.rest.trim();

        let descriptor_kind = if rest.is_empty() {
            None
        } else if has_descriptor_token(rest, lexicon) {
            Some(DescriptorKind::TimeLocation)
        } else if is_compound_phrase(rest) {
            Some(DescriptorKind::CompoundLocation)
        } else {
            Some(DescriptorKind::PlainText)
        };

        Self {
            scene_number,
            head: parts.head.to_string(),
            descriptor: descriptor_kind.map(|_| rest.to_string()),
            is_time_location_combined: descriptor_kind == Some(DescriptorKind::TimeLocation),
            descriptor_kind,
        }
    }

    /// Combined when a descriptor follows the number on the same line
    pub fn block_type(&self) -> BlockType {
        if self.descriptor.is_some() {
            BlockType::SceneHeaderCombined
        } else {
            BlockType::SceneHeaderNumber
        }
    }
}

/// Parse the scene digits; numbers past u64 saturate
pub fn parse_scene_number(digits: &str) -> u64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .try_fold(0u64, |acc, d| acc.checked_mul(10)?.checked_add(u64::from(d)))
        .unwrap_or(u64::MAX)
}

/// Token match against the time/interior lexicon, tolerating one trailing "." or ":"
fn is_descriptor_word(token: &str, lexicon: &Lexicon) -> bool {
    lexicon.is_descriptor_token(token)
        || lexicon.is_descriptor_token(token.trim_end_matches(&['.', ':'][..]))
}

fn has_descriptor_token(text: &str, lexicon: &Lexicon) -> bool {
    descriptor_tokens(text).any(|token| is_descriptor_word(token, lexicon))
}

/// At least two non-empty sides around a dash
fn is_compound_phrase(text: &str) -> bool {
    text.contains('-') && text.split('-').filter(|side| !side.trim().is_empty()).count() >= 2
}

/// The whole line is made of time-of-day / interior-exterior tokens only
pub fn is_descriptor_only(line: &str, lexicon: &Lexicon) -> bool {
    let mut tokens = descriptor_tokens(line).peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(|token| is_descriptor_word(token, lexicon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::shapes::ShapeMatcher;

    fn parse(line: &str) -> SceneHeaderInfo {
        let matcher = ShapeMatcher::new().unwrap();
        let parts = matcher.scene_header_parts(line).unwrap();
        SceneHeaderInfo::from_parts(&parts, Lexicon::shared())
    }

    #[test]
    fn test_time_location_header() {
        let info = parse("مشهد 1 - ليل - داخلي");
        assert_eq!(info.scene_number, 1);
        assert_eq!(info.head, "مشهد 1");
        assert_eq!(info.descriptor.as_deref(), Some("ليل - داخلي"));
        assert_eq!(info.descriptor_kind, Some(DescriptorKind::TimeLocation));
        assert!(info.is_time_location_combined);
        assert_eq!(info.block_type(), BlockType::SceneHeaderCombined);
    }

    #[test]
    fn test_compound_and_plain_headers() {
        let compound = parse("مشهد 2: بيت أحمد - الصالة");
        assert_eq!(compound.descriptor_kind, Some(DescriptorKind::CompoundLocation));
        assert!(!compound.is_time_location_combined);

        let plain = parse("مشهد 3 بيت أحمد");
        assert_eq!(plain.descriptor_kind, Some(DescriptorKind::PlainText));
        assert_eq!(plain.block_type(), BlockType::SceneHeaderCombined);
    }

    #[test]
    fn test_number_only_header() {
        let info = parse("مشهد 4");
        assert_eq!(info.descriptor, None);
        assert_eq!(info.descriptor_kind, None);
        assert_eq!(info.block_type(), BlockType::SceneHeaderNumber);
    }

    #[test]
    fn test_token_boundaries() {
        // "قليل" contains "ليل" but is not a time token
        let info = parse("مشهد 5 مكان قليل الضوء");
        assert_eq!(info.descriptor_kind, Some(DescriptorKind::PlainText));
    }

    #[test]
    fn test_scene_number_saturates() {
        assert_eq!(parse_scene_number("42"), 42);
        assert_eq!(parse_scene_number("99999999999999999999999"), u64::MAX);
        let info = parse("مشهد 123456789012345678901234567890");
        assert_eq!(info.scene_number, u64::MAX);
    }

    #[test]
    fn test_descriptor_only_lines() {
        let lexicon = Lexicon::shared();
        assert!(is_descriptor_only("ليل - داخلي", lexicon));
        assert!(is_descriptor_only("نهار/خارجي", lexicon));
        assert!(is_descriptor_only("ن. د.", lexicon));
        assert!(!is_descriptor_only("ليل طويل", lexicon));
        assert!(!is_descriptor_only("", lexicon));
        assert!(!is_descriptor_only(" - ", lexicon));
    }
}
