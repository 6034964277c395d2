// WHY: line classifier interface; shape predicates first, then a context-aware decision stage
// Every line resolves to exactly one BlockType, Action being the universal fallback

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod contextual;
pub mod lexicon;
pub mod normalization;
pub mod scene_header;
pub mod shapes;

pub use lexicon::Lexicon;
pub use normalization::{normalize_line, normalize_line_into};
pub use scene_header::{DescriptorKind, SceneHeaderInfo};
pub use shapes::ShapeMatcher;

/// Closed set of block types a line can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Invocation,
    SceneHeaderCombined,
    SceneHeaderNumber,
    SceneHeaderDescriptor,
    SceneLocationOnly,
    Transition,
    CharacterCue,
    Parenthetical,
    Dialogue,
    Action,
    Blank,
}

impl BlockType {
    /// Scene heading family: combined, number, descriptor, location-only
    pub fn is_scene_header(self) -> bool {
        matches!(
            self,
            BlockType::SceneHeaderCombined
                | BlockType::SceneHeaderNumber
                | BlockType::SceneHeaderDescriptor
                | BlockType::SceneLocationOnly
        )
    }

    /// Stable kebab-case name used in TSV output
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Invocation => "invocation",
            BlockType::SceneHeaderCombined => "scene-header-combined",
            BlockType::SceneHeaderNumber => "scene-header-number",
            BlockType::SceneHeaderDescriptor => "scene-header-descriptor",
            BlockType::SceneLocationOnly => "scene-location-only",
            BlockType::Transition => "transition",
            BlockType::CharacterCue => "character-cue",
            BlockType::Parenthetical => "parenthetical",
            BlockType::Dialogue => "dialogue",
            BlockType::Action => "action",
            BlockType::Blank => "blank",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input line with its canonical form; raw is kept for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine<'a> {
    pub raw: &'a str,
    pub normalized: String,
    /// 1-based
    pub line_number: usize,
}

impl<'a> NormalizedLine<'a> {
    pub fn new(raw: &'a str, line_number: usize) -> Self {
        Self {
            raw,
            normalized: normalize_line(raw),
            line_number,
        }
    }
}

/// Classification state carried from one line to the next within a single document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationContext {
    pub last_format: Option<BlockType>,
    pub in_dialogue_block: bool,
    /// True right after a cue and across its parentheticals
    pub pending_character_line: bool,
    pub current_character_name: Option<String>,
}

impl ClassificationContext {
    /// Context after emitting `block_type` for `normalized`
    pub fn advance(self, block_type: BlockType, normalized: &str) -> Self {
        let mut next = self;

        next.in_dialogue_block = match block_type {
            BlockType::CharacterCue => true,
            BlockType::Action | BlockType::Blank | BlockType::Transition => false,
            t if t.is_scene_header() => false,
            _ => next.in_dialogue_block,
        };

        match block_type {
            BlockType::CharacterCue => {
                next.current_character_name = Some(cue_name(normalized).to_string());
            }
            // Action only follows a named speaker when strong action evidence interrupted the dialogue
            BlockType::Action | BlockType::Blank | BlockType::Transition => {
                next.current_character_name = None;
            }
            t if t.is_scene_header() => next.current_character_name = None,
            _ => {}
        }

        next.pending_character_line = match block_type {
            BlockType::CharacterCue => true,
            BlockType::Parenthetical => next.pending_character_line,
            _ => false,
        };

        next.last_format = Some(block_type);
        next
    }
}

/// Speaker name of a cue line: trailing colon, one leading bullet and leading dash removed
pub fn cue_name(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_suffix(':').unwrap_or(text).trim_end();
    let text = text.strip_prefix(lexicon::BULLETS).map(str::trim_start).unwrap_or(text);
    normalization::strip_leading_dash(text)
}

/// Why a line got its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationReason {
    Shape,
    CueByColon,
    CueByName,
    DialogueContinuation,
    ActionEvidence,
    Fallback,
}

/// Outcome of classifying a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub block_type: BlockType,
    pub reason: ClassificationReason,
    /// Present for SceneHeaderCombined and SceneHeaderNumber
    pub scene_header: Option<SceneHeaderInfo>,
}

impl Classification {
    fn shape(block_type: BlockType) -> Self {
        Self {
            block_type,
            reason: ClassificationReason::Shape,
            scene_header: None,
        }
    }

    fn contextual(block_type: BlockType, reason: ClassificationReason) -> Self {
        Self {
            block_type,
            reason,
            scene_header: None,
        }
    }
}

/// Presentation sub-part of a block (used by combined scene headers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPart {
    pub block_type: BlockType,
    pub text: String,
}

/// One emitted block per input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredBlock {
    pub block_type: BlockType,
    pub text: String,
    pub order: usize,
    pub line_number: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<BlockPart>,
}

impl StructuredBlock {
    pub fn new(block_type: BlockType, text: impl Into<String>, line_number: usize) -> Self {
        Self {
            block_type,
            text: text.into(),
            order: 0,
            line_number,
            parts: Vec::new(),
        }
    }

    pub fn with_parts(mut self, parts: Vec<BlockPart>) -> Self {
        self.parts = parts;
        self
    }

    /// Blank placeholders are empty Action blocks
    pub fn is_placeholder(&self) -> bool {
        self.block_type == BlockType::Action && self.text.trim().is_empty()
    }
}

/// Re-number `order` to match each block's index
pub fn renumber(blocks: &mut [StructuredBlock]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.order = index;
    }
}

/// Tunable thresholds for the contextual stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRules {
    /// Lines with more words than this are never character cues
    pub max_cue_words: usize,
    /// Colon-free lines with more words than this lean toward action
    pub long_action_words: usize,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            max_cue_words: 7,
            long_action_words: 5,
        }
    }
}

/// Main classifier: compiled shapes, shared lexicon and rules
pub struct Classifier {
    rules: ClassificationRules,
    shapes: ShapeMatcher,
    lexicon: &'static Lexicon,
}

impl Classifier {
    pub fn new(rules: ClassificationRules) -> Result<Self> {
        Ok(Self {
            rules,
            shapes: ShapeMatcher::new()?,
            lexicon: Lexicon::shared(),
        })
    }

    pub fn with_default_rules() -> Result<Self> {
        Self::new(ClassificationRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_serializes_kebab_case() {
        let json = serde_json::to_string(&BlockType::SceneHeaderCombined).unwrap();
        assert_eq!(json, "\"scene-header-combined\"");
        let back: BlockType = serde_json::from_str("\"character-cue\"").unwrap();
        assert_eq!(back, BlockType::CharacterCue);
        assert_eq!(BlockType::SceneLocationOnly.to_string(), "scene-location-only");
    }

    #[test]
    fn test_scene_header_family() {
        assert!(BlockType::SceneHeaderNumber.is_scene_header());
        assert!(BlockType::SceneLocationOnly.is_scene_header());
        assert!(!BlockType::Transition.is_scene_header());
        assert!(!BlockType::Action.is_scene_header());
    }

    #[test]
    fn test_context_after_cue_and_parenthetical() {
        let ctx = ClassificationContext::default()
            .advance(BlockType::CharacterCue, "أحمد:");
        assert!(ctx.in_dialogue_block);
        assert!(ctx.pending_character_line);
        assert_eq!(ctx.current_character_name.as_deref(), Some("أحمد"));

        let ctx = ctx.advance(BlockType::Parenthetical, "(بهدوء)");
        assert!(ctx.pending_character_line);
        assert!(ctx.in_dialogue_block);

        let ctx = ctx.advance(BlockType::Dialogue, "مرحبا");
        assert!(!ctx.pending_character_line);
        assert!(ctx.in_dialogue_block);
        assert_eq!(ctx.current_character_name.as_deref(), Some("أحمد"));
        assert_eq!(ctx.last_format, Some(BlockType::Dialogue));
    }

    #[test]
    fn test_context_resets() {
        let speaking = ClassificationContext::default().advance(BlockType::CharacterCue, "سارة:");
        for reset in [
            BlockType::Blank,
            BlockType::Action,
            BlockType::Transition,
            BlockType::SceneHeaderNumber,
        ] {
            let ctx = speaking.clone().advance(reset, "");
            assert!(!ctx.in_dialogue_block, "{reset} should close the dialogue block");
            assert_eq!(ctx.current_character_name, None);
            assert!(!ctx.pending_character_line);
        }

        // Invocation leaves the dialogue state untouched
        let ctx = speaking.clone().advance(BlockType::Invocation, "بسم الله الرحمن الرحيم");
        assert!(ctx.in_dialogue_block);
        assert_eq!(ctx.current_character_name.as_deref(), Some("سارة"));
    }

    #[test]
    fn test_cue_name() {
        assert_eq!(cue_name("أحمد:"), "أحمد");
        assert_eq!(cue_name("- أم أحمد :"), "أم أحمد");
        assert_eq!(cue_name("فاطمة"), "فاطمة");
        assert_eq!(cue_name("• سارة:"), "سارة");
        assert_eq!(cue_name("*أحمد :"), "أحمد");
        assert_eq!(cue_name("•"), "");
    }

    #[test]
    fn test_renumber() {
        let mut blocks = vec![
            StructuredBlock::new(BlockType::Action, "أ", 1),
            StructuredBlock::new(BlockType::Action, "ب", 2),
        ];
        blocks[1].order = 9;
        renumber(&mut blocks);
        assert_eq!(blocks[0].order, 0);
        assert_eq!(blocks[1].order, 1);
        assert!(!blocks[0].is_placeholder());
        assert!(StructuredBlock::new(BlockType::Action, "", 3).is_placeholder());
    }
}
