// WHY: decision engine; shape stage first (first match wins), then cue/dialogue/action reasoning
// driven by the context of the previous lines

use tracing::debug;

use super::normalization::{has_sentence_punctuation, is_arabic_only, word_count};
use super::scene_header::{is_descriptor_only, SceneHeaderInfo};
use super::{BlockType, Classification, ClassificationContext, ClassificationReason, Classifier, NormalizedLine};

impl Classifier {
    /// Assign exactly one block type to a line given the running context
    pub fn classify(&self, line: &NormalizedLine<'_>, ctx: &ClassificationContext) -> Classification {
        let text = line.normalized.as_str();

        if let Some(shape) = self.classify_shape(text, ctx) {
            return shape;
        }

        if let Some(reason) = self.character_cue_reason(text, ctx) {
            debug!(line = line.line_number, ?reason, "character cue");
            return Classification::contextual(BlockType::CharacterCue, reason);
        }

        if ctx.current_character_name.is_some() {
            if self.is_strong_action(text) {
                debug!(line = line.line_number, "action interrupts dialogue");
                return Classification::contextual(BlockType::Action, ClassificationReason::ActionEvidence);
            }
            return Classification::contextual(BlockType::Dialogue, ClassificationReason::DialogueContinuation);
        }

        if self.is_likely_action(text) {
            return Classification::contextual(BlockType::Action, ClassificationReason::ActionEvidence);
        }

        Classification::contextual(BlockType::Action, ClassificationReason::Fallback)
    }

    /// Stateless shapes in precedence order; descriptor continuation is the one context-dependent shape
    fn classify_shape(&self, text: &str, ctx: &ClassificationContext) -> Option<Classification> {
        let shapes = &self.shapes;

        if shapes.is_blank(text) {
            return Some(Classification::shape(BlockType::Blank));
        }
        if shapes.is_invocation(text) {
            return Some(Classification::shape(BlockType::Invocation));
        }
        if let Some(parts) = shapes.scene_header_parts(text) {
            let info = SceneHeaderInfo::from_parts(&parts, self.lexicon);
            return Some(Classification {
                block_type: info.block_type(),
                reason: ClassificationReason::Shape,
                scene_header: Some(info),
            });
        }
        if ctx.last_format == Some(BlockType::SceneHeaderNumber) && is_descriptor_only(text, self.lexicon) {
            return Some(Classification::shape(BlockType::SceneHeaderDescriptor));
        }
        if self.lexicon.is_location(text) {
            return Some(Classification::shape(BlockType::SceneLocationOnly));
        }
        if shapes.is_transition(text) {
            return Some(Classification::shape(BlockType::Transition));
        }
        if shapes.is_parenthetical(text) {
            return Some(Classification::shape(BlockType::Parenthetical));
        }
        None
    }

    /// Cue shape: a colon-terminated name or a run of Arabic words
    fn has_cue_shape(&self, text: &str) -> bool {
        ends_with_named_colon(text) || is_arabic_only(text)
    }

    fn character_cue_reason(&self, text: &str, ctx: &ClassificationContext) -> Option<ClassificationReason> {
        if word_count(text) > self.rules.max_cue_words {
            return None;
        }
        if self.lexicon.starts_with_action_verb(text) || self.lexicon.starts_with_narrative_opener(text) {
            return None;
        }

        if ends_with_named_colon(text) {
            return Some(ClassificationReason::CueByColon);
        }
        // A bare name cannot open inside a running dialogue block; it would swallow the speech line
        if is_arabic_only(text) && !ctx.in_dialogue_block && !self.lexicon.contains_action_verb(text) {
            return Some(ClassificationReason::CueByName);
        }
        if !text.contains(':') {
            return None;
        }

        let accepted = if ctx.pending_character_line {
            self.has_cue_shape(text)
        } else {
            match ctx.last_format {
                Some(BlockType::Dialogue) => false,
                _ => self.has_cue_shape(text),
            }
        };
        accepted.then_some(ClassificationReason::CueByColon)
    }

    /// Leading opener or verb, or sentence punctuation anywhere with a verb and no colon
    pub fn is_strong_action(&self, text: &str) -> bool {
        if self.lexicon.starts_with_narrative_opener(text) || self.lexicon.starts_with_action_verb(text) {
            return true;
        }
        has_sentence_punctuation(text) && !text.contains(':') && self.lexicon.contains_action_verb(text)
    }

    fn is_likely_action(&self, text: &str) -> bool {
        self.is_strong_action(text)
            || (word_count(text) > self.rules.long_action_words && !text.contains(':'))
    }
}

/// Ends with ":" and has a non-empty name before it
fn ends_with_named_colon(text: &str) -> bool {
    text.trim_end()
        .strip_suffix(':')
        .map(|name| !super::cue_name(name).is_empty())
        .unwrap_or(false)
}
