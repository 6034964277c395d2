// WHY: stateless line-shape predicates compiled once; they run before any contextual reasoning
// All predicates expect a normalized line

use anyhow::Result;
use regex_automata::meta::Regex;

use super::lexicon::Lexicon;

const BASMALA: &str = r"بسم\s+الله\s+الرحمن\s+الرحيم";
const WRAPPERS: &str = r"[\{\}\[\]]";

/// Head and remainder of a line that opens a scene header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHeaderParts<'a> {
    /// Marker plus number, e.g. "مشهد 3"
    pub head: &'a str,
    /// The digits alone
    pub digits: &'a str,
    /// Everything after the number and its optional separator, trimmed
    pub rest: &'a str,
}

/// Compiled shape patterns
pub struct ShapeMatcher {
    invocation: Regex,
    scene_header: Regex,
    lexicon: &'static Lexicon,
}

impl ShapeMatcher {
    pub fn new() -> Result<Self> {
        // Either bare or wrapped in one pair of bracket characters, in any orientation
        let invocation_pattern = format!(
            r"^(?:{BASMALA}|{WRAPPERS}\s*{BASMALA}\s*{WRAPPERS})$"
        );
        // Separators are already unified by normalization: "-", ":" and ","
        let scene_header_pattern = r"^((?:مشهد|م\.)\s*([0-9]+))\s*(?:[-:,]\s*)?(.*)$";

        Ok(Self {
            invocation: Regex::new(&invocation_pattern)?,
            scene_header: Regex::new(scene_header_pattern)?,
            lexicon: Lexicon::shared(),
        })
    }

    pub fn is_blank(&self, line: &str) -> bool {
        line.trim().is_empty()
    }

    pub fn is_invocation(&self, line: &str) -> bool {
        self.invocation.is_match(line.trim())
    }

    pub fn is_scene_header_start(&self, line: &str) -> bool {
        self.scene_header.is_match(line.trim())
    }

    /// Split a scene header line into head, digits and remainder
    pub fn scene_header_parts<'a>(&self, line: &'a str) -> Option<SceneHeaderParts<'a>> {
        let line = line.trim();
        let mut caps = self.scene_header.create_captures();
        self.scene_header.captures(line, &mut caps);
        if !caps.is_match() {
            return None;
        }

        let head = caps.get_group(1)?;
        let digits = caps.get_group(2)?;
        let rest = caps
            .get_group(3)
            .map(|span| line[span.start..span.end].trim())
            .unwrap_or("");

        Some(SceneHeaderParts {
            head: line[head.start..head.end].trim_end(),
            digits: &line[digits.start..digits.end],
            rest,
        })
    }

    pub fn is_transition(&self, line: &str) -> bool {
        self.lexicon.is_transition(line)
    }

    /// The whole line is one balanced pair of round parentheses
    /// The opening parenthesis must close exactly at the last character
    pub fn is_parenthetical(&self, line: &str) -> bool {
        let line = line.trim();
        if !(line.starts_with('(') && line.ends_with(')')) || line.len() < 2 {
            return false;
        }

        let last = line.len() - 1;
        let mut depth: usize = 0;
        for (idx, ch) in line.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                    if depth == 0 && idx != last {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

/// Text between the outer parentheses of a parenthetical line
pub fn parenthetical_inner(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(text)
}
