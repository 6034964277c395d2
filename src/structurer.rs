// WHY: reduces corrected blocks to the relational script model (scenes, characters, dialogue lines)
// consumed by analysis; built once per pass and read-only afterwards

use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::{
    cue_name, normalize_line, shapes::parenthetical_inner, BlockType, StructuredBlock,
};

/// Heading of the synthetic scene holding content that precedes the first header
pub const PROLOGUE_HEADING: &str = "مقدمة";
/// Speaker used for dialogue with no preceding cue
pub const UNKNOWN_SPEAKER: &str = "شخصية غير معروفة";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLine {
    pub text: String,
    pub line_number: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogueKind {
    Dialogue,
    Parenthetical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub id: String,
    pub character: String,
    pub text: String,
    pub line_number: usize,
    pub scene_id: String,
    pub kind: DialogueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Dialogue and parenthetical lines attributed to this character
    pub dialogue_count: usize,
    /// Ids into `Script::dialogue_lines`
    pub dialogue_lines: Vec<String>,
    pub first_scene_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub heading: String,
    /// Zero-based position in `Script::scenes`
    pub index: usize,
    pub start_line: usize,
    pub end_line: Option<usize>,
    pub descriptor: Option<String>,
    pub location: Option<String>,
    /// Block texts in document order
    pub lines: Vec<String>,
    /// Ids into `Script::dialogue_lines`
    pub dialogues: Vec<String>,
    pub action_lines: Vec<ActionLine>,
}

impl Scene {
    fn open(number: usize, heading: String, start_line: usize) -> Self {
        Self {
            id: format!("scene-{number}"),
            heading,
            index: number - 1,
            start_line,
            end_line: None,
            descriptor: None,
            location: None,
            lines: Vec::new(),
            dialogues: Vec::new(),
            action_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub raw_text: String,
    pub total_lines: usize,
    pub invocation: Option<String>,
    pub scenes: Vec<Scene>,
    /// First-appearance order
    pub characters: Vec<Character>,
    pub dialogue_lines: Vec<DialogueLine>,
}

impl Script {
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn action_line_count(&self) -> usize {
        self.scenes.iter().map(|s| s.action_lines.len()).sum()
    }

    /// Verify referential integrity and scene contiguity; reports the first violation
    pub fn check_integrity(&self) -> Result<()> {
        for (position, scene) in self.scenes.iter().enumerate() {
            if scene.index != position {
                bail!("scene {} has index {} at position {}", scene.id, scene.index, position);
            }
            let end = match scene.end_line {
                Some(end) => end,
                None => bail!("scene {} is not closed", scene.id),
            };
            if end < scene.start_line {
                bail!("scene {} ends at {} before its start {}", scene.id, end, scene.start_line);
            }
            if let Some(next) = self.scenes.get(position + 1) {
                if next.start_line != end + 1 {
                    bail!(
                        "scene {} ends at {} but {} starts at {}",
                        scene.id, end, next.id, next.start_line
                    );
                }
            } else if end != self.total_lines {
                bail!("last scene {} ends at {} of {} lines", scene.id, end, self.total_lines);
            }
        }

        for line in &self.dialogue_lines {
            if self.scene(&line.scene_id).is_none() {
                bail!("dialogue {} references missing scene {}", line.id, line.scene_id);
            }
            if self.character(&line.character).is_none() {
                bail!("dialogue {} references missing character {}", line.id, line.character);
            }
        }

        for character in &self.characters {
            if self.scene(&character.first_scene_id).is_none() {
                bail!("character {} references missing scene {}", character.name, character.first_scene_id);
            }
            if character.dialogue_count != character.dialogue_lines.len() {
                bail!("character {} count does not match its lines", character.name);
            }
        }
        Ok(())
    }
}

/// Mutable state of one structuring pass
struct ScriptBuilder {
    scenes: Vec<Scene>,
    characters: Vec<Character>,
    character_index: HashMap<String, usize>,
    dialogue_lines: Vec<DialogueLine>,
    invocation: Option<String>,
    speaker: Option<String>,
}

impl ScriptBuilder {
    fn new() -> Self {
        Self {
            scenes: Vec::new(),
            characters: Vec::new(),
            character_index: HashMap::new(),
            dialogue_lines: Vec::new(),
            invocation: None,
            speaker: None,
        }
    }

    fn open_scene(&mut self, heading: String, start_line: usize) {
        if let Some(previous) = self.scenes.last_mut() {
            previous.end_line = Some(start_line.saturating_sub(1).max(previous.start_line));
        }
        let number = self.scenes.len() + 1;
        self.scenes.push(Scene::open(number, heading, start_line));
        self.speaker = None;
    }

    /// Current scene, opening the prologue on first content
    fn current_scene(&mut self, line_number: usize) -> usize {
        if self.scenes.is_empty() {
            self.open_scene(PROLOGUE_HEADING.to_string(), line_number);
        }
        self.scenes.len() - 1
    }

    fn ensure_character(&mut self, name: &str, scene_id: &str) -> usize {
        if let Some(&idx) = self.character_index.get(name) {
            return idx;
        }
        let idx = self.characters.len();
        self.characters.push(Character {
            name: name.to_string(),
            dialogue_count: 0,
            dialogue_lines: Vec::new(),
            first_scene_id: scene_id.to_string(),
        });
        self.character_index.insert(name.to_string(), idx);
        idx
    }

    fn add_dialogue(&mut self, scene: usize, speaker: String, text: String, line_number: usize, kind: DialogueKind) {
        let scene_id = self.scenes[scene].id.clone();
        let character = self.ensure_character(&speaker, &scene_id);
        let id = format!("dialogue-{}", self.dialogue_lines.len() + 1);

        self.scenes[scene].dialogues.push(id.clone());
        let entry = &mut self.characters[character];
        entry.dialogue_lines.push(id.clone());
        entry.dialogue_count = entry.dialogue_lines.len();

        self.dialogue_lines.push(DialogueLine {
            id,
            character: speaker,
            text,
            line_number,
            scene_id,
            kind,
        });
    }

    fn add_action(&mut self, scene: usize, text: &str, line_number: usize) {
        let normalized = normalize_line(text);
        if !normalized.is_empty() {
            self.scenes[scene].action_lines.push(ActionLine {
                text: normalized,
                line_number,
            });
        }
    }

    fn push_block(&mut self, block: &StructuredBlock) {
        let line_number = block.line_number;
        match block.block_type {
            BlockType::SceneHeaderCombined | BlockType::SceneHeaderNumber => {
                self.open_scene(normalize_line(&block.text), line_number);
                let scene = self.scenes.len() - 1;
                self.scenes[scene].descriptor = block
                    .parts
                    .iter()
                    .find(|part| part.block_type == BlockType::SceneHeaderDescriptor)
                    .map(|part| part.text.clone());
                self.scenes[scene].lines.push(block.text.clone());
            }
            BlockType::Invocation if self.invocation.is_none() && self.scenes.is_empty() => {
                self.invocation = Some(block.text.clone());
            }
            BlockType::Blank => {}
            BlockType::Action if block.is_placeholder() => {
                // Placeholders never open the prologue
                if let Some(scene) = self.scenes.last_mut() {
                    scene.lines.push(String::new());
                }
            }
            other => {
                let scene = self.current_scene(line_number);
                self.scenes[scene].lines.push(block.text.clone());
                match other {
                    BlockType::SceneHeaderDescriptor => {
                        self.scenes[scene].descriptor = Some(normalize_line(&block.text));
                    }
                    BlockType::SceneLocationOnly => {
                        self.scenes[scene].location = Some(normalize_line(&block.text));
                    }
                    BlockType::CharacterCue => {
                        let normalized = normalize_line(&block.text);
                        let name = cue_name(&normalized);
                        let name = (if name.is_empty() { UNKNOWN_SPEAKER } else { name }).to_string();
                        let scene_id = self.scenes[scene].id.clone();
                        self.ensure_character(&name, &scene_id);
                        self.speaker = Some(name);
                    }
                    BlockType::Dialogue => {
                        let speaker = self.speaker.clone().unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());
                        let text = block.text.trim().to_string();
                        self.add_dialogue(scene, speaker, text, line_number, DialogueKind::Dialogue);
                    }
                    BlockType::Parenthetical => match self.speaker.clone() {
                        Some(speaker) => {
                            let text = parenthetical_inner(&block.text).to_string();
                            self.add_dialogue(scene, speaker, text, line_number, DialogueKind::Parenthetical);
                        }
                        // A parenthetical with no speaker is a stage direction
                        None => self.add_action(scene, &block.text, line_number),
                    },
                    BlockType::Action => self.add_action(scene, &block.text, line_number),
                    // Transitions and late invocations stay in the scene's lines only
                    _ => {}
                }
            }
        }
    }

    fn finish(mut self, raw_text: &str, total_lines: usize) -> Script {
        if let Some(last) = self.scenes.last_mut() {
            last.end_line = Some(total_lines.max(last.start_line));
        }
        Script {
            raw_text: raw_text.to_string(),
            total_lines,
            invocation: self.invocation,
            scenes: self.scenes,
            characters: self.characters,
            dialogue_lines: self.dialogue_lines,
        }
    }
}

/// Build the script model from corrected blocks and the text they came from
pub fn structure_script(raw_text: &str, blocks: &[StructuredBlock]) -> Script {
    let total_lines = raw_text.lines().count();
    let mut builder = ScriptBuilder::new();
    for block in blocks {
        builder.push_block(block);
    }
    let script = builder.finish(raw_text, total_lines);

    info!(
        "Structured {} scenes, {} characters, {} dialogue lines",
        script.scenes.len(),
        script.characters.len(),
        script.dialogue_lines.len()
    );
    script
}
