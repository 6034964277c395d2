// WHY: structural metrics over the script model plus two prose insights from an external generator
// Generator failures degrade to fixed messages per field; analysis itself never fails

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::structurer::Script;

pub const SYNOPSIS_PROMPT: &str = "استنادًا إلى هذا السيناريو، قم بتوليد ملخص من فقرة واحدة (Synopsis).";
pub const LOGLINE_PROMPT: &str = "استنادًا إلى هذا السيناريو، اقترح عنوانًا جذابًا (Logline).";
pub const INSUFFICIENT_TEXT_MESSAGE: &str = "لم يتم توفير نص كافٍ لتحليل الذكاء الاصطناعي.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "تعذر توليد الاستجابة بواسطة الذكاء الاصطناعي.";
pub const GENERATION_ERROR_MESSAGE: &str = "حدث خطأ أثناء توليد الاستجابة من الذكاء الاصطناعي.";

/// Free-form options forwarded to the generator
pub type GenerationOptions = serde_json::Map<String, Value>;

/// Generator response; `text` may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub text: Option<String>,
}

impl Insight {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Prose generation service (remote or local)
pub trait InsightGenerator: Send + Sync {
    fn generate_text<'a>(
        &'a self,
        prompt: &'a str,
        context: &'a str,
        options: &'a GenerationOptions,
    ) -> BoxFuture<'a, Result<Insight>>;
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Upper bound for each generator call
    pub insight_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            insight_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDialogueStat {
    pub name: String,
    pub dialogue_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_scenes: usize,
    /// Descending by count; ties keep first-appearance order
    pub character_dialogue_counts: Vec<CharacterDialogueStat>,
    pub dialogue_to_action_ratio: f64,
    pub synopsis: String,
    pub logline: String,
}

/// Dialogue lines per action line; with no action lines the dialogue count itself
pub fn dialogue_to_action_ratio(dialogue_lines: usize, action_lines: usize) -> f64 {
    if action_lines == 0 {
        dialogue_lines as f64
    } else {
        dialogue_lines as f64 / action_lines as f64
    }
}

/// Per-character counts sorted descending; the sort is stable
pub fn character_dialogue_counts(script: &Script) -> Vec<CharacterDialogueStat> {
    let mut stats: Vec<CharacterDialogueStat> = script
        .characters
        .iter()
        .map(|c| CharacterDialogueStat {
            name: c.name.clone(),
            dialogue_lines: c.dialogue_count,
        })
        .collect();
    stats.sort_by(|a, b| b.dialogue_lines.cmp(&a.dialogue_lines));
    stats
}

pub struct AnalysisFacade {
    generator: Arc<dyn InsightGenerator>,
    config: AnalysisConfig,
}

impl AnalysisFacade {
    pub fn new(generator: Arc<dyn InsightGenerator>, config: AnalysisConfig) -> Self {
        Self { generator, config }
    }

    pub fn with_default_config(generator: Arc<dyn InsightGenerator>) -> Self {
        Self::new(generator, AnalysisConfig::default())
    }

    /// Metrics plus synopsis and logline; `raw_text_override` replaces the script text as context
    pub async fn analyze(&self, script: &Script, raw_text_override: Option<&str>) -> AnalysisResult {
        let total_scenes = script.scenes.len();
        let character_dialogue_counts = character_dialogue_counts(script);
        let ratio = dialogue_to_action_ratio(script.dialogue_lines.len(), script.action_line_count());

        let context = raw_text_override.unwrap_or(&script.raw_text).trim();
        let mut options = GenerationOptions::new();
        options.insert("mode".to_string(), Value::String("analysis".to_string()));

        let (synopsis, logline) = futures::join!(
            self.insight(SYNOPSIS_PROMPT, context, &options),
            self.insight(LOGLINE_PROMPT, context, &options)
        );

        info!(
            "Analysis: {} scenes, {} characters, ratio {:.3}",
            total_scenes,
            character_dialogue_counts.len(),
            ratio
        );

        AnalysisResult {
            total_scenes,
            character_dialogue_counts,
            dialogue_to_action_ratio: ratio,
            synopsis,
            logline,
        }
    }

    async fn insight(&self, prompt: &str, context: &str, options: &GenerationOptions) -> String {
        if context.is_empty() {
            return INSUFFICIENT_TEXT_MESSAGE.to_string();
        }

        let call = self.generator.generate_text(prompt, context, options);
        match tokio::time::timeout(self.config.insight_timeout, call).await {
            Ok(Ok(insight)) => match insight.text {
                Some(text) if !text.trim().is_empty() => text,
                // Blank replies get the same message as absent ones
                _ => {
                    debug!("Generator returned no text");
                    EMPTY_RESPONSE_MESSAGE.to_string()
                }
            },
            Ok(Err(e)) => {
                warn!("Insight generation failed: {}", e);
                GENERATION_ERROR_MESSAGE.to_string()
            }
            Err(_) => {
                warn!("Insight generation timed out after {:?}", self.config.insight_timeout);
                GENERATION_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Offline generator: opening lines as synopsis, first line as logline
#[derive(Debug, Clone)]
pub struct LocalInsightGenerator {
    /// Number of non-empty lines gathered into the synopsis
    pub synopsis_lines: usize,
}

impl Default for LocalInsightGenerator {
    fn default() -> Self {
        Self { synopsis_lines: 3 }
    }
}

impl LocalInsightGenerator {
    fn respond(&self, prompt: &str, context: &str) -> Result<Insight> {
        let mut lines = context.lines().map(str::trim).filter(|l| !l.is_empty());
        let text = match prompt {
            SYNOPSIS_PROMPT => lines.take(self.synopsis_lines).collect::<Vec<_>>().join(" "),
            LOGLINE_PROMPT => lines.next().unwrap_or_default().to_string(),
            _ => bail!("unsupported prompt for local generator"),
        };
        Ok(Insight {
            text: (!text.is_empty()).then_some(text),
        })
    }
}

impl InsightGenerator for LocalInsightGenerator {
    fn generate_text<'a>(
        &'a self,
        prompt: &'a str,
        context: &'a str,
        _options: &'a GenerationOptions,
    ) -> BoxFuture<'a, Result<Insight>> {
        Box::pin(async move { self.respond(prompt, context) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_well_defined() {
        assert_eq!(dialogue_to_action_ratio(0, 0), 0.0);
        assert_eq!(dialogue_to_action_ratio(4, 0), 4.0);
        assert!((dialogue_to_action_ratio(1, 3) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_local_generator() {
        let generator = LocalInsightGenerator::default();
        let options = GenerationOptions::new();
        let context = "مشهد 1\n\nنرى البحر.\nأحمد:\nمرحبا";

        let synopsis = generator.generate_text(SYNOPSIS_PROMPT, context, &options).await.unwrap();
        assert_eq!(synopsis.text.as_deref(), Some("مشهد 1 نرى البحر. أحمد:"));

        let logline = generator.generate_text(LOGLINE_PROMPT, context, &options).await.unwrap();
        assert_eq!(logline.text.as_deref(), Some("مشهد 1"));

        assert!(generator.generate_text("?", context, &options).await.is_err());
    }

    #[tokio::test]
    async fn test_local_generator_blank_context() {
        let generator = LocalInsightGenerator::default();
        let insight = generator
            .generate_text(LOGLINE_PROMPT, "\n\n", &GenerationOptions::new())
            .await
            .unwrap();
        assert_eq!(insight.text, None);
    }
}
