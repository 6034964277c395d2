pub mod analysis;
pub mod classifier;
pub mod corrector;
pub mod export;
pub mod pipeline;
pub mod reader;
pub mod reconstructor;
pub mod structurer;

// Re-export main types for convenient access
pub use classifier::{
    BlockPart, BlockType, ClassificationContext, ClassificationReason, ClassificationRules,
    Classifier, NormalizedLine, SceneHeaderInfo, StructuredBlock,
};
pub use corrector::{CorrectionReport, Corrector};
pub use reconstructor::Reconstructor;
pub use structurer::{
    structure_script, ActionLine, Character, DialogueKind, DialogueLine, Scene, Script,
};

// Re-export the pipeline and analysis surface used by the CLI and tests
pub use analysis::{
    AnalysisConfig, AnalysisFacade, AnalysisResult, CharacterDialogueStat, GenerationOptions,
    Insight, InsightGenerator, LocalInsightGenerator,
};
pub use export::{generate_blocks_path, write_blocks_file, RunStats};
pub use pipeline::{PipelineConfig, PipelineOutput, ScreenplayPipeline};
