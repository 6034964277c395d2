use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use naqid::export::{format_blocks, write_run_stats};
use naqid::reader::{AsyncFileReader, ReaderConfig, STDIN_LABEL};
use naqid::{
    write_blocks_file, AnalysisConfig, AnalysisFacade, ClassificationRules, LocalInsightGenerator,
    PipelineConfig, RunStats, ScreenplayPipeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// order, block type, text, line number per row
    Tsv,
    /// Blocks as a JSON array
    Blocks,
    /// Script model as JSON
    Script,
    /// Metrics plus synopsis and logline as JSON
    Analysis,
}

#[derive(Parser, Debug)]
#[command(name = "naqid")]
#[command(about = "Classify and structure Arabic screenplay text")]
#[command(version)]
struct Args {
    /// Screenplay file, or "-" for stdin
    input: PathBuf,

    /// What to print on stdout
    #[arg(long, value_enum, default_value = "tsv")]
    format: OutputFormat,

    /// Skip the post-processing corrector
    #[arg(long)]
    no_correct: bool,

    /// Also write <stem>_blocks.tsv beside the input file
    #[arg(long)]
    write_aux: bool,

    /// Stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Upper bound for each insight call
    #[arg(long, default_value_t = 30)]
    insight_timeout_secs: u64,

    /// Lines with more words are never character cues
    #[arg(long, default_value_t = 7)]
    max_cue_words: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging on stderr keeps stdout clean for the output document
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    let run_start = Instant::now();

    info!("Starting naqid");
    info!(?args, "Parsed CLI arguments");

    let reading_stdin = args.input.as_os_str() == STDIN_LABEL;

    // WHY: validate the input path early to fail fast with clear error
    if !reading_stdin && !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }
    if reading_stdin && args.write_aux {
        anyhow::bail!("--write-aux needs an input file, not stdin");
    }

    let reader = AsyncFileReader::new(ReaderConfig::default());
    let (text, read_stats) = reader.read_source(&args.input).await?;

    let pipeline = ScreenplayPipeline::new(PipelineConfig {
        rules: ClassificationRules {
            max_cue_words: args.max_cue_words,
            ..Default::default()
        },
        apply_corrections: !args.no_correct,
    })?;
    let output = pipeline.process(&text);

    match args.format {
        OutputFormat::Tsv => print!("{}", format_blocks(&output.blocks)),
        OutputFormat::Blocks => println!("{}", serde_json::to_string_pretty(&output.blocks)?),
        OutputFormat::Script => println!("{}", serde_json::to_string_pretty(&output.script)?),
        OutputFormat::Analysis => {
            let facade = AnalysisFacade::new(
                Arc::new(LocalInsightGenerator::default()),
                AnalysisConfig {
                    insight_timeout: Duration::from_secs(args.insight_timeout_secs),
                },
            );
            let result = facade.analyze(&output.script, None).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    if args.write_aux {
        write_blocks_file(&args.input, &output.blocks).await?;
    }

    if let Some(stats_path) = args.stats_out.as_ref() {
        let stats = RunStats::from_output(
            &read_stats.source,
            &output,
            read_stats.duration_ms,
            run_start.elapsed().as_millis() as u64,
        );
        write_run_stats(stats_path, &stats).await?;
    }

    info!(
        "Processed {}: {} blocks, {} scenes, {} corrections",
        read_stats.source,
        output.blocks.len(),
        output.script.scenes.len(),
        output.report.total()
    );
    Ok(())
}
