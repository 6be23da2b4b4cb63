//! Extract the answer key of one job role.
//!
//! Reads the general and (optionally) the specific answer-key documents,
//! prints the merged key as JSON and, with `--db`, upserts it into a SQLite
//! answer-key store.
//!
//! Usage:
//!   cargo run --release --features cli --bin extract_answer_key -- \
//!       --contest "PF 2021" --job-role "Agente" \
//!       --general basicos.pdf --specific especificos.pdf --db gabaritos.db
//!
//! Inputs ending in `.json` are read as pre-decoded pages (a JSON array of
//! `{"text": ..., "tables": [...]}` objects); anything else is decoded as PDF.
//! A document that cannot be opened is reported and skipped, so the other
//! section's answers are still printed and stored.

use clap::Parser;
use gabarito_oxide::source::open_path;
use gabarito_oxide::storage::{AnswerKeySink, JobRoleKey, SqliteStore};
use gabarito_oxide::{
    DocumentExtractor, ExamSection, ExtractedAnswerKey, ExtractionConfig, MergePolicy, Result,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "extract_answer_key",
    version,
    about = "Extract an exam answer key (gabarito) from answer-key PDFs."
)]
struct Cli {
    /// Contest name, e.g. "TRF 1ª Região 2024"
    #[arg(long)]
    contest: Option<String>,

    /// Job role name, e.g. "Analista Judiciário"
    #[arg(long)]
    job_role: Option<String>,

    /// General-knowledge answer key (PDF or JSON pages)
    #[arg(long, value_name = "PDF|JSON")]
    general: PathBuf,

    /// Specific-knowledge answer key (PDF or JSON pages)
    #[arg(long, value_name = "PDF|JSON")]
    specific: Option<PathBuf>,

    /// Upsert the key into this SQLite database
    #[arg(long, value_name = "PATH", requires_all = ["contest", "job_role"])]
    db: Option<PathBuf>,

    /// Keep the first answer seen for a question instead of the last
    #[arg(long)]
    first_write_wins: bool,

    /// Highest accepted question number
    #[arg(long, value_name = "N")]
    max_question: Option<u32>,
}

impl Cli {
    fn config(&self) -> ExtractionConfig {
        let mut config = ExtractionConfig::default();
        if self.first_write_wins {
            config = config.with_merge_policy(MergePolicy::FirstWriteWins);
        }
        if let Some(max) = self.max_question {
            let min = *config.question_range.start();
            config = config.with_question_range(min..=max);
        }
        config
    }

    fn label(&self) -> String {
        match (&self.contest, &self.job_role) {
            (Some(contest), Some(role)) => JobRoleKey::new(contest.as_str(), role.as_str()).to_string(),
            _ => self.general.display().to_string(),
        }
    }
}

#[derive(Serialize)]
struct Output<'a> {
    contest: Option<&'a str>,
    job_role: Option<&'a str>,
    #[serde(flatten)]
    key: &'a ExtractedAnswerKey,
}

fn run(cli: &Cli) -> Result<ExtractedAnswerKey> {
    let mut extractor = DocumentExtractor::try_new(cli.config())?.with_label(cli.label());

    extractor.process_opened(open_path(&cli.general), ExamSection::General);
    if let Some(path) = &cli.specific {
        extractor.process_opened(open_path(path), ExamSection::Specific);
    }

    let key = extractor.finish();

    if let (Some(db), Some(contest), Some(role)) = (&cli.db, &cli.contest, &cli.job_role) {
        let mut store = SqliteStore::open(db)?;
        let written = store.store(&JobRoleKey::new(contest.as_str(), role.as_str()), &key)?;
        log::info!("{} answer row(s) written to {}", written, db.display());
    }

    Ok(key)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let key = match run(&cli) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    };

    let output = Output {
        contest: cli.contest.as_deref(),
        job_role: cli.job_role.as_deref(),
        key: &key,
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    }

    if key.is_empty() {
        eprintln!("Warning: no answers found in {}", cli.label());
    }
    if key.metrics.failed_sources > 0 {
        eprintln!(
            "Warning: {} document(s) could not be opened for {}",
            key.metrics.failed_sources,
            cli.label()
        );
    }
}
