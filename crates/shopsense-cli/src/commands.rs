//! Command implementations.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::{build_report, Formatter};
use shopsense_classifier::{ClassifierConfig, Vocabulary};
use shopsense_pipeline::{Pipeline, SessionRecord};
use shopsense_store::MemoryRepository;
use std::path::Path;
use tracing::info;

/// Run the analyze command: load sessions, run the pipeline, render the
/// report.
pub async fn execute_analyze(args: AnalyzeArgs, formatter: &Formatter) -> Result<()> {
    let vocab = match &args.vocab {
        Some(path) => {
            let vocab = Vocabulary::from_toml(&read_file(path)?)?;
            vocab.validate()?;
            vocab
        }
        None => Vocabulary::default(),
    };
    let config = match &args.config {
        Some(path) => {
            let config = ClassifierConfig::from_toml(&read_file(path)?)?;
            config.validate()?;
            config
        }
        None => ClassifierConfig::default(),
    };

    let mut sessions = Vec::new();
    for path in &args.inputs {
        sessions.extend(load_sessions(path)?);
    }
    info!(sessions = sessions.len(), "loaded session files");

    let pipeline = Pipeline::with_config(MemoryRepository::new(), vocab, config);
    let (outcomes, stats) = pipeline.process_batch(&sessions).await;
    let report = build_report(pipeline.repository(), &outcomes, stats).await;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "wrote run report");
    }

    print!("{}", formatter.render(&report)?);
    Ok(())
}

/// Load one session file: either a single session object or an array.
fn load_sessions(path: &Path) -> Result<Vec<SessionRecord>> {
    let raw = read_file(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| CliError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    let records = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|record| vec![record])
    };
    records.map_err(|source| CliError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}
