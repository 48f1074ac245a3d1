use anyhow::{Context, Result};
use scrub_config::Config;
use scrub_engine::{Engine, RunSummary};
use scrub_sources::{TableLayout, read_rows, write_rows};
use std::path::{Path, PathBuf};

pub async fn handle(
    input: PathBuf,
    output: Option<PathBuf>,
    show_summary: bool,
    config: &Config,
) -> Result<()> {
    let output = output.unwrap_or_else(|| config.output.default_path.clone());
    let layout = TableLayout {
        id_column: config.input.id_column.clone(),
        payload_columns: config.input.payload_columns.clone(),
    };

    let summary = scan_file(&input, &output, &layout).await?;

    println!("Done: {}", output.display());
    if show_summary {
        print_summary(&summary);
    }

    Ok(())
}

/// Read the whole input, redact every row, write the whole output
pub async fn scan_file(input: &Path, output: &Path, layout: &TableLayout) -> Result<RunSummary> {
    let data = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let rows = read_rows(&data, layout)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    tracing::info!(rows = rows.len(), input = %input.display(), "loaded input");

    let (outputs, summary) = Engine::new().process_rows(rows);

    let bytes = write_rows(&outputs)?;
    tokio::fs::write(output, bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!("  Rows: {}", summary.rows);
    println!("  Flagged: {} ({} with direct identifiers)", summary.flagged, summary.direct);
    if summary.unparsed > 0 {
        println!("  Unparseable payloads: {}", summary.unparsed);
    }
    if !summary.redactions.is_empty() {
        println!("  Redactions:");
        for (category, count) in &summary.redactions {
            println!("    {}: {}", category, count);
        }
    }
}
