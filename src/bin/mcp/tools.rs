//! MCP tool implementations for modlens analysis functionality.

use std::io::Write;

use tracing::{error, info};

use modlens_rs::{AnalysisReport, ModlensEngine};

use crate::mcp::protocol::{error_codes, ToolResult};

/// Parameters for analyze_code tool
#[derive(Debug, serde::Deserialize)]
pub struct AnalyzeCodeParams {
    pub code: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Execute the analyze_code tool
///
/// The trimmed code is staged to a temporary `.py` file for the duration of
/// the analysis. The file is removed when the handle drops, on every path.
pub async fn execute_analyze_code(
    engine: &ModlensEngine,
    params: AnalyzeCodeParams,
) -> Result<ToolResult, (i32, String)> {
    let code = params.code.trim().to_string();
    if code.is_empty() {
        return Err((
            error_codes::INVALID_PARAMS,
            "Empty code submitted".to_string(),
        ));
    }

    info!(
        "Executing analyze_code tool ({} bytes, filename: {:?})",
        code.len(),
        params.filename
    );

    let engine = engine.clone();
    let filename = params.filename;
    let report = tokio::task::spawn_blocking(move || analyze_staged(&engine, &code, filename))
        .await
        .map_err(|e| {
            (
                error_codes::INTERNAL_ERROR,
                format!("Analysis task failed: {}", e),
            )
        })??;

    let text = serde_json::to_string_pretty(&report).map_err(|e| {
        (
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize report: {}", e),
        )
    })?;

    Ok(ToolResult::text(text))
}

fn analyze_staged(
    engine: &ModlensEngine,
    code: &str,
    filename: Option<String>,
) -> Result<AnalysisReport, (i32, String)> {
    let mut staged = tempfile::Builder::new()
        .prefix("modlens-")
        .suffix(".py")
        .tempfile()
        .and_then(|mut file| file.write_all(code.as_bytes()).map(|_| file))
        .map_err(|e| {
            (
                error_codes::INTERNAL_ERROR,
                format!("Failed to stage code: {}", e),
            )
        })?;
    staged.flush().map_err(|e| {
        (
            error_codes::INTERNAL_ERROR,
            format!("Failed to stage code: {}", e),
        )
    })?;

    let mut report = engine.analyze_file(staged.path()).map_err(|e| {
        error!("Analysis failed: {}", e);
        (error_codes::ANALYSIS_ERROR, format!("Analysis failed: {}", e))
    })?;

    if let Some(filename) = filename {
        report.file_name = std::path::Path::new(&filename)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());
        report.file_path = filename;
    }

    Ok(report)
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
