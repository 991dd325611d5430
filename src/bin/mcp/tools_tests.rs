use super::*;
use modlens_rs::ModlensConfig;

fn engine() -> ModlensEngine {
    ModlensEngine::new(ModlensConfig::default()).expect("default engine")
}

fn params(code: &str, filename: Option<&str>) -> AnalyzeCodeParams {
    AnalyzeCodeParams {
        code: code.to_string(),
        filename: filename.map(str::to_string),
    }
}

fn report_json(result: ToolResult) -> serde_json::Value {
    assert_eq!(result.content.len(), 1);
    assert_eq!(result.content[0].content_type, "text");
    serde_json::from_str(&result.content[0].text).expect("report json")
}

#[tokio::test]
async fn whitespace_code_is_invalid_params() {
    let err = execute_analyze_code(&engine(), params("  \n\t\n", None))
        .await
        .unwrap_err();
    assert_eq!(err.0, error_codes::INVALID_PARAMS);
    assert!(err.1.contains("Empty code"));
}

#[tokio::test]
async fn analyze_code_returns_flat_report() {
    let code = "\n\ndef helper():\n    return 1\n\ndef main():\n    return helper()\n\n";
    let result = execute_analyze_code(&engine(), params(code, None))
        .await
        .expect("analysis succeeds");

    let report = report_json(result);
    assert_eq!(report["total_functions"], 2);
    assert_eq!(report["total_issues"], 0);
    assert!(report["results"].as_array().unwrap().is_empty());
    assert!(report["file_name"].as_str().unwrap().ends_with(".py"));
    // leading blank lines are stripped before staging
    assert_eq!(report["functions"][0]["line"], 1);
}

#[tokio::test]
async fn filename_replaces_staged_path() {
    let result = execute_analyze_code(
        &engine(),
        params("def only():\n    pass\n", Some("pkg/widgets.py")),
    )
    .await
    .expect("analysis succeeds");

    let report = report_json(result);
    assert_eq!(report["file_name"], "widgets.py");
    assert_eq!(report["file_path"], "pkg/widgets.py");
}

#[tokio::test]
async fn syntax_error_is_analysis_error() {
    let err = execute_analyze_code(&engine(), params("def broken(:\n    pass\n", None))
        .await
        .unwrap_err();
    assert_eq!(err.0, error_codes::ANALYSIS_ERROR);
    assert!(err.1.starts_with("Analysis failed"));
}
