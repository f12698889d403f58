//! Resume Analysis — scores how well a resume matches a job description.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{ChatParams, LlmClient, LlmError};
use crate::rewriter::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM_TEMPLATE};
use crate::template::render;

/// Lower temperature than rewriting: analysis should be repeatable.
pub const ANALYSIS_PARAMS: ChatParams = ChatParams {
    max_tokens: 1000,
    temperature: 0.3,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    /// 0 – 100
    pub match_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub key_keywords: Vec<String>,
    #[serde(default)]
    pub resume_keywords: Vec<String>,
}

/// Asks the LLM to compare a resume against a job description.
pub async fn analyze_resume(
    llm: &LlmClient,
    original_resume: &str,
    job_description: &str,
) -> Result<ResumeAnalysis, LlmError> {
    let system = render(
        ANALYSIS_SYSTEM_TEMPLATE,
        &HashMap::from([("json_only".to_string(), JSON_ONLY_SYSTEM.to_string())]),
    );
    let prompt = render(
        ANALYSIS_PROMPT_TEMPLATE,
        &HashMap::from([
            ("original_resume".to_string(), original_resume.to_string()),
            ("job_description".to_string(), job_description.to_string()),
        ]),
    );

    let mut analysis: ResumeAnalysis = llm.call_json(&prompt, &system, ANALYSIS_PARAMS).await?;
    analysis.match_score = analysis.match_score.clamp(0.0, 100.0);
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn completion(content: serde_json::Value) -> String {
        serde_json::json!({
            "choices": [{"message": {"content": content.to_string()}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analysis_parses_and_clamps_score() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "max_tokens": 1000
            })))
            .with_status(200)
            .with_body(completion(serde_json::json!({
                "match_score": 140,
                "strengths": ["Go services"],
                "gaps": ["No Rust in production"]
            })))
            .expect(1)
            .create_async()
            .await;

        let llm = LlmClient::new("k".to_string(), &server.url(), Duration::from_secs(5)).unwrap();
        let analysis = analyze_resume(&llm, "resume", "jd").await.unwrap();

        assert_eq!(analysis.match_score, 100.0);
        assert_eq!(analysis.strengths, vec!["Go services"]);
        assert_eq!(analysis.gaps, vec!["No Rust in production"]);
        assert!(analysis.recommendations.is_empty());
        mock.assert_async().await;
    }

    #[test]
    fn test_analysis_requires_score() {
        let result: Result<ResumeAnalysis, _> =
            serde_json::from_str(r#"{"strengths": ["x"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_system_prompt_keeps_json_example() {
        let system = render(
            ANALYSIS_SYSTEM_TEMPLATE,
            &HashMap::from([("json_only".to_string(), JSON_ONLY_SYSTEM.to_string())]),
        );
        assert!(system.contains("\"match_score\": number between 0-100"));
        assert!(!system.contains("{json_only}"));
    }
}
