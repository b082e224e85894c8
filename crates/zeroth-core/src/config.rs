//! Client configuration model (`config.toml`).

use crate::error::Result;
use crate::interview::{Catalog, Question, QuestionKind};
use serde::{Deserialize, Serialize};

/// Base URL used when neither the command line, the environment nor the
/// config file provides one.
pub const DEFAULT_API_BASE_URL: &str = "https://tech0-gen-8-step3-app-py-9.azurewebsites.net/api";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the REST API, without a trailing slash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Replacement for the built-in interview questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview: Option<InterviewConfig>,
}

impl AppConfig {
    /// The configured base URL, or [`DEFAULT_API_BASE_URL`].
    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Interview catalog from the config, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.interview {
            Some(interview) => interview.to_catalog(),
            None => Ok(Catalog::default()),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewConfig {
    #[serde(default)]
    pub questions: Vec<QuestionConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKindConfig {
    SingleChoice,
    FreeText,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QuestionConfig {
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKindConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl InterviewConfig {
    pub fn to_catalog(&self) -> Result<Catalog> {
        let mut questions = Vec::with_capacity(self.questions.len());
        for entry in &self.questions {
            let kind = match entry.kind {
                QuestionKindConfig::SingleChoice => QuestionKind::SingleChoice {
                    options: entry.options.clone(),
                },
                QuestionKindConfig::FreeText if entry.options.is_empty() => QuestionKind::FreeText,
                QuestionKindConfig::FreeText => {
                    return Err(crate::error::ZerothError::config(format!(
                        "free-text question '{}' must not list options",
                        entry.id
                    )));
                }
            };
            questions.push(Question {
                id: entry.id.clone(),
                prompt: entry.prompt.clone(),
                kind,
            });
        }
        Catalog::new(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.catalog().unwrap(), Catalog::default());
    }

    #[test]
    fn test_parse_interview_override() {
        let config: AppConfig = toml::from_str(
            r#"
            api_base_url = "http://localhost:8000/api"

            [[interview.questions]]
            id = "q1"
            prompt = "Q1"
            kind = "single_choice"
            options = ["A", "B"]

            [[interview.questions]]
            id = "q2"
            prompt = "Q2"
            kind = "free_text"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url(), "http://localhost:8000/api");
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.questions()[0].options(), &["A".to_string(), "B".to_string()]);
        assert_eq!(catalog.questions()[1].kind, QuestionKind::FreeText);
    }

    #[test]
    fn test_free_text_with_options_is_rejected() {
        let interview = InterviewConfig {
            questions: vec![QuestionConfig {
                id: "q".into(),
                prompt: "Q".into(),
                kind: QuestionKindConfig::FreeText,
                options: vec!["A".into()],
            }],
        };
        assert!(interview.to_catalog().is_err());
    }

    #[test]
    fn test_blank_url_falls_back_to_default() {
        let config = AppConfig {
            api_base_url: Some("  ".into()),
            interview: None,
        };
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
    }
}
