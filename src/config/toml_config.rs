use crate::config::QuizSettings;
use crate::core::classifier::KeywordTables;
use crate::domain::model::{DifficultyLevel, MarkerConfig};
use crate::utils::error::{QuizError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub quiz: Option<QuizMeta>,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub markers: Option<MarkerConfig>,
    pub difficulties: Option<Vec<DifficultyLevel>>,
    pub keywords: Option<KeywordTables>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizMeta {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub notebook: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuizError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| QuizError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Turns the parsed file into resolved settings, filling every omitted
    /// section with its default.
    pub fn into_settings(self) -> QuizSettings {
        QuizSettings::new(
            self.input.notebook,
            self.output.path,
            self.markers.unwrap_or_default(),
            self.keywords.unwrap_or_default(),
            self.difficulties
                .unwrap_or_else(DifficultyLevel::default_levels),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input.notebook", &self.input.notebook)?;
        validation::validate_path("output.path", &self.output.path)?;

        if let Some(markers) = &self.markers {
            validation::validate_non_empty_string("markers.problem_prefix", &markers.problem_prefix)?;
            validation::validate_non_empty_string("markers.answer_prefix", &markers.answer_prefix)?;
        }

        if let Some(difficulties) = &self.difficulties {
            if difficulties.is_empty() {
                return Err(QuizError::InvalidConfigValueError {
                    field: "difficulties".to_string(),
                    value: "[]".to_string(),
                    reason: "At least one difficulty tier is required".to_string(),
                });
            }
            for level in difficulties {
                validation::validate_non_empty_string("difficulties.name", &level.name)?;
                validation::validate_range("difficulties.blanks", level.blanks, 0, 500)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    const SAMPLE: &str = r####"
[quiz]
name = "control-flow"
description = "Fill-in-the-blank drills for the control flow lesson"

[input]
notebook = "lessons/2_control_flow.ipynb"

[output]
path = "./generated"

[markers]
problem_prefix = "### ■ Problem"
answer_prefix = "# Answer"

[[difficulties]]
name = "easy"
blanks = 5

[[difficulties]]
name = "normal"
blanks = 10

[[difficulties]]
name = "hard"
blanks = 20

[keywords]
domain = ["StateGraph", "add_node", "compile"]
language = ["def", "return"]
stoplist = ["self", "print"]
"####;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.validate().is_ok());

        let settings = config.into_settings();
        assert_eq!(settings.notebook_path(), "lessons/2_control_flow.ipynb");
        assert_eq!(settings.difficulties().len(), 3);
        assert_eq!(settings.difficulties()[2].blanks, 20);
        assert!(settings.keywords().is_domain("StateGraph"));
    }

    #[test]
    fn test_omitted_sections_fall_back_to_defaults() {
        let minimal = r#"
[input]
notebook = "lesson.ipynb"

[output]
path = "out"
"#;
        let config = TomlConfig::from_toml_str(minimal).unwrap();
        let settings = config.into_settings();

        assert_eq!(settings.markers().problem_prefix, "### ■ Problem");
        assert_eq!(settings.difficulties().len(), 3);
        assert!(settings.keywords().is_domain("StateGraph"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("not = [valid");
        assert!(matches!(
            result,
            Err(QuizError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_empty_difficulties_rejected() {
        let config = TomlConfig {
            quiz: None,
            input: InputConfig {
                notebook: "lesson.ipynb".to_string(),
            },
            output: OutputConfig {
                path: "out".to_string(),
            },
            markers: None,
            difficulties: Some(vec![]),
            keywords: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUIZ_TEST_OUTPUT", "env-out");
        let content = r#"
[input]
notebook = "lesson.ipynb"

[output]
path = "${QUIZ_TEST_OUTPUT}"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.output.path, "env-out");
        std::env::remove_var("QUIZ_TEST_OUTPUT");
    }
}
