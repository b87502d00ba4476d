pub mod cli;
pub mod toml_config;

use crate::core::classifier::KeywordTables;
use crate::core::ConfigProvider;
use crate::domain::model::{DifficultyLevel, MarkerConfig};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "notebook-quiz")]
#[command(about = "Generates graduated fill-in-the-blank quiz notebooks from a worked example")]
pub struct CliConfig {
    /// Source notebook to derive the quiz versions from
    #[arg(long, default_value = "lesson.ipynb")]
    pub notebook: String,

    /// Directory receiving one subdirectory per difficulty tier
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Optional TOML configuration file (markers, keywords, difficulties)
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "5")]
    pub easy_blanks: usize,

    #[arg(long, default_value = "10")]
    pub normal_blanks: usize,

    #[arg(long, default_value = "20")]
    pub hard_blanks: usize,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

/// Fully resolved configuration handed to the pipeline. Built from the CLI
/// arguments, optionally layered over a TOML file; the keyword tables and
/// marker prefixes always travel here so tests can inject minimal ones.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    notebook: String,
    output_path: String,
    markers: MarkerConfig,
    keywords: KeywordTables,
    difficulties: Vec<DifficultyLevel>,
}

impl QuizSettings {
    pub fn new(
        notebook: String,
        output_path: String,
        markers: MarkerConfig,
        keywords: KeywordTables,
        difficulties: Vec<DifficultyLevel>,
    ) -> Self {
        Self {
            notebook,
            output_path,
            markers,
            keywords,
            difficulties,
        }
    }

    /// CLI-only resolution: default markers and keyword tables, difficulty
    /// counts from the blank-count flags.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let settings = match &cli.config {
            Some(path) => {
                let toml = toml_config::TomlConfig::from_file(path)?;
                toml.validate()?;
                toml.into_settings()
            }
            None => Self::new(
                cli.notebook.clone(),
                cli.output_path.clone(),
                MarkerConfig::default(),
                KeywordTables::default(),
                vec![
                    DifficultyLevel::new("easy", cli.easy_blanks),
                    DifficultyLevel::new("normal", cli.normal_blanks),
                    DifficultyLevel::new("hard", cli.hard_blanks),
                ],
            ),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for QuizSettings {
    fn notebook_path(&self) -> &str {
        &self.notebook
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    fn keywords(&self) -> &KeywordTables {
        &self.keywords
    }

    fn difficulties(&self) -> &[DifficultyLevel] {
        &self.difficulties
    }
}

impl Validate for QuizSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("notebook", &self.notebook)?;
        validation::validate_file_extension("notebook", &self.notebook, &["ipynb", "json"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string(
            "markers.problem_prefix",
            &self.markers.problem_prefix,
        )?;
        validation::validate_non_empty_string("markers.answer_prefix", &self.markers.answer_prefix)?;

        for level in &self.difficulties {
            validation::validate_non_empty_string("difficulties.name", &level.name)?;
            validation::validate_range("difficulties.blanks", level.blanks, 0, 500)?;
        }
        Ok(())
    }
}
