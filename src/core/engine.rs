use crate::core::Pipeline;
use crate::domain::model::DifficultyLevel;
use crate::utils::error::Result;

/// Result of one difficulty run.
#[derive(Debug, Clone)]
pub struct LevelOutcome {
    pub level: String,
    pub output_path: Option<String>,
    pub error: Option<String>,
}

impl LevelOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate result of a generation run across all difficulty tiers.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcomes: Vec<LevelOutcome>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(LevelOutcome::succeeded)
    }

    pub fn failed_levels(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| o.level.as_str())
            .collect()
    }
}

/// Drives the pipeline once per difficulty tier. The notebook is read and
/// parsed once; each tier transforms its own copy, and a failure in one
/// tier is logged and recorded without aborting the siblings.
pub struct QuizEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> QuizEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self, difficulties: &[DifficultyLevel]) -> Result<RunSummary> {
        tracing::info!("Reading source notebook");
        let notebook = self.pipeline.extract()?;
        tracing::info!("Loaded notebook with {} cells", notebook.cells.len());

        let mut outcomes = Vec::with_capacity(difficulties.len());

        for level in difficulties {
            tracing::info!(
                "Generating {} version ({} blanks per answer cell)",
                level.name,
                level.blanks
            );

            let outcome = self
                .pipeline
                .transform(&notebook, level.blanks)
                .and_then(|masked| self.pipeline.load(&level.name, &masked));

            match outcome {
                Ok(path) => {
                    tracing::info!("{} version written to {}", level.name, path);
                    outcomes.push(LevelOutcome {
                        level: level.name.clone(),
                        output_path: Some(path),
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::error!("{} version failed: {}", level.name, e);
                    outcomes.push(LevelOutcome {
                        level: level.name.clone(),
                        output_path: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(RunSummary { outcomes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Notebook;
    use crate::utils::error::QuizError;
    use std::cell::RefCell;

    struct FlakyPipeline {
        fail_on: Option<String>,
        loads: RefCell<Vec<String>>,
    }

    impl FlakyPipeline {
        fn new(fail_on: Option<&str>) -> Self {
            Self {
                fail_on: fail_on.map(str::to_string),
                loads: RefCell::new(Vec::new()),
            }
        }
    }

    impl Pipeline for FlakyPipeline {
        fn extract(&self) -> Result<Notebook> {
            Ok(Notebook {
                cells: Vec::new(),
                extra: serde_json::Map::new(),
            })
        }

        fn transform(&self, notebook: &Notebook, _blanks: usize) -> Result<Notebook> {
            Ok(notebook.clone())
        }

        fn load(&self, level: &str, _notebook: &Notebook) -> Result<String> {
            if self.fail_on.as_deref() == Some(level) {
                return Err(QuizError::ProcessingError {
                    message: format!("injected failure for {}", level),
                });
            }
            self.loads.borrow_mut().push(level.to_string());
            Ok(format!("out/{}/nb.ipynb", level))
        }
    }

    #[test]
    fn test_all_levels_run() {
        let engine = QuizEngine::new(FlakyPipeline::new(None));
        let summary = engine.run(&DifficultyLevel::default_levels()).unwrap();

        assert!(summary.all_succeeded());
        assert_eq!(summary.outcomes.len(), 3);
        assert_eq!(
            engine.pipeline.loads.borrow().as_slice(),
            ["easy", "normal", "hard"]
        );
    }

    #[test]
    fn test_one_failure_does_not_abort_siblings() {
        let engine = QuizEngine::new(FlakyPipeline::new(Some("normal")));
        let summary = engine.run(&DifficultyLevel::default_levels()).unwrap();

        assert!(!summary.all_succeeded());
        assert_eq!(summary.failed_levels(), vec!["normal"]);
        assert_eq!(
            engine.pipeline.loads.borrow().as_slice(),
            ["easy", "hard"]
        );
    }
}
