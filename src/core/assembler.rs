use crate::core::classifier::classify_block;
use crate::core::document::{find_problem_regions, split_lines};
use crate::core::masker::apply_blanks;
use crate::core::selector::select_blanks;
use crate::core::tokenizer::tokenize;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::Notebook;
use crate::utils::error::{QuizError, Result};
use std::path::Path;

/// Generation pipeline: reads the source notebook, produces one masked copy
/// per difficulty, writes each under `<output>/<level>/<filename>`.
pub struct QuizPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> QuizPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn notebook_filename(&self) -> String {
        Path::new(self.config.notebook_path())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "notebook.ipynb".to_string())
    }

    /// Masks one code block: tokenize, classify, select, substitute.
    fn mask_block(&self, source: &str, blanks: usize) -> String {
        let tokens = tokenize(source);
        let occurrences = classify_block(&tokens, self.config.keywords());
        let selections = select_blanks(&occurrences, blanks);
        apply_blanks(source, &selections)
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for QuizPipeline<S, C> {
    fn extract(&self) -> Result<Notebook> {
        let data = self.storage.read_file(self.config.notebook_path())?;
        let notebook: Notebook =
            serde_json::from_slice(&data).map_err(|e| QuizError::FormatError {
                message: format!(
                    "notebook '{}' is not a valid cell document: {}",
                    self.config.notebook_path(),
                    e
                ),
            })?;
        tracing::debug!("Parsed notebook with {} cells", notebook.cells.len());
        Ok(notebook)
    }

    fn transform(&self, notebook: &Notebook, blanks: usize) -> Result<Notebook> {
        let mut masked = notebook.clone();
        let regions = find_problem_regions(&notebook.cells, self.config.markers());

        tracing::debug!("Found {} problem regions", regions.len());

        for region in &regions {
            if region.answer_indices.is_empty() {
                tracing::warn!(
                    "Problem {} has no matching answer cells, skipping",
                    region.number
                );
                continue;
            }

            for &cell_index in &region.answer_indices {
                // The header line stays intact: the verifier re-derives
                // answer regions from the generated document, so the marker
                // itself must never be blanked.
                let Some((header, body_lines)) = masked.cells[cell_index].source.split_first()
                else {
                    continue;
                };
                let header = header.clone();
                let body = body_lines.concat();

                let rewritten = self.mask_block(&body, blanks);
                let mut lines = vec![header];
                lines.extend(split_lines(&rewritten));
                masked.cells[cell_index].source = lines;

                tracing::debug!(
                    "Problem {}: masked answer cell at index {}",
                    region.number,
                    cell_index
                );
            }
        }
        Ok(masked)
    }

    fn load(&self, level: &str, notebook: &Notebook) -> Result<String> {
        let path = format!(
            "{}/{}/{}",
            self.config.output_path(),
            level,
            self.notebook_filename()
        );
        let json = serde_json::to_vec_pretty(notebook)?;
        self.storage.write_file(&path, &json)?;
        Ok(path)
    }
}
