use crate::core::classifier::KeywordTables;
use crate::domain::model::{DifficultyLevel, MarkerConfig, Notebook};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn notebook_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn markers(&self) -> &MarkerConfig;
    fn keywords(&self) -> &KeywordTables;
    fn difficulties(&self) -> &[DifficultyLevel];
}

pub trait Pipeline {
    /// Read and parse the source notebook.
    fn extract(&self) -> Result<Notebook>;

    /// Produce a masked copy of the notebook for one blank-count target.
    fn transform(&self, notebook: &Notebook, blanks: usize) -> Result<Notebook>;

    /// Serialize one difficulty's notebook; returns the path written.
    fn load(&self, level: &str, notebook: &Notebook) -> Result<String>;
}
