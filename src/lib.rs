pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, QuizSettings};

pub use crate::core::assembler::QuizPipeline;
pub use crate::core::engine::QuizEngine;
pub use crate::core::verifier::{Verifier, VerifyReport};
pub use crate::domain::model::{Cell, DifficultyLevel, MarkerConfig, Notebook, BLANK_MARKER};
pub use crate::utils::error::{QuizError, Result};
