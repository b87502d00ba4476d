pub mod assembler;
pub mod classifier;
pub mod document;
pub mod engine;
pub mod masker;
pub mod selector;
pub mod tokenizer;
pub mod verifier;

pub use crate::domain::model::{Notebook, Selection};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
