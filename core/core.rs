pub mod cache;
pub mod command_runner;
pub mod file_filter;
pub mod processor;
pub mod repo;
pub mod stripper;

pub use cache::FileCache;
pub use command_runner::{run_claude, run_formatter_for_path};
pub use file_filter::{
    CliArgs, Command, CompletionArgs, NocommsArgs, filter_files, resolve_input_files,
};
pub use processor::{ProcessedFileResult, process_batches, strip_file};
pub use stripper::{UnsupportedExtension, clean_source};

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file processing error in {path}: {message}")]
    Processing { path: String, message: String },

    #[error(transparent)]
    Unsupported(#[from] stripper::UnsupportedExtension),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
