pub mod summarize;

pub use summarize::TodoSummarizer;
