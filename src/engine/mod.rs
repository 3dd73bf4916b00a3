pub mod alignment;
pub mod completion;
pub mod ligature;
pub mod scoring;
