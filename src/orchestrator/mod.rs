pub mod pipeline;

pub use pipeline::{aggregate, QuizPipeline};
