//! Library side of the story-eval CLI.

pub mod logging;
pub mod pipeline;
