//! Text backends the translator sends prompts to.

pub mod openai;

pub use openai::OpenAiBackend;
