// Contract drafting engine.
// Pipeline: prompt -> model -> sanitize -> structured parse (or text extraction)
//           -> risk annotation -> defaults/validation.
// Model calls go through llm_client::ModelInvoker only.

pub mod defaults;
pub mod error;
pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod render;
pub mod risk;
pub mod sanitizer;
