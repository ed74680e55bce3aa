// RFP drafting: form inputs → two Gemini-drafted sections → Markdown / DOCX exports.
// All LLM calls go through llm_client via the TextGenerator trait.

pub mod assembler;
pub mod composer;
pub mod extraction;
pub mod handlers;
pub mod models;
pub mod prompts;
