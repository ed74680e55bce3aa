// Markdown → rich document → .docx.
// Rendering is total: every input line becomes exactly one block.
// Only packing the archive can fail.

pub mod document;
pub mod docx;
pub mod markup;

pub use document::RichDocument;
pub use docx::{write_docx, DOCX_MIME};
pub use markup::{render, MarkupDocument};
