//! Document Assembler — joins the section drafts with the fixed RFP headers.

use crate::render::{MarkupDocument, DOCX_MIME};

pub const SCOPE_OF_WORK_HEADING: &str = "## Scope of Work";
pub const CRITERIA_HEADING: &str = "## Criteria for Selecting the Winner";
pub const BOILERPLATE_PLACEHOLDER: &str = "*Boilerplate sections appended here*";

pub fn assemble_markdown(
    project_name: &str,
    scope_of_work: &str,
    criteria: &str,
) -> MarkupDocument {
    MarkupDocument::new(format!(
        "# RFP: {project_name}\n\n\
         {SCOPE_OF_WORK_HEADING}\n{scope_of_work}\n\n\
         {CRITERIA_HEADING}\n{criteria}\n\n\
         {BOILERPLATE_PLACEHOLDER}"
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Docx => DOCX_MIME,
        }
    }
}

/// `RFP_<project name with spaces as underscores>.<ext>`
pub fn download_filename(project_name: &str, format: ExportFormat) -> String {
    format!(
        "RFP_{}.{}",
        project_name.replace(' ', "_"),
        format.extension()
    )
}

/// `Content-Disposition` value for a download. Header values must be visible
/// ASCII, so anything else in the name (and quotes/backslashes) becomes `_`.
pub fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
