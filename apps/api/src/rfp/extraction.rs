//! Example-document extraction: uploaded PDF → plain text for prompt context.

use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::errors::AppError;

const PDF_SIGNATURE: &[u8] = b"%PDF-";

static EXCESS_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"));

/// Extracts text from an uploaded example RFP.
///
/// An empty upload counts as no upload and yields `""`. Anything that is not a
/// readable PDF is a `DocumentExtraction` error; the parser runs on the blocking
/// pool and a panic inside it is reported the same way.
pub async fn extract_example_text(upload: Bytes) -> Result<String, AppError> {
    if upload.is_empty() {
        return Ok(String::new());
    }
    if !upload.starts_with(PDF_SIGNATURE) {
        return Err(AppError::DocumentExtraction(
            "Uploaded example is not a PDF file".to_string(),
        ));
    }

    let size = upload.len();
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&upload))
        .await
        .map_err(|e| AppError::DocumentExtraction(format!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::DocumentExtraction(format!("Failed to read PDF: {e}")))?;

    let text = clean_extracted_text(&raw);
    info!(
        "Extracted {} chars of example text from {} byte PDF",
        text.len(),
        size
    );
    Ok(text)
}

/// Drops form feeds and trailing whitespace, and collapses runs of blank lines
/// to a single blank line.
pub fn clean_extracted_text(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.trim_end_matches(|c: char| c.is_whitespace() || c == '\u{c}'))
        .collect();
    let joined = lines.join("\n").replace('\u{c}', "");
    EXCESS_BLANK_LINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

/// Builds a one-page PDF that draws `text` in Helvetica, with a valid xref table.
#[cfg(test)]
pub(crate) fn single_page_pdf(text: &str) -> Vec<u8> {
    let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.into_bytes()
}
