//! DOCX serialization of a `RichDocument`.

use std::io::Cursor;

use anyhow::{Context, Result};
use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, SpecialIndentType, Start, Style, StyleType,
};

use super::document::{RichBlock, RichDocument, StyledRun};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const LIST_BULLET_STYLE: &str = "ListBullet";
const BULLET_NUMBERING_ID: usize = 1;

fn create_heading_style(id: &str, display_name: &str, size: usize) -> Style {
    Style::new(id, StyleType::Paragraph)
        .name(display_name)
        .size(size)
        .bold()
}

fn initialize_styles(docx: Docx) -> Docx {
    let list_bullet = Style::new(LIST_BULLET_STYLE, StyleType::Paragraph).name("List Bullet");

    docx.add_style(create_heading_style("Heading1", "Heading 1", 32))
        .add_style(create_heading_style("Heading2", "Heading 2", 28))
        .add_style(create_heading_style("Heading3", "Heading 3", 26))
        .add_style(list_bullet)
}

/// One bullet definition shared by every list item; items are never nested.
fn initialize_bullet_numbering(docx: Docx) -> Docx {
    let level = Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("•"),
        LevelJc::new("left"),
    )
    .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None);

    docx.add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(level))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

fn styled_run(run: &StyledRun) -> Run {
    let docx_run = Run::new().add_text(run.text.as_str());
    if run.bold {
        docx_run.bold()
    } else {
        docx_run
    }
}

fn block_paragraph(block: &RichBlock) -> Paragraph {
    match block {
        RichBlock::Heading { level, text } => Paragraph::new()
            .style(level.style_id())
            .add_run(Run::new().add_text(text.as_str())),
        RichBlock::Paragraph { runs } => runs
            .iter()
            .fold(Paragraph::new(), |para, run| para.add_run(styled_run(run))),
        RichBlock::BulletItem { text } => Paragraph::new()
            .style(LIST_BULLET_STYLE)
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0))
            .add_run(Run::new().add_text(text.as_str())),
    }
}

/// Builds the in-memory document: one paragraph per block, in order.
pub fn build_docx(document: &RichDocument) -> Docx {
    let docx = initialize_bullet_numbering(initialize_styles(Docx::new()));

    document
        .blocks
        .iter()
        .fold(docx, |docx, block| docx.add_paragraph(block_paragraph(block)))
}

/// Packs the document into `.docx` bytes.
pub fn write_docx(document: &RichDocument) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    build_docx(document)
        .build()
        .pack(&mut Cursor::new(&mut buffer))
        .context("Failed to pack DOCX")?;
    Ok(buffer)
}
