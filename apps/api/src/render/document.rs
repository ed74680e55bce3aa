//! Rich document model — mirrors the word-processor block/run model.

use serde::Serialize;

/// Heading depth supported by the markup dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Paragraph style id used for this level in the exported document.
    pub fn style_id(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "Heading1",
            HeadingLevel::H2 => "Heading2",
            HeadingLevel::H3 => "Heading3",
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        level.as_u8()
    }
}

/// A contiguous span of paragraph text with a single bold attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RichBlock {
    Heading { level: HeadingLevel, text: String },
    /// Always holds at least one run; run text may be empty.
    Paragraph { runs: Vec<StyledRun> },
    BulletItem { text: String },
}

impl RichBlock {
    pub fn empty_paragraph() -> Self {
        RichBlock::Paragraph {
            runs: vec![StyledRun::plain("")],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RichDocument {
    pub blocks: Vec<RichBlock>,
}

#[cfg(test)]
impl RichDocument {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
