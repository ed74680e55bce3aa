//! Markup classification — the line-oriented Markdown dialect produced by the
//! assembler and by the model.
//!
//! Each line is classified on its own, with no lookahead and no nesting, using a
//! fixed precedence:
//!
//! 1. `# ` heading 1
//! 2. `## ` heading 2
//! 3. `### ` heading 3
//! 4. contains `**` → mixed bold/plain paragraph
//! 5. `* ` bullet item
//! 6. empty → blank paragraph
//! 7. anything else → plain paragraph
//!
//! Bold is checked before bullets, so `* **Cost** weighting` is a bold-mixed
//! paragraph and keeps its leading `* ` as literal text. Headings are checked
//! before bold, so `**` inside a heading stays literal.
//!
//! Lines are trimmed with `str::trim`, which strips Unicode `White_Space` only.
//! The ASCII separators U+001C..=U+001F are not whitespace here, so
//! `"\u{1c}# Title"` is a plain paragraph rather than a heading.

use once_cell::sync::Lazy;
use regex::Regex;

use super::document::{HeadingLevel, RichBlock, RichDocument, StyledRun};

const BOLD_MARKER: &str = "**";

/// A complete `**...**` span, shortest match first.
static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*.*?\*\*").expect("bold span pattern is valid"));

/// Raw Markdown text, viewed as a sequence of `'\n'`-separated lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupDocument {
    text: String,
}

impl MarkupDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Splits on `'\n'` only, so a trailing newline yields a final empty line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// One classified line. Borrowed slices point into the trimmed source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupLine<'a> {
    Heading { level: HeadingLevel, text: &'a str },
    /// Alternating non-delimited / `**`-delimited pieces, in source order.
    BoldMixed(Vec<&'a str>),
    Bullet(&'a str),
    Blank,
    Plain(&'a str),
}

impl<'a> MarkupLine<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix("# ") {
            MarkupLine::Heading {
                level: HeadingLevel::H1,
                text: rest.trim(),
            }
        } else if let Some(rest) = line.strip_prefix("## ") {
            MarkupLine::Heading {
                level: HeadingLevel::H2,
                text: rest.trim(),
            }
        } else if let Some(rest) = line.strip_prefix("### ") {
            MarkupLine::Heading {
                level: HeadingLevel::H3,
                text: rest.trim(),
            }
        } else if line.contains(BOLD_MARKER) {
            MarkupLine::BoldMixed(split_bold_pieces(line))
        } else if let Some(rest) = line.strip_prefix("* ") {
            MarkupLine::Bullet(rest.trim())
        } else if line.is_empty() {
            MarkupLine::Blank
        } else {
            MarkupLine::Plain(line)
        }
    }

    pub fn into_block(self) -> RichBlock {
        match self {
            MarkupLine::Heading { level, text } => heading_block(level, text),
            MarkupLine::BoldMixed(pieces) => bold_mixed_block(&pieces),
            MarkupLine::Bullet(text) => bullet_block(text),
            MarkupLine::Blank => RichBlock::empty_paragraph(),
            MarkupLine::Plain(text) => plain_block(text),
        }
    }
}

/// Splits a line around every complete `**...**` span, keeping the spans.
///
/// Mirrors a capturing regex split: the result always starts and ends with a
/// non-delimited piece, either of which may be empty.
fn split_bold_pieces(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in BOLD_SPAN.find_iter(line) {
        pieces.push(&line[last..m.start()]);
        pieces.push(m.as_str());
        last = m.end();
    }
    pieces.push(&line[last..]);
    pieces
}

fn heading_block(level: HeadingLevel, text: &str) -> RichBlock {
    RichBlock::Heading {
        level,
        text: text.to_string(),
    }
}

fn bold_mixed_block(pieces: &[&str]) -> RichBlock {
    let runs = pieces
        .iter()
        .map(|piece| {
            // A lone `**` or `***` starts and ends with the marker but is not a span.
            let is_span = piece.len() >= 2 * BOLD_MARKER.len()
                && piece.starts_with(BOLD_MARKER)
                && piece.ends_with(BOLD_MARKER);
            if is_span {
                StyledRun::bold(&piece[BOLD_MARKER.len()..piece.len() - BOLD_MARKER.len()])
            } else {
                StyledRun::plain(*piece)
            }
        })
        .collect();
    RichBlock::Paragraph { runs }
}

fn bullet_block(text: &str) -> RichBlock {
    RichBlock::BulletItem {
        text: text.to_string(),
    }
}

fn plain_block(text: &str) -> RichBlock {
    RichBlock::Paragraph {
        runs: vec![StyledRun::plain(text)],
    }
}

/// Converts a markup document into blocks, exactly one block per line.
pub fn render(document: &MarkupDocument) -> RichDocument {
    RichDocument {
        blocks: document
            .lines()
            .map(|line| MarkupLine::classify(line).into_block())
            .collect(),
    }
}

#[cfg(test)]
pub fn render_markdown(markdown: &str) -> RichDocument {
    render(&MarkupDocument::new(markdown))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn single_block(line: &str) -> RichBlock {
        let document = render_markdown(line);
        assert_eq!(document.len(), 1, "one line must produce one block");
        document.blocks.into_iter().next().unwrap()
    }

    fn runs(block: RichBlock) -> Vec<(String, bool)> {
        match block {
            RichBlock::Paragraph { runs } => runs.into_iter().map(|r| (r.text, r.bold)).collect(),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    fn run(text: &str, bold: bool) -> (String, bool) {
        (text.to_string(), bold)
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            single_block("# Title"),
            RichBlock::Heading {
                level: HeadingLevel::H1,
                text: "Title".to_string()
            }
        );
        assert_eq!(
            single_block("## Sub"),
            RichBlock::Heading {
                level: HeadingLevel::H2,
                text: "Sub".to_string()
            }
        );
        assert_eq!(
            single_block("   ### Deliverables   "),
            RichBlock::Heading {
                level: HeadingLevel::H3,
                text: "Deliverables".to_string()
            }
        );
    }

    #[test]
    fn test_heading_keeps_bold_markers_literally() {
        assert_eq!(
            single_block("## **Evaluation** Criteria"),
            RichBlock::Heading {
                level: HeadingLevel::H2,
                text: "**Evaluation** Criteria".to_string()
            }
        );
    }

    #[test]
    fn test_hashes_without_space_are_plain() {
        assert_eq!(runs(single_block("#Title")), vec![run("#Title", false)]);
        assert_eq!(runs(single_block("#### Deep")), vec![run("#### Deep", false)]);
        // "# " trims down to "#", which no longer has the heading prefix.
        assert_eq!(runs(single_block("# ")), vec![run("#", false)]);
    }

    #[test]
    fn test_bold_mixed_paragraph() {
        assert_eq!(
            runs(single_block("Hello **bold** world")),
            vec![run("Hello ", false), run("bold", true), run(" world", false)]
        );
    }

    #[test]
    fn test_bold_at_line_edges_keeps_empty_runs() {
        assert_eq!(
            runs(single_block("**Cost:** 40%")),
            vec![run("", false), run("Cost:", true), run(" 40%", false)]
        );
        assert_eq!(
            runs(single_block("**a****b**")),
            vec![
                run("", false),
                run("a", true),
                run("", false),
                run("b", true),
                run("", false)
            ]
        );
    }

    #[test]
    fn test_unmatched_marker_stays_in_plain_piece() {
        assert_eq!(
            runs(single_block("a **b** c **")),
            vec![run("a ", false), run("b", true), run(" c **", false)]
        );
        assert_eq!(
            runs(single_block("rate ** 2")),
            vec![run("rate ** 2", false)]
        );
    }

    #[test]
    fn test_short_marker_pieces_are_not_bold() {
        assert_eq!(runs(single_block("***")), vec![run("***", false)]);
        assert_eq!(
            runs(single_block("****")),
            vec![run("", false), run("", true), run("", false)]
        );
    }

    #[test]
    fn test_bullet_item() {
        assert_eq!(
            single_block("* item one"),
            RichBlock::BulletItem {
                text: "item one".to_string()
            }
        );
        assert_eq!(
            single_block("*    padded item  "),
            RichBlock::BulletItem {
                text: "padded item".to_string()
            }
        );
    }

    #[test]
    fn test_bullet_with_bold_is_bold_mixed_paragraph() {
        // Bold is checked before bullets: the bullet prefix survives as text and
        // no list item is produced.
        assert_eq!(
            runs(single_block("* **bold** bulleted")),
            vec![run("* ", false), run("bold", true), run(" bulleted", false)]
        );
    }

    #[test]
    fn test_only_asterisk_bullets_are_recognised() {
        assert_eq!(runs(single_block("- dash item")), vec![run("- dash item", false)]);
        assert_eq!(runs(single_block("*item")), vec![run("*item", false)]);
    }

    #[test]
    fn test_blank_line_is_empty_paragraph() {
        assert_eq!(single_block(""), RichBlock::empty_paragraph());
        assert_eq!(single_block("   \t"), RichBlock::empty_paragraph());
    }

    #[test]
    fn test_plain_line_is_single_plain_run() {
        assert_eq!(
            runs(single_block("plain text line")),
            vec![run("plain text line", false)]
        );
        assert_eq!(runs(single_block("  padded  ")), vec![run("padded", false)]);
    }

    #[test]
    fn test_classify_variants() {
        assert_eq!(MarkupLine::classify(""), MarkupLine::Blank);
        assert_eq!(MarkupLine::classify("* x"), MarkupLine::Bullet("x"));
        assert_eq!(MarkupLine::classify("x"), MarkupLine::Plain("x"));
        assert_eq!(
            MarkupLine::classify("x **y**"),
            MarkupLine::BoldMixed(vec!["x ", "**y**", ""])
        );
    }

    #[test]
    fn test_document_order_and_trailing_newline() {
        let document = render_markdown("# RFP: Demo\n\n## Scope of Work\n* one\n");
        assert_eq!(document.len(), 5);
        assert!(matches!(
            document.blocks[0],
            RichBlock::Heading {
                level: HeadingLevel::H1,
                ..
            }
        ));
        assert_eq!(document.blocks[1], RichBlock::empty_paragraph());
        assert!(matches!(
            document.blocks[2],
            RichBlock::Heading {
                level: HeadingLevel::H2,
                ..
            }
        ));
        assert!(matches!(document.blocks[3], RichBlock::BulletItem { .. }));
        assert_eq!(document.blocks[4], RichBlock::empty_paragraph());
    }

    #[test]
    fn test_information_separator_is_not_trimmed() {
        assert_eq!(
            runs(single_block("\u{1c}# Title")),
            vec![run("\u{1c}# Title", false)]
        );
    }

    #[test]
    fn test_carriage_returns_are_trimmed() {
        let document = render_markdown("# Title\r\nbody\r");
        assert_eq!(
            document.blocks[0],
            RichBlock::Heading {
                level: HeadingLevel::H1,
                text: "Title".to_string()
            }
        );
        assert_eq!(runs(document.blocks[1].clone()), vec![run("body", false)]);
    }

    proptest! {
        #[test]
        fn prop_one_block_per_line(text in any::<String>()) {
            let document = render_markdown(&text);
            prop_assert_eq!(document.len(), text.split('\n').count());
        }

        #[test]
        fn prop_one_block_per_markup_line(
            lines in prop::collection::vec("[#* a-zA-Z]{0,16}", 0..24)
        ) {
            let text = lines.join("\n");
            let document = render_markdown(&text);
            prop_assert_eq!(document.len(), lines.len().max(1));
        }

        #[test]
        fn prop_paragraphs_never_lose_their_run(text in "[^\n]*") {
            if let RichBlock::Paragraph { runs } = single_block(&text) {
                prop_assert!(!runs.is_empty());
            }
        }
    }
}
