//! Frame formatting: the boxed block of lines written for one log call.
use super::types::CallSite;

/// Corner opening the frame.
pub const TOP_LEFT_CORNER: char = '╔';
/// Corner closing the frame.
pub const BOTTOM_LEFT_CORNER: char = '╚';
/// Corner starting a divider inside the frame.
pub const MIDDLE_CORNER: char = '╟';
/// Left edge of every content line.
pub const VERTICAL_DOUBLE_LINE: char = '║';

/// Number of glyphs in each divider.
pub const DIVIDER_WIDTH: usize = 88;

/// Double-line divider used by the top and bottom borders.
pub const DOUBLE_DIVIDER: &str = "════════════════════════════════════════════════════════════════════════════════════════";
/// Single-line divider used between blocks.
pub const SINGLE_DIVIDER: &str = "────────────────────────────────────────────────────────────────────────────────────────";

/// `╔` followed by the double divider.
pub const TOP_BORDER: &str = "╔════════════════════════════════════════════════════════════════════════════════════════";
/// `╚` followed by the double divider.
pub const BOTTOM_BORDER: &str = "╚════════════════════════════════════════════════════════════════════════════════════════";
/// `╟` followed by the single divider.
pub const MIDDLE_BORDER: &str = "╟────────────────────────────────────────────────────────────────────────────────────────";

/// The ordered lines of one framed record.
///
/// Lines are built in this order:
///
/// ```text
/// ╔═══…          top border
/// ║ Thread: main  (thread info enabled)
/// ╟───…
/// ║ Foo.bar  (foo.rs:42)  (call site resolved)
/// ╟───…
/// ║ <message>
/// ╚═══…          bottom border
/// ```
///
/// The message is copied verbatim; embedded newlines are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBlock {
    lines: Vec<String>,
}

impl FrameBlock {
    /// Build the block for one call.
    ///
    /// `thread_name` is `Some` when thread info is enabled.
    #[must_use]
    pub fn build(thread_name: Option<&str>, call_site: Option<&CallSite>, message: &str) -> Self {
        let mut lines = Vec::with_capacity(7);
        lines.push(TOP_BORDER.to_string());
        if let Some(name) = thread_name {
            lines.push(format!("{VERTICAL_DOUBLE_LINE} Thread: {name}"));
            lines.push(MIDDLE_BORDER.to_string());
        }
        if let Some(site) = call_site {
            lines.push(format!("{VERTICAL_DOUBLE_LINE} {site}"));
            lines.push(MIDDLE_BORDER.to_string());
        }
        lines.push(format!("{VERTICAL_DOUBLE_LINE} {message}"));
        lines.push(BOTTOM_BORDER.to_string());
        Self { lines }
    }

    /// The lines, in emission order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines in the block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`: a block holds at least the borders and the content line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl IntoIterator for FrameBlock {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrameBlock {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn site() -> CallSite {
        CallSite {
            simple_type_name: "Foo".to_string(),
            method_name: "bar".to_string(),
            file_name: "Foo.ext".to_string(),
            line_number: 42,
        }
    }

    #[test]
    fn dividers_have_fixed_width() {
        assert_eq!(DOUBLE_DIVIDER.chars().count(), DIVIDER_WIDTH);
        assert_eq!(SINGLE_DIVIDER.chars().count(), DIVIDER_WIDTH);
        assert!(DOUBLE_DIVIDER.chars().all(|c| c == '═'));
        assert!(SINGLE_DIVIDER.chars().all(|c| c == '─'));
    }

    #[test]
    fn borders_are_corner_plus_divider() {
        assert_eq!(TOP_BORDER, format!("{TOP_LEFT_CORNER}{DOUBLE_DIVIDER}"));
        assert_eq!(BOTTOM_BORDER, format!("{BOTTOM_LEFT_CORNER}{DOUBLE_DIVIDER}"));
        assert_eq!(MIDDLE_BORDER, format!("{MIDDLE_CORNER}{SINGLE_DIVIDER}"));
    }

    #[test]
    fn full_block_has_seven_lines_in_order() {
        let block = FrameBlock::build(Some("main"), Some(&site()), "X");
        assert_eq!(
            block.lines(),
            [
                TOP_BORDER,
                "║ Thread: main",
                MIDDLE_BORDER,
                "║ Foo.bar  (Foo.ext:42)",
                MIDDLE_BORDER,
                "║ X",
                BOTTOM_BORDER,
            ]
        );
    }

    #[test]
    fn minimal_block_has_three_lines() {
        let block = FrameBlock::build(None, None, "hello");
        assert_eq!(block.lines(), [TOP_BORDER, "║ hello", BOTTOM_BORDER]);
    }

    #[test]
    fn thread_only_block() {
        let block = FrameBlock::build(Some("io"), None, "m");
        assert_eq!(block.len(), 5);
        assert_eq!(block.lines()[1], "║ Thread: io");
        assert_eq!(block.lines()[2], MIDDLE_BORDER);
    }

    #[test]
    fn call_site_only_block() {
        let block = FrameBlock::build(None, Some(&site()), "m");
        assert_eq!(block.len(), 5);
        assert_eq!(block.lines()[1], "║ Foo.bar  (Foo.ext:42)");
        assert_eq!(block.lines()[2], MIDDLE_BORDER);
    }

    #[test]
    fn line_count_follows_optional_blocks() {
        for thread in [None, Some("t")] {
            for call_site in [None, Some(site())] {
                let block = FrameBlock::build(thread, call_site.as_ref(), "m");
                let expected =
                    3 + 2 * usize::from(thread.is_some()) + 2 * usize::from(call_site.is_some());
                assert_eq!(block.len(), expected);
                assert!(!block.is_empty());
            }
        }
    }

    #[test]
    fn message_is_passed_through_verbatim() {
        let block = FrameBlock::build(None, None, "a\nb\t{}║");
        assert_eq!(block.lines()[1], "║ a\nb\t{}║");
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn empty_message_still_has_content_line() {
        let block = FrameBlock::build(None, None, "");
        assert_eq!(block.lines()[1], "║ ");
    }

    #[test]
    fn into_iter_yields_lines_in_order() {
        let block = FrameBlock::build(None, None, "z");
        let collected: Vec<String> = block.clone().into_iter().collect();
        assert_eq!(collected, block.lines());
        assert_eq!((&block).into_iter().count(), 3);
    }
}
