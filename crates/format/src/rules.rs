//! The ordered rewrite rules behind [`crate::normalize`].
//!
//! Each rule is a pure `&str -> String` step. [`RULES`] lists them in the
//! order they must run:
//!
//! 1. line endings unified to LF
//! 2. bullet separation (after prose, after a colon, at line start)
//! 3. numbered-list separation (same three rules)
//! 4. heading isolation (inline, then line start)
//! 5. bold labels (`**label**:`) onto their own paragraph
//! 6. break collapsing (runs of 4+ newlines → 3, then 3 → 2)
//!
//! The separation rules over-insert paragraph breaks on purpose; the
//! collapse rules at the end reduce every run back to a single blank
//! line. Reordering changes results.

use regex::Regex;
use std::sync::LazyLock;

/// One named rewrite step.
pub struct RewriteRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The pipeline, in execution order.
pub const RULES: &[RewriteRule] = &[
    RewriteRule { name: "line_endings", apply: line_endings },
    RewriteRule { name: "bullet_after_text", apply: bullet_after_text },
    RewriteRule { name: "bullet_after_colon", apply: bullet_after_colon },
    RewriteRule { name: "bullet_line_start", apply: bullet_line_start },
    RewriteRule { name: "number_after_text", apply: number_after_text },
    RewriteRule { name: "number_after_colon", apply: number_after_colon },
    RewriteRule { name: "number_line_start", apply: number_line_start },
    RewriteRule { name: "heading_inline", apply: heading_inline },
    RewriteRule { name: "heading_line_start", apply: heading_line_start },
    RewriteRule { name: "bold_label", apply: bold_label },
    RewriteRule { name: "collapse_long_breaks", apply: collapse_long_breaks },
    RewriteRule { name: "collapse_triple_breaks", apply: collapse_triple_breaks },
];

/// CRLF and lone CR collapse to LF so every later rule can anchor on `\n`.
fn line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

static BULLET_AFTER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^:\n])\s*•\s*").expect("valid regex"));

/// A bullet preceded by non-colon, non-newline text starts its own block.
fn bullet_after_text(text: &str) -> String {
    BULLET_AFTER_TEXT.replace_all(text, "$1\n\n• ").into_owned()
}

static BULLET_AFTER_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*•\s*").expect("valid regex"));

/// A bullet right after a colon gets a paragraph break too. Also swallows
/// the dangling space `bullet_after_text` leaves when the bullet followed
/// `": "`.
fn bullet_after_colon(text: &str) -> String {
    BULLET_AFTER_COLON.replace_all(text, ":\n\n• ").into_owned()
}

static BULLET_LINE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*•[ \t]*").expect("valid regex"));

/// A bullet already at line start keeps exactly one space before its
/// content. Horizontal whitespace only: matching `\s` here would swallow
/// the blank lines the rules above just inserted.
fn bullet_line_start(text: &str) -> String {
    BULLET_LINE_START.replace_all(text, "• ").into_owned()
}

static NUMBER_AFTER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^:\n])\s*(\d+\.)\s*").expect("valid regex"));

fn number_after_text(text: &str) -> String {
    NUMBER_AFTER_TEXT.replace_all(text, "$1\n\n$2 ").into_owned()
}

static NUMBER_AFTER_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*(\d+\.)\s*").expect("valid regex"));

fn number_after_colon(text: &str) -> String {
    NUMBER_AFTER_COLON.replace_all(text, ":\n\n$1 ").into_owned()
}

static NUMBER_LINE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\d+\.)[ \t]*").expect("valid regex"));

fn number_line_start(text: &str) -> String {
    NUMBER_LINE_START.replace_all(text, "$1 ").into_owned()
}

static HEADING_INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n#])\s*(#{1,6})[ \t]*([^\n]+)").expect("valid regex"));

/// A heading marker appearing after other text on a line is pulled onto
/// its own block. The `[^\n#]` guard keeps the rule from matching inside
/// the marker's own `#` run.
fn heading_inline(text: &str) -> String {
    HEADING_INLINE
        .replace_all(text, "$1\n\n$2 $3\n\n")
        .into_owned()
}

static HEADING_LINE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(#{1,6})[ \t]*([^\n]+)").expect("valid regex"));

/// A heading at line start gets canonical marker spacing and a trailing
/// paragraph break.
fn heading_line_start(text: &str) -> String {
    HEADING_LINE_START
        .replace_all(text, "$1 $2\n\n")
        .into_owned()
}

static BOLD_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n*])\s*\*\*([^*]+)\*\*:\s*").expect("valid regex"));

/// `**label**:` mid-paragraph becomes its own paragraph, with the colon
/// moved inside the bold run.
fn bold_label(text: &str) -> String {
    BOLD_LABEL
        .replace_all(text, "$1\n\n**$2:**\n\n")
        .into_owned()
}

static LONG_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("valid regex"));

fn collapse_long_breaks(text: &str) -> String {
    LONG_BREAKS.replace_all(text, "\n\n\n").into_owned()
}

static TRIPLE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3}").expect("valid regex"));

fn collapse_triple_breaks(text: &str) -> String {
    TRIPLE_BREAKS.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_is_the_documented_contract() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "line_endings",
                "bullet_after_text",
                "bullet_after_colon",
                "bullet_line_start",
                "number_after_text",
                "number_after_colon",
                "number_line_start",
                "heading_inline",
                "heading_line_start",
                "bold_label",
                "collapse_long_breaks",
                "collapse_triple_breaks",
            ]
        );
    }

    #[test]
    fn line_endings_unify_to_lf() {
        assert_eq!(line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn bullet_after_text_inserts_paragraph_break() {
        assert_eq!(bullet_after_text("points • one"), "points\n\n• one");
    }

    #[test]
    fn bullet_after_text_skips_colon_prefix() {
        // The colon case belongs to bullet_after_colon; the only match here
        // is the space between ':' and '•'.
        assert_eq!(bullet_after_text("points: • one"), "points: \n\n• one");
    }

    #[test]
    fn bullet_after_colon_takes_over_and_drops_the_dangling_space() {
        assert_eq!(bullet_after_colon("points: \n\n• one"), "points:\n\n• one");
    }

    #[test]
    fn bullet_line_start_keeps_blank_lines_intact() {
        assert_eq!(bullet_line_start("a\n\n•   one"), "a\n\n• one");
    }

    #[test]
    fn number_rules_mirror_bullet_rules() {
        assert_eq!(number_after_text("steps 1. go"), "steps\n\n1. go");
        assert_eq!(number_after_colon("steps:1. go"), "steps:\n\n1. go");
        assert_eq!(number_line_start("  2.   go"), "2. go");
    }

    #[test]
    fn heading_inline_isolates_marker_and_text() {
        // Over-inserts on purpose; the collapse rules trim the extra break.
        assert_eq!(heading_inline("done. ## Next\nmore"), "done.\n\n## Next\n\n\nmore");
    }

    #[test]
    fn heading_inline_ignores_marker_at_text_start() {
        assert_eq!(heading_inline("## Top"), "## Top");
    }

    #[test]
    fn heading_line_start_adds_trailing_break_and_spacing() {
        assert_eq!(heading_line_start("###Tips\nbody"), "### Tips\n\n\nbody");
    }

    #[test]
    fn bold_label_moves_colon_inside() {
        assert_eq!(bold_label("and **Note**: rest"), "and\n\n**Note:**\n\nrest");
    }

    #[test]
    fn bold_label_leaves_label_at_text_start_alone() {
        assert_eq!(bold_label("**Note**: rest"), "**Note**: rest");
    }

    #[test]
    fn collapse_rules_reduce_to_one_blank_line() {
        assert_eq!(
            collapse_triple_breaks(&collapse_long_breaks("a\n\n\n\n\n\nb")),
            "a\n\nb"
        );
        assert_eq!(collapse_triple_breaks("a\n\n\nb"), "a\n\nb");
    }
}
