//! Markdown normalizer for model output.
//!
//! The upstream model is instructed to use `•` bullets and markdown
//! headings but is unreliable about inserting the blank lines markdown
//! rendering needs to treat each bullet or heading as its own block.
//! [`normalize`] is the deterministic safety net: it rewrites raw model
//! text into well-formed markdown regardless of how well the model
//! followed its instructions.
//!
//! The rewrite is an ordered pipeline of named rules (see [`rules`]).
//! The order is a contract, not an accident: line endings are unified
//! first so every later rule can anchor on `\n`, the block-separation
//! rules deliberately over-insert breaks, and the collapse rules at the
//! end reduce any run of three or more breaks back to one blank line.

pub mod rules;

use rules::RULES;

/// Rewrite raw model output into well-formed markdown.
///
/// Total over all inputs: never panics, never fails. Text without any
/// recognizable marker passes through with only line-ending unification
/// and whitespace trimming.
///
/// Idempotent: `normalize(normalize(t)) == normalize(t)` for all `t`.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_string();
    for rule in RULES {
        text = (rule.apply)(&text);
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_in_prose_each_get_their_own_paragraph() {
        let out = normalize("Here are the requirements: • Age 18-65 • Weight 50kg");
        assert_eq!(out, "Here are the requirements:\n\n• Age 18-65\n\n• Weight 50kg");
    }

    #[test]
    fn no_bullet_shares_a_line_with_another() {
        let out = normalize("Intro text • first • second");
        for line in out.lines() {
            assert!(line.matches('•').count() <= 1, "line {line:?} holds two bullets");
        }
        assert_eq!(out, "Intro text\n\n• first\n\n• second");
    }

    #[test]
    fn numbered_list_in_prose_is_separated() {
        let out = normalize("Steps: 1. Register 2. Donate");
        assert_eq!(out, "Steps:\n\n1. Register\n\n2. Donate");
    }

    #[test]
    fn inline_heading_pulled_onto_its_own_block() {
        let out = normalize("Thanks! ## Next Steps\nCall us.");
        assert_eq!(out, "Thanks!\n\n## Next Steps\n\nCall us.");
    }

    #[test]
    fn line_start_heading_separated_from_following_line() {
        let out = normalize("## Donation Process\nHere's what happens: • Registration • Health check");
        assert_eq!(
            out,
            "## Donation Process\n\nHere's what happens:\n\n• Registration\n\n• Health check"
        );
    }

    #[test]
    fn heading_marker_spacing_canonicalized() {
        assert_eq!(normalize("##Overview\nBody"), "## Overview\n\nBody");
    }

    #[test]
    fn bold_label_moved_onto_its_own_paragraph_with_colon_inside() {
        let out = normalize("Note **Important**: stay hydrated");
        assert_eq!(out, "Note\n\n**Important:**\n\nstay hydrated");
    }

    #[test]
    fn crlf_and_lone_cr_collapse_to_lf() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn excess_breaks_collapse_to_one_blank_line() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(normalize("plain text no markers"), "plain text no markers");
    }

    #[test]
    fn only_whitespace_is_trimmed_to_empty() {
        assert_eq!(normalize("   \n\t  "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn marker_at_position_zero_gets_no_leading_break() {
        let out = normalize("• already at start");
        assert!(!out.starts_with('\n'));
        assert_eq!(out, "• already at start");
    }

    #[test]
    fn bullets_after_colon_on_following_lines() {
        assert_eq!(normalize("list:\n•one\n•two"), "list:\n\n• one\n\n• two");
    }

    #[test]
    fn mixed_content_fully_normalized() {
        let out = normalize(
            "## Donation Process\n\nHere is what happens: • Registration • Health check 1. Check-in 2. Screening",
        );
        assert_eq!(
            out,
            "## Donation Process\n\nHere is what happens:\n\n• Registration\n\n• Health check\n\n1. Check-in\n\n2. Screening"
        );
    }

    #[test]
    fn idempotent_over_representative_inputs() {
        let inputs = [
            "Here are the requirements: • Age 18-65 • Weight 50kg",
            "Steps: 1. Register 2. Donate",
            "Thanks! ## Next Steps\nCall us.",
            "Note **Important**: stay hydrated",
            "list:\n•one\n•two",
            "## Donation Process Here's what happens:",
            "a\r\nb\rc",
            "a\n\n\n\n\nb",
            "plain text no markers",
            "• already at start",
            "",
            "   \n\t  ",
            "Eligibility: • Age 18-65 • Weight above 50kg ## Questions Ask us anything.",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn totality_over_awkward_inputs() {
        // No panics, whatever comes in.
        for input in [
            "•",
            "#",
            "######",
            "**",
            "::::•",
            "1.",
            "\r\r\r",
            "🩸 ❤️ 🏥",
            "a\0b",
            "****::**",
        ] {
            let _ = normalize(input);
        }
    }
}
