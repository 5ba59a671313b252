// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply-body extraction: isolates the newest human-authored content from
//! a decoded plain-text body by cutting at the first reply/forward
//! separator and trimming trailing signature boilerplate.
//!
//! Separator recognition is an ordered pattern table evaluated
//! top-to-bottom per line; first match wins. Nothing that fails every
//! pattern is ever discarded — an unrecognized body passes through whole.

use std::sync::LazyLock;

use regex::Regex;

use crate::encoding::normalize_newlines;

/// Placeholder used when a reply contained nothing but quoted content.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "(No new message body provided.)";

/// Result of reply extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedReply {
    /// The new content the sender actually wrote.
    pub text: String,
    /// True when a separator fired or cleaning shortened the text.
    pub trimmed: bool,
}

// Single-line `On ... wrote:` attribution.
static ON_WROTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^On\b.*wrote:\s*$").expect("static pattern"));

// Start of an attribution that may wrap onto following lines before the
// literal `wrote:`.
static ON_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^On\s").expect("static pattern"));

static WROTE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)wrote:\s*$").expect("static pattern"));

// `---- Original Message ----` / `---- Forwarded message ----` dividers.
static DIVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^-{2,}\s*(Original Message|Forwarded message)\s*-{2,}").expect("static pattern")
});

// Quoted or piped lines.
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>").expect("static pattern"));
static PIPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|").expect("static pattern"));

// Classic forwarded header block: `From:` with `Sent:`/`To:`/`Subject:`
// within the next few lines.
static FROM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^From:\s").expect("static pattern"));
static HEADER_BLOCK_FOLLOWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(Sent|To|Subject):\s").expect("static pattern"));

// Residual MIME artifacts that leak through imperfect multipart splits.
static MIME_ARTIFACT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)^Content-(Type|Transfer-Encoding|Disposition)\s*:").expect("static pattern"),
        Regex::new(r"(?i)^MIME-Version\s*:").expect("static pattern"),
        Regex::new(r"^--[-=_.+A-Za-z0-9]{2,}-{0,2}\s*$").expect("static pattern"),
    ]
});

// Mobile-client signature footers.
static MOBILE_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Sent (from|via|using)\b").expect("static pattern"));

/// Extracts the new reply content from a decoded plain-text body.
pub fn extract_reply(body: &str) -> ExtractedReply {
    let normalized = normalize_newlines(body);
    if normalized.trim().is_empty() {
        return ExtractedReply {
            text: String::new(),
            trimmed: false,
        };
    }

    let lines: Vec<&str> = normalized.split('\n').collect();
    let separator = separator_index(&lines);
    let cut = separator.unwrap_or(lines.len());

    let mut kept: Vec<&str> = lines[..cut]
        .iter()
        .copied()
        .filter(|line| !is_mime_artifact(line))
        .collect();

    let sig_cut = signature_cut(&kept);
    kept.truncate(sig_cut);

    let cleaned = kept.join("\n").trim().to_string();

    if cleaned.is_empty() {
        if separator.is_some() {
            return ExtractedReply {
                text: EMPTY_REPLY_PLACEHOLDER.to_string(),
                trimmed: true,
            };
        }
        // Nothing matched a separator yet cleaning emptied the text:
        // keep the whole message rather than losing it.
        return ExtractedReply {
            text: normalized.trim().to_string(),
            trimmed: false,
        };
    }

    let trimmed = separator.is_some() || cleaned.len() < normalized.trim().len();
    ExtractedReply { text: cleaned, trimmed }
}

/// Index of the first line where quoted/forwarded content begins, if any.
fn separator_index(lines: &[&str]) -> Option<usize> {
    for (i, line) in lines.iter().enumerate() {
        if ON_WROTE.is_match(line) {
            return Some(i);
        }
        // `On Mon, Jan 1, 2024,` wrapping onto up to 2 more lines before
        // the closing `wrote:`.
        if ON_START.is_match(line) {
            let window_end = (i + 3).min(lines.len());
            if lines[i..window_end].iter().any(|l| WROTE_END.is_match(l)) {
                return Some(i);
            }
        }
        if DIVIDER.is_match(line) || QUOTED.is_match(line) || PIPED.is_match(line) {
            return Some(i);
        }
        if FROM_LINE.is_match(line) {
            let window_end = (i + 5).min(lines.len());
            if lines[i + 1..window_end]
                .iter()
                .any(|l| HEADER_BLOCK_FOLLOWER.is_match(l))
            {
                return Some(i);
            }
        }
    }
    None
}

fn is_mime_artifact(line: &str) -> bool {
    MIME_ARTIFACT.iter().any(|re| re.is_match(line))
}

/// Returns the index at which the trailing signature block starts
/// (everything from that index on is dropped).
///
/// Everything from the last line equal to `--` (trailing whitespace
/// ignored, covering the conventional `-- ` form) is signature. Above
/// that, a backward walk removes blank lines and "Sent from ..." style
/// mobile-client footers, stopping at the first real content line.
fn signature_cut(lines: &[&str]) -> usize {
    let mut cut = lines
        .iter()
        .rposition(|line| line.trim() == "--")
        .unwrap_or(lines.len());

    for i in (0..cut).rev() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() {
            continue;
        }
        if MOBILE_FOOTER.is_match(trimmed) {
            cut = i;
            continue;
        }
        break;
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty_untrimmed() {
        let reply = extract_reply("   \n  ");
        assert_eq!(reply.text, "");
        assert!(!reply.trimmed);
    }

    #[test]
    fn cuts_at_on_wrote_attribution() {
        let body = "Thanks!\n\nOn Mon, Jan 1, 2024, Staff <atelier@heerawalla.com> wrote:\n> original text";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "Thanks!");
        assert!(reply.trimmed);
    }

    #[test]
    fn cuts_at_wrapped_on_wrote_attribution() {
        let body = "Sounds good.\n\nOn Mon, Jan 1, 2024 at 9:15 AM\nStaff <atelier@heerawalla.com>\nwrote:\n> earlier";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "Sounds good.");
        assert!(reply.trimmed);
    }

    #[test]
    fn cuts_at_original_message_divider() {
        let body = "New detail here.\n----- Original Message -----\nFrom: someone\nolder text";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "New detail here.");
        assert!(reply.trimmed);
    }

    #[test]
    fn cuts_at_forwarded_message_divider() {
        let body = "FYI\n---------- Forwarded message ----------\nFrom: a@example.com";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "FYI");
        assert!(reply.trimmed);
    }

    #[test]
    fn cuts_at_first_quoted_line() {
        let body = "Inline answer.\n> what metal did you want?\nAnother line after quote is still cut.";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "Inline answer.");
        assert!(reply.trimmed);
    }

    #[test]
    fn cuts_at_outlook_header_block() {
        let body = "Got it, thanks.\n\nFrom: Atelier <atelier@heerawalla.com>\nSent: Monday\nTo: me\nSubject: your ring\nolder body";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "Got it, thanks.");
        assert!(reply.trimmed);
    }

    #[test]
    fn bare_from_line_without_block_is_kept() {
        let body = "From: my perspective this looks great.\n\nLet me know.";
        let reply = extract_reply(body);
        assert_eq!(reply.text, body.trim());
        assert!(!reply.trimmed);
    }

    #[test]
    fn strips_signature_after_delimiter() {
        let body = "Looking forward to it.\n\n-- \nJane Customer\njane@example.com";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "Looking forward to it.");
        assert!(reply.trimmed);
    }

    #[test]
    fn signature_content_below_delimiter_is_fully_removed() {
        let body = "See you then.\n\n-- \nJane\njane@example.com\nSent from my iPhone";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "See you then.");
        assert!(reply.trimmed);
    }

    #[test]
    fn strips_mobile_footer() {
        let body = "Quick yes from me.\n\nSent from my iPhone";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "Quick yes from me.");
        assert!(reply.trimmed);
    }

    #[test]
    fn removes_leaked_mime_artifacts() {
        let body = "Content-Type: text/plain; charset=utf-8\nReal content survives.\n--=_boundary_42--";
        let reply = extract_reply(body);
        assert_eq!(reply.text, "Real content survives.");
        assert!(reply.trimmed);
    }

    #[test]
    fn all_quote_body_yields_placeholder() {
        let body = "> everything here\n> is quoted";
        let reply = extract_reply(body);
        assert_eq!(reply.text, EMPTY_REPLY_PLACEHOLDER);
        assert!(reply.trimmed);
    }

    #[test]
    fn unmatched_body_passes_through_whole() {
        let body = "Just a plain inquiry about a sapphire ring.\nNo quoting at all.";
        let reply = extract_reply(body);
        assert_eq!(reply.text, body);
        assert!(!reply.trimmed);
    }

    #[test]
    fn extraction_is_idempotent_on_own_output() {
        let body = "Thanks!\n\nOn Mon, Jan 1, 2024, Staff <x@y.com> wrote:\n> old\n-- \nsig";
        let first = extract_reply(body);
        let second = extract_reply(&first.text);
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn output_never_exceeds_normalized_input() {
        let bodies = [
            "Thanks!\r\n\r\nOn Mon, Jan 1, 2024, S <x@y.com> wrote:\r\n> old",
            "Inline.\n> q\nmore",
            "plain only",
        ];
        for body in bodies {
            let normalized_len = body.replace("\r\n", "\n").len();
            let reply = extract_reply(body);
            assert!(reply.text.len() <= normalized_len, "grew for {body:?}");
        }
    }
}
