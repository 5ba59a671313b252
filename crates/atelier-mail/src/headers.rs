// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Header block splitting and folded-header lookup.

/// Splits a raw transfer unit at the first blank-line boundary into
/// (header text, body text). Handles both bare-LF and CRLF terminated
/// header blocks. When no blank line exists the entire input is body
/// with empty headers.
pub fn split_raw(raw: &str) -> (String, String) {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let boundary = lines.iter().position(|l| l.is_empty());
    match boundary {
        Some(idx) => (lines[..idx].join("\n"), lines[idx + 1..].join("\n")),
        None => (String::new(), lines.join("\n")),
    }
}

/// Returns the value of the named header, case-insensitively, with
/// continuation lines unfolded. Absent headers yield an empty string.
pub fn header_value(headers: &str, name: &str) -> String {
    for (field, value) in logical_lines(headers) {
        if field.eq_ignore_ascii_case(name) {
            return value;
        }
    }
    String::new()
}

/// True when any header's field name starts with `prefix`
/// (case-insensitive). Used to detect the `Resent-*` family.
pub fn has_header_with_prefix(headers: &str, prefix: &str) -> bool {
    logical_lines(headers).iter().any(|(field, _)| {
        field
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Unfolds the header block into (field name, value) pairs. Lines
/// beginning with whitespace are joined to the prior logical line.
fn logical_lines(headers: &str) -> Vec<(String, String)> {
    let mut unfolded: Vec<String> = Vec::new();
    for line in headers.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = unfolded.last_mut() {
                last.push(' ');
                last.push_str(line.trim_start());
                continue;
            }
        }
        unfolded.push(line.to_string());
    }

    unfolded
        .into_iter()
        .filter_map(|line| {
            let (field, value) = line.split_once(':')?;
            Some((field.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
