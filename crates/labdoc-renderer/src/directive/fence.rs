//! Code fence tracking for directive scanning.
//!
//! Directive markers inside fenced code blocks are literal text, so the
//! scanner needs to know which byte ranges of the source are fenced.

use std::ops::Range;

/// Tracks code fence state during line-by-line processing.
///
/// Code fences can use backticks or tildes (three or more). The closing
/// fence must use the same character and be at least as long as the
/// opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character used for the current fence (backtick or tilde).
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Update fence state based on a line.
    ///
    /// Returns `true` if the line is a fence marker (opening or closing).
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        if let Some(fence_char) = self.fence_char {
            if is_closing_fence(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
                return true;
            }
            false
        } else if let Some((ch, len)) = detect_fence(trimmed) {
            self.fence_char = Some(ch);
            self.fence_len = len;
            true
        } else {
            false
        }
    }
}

/// Byte ranges of `text` covered by fenced code blocks, fence lines included.
///
/// An unclosed fence extends to the end of the text.
pub(crate) fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut tracker = FenceTracker::new();
    let mut open_at = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let was_in_fence = tracker.in_fence();
        tracker.update(line.trim_end_matches(['\n', '\r']));

        match (was_in_fence, tracker.in_fence()) {
            (false, true) => open_at = Some(offset),
            (true, false) => {
                if let Some(start) = open_at.take() {
                    ranges.push(start..offset + line.len());
                }
            }
            _ => {}
        }

        offset += line.len();
    }

    if let Some(start) = open_at {
        ranges.push(start..text.len());
    }

    ranges
}

fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

/// A closing fence uses the opening character, is at least as long, and
/// carries nothing but trailing whitespace.
fn is_closing_fence(trimmed: &str, expected_char: char, min_len: usize) -> bool {
    if !trimmed.starts_with(expected_char) {
        return false;
    }

    let count = trimmed.chars().take_while(|&c| c == expected_char).count();
    if count < min_len {
        return false;
    }

    trimmed[count..].chars().all(char::is_whitespace)
}
