// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message Chunker (spec §4.3): decomposes a logical message into UI-sized
//! chunks, cutting at the latest eligible boundary before falling back to a
//! grapheme-safe force split. A pure function of `(body, max_chunk_size)`.

use orc_core::{Chunk, ChunkPlan};
use unicode_segmentation::UnicodeSegmentation;

/// Default chunk size in graphemes: chunks above ~200 characters are prone
/// to truncation or partial submission by the target agent's input box.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 200;

fn is_sentence_terminator(g: &str) -> bool {
    matches!(g, "." | "!" | "?")
}

fn is_other_punctuation(g: &str) -> bool {
    matches!(g, "," | ";" | ":")
}

fn is_whitespace(g: &str) -> bool {
    !g.is_empty() && g.chars().all(char::is_whitespace)
}

/// Finds the latest eligible cut point (an index into `graphemes`, exclusive
/// end of the chunk) within `[cursor, window_end]`, in spec §4.3's priority
/// order. Returns `None` only when every rule finds nothing better than the
/// window's own edge, in which case the caller force-splits there.
fn find_boundary(graphemes: &[&str], cursor: usize, window_end: usize) -> Option<usize> {
    let total = graphemes.len();

    // Priority 1 & 2: terminator/punctuation followed by whitespace (or end
    // of string). Scan from the window's far edge inward for the *latest*
    // match.
    for punct_check in [is_sentence_terminator as fn(&str) -> bool, is_other_punctuation] {
        let mut i = window_end.min(total).saturating_sub(1);
        loop {
            if i < cursor {
                break;
            }
            let followed_by_ws_or_end = i + 1 == total || is_whitespace(graphemes[i + 1]);
            if punct_check(graphemes[i]) && followed_by_ws_or_end && i + 1 > cursor {
                return Some(i + 1);
            }
            if i == cursor {
                break;
            }
            i -= 1;
        }
    }

    // Priority 3: word boundary (any whitespace), cutting before it.
    let mut i = window_end.min(total).saturating_sub(1);
    loop {
        if i <= cursor {
            break;
        }
        if is_whitespace(graphemes[i]) {
            return Some(i);
        }
        i -= 1;
    }

    None
}

/// Skips the run of whitespace graphemes starting at `pos`.
fn skip_separator(graphemes: &[&str], mut pos: usize) -> usize {
    while pos < graphemes.len() && is_whitespace(graphemes[pos]) {
        pos += 1;
    }
    pos
}

/// Decomposes `body` into a [`ChunkPlan`], deterministic in `(body,
/// max_chunk_size)`. Bodies no longer than `max_chunk_size` graphemes pass
/// through as a single chunk without pagination metadata.
pub fn chunk(body: &str, max_chunk_size: usize) -> ChunkPlan {
    let graphemes: Vec<&str> = body.graphemes(true).collect();
    let total = graphemes.len();

    if total <= max_chunk_size {
        return ChunkPlan { chunks: vec![Chunk { index: 1, total: 1, payload: body.to_string() }] };
    }

    let mut payloads = Vec::new();
    let mut cursor = 0;
    while cursor < total {
        let window_end = (cursor + max_chunk_size).min(total);
        let cut = find_boundary(&graphemes, cursor, window_end).unwrap_or(window_end);
        // A boundary search can legitimately return `cursor` itself only via
        // the force-split fallback; guard against a zero-length chunk.
        let cut = if cut <= cursor { window_end.max(cursor + 1) } else { cut };
        payloads.push(graphemes[cursor..cut].concat());
        cursor = skip_separator(&graphemes, cut);
    }

    let n = payloads.len();
    let chunks = payloads
        .into_iter()
        .enumerate()
        .map(|(i, payload)| Chunk { index: i + 1, total: n, payload })
        .collect();
    ChunkPlan { chunks }
}

/// Chunks with the default `max_chunk_size` (200).
pub fn chunk_default(body: &str) -> ChunkPlan {
    chunk(body, DEFAULT_MAX_CHUNK_SIZE)
}

#[cfg(test)]
#[path = "chunker_tests.rs"]
mod tests;
