//! Natural ("human") ordering for names that embed counters.
//!
//! `cluster-2` sorts before `cluster-10` because digit runs are compared by
//! numeric value rather than character by character.

use std::cmp::Ordering;

/// A maximal run of digits or non-digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Chunk<'a> {
    fn as_str(&self) -> &'a str {
        match self {
            Chunk::Digits(s) | Chunk::Text(s) => s,
        }
    }
}

/// Split a string into alternating digit and non-digit runs.
///
/// `"cluster-2-node-10"` yields `["cluster-", "2", "-node-", "10"]`.
pub fn chunkify(s: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                chunks.push(make_chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        chunks.push(make_chunk(&s[start..], prev));
    }
    chunks
}

fn make_chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(s)
    } else {
        Chunk::Text(s)
    }
}

/// Compare two digit runs by value without converting to a fixed-width integer.
fn cmp_digits(left: &str, right: &str) -> Ordering {
    let l = left.trim_start_matches('0');
    let r = right.trim_start_matches('0');
    l.len().cmp(&r.len()).then_with(|| l.cmp(r))
}

/// Natural order comparison.
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    if left == right {
        return Ordering::Equal;
    }

    let lc = chunkify(left);
    let rc = chunkify(right);

    for (l, r) in lc.iter().zip(rc.iter()) {
        if l == r {
            continue;
        }
        let ord = match (l, r) {
            (Chunk::Digits(a), Chunk::Digits(b)) => cmp_digits(a, b),
            _ => l.as_str().cmp(r.as_str()),
        };
        // "007" vs "7" is equal here; the raw comparison below settles it
        if ord != Ordering::Equal {
            return ord;
        }
    }

    lc.len()
        .cmp(&rc.len())
        .then_with(|| left.cmp(right))
}
