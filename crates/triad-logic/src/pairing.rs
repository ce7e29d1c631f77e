//! Deterministic triple enumeration for tournament matches
//!
//! Every multiset of three roster indices plays exactly once, so a strategy
//! meets copies of itself too. Matches are numbered by the position of their
//! triple in lexicographic order, and any single match can be looked up
//! without materializing the whole list.

/// Roster indices seated in a match, `first <= second <= third`
pub type Triple = (usize, usize, usize);

/// Generate all match triples for a roster of `roster_len` strategies
///
/// Returns every `(i, j, k)` with `i <= j <= k < roster_len` in lexicographic
/// order. Index `m` of the result is match `m`.
pub fn generate_all_triples(roster_len: usize) -> Vec<Triple> {
    let mut triples = Vec::with_capacity(calculate_match_count(roster_len));
    for i in 0..roster_len {
        for j in i..roster_len {
            for k in j..roster_len {
                triples.push((i, j, k));
            }
        }
    }
    triples
}

/// Get the triple for a specific match index without allocating
///
/// Returns `None` when `match_index` is past the last match.
pub fn get_triple_for_match(roster_len: usize, match_index: usize) -> Option<Triple> {
    if match_index >= calculate_match_count(roster_len) {
        return None;
    }

    let mut rank = match_index;
    for i in 0..roster_len {
        // Triples starting with i: pairs (j, k) with i <= j <= k < n
        let block = pairs_with_repetition(roster_len - i);
        if rank >= block {
            rank -= block;
            continue;
        }
        for j in i..roster_len {
            let row = roster_len - j;
            if rank < row {
                return Some((i, j, j + rank));
            }
            rank -= row;
        }
    }
    None
}

/// Calculate total number of matches: n(n+1)(n+2)/6
pub fn calculate_match_count(roster_len: usize) -> usize {
    let n = roster_len;
    n * (n + 1) * (n + 2) / 6
}

/// Number of pairs `j <= k` drawn from `m` values
fn pairs_with_repetition(m: usize) -> usize {
    m * (m + 1) / 2
}
