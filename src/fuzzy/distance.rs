// File: src/fuzzy/distance.rs
//! Edit distances over case-normalized strings.
//!
//! All functions lowercase both inputs and compare Unicode scalar values, so
//! `levenshtein("Cat", "cAT") == 0`.

fn normalized_chars(s: &str) -> Vec<char> {
    s.to_lowercase().chars().collect()
}

/// Levenshtein distance with unit insert/delete/substitute costs.
///
/// Keeps two DP rows; the result equals the last cell of `levenshtein_matrix`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a = normalized_chars(a);
    let b = normalized_chars(b);
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr_row[j + 1] = if ca == cb {
                prev_row[j]
            } else {
                1 + prev_row[j + 1].min(curr_row[j]).min(prev_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// The full `(|a|+1) x (|b|+1)` Levenshtein table.
///
/// Row 0 and column 0 hold the base cases; `table[i][j]` is the distance
/// between the first `i` chars of `a` and the first `j` chars of `b`.
pub fn levenshtein_matrix(a: &str, b: &str) -> Vec<Vec<usize>> {
    let a = normalized_chars(a);
    let b = normalized_chars(b);
    let (m, n) = (a.len(), b.len());

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1]
            } else {
                1 + dp[i - 1][j].min(dp[i][j - 1]).min(dp[i - 1][j - 1])
            };
        }
    }
    dp
}

/// Optimal-string-alignment distance: Levenshtein plus adjacent transpositions.
///
/// Not a metric (the triangle inequality can fail), so it must not index a BK-tree.
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a = normalized_chars(a);
    let b = normalized_chars(b);
    let (m, n) = (a.len(), b.len());

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (dp[i - 1][j] + 1).min(dp[i][j - 1] + 1).min(dp[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(dp[i - 2][j - 2] + cost);
            }
            dp[i][j] = best;
        }
    }
    dp[m][n]
}

/// Percentage similarity in `[0, 100]`, based on Levenshtein distance over the
/// longer input's length. Two empty strings are 100% similar.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.to_lowercase().chars().count().max(b.to_lowercase().chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let distance = levenshtein(a, b);
    (max_len - distance) as f64 / max_len as f64 * 100.0
}

pub fn is_likely_typo(word: &str, candidate: &str, threshold: usize) -> bool {
    levenshtein(word, candidate) <= threshold
}
