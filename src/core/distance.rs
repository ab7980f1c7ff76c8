/// Unweighted Levenshtein distance between two strings
///
/// Insertions, deletions and substitutions each cost 1. Distance is measured
/// over Unicode scalar values, so multi-byte characters count once.
///
/// # Arguments
/// * `a` - Source string
/// * `b` - Target string
///
/// # Returns
/// Minimum number of single-character edits turning `a` into `b`
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // dist[i][j] is the distance between a[..i] and b[..j]
    let mut dist = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in dist.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dist[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dist[i][j] = (dist[i - 1][j - 1] + cost)
                .min(dist[i - 1][j] + 1)
                .min(dist[i][j - 1] + 1);
        }
    }

    dist[a.len()][b.len()]
}

/// Whether `query` is close enough to `name` to count as a match
///
/// The edit distance may be at most half the name's length, rounded down.
/// An empty query never matches.
#[inline]
pub fn is_similar(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    levenshtein(name, query) <= name.chars().count() / 2
}
