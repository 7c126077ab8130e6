use crate::Digit;

/// Every ordered selection of `count` distinct pool positions.
///
/// Selections come out in lexicographic order of pool positions, so the first
/// digit varies slowest. A pool of `m` digits yields `m! / (m - count)!`
/// selections; `count == 0` yields a single empty selection and `count > m`
/// yields none.
pub fn ordered_selections(pool: &[Digit], count: usize) -> Vec<Vec<Digit>> {
    let mut out = Vec::with_capacity(selection_count(pool.len(), count));
    if count > pool.len() {
        return out;
    }
    let mut used = vec![false; pool.len()];
    let mut current = Vec::with_capacity(count);
    extend_selections(pool, count, &mut used, &mut current, &mut out);
    out
}

fn extend_selections(
    pool: &[Digit],
    count: usize,
    used: &mut [bool],
    current: &mut Vec<Digit>,
    out: &mut Vec<Vec<Digit>>,
) {
    if current.len() == count {
        out.push(current.clone());
        return;
    }
    for idx in 0..pool.len() {
        if used[idx] {
            continue;
        }
        used[idx] = true;
        current.push(pool[idx]);
        extend_selections(pool, count, used, current, out);
        current.pop();
        used[idx] = false;
    }
}

/// `m! / (m - k)!`, zero when `k > m`.
pub fn selection_count(pool_len: usize, count: usize) -> usize {
    if count > pool_len {
        return 0;
    }
    (pool_len - count + 1..=pool_len).product()
}

/// The pool the best-play search runs over: the live digits plus a trailing
/// zero when zero is no longer among them. This only widens the explanation
/// search (playing a zero is how a player "contributes nothing"); the live
/// pool shown to the player is never touched.
pub fn search_pool(pool: &[Digit]) -> Vec<Digit> {
    let mut digits = pool.to_vec();
    if !digits.contains(&0) {
        digits.push(0);
    }
    digits
}
