use rand::seq::SliceRandom;

/// Split `items` into `ceil(len / chunk_size)` ordered groups.
///
/// Every item lands in exactly one group, in its original order; the last
/// group may be smaller. A `chunk_size` of zero is treated as one.
#[must_use]
pub fn split_into_chunks<T>(items: Vec<T>, chunk_size: usize) -> Vec<Vec<T>> {
    let chunk_size = chunk_size.max(1);
    let mut groups = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut current = Vec::with_capacity(chunk_size);

    for item in items {
        current.push(item);
        if current.len() == chunk_size {
            groups.push(std::mem::replace(&mut current, Vec::with_capacity(chunk_size)));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Randomize item order before chunking.
///
/// Processing cost correlates with discovery order (neighbouring files come
/// from the same fuzzing run), so shuffling evens out per-chunk latency.
pub fn shuffle_paths<T>(items: &mut [T]) {
    items.shuffle(&mut rand::rng());
}
