use rand::Rng;

/// Fisher-Yates shuffle: every ordering of `items` is equally likely.
///
/// The random source is passed in so callers can seed it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let len = items.len();
    if len < 2 {
        return;
    }

    for i in 0..len - 1 {
        let j = rng.random_range(i..len);
        items.swap(i, j);
    }
}
