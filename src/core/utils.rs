use rand::{
    distributions::uniform::{SampleRange, SampleUniform},
    rngs::StdRng,
    seq::SliceRandom,
    Rng, SeedableRng,
};

/// A reproducible generator when seeded, an entropy-seeded one otherwise.
pub fn zrng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn roll_dice<T, R>(rng: &mut impl Rng, range: R) -> T
where
    T: SampleUniform,
    R: SampleRange<T>,
{
    rng.gen_range(range)
}

/// A random element of the slice, `None` if it's empty.
pub fn choose<T: Copy>(rng: &mut impl Rng, items: &[T]) -> Option<T> {
    items.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{choose, roll_dice, zrng};

    #[test]
    fn seeded_rngs_repeat() {
        let mut a = zrng(Some(7));
        let mut b = zrng(Some(7));
        for _ in 0..10 {
            let x: i32 = roll_dice(&mut a, 0..=3);
            let y: i32 = roll_dice(&mut b, 0..=3);
            assert_eq!(x, y);
            assert!((0..=3).contains(&x));
        }
    }

    #[test]
    fn choose_from_empty() {
        let mut rng = zrng(Some(1));
        let empty: [i32; 0] = [];
        assert_eq!(choose(&mut rng, &empty), None);
        assert_eq!(choose(&mut rng, &[5]), Some(5));
    }

    #[test]
    fn choose_stays_in_the_slice() {
        let items = [3, 5, 8];
        let mut a = zrng(Some(3));
        let mut b = zrng(Some(3));
        for _ in 0..20 {
            let picked = choose(&mut a, &items).expect("Empty slice");
            assert!(items.contains(&picked));
            assert_eq!(choose(&mut b, &items), Some(picked));
        }
    }
}
