use rand::{seq::IndexedRandom, Rng};

use crate::oca::Saint;

/// Which of the day's saints to post about.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// The first saint listed for the day.
    #[default]
    Top,
    /// Any saint but the first, falling back to the first when it is alone.
    Random,
}

pub fn choose<'a, R: Rng + ?Sized>(
    saints: &'a [Saint],
    pick: Pick,
    rng: &mut R,
) -> Option<&'a Saint> {
    match (pick, saints) {
        (_, []) => None,
        (Pick::Random, [_, rest @ ..]) if !rest.is_empty() => rest.choose(rng),
        (_, [first, ..]) => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn saints(count: usize) -> Vec<Saint> {
        (0..count)
            .map(|i| Saint {
                name: format!("Saint {i}"),
                slug: format!("{i}-saint"),
                thumbnail_url: None,
            })
            .collect()
    }

    #[test]
    fn top_should_pick_the_first_saint() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in 1..6 {
            let saints = saints(count);
            let chosen = choose(&saints, Pick::Top, &mut rng).unwrap();
            assert_eq!(chosen.name, "Saint 0");
        }
    }

    #[test]
    fn random_should_fall_back_to_a_lone_saint() {
        let saints = saints(1);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chosen = choose(&saints, Pick::Random, &mut rng).unwrap();
            assert_eq!(chosen.name, "Saint 0");
        }
    }

    #[test]
    fn random_should_be_uniform_over_the_rest() {
        let saints = saints(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = [0usize; 4];
        for _ in 0..6000 {
            let chosen = choose(&saints, Pick::Random, &mut rng).unwrap();
            let index = saints.iter().position(|s| s == chosen).unwrap();
            hits[index] += 1;
        }

        assert_eq!(hits[0], 0);
        for count in &hits[1..] {
            assert!((1700..=2300).contains(count), "{hits:?}");
        }
    }

    #[test]
    fn choose_should_return_none_without_saints() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(choose(&[], Pick::Top, &mut rng).is_none());
        assert!(choose(&[], Pick::Random, &mut rng).is_none());
    }

    #[test]
    fn pick_should_default_to_top() {
        assert_eq!(Pick::default(), Pick::Top);
    }
}
