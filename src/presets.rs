// File: src/presets.rs
//! Curated name groups behind "load an interesting name".

use crate::core::selection::{Selection, SelectionList};
use crate::core::types::GenderFilter::{self, Female as F, Male as M};
use rand::Rng;

type Preset = &'static [(&'static str, GenderFilter)];

const PRESETS: &[Preset] = &[
    &[("Kobe", M)],
    &[("Zendaya", F)],
    &[("Beyoncé", F)],
    &[("Adele", F)],
    &[("Rihanna", F)],
    &[("Drake", M)],
    &[("Shakira", F)],
    &[("Oprah", F)],
    &[("Elvis", M)],
    &[("Cher", F)],
    &[("Arya", F)],
    &[("Khaleesi", F)],
    &[("Neo", M)],
    &[("Elsa", F)],
    &[("Anakin", M)],
    &[("Kylo", M)],
    &[("Bella", F)],
    &[("Jasmine", F)],
    &[("Xena", F)],
    &[("Dexter", M)],
    &[("Shaquille", M)],
    &[("Jalen", M)],
    &[("LeBron", M)],
    &[("Tiger", M)],
    &[("Serena", F), ("Venus", F)],
    &[("Giannis", M)],
    &[("Adolf", M)],
    &[("Monica", F)],
    &[("Hillary", F)],
    &[("Isis", F)],
    &[("Katrina", F)],
    &[("Osama", M)],
    &[("Chad", M)],
    &[("Greta", F)],
    &[("Elon", M)],
    &[("Barack", M)],
    &[("Melania", F)],
    &[("Lennon", M)],
    &[("Marley", F)],
    &[("Nirvana", F)],
    &[("Tupac", M)],
    &[("Draven", M)],
    &[("Apple", F)],
    &[("North", F)],
    &[("Blue", F)],
    &[("Saint", M)],
    &[("Jamie", F), ("Jamie", M)],
    &[("Ashley", F), ("Ashley", M)],
    &[("Jordan", F), ("Jordan", M)],
    &[("Taylor", F), ("Taylor", M)],
    // The Beatles
    &[("John", M), ("Paul", M), ("George", M), ("Ringo", M)],
    // Spice Girls
    &[("Melanie", F), ("Emma", F), ("Victoria", F), ("Geri", F)],
    &[("Britney", F), ("Christina", F), ("Jessica", F), ("Mandy", F)],
    // Ninja Turtles
    &[("Leonardo", M), ("Raphael", M), ("Donatello", M), ("Michelangelo", M)],
    &[("Leia", F), ("Padmé", F), ("Rey", F)],
    &[("Noah", M), ("Noa", F)],
    &[("Chandler", M), ("Ross", M), ("Joey", M)],
    &[("North", F), ("Saint", M), ("Chicago", F), ("Psalm", M)],
    &[("Avery", F), ("Avery", M), ("Riley", F), ("Riley", M)],
];

pub fn len() -> usize {
    PRESETS.len()
}

pub fn get(index: usize) -> Option<SelectionList> {
    PRESETS.get(index).map(|preset| {
        preset
            .iter()
            .map(|&(name, gender)| Selection::literal(name, gender))
            .collect()
    })
}

pub fn all() -> impl Iterator<Item = SelectionList> {
    (0..PRESETS.len()).filter_map(get)
}

pub fn random<R: Rng + ?Sized>(rng: &mut R) -> SelectionList {
    get(rng.random_range(0..PRESETS.len())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_presets_are_non_empty_literals() {
        assert_eq!(all().count(), len());
        assert!(all().all(|list| !list.is_empty()));
        assert_eq!(get(0).unwrap().get(0).unwrap().label(), "Kobe (M)");
        assert!(get(len()).is_none());
    }

    #[test]
    fn test_random_preset_is_one_of_the_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = random(&mut rng);
            assert!(all().any(|list| list == picked));
        }
    }
}
