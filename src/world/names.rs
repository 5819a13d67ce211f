//! Place-name generation for regions and towns

use rand::Rng;
use rand_chacha::ChaCha8Rng;

const REGION_PREFIXES: [&str; 20] = [
    "Alden", "Bran", "Cael", "Dorn", "Eld", "Frey", "Grim", "Hal", "Isen", "Kael", "Lorn", "Mar",
    "Nor", "Osk", "Perr", "Quin", "Rav", "Sten", "Thur", "Vael",
];

const REGION_SUFFIXES: [&str; 20] = [
    "mark", "ford", "heim", "dale", "wick", "ton", "bury", "wood", "vale", "gate", "moor", "fell",
    "shire", "garth", "mead", "holt", "strand", "cliff", "reach", "march",
];

const TOWN_PREFIXES: [&str; 16] = [
    "Ash", "Bright", "Cold", "Deep", "East", "Fair", "Gold", "High", "Long", "New", "Old", "Red",
    "Silver", "Stone", "West", "White",
];

const TOWN_SUFFIXES: [&str; 16] = [
    "bridge", "brook", "burgh", "castle", "cross", "field", "haven", "hill", "market", "mill",
    "port", "stead", "town", "watch", "well", "yard",
];

pub fn region_name(rng: &mut ChaCha8Rng) -> String {
    let prefix = REGION_PREFIXES[rng.gen_range(0..REGION_PREFIXES.len())];
    let suffix = REGION_SUFFIXES[rng.gen_range(0..REGION_SUFFIXES.len())];
    format!("{}{}", prefix, suffix)
}

pub fn town_name(rng: &mut ChaCha8Rng) -> String {
    let prefix = TOWN_PREFIXES[rng.gen_range(0..TOWN_PREFIXES.len())];
    let suffix = TOWN_SUFFIXES[rng.gen_range(0..TOWN_SUFFIXES.len())];
    format!("{}{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_names_are_deterministic_per_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(region_name(&mut a), region_name(&mut b));
        assert_eq!(town_name(&mut a), town_name(&mut b));
    }
}
