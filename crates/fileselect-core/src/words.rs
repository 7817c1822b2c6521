//! Vocabulary for generated destination names.

/// Adjectives drawn for the first half of a generated name.
pub const ADJECTIVES: [&str; 20] = [
    "amber", "brave", "calm", "dusty", "eager", "fuzzy", "gentle", "hollow", "icy", "jolly",
    "keen", "lucky", "mellow", "nimble", "olive", "proud", "quiet", "rapid", "silent", "tidy",
];

/// Nouns drawn for the second half of a generated name.
pub const NOUNS: [&str; 20] = [
    "anchor", "badger", "canyon", "dune", "ember", "falcon", "glacier", "harbor", "island",
    "jungle", "kettle", "lantern", "meadow", "nebula", "orchard", "pebble", "quarry", "river",
    "summit", "tundra",
];
