pub mod seeded;

pub use seeded::SeedRandom;
