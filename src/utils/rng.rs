use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hands out deterministic RNG streams derived from one master seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get a new RNG for a named stream by hashing the name with the master seed
    pub fn get_rng(&self, name: &str) -> ChaCha8Rng {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        name.hash(&mut hasher);
        ChaCha8Rng::seed_from_u64(hasher.finish())
    }
}

/// RNG used when an episode reset picks a random starting checkpoint
#[derive(Resource, Debug, Clone)]
pub struct SpawnRng(ChaCha8Rng);

impl SpawnRng {
    pub const STREAM: &'static str = "spawn";

    pub fn new(manager: &RngManager) -> Self {
        Self(manager.get_rng(Self::STREAM))
    }

    /// Uniform checkpoint index in `0..len`
    pub fn checkpoint_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            0
        } else {
            self.0.gen_range(0..len)
        }
    }
}
