//! Synthetic distance/price quote adapter.
//!
//! Stands in for a real geocoding and pricing service: distances are drawn
//! uniformly from 1..=30 km and prices follow the marketplace formula. This
//! is the only RNG in the tree.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::PackageDimensions;
use crate::domain::ports::{PriceEngine, PriceEngineError, Quote, price_for};

/// Smallest synthesized distance, in kilometres.
const MIN_DISTANCE_KM: u32 = 1;
/// Largest synthesized distance, in kilometres.
const MAX_DISTANCE_KM: u32 = 30;

/// Quote engine backed by a seeded RNG.
#[derive(Debug)]
pub struct SyntheticPriceEngine {
    rng: Mutex<SmallRng>,
}

impl SyntheticPriceEngine {
    /// Create an engine seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Create an engine with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SyntheticPriceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceEngine for SyntheticPriceEngine {
    async fn quote(&self, dimensions: &PackageDimensions) -> Result<Quote, PriceEngineError> {
        let distance = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| PriceEngineError::unavailable("rng mutex poisoned"))?;
            rng.gen_range(MIN_DISTANCE_KM..=MAX_DISTANCE_KM)
        };
        let distance_km = f64::from(distance);
        Ok(Quote {
            distance_km,
            price: price_for(dimensions.volume_cm3(), distance_km),
        })
    }
}
