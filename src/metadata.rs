//! Seedable source for everything the simulator makes up.

use std::ops::Range;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::SimulatorConfig;
use crate::model::FakeMetadata;

pub struct MetadataSource {
    rng: StdRng,
    titles: Vec<String>,
    durations: Vec<String>,
    views: Vec<String>,
    example_urls: Vec<String>,
    delay_ms: Range<u64>,
}

impl MetadataSource {
    pub fn new(config: &SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            titles: config.titles.clone(),
            durations: config.durations.clone(),
            views: config.views.clone(),
            example_urls: config.example_urls.clone(),
            delay_ms: config.processing_delay_ms.clone(),
        }
    }

    /// Picks title, duration and views uniformly from their pools.
    pub fn metadata(&mut self) -> FakeMetadata {
        FakeMetadata {
            title: pick(&mut self.rng, &self.titles),
            duration: pick(&mut self.rng, &self.durations),
            views: pick(&mut self.rng, &self.views),
        }
    }

    /// Uniform in the configured window, end exclusive.
    pub fn processing_delay(&mut self) -> Duration {
        if self.delay_ms.is_empty() {
            return Duration::from_millis(self.delay_ms.start);
        }
        Duration::from_millis(self.rng.gen_range(self.delay_ms.clone()))
    }

    pub fn example_url(&mut self) -> String {
        pick(&mut self.rng, &self.example_urls)
    }
}

fn pick(rng: &mut StdRng, pool: &[String]) -> String {
    pool.choose(rng).cloned().unwrap_or_default()
}
