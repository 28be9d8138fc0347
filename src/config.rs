//! Simulator settings: timings, fixed candidate pools and quality tiers.

use std::ops::Range;
use std::time::Duration;

/// All tunables of the simulator in one place.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Fake processing delay, sampled uniformly (milliseconds, end exclusive)
    pub processing_delay_ms: Range<u64>,
    /// Delay between a quality click and the delivery
    pub selection_delay: Duration,
    /// Delay between the delivery and the automatic modal close
    pub auto_close_delay: Duration,
    /// Total lifetime of a toast
    pub toast_lifetime: Duration,
    /// Static quality tiers rendered in the modal
    pub quality_options: Vec<String>,
    /// Candidate titles for fake metadata
    pub titles: Vec<String>,
    /// Candidate durations for fake metadata
    pub durations: Vec<String>,
    /// Candidate view counts for fake metadata
    pub views: Vec<String>,
    /// URLs offered by the "try an example" helper
    pub example_urls: Vec<String>,
    /// Seed for the randomness source; `None` seeds from entropy
    pub seed: Option<u64>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 1500..2500,
            selection_delay: Duration::from_millis(500),
            auto_close_delay: Duration::from_millis(2000),
            toast_lifetime: Duration::from_millis(3000),
            quality_options: owned(&["1080p", "720p", "480p", "360p", "Audio Only"]),
            titles: owned(&[
                "Amazing Dance Moves 🔥",
                "Cooking Tutorial - Quick Recipe",
                "Travel Vlog - Beautiful Sunset",
                "Funny Pet Moments",
                "Workout Routine Tips",
                "Art Time-lapse Creation",
                "Music Performance",
                "Life Hack You Need to Know",
            ]),
            durations: owned(&["8s", "12s", "15s", "18s", "25s", "30s"]),
            views: owned(&["45K", "127K", "523K", "1.2M", "2.8M", "5.1M"]),
            example_urls: owned(&[
                "https://www.instagram.com/reel/CXampleReel123/",
                "https://instagram.com/p/CXamplePost456/",
            ]),
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Same config with a fixed seed, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
