use std::time::Duration;

use crate::domain::{Category, Listing};
use crate::errors::SourceError;
use crate::source::ListingSource;

/// Built-in sample listings around central Tashkent.
pub struct FixtureSource {
    delay: Duration,
}

impl FixtureSource {
    /// `delay` simulates the latency of a real backend call.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn listings() -> Vec<Listing> {
        vec![
            Listing {
                id: 1,
                title: "Yangi uy, oilaga".to_string(),
                category: Category::Family,
                price: "500,000".to_string(),
                currency: "so'm".to_string(),
                floor: 3,
                rooms: 3,
                location: Some("41.3110, 69.2797".to_string()),
            },
            Listing {
                id: 2,
                title: "Qizlar uchun kvartira".to_string(),
                category: Category::Girls,
                price: "450,000".to_string(),
                currency: "so'm".to_string(),
                floor: 5,
                rooms: 2,
                location: Some("41.3150, 69.2850".to_string()),
            },
            Listing {
                id: 3,
                title: "Bollarga qulay uy".to_string(),
                category: Category::Kids,
                price: "600,000".to_string(),
                currency: "so'm".to_string(),
                floor: 2,
                rooms: 4,
                location: Some("41.3050, 69.2750".to_string()),
            },
        ]
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl ListingSource for FixtureSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(Self::listings())
    }

    fn describe(&self) -> String {
        "fixture".to_string()
    }
}
