//! Histogram bucketing for inactivity values.

/// Equal-width buckets spanning `[min, max]` of the input values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub min: u64,
    pub max: u64,
    pub counts: Vec<usize>,
}

/// One bucket per two stale lists, never fewer than one.
pub fn bucket_count(values: usize) -> usize {
    (values / 2).max(1)
}

impl Histogram {
    /// Bucket `values` into [`bucket_count`] equal-width bins.
    ///
    /// The last bin is closed so `max` lands in it. When every value is the
    /// same, all of them fall into the first bin.
    pub fn build(values: &[u64]) -> Self {
        let bins = bucket_count(values.len());
        let mut counts = vec![0; bins];
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Self { min: 0, max: 0, counts };
        };
        let span = (max - min) as f64;
        for &value in values {
            let index = if span == 0.0 {
                0
            } else {
                let scaled = (value - min) as f64 / span * bins as f64;
                (scaled.floor() as usize).min(bins - 1)
            };
            counts[index] += 1;
        }
        Self { min, max, counts }
    }

    /// Lower and upper edge of bucket `index`.
    pub fn edges(&self, index: usize) -> (f64, f64) {
        let width = (self.max - self.min) as f64 / self.counts.len() as f64;
        let lower = self.min as f64 + width * index as f64;
        (lower, lower + width)
    }

    pub fn tallest(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
