//! Quota-based assignment of themes to batch slots
//!
//! The schedule is fixed before any image work starts. Every theme gets one
//! guaranteed slot, then `weight - 1` quota slots, so over a finite batch the
//! observed distribution matches the weights exactly while the order stays random.

use crate::math::random::RandomSource;
use crate::theme::registry::Theme;

/// Ordered theme assignment, one catalog index per batch slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSchedule {
    slots: Vec<usize>,
}

impl ThemeSchedule {
    /// Build the schedule for `batch_size` slots
    ///
    /// Batches smaller than the catalog, and slots past the end of the quota
    /// pool, fall back to [`select_weighted`]. An empty catalog yields an
    /// empty schedule.
    pub fn build(themes: &[Theme], batch_size: usize, rng: &mut dyn RandomSource) -> Self {
        if themes.is_empty() {
            return Self { slots: Vec::new() };
        }

        let pool = if batch_size < themes.len() {
            Vec::new()
        } else {
            quota_pool(themes, rng)
        };

        let slots = (0..batch_size)
            .map(|slot| {
                pool.get(slot)
                    .copied()
                    .unwrap_or_else(|| select_weighted(themes, rng))
            })
            .collect();

        Self { slots }
    }

    /// Wrap a precomputed assignment
    pub const fn from_slots(slots: Vec<usize>) -> Self {
        Self { slots }
    }

    /// Catalog index per slot
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Catalog index for one slot
    pub fn theme_at(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    /// Number of scheduled slots
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are scheduled
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How many slots each catalog entry received
    pub fn counts(&self, theme_count: usize) -> Vec<usize> {
        let mut counts = vec![0; theme_count];
        for &index in &self.slots {
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }
        counts
    }
}

// Guaranteed pool shuffled first, then the remainder pool
fn quota_pool(themes: &[Theme], rng: &mut dyn RandomSource) -> Vec<usize> {
    let mut guaranteed: Vec<usize> = (0..themes.len()).collect();
    let mut remainder: Vec<usize> = themes
        .iter()
        .enumerate()
        .flat_map(|(index, theme)| {
            std::iter::repeat_n(index, theme.weight.saturating_sub(1) as usize)
        })
        .collect();

    shuffle(&mut guaranteed, rng);
    shuffle(&mut remainder, rng);

    guaranteed.extend(remainder);
    guaranteed
}

/// Seeded Fisher–Yates shuffle, walking from the back
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Pick a catalog index with probability proportional to its weight
///
/// Walks the cumulative share and returns the first theme whose share reaches
/// the roll; rounding leftovers land on the last theme.
pub fn select_weighted(themes: &[Theme], rng: &mut dyn RandomSource) -> usize {
    let total: f64 = themes.iter().map(|theme| f64::from(theme.weight)).sum();
    let roll = rng.next_f64();

    if total <= 0.0 {
        return 0;
    }

    let mut cumulative = 0.0;
    for (index, theme) in themes.iter().enumerate() {
        cumulative += f64::from(theme.weight) / total;
        if cumulative >= roll {
            return index;
        }
    }

    themes.len().saturating_sub(1)
}
