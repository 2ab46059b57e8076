//! Per-category sets of unclaimed spawn points, drained as phases place content.

use std::mem;

use rand_chacha::rand_core::Rng;

use crate::types::{Category, Pos};

use super::rng::random_index;

const POOLED_CATEGORIES: usize = Category::POOLED.len();

/// Ordered spawn points per category. Removal keeps the remaining order so a
/// seeded stream always resolves to the same points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnPool {
    points: [Vec<Pos>; POOLED_CATEGORIES],
}

impl SpawnPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point. Categories without a pool (`Exit`, `Empty`) ignore it.
    pub fn push(&mut self, category: Category, pos: Pos) {
        if let Some(slot) = category.pool_slot() {
            debug_assert!(!self.points[slot].contains(&pos), "{pos:?} already in {category:?}");
            self.points[slot].push(pos);
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.all(category).len()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.count(category) == 0
    }

    pub fn all(&self, category: Category) -> &[Pos] {
        match category.pool_slot() {
            Some(slot) => &self.points[slot],
            None => &[],
        }
    }

    /// Removes and returns one uniformly random point, or `None` once the
    /// category is exhausted.
    pub fn draw<R: Rng + ?Sized>(&mut self, category: Category, rng: &mut R) -> Option<Pos> {
        let count = self.count(category);
        if count == 0 {
            return None;
        }
        let index = random_index(rng, count);
        self.remove_at(category, index)
    }

    pub fn remove_at(&mut self, category: Category, index: usize) -> Option<Pos> {
        let points = &mut self.points[category.pool_slot()?];
        (index < points.len()).then(|| points.remove(index))
    }

    /// Drains a whole category for phases that place on every point.
    pub fn take_all(&mut self, category: Category) -> Vec<Pos> {
        match category.pool_slot() {
            Some(slot) => mem::take(&mut self.points[slot]),
            None => Vec::new(),
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for category in Category::POOLED {
            counts.set(category, self.count(category));
        }
        counts
    }
}

/// Pool sizes per pooled category, captured right after decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: [usize; POOLED_CATEGORIES],
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        category.pool_slot().map_or(0, |slot| self.counts[slot])
    }

    fn set(&mut self, category: Category, count: usize) {
        if let Some(slot) = category.pool_slot() {
            self.counts[slot] = count;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::POOLED.into_iter().map(|category| (category, self.get(category)))
    }
}
