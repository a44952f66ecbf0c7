use alloc::vec::Vec;

use crate::options::HeightResolver;

/// Clamps a caller-supplied height/gap/padding to a usable value.
///
/// A malformed value (negative, NaN, infinite) must never corrupt the
/// monotonicity of the offset table, so it degrades to 0 instead of erroring.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// A prefix-sum offset table over an ordered item sequence.
///
/// `offsets` has `count + 1` entries: `offsets[0] = padding` and
/// `offsets[i + 1] = offsets[i] + height(i) + gap`. The total content height is
/// `offsets[count] + padding`. Offsets are non-decreasing, which is what makes
/// the binary-search lookups below correct.
///
/// The table is read-only once built; structural changes (count, resolver,
/// gap, padding) require a rebuild.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionIndex {
    offsets: Vec<f64>,
    heights: Vec<f64>,
    gap: f64,
    padding: f64,
}

impl Default for PositionIndex {
    fn default() -> Self {
        Self {
            offsets: alloc::vec![0.0],
            heights: Vec::new(),
            gap: 0.0,
            padding: 0.0,
        }
    }
}

impl PositionIndex {
    /// Builds the table by resolving every height once. `O(n)`.
    ///
    /// A panicking resolver propagates: it is caller-authored code and
    /// swallowing it would hide data-model bugs.
    pub fn build(count: usize, resolver: &HeightResolver, gap: f64, padding: f64) -> Self {
        let gap = sanitize(gap);
        let padding = sanitize(padding);

        let mut offsets = Vec::with_capacity(count + 1);
        let mut heights = Vec::with_capacity(count);
        let mut cursor = padding;
        offsets.push(cursor);
        for i in 0..count {
            let h = sanitize(resolver.height(i));
            heights.push(h);
            cursor += h + gap;
            offsets.push(cursor);
        }

        wdebug!(count, gap, padding, total = cursor + padding, "PositionIndex::build");
        Self {
            offsets,
            heights,
            gap,
            padding,
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Absolute offset of the item's top edge.
    pub fn offset_of(&self, index: usize) -> Option<f64> {
        (index < self.len()).then(|| self.offsets[index])
    }

    /// Resolved (sanitized) height of the item.
    pub fn height_of(&self, index: usize) -> Option<f64> {
        self.heights.get(index).copied()
    }

    /// Offset one past the last item's bottom edge plus trailing gap.
    ///
    /// This is where a trailing loading indicator sits; for an empty list it
    /// is the leading padding.
    pub fn content_end(&self) -> f64 {
        self.offsets[self.len()]
    }

    pub fn total_height(&self) -> f64 {
        self.content_end() + self.padding
    }

    /// The item whose interval `[offsets[i], offsets[i] + height(i))` covers
    /// `offset`, clamped to the last item when `offset` is past the end.
    /// `O(log n)`.
    ///
    /// An offset inside a gap maps to the preceding item.
    pub fn index_at(&self, offset: f64) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        // Number of items whose top edge is at or before `offset`.
        let above = self.offsets[1..=n].partition_point(|&top| top <= offset);
        Some(above.min(n - 1))
    }

    /// First index whose bottom edge reaches `top`, i.e. the first item that
    /// can intersect a viewport starting at `top`. `O(log n)`.
    ///
    /// Returns `len()` when every item ends above `top`.
    pub fn first_intersecting(&self, top: f64) -> usize {
        let n = self.len();
        // Bottom edges (offsets[i] + heights[i] = offsets[i + 1] - gap) are
        // non-decreasing, so the predicate is monotone.
        let mut lo = 0usize;
        let mut hi = n;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.offsets[mid] + self.heights[mid] < top {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Last index whose top edge is at or before `bottom`. `O(log n)`.
    ///
    /// Returns `None` when every item starts below `bottom`.
    pub fn last_intersecting(&self, bottom: f64) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        let starts_at_or_before = self.offsets[..n].partition_point(|&top| top <= bottom);
        starts_at_or_before.checked_sub(1)
    }
}
