use crate::position::PositionIndex;
use crate::viewport::ViewportState;

/// An inclusive index range of items to render.
///
/// The empty range is represented as `None` at the API level, so `start <=
/// end` always holds here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always `false`: the empty range is represented as `None` by
    /// [`visible_range`].
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Iterates the indices in the range.
    pub fn indices(self) -> core::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Computes the inclusive index range intersecting the viewport, widened by
/// `overscan` on both sides and clamped to `[0, n - 1]`.
///
/// Pure and recomputed on demand: the result is always consistent with the
/// viewport passed in, never a cached range from an earlier pass.
///
/// Policy:
/// - `virtualize = false` returns the full range unconditionally (escape
///   hatch for hosts that want windowing off, not an optimization).
/// - `scroll_offset <= 0` pins the raw start to 0; a viewport bottom at or
///   past the total height pins the raw end to `n - 1`.
/// - A degenerate viewport (`container_height <= 0`) collapses to the single
///   item covering `scroll_offset`.
///
/// Index lookups are binary searches over the offset table, `O(log n)` per
/// call.
pub fn visible_range(
    viewport: ViewportState,
    index: &PositionIndex,
    overscan: usize,
    virtualize: bool,
) -> Option<VisibleRange> {
    let n = index.len();
    if n == 0 {
        return None;
    }
    if !virtualize {
        return Some(VisibleRange { start: 0, end: n - 1 });
    }

    let top = viewport.scroll_offset.max(0.0);
    let bottom = viewport.bottom();

    let (raw_start, raw_end) = if viewport.container_height <= 0.0 {
        let at = index.index_at(top)?;
        (at, at)
    } else {
        let start = if top <= 0.0 {
            0
        } else {
            index.first_intersecting(top)
        };
        if start >= n {
            // Viewport entirely past the content.
            return None;
        }
        let end = if bottom >= index.total_height() {
            n - 1
        } else {
            index.last_intersecting(bottom).unwrap_or(0)
        };
        (start, start.max(end))
    };

    Some(VisibleRange {
        start: raw_start.saturating_sub(overscan),
        end: raw_end.saturating_add(overscan).min(n - 1),
    })
}
