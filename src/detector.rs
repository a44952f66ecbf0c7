use crate::viewport::ViewportState;

/// Pagination flags the caller supplies each render pass.
///
/// `loading` must be set synchronously when a fetch starts so scroll events
/// arriving during the fetch do not re-fire the end-reached signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageState {
    pub loading: bool,
    pub has_next_page: bool,
}

/// Whether the viewport has crossed the load-more threshold.
///
/// Fires iff there is a next page, no load is in flight, and the viewport
/// bottom has covered at least `threshold` of the total content height.
/// `total_height = 0` never fires (division guard; also covers the empty
/// list). The threshold is a fraction and is clamped to `[0, 1]`.
pub fn end_reached(
    viewport: ViewportState,
    total_height: f64,
    threshold: f64,
    page: PageState,
) -> bool {
    if !page.has_next_page || page.loading {
        return false;
    }
    if !(total_height > 0.0) {
        return false;
    }
    let threshold = threshold.clamp(0.0, 1.0);
    viewport.bottom() / total_height >= threshold
}

/// One-shot latch around [`end_reached`].
///
/// The pure predicate is true for every scroll event past the threshold; the
/// guard narrows that to one callback per crossing per loading cycle. It
/// re-arms when the viewport falls back below the threshold or when a loading
/// cycle completes (`loading` observed `true`, then `false` again).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndReachedGuard {
    fired: bool,
}

impl EndReachedGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Evaluates the detector; returns `true` when the callback should be
    /// invoked now.
    pub fn check(
        &mut self,
        viewport: ViewportState,
        total_height: f64,
        threshold: f64,
        page: PageState,
    ) -> bool {
        let crossed = end_reached(viewport, total_height, threshold, page);
        if !crossed {
            // Below the threshold (or blocked by flags while below it): the
            // next genuine crossing may fire again.
            if !page.loading {
                self.fired = false;
            }
            return false;
        }
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    /// Re-arms when a load finishes. Call on every `PageState` update.
    pub fn on_page_state(&mut self, previous: PageState, next: PageState) {
        if previous.loading && !next.loading {
            self.fired = false;
        }
    }

    pub fn reset(&mut self) {
        self.fired = false;
    }
}
