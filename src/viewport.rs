use crate::position::sanitize;

/// The current scroll geometry: where the viewport sits and how tall it is.
///
/// Mutated only through [`crate::WindowList`] event handlers; everything else
/// reads it. With `feature = "serde"`, this type implements
/// `Serialize`/`Deserialize` so hosts can persist scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: f64,
    pub container_height: f64,
}

impl ViewportState {
    pub fn new(scroll_offset: f64, container_height: f64) -> Self {
        Self {
            scroll_offset: sanitize(scroll_offset),
            // Negative heights are a meaningful degenerate viewport; only
            // non-finite values are collapsed.
            container_height: if container_height.is_finite() {
                container_height
            } else {
                0.0
            },
        }
    }

    /// Bottom edge of the viewport in content coordinates.
    pub fn bottom(&self) -> f64 {
        self.scroll_offset + self.container_height.max(0.0)
    }
}

/// The scrolling-activity state machine.
///
/// Idle -> Scrolling on any scroll event; Scrolling -> Idle once
/// [`ScrollSession::update`] observes a quiet period of at least the settle
/// delay. Overlapping events reset the deadline, they do not stack: this is a
/// debounce, not a throttle.
///
/// Time is caller-supplied milliseconds, so there is no timer to leak; on
/// teardown [`ScrollSession::clear`] drops the pending deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSession {
    is_scrolling: bool,
    last_event_ms: Option<u64>,
}

impl ScrollSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Records a scroll event at `now_ms` and enters (or stays in) the
    /// scrolling state.
    pub fn on_event(&mut self, now_ms: u64) {
        self.is_scrolling = true;
        self.last_event_ms = Some(now_ms);
    }

    /// Settle tick: leaves the scrolling state after `settle_delay_ms` with no
    /// further events. Returns `true` when the session settled on this call.
    pub fn update(&mut self, now_ms: u64, settle_delay_ms: u64) -> bool {
        if !self.is_scrolling {
            return false;
        }
        let Some(last) = self.last_event_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) >= settle_delay_ms {
            self.clear();
            return true;
        }
        false
    }

    /// Resets to idle and drops the pending settle deadline.
    pub fn clear(&mut self) {
        self.is_scrolling = false;
        self.last_event_ms = None;
    }
}
