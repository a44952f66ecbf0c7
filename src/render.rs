use alloc::vec::Vec;

/// What goes into a rendered slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content<R> {
    /// The real content produced by the caller's `render_item`.
    Item(R),
    /// A structural skeleton of the same height, substituted while a scroll
    /// session is active under a degraded-fidelity profile. Trades visual
    /// fidelity for frame-budget headroom.
    Placeholder,
}

impl<R> Content<R> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn item(&self) -> Option<&R> {
        match self {
            Self::Item(r) => Some(r),
            Self::Placeholder => None,
        }
    }
}

/// One absolutely-positioned slot in the render plan.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderEntry<R> {
    pub index: usize,
    /// Absolute top offset within the virtual container.
    pub offset: f64,
    pub height: f64,
    pub content: Content<R>,
}

/// Height of the trailing loading indicator slot.
pub const LOADING_INDICATOR_HEIGHT: f64 = 60.0;

/// The trailing spinner slot shown while a page fetch is in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadingIndicator {
    /// Absolute top offset, immediately after the last item.
    pub offset: f64,
    pub height: f64,
}

/// The renderable output of one pass: the visible slots plus the virtual
/// container height the host should reserve.
///
/// Rebuilt from current state on every pass; nothing here is carried across
/// frames.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan<R> {
    pub entries: Vec<RenderEntry<R>>,
    pub loading_indicator: Option<LoadingIndicator>,
    pub total_height: f64,
}

impl<R> RenderPlan<R> {
    pub(crate) fn empty(total_height: f64) -> Self {
        Self {
            entries: Vec::new(),
            loading_indicator: None,
            total_height,
        }
    }
}
