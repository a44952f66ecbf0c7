use alloc::sync::Arc;

use crate::profile::DeviceProfile;

/// A callback fired when the viewport nears the end of loaded content and
/// another page should be fetched.
pub type OnEndReached = Arc<dyn Fn() + Send + Sync>;

/// Resolves per-item heights.
///
/// Heights must be deterministic for a given index while the item sequence is
/// unchanged; after a height change, rebuild via
/// [`crate::WindowList::invalidate`] (or any structural setter). Non-finite or
/// negative results are clamped to 0 rather than corrupting the offset table.
#[derive(Clone)]
pub enum HeightResolver {
    /// Every item has the same height.
    Uniform(f64),
    /// Per-index height, e.g. looked up from the caller's data model.
    PerItem(Arc<dyn Fn(usize) -> f64 + Send + Sync>),
}

impl HeightResolver {
    pub fn per_item(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerItem(Arc::new(f))
    }

    /// Raw resolved height; sanitization happens at index build.
    pub fn height(&self, index: usize) -> f64 {
        match self {
            Self::Uniform(h) => *h,
            Self::PerItem(f) => f(index),
        }
    }

    /// Referential identity, used to decide whether the offset table must be
    /// rebuilt on [`crate::WindowList::set_options`].
    pub(crate) fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Uniform(a), Self::Uniform(b)) => a == b,
            (Self::PerItem(a), Self::PerItem(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl core::fmt::Debug for HeightResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Uniform(h) => f.debug_tuple("Uniform").field(h).finish(),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
        }
    }
}

/// Configuration for [`crate::WindowList`].
///
/// Cheap to clone: the resolver and callback are `Arc`-backed, so hosts can
/// tweak a field and call `WindowList::set_options` without reallocating
/// closures.
pub struct WindowListOptions {
    /// Number of items in the caller-owned sequence.
    pub count: usize,
    /// Per-item height resolver.
    pub item_height: HeightResolver,
    /// Viewport height in pixels.
    pub container_height: f64,
    /// Extra items rendered on each side of the visible range. The device
    /// profile may raise the applied value, see
    /// [`DeviceProfile::effective_overscan`].
    pub overscan: usize,
    /// Space between items.
    pub gap: f64,
    /// Space before the first and after the last item.
    pub padding: f64,
    /// Fired (at most once per threshold crossing per loading cycle) when the
    /// viewport nears the end of loaded content.
    pub on_end_reached: Option<OnEndReached>,
    /// Fraction of the total height the viewport bottom must cover before
    /// `on_end_reached` fires, in `[0, 1]`.
    pub end_reached_threshold: f64,
    /// Quiet period after which the scroll session settles back to idle.
    pub settle_delay_ms: u64,
    /// Injected device capability summary.
    pub profile: DeviceProfile,
}

impl WindowListOptions {
    pub fn new(count: usize, item_height: HeightResolver) -> Self {
        Self {
            count,
            item_height,
            container_height: 400.0,
            overscan: 5,
            gap: 0.0,
            padding: 0.0,
            on_end_reached: None,
            end_reached_threshold: 0.8,
            settle_delay_ms: 150,
            profile: DeviceProfile::default(),
        }
    }

    /// Shorthand for a uniform-height list.
    pub fn uniform(count: usize, item_height: f64) -> Self {
        Self::new(count, HeightResolver::Uniform(item_height))
    }

    pub fn with_container_height(mut self, container_height: f64) -> Self {
        self.container_height = container_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_end_reached = Some(Arc::new(on_end_reached));
        self
    }

    pub fn with_end_reached_threshold(mut self, threshold: f64) -> Self {
        self.end_reached_threshold = threshold;
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn with_profile(mut self, profile: DeviceProfile) -> Self {
        self.profile = profile;
        self
    }
}

impl Clone for WindowListOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            item_height: self.item_height.clone(),
            container_height: self.container_height,
            overscan: self.overscan,
            gap: self.gap,
            padding: self.padding,
            on_end_reached: self.on_end_reached.clone(),
            end_reached_threshold: self.end_reached_threshold,
            settle_delay_ms: self.settle_delay_ms,
            profile: self.profile,
        }
    }
}

impl core::fmt::Debug for WindowListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowListOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("container_height", &self.container_height)
            .field("overscan", &self.overscan)
            .field("gap", &self.gap)
            .field("padding", &self.padding)
            .field("end_reached_threshold", &self.end_reached_threshold)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
