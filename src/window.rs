use alloc::sync::Arc;

use crate::detector::{EndReachedGuard, PageState};
use crate::options::{HeightResolver, WindowListOptions};
use crate::position::PositionIndex;
use crate::profile::DeviceProfile;
use crate::range::{VisibleRange, visible_range};
use crate::render::{
    Content, LOADING_INDICATOR_HEIGHT, LoadingIndicator, RenderEntry, RenderPlan,
};
use crate::viewport::{ScrollSession, ViewportState};

/// A headless list windowing engine.
///
/// This type is intentionally UI-agnostic:
/// - It never touches the item data; the caller owns the sequence and passes
///   a slice to [`WindowList::render_plan`] when it wants output.
/// - The host drives it with plain calls ([`WindowList::on_scroll`],
///   [`WindowList::on_resize`], [`WindowList::update_scrolling`]) carrying
///   caller-supplied `now_ms` timestamps; the engine holds no timers and
///   reads no clock.
/// - Every query is re-derived from the current state, so the computed range
///   is always consistent with the most recent viewport.
///
/// All computation is synchronous; the only asynchronous boundary is the
/// caller's data fetch triggered through `on_end_reached`, observed back via
/// [`WindowList::set_page_state`].
#[derive(Clone, Debug)]
pub struct WindowList {
    options: WindowListOptions,
    index: PositionIndex,
    viewport: ViewportState,
    session: ScrollSession,
    guard: EndReachedGuard,
    page: PageState,
}

impl WindowList {
    pub fn new(options: WindowListOptions) -> Self {
        wdebug!(
            count = options.count,
            overscan = options.overscan,
            virtualize = options.profile.virtualize,
            "WindowList::new"
        );
        let index = PositionIndex::build(
            options.count,
            &options.item_height,
            options.gap,
            options.padding,
        );
        let viewport = ViewportState::new(0.0, options.container_height);
        Self {
            options,
            index,
            viewport,
            session: ScrollSession::new(),
            guard: EndReachedGuard::new(),
            page: PageState::default(),
        }
    }

    pub fn options(&self) -> &WindowListOptions {
        &self.options
    }

    /// Replaces the options, rebuilding the offset table only when a
    /// structural field (count, resolver, gap, padding) actually changed.
    pub fn set_options(&mut self, options: WindowListOptions) {
        let structural = self.options.count != options.count
            || !self.options.item_height.same_as(&options.item_height)
            || self.options.gap != options.gap
            || self.options.padding != options.padding;
        let container_changed = self.options.container_height != options.container_height;
        self.options = options;
        wtrace!(
            count = self.options.count,
            structural,
            "WindowList::set_options"
        );
        if structural {
            self.rebuild_index();
        }
        if container_changed {
            self.viewport =
                ViewportState::new(self.viewport.scroll_offset, self.options.container_height);
        }
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`WindowList::set_options`] so only what changed gets rebuilt.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.rebuild_index();
    }

    pub fn set_item_height(&mut self, item_height: HeightResolver) {
        self.options.item_height = item_height;
        self.rebuild_index();
    }

    pub fn set_gap(&mut self, gap: f64) {
        if self.options.gap == gap {
            return;
        }
        self.options.gap = gap;
        self.rebuild_index();
    }

    pub fn set_padding(&mut self, padding: f64) {
        if self.options.padding == padding {
            return;
        }
        self.options.padding = padding;
        self.rebuild_index();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    pub fn set_profile(&mut self, profile: DeviceProfile) {
        self.options.profile = profile;
    }

    pub fn set_end_reached_threshold(&mut self, threshold: f64) {
        self.options.end_reached_threshold = threshold;
    }

    pub fn set_on_end_reached(&mut self, f: Option<impl Fn() + Send + Sync + 'static>) {
        self.options.on_end_reached = f.map(|f| Arc::new(f) as _);
    }

    pub fn set_settle_delay_ms(&mut self, settle_delay_ms: u64) {
        self.options.settle_delay_ms = settle_delay_ms;
    }

    /// Forces an offset-table rebuild.
    ///
    /// Call after item heights changed behind an unchanged resolver; the
    /// engine treats resolver output as stable between invalidations, and a
    /// resolver mutated mid-computation is undefined behavior at the contract
    /// level.
    pub fn invalidate(&mut self) {
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.index = PositionIndex::build(
            self.options.count,
            &self.options.item_height,
            self.options.gap,
            self.options.padding,
        );
    }

    pub fn position_index(&self) -> &PositionIndex {
        &self.index
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset
    }

    pub fn session(&self) -> ScrollSession {
        self.session
    }

    pub fn is_scrolling(&self) -> bool {
        self.session.is_scrolling()
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn total_height(&self) -> f64 {
        self.index.total_height()
    }

    pub fn item_offset(&self, index: usize) -> Option<f64> {
        self.index.offset_of(index)
    }

    pub fn item_height(&self, index: usize) -> Option<f64> {
        self.index.height_of(index)
    }

    /// The item covering `offset`, via binary search over the offset table.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        self.index.index_at(offset)
    }

    /// Largest useful scroll offset: content height minus one viewport.
    pub fn max_scroll_offset(&self) -> f64 {
        (self.index.total_height() - self.viewport.container_height.max(0.0)).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        crate::position::sanitize(offset).min(self.max_scroll_offset())
    }

    /// The overscan actually applied, after the device profile's floor.
    pub fn effective_overscan(&self) -> usize {
        self.options.profile.effective_overscan(self.options.overscan)
    }

    /// Handles a raw scroll event from the host at `now_ms`.
    ///
    /// Sanitizes and clamps the offset to content (an elastic overscroll past
    /// the end must not blank the list), marks the session as scrolling
    /// (resetting the settle deadline), and evaluates the end-reached
    /// detector immediately so pagination stays responsive during continuous
    /// scrolling.
    pub fn on_scroll(&mut self, scroll_offset: f64, now_ms: u64) {
        wtrace!(scroll_offset, now_ms, "WindowList::on_scroll");
        let clamped = self.clamp_scroll_offset(scroll_offset);
        self.viewport = ViewportState::new(clamped, self.viewport.container_height);
        self.session.on_event(now_ms);
        self.check_end_reached();
    }

    /// Handles a container resize from the host.
    ///
    /// Re-evaluates the end-reached detector: a taller viewport can cross the
    /// threshold without any scrolling.
    pub fn on_resize(&mut self, container_height: f64) {
        self.viewport = ViewportState::new(self.viewport.scroll_offset, container_height);
        self.options.container_height = self.viewport.container_height;
        self.check_end_reached();
    }

    /// Settle tick. Returns `true` when the scroll session settled back to
    /// idle on this call.
    pub fn update_scrolling(&mut self, now_ms: u64) -> bool {
        let settled = self.session.update(now_ms, self.options.settle_delay_ms);
        if settled {
            wtrace!(now_ms, "scroll session settled");
        }
        settled
    }

    /// Updates the caller-supplied pagination flags for this pass.
    ///
    /// A `loading` transition from `true` to `false` re-arms the end-reached
    /// guard for the next crossing.
    pub fn set_page_state(&mut self, loading: bool, has_next_page: bool) {
        let next = PageState {
            loading,
            has_next_page,
        };
        self.guard.on_page_state(self.page, next);
        self.page = next;
    }

    fn check_end_reached(&mut self) {
        let fire = self.guard.check(
            self.viewport,
            self.index.total_height(),
            self.options.end_reached_threshold,
            self.page,
        );
        if fire {
            wdebug!(
                scroll_offset = self.viewport.scroll_offset,
                total = self.index.total_height(),
                "end reached"
            );
            if let Some(cb) = &self.options.on_end_reached {
                cb();
            }
        }
    }

    /// The inclusive, overscanned index range to render for the current
    /// viewport, or `None` when nothing is visible.
    ///
    /// With a non-windowing profile this is the full range.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible_range_for(self.viewport)
    }

    /// Same as [`WindowList::visible_range`] for an explicit viewport.
    pub fn visible_range_for(&self, viewport: ViewportState) -> Option<VisibleRange> {
        visible_range(
            viewport,
            &self.index,
            self.effective_overscan(),
            self.options.profile.virtualize,
        )
    }

    /// Calls `f(index, offset, height)` for each slot in the visible range
    /// without allocating.
    pub fn for_each_visible(&self, mut f: impl FnMut(usize, f64, f64)) {
        let Some(range) = self.visible_range() else {
            return;
        };
        for i in range.indices() {
            // Offsets exist for every index the range can produce.
            let (Some(offset), Some(height)) = (self.index.offset_of(i), self.index.height_of(i))
            else {
                return;
            };
            f(i, offset, height);
        }
    }

    /// Maps the visible range over `items`, producing absolutely-positioned
    /// render entries.
    ///
    /// `render_item` runs only for indices in the range; while the scroll
    /// session is active under a degraded-fidelity profile, a same-height
    /// [`Content::Placeholder`] is substituted instead. When the page state
    /// reports a load in flight, a trailing [`LoadingIndicator`] is appended
    /// immediately after the last item.
    pub fn render_plan<T, R>(
        &self,
        items: &[T],
        mut render_item: impl FnMut(&T, usize) -> R,
    ) -> RenderPlan<R> {
        let total_height = self.index.total_height();
        let mut plan = RenderPlan::empty(total_height);

        let skeleton = self.session.is_scrolling() && self.options.profile.degrade_fidelity;
        if let Some(range) = self.visible_range() {
            plan.entries.reserve(range.len());
            for i in range.indices() {
                let Some(item) = items.get(i) else {
                    // The caller's slice may lag behind `count` while a page
                    // is still arriving.
                    break;
                };
                let (Some(offset), Some(height)) =
                    (self.index.offset_of(i), self.index.height_of(i))
                else {
                    break;
                };
                let content = if skeleton {
                    Content::Placeholder
                } else {
                    Content::Item(render_item(item, i))
                };
                plan.entries.push(RenderEntry {
                    index: i,
                    offset,
                    height,
                    content,
                });
            }
        }

        if self.page.loading {
            plan.loading_indicator = Some(LoadingIndicator {
                offset: self.index.content_end(),
                height: LOADING_INDICATOR_HEIGHT,
            });
        }

        plan
    }

    /// Clears transient state: the scroll session (the settle deadline with
    /// it) and the end-reached guard. Teardown must end up here so no
    /// debounce deadline outlives the host view.
    pub fn reset(&mut self) {
        self.session.clear();
        self.guard.reset();
        self.page = PageState::default();
    }
}
