//! A headless list windowing engine.
//!
//! Renders only the visible slice of a potentially large, variably-sized list:
//! a prefix-sum offset table maps item indices to pixel offsets, the visible
//! index range is found by binary search and widened by overscan, a debounced
//! scroll session tracks whether the user is actively scrolling, and a guarded
//! end-reached signal requests more data as the viewport nears the end of
//! loaded content.
//!
//! It is UI-agnostic. A host adapter is expected to provide:
//! - the scroll container's offset and height (via [`WindowList::on_scroll`]
//!   and [`WindowList::on_resize`])
//! - a periodic tick for settle debouncing ([`WindowList::update_scrolling`])
//! - the item data and a `render_item` mapping when building a
//!   [`RenderPlan`](crate::RenderPlan)
//! - `loading`/`has_next_page` flags each render pass
//!   ([`WindowList::set_page_state`])
//!
//! Device/network heuristics are injected as a [`DeviceProfile`]; the engine
//! never probes capabilities itself.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod detector;
mod options;
mod position;
mod profile;
mod range;
mod render;
mod viewport;
mod window;


pub use detector::{EndReachedGuard, PageState, end_reached};
pub use options::{HeightResolver, OnEndReached, WindowListOptions};
pub use position::PositionIndex;
pub use profile::{DeviceMetrics, DeviceProfile};
pub use range::{VisibleRange, visible_range};
pub use render::{Content, LOADING_INDICATOR_HEIGHT, LoadingIndicator, RenderEntry, RenderPlan};
pub use viewport::{ScrollSession, ViewportState};
pub use window::WindowList;
