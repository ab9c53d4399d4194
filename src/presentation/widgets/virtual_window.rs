//! Materialization window for the product grid.
//!
//! Rows have a fixed approximate height (`item_height`), so the offset of
//! item `i` is `item_height * (i / 2)`. Cards taller or shorter than that
//! are clipped or padded; measuring real card heights would be needed for
//! variable-height content.

use std::ops::Range;

use crate::infrastructure::config::GridConfig;

/// Items per grid row.
pub const COLUMNS: usize = 2;

/// Scroll position and height of the visible area, in lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

/// Tracks which items are materialized.
///
/// The window covers `window_size` viewport heights centred on the
/// viewport. The first update after creation or [`reset`](Self::reset)
/// materializes at most `initial_num_to_render` items; every later update
/// grows the limit by at most `max_to_render_per_batch`.
#[derive(Debug, Clone)]
pub struct VirtualWindow {
    item_height: usize,
    initial: usize,
    batch: usize,
    window_size: usize,
    rendered_limit: usize,
    primed: bool,
}

impl VirtualWindow {
    #[must_use]
    pub fn new(config: &GridConfig) -> Self {
        let initial = config.initial_num_to_render.max(1);
        Self {
            item_height: usize::from(config.item_height.max(1)),
            initial,
            batch: config.max_to_render_per_batch.max(1),
            window_size: config.window_size.max(1),
            rendered_limit: initial,
            primed: false,
        }
    }

    /// Forgets batch progress, e.g. after the content was replaced.
    pub fn reset(&mut self) {
        self.rendered_limit = self.initial;
        self.primed = false;
    }

    #[must_use]
    pub const fn item_height(&self) -> usize {
        self.item_height
    }

    /// Top offset of item `index`, in lines.
    #[must_use]
    pub const fn item_offset(&self, index: usize) -> usize {
        self.item_height * (index / COLUMNS)
    }

    /// Total content height for `item_count` items, in lines.
    #[must_use]
    pub const fn content_height(&self, item_count: usize) -> usize {
        item_count.div_ceil(COLUMNS) * self.item_height
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub const fn max_offset(&self, item_count: usize, viewport_height: usize) -> usize {
        self.content_height(item_count).saturating_sub(viewport_height)
    }

    /// Advances batch progress and returns the items to keep mounted.
    #[must_use]
    pub fn update(&mut self, item_count: usize, viewport: Viewport) -> Range<usize> {
        if item_count == 0 {
            return 0..0;
        }

        let half_span = self.window_size * viewport.height.max(1) / 2;
        let center = viewport.offset + viewport.height / 2;
        let top = center.saturating_sub(half_span);
        let bottom = center + half_span;

        let first_row = top / self.item_height;
        let last_row = bottom / self.item_height;
        let start = (first_row * COLUMNS).min(item_count);
        let end = ((last_row + 1) * COLUMNS).min(item_count);

        if !self.primed {
            self.primed = true;
        } else if self.rendered_limit < end {
            self.rendered_limit = (self.rendered_limit + self.batch).min(end);
        }
        let limit = self.rendered_limit.min(item_count);

        start.min(limit)..end.min(limit)
    }
}
