//! Application state.
//!
//! `AppState` is mutated only by the reducer. The renderer reads it and
//! writes the measured [`PageLayout`] back through a `Cell`, which the
//! reducer uses for hit testing and section anchors on the next event.

use std::cell::Cell;
use std::time::Duration;

use folio_core::presentation::{PresentationController, Section};
use folio_core::profile::Profile;
use ratatui::layout::{Position, Rect};

use crate::page::PageScroll;
use crate::statusline::StatusLineAccumulator;

/// Geometry measured by the last render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// First page row of each section, indexed by [`Section::index`].
    pub anchors: [usize; 4],
    /// Total page rows.
    pub content_height: usize,
    /// Rows available for the page below the header.
    pub viewport_height: usize,
    /// Header nav labels, indexed by [`Section::index`]. Empty when compact.
    pub nav: [Rect; 4],
    pub theme_toggle: Rect,
    /// Menu glyph. Empty on wide terminals.
    pub menu_toggle: Rect,
    /// Menu overlay rows. Empty while the menu is closed.
    pub menu_items: [Rect; 4],
}

impl PageLayout {
    pub fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn anchor(&self, section: Section) -> usize {
        self.anchors[section.index()].min(self.max_scroll())
    }

    /// Section the viewport is currently in.
    pub fn section_at(&self, offset: usize) -> Section {
        Section::ALL
            .iter()
            .rev()
            .copied()
            .find(|section| self.anchors[section.index()] <= offset)
            .unwrap_or(Section::Home)
    }

    pub fn nav_hit(&self, position: Position) -> Option<Section> {
        hit(&self.nav, position)
    }

    pub fn menu_hit(&self, position: Position) -> Option<Section> {
        hit(&self.menu_items, position)
    }
}

fn hit(targets: &[Rect; 4], position: Position) -> Option<Section> {
    targets
        .iter()
        .position(|rect| rect.contains(position))
        .and_then(|index| Section::ALL.get(index).copied())
}

/// Full application state.
#[derive(Debug)]
pub struct AppState {
    pub controller: PresentationController,
    pub profile: Profile,
    pub page: PageScroll,
    /// Time since mount, as of the last tick.
    pub now: Duration,
    /// False until the first tick after the initial frame; the hero is hidden
    /// until then.
    pub loaded: bool,
    pub should_quit: bool,
    /// Something visible changed since the last render.
    pub dirty: bool,
    /// Highlighted menu entry.
    pub menu_selection: usize,
    pub show_status_line: bool,
    pub status_line: StatusLineAccumulator,
    pub layout: Cell<PageLayout>,
}

impl AppState {
    pub fn new(
        controller: PresentationController,
        profile: Profile,
        show_status_line: bool,
    ) -> Self {
        Self {
            controller,
            profile,
            page: PageScroll::default(),
            now: Duration::ZERO,
            loaded: false,
            should_quit: false,
            dirty: true,
            menu_selection: 0,
            show_status_line,
            status_line: StatusLineAccumulator::new(),
            layout: Cell::new(PageLayout::default()),
        }
    }
}
