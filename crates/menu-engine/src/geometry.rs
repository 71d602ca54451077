//! Items-per-page from the kiosk viewport.
//!
//! The right-hand menu panel takes 65% of the screen width; the left panel
//! shows the serving token. Heights are in CSS pixels.

use serde::{Deserialize, Serialize};

const HEADER_HEIGHT: u32 = 100;
const INDICATOR_HEIGHT: u32 = 40;
const VERTICAL_PADDING: u32 = 48;

const LIST_ITEM_HEIGHT: u32 = 165;
const LIST_GAP: u32 = 16;

const GRID_CARD_HEIGHT: u32 = 260;
const GRID_GAP: u32 = 24;
const RIGHT_PANEL_SHARE: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn available_height(&self) -> u32 {
        self.height
            .saturating_sub(HEADER_HEIGHT + INDICATOR_HEIGHT + VERTICAL_PADDING)
    }
}

/// Grid columns for the menu panel width.
pub fn grid_columns(viewport: Viewport) -> u32 {
    let panel = f64::from(viewport.width) * RIGHT_PANEL_SHARE;
    match panel {
        p if p >= 2000.0 => 5,
        p if p >= 1536.0 => 4,
        p if p >= 1280.0 => 3,
        p if p >= 768.0 => 2,
        _ => 1,
    }
}

/// How many items fit on one page. Never less than one.
pub fn items_per_page(viewport: Viewport, style: LayoutStyle) -> usize {
    let available = viewport.available_height();
    let count = match style {
        LayoutStyle::List => (available + LIST_GAP) / (LIST_ITEM_HEIGHT + LIST_GAP),
        LayoutStyle::Grid => {
            let rows = (available + GRID_GAP) / (GRID_CARD_HEIGHT + GRID_GAP);
            rows * grid_columns(viewport)
        }
    };
    count.max(1) as usize
}
