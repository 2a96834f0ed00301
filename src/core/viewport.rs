//! Cursor navigation over a map image larger than the display
//!
//! Only one screen-sized tile of the map image is shown at a time. The
//! navigator moves a small cursor across the display and decides when the
//! visible tile has to shift. Each axis is resolved independently by running
//! [`BOUNDARY_RULES`] in order after the movement is applied:
//!
//! 1. [`BoundaryRule::ImageEdgeClamp`] keeps the cursor inside the image.
//! 2. [`BoundaryRule::TileShift`] snaps the tile flush with the image edge
//!    when the cursor reaches the last (or first) tile threshold.
//! 3. [`BoundaryRule::ScreenWrap`] moves the tile one screen over when the
//!    cursor leaves the display.
//!
//! Every rule sees the state left by the rules before it, so one large
//! movement can trigger several of them in the same tick.

use crate::core::bounds::PixelRect;
use crate::core::config::BrowserConfig;
use crate::core::constants::{START_CURSOR, START_TILE_ORIGIN};
use crate::core::geo::{GeoCalibration, GeoPoint, PixelPoint};
use crate::rendering::surface::{DisplaySurface, TileBlit};
use serde::{Deserialize, Serialize};

/// Fixed extents along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub image_extent: i32,
    pub screen_extent: i32,
    pub edge_margin: i32,
}

impl AxisGeometry {
    pub fn new(image_extent: i32, screen_extent: i32, edge_margin: i32) -> Self {
        Self {
            image_extent,
            screen_extent,
            edge_margin,
        }
    }

    /// Smallest global position the cursor may take
    pub fn min_global(&self) -> i32 {
        self.edge_margin
    }

    /// Largest global position the cursor may take
    pub fn max_global(&self) -> i32 {
        self.image_extent - self.edge_margin
    }

    /// Origin of the tile flush with the far image edge
    pub fn far_tile_origin(&self) -> i32 {
        self.image_extent - self.screen_extent
    }

    /// Global position at which moving backward snaps to the first tile
    pub fn near_tile_threshold(&self) -> i32 {
        self.screen_extent
    }
}

/// Cursor state along one axis.
///
/// After every step `global == tile_origin + local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisState {
    /// On-screen position this frame
    pub local: i32,
    /// On-screen position last frame
    pub previous: i32,
    /// Position within the full map image
    pub global: i32,
    /// Image position of the visible tile's near edge
    pub tile_origin: i32,
}

impl AxisState {
    pub fn new(tile_origin: i32, local: i32) -> Self {
        Self {
            local,
            previous: local,
            global: tile_origin + local,
            tile_origin,
        }
    }
}

/// Boundary checks run after each movement, in [`BOUNDARY_RULES`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryRule {
    ImageEdgeClamp,
    TileShift,
    ScreenWrap,
}

pub const BOUNDARY_RULES: [BoundaryRule; 3] = [
    BoundaryRule::ImageEdgeClamp,
    BoundaryRule::TileShift,
    BoundaryRule::ScreenWrap,
];

/// What a rule did to an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Idle,
    /// The rule moved the cursor but kept the tile
    Adjusted,
    /// The rule moved the tile; the display needs a full tile redraw
    TileChanged,
}

impl BoundaryRule {
    /// Applies the rule to `state` after a movement of sign `direction`
    pub fn apply(&self, geometry: &AxisGeometry, state: &mut AxisState, direction: i32) -> RuleOutcome {
        match self {
            Self::ImageEdgeClamp => {
                let (global, local, origin) = if state.global >= geometry.max_global() {
                    (
                        geometry.max_global(),
                        geometry.screen_extent - geometry.edge_margin,
                        geometry.far_tile_origin(),
                    )
                } else if state.global <= geometry.min_global() {
                    (geometry.min_global(), geometry.edge_margin, 0)
                } else {
                    return RuleOutcome::Idle;
                };
                state.global = global;
                state.local = local;
                state.previous = local;
                if state.tile_origin != origin {
                    state.tile_origin = origin;
                    RuleOutcome::TileChanged
                } else {
                    RuleOutcome::Adjusted
                }
            }
            Self::TileShift => {
                if direction > 0 && state.global == geometry.far_tile_origin() {
                    state.tile_origin = geometry.far_tile_origin();
                    state.local = geometry.edge_margin;
                } else if direction < 0 && state.global == geometry.near_tile_threshold() {
                    state.tile_origin = 0;
                    state.local = geometry.screen_extent - geometry.edge_margin;
                } else {
                    return RuleOutcome::Idle;
                }
                state.previous = state.local;
                state.global = state.tile_origin + state.local;
                RuleOutcome::TileChanged
            }
            Self::ScreenWrap => {
                let edge = if state.local > geometry.screen_extent {
                    state.tile_origin + geometry.screen_extent
                } else if state.local < 0 {
                    state.tile_origin
                } else {
                    return RuleOutcome::Idle;
                };
                let shifted = if state.local > 0 {
                    state.tile_origin + geometry.screen_extent
                } else {
                    state.tile_origin - geometry.screen_extent
                };
                state.tile_origin = shifted.clamp(0, geometry.far_tile_origin());
                // The cursor stays on the edge it crossed; overshoot is dropped.
                state.local = edge - state.tile_origin;
                state.previous = state.local;
                state.global = edge;
                RuleOutcome::TileChanged
            }
        }
    }
}

/// Moves one axis by `delta` and resolves its boundaries.
///
/// Returns the rules that fired and whether the tile origin moved.
pub fn step_axis(
    geometry: &AxisGeometry,
    state: &mut AxisState,
    delta: i32,
) -> (Vec<BoundaryRule>, bool) {
    state.previous = state.local;
    if delta == 0 {
        return (Vec::new(), false);
    }

    state.local += delta;
    state.global += delta;

    let mut fired = Vec::new();
    let mut tile_changed = false;
    for rule in BOUNDARY_RULES {
        match rule.apply(geometry, state, delta.signum()) {
            RuleOutcome::Idle => {}
            RuleOutcome::Adjusted => fired.push(rule),
            RuleOutcome::TileChanged => {
                fired.push(rule);
                tile_changed = true;
            }
        }
    }
    (fired, tile_changed)
}

/// Cursor position on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    pub x: AxisState,
    pub y: AxisState,
}

impl CursorState {
    pub fn local(&self) -> PixelPoint {
        PixelPoint::new(self.x.local, self.y.local)
    }

    pub fn global(&self) -> PixelPoint {
        PixelPoint::new(self.x.global, self.y.global)
    }

    pub fn tile_origin(&self) -> PixelPoint {
        PixelPoint::new(self.x.tile_origin, self.y.tile_origin)
    }
}

/// Draw requests produced by one navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationFrame {
    /// Full-screen tile redraw once both axes have settled
    pub tile: Option<TileBlit>,
    /// Map patch that erases the cursor at its old position
    pub restore: Option<TileBlit>,
    /// Where the cursor is drawn now
    pub cursor: PixelRect,
    pub horizontal_rules: Vec<BoundaryRule>,
    pub vertical_rules: Vec<BoundaryRule>,
}

impl NavigationFrame {
    /// Sends the frame's draw requests to `surface`
    pub fn draw(&self, surface: &mut dyn DisplaySurface) {
        if let Some(tile) = &self.tile {
            surface.draw_tile(tile);
        }
        if let Some(restore) = &self.restore {
            surface.draw_tile(restore);
        }
        surface.fill_cursor(&self.cursor);
    }
}

/// Tile-based cursor navigator over the map image
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    horizontal: AxisGeometry,
    vertical: AxisGeometry,
    calibration: GeoCalibration,
    cursor_size: i32,
    cursor: CursorState,
}

impl Navigator {
    /// Navigator at the power-up position: the centre tile with the cursor
    /// near the top-left of the display
    pub fn new(config: &BrowserConfig) -> Self {
        let horizontal = AxisGeometry::new(
            config.map.width,
            config.display.width,
            config.display.edge_margin,
        );
        let vertical = AxisGeometry::new(
            config.map.height,
            config.display.height,
            config.display.edge_margin,
        );
        let origin = PixelPoint::new(
            START_TILE_ORIGIN.clamp(0, horizontal.far_tile_origin()),
            START_TILE_ORIGIN.clamp(0, vertical.far_tile_origin()),
        );
        let local = PixelPoint::new(
            START_CURSOR.min(horizontal.screen_extent - 1),
            START_CURSOR.min(vertical.screen_extent - 1),
        );
        Self {
            horizontal,
            vertical,
            calibration: config.map,
            cursor_size: config.display.cursor_size,
            cursor: CursorState {
                x: AxisState::new(origin.x, local.x),
                y: AxisState::new(origin.y, local.y),
            },
        }
    }

    /// Replaces the cursor position, e.g. to restore a known state
    pub fn with_cursor(mut self, cursor: CursorState) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn geometry(&self) -> (AxisGeometry, AxisGeometry) {
        (self.horizontal, self.vertical)
    }

    /// Geographic position under the cursor; the query point for ranking
    pub fn geo_position(&self) -> GeoPoint {
        self.calibration.cursor_to_geo(self.cursor.global())
    }

    /// The whole visible tile, used when the map is shown again
    pub fn full_tile(&self) -> TileBlit {
        TileBlit {
            source: PixelRect::at(
                self.cursor.tile_origin(),
                self.horizontal.screen_extent,
                self.vertical.screen_extent,
            ),
            dest: PixelRect::new(
                0,
                0,
                self.horizontal.screen_extent,
                self.vertical.screen_extent,
            ),
        }
    }

    /// The whole map image in global pixels
    pub fn image_rect(&self) -> PixelRect {
        PixelRect::new(
            0,
            0,
            self.horizontal.image_extent,
            self.vertical.image_extent,
        )
    }

    pub fn cursor_rect(&self) -> PixelRect {
        PixelRect::at(self.cursor.local(), self.cursor_size, self.cursor_size)
    }

    /// Moves the cursor by `delta` pixels and works out what to redraw
    pub fn step(&mut self, delta: PixelPoint) -> NavigationFrame {
        let before = self.cursor;
        let (horizontal_rules, x_tile) = step_axis(&self.horizontal, &mut self.cursor.x, delta.x);
        let (vertical_rules, y_tile) = step_axis(&self.vertical, &mut self.cursor.y, delta.y);

        let tile = (x_tile || y_tile).then(|| self.full_tile());
        if let Some(tile) = &tile {
            debug_assert!(self.image_rect().contains_rect(&tile.source));
            log::debug!(
                "tile shifted to ({}, {}) with cursor at ({}, {})",
                self.cursor.x.tile_origin,
                self.cursor.y.tile_origin,
                self.cursor.x.global,
                self.cursor.y.global
            );
        }

        // A tile redraw already erased the old cursor.
        let restore = (tile.is_none() && before.local() != self.cursor.local()).then(|| {
            TileBlit {
                source: PixelRect::at(
                    before.tile_origin().add(&before.local()),
                    self.cursor_size,
                    self.cursor_size,
                ),
                dest: PixelRect::at(before.local(), self.cursor_size, self.cursor_size),
            }
        });

        NavigationFrame {
            tile,
            restore,
            cursor: self.cursor_rect(),
            horizontal_rules,
            vertical_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::surface::RecordingSurface;

    fn horizontal() -> AxisGeometry {
        AxisGeometry::new(2048, 128, 2)
    }

    fn vertical() -> AxisGeometry {
        AxisGeometry::new(2048, 160, 2)
    }

    fn assert_invariant(state: &AxisState) {
        assert_eq!(state.global, state.tile_origin + state.local, "{state:?}");
    }

    #[test]
    fn test_derived_thresholds() {
        assert_eq!(horizontal().far_tile_origin(), 1920);
        assert_eq!(vertical().far_tile_origin(), 1888);
        assert_eq!(horizontal().max_global(), 2046);
        assert_eq!(vertical().near_tile_threshold(), 160);
    }

    #[test]
    fn test_plain_move_keeps_tile() {
        let mut state = AxisState::new(1024, 64);
        let (fired, tile) = step_axis(&horizontal(), &mut state, 2);
        assert!(fired.is_empty());
        assert!(!tile);
        assert_eq!(state.local, 66);
        assert_eq!(state.previous, 64);
        assert_eq!(state.global, 1090);
    }

    #[test]
    fn test_clamp_at_far_image_edge() {
        let mut state = AxisState::new(1920, 126);
        assert_eq!(state.global, 2046);
        let (fired, tile) = step_axis(&horizontal(), &mut state, 2);

        assert_eq!(fired, vec![BoundaryRule::ImageEdgeClamp]);
        assert!(!tile);
        assert_eq!(state.global, 2046);
        assert_eq!(state.local, 126);
        assert_eq!(state.previous, 126);
    }

    #[test]
    fn test_clamp_at_near_image_edge() {
        let mut state = AxisState::new(0, 2);
        step_axis(&vertical(), &mut state, -2);
        assert_eq!(state.global, 2);
        assert_eq!(state.local, 2);
        assert_eq!(state.tile_origin, 0);
    }

    #[test]
    fn test_tile_shift_at_far_threshold() {
        let mut state = AxisState::new(1792, 126);
        let (fired, tile) = step_axis(&horizontal(), &mut state, 2);

        assert_eq!(fired, vec![BoundaryRule::TileShift]);
        assert!(tile);
        assert_eq!(state.tile_origin, 1920);
        assert_eq!(state.local, 2);
        assert_eq!(state.global, 1922);
    }

    #[test]
    fn test_tile_shift_from_origin_zero() {
        let mut state = AxisState::new(0, 1918);
        step_axis(&horizontal(), &mut state, 2);
        assert_eq!(state.tile_origin, 1920);
        assert_eq!(state.local, 2);
        assert_invariant(&state);
    }

    #[test]
    fn test_tile_shift_only_when_moving_forward() {
        let mut state = AxisState::new(1920, 2);
        step_axis(&horizontal(), &mut state, -2);
        assert_eq!(state.global, 1920);
        assert_eq!(state.tile_origin, 1920);
        assert_eq!(state.local, 0);
    }

    #[test]
    fn test_vertical_tile_snaps_flush_with_bottom() {
        let mut state = AxisState::new(1824, 62);
        let (_, tile) = step_axis(&vertical(), &mut state, 2);
        assert!(tile);
        assert_eq!(state.tile_origin, 1888);
        assert_eq!(state.local, 2);
        assert_eq!(state.global, 1890);
    }

    #[test]
    fn test_tile_shift_back_to_first_tile() {
        let mut state = AxisState::new(128, 2);
        step_axis(&horizontal(), &mut state, -2);
        assert_eq!(state.tile_origin, 0);
        assert_eq!(state.local, 126);
        assert_eq!(state.global, 126);
    }

    #[test]
    fn test_screen_wrap_forward() {
        let mut state = AxisState::new(1024, 128);
        let (fired, tile) = step_axis(&horizontal(), &mut state, 2);

        assert_eq!(fired, vec![BoundaryRule::ScreenWrap]);
        assert!(tile);
        assert_eq!(state.tile_origin, 1152);
        assert_eq!(state.local, 0);
        assert_eq!(state.previous, 0);
        assert_eq!(state.global, 1152);
    }

    #[test]
    fn test_screen_wrap_backward() {
        let mut state = AxisState::new(1024, 0);
        step_axis(&horizontal(), &mut state, -2);
        assert_eq!(state.tile_origin, 896);
        assert_eq!(state.local, 128);
        assert_eq!(state.global, 1024);
    }

    #[test]
    fn test_large_delta_runs_rules_in_sequence() {
        let mut state = AxisState::new(1792, 100);
        let (fired, tile) = step_axis(&horizontal(), &mut state, 300);

        assert_eq!(fired, vec![BoundaryRule::ImageEdgeClamp]);
        assert!(tile);
        assert_eq!(state.tile_origin, 1920);
        assert_eq!(state.global, 2046);
        assert_invariant(&state);
    }

    #[test]
    fn test_wrap_clamps_tile_to_image() {
        // An odd step size skips the exact snap threshold.
        let mut state = AxisState::new(1824, 159);
        step_axis(&vertical(), &mut state, 3);
        assert_eq!(state.tile_origin, 1888);
        assert_eq!(state.global, 1984);
        assert_invariant(&state);
    }

    #[test]
    fn test_invariant_holds_across_a_sweep() {
        let mut state = AxisState::new(1024, 64);
        for delta in std::iter::repeat(2).take(600).chain(std::iter::repeat(-2).take(1200)) {
            step_axis(&horizontal(), &mut state, delta);
            assert_invariant(&state);
            assert!(state.global >= 2 && state.global <= 2046);
            assert!(state.tile_origin >= 0 && state.tile_origin <= 1920);
            assert!(state.local >= 0 && state.local <= 128);
        }
        assert_eq!(state.global, 2);
    }

    #[test]
    fn test_navigator_restores_old_cursor_patch() {
        let mut nav = Navigator::new(&BrowserConfig::default());
        assert_eq!(nav.cursor().global(), PixelPoint::new(1088, 1088));

        let frame = nav.step(PixelPoint::new(2, 0));
        assert!(frame.tile.is_none());
        assert_eq!(
            frame.restore,
            Some(TileBlit {
                source: PixelRect::new(1088, 1088, 3, 3),
                dest: PixelRect::new(64, 64, 3, 3),
            })
        );
        assert_eq!(frame.cursor, PixelRect::new(66, 64, 3, 3));
    }

    #[test]
    fn test_navigator_idle_step_has_no_restore() {
        let mut nav = Navigator::new(&BrowserConfig::default());
        let frame = nav.step(PixelPoint::default());
        assert!(frame.tile.is_none());
        assert!(frame.restore.is_none());
    }

    #[test]
    fn test_navigator_tile_redraw_replaces_restore() {
        let cursor = CursorState {
            x: AxisState::new(1024, 128),
            y: AxisState::new(1024, 64),
        };
        let mut nav = Navigator::new(&BrowserConfig::default()).with_cursor(cursor);
        let frame = nav.step(PixelPoint::new(2, 2));

        assert_eq!(
            frame.tile,
            Some(TileBlit {
                source: PixelRect::new(1152, 1024, 128, 160),
                dest: PixelRect::new(0, 0, 128, 160),
            })
        );
        assert!(frame.restore.is_none());
        assert_eq!(frame.cursor, PixelRect::new(0, 66, 3, 3));
    }

    #[test]
    fn test_diagonal_wrap_redraws_tile_once() {
        let cursor = CursorState {
            x: AxisState::new(1024, 128),
            y: AxisState::new(1024, 160),
        };
        let mut nav = Navigator::new(&BrowserConfig::default()).with_cursor(cursor);
        let frame = nav.step(PixelPoint::new(2, 2));

        assert_eq!(frame.horizontal_rules, vec![BoundaryRule::ScreenWrap]);
        assert_eq!(frame.vertical_rules, vec![BoundaryRule::ScreenWrap]);
        assert_eq!(
            frame.tile,
            Some(TileBlit {
                source: PixelRect::new(1152, 1184, 128, 160),
                dest: PixelRect::new(0, 0, 128, 160),
            })
        );

        let mut surface = RecordingSurface::new();
        frame.draw(&mut surface);
        assert_eq!(surface.blits().len(), 1);
    }

    #[test]
    fn test_tile_sources_stay_inside_image() {
        let mut nav = Navigator::new(&BrowserConfig::default());
        let image = nav.image_rect();
        let moves = std::iter::repeat(PixelPoint::new(2, 2))
            .take(600)
            .chain(std::iter::repeat(PixelPoint::new(-2, -2)).take(1200));

        let mut redraws = 0;
        for delta in moves {
            if let Some(tile) = nav.step(delta).tile {
                assert!(image.contains_rect(&tile.source), "{tile:?}");
                redraws += 1;
            }
        }
        assert!(redraws > 0);
        assert_eq!(nav.cursor().global(), PixelPoint::new(2, 2));
    }

    #[test]
    fn test_geo_position_follows_global_cursor() {
        let config = BrowserConfig::default();
        let nav = Navigator::new(&config);
        assert_eq!(
            nav.geo_position(),
            config.map.cursor_to_geo(PixelPoint::new(1088, 1088))
        );
    }
}
