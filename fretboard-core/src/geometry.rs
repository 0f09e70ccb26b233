//! # Geometry Engine Module
//!
//! Converts fret and string indices into pixel offsets on the board.
//!
//! Fret lines follow a blend of equal-temperament spacing (frets get closer
//! together up the neck, like a real instrument) and linear spacing (so the
//! high frets stay readable on a wide canvas). Strings are evenly spaced.
//!
//! `BoardGeometry` is the single value both the renderer and the hit-tester
//! read, so a marker is always drawn inside the band that resolves back to it.

use crate::fretboard::{Cell, FretRange, STRING_COUNT};

/// Fixed canvas height in logical pixels.
pub const CANVAS_HEIGHT: f32 = 260.0;
/// The canvas never gets narrower than this.
pub const CANVAS_MIN_WIDTH: f32 = 720.0;

pub const MARGIN_LEFT: f32 = 48.0;
pub const MARGIN_RIGHT: f32 = 16.0;
pub const MARGIN_TOP: f32 = 28.0;
pub const MARGIN_BOTTOM: f32 = 32.0;

/// Width reserved at the left edge for fret 0 when it is visible.
pub const NUT_WIDTH: f32 = 32.0;

pub const STRING_PADDING_TOP: f32 = 12.0;
pub const STRING_PADDING_BOTTOM: f32 = 12.0;

pub const NOTE_RADIUS: f32 = 14.0;

pub const STRING_THICKNESS_MIN: f32 = 0.8;
pub const STRING_THICKNESS_MAX: f32 = 2.2;

/// Share of linear spacing mixed into the equal-temperament positions.
const FLATTEN: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Canvas size and where the board sits inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub width: f32,
    pub height: f32,
    pub origin: Point,
    pub board_width: f32,
    pub board_height: f32,
}

impl BoardLayout {
    /// Layout for a container `available` pixels wide.
    pub fn for_width(available: f32) -> Self {
        let width = if available.is_finite() {
            available.max(CANVAS_MIN_WIDTH)
        } else {
            CANVAS_MIN_WIDTH
        };
        let height = CANVAS_HEIGHT;
        Self {
            width,
            height,
            origin: Point::new(MARGIN_LEFT, MARGIN_TOP),
            board_width: width - MARGIN_LEFT - MARGIN_RIGHT,
            board_height: height - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    pub fn board_rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.board_width, self.board_height)
    }
}

/// Output of `compute_fret_positions`.
#[derive(Debug, Clone, PartialEq)]
pub struct FretPositions {
    /// X offset of each visible fret line, relative to the board's left edge.
    pub fret_x: Vec<f32>,
    /// Width of the nut zone, 0 when fret 0 is not shown.
    pub nut_width: f32,
}

/// X offset of every fret line in `visible_frets`.
///
/// With fret 0 visible a nut zone of `NUT_WIDTH` is reserved at the left and
/// the remaining width is shared by the other frets. Positions are clamped to
/// the board, so the output never decreases along `visible_frets`.
pub fn compute_fret_positions(
    board_width: f32,
    start_fret: u8,
    visible_frets: &[u8],
) -> FretPositions {
    let Some(&end_fret) = visible_frets.last() else {
        return FretPositions { fret_x: Vec::new(), nut_width: 0.0 };
    };

    let board_width = board_width.max(0.0);
    let nut_width = if start_fret == 0 && visible_frets.contains(&0) {
        NUT_WIDTH.min(board_width)
    } else {
        0.0
    };
    let length = board_width - nut_width;

    // Physical position of fret n on a scale of `length`.
    let abs_pos = |n: u8| length - length / 2f32.powf(n as f32 / 12.0);

    let x_start = abs_pos(start_fret);
    let x_end = abs_pos(end_fret);
    let denom = if x_end - x_start == 0.0 { 1.0 } else { x_end - x_start };
    let span = end_fret.saturating_sub(start_fret).max(1) as f32;

    let fret_x = visible_frets
        .iter()
        .map(|&fret| {
            if nut_width > 0.0 && fret == 0 {
                return 0.0;
            }
            let t_nonlinear = (abs_pos(fret) - x_start) / denom;
            let t_linear = (fret as f32 - start_fret as f32) / span;
            let t = ((1.0 - FLATTEN) * t_nonlinear + FLATTEN * t_linear).clamp(0.0, 1.0);
            nut_width + t * length
        })
        .collect();

    FretPositions { fret_x, nut_width }
}

/// Y offset of each string relative to the board's top edge, evenly spaced
/// inside the padded region.
pub fn compute_string_positions(board_height: f32, string_count: usize) -> Vec<f32> {
    let inset = (board_height - STRING_PADDING_TOP - STRING_PADDING_BOTTOM).max(0.0);
    match string_count {
        0 => Vec::new(),
        1 => vec![STRING_PADDING_TOP + inset / 2.0],
        n => (0..n)
            .map(|i| STRING_PADDING_TOP + i as f32 * inset / (n - 1) as f32)
            .collect(),
    }
}

/// Everything needed to draw the board and to hit-test it.
///
/// Offsets are board-local (relative to `layout.origin`); the `cell_*`
/// helpers return canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardGeometry {
    layout: BoardLayout,
    frets: Vec<u8>,
    fret_x: Vec<f32>,
    nut_width: f32,
    string_y: Vec<f32>,
    // Right edge of each fret's horizontal band.
    fret_edges: Vec<f32>,
}

impl BoardGeometry {
    pub fn new(layout: BoardLayout, range: &FretRange) -> Self {
        let frets = range.visible_frets();
        let FretPositions { fret_x, nut_width } =
            compute_fret_positions(layout.board_width, range.start(), &frets);
        let string_y = compute_string_positions(layout.board_height, STRING_COUNT);

        let fret_edges = fret_x
            .iter()
            .enumerate()
            .map(|(i, &x)| if i == 0 && nut_width > 0.0 { nut_width } else { x })
            .collect();

        Self {
            layout,
            frets,
            fret_x,
            nut_width,
            string_y,
            fret_edges,
        }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn origin(&self) -> Point {
        self.layout.origin
    }

    pub fn visible_frets(&self) -> &[u8] {
        &self.frets
    }

    pub fn fret_x(&self) -> &[f32] {
        &self.fret_x
    }

    pub fn nut_width(&self) -> f32 {
        self.nut_width
    }

    pub fn has_nut(&self) -> bool {
        self.nut_width > 0.0
    }

    pub fn string_y(&self) -> &[f32] {
        &self.string_y
    }

    pub fn fret_edges(&self) -> &[f32] {
        &self.fret_edges
    }

    pub fn fret_index(&self, fret: u8) -> Option<usize> {
        let first = *self.frets.first()?;
        let index = fret.checked_sub(first)? as usize;
        (index < self.frets.len()).then_some(index)
    }

    /// Horizontal extent `[left, right)` of the band for the fret at `index`.
    ///
    /// The nut zone is the first band when fret 0 is visible. Without a nut
    /// the first band has zero width: the start fret sits on the left edge.
    pub(crate) fn fret_band(&self, index: usize) -> (f32, f32) {
        let left = if index == 0 { 0.0 } else { self.fret_edges[index - 1] };
        (left, self.fret_edges[index])
    }

    /// Vertical extent `[top, bottom)` of the band for string `index`,
    /// bounded by the midpoints to its neighbours and the board edges.
    pub(crate) fn string_band(&self, index: usize) -> (f32, f32) {
        let last = self.string_y.len() - 1;
        let top = if index == 0 {
            0.0
        } else {
            (self.string_y[index - 1] + self.string_y[index]) / 2.0
        };
        let bottom = if index == last {
            self.layout.board_height
        } else {
            (self.string_y[index] + self.string_y[index + 1]) / 2.0
        };
        (top, bottom)
    }

    /// Where a marker for `cell` is drawn, in canvas coordinates.
    pub fn cell_center(&self, cell: Cell) -> Option<Point> {
        let fret_index = self.fret_index(cell.fret)?;
        let y = *self.string_y.get(cell.string as usize)?;
        let (left, right) = self.fret_band(fret_index);
        Some(Point::new(
            self.layout.origin.x + (left + right) / 2.0,
            self.layout.origin.y + y,
        ))
    }

    /// The band rectangle of `cell`, in canvas coordinates.
    pub fn cell_rect(&self, cell: Cell) -> Option<Rect> {
        let fret_index = self.fret_index(cell.fret)?;
        if cell.string as usize >= self.string_y.len() {
            return None;
        }
        let (left, right) = self.fret_band(fret_index);
        let (top, bottom) = self.string_band(cell.string as usize);
        Some(Rect::new(
            self.layout.origin.x + left,
            self.layout.origin.y + top,
            right - left,
            bottom - top,
        ))
    }

    /// Canvas X of the number label for the fret at `index`, centred in
    /// its band.
    pub(crate) fn fret_label_x(&self, index: usize) -> f32 {
        let (left, right) = self.fret_band(index);
        self.layout.origin.x + (left + right) / 2.0
    }

    /// Stroke width of string `index`, thin at string 1 and thick at string 6.
    pub fn string_thickness(&self, index: usize) -> f32 {
        let last = self.string_y.len().saturating_sub(1).max(1);
        STRING_THICKNESS_MIN
            + (index as f32 / last as f32) * (STRING_THICKNESS_MAX - STRING_THICKNESS_MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nut_is_reserved_from_fret_zero() {
        let frets: Vec<u8> = (0..=12).collect();
        let positions = compute_fret_positions(656.0, 0, &frets);
        assert_relative_eq!(positions.nut_width, NUT_WIDTH);
        assert_relative_eq!(positions.fret_x[0], 0.0);
        assert_relative_eq!(*positions.fret_x.last().unwrap(), 656.0);
        assert!(positions.fret_x[1] > NUT_WIDTH);
    }

    #[test]
    fn no_nut_above_fret_zero() {
        let frets: Vec<u8> = (5..=9).collect();
        let positions = compute_fret_positions(656.0, 5, &frets);
        assert_relative_eq!(positions.nut_width, 0.0);
        assert_relative_eq!(positions.fret_x[0], 0.0);
        assert_relative_eq!(positions.fret_x[4], 656.0);
    }

    #[test]
    fn blend_matches_hand_computed_value() {
        // Frets 5..=7 over 600px. Fret 6 lands between linear (300px) and
        // equal temperament (~308.8px).
        let positions = compute_fret_positions(600.0, 5, &[5, 6, 7]);
        let abs = |n: f32| 600.0 - 600.0 / 2f32.powf(n / 12.0);
        let t_non = (abs(6.0) - abs(5.0)) / (abs(7.0) - abs(5.0));
        let expected = (0.65 * t_non + 0.35 * 0.5) * 600.0;
        assert_relative_eq!(positions.fret_x[1], expected, epsilon = 1e-3);
        assert!(positions.fret_x[1] > 300.0);
    }

    #[test]
    fn spacing_shrinks_up_the_neck() {
        let frets: Vec<u8> = (1..=22).collect();
        let x = compute_fret_positions(1000.0, 1, &frets).fret_x;
        let first_gap = x[1] - x[0];
        let last_gap = x[21] - x[20];
        assert!(first_gap > last_gap);
    }

    #[test]
    fn single_fret_range_does_not_divide_by_zero() {
        let positions = compute_fret_positions(500.0, 7, &[7]);
        assert_eq!(positions.fret_x, vec![0.0]);
        let positions = compute_fret_positions(500.0, 0, &[0]);
        assert_eq!(positions.fret_x, vec![0.0]);
        assert_relative_eq!(positions.nut_width, NUT_WIDTH);
    }

    #[test]
    fn strings_are_evenly_spaced_inside_padding() {
        let y = compute_string_positions(200.0, 6);
        assert_relative_eq!(y[0], STRING_PADDING_TOP);
        assert_relative_eq!(y[5], 200.0 - STRING_PADDING_BOTTOM);
        assert_relative_eq!(y[1] - y[0], y[5] - y[4], epsilon = 1e-4);
    }

    #[test]
    fn layout_respects_minimum_width() {
        let layout = BoardLayout::for_width(300.0);
        assert_relative_eq!(layout.width, CANVAS_MIN_WIDTH);
        assert_relative_eq!(layout.board_width, CANVAS_MIN_WIDTH - MARGIN_LEFT - MARGIN_RIGHT);
        assert_relative_eq!(layout.board_height, CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM);
        assert_relative_eq!(layout.origin.x, MARGIN_LEFT);
    }

    #[test]
    fn bands_tile_the_board() {
        let geometry = BoardGeometry::new(BoardLayout::for_width(1000.0), &FretRange::new(0, 12));
        assert_eq!(geometry.fret_band(0), (0.0, NUT_WIDTH));
        for i in 1..geometry.visible_frets().len() {
            assert_eq!(geometry.fret_band(i).0, geometry.fret_band(i - 1).1);
        }
        assert_eq!(geometry.string_band(0).0, 0.0);
        assert_eq!(geometry.string_band(5).1, geometry.layout().board_height);
    }

    #[test]
    fn fret_labels_sit_between_lines() {
        let geometry = BoardGeometry::new(BoardLayout::for_width(900.0), &FretRange::default());
        let x = geometry.fret_label_x(1) - MARGIN_LEFT;
        assert!(x > NUT_WIDTH && x < geometry.fret_x()[1]);
    }

    #[test]
    fn cell_center_skips_hidden_cells() {
        let geometry = BoardGeometry::new(BoardLayout::for_width(900.0), &FretRange::new(5, 9));
        assert!(geometry.cell_center(Cell::new(0, 4)).is_none());
        assert!(geometry.cell_center(Cell::new(0, 10)).is_none());
        assert!(geometry.cell_center(Cell::new(6, 5)).is_none());
        let start = geometry.cell_center(Cell::new(0, 5)).unwrap();
        assert_relative_eq!(start.x, MARGIN_LEFT);
    }

    #[test]
    fn strings_thicken_downward() {
        let geometry = BoardGeometry::new(BoardLayout::for_width(900.0), &FretRange::default());
        assert_relative_eq!(geometry.string_thickness(0), STRING_THICKNESS_MIN);
        assert_relative_eq!(geometry.string_thickness(5), STRING_THICKNESS_MAX, epsilon = 1e-6);
    }
}
