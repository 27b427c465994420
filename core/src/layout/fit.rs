use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Area a square grid has to fit into.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub padding: Insets,
    pub spacing: (f32, f32),
}

/// Square cell size and centering margins for a grid inside a [`Frame`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridFit {
    pub cell: f32,
    pub grid_width: f32,
    pub grid_height: f32,
    pub margins: Insets,
    spacing: (f32, f32),
}

impl GridFit {
    /// Top-left corner of a cell, relative to the frame.
    pub fn cell_origin(&self, row: Coord, column: Coord) -> (f32, f32) {
        let (spacing_x, spacing_y) = self.spacing;
        (
            self.margins.left + f32::from(column) * (self.cell + spacing_x),
            self.margins.top + f32::from(row) * (self.cell + spacing_y),
        )
    }
}

/// Largest whole-unit square cell such that the grid including spacing fits the padded frame,
/// centered with the leftover space split evenly on each axis.
pub fn fit_square_grid(rows: Coord, columns: Coord, frame: Frame) -> Option<GridFit> {
    if rows == 0 || columns == 0 {
        log::warn!("cannot fit a {rows}x{columns} grid");
        return None;
    }

    let (spacing_x, spacing_y) = frame.spacing;
    let rows_f = f32::from(rows);
    let columns_f = f32::from(columns);
    let total_spacing_x = spacing_x * (columns_f - 1.);
    let total_spacing_y = spacing_y * (rows_f - 1.);

    let usable_width = frame.width - frame.padding.left - frame.padding.right - total_spacing_x;
    let usable_height = frame.height - frame.padding.top - frame.padding.bottom - total_spacing_y;

    let cell = (usable_width / columns_f).min(usable_height / rows_f).floor();
    if !(cell > 0.) {
        log::warn!(
            "cell size too small to lay out {rows}x{columns} in {}x{}",
            frame.width,
            frame.height
        );
        return None;
    }

    let grid_width = cell * columns_f + total_spacing_x;
    let grid_height = cell * rows_f + total_spacing_y;

    let half_x = ((frame.width - grid_width).max(0.) / 2.).round();
    let half_y = ((frame.height - grid_height).max(0.) / 2.).round();

    Some(GridFit {
        cell,
        grid_width,
        grid_height,
        margins: Insets {
            left: half_x,
            right: half_x,
            top: half_y,
            bottom: half_y,
        },
        spacing: frame.spacing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: f32, height: f32, spacing: f32) -> Frame {
        Frame {
            width,
            height,
            padding: Insets::default(),
            spacing: (spacing, spacing),
        }
    }

    #[test]
    fn picks_limiting_axis_and_centers() {
        let fit = fit_square_grid(2, 3, frame(100., 60., 4.)).unwrap();

        assert_eq!(fit.cell, 28.);
        assert_eq!(fit.grid_width, 92.);
        assert_eq!(fit.grid_height, 60.);
        assert_eq!(fit.margins.left, 4.);
        assert_eq!(fit.margins.right, 4.);
        assert_eq!(fit.margins.top, 0.);
        assert_eq!(fit.cell_origin(1, 2), (68., 32.));
    }

    #[test]
    fn padding_shrinks_usable_area() {
        let mut padded = frame(100., 100., 0.);
        padded.padding = Insets {
            left: 10.,
            right: 10.,
            top: 0.,
            bottom: 0.,
        };

        let fit = fit_square_grid(2, 2, padded).unwrap();

        assert_eq!(fit.cell, 40.);
        assert_eq!(fit.margins.left, 10.);
        assert_eq!(fit.margins.top, 10.);
    }

    #[test]
    fn cell_edge_is_whole() {
        let fit = fit_square_grid(3, 3, frame(100., 100., 0.)).unwrap();

        assert_eq!(fit.cell, 33.);
        assert!(fit.cell * 3. <= 100.);
    }

    #[test]
    fn degenerate_grids_do_not_fit() {
        assert_eq!(fit_square_grid(0, 3, frame(100., 100., 0.)), None);
        assert_eq!(fit_square_grid(4, 4, frame(10., 10., 4.)), None);
    }
}
