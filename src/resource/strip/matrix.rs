//! Coordinate remapping for LED matrix panels.
//!
//! Panels are wired serpentine-style: even rows run left-to-right, odd rows
//! are reversed. The start corner rotates the whole coordinate frame before
//! the serpentine reversal is applied.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixLayout {
    panels: usize,
    width: usize,
    height: usize,
    start_corner: StartCorner,
}

impl MatrixLayout {
    pub fn new(
        panels: usize,
        width: usize,
        height: usize,
        start_corner: StartCorner,
    ) -> Result<Self, String> {
        if panels == 0 {
            return Err("Matrix layout needs at least one panel".to_string());
        }
        if width == 0 || height == 0 {
            return Err(format!("Invalid matrix panel size {}x{}", width, height));
        }
        Ok(Self {
            panels,
            width,
            height,
            start_corner,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn panels(&self) -> usize {
        self.panels
    }

    /// Map an (x, y) coordinate to a linear strip index.
    ///
    /// Returns `None` outside the `width * panels` x `height` bounds, or when
    /// the corner rotation pushes the coordinate off the panel. The start
    /// corner mirrors against the panel *width* on both axes, matching the
    /// wiring of the panels this was written for.
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width * self.panels || y >= self.height {
            return None;
        }

        let w = self.width as isize;
        let (mut x, mut y) = (x as isize, y as isize);

        match self.start_corner {
            StartCorner::TopLeft => {}
            StartCorner::TopRight => {
                let old_x = x;
                x = y;
                y = w - old_x - 1;
            }
            StartCorner::BottomLeft => {
                let old_x = x;
                x = w - y - 1;
                y = old_x;
            }
            StartCorner::BottomRight => {
                x = w - x - 1;
                y = w - y - 1;
            }
        }

        if x < 0 || y < 0 {
            return None;
        }

        // Serpentine wiring: odd rows run in reverse.
        let pos = if y % 2 == 1 {
            y * w + (w - x - 1)
        } else {
            y * w + x
        };

        usize::try_from(pos).ok()
    }
}
