// THEORY:
// An `Image` is a `Pixmap` with a name. It adds the one operation that needs
// to change the grid dimensions: a geometric transform by a 3x3 homogeneous
// matrix acting on (x, y, 1) pixel coordinates.
//
// The transform runs in three stages:
// 1.  **Bounds**: the four corners are mapped forward and the destination grid
//     is sized to their bounding box (integer truncation of each corner).
// 2.  **Forward splat**: each source pixel is dropped where it lands, shifted so
//     the bounding box starts at the origin.
// 3.  **Inverse sampling**: every destination cell is mapped back through the
//     inverse transform and takes the nearest source pixel (truncation). Cells
//     whose preimage lies outside the source get the configured fill color.
//
// The inverse pass covers every destination cell, so holes left by the forward
// splat under magnification are always filled.

use crate::config::TransformConfig;
use crate::core_modules::matrix::Matrix;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixmap::{ColorblindMode, Pixmap};
use crate::error::{Result, RudimentsError};
use std::path::{Path, PathBuf};
use tracing::debug;

const HOMOGENEOUS: usize = 3;

/// A pixmap together with the file it was read from.
#[derive(Debug, Clone)]
pub struct Image {
    filename: Option<PathBuf>,
    pixmap: Pixmap,
}

impl Image {
    /// Reads an image file of any supported format.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            filename: Some(path.to_path_buf()),
            pixmap: Pixmap::open(path)?,
        })
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            filename: pixmap.filename().map(Path::to_path_buf),
            pixmap,
        }
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn height(&self) -> usize {
        self.pixmap.height()
    }

    pub fn width(&self) -> usize {
        self.pixmap.width()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Writes the image as PNG.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.pixmap.write_png(path)
    }

    /// Recolors every pixel with `filter`.
    pub fn filter(&mut self, filter: &Matrix) -> Result<()> {
        self.pixmap.filter(filter)
    }

    pub fn recolor(&mut self, mode: ColorblindMode) -> Result<()> {
        self.pixmap.recolor(mode)
    }

    /// Transforms the image with the default (transparent) fill.
    pub fn transform(&mut self, transform: &Matrix) -> Result<()> {
        self.transform_with(transform, &TransformConfig::default())
    }

    /// Applies a 3x3 homogeneous transform to pixel locations.
    ///
    /// The matrix is validated and inverted before anything is touched; on
    /// error the image is unchanged.
    pub fn transform_with(&mut self, transform: &Matrix, config: &TransformConfig) -> Result<()> {
        if !transform.is_square() {
            return Err(RudimentsError::NotSquare {
                rows: transform.rows(),
                cols: transform.cols(),
            });
        }
        if transform.rows() != HOMOGENEOUS {
            return Err(RudimentsError::dimension_mismatch(
                (transform.rows(), transform.cols()),
                (HOMOGENEOUS, HOMOGENEOUS),
            ));
        }
        let inverse = transform.inverse()?;

        let (height, width) = (self.height(), self.width());
        let corners = [
            (0.0, 0.0),
            (width as f64, 0.0),
            (0.0, height as f64),
            (width as f64, height as f64),
        ]
        .map(|(x, y)| {
            let (u, v) = map_point(transform, x, y);
            (u as i64, v as i64)
        });
        let min_x = corners.iter().map(|c| c.0).min().unwrap_or(0);
        let max_x = corners.iter().map(|c| c.0).max().unwrap_or(0);
        let min_y = corners.iter().map(|c| c.1).min().unwrap_or(0);
        let max_y = corners.iter().map(|c| c.1).max().unwrap_or(0);
        let new_width = extent(min_x, max_x)?;
        let new_height = extent(min_y, max_y)?;
        debug!(width, height, new_width, new_height, min_x, min_y, "transform bounds");

        let mut output = Pixmap::new(new_height, new_width)?;

        for i in 0..height {
            for j in 0..width {
                let Some(pixel) = self.pixmap.pixel(i, j) else {
                    continue;
                };
                let (x, y) = map_point(transform, j as f64, i as f64);
                let col = x as i64 - min_x;
                let row = y as i64 - min_y;
                if (0..new_height as i64).contains(&row) && (0..new_width as i64).contains(&col) {
                    output.set_pixel(row as usize, col as usize, pixel.clone());
                }
            }
        }

        let fill = Pixel::new(config.fill_argb);
        let mut filled = 0usize;
        for i in 0..new_height {
            for j in 0..new_width {
                let (x, y) = map_point(
                    &inverse,
                    (j as i64 + min_x) as f64,
                    (i as i64 + min_y) as f64,
                );
                let sample = source_index(x, y, height, width)
                    .and_then(|(row, col)| self.pixmap.pixel(row, col));
                match sample {
                    Some(pixel) => output.set_pixel(i, j, pixel.clone()),
                    None => {
                        filled += 1;
                        output.set_pixel(i, j, fill.clone());
                    }
                }
            }
        }
        debug!(filled, "transform fill cells");

        self.pixmap = output;
        Ok(())
    }
}

// (x, y, 1) through a 3x3 matrix; the homogeneous coordinate is not divided out.
fn map_point(transform: &Matrix, x: f64, y: f64) -> (f64, f64) {
    let row = |i: usize| transform[(i, 0)] * x + transform[(i, 1)] * y + transform[(i, 2)];
    (row(0), row(1))
}

// Cell count spanned by `min..max`; the corners saturate at the `i64` range,
// so the difference itself can overflow.
fn extent(min: i64, max: i64) -> Result<usize> {
    max.checked_sub(min)
        .and_then(|span| usize::try_from(span).ok())
        .ok_or_else(|| {
            RudimentsError::overflow(format!("transformed bounds {}..{} do not fit", min, max))
        })
}

// Nearest-neighbor source cell by truncation toward zero.
fn source_index(x: f64, y: f64, height: usize, width: usize) -> Option<(usize, usize)> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let (col, row) = (x as i64, y as i64);
    ((0..height as i64).contains(&row) && (0..width as i64).contains(&col))
        .then_some((row as usize, col as usize))
}
