// THEORY:
// The `Pixmap` is the owner of a decoded raster: a fixed-size, row-major grid of
// `Pixel`s. It is the bridge between the codec world (files, RGBA bytes) and the
// per-pixel colorspace math, and the place where whole-image questions are
// answered (which colors appear, how often, where).
//
// Key architectural principles:
// 1.  **One decode pass**: reading a file normalizes every source encoding to
//     packed ARGB once, then builds the grid. Writing always produces PNG.
// 2.  **Vacant cells are explicit**: a cell may hold no pixel. Nothing in the
//     read path produces one, but callers can clear cells, and encoding a grid
//     with a vacancy is refused rather than guessed.
// 3.  **Lazy color cache**: the set of distinct ARGB values is computed on first
//     use and dropped by every method that can change a pixel. Readers never see
//     a stale set.
// 4.  **Whole-image filters are pixel-wise**: recoloring walks the grid and
//     delegates to `Pixel::recolor`; the pixmap never does color math itself.

use crate::core_modules::matrix::Matrix;
use crate::core_modules::pixel::pixel::{Argb, Byte, Channel, Pixel};
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::{Result, RudimentsError};
use std::cell::OnceCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

const PROTANOPIA_FILTER: [[f64; 3]; 3] = [
    [0.567, 0.433, 0.000],
    [0.558, 0.442, 0.000],
    [0.000, 0.242, 0.478],
];
const DEUTERANOPIA_FILTER: [[f64; 3]; 3] = [
    [0.625, 0.375, 0.000],
    [0.700, 0.300, 0.000],
    [0.000, 0.300, 0.700],
];
const TRITANOPIA_FILTER: [[f64; 3]; 3] = [
    [0.950, 0.050, 0.000],
    [0.000, 0.433, 0.567],
    [0.000, 0.475, 0.525],
];

/// Copunctal points of the three dichromacies in CIE XYZ.
pub const PROTANOPIA_COPUNCTAL: [f64; 3] = [0.747, 0.253, 0.0];
pub const DEUTERANOPIA_COPUNCTAL: [f64; 3] = [1.08, -0.8, 0.0];
pub const TRITANOPIA_COPUNCTAL: [f64; 3] = [0.171, 0.0, 0.0];

/// The colorblindness simulations available to `Pixmap::recolor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorblindMode {
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

impl ColorblindMode {
    /// Parses a single-letter mode code (`p`, `d`, `t`). Unknown codes fall
    /// back to protanopia.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_else(|_| {
            warn!(code, "unknown recoloring mode, using protanopia");
            ColorblindMode::Protanopia
        })
    }

    pub fn code(self) -> &'static str {
        match self {
            ColorblindMode::Protanopia => "p",
            ColorblindMode::Deuteranopia => "d",
            ColorblindMode::Tritanopia => "t",
        }
    }

    /// The 3x3 simulation filter for this mode.
    pub fn filter(self) -> Matrix {
        match self {
            ColorblindMode::Protanopia => Matrix::from_array(PROTANOPIA_FILTER),
            ColorblindMode::Deuteranopia => Matrix::from_array(DEUTERANOPIA_FILTER),
            ColorblindMode::Tritanopia => Matrix::from_array(TRITANOPIA_FILTER),
        }
    }

    pub fn copunctal_point(self) -> [f64; 3] {
        match self {
            ColorblindMode::Protanopia => PROTANOPIA_COPUNCTAL,
            ColorblindMode::Deuteranopia => DEUTERANOPIA_COPUNCTAL,
            ColorblindMode::Tritanopia => TRITANOPIA_COPUNCTAL,
        }
    }
}

impl FromStr for ColorblindMode {
    type Err = RudimentsError;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "p" => Ok(ColorblindMode::Protanopia),
            "d" => Ok(ColorblindMode::Deuteranopia),
            "t" => Ok(ColorblindMode::Tritanopia),
            other => Err(RudimentsError::invalid_parameter(format!(
                "unknown recoloring mode '{}'",
                other
            ))),
        }
    }
}

/// Distinct-color statistics of a pixmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSummary {
    /// Number of distinct ARGB values.
    pub distinct: usize,
    /// Color with the smallest R+G+B sum (starts from white).
    pub darkest: Argb,
    /// Color with the largest R+G+B sum (starts from black).
    pub brightest: Argb,
}

/// Statistics of one channel across the distinct colors of a pixmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSummary {
    /// Distinct colors with a nonzero value in the channel.
    pub nonzero: usize,
    pub min: Byte,
    pub max: Byte,
}

fn cell_count(height: usize, width: usize) -> Result<usize> {
    height.checked_mul(width).ok_or_else(|| {
        RudimentsError::overflow(format!("a {}x{} pixmap has too many cells", height, width))
    })
}

/// A fixed-size grid of pixels.
#[derive(Debug, Clone)]
pub struct Pixmap {
    filename: Option<PathBuf>,
    height: usize,
    width: usize,
    /// Row-major cells; `None` is a vacant cell.
    cells: Vec<Option<Pixel>>,
    /// Distinct ARGB values, computed lazily.
    colors: OnceCell<HashSet<Argb>>,
}

impl Pixmap {
    /// Creates a `height x width` pixmap of transparent black pixels. Fails
    /// with `Overflow` when the grid cannot be addressed or allocated.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        let count = cell_count(height, width)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(count).map_err(|err| {
            RudimentsError::overflow(format!(
                "cannot allocate a {}x{} pixmap: {}",
                height, width, err
            ))
        })?;
        cells.resize(count, Some(Pixel::new(0)));
        Ok(Self {
            filename: None,
            height,
            width,
            cells,
            colors: OnceCell::new(),
        })
    }

    /// Builds a pixmap from row-major ARGB values.
    pub fn from_argb(height: usize, width: usize, values: &[Argb]) -> Result<Self> {
        if values.len() != cell_count(height, width)? {
            return Err(RudimentsError::dimension_mismatch(
                (height, width),
                (values.len(), 1),
            ));
        }
        Ok(Self {
            filename: None,
            height,
            width,
            cells: values.iter().map(|&v| Some(Pixel::new(v))).collect(),
            colors: OnceCell::new(),
        })
    }

    /// Reads an image file of any supported format.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let buffer = image_helper::load(path)?;
        let mut pixmap = Self::from_argb(
            buffer.height as usize,
            buffer.width as usize,
            &buffer.pixels,
        )?;
        pixmap.filename = Some(path.to_path_buf());
        Ok(pixmap)
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// The pixel at `(row, col)`; `None` when out of bounds or vacant.
    pub fn pixel(&self, row: usize, col: usize) -> Option<&Pixel> {
        self.index(row, col).and_then(|i| self.cells[i].as_ref())
    }

    /// Replaces the pixel at `(row, col)`. Out-of-bounds writes are logged and
    /// ignored.
    pub fn set_pixel(&mut self, row: usize, col: usize, pixel: Pixel) {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = Some(pixel);
                self.colors.take();
            }
            None => warn!(row, col, "ignoring pixel write outside pixmap"),
        }
    }

    /// Empties the cell at `(row, col)`.
    pub fn clear_pixel(&mut self, row: usize, col: usize) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = None;
            self.colors.take();
        }
    }

    // --- Color statistics ---

    /// The set of distinct ARGB values in the pixmap (vacant cells excluded).
    pub fn colors(&self) -> &HashSet<Argb> {
        self.colors
            .get_or_init(|| self.cells.iter().flatten().map(Pixel::argb).collect())
    }

    fn sorted_colors(&self) -> Vec<Argb> {
        let mut colors: Vec<Argb> = self.colors().iter().copied().collect();
        colors.sort_unstable();
        colors
    }

    /// How many pixels have exactly this ARGB value.
    pub fn color_count(&self, color: Argb) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.argb() == color)
            .count()
    }

    /// Coordinates of every pixel with this color, or `None` if the color does
    /// not occur at all.
    pub fn color_area(&self, color: Argb) -> Option<Vec<(usize, usize)>> {
        if !self.colors().contains(&color) {
            return None;
        }
        let area = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_ref().is_some_and(|p| p.argb() == color))
            .map(|(i, _)| (i / self.width, i % self.width))
            .collect();
        Some(area)
    }

    /// The color covering the most pixels. Ties go to the smaller ARGB value.
    pub fn dominant_color(&self) -> Option<Argb> {
        let mut best: Option<(Argb, usize)> = None;
        for color in self.sorted_colors() {
            let count = self.color_count(color);
            if best.is_none_or(|(_, max)| count > max) {
                best = Some((color, count));
            }
        }
        best.map(|(color, _)| color)
    }

    /// Distinct color count plus the darkest and brightest colors by channel sum.
    pub fn count_colors(&self) -> ColorSummary {
        let channel_sum =
            |c: Argb| -> u32 { Channel::ALL.iter().map(|ch| ch.of(c) as u32).sum() };
        let mut summary = ColorSummary {
            distinct: self.colors().len(),
            darkest: 0x00ff_ffff,
            brightest: 0x0000_0000,
        };
        for color in self.sorted_colors() {
            let sum = channel_sum(color);
            if sum < channel_sum(summary.darkest) {
                summary.darkest = color;
            }
            if sum > channel_sum(summary.brightest) {
                summary.brightest = color;
            }
        }
        summary
    }

    /// Nonzero count and range of one channel over the distinct colors.
    pub fn count_channel(&self, channel: Channel) -> ChannelSummary {
        let mut summary = ChannelSummary {
            nonzero: 0,
            min: Byte::MAX,
            max: 0,
        };
        for &color in self.colors() {
            let value = channel.of(color);
            if value > 0 {
                summary.nonzero += 1;
            }
            summary.min = summary.min.min(value);
            summary.max = summary.max.max(value);
        }
        summary
    }

    // --- Filtering ---

    /// Simulates a color vision deficiency over the whole pixmap.
    pub fn recolor(&mut self, mode: ColorblindMode) -> Result<()> {
        self.filter(&mode.filter())
    }

    /// Recolors every pixel with `filter` (see `Pixel::recolor`).
    pub fn filter(&mut self, filter: &Matrix) -> Result<()> {
        self.colors.take();
        for pixel in self.cells.iter_mut().flatten() {
            pixel.recolor(filter)?;
        }
        Ok(())
    }

    // --- Encoding ---

    /// Row-major ARGB values. Fails on the first vacant cell.
    pub fn to_argb(&self) -> Result<Vec<Argb>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                cell.as_ref().map(Pixel::argb).ok_or(RudimentsError::VacantPixel {
                    row: i / self.width.max(1),
                    col: i % self.width.max(1),
                })
            })
            .collect()
    }

    fn to_rgba_bytes(&self) -> Result<Vec<u8>> {
        Ok(self
            .to_argb()?
            .into_iter()
            .flat_map(image_helper::argb_to_rgba)
            .collect())
    }

    /// The pixmap as an `image` RGBA buffer.
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        let bytes = self.to_rgba_bytes()?;
        let len = bytes.len();
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, bytes)
            .ok_or_else(|| RudimentsError::dimension_mismatch((self.height, self.width), (len, 4)))
    }

    /// Writes the pixmap as a PNG file. A vacant cell aborts the write before
    /// anything is created on disk.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_rgba_bytes()?;
        image_helper::save(path.as_ref(), self.width as u32, self.height as u32, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Pixmap {
        Pixmap::from_argb(
            2,
            3,
            &[
                0xff_ff_00_00,
                0xff_00_00_00,
                0xff_ff_00_00,
                0xff_ff_ff_ff,
                0xff_ff_00_00,
                0x80_00_80_ff,
            ],
        )
        .unwrap()
    }

    #[test]
    fn color_counts_cover_every_pixel() {
        let pixmap = checker();
        assert_eq!(pixmap.colors().len(), 4);
        let total: usize = pixmap.colors().iter().map(|&c| pixmap.color_count(c)).sum();
        assert_eq!(total, pixmap.height() * pixmap.width());
        assert_eq!(pixmap.dominant_color(), Some(0xff_ff_00_00));
    }

    #[test]
    fn color_area_lists_coordinates() {
        let pixmap = checker();
        assert_eq!(
            pixmap.color_area(0xff_ff_00_00),
            Some(vec![(0, 0), (0, 2), (1, 1)])
        );
        assert_eq!(pixmap.color_area(0x12_34_56_78), None);
    }

    #[test]
    fn summaries_track_extremes() {
        let pixmap = checker();
        let summary = pixmap.count_colors();
        assert_eq!(summary.distinct, 4);
        assert_eq!(summary.darkest, 0xff_00_00_00);
        assert_eq!(summary.brightest, 0xff_ff_ff_ff);

        let red = pixmap.count_channel(Channel::Red);
        assert_eq!(red, ChannelSummary { nonzero: 2, min: 0, max: 255 });
        let blue = pixmap.count_channel(Channel::Blue);
        assert_eq!(blue, ChannelSummary { nonzero: 2, min: 0, max: 255 });
    }

    #[test]
    fn set_pixel_invalidates_cache() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        assert_eq!(pixmap.colors().len(), 1);
        pixmap.set_pixel(1, 1, Pixel::new(0xff_12_34_56));
        assert_eq!(pixmap.colors().len(), 2);
        assert_eq!(pixmap.color_count(0xff_12_34_56), 1);
        pixmap.set_pixel(9, 9, Pixel::new(0xff_00_00_01));
        assert_eq!(pixmap.colors().len(), 2);
    }

    #[test]
    fn recolor_changes_colors_and_keeps_alpha() {
        let mut pixmap = checker();
        let before: HashSet<Argb> = pixmap.colors().clone();
        pixmap.recolor(ColorblindMode::Deuteranopia).unwrap();
        let after = pixmap.colors();
        assert_ne!(&before, after);
        assert_eq!(pixmap.pixel(1, 2).unwrap().alpha(), 0x80);
        assert!(after.iter().all(|c| c >> 24 == 0xff || c >> 24 == 0x80));
    }

    #[test]
    fn oversized_grid_is_an_overflow_error() {
        assert!(matches!(Pixmap::new(usize::MAX, 2), Err(RudimentsError::Overflow { .. })));
        assert!(matches!(Pixmap::new(1 << 40, 1 << 20), Err(RudimentsError::Overflow { .. })));
        assert!(matches!(
            Pixmap::from_argb(usize::MAX, 3, &[]),
            Err(RudimentsError::Overflow { .. })
        ));
    }

    #[test]
    fn vacant_pixel_blocks_encoding() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.clear_pixel(1, 0);
        assert!(pixmap.pixel(1, 0).is_none());
        match pixmap.to_argb() {
            Err(RudimentsError::VacantPixel { row, col }) => assert_eq!((row, col), (1, 0)),
            other => panic!("expected vacant pixel error, got {:?}", other),
        }
        let dir = tempfile::tempdir().expect("Create temp dir");
        let path = dir.path().join("vacant.png");
        assert!(pixmap.write_png(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn mode_codes() {
        assert_eq!(ColorblindMode::from_code("t"), ColorblindMode::Tritanopia);
        assert_eq!(ColorblindMode::from_code("x"), ColorblindMode::Protanopia);
        assert!("x".parse::<ColorblindMode>().is_err());
        assert_eq!(ColorblindMode::Deuteranopia.code(), "d");
        assert_eq!(ColorblindMode::Tritanopia.copunctal_point(), TRITANOPIA_COPUNCTAL);
    }

    #[test]
    fn rgba_image_keeps_channel_order() {
        let image = checker().to_rgba_image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [0xff, 0x00, 0x00, 0xff]);
        assert_eq!(image.get_pixel(2, 1).0, [0x00, 0x80, 0xff, 0x80]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(Pixmap::from_argb(2, 2, &[0; 3]).is_err());
    }
}
