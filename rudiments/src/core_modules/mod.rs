// Image pipeline, leaf to root: matrix -> pixel -> pixmap -> raster.
pub mod matrix;
pub mod pixel;
pub mod pixmap;
pub mod raster;
pub mod utils;

// Standalone modules.
pub mod collections;
pub mod comparators;
pub mod csv_sheet;
pub mod distributions;
pub mod hypercomplex;
pub mod math_utils;
pub mod sorting;
