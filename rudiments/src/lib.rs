// THEORY:
// This file is the entry point for the `rudiments` library crate: a set of
// small, independent building blocks for numeric and imaging work.
//
// The one layered component is the image pipeline. A `Matrix` carries the
// linear algebra, a `Pixel` is a 3x1 channel vector tagged with its colorspace,
// a `Pixmap` is a grid of pixels decoded from a file, and an `Image` adds
// geometric transforms on top. Everything else (sorting, comparators,
// hypercomplex numbers, distributions, the CSV reader, bounded containers and
// the integer helpers) stands alone.
//
// Every fallible operation returns the crate-wide `Result`; configuration lives
// in `config` and is optional everywhere through `Default`.

pub mod config;
pub mod core_modules;
pub mod error;

pub use config::{CsvConfig, RudimentsConfig, TransformConfig};
pub use core_modules::csv_sheet::CsvSheet;
pub use core_modules::matrix::Matrix;
pub use core_modules::pixel::pixel::{Channel, Colorspace, Pixel};
pub use core_modules::pixmap::{ColorblindMode, Pixmap};
pub use core_modules::raster::Image;
pub use error::{Result, RudimentsError};
