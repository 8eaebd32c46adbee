// THEORY (Colorspace-aware Pixel):
// The `Pixel` module is the smallest unit of the image pipeline. A pixel is a
// 3-channel column vector (a 3x1 `Matrix`) plus a tag naming the colorspace those
// channel values currently live in, plus the packed ARGB value it was built from.
//
// What lives here:
// - Decomposition of a packed ARGB integer into normalized [0,1] RGB channels.
// - The colorspace state machine. The tag is the only thing that gives channel
//   values meaning, so conversions are the only legal way to change it.
//   Only RGB <-> XYZ transitions exist; the remaining tags (sRGB, D65, xyY, LMS,
//   HSV) can be carried by a pixel but converting out of them is a no-op.
// - Filtering: a 3x3 matrix applied to the channel vector, either raw (in the
//   current space) or as a recolor (sandwiched between RGB->XYZ and XYZ->RGB).
// - Repacking: channels back to ARGB with the original alpha byte untouched.
//
// The conversion matrices are process-wide constants. They are built once into
// a `OnceLock` table and only ever read, the same way the sRGB LUT is shared.

pub mod pixel {
    use crate::core_modules::matrix::Matrix;
    use crate::error::{Result, RudimentsError};
    use std::sync::OnceLock;
    use tracing::debug;

    pub type Argb = u32;
    pub type Byte = u8;
    pub type NormalizedChannel = f64;

    const CHANNELS: usize = 3;
    const ALPHA_MASK: Argb = 0xff00_0000;

    /// sRGB (D65) linear RGB to CIE XYZ.
    const RGB_TO_XYZ: [[f64; 3]; 3] = [
        [0.4124, 0.3576, 0.1805],
        [0.2126, 0.7152, 0.0722],
        [0.0193, 0.1192, 0.9505],
    ];
    /// CIE XYZ to sRGB (D65) linear RGB.
    const XYZ_TO_RGB: [[f64; 3]; 3] = [
        [3.2406, -1.5372, -0.4986],
        [-0.9689, 1.8758, 0.0415],
        [0.0557, -0.2040, 1.0570],
    ];
    /// CIE 1931 standardized RGB to XYZ.
    const RGB_TO_XYZ_CIE: [[f64; 3]; 3] = [
        [0.49000, 0.31000, 0.200000],
        [0.17697, 0.81240, 0.010630],
        [0.00000, 0.01000, 0.990000],
    ];
    /// CIE 1931 standardized XYZ to RGB.
    const XYZ_TO_RGB_CIE: [[f64; 3]; 3] = [
        [0.41847000, -0.1586600, -0.082835],
        [-0.09116900, 0.2524300, 0.015708],
        [0.00092090, -0.0025498, 0.178600],
    ];
    /// Hunt-Pointer-Estevez XYZ to LMS.
    const XYZ_TO_LMS: [[f64; 3]; 3] = [
        [0.38971, 0.68898, -0.07868],
        [-0.22981, 1.18340, 0.04641],
        [0.00000, 0.00000, 1.00000],
    ];
    /// Hunt-Pointer-Estevez normalized to D65.
    const XYZ_TO_D65: [[f64; 3]; 3] = [
        [0.4002, 0.7076, -0.0808],
        [-0.2263, 1.1653, 0.0457],
        [0.0000, 0.0000, 0.9182],
    ];
    /// sRGB primaries to CIE xyY.
    const SRGB_TO_XYY: [[f64; 3]; 3] = [
        [0.6400, 0.3000, 0.1500],
        [0.3300, 0.6000, 0.0600],
        [0.2126, 0.7152, 0.0722],
    ];

    static TRANSFORM_TABLE: OnceLock<[Matrix; 7]> = OnceLock::new();

    /// The colorspace a pixel's channel values are expressed in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Colorspace {
        /// Standard RGB, channels in [0,1].
        Rgb,
        /// Gamma-corrected RGB.
        Srgb,
        /// CIE XYZ.
        Xyz,
        /// XYZ scaled so the Y of D65 is 1.0.
        D65,
        /// CIE xyY (chromaticity plus luminance).
        XyY,
        /// Cone response space (long, medium, short).
        Lms,
        /// Hue, saturation, value.
        Hsv,
    }

    /// Named entries of the conversion matrix table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ColorTransform {
        RgbToXyz,
        XyzToRgb,
        RgbToXyzCie,
        XyzToRgbCie,
        XyzToLms,
        XyzToD65,
        SrgbToXyy,
    }

    impl ColorTransform {
        /// The shared, immutable matrix for this transform.
        pub fn matrix(self) -> &'static Matrix {
            let table = TRANSFORM_TABLE.get_or_init(|| {
                [
                    Matrix::from_array(RGB_TO_XYZ),
                    Matrix::from_array(XYZ_TO_RGB),
                    Matrix::from_array(RGB_TO_XYZ_CIE),
                    Matrix::from_array(XYZ_TO_RGB_CIE),
                    Matrix::from_array(XYZ_TO_LMS),
                    Matrix::from_array(XYZ_TO_D65),
                    Matrix::from_array(SRGB_TO_XYY),
                ]
            });
            &table[self as usize]
        }
    }

    /// One of the three color channels of a packed ARGB value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Channel {
        Red,
        Green,
        Blue,
    }

    impl Channel {
        pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

        fn shift(self) -> u32 {
            match self {
                Channel::Red => 16,
                Channel::Green => 8,
                Channel::Blue => 0,
            }
        }

        /// Extracts this channel's byte from a packed ARGB value.
        pub fn of(self, argb: Argb) -> Byte {
            ((argb >> self.shift()) & 0xff) as Byte
        }
    }

    /// A single pixel: a 3-channel vector tagged with its colorspace.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Pixel {
        /// The packed ARGB value the pixel was created from. Only its alpha byte
        /// is used after construction.
        argb: Argb,
        /// The colorspace `channels` is currently expressed in.
        colorspace: Colorspace,
        /// 3x1 vector of channel values.
        channels: Matrix,
    }

    impl Default for Pixel {
        fn default() -> Self {
            Pixel::new(0)
        }
    }

    impl Pixel {
        /// Decomposes a packed ARGB value into normalized RGB channels.
        pub fn new(argb: Argb) -> Self {
            let channels: Vec<NormalizedChannel> = Channel::ALL
                .iter()
                .map(|c| c.of(argb) as NormalizedChannel / 255.0)
                .collect();
            Pixel {
                argb,
                colorspace: Colorspace::Rgb,
                channels: Matrix::from_vector(&channels),
            }
        }

        /// Builds a pixel from raw channel values already expressed in
        /// `colorspace`, keeping the alpha byte of `alpha_source`.
        pub fn from_channels(channels: [f64; 3], colorspace: Colorspace, alpha_source: Argb) -> Self {
            Pixel {
                argb: alpha_source & ALPHA_MASK,
                colorspace,
                channels: Matrix::from_vector(&channels),
            }
        }

        pub fn colorspace(&self) -> Colorspace {
            self.colorspace
        }

        pub fn channels(&self) -> &Matrix {
            &self.channels
        }

        pub fn alpha(&self) -> Byte {
            (self.argb >> 24) as Byte
        }

        /// Converts the channels to RGB. From XYZ this applies the XYZ->RGB
        /// matrix; from RGB it does nothing. Other colorspaces have no
        /// conversion and are left as they are.
        pub fn to_rgb(&mut self) {
            match self.colorspace {
                Colorspace::Rgb => {}
                Colorspace::Xyz => {
                    self.channels = Self::apply(ColorTransform::XyzToRgb.matrix(), &self.channels);
                    self.colorspace = Colorspace::Rgb;
                }
                other => debug!(?other, "no conversion to RGB from this colorspace"),
            }
        }

        /// Converts the channels to CIE XYZ. Only RGB pixels convert.
        pub fn to_xyz(&mut self) {
            match self.colorspace {
                Colorspace::Xyz => {}
                Colorspace::Rgb => {
                    self.channels = Self::apply(ColorTransform::RgbToXyz.matrix(), &self.channels);
                    self.colorspace = Colorspace::Xyz;
                }
                other => debug!(?other, "no conversion to XYZ from this colorspace"),
            }
        }

        // 3x3 table matrix times a 3x1 vector; shapes are fixed by construction.
        fn apply(transform: &Matrix, channels: &Matrix) -> Matrix {
            let values: Vec<f64> = (0..CHANNELS)
                .map(|i| (0..CHANNELS).map(|j| transform[(i, j)] * channels.get(j, 0)).sum())
                .collect();
            Matrix::from_vector(&values)
        }

        /// Combines a chain of filters into a single transform:
        /// `filters[n-1] x ... x filters[1] x filters[0]`, so `filters[0]` is
        /// applied first. An empty chain is the 3x3 identity.
        pub fn compose(filters: &[Matrix]) -> Result<Matrix> {
            let Some((last, rest)) = filters.split_last() else {
                return Ok(Matrix::identity(CHANNELS));
            };
            rest.iter()
                .rev()
                .try_fold(last.clone(), |transform, filter| transform.cross(filter))
        }

        /// Recolors the pixel with a 3x3 filter defined in XYZ space:
        /// the RGB channels go through RGB->XYZ, the filter, and XYZ->RGB.
        ///
        /// Any other filter shape is treated as a copunctal point, which has no
        /// recoloring implementation; the pixel is left unchanged. So are pixels
        /// in a colorspace with no conversion to RGB.
        pub fn recolor(&mut self, filter: &Matrix) -> Result<()> {
            if filter.rows() != CHANNELS || filter.cols() != CHANNELS {
                debug!(
                    rows = filter.rows(),
                    cols = filter.cols(),
                    "recoloring based off copunctal points is not supported, pixel unchanged"
                );
                return Ok(());
            }
            self.to_rgb();
            if self.colorspace != Colorspace::Rgb {
                debug!(
                    colorspace = ?self.colorspace,
                    "cannot recolor from this colorspace, pixel unchanged"
                );
                return Ok(());
            }
            let transform = Self::compose(&[
                ColorTransform::RgbToXyz.matrix().clone(),
                filter.clone(),
                ColorTransform::XyzToRgb.matrix().clone(),
            ])?;
            self.channels = Self::apply(&transform, &self.channels);
            Ok(())
        }

        /// Applies `filter x channels` in the current colorspace.
        pub fn filter(&mut self, filter: &Matrix) -> Result<()> {
            let filtered = filter.cross(&self.channels)?;
            if filtered.rows() != CHANNELS || filtered.cols() != 1 {
                return Err(RudimentsError::dimension_mismatch(
                    (filter.rows(), filter.cols()),
                    (self.channels.rows(), self.channels.cols()),
                ));
            }
            self.channels = filtered;
            Ok(())
        }

        /// Applies a chain of filters, `filters[0]` first.
        pub fn filter_chain(&mut self, filters: &[Matrix]) -> Result<()> {
            let transform = Self::compose(filters)?;
            self.filter(&transform)
        }

        /// Packs the pixel back into ARGB. XYZ pixels are converted to RGB on
        /// the fly; each channel is scaled to 0..=255, rounded and clamped. The
        /// alpha byte is the one the pixel was created with.
        pub fn argb(&self) -> Argb {
            let rgb = match self.colorspace {
                Colorspace::Xyz => Self::apply(ColorTransform::XyzToRgb.matrix(), &self.channels),
                _ => self.channels.clone(),
            };
            let pack = |index: usize| -> Argb {
                let value = (rgb.get(index, 0) * 255.0).round();
                if value.is_nan() {
                    0
                } else {
                    value.clamp(0.0, 255.0) as Argb
                }
            };
            (self.argb & ALPHA_MASK) | (pack(0) << 16) | (pack(1) << 8) | pack(2)
        }

        /// The current value of a single channel, 0..=255.
        pub fn channel(&self, channel: Channel) -> Byte {
            channel.of(self.argb())
        }
    }

    impl From<Argb> for Pixel {
        fn from(argb: Argb) -> Self {
            Pixel::new(argb)
        }
    }

    impl From<&Pixel> for Argb {
        fn from(pixel: &Pixel) -> Self {
            pixel.argb()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;
    use crate::core_modules::matrix::Matrix;

    #[test]
    fn argb_round_trip_preserves_every_byte() {
        for &value in &[0x0000_0000u32, 0xff12_3456, 0x80ff_00ff, 0x0130_3132, 0xffff_ffff] {
            assert_eq!(Pixel::new(value).argb(), value);
        }
        for channel in 0..=255u32 {
            let value = 0x7f00_0000 | (channel << 16) | ((255 - channel) << 8) | channel;
            assert_eq!(Pixel::new(value).argb(), value);
        }
    }

    #[test]
    fn channels_are_normalized() {
        let pixel = Pixel::new(0xff_ff_80_00);
        assert_eq!(pixel.channels().get(0, 0), 1.0);
        assert!((pixel.channels().get(1, 0) - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(pixel.channels().get(2, 0), 0.0);
        assert_eq!(pixel.alpha(), 0xff);
        assert_eq!(pixel.channel(Channel::Green), 0x80);
    }

    #[test]
    fn xyz_round_trip_is_close() {
        let original = 0xff_c8_64_32u32;
        let mut pixel = Pixel::new(original);
        pixel.to_xyz();
        assert_eq!(pixel.colorspace(), Colorspace::Xyz);
        // argb() converts on the fly without touching the state
        let packed = pixel.argb();
        assert_eq!(pixel.colorspace(), Colorspace::Xyz);
        pixel.to_rgb();
        assert_eq!(pixel.colorspace(), Colorspace::Rgb);
        for channel in Channel::ALL {
            let diff = channel.of(packed) as i32 - channel.of(original) as i32;
            assert!(diff.abs() <= 1, "{:?} drifted by {}", channel, diff);
            assert!((pixel.channel(channel) as i32 - channel.of(original) as i32).abs() <= 1);
        }
        assert_eq!(packed >> 24, 0xff);
    }

    #[test]
    fn unimplemented_colorspaces_do_not_convert() {
        let mut pixel = Pixel::from_channels([0.1, 0.2, 0.3], Colorspace::Lms, 0xff00_0000);
        pixel.to_rgb();
        pixel.to_xyz();
        assert_eq!(pixel.colorspace(), Colorspace::Lms);
        assert_eq!(pixel.channels(), &Matrix::from_vector(&[0.1, 0.2, 0.3]));
    }

    #[test]
    fn recolor_skips_unconvertible_colorspaces() {
        let tritan = Matrix::from_array([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-0.4, 0.8, 0.0]]);
        for colorspace in [Colorspace::Lms, Colorspace::Hsv] {
            let mut pixel = Pixel::from_channels([0.1, 0.2, 0.3], colorspace, 0xff00_0000);
            pixel.recolor(&tritan).unwrap();
            assert_eq!(pixel.colorspace(), colorspace);
            assert_eq!(pixel.channels(), &Matrix::from_vector(&[0.1, 0.2, 0.3]));
        }
    }

    #[test]
    fn identity_recolor_keeps_color() {
        let mut pixel = Pixel::new(0xff_40_80_c0);
        pixel.recolor(&Matrix::identity(3)).unwrap();
        let packed = pixel.argb();
        for channel in Channel::ALL {
            let diff = channel.of(packed) as i32 - channel.of(0xff_40_80_c0) as i32;
            assert!(diff.abs() <= 1);
        }
    }

    #[test]
    fn non_square_filter_takes_copunctal_path() {
        let mut pixel = Pixel::new(0xff_40_80_c0);
        let point = Matrix::from_vector(&[0.747, 0.253, 0.0]);
        pixel.recolor(&point).unwrap();
        assert_eq!(pixel.argb(), 0xff_40_80_c0);
    }

    #[test]
    fn raw_filter_and_clamping() {
        let mut pixel = Pixel::new(0x80_80_80_80);
        let mut brightened = Matrix::identity(3);
        brightened.multiply(4.0);
        pixel.filter(&brightened).unwrap();
        assert_eq!(pixel.argb(), 0x80_ff_ff_ff);

        let mut negative = Matrix::identity(3);
        negative.multiply(-1.0);
        pixel.filter(&negative).unwrap();
        assert_eq!(pixel.argb(), 0x80_00_00_00);

        assert!(pixel.filter(&Matrix::new(2, 2)).is_err());
    }

    #[test]
    fn compose_applies_first_filter_first() {
        let swap_rg = Matrix::from_array([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let zero_red = Matrix::from_array([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let mut pixel = Pixel::new(0xff_ff_00_00);
        pixel.filter_chain(&[swap_rg, zero_red]).unwrap();
        // red moved into green before red was cleared
        assert_eq!(pixel.argb(), 0xff_00_ff_00);
        assert_eq!(Pixel::compose(&[]).unwrap(), Matrix::identity(3));
    }

    #[test]
    fn transform_table_is_shared() {
        let a = ColorTransform::RgbToXyz.matrix() as *const Matrix;
        let b = ColorTransform::RgbToXyz.matrix() as *const Matrix;
        assert_eq!(a, b);
        let product = ColorTransform::XyzToRgb
            .matrix()
            .cross(ColorTransform::RgbToXyz.matrix())
            .unwrap();
        assert!(product.approx_eq(&Matrix::identity(3)));
    }
}
