// Raw buffer <-> file helpers shared by the pixmap layer. Pixels travel as
// packed ARGB `u32`s inside the crate and as RGBA bytes at the codec boundary.

pub mod image_helper {
    use crate::error::Result;
    use image::ImageEncoder;
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::Path;
    use tracing::info;

    /// Decoded image: dimensions plus row-major packed ARGB values.
    pub struct ArgbBuffer {
        pub width: u32,
        pub height: u32,
        pub pixels: Vec<u32>,
    }

    /// Decodes any format the `image` crate understands and normalizes it to ARGB.
    pub fn load(path: &Path) -> Result<ArgbBuffer> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|p| rgba_to_argb(p.0)).collect();
        info!(path = %path.display(), width, height, "read image");
        Ok(ArgbBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Encodes an RGBA byte buffer as PNG.
    pub fn save(path: &Path, width: u32, height: u32, buffer: &[u8]) -> Result<()> {
        let output = BufWriter::new(File::create(path)?);
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(buffer, width, height, image::ExtendedColorType::Rgba8)?;
        info!(path = %path.display(), width, height, "wrote png");

        Ok(())
    }

    pub fn rgba_to_argb([r, g, b, a]: [u8; 4]) -> u32 {
        (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    pub fn argb_to_rgba(argb: u32) -> [u8; 4] {
        [
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {

    use super::image_helper::*;

    #[test]
    fn save_white_file() {
        let dir = tempfile::tempdir().expect("Create temp dir");
        let height = 50u32;
        let width = 80u32;
        let buffer_size = (width * height * 4) as usize;
        let buffer = vec![255u8; buffer_size];
        let name = dir.path().join("white_file.png");

        save(&name, width, height, &buffer).expect("Error Saving File.");

        let loaded = load(&name).expect("Error Loading File.");
        assert_eq!((loaded.width, loaded.height), (width, height));
        assert!(loaded.pixels.iter().all(|&p| p == 0xffff_ffff));
    }

    #[test]
    fn save_gradient_file() {
        let dir = tempfile::tempdir().expect("Create temp dir");
        let height = 16u32;
        let width = 16u32;
        let buffer_size = (width * height * 4) as usize;
        let mut buffer = vec![255u8; buffer_size];
        let name = dir.path().join("gradient_file.png");
        let mut intensity = 0;

        for i in buffer.chunks_mut(4) {
            i[0] = intensity;
            i[1] = intensity;
            i[2] = intensity;
            intensity += 1;
            intensity %= 255;
        }

        save(&name, width, height, &buffer).expect("Error Saving File.");

        let loaded = load(&name).expect("Error Loading File.");
        assert_eq!(loaded.pixels[0], 0xff00_0000);
        assert_eq!(loaded.pixels[17], 0xff11_1111);
    }

    #[test]
    fn argb_byte_order() {
        assert_eq!(rgba_to_argb([0x12, 0x34, 0x56, 0x78]), 0x7812_3456);
        assert_eq!(argb_to_rgba(0x7812_3456), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("Create temp dir");
        assert!(load(&dir.path().join("nope.png")).is_err());
    }
}
