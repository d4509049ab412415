// THEORY:
// `image_helper` is the boundary between files on disk and the in-memory grid. It
// decodes any raster format the `image` crate understands, reduces it to 8-bit
// luma for the finder, and renders a highlighted RGB copy once islands are known.

pub mod image_helper {
    use crate::core_modules::grid::Grid;
    use crate::core_modules::island::Island;
    use crate::error::{IslandError, Result};
    use image::codecs::png::PngEncoder;
    use image::{DynamicImage, ImageEncoder, ImageError, Rgb, RgbImage};
    use log::debug;
    use std::fs::File;
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    /// The colour islands are painted with unless configured otherwise.
    pub const DEFAULT_HIGHLIGHT: Rgb<u8> = Rgb([255, 0, 0]);

    /// Decodes the image at `path` and converts it to a grayscale grid.
    /// The decoded image is returned as well so it can be rendered later.
    pub fn load_grid(path: &Path) -> Result<(DynamicImage, Grid)> {
        let image = image::open(path).map_err(|err| decode_error(path, err))?;
        let grid = Grid::from_luma(&image.to_luma8());
        debug!(
            "loaded {} as {}x{} grid",
            path.display(),
            grid.width(),
            grid.height()
        );
        Ok((image, grid))
    }

    /// Returns an RGB copy of `image` with every island pixel set to `color`.
    pub fn render_islands(image: &DynamicImage, islands: &[Island], color: Rgb<u8>) -> RgbImage {
        let mut canvas = image.to_rgb8();
        for cell in islands.iter().flat_map(|island| island.pixels.iter()) {
            // Island cells are (row, col); image pixels are (x, y).
            canvas.put_pixel(cell.col as u32, cell.row as u32, color);
        }
        canvas
    }

    /// Encodes `image` as PNG at `path`.
    pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
        let output = File::create(path).map_err(|err| IslandError::io(path, err))?;
        let mut writer = BufWriter::new(output);

        PngEncoder::new(&mut writer)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|err| encode_error(path, err))?;
        writer.flush().map_err(|err| IslandError::io(path, err))
    }

    fn decode_error(path: &Path, err: ImageError) -> IslandError {
        match err {
            ImageError::IoError(source) => IslandError::io(path, source),
            other => IslandError::UnsupportedFormat(format!("{}: {other}", path.display())),
        }
    }

    /// Writing never depends on the input format, so every failure is an i/o failure.
    pub(crate) fn encode_error(path: &Path, err: ImageError) -> IslandError {
        match err {
            ImageError::IoError(source) => IslandError::io(path, source),
            other => IslandError::io(path, io::Error::other(other)),
        }
    }
}
