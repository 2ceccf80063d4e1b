//! Image handler
//!
//! Images have no text, so reading describes the image instead. Writing takes
//! the content as the path of another image and re-encodes it into the
//! destination format.

use std::path::Path;

use crate::config::Settings;
use crate::errors::Result;

use super::FormatHandler;

const FEATURE: &str = "image";

pub struct ImageHandler;

impl FormatHandler for ImageHandler {
    fn name(&self) -> &'static str {
        "image"
    }

    fn feature(&self) -> Option<&'static str> {
        Some(FEATURE)
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "image")
    }

    fn read(&self, path: &Path, _settings: &Settings) -> Result<String> {
        #[cfg(feature = "image")]
        {
            backend::describe(path)
        }
        #[cfg(not(feature = "image"))]
        {
            let _ = path;
            Err(crate::errors::dependency_missing_error(self.name(), FEATURE))
        }
    }

    fn write(&self, path: &Path, content: &str, _settings: &Settings) -> Result<()> {
        #[cfg(feature = "image")]
        {
            backend::convert(Path::new(content.trim()), path)
        }
        #[cfg(not(feature = "image"))]
        {
            let _ = (path, content);
            Err(crate::errors::dependency_missing_error(self.name(), FEATURE))
        }
    }
}

#[cfg(feature = "image")]
mod backend {
    use std::path::Path;

    use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
    use log::info;

    use crate::errors::{
        Result, io_read_error, not_found_error, read_failure_error, read_failure_message,
        write_failure_error,
    };

    /// Decodes an image, detecting its format from the file's leading bytes
    pub(super) fn open(path: &Path) -> Result<(ImageFormat, DynamicImage)> {
        let reader = ImageReader::open(path)
            .map_err(|e| io_read_error(e, path.to_path_buf()))?
            .with_guessed_format()
            .map_err(|e| io_read_error(e, path.to_path_buf()))?;
        let format = reader
            .format()
            .ok_or_else(|| read_failure_message(path.to_path_buf(), "unknown image format"))?;
        let img = reader
            .decode()
            .map_err(|e| read_failure_error(e, path.to_path_buf(), "cannot decode image"))?;
        Ok((format, img))
    }

    /// One line summary of format, dimensions and colour mode
    pub(super) fn describe(path: &Path) -> Result<String> {
        let (format, img) = open(path)?;
        let (width, height) = img.dimensions();

        Ok(format!(
            "Image format: {}, size: ({width}, {height}), mode: {}",
            format_name(format),
            color_mode(img.color())
        ))
    }

    /// Re-encodes the image at `source` into `target`
    ///
    /// JPEG has no alpha channel, so images written as JPEG are flattened to
    /// RGB first.
    pub(super) fn convert(source: &Path, target: &Path) -> Result<()> {
        if source.as_os_str().is_empty() || !source.is_file() {
            return Err(not_found_error(source.to_path_buf()));
        }

        let (_, img) = open(source)?;

        let img = match ImageFormat::from_path(target) {
            Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgb8(img.to_rgb8()),
            _ => img,
        };

        img.save(target)
            .map_err(|e| write_failure_error(e, target.to_path_buf(), "cannot encode image"))?;

        info!(
            "Converted image from {} to {}",
            source.display(),
            target.display()
        );
        Ok(())
    }

    pub(super) fn format_name(format: ImageFormat) -> String {
        format!("{format:?}").to_uppercase()
    }

    pub(super) fn color_mode(color: ColorType) -> &'static str {
        match color {
            ColorType::L8 | ColorType::L16 => "L",
            ColorType::La8 | ColorType::La16 => "LA",
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => "RGB",
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => "RGBA",
            _ => "UNKNOWN",
        }
    }
}
