use std::path::PathBuf;

use crate::backend::ImageKind;
use crate::blocks::Block;
use crate::document::Document;
use crate::error::Error;

/// Anchor for a floating [`Logo`], measured from the matching margins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogoPosition {
    #[default]
    TopLeft,
    TopRight,
    TopCenter,
}

/// An image painted at a fixed page position, floating above the flow.
///
/// Set either `image_path` (a PNG/JPEG file on disk) or `image_data` (raw
/// bytes; takes precedence when both are set). This is the one block that
/// never moves the vertical cursor.
#[derive(Clone, Debug, Default)]
pub struct Logo {
    pub image_path: Option<PathBuf>,
    pub image_data: Option<Vec<u8>>,
    /// mm; must be positive.
    pub width: f64,
    /// mm; 0 keeps the image's aspect ratio.
    pub height: f64,
    pub position: LogoPosition,
    /// Additional X offset in mm.
    pub offset_x: f64,
    /// Additional Y offset in mm.
    pub offset_y: f64,
}

impl Block for Logo {
    fn kind(&self) -> &'static str {
        "Logo"
    }

    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        let data = self.image_data.as_deref().filter(|d| !d.is_empty());
        if self.image_path.is_none() && data.is_none() {
            return Err(Error::Config(
                "logo requires an image path or image data".into(),
            ));
        }
        if self.width <= 0.0 {
            return Err(Error::Config("logo width must be positive".into()));
        }

        let (page_w, _) = doc.backend_ref().page_size();
        let margins = doc.margins();

        let x = match self.position {
            LogoPosition::TopRight => page_w - margins.right - self.width + self.offset_x,
            LogoPosition::TopCenter => (page_w - self.width) / 2.0 + self.offset_x,
            LogoPosition::TopLeft => margins.left + self.offset_x,
        };
        let y = margins.top + self.offset_y;

        let saved_y = doc.y();

        let name = match data {
            Some(bytes) => {
                let name = doc.next_image_name();
                doc.backend()
                    .register_image(&name, bytes, detect_image_kind(bytes))
                    .map_err(Error::Backend)?;
                name
            }
            None => {
                // Registration is keyed by the path so repeated logos reuse
                // the already-embedded image.
                let path = self.image_path.as_ref().unwrap();
                let bytes = std::fs::read(path)?;
                let name = path.to_string_lossy().into_owned();
                doc.backend()
                    .register_image(&name, &bytes, detect_image_kind(&bytes))
                    .map_err(Error::Backend)?;
                name
            }
        };

        doc.backend()
            .image(&name, x, y, self.width, self.height)
            .map_err(Error::Backend)?;

        // Logos do not participate in the content flow.
        doc.set_y(saved_y);
        Ok(())
    }
}

/// Unrecognized data falls through as PNG so the backend surfaces the decode
/// failure as its own error.
fn detect_image_kind(data: &[u8]) -> ImageKind {
    match image::guess_format(data) {
        Ok(image::ImageFormat::Jpeg) => ImageKind::Jpeg,
        _ => ImageKind::Png,
    }
}
