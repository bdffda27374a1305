use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source/target image format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    /// Anything the decoder understands that has no dedicated strategy
    Other,
}

impl ImageFormat {
    /// Map a MIME type (e.g. from an upload form) to a format tag
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => ImageFormat::Png,
            "image/jpeg" | "image/jpg" => ImageFormat::Jpeg,
            "image/webp" => ImageFormat::WebP,
            _ => ImageFormat::Other,
        }
    }

    /// Map a file extension (without the dot, any case) to a format tag
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" | "jpe" => ImageFormat::Jpeg,
            "webp" => ImageFormat::WebP,
            _ => ImageFormat::Other,
        }
    }

    /// Format implied by a path's extension, if it has one
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
    }

    /// Detect the format from magic bytes
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            ImageFormat::Png
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            ImageFormat::Jpeg
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            ImageFormat::WebP
        } else {
            ImageFormat::Other
        }
    }

    /// Format actually written when re-encoding this source format.
    ///
    /// `Other` has no encoder of its own and is written as PNG.
    pub fn encoded_as(self) -> Self {
        match self {
            ImageFormat::Other => ImageFormat::Png,
            format => format,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self.encoded_as() {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            _ => "image/png",
        }
    }

    /// File extension (with dot) for output written in this format
    pub fn extension(self) -> &'static str {
        match self.encoded_as() {
            ImageFormat::Jpeg => ".jpg",
            ImageFormat::WebP => ".webp",
            _ => ".png",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::WebP => "WebP",
            ImageFormat::Other => "Other",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    /// Parse a format name as given on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "webp" => Ok(ImageFormat::WebP),
            "other" => Ok(ImageFormat::Other),
            _ => Err(format!(
                "unknown format '{s}' (expected png, jpeg, webp or other)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(ImageFormat::from_mime("image/png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_mime("image/jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_mime("image/jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_mime("IMAGE/WEBP"), ImageFormat::WebP);
        assert_eq!(ImageFormat::from_mime("image/gif"), ImageFormat::Other);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ImageFormat::from_path(Path::new("photo.JPG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("dir/logo.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("anim.gif")),
            Some(ImageFormat::Other)
        );
        assert_eq!(ImageFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(
            ImageFormat::sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]),
            ImageFormat::Jpeg
        );
        assert_eq!(ImageFormat::sniff(b"RIFF\0\0\0\0WEBPVP8 "), ImageFormat::WebP);
        assert_eq!(ImageFormat::sniff(b"GIF89a"), ImageFormat::Other);
        assert_eq!(ImageFormat::sniff(b""), ImageFormat::Other);
    }

    #[test]
    fn test_other_is_written_as_png() {
        assert_eq!(ImageFormat::Other.encoded_as(), ImageFormat::Png);
        assert_eq!(ImageFormat::Other.extension(), ".png");
        assert_eq!(ImageFormat::Other.mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.encoded_as(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ImageFormat::Png.extension(), ".png");
        assert_eq!(ImageFormat::Jpeg.extension(), ".jpg");
        assert_eq!(ImageFormat::WebP.extension(), ".webp");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JPG".parse::<ImageFormat>(), Ok(ImageFormat::Jpeg));
        assert_eq!("webp".parse::<ImageFormat>(), Ok(ImageFormat::WebP));
        assert!("tiff".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ImageFormat::WebP).unwrap(), "\"webp\"");
        let parsed: ImageFormat = serde_json::from_str("\"jpeg\"").unwrap();
        assert_eq!(parsed, ImageFormat::Jpeg);
    }
}
