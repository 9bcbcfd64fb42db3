use std::path::Path;

use bytes::Bytes;

use crate::error::ImageError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub bytes: Bytes,
    pub filename: String,
    /// Declared media type, guessed from the file extension.
    pub media_type: String,
}

impl ImageFile {
    pub fn new(bytes: impl Into<Bytes>, filename: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self { bytes: bytes.into(), filename: filename.into(), media_type: media_type.into() }
    }

    pub async fn load(path: &Path) -> Result<Self, ImageError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
            .ok_or_else(|| ImageError::NoFileName(path.display().to_string()))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ImageError::Read { path: path.display().to_string(), source })?;
        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(bytes, filename, media_type))
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn load_guesses_media_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latte.png");
        std::fs::File::create(&path).unwrap().write_all(b"\x89PNG fake").unwrap();

        let img = ImageFile::load(&path).await.unwrap();
        assert_eq!(img.filename, "latte.png");
        assert_eq!(img.media_type, "image/png");
        assert_eq!(&img.bytes[..], b"\x89PNG fake");
        assert!(img.is_image());
    }

    #[tokio::test]
    async fn unknown_extension_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.unknownext");
        std::fs::write(&path, b"hello").unwrap();

        let img = ImageFile::load(&path).await.unwrap();
        assert_eq!(img.media_type, "application/octet-stream");
        assert!(!img.is_image());
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let err = ImageFile::load(Path::new("/definitely/not/here.jpg")).await.unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.jpg"));
    }
}
