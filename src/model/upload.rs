use crate::error::UploadError;
use iced::widget::image::Handle;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const EXTENSION_MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("dcm", "application/dicom"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
];

/// Extensions offered by the native picker.
pub const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Media type a file declares through its extension, if it is a known one.
pub fn declared_media_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    EXTENSION_MEDIA_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, media_type)| *media_type)
}

/// A file offered to the upload zone, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub path: PathBuf,
    pub media_type: Option<String>,
    pub size_bytes: u64,
}

impl UploadCandidate {
    pub fn inspect(path: PathBuf) -> Result<Self, UploadError> {
        let metadata = std::fs::metadata(&path).map_err(|err| UploadError::Unreadable {
            path: path.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            media_type: declared_media_type(&path).map(str::to_string),
            size_bytes: metadata.len(),
            path,
        })
    }

    /// Type first, then size.
    pub fn validate(&self, limit_bytes: u64) -> Result<(), UploadError> {
        let is_image = self
            .media_type
            .as_deref()
            .is_some_and(|media_type| media_type.starts_with("image/"));
        if !is_image {
            return Err(UploadError::InvalidType {
                media_type: self.media_type.clone(),
            });
        }

        if self.size_bytes > limit_bytes {
            return Err(UploadError::TooLarge {
                size_bytes: self.size_bytes,
                limit_bytes,
            });
        }

        Ok(())
    }
}

/// An accepted file for the lifetime of one scan session. Dropping it releases
/// the in-memory preview.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub media_type: String,
    pub size_bytes: u64,
    pub preview: Handle,
    pub dimensions: Option<(u32, u32)>,
}

impl UploadedFile {
    pub fn load(candidate: UploadCandidate) -> Result<Self, UploadError> {
        log::info!("Loading preview for {}", candidate.path.display());
        let bytes = std::fs::read(&candidate.path).map_err(|err| {
            let error = UploadError::Unreadable {
                path: candidate.path.clone(),
                reason: err.to_string(),
            };
            log::error!("{error}");
            error
        })?;

        let dimensions = probe_dimensions(&bytes);
        if dimensions.is_none() {
            log::warn!(
                "Unable to read image dimensions of {}; overlays will use the full viewer",
                candidate.path.display()
            );
        }

        Ok(Self {
            path: candidate.path,
            media_type: candidate.media_type.unwrap_or_default(),
            size_bytes: bytes.len() as u64,
            preview: Handle::from_bytes(bytes),
            dimensions,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MAX_UPLOAD_BYTES;
    use std::io::Write;

    fn candidate(name: &str, size_bytes: u64) -> UploadCandidate {
        let path = PathBuf::from(name);
        UploadCandidate {
            media_type: declared_media_type(&path).map(str::to_string),
            size_bytes,
            path,
        }
    }

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(declared_media_type(Path::new("chest.PNG")), Some("image/png"));
        assert_eq!(declared_media_type(Path::new("a/b/scan.jpeg")), Some("image/jpeg"));
        assert_eq!(
            declared_media_type(Path::new("study.dcm")),
            Some("application/dicom")
        );
        assert_eq!(declared_media_type(Path::new("notes.txt")), Some("text/plain"));
        assert_eq!(declared_media_type(Path::new("no_extension")), None);
    }

    #[test]
    fn accepts_image_within_limit() {
        assert_eq!(candidate("xray.jpg", 2 * 1024 * 1024).validate(MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(candidate("xray.png", MAX_UPLOAD_BYTES).validate(MAX_UPLOAD_BYTES), Ok(()));
    }

    #[test]
    fn rejects_oversized_image() {
        let err = candidate("xray.png", 15 * 1024 * 1024)
            .validate(MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(err.to_string(), "File size too large. Max 10MB.");
    }

    #[test]
    fn rejects_non_image_types_before_size() {
        let err = candidate("notes.txt", 15 * 1024 * 1024)
            .validate(MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid file type"));

        let err = candidate("study.dcm", 10).validate(MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, UploadError::InvalidType { .. }));

        let err = candidate("mystery", 10).validate(MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(err, UploadError::InvalidType { media_type: None });
    }

    #[test]
    fn inspect_reads_size_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0u8; 64]).unwrap();

        let candidate = UploadCandidate::inspect(file.path().to_path_buf()).unwrap();
        assert_eq!(candidate.size_bytes, 64);
        assert_eq!(candidate.media_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn inspect_reports_missing_file() {
        let err = UploadCandidate::inspect(PathBuf::from("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, UploadError::Unreadable { .. }));
    }

    #[test]
    fn load_probes_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chest.png");
        image::RgbaImage::new(4, 2).save(&path).unwrap();

        let uploaded = UploadedFile::load(UploadCandidate::inspect(path).unwrap()).unwrap();
        assert_eq!(uploaded.dimensions, Some((4, 2)));
        assert_eq!(uploaded.file_name(), "chest.png");
    }

    #[test]
    fn load_tolerates_undecodable_preview() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"not really a jpeg").unwrap();

        let candidate = UploadCandidate::inspect(file.path().to_path_buf()).unwrap();
        let uploaded = UploadedFile::load(candidate).unwrap();
        assert_eq!(uploaded.media_type, "image/jpeg");
        assert_eq!(uploaded.size_bytes, 17);
        assert_eq!(uploaded.dimensions, None);
    }
}
