/// Bounded image picker with previews and per-file errors
///
/// The upload widget accepts up to a fixed number of image files (default
/// 5, 5 MB each), checks size and MIME-type prefix before anything leaves
/// the browser-equivalent, and renders a data-URL preview per accepted
/// file. A bad file is reported individually and never blocks acceptance
/// of the valid files in the same batch.
///
/// # Example
///
/// ```
/// use stockroom_client::picker::ImagePicker;
/// use stockroom_client::types::ImageFile;
///
/// let mut picker = ImagePicker::default();
///
/// let rejected = picker.add_files(vec![ImageFile {
///     file_name: "photo.png".to_string(),
///     mime_type: "image/png".to_string(),
///     bytes: vec![0u8; 64],
/// }]);
///
/// assert!(rejected.is_empty());
/// assert_eq!(picker.files().len(), 1);
/// ```

use crate::types::ImageFile;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Default cap on files per picker
pub const DEFAULT_MAX_FILES: usize = 5;

/// Default per-file size cap in megabytes
pub const DEFAULT_MAX_SIZE_MB: usize = 5;

/// A file the picker refused, with the reason shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedFile {
    /// Original file name
    pub file_name: String,

    /// Why the file was refused
    pub reason: String,
}

/// Image picker state
#[derive(Debug, Clone)]
pub struct ImagePicker {
    max_files: usize,
    max_size_bytes: usize,
    accepted: Vec<ImageFile>,
}

impl Default for ImagePicker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILES, DEFAULT_MAX_SIZE_MB)
    }
}

impl ImagePicker {
    /// Creates a picker with the given caps
    pub fn new(max_files: usize, max_size_mb: usize) -> Self {
        Self {
            max_files,
            max_size_bytes: max_size_mb * 1024 * 1024,
            accepted: Vec::new(),
        }
    }

    /// Currently accepted files, in selection order
    pub fn files(&self) -> &[ImageFile] {
        &self.accepted
    }

    /// Adds a batch of candidate files, returning the per-file rejections
    ///
    /// Valid files are appended to the accepted set, which is then
    /// truncated to the cap. A rejected file never blocks its siblings.
    pub fn add_files(&mut self, files: Vec<ImageFile>) -> Vec<RejectedFile> {
        let max_size_mb = self.max_size_bytes / (1024 * 1024);
        let mut rejected = Vec::new();

        for file in files {
            if file.bytes.len() > self.max_size_bytes {
                rejected.push(RejectedFile {
                    reason: format!(
                        "{} is too large. The maximum size is {}MB.",
                        file.file_name, max_size_mb
                    ),
                    file_name: file.file_name,
                });
                continue;
            }

            if !file.mime_type.starts_with("image/") {
                rejected.push(RejectedFile {
                    reason: format!("{} is not a valid image file.", file.file_name),
                    file_name: file.file_name,
                });
                continue;
            }

            self.accepted.push(file);
        }

        self.accepted.truncate(self.max_files);
        rejected
    }

    /// Removes an accepted file by index; out-of-range indexes are ignored
    pub fn remove(&mut self, index: usize) {
        if index < self.accepted.len() {
            self.accepted.remove(index);
        }
    }

    /// Drops every accepted file
    pub fn clear(&mut self) {
        self.accepted.clear();
    }

    /// Data-URL previews for the accepted files, in order
    pub fn previews(&self) -> Vec<String> {
        self.accepted.iter().map(preview_url).collect()
    }
}

/// Encodes one file as a `data:` URL for inline preview rendering
fn preview_url(file: &ImageFile) -> String {
    format!(
        "data:{};base64,{}",
        file.mime_type,
        STANDARD.encode(&file.bytes)
    )
}
