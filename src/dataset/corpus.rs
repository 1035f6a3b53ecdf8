use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Raw training text held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    path: PathBuf,
    text: String,
}

impl Corpus {
    /// Read `path` and decode it as UTF-8.
    ///
    /// Invalid UTF-8 is reported as [`io::ErrorKind::InvalidData`] with the offset of
    /// the first bad byte; nothing is replaced or skipped.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} is not valid UTF-8 (first invalid byte at offset {})",
                    path.display(),
                    err.utf8_error().valid_up_to()
                ),
            )
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Size of the encoded text, equal to the size of the file it came from.
    pub fn len_bytes(&self) -> usize {
        self.text.len()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Loaded corpus {} with {} bytes, {} chars, {} lines",
            self.path.display(),
            self.len_bytes(),
            self.char_count(),
            self.line_count()
        )
    }
}
