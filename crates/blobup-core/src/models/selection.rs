//! File selection models

use std::io;
use std::path::Path;

use bytes::Bytes;

/// A single file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name sent with the multipart part
    pub name: String,
    /// File contents
    pub data: Bytes,
    /// MIME type of the part, if known
    pub content_type: Option<String>,
}

impl SelectedFile {
    /// Create a file from a name and its contents
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            content_type: None,
        }
    }

    /// Set the MIME type sent with this file
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, named after its final path component
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Path has no file name: {}", path.display()),
                )
            })?;
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(name, data))
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the file has no contents
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered set of files selected for one upload
///
/// Order is preserved all the way to the multipart body. The handler
/// clears the selection at the end of every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
}

impl FileSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the given paths in order into a selection
    pub async fn from_paths<P: AsRef<Path>>(paths: &[P]) -> io::Result<Self> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(SelectedFile::from_path(path).await?);
        }
        Ok(Self { files })
    }

    /// Append a file to the end of the selection
    pub fn push(&mut self, file: SelectedFile) {
        self.files.push(file);
    }

    /// Builder-style variant of [`FileSelection::push`]
    pub fn with_file(mut self, file: SelectedFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Names of the selected files, in selection order
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    /// Sum of all file sizes in bytes
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(SelectedFile::len).sum()
    }

    /// Drop every file from the selection
    pub fn clear(&mut self) {
        self.files.clear();
    }
}

impl FromIterator<SelectedFile> for FileSelection {
    fn from_iter<I: IntoIterator<Item = SelectedFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FileSelection {
    type Item = &'a SelectedFile;
    type IntoIter = std::slice::Iter<'a, SelectedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
