use crate::models::error::SError;
use camino::{Utf8Path, Utf8PathBuf};
use sevenz_rust::{Password, SevenZReader};
use std::fs::File;
use std::io::{self, Read};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    SevenZ,
}

impl ArchiveFormat {
    /// Detects the backend from the file extension. Anything that is not `.7z` is tried as zip.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("7z") => Self::SevenZ,
            _ => Self::Zip,
        }
    }
}

/// One entry of an open archive, readable as its decompressed content.
pub struct ArchiveEntry<'a> {
    /// Entry path as stored, with backslashes turned into forward slashes.
    pub name: String,
    pub is_dir: bool,
    reader: &'a mut dyn Read,
}

impl Read for ArchiveEntry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

enum Backend {
    Zip(zip::ZipArchive<File>),
    SevenZ(SevenZReader<File>),
}

/// An opened mod archive. The file handle is released once
/// [`Archive::for_each_entry`] returns, on success or error.
pub struct Archive {
    path: Utf8PathBuf,
    backend: Backend,
}

impl Archive {
    pub fn open(path: &Utf8Path) -> Result<Self, SError> {
        let backend = match ArchiveFormat::from_path(path) {
            ArchiveFormat::Zip => {
                let file = File::open(path).map_err(|e| SError::archive_open(path, e))?;
                Backend::Zip(zip::ZipArchive::new(file).map_err(|e| SError::archive_open(path, e))?)
            }
            ArchiveFormat::SevenZ => Backend::SevenZ(
                SevenZReader::open(path, Password::empty()).map_err(|e| SError::archive_open(path, e))?,
            ),
        };

        debug!("opened archive {path}");
        Ok(Self {
            path: path.to_owned(),
            backend,
        })
    }

    /// Visits every entry in archive order.
    ///
    /// An entry whose header cannot be read is passed to `visit` as an
    /// [`SError::ArchiveRead`] and the scan moves on. An error that stops
    /// enumeration altogether is returned as [`SError::ArchiveOpen`].
    pub fn for_each_entry<F>(self, mut visit: F) -> Result<(), SError>
    where
        F: FnMut(Result<ArchiveEntry<'_>, SError>),
    {
        let Self { path, backend } = self;

        match backend {
            Backend::Zip(mut archive) => {
                for i in 0..archive.len() {
                    match archive.by_index(i) {
                        Ok(mut file) => {
                            let name = normalize_separators(file.name());
                            let is_dir = file.is_dir() || name.ends_with('/');
                            visit(Ok(ArchiveEntry {
                                name,
                                is_dir,
                                reader: &mut file,
                            }));
                        }
                        Err(e) => visit(Err(SError::archive_read(format!("#{i}"), e))),
                    }
                }
                Ok(())
            }
            Backend::SevenZ(mut archive) => archive
                .for_each_entries(|entry, reader| {
                    visit(Ok(ArchiveEntry {
                        name: normalize_separators(entry.name()),
                        is_dir: entry.is_directory(),
                        reader: &mut *reader,
                    }));
                    // Solid blocks share one stream: skip whatever the visitor left unread.
                    let _ = io::copy(reader, &mut io::sink());
                    Ok(true)
                })
                .map_err(|e| SError::archive_open(&path, e)),
        }
    }
}

fn normalize_separators(name: &str) -> String {
    name.replace('\\', "/")
}
