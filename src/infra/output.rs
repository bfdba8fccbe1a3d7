use crate::domain::errors::{CopierError, CopierResult};
use flate2::Compression;
use flate2::write::GzEncoder;
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub trait OutputWriter {
    /// Persists `content` and returns the path actually written.
    fn write(&self, content: &str) -> CopierResult<PathBuf>;
}

pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> CopierResult<PathBuf> {
        debug!("Writing output to file: {}", self.path.display());
        fs::write(&self.path, content).map_err(|source| CopierError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("Output written to file: {}", self.path.display());
        Ok(self.path.clone())
    }
}

/// Writes gzip-compressed output next to the requested path, with `.gz` appended.
pub struct GzipWriter {
    path: PathBuf,
}

impl GzipWriter {
    pub fn new(path: PathBuf) -> Self {
        let mut name = OsString::from(path.as_os_str());
        name.push(".gz");
        Self {
            path: PathBuf::from(name),
        }
    }

    fn compress(&self, content: &str) -> CopierResult<Vec<u8>> {
        let compression_error = |source: io::Error| CopierError::Compression {
            path: self.path.clone(),
            source,
        };

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(content.as_bytes())
            .map_err(compression_error)?;
        encoder.finish().map_err(compression_error)
    }
}

impl OutputWriter for GzipWriter {
    fn write(&self, content: &str) -> CopierResult<PathBuf> {
        debug!("Compressing {} bytes of output", content.len());
        let compressed = self.compress(content)?;

        debug!(
            "Writing {} compressed bytes to: {}",
            compressed.len(),
            self.path.display()
        );
        fs::write(&self.path, &compressed).map_err(|source| CopierError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("Compressed output written to file: {}", self.path.display());
        Ok(self.path.clone())
    }
}

pub fn create_writer(output_path: &Path, compress: bool) -> Box<dyn OutputWriter> {
    if compress {
        Box::new(GzipWriter::new(output_path.to_path_buf()))
    } else {
        Box::new(FileWriter::new(output_path.to_path_buf()))
    }
}

pub fn write_output(document: &str, output_path: &Path, compress: bool) -> CopierResult<PathBuf> {
    create_writer(output_path, compress).write(document)
}
