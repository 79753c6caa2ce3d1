//! Report sinks: where rendered chunks go.
//!
//! A sink receives the document in pieces through [`ReportSink::write`] and
//! the final piece through [`ReportSink::end`]. Any [`io::Write`] can be
//! wrapped in a [`WriterSink`]; a `String` collects the document in memory.

use crate::result::VerdictResult;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Destination for a rendered report
pub trait ReportSink {
    /// Append a chunk of the document
    ///
    /// # Errors
    ///
    /// Returns error if the underlying stream rejects the write
    fn write(&mut self, chunk: &str) -> io::Result<()>;

    /// Append the final chunk and flush
    ///
    /// # Errors
    ///
    /// Returns error if the write or flush fails
    fn end(&mut self, chunk: &str) -> io::Result<()>;
}

impl ReportSink for String {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        self.push_str(chunk);
        Ok(())
    }

    fn end(&mut self, chunk: &str) -> io::Result<()> {
        self.push_str(chunk);
        Ok(())
    }
}

/// Adapts an [`io::Write`] into a [`ReportSink`]
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    #[must_use]
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        self.inner.write_all(chunk.as_bytes())
    }

    fn end(&mut self, chunk: &str) -> io::Result<()> {
        self.inner.write_all(chunk.as_bytes())?;
        self.inner.flush()
    }
}

/// Where a reporter sends its document
pub enum ReportOutput {
    /// Named file; missing parent directories are created before opening
    File(PathBuf),
    /// Caller supplied sink
    Stream(Box<dyn ReportSink + Send>),
    /// Standard output
    Stdout,
}

impl fmt::Debug for ReportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Stdout => f.write_str("Stdout"),
        }
    }
}

impl ReportOutput {
    /// Write to a named file
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Write to a caller supplied sink
    #[must_use]
    pub fn stream(sink: impl ReportSink + Send + 'static) -> Self {
        Self::Stream(Box::new(sink))
    }

    /// Resolve the output into an open sink
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file opened
    pub fn open(self) -> VerdictResult<Box<dyn ReportSink + Send>> {
        match self {
            Self::File(path) => {
                ensure_parent_dir(&path)?;
                debug!(path = %path.display(), "opening report file");
                let file = File::create(&path)?;
                Ok(Box::new(WriterSink::new(BufWriter::new(file))))
            }
            Self::Stream(sink) => Ok(sink),
            Self::Stdout => Ok(Box::new(WriterSink::new(io::stdout()))),
        }
    }
}

/// Create the parent directory of `path`, recursively, if it is missing
///
/// # Errors
///
/// Returns error if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            debug!(dir = %dir.display(), "creating report directory");
            fs::create_dir_all(dir)
        }
        _ => Ok(()),
    }
}
