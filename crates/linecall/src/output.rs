//! The output channel.
//!
//! The dispatcher prints exactly two kinds of text: usage/help and error
//! reports. Handlers may print through the same channel via
//! [`Invocation::output`](crate::Invocation::output). Where that text goes is
//! decided once, when the [`Dispatcher`](crate::Dispatcher) is built:
//!
//! - [`StdoutOutput`] - write to standard output
//! - [`FileOutput`] - append to a transcript file
//! - [`BufferOutput`] - collect in memory (tests, embedding)
//! - [`NullOutput`] - discard (the default when nothing is configured)

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A sink for printed text.
pub trait Output {
    /// Prints text without a trailing newline.
    fn print(&self, text: &str);

    /// Prints a line of text.
    fn println(&self, line: &str) {
        self.print(line);
        self.newline();
    }

    /// Prints an empty line break.
    fn newline(&self) {
        self.print("\n");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl Output for NullOutput {
    fn print(&self, _text: &str) {}
}

/// Writes to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn print(&self, text: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // A closed stdout leaves nobody to report to.
        let _ = handle.write_all(text.as_bytes());
        let _ = handle.flush();
    }
}

/// Collects printed text in memory.
///
/// Clones share the same buffer, so one clone can be handed to the
/// dispatcher while another is kept for inspection.
///
/// ```
/// use linecall::{BufferOutput, Output};
///
/// let buffer = BufferOutput::new();
/// let sink = buffer.clone();
/// sink.println("hello");
/// sink.print("wor");
/// sink.print("ld");
/// assert_eq!(buffer.lines(), vec!["hello", "world"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferOutput {
    contents: Rc<RefCell<String>>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything printed so far.
    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }

    /// Returns the printed text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents.borrow().lines().map(String::from).collect()
    }

    /// Empties the buffer.
    pub fn clear(&self) {
        self.contents.borrow_mut().clear();
    }

    /// Returns `true` if nothing has been printed.
    pub fn is_empty(&self) -> bool {
        self.contents.borrow().is_empty()
    }
}

impl Output for BufferOutput {
    fn print(&self, text: &str) {
        self.contents.borrow_mut().push_str(text);
    }
}

/// Appends to a file, creating it if needed.
///
/// Write failures are swallowed; the output channel has no error path.
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    /// Creates a file sink. The parent directory must already exist.
    pub fn new(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, text: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())
    }
}

impl Output for FileOutput {
    fn print(&self, text: &str) {
        if let Err(e) = self.append(text) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write output");
        }
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}
