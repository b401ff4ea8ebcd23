//! Capturing `tracing` output emitted while a closure runs.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns its result together
/// with the plain-text events logged at `INFO` or above.
///
/// # Examples
///
/// ```
/// use openapi_cases_test_helpers::logs;
///
/// let ((), output) = logs::capture(|| tracing::info!(module = "foo", "checked"));
/// assert!(output.contains("checked"));
/// assert!(output.contains("module="));
/// ```
#[must_use]
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&sink.0.lock()).into_owned();
    (result, output)
}
