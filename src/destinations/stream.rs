//! Console stream destination

use crate::core::{Destination, Result};
use parking_lot::Mutex;
use std::io::Write;

/// Wraps an already open output stream: stdout, stderr, or any writer a
/// caller substitutes (tests usually pass an in-memory buffer).
///
/// The stream belongs to whoever opened it, so `close` only flushes.
pub struct StreamDestination {
    name: String,
    stream: Mutex<Box<dyn Write + Send>>,
}

impl StreamDestination {
    pub fn new(name: impl Into<String>, stream: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            stream: Mutex::new(Box::new(stream)),
        }
    }

    pub fn stdout() -> Self {
        Self::new("stdout", std::io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new("stderr", std::io::stderr())
    }
}

impl Destination for StreamDestination {
    fn write_all(&self, buf: &[u8]) -> Result<()> {
        // One lock per event keeps concurrent events from interleaving
        self.stream.lock().write_all(buf)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.stream.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_reach_substitute() {
        let buffer = Shared::default();
        let destination = StreamDestination::new("stdout", buffer.clone());

        destination.write_all(b"{\"msg\":\"a\"}\n").unwrap();
        destination.write_all(b"{\"msg\":\"b\"}\n").unwrap();
        destination.close().unwrap();

        assert_eq!(
            String::from_utf8(buffer.0.lock().clone()).unwrap(),
            "{\"msg\":\"a\"}\n{\"msg\":\"b\"}\n"
        );
        assert_eq!(destination.name(), "stdout");
    }

    #[test]
    fn test_close_keeps_stream_usable() {
        let buffer = Shared::default();
        let destination = StreamDestination::new("stderr", buffer.clone());

        destination.close().unwrap();
        destination.write_all(b"after\n").unwrap();
        assert_eq!(buffer.0.lock().as_slice(), b"after\n");
    }
}
