//! Destination trait for serialized log output

use super::error::Result;

/// One physical sink for fully serialized events.
///
/// Methods take `&self`: overlapping log calls may invoke the same
/// destination concurrently, so implementations synchronize internally.
pub trait Destination: Send + Sync {
    /// Deliver one serialized event.
    fn write_all(&self, buf: &[u8]) -> Result<()>;

    fn flush(&self) -> Result<()>;

    /// Release whatever the destination owns. Destinations that do not own
    /// their sink only flush.
    fn close(&self) -> Result<()> {
        self.flush()
    }

    fn name(&self) -> &str;
}
