//! Size-prefixed message transport
//!
//! Partition sizes vary run to run, so the receiver cannot know how much to
//! allocate until it is told. Every payload therefore travels behind an
//! explicit element count on the same channel. Frame layout, little-endian:
//!
//! ```text
//! | count: u32 | count x value: i32 |
//! ```
//!
//! An empty payload is still a frame (a zero count), which keeps the
//! receive loop uniform for ranks whose partition happens to be empty.

mod link;
mod memory;

pub use link::{Link, LinkError};
pub use memory::{MemoryMesh, MeshLink};

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

use crate::dataset::Value;
use crate::topology::Rank;

/// Bytes in the length prefix.
const PREFIX_LEN: usize = std::mem::size_of::<u32>();

/// Bytes per encoded element.
const VALUE_LEN: usize = std::mem::size_of::<Value>();

/// Errors raised by the framing layer. All fatal: no retry, no partial
/// results.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The payload holds more elements than the length prefix can count.
    #[error("payload of {0} values exceeds the length prefix")]
    PayloadTooLarge(usize),

    /// The underlying link failed mid-exchange.
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Size-prefixed point-to-point messaging over any raw [`Link`].
#[derive(Debug)]
pub struct Transport<L: Link> {
    link: L,
}

impl<L: Link> Transport<L> {
    /// Wrap a raw link.
    pub fn new(link: L) -> Self {
        Self { link }
    }

    /// This participant's rank, as reported by the link.
    pub fn rank(&self) -> Rank {
        self.link.rank()
    }

    /// Total number of participants.
    pub fn world_size(&self) -> usize {
        self.link.world_size()
    }

    /// Transmit the element count, then the payload.
    pub fn send(&mut self, dest: Rank, values: &[Value]) -> Result<(), TransportError> {
        let count = u32::try_from(values.len())
            .map_err(|_| TransportError::PayloadTooLarge(values.len()))?;

        let mut prefix = [0u8; PREFIX_LEN];
        LittleEndian::write_u32(&mut prefix, count);
        self.link.send(dest, &prefix)?;

        let mut payload = vec![0u8; values.len() * VALUE_LEN];
        LittleEndian::write_i32_into(values, &mut payload);
        self.link.send(dest, &payload)?;
        Ok(())
    }

    /// Read the element count from `src`, then exactly that many elements.
    pub fn recv(&mut self, src: Rank) -> Result<Vec<Value>, TransportError> {
        let mut prefix = [0u8; PREFIX_LEN];
        self.link.recv_exact(src, &mut prefix)?;
        let count = LittleEndian::read_u32(&prefix) as usize;

        let mut payload = vec![0u8; count * VALUE_LEN];
        self.link.recv_exact(src, &mut payload)?;

        let mut values = vec![0; count];
        LittleEndian::read_i32_into(&payload, &mut values);
        Ok(values)
    }
}
