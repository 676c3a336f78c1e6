//! In-memory full mesh
//!
//! Stands in for the launching runtime during local runs and tests: one
//! mpsc channel per ordered rank pair, so each (source, destination)
//! conversation keeps FIFO order independently of every other. That is
//! exactly the ordering contract [`Link`] promises. Received chunks are
//! buffered per source, giving `recv_exact` stream semantics over
//! message-shaped channels.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

use super::link::{Link, LinkError};
use crate::topology::Rank;

/// Builder for the per-rank mesh endpoints.
#[derive(Debug)]
pub struct MemoryMesh;

impl MemoryMesh {
    /// Create one endpoint per rank with every ordered pair wired up,
    /// returned in rank order.
    pub fn fully_connected(world_size: usize) -> Vec<MeshLink> {
        let mut outgoing: Vec<Vec<Option<Sender<Vec<u8>>>>> = (0..world_size)
            .map(|_| (0..world_size).map(|_| None).collect())
            .collect();
        let mut incoming: Vec<Vec<Option<Inbox>>> = (0..world_size)
            .map(|_| (0..world_size).map(|_| None).collect())
            .collect();

        for src in 0..world_size {
            for dest in 0..world_size {
                if src == dest {
                    continue;
                }
                let (tx, rx) = mpsc::channel();
                outgoing[src][dest] = Some(tx);
                incoming[dest][src] = Some(Inbox::new(rx));
            }
        }

        outgoing
            .into_iter()
            .zip(incoming)
            .enumerate()
            .map(|(rank, (outgoing, incoming))| MeshLink {
                rank,
                world_size,
                outgoing,
                incoming,
            })
            .collect()
    }
}

/// One rank's endpoint in the in-memory mesh.
#[derive(Debug)]
pub struct MeshLink {
    rank: Rank,
    world_size: usize,
    outgoing: Vec<Option<Sender<Vec<u8>>>>,
    incoming: Vec<Option<Inbox>>,
}

/// Receive side of one ordered pair, with leftover-byte buffering.
#[derive(Debug)]
struct Inbox {
    rx: Receiver<Vec<u8>>,
    pending: VecDeque<u8>,
}

impl Inbox {
    fn new(rx: Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            pending: VecDeque::new(),
        }
    }

    /// Fill `buf` from buffered bytes, pulling whole chunks as needed.
    fn fill(&mut self, src: Rank, buf: &mut [u8]) -> Result<(), LinkError> {
        let mut filled = 0;
        while filled < buf.len() {
            if self.pending.is_empty() {
                // A sender that hangs up mid-conversation surfaces here as
                // a disconnect instead of a deadlock.
                let chunk = self.rx.recv().map_err(|_| LinkError::Disconnected(src))?;
                self.pending.extend(chunk);
                continue;
            }
            let take = self.pending.len().min(buf.len() - filled);
            for byte in self.pending.drain(..take) {
                buf[filled] = byte;
                filled += 1;
            }
        }
        Ok(())
    }
}

impl Link for MeshLink {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn world_size(&self) -> usize {
        self.world_size
    }

    fn send(&mut self, dest: Rank, bytes: &[u8]) -> Result<(), LinkError> {
        let tx = self
            .outgoing
            .get(dest)
            .and_then(Option::as_ref)
            .ok_or(LinkError::UnknownPeer(dest))?;
        tx.send(bytes.to_vec())
            .map_err(|_| LinkError::Disconnected(dest))
    }

    fn recv_exact(&mut self, src: Rank, buf: &mut [u8]) -> Result<(), LinkError> {
        let inbox = self
            .incoming
            .get_mut(src)
            .and_then(Option::as_mut)
            .ok_or(LinkError::UnknownPeer(src))?;
        inbox.fill(src, buf)
    }
}
