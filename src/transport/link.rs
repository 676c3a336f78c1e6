//! Raw point-to-point link
//!
//! The pipeline assumes a reliable, in-order, blocking byte channel between
//! every pair of ranks (think an MPI runtime, or TCP on a quiet fabric).
//! This trait is the seam where that collaborator plugs in; the framing
//! discipline lives one layer up in [`Transport`](super::Transport).

use thiserror::Error;

use crate::topology::Rank;

/// Errors surfaced by a raw link.
///
/// Every variant is fatal for the local worker: the channel is assumed
/// reliable, so a failure here means the conversation cannot continue.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The named rank has no channel on this link.
    #[error("rank {0} is not reachable on this link")]
    UnknownPeer(Rank),

    /// The counterpart went away before the transfer completed.
    #[error("channel with rank {0} closed before the transfer completed")]
    Disconnected(Rank),
}

/// Reliable, in-order, blocking point-to-point byte channel, plus the
/// process identity handed out by the launching runtime.
///
/// Within one (source, destination) pair, delivery order matches send
/// order; nothing is guaranteed across pairs. `recv_exact` must fill the
/// buffer completely or fail, so a partial read is indistinguishable from
/// a broken channel under this contract.
pub trait Link {
    /// This participant's rank.
    fn rank(&self) -> Rank;

    /// Total number of participants.
    fn world_size(&self) -> usize;

    /// Deliver `bytes` to `dest`. May buffer; never blocks on the receiver.
    fn send(&mut self, dest: Rank, bytes: &[u8]) -> Result<(), LinkError>;

    /// Block until exactly `buf.len()` bytes from `src` have arrived.
    fn recv_exact(&mut self, src: Rank, buf: &mut [u8]) -> Result<(), LinkError>;
}
