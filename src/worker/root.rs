//! Root orchestrator
//!
//! Reads the input, scatters, awaits the merged result. The scatter is
//! flat: the root sends one partition straight to every leaf, bypassing
//! internal ranks, while the gather walks the full tree back up. The
//! partitioning math below assumes exactly this asymmetry.

use tracing::debug;

use super::merge_runs;
use crate::dataset;
use crate::topology::Topology;
use crate::transport::{Link, Transport};
use crate::{SortError, SortResult};

/// Run the root role to completion.
pub(super) fn run_root<L: Link>(
    topology: &Topology,
    transport: &mut Transport<L>,
    input: &[u8],
) -> Result<SortResult, SortError> {
    let unsorted = dataset::from_bytes(input);

    // A lone participant sorts locally: no padding, no messages.
    if topology.world_size() == 1 {
        let mut sorted = unsorted.clone();
        sorted.sort_unstable();
        debug!(len = sorted.len(), "sorted locally without distribution");
        return Ok(SortResult::new(unsorted, sorted));
    }

    // Pad so every leaf receives an equal-length slice, then scatter in
    // rank order.
    let leaves = topology.leaf_ranks();
    let leaf_count = leaves.len();

    let mut padded = unsorted.clone();
    dataset::pad_with_sentinels(&mut padded, leaf_count);
    debug!(
        leaf_count,
        padding = padded.len() - unsorted.len(),
        "scattering partitions"
    );

    for (slice, leaf) in dataset::partition(&padded, leaf_count).into_iter().zip(leaves) {
        transport.send(leaf, slice)?;
        debug!(leaf, len = slice.len(), "scattered partition");
    }

    // Both child runs are required before the final merge; each receive
    // blocks on its own channel, so the subtrees may finish in any order.
    let children = topology
        .children()
        .expect("a root with peers always has two children");
    let left_run = transport.recv(children.left)?;
    let right_run = transport.recv(children.right)?;
    debug!(
        left = left_run.len(),
        right = right_run.len(),
        "received child runs"
    );

    let merged = merge_runs(&left_run, &right_run);
    let sorted = dataset::strip_sentinels(&merged);
    debug!(len = sorted.len(), "final merge complete");

    Ok(SortResult::new(unsorted, sorted))
}
