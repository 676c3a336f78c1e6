//! Role workers
//!
//! One participant per process. Every role follows the same
//! receive / transform / send shape, dispatched over the closed [`Role`]
//! set: leaves sort, internal ranks merge, the root orchestrates both ends
//! of the pipeline.

mod merge;
mod root;

pub use merge::merge_runs;

use tracing::{debug, debug_span};

use crate::topology::{Role, Topology, ROOT_RANK};
use crate::transport::{Link, Transport};
use crate::{SortError, SortResult};

/// Run this participant's role to completion.
///
/// Only the root consults `input`, and only the root produces a result.
/// The call blocks until the role's part in the pipeline is done; a
/// counterpart that dies mid-exchange surfaces as a transport error rather
/// than a hang.
pub fn run<L: Link>(
    topology: &Topology,
    transport: &mut Transport<L>,
    input: &[u8],
) -> Result<Option<SortResult>, SortError> {
    debug_assert_eq!(
        topology.rank(),
        transport.rank(),
        "topology and link disagree on identity"
    );
    let _span = debug_span!("worker", rank = topology.rank()).entered();
    debug!(%topology, "resolved topology");

    match topology.role() {
        Role::Root => root::run_root(topology, transport, input).map(Some),
        Role::Internal => run_internal(topology, transport).map(|()| None),
        Role::Leaf => run_leaf(topology, transport).map(|()| None),
    }
}

/// Await a partition, sort it, send it up.
fn run_leaf<L: Link>(topology: &Topology, transport: &mut Transport<L>) -> Result<(), SortError> {
    // The flat scatter means the distributing side is always the root,
    // even when the tree parent is an internal rank.
    let mut partition = transport.recv(ROOT_RANK)?;
    debug!(len = partition.len(), "received partition");

    partition.sort_unstable();

    let parent = topology.parent().expect("a leaf always has a parent");
    transport.send(parent, &partition)?;
    debug!(parent, "sent sorted run to parent");
    Ok(())
}

/// Await both child runs, merge, send the result up. Internal ranks take
/// no part in the scatter.
fn run_internal<L: Link>(
    topology: &Topology,
    transport: &mut Transport<L>,
) -> Result<(), SortError> {
    let children = topology
        .children()
        .expect("an internal rank always has children");

    // Each receive blocks on its own channel, so the children may finish
    // in either order without confusing the pairing.
    let left_run = transport.recv(children.left)?;
    let right_run = transport.recv(children.right)?;
    debug!(
        left = left_run.len(),
        right = right_run.len(),
        "received child runs"
    );

    let merged = merge_runs(&left_run, &right_run);

    let parent = topology.parent().expect("an internal rank always has a parent");
    transport.send(parent, &merged)?;
    debug!(parent, len = merged.len(), "forwarded merged run");
    Ok(())
}
