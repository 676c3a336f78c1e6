//! # Distributed Binary-Tree Sort
//!
//! This library sorts a byte dataset across a complete binary tree of
//! cooperating workers exchanging size-prefixed messages.
//!
//! ## Pipeline
//!
//! 1. **Topology**: every rank derives its role (root / internal / leaf)
//!    and neighbors purely from `(rank, world_size)`
//! 2. **Scatter**: the root pads the dataset with sentinels, splits it into
//!    equal partitions, and sends one straight to every leaf
//! 3. **Gather**: leaves sort locally; each internal rank merges its two
//!    children's runs; the root's final merge yields the sorted dataset
//!
//! The scatter is flat while the gather walks the tree, so the number of
//! merge rounds grows with the tree height, not the leaf count.
//!
//! ## Usage Example
//!
//! ```
//! use treesort::{SortConfig, TreeSorter};
//!
//! let config = SortConfig::with_world_size(7).unwrap();
//! let result = TreeSorter::new(config).run(&[5, 3, 9, 1, 8, 2, 7, 4]).unwrap();
//! assert_eq!(result.sorted(), &[1, 2, 3, 4, 5, 7, 8, 9]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules - each owns one stage of the pipeline
pub mod dataset;   // Values, sentinel padding, partitioning
pub mod topology;  // Rank-to-role derivation
pub mod transport; // Size-prefixed messaging over raw links
pub mod worker;    // Per-role pipeline steps

// Re-exports for convenience
pub use dataset::{Value, SENTINEL};
pub use topology::{ChildPair, Rank, Role, Topology, ROOT_RANK};
pub use transport::{Link, LinkError, MemoryMesh, MeshLink, Transport, TransportError};
pub use worker::merge_runs;

use std::io::{self, Write};
use std::thread;

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while driving the sort pipeline.
#[derive(Error, Debug)]
pub enum SortError {
    /// The participant count cannot lay out a complete tree.
    #[error("invalid world size {0}: children come in pairs, so the participant count must be odd")]
    InvalidWorldSize(usize),

    /// A message exchange failed; fatal for the whole run.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A worker thread panicked instead of reporting an error.
    #[error("worker thread for rank {0} panicked")]
    WorkerPanicked(Rank),
}

/// Pipeline parameters, validated at construction.
#[derive(Debug, Clone)]
pub struct SortConfig {
    world_size: usize,
}

impl SortConfig {
    /// Configure a run with `world_size` participants.
    ///
    /// Children come in `{2r+1, 2r+2}` pairs, so only odd counts form a
    /// complete tree; any other count would leave a worker waiting forever
    /// on a rank that does not exist.
    pub fn with_world_size(world_size: usize) -> Result<Self, SortError> {
        if world_size == 0 || world_size % 2 == 0 {
            return Err(SortError::InvalidWorldSize(world_size));
        }
        Ok(Self { world_size })
    }

    /// Number of participants.
    pub fn world_size(&self) -> usize {
        self.world_size
    }
}

/// Outcome of a full pipeline run, sentinels already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortResult {
    unsorted: Vec<Value>,
    sorted: Vec<Value>,
}

impl SortResult {
    pub(crate) fn new(unsorted: Vec<Value>, sorted: Vec<Value>) -> Self {
        Self { unsorted, sorted }
    }

    /// The input exactly as read, before padding.
    pub fn unsorted(&self) -> &[Value] {
        &self.unsorted
    }

    /// The fully sorted dataset, padding removed.
    pub fn sorted(&self) -> &[Value] {
        &self.sorted
    }

    /// Write the run's output: optionally a space-separated echo of the
    /// unsorted input, then one sorted value per line.
    ///
    /// An empty dataset emits nothing at all, not even a blank echo line,
    /// so a missing input yields zero output lines.
    pub fn emit<W: Write>(&self, out: &mut W, echo_unsorted: bool) -> io::Result<()> {
        if echo_unsorted && !self.unsorted.is_empty() {
            let echo: Vec<String> = self.unsorted.iter().map(|v| v.to_string()).collect();
            writeln!(out, "{}", echo.join(" "))?;
        }
        for value in &self.sorted {
            writeln!(out, "{}", value)?;
        }
        Ok(())
    }
}

/// Main pipeline orchestrator
///
/// Runs one scoped thread per rank over an in-memory mesh. Deploying
/// across real OS processes only swaps the [`Link`] implementation;
/// topology, framing, and the role workers stay identical.
#[derive(Debug)]
pub struct TreeSorter {
    config: SortConfig,
}

impl TreeSorter {
    /// Create a sorter for a validated configuration.
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    /// Sort `input`, returning the root's result.
    ///
    /// Any single failure (transport error or panic) fails the whole run;
    /// there is no partial output.
    pub fn run(&self, input: &[u8]) -> Result<SortResult, SortError> {
        let world_size = self.config.world_size;
        debug!(world_size, input_len = input.len(), "starting pipeline");

        let links = MemoryMesh::fully_connected(world_size);

        let outcomes: Vec<Result<Option<SortResult>, SortError>> = thread::scope(|scope| {
            let handles: Vec<_> = links
                .into_iter()
                .map(|link| {
                    // Only the root reads the input.
                    let input = if link.rank() == ROOT_RANK { input } else { &[] };
                    scope.spawn(move || {
                        // A worker's only startup knowledge is the identity
                        // pair its transport reports.
                        let mut transport = Transport::new(link);
                        let topology =
                            Topology::resolve(transport.rank(), transport.world_size());
                        worker::run(&topology, &mut transport, input)
                    })
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(rank, handle)| match handle.join() {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SortError::WorkerPanicked(rank)),
                })
                .collect()
        });

        let mut result = None;
        for outcome in outcomes {
            if let Some(report) = outcome? {
                result = Some(report);
            }
        }
        Ok(result.expect("the root worker always reports a result"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size_validation() {
        assert!(SortConfig::with_world_size(1).is_ok());
        assert!(SortConfig::with_world_size(7).is_ok());
        assert!(matches!(
            SortConfig::with_world_size(0),
            Err(SortError::InvalidWorldSize(0))
        ));
        assert!(matches!(
            SortConfig::with_world_size(6),
            Err(SortError::InvalidWorldSize(6))
        ));
    }

    #[test]
    fn test_emit_echo_then_one_value_per_line() {
        let result = SortResult::new(vec![3, 1, 2], vec![1, 2, 3]);

        let mut out = Vec::new();
        result.emit(&mut out, true).unwrap();
        assert_eq!(out, b"3 1 2\n1\n2\n3\n");

        let mut quiet = Vec::new();
        result.emit(&mut quiet, false).unwrap();
        assert_eq!(quiet, b"1\n2\n3\n");
    }

    #[test]
    fn test_emit_of_empty_result_is_silent() {
        let result = SortResult::new(Vec::new(), Vec::new());
        let mut out = Vec::new();
        result.emit(&mut out, true).unwrap();
        assert!(out.is_empty());
    }
}
