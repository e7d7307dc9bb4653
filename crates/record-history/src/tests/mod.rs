//! In-crate tests for record history, run against an in-memory backend.
//!
//! - `harness.rs`     - MemoryBackend fake and TestRepo helper
//! - `lifecycle.rs`   - Opening, initialization and unavailable roots
//! - `store.rs`       - Writes, renames and commit failures
//! - `history.rs`     - Revision listing
//! - `snapshot.rs`    - Historical reconstruction and scratch cleanup
//! - `diff.rs`        - Structural diffs between revisions
//! - `concurrency.rs` - Per-root serialization


#[allow(unused_imports)]
pub use harness::{MemoryBackend, TestRepo};
