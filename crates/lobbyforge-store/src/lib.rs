//! Persistent storage for players and rooms.
//!
//! The membership engine never talks to a database directly. It goes
//! through the [`Repository`] trait, which describes a document store with
//! per-document atomic updates and nothing more: there are no
//! multi-document transactions in this contract.
//!
//! # How it fits in the stack
//!
//! ```text
//! Room Layer (above)  ← orchestrates multi-step updates and rollbacks
//!     ↕
//! Store Layer (this crate)  ← single-document reads, writes, scans
//!     ↕
//! Protocol Layer (below)  ← provides Player, Room, ids
//! ```
//!
//! [`InMemoryRepository`] is a complete implementation backed by two hash
//! maps, used by tests, the demo, and single-process deployments.

mod error;
mod memory;
mod repository;

pub use error::StoreError;
pub use memory::InMemoryRepository;
pub use repository::Repository;
