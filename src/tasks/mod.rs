//! Background tasks for the explorer.
//!
//! # Available Tasks
//!
//! - [`poller::Poller`] - Re-runs a fetch on a fixed interval until cancelled
//!
//! # Usage
//!
//! Pollers are started by the watcher and stop when their [`poller::PollHandle`]
//! is cancelled or dropped.

pub mod poller;
