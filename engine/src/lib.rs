//! A query execution engine for precomputed, read-only road networks.
//!
//! The graph is loaded once and shared read-only between all worker threads.
//! Each thread owns private, reusable search state (a [`algo::search_context::SearchContext`])
//! and runs synchronous bidirectional shortest-path searches against the shared
//! [`datastr::graph::GraphFacade`].
//! Incoming requests are routed through the [`dispatch::Engine`], which maps a
//! service descriptor to a registered query plugin.

pub mod algo;
pub mod datastr;
pub mod dispatch;
pub mod guidance;
pub mod io;
pub mod util;
