//! Data structures used by the query algorithms.

pub mod graph;
pub mod query_heap;
