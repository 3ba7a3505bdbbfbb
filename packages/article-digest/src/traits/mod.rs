//! Core trait abstractions.
//!
//! Every collaborator the lifecycle manager talks to sits behind one of these
//! traits so tests can swap in the doubles from [`crate::testing`].

pub mod ai;
pub mod content;
pub mod fetcher;
pub mod store;
pub mod transcripts;
