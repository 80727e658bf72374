//! Lookup shortlist bookkeeping.
//!
//! The pure half of the iterative nearest-node search: which candidates are
//! known, which have been queried, and whether a round made progress. The
//! async driver lives in `service::lookup`.

mod shortlist;

pub use shortlist::LookupShortlist;
