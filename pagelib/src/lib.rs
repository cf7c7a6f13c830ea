//! # PageLib
//!
//! Pagelib is a library for simulating virtual memory page replacement
//!
//! It provides a frame table with a constant time membership index, the FIFO, LRU and Optimal
//! replacement policies, and a step engine which drives a policy over a reference string one
//! reference at a time, reporting what happened on each step
//!
//! The library never prints. Renderers pull step records from a [`simulator::Simulator`] and
//! decide how to show them

/// Page numbers, as they appear in a reference string
pub type Page = u32;

/// Contains the frame table and its page to slot index
pub mod frame_table;

/// Contains the provided replacement policies, with a trait shared by all of them
pub mod replacement_policies;

/// Contains the step engine and the record it produces for each reference
pub mod engine;

/// Contains the simulator used to run a policy over a whole reference string
pub mod simulator;

/// Contains run statistics and policy comparisons
pub mod summary;

/// Contains definitions for the JSON input format and the input bounds
pub mod config;

/// Contains the error type for configuration and input handling
pub mod error;

/// Contains reference string parsing and generation
pub mod reference;

/// Contains the reader used for reference files
pub mod io;


/// Contains utilities for running tests and benchmarks.
pub mod util;
