//! Forces dynamic linking of `sprset`.
//!
//! Enabled through the `dynamic_linking` feature of the root crate to keep
//! incremental builds of the demos and tests fast.

#![allow(clippy::single_component_path_imports)]

#[allow(unused_imports)]
use sprset_internal;
