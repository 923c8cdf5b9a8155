#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `sprset-rs` reads and writes versioned sprite set containers and their
//! companion index files.
//!
pub use sprset_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use sprset_dylib;
