//! Bind dynamically typed JSON value trees to statically declared Rust types.
//!
//! The [`bind`] module holds the conversion engine: the ordered [`bind::Value`] tree,
//! per-type descriptors, the creator registry and type-tag resolver used for
//! polymorphic fields, and the symmetric decode/encode walks.

/// Value tree, descriptors, creators and the decode/encode engines.
pub mod bind;
