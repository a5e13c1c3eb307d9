//! Domain models for orgtree.

pub mod node;
