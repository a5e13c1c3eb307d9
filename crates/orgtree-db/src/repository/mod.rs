//! SurrealDB repository implementations.

mod node;

pub use node::SurrealNodeRepository;
