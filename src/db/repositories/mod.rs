//! Repository backend implementations.

pub mod local;

pub use local::LocalRepository;
