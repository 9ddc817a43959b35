//! ADT client implementation
//!
//! - `core`: the `AdtClient<T>` session facade
//! - `config`: session configuration and the lock failure policy
//! - `builder`: `AdtClientBuilder` for construction
//! - `operations`: one module per protocol verb

pub mod builder;
pub mod config;
pub mod core;
pub mod operations;

pub use builder::AdtClientBuilder;
pub use config::{AdtClientConfig, LockFailurePolicy};
pub use self::core::AdtClient;
pub use operations::create::NewObject;
