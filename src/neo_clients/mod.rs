//! # Neo Clients
//!
//! Client interfaces for talking to Neo N3 nodes.
//!
//! ## Overview
//!
//! The neo_clients module provides the JSON-RPC envelope and the client
//! surface of the SDK:
//!
//! - The [`JsonRpcProvider`] transport trait, the crate's only
//!   suspension point
//! - The bundled [`Http`] transport over `reqwest`
//! - The [`RpcClient`] with typed methods for the RPCs the SDK uses
//! - [`NeoIterator`] for server-side iterator sessions
//! - [`MockProvider`], an in-process transport for tests
//!
//! ## Example
//!
//! ```no_run
//! use neo3_core::neo_clients::{Http, RpcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Http::new("https://testnet1.neo.org:443")?;
//!     let client = RpcClient::new(provider);
//!
//!     let block_count = client.get_block_count().await?;
//!     println!("Current block count: {block_count}");
//!
//!     let version = client.get_version().await?;
//!     println!("Node version: {}", version.user_agent);
//!     Ok(())
//! }
//! ```

pub use errors::{JsonRpcError, ProviderError};
pub use mock_provider::MockProvider;
pub use rpc::*;

mod errors;
mod mock_provider;
mod rpc;
