//! Client for the management REST API of Vexata storage arrays
//!
//! Each method maps to one HTTPS request against the array: it builds the
//! resource URL, authenticates with HTTP basic auth, sends the JSON payload
//! and checks the response status against the one the operation expects.
//! Records come back as untyped [`serde_json::Value`]s.
//!
//! # Features
//! - Volumes, snapshots and clones
//! - Volume groups and their snapshots
//! - Initiators, initiator groups, port groups and export groups
//! - LUN mapping and hardware queries
//! - Default, custom-CA or disabled certificate verification
//! - Bounded request timeout
//! - Async API using tokio, plus a [`blocking`] facade
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vexata_api::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vexata_api::Error> {
//!     let client = Client::new("array.example.com", "admin", "secret")?;
//!
//!     let volume = client.create_volume("db01", "database", 10240, None).await?;
//!     let vol_id = volume["id"].as_u64().unwrap_or_default();
//!
//!     let snap = client.create_volsnap(vol_id, "db01-nightly", "", None).await?;
//!     println!("Created snapshot {}", snap["id"]);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
mod tls;
pub mod types;

pub use client::{Client, DUMMY_SIZE, NODE_ID, SA_ID};
pub use config::{ClientConfig, TlsVerification};
pub use error::{Error, Result};
pub use types::{ExportTuple, SnapshotMatches, SuccessCode, Verb};
