//! Client for the remote process management REST API.
//!
//! The API lives under `{server}/rest/api/v1` and exposes:
//!
//! - `GET  /process/list/status` - list processes with their state
//! - `POST /process/{id}/{action}` - start, stop or restart a process
//!
//! Every request carries the `api_key` header.
//!
//! # Example
//!
//! ```no_run
//! use senta_client::{ProcessAction, RemoteClient};
//!
//! # async fn run() -> senta_client::Result<()> {
//! let client = RemoteClient::new("https://astra.local:8080", "secret");
//! for process in client.list_processes().await? {
//!     println!("{} active={}", process.name, process.is_active);
//! }
//! let result = client.perform_action(ProcessAction::Restart, 3).await?;
//! println!("{}", result.message);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::{ProcessApi, RemoteClient, PROCESS_NOT_FOUND_BODY};
pub use error::{RemoteError, Result};
pub use models::{ActionResult, ProcessAction, RemoteProcess};
