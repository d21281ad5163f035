//! Client for the experiment-tracking service's GraphQL API.
//!
//! Every call is parameterized by a caller-supplied API key; the client
//! itself holds no credentials. Authentication failures surface as
//! [`error::TrackerError::InvalidCredential`], distinct from transport
//! faults, so the HTTP layer can map them to 401 without guessing.

pub mod client;
pub mod error;
pub mod types;

pub use client::TrackerClient;
pub use error::TrackerError;
