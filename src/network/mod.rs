//! Network layer - HTTP operations against the student records store
//!
//! The Store actor receives store commands and sends back typed responses.

pub mod actor;
pub mod client;

pub use actor::StoreActor;
pub use client::StoreClient;
