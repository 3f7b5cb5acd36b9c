//! ExtremeCloud IQ special agent.
//!
//! Logs in to the XIQ REST API, pulls devices, radio information and
//! active clients, and writes Checkmk agent sections: global sections for
//! the XIQ host and one piggyback block per access point.

pub mod cli;
pub mod client;
pub mod collect;
pub mod error;
pub mod models;
pub mod output;

pub use cli::Args;
pub use client::{ClientOptions, HttpXiqClient, XiqApi};
pub use collect::{collect, Collection};
pub use error::XiqError;
pub use output::render;
