//! Rental properties and the addresses they occupy.
//!
//! Every letting owns exactly one address. Removing the address removes the
//! letting with it; the reverse link from address to letting is only a lookup.

pub mod domain;
pub(crate) mod handlers;
pub mod repository;
pub mod views;

pub use domain::{Address, Letting, NewAddress, NewLetting};
pub use repository::{LettingRepository, SqliteLettingRepository};
pub use views::{LettingDetailContext, LettingsIndexContext};
