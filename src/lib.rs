pub mod api;
pub mod config;
pub mod db;
pub mod desk;
pub mod error;
pub mod handlers;
pub mod router;
pub mod types;

pub use error::LacquerError;
pub use router::{LacquerState, lacquer_router};
