#![doc = "The `todolist` library crate."]
#![doc = ""]
#![doc = "Server side: token-based login, the authorization gate, the task routes"]
#![doc = "and the storage backends behind them. Client side: an HTTP client with a"]
#![doc = "durable token store and the application-state controller used by front ends."]
#![doc = "The server binary (`main.rs`) and the `add_user` provisioning tool are"]
#![doc = "thin wrappers around this crate."]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
