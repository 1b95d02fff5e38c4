//! Terminal client for the echo API.
//!
//! Two actions, GET and POST, each issue one request to a fixed endpoint and
//! render the JSON response. The library is split the same way the binary
//! runs: [`api`] performs the requests, [`view`] tracks what the user sees and
//! [`render`] draws it.

pub mod api;
pub mod cli_args;
pub mod commands;
pub mod config;
mod error;
pub mod payload;
pub mod render;
pub mod test_utils;
pub mod view;

pub use api::{ApiError, EchoClient, Endpoint, Method, RequestPayload, ResponsePayload};
pub use cli_args::{Cli, Commands, GlobalArgs, PostArgs};
pub use error::EchoError;
pub use render::{Render, TerminalRenderer};
pub use view::{Action, Controller, ViewState};
