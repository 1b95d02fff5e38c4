//! Command-line argument structures.
//!
//! Isolates clap derivations so lint expectations remain scoped, keeping
//! `main.rs` focused on runtime logic.

use clap::{Args, Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::RequestPayload;
use crate::payload::{PayloadError, PostPayload};

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "echo-client",
    version,
    about = "Send GET and POST requests to the echo API and show the JSON response"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    /// Action to run; starts an interactive session when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options that apply to every sub-command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Echo API endpoint; both requests target this exact URL
    #[arg(long, global = true, env = "ECHO_API_URL", value_name = "URL")]
    pub endpoint: Option<String>,
    /// Abort a request after this many seconds (no timeout when omitted)
    #[arg(long, global = true, value_name = "SECS")]
    pub http_timeout: Option<u64>,
    /// Render without colours or styling
    #[arg(long, global = true)]
    pub plain: bool,
}

/// Available sub-commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Send a GET request and print the response
    Get,
    /// Send a POST request and print the response
    Post(PostArgs),
    /// Press keys to trigger GET and POST requests repeatedly
    Interactive,
}

/// Parameters for the POST payload.
///
/// Every field may also come from the environment (`ECHO_CMDS_POST_*`) or the
/// `[cmds.post]` table of the configuration file. The interactive session
/// reads the same table for the payload it sends.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "post")]
#[ortho_config(prefix = "ECHO")]
pub struct PostArgs {
    /// Value of the `name` field [default: 太郎]
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
    /// Value of the `message` field [default: こんにちは]
    #[arg(short = 'm', long, value_name = "MESSAGE")]
    pub message: Option<String>,
    /// JSON object sent instead of the default payload; `--name` and
    /// `--message` still apply on top
    #[arg(long, value_name = "JSON")]
    pub body: Option<String>,
}

impl PostArgs {
    /// Build the request body described by these arguments.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when `body` is not a JSON object.
    pub fn payload(&self) -> Result<RequestPayload, PayloadError> {
        PostPayload::new()
            .body(self.body.clone())
            .name(self.name.clone())
            .message(self.message.clone())
            .build()
    }
}
