//! Configuration loading helpers.
//!
//! The endpoint and timeout come straight from [`GlobalArgs`]; the POST
//! payload fields are layered through `ortho_config` so a configuration file
//! or environment can change the defaults.

use figment::{Figment, providers::Env};
use ortho_config::{
    OrthoMergeExt, load_and_merge_subcommand_for, load_config_file, sanitized_provider,
};
use std::path::Path;
use std::time::Duration;

use crate::EchoError;
use crate::api::{Endpoint, EndpointError};
use crate::cli_args::{GlobalArgs, PostArgs};

/// Names a configuration file to use instead of the discovered ones.
pub const CONFIG_PATH_ENV: &str = "ECHO_CONFIG_PATH";

/// Prefix of the variables that set `post` arguments, e.g. `ECHO_CMDS_POST_NAME`.
pub const POST_ENV_PREFIX: &str = "ECHO_CMDS_POST_";

/// Merge `[cmds.post]` from the configuration file and `ECHO_CMDS_POST_*`
/// variables beneath the values given on the command line.
///
/// The file is the one named by `ECHO_CONFIG_PATH` when that is set;
/// otherwise `.echo.toml` (or json5/yaml) is discovered in the home
/// directory, the XDG config directory and the working directory.
///
/// # Errors
///
/// Returns [`EchoError::Config`] if a configuration source cannot be read or
/// parsed, and [`EchoError::ConfigNotFound`] if `ECHO_CONFIG_PATH` names a
/// missing file.
pub fn load_post_args(cli_args: &PostArgs) -> Result<PostArgs, EchoError> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => load_post_args_from(Path::new(&path), cli_args),
        _ => Ok(load_and_merge_subcommand_for::<PostArgs>(cli_args)?),
    }
}

/// Layer `[cmds.post]` from `path`, then `ECHO_CMDS_POST_*`, then `cli_args`.
///
/// # Errors
///
/// Returns [`EchoError::ConfigNotFound`] when `path` is not a file and
/// [`EchoError::Config`] when it cannot be parsed or merged.
pub fn load_post_args_from(path: &Path, cli_args: &PostArgs) -> Result<PostArgs, EchoError> {
    let file = load_config_file(path)?.ok_or_else(|| EchoError::ConfigNotFound(path.into()))?;
    let merged: PostArgs = Figment::new()
        .merge(file.focus("cmds.post"))
        .merge(Env::prefixed(POST_ENV_PREFIX).split("__"))
        .merge(sanitized_provider(cli_args)?)
        .extract()
        .into_ortho_merge()?;
    Ok(merged)
}

/// Endpoint selected by `--endpoint` / `ECHO_API_URL`, or the built-in one.
///
/// # Errors
///
/// Returns [`EndpointError`] when the override is not an `http(s)` URL.
pub fn resolve_endpoint(global: &GlobalArgs) -> Result<Endpoint, EndpointError> {
    global
        .endpoint
        .as_deref()
        .map_or_else(|| Ok(Endpoint::default()), Endpoint::parse)
}

/// Request timeout, if one was asked for. Zero means no timeout.
#[must_use]
pub fn request_timeout(global: &GlobalArgs) -> Option<Duration> {
    global
        .http_timeout
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
