//! Command execution helpers for `echo-client`.
//!
//! This module owns the runtime flow for each sub-command: building the
//! client, wiring the controller to a renderer and, for the interactive
//! session, reading keys until the user quits.

use log::info;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::EchoError;
use crate::api::{EchoClient, RequestPayload};
use crate::cli_args::{Cli, Commands, GlobalArgs, PostArgs};
use crate::config::{load_post_args, request_timeout, resolve_endpoint};
use crate::render::{Render, SettledOnly, TerminalRenderer};
use crate::view::{Action, Controller, DispatchError, Outcome};

/// Prompt printed before each key is read in the interactive session.
pub const PROMPT: &str = "(g) GET  (p) POST  (q) quit > ";

/// A key entered in the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Get,
    Post,
    Quit,
}

/// Interpret one line of interactive input.
///
/// Returns `None` for anything that is not a recognised command.
#[must_use]
pub fn parse_key(line: &str) -> Option<Key> {
    match line.trim().to_ascii_lowercase().as_str() {
        "g" | "get" => Some(Key::Get),
        "p" | "post" => Some(Key::Post),
        "q" | "quit" | "exit" => Some(Key::Quit),
        _ => None,
    }
}

/// Build the HTTP client described by the global options.
///
/// # Errors
///
/// Returns [`EchoError::Endpoint`] for an invalid endpoint override and
/// [`EchoError::Client`] if the HTTP client cannot be constructed.
pub fn build_client(global: &GlobalArgs) -> Result<EchoClient, EchoError> {
    let endpoint = resolve_endpoint(global)?;
    info!("using endpoint {endpoint}");
    EchoClient::with_timeout(endpoint, request_timeout(global)).map_err(EchoError::Client)
}

fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Run the parsed command line to completion.
///
/// # Errors
///
/// Returns [`EchoError::RequestFailed`] when a one-shot request fails (the
/// error has already been rendered), or any setup error.
pub async fn run(cli: Cli) -> Result<(), EchoError> {
    let client = build_client(&cli.global)?;
    let plain = cli.global.plain || no_color_requested();
    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Get => {
            let renderer = SettledOnly(TerminalRenderer::with_plain(std::io::stdout(), plain));
            run_once(Controller::new(client, renderer), Action::Get).await
        }
        Commands::Post(args) => {
            let payload = load_post_args(&args)?.payload()?;
            let renderer = SettledOnly(TerminalRenderer::with_plain(std::io::stdout(), plain));
            run_once(Controller::new(client, renderer), Action::Post(payload)).await
        }
        Commands::Interactive => {
            let payload = load_post_args(&PostArgs::default())?.payload()?;
            let renderer = TerminalRenderer::with_plain(std::io::stdout(), plain);
            let mut controller = Controller::new(client, renderer);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            interactive(&mut controller, &payload, stdin, std::io::stdout()).await
        }
    }
}

/// Dispatch a single action and map a failed request to an error exit.
///
/// # Errors
///
/// Returns [`EchoError::RequestFailed`] if the request failed, or a
/// [`DispatchError`] if the result could not be rendered.
pub async fn run_once<R: Render>(
    mut controller: Controller<R>,
    action: Action,
) -> Result<(), EchoError> {
    let method = action.method();
    match controller.dispatch(action).await? {
        Outcome::Succeeded => Ok(()),
        Outcome::Failed => Err(EchoError::RequestFailed(method)),
    }
}

/// Read keys from `input` and dispatch them until `q` or end of input.
///
/// Each line is handled only after the previous request has settled, so the
/// controls stay disabled for as long as a call is in flight. Keys typed
/// during a call are not dropped: they wait in the input buffer and run in
/// order once it settles, which also lets a script pipe several keys in.
///
/// # Errors
///
/// Returns an error if reading input, writing the prompt or rendering fails.
/// Failed requests are shown in the view and do not end the session.
pub async fn interactive<R, I, W>(
    controller: &mut Controller<R>,
    post_payload: &RequestPayload,
    input: I,
    mut prompt: W,
) -> Result<(), EchoError>
where
    R: Render,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    controller.render().map_err(DispatchError::from)?;
    let mut lines = input.lines();
    loop {
        write!(prompt, "{PROMPT}")?;
        prompt.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(prompt)?;
            break;
        };
        match parse_key(&line) {
            Some(Key::Get) => {
                controller.dispatch(Action::Get).await?;
            }
            Some(Key::Post) => {
                controller
                    .dispatch(Action::Post(post_payload.clone()))
                    .await?;
            }
            Some(Key::Quit) => break,
            None if line.trim().is_empty() => {}
            None => writeln!(prompt, "unknown command: {}", line.trim())?,
        }
    }
    Ok(())
}
