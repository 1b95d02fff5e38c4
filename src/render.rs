//! Terminal rendering of the view state.
//!
//! The page is drawn top to bottom: title, endpoint panel, the two controls,
//! then the error region and the response region. Each region is only drawn
//! when its backing field is set. Writers take any [`std::io::Write`] so the
//! output can be asserted without capturing stdout.

use std::io::Write;

use termimad::MadSkin;

use crate::api::{Endpoint, Method};
use crate::view::ViewState;

/// Title printed at the top of every frame.
pub const TITLE: &str = "Echo API Test";

/// Control label shown while a request is in flight.
pub const LOADING_LABEL: &str = "Loading...";

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const ERROR_STYLE: &str = "\x1b[1;31m";

/// Something that can draw a [`ViewState`].
pub trait Render {
    /// Draw `state` for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns any error raised while writing the frame.
    fn render(&mut self, state: &ViewState, endpoint: &Endpoint) -> anyhow::Result<()>;
}

/// Text on the trigger control for `method`.
#[must_use]
pub fn control_label(method: Method, loading: bool) -> &'static str {
    match (loading, method) {
        (true, _) => LOADING_LABEL,
        (false, Method::Get) => "GET Request",
        (false, Method::Post) => "POST Request",
    }
}

fn badge_style(method: Method) -> &'static str {
    match method {
        Method::Get => "\x1b[1;30;42m",
        Method::Post => "\x1b[1;30;44m",
    }
}

/// Pretty-print a response payload with two-space indentation.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if the value cannot be serialised.
pub fn format_payload(payload: &serde_json::Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(payload)
}

/// Draws frames to a writer using `termimad` for headings.
pub struct TerminalRenderer<W> {
    out: W,
    skin: MadSkin,
    colour: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer with a default skin and ANSI colour.
    pub fn new(out: W) -> Self {
        Self {
            out,
            skin: MadSkin::default(),
            colour: true,
        }
    }

    /// Renderer that writes no escape sequences.
    pub fn plain(out: W) -> Self {
        Self {
            out,
            skin: MadSkin::no_style(),
            colour: false,
        }
    }

    /// Pick [`TerminalRenderer::plain`] when `plain` is set, else
    /// [`TerminalRenderer::new`].
    pub fn with_plain(out: W, plain: bool) -> Self {
        if plain {
            Self::plain(out)
        } else {
            Self::new(out)
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.colour {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Write `markdown` through the skin, or `plain` verbatim without colour.
    fn write_markdown(&mut self, markdown: &str, plain: &str) -> anyhow::Result<()> {
        if self.colour {
            self.skin
                .write_text_on(&mut self.out, markdown)
                .map_err(anyhow::Error::from)?;
        } else {
            writeln!(self.out, "{plain}")?;
        }
        Ok(())
    }

    fn write_controls(&mut self, state: &ViewState) -> std::io::Result<()> {
        let style = if state.controls_enabled() { BOLD } else { DIM };
        let get = format!("[ {} ]", control_label(Method::Get, state.loading));
        let post = format!("[ {} ]", control_label(Method::Post, state.loading));
        let (get, post) = (self.paint(style, &get), self.paint(style, &post));
        writeln!(self.out, "{get}  {post}")?;
        writeln!(self.out)
    }

    fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        let heading = self.paint(ERROR_STYLE, "Error:");
        writeln!(self.out, "{heading}")?;
        writeln!(self.out, "{message}")?;
        writeln!(self.out)
    }

    fn write_response(
        &mut self,
        payload: &serde_json::Value,
        method: Option<Method>,
    ) -> anyhow::Result<()> {
        let heading = self.paint(BOLD, "API Response:");
        match method {
            Some(m) if self.colour => {
                let badge = self.paint(badge_style(m), &format!(" {m} "));
                writeln!(self.out, "{heading} {badge}")?;
            }
            Some(m) => writeln!(self.out, "{heading} [{m}]")?,
            None => writeln!(self.out, "{heading}")?,
        }
        writeln!(self.out, "{}", format_payload(payload)?)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn render(&mut self, state: &ViewState, endpoint: &Endpoint) -> anyhow::Result<()> {
        self.write_markdown(&format!("# {TITLE}"), TITLE)?;
        self.write_markdown("**API Endpoint:**", "API Endpoint:")?;
        writeln!(self.out, "{endpoint}")?;
        writeln!(self.out)?;
        self.write_controls(state)?;
        if let Some(message) = &state.error {
            self.write_error(message)?;
        }
        if let Some(payload) = &state.response {
            self.write_response(payload, state.last_method)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Drops frames drawn while a request is in flight.
///
/// One-shot commands use this so only the settled result reaches stdout.
pub struct SettledOnly<R>(pub R);

impl<R: Render> Render for SettledOnly<R> {
    fn render(&mut self, state: &ViewState, endpoint: &Endpoint) -> anyhow::Result<()> {
        if state.loading {
            return Ok(());
        }
        self.0.render(state, endpoint)
    }
}
