//! Helpers shared by unit and integration tests.

use regex::Regex;
use std::sync::LazyLock;

use crate::api::Endpoint;
use crate::render::Render;
use crate::view::ViewState;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[@-~]").expect("valid regex"));

/// Remove ANSI CSI escape sequences from terminal output.
///
/// # Examples
///
/// ```
/// use echo_client::test_utils::strip_ansi_codes;
/// assert_eq!(strip_ansi_codes("\x1b[1;30;42m GET \x1b[0m"), " GET ");
/// ```
#[must_use]
pub fn strip_ansi_codes(input: &str) -> String {
    ANSI_RE.replace_all(input, "").into_owned()
}

/// Renderer that keeps a copy of every state it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<ViewState>,
}

impl Render for RecordingRenderer {
    fn render(&mut self, state: &ViewState, _endpoint: &Endpoint) -> anyhow::Result<()> {
        self.frames.push(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::strip_ansi_codes;
    use rstest::rstest;

    #[rstest]
    #[case("\x1b[2m[ Loading... ]\x1b[0m", "[ Loading... ]")]
    #[case("plain", "plain")]
    #[case("\x1b[?25lhidden cursor", "hidden cursor")]
    fn strips_sequences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_ansi_codes(input), expected);
    }
}
