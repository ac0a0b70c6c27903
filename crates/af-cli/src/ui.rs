//! Terminal presentation settings, decided once at startup.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Narrower terminals are ignored and the table renders at natural width.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    fn detect(flags: &GlobalFlags) -> Self {
        let wants_color = flags.format == OutputFormat::Table && !flags.quiet;
        Self {
            table_color: wants_color
                && std::io::stdout().is_terminal()
                && std::env::var_os("NO_COLOR").is_none(),
            term_width: std::env::var("COLUMNS")
                .ok()
                .and_then(|cols| cols.trim().parse::<usize>().ok())
                .filter(|cols| *cols >= MIN_TERM_WIDTH),
        }
    }
}

static PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = PREFS.set(UiPrefs::detect(flags));
}

/// Plain output when `init` was never called (unit tests).
#[must_use]
pub fn prefs() -> UiPrefs {
    PREFS.get().copied().unwrap_or_default()
}
