//! Terminal surface: pages are printed as plain text.

use std::sync::{Mutex, PoisonError};

use console::style;
use eshop_core::{Screen, Surface};
use eshop_router::PageState;
use indicatif::ProgressBar;
use serde::Serialize;

use crate::output::{state_badge, Output};

/// Prints mounted pages to stdout.
///
/// A loading page shows a spinner until the next mount replaces it. In JSON
/// mode every mount is one JSON object per line.
pub struct TerminalSurface {
    output: Output,
    html: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

#[derive(Serialize)]
struct MountRecord<'a> {
    route: String,
    state: PageState,
    generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

impl TerminalSurface {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            html: false,
            spinner: Mutex::new(None),
        }
    }

    /// Print raw HTML instead of plain text.
    pub fn with_html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }
}

impl Surface for TerminalSurface {
    fn mount(&self, screen: Screen) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = spinner.take() {
            previous.finish_and_clear();
        }

        if self.output.is_json() {
            let record = MountRecord {
                route: screen.route.token(),
                state: screen.state,
                generation: screen.generation,
                html: (screen.state != PageState::Loading).then(|| screen.fragment.as_str()),
            };
            if let Ok(line) = serde_json::to_string(&record) {
                println!("{}", line);
            }
            return;
        }

        if screen.state == PageState::Loading {
            *spinner = Some(self.output.spinner(&format!("Loading {}", screen.route)));
            return;
        }

        self.output.debug(&format!(
            "{} {} (generation {})",
            screen.route,
            state_badge(screen.state),
            screen.generation
        ));
        if self.html {
            self.output.plain(screen.fragment.as_str());
        } else {
            self.output.plain(&screen.fragment.to_plain_text());
        }
    }

    fn cart_badge(&self, count: i64) {
        self.output.debug(&format!("cart: {} item(s)", style(count).bold()));
    }
}
