use log::info;
use std::io::{self, BufRead, Write};

pub trait Host {
    /// Ask a yes/no question; `true` means the user accepted
    fn confirm(&self, message: &str) -> bool;

    /// Show a blocking message
    fn alert(&self, message: &str);

    /// Leave the page for `path`
    fn navigate(&self, path: &str);

    /// Run the platform print flow over `document`; returns once the dialog is dismissed
    fn print(&self, document: &str);

    fn viewport_height(&self) -> u32;

    /// Rendered content height of the first element matching `selector`
    fn element_height(&self, selector: &str) -> u32;
}

/// Host backed by the terminal: dialogs on stdin/stderr, nothing is measured
pub struct TerminalHost {
    assume_yes: bool,
}

impl TerminalHost {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Host for TerminalHost {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{message} [y/N] ");
        io::stderr().flush().ok();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn navigate(&self, path: &str) {
        info!("Navigating to {}", path);
    }

    fn print(&self, document: &str) {
        println!("{document}");
    }

    fn viewport_height(&self) -> u32 {
        u32::MAX
    }

    fn element_height(&self, _selector: &str) -> u32 {
        0
    }
}
