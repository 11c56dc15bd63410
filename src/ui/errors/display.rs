// Tue Jan 20 2026 - Alex

use crate::structure::LayoutError;
use colored::Colorize;
use std::error::Error;

const MAX_CAUSE_DEPTH: usize = 10;

pub struct ErrorDisplay {
    show_cause_chain: bool,
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            show_cause_chain: true,
            color_enabled: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn without_cause_chain(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    pub fn format(&self, error: &(dyn Error + 'static)) -> String {
        let header = if self.color_enabled {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        let mut output = format!("{} {}\n", header, error);

        if self.show_cause_chain {
            let mut source = error.source();
            let mut depth = 1;
            while let Some(cause) = source {
                let arrow = if self.color_enabled {
                    "→".yellow().to_string()
                } else {
                    "->".to_string()
                };
                output.push_str(&format!("  {} Caused by: {}\n", arrow, cause));
                source = cause.source();
                depth += 1;

                if depth > MAX_CAUSE_DEPTH {
                    output.push_str("  ... (cause chain truncated)\n");
                    break;
                }
            }
        }

        if let Some(hint) = self.hint_for(error) {
            output.push_str(&self.format_hint(hint));
            output.push('\n');
        }

        output
    }

    pub fn print(&self, error: &(dyn Error + 'static)) {
        eprint!("{}", self.format(error));
    }

    pub fn format_hint(&self, message: &str) -> String {
        if self.color_enabled {
            format!("{} {}", "Hint:".cyan(), message)
        } else {
            format!("Hint: {}", message)
        }
    }

    fn hint_for(&self, error: &(dyn Error + 'static)) -> Option<&'static str> {
        let mut current = Some(error);
        while let Some(err) = current {
            if let Some(layout) = err.downcast_ref::<LayoutError>() {
                return match layout {
                    LayoutError::UnmappedSubtype(_) => {
                        Some("add the type to \"tags\" in the configuration file")
                    }
                    LayoutError::TypeSubstitutionMismatch { .. } => {
                        Some("the substitute representation in \"substitutions\" no longer fits")
                    }
                    _ => None,
                };
            }
            current = err.source();
        }
        None
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}
