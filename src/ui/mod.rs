// Tue Jan 20 2026 - Alex

pub mod cli;
pub mod errors;
pub mod spinner;

pub use cli::{Args, Command, CommandHandler};
pub use errors::ErrorDisplay;
pub use spinner::ProgressSpinner;

use colored::Colorize;

pub fn print_info(message: &str) {
    println!("{} {}", "[*]".blue(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", "[+]".green(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "[!]".yellow(), message);
}
