// Tue Jan 20 2026 - Alex

use ktrace_gen::ui::{cli, ErrorDisplay};

fn main() {
    if let Err(e) = cli::run() {
        ErrorDisplay::new().print(e.as_ref());
        std::process::exit(1);
    }
}
