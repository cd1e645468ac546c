//! Gulgle command-line entry point.

fn main() {
    if let Err(e) = gulgle::cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
