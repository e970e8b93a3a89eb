//! rSala main entrypoint.

use rsala::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if e.is_retryable() {
            eprintln!("The booking service did not answer: retry with the same command.");
        }
        std::process::exit(1);
    }
}
