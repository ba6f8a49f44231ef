//! ramenlog main entrypoint.

use ramenlog::run;
use ramenlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
