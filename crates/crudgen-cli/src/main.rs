// crudgen CLI entry point

use crudgen_cli::{output, router::CommandRouter, VerbosityLevel};

fn main() {
    // Route and execute command
    let result = CommandRouter::route();

    // Exit with appropriate code
    if let Err(e) = result {
        output::print_error(&e.user_message());
        if VerbosityLevel::Verbose.should_output() {
            eprintln!("{}", e.technical_details());
        }
        std::process::exit(1);
    }
}
