use std::process::ExitCode;

fn main() -> ExitCode {
    makeitsell_cli::run()
}
