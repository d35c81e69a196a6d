use std::process::ExitCode;

fn main() -> ExitCode {
    campus_cli::run()
}
