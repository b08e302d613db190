use std::process::ExitCode;

fn main() -> ExitCode {
    match qapp_app::platform::run_app() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("qapp: {err}");
            ExitCode::FAILURE
        }
    }
}
