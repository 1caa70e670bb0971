use std::process::ExitCode;

use ozfluid::app::Application;

fn main() -> ExitCode {
    match Application::from_cli() {
        Ok(app) => match app.run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {}", err);
                ExitCode::from(err.exit_code())
            }
        },
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::from(1)
        }
    }
}
