use std::process::ExitCode;

fn main() -> ExitCode {
    match bias_variance::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("run failed: {err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
