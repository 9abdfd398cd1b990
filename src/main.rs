use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let dotenv = askgpt::config::load_dotenv();
    let _log_guard = askgpt::logging::init();
    dotenv.log();

    match askgpt::run(dotenv.key_source()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
