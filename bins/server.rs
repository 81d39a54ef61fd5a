use std::process::ExitCode;

use tracing::{error, info};

/// Worker count from `[server] worker_threads`; a config that fails to load
/// is reported here and again, in full, by `server::run`.
fn worker_threads() -> Option<usize> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(e) => {
            eprintln!("repair_desk: configuration not usable: {e}");
            None
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = worker_threads() {
        builder.worker_threads(n);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("repair_desk: cannot start tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(async {
        tokio::select! {
            res = server::run() => match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(error = %e, "repair desk stopped with an error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(pid = std::process::id(), "shutdown requested");
                ExitCode::SUCCESS
            }
        }
    })
}
