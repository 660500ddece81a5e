use std::process::ExitCode;

use isoserve::config::Config;
use isoserve::{logger, server, ServeError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServeError> {
    let cfg = Config::load()?;

    let cwd = std::env::current_dir()?;
    let root = cfg.resolve_root(&cwd)?;

    // Log files are relative to where the server was started, not the served root
    logger::init(&cfg)?;

    std::env::set_current_dir(&root).map_err(|source| ServeError::RootDir {
        path: root.clone(),
        source,
    })?;

    // 创建 Tokio 运行时，根据 workers 配置设置线程数
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|&n| n > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let result = runtime.block_on(server::run(cfg, root));

    // In-flight connections are abandoned rather than drained
    runtime.shutdown_background();
    result
}
