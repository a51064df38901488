use clap::Parser;
use tracing::error;

use hirestats::cli::Cli;
use hirestats::config::{StaticConfig, get_config, init_config, init_config_with};
use hirestats::runtime::modes::{self, Mode};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // .env 先于配置加载，使 HS__* 覆盖项生效
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.config.as_deref() {
        Some(path) => init_config_with(StaticConfig::load_from(path)),
        None => init_config(),
    }

    let config = get_config();
    let _log_guard = hirestats::system::init_logging(&config.logging)?;

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => modes::run_server().await.map_err(|e| {
            error!("Server exited with error: {:#}", e);
            e
        }),
        Mode::Cli => {
            // detect_mode 只在 command 为 Some 时返回 Cli
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
