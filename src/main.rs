mod config;
mod package_manager;
mod tui;

use anyhow::Result;
use clap::Parser;
use config::Config;
use package_manager::PipManager;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "lian-pip",
    about = "Upgrade and remove installed Python packages from a paginated TUI",
    version
)]
struct Args {
    /// Config file (defaults to ~/.config/lian-pip/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Python interpreter used to run `-m pip`
    #[arg(short, long)]
    python: Option<String>,

    /// Write debug output to the log file
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,
}

/// 日志写入文件（终端归 TUI 使用），每次启动时清空
fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let default_filter = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置，命令行参数优先
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path)?;
    if let Some(python) = args.python {
        config.python = python;
    }

    if args.init_config {
        config.save(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    if let Err(e) = init_logging(&config.log_file, args.verbose) {
        eprintln!("warning: logging disabled ({}): {}", config.log_file.display(), e);
    }

    // 找不到 pip 时在进入 TUI 之前退出
    let pm = PipManager::detect(&config.python, config.quiet).unwrap_or_else(|e| {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        eprintln!("Set `python` in {} or pass --python <PATH>", config_path.display());
        std::process::exit(1);
    });

    tui::run(pm, &config_path)?;

    Ok(())
}
