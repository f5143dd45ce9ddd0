use anyhow::Result;
use env_logger::{Builder, Env};

mod cli;
mod cmd_chain;
mod cmd_dispatch;
mod cmd_list;
mod cmd_resolve;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    match run() {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Process exit code on success paths: 0, or 2 when dispatch did not succeed.
fn run() -> Result<i32> {
    let cli = cli::Cli::parse_args();
    match cli.cmd {
        cli::Cmd::Resolve { manifest, file, save } =>
            cmd_resolve::exec(manifest, file, save).map(|_| 0),

        cli::Cmd::Dispatch { manifest, file, save, json } =>
            cmd_dispatch::exec(manifest, file, save, json).map(|ok| if ok { 0 } else { 2 }),

        cli::Cmd::List { manifest, json } =>
            cmd_list::exec(manifest, json).map(|_| 0),

        cli::Cmd::Chain { mips, frames, budget, json } =>
            cmd_chain::exec(mips, frames, budget, json).map(|_| 0),
    }
}
