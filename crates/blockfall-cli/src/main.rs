use std::time::Duration;

use blockfall_engine::GameConfig;
use clap::Parser;

use crate::app::PlayApp;

mod app;
mod event_loop;
mod ui;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board height in rows
    #[clap(long, default_value_t = 20)]
    rows: usize,
    /// Board width in columns
    #[clap(long, default_value_t = 10)]
    cols: usize,
    /// Gravity interval in milliseconds
    #[clap(long, default_value_t = 500)]
    gravity_ms: u64,
    /// Accelerated interval while soft drop is held, in milliseconds
    #[clap(long, default_value_t = 100)]
    soft_drop_ms: u64,
    /// Terminal columns per board cell
    #[clap(long, default_value_t = 2)]
    cell_width: u16,
    /// Seed for the piece generator (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = GameConfig {
        rows: args.rows,
        cols: args.cols,
        gravity_interval: Duration::from_millis(args.gravity_ms),
        soft_drop_interval: Duration::from_millis(args.soft_drop_ms),
    };

    let mut app = PlayApp::new(config, args.seed, args.cell_width);
    ratatui::run(|terminal| app.run(terminal))
}
