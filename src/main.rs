use anyhow::Result;
use clap::Parser;

use holarium_core::config::AppConfig;
use holarium_lib::app::App;
use holarium_tui::Tui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Stop after this many evolution cycles in headless mode (0 = forever)
    #[arg(long, default_value_t = 0)]
    cycles: u64,

    /// Print a JSON world snapshot after every cycle (headless only)
    #[arg(long)]
    emit_json: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Standard,
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args.config)?;

    match args.mode {
        Mode::Headless => {
            holarium_core::init_logging();
            let mut app = App::new(config)?;
            app.run_headless(args.cycles, args.emit_json).await?;
        }
        Mode::Standard => {
            // No log subscriber here: stdout belongs to the terminal UI.
            let mut tui = Tui::new()?;
            tui.init()?;

            let res = match App::new(config) {
                Ok(mut app) => app.run(&mut tui).await,
                Err(e) => Err(e),
            };

            tui.exit()?;

            if let Err(e) = res {
                eprintln!("Application error: {e}");
            } else {
                println!("Exited clean.");
            }
        }
    }

    Ok(())
}
