use anyhow::Result;
use clap::Parser;
use contest_kit::launch::run_launcher;
use contest_kit::platform::OsFamily;
use contest_kit::runtime::RealRuntime;

/// run - start the contest executable for this platform
///
/// Looks for linux_launcher, mac_launcher or windows_launcher.exe next to this
/// program, starts it with CONFIG and prints everything it writes to stdout.
/// Exits with the executable's exit status.
#[derive(Parser, Debug)]
#[command(author, version = env!("CONTEST_KIT_VERSION"), about)]
struct Cli {
    /// Configuration passed unchanged to the contest executable
    #[arg(value_name = "CONFIG", allow_hyphen_values = true)]
    config: String,

    /// Extra arguments are ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if !cli.ignored.is_empty() {
        log::debug!("Ignoring extra arguments: {:?}", cli.ignored);
    }

    let os = OsFamily::detect();
    let code = run_launcher(&RealRuntime, &os, &cli.config, &mut std::io::stdout())?;

    std::process::exit(code);
}
