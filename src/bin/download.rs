use anyhow::Result;
use clap::Parser;
use contest_kit::fetch::{DEFAULT_ARCHIVE, DEFAULT_URL, FetchOptions, fetch};
use contest_kit::http::HttpClient;
use contest_kit::runtime::RealRuntime;
use std::path::PathBuf;

/// download - fetch the contest data archive
///
/// Downloads the contest data zip and extracts it into the current directory,
/// printing the progress of both steps.
///
/// Examples:
///   download                      # Fetch the published data set
///   download --extract-to data    # Extract somewhere else
#[derive(Parser, Debug)]
#[command(author, version = env!("CONTEST_KIT_VERSION"), about)]
struct Cli {
    /// Archive URL (also via CONTEST_DATA_URL)
    #[arg(long, env = "CONTEST_DATA_URL", default_value = DEFAULT_URL, value_name = "URL")]
    url: String,

    /// Where to save the archive (also via CONTEST_DATA_FILE)
    #[arg(
        long,
        short = 'o',
        env = "CONTEST_DATA_FILE",
        default_value = DEFAULT_ARCHIVE,
        value_name = "PATH"
    )]
    output: PathBuf,

    /// Directory to extract the archive into
    #[arg(long = "extract-to", short = 'C', default_value = ".", value_name = "DIR")]
    extract_to: PathBuf,
}

impl Cli {
    fn into_options(self) -> FetchOptions {
        FetchOptions {
            url: self.url,
            archive_path: self.output,
            extract_to: self.extract_to,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let options = Cli::parse().into_options();

    fetch(
        &RealRuntime,
        &HttpClient::default(),
        &options,
        std::io::stdout(),
    )
    .await?;
    Ok(())
}
