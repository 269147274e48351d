use std::{path::PathBuf, process::ExitCode};

use clap::Parser as _;
use debate_elo_cli::{config::Config, fetch::Tabroom, pipeline, Error};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[clap(version, about)]
#[clap(group(
    clap::ArgGroup::new("action")
        .required(true)
        .args(["download", "calculate", "rank"])
))]
struct Opt {
    /// Download round results for the tournaments listed in INFILE.
    #[clap(short, long)]
    download: bool,
    /// Calculate ratings from the processed tournaments in INFILE.
    #[clap(short, long)]
    calculate: bool,
    /// Rank competitors by the ratings in INFILE.
    #[clap(short, long)]
    rank: bool,
    /// Continue from the existing contents of OUTFILE.
    #[clap(short, long)]
    append: bool,
    /// TOML file overriding rating and download settings.
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,
    infile: PathBuf,
    outfile: PathBuf,
}

fn run(opt: &Opt) -> Result<(), Error> {
    let config = match &opt.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if opt.download {
        let tabroom = Tabroom::new(&config.fetch)?;
        pipeline::download(&tabroom, &opt.infile, &opt.outfile, opt.append)?;
    } else if opt.calculate {
        pipeline::calculate(&config.rating_system(), &opt.infile, &opt.outfile, opt.append)?;
    } else {
        pipeline::rank(&opt.infile, &opt.outfile)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::parse();

    match run(&opt) {
        Ok(()) => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
