use crate::demo::{run_demo, run_export, run_summary, DemoArgs, ExportArgs, SummaryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use icf_assessment::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ICF Assessment",
    about = "Run the ICF disability assessment service and its command-line tools",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk the wizard through a sample patient, archive it and export it
    Demo(DemoArgs),
    /// Score an assessment record stored as JSON
    Summary(SummaryArgs),
    /// Export the archived assessment as CSV or JSON
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Summary(args) => run_summary(args),
        Command::Export(args) => run_export(args),
    }
}
