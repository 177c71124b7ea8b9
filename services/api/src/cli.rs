use crate::demo::{run_demo, run_plan, DemoArgs, PlanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use headcount::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Headcount Scenario Service",
    about = "Score a roster, select a target headcount, and report the cost impact",
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
    /// Run one scenario against a roster CSV and print the selection
    Plan(PlanArgs),
    /// Run the pipeline against an embedded sample roster
    Demo(DemoArgs),
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
        Command::Plan(args) => run_plan(args),
        Command::Demo(args) => run_demo(args),
    }
}
