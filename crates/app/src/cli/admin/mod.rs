use clap::{Args, Subcommand};

mod ensure;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Create the administrator account, or promote it if it already exists
    Ensure(ensure::EnsureAdminArgs),
}

pub(crate) async fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::Ensure(args) => ensure::run(args).await,
    }
}
