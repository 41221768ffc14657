use bazaar_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, data::AdminSeed},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct EnsureAdminArgs {
    /// Administrator email address
    #[arg(long, env = "ADMIN_EMAIL")]
    email: String,

    /// Password used when the account has none yet
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Display name for a newly created account
    #[arg(long, default_value = "Administrator")]
    name: String,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: EnsureAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let admin = PgUsersService::new(Db::new(pool))
        .ensure_admin(AdminSeed {
            name: args.name,
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to ensure administrator: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_email: {}", admin.email);

    Ok(())
}
