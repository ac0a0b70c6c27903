use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Institute { action } => commands::institute::handle(&action, ctx, flags).await,
        Commands::Department { action } => commands::department::handle(&action, ctx, flags).await,
        Commands::Program { action } => commands::program::handle(&action, ctx, flags).await,
        Commands::Operation { action } => commands::operation::handle(&action, ctx, flags).await,
        Commands::Course { action } => commands::course::handle(&action, ctx, flags).await,
        Commands::Group { action } => commands::group::handle(&action, ctx, flags).await,
        Commands::Subgroup { action } => commands::subgroup::handle(&action, ctx, flags).await,
        Commands::Slot { action } => commands::slot::handle(&action, ctx, flags).await,
        Commands::Routine { action } => commands::routine::handle(&action, ctx, flags).await,
        Commands::Event { action } => commands::event::handle(&action, ctx, flags).await,
        Commands::Vacation { action } => commands::vacation::handle(&action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
    }
}
