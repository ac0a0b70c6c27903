use crate::cli::GlobalFlags;
use crate::cli::subcommands::InstituteCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl institute`.
pub async fn handle(
    action: &InstituteCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InstituteCommands::Create { name } => {
            let institute = ctx.service.create_institute(name, ctx.user_id()).await?;
            output(&institute, flags.format)
        }
        InstituteCommands::List => {
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let institutes = ctx.service.list_institutes(limit).await?;
            output(&institutes, flags.format)
        }
        InstituteCommands::Get { id } => {
            let institute = ctx.service.get_institute(id).await?;
            output(&institute, flags.format)
        }
    }
}
