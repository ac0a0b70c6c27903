use af_core::enums::EntityType;
use af_db::updates::group::GroupUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GroupCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl group`.
pub async fn handle(
    action: &GroupCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        GroupCommands::Create { program, name } => {
            let group = ctx.service.create_group(session, program, name).await?;
            output(&group, flags.format)
        }
        GroupCommands::List { program, search } => {
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let groups = ctx
                .service
                .list_groups(session, program.as_deref(), search.as_deref(), limit)
                .await?;
            output(&groups, flags.format)
        }
        GroupCommands::Get { id } => {
            let group = ctx.service.get_group(session, id).await?;
            output(&group, flags.format)
        }
        GroupCommands::Update { id, name } => {
            let Some(name) = name else {
                anyhow::bail!("--name must be provided");
            };
            let update = GroupUpdateBuilder::new().name(name).build();
            let group = ctx.service.update_group(session, id, update).await?;
            output(&group, flags.format)
        }
        GroupCommands::Delete { id } => {
            ctx.service.delete_group(session, id).await?;
            output(&deleted(EntityType::Group, id), flags.format)
        }
    }
}
