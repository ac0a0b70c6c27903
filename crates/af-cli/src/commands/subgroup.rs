use af_core::enums::EntityType;
use af_db::updates::subgroup::SubgroupUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SubgroupCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl subgroup`.
pub async fn handle(
    action: &SubgroupCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        SubgroupCommands::Create { group, name } => {
            let subgroup = ctx.service.create_subgroup(session, group, name).await?;
            output(&subgroup, flags.format)
        }
        SubgroupCommands::List { group, search } => {
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let subgroups = ctx
                .service
                .list_subgroups(session, group.as_deref(), search.as_deref(), limit)
                .await?;
            output(&subgroups, flags.format)
        }
        SubgroupCommands::Get { id } => {
            let subgroup = ctx.service.get_subgroup(session, id).await?;
            output(&subgroup, flags.format)
        }
        SubgroupCommands::Update { id, name } => {
            let Some(name) = name else {
                anyhow::bail!("--name must be provided");
            };
            let update = SubgroupUpdateBuilder::new().name(name).build();
            let subgroup = ctx.service.update_subgroup(session, id, update).await?;
            output(&subgroup, flags.format)
        }
        SubgroupCommands::Delete { id } => {
            ctx.service.delete_subgroup(session, id).await?;
            output(&deleted(EntityType::Subgroup, id), flags.format)
        }
    }
}
