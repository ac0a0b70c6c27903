mod grid;

use af_core::enums::EntityType;
use af_db::repos::routine::RoutineFilter;
use af_db::updates::routine::RoutineUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RoutineCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl routine`.
pub async fn handle(
    action: &RoutineCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        RoutineCommands::Create { operation, name } => {
            let routine = ctx.service.create_routine(session, operation, name).await?;
            output(&routine, flags.format)
        }
        RoutineCommands::List { operation, program } => {
            let filter = RoutineFilter {
                operation_id: operation.clone(),
                program_id: program.clone(),
            };
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let routines = ctx.service.list_routines(session, &filter, limit).await?;
            output(&routines, flags.format)
        }
        RoutineCommands::Get { id } => {
            let routine = ctx.service.get_routine(session, id).await?;
            output(&routine, flags.format)
        }
        RoutineCommands::Update { id, name } => {
            let Some(name) = name else {
                anyhow::bail!("--name must be provided");
            };
            let update = RoutineUpdateBuilder::new().name(name).build();
            let routine = ctx.service.update_routine(session, id, update).await?;
            output(&routine, flags.format)
        }
        RoutineCommands::Delete { id } => {
            ctx.service.delete_routine(session, id).await?;
            output(&deleted(EntityType::Routine, id), flags.format)
        }
        RoutineCommands::Grid {
            routine,
            group,
            subgroup,
        } => grid::run(routine, group.as_deref(), subgroup.as_deref(), ctx, flags).await,
    }
}
