use af_core::enums::EntityType;
use af_db::repos::program::ProgramFilter;
use af_db::updates::program::ProgramUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProgramCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl program`.
pub async fn handle(
    action: &ProgramCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        ProgramCommands::Create { name, department } => {
            let program = ctx
                .service
                .create_program(session, name, department.as_deref())
                .await?;
            output(&program, flags.format)
        }
        ProgramCommands::List {
            search,
            department,
            active_only,
        } => {
            let filter = ProgramFilter {
                search: search.clone(),
                department_id: department.clone(),
                active_only: *active_only,
            };
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let programs = ctx.service.list_programs(session, &filter, limit).await?;
            output(&programs, flags.format)
        }
        ProgramCommands::Get { id } => {
            let program = ctx.service.get_program(session, id).await?;
            output(&program, flags.format)
        }
        ProgramCommands::Update {
            id,
            name,
            department,
            clear_department,
            active,
        } => {
            if name.is_none() && department.is_none() && !clear_department && active.is_none() {
                anyhow::bail!(
                    "At least one of --name, --department, --clear-department, or --active must be provided"
                );
            }
            let mut builder = ProgramUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if *clear_department {
                builder = builder.department_id(None);
            } else if let Some(department) = department {
                builder = builder.department_id(Some(department.clone()));
            }
            if let Some(active) = active {
                builder = builder.is_active(*active);
            }
            let program = ctx
                .service
                .update_program(session, id, builder.build())
                .await?;
            output(&program, flags.format)
        }
        ProgramCommands::Delete { id } => {
            ctx.service.delete_program(session, id).await?;
            output(&deleted(EntityType::Program, id), flags.format)
        }
    }
}
