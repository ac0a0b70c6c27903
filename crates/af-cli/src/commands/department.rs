use af_core::enums::EntityType;
use af_db::updates::department::DepartmentUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DepartmentCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl department`.
pub async fn handle(
    action: &DepartmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        DepartmentCommands::Create { code, name } => {
            let department = ctx.service.create_department(session, code, name).await?;
            output(&department, flags.format)
        }
        DepartmentCommands::List { search } => {
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let departments = ctx
                .service
                .list_departments(session, search.as_deref(), limit)
                .await?;
            output(&departments, flags.format)
        }
        DepartmentCommands::Get { id } => {
            let department = ctx.service.get_department(session, id).await?;
            output(&department, flags.format)
        }
        DepartmentCommands::Update { id, code, name } => {
            if code.is_none() && name.is_none() {
                anyhow::bail!("At least one of --code or --name must be provided");
            }
            let mut builder = DepartmentUpdateBuilder::new();
            if let Some(code) = code {
                builder = builder.code(code);
            }
            if let Some(name) = name {
                builder = builder.name(name);
            }
            let department = ctx
                .service
                .update_department(session, id, builder.build())
                .await?;
            output(&department, flags.format)
        }
        DepartmentCommands::Delete { id } => {
            ctx.service.delete_department(session, id).await?;
            output(&deleted(EntityType::Department, id), flags.format)
        }
    }
}
