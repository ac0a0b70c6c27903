use af_core::enums::{EntityType, OperationStatus};
use af_db::repos::operation::OperationFilter;
use af_db::updates::operation::OperationUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OperationCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl operation`.
pub async fn handle(
    action: &OperationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        OperationCommands::Create {
            program,
            name,
            status,
        } => {
            let status = parse_enum::<OperationStatus>(status, "status")?;
            let operation = ctx
                .service
                .create_operation(session, program, name, status)
                .await?;
            output(&operation, flags.format)
        }
        OperationCommands::List {
            program,
            status,
            search,
        } => {
            let filter = OperationFilter {
                program_id: program.clone(),
                status: status
                    .as_deref()
                    .map(|value| parse_enum::<OperationStatus>(value, "status"))
                    .transpose()?,
                search: search.clone(),
            };
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let operations = ctx.service.list_operations(session, &filter, limit).await?;
            output(&operations, flags.format)
        }
        OperationCommands::Get { id } => {
            let operation = ctx.service.get_operation(session, id).await?;
            output(&operation, flags.format)
        }
        OperationCommands::Update { id, name, status } => {
            if name.is_none() && status.is_none() {
                anyhow::bail!("At least one of --name or --status must be provided");
            }
            let mut builder = OperationUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<OperationStatus>(status, "status")?);
            }
            let operation = ctx
                .service
                .update_operation(session, id, builder.build())
                .await?;
            output(&operation, flags.format)
        }
        OperationCommands::Delete { id } => {
            ctx.service.delete_operation(session, id).await?;
            output(&deleted(EntityType::Operation, id), flags.format)
        }
    }
}
