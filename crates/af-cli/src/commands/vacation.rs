use af_core::enums::{EntityType, VacationScope};
use af_db::repos::vacation::VacationFilter;
use af_db::updates::vacation::VacationUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::VacationCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl vacation`.
pub async fn handle(
    action: &VacationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        VacationCommands::Create {
            start,
            end,
            scope,
            target,
            description,
        } => {
            let vacation = ctx
                .service
                .create_vacation(
                    session,
                    parse_date(start, "start")?,
                    parse_date(end, "end")?,
                    description.as_deref(),
                    parse_enum::<VacationScope>(scope, "scope")?,
                    target.as_deref(),
                )
                .await?;
            output(&vacation, flags.format)
        }
        VacationCommands::List { scope, target, on } => {
            let filter = VacationFilter {
                scope: scope
                    .as_deref()
                    .map(|value| parse_enum::<VacationScope>(value, "scope"))
                    .transpose()?,
                target_id: target.clone(),
                on: on.as_deref().map(|value| parse_date(value, "on")).transpose()?,
            };
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let vacations = ctx.service.list_vacations(session, &filter, limit).await?;
            output(&vacations, flags.format)
        }
        VacationCommands::Get { id } => {
            let vacation = ctx.service.get_vacation(session, id).await?;
            output(&vacation, flags.format)
        }
        VacationCommands::Update {
            id,
            start,
            end,
            description,
            scope,
            target,
        } => {
            if start.is_none() && end.is_none() && description.is_none() && scope.is_none() {
                anyhow::bail!(
                    "At least one of --start, --end, --description, or --scope must be provided"
                );
            }
            let mut builder = VacationUpdateBuilder::new();
            if let Some(start) = start {
                builder = builder.start_day(parse_date(start, "start")?);
            }
            if let Some(end) = end {
                builder = builder.end_day(parse_date(end, "end")?);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if let Some(scope) = scope {
                builder = builder.target(parse_enum::<VacationScope>(scope, "scope")?, target.clone());
            }
            let vacation = ctx
                .service
                .update_vacation(session, id, builder.build())
                .await?;
            output(&vacation, flags.format)
        }
        VacationCommands::Delete { id } => {
            ctx.service.delete_vacation(session, id).await?;
            output(&deleted(EntityType::Vacation, id), flags.format)
        }
    }
}
