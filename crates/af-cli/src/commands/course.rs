use af_core::enums::EntityType;
use af_db::updates::course::CourseUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CourseCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl course`.
pub async fn handle(
    action: &CourseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        CourseCommands::Create { operation, name } => {
            let course = ctx.service.create_course(session, operation, name).await?;
            output(&course, flags.format)
        }
        CourseCommands::List { operation, search } => {
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let courses = ctx
                .service
                .list_courses(session, operation.as_deref(), search.as_deref(), limit)
                .await?;
            output(&courses, flags.format)
        }
        CourseCommands::Get { id } => {
            let course = ctx.service.get_course(session, id).await?;
            output(&course, flags.format)
        }
        CourseCommands::Update { id, name } => {
            let Some(name) = name else {
                anyhow::bail!("--name must be provided");
            };
            let update = CourseUpdateBuilder::new().name(name).build();
            let course = ctx.service.update_course(session, id, update).await?;
            output(&course, flags.format)
        }
        CourseCommands::Delete { id } => {
            ctx.service.delete_course(session, id).await?;
            output(&deleted(EntityType::Course, id), flags.format)
        }
    }
}
