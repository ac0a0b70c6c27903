use af_core::enums::{AuditAction, EntityType};
use af_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session()?;
    let filter = build_filter(args, effective_limit(flags.limit, ctx.default_limit()))?;
    let entries = ctx.service.query_audit(session, &filter).await?;
    output(&entries, flags.format)
}

fn build_filter(args: &AuditArgs, limit: u32) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|value| parse_enum::<EntityType>(value, "entity-type"))
            .transpose()?,
        entity_id: args.entity_id.clone(),
        action: args
            .action
            .as_deref()
            .map(|value| parse_enum::<AuditAction>(value, "action"))
            .transpose()?,
        actor_id: args.actor.clone(),
        limit: Some(limit),
    })
}

#[cfg(test)]
mod tests {
    use af_core::enums::{AuditAction, EntityType};
    use pretty_assertions::assert_eq;

    use super::build_filter;
    use crate::cli::root_commands::AuditArgs;

    #[test]
    fn filter_parses_enums_and_keeps_limit() {
        let args = AuditArgs {
            entity_type: Some("recurring-event".into()),
            entity_id: None,
            action: Some("deleted".into()),
            actor: Some("usr-1".into()),
        };
        let filter = build_filter(&args, 15).expect("filter");
        assert_eq!(filter.entity_type, Some(EntityType::RecurringEvent));
        assert_eq!(filter.action, Some(AuditAction::Deleted));
        assert_eq!(filter.actor_id.as_deref(), Some("usr-1"));
        assert_eq!(filter.limit, Some(15));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let args = AuditArgs {
            entity_type: None,
            entity_id: None,
            action: Some("archived".into()),
            actor: None,
        };
        assert!(build_filter(&args, 10).is_err());
    }
}
