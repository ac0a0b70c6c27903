use af_core::enums::{EntityType, Role};
use af_db::repos::user::{NewUser, UserFilter};
use af_db::updates::user::UserUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        UserCommands::Create {
            name,
            email,
            role,
            program,
            representative,
        } => {
            let new_user = NewUser {
                name: name.clone(),
                email: email.clone(),
                role: parse_enum::<Role>(role, "role")?,
                program_id: program.clone(),
                is_representative: *representative,
            };
            let user = ctx.service.create_user(session, &new_user).await?;
            output(&user, flags.format)
        }
        UserCommands::List {
            role,
            program,
            search,
        } => {
            let filter = UserFilter {
                role: role
                    .as_deref()
                    .map(|value| parse_enum::<Role>(value, "role"))
                    .transpose()?,
                program_id: program.clone(),
                search: search.clone(),
            };
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let users = ctx.service.list_users(session, &filter, limit).await?;
            output(&users, flags.format)
        }
        UserCommands::Get { id } => {
            let user = ctx.service.get_user(session, id).await?;
            output(&user, flags.format)
        }
        UserCommands::Update {
            id,
            name,
            email,
            role,
            program,
            clear_program,
            representative,
        } => {
            if name.is_none()
                && email.is_none()
                && role.is_none()
                && program.is_none()
                && !clear_program
                && representative.is_none()
            {
                anyhow::bail!(
                    "At least one of --name, --email, --role, --program, --clear-program, or --representative must be provided"
                );
            }
            let mut builder = UserUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(email) = email {
                builder = builder.email(email);
            }
            if let Some(role) = role {
                builder = builder.role(parse_enum::<Role>(role, "role")?);
            }
            if *clear_program {
                builder = builder.program_id(None);
            } else if let Some(program) = program {
                builder = builder.program_id(Some(program.clone()));
            }
            if let Some(flag) = representative {
                builder = builder.is_representative(*flag);
            }
            let user = ctx.service.update_user(session, id, builder.build()).await?;
            output(&user, flags.format)
        }
        UserCommands::Delete { id } => {
            ctx.service.delete_user(session, id).await?;
            output(&deleted(EntityType::User, id), flags.format)
        }
    }
}
