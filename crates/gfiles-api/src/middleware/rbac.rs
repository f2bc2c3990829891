//! Role checks applied inside handlers.

use gfiles_core::error::AppError;
use gfiles_service::context::RequestContext;

/// Require the admin role.
pub fn require_admin(ctx: &RequestContext) -> Result<(), AppError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::authorization("Admin role required"))
    }
}

/// Require the manager role or above.
pub fn require_manager(ctx: &RequestContext) -> Result<(), AppError> {
    if ctx.is_manager_or_above() {
        Ok(())
    } else {
        Err(AppError::authorization("Manager role required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfiles_entity::user::UserRole;
    use uuid::Uuid;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), role, "t".into(), None, None)
    }

    #[test]
    fn test_role_guards() {
        assert!(require_admin(&ctx(UserRole::Admin)).is_ok());
        assert!(require_admin(&ctx(UserRole::Manager)).is_err());
        assert!(require_manager(&ctx(UserRole::Manager)).is_ok());
        assert!(require_manager(&ctx(UserRole::Employee)).is_err());
    }
}
