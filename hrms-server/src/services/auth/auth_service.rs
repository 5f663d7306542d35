use std::sync::Arc;

use hrms_auth::{AuthError, PasswordHasher, TokenCodec};
use hrms_core::{HrError, HrResult, Role, TenantContext};
use hrms_store::{AuditAction, EntityType, NewAuditLog, NewUser, OrganizationRepo, UserRow};

use super::auth_shared::{AuthResponse, LoginInput, RegisterOrgInput};
use crate::services::audit::AuditWriter;
use crate::services::HrmsState;
use crate::utils::validator::{check, require_fields};

const EMAIL_TAKEN: &str = "User already exists with this email";

/// Organization registration and credential login.
pub struct AuthService {
    orgs: OrganizationRepo,
    hasher: PasswordHasher,
    codec: Arc<TokenCodec>,
    audit: AuditWriter,
}

impl AuthService {
    pub fn new(state: &HrmsState) -> Self {
        Self {
            orgs: OrganizationRepo::new(state.db.clone()),
            hasher: state.hasher.clone(),
            codec: Arc::clone(&state.codec),
            audit: state.audit.clone(),
        }
    }

    /// Create an organization with its first admin and sign them in.
    pub async fn register_org(&self, input: RegisterOrgInput) -> HrResult<AuthResponse> {
        require_fields(&[
            input.org_name.as_deref(),
            input.admin_name.as_deref(),
            input.admin_email.as_deref(),
            input.password.as_deref(),
        ])?;
        check(&input)?;

        let org_name = input.org_name.as_deref().unwrap_or_default();
        let admin_name = input.admin_name.as_deref().unwrap_or_default();
        let admin_email = input.admin_email.as_deref().unwrap_or_default();
        let password = input.password.as_deref().unwrap_or_default();

        if self.orgs.find_user_by_email(admin_email).await?.is_some() {
            return Err(HrError::conflict(EMAIL_TAKEN));
        }

        let password_hash = self.hasher.hash(password).await?;
        let admin = NewUser {
            name: admin_name.to_string(),
            email: admin_email.to_string(),
            password_hash,
            role: Role::Admin,
        };

        let (org, user) = match self.orgs.register(org_name, admin).await {
            Ok(created) => created,
            Err(err) if err.is_unique_violation() => {
                return Err(HrError::conflict(EMAIL_TAKEN).with_source(err));
            }
            Err(err) => return Err(err.into()),
        };

        self.audit
            .record(NewAuditLog {
                organization_id: Some(org.id),
                user_id: Some(user.id),
                action: AuditAction::OrgRegister,
                entity_type: Some(EntityType::Organization),
                entity_id: Some(org.id),
                message: format!(
                    "Organization \"{}\" registered with admin {}",
                    org.name, user.email
                ),
                meta: None,
            })
            .await;

        self.sign_in(&user)
    }

    /// Check credentials. Unknown email, wrong password and missing fields
    /// all fail the same way.
    pub async fn login(&self, input: LoginInput) -> HrResult<AuthResponse> {
        let (Some(email), Some(password)) = (input.email.as_deref(), input.password.as_deref())
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(user) = self.orgs.find_user_by_email(email).await? else {
            self.hasher.reject(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };
        self.hasher.verify(password, &user.password_hash).await?;

        self.audit
            .record(NewAuditLog {
                organization_id: Some(user.organization_id),
                user_id: Some(user.id),
                action: AuditAction::UserLogin,
                entity_type: Some(EntityType::User),
                entity_id: Some(user.id),
                message: format!("User {} logged in", user.email),
                meta: None,
            })
            .await;

        self.sign_in(&user)
    }

    fn sign_in(&self, user: &UserRow) -> HrResult<AuthResponse> {
        let profile = user.profile()?;
        let identity = TenantContext::new(
            profile.organization_id,
            profile.id,
            profile.role,
            profile.email.clone(),
        );
        let token = self.codec.issue(&identity)?;
        Ok(AuthResponse {
            token,
            user: profile,
        })
    }
}
