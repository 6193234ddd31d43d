//! Application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::BoxError;
use crate::config::{BootstrapAdmin, Config};
use crate::db::{PgStore, RepoError, Store};
use crate::menu::MenuService;
use crate::modifiers::ModifierService;
use crate::qr::{QrService, QrTokenSigner};
use crate::tables::TableService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub qr: QrService,
    pub tables: TableService,
    pub modifiers: ModifierService,
    pub menu: MenuService,
    /// JWT secret for staff authentication
    pub jwt_secret: String,
}

impl AppState {
    /// Connect to PostgreSQL, run migrations and seed the bootstrap admin
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let state = Self::with_store(
            Arc::new(PgStore::new(pool)),
            &config.jwt_secret,
            &config.qr_token_secret,
            config.qr_token_ttl_hours,
        );

        if let Some(admin) = &config.bootstrap_admin {
            state.seed_admin(admin).await?;
        }

        Ok(state)
    }

    /// Wire services over any store
    pub fn with_store(
        store: Arc<dyn Store>,
        jwt_secret: &str,
        qr_token_secret: &str,
        qr_token_ttl_hours: i64,
    ) -> Self {
        let signer = QrTokenSigner::new(qr_token_secret, qr_token_ttl_hours);
        let qr = QrService::new(store.clone(), signer);

        Self {
            tables: TableService::new(store.clone(), qr.clone()),
            modifiers: ModifierService::new(store.clone()),
            menu: MenuService::new(store.clone()),
            qr,
            store,
            jwt_secret: jwt_secret.to_string(),
        }
    }

    /// Create the bootstrap staff account unless it already exists
    pub async fn seed_admin(&self, admin: &BootstrapAdmin) -> Result<(), BoxError> {
        let email = admin.email.trim().to_lowercase();
        if self.store.find_staff_by_email(&email).await?.is_some() {
            return Ok(());
        }

        let hash = crate::util::hash_password(&admin.password)
            .map_err(|e| format!("failed to hash bootstrap password: {e}"))?;
        match self
            .store
            .create_staff(admin.restaurant_id, &email, &hash, Some("Administrator"))
            .await
        {
            Ok(staff) => {
                tracing::info!(staff_id = staff.id, email = %staff.email, "Bootstrap admin created");
                Ok(())
            }
            // Another instance seeded it first
            Err(RepoError::Duplicate(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
