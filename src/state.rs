//! Application context: every long-lived resource, constructed once at
//! startup and injected into the handlers. There is no process-global
//! state; dropping the context tears the service down.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::domain::events::DomainEvent;
use crate::store::{OrderStore, ProductStore, ReviewStore, UserStore};

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub db: PgPool,
    pub nats: Option<async_nats::Client>,
    pub products: ProductStore,
    pub users: UserStore,
    pub reviews: ReviewStore,
    pub orders: OrderStore,
}

impl AppContext {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&db).await?;

        let nats = match &config.nats_url {
            Some(url) => Some(async_nats::connect(url.as_str()).await?),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            products: ProductStore::new(db.clone()),
            users: UserStore::new(db.clone()),
            reviews: ReviewStore::new(db.clone()),
            orders: OrderStore::new(db.clone()),
            db,
            nats,
        })
    }

    /// Best-effort event publish; failures are logged, never surfaced.
    pub async fn publish(&self, event: DomainEvent) {
        let Some(nats) = &self.nats else { return };
        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize event");
                return;
            }
        };
        if let Err(e) = nats.publish(event.subject(), payload.into()).await {
            tracing::warn!(error = %e, subject = event.subject(), "failed to publish event");
        }
    }

    pub async fn shutdown(&self) {
        if let Some(nats) = &self.nats {
            if let Err(e) = nats.flush().await {
                tracing::warn!(error = %e, "failed to flush message bus");
            }
        }
        self.db.close().await;
    }
}
