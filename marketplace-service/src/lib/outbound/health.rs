use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::health::HealthProbe;

pub struct PostgresHealthProbe {
    pool: PgPool,
}

impl PostgresHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PostgresHealthProbe {
    async fn database_ok(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Database health check failed: {}", e);
                false
            }
        }
    }
}

/// Probe for deployments without a database, always healthy.
pub struct StaticHealthProbe;

#[async_trait]
impl HealthProbe for StaticHealthProbe {
    async fn database_ok(&self) -> bool {
        true
    }
}
