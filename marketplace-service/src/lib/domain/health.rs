use async_trait::async_trait;

/// Liveness probe for the backing store.
#[async_trait]
pub trait HealthProbe: Send + Sync + 'static {
    /// True when the store answered a trivial round trip.
    async fn database_ok(&self) -> bool;
}
