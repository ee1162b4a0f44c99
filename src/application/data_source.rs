// Data source trait - the seam between the dashboard and its backend
use crate::application::errors::FetchError;
use crate::domain::dashboard::DashboardData;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardDataSource: Send + Sync {
    /// Fetch one complete snapshot of KPIs and chart payloads
    async fn fetch(&self) -> Result<DashboardData, FetchError>;

    /// Short name reported by the health endpoint
    fn name(&self) -> &'static str;
}
