use std::time::Duration;

/// Spacing between consecutive requests to the same target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPacing {
    #[default]
    None,
    FixedDelay(Duration),
}

impl RequestPacing {
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            RequestPacing::None
        } else {
            RequestPacing::FixedDelay(Duration::from_millis(millis))
        }
    }

    pub async fn pause(&self) {
        if let RequestPacing::FixedDelay(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}
