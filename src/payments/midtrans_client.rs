use anyhow::Result;
use rand::{Rng, distributions::Alphanumeric};
use tracing::{debug, warn};

/// Snap-token client. Token issuance is a placeholder that hands out opaque
/// sandbox tokens; the redirect UI and signature verification belong to the
/// hosted gateway, not this service.
pub struct MidtransClient {
    server_key: String,
}

impl MidtransClient {
    pub fn new(server_key: String) -> Self {
        Self { server_key }
    }

    pub async fn create_snap_token(
        &self,
        order_id: &str,
        gross_amount_minor: i32,
    ) -> Result<String> {
        if self.server_key.is_empty() {
            warn!("midtrans: no server key configured; issuing sandbox token");
        }

        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(20)
            .map(char::from)
            .collect();
        let token = format!("snap-token-{}", suffix.to_lowercase());

        debug!(%order_id, gross_amount_minor, "midtrans: issued snap token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tokens_are_opaque_and_unique() {
        let client = MidtransClient::new("SB-Mid-server-test".to_string());

        let first = client.create_snap_token("ORDER-1-a", 99000).await.unwrap();
        let second = client.create_snap_token("ORDER-1-a", 99000).await.unwrap();

        assert!(first.starts_with("snap-token-"));
        assert_ne!(first, second);
        assert!(!first.contains("ORDER"));
    }
}
