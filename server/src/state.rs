use std::sync::Arc;

use anyhow::Result;
use uibo_hunyuan::HunyuanClient;

use crate::config::Config;

pub struct AppState {
    /// `None` until both secrets are configured; the route reports a
    /// misconfiguration without attempting any network call.
    pub hunyuan: Option<HunyuanClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let hunyuan = match config.credentials {
            Some(credentials) => {
                let client = HunyuanClient::new(credentials.secret_id, credentials.secret_key)?;
                Some(match config.endpoint {
                    Some(endpoint) => client.with_endpoint(endpoint),
                    None => client,
                })
            }
            None => None,
        };

        Ok(Arc::new(Self { hunyuan }))
    }
}
