use mongodb::options::{ClientOptions, Credential, ResolverConfig};
use mongodb::{Client, Database};
use tracing::info;

use crate::config::mongo_conf::MongoConfig;

/// One pooled client shared by every department repository.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("UnderwritingBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client created");
    Ok(client.database(&config.database))
}

pub(crate) fn skip_for(page: u32, limit: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_for() {
        assert_eq!(skip_for(1, 20), 0);
        assert_eq!(skip_for(3, 20), 40);
        assert_eq!(skip_for(0, 20), 0);
    }
}
