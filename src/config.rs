use std::env;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            _ => StoreBackend::Sqlite,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub store_backend: StoreBackend,
    pub admin_token: String,
    pub whatsapp_access_token: String,
    pub whatsapp_phone_number_id: String,
    pub whatsapp_api_url: String,
    pub notify_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "phonly.db".to_string()),
            store_backend: env::var("STORE_BACKEND")
                .map(|v| StoreBackend::parse(&v))
                .unwrap_or(StoreBackend::Sqlite),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            whatsapp_access_token: env::var("WA_ACCESS_TOKEN").unwrap_or_default(),
            whatsapp_phone_number_id: env::var("WA_PHONE_NUMBER_ID").unwrap_or_default(),
            whatsapp_api_url: env::var("WA_API_URL")
                .unwrap_or_else(|_| "https://graph.facebook.com/v19.0".to_string()),
            notify_timeout_secs: env::var("NOTIFY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        }
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_secs)
    }

    /// WhatsApp notifications need both the token and the sender number id.
    pub fn whatsapp_configured(&self) -> bool {
        !self.whatsapp_access_token.is_empty() && !self.whatsapp_phone_number_id.is_empty()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("https://phonly.in/, http://localhost:5500 ,,");
        assert_eq!(origins, vec!["https://phonly.in", "http://localhost:5500"]);
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(StoreBackend::parse("Memory"), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse("sqlite"), StoreBackend::Sqlite);
        assert_eq!(StoreBackend::parse("mongo"), StoreBackend::Sqlite);
    }
}
