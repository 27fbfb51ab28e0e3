use std::env;

use lazy_static::lazy_static;

use crate::obfuscation::ObfuscationKeys;

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

/// Where payouts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

impl StorageBackend {
    /// Parse the backend name, falling back to MongoDB for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => StorageBackend::Memory,
            _ => StorageBackend::MongoDb,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub storage_backend: StorageBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub obfuscate_ids_cipher_key: String,
    pub obfuscate_ids_numeric_cipher_key: String,
    pub seed_payouts_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid number"),
            storage_backend: StorageBackend::from_str(
                &env::var("STORAGE_BACKEND").unwrap_or_else(|_| "mongodb".to_string()),
            ),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "payouts".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-super-secret-jwt-key-change-in-production".to_string()),
            obfuscate_ids_cipher_key: env::var("OBFUSCATE_IDS_CIPHER_KEY")
                .unwrap_or_else(|_| "dev-general-cipher-key-change-in-production".to_string()),
            obfuscate_ids_numeric_cipher_key: env::var("OBFUSCATE_IDS_NUMERIC_CIPHER_KEY")
                .unwrap_or_else(|_| "dev-numeric-cipher-key-change-in-production".to_string()),
            seed_payouts_path: env::var("SEED_PAYOUTS_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        }
    }

    /// Key material for the id codec. Each key rotates independently.
    pub fn obfuscation_keys(&self) -> ObfuscationKeys {
        ObfuscationKeys::new(
            self.obfuscate_ids_cipher_key.as_bytes(),
            self.obfuscate_ids_numeric_cipher_key.as_bytes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!(StorageBackend::from_str("memory"), StorageBackend::Memory);
        assert_eq!(StorageBackend::from_str(" In-Memory "), StorageBackend::Memory);
        assert_eq!(StorageBackend::from_str("mongodb"), StorageBackend::MongoDb);
        assert_eq!(StorageBackend::from_str("anything"), StorageBackend::MongoDb);
    }
}
