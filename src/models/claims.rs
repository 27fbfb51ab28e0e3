//! JWT Claims model.

use serde::{Deserialize, Serialize};

/// JWT Claims structure.
///
/// Tokens are issued by the platform's authorization server; this service only
/// verifies them and reads the seller they belong to.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // seller id, as a general token
    pub exp: usize,  // expiration timestamp
    pub iat: usize,  // issued at timestamp
}
