use crate::env_list;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        match env_list("ALLOWED_ORIGINS") {
            Some(allowed_origins) => Self { allowed_origins },
            None => Self::default(),
        }
    }
}
