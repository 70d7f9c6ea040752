use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {name}: pass it explicitly, set {env_var}, or run `movies config notion`")]
    MissingCredential {
        name: &'static str,
        env_var: &'static str,
    },
}
