use secrecy::SecretString;

/// Process-wide configuration handed from the CLI to the server.
#[derive(Clone)]
pub struct GlobalArgs {
    pub token_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(token_secret: SecretString) -> Self {
        Self { token_secret }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("token_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("sekrit"));
        assert_eq!(args.token_secret.expose_secret(), "sekrit");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let args = GlobalArgs::new(SecretString::from("sekrit"));
        let rendered = format!("{args:?}");
        assert!(!rendered.contains("sekrit"));
        assert!(rendered.contains("***"));
    }
}
