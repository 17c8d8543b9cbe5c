pub mod server;

use secrecy::SecretString;

/// Actions returned by the CLI dispatcher.
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        token_secret: SecretString,
    },
}
