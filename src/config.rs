use crate::cli::Cli;

/// Options shared by the store and the request handlers
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub db_uri: String,
    pub max_field_length: usize,
    pub no_messages_text: String,
    pub deleted_text: String,
    pub uploaded_text: String,
    pub auth_user: String,
    pub auth_password: String,
}

impl Config {
    /// Extract the service configuration from the parsed command line
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_uri: cli.db_url.clone(),
            max_field_length: cli.column_length,
            no_messages_text: cli.no_messages.clone(),
            deleted_text: cli.delete_messages.clone(),
            uploaded_text: cli.upload_messages.clone(),
            auth_user: cli.auth_user.clone(),
            auth_password: cli.auth_password.clone(),
        }
    }

    /// Construct a configuration for tests backed by an in-memory database
    #[cfg(test)]
    pub fn mock() -> Self {
        Self {
            db_uri: ":memory:".to_owned(),
            max_field_length: 255,
            no_messages_text: "No messages".to_owned(),
            deleted_text: "Messages deleted".to_owned(),
            uploaded_text: "Message uploaded".to_owned(),
            auth_user: "user".to_owned(),
            auth_password: "secret".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from([
            "mailbox",
            "--db-url",
            "mail.db",
            "--auth-user",
            "user",
            "--auth-password",
            "secret",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(
            config,
            Config {
                db_uri: "mail.db".to_owned(),
                ..Config::mock()
            }
        );
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "mailbox",
            "--db-url",
            ":memory:",
            "--column-length",
            "64",
            "--no-messages",
            "empty",
            "--delete-messages",
            "gone",
            "--upload-messages",
            "sent",
            "--auth-user",
            "admin",
            "--auth-password",
            "hunter2",
            "-p",
            "8080",
        ])
        .unwrap();
        assert_eq!(
            Config::from_cli(&cli),
            Config {
                db_uri: ":memory:".to_owned(),
                max_field_length: 64,
                no_messages_text: "empty".to_owned(),
                deleted_text: "gone".to_owned(),
                uploaded_text: "sent".to_owned(),
                auth_user: "admin".to_owned(),
                auth_password: "hunter2".to_owned(),
            }
        );
        assert_eq!(cli.port, 8080);
    }
}
