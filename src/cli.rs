use clap::Parser;

#[derive(Parser)]
#[clap(about, version)]
pub struct Cli {
    /// HTTP server host
    #[clap(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// HTTP server port
    #[clap(short = 'p', long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Log fewer messages
    #[clap(short = 'q', long)]
    pub quiet: bool,

    /// Path to the SQLite database, or `:memory:`
    #[clap(long = "db-url", env = "DB_URL")]
    pub db_url: String,

    /// Maximum length of each message field
    #[clap(long, env = "COLUMN_LENGTH", default_value_t = 255)]
    pub column_length: usize,

    /// Response text when no receiver is given
    #[clap(long, env = "NO_MESSAGES", default_value = "No messages")]
    pub no_messages: String,

    /// Response text after deleting messages
    #[clap(long, env = "DELETE_MESSAGES", default_value = "Messages deleted")]
    pub delete_messages: String,

    /// Response text after writing a message
    #[clap(long, env = "UPLOAD_MESSAGES", default_value = "Message uploaded")]
    pub upload_messages: String,

    /// Username accepted by HTTP basic authentication
    #[clap(long, env = "AUTH_USER")]
    pub auth_user: String,

    /// Password accepted by HTTP basic authentication
    #[clap(long, env = "AUTH_PASSWORD", hide_env_values = true)]
    pub auth_password: String,
}
