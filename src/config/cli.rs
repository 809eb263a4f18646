use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "staybook")]
#[command(about = "Browse demo properties, book stays and message hosts")]
#[command(
    after_help = "Demo accounts: user@example.com / password123 (guest), host@example.com / password123 (host)"
)]
pub struct CliConfig {
    /// TOML 設定檔路徑
    #[arg(short, long)]
    pub config: Option<String>,

    /// 覆蓋設定檔中的資料目錄
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct Credentials {
    #[arg(long, default_value = "user@example.com")]
    pub email: String,

    #[arg(long, default_value = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the property catalog
    Properties,

    /// Price a stay without booking it
    Quote {
        #[arg(long)]
        property: String,
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
    },

    /// Confirm a booking
    Book {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        property: String,
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
        #[arg(long, default_value = "1")]
        guests: u32,
    },

    /// List the signed-in guest's bookings
    Bookings {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Change a booking's status (pending, confirmed, cancelled, completed)
    Status {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },

    /// Delete a booking
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Open (or reuse) a conversation with a property's host
    Contact {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        property: String,
        #[arg(long)]
        booking: Option<String>,
    },

    /// List the signed-in user's conversations
    Conversations {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Send a message in a conversation
    Send {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        conversation: String,
        #[arg(long)]
        content: String,
    },

    /// Show a conversation's messages
    Messages {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        conversation: String,
    },

    /// Write every collection as JSON arrays into a directory
    Export {
        #[arg(long, default_value = "./export")]
        out_dir: String,
    },

    /// Load JSON arrays previously written by `export`
    Import {
        #[arg(long, default_value = "./export")]
        from_dir: String,
    },
}
