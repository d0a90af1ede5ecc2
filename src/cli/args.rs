use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "englishmaster",
    version,
    about = "EnglishMaster tutoring client",
    long_about = "Drives the EnglishMaster pages headlessly: sign in, register, browse the leaderboards and manage meetings.\n\nExamples:\n  englishmaster login --email ana@example.ro --password secret1\n  englishmaster leaderboard --page 2\n  englishmaster professors --level B2 -o json\n  englishmaster --config ~/.englishmaster/config.yml book --professor 4 --date 2026-11-02T18:30\n\nTip: Use --config to persist the server address and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        global = true,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        global = true,
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        global = true,
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        global = true,
        help_heading = "Output",
        help = "Listing format: text, json or html."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.englishmaster/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "base-url",
        value_name = "URL",
        global = true,
        help_heading = "Server",
        help = "Server base URL."
    )]
    pub base_url: Option<String>,

    #[arg(
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "Server",
        help = "Request timeout in seconds (default: none)."
    )]
    pub timeout: Option<u64>,

    #[arg(
        long = "st",
        visible_alias = "storage",
        value_name = "FILE",
        global = true,
        help_heading = "Input",
        help = "Local storage file (defaults to ~/.englishmaster/storage.json)."
    )]
    pub storage: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in and remember the email for next time.
    Login(LoginArgs),
    /// Create a student account.
    Register(RegisterArgs),
    /// Global students ranking.
    Leaderboard(LeaderboardArgs),
    /// Professors ranking, optionally filtered by level.
    Professors(ProfessorsArgs),
    /// Request a meeting with a professor.
    Book(BookArgs),
    /// Confirm or reject a meeting request.
    Respond(RespondArgs),
    /// Cancel a meeting; points are returned.
    Cancel(CancelArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Defaults to the last email used.
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,
    #[arg(long, value_name = "PASSWORD", default_value = "")]
    pub password: String,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long = "first-name", value_name = "NAME", default_value = "")]
    pub first_name: String,
    #[arg(long = "last-name", value_name = "NAME", default_value = "")]
    pub last_name: String,
    #[arg(long, value_name = "EMAIL", default_value = "")]
    pub email: String,
    #[arg(long, value_name = "PASSWORD", default_value = "")]
    pub password: String,
    #[arg(long = "confirm-password", value_name = "PASSWORD", default_value = "")]
    pub confirm_password: String,
}

#[derive(Args, Debug, Clone)]
pub struct LeaderboardArgs {
    #[arg(short = 'p', long, value_name = "N", default_value_t = 1)]
    pub page: u32,
    #[arg(long = "per-page", value_name = "N")]
    pub per_page: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct ProfessorsArgs {
    /// A1..C2, or `all`.
    #[arg(short = 'l', long, value_name = "LEVEL", default_value = "all")]
    pub level: String,
}

#[derive(Args, Debug, Clone)]
pub struct BookArgs {
    #[arg(long = "professor", value_name = "ID", default_value = "")]
    pub professor_id: String,
    #[arg(long = "name", value_name = "NAME", default_value = "")]
    pub professor_name: String,
    /// Local date-time, `YYYY-MM-DDTHH:MM`.
    #[arg(long, value_name = "DATETIME", default_value = "")]
    pub date: String,
    #[arg(short = 'm', long, value_name = "TEXT", default_value = "")]
    pub message: String,
}

#[derive(Args, Debug, Clone)]
pub struct RespondArgs {
    #[arg(long = "meeting", value_name = "ID")]
    pub meeting_id: i64,
    /// `confirm` or `reject`.
    #[arg(long, value_name = "ACTION")]
    pub action: String,
    #[arg(short = 'm', long, value_name = "TEXT", default_value = "")]
    pub message: String,
    /// Only sent when confirming.
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CancelArgs {
    #[arg(long = "meeting", value_name = "ID")]
    pub meeting_id: i64,
    /// Answer the confirmation prompt with yes.
    #[arg(short = 'y', long)]
    pub yes: bool,
}
