use clap::{Parser, Subcommand};

/// Command-line interface definition for ramenlog
#[derive(Parser)]
#[command(
    name = "ramenlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Ramen log client: track visited shops, follow friends and see who wants ramen right now",
    long_about = None
)]
pub struct Cli {
    /// Use another configuration file
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(global = true, long = "api", value_name = "URL")]
    pub api: Option<String>,

    /// Talk to the bundled mock backend instead of the server
    #[arg(global = true, long = "mock")]
    pub mock: bool,

    /// Latitude of the current position
    #[arg(global = true, long = "lat", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position
    #[arg(global = true, long = "lon", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Refuse to share the location (as if the permission prompt was declined)
    #[arg(global = true, long = "deny-location")]
    pub deny_location: bool,

    /// Print debug logs on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file
    Init {
        #[arg(long, help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, help = "Password (read from stdin when omitted)")]
        password: Option<String>,

        #[arg(long, help = "Password confirmation (defaults to --password)")]
        confirm: Option<String>,
    },

    /// Log in and cache the tokens
    Login {
        #[arg(long)]
        username: String,

        #[arg(long, help = "Password (read from stdin when omitted)")]
        password: Option<String>,
    },

    /// Forget the cached tokens
    Logout,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// List friends who want ramen right now
    Friends {
        #[arg(long, short, help = "Only friends in this municipality")]
        municipality: Option<String>,

        #[arg(long, help = "Only friends in this time slot (now, lunch, night)")]
        slot: Option<String>,

        #[arg(long, short, help = "Only friends whose name contains this text")]
        search: Option<String>,

        #[arg(long, help = "Print the list as JSON")]
        json: bool,
    },

    /// Set or show your own ikitai status
    Ikitai {
        #[command(subcommand)]
        action: IkitaiAction,
    },

    /// Interactive ikitai board (type `help` for commands)
    Board,

    /// Send a follow request
    Follow { user_id: i64 },

    /// Stop following a user
    Unfollow { user_id: i64 },

    /// Approve a pending follow request
    Approve { user_id: i64 },

    /// Deny a pending follow request
    Deny { user_id: i64 },

    /// Users you follow
    Following {
        #[arg(long, short, help = "Only users whose name or email contains this text")]
        search: Option<String>,
    },

    /// Users following you
    Followers {
        #[arg(long, short, help = "Only users whose name or email contains this text")]
        search: Option<String>,
    },

    /// Pending follow requests addressed to you
    Requests {
        #[arg(long, short, help = "Only requests whose sender name or email contains this text")]
        search: Option<String>,
    },

    /// Ramen log: visited shops and reviews
    Log {
        #[command(subcommand)]
        action: LogAction,
    },
}

#[derive(Subcommand)]
pub enum IkitaiAction {
    /// Turn the status on (shares your location)
    On {
        #[arg(long, help = "Time slot: now, lunch or night")]
        slot: Option<String>,
    },

    /// Turn the status off
    Off,

    /// Change the time slot
    Slot { slot: String },

    /// Show your current status
    Show,
}

#[derive(Subcommand)]
pub enum LogAction {
    /// List entries, newest visit first
    List,

    /// Show one entry
    Show { id: i64 },

    /// Record a visit
    Add {
        /// Shop name
        shop: String,

        #[arg(long, help = "Your name on the entry (defaults to the login name)")]
        user: Option<String>,

        #[arg(long, help = "What you ordered")]
        item: Option<String>,

        #[arg(long, help = "Noodle hardness (e.g. バリカタ)")]
        hardness: Option<String>,

        #[arg(long)]
        toppings: Option<String>,

        #[arg(long, help = "Rating from 0.0 to 5.0")]
        rating: Option<f64>,

        #[arg(long, help = "Visit date (YYYY-MM-DD or 'YYYY-MM-DD HH:MM')")]
        date: Option<String>,
    },

    /// Delete an entry
    Del { id: i64 },
}
