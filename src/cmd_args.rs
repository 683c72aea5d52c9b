use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Optional. Profile to read the server origin from. Default is 'default'.
    /// If the profile is not configured, the default local server is used.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Server origin
    /// Optional. Overrides the server configured in the profile.
    #[clap(short = 's', long, help = "server origin, e.g. http://localhost:8000")]
    server: Option<String>,

    /// Verbose mode
    /// Optional. Raise the default log level to debug.
    #[clap(
        short = 'v',
        long,
        help = "Log debug messages",
        default_value = "false"
    )]
    verbose: bool,

    /// Log file
    /// Optional. Write logs to this file. Without it nothing is logged,
    /// since the terminal is in raw mode while the client runs.
    #[clap(long, help = "write logs to this file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    server: Option<String>,
    verbose: bool,
    log_file: Option<PathBuf>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            server: args.server,
            verbose: args.verbose,
            log_file: args.log_file,
        }
    }
}
