use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "agent-term")]
#[command(about = "A workspace terminal driven by an append-only command log")]
pub struct AppArgs {
    #[arg(long, help = "JSON config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "User shown in the prompt")]
    pub user: Option<String>,

    #[arg(long, help = "Host shown in the prompt")]
    pub host: Option<String>,

    #[arg(long, help = "Working directory shown in the prompt")]
    pub cwd: Option<String>,

    #[arg(long, help = "Directory commands run in (current directory if not specified)")]
    pub workdir: Option<PathBuf>,

    #[arg(long, help = "Shell used to run commands")]
    pub shell: Option<String>,

    #[arg(long, help = "Serve the session web transport on this port")]
    pub web_port: Option<u16>,

    #[arg(long, help = "Read commands from stdin and print the scrollback on exit")]
    pub headless: bool,

    #[arg(long, help = "Lines kept by the headless scrollback")]
    pub scrollback: Option<usize>,

    #[arg(long, help = "Log filter (or set AGENT_TERM_LOG)")]
    pub log_level: Option<String>,

    #[arg(long, help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
