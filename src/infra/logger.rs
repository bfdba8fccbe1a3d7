use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use env_logger::{Builder, Target};
use log::{Level, debug, info};
use std::io::{self, Write};

pub const LOG_LEVEL_ENV: &str = "CODECOPIER_LOG_LEVEL";

/// Logs go to stderr so they never interleave with the prompt protocol on stdout.
pub fn setup_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose { "debug" } else { "warn" };

    let env = env_logger::Env::default().filter_or(LOG_LEVEL_ENV, level);

    Builder::from_env(env)
        .target(Target::Stderr)
        .format(|buf, record| {
            let level_color = match record.level() {
                Level::Error => "31", // Red
                Level::Warn => "33",  // Yellow
                Level::Info => "32",  // Green
                Level::Debug => "36", // Cyan
                Level::Trace => "35", // Magenta
            };

            writeln!(
                buf,
                "\x1B[{}m[{}]\x1B[0m [{}] {}",
                level_color,
                record.level(),
                buf.timestamp(),
                record.args()
            )
        })
        .format_timestamp_secs()
        .try_init()
}

pub fn print_welcome_message() -> io::Result<()> {
    let mut stdout = io::stdout();

    writeln!(stdout)?;
    stdout.execute(SetForegroundColor(Color::Cyan))?;
    writeln!(stdout, "📋 CodeCopier v{}", env!("CARGO_PKG_VERSION"))?;
    stdout.execute(ResetColor)?;
    writeln!(
        stdout,
        "Answer y/n for each file, p to add files by glob pattern, q to finish early"
    )?;
    writeln!(stdout)?;

    debug!("Debug logging enabled");
    info!("Starting CodeCopier...");
    Ok(())
}
