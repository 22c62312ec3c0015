use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Structured console logger with a persistent file mirror.
///
/// All messages are always written to a log file at
/// `$XDG_CACHE_HOME/setup/setup.log` (default `~/.cache/setup/setup.log`)
/// with timestamps and ANSI codes stripped, regardless of the verbose flag.
pub struct Logger {
    verbose: bool,
    log_file: Option<PathBuf>,
}

/// Return the log file path under `$XDG_CACHE_HOME/setup/` (or `~/.cache/setup/`).
fn log_file_path() -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
        });
    let dir = cache_dir.join("setup");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("setup.log"))
}

/// Strip ANSI escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of SGR sequence)
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Logger {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        let log_file = log_file_path();

        // Write header to log file (new run = fresh log)
        if let Some(ref path) = log_file {
            let version =
                option_env!("SETUP_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
            let header = format!(
                "==========================================\n\
                 Setup {version} {}\n\
                 ==========================================\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            );
            let _ = fs::write(path, header);
        }

        Self { verbose, log_file }
    }

    /// Append a line to the persistent log file.
    fn write_to_file(&self, level: &str, msg: &str) {
        if let Some(ref path) = self.log_file
            && let Ok(mut f) = fs::OpenOptions::new().append(true).open(path)
        {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let clean = strip_ansi(msg);
            let _ = writeln!(f, "{ts} {level} {clean}");
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    pub fn error(&self, msg: &str) {
        eprintln!("\x1b[31mERROR\x1b[0m {msg}");
        self.write_to_file("ERR", msg);
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("\x1b[33mWARN\x1b[0m  {msg}");
        self.write_to_file("WRN", msg);
    }

    pub fn stage(&self, msg: &str) {
        println!("\n\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m");
        self.write_to_file("STG", msg);
    }

    pub fn info(&self, msg: &str) {
        println!("  {msg}");
        self.write_to_file("INF", msg);
    }

    pub fn success(&self, msg: &str) {
        println!("  \x1b[32m{msg}\x1b[0m");
        self.write_to_file("INF", msg);
    }

    /// Secondary guidance printed in blue, mirroring the original hint style.
    pub fn hint(&self, msg: &str) {
        println!("  \x1b[34m{msg}\x1b[0m");
        self.write_to_file("INF", msg);
    }

    pub fn debug(&self, msg: &str) {
        if self.verbose {
            println!("  \x1b[2m{msg}\x1b[0m");
        }
        // Always log debug to file, even when not verbose on terminal
        self.write_to_file("DBG", msg);
    }

    /// Prompt the user to select from a list of options. Returns the selected index.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or the input is not a number
    /// in range; callers re-prompt on error.
    pub fn prompt_select(&self, prompt: &str, options: &[String]) -> io::Result<usize> {
        println!("\n{prompt}");
        for (i, option) in options.iter().enumerate() {
            println!("  \x1b[1m{}\x1b[0m) {option}", i + 1);
        }
        print!("\nSelect [1-{}]: ", options.len());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let choice: usize = input
            .trim()
            .parse()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid selection"))?;

        if choice == 0 || choice > options.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "selection out of range",
            ));
        }

        Ok(choice - 1)
    }
}
