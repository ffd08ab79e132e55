use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenError {
    /// Would be parsed as a flag by the opener command
    #[error("refusing to open option-like url '{0}'")]
    OptionLikeUrl(String),

    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Hands a url to the system browser.
///
/// The browser is started detached with every stdio stream closed and
/// receives nothing but the url: no handle back to this process, no
/// inherited terminal.
#[derive(Debug, Clone, Default)]
pub struct Opener {
    command: Option<String>,
}

impl Opener {
    /// `command` overrides the platform default (`xdg-open`, `open`,
    /// `rundll32 url.dll`). It may carry extra arguments, split on whitespace;
    /// the url goes last.
    pub fn new(command: Option<String>) -> Self {
        Opener {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }

    fn build_command(&self, url: &str) -> Command {
        if let Some(ref configured) = self.command {
            let mut parts = configured.split_whitespace();
            // `new` filtered out blank commands
            let program = parts.next().unwrap_or_default();
            let mut cmd = Command::new(program);
            cmd.args(parts).arg(url);
            return cmd;
        }
        platform_command(std::env::consts::OS, url)
    }

    pub fn open(&self, url: &str) -> Result<(), OpenError> {
        if url.starts_with('-') {
            return Err(OpenError::OptionLikeUrl(url.to_string()));
        }

        let mut cmd = self.build_command(url);
        let program = cmd.get_program().to_string_lossy().into_owned();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|source| OpenError::Spawn {
            program: program.clone(),
            source,
        })?;
        tracing::debug!(pid = child.id(), %program, "launched opener");

        // The launched program may outlive this call; reap it off the UI thread
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::warn!(%program, %status, "opener exited with failure");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(%program, error = %e, "failed to wait for opener"),
        });
        Ok(())
    }
}

/// Default launcher for `os` (as in `std::env::consts::OS`).
///
/// None of these go through a shell, so `&`, `|` and `^` in the url stay
/// literal.
fn platform_command(os: &str, url: &str) -> Command {
    match os {
        "macos" => {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        "windows" => {
            let mut cmd = Command::new("rundll32");
            cmd.arg("url.dll,FileProtocolHandler").arg(url);
            cmd
        }
        _ => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_option_like_urls() {
        let opener = Opener::new(Some("true".into()));
        let err = opener.open("--help").unwrap_err();
        assert!(matches!(err, OpenError::OptionLikeUrl(_)));
    }

    #[test]
    fn blank_command_falls_back_to_default() {
        let opener = Opener::new(Some("   ".into()));
        assert!(opener.command.is_none());
    }

    #[test]
    fn configured_command_gets_url_last() {
        let opener = Opener::new(Some("firefox --new-window".into()));
        let cmd = opener.build_command("https://a.com");
        assert_eq!(cmd.get_program(), "firefox");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["--new-window", "https://a.com"]);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let opener = Opener::new(Some("linkshelf-no-such-opener-xyz".into()));
        let err = opener.open("https://a.com").unwrap_err();
        assert!(matches!(err, OpenError::Spawn { .. }));
        assert!(err.to_string().contains("linkshelf-no-such-opener-xyz"));
    }

    #[cfg(unix)]
    #[test]
    fn launches_configured_program() {
        let opener = Opener::new(Some("true".into()));
        assert!(opener.open("https://a.com").is_ok());
    }

    #[test]
    fn windows_default_bypasses_cmd() {
        let url = "https://x.com/?a=1&calc|b^c";
        let cmd = platform_command("windows", url);
        assert_eq!(cmd.get_program(), "rundll32");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["url.dll,FileProtocolHandler", url]);
    }

    #[test]
    fn unix_defaults_take_url_as_single_argument() {
        let url = "https://x.com/?a=1&b=2";
        for (os, program) in [("linux", "xdg-open"), ("freebsd", "xdg-open"), ("macos", "open")] {
            let cmd = platform_command(os, url);
            assert_eq!(cmd.get_program(), program);
            let args: Vec<_> = cmd.get_args().collect();
            assert_eq!(args, vec![url]);
        }
    }

    /// Children of this process sitting in zombie state
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        let Ok(entries) = std::fs::read_dir("/proc") else {
            return 0;
        };
        entries
            .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path().join("stat")).ok())
            .filter(|stat| {
                // "pid (comm) state ppid ..."; comm may contain spaces
                let Some(rest) = stat.rfind(')').map(|i| &stat[i + 1..]) else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(me.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn launched_programs_are_reaped() {
        use std::time::{Duration, Instant};

        let opener = Opener::new(Some("true".into()));
        for _ in 0..5 {
            opener.open("https://a.com").unwrap();
        }

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let zombies = zombie_children();
            if zombies == 0 {
                break;
            }
            assert!(Instant::now() < deadline, "{} children left unreaped", zombies);
            std::thread::sleep(Duration::from_millis(50));
        }
    }
}
