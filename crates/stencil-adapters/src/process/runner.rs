//! Runs package manager commands with `std::process::Command`.

use std::process::{Command, Stdio as ChildStdio};

use stencil_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandLine, ProcessExit, Stdio},
    error::{Context, StencilResult},
};
use tracing::{debug, instrument};

/// Characters `cmd.exe` treats specially outside quotes.
#[cfg_attr(not(windows), allow(dead_code))]
const CMD_METACHARS: &str = "()[]%!^\"`<>&|;, *?";

/// Production command runner.
///
/// Blocks until the child exits. On Windows the command goes through
/// `cmd /D /S /C` so that `npm.cmd` and `yarnpkg.cmd` shims are found; every
/// argument is quoted and caret-escaped so it reaches the shim as one word.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    pub fn new() -> Self {
        Self
    }

    fn build(command: &CommandLine) -> Command {
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;

            let line = std::iter::once(escape_program(&command.program))
                .chain(command.args.iter().map(|arg| escape_argument(arg)))
                .collect::<Vec<_>>()
                .join(" ");
            let mut child = Command::new("cmd");
            child.args(["/D", "/S", "/C"]).raw_arg(format!("\"{line}\""));
            child
        }
        #[cfg(not(windows))]
        {
            let mut child = Command::new(&command.program);
            child.args(&command.args);
            child
        }
    }
}

/// Program name for a `cmd /S /C` line.
#[cfg_attr(not(windows), allow(dead_code))]
fn escape_program(program: &str) -> String {
    caret_escape(program)
}

/// One argument for a `cmd /S /C` line that runs a batch shim.
///
/// Quoted for `CommandLineToArgvW`, then caret-escaped twice: once for the
/// outer `cmd`, once more for the shim re-parsing `%*`.
#[cfg_attr(not(windows), allow(dead_code))]
fn escape_argument(arg: &str) -> String {
    caret_escape(&caret_escape(&quote_argument(arg)))
}

#[cfg_attr(not(windows), allow(dead_code))]
fn quote_argument(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');

    let mut backslashes = 0;
    for c in arg.chars() {
        if c == '\\' {
            backslashes += 1;
            continue;
        }
        let escapes = if c == '"' { backslashes * 2 + 1 } else { backslashes };
        quoted.extend(std::iter::repeat_n('\\', escapes));
        quoted.push(c);
        backslashes = 0;
    }
    quoted.extend(std::iter::repeat_n('\\', backslashes * 2));

    quoted.push('"');
    quoted
}

#[cfg_attr(not(windows), allow(dead_code))]
fn caret_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if CMD_METACHARS.contains(c) {
            out.push('^');
        }
        out.push(c);
    }
    out
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip(self), fields(command = %command))]
    fn run(&self, command: &CommandLine, stdio: Stdio) -> StencilResult<ProcessExit> {
        let mut child = Self::build(command);
        child.stdin(ChildStdio::inherit()).stderr(ChildStdio::inherit());

        let spawn_error = |e: std::io::Error| ApplicationError::CommandSpawn {
            command: command.to_string(),
            reason: e.to_string(),
        };

        let exit = match stdio {
            Stdio::Inherit => {
                let status = child
                    .stdout(ChildStdio::inherit())
                    .status()
                    .map_err(spawn_error)?;
                ProcessExit::new(status.code(), "")
            }
            Stdio::Capture => {
                let output = child
                    .stdout(ChildStdio::piped())
                    .output()
                    .map_err(spawn_error)?;
                let stdout = String::from_utf8(output.stdout)
                    .context(format!("decoding output of `{command}`"))?;
                ProcessExit::new(output.status.code(), stdout)
            }
        };

        debug!(status = ?exit.status, "command exited");
        Ok(exit)
    }
}
