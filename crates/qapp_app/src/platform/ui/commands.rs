//! Console event routing: one line of input becomes one core message.

use qapp_core::{HostMessage, Msg, TabId};
use qapp_engine::{parse_host_message, HostEvent};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  url <text>          set the URL field
  depth <n>           set the crawl depth
  assets on|off       include page assets
  submit              submit the form
  toggle <job-id>     expand or collapse a job
  logs <job-id>       show the raw job record
  archive <job-id>    open the job's archive in a tab
  tab <tab-id>        switch to a tab
  controls            switch to the controls pane
  close <tab-id>      close a tab
  refresh <tab-id>    reload a tab's content
  popout <tab-id>     open a tab's content as a standalone file
  pause | resume      stop or restart polling
  host <json>         deliver a host message, e.g. {\"type\":\"themeChange\"}
  dismiss             clear the alert
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("not a host message: {0}")]
    NotHostMessage(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };
    let arg = rest.trim();

    let msg = match word {
        "help" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "url" => Msg::UrlInputChanged(arg.to_string()),
        "depth" => Msg::DepthChanged(arg.parse().map_err(|_| CommandError::BadArgument {
            command: "depth",
            expected: "a non-negative number",
        })?),
        "assets" => Msg::AssetsToggled(match arg {
            "on" | "true" | "yes" => true,
            "off" | "false" | "no" => false,
            _ => {
                return Err(CommandError::BadArgument {
                    command: "assets",
                    expected: "on or off",
                })
            }
        }),
        "submit" => Msg::SubmitClicked,
        "toggle" => Msg::JobRowClicked(job_id("toggle", arg)?),
        "logs" => Msg::ViewLogsClicked(job_id("logs", arg)?),
        "archive" => Msg::GetArchiveClicked(job_id("archive", arg)?),
        "tab" => Msg::TabSelected(tab_id("tab", arg)?),
        "controls" => Msg::ControlsSelected,
        "close" => Msg::TabCloseClicked(tab_id("close", arg)?),
        "refresh" => Msg::TabRefreshClicked(tab_id("refresh", arg)?),
        "popout" => Msg::TabPopOutClicked(tab_id("popout", arg)?),
        "pause" => Msg::PollingSuspended,
        "resume" => Msg::PollingResumed,
        "dismiss" => Msg::AlertDismissed,
        "host" => {
            let event = parse_host_message(arg)
                .ok_or_else(|| CommandError::NotHostMessage(arg.to_string()))?;
            Msg::HostMessageReceived(match event {
                HostEvent::ThemeChange => HostMessage::ThemeChange,
                HostEvent::Other(kind) => HostMessage::Other(kind),
            })
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(Command::Dispatch(msg)))
}

fn job_id(command: &'static str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        return Err(CommandError::BadArgument {
            command,
            expected: "a job id",
        });
    }
    Ok(arg.to_string())
}

fn tab_id(command: &'static str, arg: &str) -> Result<TabId, CommandError> {
    arg.parse().map_err(|_| CommandError::BadArgument {
        command,
        expected: "a tab number",
    })
}
