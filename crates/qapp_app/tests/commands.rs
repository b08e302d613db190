use pretty_assertions::assert_eq;
use qapp_app::platform::ui::commands::{parse_command, Command, CommandError};
use qapp_core::{HostMessage, Msg};

fn dispatched(line: &str) -> Msg {
    match parse_command(line) {
        Ok(Some(Command::Dispatch(msg))) => msg,
        other => panic!("{line:?} parsed to {other:?}"),
    }
}

#[test]
fn form_commands_map_to_form_messages() {
    assert_eq!(
        dispatched("url https://example.com/a b"),
        Msg::UrlInputChanged("https://example.com/a b".into())
    );
    assert_eq!(dispatched("url"), Msg::UrlInputChanged(String::new()));
    assert_eq!(dispatched("depth 3"), Msg::DepthChanged(3));
    assert_eq!(dispatched("assets on"), Msg::AssetsToggled(true));
    assert_eq!(dispatched("assets off\r\n"), Msg::AssetsToggled(false));
    assert_eq!(dispatched("submit"), Msg::SubmitClicked);
}

#[test]
fn job_and_tab_commands_carry_ids() {
    assert_eq!(dispatched("toggle 5f2c"), Msg::JobRowClicked("5f2c".into()));
    assert_eq!(dispatched("logs 5f2c"), Msg::ViewLogsClicked("5f2c".into()));
    assert_eq!(dispatched("archive 5f2c"), Msg::GetArchiveClicked("5f2c".into()));
    assert_eq!(dispatched("tab 2"), Msg::TabSelected(2));
    assert_eq!(dispatched("controls"), Msg::ControlsSelected);
    assert_eq!(dispatched("close 2"), Msg::TabCloseClicked(2));
    assert_eq!(dispatched("refresh 2"), Msg::TabRefreshClicked(2));
    assert_eq!(dispatched("popout 2"), Msg::TabPopOutClicked(2));
}

#[test]
fn visibility_and_host_commands() {
    assert_eq!(dispatched("pause"), Msg::PollingSuspended);
    assert_eq!(dispatched("resume"), Msg::PollingResumed);
    assert_eq!(dispatched("dismiss"), Msg::AlertDismissed);
    assert_eq!(
        dispatched(r#"host {"type":"themeChange"}"#),
        Msg::HostMessageReceived(HostMessage::ThemeChange)
    );
    assert_eq!(
        dispatched(r#"host {"type":"other"}"#),
        Msg::HostMessageReceived(HostMessage::Other("other".into()))
    );
}

#[test]
fn control_commands_and_blank_lines() {
    assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
    assert_eq!(parse_command("help"), Ok(Some(Command::Help)));
    assert_eq!(parse_command("   "), Ok(None));
    assert_eq!(parse_command(""), Ok(None));
}

#[test]
fn bad_input_is_rejected() {
    assert_eq!(
        parse_command("frobnicate"),
        Err(CommandError::Unknown("frobnicate".into()))
    );
    assert!(matches!(
        parse_command("depth deep"),
        Err(CommandError::BadArgument { command: "depth", .. })
    ));
    assert!(matches!(
        parse_command("tab first"),
        Err(CommandError::BadArgument { command: "tab", .. })
    ));
    assert!(matches!(
        parse_command("toggle"),
        Err(CommandError::BadArgument { command: "toggle", .. })
    ));
    assert!(matches!(
        parse_command("assets maybe"),
        Err(CommandError::BadArgument { command: "assets", .. })
    ));
    assert!(matches!(
        parse_command("host themeChange"),
        Err(CommandError::NotHostMessage(_))
    ));
}
