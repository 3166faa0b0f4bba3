//! End-to-end controller flows against a scripted toolchain and host

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use xcdemon_app::test_utils::FakeHost;
use xcdemon_app::{
    AppState, Controller, Engine, Message, MessageLevel, PaletteCommand, PanelMessage,
    PanelRequest,
};
use xcdemon_core::DescriptorKind;
use xcdemon_toolchain::commands::{
    boot_simulator_command, install_app_command, launch_app_command, open_simulator_command,
    read_bundle_id_command, simulator_build_command,
};
use xcdemon_toolchain::schemes::list_command;
use xcdemon_toolchain::simulators::list_devices_command;
use xcdemon_toolchain::test_utils::FakeRunner;
use xcdemon_toolchain::ToolOutput;

const SIMCTL_JSON: &str = r#"{"devices": {"com.apple.CoreSimulator.SimRuntime.iOS-17-0": [
    {"udid": "AAA", "name": "iPhone 15", "isAvailable": true},
    {"udid": "BBB", "name": "iPad Air", "isAvailable": true}
]}}"#;

/// A workspace with `Foo.xcodeproj` and a DerivedData folder holding `Foo.app`
struct Fixture {
    _workspace: TempDir,
    _derived: TempDir,
    root: PathBuf,
    descriptor: PathBuf,
    derived_data: PathBuf,
    app: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let workspace = TempDir::new().unwrap();
        let derived = TempDir::new().unwrap();

        let descriptor = workspace.path().join("Foo.xcodeproj");
        fs::create_dir_all(&descriptor).unwrap();

        let app = derived
            .path()
            .join("Foo-abcdef/Build/Products/Debug-iphonesimulator/Foo.app");
        fs::create_dir_all(&app).unwrap();

        Self {
            root: workspace.path().to_path_buf(),
            derived_data: derived.path().to_path_buf(),
            descriptor,
            app,
            _workspace: workspace,
            _derived: derived,
        }
    }

    fn runner(&self) -> FakeRunner {
        FakeRunner::new()
            .respond(
                list_command(DescriptorKind::Project, &self.descriptor),
                ToolOutput::ok("    Schemes:\n        Foo\n        FooTests\n"),
            )
            .respond(list_devices_command(), ToolOutput::ok(SIMCTL_JSON))
            .respond(
                read_bundle_id_command(&self.app),
                ToolOutput::ok("com.example.foo\n"),
            )
    }

    fn engine(&self, host: FakeHost) -> Engine<FakeRunner, FakeHost> {
        let mut state = AppState::new(vec![self.root.clone()]);
        state.settings.run.derived_data = self.derived_data.display().to_string();
        Engine::with_controller(Controller::new(state, self.runner(), host))
    }

    fn build_command(&self, scheme: &str, device_id: &str) -> xcdemon_toolchain::ToolCommand {
        simulator_build_command(
            DescriptorKind::Project,
            &self.descriptor,
            scheme,
            device_id,
            "Debug",
        )
    }
}

async fn run_messages(engine: &mut Engine<FakeRunner, FakeHost>, messages: Vec<Message>) {
    for message in messages {
        engine.msg_tx.send(message).await.unwrap();
    }
    engine.msg_tx.send(Message::Quit).await.unwrap();
    engine.run().await;
}

fn last_snapshot(host: &FakeHost) -> PanelMessage {
    host.posted().last().cloned().expect("at least one snapshot")
}

#[tokio::test]
async fn test_select_then_run_full_pipeline() {
    let fixture = Fixture::new();
    let host = FakeHost::new().choose("FooTests").choose_index(0);
    let mut engine = fixture.engine(host);

    run_messages(
        &mut engine,
        vec![
            PanelRequest::SelectScheme.into(),
            PanelRequest::SelectDevice.into(),
            PanelRequest::RunApp.into(),
        ],
    )
    .await;

    let host = engine.host();
    let commands: Vec<_> = host
        .terminal_commands()
        .into_iter()
        .map(|(_, command)| command)
        .collect();
    assert_eq!(
        commands,
        vec![
            boot_simulator_command("AAA"),
            open_simulator_command(),
            fixture.build_command("FooTests", "AAA"),
            install_app_command("AAA", &fixture.app),
            launch_app_command("AAA", "com.example.foo"),
        ]
    );
    assert!(host
        .terminal_commands()
        .iter()
        .all(|(terminal, _)| terminal == "XcDemon"));

    assert_eq!(host.infos(), vec!["Running Foo on iPhone 15"]);
    assert!(host.errors().is_empty());

    let snapshot = last_snapshot(host);
    let info = snapshot.project_info().unwrap();
    assert_eq!(info.selected_scheme, "FooTests");
    assert_eq!(info.selected_device.as_ref().unwrap().id, "AAA");
}

#[tokio::test]
async fn test_run_without_selection_prompts_for_this_run_only() {
    let fixture = Fixture::new();
    let host = FakeHost::new().choose("Foo").choose("iPad Air (iOS-17-0)");
    let mut engine = fixture.engine(host);

    run_messages(&mut engine, vec![PanelRequest::RunApp.into()]).await;

    let host = engine.host();
    let prompts = host.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].placeholder, "Select a scheme");
    assert_eq!(prompts[1].placeholder, "Select a device");
    assert_eq!(
        prompts[1].items,
        vec!["iPhone 15 (iOS-17-0)", "iPad Air (iOS-17-0)"]
    );

    assert!(host
        .terminal_commands()
        .iter()
        .any(|(_, command)| *command == fixture.build_command("Foo", "BBB")));

    // One-off choices do not become the selection
    assert_eq!(engine.state().selection.scheme(), None);
    assert!(engine.state().selection.device().is_none());
}

#[tokio::test]
async fn test_build_failure_stops_run() {
    let fixture = Fixture::new();
    let host = FakeHost::new()
        .choose("Foo")
        .choose_index(1)
        .exit_code(fixture.build_command("Foo", "BBB"), Some(65));
    let mut engine = fixture.engine(host);

    run_messages(
        &mut engine,
        vec![
            PanelRequest::SelectScheme.into(),
            PanelRequest::SelectDevice.into(),
            PanelRequest::RunApp.into(),
        ],
    )
    .await;

    let host = engine.host();
    assert_eq!(host.errors(), vec!["Run failed at step: build"]);
    assert_eq!(host.terminal_commands().len(), 3);
}

#[tokio::test]
async fn test_cancelled_build_prompt_runs_nothing() {
    let fixture = Fixture::new();
    let mut engine = fixture.engine(FakeHost::new().cancel());

    run_messages(&mut engine, vec![PanelRequest::BuildApp.into()]).await;

    assert!(engine.host().terminal_commands().is_empty());
    assert!(engine.host().messages().is_empty());
}

#[tokio::test]
async fn test_clean_with_selected_scheme() {
    let fixture = Fixture::new();
    let mut engine = fixture.engine(FakeHost::new().choose("Foo"));

    run_messages(
        &mut engine,
        vec![
            PanelRequest::SelectScheme.into(),
            PanelRequest::CleanBuild.into(),
        ],
    )
    .await;

    let host = engine.host();
    assert_eq!(
        host.messages(),
        vec![(MessageLevel::Info, "Cleaning Foo".to_string())]
    );
    let (_, command) = host.terminal_commands().pop().unwrap();
    assert_eq!(command.program, "xcodebuild");
    assert!(command.args.contains(&"clean".to_string()));
}

#[tokio::test]
async fn test_no_project_reports_error() {
    let workspace = TempDir::new().unwrap();
    let state = AppState::new(vec![workspace.path().to_path_buf()]);
    let mut engine =
        Engine::with_controller(Controller::new(state, FakeRunner::new(), FakeHost::new()));

    run_messages(
        &mut engine,
        vec![
            PanelRequest::SelectDevice.into(),
            PanelRequest::RunApp.into(),
        ],
    )
    .await;

    let host = engine.host();
    assert_eq!(
        host.errors(),
        vec!["No Xcode project found.", "No Xcode project found."]
    );
    assert_eq!(
        host.posted(),
        vec![PanelMessage::UpdateContent { project_info: None }]
    );
}

#[tokio::test]
async fn test_hidden_panel_refreshes_on_focus() {
    let fixture = Fixture::new();
    let mut engine = fixture.engine(FakeHost::new());

    run_messages(
        &mut engine,
        vec![
            Message::VisibilityChanged(false),
            PaletteCommand::FocusPanel.into(),
        ],
    )
    .await;

    assert!(engine.state().panel_visible);
    // Initial refresh plus the one on becoming visible
    assert_eq!(engine.host().posted().len(), 2);
}
