//! Controller: user intents in, state mutations and host calls out
//!
//! Every operation checks its preconditions against [`AppState`], reports a
//! missing project, scheme list or device list to the user, and otherwise
//! either re-runs discovery or hands commands to the host terminal. Nothing
//! here is retried.

use xcdemon_core::prelude::*;
use xcdemon_core::{find_project_excluding, Device, Project};
use xcdemon_toolchain::commands::xcodebuild_command;
use xcdemon_toolchain::{project_info, BuildAction, LocalProcessRunner};

use crate::host::{LocalHost, MessageLevel};
use crate::message::{PaletteCommand, PanelRequest};
use crate::pipeline::{PipelineReport, RunPipeline};
use crate::state::AppState;

pub const NO_PROJECT_MESSAGE: &str = "No Xcode project found.";
pub const NO_SCHEMES_MESSAGE: &str = "No schemes found.";
pub const NO_DEVICES_MESSAGE: &str = "No devices found.";
pub const SCHEME_PLACEHOLDER: &str = "Select a scheme";
pub const DEVICE_PLACEHOLDER: &str = "Select a device";

pub struct Controller<R, H> {
    state: AppState,
    runner: R,
    host: H,
}

impl<R, H> Controller<R, H>
where
    R: LocalProcessRunner,
    H: LocalHost,
{
    pub fn new(state: AppState, runner: R, host: H) -> Self {
        Self {
            state,
            runner,
            host,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Dispatch a panel request
    pub async fn handle(&mut self, request: PanelRequest) {
        debug!("Panel request: {:?}", request);
        match request {
            PanelRequest::Refresh => self.refresh().await,
            PanelRequest::SelectScheme => self.select_scheme().await,
            PanelRequest::SelectDevice => self.select_device().await,
            PanelRequest::RunApp => {
                self.run_app().await;
            }
            PanelRequest::BuildApp => self.build_app().await,
            PanelRequest::CleanBuild => self.clean_build().await,
        }
    }

    /// Dispatch a command-palette entry point
    pub async fn handle_palette(&mut self, command: PaletteCommand) {
        match command {
            PaletteCommand::FocusPanel => self.set_panel_visible(true).await,
            PaletteCommand::RefreshPanel => self.refresh().await,
        }
    }

    /// Record panel visibility, refreshing when it becomes visible
    pub async fn set_panel_visible(&mut self, visible: bool) {
        let became_visible = visible && !self.state.panel_visible;
        self.state.panel_visible = visible;

        if became_visible && self.state.settings.ui.refresh_on_visible {
            self.refresh().await;
        }
    }

    /// Push the current state to the panel
    pub fn post_snapshot(&self) {
        self.host.post(&self.state.snapshot());
    }

    /// Re-run discovery against the first workspace root
    ///
    /// Clears the project when there is no root, no descriptor, or the
    /// project info cannot be built. Selections are left alone. Always posts
    /// a snapshot.
    pub async fn refresh(&mut self) {
        self.state.project = self.discover().await;
        debug!("Readiness after refresh: {:?}", self.state.readiness());
        self.post_snapshot();
    }

    async fn discover(&self) -> Option<Project> {
        let Some(root) = self.state.first_root() else {
            debug!("No workspace root");
            return None;
        };
        if self.state.workspace_roots.len() > 1 {
            debug!(
                "Ignoring {} additional workspace roots",
                self.state.workspace_roots.len() - 1
            );
        }

        let excluded = &self.state.settings.discovery.excluded_segments;
        let Some(descriptor) = find_project_excluding(root, excluded.as_slice()) else {
            info!("No Xcode project in {:?}", root);
            return None;
        };

        match project_info(&self.runner, &descriptor).await {
            Ok(project) => Some(project),
            Err(e) if e.is_recoverable() => {
                warn!("Cannot read project {:?}: {}", descriptor, e);
                None
            }
            Err(e) => {
                error!("Error getting project info: {}", e);
                None
            }
        }
    }

    pub async fn select_scheme(&mut self) {
        let Some(project) = self.require_project() else {
            return;
        };

        if let Some(scheme) = self.choose_scheme(&project).await {
            info!("Selected scheme: {}", scheme);
            self.state.selection.selected_scheme = scheme;
            self.post_snapshot();
        }
    }

    pub async fn select_device(&mut self) {
        let Some(project) = self.require_project() else {
            return;
        };

        if let Some(device) = self.choose_device(&project).await {
            info!("Selected device: {}", device);
            self.state.selection.selected_device = Some(device);
            self.post_snapshot();
        }
    }

    pub async fn build_app(&mut self) {
        self.xcodebuild(BuildAction::Build).await;
    }

    pub async fn clean_build(&mut self) {
        self.xcodebuild(BuildAction::Clean).await;
    }

    async fn xcodebuild(&mut self, action: BuildAction) {
        let Some(project) = self.require_project() else {
            return;
        };
        let Some(scheme) = self.resolve_scheme(&project).await else {
            return;
        };

        let verb = match action {
            BuildAction::Build => "Building",
            BuildAction::Clean => "Cleaning",
        };
        self.host
            .show_message(MessageLevel::Info, &format!("{} {}", verb, project.name));

        let command = xcodebuild_command(project.kind, &project.path, &scheme, action);
        info!("{} {} ({})", verb, project.name, scheme);
        self.send_to_terminal(&command).await;
    }

    /// Boot, build, install and launch on a simulator
    ///
    /// Returns `None` when a precondition was not met or a prompt was
    /// cancelled; nothing was run in that case.
    pub async fn run_app(&mut self) -> Option<PipelineReport> {
        let project = self.require_project()?;
        let scheme = self.resolve_scheme(&project).await?;
        let device = self.resolve_device(&project).await?;

        self.host.show_message(
            MessageLevel::Info,
            &format!("Running {} on {}", project.name, device.name),
        );

        let settings = &self.state.settings;
        let pipeline = RunPipeline::new(&project, &scheme, &device)
            .with_configuration(settings.run.configuration.clone())
            .with_derived_data(settings.run.derived_data_path())
            .with_terminal(settings.terminal.name.clone());

        let report = pipeline.execute(&self.runner, &self.host).await;

        match report.failed_step() {
            Some(step) => {
                warn!("Run of {} failed at {}", project.name, step);
                self.host.show_message(
                    MessageLevel::Error,
                    &format!("Run failed at step: {}", step),
                );
            }
            None => info!("Run of {} finished: {:?}", project.name, report.steps),
        }

        Some(report)
    }

    async fn send_to_terminal(&self, command: &xcdemon_toolchain::ToolCommand) {
        let terminal = &self.state.settings.terminal.name;
        match self.host.run_in_terminal(terminal, command).await {
            Ok(Some(0)) => debug!("`{}` succeeded", command),
            Ok(code) => warn!("`{}` exited with {:?}", command, code),
            Err(e) => error!("Failed to run `{}`: {}", command, e),
        }
    }

    /// The current project, or an error message when there is none
    fn require_project(&self) -> Option<Project> {
        match &self.state.project {
            Some(project) => Some(project.clone()),
            None => {
                self.host.show_message(MessageLevel::Error, NO_PROJECT_MESSAGE);
                None
            }
        }
    }

    /// The selected scheme, or one chosen now for this command only
    async fn resolve_scheme(&self, project: &Project) -> Option<String> {
        match self.state.selection.scheme() {
            Some(scheme) => Some(scheme.to_string()),
            None => self.choose_scheme(project).await,
        }
    }

    /// The selected device, or one chosen now for this command only
    async fn resolve_device(&self, project: &Project) -> Option<Device> {
        match self.state.selection.device() {
            Some(device) => Some(device.clone()),
            None => self.choose_device(project).await,
        }
    }

    async fn choose_scheme(&self, project: &Project) -> Option<String> {
        if project.schemes.is_empty() {
            self.host.show_message(MessageLevel::Error, NO_SCHEMES_MESSAGE);
            return None;
        }

        self.host.pick(SCHEME_PLACEHOLDER, &project.schemes).await
    }

    async fn choose_device(&self, project: &Project) -> Option<Device> {
        if project.devices.is_empty() {
            self.host.show_message(MessageLevel::Error, NO_DEVICES_MESSAGE);
            return None;
        }

        let labels: Vec<String> = project.devices.iter().map(Device::label).collect();
        let label = self.host.pick(DEVICE_PLACEHOLDER, &labels).await?;

        let device = project.device_by_label(&label).cloned();
        if device.is_none() {
            warn!("Chosen label {:?} matches no device", label);
        }
        device
    }
}
