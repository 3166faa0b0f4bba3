//! Run pipeline: boot, open, build, install, launch
//!
//! Running an app is an ordered list of named steps. Each step's outcome is
//! recorded so a failure is reported at the step where it happened. Install
//! and Launch only run after a successful Build.

use std::fmt;
use std::path::PathBuf;

use xcdemon_core::prelude::*;
use xcdemon_core::{DescriptorKind, Device, Project};
use xcdemon_toolchain::commands::{
    boot_simulator_command, install_app_command, launch_app_command, open_simulator_command,
    read_bundle_id_command, simulator_build_command,
};
use xcdemon_toolchain::{locate_app_bundle, LocalProcessRunner, ToolCommand};

use crate::host::LocalHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStep {
    BootSimulator,
    OpenSimulator,
    Build,
    Install,
    Launch,
}

impl RunStep {
    /// All steps in execution order
    pub const ALL: [RunStep; 5] = [
        RunStep::BootSimulator,
        RunStep::OpenSimulator,
        RunStep::Build,
        RunStep::Install,
        RunStep::Launch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RunStep::BootSimulator => "boot simulator",
            RunStep::OpenSimulator => "open simulator",
            RunStep::Build => "build",
            RunStep::Install => "install",
            RunStep::Launch => "launch",
        }
    }

    /// Whether a failure of this step stops the pipeline
    ///
    /// Booting an already booted simulator fails, and the Simulator app may
    /// already be open; neither should keep the build from running.
    pub fn is_required(&self) -> bool {
        !matches!(self, RunStep::BootSimulator | RunStep::OpenSimulator)
    }
}

impl fmt::Display for RunStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    /// `code` is `None` when the step failed without an exit code
    /// (could not start, killed by a signal, no app bundle found)
    Failed {
        code: Option<i32>,
    },
    /// Not attempted because an earlier required step failed
    Skipped,
}

impl StepOutcome {
    fn from_exit(code: Option<i32>) -> Self {
        if code == Some(0) {
            StepOutcome::Succeeded
        } else {
            StepOutcome::Failed { code }
        }
    }
}

/// Outcome of every step, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub steps: Vec<(RunStep, StepOutcome)>,
}

impl PipelineReport {
    pub fn outcome(&self, step: RunStep) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, outcome)| outcome)
    }

    /// First required step that failed
    pub fn failed_step(&self) -> Option<RunStep> {
        self.steps
            .iter()
            .find(|(step, outcome)| {
                step.is_required() && matches!(outcome, StepOutcome::Failed { .. })
            })
            .map(|(step, _)| *step)
    }

    /// True when the app was launched
    pub fn succeeded(&self) -> bool {
        self.outcome(RunStep::Launch) == Some(&StepOutcome::Succeeded)
    }

    fn record(&mut self, step: RunStep, outcome: StepOutcome) {
        match &outcome {
            StepOutcome::Succeeded => debug!("Run step '{}' succeeded", step),
            StepOutcome::Failed { code } => warn!("Run step '{}' failed ({:?})", step, code),
            StepOutcome::Skipped => debug!("Run step '{}' skipped", step),
        }
        self.steps.push((step, outcome));
    }

    fn skip_remaining(&mut self) {
        let done = self.steps.len();
        for step in RunStep::ALL.iter().skip(done) {
            self.record(*step, StepOutcome::Skipped);
        }
    }
}

/// Everything needed to run one project scheme on one simulator
#[derive(Debug, Clone)]
pub struct RunPipeline {
    pub descriptor: PathBuf,
    pub kind: DescriptorKind,
    pub project_name: String,
    pub scheme: String,
    pub device: Device,
    pub configuration: String,
    pub derived_data: PathBuf,
    pub terminal: String,
}

impl RunPipeline {
    pub fn new(project: &Project, scheme: &str, device: &Device) -> Self {
        Self {
            descriptor: project.path.clone(),
            kind: project.kind,
            project_name: project.name.clone(),
            scheme: scheme.to_string(),
            device: device.clone(),
            configuration: xcdemon_toolchain::commands::DEFAULT_CONFIGURATION.to_string(),
            derived_data: xcdemon_toolchain::commands::expand_home(
                xcdemon_toolchain::commands::DEFAULT_DERIVED_DATA,
            ),
            terminal: String::new(),
        }
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
        self
    }

    pub fn with_derived_data(mut self, derived_data: impl Into<PathBuf>) -> Self {
        self.derived_data = derived_data.into();
        self
    }

    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = terminal.into();
        self
    }

    pub fn build_command(&self) -> ToolCommand {
        simulator_build_command(
            self.kind,
            &self.descriptor,
            &self.scheme,
            &self.device.id,
            &self.configuration,
        )
    }

    /// Run every step in order
    ///
    /// Terminal steps go through `host`. The bundle identifier is read
    /// through `runner` since its output has to be captured.
    pub async fn execute<R, H>(&self, runner: &R, host: &H) -> PipelineReport
    where
        R: LocalProcessRunner,
        H: LocalHost,
    {
        let mut report = PipelineReport::default();

        for (step, command) in [
            (RunStep::BootSimulator, boot_simulator_command(&self.device.id)),
            (RunStep::OpenSimulator, open_simulator_command()),
            (RunStep::Build, self.build_command()),
        ] {
            let outcome = self.run_step(host, &command).await;
            let stop = step.is_required() && outcome != StepOutcome::Succeeded;
            report.record(step, outcome);
            if stop {
                report.skip_remaining();
                return report;
            }
        }

        let Some(app) =
            locate_app_bundle(&self.derived_data, &self.project_name, &self.configuration)
        else {
            error!(
                "No {}-iphonesimulator app bundle for {} under {:?}",
                self.configuration, self.project_name, self.derived_data
            );
            report.record(RunStep::Install, StepOutcome::Failed { code: None });
            report.skip_remaining();
            return report;
        };
        info!("Installing {:?}", app);

        let outcome = self
            .run_step(host, &install_app_command(&self.device.id, &app))
            .await;
        let installed = outcome == StepOutcome::Succeeded;
        report.record(RunStep::Install, outcome);
        if !installed {
            report.skip_remaining();
            return report;
        }

        let outcome = match self.read_bundle_id(runner, &app).await {
            Some(bundle_id) => {
                self.run_step(host, &launch_app_command(&self.device.id, &bundle_id))
                    .await
            }
            None => StepOutcome::Failed { code: None },
        };
        report.record(RunStep::Launch, outcome);

        report
    }

    async fn run_step<H: LocalHost>(&self, host: &H, command: &ToolCommand) -> StepOutcome {
        match host.run_in_terminal(&self.terminal, command).await {
            Ok(code) => StepOutcome::from_exit(code),
            Err(e) => {
                error!("Failed to run `{}`: {}", command, e);
                StepOutcome::Failed { code: None }
            }
        }
    }

    async fn read_bundle_id<R: LocalProcessRunner>(
        &self,
        runner: &R,
        app: &std::path::Path,
    ) -> Option<String> {
        let command = read_bundle_id_command(app);
        let output = match runner.run(&command).await {
            Ok(output) => output,
            Err(e) => {
                error!("Failed to read bundle identifier: {}", e);
                return None;
            }
        };

        match output.into_success("defaults") {
            Ok(output) => {
                let bundle_id = output.stdout.trim();
                if bundle_id.is_empty() {
                    error!("Empty CFBundleIdentifier in {:?}", app);
                    None
                } else {
                    Some(bundle_id.to_string())
                }
            }
            Err(e) => {
                error!("Failed to read bundle identifier: {}", e);
                None
            }
        }
    }
}
