//! Publish Use Case
//!
//! Orchestrates the publish flow against one target:
//! 1. Ensure the versioned folder exists
//! 2. Mirror the local deck into it
//! 3. Repoint the `latest` alias
//! 4. Copy the mirrored deck into a snapshot folder
//! 5. Archive the snapshot folder and remove it
//!
//! Steps run strictly in order. The first failure stops the run and is
//! reported with the last stage reached; nothing is rolled back.

use chrono::Utc;

use crate::domain::entities::PublishPlan;
use crate::domain::ports::{
    CommandOutput, MirrorReport, MirrorRequest, MirrorTransport, NoopEventSink, PublishEvent,
    PublishEventSink, RemoteCommand, RemoteSession, SessionError,
};
use crate::domain::services::shell;
use crate::domain::value_objects::PublishStage;
use crate::error::{PublishError, PublishResult};

use super::result::{AliasOutcome, PlannedStep, PublishReport};

/// Outcome of the alias removal probe
enum AliasRemoval {
    Removed,
    NotFound,
}

/// Publish use case - orchestrates the publish flow
///
/// Parameterized by its ports so tests can script the remote side.
pub struct PublishUseCase<S, M>
where
    S: RemoteSession,
    M: MirrorTransport,
{
    session: S,
    mirror: M,
}

impl<S, M> PublishUseCase<S, M>
where
    S: RemoteSession,
    M: MirrorTransport,
{
    pub fn new(session: S, mirror: M) -> Self {
        Self { session, mirror }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn mirror_transport(&self) -> &M {
        &self.mirror
    }

    /// Every command the run would issue, in order, without touching the target
    pub fn plan(&self, plan: &PublishPlan) -> Vec<PlannedStep> {
        let folder = plan.versioned_folder();
        let alias = plan.latest_alias();

        let mut steps = vec![
            PlannedStep::new(
                PublishStage::DirectoryEnsured,
                "ensure versioned folder",
                shell::mkdir_p(&folder).to_string(),
            ),
            PlannedStep::new(
                PublishStage::Synced,
                "mirror slides",
                self.mirror.describe(&plan.mirror_request()),
            ),
            PlannedStep::new(
                PublishStage::AliasRepointed,
                "remove previous alias when it is a symbolic link",
                format!(
                    "{} && {}",
                    shell::is_symlink(&alias),
                    shell::remove_link(&alias)
                ),
            ),
            PlannedStep::new(
                PublishStage::AliasRepointed,
                "link alias to versioned folder",
                shell::link(&folder, &alias).to_string(),
            ),
        ];

        steps.extend(
            snapshot_commands(plan)
                .into_iter()
                .map(|(stage, description, cmd)| {
                    PlannedStep::new(stage, description, cmd.to_string())
                }),
        );
        steps
    }

    /// Execute the publish flow silently
    pub fn execute(&self, plan: &PublishPlan) -> PublishResult<PublishReport> {
        self.execute_with_events(plan, &NoopEventSink)
    }

    /// Execute the publish flow with event reporting
    pub fn execute_with_events(
        &self,
        plan: &PublishPlan,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<PublishReport> {
        sink.on_event(PublishEvent::Started {
            target: self.session.display_name(),
            instance: plan.instance().to_string(),
            versioned_folder: plan.versioned_folder(),
        });

        let mut stage = PublishStage::Start;
        match self.run_stages(plan, sink, &mut stage) {
            Ok(report) => {
                sink.on_event(PublishEvent::Completed {
                    archive: report.archive_path.clone(),
                });
                Ok(report)
            }
            Err(err) => {
                tracing::error!(stage = %stage, error = %err, "publish stopped");
                sink.on_event(PublishEvent::Failed {
                    stage,
                    message: err.to_string(),
                });
                Err(PublishError::Step {
                    stage,
                    cause: Box::new(err),
                })
            }
        }
    }

    fn run_stages(
        &self,
        plan: &PublishPlan,
        sink: &dyn PublishEventSink,
        stage: &mut PublishStage,
    ) -> PublishResult<PublishReport> {
        if !plan.local_source().is_dir() {
            return Err(PublishError::SourceNotFound {
                path: plan.local_source().to_path_buf(),
            });
        }

        let folder = plan.versioned_folder();
        let alias = plan.latest_alias();

        self.ensure_remote_directory(&folder, sink)?;
        reach(stage, PublishStage::DirectoryEnsured, sink);

        let mirror = self.mirror_sync(&plan.mirror_request(), sink)?;
        reach(stage, PublishStage::Synced, sink);

        let alias_outcome = self.repoint_latest_alias(&alias, &folder, sink)?;
        reach(stage, PublishStage::AliasRepointed, sink);

        let archive_path = self.snapshot_stages(plan, sink, stage)?;

        reach(stage, PublishStage::Done, sink);

        Ok(PublishReport {
            target: self.session.display_name(),
            instance: plan.instance().to_string(),
            versioned_folder: folder,
            latest_alias: alias,
            archive_path,
            mirror,
            alias: alias_outcome,
            stage: *stage,
            finished_at: Utc::now(),
        })
    }

    /// Create `path` on the target; pre-existence is not an error
    pub fn ensure_remote_directory(
        &self,
        path: &str,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<()> {
        self.run_checked(&shell::mkdir_p(path), sink)?;
        Ok(())
    }

    /// Mirror the local deck into the target folder
    pub fn mirror_sync(
        &self,
        request: &MirrorRequest,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<MirrorReport> {
        if !request.local_source.is_dir() {
            return Err(PublishError::SourceNotFound {
                path: request.local_source.clone(),
            });
        }

        sink.on_event(PublishEvent::CommandStarted {
            command: self.mirror.describe(request),
        });
        tracing::debug!(
            transport = self.mirror.name(),
            source = %request.local_source.display(),
            remote_dir = %request.remote_dir,
            "mirroring"
        );

        let report = self.mirror.mirror(request)?;
        sink.on_event(PublishEvent::MirrorCompleted {
            transferred: report.transferred.len(),
            deleted: report.deleted.len(),
        });
        Ok(report)
    }

    /// Point `alias` at `target`, replacing a previous link.
    ///
    /// A missing alias is the expected first-run state and is only reported.
    /// Anything else that prevents the removal stops the run.
    pub fn repoint_latest_alias(
        &self,
        alias: &str,
        target: &str,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<AliasOutcome> {
        let outcome = match self.remove_alias(alias, sink)? {
            AliasRemoval::Removed => AliasOutcome::Replaced,
            AliasRemoval::NotFound => {
                tracing::info!(alias, "no previous alias to remove");
                sink.on_event(PublishEvent::AliasMissing {
                    alias: alias.to_string(),
                });
                AliasOutcome::Created
            }
        };

        self.run_checked(&shell::link(target, alias), sink)?;
        Ok(outcome)
    }

    /// Copy the mirrored deck into a snapshot folder, archive it, drop the folder.
    ///
    /// A snapshot folder left behind by an interrupted run is cleared first,
    /// so re-running is safe. Returns the archive path.
    pub fn snapshot_archive(
        &self,
        plan: &PublishPlan,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<String> {
        let mut stage = PublishStage::AliasRepointed;
        self.snapshot_stages(plan, sink, &mut stage)
    }

    /// Run the snapshot commands, reporting `Packed` and `Archived` as each group finishes
    fn snapshot_stages(
        &self,
        plan: &PublishPlan,
        sink: &dyn PublishEventSink,
        stage: &mut PublishStage,
    ) -> PublishResult<String> {
        let commands = snapshot_commands(plan);
        for (i, (reached, _, cmd)) in commands.iter().enumerate() {
            self.run_checked(cmd, sink)?;
            let group_done = commands
                .get(i + 1)
                .map_or(true, |(next, _, _)| next != reached);
            if group_done {
                reach(stage, *reached, sink);
            }
        }
        Ok(plan.archive_path())
    }

    fn remove_alias(
        &self,
        alias: &str,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<AliasRemoval> {
        let probe = shell::is_symlink(alias);
        let output = self.run_raw(&probe, sink)?;
        match output.code {
            Some(0) => {
                self.run_checked(&shell::remove_link(alias), sink)?;
                Ok(AliasRemoval::Removed)
            }
            Some(1) => {
                let probe = shell::exists(alias);
                let output = self.run_raw(&probe, sink)?;
                match output.code {
                    Some(1) => Ok(AliasRemoval::NotFound),
                    Some(0) => Err(PublishError::AliasOccupied {
                        path: alias.to_string(),
                    }),
                    _ => Err(SessionError::command_failed(&probe, &output).into()),
                }
            }
            _ => Err(SessionError::command_failed(&probe, &output).into()),
        }
    }

    fn run_raw(
        &self,
        command: &RemoteCommand,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<CommandOutput> {
        sink.on_event(PublishEvent::CommandStarted {
            command: command.to_string(),
        });
        Ok(self.session.run(command)?)
    }

    fn run_checked(
        &self,
        command: &RemoteCommand,
        sink: &dyn PublishEventSink,
    ) -> PublishResult<CommandOutput> {
        sink.on_event(PublishEvent::CommandStarted {
            command: command.to_string(),
        });
        Ok(self.session.run_checked(command)?)
    }
}

fn reach(stage: &mut PublishStage, reached: PublishStage, sink: &dyn PublishEventSink) {
    *stage = reached;
    tracing::debug!(stage = %reached, "stage completed");
    sink.on_event(PublishEvent::StageCompleted { stage: reached });
}

/// Snapshot commands, each tagged with the stage its group completes.
///
/// All run from the versioned folder.
fn snapshot_commands(plan: &PublishPlan) -> Vec<(PublishStage, &'static str, RemoteCommand)> {
    let folder = plan.versioned_folder();
    let pack = plan.pack_name();
    vec![
        (
            PublishStage::Packed,
            "clear leftover snapshot folder",
            shell::remove_tree(&pack).in_dir(&folder),
        ),
        (
            PublishStage::Packed,
            "copy mirrored slides into snapshot folder",
            shell::copy_tree(&plan.synced_dir_name(), &pack).in_dir(&folder),
        ),
        (
            PublishStage::Archived,
            "compress snapshot folder",
            shell::tar_gz(&plan.archive_name(), &pack).in_dir(&folder),
        ),
        (
            PublishStage::Archived,
            "remove snapshot folder",
            shell::remove_tree(&pack).in_dir(&folder),
        ),
    ]
}
