//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::PublishUseCase;
use crate::config::{Config, Transport};
use crate::domain::ports::{MirrorTransport, RemoteSession, SessionEnv};
use crate::domain::value_objects::RemoteTarget;
use crate::error::PublishResult;
use crate::infrastructure::{LocalMirror, LocalSession, RsyncMirror, SshOptions, SshSession};

/// Publish use case with its transport chosen at runtime
pub type DynPublishUseCase = PublishUseCase<Box<dyn RemoteSession>, Box<dyn MirrorTransport>>;

/// Create a publish use case for the configured transport
///
/// `ssh`: commands over `ssh`, mirror with rsync on the same connection.
/// `local`: commands through `sh`, mirror in-process.
pub fn create_publish_use_case(
    config: &Config,
    target: &RemoteTarget,
    env: SessionEnv,
) -> PublishResult<DynPublishUseCase> {
    match config.target.transport {
        Transport::Ssh => {
            let options = SshOptions::for_target(target)
                .with_connect_timeout(config.target.connect_timeout)
                .with_multiplex(config.target.multiplex);
            let session = SshSession::new(target, options, env)?;
            let mirror = RsyncMirror::for_session(&session);
            Ok(PublishUseCase::new(Box::new(session), Box::new(mirror)))
        }
        Transport::Local => Ok(PublishUseCase::new(
            Box::new(LocalSession::new()),
            Box::new(LocalMirror::new()),
        )),
    }
}
