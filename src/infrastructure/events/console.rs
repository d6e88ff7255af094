//! Console Event Sink
//!
//! Human-readable progress lines. Commands are only echoed when verbose.

use crate::domain::ports::{PublishEvent, PublishEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Glyphs used in progress lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icons {
    pub start: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub command: &'static str,
}

impl Icons {
    pub const UNICODE: Icons = Icons {
        start: "⇡",
        success: "✓",
        warning: "⚠",
        error: "✗",
        command: "›",
    };

    pub const ASCII: Icons = Icons {
        start: "^",
        success: "[OK]",
        warning: "[WARN]",
        error: "[FAIL]",
        command: ">",
    };

    pub fn for_terminal(unicode: bool) -> Self {
        if unicode {
            Self::UNICODE
        } else {
            Self::ASCII
        }
    }
}

/// Event sink printing progress for a person watching the terminal
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    icons: Icons,
    verbose: bool,
}

impl ConsoleEventSink {
    pub fn stdout(icons: Icons, verbose: bool) -> Self {
        Self::with_writer(io::stdout(), icons, verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, icons: Icons, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            icons,
            verbose,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }
}

impl PublishEventSink for ConsoleEventSink {
    fn on_event(&self, event: PublishEvent) {
        let icons = self.icons;
        match event {
            PublishEvent::Started {
                target,
                instance,
                versioned_folder,
            } => self.line(format!(
                "{} Publishing {} to {}:{}",
                icons.start, instance, target, versioned_folder
            )),
            PublishEvent::CommandStarted { command } => {
                if self.verbose {
                    self.line(format!("  {} {}", icons.command, command));
                }
            }
            PublishEvent::MirrorCompleted {
                transferred,
                deleted,
            } => self.line(format!(
                "  {} mirrored: {} transferred, {} deleted",
                icons.success, transferred, deleted
            )),
            PublishEvent::AliasMissing { alias } => self.line(format!(
                "  {} no previous alias at {}, creating it",
                icons.warning, alias
            )),
            PublishEvent::StageCompleted { stage } => {
                if self.verbose {
                    self.line(format!("  {} {}", icons.success, stage.description()));
                }
            }
            PublishEvent::Completed { archive } => {
                self.line(format!("{} Published. Archive: {}", icons.success, archive))
            }
            // The error itself is reported by the caller
            PublishEvent::Failed { stage, .. } => self.line(format!(
                "{} Publish failed; last completed stage: {}",
                icons.error, stage
            )),
        }
    }
}
