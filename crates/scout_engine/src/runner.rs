use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use scout_core::{Command, CommandOutput, ScoutError};
use scout_logging::scout_warn;

use crate::ScoutClient;

pub type RequestId = u64;

/// Result of one submitted command, tagged with the caller's request id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCompleted {
    pub request_id: RequestId,
    pub command: &'static str,
    pub result: Result<CommandOutput, ScoutError>,
}

struct Submission {
    request_id: RequestId,
    command: Command,
}

/// Runs commands on a background tokio runtime for synchronous callers.
///
/// Commands run concurrently and complete in any order. A failed command is
/// reported like any other completion; it never stops the runner.
pub struct CommandRunner {
    cmd_tx: mpsc::Sender<Submission>,
    event_rx: mpsc::Receiver<CommandCompleted>,
}

impl CommandRunner {
    pub fn new(client: Arc<ScoutClient>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Submission>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("scout-runner".into())
            .spawn(move || {
                while let Ok(submission) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let command = submission.command.name();
                        let scope = if submission.command.is_write() {
                            "write "
                        } else {
                            ""
                        };
                        let result = client.execute(submission.command).await;
                        if let Err(err) = &result {
                            scout_warn!(
                                "Request {} ({}{}) failed: {} [{}]",
                                submission.request_id,
                                scope,
                                command,
                                err,
                                err.kind.tag()
                            );
                        }
                        let _ = event_tx.send(CommandCompleted {
                            request_id: submission.request_id,
                            command,
                            result,
                        });
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a command. Returns `false` if the runner thread has gone away.
    pub fn submit(&self, request_id: RequestId, command: Command) -> bool {
        self.cmd_tx
            .send(Submission {
                request_id,
                command,
            })
            .is_ok()
    }

    pub fn try_recv(&self) -> Option<CommandCompleted> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<CommandCompleted> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
