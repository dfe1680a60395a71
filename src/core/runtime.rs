use std::future::Future;

use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::{
    core::{catalog, notifier::Notifier},
    error::CycleError,
    models::{ApiAnswer, Checkpoint},
    providers::{HomeworkSource, Messenger},
};

/// How a single poll cycle ended.
#[derive(Debug, PartialEq)]
pub enum CycleReport {
    Notified { homework: String },
    NothingNew,
    DeliveryFailed,
    Failed(CycleError),
}

/// The poll loop. Owns the checkpoint and runs one cycle per interval.
pub struct Runtime<S: HomeworkSource, M: Messenger> {
    source: S,
    notifier: Notifier<M>,
    checkpoint: Checkpoint,
    retry_interval: Duration,
    report_failures: bool,
    last_failure: Option<String>,
}

impl<S: HomeworkSource, M: Messenger> Runtime<S, M> {
    pub fn new(source: S, messenger: M, checkpoint: Checkpoint, retry_interval: Duration) -> Self {
        Runtime {
            source,
            notifier: Notifier::new(messenger),
            checkpoint,
            retry_interval,
            report_failures: false,
            last_failure: None,
        }
    }

    /// Also send failed cycles to the recipient, once per distinct failure.
    pub fn with_failure_reports(mut self, enabled: bool) -> Self {
        self.report_failures = enabled;
        self
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    /// Fetch, validate, translate, notify. Never returns an error: every
    /// failure is logged and reported in the returned value.
    pub async fn run_cycle(&mut self) -> CycleReport {
        match self.poll_once().await {
            Ok(report) => {
                self.last_failure = None;
                report
            }
            Err(e) => {
                error!(
                    kind = e.kind(),
                    checkpoint = self.checkpoint.as_secs(),
                    "Poll cycle failed: {}",
                    e
                );
                self.report_failure(&e).await;
                CycleReport::Failed(e)
            }
        }
    }

    async fn poll_once(&mut self) -> Result<CycleReport, CycleError> {
        let raw = self.source.fetch(self.checkpoint).await?;
        let answer = ApiAnswer::from_raw(&raw)?;

        let report = match answer.homeworks.first() {
            None => CycleReport::NothingNew,
            Some(latest) => {
                if answer.homeworks.len() > 1 {
                    debug!(
                        "{} older homework update(s) skipped this cycle",
                        answer.homeworks.len() - 1
                    );
                }
                let message = catalog::translate(latest)?;
                match self.notifier.deliver(&message).await {
                    Ok(()) => CycleReport::Notified {
                        homework: latest.homework_name.clone().unwrap_or_default(),
                    },
                    Err(_) => CycleReport::DeliveryFailed,
                }
            }
        };

        self.checkpoint.advance(answer.current_date);
        Ok(report)
    }

    // Best effort; the same failure is reported once until a cycle succeeds.
    async fn report_failure(&mut self, failure: &CycleError) {
        if !self.report_failures {
            return;
        }
        let message = format!("Program failure: {}", failure);
        if self.last_failure.as_deref() == Some(message.as_str()) {
            debug!("Failure already reported, not sending it again");
            return;
        }
        let _ = self.notifier.deliver(&message).await;
        self.last_failure = Some(message);
    }

    /// Runs cycles until `shutdown` resolves. Shutdown is only observed while
    /// sleeping, so a cycle in flight always completes.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Starting homework poller (interval: {:?}, checkpoint: {})",
            self.retry_interval,
            self.checkpoint.as_secs()
        );
        tokio::pin!(shutdown);

        loop {
            let report = self.run_cycle().await;
            debug!("Cycle finished: {:?}", report);

            tokio::select! {
                _ = sleep(self.retry_interval) => {}
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping homework poller");
                    return;
                }
            }
        }
    }
}
