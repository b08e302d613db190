use qapp_logging::{qapp_debug, qapp_warn};

use crate::QappError;

pub type JobId = String;

/// Point-in-time snapshot of a server-side job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Job {
    pub id: JobId,
    pub status: String,
    pub domain: Option<String>,
    pub url: Option<String>,
    pub url_hash: Option<String>,
    pub message: Option<String>,
}

/// Create-job request as submitted from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub url: String,
    pub depth: u32,
    pub assets: bool,
}

/// Dashboard table plus the poller's bookkeeping.
///
/// Each successful poll replaces the whole job set and collapses the open
/// detail row. At most one detail row is expanded at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobBoard {
    jobs: Vec<Job>,
    expanded: Option<JobId>,
    in_flight: bool,
    repoll_requested: bool,
    suspended: bool,
    polls_started: u64,
    status: Option<String>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn find(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn polls_started(&self) -> u64 {
        self.polls_started
    }

    /// Status line for the last poll; `None` after a successful one.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Marks a poll as started. Returns `false` when the tick must be skipped
    /// because a poll is already outstanding or polling is suspended.
    pub fn begin_poll(&mut self) -> bool {
        if self.suspended {
            return false;
        }
        if self.in_flight {
            qapp_debug!("poll skipped, previous poll still in flight");
            return false;
        }
        self.in_flight = true;
        self.polls_started += 1;
        true
    }

    /// Asks for a poll as soon as possible. Starts one now if nothing is
    /// outstanding, otherwise queues it behind the current poll.
    pub fn request_repoll(&mut self) -> bool {
        if self.in_flight {
            self.repoll_requested = true;
            return false;
        }
        self.begin_poll()
    }

    /// Applies a poll result. Returns `true` when a queued re-poll was started
    /// and a new fetch must be issued.
    pub fn finish_poll(&mut self, result: Result<Vec<Job>, QappError>) -> bool {
        self.in_flight = false;
        match result {
            Ok(jobs) => {
                self.jobs = jobs;
                self.expanded = None;
                self.status = None;
            }
            Err(err) => {
                qapp_warn!("job poll failed: {}", err);
                self.status = Some(format!("Could not refresh jobs: {err}"));
            }
        }
        if std::mem::take(&mut self.repoll_requested) {
            return self.begin_poll();
        }
        false
    }

    /// Toggles the detail row of `job_id`, closing every other one.
    /// Unknown ids are ignored.
    pub fn toggle_detail(&mut self, job_id: &str) -> bool {
        if self.find(job_id).is_none() {
            return false;
        }
        if self.expanded.as_deref() == Some(job_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(job_id.to_string());
        }
        true
    }

    pub fn suspend(&mut self) -> bool {
        !std::mem::replace(&mut self.suspended, true)
    }

    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.suspended, false)
    }
}
