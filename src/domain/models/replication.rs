use crate::domain::value_objects::ObjectKey;

/// Request to copy a single object from source to target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationRequest {
    pub key: ObjectKey,
}

impl ReplicationRequest {
    pub fn new(key: ObjectKey) -> Self {
        Self { key }
    }
}

/// Tagged outcome of replicating one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationOutcome {
    /// Payload was fetched from source and written to target
    Replicated { key: ObjectKey, size: u64 },
    /// Target already held the key; nothing was written
    AlreadyExists { key: ObjectKey },
    /// Source did not hold the key; nothing was written
    NotFoundInSource { key: ObjectKey },
    /// Any other failure, with the underlying message
    Failed { key: ObjectKey, reason: String },
}

impl ReplicationOutcome {
    pub fn key(&self) -> &ObjectKey {
        match self {
            ReplicationOutcome::Replicated { key, .. }
            | ReplicationOutcome::AlreadyExists { key }
            | ReplicationOutcome::NotFoundInSource { key }
            | ReplicationOutcome::Failed { key, .. } => key,
        }
    }

    /// Whether the target now holds the key (freshly copied or already there)
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ReplicationOutcome::Replicated { .. } | ReplicationOutcome::AlreadyExists { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReplicationOutcome::Replicated { .. } => "replicated",
            ReplicationOutcome::AlreadyExists { .. } => "already_exists",
            ReplicationOutcome::NotFoundInSource { .. } => "not_found_in_source",
            ReplicationOutcome::Failed { .. } => "failed",
        }
    }

    /// Human-readable summary, as shown to API clients and operators
    pub fn message(&self) -> String {
        match self {
            ReplicationOutcome::Replicated { key, .. } => {
                format!("Replicated '{}' successfully", key)
            }
            ReplicationOutcome::AlreadyExists { key } => {
                format!("Object '{}' already exists in target (idempotent).", key)
            }
            ReplicationOutcome::NotFoundInSource { key } => {
                format!("Object '{}' not found in source", key)
            }
            ReplicationOutcome::Failed { key, reason } => {
                format!("Replication of '{}' failed: {}", key, reason)
            }
        }
    }
}

/// Summary of a bulk run, outcomes in source listing order
#[derive(Debug, Clone, Default)]
pub struct ReplicationReport {
    pub source_total: usize,
    pub outcomes: Vec<ReplicationOutcome>,
}

impl ReplicationReport {
    pub fn new(source_total: usize) -> Self {
        Self {
            source_total,
            outcomes: Vec::with_capacity(source_total),
        }
    }

    pub fn record(&mut self, outcome: ReplicationOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn replicated(&self) -> usize {
        self.count(|o| matches!(o, ReplicationOutcome::Replicated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ReplicationOutcome::AlreadyExists { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, ReplicationOutcome::NotFoundInSource { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ReplicationOutcome::Failed { .. }))
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o {
                ReplicationOutcome::Replicated { size, .. } => *size,
                _ => 0,
            })
            .sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, predicate: impl Fn(&ReplicationOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}
