use iacguard_types::{OutcomeCounts, ResourceReport, RunStatus};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub status: RunStatus,
    pub counts: OutcomeCounts,
    /// In input resource order.
    pub resources: Vec<ResourceReport>,
    pub policies_active: u32,
}
