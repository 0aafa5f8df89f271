#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub resources: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

/// One FAILED outcome, flattened with its resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFailure {
    pub resource_type: String,
    pub resource_id: String,
    pub policy_id: String,
    pub policy_name: String,
    pub severity: RenderableSeverity,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub status: RenderableStatus,
    pub counts: RenderableCounts,
    pub failures: Vec<RenderableFailure>,
    /// Run-level notes such as runtime errors.
    pub reasons: Vec<String>,
}
