use std::fmt;

/// Response bodies longer than this are cut off in failure records.
const BODY_PREVIEW_LIMIT: usize = 300;

const SEPARATOR: &str = "----------------------------------------";

/// Outcome of a single request/assert/report step.
#[derive(Debug)]
pub struct StepReport {
    name: &'static str,
    passed: bool,
    expected: Option<String>,
    got: Option<String>,
    request_data: Option<String>,
    response_body: Option<String>,
}

impl StepReport {
    pub fn passed(name: &'static str) -> Self {
        Self {
            name,
            passed: true,
            expected: None,
            got: None,
            request_data: None,
            response_body: None,
        }
    }

    pub fn failed(name: &'static str) -> Self {
        Self {
            name,
            passed: false,
            expected: None,
            got: None,
            request_data: None,
            response_body: None,
        }
    }

    pub fn with_expectation(
        mut self,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        self.expected = Some(expected.into());
        self.got = Some(got.into());
        self
    }

    pub fn with_request_data(mut self, request_data: impl Into<String>) -> Self {
        self.request_data = Some(request_data.into());
        self
    }

    pub fn with_response_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            writeln!(f, "✅ {}: PASSED", self.name)?;
        } else {
            writeln!(f, "❌ {}: FAILED", self.name)?;
            if let Some(request_data) = &self.request_data {
                writeln!(f, "   Request Data: {request_data}")?;
            }
            if let (Some(expected), Some(got)) = (&self.expected, &self.got) {
                writeln!(f, "   Expected: {expected}, Got: {got}")?;
            }
            if let Some(body) = &self.response_body {
                writeln!(f, "   Response Body: {}", truncate_body(body))?;
            }
        }
        writeln!(f, "{SEPARATOR}")
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW_LIMIT {
        body.to_string()
    } else {
        let preview: String = body.chars().take(BODY_PREVIEW_LIMIT).collect();
        format!("{preview}...")
    }
}

/// Aggregate of all executed steps plus the abort notice, if any.
#[derive(Debug, Default)]
pub struct SuiteReport {
    steps: Vec<StepReport>,
    abort_notice: Option<String>,
}

impl SuiteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    pub fn abort(&mut self, notice: impl Into<String>) {
        self.abort_notice = Some(notice.into());
    }

    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    pub fn was_aborted(&self) -> bool {
        self.abort_notice.is_some()
    }

    pub fn all_passed(&self) -> bool {
        !self.was_aborted() && self.steps.iter().all(StepReport::is_passed)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Starting Inventory Management API Test Suite ---")?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        if let Some(notice) = &self.abort_notice {
            writeln!(f)?;
            writeln!(f, "{notice}")?;
        }
        writeln!(f, "--- Test Suite Finished ---")
    }
}
