use super::State;
use serde::{Deserialize, Serialize};

/// One discovered service. `item` is `None` for single-instance services.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Service {
    pub item: Option<String>,
}

impl Service {
    pub fn new() -> Self {
        Self { item: None }
    }

    pub fn with_item(item: impl Into<String>) -> Self {
        Self {
            item: Some(item.into()),
        }
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}

/// A single state/text pair returned by a check function.
///
/// A result carries either a `summary` (shown in the service list) or a
/// `notice` (only shown in the long output). `details` extends the long
/// output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub state: State,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CheckResult {
    pub fn summary(state: State, text: impl Into<String>) -> Self {
        Self {
            state,
            summary: Some(text.into()),
            notice: None,
            details: None,
        }
    }

    pub fn notice(state: State, text: impl Into<String>) -> Self {
        Self {
            state,
            summary: None,
            notice: Some(text.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        if !details.is_empty() {
            self.details = Some(details);
        }
        self
    }

    /// Text for the long output: details, falling back to the notice or summary.
    pub fn long_text(&self) -> Option<&str> {
        self.details
            .as_deref()
            .or(self.notice.as_deref())
            .or(self.summary.as_deref())
    }
}

/// A named measurement for the time-series store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    /// Upper (warn, crit) levels, rendered into the perfdata string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<(f64, f64)>,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            levels: None,
        }
    }

    pub fn with_levels(mut self, warn: f64, crit: f64) -> Self {
        self.levels = Some((warn, crit));
        self
    }

    /// Classic perfdata notation: `name=value;warn;crit`.
    pub fn perfdata(&self) -> String {
        match self.levels {
            Some((warn, crit)) => format!(
                "{}={};{};{}",
                self.name,
                fmt_number(self.value),
                fmt_number(warn),
                fmt_number(crit)
            ),
            None => format!("{}={}", self.name, fmt_number(self.value)),
        }
    }
}

fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

/// Everything one check invocation produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckOutput {
    pub results: Vec<CheckResult>,
    pub metrics: Vec<Metric>,
}

impl CheckOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output consisting of exactly one UNKNOWN result.
    pub fn unknown(summary: impl Into<String>) -> Self {
        let mut out = Self::new();
        out.push(CheckResult::summary(State::Unknown, summary));
        out
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn metric(&mut self, name: &str, value: f64) {
        self.metrics.push(Metric::new(name, value));
    }

    pub fn push_metric(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// Service state: the worst of all result states.
    pub fn state(&self) -> State {
        State::worst_of(self.results.iter().map(|r| r.state))
    }

    /// Summary line as the host renders it: summaries joined by ", ",
    /// non-OK parts marked with `(!)`/`(!!)`.
    pub fn summary_line(&self) -> String {
        self.results
            .iter()
            .filter_map(|r| {
                r.summary
                    .as_deref()
                    .map(|s| format!("{}{}", s, r.state.marker()))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Long output: one block per result.
    pub fn long_output(&self) -> String {
        self.results
            .iter()
            .filter_map(|r| r.long_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn perfdata(&self) -> String {
        self.metrics
            .iter()
            .map(Metric::perfdata)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn metric_value(&self, name: &str) -> Option<f64> {
        self.metrics.iter().find(|m| m.name == name).map(|m| m.value)
    }
}
