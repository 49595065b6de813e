// ── Search and category filters ──
//
// Used by the CLI and the TUI list screens to narrow a snapshot
// without touching the store.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::error::CoreError;
use crate::model::{
    CitizenReport, Device, DeviceStatus, FailurePrediction, FieldJob, Incident, IncidentStatus,
    JobStatus, ReportStatus, RiskBand, Severity, Telemetry, UserAccount, UserRole, parse_variant,
};

/// A record with free-text searchable fields.
pub trait Searchable {
    /// The one to three fields a search query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match against any searchable field.
    /// An empty query matches everything; whitespace is literal.
    fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A record that falls into one value of the closed vocabulary `C`.
pub trait Categorized<C> {
    fn category(&self) -> C;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }
}

impl<T: Searchable + ?Sized> Searchable for Arc<T> {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }
}

impl<C, T: Categorized<C> + ?Sized> Categorized<C> for &T {
    fn category(&self) -> C {
        (**self).category()
    }
}

impl<C, T: Categorized<C> + ?Sized> Categorized<C> for Arc<T> {
    fn category(&self) -> C {
        (**self).category()
    }
}

// ── CategoryFilter ───────────────────────────────────────────────────

/// `all`, or exactly one category value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFilter<C> {
    All,
    Only(C),
}

impl<C> Default for CategoryFilter<C> {
    fn default() -> Self {
        Self::All
    }
}

impl<C: Copy + PartialEq> CategoryFilter<C> {
    pub fn matches(&self, category: C) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl<C> CategoryFilter<C>
where
    C: Copy + PartialEq + FromStr + IntoEnumIterator + fmt::Display,
{
    /// Parse `all` (any case) or one value of `C`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, CoreError> {
        if raw.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        parse_variant(field, raw).map(Self::Only)
    }

    /// Step to the next filter: all → first value → … → last value → all.
    #[must_use]
    pub fn cycle(self) -> Self {
        let mut values = C::iter();
        match self {
            Self::All => values.next().map_or(Self::All, Self::Only),
            Self::Only(current) => values
                .skip_while(|v| *v != current)
                .nth(1)
                .map_or(Self::All, Self::Only),
        }
    }
}

impl<C: fmt::Display> fmt::Display for CategoryFilter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(c) => c.fmt(f),
        }
    }
}

impl<C> FromStr for CategoryFilter<C>
where
    C: Copy + PartialEq + FromStr + IntoEnumIterator + fmt::Display,
{
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("filter", s)
    }
}

// ── ListFilter ───────────────────────────────────────────────────────

/// Free-text query combined with a category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<C> {
    pub query: String,
    pub category: CategoryFilter<C>,
}

impl<C> Default for ListFilter<C> {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: CategoryFilter::All,
        }
    }
}

impl<C: Copy + PartialEq> ListFilter<C> {
    pub fn new(query: impl Into<String>, category: CategoryFilter<C>) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Searchable + Categorized<C>,
    {
        self.category.matches(record.category()) && record.matches_query(&self.query)
    }

    /// Matching records, in their original order.
    pub fn apply<R>(&self, records: &[R]) -> Vec<R>
    where
        R: Searchable + Categorized<C> + Clone,
    {
        records.iter().filter(|r| self.matches(*r)).cloned().collect()
    }

    pub fn is_narrowed(&self) -> bool {
        !self.query.is_empty() || self.category != CategoryFilter::All
    }
}

// ── Record impls ─────────────────────────────────────────────────────

impl Searchable for Device {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.pole_id.as_str(), self.location.as_str(), self.region.as_str()]
    }
}

impl Categorized<DeviceStatus> for Device {
    fn category(&self) -> DeviceStatus {
        self.status
    }
}

impl Searchable for Incident {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.pole_id.as_str(), self.location.as_str()]
    }
}

impl Categorized<IncidentStatus> for Incident {
    fn category(&self) -> IncidentStatus {
        self.status
    }
}

impl Categorized<Severity> for Incident {
    fn category(&self) -> Severity {
        self.severity
    }
}

impl Searchable for FieldJob {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.pole_id.as_str(), self.title.as_str(), self.location.as_str()]
    }
}

impl Categorized<JobStatus> for FieldJob {
    fn category(&self) -> JobStatus {
        self.status
    }
}

impl Categorized<Severity> for FieldJob {
    fn category(&self) -> Severity {
        self.priority
    }
}

impl Searchable for CitizenReport {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.title.as_str(), self.location.as_str()]
    }
}

impl Categorized<ReportStatus> for CitizenReport {
    fn category(&self) -> ReportStatus {
        self.status
    }
}

impl Categorized<Severity> for CitizenReport {
    fn category(&self) -> Severity {
        self.priority
    }
}

impl Searchable for Telemetry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.pole_id.as_str(), self.location.as_str()]
    }
}

impl Categorized<DeviceStatus> for Telemetry {
    fn category(&self) -> DeviceStatus {
        self.status
    }
}

impl Searchable for FailurePrediction {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.pole_id.as_str(), self.location.as_str()]
    }
}

impl Categorized<RiskBand> for FailurePrediction {
    fn category(&self) -> RiskBand {
        self.band()
    }
}

impl Searchable for UserAccount {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

impl Categorized<UserRole> for UserAccount {
    fn category(&self) -> UserRole {
        self.role
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;

    fn pole_ids(devices: &[Device]) -> Vec<&str> {
        devices.iter().map(|d| d.pole_id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let devices = fixtures::devices();
        let lower = ListFilter::<DeviceStatus>::new("ernakulam", CategoryFilter::All).apply(&devices);
        let upper = ListFilter::<DeviceStatus>::new("ERNAKULAM", CategoryFilter::All).apply(&devices);

        assert_eq!(pole_ids(&lower), vec!["KL-003-KCH"]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let devices = fixtures::devices();
        let all = ListFilter::<DeviceStatus>::default().apply(&devices);
        assert_eq!(all, devices);
    }

    #[test]
    fn every_match_contains_the_query() {
        let devices = fixtures::devices();
        for query in ["kochi", "KL-00", "road", "t", "zzz"] {
            let hits = ListFilter::<DeviceStatus>::new(query, CategoryFilter::All).apply(&devices);
            let needle = query.to_lowercase();
            for device in &hits {
                assert!(
                    device
                        .search_fields()
                        .iter()
                        .any(|f| f.to_lowercase().contains(&needle)),
                    "{} should not match {query}",
                    device.pole_id
                );
            }
            let again = ListFilter::<DeviceStatus>::new(query, CategoryFilter::All).apply(&hits);
            assert_eq!(again, hits);
        }
    }

    #[test]
    fn whitespace_query_is_literal() {
        let devices = fixtures::devices();
        let hits = ListFilter::<DeviceStatus>::new("  ", CategoryFilter::All).apply(&devices);
        assert!(hits.is_empty());
    }

    #[test]
    fn category_and_query_combine() {
        let devices = fixtures::devices();
        let filter = ListFilter::new("kochi", CategoryFilter::Only(DeviceStatus::Warning));
        assert_eq!(pole_ids(&filter.apply(&devices)), vec!["KL-002-KCH"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let filter = ListFilter::new("kochi", CategoryFilter::Only(DeviceStatus::Healthy));
        assert!(filter.apply::<Device>(&[]).is_empty());
    }

    #[test]
    fn incidents_search_by_id() {
        let incidents = fixtures::incidents();
        let hits = ListFilter::<IncidentStatus>::new("inc-2024-002", CategoryFilter::All)
            .apply(&incidents);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].pole_id, "KL-007-KLM");
    }

    #[test]
    fn predictions_filter_by_risk_band() {
        let predictions = fixtures::analytics().predictions;
        let high = ListFilter::new("", CategoryFilter::Only(RiskBand::High)).apply(&predictions);
        let poles: Vec<&str> = high.iter().map(|p| p.pole_id.as_str()).collect();
        assert_eq!(poles, vec!["KL-008-KLM", "KL-015-TSR"]);

        let users = fixtures::users();
        let hits = ListFilter::new("ksebl", CategoryFilter::Only(UserRole::Supervisor)).apply(&users);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Sanjay Singh");
    }

    #[test]
    fn works_over_shared_snapshots() {
        let devices: Vec<Arc<Device>> = fixtures::devices().into_iter().map(Arc::new).collect();
        let hits = ListFilter::new("", CategoryFilter::Only(DeviceStatus::Healthy)).apply(&devices);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn parse_accepts_all_and_values() {
        assert_eq!(
            CategoryFilter::<DeviceStatus>::parse("status", "ALL").unwrap(),
            CategoryFilter::All
        );
        assert_eq!(
            "in-progress".parse::<CategoryFilter<JobStatus>>().unwrap(),
            CategoryFilter::Only(JobStatus::InProgress)
        );
        assert!(CategoryFilter::<DeviceStatus>::parse("status", "broken").is_err());
    }

    #[test]
    fn cycle_visits_every_value_then_wraps() {
        let mut filter = CategoryFilter::<DeviceStatus>::All;
        let mut seen = Vec::new();
        for _ in 0..5 {
            filter = filter.cycle();
            seen.push(filter.to_string());
        }
        assert_eq!(seen, vec!["healthy", "warning", "critical", "offline", "all"]);
    }
}
