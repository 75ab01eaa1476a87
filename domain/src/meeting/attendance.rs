//! Attendance and proxy aggregation
//!
//! Raw attendance is a list of members with their mode and voting weight,
//! plus proxies that delegate an absent member's weight to someone attending.
//! [`AttendanceRoster::aggregate_for`] reduces it to the four figures the
//! quorum evaluator consumes, applying the policy's inclusion flags.

use crate::core::error::ValidationError;
use crate::core::ids::MemberId;
use crate::policy::quorum_policy::{QuorumBasis, QuorumPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// How a member attends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceMode {
    Present,
    Remote,
    #[default]
    Absent,
}

impl fmt::Display for AttendanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceMode::Present => write!(f, "present"),
            AttendanceMode::Remote => write!(f, "remote"),
            AttendanceMode::Absent => write!(f, "absent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub member_id: MemberId,
    #[serde(default)]
    pub mode: AttendanceMode,
    /// Voting power of the member
    #[serde(default = "unit_weight")]
    pub weight: f64,
}

fn unit_weight() -> f64 {
    1.0
}

impl AttendanceRecord {
    pub fn new(member_id: impl Into<MemberId>, mode: AttendanceMode, weight: f64) -> Self {
        Self {
            member_id: member_id.into(),
            mode,
            weight,
        }
    }

    pub fn present(member_id: impl Into<MemberId>, weight: f64) -> Self {
        Self::new(member_id, AttendanceMode::Present, weight)
    }

    pub fn remote(member_id: impl Into<MemberId>, weight: f64) -> Self {
        Self::new(member_id, AttendanceMode::Remote, weight)
    }

    pub fn absent(member_id: impl Into<MemberId>, weight: f64) -> Self {
        Self::new(member_id, AttendanceMode::Absent, weight)
    }

    fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() {
            self.weight.max(0.0)
        } else {
            0.0
        }
    }

    fn participates(&self, count_remote: bool) -> bool {
        match self.mode {
            AttendanceMode::Present => true,
            AttendanceMode::Remote => count_remote,
            AttendanceMode::Absent => false,
        }
    }
}

/// Delegation of the giver's weight to the receiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    pub giver: MemberId,
    pub receiver: MemberId,
}

impl Proxy {
    pub fn new(giver: impl Into<MemberId>, receiver: impl Into<MemberId>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

/// Final attendance figures for quorum evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttendanceAggregate {
    pub present_count: u64,
    pub present_weight: f64,
    pub eligible_count: u64,
    pub eligible_weight: f64,
}

impl AttendanceAggregate {
    pub fn new(
        present_count: u64,
        present_weight: f64,
        eligible_count: u64,
        eligible_weight: f64,
    ) -> Self {
        Self {
            present_count,
            present_weight,
            eligible_count,
            eligible_weight,
        }
    }

    /// `(present, eligible)` pair for a basis
    pub fn figures(&self, basis: QuorumBasis) -> (f64, f64) {
        match basis {
            QuorumBasis::EligibleMembers => {
                (self.present_count as f64, self.eligible_count as f64)
            }
            QuorumBasis::EligibleWeight => (self.present_weight, self.eligible_weight),
        }
    }
}

/// Attendance of one meeting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRoster {
    #[serde(default)]
    records: Vec<AttendanceRecord>,
    #[serde(default)]
    proxies: Vec<Proxy>,
}

impl AttendanceRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: AttendanceRecord) -> Self {
        self.record(record);
        self
    }

    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxies.push(proxy);
        self
    }

    /// Insert or replace the record of a member
    pub fn record(&mut self, record: AttendanceRecord) {
        match self
            .records
            .iter_mut()
            .find(|r| r.member_id == record.member_id)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn proxies(&self) -> &[Proxy] {
        &self.proxies
    }

    pub fn member(&self, member_id: &MemberId) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| &r.member_id == member_id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether attendance has been taken (someone is not marked absent)
    pub fn is_recorded(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.mode != AttendanceMode::Absent)
    }

    /// Reject self-delegation, unknown members and multiple proxies from one giver
    pub fn validate_proxies(&self) -> Result<(), ValidationError> {
        let mut givers = HashSet::new();
        for proxy in &self.proxies {
            let invalid = |detail: &str| ValidationError::InvalidProxy {
                giver: proxy.giver.clone(),
                receiver: proxy.receiver.clone(),
                detail: detail.to_string(),
            };
            if proxy.giver == proxy.receiver {
                return Err(invalid("a member cannot hold their own proxy"));
            }
            if self.member(&proxy.giver).is_none() {
                return Err(invalid("giver is not on the roster"));
            }
            if self.member(&proxy.receiver).is_none() {
                return Err(invalid("receiver is not on the roster"));
            }
            if !givers.insert(&proxy.giver) {
                return Err(invalid("giver already delegated to another member"));
            }
        }
        Ok(())
    }

    /// Aggregate under a quorum policy's inclusion flags
    pub fn aggregate_for(&self, policy: &QuorumPolicy) -> AttendanceAggregate {
        self.aggregate(policy.include_proxies, policy.count_remote)
    }

    pub fn aggregate(&self, include_proxies: bool, count_remote: bool) -> AttendanceAggregate {
        let mut aggregate = AttendanceAggregate::default();

        for record in &self.records {
            aggregate.eligible_count += 1;
            aggregate.eligible_weight += record.effective_weight();
            if record.participates(count_remote) {
                aggregate.present_count += 1;
                aggregate.present_weight += record.effective_weight();
            }
        }

        if include_proxies {
            let givers = self.represented_givers(move |receiver| receiver.participates(count_remote));
            for giver in givers {
                aggregate.present_count += 1;
                aggregate.present_weight += giver.effective_weight();
            }
        }

        aggregate
    }

    /// Own weight plus the weight of absent members this member represents
    pub fn voting_weight(&self, member_id: &MemberId) -> f64 {
        let Some(record) = self.member(member_id) else {
            return 0.0;
        };
        let delegated: f64 = self
            .represented_givers(move |receiver| &receiver.member_id == member_id)
            .map(|giver| giver.effective_weight())
            .sum();
        record.effective_weight() + delegated
    }

    /// Absent givers whose receiver satisfies `accept`, each counted once
    fn represented_givers<'a>(
        &'a self,
        accept: impl Fn(&AttendanceRecord) -> bool + 'a,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        let mut seen = HashSet::new();
        self.proxies.iter().filter_map(move |proxy| {
            let giver = self.member(&proxy.giver)?;
            let receiver = self.member(&proxy.receiver)?;
            let counts = giver.mode == AttendanceMode::Absent
                && proxy.giver != proxy.receiver
                && accept(receiver)
                && seen.insert(proxy.giver.clone());
            counts.then_some(giver)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> AttendanceRoster {
        AttendanceRoster::new()
            .with_record(AttendanceRecord::present("alice", 30.0))
            .with_record(AttendanceRecord::remote("bob", 20.0))
            .with_record(AttendanceRecord::absent("carol", 25.0))
            .with_record(AttendanceRecord::absent("dave", 25.0))
            .with_proxy(Proxy::new("carol", "alice"))
    }

    #[test]
    fn test_aggregate_without_flags() {
        let agg = roster().aggregate(false, false);
        assert_eq!(agg.eligible_count, 4);
        assert_eq!(agg.eligible_weight, 100.0);
        assert_eq!(agg.present_count, 1);
        assert_eq!(agg.present_weight, 30.0);
    }

    #[test]
    fn test_aggregate_with_remote_and_proxies() {
        let agg = roster().aggregate(true, true);
        assert_eq!(agg.present_count, 3);
        assert_eq!(agg.present_weight, 75.0);
        assert_eq!(agg.eligible_weight, 100.0);
    }

    #[test]
    fn test_proxy_to_uncounted_remote_receiver_is_ignored() {
        let roster = AttendanceRoster::new()
            .with_record(AttendanceRecord::remote("bob", 10.0))
            .with_record(AttendanceRecord::absent("carol", 5.0))
            .with_proxy(Proxy::new("carol", "bob"));
        assert_eq!(roster.aggregate(true, false).present_count, 0);
        assert_eq!(roster.aggregate(true, true).present_count, 2);
    }

    #[test]
    fn test_attending_giver_not_counted_twice() {
        let roster = AttendanceRoster::new()
            .with_record(AttendanceRecord::present("alice", 1.0))
            .with_record(AttendanceRecord::present("carol", 1.0))
            .with_proxy(Proxy::new("carol", "alice"));
        let agg = roster.aggregate(true, false);
        assert_eq!(agg.present_count, 2);
        assert_eq!(agg.present_weight, 2.0);
    }

    #[test]
    fn test_voting_weight_includes_delegations() {
        let roster = roster();
        assert_eq!(roster.voting_weight(&"alice".into()), 55.0);
        assert_eq!(roster.voting_weight(&"bob".into()), 20.0);
        assert_eq!(roster.voting_weight(&"nobody".into()), 0.0);
    }

    #[test]
    fn test_negative_weight_clamped() {
        let roster = AttendanceRoster::new().with_record(AttendanceRecord::present("x", -4.0));
        assert_eq!(roster.aggregate(false, false).eligible_weight, 0.0);
    }

    #[test]
    fn test_record_replaces_existing_member() {
        let mut roster = roster();
        roster.record(AttendanceRecord::present("dave", 25.0));
        assert_eq!(roster.records().len(), 4);
        assert_eq!(roster.aggregate(false, false).present_count, 2);
    }

    #[test]
    fn test_validate_proxies() {
        assert!(roster().validate_proxies().is_ok());

        let self_proxy = roster().with_proxy(Proxy::new("dave", "dave"));
        assert!(matches!(
            self_proxy.validate_proxies(),
            Err(ValidationError::InvalidProxy { .. })
        ));

        let double = roster().with_proxy(Proxy::new("carol", "bob"));
        assert!(double.validate_proxies().is_err());

        let unknown = roster().with_proxy(Proxy::new("zoe", "alice"));
        assert!(unknown.validate_proxies().is_err());
    }

    #[test]
    fn test_is_recorded() {
        assert!(roster().is_recorded());
        let nobody = AttendanceRoster::new().with_record(AttendanceRecord::absent("x", 1.0));
        assert!(!nobody.is_recorded());
    }

    #[test]
    fn test_figures_by_basis() {
        let agg = AttendanceAggregate::new(3, 40.0, 10, 100.0);
        assert_eq!(agg.figures(QuorumBasis::EligibleMembers), (3.0, 10.0));
        assert_eq!(agg.figures(QuorumBasis::EligibleWeight), (40.0, 100.0));
    }
}
