//! JSON file adapter for the [`AssemblyStore`] port.
//!
//! The whole snapshot is loaded once and held behind a `tokio::sync::RwLock`.
//! Every write rewrites the document: it is serialized to a sibling temp
//! file which is then renamed over the original, so a crash mid-write never
//! leaves a truncated snapshot behind.

use super::snapshot::AssemblySnapshot;
use assembly_application::ports::assembly_store::{AssemblyStore, StoreError};
use assembly_domain::{
    AttendanceRoster, Ballot, Decision, ManualTally, Meeting, MeetingId, Motion, MotionId,
    PolicyCatalog, TallyState,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Snapshot store backed by a single JSON file
pub struct JsonSnapshotStore {
    path: Option<PathBuf>,
    snapshot: RwLock<AssemblySnapshot>,
}

impl JsonSnapshotStore {
    /// Load the snapshot at `path`.
    ///
    /// A missing file is an I/O error; a file that does not parse is
    /// [`StoreError::Corrupt`].
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let raw = tokio::fs::read_to_string(&path).await?;
        let snapshot: AssemblySnapshot = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?;

        info!(
            "Loaded {} meeting(s), {} motion(s) from {}",
            snapshot.meetings.len(),
            snapshot.motions.len(),
            path.display()
        );

        Ok(Self {
            path: Some(path),
            snapshot: RwLock::new(snapshot),
        })
    }

    /// Store that lives in memory only (tests, dry runs)
    pub fn in_memory(snapshot: AssemblySnapshot) -> Self {
        Self {
            path: None,
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Get the path to the snapshot file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of the current document
    pub async fn snapshot(&self) -> AssemblySnapshot {
        self.snapshot.read().await.clone()
    }

    /// Apply `change` and write the document back
    async fn update<T>(
        &self,
        change: impl FnOnce(&mut AssemblySnapshot) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut snapshot = self.snapshot.write().await;
        let mut next = snapshot.clone();
        let value = change(&mut next)?;
        self.persist(&next).await?;
        *snapshot = next;
        Ok(value)
    }

    async fn persist(&self, snapshot: &AssemblySnapshot) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let body = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::Corrupt(format!("cannot serialize snapshot: {}", e)))?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!("Snapshot written to {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl AssemblyStore for JsonSnapshotStore {
    async fn meeting(&self, id: &MeetingId) -> Result<Meeting, StoreError> {
        self.snapshot
            .read()
            .await
            .meetings
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| StoreError::meeting_not_found(id))
    }

    async fn save_meeting(&self, meeting: Meeting) -> Result<(), StoreError> {
        self.update(|s| {
            match s.meetings.iter_mut().find(|m| m.id == meeting.id) {
                Some(existing) => *existing = meeting,
                None => s.meetings.push(meeting),
            }
            Ok(())
        })
        .await
    }

    async fn roster(&self, meeting: &MeetingId) -> Result<AttendanceRoster, StoreError> {
        Ok(self
            .snapshot
            .read()
            .await
            .attendance
            .get(meeting)
            .cloned()
            .unwrap_or_default())
    }

    async fn motion(&self, id: &MotionId) -> Result<Motion, StoreError> {
        self.snapshot
            .read()
            .await
            .motions
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| StoreError::motion_not_found(id))
    }

    async fn motions_for(&self, meeting: &MeetingId) -> Result<Vec<Motion>, StoreError> {
        Ok(self
            .snapshot
            .read()
            .await
            .motions
            .iter()
            .filter(|m| &m.meeting_id == meeting)
            .cloned()
            .collect())
    }

    async fn save_motion(&self, motion: Motion) -> Result<(), StoreError> {
        self.update(|s| {
            match s.motions.iter_mut().find(|m| m.id == motion.id) {
                Some(existing) => *existing = motion,
                None => s.motions.push(motion),
            }
            Ok(())
        })
        .await
    }

    async fn delete_motion(&self, id: &MotionId) -> Result<(), StoreError> {
        self.update(|s| {
            if !s.motions.iter().any(|m| &m.id == id) {
                return Err(StoreError::motion_not_found(id));
            }
            s.motions.retain(|m| &m.id != id);
            s.ballots.retain(|b| &b.motion_id != id);
            s.tally_drafts.remove(id);
            s.tallies.remove(id);
            s.decisions.remove(id);
            Ok(())
        })
        .await
    }

    async fn policy_catalog(&self) -> Result<PolicyCatalog, StoreError> {
        Ok(self.snapshot.read().await.catalog())
    }

    async fn ballots(&self, motion: &MotionId) -> Result<Vec<Ballot>, StoreError> {
        Ok(self
            .snapshot
            .read()
            .await
            .ballots
            .iter()
            .filter(|b| &b.motion_id == motion)
            .cloned()
            .collect())
    }

    async fn tally_state(&self, motion: &MotionId) -> Result<Option<TallyState>, StoreError> {
        Ok(self.snapshot.read().await.tally_drafts.get(motion).copied())
    }

    async fn save_tally_state(
        &self,
        motion: &MotionId,
        state: TallyState,
    ) -> Result<(), StoreError> {
        self.update(|s| {
            s.tally_drafts.insert(motion.clone(), state);
            Ok(())
        })
        .await
    }

    async fn saved_tally(&self, motion: &MotionId) -> Result<Option<ManualTally>, StoreError> {
        Ok(self.snapshot.read().await.tallies.get(motion).copied())
    }

    async fn save_tally(&self, motion: &MotionId, tally: ManualTally) -> Result<(), StoreError> {
        self.update(|s| {
            s.tallies.insert(motion.clone(), tally);
            Ok(())
        })
        .await
    }

    async fn decision(&self, motion: &MotionId) -> Result<Option<Decision>, StoreError> {
        Ok(self.snapshot.read().await.decisions.get(motion).cloned())
    }

    async fn save_decision(&self, decision: Decision) -> Result<(), StoreError> {
        self.update(|s| {
            s.decisions.insert(decision.motion_id.clone(), decision);
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assembly_domain::{
        AttendanceRecord, BallotValue, DecisionConsolidator, MajorityEvaluator, QuorumBasis,
        QuorumEvaluator, QuorumPolicy, TallySource, VoteCounts, VotePolicy,
    };

    fn snapshot() -> AssemblySnapshot {
        AssemblySnapshot::default()
            .with_meeting(Meeting::new("agm").with_default_policies("q", "v"))
            .with_motion(Motion::new("m1", "agm", "Accounts"))
            .with_motion(Motion::new("m2", "agm", "Budget"))
            .with_quorum_policy(QuorumPolicy::single(
                "q",
                "Half",
                QuorumBasis::EligibleMembers,
                0.5,
            ))
            .with_vote_policy(VotePolicy::simple_majority("v"))
            .with_attendance(
                "agm",
                AttendanceRoster::new().with_record(AttendanceRecord::present("alice", 1.0)),
            )
            .with_ballot(Ballot::new("m1", "alice", BallotValue::For))
    }

    fn decision(motion: &str) -> Decision {
        let quorum = QuorumEvaluator::evaluate(
            &QuorumPolicy::single("q", "Half", QuorumBasis::EligibleMembers, 0.5),
            &assembly_domain::AttendanceAggregate::new(1, 1.0, 1, 1.0),
            1,
        )
        .unwrap();
        let majority = MajorityEvaluator::evaluate(
            &VotePolicy::simple_majority("v"),
            &VoteCounts::new(1.0, 0.0, 0.0),
            1.0,
        )
        .unwrap();
        DecisionConsolidator::consolidate(motion, &quorum, &majority, TallySource::Electronic)
    }

    async fn write_snapshot(dir: &Path) -> PathBuf {
        let path = dir.join("assembly.json");
        tokio::fs::write(&path, serde_json::to_vec(&snapshot()).unwrap())
            .await
            .unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_from_loaded_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::open(write_snapshot(dir.path()).await)
            .await
            .unwrap();

        let meeting = store.meeting(&MeetingId::new("agm")).await.unwrap();
        assert!(meeting.has_default_policies());
        assert_eq!(
            store.motions_for(&MeetingId::new("agm")).await.unwrap().len(),
            2
        );
        assert_eq!(store.ballots(&MotionId::new("m1")).await.unwrap().len(), 1);
        assert!(store.roster(&MeetingId::new("other")).await.unwrap().is_empty());
        assert!(
            store
                .motion(&MotionId::new("zzz"))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(dir.path()).await;

        let store = JsonSnapshotStore::open(&path).await.unwrap();
        store
            .save_tally(&MotionId::new("m1"), ManualTally::new(3, 2, 1, 0))
            .await
            .unwrap();
        store.save_decision(decision("m1")).await.unwrap();
        drop(store);

        let reopened = JsonSnapshotStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.saved_tally(&MotionId::new("m1")).await.unwrap(),
            Some(ManualTally::new(3, 2, 1, 0))
        );
        assert_eq!(
            reopened.decision(&MotionId::new("m1")).await.unwrap(),
            Some(decision("m1"))
        );
        // no temp file left behind
        assert!(!dir.path().join("assembly.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_delete_motion_removes_dependents() {
        let store = JsonSnapshotStore::in_memory(snapshot());
        store.save_decision(decision("m1")).await.unwrap();

        store.delete_motion(&MotionId::new("m1")).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.motions.len(), 1);
        assert!(snapshot.ballots.is_empty());
        assert!(snapshot.decisions.is_empty());
        assert!(
            store
                .delete_motion(&MotionId::new("m1"))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = JsonSnapshotStore::open(&path).await.err().unwrap();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonSnapshotStore::open(dir.path().join("absent.json"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[tokio::test]
    async fn test_in_memory_store_never_touches_disk() {
        let store = JsonSnapshotStore::in_memory(snapshot());
        assert!(store.path().is_none());
        store
            .save_meeting(Meeting::new("egm").with_title("Extraordinary"))
            .await
            .unwrap();
        assert_eq!(
            store.meeting(&MeetingId::new("egm")).await.unwrap().title,
            "Extraordinary"
        );
    }
}
