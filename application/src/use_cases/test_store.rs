//! In-memory store and recording journal for use case tests.

use crate::ports::assembly_store::{AssemblyStore, StoreError};
use crate::ports::decision_journal::{DecisionJournal, JournalEvent};
use assembly_domain::{
    AttendanceRoster, Ballot, Decision, ManualTally, Meeting, MeetingId, Motion, MotionId,
    PolicyCatalog, TallyState,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Data {
    meetings: HashMap<MeetingId, Meeting>,
    rosters: HashMap<MeetingId, AttendanceRoster>,
    motions: Vec<Motion>,
    catalog: PolicyCatalog,
    ballots: Vec<Ballot>,
    tally_states: HashMap<MotionId, TallyState>,
    tallies: HashMap<MotionId, ManualTally>,
    decisions: HashMap<MotionId, Decision>,
}

#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meeting(self, meeting: Meeting) -> Self {
        self.data
            .lock()
            .unwrap()
            .meetings
            .insert(meeting.id.clone(), meeting);
        self
    }

    pub fn with_roster(self, meeting: &str, roster: AttendanceRoster) -> Self {
        self.data
            .lock()
            .unwrap()
            .rosters
            .insert(MeetingId::new(meeting), roster);
        self
    }

    pub fn with_motion(self, motion: Motion) -> Self {
        self.data.lock().unwrap().motions.push(motion);
        self
    }

    pub fn with_catalog(self, catalog: PolicyCatalog) -> Self {
        self.data.lock().unwrap().catalog = catalog;
        self
    }

    pub fn with_ballot(self, ballot: Ballot) -> Self {
        self.data.lock().unwrap().ballots.push(ballot);
        self
    }

    pub fn with_saved_tally(self, motion: &str, tally: ManualTally) -> Self {
        self.data
            .lock()
            .unwrap()
            .tallies
            .insert(MotionId::new(motion), tally);
        self
    }

    pub fn stored_decision(&self, motion: &str) -> Option<Decision> {
        self.data
            .lock()
            .unwrap()
            .decisions
            .get(&MotionId::new(motion))
            .cloned()
    }

    pub fn has_motion(&self, motion: &str) -> bool {
        let id = MotionId::new(motion);
        self.data.lock().unwrap().motions.iter().any(|m| m.id == id)
    }
}

#[async_trait]
impl AssemblyStore for MemoryStore {
    async fn meeting(&self, id: &MeetingId) -> Result<Meeting, StoreError> {
        self.data
            .lock()
            .unwrap()
            .meetings
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::meeting_not_found(id))
    }

    async fn save_meeting(&self, meeting: Meeting) -> Result<(), StoreError> {
        self.data
            .lock()
            .unwrap()
            .meetings
            .insert(meeting.id.clone(), meeting);
        Ok(())
    }

    async fn roster(&self, meeting: &MeetingId) -> Result<AttendanceRoster, StoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .rosters
            .get(meeting)
            .cloned()
            .unwrap_or_default())
    }

    async fn motion(&self, id: &MotionId) -> Result<Motion, StoreError> {
        self.data
            .lock()
            .unwrap()
            .motions
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| StoreError::motion_not_found(id))
    }

    async fn motions_for(&self, meeting: &MeetingId) -> Result<Vec<Motion>, StoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .motions
            .iter()
            .filter(|m| &m.meeting_id == meeting)
            .cloned()
            .collect())
    }

    async fn save_motion(&self, motion: Motion) -> Result<(), StoreError> {
        let mut data = self.data.lock().unwrap();
        match data.motions.iter_mut().find(|m| m.id == motion.id) {
            Some(existing) => *existing = motion,
            None => data.motions.push(motion),
        }
        Ok(())
    }

    async fn delete_motion(&self, id: &MotionId) -> Result<(), StoreError> {
        let mut data = self.data.lock().unwrap();
        data.motions.retain(|m| &m.id != id);
        data.ballots.retain(|b| &b.motion_id != id);
        data.tally_states.remove(id);
        data.tallies.remove(id);
        data.decisions.remove(id);
        Ok(())
    }

    async fn policy_catalog(&self) -> Result<PolicyCatalog, StoreError> {
        Ok(self.data.lock().unwrap().catalog.clone())
    }

    async fn ballots(&self, motion: &MotionId) -> Result<Vec<Ballot>, StoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .ballots
            .iter()
            .filter(|b| &b.motion_id == motion)
            .cloned()
            .collect())
    }

    async fn tally_state(&self, motion: &MotionId) -> Result<Option<TallyState>, StoreError> {
        Ok(self.data.lock().unwrap().tally_states.get(motion).copied())
    }

    async fn save_tally_state(
        &self,
        motion: &MotionId,
        state: TallyState,
    ) -> Result<(), StoreError> {
        self.data
            .lock()
            .unwrap()
            .tally_states
            .insert(motion.clone(), state);
        Ok(())
    }

    async fn saved_tally(&self, motion: &MotionId) -> Result<Option<ManualTally>, StoreError> {
        Ok(self.data.lock().unwrap().tallies.get(motion).copied())
    }

    async fn save_tally(&self, motion: &MotionId, tally: ManualTally) -> Result<(), StoreError> {
        self.data
            .lock()
            .unwrap()
            .tallies
            .insert(motion.clone(), tally);
        Ok(())
    }

    async fn decision(&self, motion: &MotionId) -> Result<Option<Decision>, StoreError> {
        Ok(self.data.lock().unwrap().decisions.get(motion).cloned())
    }

    async fn save_decision(&self, decision: Decision) -> Result<(), StoreError> {
        self.data
            .lock()
            .unwrap()
            .decisions
            .insert(decision.motion_id.clone(), decision);
        Ok(())
    }
}

/// Journal that keeps event types for assertions
#[derive(Default)]
pub struct RecordingJournal {
    events: Mutex<Vec<JournalEvent>>,
}

impl RecordingJournal {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }
}

impl DecisionJournal for RecordingJournal {
    fn record(&self, event: JournalEvent) {
        self.events.lock().unwrap().push(event);
    }
}
