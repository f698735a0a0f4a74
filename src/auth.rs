use std::time::Duration;

use tracing::debug;

use crate::models::Role;

#[derive(Debug, Clone, Default)]
struct Track {
    candidate: String,
    submitting: bool,
}

/// Login screen state: one independent input track per role, each with its
/// own candidate name and in-flight flag. Submission simulates a fixed-delay
/// round trip to an authentication service that accepts any non-empty name.
#[derive(Debug, Clone)]
pub struct LoginScreen {
    student: Track,
    teacher: Track,
    delay: Duration,
}

impl LoginScreen {
    pub fn new(delay: Duration) -> Self {
        Self {
            student: Track::default(),
            teacher: Track::default(),
            delay,
        }
    }

    fn track(&self, role: Role) -> &Track {
        match role {
            Role::Student => &self.student,
            Role::Teacher => &self.teacher,
        }
    }

    fn track_mut(&mut self, role: Role) -> &mut Track {
        match role {
            Role::Student => &mut self.student,
            Role::Teacher => &mut self.teacher,
        }
    }

    pub fn set_candidate(&mut self, role: Role, value: impl Into<String>) {
        self.track_mut(role).candidate = value.into();
    }

    pub fn candidate(&self, role: Role) -> &str {
        &self.track(role).candidate
    }

    pub fn is_submitting(&self, role: Role) -> bool {
        self.track(role).submitting
    }

    /// Mirrors the submit-button guard: a track can submit only when its
    /// candidate is non-empty after trimming and no submit is in flight.
    pub fn can_submit(&self, role: Role) -> bool {
        let track = self.track(role);
        !track.submitting && !track.candidate.trim().is_empty()
    }

    /// Runs one simulated login round trip. Returns the `(role, name)` pair
    /// on success, `None` when the guard rejects the attempt. The in-flight
    /// flag is reset on every path.
    pub async fn submit(&mut self, role: Role) -> Option<(Role, String)> {
        if !self.can_submit(role) {
            return None;
        }

        self.track_mut(role).submitting = true;
        tokio::time::sleep(self.delay).await;

        let track = self.track_mut(role);
        let emitted = if track.candidate.trim().is_empty() {
            None
        } else {
            Some((role, track.candidate.clone()))
        };
        track.submitting = false;

        if emitted.is_some() {
            debug!("login accepted for {role:?}");
        }
        emitted
    }
}
