use rand::Rng;

use crate::models::Turn;

/// The assistant's reply source. The turn engine only depends on this trait,
/// so a real model call can replace the canned variant without touching the
/// turn-taking contract.
pub trait ReplyPolicy: Send + Sync {
    fn generate_reply(&self, history: &[Turn]) -> String;
}

pub const CANNED_REPLIES: [&str; 5] = [
    "I understand how you're feeling. Remember, it's okay to have difficult emotions. What would help you feel better right now?",
    "Thank you for sharing that with me. Your feelings are valid. Let's explore some coping strategies together.",
    "I hear you. Sometimes talking about our feelings can be the first step toward feeling better. What's been on your mind lately?",
    "That sounds challenging. You're being very brave by reaching out. What kind of support would be most helpful for you right now?",
    "I'm here to listen without judgment. Your mental wellness is important. How can we work together to improve how you're feeling?",
];

/// Uniform random pick from the canned list. Ignores the conversation by
/// design.
#[derive(Debug, Default)]
pub struct CannedReplyPolicy;

impl ReplyPolicy for CannedReplyPolicy {
    fn generate_reply(&self, _history: &[Turn]) -> String {
        let mut rng = rand::thread_rng();
        CANNED_REPLIES[rng.gen_range(0..CANNED_REPLIES.len())].to_string()
    }
}

/// Test double: replays a fixed script in order.
#[cfg(test)]
pub struct ScriptedReplyPolicy {
    script: parking_lot::Mutex<std::collections::VecDeque<String>>,
}

#[cfg(test)]
impl ScriptedReplyPolicy {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: parking_lot::Mutex::new(lines.into_iter().map(Into::into).collect()),
        }
    }
}

#[cfg(test)]
impl ReplyPolicy for ScriptedReplyPolicy {
    fn generate_reply(&self, _history: &[Turn]) -> String {
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| "(script exhausted)".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_policy_picks_from_the_fixed_list() {
        let policy = CannedReplyPolicy;
        for _ in 0..50 {
            let reply = policy.generate_reply(&[]);
            assert!(CANNED_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn scripted_policy_replays_in_order() {
        let policy = ScriptedReplyPolicy::new(["first", "second"]);
        assert_eq!(policy.generate_reply(&[]), "first");
        assert_eq!(policy.generate_reply(&[]), "second");
        assert_eq!(policy.generate_reply(&[]), "(script exhausted)");
    }
}
