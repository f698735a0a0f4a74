use anyhow::bail;
use tracing::debug;

use crate::models::{Identity, Role};
use crate::session::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Student(Identity),
    Teacher(Identity),
}

/// Chooses which screen is live based on the saved session. The only
/// transitions are login (from the login screen) and logout (from either
/// session screen); there is no in-place role switch.
pub struct Router<S: SessionStore> {
    store: S,
    screen: Screen,
}

impl<S: SessionStore> Router<S> {
    /// Resolves the initial screen once from the store. A corrupt saved
    /// record has already been discarded by the store, so it lands on the
    /// login screen.
    pub fn startup(store: S) -> anyhow::Result<Self> {
        let screen = match store.restore()? {
            Some(identity) => Self::session_screen(identity),
            None => Screen::Login,
        };
        Ok(Self { store, screen })
    }

    fn session_screen(identity: Identity) -> Screen {
        match identity.role {
            Role::Student => Screen::Student(identity),
            Role::Teacher => Screen::Teacher(identity),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn authenticate(&mut self, role: Role, username: String) -> anyhow::Result<()> {
        if self.screen != Screen::Login {
            bail!("a session is already active; log out first");
        }
        let identity = Identity { role, username };
        self.store.save(&identity)?;
        debug!("session opened for {} ({:?})", identity.username, identity.role);
        self.screen = Self::session_screen(identity);
        Ok(())
    }

    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.store.clear()?;
        self.screen = Screen::Login;
        debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn startup_with_empty_store_lands_on_login() {
        let router = Router::startup(MemorySessionStore::default()).unwrap();
        assert_eq!(*router.screen(), Screen::Login);
    }

    #[test]
    fn startup_restores_a_saved_session() {
        let store = MemorySessionStore::default();
        store
            .save(&Identity {
                role: Role::Teacher,
                username: "ms-rivera".to_string(),
            })
            .unwrap();

        let router = Router::startup(store).unwrap();
        match router.screen() {
            Screen::Teacher(identity) => assert_eq!(identity.username, "ms-rivera"),
            other => panic!("expected teacher screen, got {other:?}"),
        }
    }

    #[test]
    fn authenticate_saves_and_transitions() {
        let mut router = Router::startup(MemorySessionStore::default()).unwrap();
        router.authenticate(Role::Student, "alex".to_string()).unwrap();

        match router.screen() {
            Screen::Student(identity) => assert_eq!(identity.username, "alex"),
            other => panic!("expected student screen, got {other:?}"),
        }
        assert!(router.store.restore().unwrap().is_some());
    }

    #[test]
    fn authenticate_is_rejected_while_logged_in() {
        let mut router = Router::startup(MemorySessionStore::default()).unwrap();
        router.authenticate(Role::Student, "alex".to_string()).unwrap();

        let err = router.authenticate(Role::Teacher, "ms-rivera".to_string());
        assert!(err.is_err());
    }

    #[test]
    fn logout_clears_the_store_and_returns_to_login() {
        let mut router = Router::startup(MemorySessionStore::default()).unwrap();
        router.authenticate(Role::Student, "alex".to_string()).unwrap();

        router.logout().unwrap();
        assert_eq!(*router.screen(), Screen::Login);
        assert!(router.store.restore().unwrap().is_none());
    }
}
