use crate::events::SessionEvent;
use parking_lot::Mutex;
use shared::domain::LOGIN_PATH;
use std::sync::Arc;
use tokio::{
    sync::broadcast::{self, error::RecvError, error::TryRecvError},
    task::JoinHandle,
};
use tracing::{info, warn};

#[derive(Debug)]
struct NavigationState {
    current: String,
    history: Vec<String>,
    return_to: Option<String>,
}

/// Current location of the dashboard plus where to return after login.
#[derive(Debug)]
pub struct Navigator {
    state: Mutex<NavigationState>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(LOGIN_PATH)
    }
}

impl Navigator {
    pub fn new(initial: &str) -> Self {
        Self {
            state: Mutex::new(NavigationState {
                current: initial.to_string(),
                history: vec![initial.to_string()],
                return_to: None,
            }),
        }
    }

    pub fn current(&self) -> String {
        self.state.lock().current.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.state.lock().history.clone()
    }

    pub fn navigate(&self, to: &str) {
        let mut state = self.state.lock();
        if state.current == to {
            return;
        }
        state.current = to.to_string();
        state.history.push(to.to_string());
    }

    /// Goes to the login view and remembers `from` for after login.
    pub fn redirect_to_login(&self, from: Option<&str>) {
        {
            let mut state = self.state.lock();
            if let Some(from) = from.filter(|f| !f.is_empty() && *f != LOGIN_PATH) {
                state.return_to = Some(from.to_string());
            }
        }
        self.navigate(LOGIN_PATH);
    }

    pub fn take_return_to(&self) -> Option<String> {
        self.state.lock().return_to.take()
    }

    pub fn handle_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::AuthorizationLost { path } => {
                let current = self.current();
                if current == LOGIN_PATH {
                    return;
                }
                info!("Authorization lost on {path}, redirecting to {LOGIN_PATH}");
                self.redirect_to_login(Some(&current));
            }
        }
    }

    /// Applies every event already queued on `events` without waiting.
    pub fn drain(&self, events: &mut broadcast::Receiver<SessionEvent>) {
        loop {
            match events.try_recv() {
                Ok(event) => self.handle_event(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Navigator skipped {skipped} session events");
                    self.redirect_to_login(None);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Listens for session events until the sending side goes away.
    pub fn watch(self: Arc<Self>, mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => self.handle_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Navigator skipped {skipped} session events");
                        self.redirect_to_login(None);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
