//! Where guards and logout send the user.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

/// Pages the session layer can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Public listing page.
    Home,
    /// Sign-in page.
    Login,
    /// The seller's own listings.
    MyListings,
}

impl Destination {
    /// Page path relative to the site root.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/index.html",
            Self::Login => "/login.html",
            Self::MyListings => "/my-listings.html",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Redirect and alert sink injected into the session manager.
pub trait Navigator: Send + Sync + fmt::Debug {
    /// Leave the current page for `destination`.
    fn redirect(&self, destination: Destination);
    /// Show `message` to the user.
    fn alert(&self, message: &str);
}

/// Something a [`RecordingNavigator`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A [`Navigator::redirect`] call.
    Redirect(Destination),
    /// A [`Navigator::alert`] call.
    Alert(String),
}

/// Navigator that only remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only the redirects, oldest first.
    #[must_use]
    pub fn redirects(&self) -> Vec<Destination> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NavigationEvent::Redirect(destination) => Some(destination),
                NavigationEvent::Alert(_) => None,
            })
            .collect()
    }

    fn push(&self, event: NavigationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, destination: Destination) {
        self.push(NavigationEvent::Redirect(destination));
    }

    fn alert(&self, message: &str) {
        self.push(NavigationEvent::Alert(message.to_string()));
    }
}
