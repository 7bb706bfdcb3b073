// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launch-time session bootstrap.
//!
//! Decides once per launch whether the stored session is still usable:
//! hydrate, resolve the account, and on an expired access token perform
//! exactly one refresh-then-retry before failing closed. The retry budget
//! is what keeps a rotated-elsewhere refresh token from looping forever.

use crate::api::{ApiClient, ApiError};
use crate::session::SessionClient;

/// Where the launch sequence currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Initializing,
    Authenticated,
    Unauthenticated,
}

/// What to do after `get_me` fails during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// 401 with a refresh token in hand: spend the single refresh attempt.
    RefreshOnce,
    /// Anything else: clear the session and give up.
    FailClosed,
}

/// Pure transition policy for a failed `get_me`, kept free of I/O so the
/// single-retry rule is testable on its own.
pub fn recovery_for_me_failure(err: &ApiError, refresh_available: bool) -> Recovery {
    if err.is_unauthorized() && refresh_available {
        Recovery::RefreshOnce
    } else {
        Recovery::FailClosed
    }
}

/// Runs the bootstrap sequence. Holding `&mut self` makes a launch a
/// single-flight operation — overlapping runs cannot be expressed.
pub struct BootstrapController {
    api: ApiClient,
    session: SessionClient,
    state: BootstrapState,
}

impl BootstrapController {
    pub fn new(api: ApiClient, session: SessionClient) -> Self {
        Self { api, session, state: BootstrapState::Initializing }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    pub fn session(&self) -> &SessionClient {
        &self.session
    }

    /// Take the session back out (e.g. to hand to the UI after launch).
    pub fn into_session(self) -> SessionClient {
        self.session
    }

    /// Run the launch sequence once and settle in a terminal state.
    ///
    /// With no stored pair this makes zero network calls.
    pub async fn run(&mut self) -> BootstrapState {
        self.state = BootstrapState::Initializing;
        self.session.hydrate();

        let Some(pair) = self.session.token_pair() else {
            self.state = BootstrapState::Unauthenticated;
            return self.state;
        };

        self.state = match self.api.get_me(&pair.access_token).await {
            Ok(account) => {
                self.session.set_account(account);
                BootstrapState::Authenticated
            }
            Err(err) => match recovery_for_me_failure(&err, true) {
                Recovery::RefreshOnce => self.refresh_and_retry(&pair.refresh_token).await,
                Recovery::FailClosed => {
                    tracing::debug!(err = %err, "bootstrap failed closed");
                    self.session.clear_session();
                    BootstrapState::Unauthenticated
                }
            },
        };
        self.state
    }

    /// The one refresh attempt: rotate, persist, retry `get_me` once.
    async fn refresh_and_retry(&mut self, refresh_token: &str) -> BootstrapState {
        let pair = match self.api.refresh(refresh_token).await {
            Ok(pair) => pair,
            Err(err) => {
                tracing::debug!(err = %err, "bootstrap refresh failed");
                self.session.clear_session();
                return BootstrapState::Unauthenticated;
            }
        };

        // Persist before using: if the retry below dies mid-flight, the
        // rotated pair is what the next launch must find.
        if self.session.set_tokens(&pair).is_err() {
            self.session.clear_session();
            return BootstrapState::Unauthenticated;
        }

        match self.api.get_me(&pair.access_token).await {
            Ok(account) => {
                self.session.set_account(account);
                BootstrapState::Authenticated
            }
            Err(err) => {
                tracing::debug!(err = %err, "bootstrap retry failed");
                self.session.clear_session();
                BootstrapState::Unauthenticated
            }
        }
    }
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
