//! Host → action selection state machine
//!
//! Each actor walks `Idle` → `HostSelected` → `Executing` → `HostSelected`,
//! and "back" returns to `Idle`. Every public transition checks the
//! authorization gate before looking at any state.
//!
//! # Locking
//!
//! A transition holds its actor's session lock from the first read until
//! its last reply is rendered, including the SSH call. Events from the
//! same actor therefore never interleave, and the view the actor ends up
//! looking at always matches the stored state. Other actors use other
//! locks and are never held up.

use std::sync::Arc;

use pdv_core::{Fleet, RemoteExecutor, SelectionError};
use pdv_protocol::{ActorId, CallbackAction, EventKind, InboundEvent, MaintenanceAction};

use crate::auth::AuthorizationGate;
use crate::channel::{ChannelError, Responder};
use crate::reply::{host_detail, host_list, report, Reply};
use crate::session::{OwnedSession, SessionStore};

/// Drives every actor's selection flow
pub struct SelectionMachine<E> {
    /// Who may act
    gate: AuthorizationGate,
    /// Per-actor sessions
    sessions: Arc<SessionStore>,
    /// Hosts that can be selected
    fleet: Fleet,
    /// Runs actions on hosts
    executor: E,
    /// SSH user shown in the host detail view
    ssh_username: String,
}

impl<E: RemoteExecutor> SelectionMachine<E> {
    /// Create a new state machine
    pub fn new(
        gate: AuthorizationGate,
        sessions: Arc<SessionStore>,
        fleet: Fleet,
        executor: E,
        ssh_username: impl Into<String>,
    ) -> Self {
        Self {
            gate,
            sessions,
            fleet,
            executor,
            ssh_username: ssh_username.into(),
        }
    }

    /// Get the session store
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Route a decoded event to its transition
    pub async fn handle<R>(&self, event: InboundEvent, responder: &R) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        let actor = event.actor;
        match event.kind {
            EventKind::Entry => self.entry(actor, responder).await,
            EventKind::Callback(CallbackAction::SelectHost(index)) => {
                self.select_host(actor, index, responder).await
            }
            EventKind::Callback(CallbackAction::SelectAction(action)) => {
                self.select_action(actor, action, responder).await
            }
            EventKind::Callback(CallbackAction::Back) => self.back(actor, responder).await,
            EventKind::Unrecognized(token) => self.unrecognized(actor, &token, responder).await,
        }
    }

    /// Show the host list
    pub async fn entry<R>(&self, actor: ActorId, responder: &R) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        if !self.admit(actor, responder).await? {
            return Ok(());
        }

        tracing::debug!("{} opened the host list", actor);
        self.show_host_list(responder).await
    }

    /// Select a host and show its actions
    pub async fn select_host<R>(
        &self,
        actor: ActorId,
        index: u8,
        responder: &R,
    ) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        if !self.admit(actor, responder).await? {
            return Ok(());
        }

        let host = match self.fleet.host(index) {
            Ok(host) => host,
            Err(e) => {
                tracing::warn!("{} sent an invalid selection: {}", actor, e);
                return self.show_host_list(responder).await;
            }
        };

        let mut session = self.sessions.lock(actor).await;
        session.selected_host = Some(host);
        session.pending_action = None;
        tracing::info!("{} selected {}", actor, host);

        responder
            .render(Reply::HostDetail {
                host,
                view: host_detail(&host, &self.ssh_username),
            })
            .await
    }

    /// Run an action on the selected host and report the result
    pub async fn select_action<R>(
        &self,
        actor: ActorId,
        action: MaintenanceAction,
        responder: &R,
    ) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        if !self.admit(actor, responder).await? {
            return Ok(());
        }

        let mut session = match self.sessions.lock_existing(actor).await {
            Some(session) if session.selected_host.is_some() => session,
            _ => {
                tracing::warn!("{} requested {}: {}", actor, action, SelectionError::NoHostSelected);
                return self.show_host_list(responder).await;
            }
        };

        let outcome = self.run_action(actor, &mut session, action, responder).await;
        session.pending_action = None;
        outcome
    }

    /// Forget the selection and show the host list
    pub async fn back<R>(&self, actor: ActorId, responder: &R) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        if !self.admit(actor, responder).await? {
            return Ok(());
        }

        // An actor without a session is already idle
        let mut session = self.sessions.lock_existing(actor).await;
        if let Some(session) = session.as_mut() {
            session.reset();
        }
        tracing::debug!("{} went back to the host list", actor);

        self.show_host_list(responder).await
    }

    async fn unrecognized<R>(
        &self,
        actor: ActorId,
        token: &str,
        responder: &R,
    ) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        if !self.admit(actor, responder).await? {
            return Ok(());
        }

        tracing::warn!("{} pressed a button with unknown payload {:?}", actor, token);
        self.show_host_list(responder).await
    }

    /// Gate check; renders the denial itself
    async fn admit<R>(&self, actor: ActorId, responder: &R) -> Result<bool, ChannelError>
    where
        R: Responder + ?Sized,
    {
        if self.gate.is_authorized(actor) {
            return Ok(true);
        }

        tracing::warn!("Denied access to unauthorized {}", actor);
        responder.render(Reply::Denied).await?;
        Ok(false)
    }

    async fn show_host_list<R>(&self, responder: &R) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        responder.render(Reply::HostList(host_list(&self.fleet))).await
    }

    /// Body of `select_action`; the caller clears `pending_action` afterwards
    async fn run_action<R>(
        &self,
        actor: ActorId,
        session: &mut OwnedSession,
        action: MaintenanceAction,
        responder: &R,
    ) -> Result<(), ChannelError>
    where
        R: Responder + ?Sized,
    {
        let Some(host) = session.selected_host else {
            return self.show_host_list(responder).await;
        };
        session.pending_action = Some(action);
        tracing::info!("{} requested {} on {}", actor, action, host);

        // A failed progress notice does not cancel the action
        if let Err(e) = responder.render(Reply::Processing { host, action }).await {
            tracing::warn!("Failed to show progress to {}: {}", actor, e);
        }

        let result = self.executor.execute(&host, action).await;
        if result.succeeded {
            tracing::info!("{} on {} for {} succeeded", action, host, actor);
        } else {
            tracing::warn!("{} on {} for {} failed", action, host, actor);
        }

        responder.render(report(host, result)).await
    }
}
