//! The session controller: session store, profile resolver and redirect
//! guard wired together.
//!
//! One controller instance exists per running client. It caches the session
//! handle, resolves the profile behind it, and issues at most one automatic
//! redirect per signed-in identity. Hosts drive it from their event loop:
//! deliver provider notifications via [`SessionController::pump`] (or
//! [`SessionController::handle_auth_event`]) and route fired scheduler tasks
//! into [`SessionController::handle_deferred`].

use std::rc::Rc;
use std::time::Duration;

use brasa_auth::{
    AuthError, AuthEvent, AuthProvider, AuthSubscription, Credentials, ProfileSeed, ProfileStore,
    Session, SignUpOutcome,
};
use brasa_core::UserId;

use crate::navigator::{NavState, Navigator, ViewErrorKind};
use crate::notifier::{Notification, Notifier};
use crate::redirect;
use crate::resolver::ProfileResolver;
use crate::routes;
use crate::scheduler::{DeferredTask, Scheduler, TimerToken};
use crate::state::SessionState;

/// How long an authenticated identity may sit without a profile before the
/// controller gives up and routes to the error view. Single shot, no retry.
pub const PROFILE_GRACE_PERIOD: Duration = Duration::from_millis(5000);

/// Short deferral before an automatic redirect, letting other state settle.
pub const REDIRECT_SETTLE_DELAY: Duration = Duration::from_millis(100);

pub struct SessionController {
    auth: Rc<dyn AuthProvider>,
    profiles: Rc<dyn ProfileStore>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    scheduler: Rc<dyn Scheduler>,

    state: SessionState,
    resolver: ProfileResolver,

    /// Redirect latch: set when a redirect has been issued for the current
    /// identity; reset only when the identity becomes absent.
    has_redirected: bool,
    grace_timer: Option<TimerToken>,
    redirect_timer: Option<TimerToken>,

    subscription: Option<AuthSubscription>,
    /// Set by `close`; late events and timer fires are ignored afterwards.
    closed: bool,
}

impl SessionController {
    pub fn new(
        auth: Rc<dyn AuthProvider>,
        profiles: Rc<dyn ProfileStore>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            auth,
            profiles,
            navigator,
            notifier,
            scheduler,
            state: SessionState::new(),
            resolver: ProfileResolver::new(),
            has_redirected: false,
            grace_timer: None,
            redirect_timer: None,
            subscription: None,
            closed: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Subscribe to the provider and resolve the initial session.
    ///
    /// `loading` stays true until the first resolution lands, whether it
    /// arrives from this call or from the provider's initial-session event.
    pub fn init(&mut self) {
        self.subscription = Some(self.auth.subscribe());

        match self.auth.current_session() {
            Ok(session) => {
                let identity = session.as_ref().map(|s| s.user_id);
                self.set_session(session);
                self.state.loading = false;
                match identity {
                    Some(user_id) => self.refresh_profile(Some(user_id)),
                    None => self.state.profile = None,
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to resolve initial session");
                self.state.loading = false;
            }
        }

        self.evaluate_redirects();
    }

    /// Drain and handle any pending provider notifications.
    pub fn pump(&mut self) {
        let mut events = Vec::new();
        if let Some(subscription) = &self.subscription {
            while let Ok(event) = subscription.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            self.handle_auth_event(event);
        }
    }

    pub fn handle_auth_event(&mut self, event: AuthEvent) {
        if self.closed {
            tracing::debug!(?event, "auth event after close, ignoring");
            return;
        }

        match event {
            AuthEvent::InitialSession(session) => {
                let identity = session.as_ref().map(|s| s.user_id);
                self.set_session(session);
                self.state.loading = false;
                match identity {
                    Some(user_id) => self.refresh_profile(Some(user_id)),
                    None => self.state.profile = None,
                }
            }
            AuthEvent::SignedIn(session) => {
                let user_id = session.user_id;
                self.set_session(Some(session));
                self.state.loading = false;
                self.refresh_profile(Some(user_id));
            }
            AuthEvent::SignedOut => {
                self.set_session(None);
                // Synchronous clear: a stale role must never leak into the
                // next decision.
                self.state.profile = None;
                self.state.loading = false;
            }
        }

        self.evaluate_redirects();
    }

    /// Fetch (or re-fetch) the profile for `user_id`, defaulting to the
    /// current identity. Absent identity clears the profile and returns;
    /// that is not an error. Failures degrade to "no profile".
    pub fn refresh_profile(&mut self, user_id: Option<UserId>) {
        if self.closed {
            return;
        }

        let Some(target) = user_id.or_else(|| self.state.identity()) else {
            tracing::debug!("no identity available for profile refresh");
            self.state.profile = None;
            return;
        };

        let Some(ticket) = self.resolver.begin(target) else {
            return;
        };
        let result = self.profiles.profile_by_identity(target);
        self.state.profile = self.resolver.finish(ticket, result);

        self.evaluate_redirects();
    }

    /// Re-run the redirect policy against current state. Safe to call on
    /// every re-render; the latch keeps it idempotent.
    pub fn evaluate_redirects(&mut self) {
        if self.closed || self.state.loading {
            return;
        }

        match (&self.state.session, &self.state.profile) {
            // Anonymous: public pages stay public, nothing to do.
            (None, _) => {}

            (Some(_), Some(_)) => {
                // Profile arrived; a pending grace check is stale.
                if let Some(token) = self.grace_timer.take() {
                    self.scheduler.cancel(token);
                }
                if self.has_redirected {
                    return;
                }

                let path = self.navigator.current_path();
                if let Some(intent) = redirect::plan_redirect(&self.state, &path) {
                    self.has_redirected = true;
                    if let Some(token) = self.redirect_timer.take() {
                        self.scheduler.cancel(token);
                    }
                    let token = self
                        .scheduler
                        .schedule(REDIRECT_SETTLE_DELAY, DeferredTask::Redirect(intent));
                    self.redirect_timer = Some(token);
                }
            }

            (Some(session), None) => {
                if self.has_redirected {
                    return;
                }
                // Grace period: one deferred check, no retry.
                if self.grace_timer.is_none() {
                    let token = self.scheduler.schedule(
                        PROFILE_GRACE_PERIOD,
                        DeferredTask::GraceExpired {
                            user_id: session.user_id,
                        },
                    );
                    self.grace_timer = Some(token);
                }
            }
        }
    }

    /// Deliver a fired scheduler task.
    pub fn handle_deferred(&mut self, task: DeferredTask) {
        if self.closed {
            tracing::debug!(?task, "deferred task after close, ignoring");
            return;
        }

        match task {
            DeferredTask::GraceExpired { user_id } => {
                self.grace_timer = None;
                let still_unresolved =
                    self.state.identity() == Some(user_id) && self.state.profile.is_none();
                if still_unresolved && !self.has_redirected {
                    tracing::warn!(%user_id, "profile still unresolved after grace period");
                    self.has_redirected = true;
                    self.navigator.go_to(
                        routes::ERROR_VIEW,
                        true,
                        Some(NavState::Error {
                            message: redirect::profile_unavailable_message(),
                            error_kind: ViewErrorKind::Error,
                        }),
                    );
                }
            }
            DeferredTask::Redirect(intent) => {
                self.redirect_timer = None;
                // The identity may have gone away while the delay ran.
                if self.state.is_authenticated() {
                    tracing::info!(path = %intent.path, "issuing role redirect");
                    self.navigator.go_to(&intent.path, true, intent.state);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Imperative auth operations
    // ─────────────────────────────────────────────────────────────────────

    /// Sign in. State updates arrive through the provider's signed-in
    /// notification; this call only performs the operation and reports.
    pub fn sign_in(&mut self, credentials: &Credentials) -> Result<Session, AuthError> {
        match self.auth.sign_in(credentials) {
            Ok(session) => {
                self.notifier.notify(Notification::info(
                    "Bienvenido",
                    "Has iniciado sesión correctamente.",
                ));
                Ok(session)
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign-in failed");
                self.notifier.notify(Notification::destructive(
                    "Error de autenticación",
                    err.sign_in_message(),
                ));
                Err(err)
            }
        }
    }

    pub fn sign_up(
        &mut self,
        credentials: &Credentials,
        seed: &ProfileSeed,
    ) -> Result<SignUpOutcome, AuthError> {
        if let Err(err) = credentials.validate() {
            self.notifier.notify(Notification::destructive(
                "Error de registro",
                err.sign_up_message(),
            ));
            return Err(err);
        }

        match self.auth.sign_up(credentials, seed) {
            Ok(SignUpOutcome::ConfirmationPending) => {
                self.notifier.notify(Notification::info(
                    "Registro exitoso",
                    "Por favor verifica tu correo electrónico para completar el registro.",
                ));
                Ok(SignUpOutcome::ConfirmationPending)
            }
            Ok(SignUpOutcome::SignedIn(session)) => {
                self.notifier.notify(Notification::info(
                    "Registro exitoso",
                    "Tu cuenta ha sido creada correctamente.",
                ));
                Ok(SignUpOutcome::SignedIn(session))
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign-up failed");
                self.notifier.notify(Notification::destructive(
                    "Error de registro",
                    err.sign_up_message(),
                ));
                Err(err)
            }
        }
    }

    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        match self.auth.sign_out() {
            Ok(()) => {
                self.set_session(None);
                self.state.profile = None;
                self.notifier.notify(Notification::info(
                    "Sesión cerrada",
                    "Has cerrado sesión correctamente.",
                ));
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "sign-out failed");
                self.notifier.notify(Notification::destructive(
                    "Error",
                    "Error al cerrar sesión. Intenta nuevamente.",
                ));
                Err(err)
            }
        }
    }

    /// Tear down: cancel timers, unsubscribe, and refuse all further input.
    pub fn close(&mut self) {
        self.closed = true;
        self.cancel_timers();
        self.resolver.reset();
        self.subscription = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn set_session(&mut self, session: Option<Session>) {
        let old_identity = self.state.identity();
        let new_identity = session.as_ref().map(|s| s.user_id);
        self.state.session = session;

        if old_identity != new_identity {
            // Pending timers refer to the previous identity.
            self.cancel_timers();
            self.resolver.reset();
            if new_identity.is_none() {
                self.has_redirected = false;
            }
        }
    }

    fn cancel_timers(&mut self) {
        if let Some(token) = self.grace_timer.take() {
            self.scheduler.cancel(token);
        }
        if let Some(token) = self.redirect_timer.take() {
            self.scheduler.cancel(token);
        }
    }
}
