//! The message card and its Idle/Generating state machine.
//!
//! - [`MessagePanel::trigger`] moves Idle → Generating and spawns exactly
//!   one request. While Generating it does nothing.
//! - [`MessagePanel::poll`] (once per frame) or [`MessagePanel::settled`]
//!   (from async code) collects the outcome and moves back to Idle.
//! - A successful outcome replaces the whole [`CardMessage`]; a failed one
//!   is logged and the previous message stays on the card.

use std::sync::Arc;

use tokio::{runtime::Handle, sync::oneshot};

use crate::{
    error::GenerateError,
    generator::{GenerationRequest, TextGenerator},
    message::CardMessage,
};

/// Text shown after the share button is pressed.
pub const SHARE_ACKNOWLEDGEMENT: &str = "Happy Rose Day shared with Rohit! ❤️";

type Outcome = Result<CardMessage, GenerateError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Generating,
}

#[derive(Debug)]
pub struct MessagePanel {
    message: CardMessage,
    request: GenerationRequest,
    pending: Option<oneshot::Receiver<Outcome>>,
}

impl Default for MessagePanel {
    fn default() -> Self {
        Self::new(CardMessage::default(), GenerationRequest::default())
    }
}

impl MessagePanel {
    pub fn new(message: CardMessage, request: GenerationRequest) -> Self {
        Self {
            message,
            request,
            pending: None,
        }
    }

    pub fn message(&self) -> &CardMessage {
        &self.message
    }

    pub fn state(&self) -> PanelState {
        if self.pending.is_some() {
            PanelState::Generating
        } else {
            PanelState::Idle
        }
    }

    pub fn is_generating(&self) -> bool {
        self.state() == PanelState::Generating
    }

    /// Starts a regeneration on `runtime` unless one is already in flight.
    ///
    /// Returns `true` if a request was issued.
    pub fn trigger(&mut self, runtime: &Handle, generator: Arc<dyn TextGenerator>) -> bool {
        if self.is_generating() {
            tracing::warn!("regeneration already in flight, ignoring trigger");
            return false;
        }

        let (tx, rx) = oneshot::channel();
        let request = self.request.clone();
        runtime.spawn(async move {
            let outcome = match generator.generate(&request).await {
                Ok(text) => CardMessage::from_generated(&text),
                Err(err) => Err(err),
            };
            // The panel may be gone already; nothing left to tell.
            let _ = tx.send(outcome);
        });

        tracing::info!("requested a new card message");
        self.pending = Some(rx);
        true
    }

    /// Applies the outcome of the in-flight request if it has settled.
    ///
    /// Never blocks. Returns `true` if the panel went back to Idle during
    /// this call.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => Err(GenerateError::Interrupted),
        };

        self.pending = None;
        self.apply(outcome);
        true
    }

    /// Waits until the in-flight request settles and applies it.
    ///
    /// Returns immediately when Idle.
    pub async fn settled(&mut self) {
        let Some(rx) = self.pending.take() else {
            return;
        };

        let outcome = rx.await.unwrap_or(Err(GenerateError::Interrupted));
        self.apply(outcome);
    }

    /// Acknowledges a share. Nothing is sent or stored.
    pub fn share(&self) -> &'static str {
        tracing::info!("card shared");
        SHARE_ACKNOWLEDGEMENT
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Ok(message) => {
                tracing::info!(title = %message.title, "card message replaced");
                self.message = message;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to generate message");
            }
        }
    }
}
