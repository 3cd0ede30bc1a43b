//! Serialized event handling around one [`Engine`].
//!
//! Button presses and recognition completions arrive from different places.
//! They all go through one channel and are applied here, in order, so the
//! engine only ever has a single writer. A recognition result that arrives
//! late is applied as-is when it arrives.

use crate::calculator::{Engine, Snapshot, Token};
use crate::recognition::{InputImage, RecognitionJoin, Recognizer, TextRegion, join_regions};
use flume::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Input delivered to a [`Session`].
#[derive(Clone, Debug)]
pub enum Event {
    /// A keypad press.
    Token(Token),
    /// Text to be normalized, typed or already joined.
    Text(String),
    /// Raw regions from a finished recognition request.
    Recognized(Vec<TextRegion>),
}

/// Result of handling one [`Event`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Updated(Snapshot),
    /// Text input was not understood; the snapshot is unchanged.
    NotRecognized { input: String, snapshot: Snapshot },
}

impl Outcome {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            Self::Updated(snapshot) => snapshot,
            Self::NotRecognized { snapshot, .. } => snapshot,
        }
    }
}

pub struct Session {
    engine: Engine,
    join: RecognitionJoin,
    rx: Receiver<Event>,
}

impl Session {
    /// Create a session and the sender producers post to.
    ///
    /// [`Session::run`] returns once every clone of the sender is dropped.
    pub fn new(engine: Engine, join: RecognitionJoin) -> (Self, Sender<Event>) {
        let (tx, rx) = flume::unbounded();
        (Self { engine, join, rx }, tx)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Apply a single event to the engine.
    pub fn handle(&mut self, event: Event) -> Outcome {
        let text = match event {
            Event::Token(token) => {
                self.engine.apply(token);
                return Outcome::Updated(self.engine.snapshot());
            }
            Event::Text(text) => text,
            Event::Recognized(regions) => {
                debug!(regions = regions.len(), "recognition completed");
                join_regions(&regions, self.join).unwrap_or_default()
            }
        };

        match self.engine.apply_text(&text) {
            Ok(_) => Outcome::Updated(self.engine.snapshot()),
            Err(_) => Outcome::NotRecognized {
                input: text,
                snapshot: self.engine.snapshot(),
            },
        }
    }

    /// Drain events until all senders are gone, reporting each outcome.
    pub fn run(mut self, mut on_outcome: impl FnMut(&Outcome)) -> Engine {
        let rx = self.rx.clone();
        while let Ok(event) = rx.recv() {
            let outcome = self.handle(event);
            on_outcome(&outcome);
        }

        self.engine
    }
}

/// Run a recognizer on its own thread and post the result to a session.
///
/// Failures are logged and produce no event.
pub fn spawn_recognition<R>(
    recognizer: R,
    image: InputImage,
    events: Sender<Event>,
) -> JoinHandle<()>
where
    R: Recognizer + 'static,
{
    thread::spawn(move || match recognizer.recognize(&image) {
        Ok(regions) => {
            if events.send(Event::Recognized(regions)).is_err() {
                debug!("session closed before recognition finished");
            }
        }
        Err(e) => warn!("recognition failed: {e:#}"),
    })
}
