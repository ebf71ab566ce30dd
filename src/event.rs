//! An owned, inspectable event log, handy for tests and as a minimal
//! worked example of implementing [`Handler`].

use crate::handler::{Handler, HandlerResult, ParserHandle};
use std::ops::ControlFlow;

/// One parsed event, with any string/number/key payload copied out of the
/// buffer so it can outlive the parse call. The parser itself never builds
/// these — it calls `Handler` methods directly — this type exists purely
/// for consumers (like [`RecordingHandler`]) that want to capture a
/// sequence of events as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Null,
    Bool(bool),
    Number(Vec<u8>),
    String(Vec<u8>),
    Key(Vec<u8>),
    StartObject,
    EndObject,
    StartArray,
    EndArray,
}

/// A [`Handler`] that records every event it receives, in order, copying
/// out any borrowed payload. Used throughout this crate's own test suite;
/// also a reasonable starting point for a handler that just wants to look
/// at the whole event sequence after the fact rather than react to it
/// on the fly.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub events: Vec<Event>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Handler for RecordingHandler {
    fn on_null(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.events.push(Event::Null);
        ControlFlow::Continue(())
    }

    fn on_bool(&mut self, _handle: &mut ParserHandle<'_, '_>, value: bool) -> HandlerResult {
        self.events.push(Event::Bool(value));
        ControlFlow::Continue(())
    }

    fn on_number(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        self.events.push(Event::Number(slice.to_vec()));
        ControlFlow::Continue(())
    }

    fn on_string(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        self.events.push(Event::String(slice.to_vec()));
        ControlFlow::Continue(())
    }

    fn on_key(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        self.events.push(Event::Key(slice.to_vec()));
        ControlFlow::Continue(())
    }

    fn on_start_object(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.events.push(Event::StartObject);
        ControlFlow::Continue(())
    }

    fn on_end_object(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.events.push(Event::EndObject);
        ControlFlow::Continue(())
    }

    fn on_start_array(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.events.push(Event::StartArray);
        ControlFlow::Continue(())
    }

    fn on_end_array(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.events.push(Event::EndArray);
        ControlFlow::Continue(())
    }
}
