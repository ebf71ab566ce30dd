//! A [`serde_json::Value`] builder on top of the event stream — a consumer
//! of the public API, not part of the core parser, the same relationship
//! `actson`'s own `serde_json` module has to its reactive event loop.

use crate::codec;
use crate::handler::{Handler, HandlerResult, ParserHandle};
use crate::{parse, ParseError};
use serde_json::{Map, Number, Value};
use std::ops::ControlFlow;

enum Container {
    Object(Map<String, Value>, Option<String>),
    Array(Vec<Value>),
}

#[derive(Default)]
struct ValueBuilder {
    stack: Vec<Container>,
    result: Option<Value>,
}

impl ValueBuilder {
    fn emit(&mut self, value: Value) {
        match self.stack.last_mut() {
            Some(Container::Object(map, key)) => {
                let key = key.take().expect("on_key always precedes its value");
                map.insert(key, value);
            }
            Some(Container::Array(elements)) => elements.push(value),
            None => self.result = Some(value),
        }
    }

    fn decoded_string(slice: &[u8]) -> String {
        let decoded = codec::decode(slice);
        String::from_utf8_lossy(&decoded).into_owned()
    }
}

impl Handler for ValueBuilder {
    fn on_null(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.emit(Value::Null);
        ControlFlow::Continue(())
    }

    fn on_bool(&mut self, _handle: &mut ParserHandle<'_, '_>, value: bool) -> HandlerResult {
        self.emit(Value::Bool(value));
        ControlFlow::Continue(())
    }

    fn on_number(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        // The grammar guarantees `slice` is a well-formed JSON number, so
        // this can't fail.
        let text = std::str::from_utf8(slice).expect("number slice is ASCII");
        let number: Number = text.parse().expect("grammar guarantees a valid number");
        self.emit(Value::Number(number));
        ControlFlow::Continue(())
    }

    fn on_string(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        self.emit(Value::String(Self::decoded_string(slice)));
        ControlFlow::Continue(())
    }

    fn on_key(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        if let Some(Container::Object(_, key)) = self.stack.last_mut() {
            *key = Some(Self::decoded_string(slice));
        }
        ControlFlow::Continue(())
    }

    fn on_start_object(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.stack.push(Container::Object(Map::new(), None));
        ControlFlow::Continue(())
    }

    fn on_end_object(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        if let Some(Container::Object(map, _)) = self.stack.pop() {
            self.emit(Value::Object(map));
        }
        ControlFlow::Continue(())
    }

    fn on_start_array(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.stack.push(Container::Array(Vec::new()));
        ControlFlow::Continue(())
    }

    fn on_end_array(&mut self, _handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        if let Some(Container::Array(elements)) = self.stack.pop() {
            self.emit(Value::Array(elements));
        }
        ControlFlow::Continue(())
    }
}

/// Parse `input` into a [`serde_json::Value`] tree in one call, built by
/// delegating every event straight through [`Handler`] rather than by a
/// separate document-tree parser.
pub fn from_slice(input: &[u8]) -> Result<Value, ParseError> {
    let mut builder = ValueBuilder::default();
    parse(input, &mut builder)?;
    Ok(builder.result.unwrap_or(Value::Null))
}
