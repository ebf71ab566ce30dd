//! A single-pass, event-driven JSON parser with delegatable handlers.
//!
//! This crate scans a JSON document exactly once and, for each token it
//! recognizes, calls a method on a [`Handler`] you provide — there is no
//! intermediate document tree, and no buffering beyond the input slice
//! itself. A handler can delegate an entire object or array subtree to
//! another handler (see [`ParserHandle::push`]), which is how you compose
//! a parser for one shape of document out of parsers for its pieces
//! without threading state through the whole call graph by hand.
//!
//! # Basic usage
//!
//! ```
//! use jsonsax::{parse, Handler, ParserHandle, HandlerResult};
//! use std::ops::ControlFlow;
//!
//! struct SumNumbers {
//!     total: f64,
//! }
//!
//! impl Handler for SumNumbers {
//!     fn on_number(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
//!         let text = std::str::from_utf8(slice).unwrap();
//!         self.total += text.parse::<f64>().unwrap();
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut handler = SumNumbers { total: 0.0 };
//! parse(b"[1, 2, 3.5]", &mut handler).unwrap();
//! assert_eq!(handler.total, 6.5);
//! ```
//!
//! # Delegating a subtree
//!
//! A handler can hand off everything inside the container whose `start_*`
//! event it is currently handling, and take back over once that
//! container's matching `end_*` event fires:
//!
//! ```
//! use jsonsax::{parse, Handler, ParserHandle, HandlerResult};
//! use std::ops::ControlFlow;
//!
//! struct Root {
//!     other_seen: bool,
//! }
//!
//! impl Handler for Root {
//!     fn on_key(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
//!         if slice == b"special" {
//!             handle.push(SpecialValue);
//!         } else if slice == b"other" {
//!             self.other_seen = true;
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! struct SpecialValue;
//!
//! impl Handler for SpecialValue {
//!     fn on_end_object(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
//!         handle.try_pop();
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut root = Root { other_seen: false };
//! parse(br#"{"special": {"x": 1}, "other": 2}"#, &mut root).unwrap();
//! assert!(root.other_seen);
//! ```
//!
//! # Building a `serde_json::Value`
//!
//! With the `serde_json` feature enabled:
//!
//! ```
//! # #[cfg(feature = "serde_json")]
//! # {
//! let value = jsonsax::value::from_slice(br#"{"a": 1}"#).unwrap();
//! assert_eq!(value["a"], 1);
//! # }
//! ```
//!
//! # What this crate does not do
//!
//! It does not build a document tree on its own (see above for an opt-in
//! one), does not parse numbers into any numeric type (handlers get the
//! raw number text and choose their own parser and precision), does not
//! perform Unicode normalization, does not accept comments or trailing
//! commas, and does not support incremental/chunked input — it expects the
//! whole document up front as one `&[u8]`.

pub mod codec;
mod error;
mod event;
mod handler;
mod parser;

#[cfg(feature = "serde_json")]
pub mod value;

pub use error::ParseError;
pub use event::{Event, RecordingHandler};
pub use handler::{Handler, HandlerResult, ParserHandle};
pub use parser::parse;
