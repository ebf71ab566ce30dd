use std::ops::ControlFlow;

/// Result of a [`Handler`] callback: `Continue(())` to keep parsing,
/// `Break(code)` to abort immediately with `code`. The code is propagated
/// verbatim into [`ParseError::Aborted`](crate::ParseError::Aborted).
pub type HandlerResult = ControlFlow<i32>;

/// A consumer of parse events.
///
/// Every method has a default no-op implementation that returns
/// [`ControlFlow::Continue(())`], so a handler only needs to override the
/// event kinds it actually cares about — an absent override is the same as
/// an absent callback in the source library's struct-of-function-pointers
/// design.
///
/// Slices passed to `on_number`, `on_string`, and `on_key` are views into the
/// buffer given to [`parse`](crate::parse). They exclude the surrounding
/// quotes for strings and keys, and are *not* escape-decoded; call
/// [`codec::decode`](crate::codec::decode) if you need the decoded bytes.
/// They are valid only for the duration of the callback — copy them (e.g.
/// with `to_vec()`) if you need to keep the data around, the same
/// restriction the source library places on its NUL-terminated slices.
pub trait Handler {
    /// A JSON `null` literal.
    fn on_null(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        let _ = handle;
        ControlFlow::Continue(())
    }

    /// A JSON `true`/`false` literal.
    fn on_bool(&mut self, handle: &mut ParserHandle<'_, '_>, value: bool) -> HandlerResult {
        let _ = (handle, value);
        ControlFlow::Continue(())
    }

    /// A JSON number, as the raw (unparsed) text that spelled it.
    fn on_number(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        let _ = (handle, slice);
        ControlFlow::Continue(())
    }

    /// A JSON string value, with the surrounding quotes stripped and escapes
    /// left undecoded.
    fn on_string(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        let _ = (handle, slice);
        ControlFlow::Continue(())
    }

    /// An object member's key, fired before the events for its value.
    fn on_key(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        let _ = (handle, slice);
        ControlFlow::Continue(())
    }

    /// The `{` that opens an object, fired before any of its members.
    fn on_start_object(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        let _ = handle;
        ControlFlow::Continue(())
    }

    /// The `}` that closes an object, fired after all of its members.
    fn on_end_object(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        let _ = handle;
        ControlFlow::Continue(())
    }

    /// The `[` that opens an array, fired before any of its elements.
    fn on_start_array(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        let _ = handle;
        ControlFlow::Continue(())
    }

    /// The `]` that closes an array, fired after all of its elements.
    fn on_end_array(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        let _ = handle;
        ControlFlow::Continue(())
    }
}

/// Lets a plain `&mut H` stand in for `H` as a [`Handler`], so a caller can
/// pass a mutable reference to [`parse`](crate::parse) and keep using the
/// handler afterward (to read back whatever it accumulated).
impl<H: Handler + ?Sized> Handler for &mut H {
    fn on_null(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        (**self).on_null(handle)
    }

    fn on_bool(&mut self, handle: &mut ParserHandle<'_, '_>, value: bool) -> HandlerResult {
        (**self).on_bool(handle, value)
    }

    fn on_number(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        (**self).on_number(handle, slice)
    }

    fn on_string(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        (**self).on_string(handle, slice)
    }

    fn on_key(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        (**self).on_key(handle, slice)
    }

    fn on_start_object(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        (**self).on_start_object(handle)
    }

    fn on_end_object(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        (**self).on_end_object(handle)
    }

    fn on_start_array(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        (**self).on_start_array(handle)
    }

    fn on_end_array(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        (**self).on_end_array(handle)
    }
}

/// A pending change to the handler stack, requested from inside a callback
/// and applied by [`HandlerStack::dispatch`] once the callback returns.
///
/// Deferring application this way sidesteps the aliasing a literal port of
/// the source's `sax_handler_node_t` linked list would run into: the active
/// handler cannot reach back into the structure that owns it while one of
/// its own methods is still executing. Only the most recent request in a
/// single callback wins, which covers every delegation pattern this crate's
/// handlers actually use — a single `push` or a single `try_pop`.
pub(crate) enum PendingOp<'h> {
    None,
    Push(Box<dyn Handler + 'h>),
    Pop,
}

/// Mutable state exposed to a [`Handler`] callback: the nesting depth at
/// which the event fired, the depth at which the currently active handler
/// was installed, and the means to delegate a subtree to another handler.
pub struct ParserHandle<'ctx, 'h> {
    pub(crate) current_depth: usize,
    pub(crate) anchor_depth: usize,
    pub(crate) pending: &'ctx mut PendingOp<'h>,
}

impl<'ctx, 'h> ParserHandle<'ctx, 'h> {
    /// Number of containers currently open (0 at the document root).
    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    /// The depth at which the handler receiving this callback was installed.
    /// An `end_*` event for the container that handler owns fires at exactly
    /// this depth — see [`Self::try_pop`].
    pub fn anchor_depth(&self) -> usize {
        self.anchor_depth
    }

    /// Install `handler` as the active handler for the container whose
    /// `start_*` event is currently being delivered. Its events start with
    /// the first child of that container; the handler it replaces resumes
    /// automatically once this one calls [`Self::try_pop`] (or [`Self::pop`])
    /// at matching depth.
    pub fn push<H>(&mut self, handler: H)
    where
        H: Handler + 'h,
    {
        *self.pending = PendingOp::Push(Box::new(handler));
    }

    /// Unconditionally resign: restore whichever handler was active before
    /// the most recent [`Self::push`]. A no-op if there is nothing to
    /// restore (no handler has delegated since the root handler started).
    pub fn pop(&mut self) {
        *self.pending = PendingOp::Pop;
    }

    /// Resign iff the container this handler was installed for is closing
    /// right now (`current_depth() == anchor_depth()`). Returns whether it
    /// did. This is the idiom a delegated handler uses in its own
    /// `on_end_object`/`on_end_array` to hand control back without having to
    /// count opens and closes itself.
    pub fn try_pop(&mut self) -> bool {
        if self.current_depth == self.anchor_depth {
            *self.pending = PendingOp::Pop;
            true
        } else {
            false
        }
    }
}

struct StackEntry<'h> {
    handler: Box<dyn Handler + 'h>,
    anchor_depth: usize,
}

/// The handler stack: at most one handler is ever "active" at a time, with
/// the rest saved beneath it in delegation order. `dispatch` is the only way
/// to reach the active handler, so the push/pop bookkeeping always happens
/// in the same place.
pub(crate) struct HandlerStack<'h> {
    active: StackEntry<'h>,
    rest: Vec<StackEntry<'h>>,
}

impl<'h> HandlerStack<'h> {
    pub(crate) fn new(root: Box<dyn Handler + 'h>) -> Self {
        Self {
            active: StackEntry {
                handler: root,
                anchor_depth: 0,
            },
            rest: Vec::new(),
        }
    }

    /// Invoke `f` against the active handler at `current_depth`, then apply
    /// whatever delegation change (if any) it requested.
    pub(crate) fn dispatch<F>(&mut self, current_depth: usize, f: F) -> HandlerResult
    where
        F: FnOnce(&mut dyn Handler, &mut ParserHandle<'_, 'h>) -> HandlerResult,
    {
        let anchor_depth = self.active.anchor_depth;
        let mut pending = PendingOp::None;
        let mut handle = ParserHandle {
            current_depth,
            anchor_depth,
            pending: &mut pending,
        };
        let result = f(self.active.handler.as_mut(), &mut handle);

        match pending {
            PendingOp::None => {}
            PendingOp::Push(new_handler) => {
                let installed = StackEntry {
                    handler: new_handler,
                    anchor_depth: current_depth + 1,
                };
                let previous = std::mem::replace(&mut self.active, installed);
                self.rest.push(previous);
            }
            PendingOp::Pop => {
                if let Some(restored) = self.rest.pop() {
                    self.active = restored;
                }
            }
        }

        result
    }
}
