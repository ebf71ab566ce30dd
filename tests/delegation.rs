//! Handler-stack delegation: push, pop, and try_pop.

use jsonsax::{parse, Handler, HandlerResult, ParserHandle};
use std::ops::ControlFlow;

#[derive(Default)]
struct Sub {
    depth_on_push: usize,
    numbers: Vec<Vec<u8>>,
    popped_on_end: bool,
}

impl Handler for Sub {
    fn on_number(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        self.numbers.push(slice.to_vec());
        ControlFlow::Continue(())
    }

    fn on_end_object(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
        self.popped_on_end = handle.try_pop();
        ControlFlow::Continue(())
    }
}

#[derive(Default)]
struct Root {
    pushed_at: Option<usize>,
    top_level_numbers: Vec<Vec<u8>>,
}

impl Handler for Root {
    fn on_key(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        if slice == b"delegate" {
            self.pushed_at = Some(handle.current_depth());
            handle.push(Sub::default());
        }
        ControlFlow::Continue(())
    }

    fn on_number(&mut self, _handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
        self.top_level_numbers.push(slice.to_vec());
        ControlFlow::Continue(())
    }
}

#[test]
fn pushed_handler_receives_events_from_its_own_subtree_only() {
    let mut root = Root::default();
    parse(br#"{"a":1,"delegate":{"b":2,"c":3},"d":4}"#, &mut root).unwrap();

    // The root handler never saw the numbers inside the delegated subtree.
    assert_eq!(
        root.top_level_numbers,
        vec![b"1".to_vec(), b"4".to_vec()]
    );
}

#[test]
fn anchor_depth_is_recorded_at_push_time() {
    struct Anchors {
        seen: Vec<usize>,
    }
    impl Handler for Anchors {
        fn on_key(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
            if slice == b"x" {
                self.seen.push(handle.current_depth());
            }
            ControlFlow::Continue(())
        }
    }

    let mut h = Anchors { seen: Vec::new() };
    parse(br#"{"outer":{"x":1}}"#, &mut h).unwrap();
    assert_eq!(h.seen, vec![2]);
}

#[test]
fn explicit_pop_restores_the_previous_handler_immediately() {
    struct PopOnFirstNumber;
    impl Handler for PopOnFirstNumber {
        fn on_number(&mut self, handle: &mut ParserHandle<'_, '_>, _slice: &[u8]) -> HandlerResult {
            handle.pop();
            ControlFlow::Continue(())
        }
    }

    #[derive(Default)]
    struct CountsAfterPop {
        numbers_seen: usize,
    }
    impl Handler for CountsAfterPop {
        fn on_key(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
            if slice == b"inner" {
                handle.push(PopOnFirstNumber);
            }
            ControlFlow::Continue(())
        }

        fn on_number(&mut self, _handle: &mut ParserHandle<'_, '_>, _slice: &[u8]) -> HandlerResult {
            self.numbers_seen += 1;
            ControlFlow::Continue(())
        }
    }

    let mut root = CountsAfterPop::default();
    parse(br#"{"inner":[1,2,3],"outer":9}"#, &mut root).unwrap();

    // `1` is consumed by the pushed handler and then it pops itself, so the
    // root sees `2`, `3`, and `9` — three numbers, not four.
    assert_eq!(root.numbers_seen, 3);
}

#[test]
fn try_pop_below_anchor_depth_is_a_silent_no_op() {
    // Sub is pushed while processing a key at depth 1 (anchor_depth = 2).
    // If something tries to try_pop before that object's own on_end_object
    // fires (i.e. at a shallower depth), it must have no effect.
    struct Premature;
    impl Handler for Premature {
        fn on_start_array(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
            // current_depth here is still below the anchor; try_pop must
            // refuse.
            assert!(!handle.try_pop());
            ControlFlow::Continue(())
        }
    }

    struct Root;
    impl Handler for Root {
        fn on_key(&mut self, handle: &mut ParserHandle<'_, '_>, slice: &[u8]) -> HandlerResult {
            if slice == b"x" {
                handle.push(Premature);
            }
            ControlFlow::Continue(())
        }
    }

    let mut root = Root;
    parse(br#"{"x":[1,2]}"#, &mut root).unwrap();
}

#[test]
fn try_pop_with_no_pushed_handler_is_a_silent_no_op() {
    struct Root {
        returned: bool,
    }
    impl Handler for Root {
        fn on_end_object(&mut self, handle: &mut ParserHandle<'_, '_>) -> HandlerResult {
            self.returned = handle.try_pop();
            ControlFlow::Continue(())
        }
    }

    let mut root = Root { returned: true };
    parse(br#"{}"#, &mut root).unwrap();
    assert!(!root.returned);
}

#[test]
fn sub_handler_pops_itself_and_root_resumes_seeing_its_own_events() {
    let mut root = Root::default();
    parse(
        br#"{"delegate":{"b":2},"after":5}"#,
        &mut root,
    )
    .unwrap();
    assert_eq!(root.top_level_numbers, vec![b"5".to_vec()]);
}
