//! Mirror behavior: delta replay onto a caller-owned target, the
//! future-deltas-only contract, divergence reporting, and the multiset
//! equality property under arbitrary operation sequences.

use proptest::prelude::*;
use ripple_list::{attach_mirror, ListError, MirrorTarget, RippleList};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[test]
fn fresh_target_tracks_source_multiset() {
    let target: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    let (mut list, _id) = RippleList::with_mirror([], &target);

    list.push(1).unwrap();
    list.push(2).unwrap();
    list.push(2).unwrap();
    list.remove(&2).unwrap();
    list.set(0, 9).unwrap();

    let mut source = list.to_vec();
    let mut mirrored = target.borrow().clone();
    source.sort_unstable();
    mirrored.sort_unstable();
    assert_eq!(source, mirrored);
}

#[test]
fn initial_content_is_never_copied_into_the_target() {
    let target: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    let (mut list, _id) = RippleList::with_mirror([1, 2, 3], &target);

    assert!(target.borrow().is_empty());

    // Only deltas made after construction propagate.
    list.push(4).unwrap();
    list.remove(&1).unwrap();
    assert_eq!(*target.borrow(), vec![4]);
}

#[test]
fn pre_seeded_target_stays_equal_to_the_source() {
    let initial = vec![1, 2, 3];
    let target: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(initial.clone()));
    let (mut list, _id) = RippleList::with_mirror(initial, &target);

    list.push(4).unwrap();
    list.remove(&2).unwrap();
    list.set(0, 7).unwrap();
    list.remove_all(|&x| x > 5).unwrap();

    let mut source = list.to_vec();
    let mut mirrored = target.borrow().clone();
    source.sort_unstable();
    mirrored.sort_unstable();
    assert_eq!(source, mirrored);
}

#[test]
fn deque_targets_work_too() {
    let target: Rc<RefCell<VecDeque<i32>>> = Rc::new(RefCell::new(VecDeque::new()));
    let mut list: RippleList<i32> = RippleList::new();
    attach_mirror(&list, &target);

    list.extend([1, 2, 3]).unwrap();
    list.remove(&2).unwrap();

    assert_eq!(*target.borrow(), VecDeque::from(vec![1, 3]));
}

#[test]
fn several_mirrors_receive_deltas_in_subscription_order() {
    // Targets record arrival order through a shared sequence counter.
    struct Stamped {
        label: &'static str,
        order: Rc<RefCell<Vec<&'static str>>>,
        items: Vec<i32>,
    }

    impl MirrorTarget<i32> for Stamped {
        fn append(&mut self, item: i32) {
            self.order.borrow_mut().push(self.label);
            self.items.push(item);
        }

        fn remove_first_equal(&mut self, item: &i32) -> bool {
            match self.items.iter().position(|x| x == item) {
                Some(i) => {
                    self.items.remove(i);
                    true
                }
                None => false,
            }
        }
    }

    let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::new(RefCell::new(Stamped {
        label: "first",
        order: order.clone(),
        items: Vec::new(),
    }));
    let second = Rc::new(RefCell::new(Stamped {
        label: "second",
        order: order.clone(),
        items: Vec::new(),
    }));

    let mut list: RippleList<i32> = RippleList::new();
    attach_mirror(&list, &first);
    attach_mirror(&list, &second);

    list.push(1).unwrap();
    assert_eq!(*order.borrow(), vec!["first", "second"]);
    assert_eq!(first.borrow().items, vec![1]);
    assert_eq!(second.borrow().items, vec![1]);
}

#[test]
fn divergence_is_reported_not_swallowed() {
    let target: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    let mut list: RippleList<i32> = RippleList::new();
    attach_mirror(&list, &target);

    list.push(1).unwrap();

    // A third party empties the target behind the mirror's back.
    target.borrow_mut().clear();

    let err = list.remove(&1).unwrap_err();
    assert!(matches!(err, ListError::InvariantViolation { .. }));
    assert!(err.is_recoverable());
    // The source mutation itself has already happened.
    assert!(list.is_empty());
}

#[test]
fn torn_down_mirror_leaves_the_list_usable() {
    let target: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    let mut list: RippleList<i32> = RippleList::new();
    let id = attach_mirror(&list, &target);

    list.push(1).unwrap();
    assert!(list.unsubscribe(id));

    list.push(2).unwrap();
    list.clear().unwrap();
    assert_eq!(*target.borrow(), vec![1], "no deltas after teardown");
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Push(i8),
    Remove(i8),
    Set(usize, i8),
    RemoveAt(usize),
    Extend(Vec<i8>),
    RemoveEven,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i8>().prop_map(Op::Push),
        3 => any::<i8>().prop_map(Op::Remove),
        2 => (any::<usize>(), any::<i8>()).prop_map(|(i, v)| Op::Set(i, v)),
        2 => any::<usize>().prop_map(Op::RemoveAt),
        1 => prop::collection::vec(any::<i8>(), 0..5).prop_map(Op::Extend),
        1 => Just(Op::RemoveEven),
        1 => Just(Op::Clear),
    ]
}

fn apply(list: &mut RippleList<i8>, op: Op) {
    match op {
        Op::Push(v) => list.push(v).unwrap(),
        Op::Remove(v) => {
            list.remove(&v).unwrap();
        }
        Op::Set(i, v) => {
            if !list.is_empty() {
                let index = i % list.len();
                list.set(index, v).unwrap();
            }
        }
        Op::RemoveAt(i) => {
            if !list.is_empty() {
                let index = i % list.len();
                list.remove_at(index).unwrap();
            }
        }
        Op::Extend(values) => list.extend(values).unwrap(),
        Op::RemoveEven => {
            list.remove_all(|&x| x % 2 == 0).unwrap();
        }
        Op::Clear => list.clear().unwrap(),
    }
}

proptest! {
    /// The mirror's element multiset equals the source's after any
    /// operation sequence, as long as nobody else touches the target.
    #[test]
    fn mirror_multiset_equals_source(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let target: Rc<RefCell<Vec<i8>>> = Rc::new(RefCell::new(Vec::new()));
        let (mut list, _id) = RippleList::with_mirror([], &target);

        for op in ops {
            apply(&mut list, op);
        }

        let mut source = list.to_vec();
        let mut mirrored = target.borrow().clone();
        source.sort_unstable();
        mirrored.sort_unstable();
        prop_assert_eq!(source, mirrored);
    }

    /// Net observed event count equals the final length after any
    /// operation sequence.
    #[test]
    fn net_event_count_equals_length(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut list: RippleList<i8> = RippleList::new();
        let net = Rc::new(RefCell::new(0i64));
        {
            let net = net.clone();
            list.subscribe(move |event| {
                *net.borrow_mut() += if event.is_added() { 1 } else { -1 };
            });
        }

        for op in ops {
            apply(&mut list, op);
        }

        prop_assert_eq!(*net.borrow(), list.len() as i64);
    }
}
