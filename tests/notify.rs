use std::cell::{Cell, RefCell};
use std::rc::Rc;

use statecast::{
    Config, DuplicatePolicy, OwnedSubject, SharedSubject, State, Subscribe, SubscriberId,
    Token, WeakSubject,
};

type Log = Rc<RefCell<Vec<(&'static str, State)>>>;

struct Tagged {
    tag: &'static str,
    log: Log,
}

impl Subscribe for Tagged {
    fn on_notify(&self, value: State) {
        self.log.borrow_mut().push((self.tag, value));
    }

    fn name(&self) -> &'static str {
        self.tag
    }
}

fn tagged(tag: &'static str, log: &Log) -> Rc<Tagged> {
    Rc::new(Tagged {
        tag,
        log: Rc::clone(log),
    })
}

/// Logs, then removes itself from its subject.
struct SelfRemover {
    tag: &'static str,
    log: Log,
    subject: WeakSubject<statecast::Shared>,
}

impl Subscribe for SelfRemover {
    fn on_notify(&self, value: State) {
        self.log.borrow_mut().push((self.tag, value));
        if let Some(subject) = self.subject.upgrade() {
            subject.remove_observer(self);
        }
    }
}

/// Publishes `value + 1` once, when it sees `trigger`.
struct Bumper {
    tag: &'static str,
    trigger: State,
    log: Log,
    subject: WeakSubject<statecast::Shared>,
}

impl Subscribe for Bumper {
    fn on_notify(&self, value: State) {
        self.log.borrow_mut().push((self.tag, value));
        if value == self.trigger {
            if let Some(subject) = self.subject.upgrade() {
                subject.set_state(value + 1);
            }
        }
    }
}

#[test]
fn notifies_newest_registration_first() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let a = tagged("A", &log);
    let b = tagged("B", &log);
    let c = tagged("C", &log);
    subject.add_observer(a.clone()).unwrap();
    subject.add_observer(b.clone()).unwrap();
    subject.add_observer(c.clone()).unwrap();

    subject.set_state(1);
    assert_eq!(*log.borrow(), vec![("C", 1), ("B", 1), ("A", 1)]);
}

#[test]
fn removed_observer_is_not_notified() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let a = tagged("A", &log);
    let b = tagged("B", &log);
    subject.add_observer(a.clone()).unwrap();
    subject.add_observer(b.clone()).unwrap();

    assert!(subject.remove_observer(&*a));
    subject.set_state(5);
    assert_eq!(*log.borrow(), vec![("B", 5)]);
}

#[test]
fn removing_unknown_or_removed_observer_is_noop() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let a = tagged("A", &log);
    let b = tagged("B", &log);
    let never = tagged("X", &log);
    subject.add_observer(a.clone()).unwrap();
    subject.add_observer(b.clone()).unwrap();

    assert!(!subject.remove_observer(&*never));
    assert!(subject.remove_observer(&*a));
    assert!(!subject.remove_observer(&*a));
    assert_eq!(subject.len(), 1);

    subject.set_state(2);
    assert_eq!(*log.borrow(), vec![("B", 2)]);
}

#[test]
fn self_removal_does_not_skip_or_duplicate_others() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let a = tagged("A", &log);
    let quitter = Rc::new(SelfRemover {
        tag: "Q",
        log: Rc::clone(&log),
        subject: subject.downgrade(),
    });
    let c = tagged("C", &log);
    subject.add_observer(a.clone()).unwrap();
    subject.add_observer(quitter.clone()).unwrap();
    subject.add_observer(c.clone()).unwrap();

    subject.set_state(1);
    assert_eq!(*log.borrow(), vec![("C", 1), ("Q", 1), ("A", 1)]);

    log.borrow_mut().clear();
    subject.set_state(2);
    assert_eq!(*log.borrow(), vec![("C", 2), ("A", 2)]);
    assert_eq!(subject.len(), 2);
}

#[test]
fn every_observer_removing_itself_empties_registry() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let quitters: Vec<_> = ["1", "2", "3"]
        .into_iter()
        .map(|tag| {
            Rc::new(SelfRemover {
                tag,
                log: Rc::clone(&log),
                subject: subject.downgrade(),
            })
        })
        .collect();
    for q in &quitters {
        subject.add_observer(q.clone()).unwrap();
    }

    subject.set_state(7);
    assert_eq!(*log.borrow(), vec![("3", 7), ("2", 7), ("1", 7)]);
    assert!(subject.is_empty());
}

#[test]
fn removing_a_later_observer_mid_pass_skips_it() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let a = tagged("A", &log);
    let b = tagged("B", &log);
    subject.add_observer(a.clone()).unwrap();
    subject.add_observer(b.clone()).unwrap();

    let weak = subject.downgrade();
    let b_id = SubscriberId::of(&*b);
    let remover: Rc<dyn Subscribe> = Rc::new(move |_v: State| {
        if let Some(s) = weak.upgrade() {
            s.remove_id(b_id);
        }
    });
    subject.add_observer(remover.clone()).unwrap();

    subject.set_state(3);
    assert_eq!(*log.borrow(), vec![("A", 3)]);
}

#[test]
fn dropped_observer_is_never_called() {
    let calls = Rc::new(Cell::new(0u32));
    let subject = SharedSubject::new();
    {
        let counter = Rc::clone(&calls);
        let transient: Rc<dyn Subscribe> = Rc::new(move |_v: State| {
            counter.set(counter.get() + 1);
        });
        subject.add_observer(transient.clone()).unwrap();
        subject.set_state(1);
        assert_eq!(calls.get(), 1);
    }

    subject.set_state(2);
    subject.set_state(3);
    assert_eq!(calls.get(), 1);
    assert!(subject.is_empty());
}

#[test]
fn nested_pass_runs_to_completion_before_outer_resumes() {
    // B registered after A, so B is notified first.
    let log = Log::default();
    let subject = SharedSubject::new();
    let a = Rc::new(Bumper {
        tag: "A",
        trigger: 1,
        log: Rc::clone(&log),
        subject: subject.downgrade(),
    });
    let b = tagged("B", &log);
    subject.add_observer(a.clone()).unwrap();
    subject.add_observer(b.clone()).unwrap();

    subject.set_state(1);
    assert_eq!(
        *log.borrow(),
        vec![("B", 1), ("A", 1), ("B", 2), ("A", 2)]
    );
    assert_eq!(subject.state(), 2);
}

#[test]
fn outer_pass_keeps_value_captured_at_start() {
    // A is the head here, so its nested pass happens before B's outer call.
    let log = Log::default();
    let subject = SharedSubject::new();
    let b = tagged("B", &log);
    let a = Rc::new(Bumper {
        tag: "A",
        trigger: 1,
        log: Rc::clone(&log),
        subject: subject.downgrade(),
    });
    subject.add_observer(b.clone()).unwrap();
    subject.add_observer(a.clone()).unwrap();

    subject.set_state(1);
    assert_eq!(
        *log.borrow(),
        vec![("A", 1), ("A", 2), ("B", 2), ("B", 1)]
    );
    assert_eq!(subject.state(), 2);
}

#[test]
fn nested_prune_of_unvisited_observer_is_skipped_by_outer_pass() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let tail = tagged("T", &log);
    let middle = tagged("M", &log);
    let head = Rc::new(Bumper {
        tag: "H",
        trigger: 1,
        log: Rc::clone(&log),
        subject: subject.downgrade(),
    });
    subject.add_observer(tail.clone()).unwrap();
    subject.add_observer(middle.clone()).unwrap();
    subject.add_observer(head.clone()).unwrap();
    drop(middle);

    // The nested pass (value 2) meets the absent middle entry and prunes it
    // while the outer pass (value 1) still points at it.
    subject.set_state(1);
    assert_eq!(
        *log.borrow(),
        vec![("H", 1), ("H", 2), ("T", 2), ("T", 1)]
    );
    assert_eq!(subject.len(), 2);
}

#[test]
fn nested_removal_of_unvisited_observer_is_skipped_by_outer_pass() {
    let log = Log::default();
    let subject = SharedSubject::new();
    let tail = tagged("T", &log);
    let middle = Rc::new(SelfRemover {
        tag: "M",
        log: Rc::clone(&log),
        subject: subject.downgrade(),
    });
    let head = Rc::new(Bumper {
        tag: "H",
        trigger: 1,
        log: Rc::clone(&log),
        subject: subject.downgrade(),
    });
    subject.add_observer(tail.clone()).unwrap();
    subject.add_observer(middle.clone()).unwrap();
    subject.add_observer(head.clone()).unwrap();

    subject.set_state(1);
    assert_eq!(
        *log.borrow(),
        vec![("H", 1), ("H", 2), ("M", 2), ("T", 2), ("T", 1)]
    );
    assert!(!subject.contains(SubscriberId::of(&*middle)));
    assert_eq!(subject.len(), 2);
}

#[test]
fn state_round_trips_last_value() {
    let subject = SharedSubject::new();
    assert_eq!(subject.state(), 0);
    for v in [10, -3, 0, 99] {
        subject.set_state(v);
    }
    assert_eq!(subject.state(), 99);
}

#[test]
fn duplicate_registration_follows_policy() {
    let log = Log::default();
    let a = tagged("A", &log);

    let allowing = SharedSubject::new();
    allowing.add_observer(a.clone()).unwrap();
    allowing.add_observer(a.clone()).unwrap();
    allowing.set_state(1);
    assert_eq!(*log.borrow(), vec![("A", 1), ("A", 1)]);

    log.borrow_mut().clear();
    let rejecting = SharedSubject::builder(Config::default())
        .with_duplicates(DuplicatePolicy::Reject)
        .build();
    rejecting.add_observer(a.clone()).unwrap();
    let err = rejecting.add_observer(a.clone()).unwrap_err();
    assert_eq!(err.as_label(), "subject_duplicate_registration");
    rejecting.set_state(1);
    assert_eq!(*log.borrow(), vec![("A", 1)]);
}

/// Owned-regime subscriber that revokes its own token.
struct OneShot {
    token: Cell<Option<Token>>,
    subject: statecast::WeakSubject<statecast::Owned>,
    seen: Cell<u32>,
}

impl Subscribe for OneShot {
    fn on_notify(&self, _value: State) {
        self.seen.set(self.seen.get() + 1);
        if let (Some(token), Some(subject)) = (self.token.take(), self.subject.upgrade()) {
            subject.remove_observer(token);
        }
    }
}

#[test]
fn owned_subject_keeps_subscribers_until_revoked() {
    let subject = OwnedSubject::new();
    let log = Log::default();
    let token = subject.add_observer(tagged("A", &log)).unwrap();

    subject.set_state(1);
    subject.set_state(2);
    assert!(subject.remove_observer(token));
    subject.set_state(3);

    assert_eq!(*log.borrow(), vec![("A", 1), ("A", 2)]);
}

#[test]
fn owned_subscriber_can_revoke_itself() {
    let subject = OwnedSubject::new();
    let one_shot = Rc::new(OneShot {
        token: Cell::new(None),
        subject: subject.downgrade(),
        seen: Cell::new(0),
    });
    let token = subject.add_observer(one_shot.clone()).unwrap();
    one_shot.token.set(Some(token));

    subject.set_state(1);
    subject.set_state(2);
    assert_eq!(one_shot.seen.get(), 1);
    assert!(subject.is_empty());
    assert_eq!(Rc::strong_count(&one_shot), 1);
}
