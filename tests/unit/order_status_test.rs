// Exhaustive walk of the order status state machine.

use botica::modules::orders::models::OrderStatus;

const ALL: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

#[test]
fn test_only_forward_steps_and_guarded_cancel_are_legal() {
    for from in ALL {
        for to in ALL {
            let legal = from.can_transition_to(to);
            let expected = if to == OrderStatus::Cancelled {
                matches!(from, OrderStatus::Pending | OrderStatus::Confirmed)
            } else {
                from.next() == Some(to)
            };
            assert_eq!(
                legal, expected,
                "transition {:?} -> {:?} evaluated wrongly",
                from, to
            );
        }
    }
}

#[test]
fn test_happy_path_reaches_delivered() {
    let mut status = OrderStatus::Pending;
    let mut hops = 0;

    while let Some(next) = status.next() {
        assert!(status.can_transition_to(next));
        status = next;
        hops += 1;
    }

    assert_eq!(status, OrderStatus::Delivered);
    assert_eq!(hops, 4);
    assert!(status.is_terminal());
}

#[test]
fn test_cancel_guard() {
    assert!(OrderStatus::Pending.can_cancel());
    assert!(OrderStatus::Confirmed.can_cancel());
    assert!(!OrderStatus::Preparing.can_cancel());
    assert!(!OrderStatus::Ready.can_cancel());
    assert!(!OrderStatus::Delivered.can_cancel());
    assert!(!OrderStatus::Cancelled.can_cancel());
}

#[test]
fn test_terminal_states_go_nowhere() {
    for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
        assert!(terminal.is_terminal());
        for to in ALL {
            assert!(!terminal.can_transition_to(to));
        }
    }
}

#[test]
fn test_every_status_has_a_label() {
    for status in ALL {
        assert!(!status.label().is_empty());
        assert!(!status.as_str().is_empty());
    }
}
