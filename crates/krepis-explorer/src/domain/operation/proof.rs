//! Kani proofs for the delay odometer

use super::odometer::DelayOdometer;

#[kani::proof]
#[kani::unwind(6)]
fn proof_advance_keeps_slots_non_increasing() {
    let bound: usize = kani::any();
    kani::assume(bound <= 4);

    let mut odometer = DelayOdometer::new(3);
    let steps: usize = kani::any();
    kani::assume(steps <= 4);

    for _ in 0..steps {
        if !odometer.advance(bound) {
            break;
        }
    }

    let slots = odometer.slots();
    assert!(slots[0] >= slots[1]);
    assert!(slots[1] >= slots[2]);
    assert!(slots[0] <= bound);
}

#[kani::proof]
fn proof_wrap_leaves_slots_untouched() {
    let mut odometer = DelayOdometer::new(2);
    assert!(!odometer.advance(0));
    assert_eq!(odometer.slots(), &[0, 0]);
}
