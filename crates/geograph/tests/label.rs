use geograph::{Label, Location, Position};
use proptest::prelude::*;

fn location() -> impl Strategy<Value = Option<Location>> {
    prop_oneof![
        Just(None),
        Just(Some(Location::Interior)),
        Just(Some(Location::Boundary)),
        Just(Some(Location::Exterior)),
    ]
}

/// Any label: each geometry independently in line or area form.
fn label() -> impl Strategy<Value = Label> {
    (any::<[bool; 2]>(), prop::collection::vec(location(), 6)).prop_map(|(area, locs)| {
        let mut label = Label::line_all(None);
        for i in 0..2 {
            label.set_location(i, locs[3 * i]);
            if area[i] {
                label.set_location_at(i, Position::Left, locs[3 * i + 1]);
                label.set_location_at(i, Position::Right, locs[3 * i + 2]);
            }
        }
        label
    })
}

const POSITIONS: [Position; 3] = [Position::On, Position::Left, Position::Right];

proptest! {
    #[test]
    fn merge_never_overwrites_or_clears(a in label(), b in label()) {
        let m = a.merged(&b);
        for i in 0..2 {
            for pos in POSITIONS {
                match a.location_at(i, pos) {
                    Some(loc) => prop_assert_eq!(m.location_at(i, pos), Some(loc)),
                    None if m.is_area_at(i) == b.is_area_at(i) || pos == Position::On => {
                        prop_assert_eq!(m.location_at(i, pos), b.location_at(i, pos));
                    }
                    None => {}
                }
            }
        }
    }

    #[test]
    fn merge_is_idempotent(a in label(), b in label()) {
        let once = a.merged(&b);
        prop_assert_eq!(once.merged(&b), once);
    }

    #[test]
    fn flip_is_an_involution(a in label()) {
        prop_assert_eq!(a.flipped().flipped(), a);
        for i in 0..2 {
            prop_assert_eq!(a.flipped().location(i), a.location(i));
            prop_assert_eq!(a.flipped().location_at(i, Position::Left), a.location_at(i, Position::Right));
        }
    }
}
