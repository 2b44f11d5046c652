use dotmap::{Action, LatLng, LocationOutcome, MapApp, MarkerId, PALETTE};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
enum Op {
    Click { lat: i16, lng: i16 },
    Drag { idx: u16, lat: i16, lng: i16 },
    Remove { idx: u16 },
    Select { color: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>()).prop_map(|(lat, lng)| Op::Click { lat, lng }),
        (any::<u16>(), any::<i16>(), any::<i16>()).prop_map(|(idx, lat, lng)| Op::Drag { idx, lat, lng }),
        any::<u16>().prop_map(|idx| Op::Remove { idx }),
        (0u8..4u8).prop_map(|color| Op::Select { color }),
    ]
}

fn ready_app() -> MapApp {
    let mut app = MapApp::default();
    app.dispatch(Action::LocationResolved(LocationOutcome::Located { lat: 48.85, lng: 2.35, accuracy: 5.0 }));
    app
}

fn pos(lat: i16, lng: i16) -> LatLng { LatLng::new(lat as f64 * 0.001, lng as f64 * 0.001) }

fn pick(app: &MapApp, idx: u16) -> MarkerId {
    let ids: Vec<MarkerId> = app.markers().iter().map(|m| m.id.clone()).collect();
    ids[idx as usize % ids.len()].clone()
}

proptest! {
    #[test]
    fn appends_grow_by_one_with_distinct_ids(points in prop::collection::vec((any::<i16>(), any::<i16>()), 0..64)) {
        let mut app = ready_app();
        for (lat, lng) in &points {
            app.dispatch(Action::MapClick(pos(*lat, *lng)));
        }
        prop_assert_eq!(app.markers().len(), points.len() + 1);
        let ids: HashSet<&str> = app.markers().iter().map(|m| m.id.as_str()).collect();
        prop_assert_eq!(ids.len(), app.markers().len());
    }

    #[test]
    fn drag_touches_only_position(lat in any::<i16>(), lng in any::<i16>(), lat2 in any::<i16>(), lng2 in any::<i16>(), c in 0usize..4) {
        let mut app = ready_app();
        app.dispatch(Action::SelectColor(PALETTE[c]));
        let id = app.dispatch(Action::MapClick(pos(lat, lng))).created.unwrap();
        let before = app.markers().get(&id).unwrap().clone();
        app.dispatch(Action::DragEnd { id: id.clone(), position: pos(lat2, lng2) });
        let after = app.markers().get(&id).unwrap();
        prop_assert_eq!(after.position, pos(lat2, lng2));
        prop_assert_eq!(after.color, before.color);
        prop_assert_eq!(after.draggable, before.draggable);
        prop_assert_eq!(after.is_user, before.is_user);
    }

    #[test]
    fn random_edits_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut app = ready_app();
        for op in ops {
            match op {
                Op::Click { lat, lng } => { app.dispatch(Action::MapClick(pos(lat, lng))); }
                Op::Drag { idx, lat, lng } => {
                    let id = pick(&app, idx);
                    app.dispatch(Action::DragEnd { id, position: pos(lat, lng) });
                }
                Op::Remove { idx } => {
                    let id = pick(&app, idx);
                    app.dispatch(Action::RemoveDot { id });
                }
                Op::Select { color } => { app.dispatch(Action::SelectColor(PALETTE[color as usize])); }
            }
            let users = app.markers().iter().filter(|m| m.is_user).count();
            prop_assert_eq!(users, 1);
            let ids: HashSet<&str> = app.markers().iter().map(|m| m.id.as_str()).collect();
            prop_assert_eq!(ids.len(), app.markers().len());
            prop_assert!(app.markers().iter().all(|m| m.is_user != m.color.is_some()));
        }
    }
}

#[test]
fn second_remove_is_a_noop() {
    let mut app = ready_app();
    let id = app.dispatch(Action::MapClick(LatLng::new(1.0, 1.0))).created.unwrap();
    let first = app.dispatch(Action::RemoveDot { id: id.clone() });
    let rev = app.revision();
    let second = app.dispatch(Action::RemoveDot { id });
    assert!(first.changed);
    assert!(!second.changed);
    assert_eq!(app.revision(), rev);
    assert_eq!(app.markers().len(), 1);
}
