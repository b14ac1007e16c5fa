//! Session registry behavior across threads and feature lifecycles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use geotree::BoundingBox;
use geotree_session::{Coordinate, Geometry, SessionRegistry, TreeObserver, TreeSnapshot};

#[test]
fn feature_lifecycle_round_trip() {
    let registry = SessionRegistry::new();
    let session = registry.open_session("viewer-1");

    let park = Geometry::polygon(vec![
        Coordinate::new(-73.98, 40.76),
        Coordinate::new(-73.95, 40.76),
        Coordinate::new(-73.95, 40.80),
        Coordinate::new(-73.98, 40.80),
    ]);
    session.insert_feature("central-park", &park).unwrap();
    session
        .insert_feature("harbor", &Geometry::point(-74.04, 40.64))
        .unwrap();

    let midtown = BoundingBox::new(-74.0, 40.74, -73.9, 40.82);
    let hits = session.query_window(&midtown).unwrap();
    assert_eq!(hits, vec!["central-park".to_string()]);

    session.remove_feature("central-park", &park).unwrap();
    assert!(session.query_window(&midtown).unwrap().is_empty());
    assert_eq!(session.len(), 1);
}

#[test]
fn bulk_load_features() {
    let registry = SessionRegistry::new();
    let session = registry.open_session("viewer-1");

    let features: Vec<(String, Geometry)> = (0..100)
        .map(|i| {
            let x = -120.0 + (i % 10) as f64;
            let y = 30.0 + (i / 10) as f64;
            (format!("f{}", i), Geometry::point(x, y))
        })
        .collect();

    let snapshot = session.load_features(features).unwrap();
    assert_eq!(snapshot.entry_count, 100);

    let hits = session
        .query_window(&BoundingBox::new(-121.0, 29.0, -110.0, 41.0))
        .unwrap();
    assert_eq!(hits.len(), 100);
}

#[test]
fn query_by_geometry_uses_its_envelope() {
    let registry = SessionRegistry::new();
    let session = registry.open_session("viewer-1");

    session
        .insert_feature("a", &Geometry::point(10.0, 10.0))
        .unwrap();
    session
        .insert_feature("b", &Geometry::point(50.0, 50.0))
        .unwrap();

    let window = Geometry::polygon(vec![
        Coordinate::new(5.0, 5.0),
        Coordinate::new(15.0, 15.0),
    ]);
    let hits = session.query(&window).unwrap();
    assert_eq!(hits, vec!["a".to_string()]);
}

#[test]
fn sessions_mutate_in_parallel() {
    let registry = Arc::new(SessionRegistry::new());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let session = registry.open_session(format!("worker-{}", worker));
                for i in 0..50 {
                    let x = -90.0 + (i % 10) as f64 + worker as f64 * 20.0;
                    let y = (i / 10) as f64;
                    session
                        .insert_feature(format!("w{}f{}", worker, i), &Geometry::point(x, y))
                        .unwrap();
                }
                session.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 50);
    }

    assert_eq!(registry.len(), 4);
    for worker in 0..4 {
        let session = registry.session(&format!("worker-{}", worker)).unwrap();
        assert_eq!(session.len(), 50);
    }
}

#[test]
fn observers_see_every_mutation() {
    struct Recorder {
        broadcasts: AtomicUsize,
        last_entry_count: AtomicUsize,
    }

    impl TreeObserver for Recorder {
        fn on_snapshot(&self, session_id: &str, snapshot: &TreeSnapshot) {
            assert_eq!(session_id, "viewer-1");
            self.broadcasts.fetch_add(1, Ordering::SeqCst);
            self.last_entry_count.store(snapshot.entry_count, Ordering::SeqCst);
        }
    }

    let registry = SessionRegistry::new();
    let session = registry.open_session("viewer-1");
    let recorder = Arc::new(Recorder {
        broadcasts: AtomicUsize::new(0),
        last_entry_count: AtomicUsize::new(0),
    });
    session.add_observer(recorder.clone());

    let geom = Geometry::point(0.0, 0.0);
    session.insert_feature("a", &geom).unwrap();
    session.insert_feature("b", &Geometry::point(1.0, 1.0)).unwrap();
    session.remove_feature("a", &geom).unwrap();

    assert_eq!(recorder.broadcasts.load(Ordering::SeqCst), 3);
    assert_eq!(recorder.last_entry_count.load(Ordering::SeqCst), 1);
}

#[test]
fn out_of_range_geometry_is_rejected() {
    let registry = SessionRegistry::new();
    let session = registry.open_session("viewer-1");

    let result = session.insert_feature("bad", &Geometry::point(400.0, 0.0));
    assert!(result.is_err());
    assert!(session.is_empty());
}
