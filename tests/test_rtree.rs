use rbush::{BoundingRect, RTree, RectItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Rect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl RectItem for Rect {
    fn min_x(&self) -> f64 {
        self.min_x
    }
    fn min_y(&self) -> f64 {
        self.min_y
    }
    fn max_x(&self) -> f64 {
        self.max_x
    }
    fn max_y(&self) -> f64 {
        self.max_y
    }
}

fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rect {
    Rect {
        min_x,
        min_y,
        max_x,
        max_y,
    }
}

fn window(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingRect {
    BoundingRect::new(min_x, min_y, max_x, max_y)
}

#[test]
fn scenario_1_small_packed_load() {
    info!("scenario 1: small packed load");
    let mut tree: RTree<Rect> = RTree::new(4);
    tree.load(vec![
        rect(0.0, 0.0, 1.0, 1.0),
        rect(2.0, 2.0, 3.0, 3.0),
        rect(4.0, 4.0, 5.0, 5.0),
        rect(6.0, 6.0, 7.0, 7.0),
    ])
    .unwrap();

    assert_eq!(tree.all().len(), 4);

    let found = tree.search(&window(0.0, 0.0, 3.0, 3.0));
    assert_eq!(found.len(), 2);

    assert!(!tree.collides(&window(10.0, 10.0, 11.0, 11.0)));
}

#[test]
fn scenario_2_split_behavior() {
    info!("scenario 2: split behavior under max_entries = 4");
    let mut tree: RTree<Rect> = RTree::new(4);
    for i in 0..9 {
        let f = i as f64;
        tree.insert(rect(f, f, f + 1.0, f + 1.0)).unwrap();
        debug!(i, height = tree.height(), "inserted");
        if i == 4 {
            assert!(tree.height() >= 2, "root should have split by the fifth insert");
        }
    }

    assert!(tree.height() >= 2);
    assert_eq!(tree.search(&window(0.0, 0.0, 9.0, 9.0)).len(), 9);
}

#[test]
fn scenario_3_deletion_and_condense() {
    info!("scenario 3: deletion and condense");
    let mut tree: RTree<Rect> = RTree::new(4);
    let items: Vec<Rect> = (0..9)
        .map(|i| {
            let f = i as f64;
            rect(f, f, f + 1.0, f + 1.0)
        })
        .collect();
    for item in &items {
        tree.insert(item.clone()).unwrap();
    }

    for item in &items {
        assert!(tree.remove(item));
    }

    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 1);
    assert!(tree.is_empty());
}

#[test]
fn scenario_4_containment_shortcut() {
    info!("scenario 4: containment shortcut");
    let mut tree: RTree<Rect> = RTree::new(4);
    tree.load(vec![
        rect(0.0, 0.0, 1.0, 1.0),
        rect(0.0, 0.0, 2.0, 2.0),
        rect(5.0, 5.0, 6.0, 6.0),
    ])
    .unwrap();

    let found = tree.search(&window(-1.0, -1.0, 3.0, 3.0));
    assert_eq!(found.len(), 2);
    for item in found {
        assert!(item.max_x <= 2.0 && item.max_y <= 2.0);
    }
}

#[test]
fn scenario_5_round_trip_matches_original_queries() {
    info!("scenario 5: serialize/deserialize round trip");
    let mut tree: RTree<Rect> = RTree::new(4);
    for i in 0..9 {
        let f = i as f64;
        tree.insert(rect(f, f, f + 1.0, f + 1.0)).unwrap();
    }

    let bytes = tree.serialize().unwrap();
    let restored: RTree<Rect> = RTree::deserialize(&bytes).unwrap();

    assert_eq!(restored.all().len(), tree.all().len());

    let queries = [
        window(0.0, 0.0, 3.0, 3.0),
        window(10.0, 10.0, 11.0, 11.0),
        window(-1.0, -1.0, 3.0, 3.0),
        window(0.0, 0.0, 9.0, 9.0),
    ];
    for q in queries {
        assert_eq!(tree.search(&q).len(), restored.search(&q).len());
        assert_eq!(tree.collides(&q), restored.collides(&q));
    }
}

#[test]
fn scenario_6_collides_early_exit_over_1000_items() {
    info!("scenario 6: collides early exit over 1000 well-separated items");
    let mut tree: RTree<Rect> = RTree::new(9);
    let items: Vec<Rect> = (0..1000)
        .map(|i| {
            let f = i as f64 * 10.0;
            rect(f, 0.0, f + 1.0, 1.0)
        })
        .collect();
    tree.load(items).unwrap();

    assert!(tree.collides(&window(0.0, 0.0, 1.0, 1.0)));
    assert!(!tree.collides(&window(-100.0, 50.0, -99.0, 51.0)));
}

#[test]
fn boundary_empty_tree() {
    let tree: RTree<Rect> = RTree::new(4);
    assert!(tree.search(&window(0.0, 0.0, 1.0, 1.0)).is_empty());
    assert!(!tree.collides(&window(0.0, 0.0, 1.0, 1.0)));
    assert!(tree.all().is_empty());
}

#[test]
fn boundary_remove_on_empty_tree_is_noop() {
    let mut tree: RTree<Rect> = RTree::new(4);
    assert!(!tree.remove(&rect(0.0, 0.0, 1.0, 1.0)));
}

#[test]
fn boundary_single_item() {
    let mut tree: RTree<Rect> = RTree::new(4);
    tree.insert(rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    assert_eq!(tree.search(&window(0.5, 0.5, 2.0, 2.0)).len(), 1);
    assert!(tree.search(&window(5.0, 5.0, 6.0, 6.0)).is_empty());
}

#[test]
fn boundary_max_entries_floored_to_four_with_min_two() {
    let mut tree: RTree<Rect> = RTree::new(1);
    for i in 0..20 {
        let f = i as f64;
        tree.insert(rect(f, f, f + 1.0, f + 1.0)).unwrap();
    }
    assert!(tree.height() >= 2);
    assert_eq!(tree.all().len(), 20);
}

#[test]
fn boundary_load_fewer_than_min_entries_matches_sequential_insert() {
    let mut loaded: RTree<Rect> = RTree::new(9);
    loaded.load(vec![rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 1.0, 2.0, 2.0)]).unwrap();

    let mut inserted: RTree<Rect> = RTree::new(9);
    inserted.insert(rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    inserted.insert(rect(1.0, 1.0, 2.0, 2.0)).unwrap();

    assert_eq!(loaded.all().len(), inserted.all().len());
    assert_eq!(loaded.height(), inserted.height());
}

#[test]
fn boundary_duplicate_rectangles_remove_exactly_one() {
    let mut tree: RTree<Rect> = RTree::new(4);
    let a = rect(0.0, 0.0, 1.0, 1.0);
    tree.insert(a.clone()).unwrap();
    tree.insert(a.clone()).unwrap();

    assert!(tree.remove(&a));
    assert_eq!(tree.len(), 1);
    assert!(tree.remove(&a));
    assert_eq!(tree.len(), 0);
}

#[test]
fn boundary_idempotent_clear() {
    let mut tree: RTree<Rect> = RTree::new(4);
    tree.insert(rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    tree.clear();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 1);
}
