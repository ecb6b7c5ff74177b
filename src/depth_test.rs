use crate::depth::Depth;
use crate::rbt::Rbt;

#[test]
fn test_depth_empty() {
    let depth = Depth::new();
    assert_eq!(depth.samples(), 0);
    assert_eq!(depth.mean(), 0);
    assert!(depth.percentiles().is_empty());
}

#[test]
fn test_depth_sample() {
    let mut depth = Depth::new();
    (0..5).for_each(|_| depth.sample(1));
    (0..5).for_each(|_| depth.sample(2));

    assert_eq!(depth.samples(), 10);
    assert_eq!((depth.min(), depth.mean(), depth.max()), (1, 1, 2));
    assert_eq!(depth.percentiles(), vec![(100, 2)]);
    assert_eq!(
        depth.json(),
        r#"{ "min": 1, "mean": 1, "max": 2, "percentiles": { "100": 2 } }"#
    );
}

#[test]
fn test_depth_percentiles() {
    let mut depth = Depth::new();
    (0..90).for_each(|_| depth.sample(3));
    (0..9).for_each(|_| depth.sample(4));
    depth.sample(5);

    assert_eq!(depth.percentiles(), vec![(90, 3), (99, 4), (100, 5)]);
}

#[test]
fn test_depth_validate() {
    let rbt = Rbt::load_from("test-rbt", (0..10_000).map(|key| (key, key.to_string())));
    let stats = rbt.validate().unwrap();
    assert_eq!(stats.entries(), 10_000);

    // n nodes hold n+1 sentinel links.
    let depths = stats.depths().unwrap();
    assert_eq!(depths.samples(), 10_001);
    assert!(depths.min() <= depths.mean() && depths.mean() <= depths.max());
    assert_eq!(depths.max(), rbt.height());
    assert!(stats.blacks().unwrap() <= depths.min());
}
