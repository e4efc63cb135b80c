//! Runs in its own process so the global registry is still unbuilt when the
//! threads start.

use std::sync::{Arc, Barrier};
use std::thread;

use custom_interfaces::registry;

#[test]
fn test_registry_concurrent_first_access() {
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let support =
                    registry::lookup_message("custom_interfaces/action/Rotate_Goal").unwrap();
                let hash = support.type_hash().unwrap();
                (support, hash)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let (first, first_hash) = &results[0];
    for (support, hash) in &results[1..] {
        assert!(Arc::ptr_eq(first, support));
        assert_eq!(hash, first_hash);
    }
    assert!(registry::registered_types().contains(&"custom_interfaces/action/Rotate"));
}
