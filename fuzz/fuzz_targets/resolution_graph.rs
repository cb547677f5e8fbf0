#![no_main]

use lazy_di::{DiError, Resolver, ServiceCollection};
use libfuzzer_sys::fuzz_target;

const NODES: usize = 8;

// Each byte pair (from, to) adds an edge between two of NODES services.
// Every service sums its dependencies, so resolution must either succeed
// or report a cycle whose path starts and ends on the same service.
fuzz_target!(|data: &[u8]| {
    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); NODES];
    for pair in data.chunks_exact(2).take(32) {
        let from = pair[0] as usize % NODES;
        let to = pair[1] as usize % NODES;
        if !edges[from].contains(&to) {
            edges[from].push(to);
        }
    }

    let mut services = ServiceCollection::new();
    for (node, deps) in edges.iter().enumerate() {
        let deps: Vec<String> = deps.iter().map(|d| format!("n{}", d)).collect();
        services = services.add(format!("n{}", node), move |r| {
            let mut total = 1u64;
            for dep in &deps {
                total += *r.get::<u64>(dep.clone())?;
            }
            Ok(total)
        });
    }

    let provider = services.build();
    for node in 0..NODES {
        match provider.get::<u64>(format!("n{}", node)) {
            Ok(total) => assert!(*total >= 1),
            Err(DiError::Circular(path)) => {
                assert!(path.len() >= 2);
                assert_eq!(path.first(), path.last());
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
});
