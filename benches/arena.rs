use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ordered_collections::arena::{Arena, Index};

const NUM_OF_NODES: usize = 100;

struct LinkedNode {
    pub parent: Option<Index>,
    pub right: Option<Index>,
    pub key: u32,
}

fn bench_arena_spine(c: &mut Criterion) {
    c.bench_function("bench arena spine", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let mut parent = None;
            for key in 0..NUM_OF_NODES as u32 {
                let index = arena.allocate(LinkedNode {
                    parent,
                    right: None,
                    key,
                });
                if let Some(parent) = parent {
                    arena[parent].right = Some(index);
                }
                parent = Some(index);
            }
            black_box(arena.len());
        })
    });
}

// frees and reallocates every slot; the free list should keep the arena at its
// high-water mark instead of growing
fn bench_arena_churn(c: &mut Criterion) {
    let mut arena = Arena::new();
    let mut handles: Vec<Index> = (0..NUM_OF_NODES as u32)
        .map(|key| {
            arena.allocate(LinkedNode {
                parent: None,
                right: None,
                key,
            })
        })
        .collect();

    c.bench_function("bench arena churn", move |b| {
        b.iter(|| {
            for handle in &mut handles {
                let key = arena[*handle].key;
                arena.free(*handle);
                *handle = arena.allocate(LinkedNode {
                    parent: None,
                    right: None,
                    key,
                });
            }
            black_box(arena.len());
        })
    });
}

fn bench_box_spine(c: &mut Criterion) {
    struct BoxNode {
        pub next: Option<Box<BoxNode>>,
        pub key: u32,
    }

    c.bench_function("bench box spine", |b| {
        b.iter(|| {
            let mut head: Option<Box<BoxNode>> = None;
            for key in 0..NUM_OF_NODES as u32 {
                head = Some(Box::new(BoxNode { next: head, key }));
            }
            black_box(head.map(|node| node.key));
        })
    });
}

criterion_group!(benches, bench_arena_spine, bench_arena_churn, bench_box_spine);
criterion_main!(benches);
