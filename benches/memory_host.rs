use criterion::{Criterion, criterion_group, criterion_main};
use prefabkit::host::MemoryHost;
use prefabkit::key::TypeKey;
use prefabkit::traits::PrefabHost;

fn build_tree(host: &mut MemoryHost, depth: usize, fanout: usize) -> prefabkit::host::ObjectId {
    let key = TypeKey::from_static("bench::Root").unwrap();
    let root = host.spawn("Root", Some(key));
    let mut frontier = vec![root];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for parent in frontier {
            for i in 0..fanout {
                if let Some(child) = host.spawn_child(parent, format!("Node{i}"), None) {
                    host.set_property(child, "index", i.to_string());
                    next.push(child);
                }
            }
        }
        frontier = next;
    }
    root
}

fn bench_clone_subtree(c: &mut Criterion) {
    let mut host = MemoryHost::new();
    let root = build_tree(&mut host, 3, 4);

    c.bench_function("memory_host_clone_destroy_85_nodes", |b| {
        b.iter(|| {
            let copy = host.clone_instance(&root, None).unwrap();
            host.destroy(&copy);
        })
    });
}

fn bench_unload_scene(c: &mut Criterion) {
    c.bench_function("memory_host_unload_scene", |b| {
        b.iter_batched(
            || {
                let mut host = MemoryHost::new();
                for _ in 0..16 {
                    build_tree(&mut host, 2, 4);
                }
                host
            },
            |mut host| host.unload_scene(),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_clone_subtree, bench_unload_scene);
criterion_main!(benches);
