use prefabkit::prelude::*;

struct Beacon;
impl Component for Beacon {}

struct Crate;
impl Component for Crate {}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut host = MemoryHost::new();
    host.spawn_component::<Beacon>("Beacon").unwrap();
    host.spawn_component::<Crate>("Crate").unwrap();
    let mut registry = PrefabRegistry::new(host);

    let beacon = registry.catch_prefab::<Beacon>().unwrap().unwrap();
    let crate_tmp = registry.get_temp_prefab::<Crate>().unwrap().unwrap();
    println!("permanent: {:?}", registry.host().name(&beacon));
    println!("temp: {:?}", registry.host().name(&crate_tmp));

    let destroyed = registry.host_mut().unload_scene();
    println!("unloaded {destroyed} objects");

    println!("beacon cached? {}", registry.get_cached_prefab::<Beacon>().is_ok());
    println!("crate temp: {:?}", registry.get_temp_prefab::<Crate>().unwrap());
}

// Expected output:
// permanent: Some("Beacon(Prefab)")
// temp: Some("Crate(Temp)")
// unloaded 3 objects
// beacon cached? true
// crate temp: None
//
// Explanation: the scene unload destroys both templates and the temp clone.
// The permanent clone is pinned and survives; the temp entry is stale and no
// template is left to re-clone from, so the temp fetch comes back empty.
