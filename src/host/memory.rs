//! In-process scene graph implementing [`PrefabHost`].
//!
//! `MemoryHost` stands in for an engine: objects form a parent/child tree,
//! carry an optional component [`TypeKey`], a name and string properties.
//! Cloning deep-copies the subtree and tags the copy with `"(Clone)"` the way
//! engines usually do; [`MemoryHost::unload_scene`] plays the part of a scene
//! transition by destroying every root that has not been pinned.
//!
//! ## Example Usage
//!
//! ```
//! use prefabkit::host::MemoryHost;
//! use prefabkit::key::TypeKey;
//! use prefabkit::traits::PrefabHost;
//!
//! let mut host = MemoryHost::new();
//! let key = TypeKey::new("game::Beacon").unwrap();
//! let template = host.spawn("Beacon", Some(key.clone()));
//!
//! let copy = host.clone_instance(&template, None).unwrap();
//! assert_eq!(host.name(&copy).as_deref(), Some("Beacon(Clone)"));
//! assert_eq!(host.find_instances(&key), vec![template, copy]);
//!
//! assert_eq!(host.unload_scene(), 2);
//! assert!(!host.is_alive(&template));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::PrefabError;
use crate::host::arena::{SlotArena, SlotId};
use crate::key::TypeKey;
use crate::traits::{Component, PrefabHost};

/// Handle to an object in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(SlotId);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.0.index(), self.0.generation())
    }
}

#[derive(Debug, Clone)]
struct SceneObject {
    name: String,
    key: Option<TypeKey>,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    properties: BTreeMap<String, String>,
    pinned: bool,
}

impl SceneObject {
    fn new(name: String, key: Option<TypeKey>, parent: Option<ObjectId>) -> Self {
        Self {
            name,
            key,
            parent,
            children: Vec::new(),
            properties: BTreeMap::new(),
            pinned: false,
        }
    }
}

/// Scene graph held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    objects: SlotArena<SceneObject>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: SlotArena::with_capacity(capacity),
        }
    }

    /// Adds a root object.
    pub fn spawn(&mut self, name: impl Into<String>, key: Option<TypeKey>) -> ObjectId {
        ObjectId(self.objects.insert(SceneObject::new(name.into(), key, None)))
    }

    /// Adds a root object tagged with `T`'s type key.
    pub fn spawn_component<T: Component>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<ObjectId, PrefabError> {
        let key = T::type_key()?;
        Ok(self.spawn(name, Some(key)))
    }

    /// Adds an object under `parent`. Returns `None` if `parent` is not live.
    pub fn spawn_child(
        &mut self,
        parent: ObjectId,
        name: impl Into<String>,
        key: Option<TypeKey>,
    ) -> Option<ObjectId> {
        if !self.objects.contains(parent.0) {
            return None;
        }
        let id = ObjectId(
            self.objects
                .insert(SceneObject::new(name.into(), key, Some(parent))),
        );
        self.objects.get_mut(parent.0)?.children.push(id);
        Some(id)
    }

    /// Sets a property; returns `false` if `id` is not live.
    pub fn set_property(
        &mut self,
        id: ObjectId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.objects.get_mut(id.0) {
            Some(object) => {
                object.properties.insert(name.into(), value.into());
                true
            },
            None => false,
        }
    }

    pub fn property(&self, id: ObjectId, name: &str) -> Option<&str> {
        self.objects
            .get(id.0)
            .and_then(|object| object.properties.get(name))
            .map(String::as_str)
    }

    pub fn type_key(&self, id: ObjectId) -> Option<&TypeKey> {
        self.objects.get(id.0).and_then(|object| object.key.as_ref())
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id.0).and_then(|object| object.parent)
    }

    /// Children of `id`; empty if `id` is not live.
    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects
            .get(id.0)
            .map(|object| object.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_pinned(&self, id: ObjectId) -> bool {
        self.objects
            .get(id.0)
            .map(|object| object.pinned)
            .unwrap_or(false)
    }

    /// Number of live objects, children included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Destroys every unpinned root and its subtree.
    ///
    /// Returns the number of objects destroyed.
    pub fn unload_scene(&mut self) -> usize {
        let roots: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, object)| object.parent.is_none() && !object.pinned)
            .map(|(id, _)| ObjectId(id))
            .collect();
        let destroyed: usize = roots.into_iter().map(|id| self.destroy_subtree(id)).sum();
        tracing::debug!(destroyed, remaining = self.len(), "scene unloaded");
        destroyed
    }

    fn detach(&mut self, id: ObjectId) {
        let Some(parent) = self.objects.get_mut(id.0).and_then(|o| o.parent.take()) else {
            return;
        };
        if let Some(parent) = self.objects.get_mut(parent.0) {
            parent.children.retain(|child| *child != id);
        }
    }

    fn destroy_subtree(&mut self, root: ObjectId) -> usize {
        self.detach(root);
        let mut destroyed = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(object) = self.objects.remove(id.0) {
                destroyed += 1;
                stack.extend(object.children);
            }
        }
        destroyed
    }

    /// Returns `true` if `id` is `root` or one of its descendants.
    fn is_within(&self, root: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == root {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn clone_subtree(&mut self, source: ObjectId, parent: Option<ObjectId>) -> Option<ObjectId> {
        let root = self.clone_node(source, parent)?;
        let mut stack: Vec<(ObjectId, ObjectId)> = self
            .children(source)
            .iter()
            .rev()
            .map(|child| (*child, root))
            .collect();

        while let Some((child, parent_copy)) = stack.pop() {
            let Some(copy) = self.clone_node(child, Some(parent_copy)) else {
                continue;
            };
            if let Some(object) = self.objects.get_mut(parent_copy.0) {
                object.children.push(copy);
            }
            stack.extend(self.children(child).iter().rev().map(|grandchild| (*grandchild, copy)));
        }
        Some(root)
    }

    fn clone_node(&mut self, source: ObjectId, parent: Option<ObjectId>) -> Option<ObjectId> {
        let original = self.objects.get(source.0)?;
        let mut copy = SceneObject::new(original.name.clone(), original.key.clone(), parent);
        copy.properties = original.properties.clone();
        Some(ObjectId(self.objects.insert(copy)))
    }
}

impl PrefabHost for MemoryHost {
    type Handle = ObjectId;

    fn find_instances(&self, key: &TypeKey) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, object)| object.key.as_ref() == Some(key))
            .map(|(id, _)| ObjectId(id))
            .collect()
    }

    fn clone_instance(&mut self, template: &ObjectId, parent: Option<&ObjectId>) -> Option<ObjectId> {
        let parent = parent.copied().filter(|p| self.objects.contains(p.0));
        if let Some(parent) = parent.filter(|p| self.is_within(*template, *p)) {
            tracing::warn!(%template, %parent, "refusing to clone a template into its own subtree");
            return None;
        }
        let copy = self.clone_subtree(*template, parent)?;
        if let Some(object) = self.objects.get_mut(copy.0) {
            object.name.push_str(Self::CLONE_SUFFIX);
        }
        if let Some(parent) = parent.and_then(|p| self.objects.get_mut(p.0)) {
            parent.children.push(copy);
        }
        Some(copy)
    }

    fn destroy(&mut self, handle: &ObjectId) {
        self.destroy_subtree(*handle);
    }

    fn pin(&mut self, handle: &ObjectId) {
        // Pinned objects must be roots, otherwise a parent teardown takes them along.
        self.detach(*handle);
        if let Some(object) = self.objects.get_mut(handle.0) {
            object.pinned = true;
        }
    }

    fn is_alive(&self, handle: &ObjectId) -> bool {
        self.objects.contains(handle.0)
    }

    fn name(&self, handle: &ObjectId) -> Option<String> {
        self.objects.get(handle.0).map(|object| object.name.clone())
    }

    fn set_name(&mut self, handle: &ObjectId, name: String) {
        if let Some(object) = self.objects.get_mut(handle.0) {
            object.name = name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> TypeKey {
        TypeKey::new(name).unwrap()
    }

    #[test]
    fn find_instances_filters_by_key() {
        let mut host = MemoryHost::new();
        let a = host.spawn("A", Some(key("A")));
        let _b = host.spawn("B", Some(key("B")));
        let _plain = host.spawn("plain", None);
        let a2 = host.spawn("A2", Some(key("A")));

        assert_eq!(host.find_instances(&key("A")), vec![a, a2]);
        assert!(host.find_instances(&key("C")).is_empty());
    }

    #[test]
    fn clone_deep_copies_subtree_and_properties() {
        let mut host = MemoryHost::new();
        let root = host.spawn("Turret", Some(key("Turret")));
        let barrel = host.spawn_child(root, "Barrel", None).unwrap();
        host.set_property(barrel, "caliber", "40mm");

        let copy = host.clone_instance(&root, None).unwrap();
        assert_eq!(host.len(), 4);
        assert_eq!(host.name(&copy).as_deref(), Some("Turret(Clone)"));

        let copied_barrel = host.children(copy)[0];
        assert_ne!(copied_barrel, barrel);
        assert_eq!(host.name(&copied_barrel).as_deref(), Some("Barrel"));
        assert_eq!(host.property(copied_barrel, "caliber"), Some("40mm"));
        assert_eq!(host.parent(copied_barrel), Some(copy));

        host.set_property(copied_barrel, "caliber", "90mm");
        assert_eq!(host.property(barrel, "caliber"), Some("40mm"));
    }

    #[test]
    fn clone_attaches_to_live_parent() {
        let mut host = MemoryHost::new();
        let template = host.spawn("Beacon", Some(key("Beacon")));
        let holder = host.spawn("Holder", None);

        let copy = host.clone_instance(&template, Some(&holder)).unwrap();
        assert_eq!(host.parent(copy), Some(holder));
        assert_eq!(host.children(holder), &[copy]);
    }

    #[test]
    fn clone_keeps_sibling_order() {
        let mut host = MemoryHost::new();
        let root = host.spawn("Rack", Some(key("Rack")));
        for slot in ["Left", "Middle", "Right"] {
            let child = host.spawn_child(root, slot, None).unwrap();
            host.spawn_child(child, "Bolt", None).unwrap();
        }

        let copy = host.clone_instance(&root, None).unwrap();
        let names: Vec<String> = host
            .children(copy)
            .iter()
            .filter_map(|child| host.name(child))
            .collect();
        assert_eq!(names, vec!["Left", "Middle", "Right"]);
        for child in host.children(copy) {
            assert_eq!(host.children(*child).len(), 1);
        }
        assert_eq!(host.len(), 14);
    }

    #[test]
    fn clone_handles_deep_chain() {
        const DEPTH: usize = 200_000;

        let mut host = MemoryHost::with_capacity(2 * DEPTH + 2);
        let root = host.spawn("Chain", Some(key("Chain")));
        let mut tail = root;
        for _ in 0..DEPTH {
            tail = host.spawn_child(tail, "Link", None).unwrap();
        }

        let copy = host.clone_instance(&root, None).unwrap();
        assert_eq!(host.len(), 2 * (DEPTH + 1));

        let mut depth = 0;
        let mut node = copy;
        while let [next] = host.children(node) {
            assert_eq!(host.parent(*next), Some(node));
            node = *next;
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
    }

    #[test]
    fn clone_into_own_subtree_is_refused() {
        let mut host = MemoryHost::new();
        let template = host.spawn("Beacon", Some(key("Beacon")));
        let lamp = host.spawn_child(template, "Lamp", None).unwrap();

        assert_eq!(host.clone_instance(&template, Some(&template)), None);
        assert_eq!(host.clone_instance(&template, Some(&lamp)), None);
        assert_eq!(host.children(template), &[lamp]);
        assert!(host.children(lamp).is_empty());
        assert_eq!(host.len(), 2);
    }

    #[test]
    fn clone_of_dead_template_is_none() {
        let mut host = MemoryHost::new();
        let template = host.spawn("Beacon", None);
        host.destroy(&template);
        assert_eq!(host.clone_instance(&template, None), None);
    }

    #[test]
    fn destroy_removes_subtree_and_detaches() {
        let mut host = MemoryHost::new();
        let root = host.spawn("Root", None);
        let mid = host.spawn_child(root, "Mid", None).unwrap();
        let leaf = host.spawn_child(mid, "Leaf", None).unwrap();

        host.destroy(&mid);
        assert!(host.is_alive(&root));
        assert!(!host.is_alive(&mid));
        assert!(!host.is_alive(&leaf));
        assert!(host.children(root).is_empty());
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn unload_scene_spares_pinned_roots() {
        let mut host = MemoryHost::new();
        let level = host.spawn("Level", None);
        let kept = host.spawn_child(level, "Kept", None).unwrap();
        let child_of_kept = host.spawn_child(kept, "Inner", None).unwrap();
        let loose = host.spawn("Loose", None);

        host.pin(&kept);
        assert!(host.is_pinned(kept));
        assert_eq!(host.parent(kept), None);

        assert_eq!(host.unload_scene(), 2);
        assert!(!host.is_alive(&level));
        assert!(!host.is_alive(&loose));
        assert!(host.is_alive(&kept));
        assert!(host.is_alive(&child_of_kept));
    }

    #[test]
    fn strip_clone_suffix_removes_every_occurrence() {
        let host = MemoryHost::new();
        assert_eq!(host.strip_clone_suffix("Beacon(Clone)"), "Beacon");
        assert_eq!(host.strip_clone_suffix("Beacon(Clone)(Clone)"), "Beacon");
        assert_eq!(host.strip_clone_suffix("Beacon (Clone)"), "Beacon");
        assert_eq!(host.strip_clone_suffix("Beacon"), "Beacon");
    }

    #[test]
    fn spawn_child_of_dead_parent_fails() {
        let mut host = MemoryHost::new();
        let parent = host.spawn("P", None);
        host.destroy(&parent);
        assert_eq!(host.spawn_child(parent, "C", None), None);
    }

    #[test]
    fn spawn_component_tags_with_type_key() {
        struct Beacon;
        impl Component for Beacon {}

        let mut host = MemoryHost::new();
        let id = host.spawn_component::<Beacon>("Beacon").unwrap();
        assert_eq!(host.type_key(id), Some(&Beacon::type_key().unwrap()));
    }
}
