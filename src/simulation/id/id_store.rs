use ahash::HashMap;
use std::any::TypeId;
use std::sync::Arc;

/// The type-erased part of an id. The external String is what input files and
/// output sinks see, the internal u64 is a dense index into the per-type store.
#[derive(Debug)]
pub(super) struct UntypedId {
    pub(super) internal: u64,
    pub(super) external: String,
}

impl UntypedId {
    pub(super) fn new(internal: u64, external: String) -> Self {
        UntypedId { internal, external }
    }
}

#[derive(Default)]
struct TypedIds {
    ids: Vec<Arc<UntypedId>>,
    mapping: HashMap<String, u64>,
}

impl TypedIds {
    fn create(&mut self, external: &str) -> Arc<UntypedId> {
        if let Some(internal) = self.mapping.get(external) {
            return self.ids[*internal as usize].clone();
        }
        let internal = self.ids.len() as u64;
        let id = Arc::new(UntypedId::new(internal, String::from(external)));
        self.ids.push(id.clone());
        self.mapping.insert(String::from(external), internal);
        id
    }

    fn get(&self, internal: u64) -> Arc<UntypedId> {
        self.ids
            .get(internal as usize)
            .unwrap_or_else(|| panic!("No id found for internal id {internal}"))
            .clone()
    }

    fn try_get_ext(&self, external: &str) -> Option<Arc<UntypedId>> {
        self.mapping
            .get(external)
            .map(|internal| self.ids[*internal as usize].clone())
    }
}

/// One store per id type. Each value type gets its own dense internal id space,
/// so ids of different types with the same external value don't collide.
#[derive(Default)]
pub(super) struct IdStore {
    stores: HashMap<TypeId, TypedIds>,
}

impl IdStore {
    pub(super) fn create(&mut self, type_id: TypeId, external: &str) -> Arc<UntypedId> {
        self.stores.entry(type_id).or_default().create(external)
    }

    pub(super) fn get(&self, type_id: TypeId, internal: u64) -> Arc<UntypedId> {
        self.stores
            .get(&type_id)
            .unwrap_or_else(|| panic!("No ids created for this type yet"))
            .get(internal)
    }

    pub(super) fn try_get_ext(&self, type_id: TypeId, external: &str) -> Option<Arc<UntypedId>> {
        self.stores
            .get(&type_id)
            .and_then(|store| store.try_get_ext(external))
    }
}
