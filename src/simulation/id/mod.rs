use std::any::TypeId;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::simulation::id::id_store::{IdStore, UntypedId};

// keep this private, as we don't want to leak how we cache ids.
mod id_store;

/// A reference counted pointer to an interned id. It can be used in hash
/// maps/sets in combination with NoHashHasher, to achieve fast look ups with no
/// randomness involved.
///
/// As this type wraps Arc<UntypedId>, using clone produces a new Arc pointer to
/// the actual id and is the intended way of passing around ids.
///
/// The type parameter only serves as a marker, so that ids of different domain
/// types don't mix even when their external representation is equal.
pub struct Id<T> {
    _type_marker: PhantomData<T>,
    id: Arc<UntypedId>,
}

impl<T: 'static> Id<T> {
    fn new(untyped_id: Arc<UntypedId>) -> Self {
        Self {
            _type_marker: PhantomData,
            id: untyped_id,
        }
    }

    pub fn internal(&self) -> u64 {
        self.id.internal
    }

    pub fn external(&self) -> &str {
        &self.id.external
    }

    pub fn create(id: &str) -> Self {
        ID_STORE.with(|store| Self::new(store.borrow_mut().create(TypeId::of::<T>(), id)))
    }

    pub fn get(internal: u64) -> Self {
        ID_STORE.with(|store| Self::new(store.borrow().get(TypeId::of::<T>(), internal)))
    }

    pub fn get_from_ext(external: &str) -> Self {
        Self::try_get_from_ext(external)
            .unwrap_or_else(|| panic!("No id found for external id {external}"))
    }

    pub fn try_get_from_ext(external: &str) -> Option<Self> {
        ID_STORE.with(|store| {
            store
                .borrow()
                .try_get_ext(TypeId::of::<T>(), external)
                .map(Self::new)
        })
    }
}

/// Mark Id as enabled for the nohash_hasher::NoHashHasher
impl<T> nohash_hasher::IsEnabled for Id<T> {}
impl<T> nohash_hasher::IsEnabled for &Id<T> {}

/// PartialEq, Eq, PartialOrd, Ord and Hash all rely on the internal id, so
/// that ids can be used in hash maps and ordered collections.
impl<T: 'static> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.internal().eq(&other.internal())
    }
}

impl<T: 'static> Eq for Id<T> {}

impl<T: 'static> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // use write u64 directly, so that we can use NoHashHasher with ids
        state.write_u64(self.internal());
    }
}

impl<T: 'static> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.internal().cmp(&other.internal())
    }
}

impl<T: 'static> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: 'static> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.external())
    }
}

impl<T: 'static> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({})", self.external())
    }
}

/// This creates a new struct with a cloned Arc pointer
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            _type_marker: PhantomData,
            id: self.id.clone(),
        }
    }
}

thread_local! {static ID_STORE: RefCell<IdStore> = RefCell::new(IdStore::default())}
