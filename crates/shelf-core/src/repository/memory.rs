use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use shelf_model::{EntityId, ListingRequest, SortDirection, SortField};
use tracing::trace;

use super::{Entity, Repository, Slice};
use crate::error::CoreError;

/// In-memory storage.
///
/// Records are keyed by id in a `BTreeMap`, so id order is also iteration order.
/// Every operation takes the lock once, which makes each call atomic.
#[derive(Clone)]
pub struct MemoryStore<E> {
    inner: Arc<RwLock<StoreInner<E>>>,
}

struct StoreInner<E> {
    rows: BTreeMap<EntityId, E>,
    /// Next identity to hand out; never reused.
    next_id: EntityId,
}

impl<E: Entity> MemoryStore<E> {
    /// Create an empty store. Identities start at 1.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner<E>>, CoreError> {
        self.inner
            .read()
            .map_err(|_| CoreError::Storage(format!("{} store lock poisoned", E::RESOURCE)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner<E>>, CoreError> {
        self.inner
            .write()
            .map_err(|_| CoreError::Storage(format!("{} store lock poisoned", E::RESOURCE)))
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn compare<E: Entity>(a: &E, b: &E, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id().cmp(&b.id()),
        // ties fall back to id so pages never overlap
        SortField::Title => a.title().cmp(b.title()).then_with(|| a.id().cmp(&b.id())),
    }
}

impl<E: Entity> Repository<E> for MemoryStore<E> {
    /// Filters and total are computed inside a single read lock.
    /// `total` reflects the count *after* filtering, *before* pagination.
    fn find_page(&self, request: &ListingRequest) -> Result<Slice<E>, CoreError> {
        let inner = self.read()?;

        let mut filtered: Vec<&E> = match &request.filter {
            Some(filter) => inner.rows.values().filter(|row| row.matches(filter)).collect(),
            None => inner.rows.values().collect(),
        };

        // BTreeMap already yields ascending ids
        if request.sort_field != SortField::Id || request.sort_direction == SortDirection::Desc {
            filtered.sort_by(|a, b| {
                let ord = compare(*a, *b, request.sort_field);
                match request.sort_direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let total = filtered.len();
        let items = filtered
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .cloned()
            .collect();

        Ok(Slice { items, total })
    }

    fn find_by_id(&self, id: EntityId) -> Result<Option<E>, CoreError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn exists_by_id(&self, id: EntityId) -> Result<bool, CoreError> {
        Ok(self.read()?.rows.contains_key(&id))
    }

    fn save(&self, mut entity: E) -> Result<E, CoreError> {
        let mut inner = self.write()?;

        if let Some(key) = entity.unique_key()
            && let Some(holder) = inner
                .rows
                .values()
                .find(|row| row.id() != entity.id() && row.unique_key() == Some(key))
        {
            return Err(CoreError::Conflict(format!(
                "{} '{}' already exists (id {})",
                E::RESOURCE,
                key,
                holder.id().unwrap_or_default()
            )));
        }

        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = inner.next_id;
                entity.assign_id(id);
                id
            }
        };
        if id >= inner.next_id {
            inner.next_id = id + 1;
        }

        trace!(resource = E::RESOURCE, id, "record saved");
        inner.rows.insert(id, entity.clone());
        Ok(entity)
    }

    fn delete_by_id(&self, id: EntityId) -> Result<(), CoreError> {
        if self.write()?.rows.remove(&id).is_some() {
            trace!(resource = E::RESOURCE, id, "record deleted");
        }
        Ok(())
    }

    fn count(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_model::{Book, ListingFilter, Task, TaskStatus};
    use std::time::SystemTime;

    fn task(title: &str, status: TaskStatus) -> Task {
        Task {
            id: None,
            title: title.to_string(),
            description: None,
            status,
            creation_date: SystemTime::now(),
            conclusion_date: None,
        }
    }

    fn book(title: &str) -> Book {
        Book {
            id: None,
            title: title.to_string(),
            author: "Machado de Assis".to_string(),
            year_of_publication: 1899,
        }
    }

    fn titles(slice: &Slice<Task>) -> Vec<&str> {
        slice.items.iter().map(|t| t.title.as_str()).collect()
    }

    fn setup_query_store() -> MemoryStore<Task> {
        let store = MemoryStore::new();
        // 3 pending "Tarefa", 1 in progress "Tarefa", 1 done "Compra"
        store.save(task("Tarefa C", TaskStatus::Pending)).unwrap();
        store.save(task("Tarefa A", TaskStatus::InProgress)).unwrap();
        store.save(task("Compra", TaskStatus::Done)).unwrap();
        store.save(task("Tarefa B", TaskStatus::Pending)).unwrap();
        store.save(task("Tarefa D", TaskStatus::Pending)).unwrap();
        store
    }

    #[test]
    fn save_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.save(task("Tarefa 1", TaskStatus::Pending)).unwrap();
        let b = store.save(task("Tarefa 2", TaskStatus::Pending)).unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn save_with_id_replaces() {
        let store = MemoryStore::new();
        let mut saved = store.save(task("Tarefa 1", TaskStatus::Pending)).unwrap();
        saved.status = TaskStatus::Done;
        store.save(saved.clone()).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.find_by_id(1).unwrap(), Some(saved));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        store.save(task("Tarefa 1", TaskStatus::Pending)).unwrap();
        store.delete_by_id(1).unwrap();
        let next = store.save(task("Tarefa 2", TaskStatus::Pending)).unwrap();
        assert_eq!(next.id, Some(2));
    }

    #[test]
    fn delete_absent_is_noop() {
        let store: MemoryStore<Task> = MemoryStore::new();
        assert!(store.delete_by_id(99).is_ok());
        assert!(!store.exists_by_id(99).unwrap());
    }

    #[test]
    fn duplicate_unique_key_conflicts() {
        let store = MemoryStore::new();
        store.save(book("Dom Casmurro")).unwrap();
        let err = store.save(book("Dom Casmurro")).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn resaving_same_record_is_not_a_conflict() {
        let store = MemoryStore::new();
        let saved = store.save(book("Dom Casmurro")).unwrap();
        assert!(store.save(saved).is_ok());
    }

    #[test]
    fn query_no_filters_returns_all_in_id_order() {
        let store = setup_query_store();
        let slice = store.find_page(&ListingRequest::new().with_size(100)).unwrap();
        assert_eq!(slice.total, 5);
        assert_eq!(
            titles(&slice),
            vec!["Tarefa C", "Tarefa A", "Compra", "Tarefa B", "Tarefa D"]
        );
    }

    #[test]
    fn query_sorted_by_title() {
        let store = setup_query_store();
        let asc = store
            .find_page(&ListingRequest::new().with_sort(SortField::Title, SortDirection::Asc))
            .unwrap();
        assert_eq!(
            titles(&asc),
            vec!["Compra", "Tarefa A", "Tarefa B", "Tarefa C", "Tarefa D"]
        );

        let desc = store
            .find_page(&ListingRequest::new().with_sort(SortField::Title, SortDirection::Desc))
            .unwrap();
        assert_eq!(
            titles(&desc),
            vec!["Tarefa D", "Tarefa C", "Tarefa B", "Tarefa A", "Compra"]
        );
    }

    #[test]
    fn query_id_descending() {
        let store = setup_query_store();
        let slice = store
            .find_page(&ListingRequest::new().with_sort(SortField::Id, SortDirection::Desc))
            .unwrap();
        let ids: Vec<_> = slice.items.iter().map(|t| t.id.unwrap()).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn query_by_title_fragment() {
        let store = setup_query_store();
        let slice = store
            .find_page(&ListingRequest::new().with_filter(ListingFilter::TitleContains("Tarefa".into())))
            .unwrap();
        assert_eq!(slice.total, 4);
        assert!(slice.items.iter().all(|t| t.title.contains("Tarefa")));
    }

    #[test]
    fn query_by_title_fragment_other_case_matches_nothing() {
        let store = setup_query_store();
        let slice = store
            .find_page(&ListingRequest::new().with_filter(ListingFilter::TitleContains("tarefa".into())))
            .unwrap();
        assert_eq!(slice.total, 0);
        assert!(slice.items.is_empty());
    }

    #[test]
    fn query_by_status_only() {
        let store = setup_query_store();
        let slice = store
            .find_page(&ListingRequest::new().with_filter(ListingFilter::Status(TaskStatus::Pending)))
            .unwrap();
        assert_eq!(slice.total, 3);
        assert!(slice.items.iter().all(|t| t.status == TaskStatus::Pending));
    }

    #[test]
    fn query_pagination_window() {
        let store = setup_query_store();
        // 5 total, size 2, page 1 => items 3..4
        let slice = store
            .find_page(&ListingRequest::new().with_size(2).with_page(1))
            .unwrap();
        assert_eq!(slice.total, 5);
        assert_eq!(titles(&slice), vec!["Compra", "Tarefa B"]);
    }

    #[test]
    fn query_page_beyond_total() {
        let store = setup_query_store();
        let slice = store
            .find_page(&ListingRequest::new().with_size(2).with_page(50))
            .unwrap();
        assert_eq!(slice.total, 5);
        assert!(slice.items.is_empty());
    }

    #[test]
    fn query_last_partial_page() {
        let store = setup_query_store();
        let slice = store
            .find_page(&ListingRequest::new().with_size(2).with_page(2))
            .unwrap();
        assert_eq!(slice.total, 5);
        assert_eq!(titles(&slice), vec!["Tarefa D"]);
    }

    #[test]
    fn query_filter_with_pagination() {
        let store = setup_query_store();
        let slice = store
            .find_page(
                &ListingRequest::new()
                    .with_filter(ListingFilter::TitleContains("Tarefa".into()))
                    .with_sort(SortField::Title, SortDirection::Asc)
                    .with_size(3)
                    .with_page(1),
            )
            .unwrap();
        assert_eq!(slice.total, 4);
        assert_eq!(titles(&slice), vec!["Tarefa D"]);
    }
}
