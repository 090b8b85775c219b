//! In-memory tables with per-session staged changes.
//!
//! Committed rows live in shared tables. Each session stages inserts and
//! deletes privately and applies them in order when saved. Unique keys are
//! checked eagerly against committed rows on `add`, and again on `save`, so a
//! staged-but-uncommitted removal does not free its key. Each table indexes
//! its rows by unique key; `save` checks the whole batch before applying it
//! in place.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use super::{CompensationStore, EmployeeStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{Compensation, Employee};

/// Options for a new [`Database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// Reject a second compensation row for the same employee.
    pub unique_employee_index: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            unique_employee_index: true,
        }
    }
}

/// Shared in-memory tables for employees and compensation.
///
/// Cloning is cheap; clones share the same tables. Open a session per
/// logical request with [`Database::employees`] and
/// [`Database::compensation`].
///
/// # Example
///
/// ```
/// use employee_directory::models::Employee;
/// use employee_directory::store::{Database, EmployeeStore};
///
/// let db = Database::new();
/// let session = db.employees();
/// let added = session.add(Employee {
///     id: String::new(),
///     first_name: "Debbie".to_string(),
///     last_name: "Downer".to_string(),
///     department: "Complaints".to_string(),
///     position: "Receiver".to_string(),
///     direct_reports: vec![],
/// })?;
/// session.save()?;
///
/// assert!(!added.id.is_empty());
/// assert!(db.employees().get_by_id(&added.id)?.is_some());
/// # Ok::<(), employee_directory::error::StoreError>(())
/// ```
#[derive(Clone)]
pub struct Database {
    employees: Arc<Mutex<Table<Employee>>>,
    compensation: Arc<Mutex<Table<Compensation>>>,
}

impl Database {
    /// Creates an empty database with default options.
    pub fn new() -> Self {
        Self::with_options(DatabaseOptions::default())
    }

    /// Creates an empty database with the given options.
    pub fn with_options(options: DatabaseOptions) -> Self {
        Self {
            employees: Arc::new(Mutex::new(Table::new(false))),
            compensation: Arc::new(Mutex::new(Table::new(options.unique_employee_index))),
        }
    }

    /// Opens a new employee session.
    pub fn employees(&self) -> EmployeeSession {
        EmployeeSession {
            inner: Session::new(self.employees.clone()),
        }
    }

    /// Opens a new compensation session.
    pub fn compensation(&self) -> CompensationSession {
        CompensationSession {
            inner: Session::new(self.compensation.clone()),
        }
    }

    /// Number of committed employee rows.
    pub fn employee_count(&self) -> StoreResult<usize> {
        Ok(lock(&self.employees, Employee::TABLE)?.rows.len())
    }

    /// Number of committed compensation rows.
    pub fn compensation_count(&self) -> StoreResult<usize> {
        Ok(lock(&self.compensation, Compensation::TABLE)?.rows.len())
    }

    /// Every committed compensation row for an employee.
    ///
    /// More than one row means the one-current-record invariant was broken,
    /// which only happens with the unique employee index disabled.
    pub fn compensation_rows_for(&self, employee_id: &str) -> StoreResult<Vec<Compensation>> {
        let table = lock(&self.compensation, Compensation::TABLE)?;
        Ok(table.rows_for(employee_id).cloned().collect())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of work over the employee table.
pub struct EmployeeSession {
    inner: Session<Employee>,
}

impl EmployeeStore for EmployeeSession {
    fn get_by_id(&self, id: &str) -> StoreResult<Option<Employee>> {
        self.inner.get(id)
    }

    fn add(&self, employee: Employee) -> StoreResult<Employee> {
        self.inner.add(employee)
    }

    fn remove(&self, employee: &Employee) -> StoreResult<Employee> {
        self.inner.remove(&employee.id)
    }

    fn save(&self) -> StoreResult<()> {
        self.inner.save()
    }
}

/// A unit of work over the compensation table.
pub struct CompensationSession {
    inner: Session<Compensation>,
}

impl CompensationStore for CompensationSession {
    fn add(&self, compensation: Compensation) -> StoreResult<Compensation> {
        self.inner.add(compensation.detached())
    }

    fn get_by_employee_id(&self, employee_id: &str) -> StoreResult<Option<Compensation>> {
        self.inner.find_by_key(employee_id)
    }

    fn remove(&self, compensation: &Compensation) -> StoreResult<Compensation> {
        self.inner.remove(&compensation.id)
    }

    fn save(&self) -> StoreResult<()> {
        self.inner.save()
    }
}

trait Row: Clone {
    const TABLE: &'static str;

    fn id(&self) -> &str;

    fn assign_id(&mut self, id: String);

    /// Secondary key covered by the table's optional unique index.
    fn unique_key(&self) -> Option<&str>;
}

impl Row for Employee {
    const TABLE: &'static str = "employees";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Row for Compensation {
    const TABLE: &'static str = "compensation";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.employee_id)
    }
}

struct Table<T> {
    rows: BTreeMap<String, T>,
    /// Unique key to the ids of the rows carrying it.
    by_key: HashMap<String, BTreeSet<String>>,
    unique_index: bool,
}

impl<T: Row> Table<T> {
    fn new(unique_index: bool) -> Self {
        Self {
            rows: BTreeMap::new(),
            by_key: HashMap::new(),
            unique_index,
        }
    }

    fn ids_for<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a String> + 'a {
        self.by_key.get(key).into_iter().flatten()
    }

    fn rows_for<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a T> + 'a {
        self.ids_for(key).filter_map(move |id| self.rows.get(id))
    }

    /// Returns the conflicting key if `row` cannot join the committed rows.
    fn conflict(&self, row: &T) -> Option<String> {
        if self.rows.contains_key(row.id()) {
            return Some(row.id().to_string());
        }
        let key = self.indexed_key(row)?;
        self.by_key.contains_key(key).then(|| key.to_string())
    }

    fn indexed_key<'a>(&self, row: &'a T) -> Option<&'a str> {
        if self.unique_index { row.unique_key() } else { None }
    }

    fn insert(&mut self, row: T) {
        if let Some(key) = row.unique_key() {
            self.by_key
                .entry(key.to_string())
                .or_default()
                .insert(row.id().to_string());
        }
        self.rows.insert(row.id().to_string(), row);
    }

    fn delete(&mut self, id: &str) -> Option<T> {
        let row = self.rows.remove(id)?;
        if let Some(key) = row.unique_key() {
            if let Some(ids) = self.by_key.get_mut(key) {
                ids.remove(id);
                if ids.is_empty() {
                    self.by_key.remove(key);
                }
            }
        }
        Some(row)
    }

    /// Replays `pending` against the committed rows without touching them.
    fn check(&self, pending: &[Change<T>]) -> StoreResult<()> {
        let mut inserted: HashMap<&str, &T> = HashMap::new();
        let mut deleted: HashSet<&str> = HashSet::new();
        let exists = |inserted: &HashMap<&str, &T>, deleted: &HashSet<&str>, id: &str| {
            inserted.contains_key(id) || (self.rows.contains_key(id) && !deleted.contains(id))
        };

        for change in pending {
            match change {
                Change::Insert(row) => {
                    if exists(&inserted, &deleted, row.id()) {
                        return Err(StoreError::UniqueViolation {
                            table: T::TABLE,
                            key: row.id().to_string(),
                        });
                    }
                    if let Some(key) = self.indexed_key(row) {
                        let staged = inserted.values().any(|other| other.unique_key() == Some(key));
                        let committed = self
                            .ids_for(key)
                            .any(|id| !deleted.contains(id.as_str()) && !inserted.contains_key(id.as_str()));
                        if staged || committed {
                            return Err(StoreError::UniqueViolation {
                                table: T::TABLE,
                                key: key.to_string(),
                            });
                        }
                    }
                    inserted.insert(row.id(), row);
                }
                Change::Delete(id) => {
                    if !exists(&inserted, &deleted, id) {
                        return Err(StoreError::MissingRecord {
                            table: T::TABLE,
                            id: id.clone(),
                        });
                    }
                    if inserted.remove(id.as_str()).is_none() {
                        deleted.insert(id.as_str());
                    }
                }
            }
        }
        Ok(())
    }
}

enum Change<T> {
    Insert(T),
    Delete(String),
}

/// Staged inserts still live after every later staged change, newest first,
/// and the ids whose committed rows the staged changes shadow.
fn staged_view<T: Row>(pending: &[Change<T>]) -> (Vec<&T>, HashSet<&str>) {
    let mut live = Vec::new();
    let mut shadowed: HashSet<&str> = HashSet::new();
    for change in pending.iter().rev() {
        match change {
            Change::Insert(row) => {
                if shadowed.insert(row.id()) {
                    live.push(row);
                }
            }
            Change::Delete(id) => {
                shadowed.insert(id.as_str());
            }
        }
    }
    (live, shadowed)
}

struct Session<T> {
    table: Arc<Mutex<Table<T>>>,
    pending: Mutex<Vec<Change<T>>>,
}

impl<T: Row> Session<T> {
    fn new(table: Arc<Mutex<Table<T>>>) -> Self {
        Self {
            table,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let table = lock(&self.table, T::TABLE)?;
        let pending = lock(&self.pending, T::TABLE)?;
        Ok(visible(&table, &pending, id))
    }

    /// First visible row carrying unique key `key`, staged rows first.
    fn find_by_key(&self, key: &str) -> StoreResult<Option<T>> {
        let table = lock(&self.table, T::TABLE)?;
        let pending = lock(&self.pending, T::TABLE)?;
        let (live, shadowed) = staged_view(&pending);

        if let Some(row) = live.into_iter().find(|row| row.unique_key() == Some(key)) {
            return Ok(Some(row.clone()));
        }
        Ok(table
            .rows_for(key)
            .find(|row| !shadowed.contains(row.id()))
            .cloned())
    }

    fn add(&self, mut row: T) -> StoreResult<T> {
        if row.id().is_empty() {
            row.assign_id(Uuid::new_v4().to_string());
        }

        let table = lock(&self.table, T::TABLE)?;
        let mut pending = lock(&self.pending, T::TABLE)?;

        // Committed rows count even when a staged delete hides them; staged
        // inserts count only while no later staged delete removes them.
        let key = table.indexed_key(&row);
        let (live, _) = staged_view(&pending);
        let staged_conflict = live
            .iter()
            .any(|staged| staged.id() == row.id() || (key.is_some() && staged.unique_key() == key));
        let conflict = table
            .conflict(&row)
            .or_else(|| staged_conflict.then(|| key.unwrap_or(row.id()).to_string()));
        if let Some(key) = conflict {
            return Err(StoreError::UniqueViolation {
                table: T::TABLE,
                key,
            });
        }

        pending.push(Change::Insert(row.clone()));
        Ok(row)
    }

    fn remove(&self, id: &str) -> StoreResult<T> {
        let table = lock(&self.table, T::TABLE)?;
        let mut pending = lock(&self.pending, T::TABLE)?;

        let row = visible(&table, &pending, id).ok_or_else(|| StoreError::MissingRecord {
            table: T::TABLE,
            id: id.to_string(),
        })?;
        pending.push(Change::Delete(id.to_string()));
        Ok(row)
    }

    fn save(&self) -> StoreResult<()> {
        let mut table = lock(&self.table, T::TABLE)?;
        let mut pending = lock(&self.pending, T::TABLE)?;
        if pending.is_empty() {
            return Ok(());
        }

        // A failed check leaves both the table and the staged changes as they were.
        table.check(&pending)?;

        let changes = pending.len();
        for change in pending.drain(..) {
            match change {
                Change::Insert(row) => table.insert(row),
                Change::Delete(id) => {
                    table.delete(&id);
                }
            }
        }

        debug!(table = T::TABLE, changes, "committed staged changes");
        Ok(())
    }
}

fn visible<T: Row>(table: &Table<T>, pending: &[Change<T>], id: &str) -> Option<T> {
    for change in pending.iter().rev() {
        match change {
            Change::Insert(row) if row.id() == id => return Some(row.clone()),
            Change::Delete(deleted) if deleted == id => return None,
            _ => {}
        }
    }
    table.rows.get(id).cloned()
}

fn lock<'a, X>(mutex: &'a Mutex<X>, table: &'static str) -> StoreResult<MutexGuard<'a, X>> {
    mutex.lock().map_err(|_| StoreError::Poisoned { table })
}
