//! Per-client tree hosting.
//!
//! Each connected client gets its own [`RTree`] wrapped in a session. The
//! registry maps session identifiers to sessions; a mutex per session
//! serializes mutations and reads on that tree while independent sessions
//! proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use geotree::{Entry, RTree, DEFAULT_MAX_ENTRIES};

use crate::errors::{SessionError, SessionResult};
use crate::geometry::Geometry;
use crate::projection::project_bbox;
use crate::snapshot::TreeSnapshot;

/// Receives structural dumps after every completed mutation.
pub trait TreeObserver: Send + Sync {
    /// Called with the session identifier and the fresh snapshot.
    fn on_snapshot(&self, session_id: &str, snapshot: &TreeSnapshot);
}

/// One client's spatial index plus its observers.
///
/// All feature geometry arrives in longitude/latitude degrees and is
/// projected into the unit square before it reaches the tree; snapshots
/// apply the inverse projection on the way out. Feature identifiers are
/// the indexed payloads, so removal works by identifier equality.
pub struct Session {
    id: String,
    tree: Mutex<RTree<String>>,
    observers: RwLock<Vec<Arc<dyn TreeObserver>>>,
}

impl Session {
    fn new(id: String, max_entries: usize) -> Self {
        Self {
            id,
            tree: Mutex::new(RTree::with_max_entries(max_entries)),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// This session's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of features currently indexed.
    pub fn len(&self) -> usize {
        self.tree.lock().len()
    }

    /// Whether the session indexes no features.
    pub fn is_empty(&self) -> bool {
        self.tree.lock().is_empty()
    }

    /// Registers an observer for this session's snapshots.
    pub fn add_observer(&self, observer: Arc<dyn TreeObserver>) {
        self.observers.write().push(observer);
    }

    /// Indexes a feature under the envelope of `geometry`.
    ///
    /// Produces and broadcasts a structural snapshot of the tree after the
    /// insert completes.
    pub fn insert_feature(
        &self,
        feature_id: impl Into<String>,
        geometry: &Geometry,
    ) -> SessionResult<TreeSnapshot> {
        let bbox = project_bbox(&geometry.bounding_box()?);
        let feature_id = feature_id.into();

        let snapshot = {
            let mut tree = self.tree.lock();
            tree.insert(feature_id.clone(), bbox)?;
            TreeSnapshot::capture(tree.root(), tree.len())
        };

        log::debug!("session {}: indexed feature {}", self.id, feature_id);
        self.publish(&snapshot);
        Ok(snapshot)
    }

    /// Bulk loads many features at once.
    pub fn load_features(
        &self,
        features: Vec<(String, Geometry)>,
    ) -> SessionResult<TreeSnapshot> {
        let mut entries = Vec::with_capacity(features.len());
        for (feature_id, geometry) in &features {
            let bbox = project_bbox(&geometry.bounding_box()?);
            entries.push(Entry::new(feature_id.clone(), bbox));
        }

        let count = entries.len();
        let snapshot = {
            let mut tree = self.tree.lock();
            tree.load(entries)?;
            TreeSnapshot::capture(tree.root(), tree.len())
        };

        log::debug!("session {}: bulk loaded {} features", self.id, count);
        self.publish(&snapshot);
        Ok(snapshot)
    }

    /// Removes the feature indexed under `feature_id` whose envelope was
    /// derived from `geometry`. A missing feature is a no-op; the snapshot
    /// is produced and broadcast either way.
    pub fn remove_feature(
        &self,
        feature_id: &str,
        geometry: &Geometry,
    ) -> SessionResult<TreeSnapshot> {
        let bbox = project_bbox(&geometry.bounding_box()?);

        let (removed, snapshot) = {
            let mut tree = self.tree.lock();
            let removed = tree.remove(&feature_id.to_string(), &bbox)?;
            (removed, TreeSnapshot::capture(tree.root(), tree.len()))
        };

        if removed {
            log::debug!("session {}: removed feature {}", self.id, feature_id);
        } else {
            log::debug!("session {}: no feature {} to remove", self.id, feature_id);
        }
        self.publish(&snapshot);
        Ok(snapshot)
    }

    /// Finds the identifiers of all features intersecting a window given in
    /// degrees.
    pub fn query_window(&self, window: &geotree::BoundingBox) -> SessionResult<Vec<String>> {
        let projected = project_bbox(window);
        let tree = self.tree.lock();
        let hits = tree.search(&projected)?;
        Ok(hits.into_iter().map(|entry| entry.payload.clone()).collect())
    }

    /// Finds the identifiers of all features intersecting the envelope of
    /// `geometry`.
    pub fn query(&self, geometry: &Geometry) -> SessionResult<Vec<String>> {
        self.query_window(&geometry.bounding_box()?)
    }

    /// Drops every feature and resets the tree.
    pub fn clear(&self) -> TreeSnapshot {
        let snapshot = {
            let mut tree = self.tree.lock();
            tree.clear();
            TreeSnapshot::capture(tree.root(), tree.len())
        };

        log::debug!("session {}: cleared", self.id);
        self.publish(&snapshot);
        snapshot
    }

    /// Captures the current structure without mutating anything.
    pub fn snapshot(&self) -> TreeSnapshot {
        let tree = self.tree.lock();
        TreeSnapshot::capture(tree.root(), tree.len())
    }

    fn publish(&self, snapshot: &TreeSnapshot) {
        for observer in self.observers.read().iter() {
            observer.on_snapshot(&self.id, snapshot);
        }
    }
}

/// Maps session identifiers to live sessions.
///
/// Sessions are created on demand and removed when a client disconnects.
/// The registry itself is safe to share across threads; per-tree exclusion
/// is the session's mutex.
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Session>>,
    max_entries: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Creates a registry whose trees use the default fan-out.
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a registry whose trees use a custom fan-out.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_entries,
        }
    }

    /// Creates a session under a fresh UUID identifier.
    pub fn create_session(&self) -> Arc<Session> {
        let id = uuid::Uuid::new_v4().to_string();
        self.open_session(id)
    }

    /// Returns the session registered under `id`, creating it if needed.
    pub fn open_session(&self, id: impl Into<String>) -> Arc<Session> {
        let id = id.into();
        self.sessions
            .entry(id.clone())
            .or_insert_with(|| {
                log::debug!("registering session {}", id);
                Arc::new(Session::new(id.clone(), self.max_entries))
            })
            .clone()
    }

    /// Looks up an existing session.
    pub fn session(&self, id: &str) -> SessionResult<Arc<Session>> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))
    }

    /// Drops the session registered under `id`; its tree is freed once the
    /// last handle goes away.
    pub fn remove_session(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            log::debug!("dropped session {}", id);
        }
        removed
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
