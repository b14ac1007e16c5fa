//! # GeoTree Session - Hosting Layer for GeoTree
//!
//! This crate hosts [`geotree`] indexes for connected clients. It owns the
//! boundary concerns the core index deliberately stays out of:
//!
//! - **Typed Geometry**: Point / Polygon / GeometryCollection extraction to
//!   envelopes, with longitude/latitude validation
//! - **Unit-Square Projection**: `u = x/360 + 0.5`, `v = y/180 + 0.5`, so
//!   every session tree lives in `[0, 1]²`
//! - **Session Registry**: one tree per client keyed by session id, a mutex
//!   per session serializing access
//! - **Snapshot Broadcast**: a structural dump after every mutation,
//!   delivered to registered observers and serializable as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use geotree_session::{Geometry, SessionRegistry};
//!
//! # fn main() -> Result<(), geotree_session::SessionError> {
//! let registry = SessionRegistry::new();
//! let session = registry.open_session("viewer-1");
//!
//! session.insert_feature("central-park", &Geometry::point(-73.97, 40.78))?;
//!
//! let window = geotree::BoundingBox::new(-74.5, 40.0, -73.5, 41.0);
//! let hits = session.query_window(&window)?;
//! assert_eq!(hits, vec!["central-park".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod geometry;
pub mod projection;
pub mod session;
pub mod snapshot;

pub use errors::{SessionError, SessionResult};
pub use geometry::{Coordinate, Geometry};
pub use projection::{project, project_bbox, unproject, unproject_bbox};
pub use session::{Session, SessionRegistry, TreeObserver};
pub use snapshot::{NodeSnapshot, TreeSnapshot};
