//! Vertex primitive generation and the active scalar binding

use crate::error::{Error, Result};
use crate::point::Point3f;
use crate::point_cloud::{PointCloud, ScalarField};

/// A point cloud lifted to drawable vertex primitives, one per point.
///
/// The set borrows the source cloud; coordinates and field arrays are shared,
/// not copied. The vertex list is an explicit per-point primitive declaration
/// in point order, so `vertex_count()` always equals the cloud's point count.
#[derive(Debug, Clone)]
pub struct VertexSet<'a> {
    cloud: &'a PointCloud,
    verts: Vec<u32>,
    active_scalar: Option<usize>,
}

impl<'a> VertexSet<'a> {
    /// Generate one vertex primitive per point of the cloud.
    ///
    /// Any topology the source dataset may have carried is irrelevant here:
    /// only the points themselves are lifted to primitives. An empty cloud
    /// yields an empty vertex set.
    pub fn from_cloud(cloud: &'a PointCloud) -> Self {
        let verts = (0..cloud.len() as u32).collect();
        log::debug!("generated {} vertex primitives", cloud.len());
        Self {
            cloud,
            verts,
            active_scalar: None,
        }
    }

    /// The source point cloud
    pub fn cloud(&self) -> &PointCloud {
        self.cloud
    }

    /// Number of vertex primitives
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    /// Check if the set has no primitives
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Point indices of the vertex primitives, in draw order
    pub fn vertices(&self) -> &[u32] {
        &self.verts
    }

    /// Position of the `i`-th vertex primitive
    pub fn position(&self, i: usize) -> &Point3f {
        &self.cloud.points[self.verts[i] as usize]
    }

    /// Bind the named field as the active scalar for color mapping.
    ///
    /// Replaces any prior binding. Fails with `Error::FieldNotFound` if no
    /// field of that name exists, in which case the prior binding is kept.
    pub fn set_active_scalar(&mut self, name: &str) -> Result<()> {
        match self.cloud.fields().iter().position(|f| f.name == name) {
            Some(index) => {
                self.active_scalar = Some(index);
                log::debug!("active scalar bound to '{}'", name);
                Ok(())
            }
            None => Err(Error::FieldNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// The currently bound scalar field, if any
    pub fn active_scalar(&self) -> Option<&ScalarField> {
        self.active_scalar.map(|i| &self.cloud.fields()[i])
    }

    /// Name of the currently bound scalar field, if any
    pub fn active_scalar_name(&self) -> Option<&str> {
        self.active_scalar().map(|f| f.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cloud() -> PointCloud {
        let mut cloud = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
        ]);
        cloud
            .add_field(ScalarField::new("rho", vec![1.0, 2.0, 3.0, 4.0]))
            .unwrap();
        cloud
    }

    #[test]
    fn test_one_primitive_per_point() {
        let cloud = sample_cloud();
        let set = VertexSet::from_cloud(&cloud);
        assert_eq!(set.vertex_count(), cloud.len());
        assert_eq!(set.vertices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_cloud_yields_empty_set() {
        let cloud = PointCloud::new();
        let set = VertexSet::from_cloud(&cloud);
        assert_eq!(set.vertex_count(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let cloud = sample_cloud();
        let first = VertexSet::from_cloud(&cloud);
        let second = VertexSet::from_cloud(&cloud);
        assert_eq!(first.vertex_count(), second.vertex_count());
        assert_eq!(first.vertices(), second.vertices());
        assert_eq!(first.cloud().fields(), second.cloud().fields());
    }

    #[test]
    fn test_positions_preserve_order() {
        let cloud = sample_cloud();
        let set = VertexSet::from_cloud(&cloud);
        for i in 0..set.vertex_count() {
            assert_eq!(set.position(i), &cloud.points[i]);
        }
    }

    #[test]
    fn test_bind_present_field() {
        let cloud = sample_cloud();
        let mut set = VertexSet::from_cloud(&cloud);
        assert!(set.set_active_scalar("rho").is_ok());
        assert_eq!(set.active_scalar_name(), Some("rho"));
        assert_eq!(set.active_scalar().unwrap().values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_bind_absent_field_fails() {
        let cloud = sample_cloud();
        let mut set = VertexSet::from_cloud(&cloud);
        let err = set.set_active_scalar("pressure").unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { name } if name == "pressure"));
        assert!(set.active_scalar().is_none());
    }

    #[test]
    fn test_failed_bind_keeps_prior_binding() {
        let cloud = sample_cloud();
        let mut set = VertexSet::from_cloud(&cloud);
        set.set_active_scalar("rho").unwrap();
        assert!(set.set_active_scalar("pressure").is_err());
        assert_eq!(set.active_scalar_name(), Some("rho"));
    }

    #[test]
    fn test_rebind_replaces_binding() {
        let mut cloud = sample_cloud();
        cloud
            .add_field(ScalarField::new("temp", vec![0.0, 0.0, 0.0, 0.0]))
            .unwrap();
        let mut set = VertexSet::from_cloud(&cloud);
        set.set_active_scalar("rho").unwrap();
        set.set_active_scalar("temp").unwrap();
        assert_eq!(set.active_scalar_name(), Some("temp"));
    }
}
