//! Point cloud data structures and functionality

use crate::error::{Error, Result};
use crate::point::Point3f;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A named per-point scalar array, index-aligned with the owning cloud's points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    pub name: String,
    pub values: Vec<f32>,
}

impl ScalarField {
    /// Create a new named scalar field
    pub fn new(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Get the number of values in the field
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the field is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Minimum and maximum value, ignoring non-finite entries.
    ///
    /// Returns `None` when the field is empty or holds no finite values.
    pub fn range(&self) -> Option<(f32, f32)> {
        let mut bounds: Option<(f32, f32)> = None;
        for &v in &self.values {
            if !v.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(v), max.max(v)),
                None => (v, v),
            });
        }
        bounds
    }
}

/// An ordered set of 3D points with named per-point scalar fields.
///
/// Every attached field has exactly one value per point; `add_field` validates
/// the length against the point count at attach time, so fields are attached
/// after the coordinate list is final.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointCloud {
    pub points: Vec<Point3f>,
    fields: Vec<ScalarField>,
}

impl PointCloud {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            fields: Vec::new(),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<Point3f>) -> Self {
        Self {
            points,
            fields: Vec::new(),
        }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: Point3f) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, Point3f> {
        self.points.iter()
    }

    /// Attach a named scalar field to the cloud.
    ///
    /// Fails with `Error::InvalidData` if the value count does not match the
    /// point count. A field with an already-attached name replaces the old one.
    pub fn add_field(&mut self, field: ScalarField) -> Result<()> {
        if field.len() != self.len() {
            return Err(Error::InvalidData(format!(
                "field '{}' has {} values for {} points",
                field.name,
                field.len(),
                self.len()
            )));
        }
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
        Ok(())
    }

    /// Look up a scalar field by name
    pub fn field(&self, name: &str) -> Option<&ScalarField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All attached scalar fields, in attach order
    pub fn fields(&self) -> &[ScalarField] {
        &self.fields
    }

    /// Names of all attached scalar fields
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Axis-aligned bounding box of the cloud, `None` when empty
    pub fn bounds(&self) -> Option<(Point3f, Point3f)> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.points[1..] {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some((min, max))
    }
}

impl Index<usize> for PointCloud {
    type Output = Point3f;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3f;
    type IntoIter = std::slice::Iter<'a, Point3f>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<Point3f> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3f>>(iter: I) -> Self {
        Self::from_points(Vec::from_iter(iter))
    }
}
