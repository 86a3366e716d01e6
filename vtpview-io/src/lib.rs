//! Point-cloud file loading for vtpview
//!
//! This crate provides the dataset loader: VTK XML PolyData (`.vtp`) files
//! are parsed into `PointCloud` values carrying every named per-point scalar
//! field found in the file.

pub mod vtp;

pub use vtp::VtpReader;

use vtpview_core::{PointCloud, Result};

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<PointCloud>;
}

impl PointCloudReader for VtpReader {
    fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<PointCloud> {
        VtpReader::read_point_cloud(path)
    }
}

/// Auto-detect format and read point cloud
pub fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<PointCloud> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("vtp") => VtpReader::read_point_cloud(path),
        _ => Err(vtpview_core::Error::UnsupportedFormat(format!(
            "unsupported point cloud format: {:?}",
            path.extension()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use vtpview_core::{Error, VertexSet};

    const FOUR_POINTS: &str = r#"<?xml version="1.0"?>
<VTKFile type="PolyData" version="0.1" byte_order="LittleEndian">
  <PolyData>
    <Piece NumberOfPoints="4" NumberOfVerts="0">
      <PointData Scalars="rho">
        <DataArray type="Float32" Name="rho" format="ascii">
          1.0 2.0 3.0 4.0
        </DataArray>
        <DataArray type="Float32" Name="temp" format="ascii">
          10.0 20.0 30.0 40.0
        </DataArray>
      </PointData>
      <Points>
        <DataArray type="Float32" NumberOfComponents="3" format="ascii">
          0 0 0
          1 0 0
          0 1 0
          0 0 1
        </DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;

    #[test]
    fn test_read_points_and_fields() {
        let temp_file = "test_four_points.vtp";
        fs::write(temp_file, FOUR_POINTS).unwrap();

        let cloud = read_point_cloud(temp_file).unwrap();
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud[1], vtpview_core::Point3f::new(1.0, 0.0, 0.0));
        assert_eq!(cloud[3], vtpview_core::Point3f::new(0.0, 0.0, 1.0));
        assert_eq!(
            cloud.field_names().collect::<Vec<_>>(),
            vec!["rho", "temp"]
        );
        assert_eq!(cloud.field("rho").unwrap().values, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            cloud.field("temp").unwrap().values,
            vec![10.0, 20.0, 30.0, 40.0]
        );

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_load_then_glyph_then_bind() {
        let temp_file = "test_pipeline_stages.vtp";
        fs::write(temp_file, FOUR_POINTS).unwrap();

        let cloud = read_point_cloud(temp_file).unwrap();
        let mut set = VertexSet::from_cloud(&cloud);
        assert_eq!(set.vertex_count(), cloud.len());
        set.set_active_scalar("rho").unwrap();
        assert_eq!(set.active_scalar_name(), Some("rho"));

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_point_cloud("no_such_file.vtp");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = read_point_cloud("cloud.ply");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_malformed_xml() {
        let temp_file = "test_malformed.vtp";
        fs::write(temp_file, "<VTKFile type=\"PolyData\"><PolyData>").unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_not_vtk_xml() {
        let temp_file = "test_not_vtk.vtp";
        fs::write(temp_file, "<html><body>hello</body></html>").unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_wrong_dataset_type() {
        let temp_file = "test_wrong_type.vtp";
        let content = r#"<?xml version="1.0"?>
<VTKFile type="ImageData">
  <ImageData/>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_coordinate_count_mismatch() {
        let temp_file = "test_coord_mismatch.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="3">
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 0 0 1 1 1</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_field_length_mismatch() {
        let temp_file = "test_field_mismatch.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="2">
      <PointData>
        <DataArray Name="rho" format="ascii">1.0 2.0 3.0</DataArray>
      </PointData>
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 0 0 1 1 1</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_binary_format_rejected() {
        let temp_file = "test_binary.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="1">
      <Points>
        <DataArray NumberOfComponents="3" format="binary">AAAA</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_non_numeric_values_rejected() {
        let temp_file = "test_non_numeric.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="1">
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 zero 0</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_zero_points() {
        let temp_file = "test_zero_points.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="0">
      <Points>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let cloud = read_point_cloud(temp_file).unwrap();
        assert!(cloud.is_empty());
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_topology_sections_skipped() {
        let temp_file = "test_topology.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="2" NumberOfVerts="2">
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 0 0 1 1 1</DataArray>
      </Points>
      <Verts>
        <DataArray Name="connectivity" format="ascii">0 1</DataArray>
        <DataArray Name="offsets" format="ascii">1 2</DataArray>
      </Verts>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let cloud = read_point_cloud(temp_file).unwrap();
        assert_eq!(cloud.len(), 2);
        assert!(cloud.fields().is_empty());
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_non_scalar_point_data_skipped() {
        let temp_file = "test_vector_field.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="2">
      <PointData>
        <DataArray Name="velocity" NumberOfComponents="3" format="ascii">
          0 0 0 1 1 1
        </DataArray>
        <DataArray Name="rho" format="ascii">0.5 1.5</DataArray>
      </PointData>
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 0 0 1 1 1</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let cloud = read_point_cloud(temp_file).unwrap();
        assert!(cloud.field("velocity").is_none());
        assert_eq!(cloud.field("rho").unwrap().values, vec![0.5, 1.5]);
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_multi_piece_concatenation() {
        let temp_file = "test_multi_piece.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="2">
      <PointData>
        <DataArray Name="rho" format="ascii">1.0 2.0</DataArray>
      </PointData>
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 0 0 1 0 0</DataArray>
      </Points>
    </Piece>
    <Piece NumberOfPoints="1">
      <PointData>
        <DataArray Name="rho" format="ascii">3.0</DataArray>
      </PointData>
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 1 0</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let cloud = read_point_cloud(temp_file).unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.field("rho").unwrap().values, vec![1.0, 2.0, 3.0]);
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_multi_piece_field_mismatch() {
        let temp_file = "test_piece_mismatch.vtp";
        let content = r#"<VTKFile type="PolyData">
  <PolyData>
    <Piece NumberOfPoints="1">
      <PointData>
        <DataArray Name="rho" format="ascii">1.0</DataArray>
      </PointData>
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 0 0</DataArray>
      </Points>
    </Piece>
    <Piece NumberOfPoints="1">
      <PointData>
        <DataArray Name="temp" format="ascii">3.0</DataArray>
      </PointData>
      <Points>
        <DataArray NumberOfComponents="3" format="ascii">0 1 0</DataArray>
      </Points>
    </Piece>
  </PolyData>
</VTKFile>
"#;
        fs::write(temp_file, content).unwrap();
        let result = read_point_cloud(temp_file);
        assert!(matches!(result, Err(Error::Load(_))));
        let _ = fs::remove_file(temp_file);
    }
}
