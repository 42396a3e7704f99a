// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser and field-path flattener integration tests.
//!
//! The sample definition mirrors what MCAP stores for a ROS1
//! sensor_msgs/PointCloud2 channel: root fields first, then one
//! `MSG:`-headed section per referenced type.

use robosplit::schema::{
    message_paths, parse_root_fields, parse_schema_sections, FieldKind, FieldPath,
};

const POINT_CLOUD_DEFINITION: &str = r#"
# This message holds a collection of N-dimensional points, which may
# contain additional information such as normals, intensity, etc. The
# point data is stored as a binary blob, its layout described by the
# contents of the "fields" array.

# Time of sensor data acquisition, and the coordinate frame ID (for 3d
# points).
Header header

# 2D structure of the point cloud. If the cloud is unordered, height is
# 1 and width is the length of the point cloud.
uint32 height
uint32 width

# Describes the channels and their layout in the binary data blob.
PointField[] fields

bool    is_bigendian # Is this data bigendian?
uint32  point_step   # Length of a point in bytes
uint32  row_step     # Length of a row in bytes
uint8[] data         # Actual point data, size is (row_step*height)

bool is_dense        # True if there are no invalid points

================================================================================
MSG: std_msgs/Header
# Standard metadata for higher-level stamped data types.
# This is generally used to communicate timestamped data
# in a particular coordinate frame.
#
# sequence ID: consecutively increasing ID
uint32 seq
#Two-integer timestamp that is expressed as:
# * stamp.sec: seconds (stamp_secs) since epoch (in Python the variable is called 'secs')
# * stamp.nsec: nanoseconds since stamp_secs (in Python the variable is called 'nsecs')
# time-handling sugar is provided by the client library
time stamp
#Frame this data is associated with
string frame_id

================================================================================
MSG: sensor_msgs/PointField
# This message holds the description of one point entry in the
# PointCloud2 message format.
uint8 INT8    = 1
uint8 UINT8   = 2
uint8 INT16   = 3
uint8 UINT16  = 4
uint8 INT32   = 5
uint8 UINT32  = 6
uint8 FLOAT32 = 7
uint8 FLOAT64 = 8

string name      # Name of field
uint32 offset    # Offset from start of point struct
uint8  datatype  # Datatype enumeration, see above
uint32 count     # How many elements in the field

other_nested_message_type[] test_nested_message_type

================================================================================
MSG: sensor_msgs/other_nested_message_type
# This message holds another entry
string name
"#;

fn path_type<'a>(paths: &'a [FieldPath], path: &str) -> Option<&'a str> {
    paths
        .iter()
        .find(|p| p.path == path)
        .map(|p| p.ty.as_str())
}

#[test]
fn test_one_schema_entry_per_msg_section() {
    let set = parse_schema_sections(POINT_CLOUD_DEFINITION);
    assert_eq!(set.schema_count(), 3);
    assert!(set.table("Header").is_some());
    assert!(set.table("PointField").is_some());
    assert!(set.table("other_nested_message_type").is_some());
}

#[test]
fn test_header_section_fields() {
    let set = parse_schema_sections(POINT_CLOUD_DEFINITION);
    let header = set.table("Header").unwrap();
    assert_eq!(header.len(), 3);
    assert_eq!(header.get("seq"), Some("uint32"));
    assert_eq!(header.get("stamp"), Some("time"));
    assert_eq!(header.get("frame_id"), Some("string"));
}

#[test]
fn test_point_field_section_captures_constants_as_fields() {
    let set = parse_schema_sections(POINT_CLOUD_DEFINITION);
    let point_field = set.table("PointField").unwrap();
    // 8 constants + 4 fields + the nested array field
    assert_eq!(point_field.len(), 13);
    assert_eq!(point_field.get("INT8"), Some("uint8"));
    assert_eq!(point_field.get("FLOAT64"), Some("uint8"));
    assert_eq!(point_field.get("datatype"), Some("uint8"));
    assert_eq!(
        point_field.get("test_nested_message_type"),
        Some("other_nested_message_type[]")
    );
}

#[test]
fn test_qualified_name_lookup() {
    let set = parse_schema_sections(POINT_CLOUD_DEFINITION);
    assert_eq!(set.qualified("Header"), Some("std_msgs/Header"));
    assert_eq!(set.qualified("PointField"), Some("sensor_msgs/PointField"));
    assert_eq!(
        set.qualified("other_nested_message_type"),
        Some("sensor_msgs/other_nested_message_type")
    );
}

#[test]
fn test_root_fields_in_declaration_order() {
    let root = parse_root_fields(POINT_CLOUD_DEFINITION);
    let names: Vec<&str> = root.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "header",
            "height",
            "width",
            "fields",
            "is_bigendian",
            "point_step",
            "row_step",
            "data",
            "is_dense",
        ]
    );
}

#[test]
fn test_nested_array_field_resolves_to_qualified_type() {
    let paths = message_paths(POINT_CLOUD_DEFINITION);
    assert_eq!(
        path_type(&paths, "fields.test_nested_message_type"),
        Some("sensor_msgs/other_nested_message_type[]")
    );
}

#[test]
fn test_root_array_of_nested_type_resolves_to_qualified_type() {
    let paths = message_paths(POINT_CLOUD_DEFINITION);
    assert_eq!(path_type(&paths, "fields"), Some("sensor_msgs/PointField[]"));
    assert_eq!(path_type(&paths, "header"), Some("std_msgs/Header"));
}

#[test]
fn test_time_field_expands_through_nested_schema() {
    let paths = message_paths(POINT_CLOUD_DEFINITION);
    assert_eq!(path_type(&paths, "header.stamp"), Some("time"));
    assert_eq!(path_type(&paths, "header.stamp.secs"), Some("uint32"));
    assert_eq!(path_type(&paths, "header.stamp.nsecs"), Some("uint32"));
}

#[test]
fn test_primitive_array_gets_element_marker() {
    let paths = message_paths(POINT_CLOUD_DEFINITION);
    assert_eq!(path_type(&paths, "data"), Some("uint8[]"));
    assert_eq!(path_type(&paths, "data.[*]"), Some("uint8"));
}

#[test]
fn test_nested_recursion_reaches_innermost_leaf() {
    let paths = message_paths(POINT_CLOUD_DEFINITION);
    assert_eq!(
        path_type(&paths, "fields.test_nested_message_type.name"),
        Some("string")
    );
}

#[test]
fn test_paths_are_depth_first_preorder() {
    let paths = message_paths(POINT_CLOUD_DEFINITION);
    let order: Vec<&str> = paths.iter().map(|p| p.path.as_str()).collect();

    let header = order.iter().position(|p| *p == "header").unwrap();
    let header_seq = order.iter().position(|p| *p == "header.seq").unwrap();
    let height = order.iter().position(|p| *p == "height").unwrap();
    let fields = order.iter().position(|p| *p == "fields").unwrap();
    let nested_name = order
        .iter()
        .position(|p| *p == "fields.test_nested_message_type.name")
        .unwrap();

    assert!(header < header_seq);
    assert!(header_seq < height);
    assert!(height < fields);
    assert!(fields < nested_name);
}

#[test]
fn test_field_kinds_for_metadata_registration() {
    let paths = message_paths(POINT_CLOUD_DEFINITION);

    let kind_of = |path: &str| {
        paths
            .iter()
            .find(|p| p.path == path)
            .map(|p| p.kind())
            .unwrap()
    };

    assert_eq!(kind_of("height"), FieldKind::Number);
    assert_eq!(kind_of("is_dense"), FieldKind::Number);
    assert_eq!(kind_of("header"), FieldKind::Object);
    assert_eq!(kind_of("header.frame_id"), FieldKind::String);
    assert_eq!(kind_of("fields"), FieldKind::Array);
    assert_eq!(kind_of("data"), FieldKind::Array);
    assert_eq!(kind_of("data.[*]"), FieldKind::Number);
}

#[test]
fn test_definition_without_sections_flattens_root_only() {
    let paths = message_paths("uint32 height\nuint32 width");
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].path, "height");
    assert_eq!(paths[0].ty, "uint32");
}
