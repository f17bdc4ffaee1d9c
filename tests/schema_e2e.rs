use std::path::{Path, PathBuf};

use vss2graphql_schema::emit::render_schema;
use vss2graphql_schema::filter::{self, TreeFilter};
use vss2graphql_schema::generators::assemble_schema;
use vss2graphql_schema::layer::Layer;
use vss2graphql_schema::options::GenerationOptions;
use vss2graphql_schema::vss;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const SPEED_VSPEC: &str = r#"
Vehicle:
  type: branch
  description: High-level vehicle data.
  children:
    Speed:
      type: sensor
      datatype: float
      description: Vehicle speed.
      unit: km/h
      min: 0
      max: 300
"#;

fn generate(vspec: &str, options: &GenerationOptions, layer_yaml: Option<&str>) -> String {
    let dir = tempfile::tempdir().unwrap();
    let vspec_path = write_file(dir.path(), "root.vspec", vspec);
    let roots = vss::load_tree(&vspec_path, &[]).unwrap();

    let layer = layer_yaml.map(|yaml| {
        let path = write_file(dir.path(), "layer.depl", yaml);
        Layer::from_file(&path).unwrap()
    });

    let mut tree_filter = TreeFilter::new();
    if let Some(layer) = &layer {
        tree_filter.add(filter::layer_membership(layer));
    }
    let roots = tree_filter.filter_forest(roots);
    for root in &roots {
        vss::sort_children(root);
    }
    render_schema(&assemble_schema(&roots, options, layer.as_ref()))
}

#[test]
fn sensor_only_tree_yields_query_and_type_but_no_mutation() {
    let schema = generate(SPEED_VSPEC, &GenerationOptions::default(), None);

    assert!(schema.contains("# QUERY"));
    assert!(schema.contains("type Query {\n    vehicle: Vehicle\n}"));
    assert!(schema.contains("type Subscription {\n    vehicle: Vehicle\n}"));
    assert!(schema.contains("type Vehicle {"));
    assert!(schema.contains("    speed: Float\n"));
    // Section banners are always present; blocks only when populated.
    assert!(schema.contains("# MUTATION"));
    assert!(!schema.contains("type Mutation"));
    assert!(!schema.contains("input "));
    assert!(!schema.contains("directive @"));
}

#[test]
fn field_docstring_carries_description_unit_and_bounds() {
    let schema = generate(SPEED_VSPEC, &GenerationOptions::default(), None);
    assert!(schema.contains(
        "    \"\"\"\n    Vehicle speed.\n    @unit: km/h\n    @min: 0\n    @max: 300\n    \"\"\"\n    speed: Float\n"
    ));
}

#[test]
fn range_and_permission_directives_render_in_order() {
    let options = GenerationOptions {
        range_directive: true,
        permission_directive: true,
        ..GenerationOptions::default()
    };
    let schema = generate(SPEED_VSPEC, &options, None);

    assert!(schema.contains("# DIRECTIVES"));
    assert!(schema.contains("enum HasPermissionsDirectivePolicy {\n    RESOLVER\n    THROW\n}"));
    assert!(schema.contains("directive @range("));
    assert!(schema.contains("directive @hasPermissions("));
    assert!(schema.contains(
        "speed: Float @range(min: 0, max: 300) \
         @hasPermissions(permissions: [\"Vehicle.Speed_READ\"])"
    ));
}

#[test]
fn custom_scalars_change_integer_field_types() {
    let vspec = r#"
Vehicle:
  type: branch
  children:
    Odometer:
      type: sensor
      datatype: uint32
"#;
    let plain = generate(vspec, &GenerationOptions::default(), None);
    assert!(plain.contains("odometer: Int"));
    assert!(!plain.contains("scalar UInt32"));

    let options = GenerationOptions {
        custom_scalars: true,
        ..GenerationOptions::default()
    };
    let scalars = generate(vspec, &options, None);
    assert!(scalars.contains("# CUSTOM SCALARS"));
    assert!(scalars.contains("scalar UInt32"));
    assert!(scalars.contains("odometer: UInt32"));
}

#[test]
fn enums_option_declares_allowed_values() {
    let vspec = r#"
Vehicle:
  type: branch
  children:
    Gearbox:
      type: branch
      children:
        DriveType:
          type: attribute
          datatype: string
          allowed: ["unknown", "forward wheel drive", "rear wheel drive"]
"#;
    let options = GenerationOptions {
        enums: true,
        ..GenerationOptions::default()
    };
    let schema = generate(vspec, &options, None);
    assert!(schema.contains("# ENUM"));
    assert!(schema.contains("enum Vehicle_Gearbox_DriveType_Enum {"));
    assert!(schema.contains("FORWARD_WHEEL_DRIVE"));
    assert!(schema.contains("driveType: Vehicle_Gearbox_DriveType_Enum"));
}

const SEAT_VSPEC: &str = r#"
Vehicle:
  type: branch
  children:
    Cabin:
      type: branch
      children:
        Seat:
          type: branch
          children:
            Position:
              type: actuator
              datatype: uint8
"#;

const SEAT_LAYER: &str = r#"
Vehicle:
  Cabin:
    Seat:
      - Position:
          _francaIDL:
            methods: [write]
"#;

#[test]
fn layer_marks_lists_writes_and_ids() {
    let schema = generate(SEAT_VSPEC, &GenerationOptions::default(), Some(SEAT_LAYER));

    // The repeated branch is list-wrapped at its reference and addressable
    // through an id on both the output type and the mutation input.
    assert!(schema.contains("seat: [Vehicle_Cabin_Seat]"));
    assert!(schema.contains("type Vehicle_Cabin_Seat {\n    position: Int\n    id: ID!\n}"));
    assert!(schema.contains(
        "type Mutation {\n    setVehicleCabinSeat(input: Vehicle_Cabin_Seat_Input!): \
         Vehicle_Cabin_Seat\n}"
    ));
    assert!(schema.contains("input Vehicle_Cabin_Seat_Input {\n    position: Int\n    id: ID!\n}"));
}

#[test]
fn layer_prunes_nodes_outside_its_catalog() {
    let vspec = r#"
Vehicle:
  type: branch
  children:
    Cabin:
      type: branch
      children:
        Seat:
          type: branch
          children:
            Position:
              type: actuator
              datatype: uint8
    Speed:
      type: sensor
      datatype: float
"#;
    let schema = generate(vspec, &GenerationOptions::default(), Some(SEAT_LAYER));
    assert!(schema.contains("position: Int"));
    assert!(!schema.contains("speed"));
}

#[test]
fn layer_without_write_marking_suppresses_mutations() {
    let read_layer = r#"
Vehicle:
  Cabin:
    Seat:
      Position:
        _francaIDL:
          methods: [read]
"#;
    let schema = generate(SEAT_VSPEC, &GenerationOptions::default(), Some(read_layer));
    assert!(schema.contains("position: Int"));
    assert!(!schema.contains("type Mutation"));
    assert!(!schema.contains("input "));
}

#[test]
fn sibling_fields_are_sorted_by_qualified_name() {
    let vspec = r#"
Vehicle:
  type: branch
  children:
    Windshield:
      type: sensor
      datatype: boolean
    Axle:
      type: sensor
      datatype: boolean
"#;
    let schema = generate(vspec, &GenerationOptions::default(), None);
    let axle = schema.find("axle: Boolean").unwrap();
    let windshield = schema.find("windshield: Boolean").unwrap();
    assert!(axle < windshield);
}
