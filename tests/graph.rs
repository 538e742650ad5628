use ifc_graph::error::GraphError;
use ifc_graph::graph::{JsonLineSource, ModelSource, NodeSource, Session};
use ifc_graph::model::{AttrContent, AttrValue, Content, GraphNode, Point, NODE_ANCHOR};
use ifc_graph::parser::{IfcModel, OpenOptions};
use pretty_assertions::assert_eq;

const SMALL_HOUSE: &[u8] = include_bytes!("fixtures/small_house.ifc");

fn open() -> (Session, GraphNode) {
    Session::open(SMALL_HOUSE).unwrap()
}

fn anchors(node: &GraphNode) -> Vec<(&str, bool, u32, u32)> {
    node.attributes
        .iter()
        .map(|a| (a.name.as_str(), a.inverse, a.edge_anchor.x, a.edge_anchor.y))
        .collect()
}

#[test]
fn project_is_the_root() {
    let (session, root) = open();
    assert_eq!(root.id, 11);
    assert_eq!(root.entity_type, "IfcProject");
    assert_eq!(root.layout_hint, NODE_ANCHOR);
    assert_eq!(session.root_id(), 11);

    let decomposed = root.attribute("IsDecomposedBy").unwrap();
    assert!(decomposed.inverse);
    assert_eq!(decomposed.content.targets().collect::<Vec<_>>(), vec![30]);
}

#[test]
fn type_index_keeps_first_seen_order() {
    let (session, _) = open();
    let index = session.type_index();
    let names: Vec<&str> = index.iter().map(|(name, _)| name).collect();
    assert_eq!(&names[..4], &["IfcPerson", "IfcOrganization", "IfcPersonAndOrganization", "IfcApplication"]);
    assert_eq!(index.ids("IfcRelAggregates"), &[30, 31, 32]);
    assert_eq!(index.ids("IfcLocalPlacement"), &[22, 26, 28, 40]);
    assert_eq!(index.ids("IfcCartesianPoint"), &[8, 20, 24]);
    assert_eq!(index.total_lines(), 33);
}

#[test]
fn wall_node_layout() {
    let (session, _) = open();
    let wall = session.add_node(41).unwrap();
    assert_eq!(wall.entity_type, "IfcWall");
    assert_eq!(
        anchors(&wall),
        vec![
            ("GlobalId", false, 200, 68),
            ("OwnerHistory", false, 200, 97),
            ("Name", false, 200, 126),
            ("Description", false, 200, 126),
            ("ObjectType", false, 200, 126),
            ("ObjectPlacement", false, 200, 155),
            ("Representation", false, 200, 155),
            ("Tag", false, 200, 155),
            ("PredefinedType", false, 200, 184),
            ("HasAssociations", true, 0, 68),
            ("Decomposes", true, 0, 68),
            ("IsDecomposedBy", true, 0, 68),
            ("IsDefinedBy", true, 0, 68),
            ("IsTypedBy", true, 0, 68),
            ("ContainedInStructure", true, 0, 97),
            ("HasOpenings", true, 0, 126),
            ("FillsVoids", true, 0, 126),
        ]
    );

    assert_eq!(
        wall.attribute("Tag").unwrap().content,
        Content::One(AttrContent::Reference(None))
    );
    assert_eq!(
        wall.attribute("HasOpenings").unwrap().content,
        Content::Many(vec![AttrContent::Reference(Some(43))])
    );
    assert_eq!(
        wall.attribute("PredefinedType").unwrap().content,
        Content::One(AttrContent::Value(AttrValue::Text("STANDARD".to_string())))
    );
}

#[test]
fn wall_node_wire_shape() {
    let (session, _) = open();
    let wall = serde_json::to_value(session.add_node(41).unwrap()).unwrap();

    assert_eq!(wall["id"], 41);
    assert_eq!(wall["type"], "IfcWall");
    assert_eq!(wall["layoutHint"], serde_json::json!({"x": 40, "y": 60}));
    assert_eq!(
        wall["attributes"][7],
        serde_json::json!({
            "name": "Tag",
            "content": {"kind": "reference", "value": null},
            "inverse": false,
            "edgeAnchor": {"x": 200, "y": 155}
        })
    );
    assert_eq!(
        wall["attributes"][15]["content"],
        serde_json::json!([{"kind": "reference", "value": 43}])
    );
}

#[test]
fn opening_points_back_at_its_void_relation() {
    let (session, _) = open();
    let opening = session.add_node(42).unwrap();
    let voids = opening.attribute("VoidsElements").unwrap();
    assert!(voids.inverse);
    assert_eq!(voids.content, Content::One(AttrContent::Reference(Some(43))));
}

#[test]
fn coordinates_collapse_and_recenter() {
    let (session, _) = open();
    let point = session.add_node(20).unwrap();
    assert_eq!(
        point.attribute("Coordinates").unwrap().content,
        Content::One(AttrContent::Value(AttrValue::Numbers(vec![0.0, 0.0, 0.0])))
    );

    let options = OpenOptions {
        coordinate_to_origin: false,
    };
    let (kept, _) = Session::open_with(SMALL_HOUSE, options).unwrap();
    let point = kept.add_node(20).unwrap();
    assert_eq!(
        point.attribute("Coordinates").unwrap().content,
        Content::One(AttrContent::Value(AttrValue::Numbers(vec![1000.0, 2000.0, 0.0])))
    );
}

#[test]
fn point_lists_become_numeric_entries() {
    let (session, _) = open();
    let list = session.add_node(50).unwrap();
    assert_eq!(
        list.attribute("CoordList").unwrap().content,
        Content::Many(vec![
            AttrContent::Value(AttrValue::Numbers(vec![0.0, 0.0, 0.0])),
            AttrContent::Value(AttrValue::Numbers(vec![5000.0, 0.0, 0.0])),
            AttrContent::Value(AttrValue::Numbers(vec![5000.0, 200.0, 0.0])),
        ])
    );
}

#[test]
fn wrapped_and_encoded_values() {
    let (session, _) = open();
    let property = session.add_node(51).unwrap();
    assert_eq!(
        property.attribute("NominalValue").unwrap().content,
        Content::One(AttrContent::Value(AttrValue::Text("T".to_string())))
    );

    let pset = session.add_node(52).unwrap();
    assert_eq!(
        pset.attribute("Description").unwrap().content,
        Content::One(AttrContent::Value(AttrValue::Text("Café wall".to_string())))
    );
    assert_eq!(
        pset.attribute("DefinesOccurrence").unwrap().content.targets().collect::<Vec<_>>(),
        vec![53]
    );
}

#[test]
fn unknown_ids_are_errors() {
    let (session, _) = open();
    assert!(matches!(session.add_node(12), Err(GraphError::UnknownId(12))));
    assert!(matches!(session.add_node_by_id(0), Err(GraphError::UnknownId(0))));
}

#[test]
fn translation_is_repeatable() {
    let (session, _) = open();
    for id in session.source().line_ids() {
        assert_eq!(session.add_node(id).unwrap(), session.add_node_by_id(id).unwrap());
    }
}

/// Checks the invariants every node holds, for every line of the model.
#[test]
fn node_invariants_hold_for_every_line() {
    let model = IfcModel::open(SMALL_HOUSE, OpenOptions::default()).unwrap();
    let (session, _) = Session::load(model).unwrap();

    for id in session.source().line_ids() {
        let node = session.add_node(id).unwrap();
        let forward = session.source().fetch_forward(id).unwrap();
        let forward_names: Vec<&str> = forward.keys().collect();

        let mut last_valued = [None::<u32>; 2];
        for attribute in &node.attributes {
            assert_eq!(
                attribute.inverse,
                !forward_names.contains(&attribute.name.as_str()),
                "#{id}.{}",
                attribute.name
            );
            assert_eq!(attribute.edge_anchor.x, if attribute.inverse { 0 } else { 200 });

            for entry in attribute.content.entries() {
                if let AttrContent::Reference(Some(target)) = entry {
                    assert_ne!(*target, 0);
                }
            }

            let side = usize::from(attribute.inverse);
            let Point { y, .. } = attribute.edge_anchor;
            match (attribute.content.has_value(), last_valued[side]) {
                (true, None) => assert_eq!(y, 68, "#{id}.{}", attribute.name),
                (true, Some(previous)) => assert_eq!(y, previous + 29, "#{id}.{}", attribute.name),
                (false, None) => assert_eq!(y, 68, "#{id}.{}", attribute.name),
                (false, Some(previous)) => assert_eq!(y, previous, "#{id}.{}", attribute.name),
            }
            if attribute.content.has_value() {
                last_valued[side] = Some(y);
            }
        }
    }
}

#[test]
fn line_dump_reproduces_every_node() {
    let (session, root) = open();
    let dump = JsonLineSource::capture(session.source()).unwrap();
    let bytes = serde_json::to_vec(&dump.to_json()).unwrap();

    let (replayed, replayed_root) = Session::load(JsonLineSource::from_slice(&bytes).unwrap()).unwrap();
    assert_eq!(replayed_root, root);
    assert_eq!(replayed.type_index(), session.type_index());
    for id in session.source().line_ids() {
        assert_eq!(replayed.add_node(id).unwrap(), session.add_node(id).unwrap());
    }
}

#[test]
fn sessions_are_independent() {
    let (first, _) = open();
    let other = b"ISO-10303-21;
DATA;
#1=IFCPROJECT('p',$,'Other',$,$,$,$,$,$);
ENDSEC;
END-ISO-10303-21;
";
    let (second, root) = Session::open(other).unwrap();
    assert_eq!(root.id, 1);
    assert_eq!(second.type_index().total_lines(), 1);
    assert_eq!(first.add_node(41).unwrap().entity_type, "IfcWall");
    assert!(matches!(second.add_node(41), Err(GraphError::UnknownId(41))));
}
