//! Static subset of the IFC4 schema.
//!
//! Covers the entities that make up the spatial tree, common building
//! elements, relationships, and the resource entities they reference.
//! A wider list of IFC4 entity names covers the rest of the common
//! geometry, quantity, material and distribution entities by name only.
//! Entities outside both still decode; they keep their STEP keyword as
//! type name and get positional attribute names.

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct EntityDef {
    pub name: &'static str,
    pub supertype: Option<&'static str>,
    /// Attributes declared on this entity, excluding inherited ones.
    pub attributes: &'static [&'static str],
}

/// An inverse attribute: `name` on `target` collects every `source`
/// instance whose `source_attribute` points back at the target.
#[derive(Debug)]
pub struct InverseDef {
    pub target: &'static str,
    pub name: &'static str,
    pub source: &'static str,
    pub source_attribute: &'static str,
    /// `SET OF` inverses hold a list, the others a single reference.
    pub set: bool,
}

const fn entity(
    name: &'static str,
    supertype: Option<&'static str>,
    attributes: &'static [&'static str],
) -> EntityDef {
    EntityDef {
        name,
        supertype,
        attributes,
    }
}

const fn inverse(
    target: &'static str,
    name: &'static str,
    source: &'static str,
    source_attribute: &'static str,
    set: bool,
) -> InverseDef {
    InverseDef {
        target,
        name,
        source,
        source_attribute,
        set,
    }
}

const PREDEFINED: &[&str] = &["PredefinedType"];

static ENTITIES: &[EntityDef] = &[
    // Kernel
    entity("IfcRoot", None, &["GlobalId", "OwnerHistory", "Name", "Description"]),
    entity("IfcObjectDefinition", Some("IfcRoot"), &[]),
    entity(
        "IfcContext",
        Some("IfcObjectDefinition"),
        &["ObjectType", "LongName", "Phase", "RepresentationContexts", "UnitsInContext"],
    ),
    entity("IfcProject", Some("IfcContext"), &[]),
    entity("IfcObject", Some("IfcObjectDefinition"), &["ObjectType"]),
    entity("IfcProduct", Some("IfcObject"), &["ObjectPlacement", "Representation"]),
    entity("IfcElement", Some("IfcProduct"), &["Tag"]),
    entity("IfcTypeObject", Some("IfcObjectDefinition"), &["ApplicableOccurrence", "HasPropertySets"]),
    entity("IfcTypeProduct", Some("IfcTypeObject"), &["RepresentationMaps", "Tag"]),
    entity("IfcElementType", Some("IfcTypeProduct"), &["ElementType"]),
    entity("IfcPropertyDefinition", Some("IfcRoot"), &[]),
    entity("IfcPropertySetDefinition", Some("IfcPropertyDefinition"), &[]),
    entity("IfcPropertySet", Some("IfcPropertySetDefinition"), &["HasProperties"]),
    entity("IfcQuantitySet", Some("IfcPropertySetDefinition"), &[]),
    entity("IfcElementQuantity", Some("IfcQuantitySet"), &["MethodOfMeasurement", "Quantities"]),
    // Spatial structure
    entity("IfcSpatialElement", Some("IfcProduct"), &["LongName"]),
    entity("IfcSpatialStructureElement", Some("IfcSpatialElement"), &["CompositionType"]),
    entity(
        "IfcSite",
        Some("IfcSpatialStructureElement"),
        &["RefLatitude", "RefLongitude", "RefElevation", "LandTitleNumber", "SiteAddress"],
    ),
    entity(
        "IfcBuilding",
        Some("IfcSpatialStructureElement"),
        &["ElevationOfRefHeight", "ElevationOfTerrain", "BuildingAddress"],
    ),
    entity("IfcBuildingStorey", Some("IfcSpatialStructureElement"), &["Elevation"]),
    entity(
        "IfcSpace",
        Some("IfcSpatialStructureElement"),
        &["PredefinedType", "ElevationWithFlooring"],
    ),
    // Elements
    entity("IfcBuildingElement", Some("IfcElement"), &[]),
    entity("IfcWall", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcWallStandardCase", Some("IfcWall"), &[]),
    entity("IfcSlab", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcBeam", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcColumn", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcMember", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcPlate", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcRoof", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcStair", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcRailing", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcCovering", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcCurtainWall", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcFooting", Some("IfcBuildingElement"), PREDEFINED),
    entity("IfcBuildingElementProxy", Some("IfcBuildingElement"), PREDEFINED),
    entity(
        "IfcDoor",
        Some("IfcBuildingElement"),
        &["OverallHeight", "OverallWidth", "PredefinedType", "OperationType", "UserDefinedOperationType"],
    ),
    entity(
        "IfcWindow",
        Some("IfcBuildingElement"),
        &[
            "OverallHeight",
            "OverallWidth",
            "PredefinedType",
            "PartitioningType",
            "UserDefinedPartitioningType",
        ],
    ),
    entity("IfcFurnishingElement", Some("IfcElement"), &[]),
    entity("IfcFurniture", Some("IfcFurnishingElement"), PREDEFINED),
    entity("IfcFeatureElement", Some("IfcElement"), &[]),
    entity("IfcFeatureElementSubtraction", Some("IfcFeatureElement"), &[]),
    entity("IfcOpeningElement", Some("IfcFeatureElementSubtraction"), PREDEFINED),
    // Types
    entity("IfcBuildingElementType", Some("IfcElementType"), &[]),
    entity("IfcWallType", Some("IfcBuildingElementType"), PREDEFINED),
    entity("IfcSlabType", Some("IfcBuildingElementType"), PREDEFINED),
    entity("IfcBeamType", Some("IfcBuildingElementType"), PREDEFINED),
    entity("IfcColumnType", Some("IfcBuildingElementType"), PREDEFINED),
    // Relationships
    entity("IfcRelationship", Some("IfcRoot"), &[]),
    entity("IfcRelDecomposes", Some("IfcRelationship"), &[]),
    entity("IfcRelAggregates", Some("IfcRelDecomposes"), &["RelatingObject", "RelatedObjects"]),
    entity("IfcRelNests", Some("IfcRelDecomposes"), &["RelatingObject", "RelatedObjects"]),
    entity(
        "IfcRelVoidsElement",
        Some("IfcRelDecomposes"),
        &["RelatingBuildingElement", "RelatedOpeningElement"],
    ),
    entity("IfcRelConnects", Some("IfcRelationship"), &[]),
    entity(
        "IfcRelContainedInSpatialStructure",
        Some("IfcRelConnects"),
        &["RelatedElements", "RelatingStructure"],
    ),
    entity(
        "IfcRelFillsElement",
        Some("IfcRelConnects"),
        &["RelatingOpeningElement", "RelatedBuildingElement"],
    ),
    entity("IfcRelDefines", Some("IfcRelationship"), &[]),
    entity(
        "IfcRelDefinesByProperties",
        Some("IfcRelDefines"),
        &["RelatedObjects", "RelatingPropertyDefinition"],
    ),
    entity("IfcRelDefinesByType", Some("IfcRelDefines"), &["RelatedObjects", "RelatingType"]),
    entity("IfcRelAssociates", Some("IfcRelationship"), &["RelatedObjects"]),
    entity("IfcRelAssociatesMaterial", Some("IfcRelAssociates"), &["RelatingMaterial"]),
    entity("IfcRelDeclares", Some("IfcRelationship"), &["RelatingContext", "RelatedDefinitions"]),
    // Actors and ownership
    entity(
        "IfcOwnerHistory",
        None,
        &[
            "OwningUser",
            "OwningApplication",
            "State",
            "ChangeAction",
            "LastModifiedDate",
            "LastModifyingUser",
            "LastModifyingApplication",
            "CreationDate",
        ],
    ),
    entity(
        "IfcPerson",
        None,
        &[
            "Identification",
            "FamilyName",
            "GivenName",
            "MiddleNames",
            "PrefixTitles",
            "SuffixTitles",
            "Roles",
            "Addresses",
        ],
    ),
    entity("IfcOrganization", None, &["Identification", "Name", "Description", "Roles", "Addresses"]),
    entity("IfcPersonAndOrganization", None, &["ThePerson", "TheOrganization", "Roles"]),
    entity(
        "IfcApplication",
        None,
        &["ApplicationDeveloper", "Version", "ApplicationFullName", "ApplicationIdentifier"],
    ),
    // Geometry
    entity("IfcRepresentationItem", None, &[]),
    entity("IfcGeometricRepresentationItem", Some("IfcRepresentationItem"), &[]),
    entity("IfcPoint", Some("IfcGeometricRepresentationItem"), &[]),
    entity("IfcCartesianPoint", Some("IfcPoint"), &["Coordinates"]),
    entity("IfcCartesianPointList", Some("IfcGeometricRepresentationItem"), &[]),
    entity("IfcCartesianPointList3D", Some("IfcCartesianPointList"), &["CoordList"]),
    entity("IfcDirection", Some("IfcGeometricRepresentationItem"), &["DirectionRatios"]),
    entity("IfcPlacement", Some("IfcGeometricRepresentationItem"), &["Location"]),
    entity("IfcAxis2Placement2D", Some("IfcPlacement"), &["RefDirection"]),
    entity("IfcAxis2Placement3D", Some("IfcPlacement"), &["Axis", "RefDirection"]),
    entity("IfcCurve", Some("IfcGeometricRepresentationItem"), &[]),
    entity("IfcBoundedCurve", Some("IfcCurve"), &[]),
    entity("IfcPolyline", Some("IfcBoundedCurve"), &["Points"]),
    entity("IfcSolidModel", Some("IfcGeometricRepresentationItem"), &[]),
    entity("IfcSweptAreaSolid", Some("IfcSolidModel"), &["SweptArea", "Position"]),
    entity("IfcExtrudedAreaSolid", Some("IfcSweptAreaSolid"), &["ExtrudedDirection", "Depth"]),
    entity("IfcStyledItem", Some("IfcRepresentationItem"), &["Item", "Styles", "Name"]),
    entity("IfcProfileDef", None, &["ProfileType", "ProfileName"]),
    entity("IfcParameterizedProfileDef", Some("IfcProfileDef"), &["Position"]),
    entity("IfcRectangleProfileDef", Some("IfcParameterizedProfileDef"), &["XDim", "YDim"]),
    entity("IfcObjectPlacement", None, &[]),
    entity("IfcLocalPlacement", Some("IfcObjectPlacement"), &["PlacementRelTo", "RelativePlacement"]),
    // Representation
    entity("IfcRepresentationContext", None, &["ContextIdentifier", "ContextType"]),
    entity(
        "IfcGeometricRepresentationContext",
        Some("IfcRepresentationContext"),
        &["CoordinateSpaceDimension", "Precision", "WorldCoordinateSystem", "TrueNorth"],
    ),
    entity(
        "IfcGeometricRepresentationSubContext",
        Some("IfcGeometricRepresentationContext"),
        &["ParentContext", "TargetScale", "TargetView", "UserDefinedTargetView"],
    ),
    entity("IfcProductRepresentation", None, &["Name", "Description", "Representations"]),
    entity("IfcProductDefinitionShape", Some("IfcProductRepresentation"), &[]),
    entity(
        "IfcRepresentation",
        None,
        &["ContextOfItems", "RepresentationIdentifier", "RepresentationType", "Items"],
    ),
    entity("IfcShapeModel", Some("IfcRepresentation"), &[]),
    entity("IfcShapeRepresentation", Some("IfcShapeModel"), &[]),
    // Units, properties, materials
    entity("IfcUnitAssignment", None, &["Units"]),
    entity(
        "IfcDimensionalExponents",
        None,
        &[
            "LengthExponent",
            "MassExponent",
            "TimeExponent",
            "ElectricCurrentExponent",
            "ThermodynamicTemperatureExponent",
            "AmountOfSubstanceExponent",
            "LuminousIntensityExponent",
        ],
    ),
    entity("IfcNamedUnit", None, &["Dimensions", "UnitType"]),
    entity("IfcSIUnit", Some("IfcNamedUnit"), &["Prefix", "Name"]),
    entity("IfcProperty", None, &["Name", "Description"]),
    entity("IfcSimpleProperty", Some("IfcProperty"), &[]),
    entity("IfcPropertySingleValue", Some("IfcSimpleProperty"), &["NominalValue", "Unit"]),
    entity("IfcMaterial", None, &["Name", "Description", "Category"]),
];

static INVERSES: &[InverseDef] = &[
    inverse("IfcObjectDefinition", "HasAssociations", "IfcRelAssociates", "RelatedObjects", true),
    inverse("IfcObjectDefinition", "Decomposes", "IfcRelAggregates", "RelatedObjects", true),
    inverse("IfcObjectDefinition", "IsDecomposedBy", "IfcRelAggregates", "RelatingObject", true),
    inverse("IfcContext", "Declares", "IfcRelDeclares", "RelatingContext", true),
    inverse("IfcObject", "IsDefinedBy", "IfcRelDefinesByProperties", "RelatedObjects", true),
    inverse("IfcObject", "IsTypedBy", "IfcRelDefinesByType", "RelatedObjects", true),
    inverse("IfcElement", "ContainedInStructure", "IfcRelContainedInSpatialStructure", "RelatedElements", true),
    inverse("IfcElement", "HasOpenings", "IfcRelVoidsElement", "RelatingBuildingElement", true),
    inverse("IfcElement", "FillsVoids", "IfcRelFillsElement", "RelatedBuildingElement", true),
    inverse("IfcFeatureElementSubtraction", "VoidsElements", "IfcRelVoidsElement", "RelatedOpeningElement", false),
    inverse("IfcOpeningElement", "HasFillings", "IfcRelFillsElement", "RelatingOpeningElement", true),
    inverse("IfcSpatialElement", "ContainsElements", "IfcRelContainedInSpatialStructure", "RelatingStructure", true),
    inverse("IfcTypeObject", "Types", "IfcRelDefinesByType", "RelatingType", true),
    inverse("IfcPropertySetDefinition", "DefinesOccurrence", "IfcRelDefinesByProperties", "RelatingPropertyDefinition", true),
    inverse("IfcProperty", "PartOfPset", "IfcPropertySet", "HasProperties", true),
    inverse("IfcObjectPlacement", "PlacesObject", "IfcProduct", "ObjectPlacement", true),
    inverse("IfcObjectPlacement", "ReferencedByPlacements", "IfcLocalPlacement", "PlacementRelTo", true),
    inverse("IfcProductDefinitionShape", "ShapeOfProduct", "IfcProduct", "Representation", true),
    inverse("IfcRepresentation", "OfProductRepresentation", "IfcProductRepresentation", "Representations", true),
    inverse("IfcRepresentationContext", "RepresentationsInContext", "IfcRepresentation", "ContextOfItems", true),
    inverse("IfcRepresentationItem", "StyledByItem", "IfcStyledItem", "Item", true),
    inverse("IfcPerson", "EngagedIn", "IfcPersonAndOrganization", "ThePerson", true),
    inverse("IfcOrganization", "Engages", "IfcPersonAndOrganization", "TheOrganization", true),
];

/// IFC4 entities known by name only. Their attributes are positional.
static NAMED: &[&str] = &[
    // Geometry and topology
    "IfcAxis1Placement", "IfcBooleanClippingResult", "IfcBooleanResult", "IfcBoundingBox",
    "IfcCartesianPointList2D", "IfcCartesianTransformationOperator3D", "IfcCircle",
    "IfcCircleProfileDef", "IfcArbitraryClosedProfileDef", "IfcArbitraryProfileDefWithVoids",
    "IfcClosedShell", "IfcCompositeCurve", "IfcCompositeCurveSegment", "IfcConnectedFaceSet",
    "IfcEdgeCurve", "IfcEdgeLoop", "IfcFace", "IfcFaceBound", "IfcFaceOuterBound", "IfcFacetedBrep",
    "IfcGeometricCurveSet", "IfcGeometricSet", "IfcHalfSpaceSolid", "IfcIndexedPolyCurve",
    "IfcLine", "IfcMappedItem", "IfcOpenShell", "IfcOrientedEdge", "IfcPlane",
    "IfcPolygonalBoundedHalfSpace", "IfcPolygonalFaceSet", "IfcPolyLoop", "IfcIndexedPolygonalFace",
    "IfcRepresentationMap", "IfcShellBasedSurfaceModel", "IfcTrimmedCurve",
    "IfcTriangulatedFaceSet", "IfcVector", "IfcVertexPoint", "IfcIShapeProfileDef",
    "IfcLShapeProfileDef", "IfcTShapeProfileDef", "IfcUShapeProfileDef",
    // Presentation
    "IfcColourRgb", "IfcPresentationLayerAssignment", "IfcPresentationStyleAssignment",
    "IfcSurfaceStyle", "IfcSurfaceStyleRendering", "IfcSurfaceStyleShading",
    // Quantities and properties
    "IfcQuantityArea", "IfcQuantityCount", "IfcQuantityLength", "IfcQuantityVolume",
    "IfcQuantityWeight", "IfcPropertyEnumeratedValue", "IfcPropertyEnumeration",
    "IfcPropertyListValue", "IfcComplexProperty", "IfcRelDefinesByTemplate",
    // Materials
    "IfcMaterialConstituent", "IfcMaterialConstituentSet", "IfcMaterialLayer",
    "IfcMaterialLayerSet", "IfcMaterialLayerSetUsage", "IfcMaterialList", "IfcMaterialProfile",
    "IfcMaterialProfileSet", "IfcMaterialProfileSetUsage",
    // Units, actors and history
    "IfcConversionBasedUnit", "IfcDerivedUnit", "IfcDerivedUnitElement", "IfcMeasureWithUnit",
    "IfcMonetaryUnit", "IfcPostalAddress", "IfcTelecomAddress", "IfcActorRole", "IfcClassification",
    "IfcClassificationReference", "IfcRelAssociatesClassification",
    // Spatial and building elements
    "IfcZone", "IfcRampFlight", "IfcRamp", "IfcStairFlight", "IfcChimney", "IfcShadingDevice",
    "IfcPile", "IfcWallElementedCase", "IfcSlabElementedCase", "IfcDoorType", "IfcWindowType",
    "IfcCoveringType", "IfcMemberType", "IfcPlateType", "IfcRailingType", "IfcStairFlightType",
    "IfcFurnitureType", "IfcSpaceType", "IfcBuildingElementProxyType", "IfcDoorLiningProperties",
    "IfcDoorPanelProperties", "IfcWindowLiningProperties", "IfcWindowPanelProperties",
    "IfcRelSpaceBoundary", "IfcRelConnectsPathElements", "IfcRelConnectsElements",
    "IfcRelReferencedInSpatialStructure", "IfcRelAssignsToGroup", "IfcGroup", "IfcSystem",
    "IfcAnnotation", "IfcGrid", "IfcGridAxis", "IfcVirtualElement", "IfcElementAssembly",
    // Distribution
    "IfcDistributionElement", "IfcDistributionFlowElement", "IfcDistributionPort",
    "IfcDistributionSystem", "IfcFlowController", "IfcFlowFitting", "IfcFlowMovingDevice",
    "IfcFlowSegment", "IfcFlowStorageDevice", "IfcFlowTerminal", "IfcFlowTreatmentDevice",
    "IfcEnergyConversionDevice", "IfcDuctSegment", "IfcDuctFitting", "IfcPipeSegment",
    "IfcPipeFitting", "IfcAirTerminal", "IfcSanitaryTerminal", "IfcLightFixture", "IfcOutlet",
    "IfcValve", "IfcPump", "IfcCableCarrierSegment", "IfcCableSegment", "IfcRelConnectsPorts",
];

fn name_index() -> &'static HashMap<String, &'static str> {
    static INDEX: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
    INDEX.get_or_init(|| {
        ENTITIES
            .iter()
            .map(|def| def.name)
            .chain(NAMED.iter().copied())
            .map(|name| (name.to_ascii_uppercase(), name))
            .collect()
    })
}

fn entity_index() -> &'static HashMap<String, &'static EntityDef> {
    static INDEX: OnceLock<HashMap<String, &'static EntityDef>> = OnceLock::new();
    INDEX.get_or_init(|| {
        ENTITIES
            .iter()
            .map(|def| (def.name.to_ascii_uppercase(), def))
            .collect()
    })
}

/// Looks up an entity by STEP keyword, case-insensitively.
#[must_use]
pub fn lookup(step_type: &str) -> Option<&'static EntityDef> {
    entity_index()
        .get(&step_type.to_ascii_uppercase())
        .copied()
}

/// Canonical IFC name for a STEP keyword (`IFCWALL` -> `IfcWall`).
///
/// Keywords missing from the tables are returned unchanged.
#[must_use]
pub fn canonical_name(step_type: &str) -> String {
    name_index()
        .get(&step_type.to_ascii_uppercase())
        .map_or_else(|| step_type.to_string(), |name| (*name).to_string())
}

/// Whether the tables apply to a file declaring `schema`.
///
/// Only IFC4 and its addenda share these attribute layouts. A file with
/// no `FILE_SCHEMA` is read as IFC4.
#[must_use]
pub fn covers(schema: &str) -> bool {
    schema.is_empty() || schema.to_ascii_uppercase().starts_with("IFC4")
}

/// Supertype chain from the entity itself up to its root.
fn lineage(step_type: &str) -> Vec<&'static EntityDef> {
    let mut chain = Vec::new();
    let mut current = lookup(step_type);
    while let Some(def) = current {
        chain.push(def);
        current = def.supertype.and_then(lookup);
    }
    chain
}

/// Attribute names of an entity, inherited attributes first.
#[must_use]
pub fn attribute_names(step_type: &str) -> Vec<&'static str> {
    lineage(step_type)
        .iter()
        .rev()
        .flat_map(|def| def.attributes.iter().copied())
        .collect()
}

/// Name of the attribute at `index`, falling back to a positional name.
#[must_use]
pub fn attribute_name(names: &[&'static str], index: usize) -> String {
    names
        .get(index)
        .map_or_else(|| format!("Attribute{}", index + 1), |name| (*name).to_string())
}

#[must_use]
pub fn is_subtype_of(step_type: &str, ancestor: &str) -> bool {
    lineage(step_type)
        .iter()
        .any(|def| def.name.eq_ignore_ascii_case(ancestor))
}

/// Inverse attributes applicable to an entity, most general first.
#[must_use]
pub fn inverse_attributes(step_type: &str) -> Vec<&'static InverseDef> {
    lineage(step_type)
        .iter()
        .rev()
        .flat_map(|def| INVERSES.iter().filter(move |inv| inv.target == def.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_name("IFCWALLSTANDARDCASE"), "IfcWallStandardCase");
        assert_eq!(canonical_name("IFCFLOWTERMINAL"), "IfcFlowTerminal");
        assert_eq!(canonical_name("IFCPOLYLOOP"), "IfcPolyLoop");
        assert_eq!(canonical_name("IFCMATERIALLAYERSET"), "IfcMaterialLayerSet");
        assert_eq!(canonical_name("IFCSOMEVENDOREXTENSION"), "IFCSOMEVENDOREXTENSION");
        assert_eq!(canonical_name("CUSTOMTHING"), "CUSTOMTHING");
    }

    #[test]
    fn named_entities_are_not_duplicated() {
        let mut seen = std::collections::HashSet::new();
        for name in ENTITIES.iter().map(|def| def.name).chain(NAMED.iter().copied()) {
            assert!(seen.insert(name.to_ascii_uppercase()), "{name}");
        }
    }

    #[test]
    fn inherited_attributes_come_first() {
        assert_eq!(
            attribute_names("IFCWALL"),
            vec![
                "GlobalId",
                "OwnerHistory",
                "Name",
                "Description",
                "ObjectType",
                "ObjectPlacement",
                "Representation",
                "Tag",
                "PredefinedType",
            ]
        );
        assert_eq!(attribute_names("IFCUNKNOWNTHING"), Vec::<&str>::new());
    }

    #[test]
    fn positional_fallback_names() {
        let names = attribute_names("IFCCARTESIANPOINT");
        assert_eq!(attribute_name(&names, 0), "Coordinates");
        assert_eq!(attribute_name(&names, 1), "Attribute2");
    }

    #[test]
    fn only_ifc4_files_use_the_tables() {
        assert!(covers("IFC4"));
        assert!(covers("IFC4X3_ADD2"));
        assert!(covers(""));
        assert!(!covers("IFC2X3"));
        assert!(!covers("IFC2X3_TC1"));
    }

    #[test]
    fn subtype_checks_walk_the_chain() {
        assert!(is_subtype_of("IFCWALLSTANDARDCASE", "IfcElement"));
        assert!(is_subtype_of("IFCRELVOIDSELEMENT", "IfcRelVoidsElement"));
        assert!(!is_subtype_of("IFCSLAB", "IfcWall"));
    }

    #[test]
    fn inverses_follow_the_lineage() {
        let names: Vec<&str> = inverse_attributes("IFCWALL").iter().map(|i| i.name).collect();
        assert_eq!(
            names,
            vec![
                "HasAssociations",
                "Decomposes",
                "IsDecomposedBy",
                "IsDefinedBy",
                "IsTypedBy",
                "ContainedInStructure",
                "HasOpenings",
                "FillsVoids",
            ]
        );
    }

    #[test]
    fn every_supertype_is_declared() {
        for def in ENTITIES {
            if let Some(parent) = def.supertype {
                assert!(lookup(parent).is_some(), "{} -> {parent}", def.name);
            }
        }
        for inv in INVERSES {
            assert!(lookup(inv.target).is_some(), "{}", inv.target);
            assert!(
                attribute_names(inv.source).contains(&inv.source_attribute),
                "{}.{}",
                inv.source,
                inv.source_attribute
            );
        }
    }
}
