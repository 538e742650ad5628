//! Origin normalization applied when a model is opened.
//!
//! Placements form a tree; only root placements (`IfcLocalPlacement`
//! without `PlacementRelTo`) carry absolute coordinates. Shifting their
//! location points moves the whole model.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::parser::step::{StepFile, StepValue};

/// Moves the model so the first root placement sits at the origin.
///
/// Returns the offset that was subtracted, if any. Location points that
/// are shared with other lines are left alone.
pub fn recenter_root_placements(step: &mut StepFile) -> Option<Vec<f64>> {
    let points = root_location_points(step);
    let offset = points
        .first()
        .and_then(|&id| point_coordinates(step, id))
        .filter(|coords| coords.iter().any(|c| *c != 0.0))?;

    let reference_counts = reference_counts(step);
    for id in points {
        if reference_counts.get(&id).copied().unwrap_or(0) > 1 {
            warn!(point = id, "root location point is shared, not recentered");
            continue;
        }
        if let Some(entity) = step.get_entity_mut(id) {
            if let Some(StepValue::List(coords)) = entity.values.first_mut() {
                for (coord, shift) in coords.iter_mut().zip(&offset) {
                    if let StepValue::Real(value) = coord {
                        *value -= shift;
                    }
                }
            }
        }
    }

    debug!(?offset, "recentered root placements");
    Some(offset)
}

/// Location points of root placements, in file order, without repeats.
fn root_location_points(step: &StepFile) -> Vec<u64> {
    let mut points = Vec::new();
    for placement in step.get_entities_by_type("IFCLOCALPLACEMENT") {
        let is_root = matches!(
            placement.values.first(),
            None | Some(StepValue::Null | StepValue::Derived)
        );
        if !is_root {
            continue;
        }
        let location = match placement.values.get(1) {
            Some(StepValue::Reference(axis)) => step.get_entity(*axis),
            _ => None,
        }
        .and_then(|axis| match axis.values.first() {
            Some(StepValue::Reference(point)) => Some(*point),
            _ => None,
        });
        if let Some(point) = location {
            if !points.contains(&point) {
                points.push(point);
            }
        }
    }
    points
}

fn point_coordinates(step: &StepFile, id: u64) -> Option<Vec<f64>> {
    let point = step.get_entity(id)?;
    if point.entity_type != "IFCCARTESIANPOINT" {
        return None;
    }
    match point.values.first()? {
        StepValue::List(coords) => coords
            .iter()
            .map(|c| match c {
                StepValue::Real(f) => Some(*f),
                StepValue::Integer(i) => Some(*i as f64),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

fn reference_counts(step: &StepFile) -> HashMap<u64, usize> {
    fn walk(value: &StepValue, counts: &mut HashMap<u64, usize>) {
        match value {
            StepValue::Reference(id) => *counts.entry(*id).or_insert(0) += 1,
            StepValue::List(items) => items.iter().for_each(|item| walk(item, counts)),
            _ => {}
        }
    }

    let mut counts = HashMap::new();
    for entity in &step.entities {
        entity.values.iter().for_each(|value| walk(value, &mut counts));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(data: &str) -> StepFile {
        StepFile::parse(&format!("ISO-10303-21;\nDATA;\n{data}\nENDSEC;\nEND-ISO-10303-21;\n")).unwrap()
    }

    fn coords(step: &StepFile, id: u64) -> Vec<f64> {
        point_coordinates(step, id).unwrap()
    }

    #[test]
    fn shifts_the_root_placement_to_the_origin() {
        let mut step = parse(
            "#1=IFCCARTESIANPOINT((1000.,2000.,5.));
#2=IFCAXIS2PLACEMENT3D(#1,$,$);
#3=IFCLOCALPLACEMENT($,#2);
#4=IFCCARTESIANPOINT((1.,1.,0.));
#5=IFCAXIS2PLACEMENT3D(#4,$,$);
#6=IFCLOCALPLACEMENT(#3,#5);",
        );
        let offset = recenter_root_placements(&mut step);
        assert_eq!(offset, Some(vec![1000.0, 2000.0, 5.0]));
        assert_eq!(coords(&step, 1), vec![0.0, 0.0, 0.0]);
        assert_eq!(coords(&step, 4), vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn model_at_origin_is_untouched() {
        let mut step = parse(
            "#1=IFCCARTESIANPOINT((0.,0.,0.));
#2=IFCAXIS2PLACEMENT3D(#1,$,$);
#3=IFCLOCALPLACEMENT($,#2);",
        );
        assert_eq!(recenter_root_placements(&mut step), None);
    }

    #[test]
    fn shared_points_are_not_moved() {
        let mut step = parse(
            "#1=IFCCARTESIANPOINT((10.,0.,0.));
#2=IFCAXIS2PLACEMENT3D(#1,$,$);
#3=IFCLOCALPLACEMENT($,#2);
#4=IFCAXIS2PLACEMENT3D(#1,$,$);",
        );
        recenter_root_placements(&mut step);
        assert_eq!(coords(&step, 1), vec![10.0, 0.0, 0.0]);
    }
}
