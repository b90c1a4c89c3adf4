//! Survey compilation: strips to a layered route graph with edge costs.

use pr_core::{Metrics, NodeId, PressureCoefficients};
use pr_graph::{EdgeCosts, GraphBuilder, Node, Position, RouteGraph, StripRef};

use crate::SurveyResult;
use crate::flanigan::flanigan_coefficients;
use crate::schema::{PointDef, Survey, TerrainCosts};
use crate::validate::validate_survey;

/// A survey ready for solving.
#[derive(Debug, Clone)]
pub struct CompiledSurvey {
    pub graph: RouteGraph,
    pub costs: EdgeCosts,
    pub coefficients: PressureCoefficients,
    /// Node ids of each strip, in point order.
    pub strips: Vec<Vec<NodeId>>,
}

/// Validate `survey` and build its graph, numbering nodes strip by strip.
///
/// Each edge is costed from the geometry and the ground cover of the point
/// it enters.
pub fn compile_survey(survey: &Survey) -> SurveyResult<CompiledSurvey> {
    validate_survey(survey)?;
    let coefficients = flanigan_coefficients(&survey.flow)?;

    let points = || survey.strips.iter().flat_map(|s| &s.points);
    let point_count = points().count();
    let link_count = points()
        .filter_map(|p| p.links)
        .map(|[first, last]| last.saturating_sub(first) as usize + 1)
        .sum();
    let mut builder = GraphBuilder::with_capacity(point_count, link_count);
    let mut strips: Vec<Vec<NodeId>> = Vec::with_capacity(survey.strips.len());

    for (s, strip) in survey.strips.iter().enumerate() {
        let ids = strip
            .points
            .iter()
            .enumerate()
            .map(|(p, point)| {
                builder.add_node(
                    Position::new(point.x, point.y, point.z),
                    StripRef::new(s as u32, p as u32),
                )
            })
            .collect();
        strips.push(ids);
    }

    let mut entering: Vec<&PointDef> = Vec::with_capacity(point_count);
    for (s, strip) in survey.strips.iter().enumerate() {
        for (p, point) in strip.points.iter().enumerate() {
            entering.push(point);
            let (Some(prev), Some([first, last])) = (s.checked_sub(1), point.links) else {
                continue;
            };
            let to = strips[s][p];
            let linked = strips[prev]
                .get(first as usize..=last as usize)
                .unwrap_or_default();
            for from in linked {
                builder.add_edge(*from, to);
            }
        }
    }

    let graph = builder.build()?;
    graph.ensure_sink_reachable()?;

    let costs = EdgeCosts::from_graph(&graph, |from, to| {
        edge_metrics(from, to, entering[to.id.idx()], &survey.terrain, coefficients)
    })?;

    tracing::debug!(
        survey = %survey.name,
        strips = strips.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "survey compiled"
    );
    Ok(CompiledSurvey {
        graph,
        costs,
        coefficients,
        strips,
    })
}

fn edge_metrics(
    from: &Node,
    to: &Node,
    entered: &PointDef,
    terrain: &TerrainCosts,
    coefficients: PressureCoefficients,
) -> Metrics {
    let length = from.distance_to(to);
    let hill = from.rise_to(to);
    Metrics {
        cost: length * terrain.factor(entered.land, entered.trees),
        length,
        hill,
        pressure_loss: coefficients.loss(length, hill),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FlowConditions, LandClass, SURVEY_VERSION, StripDef, TreeClass};

    fn survey() -> Survey {
        Survey {
            version: SURVEY_VERSION,
            name: "fork".to_string(),
            flow: FlowConditions::default(),
            terrain: TerrainCosts::default(),
            strips: vec![
                StripDef {
                    points: vec![PointDef::origin(0.0, 0.0, 0.0)],
                },
                StripDef {
                    points: vec![
                        PointDef::linked(3.0, 0.0, 4.0, LandClass::Rock, TreeClass::Large, 0, 0),
                        PointDef::linked(0.0, 10.0, 0.0, LandClass::Soil, TreeClass::Small, 0, 0),
                    ],
                },
                StripDef {
                    points: vec![PointDef::linked(3.0, 10.0, 0.0, LandClass::Water, TreeClass::None, 0, 1)],
                },
            ],
        }
    }

    #[test]
    fn numbering_is_strip_major() {
        let compiled = compile_survey(&survey()).unwrap();
        let ids: Vec<Vec<u32>> = compiled
            .strips
            .iter()
            .map(|s| s.iter().map(|id| id.index()).collect())
            .collect();
        assert_eq!(ids, vec![vec![0], vec![1, 2], vec![3]]);
        assert_eq!(compiled.graph.edge_count(), 4);
        assert_eq!(
            compiled.graph.predecessors(NodeId::from_index(3)),
            &[NodeId::from_index(1), NodeId::from_index(2)]
        );
    }

    #[test]
    fn edges_are_costed_by_the_entered_point() {
        let compiled = compile_survey(&survey()).unwrap();
        let c = compiled.coefficients;

        let up = compiled
            .costs
            .get(NodeId::from_index(0), NodeId::from_index(1))
            .unwrap();
        assert!((up.length - 5.0).abs() < 1e-12);
        assert_eq!(up.hill, 4.0);
        assert!((up.cost - 5.0 * (2.5 + 0.55)).abs() < 1e-12);
        assert!((up.pressure_loss - c.loss(5.0, 4.0)).abs() < 1e-12);

        let down = compiled
            .costs
            .get(NodeId::from_index(1), NodeId::from_index(3))
            .unwrap();
        assert_eq!(down.hill, 0.0);
        assert!((down.cost - down.length * 1.5).abs() < 1e-12);
    }

    #[test]
    fn origin_links_fail_validation_instead_of_compiling() {
        for links in [[0, 0], [1, 0]] {
            let mut survey = survey();
            survey.strips[0].points[0].links = Some(links);
            assert!(matches!(
                compile_survey(&survey),
                Err(crate::SurveyError::Validation(_))
            ));
        }
    }
}
