//! Unit tests for cg-spatial.
//!
//! All tests use a hand-crafted diamond so expected fronts can be computed
//! by hand.

#[cfg(test)]
pub(crate) mod helpers {
    use cg_core::{NodeId, Point};
    use crate::RoadNetwork;

    pub const S: NodeId = NodeId(1);
    pub const A: NodeId = NodeId(2);
    pub const B: NodeId = NodeId(3);
    pub const T: NodeId = NodeId(4);
    /// Has no sections at all.
    pub const ISLAND: NodeId = NodeId(9);

    /// Two routes from S to T:
    ///
    /// ```text
    ///        A            S→A→T: distance 10, danger 52 (short, busy road)
    ///      /   \
    ///     S     T
    ///      \   /
    ///        B            S→B→T: distance 20, danger 10 (long, quiet road)
    /// ```
    ///
    /// Segments 10 (S-A), 11 (A-T), 12 (S-B), 13 (B-T); each has the same
    /// danger in both directions.
    pub fn diamond() -> RoadNetwork {
        let mut net = RoadNetwork::new();
        net.add_node(S, Point::new(0.0, 0.0));
        net.add_node(A, Point::new(2.5, 4.0));
        net.add_node(B, Point::new(2.5, -8.0));
        net.add_node(T, Point::new(5.0, 0.0));
        net.add_node(ISLAND, Point::new(100.0, 100.0));

        net.link(S, A, 10, 5.0, 26.0, 26.0, true).unwrap();
        net.link(A, T, 11, 5.0, 26.0, 26.0, true).unwrap();
        net.link(S, B, 12, 10.0, 5.0, 5.0, true).unwrap();
        net.link(B, T, 13, 10.0, 5.0, 5.0, true).unwrap();
        net
    }

    /// The same diamond with whole-route totals S→A→T (10, 50) and
    /// S→B→T (20, 10).  Both routes cost 18 at weight 0.8.
    pub fn even_diamond() -> RoadNetwork {
        let mut net = RoadNetwork::new();
        net.add_node(S, Point::new(0.0, 0.0));
        net.add_node(A, Point::new(2.5, 4.0));
        net.add_node(B, Point::new(2.5, -8.0));
        net.add_node(T, Point::new(5.0, 0.0));
        net.link(S, A, 10, 5.0, 25.0, 25.0, true).unwrap();
        net.link(A, T, 11, 5.0, 25.0, 25.0, true).unwrap();
        net.link(S, B, 12, 10.0, 5.0, 5.0, true).unwrap();
        net.link(B, T, 13, 10.0, 5.0, 5.0, true).unwrap();
        net
    }

    /// `side × side` lattice, 10 m blocks, with integer dangers that vary per
    /// block and per direction.  Node ids are `row * side + col + 1`.
    pub fn grid(side: u64) -> RoadNetwork {
        let mut net = RoadNetwork::new();
        let id = |r: u64, c: u64| NodeId(r * side + c + 1);
        for r in 0..side {
            for c in 0..side {
                net.add_node(id(r, c), Point::new(c as f64 * 10.0, r as f64 * 10.0));
            }
        }
        let mut base = 100;
        for r in 0..side {
            for c in 0..side {
                let danger_d = 10.0 * (1 + (r * 7 + c * 3) % 5) as f64;
                let danger_g = 10.0 * (1 + (r * 3 + c * 5) % 4) as f64;
                if c + 1 < side {
                    net.link(id(r, c), id(r, c + 1), base, 10.0, danger_d, danger_g, true).unwrap();
                    base += 1;
                }
                if r + 1 < side {
                    net.link(id(r, c), id(r + 1, c), base, 10.0, danger_g, danger_d, true).unwrap();
                    base += 1;
                }
            }
        }
        net
    }
}

// ── Network structure ─────────────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use cg_core::{NodeId, Point, SectionId};
    use super::helpers::*;
    use crate::{DangerChannel, RoadNetwork, SpatialError};

    #[test]
    fn empty_network() {
        let net = RoadNetwork::new();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.section_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn link_installs_both_directions() {
        let net = diamond();
        assert_eq!(net.node_count(), 5);
        assert_eq!(net.section_count(), 8);

        assert_eq!(net.section_between(S, A), Some(SectionId::new(10, true)));
        assert_eq!(net.section_between(A, S), Some(SectionId::new(10, false)));
        assert_eq!(net.section_nodes(SectionId::new(10, false)), Some((A, S)));
        assert_eq!(net.distance_by_section(SectionId::new(10, false)), Some(5.0));
    }

    #[test]
    fn link_uses_side_specific_danger() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(1), Point::new(0.0, 0.0));
        net.add_node(NodeId(2), Point::new(30.0, 40.0));
        net.link(NodeId(1), NodeId(2), 77, 60.0, 12.0, 60.0, false).unwrap();

        let there = SectionId::new(77, false);
        assert_eq!(net.section_nodes(there), Some((NodeId(1), NodeId(2))));
        assert_eq!(net.danger_by_section(there, DangerChannel::Base), Some(12.0));
        assert_eq!(net.danger_by_section(there.reversed(), DangerChannel::Base), Some(60.0));
        // Geometry is independent of the recorded length.
        assert_eq!(net.geometric_length(there), Some(50.0));
    }

    #[test]
    fn link_rejects_unknown_endpoint() {
        let mut net = diamond();
        let err = net.link(S, NodeId(404), 99, 1.0, 1.0, 1.0, true).unwrap_err();
        assert!(matches!(err, SpatialError::NodeNotFound(NodeId(404))));
        assert_eq!(net.section_count(), 8);
    }

    #[test]
    fn adjacency_is_ordered() {
        let net = diamond();
        let out: Vec<NodeId> = net.node(S).unwrap().neighbours().map(|(n, _)| n).collect();
        assert_eq!(out, vec![A, B]);
        assert_eq!(net.node(ISLAND).unwrap().out_degree(), 0);
    }

    #[test]
    fn sections_sorted_by_id() {
        let net = diamond();
        let ids: Vec<SectionId> = net.sections().into_iter().map(|(s, _, _)| s).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.first(), Some(&SectionId::new(10, false)));
    }

    #[test]
    fn overrides_touch_alternate_channel_only() {
        let mut net = diamond();
        assert_eq!(net.apply_overrides([(12, 5.0)]), 1);

        for forward in [true, false] {
            let s = SectionId::new(12, forward);
            assert_eq!(net.danger_by_section(s, DangerChannel::Alternate), Some(2.0));
            assert_eq!(net.danger_by_section(s, DangerChannel::Base), Some(5.0));
            assert_eq!(net.distance_by_section(s), Some(10.0));
        }
        // Sections without an override read the base value on either channel.
        let untouched = SectionId::new(10, true);
        assert_eq!(net.danger_by_section(untouched, DangerChannel::Alternate), Some(26.0));
    }

    #[test]
    fn overrides_skip_unknown_and_invalid() {
        let mut net = diamond();
        assert_eq!(net.apply_overrides([(404, 5.0), (10, 0.0), (11, -1.0)]), 0);
        let s = SectionId::new(10, true);
        assert_eq!(net.section_edge(s).unwrap().alt_danger, None);
    }

    #[test]
    fn clear_overrides_restores_base() {
        let mut net = diamond();
        net.apply_overrides([(10, 5.0), (11, 5.0)]);
        net.clear_overrides();
        for (section, _, _) in net.sections() {
            assert_eq!(net.section_edge(section).unwrap().alt_danger, None);
        }
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use super::helpers::*;
    use cg_core::{NodeId, Point, DISTANCE_WEIGHTS};
    use crate::{DangerChannel, DijkstraRouter, RoadNetwork, Router, ScalarCost, SearchState, SpatialError};

    fn cost(index: usize) -> ScalarCost {
        ScalarCost::from_weight_index(index, DangerChannel::Base)
    }

    #[test]
    fn distance_weight_takes_short_branch() {
        let net = diamond();
        let route = DijkstraRouter.route(&net, S, T, cost(6)).unwrap();
        assert_eq!(route.nodes, vec![S, A, T]);
    }

    #[test]
    fn danger_weight_takes_quiet_branch() {
        let net = diamond();
        let route = DijkstraRouter.route(&net, S, T, cost(0)).unwrap();
        assert_eq!(route.nodes, vec![S, B, T]);
        let label = route.label(&net, DangerChannel::Base).unwrap();
        assert_eq!((label.distance, label.danger), (20.0, 10.0));
    }

    #[test]
    fn route_cost_is_scalarized() {
        let net = diamond();
        let route = DijkstraRouter.route(&net, S, T, ScalarCost::new(0.5, DangerChannel::Base)).unwrap();
        assert!((route.cost - 15.0).abs() < 1e-9);
    }

    #[test]
    fn same_node_is_trivial() {
        let net = diamond();
        let route = DijkstraRouter.route(&net, A, A, cost(3)).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn unreachable_sink() {
        let net = diamond();
        let err = DijkstraRouter.route(&net, S, ISLAND, cost(3)).unwrap_err();
        assert!(matches!(err, SpatialError::NoRoute { .. }));
    }

    #[test]
    fn unknown_node() {
        let net = diamond();
        let err = DijkstraRouter.route(&net, NodeId(404), T, cost(3)).unwrap_err();
        assert!(matches!(err, SpatialError::NodeNotFound(NodeId(404))));
    }

    #[test]
    fn state_reuse_matches_fresh_search() {
        let net = diamond();
        let mut state = SearchState::new();
        let first = DijkstraRouter.route_with_state(&net, S, T, cost(6), &mut state).unwrap();
        let second = DijkstraRouter.route_with_state(&net, S, T, cost(0), &mut state).unwrap();
        assert_eq!(first, DijkstraRouter.route(&net, S, T, cost(6)).unwrap());
        assert_eq!(second, DijkstraRouter.route(&net, S, T, cost(0)).unwrap());
        assert!(state.is_settled(T));
    }

    #[test]
    fn search_runs_until_sink_is_settled() {
        // T is first reached straight from S at cost 10; the detour via X costs 2.
        let (s, x, t) = (NodeId(1), NodeId(2), NodeId(3));
        let mut net = RoadNetwork::new();
        net.add_node(s, Point::new(0.0, 0.0));
        net.add_node(x, Point::new(1.0, 1.0));
        net.add_node(t, Point::new(2.0, 0.0));
        net.link(s, t, 1, 10.0, 10.0, 10.0, true).unwrap();
        net.link(s, x, 2, 1.0, 1.0, 1.0, true).unwrap();
        net.link(x, t, 3, 1.0, 1.0, 1.0, true).unwrap();

        for index in 0..DISTANCE_WEIGHTS.len() {
            let route = DijkstraRouter.route(&net, s, t, cost(index)).unwrap();
            assert_eq!(route.nodes, vec![s, x, t], "weight index {index}");
            assert!((route.cost - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn alternate_channel_sees_overrides() {
        let mut net = diamond();
        net.apply_overrides([(10, 5.0), (11, 5.0)]);
        // S→A→T now costs (10, 2) on the alternate channel: best on every weight.
        let alt = ScalarCost::from_weight_index(0, DangerChannel::Alternate);
        assert_eq!(DijkstraRouter.route(&net, S, T, alt).unwrap().nodes, vec![S, A, T]);
        assert_eq!(DijkstraRouter.route(&net, S, T, cost(0)).unwrap().nodes, vec![S, B, T]);
    }

    #[test]
    fn path_label_rejects_gap() {
        let net = diamond();
        let err = crate::path_label(&net, &[S, T], DangerChannel::Base).unwrap_err();
        assert!(matches!(err, SpatialError::MissingEdge { from, to } if from == S && to == T));
    }
}

// ── Fronts ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod front {
    use super::helpers::*;
    use cg_core::NodeId;
    use crate::{
        build_front, build_front_with_state, check_spacing, DangerChannel, DijkstraRouter, Label, ParetoFront,
        RoadNetwork, Route, Router, ScalarCost, SearchState, SpatialError, SpatialResult,
    };

    #[test]
    fn diamond_front() {
        let net = diamond();
        let front = build_front(&DijkstraRouter, &net, S, T, DangerChannel::Base).unwrap();
        for i in 0..6 {
            assert_eq!(front.label(i), Label::new(20.0, 10.0), "weight index {i}");
        }
        assert_eq!(front.distance_extreme(), Label::new(10.0, 52.0));
        assert_eq!(front.danger_extreme(), Label::new(20.0, 10.0));
        assert!(front.is_monotone());
    }

    #[test]
    fn even_diamond_front() {
        let net = even_diamond();
        let front = build_front(&DijkstraRouter, &net, S, T, DangerChannel::Base).unwrap();
        for i in 0..5 {
            assert_eq!(front.label(i), Label::new(20.0, 10.0), "weight index {i}");
        }
        // Equal cost at 0.8: the route through the lower node id wins.
        assert_eq!(front.label(5), Label::new(10.0, 50.0));
        assert_eq!(front.label(6), Label::new(10.0, 50.0));
        assert_eq!(front.nearest(&Label::new(10.0, 50.0)), 5);
        assert!(front.is_monotone());
    }

    #[test]
    fn grid_fronts_are_monotone() {
        let side = 6;
        let net = grid(side);
        let mut state = SearchState::new();
        let mut checked = 0;
        for from in 1..=side * side {
            for to in 1..=side * side {
                if from == to {
                    continue;
                }
                let front = build_front_with_state(
                    &DijkstraRouter,
                    &net,
                    NodeId(from),
                    NodeId(to),
                    DangerChannel::Base,
                    &mut state,
                )
                .unwrap();
                assert!(front.is_monotone(), "{from} → {to}: {front:?}");
                checked += 1;
            }
        }
        assert_eq!(checked, 36 * 35);
    }

    #[test]
    fn reused_state_matches_fresh_fronts() {
        let net = grid(4);
        let mut state = SearchState::new();
        for (from, to) in [(1, 16), (16, 1), (4, 13), (6, 11)] {
            let (from, to) = (NodeId(from), NodeId(to));
            for channel in [DangerChannel::Base, DangerChannel::Alternate] {
                let reused = build_front_with_state(&DijkstraRouter, &net, from, to, channel, &mut state).unwrap();
                assert_eq!(reused, build_front(&DijkstraRouter, &net, from, to, channel).unwrap());
            }
        }
    }

    /// Only implements `route`, so front building goes through the
    /// provided `route_with_state`.
    struct Plain;

    impl Router for Plain {
        fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId, cost: ScalarCost) -> SpatialResult<Route> {
            DijkstraRouter.route(network, from, to, cost)
        }
    }

    #[test]
    fn router_without_scratch_builds_same_front() {
        let net = even_diamond();
        let mut state = SearchState::new();
        let plain = build_front_with_state(&Plain, &net, S, T, DangerChannel::Base, &mut state).unwrap();
        assert_eq!(plain, build_front(&DijkstraRouter, &net, S, T, DangerChannel::Base).unwrap());
    }

    #[test]
    fn front_with_unreachable_sink_fails() {
        let net = diamond();
        let err = build_front(&DijkstraRouter, &net, S, ISLAND, DangerChannel::Base).unwrap_err();
        assert!(matches!(err, SpatialError::NoRoute { .. }));
    }

    #[test]
    fn nearest_prefers_lowest_index_on_ties() {
        let net = diamond();
        let front = build_front(&DijkstraRouter, &net, S, T, DangerChannel::Base).unwrap();
        assert_eq!(front.nearest(&Label::new(20.0, 10.0)), 0);
        assert_eq!(front.nearest(&Label::new(11.0, 50.0)), 6);
    }

    #[test]
    fn non_monotone_front_detected() {
        let mut labels = [Label::new(10.0, 10.0); 7];
        labels[3] = Label::new(30.0, 10.0);
        assert!(!ParetoFront::from_labels(labels).is_monotone());
    }

    #[test]
    fn widest_gap_on_two_point_front() {
        let net = diamond();
        let front = build_front(&DijkstraRouter, &net, S, T, DangerChannel::Base).unwrap();
        let gap = front.widest_gap().unwrap();
        assert_eq!(gap.lower, 5);
        assert!((gap.ratio - 6.0).abs() < 1e-9);

        assert_eq!(check_spacing(&front, 3.0).map(|g| g.lower), Some(5));
        assert!(check_spacing(&front, 10.0).is_none());
    }

    #[test]
    fn single_point_front_has_no_gap() {
        let front = ParetoFront::from_labels([Label::new(5.0, 5.0); 7]);
        assert!(front.widest_gap().is_none());
        assert!(check_spacing(&front, 0.0).is_none());
    }
}

// ── Facilities ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod facility {
    use crate::Facility;

    #[test]
    fn layout_classes() {
        assert_eq!(Facility::from_layout(Some("piste bi")), Facility::Separated);
        assert_eq!(Facility::from_layout(Some("voie verte uni")), Facility::Separated);
        assert_eq!(Facility::from_layout(Some("bande uni")), Facility::Lane);
        assert_eq!(Facility::from_layout(Some("chaucidou")), Facility::Shared);
        assert_eq!(Facility::from_layout(Some("DSC")), Facility::Mixed);
        assert_eq!(Facility::from_layout(None), Facility::Mixed);
        assert_eq!(Facility::from_layout(Some("  ")), Facility::Mixed);
    }

    #[test]
    fn danger_divides_length() {
        assert_eq!(Facility::Separated.danger(100.0), 20.0);
        assert_eq!(Facility::Lane.danger(90.0), 30.0);
        assert_eq!(Facility::Shared.danger(10.0), 5.0);
        assert_eq!(Facility::Mixed.danger(10.0), 10.0);
    }

    #[test]
    fn unknown_layout_is_negligible() {
        let f = Facility::from_layout(Some("trottoir partagé"));
        assert!(matches!(f, Facility::Unrecognised(_)));
        assert!(f.danger(1000.0) < 1e-6);
    }
}

// ── Locator ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod locator {
    use std::collections::BTreeSet;

    use cg_core::{Point, SectionId};
    use super::helpers::*;
    use crate::SectionLocator;

    #[test]
    fn indexes_both_endpoints_of_every_section() {
        let net = diamond();
        let locator = SectionLocator::build(&net);
        assert_eq!(locator.len(), 16);
        assert!(!locator.is_empty());
    }

    #[test]
    fn radius_is_strict() {
        let net = diamond();
        let locator = SectionLocator::build(&net);
        // A is 4.717 from S, T exactly 5.0, B 8.38.
        let found: BTreeSet<SectionId> = locator.sections_within(Point::new(0.0, 0.0), 5.0).collect();
        let expected: BTreeSet<SectionId> = [10, 11, 12]
            .into_iter()
            .flat_map(|b| [SectionId::new(b, true), SectionId::new(b, false)])
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn matches_exhaustive_scan() {
        let net = diamond();
        let locator = SectionLocator::build(&net);
        let centre = Point::new(3.0, -1.0);
        for radius in [0.5, 2.0, 4.0, 6.0, 9.0, 20.0] {
            let indexed: BTreeSet<SectionId> = locator.sections_within(centre, radius).collect();
            let scanned: BTreeSet<SectionId> = net
                .sections()
                .into_iter()
                .filter(|&(_, s, e)| {
                    [s, e].iter().any(|&n| net.node(n).unwrap().pos.distance(centre) < radius)
                })
                .map(|(id, _, _)| id)
                .collect();
            assert_eq!(indexed, scanned, "radius {radius}");
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use cg_core::{NodeId, SectionId};
    use crate::{load_network_reader, DangerChannel, SpatialError};

    const NODES: &str = "node_id,x,y\n1,0.0,0.0\n2,60.0,80.0\n3,60.0,0.0\n";

    #[test]
    fn loads_nodes_and_sections() {
        let sections = "section_id,node_start,node_end,length,facility_right,facility_left\n\
                        500,1,2,100.0,piste uni,\n\
                        501,2,3,80.0,bande bi,bande bi\n";
        let net = load_network_reader(Cursor::new(NODES), Cursor::new(sections)).unwrap();

        assert_eq!(net.node_count(), 3);
        assert_eq!(net.section_count(), 4);

        let fwd = SectionId::new(500, true);
        assert_eq!(net.section_nodes(fwd), Some((NodeId(1), NodeId(2))));
        assert_eq!(net.danger_by_section(fwd, DangerChannel::Base), Some(20.0));
        assert_eq!(net.danger_by_section(fwd.reversed(), DangerChannel::Base), Some(100.0));
        assert!((net.danger_by_section(SectionId::new(501, false), DangerChannel::Base).unwrap() - 80.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn section_with_unknown_node_fails() {
        let sections = "section_id,node_start,node_end,length,facility_right,facility_left\n\
                        500,1,42,100.0,,\n";
        let err = load_network_reader(Cursor::new(NODES), Cursor::new(sections)).unwrap_err();
        assert!(matches!(err, SpatialError::NodeNotFound(NodeId(42))));
    }

    #[test]
    fn malformed_row_is_csv_error() {
        let nodes = "node_id,x,y\nnot-a-number,0.0,0.0\n";
        let sections = "section_id,node_start,node_end,length,facility_right,facility_left\n";
        let err = load_network_reader(Cursor::new(nodes), Cursor::new(sections)).unwrap_err();
        assert!(matches!(err, SpatialError::Csv(_)));
    }
}
