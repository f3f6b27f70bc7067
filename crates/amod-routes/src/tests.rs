//! Unit tests for amod-routes.

#[cfg(test)]
mod helpers {
    use amod_network::{LinkRecord, Network, NetworkLoader, NetworkRecords, NodeRecord};

    fn node(id: &str, x: f64, y: f64) -> NodeRecord {
        NodeRecord { id: id.into(), x, y }
    }

    fn link(id: &str, from: &str, to: &str, capacity: f64) -> LinkRecord {
        LinkRecord {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            capacity,
            freespeed: 10.0,
            length: 100.0,
        }
    }

    /// A(0) ──L1 cap 5──▶ B(1) ──L2 cap 3──▶ C(2)
    ///
    /// plus a later parallel A→B link `L1b` (cap 2) and a return C→A link
    /// `L3` (cap 1).
    pub fn abc() -> Network {
        NetworkLoader::default()
            .load(NetworkRecords {
                nodes: vec![node("A", 0.0, 0.0), node("B", 1.0, 0.0), node("C", 2.0, 0.0)],
                links: vec![
                    link("L1", "A", "B", 5.0),
                    link("L2", "B", "C", 3.0),
                    link("L1b", "A", "B", 2.0),
                    link("L3", "C", "A", 1.0),
                ],
            })
            .unwrap()
    }

    /// Capacity matrix with one cell per pair: A→B 5, B→C 3, C→A 1.
    pub fn abc_capacity(net: &Network) -> crate::CapacityMatrix {
        let mut cap = crate::CapacityMatrix::new(net.nodes.len());
        let (a, b, c) = ids(net);
        cap.set(a, b, 5.0);
        cap.set(b, c, 3.0);
        cap.set(c, a, 1.0);
        cap
    }

    pub fn ids(net: &Network) -> (amod_core::NodeId, amod_core::NodeId, amod_core::NodeId) {
        (
            net.nodes.get("A").unwrap(),
            net.nodes.get("B").unwrap(),
            net.nodes.get("C").unwrap(),
        )
    }
}

// ── Capacity matrix ───────────────────────────────────────────────────────────

#[cfg(test)]
mod capacity {
    use amod_core::NodeId;

    use crate::CapacityMatrix;

    #[test]
    fn parallel_links_share_summed_cell() {
        let net = super::helpers::abc();
        let cap = CapacityMatrix::from_rows(net.nodes.len(), &net.capacity_rows());
        assert_eq!(cap.dim(), 3);
        assert_eq!(cap.get(NodeId(0), NodeId(1)), 7.0);
        assert_eq!(cap.get(NodeId(1), NodeId(2)), 3.0);
    }

    #[test]
    fn missing_cell_reads_zero() {
        let cap = CapacityMatrix::new(4);
        assert_eq!(cap.get(NodeId(2), NodeId(3)), 0.0);
        assert_eq!(cap.negative_cells(), 0);
    }

    #[test]
    fn decrement_has_no_floor() {
        let mut cap = CapacityMatrix::new(2);
        cap.set(NodeId(0), NodeId(1), 1.0);
        assert_eq!(cap.decrement(NodeId(0), NodeId(1)), 0.0);
        assert_eq!(cap.decrement(NodeId(0), NodeId(1)), -1.0);
        assert_eq!(cap.negative_cells(), 1);
    }

    #[test]
    fn iter_in_first_seen_order() {
        let mut cap = CapacityMatrix::new(3);
        cap.set(NodeId(2), NodeId(0), 4.0);
        cap.set(NodeId(0), NodeId(1), 1.0);
        let cells: Vec<_> = cap.iter().collect();
        assert_eq!(cells, vec![(NodeId(2), NodeId(0), 4.0), (NodeId(0), NodeId(1), 1.0)]);
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resolve {
    use amod_core::{ResolveConfig, RoadId};

    use super::helpers::{abc, abc_capacity, ids};
    use crate::{CapacityMatrix, RouteError, RouteResolver, Segment};

    #[test]
    fn abc_route_resolves_and_consumes_capacity() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let mut cap = abc_capacity(&net);

        let res = resolver.resolve_with_capacity(&["A", "B", "C"], &mut cap).unwrap();
        let links: Vec<_> = resolver.link_ids(&res).collect();
        assert_eq!(links, ["L1", "L2"]);
        assert_eq!(resolver.link_string(&res), "L1 L2");

        let (a, b, c) = ids(&net);
        assert_eq!(cap.get(a, b), 4.0);
        assert_eq!(cap.get(b, c), 2.0);
        assert_eq!(res.underflows, 0);
    }

    #[test]
    fn first_listed_parallel_road_wins() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let res = resolver.resolve(&["A", "B"]).unwrap();
        assert_eq!(res.roads, vec![RoadId(0)]);
    }

    #[test]
    fn missing_road_is_dropped_and_reported() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let res = resolver.resolve(&["A", "C"]).unwrap();
        assert!(res.is_empty());
        assert_eq!(res.unmatched, vec![Segment { from: "A".into(), to: "C".into() }]);
    }

    #[test]
    fn returns_l_minus_k_links() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        // 5 edges: A→B ok, B→A missing, A→B ok, B→C ok, C→B missing.
        let res = resolver.resolve(&["A", "B", "A", "B", "C", "B"]).unwrap();
        assert_eq!(res.roads.len(), 3);
        assert_eq!(res.unmatched.len(), 2);
        let links: Vec<_> = resolver.link_ids(&res).collect();
        assert_eq!(links, ["L1", "L1", "L2"]);
    }

    #[test]
    fn single_node_and_empty_routes_are_noops() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let mut cap = abc_capacity(&net);
        let before: Vec<_> = cap.iter().collect();

        assert!(resolver.resolve_with_capacity(&["A"], &mut cap).unwrap().is_empty());
        let empty: [&str; 0] = [];
        assert!(resolver.resolve_with_capacity(&empty, &mut cap).unwrap().is_empty());
        assert_eq!(cap.iter().collect::<Vec<_>>(), before);
    }

    #[test]
    fn lenient_unknown_node_is_unmatched() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let res = resolver.resolve(&["A", "Z", "B"]).unwrap();
        assert!(res.is_empty());
        assert_eq!(res.unmatched.len(), 2);
    }

    #[test]
    fn strict_segments_fail_the_route() {
        let net = abc();
        let mode = ResolveConfig { strict_segments: true, ..Default::default() };
        let resolver = RouteResolver::new(net.roads(), &net.nodes, mode);

        let err = resolver.resolve(&["A", "C"]).unwrap_err();
        assert!(matches!(err, RouteError::UnmatchedSegment { ref from, ref to } if from == "A" && to == "C"));

        let err = resolver.resolve(&["A", "Z"]).unwrap_err();
        assert!(matches!(err, RouteError::UnknownNodeReference(ref n) if n == "Z"));
    }

    #[test]
    fn lenient_capacity_goes_negative_and_counts() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let mut cap = abc_capacity(&net);
        let (a, _, c) = ids(&net);

        // C→A has capacity 1: two traversals leave it at -1.
        let res = resolver.resolve_with_capacity(&["C", "A", "B", "C", "A"], &mut cap).unwrap();
        assert_eq!(res.roads.len(), 4);
        assert_eq!(cap.get(c, a), -1.0);
        assert_eq!(res.underflows, 1);
        assert_eq!(cap.negative_cells(), 1);
    }

    #[test]
    fn strict_capacity_rejects_without_mutation() {
        let net = abc();
        let mode = ResolveConfig { strict_capacity: true, ..Default::default() };
        let resolver = RouteResolver::new(net.roads(), &net.nodes, mode);
        let mut cap = abc_capacity(&net);
        let before: Vec<_> = cap.iter().collect();

        let err = resolver
            .resolve_with_capacity(&["C", "A", "B", "C", "A"], &mut cap)
            .unwrap_err();
        match err {
            RouteError::CapacityUnderflow { from, to, remaining, needed } => {
                assert_eq!((from.as_str(), to.as_str()), ("C", "A"));
                assert_eq!(remaining, 1.0);
                assert_eq!(needed, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(cap.iter().collect::<Vec<_>>(), before);

        // Within capacity: applied as usual.
        resolver.resolve_with_capacity(&["A", "B", "C"], &mut cap).unwrap();
        let (a, b, _) = ids(&net);
        assert_eq!(cap.get(a, b), 4.0);
    }

    #[test]
    fn strict_capacity_tallies_repeated_cells() {
        let net = abc();
        let mode = ResolveConfig { strict_capacity: true, ..Default::default() };
        let resolver = RouteResolver::new(net.roads(), &net.nodes, mode);
        let mut cap = abc_capacity(&net);
        let (a, b, c) = ids(&net);
        cap.set(c, a, 2.0);

        // Three laps minus the last return: A→B ×3, B→C ×3, C→A ×2.
        let laps = ["A", "B", "C", "A", "B", "C", "A", "B", "C"];
        let res = resolver.resolve_with_capacity(&laps, &mut cap).unwrap();
        assert_eq!(res.roads.len(), 8);
        assert_eq!((cap.get(a, b), cap.get(b, c), cap.get(c, a)), (2.0, 0.0, 0.0));

        // Again: A→B is the first cell traversed and the first one short.
        let err = resolver.resolve_with_capacity(&laps, &mut cap).unwrap_err();
        assert!(matches!(
            err,
            RouteError::CapacityUnderflow { ref from, ref to, needed: 3, .. } if from == "A" && to == "B"
        ));
    }

    #[test]
    fn mismatched_capacity_matrix_is_rejected() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());

        let mut empty = CapacityMatrix::default();
        let err = resolver.resolve_with_capacity(&["A", "B"], &mut empty).unwrap_err();
        assert!(matches!(err, RouteError::CapacityShape { matrix: 0, nodes: 3 }));
        assert_eq!(empty.iter().count(), 0);

        let mut wide = CapacityMatrix::new(5);
        let err = resolver.resolve_with_capacity(&["A", "B"], &mut wide).unwrap_err();
        assert!(matches!(err, RouteError::CapacityShape { matrix: 5, nodes: 3 }));
        assert_eq!(wide.iter().count(), 0);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use amod_core::{ClockTime, ResolveConfig};

    use super::helpers::{abc, abc_capacity, ids};
    use crate::{BatchReport, CapacityMatrix, RouteError, RouteInput, RouteResolver};

    fn route(time: &str, nodes: &[&str]) -> RouteInput {
        RouteInput {
            time: time.parse::<ClockTime>().unwrap(),
            nodes: nodes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test_log::test]
    fn batch_collects_diagnostics() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let mut cap = abc_capacity(&net);

        let routes = vec![
            route("07:00:00", &["A", "B", "C"]),
            route("07:05:00", &["A", "C"]),
            route("07:10:00", &["C", "A"]),
            route("07:15:00", &["C", "A"]),
        ];
        let out = resolver.resolve_batch(&routes, Some(&mut cap));

        assert_eq!(out.routes.len(), 4);
        assert_eq!(out.routes[1].time.to_string(), "07:05:00");
        assert_eq!(
            out.report,
            BatchReport {
                routes_total: 4,
                routes_resolved: 4,
                routes_failed: 0,
                unmatched_segments: 1,
                capacity_underflows: 1,
                negative_cells: 1,
            }
        );
        assert!(!out.report.is_clean());

        let (a, b, c) = ids(&net);
        assert_eq!(cap.get(a, b), 4.0);
        assert_eq!(cap.get(b, c), 2.0);
        assert_eq!(cap.get(c, a), -1.0);
    }

    #[test_log::test]
    fn strict_failures_do_not_abort_batch() {
        let net = abc();
        let mode = ResolveConfig { strict_segments: true, strict_capacity: true };
        let resolver = RouteResolver::new(net.roads(), &net.nodes, mode);
        let mut cap = abc_capacity(&net);

        let routes = vec![
            route("08:00:00", &["A", "C"]),
            route("08:01:00", &["C", "A"]),
            route("08:02:00", &["C", "A"]),
            route("08:03:00", &["A", "B"]),
        ];
        let out = resolver.resolve_batch(&routes, Some(&mut cap));

        assert!(out.routes[0].result.is_err());
        assert!(out.routes[1].result.is_ok());
        assert!(out.routes[2].result.is_err());
        assert!(out.routes[3].result.is_ok());
        assert_eq!(out.report.routes_failed, 2);
        assert_eq!(out.report.routes_resolved, 2);
        assert_eq!(out.report.negative_cells, 0);
    }

    #[test]
    fn without_capacity_matrix() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let out = resolver.resolve_batch(&[route("09:00", &["A", "B"])], None);
        assert!(out.report.is_clean());
        assert_eq!(out.report.routes_resolved, 1);
    }

    #[test]
    fn mismatched_matrix_fails_every_route() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let mut cap = CapacityMatrix::new(2);
        let routes = [route("09:00", &["A", "B"]), route("09:05", &["B", "C"])];

        let out = resolver.resolve_batch(&routes, Some(&mut cap));
        assert_eq!(out.report.routes_failed, 2);
        assert!(out
            .routes
            .iter()
            .all(|r| matches!(r.result, Err(RouteError::CapacityShape { matrix: 2, nodes: 3 }))));
        assert_eq!(cap.iter().count(), 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_rejects_mismatched_matrix() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());
        let mut cap = CapacityMatrix::default();

        let out = resolver.resolve_batch_parallel(&[route("09:00", &["A", "B"])], &mut cap);
        assert_eq!(out.report.routes_failed, 1);
        assert_eq!(cap.iter().count(), 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_totals_match_sequential() {
        let net = abc();
        let resolver = RouteResolver::new(net.roads(), &net.nodes, ResolveConfig::default());

        let routes: Vec<_> = (0..400)
            .map(|i| match i % 3 {
                0 => route("06:00:00", &["A", "B", "C"]),
                1 => route("06:00:00", &["C", "A"]),
                _ => route("06:00:00", &["A", "C"]),
            })
            .collect();

        let mut seq_cap = abc_capacity(&net);
        let seq = resolver.resolve_batch(&routes, Some(&mut seq_cap));

        let mut par_cap = abc_capacity(&net);
        let par = resolver.resolve_batch_parallel(&routes, &mut par_cap);

        assert_eq!(seq.report, par.report);
        let (a, b, c) = ids(&net);
        for (x, y) in [(a, b), (b, c), (c, a)] {
            assert_eq!(seq_cap.get(x, y), par_cap.get(x, y));
        }
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loaders {
    use std::io::{self, Cursor, Read};

    use amod_core::ClockTime;

    use crate::{load_activities_reader, load_routes_reader, RouteError};

    #[test]
    fn routes_file() {
        let csv = b"time,nodes\n07:15:00,900 17 4242\n07:20,17\n";
        let routes = load_routes_reader(Cursor::new(csv.as_slice())).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].time, ClockTime::from_hms(7, 15, 0).unwrap());
        assert_eq!(routes[0].nodes, ["900", "17", "4242"]);
        assert_eq!(routes[1].nodes, ["17"]);
    }

    #[test]
    fn bad_route_time() {
        let csv = b"time,nodes\nlate,1 2\n";
        let err = load_routes_reader(Cursor::new(csv.as_slice())).unwrap_err();
        assert!(matches!(err, RouteError::Parse(_)));
    }

    #[test]
    fn activities_file() {
        let csv = b"person,x,y,end_time,dur\np1,1.0,2.0,07:30:00,\np1,3.0,4.0,,01:00\np1,1.0,2.0,,\n";
        let acts = load_activities_reader(Cursor::new(csv.as_slice())).unwrap();
        assert_eq!(acts.len(), 3);
        assert_eq!(acts[0].end_time, Some(ClockTime::from_hms(7, 30, 0).unwrap()));
        assert_eq!(acts[0].dur_secs, None);
        assert_eq!(acts[1].end_time, None);
        assert_eq!(acts[1].dur_secs, Some(3_600));
        assert_eq!(acts[2], crate::Activity {
            person: "p1".into(),
            x: 1.0,
            y: 2.0,
            end_time: None,
            dur_secs: None,
        });
    }

    #[test]
    fn non_finite_activity_coordinates_rejected() {
        let csv = b"person,x,y,end_time,dur\np,1.0,2.0,06:00:00,\np,NaN,NaN,07:00:00,\n";
        let err = load_activities_reader(Cursor::new(csv.as_slice())).unwrap_err();
        match err {
            RouteError::Parse(msg) => {
                assert!(msg.contains("row 2"), "{msg}");
                assert!(msg.contains("person p"), "{msg}");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let csv = b"person,x,y,end_time,dur\np,inf,2.0,,\n";
        let err = load_activities_reader(Cursor::new(csv.as_slice())).unwrap_err();
        assert!(matches!(err, RouteError::Parse(_)));
    }

    /// A source that fails on the first read.
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn io_failures_stay_csv_errors() {
        assert!(matches!(load_routes_reader(Broken).unwrap_err(), RouteError::Csv(_)));
        assert!(matches!(load_activities_reader(Broken).unwrap_err(), RouteError::Csv(_)));
    }

    #[test]
    fn bad_activity_time() {
        let csv = b"person,x,y,end_time,dur\np1,1.0,2.0,25:00:00,\n";
        let err = load_activities_reader(Cursor::new(csv.as_slice())).unwrap_err();
        assert!(matches!(err, RouteError::Core(_)));
    }
}

// ── Trips ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trips {
    use amod_core::{ClockTime, Location, NodeId};
    use amod_network::{IndexedLocator, LinearLocator};

    use crate::{extract_trips, Activity, RouteError};

    fn act(person: &str, x: f64, y: f64, end: Option<&str>, dur: Option<u64>) -> Activity {
        Activity {
            person: person.into(),
            x,
            y,
            end_time: end.map(|t| t.parse().unwrap()),
            dur_secs: dur,
        }
    }

    fn hms(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    /// Locations are (lat, long); activities give (x = long, y = lat).
    fn table() -> Vec<Location> {
        vec![Location::new(0.0, 0.0), Location::new(0.0, 10.0), Location::new(10.0, 10.0)]
    }

    #[test]
    fn consecutive_activities_become_trips() {
        let locs = table();
        let acts = vec![
            act("p1", 0.1, 0.2, Some("07:30:00"), None),
            act("p1", 9.8, 0.1, None, Some(8 * 3_600)),
            act("p1", 10.0, 9.9, None, None),
            act("p2", 10.0, 10.0, None, Some(60)),
            act("p2", 0.0, 0.0, None, None),
        ];
        let trips = extract_trips(&acts, &LinearLocator::new(&locs), 0.0).unwrap();

        assert_eq!(trips.len(), 3);
        assert_eq!((trips[0].source, trips[0].sink), (NodeId(0), NodeId(1)));
        assert_eq!(trips[0].time, hms("07:30:00"));
        assert_eq!((trips[1].source, trips[1].sink), (NodeId(1), NodeId(2)));
        assert_eq!(trips[1].time, hms("15:30:00"));
        // Second person restarts from midnight.
        assert_eq!(trips[2].person, "p2");
        assert_eq!((trips[2].source, trips[2].sink), (NodeId(2), NodeId(0)));
        assert_eq!(trips[2].time, hms("00:01:00"));
    }

    #[test]
    fn duration_wraps_past_midnight() {
        let locs = table();
        let acts = vec![
            act("p", 0.0, 0.0, Some("23:00:00"), None),
            act("p", 10.0, 0.0, None, Some(2 * 3_600)),
            act("p", 10.0, 10.0, None, None),
        ];
        let trips = extract_trips(&acts, &IndexedLocator::new(&locs), 0.0).unwrap();
        assert_eq!(trips[1].time, hms("01:00:00"));
    }

    #[test]
    fn snapping_uses_table_rotation() {
        // Table rotated by 90°: node 0 at origin, node 1 was (lat 0, long 10).
        let raw = table();
        let rotated: Vec<_> = raw.iter().map(|l| l.rotated(90.0)).collect();
        let acts = vec![act("p", 10.0, 0.0, None, None), act("p", 0.0, 0.0, None, None)];
        let trips = extract_trips(&acts, &LinearLocator::new(&rotated), 90.0).unwrap();
        assert_eq!((trips[0].source, trips[0].sink), (NodeId(1), NodeId(0)));
    }

    #[test]
    fn empty_table_errors() {
        let acts = vec![act("p", 0.0, 0.0, None, None)];
        let err = extract_trips(&acts, &LinearLocator::new(&[]), 0.0).unwrap_err();
        assert!(matches!(err, RouteError::Network(_)));
    }
}
