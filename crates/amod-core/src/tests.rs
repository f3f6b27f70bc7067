//! Unit tests for amod-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, RoadId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(RoadId(100) > RoadId(99));
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(RoadId(3).to_string(), "RoadId(3)");
    }
}

#[cfg(test)]
mod geo {
    use approx::assert_abs_diff_eq;

    use crate::Location;

    #[test]
    fn from_xy_puts_latitude_first() {
        let loc = Location::from_xy(-73.98, 40.75);
        assert_eq!(loc.lat, 40.75);
        assert_eq!(loc.long, -73.98);
    }

    #[test]
    fn euclidean_distance() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_2(b), 25.0);
    }

    #[test]
    fn rotation_fixes_origin() {
        let origin = Location::new(0.0, 0.0).rotated(90.0);
        assert_eq!(origin, Location::new(0.0, 0.0));
    }

    #[test]
    fn zero_rotation_is_identity() {
        let p = Location::new(40.7, -74.0);
        assert_eq!(p.rotated(0.0), p);
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        // [lat, long] · [[0, 1], [-1, 0]] = [-long, lat]
        let p = Location::new(1.0, 0.0).rotated(90.0);
        assert_abs_diff_eq!(p.lat, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.long, 1.0, epsilon = 1e-12);

        let q = Location::new(0.0, 1.0).rotated(90.0);
        assert_abs_diff_eq!(q.lat, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.long, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotation_preserves_length() {
        let p = Location::new(40.7, -74.0);
        let r = p.rotated(28.9);
        let origin = Location::new(0.0, 0.0);
        assert_abs_diff_eq!(p.distance(origin), r.distance(origin), epsilon = 1e-9);
    }
}

#[cfg(test)]
mod time {
    use crate::ClockTime;
    use crate::time::parse_duration_secs;

    #[test]
    fn parse_long_form() {
        let t: ClockTime = "07:30:15".parse().unwrap();
        assert_eq!(t.hms(), (7, 30, 15));
        assert_eq!(t.secs_since_midnight(), 7 * 3600 + 30 * 60 + 15);
    }

    #[test]
    fn parse_short_form() {
        let t: ClockTime = "18:05".parse().unwrap();
        assert_eq!(t.hms(), (18, 5, 0));
    }

    #[test]
    fn display_is_zero_padded() {
        let t = ClockTime::from_hms(6, 4, 9).unwrap();
        assert_eq!(t.to_string(), "06:04:09");
    }

    #[test]
    fn rejects_out_of_range() {
        assert!("24:00:00".parse::<ClockTime>().is_err());
        assert!("12:60:00".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("1:2:3:4".parse::<ClockTime>().is_err());
    }

    #[test]
    fn add_wraps_past_midnight() {
        let t = ClockTime::from_hms(23, 30, 0).unwrap();
        assert_eq!(t.wrapping_add_secs(3_600), ClockTime::from_hms(0, 30, 0).unwrap());
    }

    #[test]
    fn duration_allows_long_hours() {
        assert_eq!(parse_duration_secs("01:30").unwrap(), 5_400);
        assert_eq!(parse_duration_secs("30:00:01").unwrap(), 108_001);
        assert!(parse_duration_secs("00:61").is_err());
    }

    #[test]
    fn serde_as_string() {
        let t = ClockTime::from_hms(8, 0, 0).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"08:00:00\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, IndexBase, PipelineConfig};

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, PipelineConfig::default());
        assert_eq!(cfg.network.rotation_degrees, 0.0);
        assert!(!cfg.resolve.strict_segments);
        assert!(!cfg.resolve.strict_capacity);
        assert_eq!(cfg.output.index_base, IndexBase::Zero);
    }

    #[test]
    fn full_document() {
        let cfg = PipelineConfig::from_json_str(
            r#"{
                "network": { "rotation_degrees": 28.9 },
                "resolve": { "strict_segments": true },
                "output":  { "dir": "res", "index_base": "one" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.network.rotation_degrees, 28.9);
        assert!(cfg.resolve.strict_segments);
        assert!(!cfg.resolve.strict_capacity);
        assert_eq!(cfg.output.dir.to_str(), Some("res"));
        assert_eq!(cfg.output.index_base, IndexBase::One);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = PipelineConfig::from_json_str(r#"{ "netwrok": {} }"#).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn non_finite_rotation_rejected() {
        let mut cfg = PipelineConfig::default();
        cfg.network.rotation_degrees = f64::NAN;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn index_base_applies_offset() {
        assert_eq!(IndexBase::Zero.apply(0), 0);
        assert_eq!(IndexBase::One.apply(0), 1);
    }
}
