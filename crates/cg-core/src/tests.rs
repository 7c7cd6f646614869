//! Unit tests for cg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, SectionId};

    #[test]
    fn raw_roundtrip() {
        let id = NodeId::from(9_098_460);
        assert_eq!(id.raw(), 9_098_460);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(SectionId::new(3, true) < SectionId::new(4, false));
        assert!(SectionId::new(3, false) < SectionId::new(3, true));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(NodeId::INVALID.0, u64::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn reversed_flips_direction_only() {
        let s = SectionId::new(17, true);
        assert_eq!(s.reversed(), SectionId::new(17, false));
        assert_eq!(s.reversed().reversed(), s);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(SectionId::new(7, false).to_string(), "Section(7-)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn zero_distance() {
        let p = Point::new(525_000.0, 6_700_000.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_2(b), 25.0);
    }
}

#[cfg(test)]
mod weights {
    use crate::weights::{danger_weight, neighbourhood};
    use crate::{DANGER_EXTREME, DISTANCE_EXTREME, DISTANCE_WEIGHTS, WEIGHT_COUNT};

    #[test]
    fn weights_are_ascending_and_open_unit() {
        assert_eq!(WEIGHT_COUNT, 7);
        for w in DISTANCE_WEIGHTS.windows(2) {
            assert!(w[0] < w[1]);
        }
        assert!(DISTANCE_WEIGHTS.iter().all(|&w| w > 0.0 && w < 1.0));
        assert_eq!(DANGER_EXTREME, 0);
        assert_eq!(DISTANCE_EXTREME, 6);
    }

    #[test]
    fn danger_weight_complements() {
        assert!((danger_weight(3) - 0.5).abs() < 1e-12);
        assert!((danger_weight(0) - 0.999).abs() < 1e-12);
    }

    #[test]
    fn neighbourhood_sizes() {
        assert_eq!(neighbourhood(0).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(neighbourhood(3).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(neighbourhood(6).collect::<Vec<_>>(), vec![5, 6]);
    }
}

#[cfg(test)]
mod config {
    use crate::{AnalysisConfig, CoreError};

    #[test]
    fn defaults_are_valid() {
        let cfg = AnalysisConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.threshold_distance, 67.0);
        assert_eq!(cfg.budget, 150.0);
        assert_eq!(cfg.safety_factor, 5.0);
    }

    #[test]
    fn rejects_zero_budget() {
        let cfg = AnalysisConfig { budget: 0.0, ..AnalysisConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_nan_safety_factor() {
        let cfg = AnalysisConfig { safety_factor: f64::NAN, ..AnalysisConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_threads() {
        let cfg = AnalysisConfig { num_threads: Some(0), ..AnalysisConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SampleRng;

    #[test]
    fn same_seed_same_pick() {
        let a = SampleRng::new(42).pick_indices(100, 10);
        let b = SampleRng::new(42).pick_indices(100, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn picks_are_distinct_and_sorted() {
        let picked = SampleRng::new(7).pick_indices(50, 20);
        assert_eq!(picked.len(), 20);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert!(picked.iter().all(|&i| i < 50));
    }

    #[test]
    fn oversized_request_returns_everything() {
        assert_eq!(SampleRng::new(1).pick_indices(3, 10), vec![0, 1, 2]);
    }
}
