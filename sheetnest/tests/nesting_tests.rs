#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use itertools::Itertools;
    use test_case::test_case;

    use sheetnest::collision_detection::{collides, min_separation};
    use sheetnest::entities::{NestingResult, PlacedShape};
    use sheetnest::geometry::geo_enums::RotationPolicy;
    use sheetnest::geometry::geo_traits::{DistanceTo, Transformable};
    use sheetnest::geometry::primitives::{Point, Rect};
    use sheetnest::io::ext_repr::{ExtShape, NestRequest};
    use sheetnest::opt::strategy::StrategyKind;
    use sheetnest::util::{NestConfig, assertions};
    use sheetnest::{NestError, Nester, nest};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn rect(id: &str, w: f64, h: f64) -> ExtShape {
        ExtShape {
            id: id.to_string(),
            points: vec![[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]],
            closed: true,
        }
    }

    fn star(id: &str, n_tips: usize, r_outer: f64, r_inner: f64) -> ExtShape {
        let points = (0..2 * n_tips)
            .map(|i| {
                let r = if i % 2 == 0 { r_outer } else { r_inner };
                let a = i as f64 / (2 * n_tips) as f64 * TAU;
                [500.0 + r * a.cos(), 500.0 + r * a.sin()]
            })
            .collect_vec();
        ExtShape {
            id: id.to_string(),
            points,
            closed: true,
        }
    }

    fn circle(id: &str, n: usize, r: f64) -> ExtShape {
        let points = (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * TAU;
                [r * a.cos(), r * a.sin()]
            })
            .collect_vec();
        ExtShape {
            id: id.to_string(),
            points,
            closed: true,
        }
    }

    fn l_shape(id: &str, size: f64, thickness: f64) -> ExtShape {
        ExtShape {
            id: id.to_string(),
            points: vec![
                [0.0, 0.0],
                [size, 0.0],
                [size, thickness],
                [thickness, thickness],
                [thickness, size],
                [0.0, size],
            ],
            closed: true,
        }
    }

    fn request(shapes: Vec<ExtShape>, sheet: (f64, f64), spacing: f64, rotation: RotationPolicy) -> NestRequest {
        NestRequest {
            shapes,
            sheet_width: sheet.0,
            sheet_height: sheet.1,
            spacing,
            rotation,
        }
    }

    fn mixed_request() -> NestRequest {
        request(
            vec![
                l_shape("l1", 120.0, 30.0),
                star("star", 5, 60.0, 25.0),
                circle("disc", 200, 35.0),
                rect("plate", 140.0, 40.0),
                l_shape("l2", 80.0, 20.0),
                rect("strip", 20.0, 150.0),
            ],
            (400.0, 300.0),
            3.0,
            RotationPolicy::Quarter,
        )
    }

    fn assert_valid(result: &NestingResult, req: &NestRequest) {
        let sheet = Rect::from_dimensions(req.sheet_width, req.sheet_height).unwrap();
        assert!(result.bounding_width <= req.sheet_width);
        assert!(result.bounding_height <= req.sheet_height);
        assert!(assertions::placements_within_sheet(&result.placements, sheet));
        assert!(assertions::placements_are_separated(&result.placements, req.spacing));
        assert!(assertions::placements_are_unique(&result.placements));
        assert_eq!(
            result.ids(),
            req.shapes.iter().map(|s| s.id.as_str()).collect_vec()
        );
    }

    #[test]
    fn two_squares_side_by_side() {
        init_logger();
        let req = request(
            vec![rect("a", 100.0, 100.0), rect("b", 100.0, 100.0)],
            (300.0, 300.0),
            5.0,
            RotationPolicy::None,
        );
        let result = nest(&req).unwrap();
        assert_valid(&result, &req);

        let (w, h) = (result.bounding_width, result.bounding_height);
        assert!((w <= 205.0 && h <= 100.0) || (w <= 100.0 && h <= 205.0), "{w}x{h}");

        let (a, b) = (result.placement("a").unwrap(), result.placement("b").unwrap());
        assert!(min_separation(&a.full, &b.full) >= 5.0 - 1e-6);
    }

    #[test]
    fn too_large_shape_is_rejected_upfront() {
        let req = request(vec![rect("big", 400.0, 400.0)], (300.0, 300.0), 0.0, RotationPolicy::None);
        let err = nest(&req).unwrap_err();
        assert!(matches!(err, NestError::ShapeTooLarge { .. }));
        let msg = err.to_string();
        assert!(msg.contains("big"), "{msg}");
        assert!(msg.contains("too large"), "{msg}");
    }

    #[test_case(RotationPolicy::None, false; "without rotation")]
    #[test_case(RotationPolicy::Quarter, true; "quarter turns")]
    #[test_case(RotationPolicy::Discrete(8), true; "eight orientations")]
    fn rotation_makes_a_long_bar_fit(rotation: RotationPolicy, fits: bool) {
        let req = request(vec![rect("bar", 250.0, 50.0)], (100.0, 300.0), 0.0, rotation);
        match nest(&req) {
            Ok(result) => {
                assert!(fits);
                assert_valid(&result, &req);
                let rotation = result.placements[0].rotation;
                assert!((rotation - 90.0).abs() < 1e-9 || (rotation - 270.0).abs() < 1e-9);
            }
            Err(e) => {
                assert!(!fits);
                assert!(matches!(e, NestError::ShapeTooLarge { .. }));
            }
        }
    }

    #[test_case(250.0, 50.0; "bar")]
    #[test_case(100.0, 50.0; "short bar")]
    #[test_case(123.4, 56.7; "fractional")]
    #[test_case(1000.0, 3.0; "long strip")]
    #[test_case(0.3, 0.1; "tiny")]
    fn quarter_turn_fits_an_exactly_matching_sheet(w: f64, h: f64) {
        let req = request(vec![rect("bar", w, h)], (h, w), 0.0, RotationPolicy::Quarter);
        let result = nest(&req).unwrap();
        assert_valid(&result, &req);
        let rotation = result.placements[0].rotation;
        assert!(rotation == 90.0 || rotation == 270.0, "{rotation}");
        assert!((result.bounding_width - h).abs() < 1e-9);
        assert!((result.bounding_height - w).abs() < 1e-9);
    }

    #[test]
    fn ten_squares_on_a_small_sheet_never_overlap() {
        let shapes = (0..10).map(|i| rect(&format!("sq{i}"), 50.0, 50.0)).collect_vec();
        let req = request(shapes, (120.0, 120.0), 2.0, RotationPolicy::None);
        match nest(&req) {
            Ok(result) => assert_valid(&result, &req),
            Err(e) => assert!(matches!(e, NestError::AllStrategiesFailed { .. }), "{e}"),
        }
    }

    #[test]
    fn four_squares_on_a_small_sheet_form_a_grid() {
        let shapes = (0..4).map(|i| rect(&format!("sq{i}"), 50.0, 50.0)).collect_vec();
        let req = request(shapes, (120.0, 120.0), 2.0, RotationPolicy::None);
        let result = nest(&req).unwrap();
        assert_valid(&result, &req);
        assert_eq!((result.bounding_width, result.bounding_height), (102.0, 102.0));
    }

    #[test]
    fn failure_reason_names_the_shape() {
        let shapes = (0..5).map(|i| rect(&format!("sq{i}"), 50.0, 50.0)).collect_vec();
        let req = request(shapes, (120.0, 120.0), 2.0, RotationPolicy::None);
        match nest(&req).unwrap_err() {
            NestError::AllStrategiesFailed { reason } => {
                assert!(reason.starts_with("could not place sq"), "{reason}")
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test_case(10.0, 10.0; "small")]
    #[test_case(300.0, 200.0; "exact fit")]
    #[test_case(299.5, 0.5; "sliver")]
    fn single_rectangle_lands_at_the_origin(w: f64, h: f64) {
        let mut shape = rect("r", w, h);
        //anywhere in the input
        shape.points.iter_mut().for_each(|p| {
            p[0] += 1234.5;
            p[1] -= 77.0;
        });
        let req = request(vec![shape], (300.0, 200.0), 5.0, RotationPolicy::Quarter);
        let result = nest(&req).unwrap();
        let placed = &result.placements[0];
        assert_eq!(placed.rotation, 0.0);
        assert_eq!(placed.bbox.min_corner(), Point(0.0, 0.0));
        assert_eq!((result.bounding_width, result.bounding_height), (w, h));
    }

    #[test]
    fn irregular_shapes_are_nested_validly() {
        init_logger();
        let req = mixed_request();
        let result = nest(&req).unwrap();
        assert_valid(&result, &req);
        assert!(result.density > 0.0 && result.density <= 1.0 + 1e-9);
        assert!(result.strategy.is_some());
        assert!(result.n_candidates > 0);

        //the spacing also holds for the output geometry, up to what simplification cut off
        let cut_off = |p: &PlacedShape| {
            p.full
                .points
                .iter()
                .map(|v| p.simplified.edge_iter().map(|e| e.distance_to(v)).fold(f64::INFINITY, f64::min))
                .fold(0.0, f64::max)
        };
        let disc = result.placements.iter().find(|p| p.id == "disc").unwrap();
        assert!(disc.full.n_points() > disc.simplified.n_points());
        assert!(cut_off(disc) < 0.1);
        for (a, b) in result.placements.iter().tuple_combinations() {
            let separation = min_separation(&a.full, &b.full);
            let allowed = req.spacing - cut_off(a) - cut_off(b) - 1e-6;
            assert!(separation >= allowed, "{} and {}: {separation} < {allowed}", a.id, b.id);
        }
    }

    #[test]
    fn identical_requests_give_identical_layouts() {
        let req = mixed_request();
        let a = nest(&req).unwrap();
        let b = nest(&req).unwrap();
        assert_eq!(a.strategy, b.strategy);
        for (pa, pb) in a.placements.iter().zip(&b.placements) {
            assert_eq!(pa.id, pb.id);
            assert_eq!(pa.full, pb.full);
            assert_eq!(pa.d_transf, pb.d_transf);
        }
    }

    #[test]
    fn parallel_evaluation_does_not_change_the_layout() {
        let req = mixed_request();
        let sequential = Nester::new(NestConfig {
            parallel: false,
            ..NestConfig::default()
        });
        let a = sequential.nest(&req).unwrap();
        let b = Nester::default().nest(&req).unwrap();
        assert_eq!(a.points_by_id(), b.points_by_id());
    }

    #[test]
    fn all_strategies_beat_every_single_strategy() {
        let req = mixed_request();
        let best = nest(&req).unwrap();
        for kind in StrategyKind::ALL {
            let single = Nester::new(NestConfig {
                strategies: vec![kind],
                ..NestConfig::default()
            });
            if let Ok(result) = single.nest(&req) {
                assert!(best.bounding_area() <= result.bounding_area() + 1e-9, "{kind}");
                assert_eq!(result.strategy, Some(kind));
            }
        }
    }

    #[test]
    fn placement_transforms_map_original_points() {
        let req = mixed_request();
        let result = nest(&req).unwrap();
        for (placed, ext) in result.placements.iter().zip(&req.shapes) {
            let t = placed.d_transf.compose();
            for (orig, final_p) in ext.points.iter().zip(&placed.full.points) {
                let mut p = Point::from(*orig);
                p.transform(&t);
                assert!(p.distance_to(final_p) < 1e-6, "{}", placed.id);
            }
        }
    }

    #[test]
    fn result_lookup_by_id() {
        let req = mixed_request();
        let result = nest(&req).unwrap();
        let points = result.points_by_id();
        assert_eq!(points.len(), req.shapes.len());
        for shape in &req.shapes {
            assert_eq!(points[&shape.id].len(), shape.points.len());
            assert!(result.placement(&shape.id).is_some());
        }
        assert!(result.placement("missing").is_none());
    }

    #[test]
    fn open_contours_are_nested() {
        let line = ExtShape {
            id: "cut".into(),
            points: vec![[0.0, 0.0], [150.0, 0.0]],
            closed: false,
        };
        let req = request(vec![line, rect("r", 100.0, 100.0)], (300.0, 300.0), 10.0, RotationPolicy::None);
        let result = nest(&req).unwrap();
        assert_valid(&result, &req);
    }

    #[test]
    fn identical_open_contours_never_share_a_position() {
        let line = |id: &str| ExtShape {
            id: id.into(),
            points: vec![[0.0, 0.0], [100.0, 0.0]],
            closed: false,
        };
        let req = request(vec![line("cut1"), line("cut2")], (300.0, 100.0), 0.0, RotationPolicy::None);
        let result = nest(&req).unwrap();
        assert_valid(&result, &req);
        let (a, b) = (&result.placements[0], &result.placements[1]);
        assert_ne!(a.full, b.full);
        assert!(!collides(&a.full, &b.full, 0.0));
        //end to end along the bottom of the sheet
        assert_eq!((result.bounding_width, result.bounding_height), (200.0, 0.0));
    }

    #[test]
    fn empty_request_yields_an_empty_layout() {
        let req = request(vec![], (300.0, 300.0), 5.0, RotationPolicy::None);
        let result = nest(&req).unwrap();
        assert!(result.placements.is_empty());
        assert_eq!((result.bounding_width, result.bounding_height), (0.0, 0.0));
        assert_eq!(result.strategy, None);
    }

    #[test]
    fn cancellation_between_shapes() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let nester = Nester::new(NestConfig {
            parallel: false,
            ..NestConfig::default()
        })
        .with_cancellation_checker(Box::new(move || counter.fetch_add(1, Ordering::SeqCst) >= 3));
        let err = nester.nest(&mixed_request()).unwrap_err();
        assert_eq!(err, NestError::Cancelled);
        assert!(polls.load(Ordering::SeqCst) >= 4);
    }

    #[test]
    fn cancelled_before_start() {
        let nester = Nester::default().with_cancellation_checker(Box::new(|| true));
        let req = request(vec![], (300.0, 300.0), 0.0, RotationPolicy::None);
        assert_eq!(nester.nest(&req).unwrap_err(), NestError::Cancelled);
    }

    #[test_case(vec![rect("a", 10.0, 10.0), rect("a", 20.0, 20.0)], NestError::DuplicateId { id: "a".into() }; "duplicate id")]
    #[test_case(vec![ExtShape { id: "p".into(), points: vec![[1.0, 1.0]], closed: true }], NestError::DegenerateShape { id: "p".into() }; "single point")]
    fn invalid_shapes(shapes: Vec<ExtShape>, expected: NestError) {
        let req = request(shapes, (300.0, 300.0), 0.0, RotationPolicy::None);
        assert_eq!(nest(&req).unwrap_err(), expected);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let nan = ExtShape {
            id: "nan".into(),
            points: vec![[0.0, 0.0], [f64::NAN, 1.0], [1.0, 1.0]],
            closed: true,
        };
        let req = request(vec![nan], (300.0, 300.0), 0.0, RotationPolicy::None);
        assert!(matches!(nest(&req), Err(NestError::InvalidShape { .. })));

        let req = request(vec![], (0.0, 300.0), 0.0, RotationPolicy::None);
        assert!(matches!(nest(&req), Err(NestError::InvalidSheet { .. })));

        let req = request(vec![], (300.0, 300.0), -1.0, RotationPolicy::None);
        assert!(matches!(nest(&req), Err(NestError::InvalidSpacing { .. })));

        let req = request(vec![], (300.0, 300.0), 0.0, RotationPolicy::Custom(vec![f64::INFINITY]));
        assert!(matches!(nest(&req), Err(NestError::InvalidRotation { .. })));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let nester = Nester::new(NestConfig {
            strategies: vec![],
            ..NestConfig::default()
        });
        let req = request(vec![rect("a", 10.0, 10.0)], (300.0, 300.0), 0.0, RotationPolicy::None);
        assert!(matches!(nester.nest(&req), Err(NestError::InvalidConfig { .. })));
    }

    #[test]
    fn request_from_json() {
        let json = r#"{
            "shapes": [
                {"id": "a", "points": [[0, 0], [100, 0], [100, 100], [0, 100]]},
                {"id": "b", "points": [[0, 0], [80, 0]], "closed": false}
            ],
            "sheet_width": 300,
            "sheet_height": 300,
            "spacing": 5,
            "rotation": {"type": "quarter"}
        }"#;
        let req: NestRequest = serde_json::from_str(json).unwrap();
        assert!(req.shapes[0].closed);
        assert!(!req.shapes[1].closed);
        let result = nest(&req).unwrap();
        assert_valid(&result, &req);
    }
}
