use screenguard_common::MonitorConfig;
use screenguard_proximity_core::{
    DistanceEstimator, MonitorStatus, ProximityEvent, ProximityPipeline, ProximityState,
    TraceBuilder,
};

fn calibrated_at(width: f64) -> ProximityPipeline {
    let mut pipeline = ProximityPipeline::with_defaults();
    for i in 0..30 {
        let events = pipeline.process(width).unwrap();
        if i < 29 {
            assert_eq!(
                events,
                vec![ProximityEvent::CalibrationProgress {
                    collected: i + 1,
                    needed: 30
                }]
            );
        } else {
            match events.as_slice() {
                [ProximityEvent::CalibrationComplete { baseline }] => {
                    assert!((baseline - width).abs() < 1e-12)
                }
                other => panic!("expected calibration completion, got {other:?}"),
            }
        }
    }
    pipeline
}

fn transitions(events: &[ProximityEvent]) -> Vec<&ProximityEvent> {
    events.iter().filter(|e| e.is_transition()).collect()
}

#[test]
fn leaning_in_raises_too_close_once() {
    let mut pipeline = calibrated_at(0.20);

    let mut events = Vec::new();
    for _ in 0..10 {
        pipeline.process_into(0.40, &mut events).unwrap();
    }

    let first = events.first().and_then(ProximityEvent::distance_cm).unwrap();
    assert!((first - 30.0).abs() < 1e-9);

    let alerts = transitions(&events);
    assert_eq!(alerts.len(), 1);
    match alerts[0] {
        ProximityEvent::BecameTooClose { distance_cm } => {
            assert!((distance_cm - 30.0).abs() < 1e-9)
        }
        other => panic!("expected too-close alert, got {other:?}"),
    }
    assert_eq!(pipeline.state(), Some(ProximityState::TooClose));
    assert!((pipeline.smoothed_distance().unwrap() - 30.0).abs() < 1e-9);
}

#[test]
fn approach_then_retreat_emits_one_alert_each_way() {
    let mut pipeline = calibrated_at(0.20);

    let mut events = Vec::new();
    for _ in 0..5 {
        pipeline.process_into(0.20, &mut events).unwrap();
    }
    assert!(transitions(&events).is_empty());
    assert_eq!(pipeline.state(), Some(ProximityState::Safe));

    events.clear();
    for _ in 0..10 {
        pipeline.process_into(0.40, &mut events).unwrap();
    }
    let alerts = transitions(&events);
    assert_eq!(alerts.len(), 1);
    match alerts[0] {
        ProximityEvent::BecameTooClose { distance_cm } => assert!(*distance_cm < 50.0),
        other => panic!("expected too-close alert, got {other:?}"),
    }
    assert!((pipeline.smoothed_distance().unwrap() - 30.0).abs() < 1e-9);

    events.clear();
    for _ in 0..10 {
        pipeline.process_into(0.20, &mut events).unwrap();
    }
    let alerts = transitions(&events);
    assert_eq!(alerts.len(), 1);
    match alerts[0] {
        ProximityEvent::BecameSafe { distance_cm } => assert!(*distance_cm >= 50.0),
        other => panic!("expected safe alert, got {other:?}"),
    }
    assert!((pipeline.smoothed_distance().unwrap() - 60.0).abs() < 1e-9);
}

#[test]
fn constant_input_only_updates_distance() {
    let mut pipeline = calibrated_at(0.20);
    let mut events = Vec::new();
    for _ in 0..50 {
        pipeline.process_into(0.20, &mut events).unwrap();
    }
    assert_eq!(events.len(), 50);
    assert!(events
        .iter()
        .all(|e| matches!(e, ProximityEvent::DistanceUpdated { .. })));
    assert_eq!(pipeline.stats().transitions, 0);
}

#[test]
fn estimator_reports_reference_distance_for_baseline_width() {
    let estimator = DistanceEstimator::default();
    for baseline in [0.05, 0.2, 0.33, 0.9] {
        assert!((estimator.estimate(baseline, baseline) - 60.0).abs() < 1e-12);
    }
}

#[test]
fn synthetic_trace_transitions_are_stable() {
    let trace = TraceBuilder::approach_and_retreat(0.20, 0.40, 30, 33_333_333)
        .jitter(0.02)
        .build();
    assert_eq!(trace.len(), 115);

    let mut pipeline = ProximityPipeline::with_defaults();
    let mut alerts = Vec::new();
    let mut updates = 0;
    for (index, observation) in trace.iter().enumerate() {
        pipeline
            .process_observation(observation, &mut |event: &ProximityEvent| {
                if event.is_transition() {
                    alerts.push((index, event.clone()));
                }
                if matches!(event, ProximityEvent::DistanceUpdated { .. }) {
                    updates += 1;
                }
            })
            .unwrap();
    }

    assert_eq!(updates, 80);
    assert_eq!(pipeline.stats().no_face_frames, 5);
    assert_eq!(alerts.len(), 2);

    assert_eq!(alerts[0].0, 45);
    match alerts[0].1 {
        ProximityEvent::BecameTooClose { distance_cm } => {
            assert!((distance_cm - 49.675497258316064).abs() < 1e-9)
        }
        ref other => panic!("unexpected event {other:?}"),
    }

    assert_eq!(alerts[1].0, 94);
    match alerts[1].1 {
        ProximityEvent::BecameSafe { distance_cm } => {
            assert!((distance_cm - 52.76158109689144).abs() < 1e-9)
        }
        ref other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn hysteresis_delays_recovery() {
    let trace = TraceBuilder::approach_and_retreat(0.20, 0.40, 30, 33_333_333)
        .jitter(0.02)
        .build();

    let config = MonitorConfig {
        safe_exit_distance_cm: Some(55.0),
        ..Default::default()
    };
    let mut pipeline = ProximityPipeline::new(config).unwrap();

    let mut recovered_at = None;
    for (index, observation) in trace.iter().enumerate() {
        let mut events = Vec::new();
        pipeline.process_observation(observation, &mut events).unwrap();
        if events
            .iter()
            .any(|e| matches!(e, ProximityEvent::BecameSafe { .. }))
        {
            recovered_at = Some(index);
        }
    }

    assert_eq!(recovered_at, Some(95));
    assert_eq!(pipeline.stats().transitions, 2);
}

#[test]
fn status_follows_pipeline_phases() {
    let mut pipeline = ProximityPipeline::with_defaults();
    assert_eq!(pipeline.status().to_string(), "Calibrating (0/30)");

    for _ in 0..30 {
        pipeline.process(0.25).unwrap();
    }
    assert!(matches!(pipeline.status(), MonitorStatus::Calibrated { .. }));

    pipeline.process(0.5).unwrap();
    assert_eq!(pipeline.status().to_string(), "Distance: 30.0 cm");
}

#[test]
fn events_cross_a_channel_in_order() {
    let (mut tx, rx) = std::sync::mpsc::channel();
    let producer = std::thread::spawn(move || {
        let mut pipeline = ProximityPipeline::with_defaults();
        for _ in 0..30 {
            pipeline.process_into(0.25, &mut tx).unwrap();
        }
        pipeline.process_into(0.5, &mut tx).unwrap();
    });

    producer.join().unwrap();
    let received: Vec<ProximityEvent> = rx.iter().collect();
    assert_eq!(received.len(), 32);
    assert_eq!(
        &received[30..],
        &[
            ProximityEvent::DistanceUpdated { distance_cm: 30.0 },
            ProximityEvent::BecameTooClose { distance_cm: 30.0 },
        ]
    );
}
