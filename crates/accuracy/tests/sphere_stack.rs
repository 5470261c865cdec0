use accuracy::probe::{DiagnosticSample, WorldError};
use accuracy::{
    inertia_ratio_sphere_stack, measure, AccuracyError, Quantity, Record, RunRecord, Sample,
    SampleSource, SolverSettings, SphereStackConfig, TrackedWorld,
};
use glam::DVec3;
use physics::SolverKind;
use stats::StatisticKind;

fn short_run() -> SphereStackConfig {
    SphereStackConfig {
        duration: 1.0,
        ..SphereStackConfig::default()
    }
}

fn stat(record: &RunRecord, key: &str, kind: StatisticKind) -> f64 {
    record
        .get(key)
        .and_then(|r| r.statistic(kind))
        .unwrap_or_else(|| panic!("missing {key}.{kind}"))
}

fn value(record: &RunRecord, key: &str) -> f64 {
    record
        .get(key)
        .and_then(Record::as_value)
        .unwrap_or_else(|| panic!("missing {key}"))
}

#[test]
fn free_falling_stack_records_every_key() -> anyhow::Result<()> {
    let config = short_run();
    let mut record = RunRecord::new();
    let report = inertia_ratio_sphere_stack(&config, &mut record)?;

    for key in [
        "wallTime",
        "simTime",
        "timeRatio",
        "energy0",
        "energyError",
        "angMomentum0",
        "angMomentumErr",
        "linPositionErr",
        "linVelocityErr",
        "rmsErrorTotal",
        "constraintResidualTotal",
    ] {
        assert!(record.get(key).is_some(), "{key} not recorded");
    }

    // Top sphere of unit mass at z = 4.5 under g = -1.
    assert!((value(&record, "energy0") - 4.5).abs() < 1e-12);
    assert_eq!(value(&record, "angMomentum0"), 0.0);
    assert!((value(&record, "simTime") - 1.0).abs() <= 1.1 * config.dt);

    // v = g t after one second, p = g t^2 / 2 up to the O(dt) integrator error.
    assert!((stat(&record, "linVelocityErr", StatisticKind::MaxAbs) - 1.0).abs() < 1e-3);
    assert!((stat(&record, "linPositionErr", StatisticKind::MaxAbs) - 0.5).abs() < 1e-3);
    assert!(stat(&record, "energyError", StatisticKind::MaxAbs) < 1e-3);
    assert_eq!(stat(&record, "angMomentumErr", StatisticKind::MaxAbs), 0.0);

    assert_eq!(report.steps, config.steps());
    assert_eq!(report.lin_velocity.count(), report.steps);
    assert_eq!(report.constraint_residual.count(), report.steps);
    Ok(())
}

#[test]
fn direct_solver_reports_no_diagnostics() -> anyhow::Result<()> {
    let config = SphereStackConfig {
        solver: SolverKind::Direct,
        ..short_run()
    };
    let mut record = RunRecord::new();
    let report = inertia_ratio_sphere_stack(&config, &mut record)?;

    assert_eq!(report.rms_error.count(), 0);
    assert_eq!(report.constraint_residual.count(), 0);
    for kind in [StatisticKind::MaxAbs, StatisticKind::Mean, StatisticKind::Variance] {
        assert_eq!(stat(&record, "rmsErrorTotal", kind), 0.0);
    }
    Ok(())
}

#[test]
fn pushing_the_top_sphere_loads_the_stack() -> anyhow::Result<()> {
    let force = -5.0;
    let config = SphereStackConfig {
        force,
        ..short_run()
    };
    let mut record = RunRecord::new();
    inertia_ratio_sphere_stack(&config, &mut record)?;

    // Unsupported, the top sphere would reach |g + f| t = 6 m/s. Resting on
    // the stack it drags all five along at roughly |g + f / 5| t = 2 m/s.
    let speed = stat(&record, "linVelocityErr", StatisticKind::MaxAbs);
    assert!(speed > 1.5 && speed < 3.0, "speed {speed}");
    Ok(())
}

#[test]
fn mass_sweep_runs_every_mass() -> anyhow::Result<()> {
    let base = SphereStackConfig {
        duration: 0.05,
        ..SphereStackConfig::default()
    };
    let sweep = base.mass_sweep();
    assert_eq!(sweep.len(), 6);

    for config in &sweep {
        let mut record = RunRecord::new();
        config.record_properties(&mut record);
        let report = inertia_ratio_sphere_stack(config, &mut record)?;
        assert!((report.energy0 - config.mass * 4.5).abs() < 1e-9 * config.mass);
        assert_eq!(value(&record, "mass"), config.mass);
        assert_eq!(
            record.get("engine"),
            Some(&Record::Property("sequential".to_string()))
        );
    }
    Ok(())
}

#[test]
fn report_serializes_by_record_name() -> anyhow::Result<()> {
    let config = SphereStackConfig {
        duration: 0.01,
        ..SphereStackConfig::default()
    };
    let mut record = RunRecord::new();
    config.record_properties(&mut record);
    inertia_ratio_sphere_stack(&config, &mut record)?;

    let json = serde_json::to_value(&record)?;
    assert_eq!(json["engine"], "sequential");
    assert_eq!(json["iters"], "50");
    assert!(json["energyError"]["MaxAbs"].is_number());
    assert!(json["linVelocityErr"]["Variance"].is_number());
    Ok(())
}

/// A body drifting at constant velocity whose clock can be made to lag.
struct Drifter {
    time: f64,
    dt: f64,
    clock_rate: f64,
    pos: DVec3,
    vel: DVec3,
    energy_as_vector: bool,
}

impl Drifter {
    fn new() -> Self {
        Self {
            time: 0.0,
            dt: 0.0,
            clock_rate: 1.0,
            pos: DVec3::ZERO,
            vel: DVec3::new(1.0, 0.0, 0.0),
            energy_as_vector: false,
        }
    }
}

impl SampleSource for Drifter {
    fn sim_time(&self) -> f64 {
        self.time
    }

    fn sample(&self, quantity: Quantity) -> Sample {
        match quantity {
            Quantity::Position => Sample::Vector(self.pos),
            Quantity::LinearVelocity => Sample::Vector(self.vel),
            Quantity::AngularVelocity | Quantity::AngularMomentum => Sample::Vector(DVec3::ZERO),
            Quantity::Energy if self.energy_as_vector => Sample::Vector(DVec3::ONE),
            Quantity::Energy => Sample::Scalar(0.5 * self.vel.length_squared()),
        }
    }

    fn diagnostics(&self) -> Option<DiagnosticSample> {
        Some(DiagnosticSample {
            rms_error: 0.25,
            constraint_residual: -0.5,
        })
    }
}

impl TrackedWorld for Drifter {
    fn configure_solver(&mut self, settings: SolverSettings) -> Result<(), WorldError> {
        self.dt = settings.dt;
        Ok(())
    }

    fn apply_force(&mut self, _force: DVec3) -> Result<(), WorldError> {
        Ok(())
    }

    fn step(&mut self) -> Result<(), WorldError> {
        self.pos += self.vel * self.dt;
        self.time += self.dt * self.clock_rate;
        Ok(())
    }
}

#[test]
fn custom_world_is_measured_through_the_trait() -> anyhow::Result<()> {
    let config = SphereStackConfig {
        dt: 0.01,
        duration: 1.0,
        ..SphereStackConfig::default()
    };
    let mut world = Drifter::new();
    let mut record = RunRecord::new();
    let report = measure(&mut world, &config, &mut record)?;

    assert_eq!(report.energy.value(StatisticKind::MaxAbs), Some(0.0));
    assert!((stat(&record, "linPositionErr", StatisticKind::MaxAbs) - 1.0).abs() < 1e-9);
    assert_eq!(stat(&record, "rmsErrorTotal", StatisticKind::Mean), 0.25);
    assert_eq!(stat(&record, "constraintResidualTotal", StatisticKind::MaxAbs), 0.5);
    Ok(())
}

#[test]
fn lagging_clock_is_reported_as_drift() {
    let config = SphereStackConfig {
        dt: 0.01,
        duration: 1.0,
        ..SphereStackConfig::default()
    };
    let mut world = Drifter {
        clock_rate: 0.5,
        ..Drifter::new()
    };
    let mut record = RunRecord::new();
    let err = measure(&mut world, &config, &mut record).unwrap_err();

    assert!(matches!(
        err,
        AccuracyError::SimDurationDrift { expected, actual, .. }
            if expected == 1.0 && (actual - 0.5).abs() < 1e-9
    ));
    // The wall time is taken before the check and survives the failure.
    assert!(record.get("wallTime").is_some());
    assert!(record.get("simTime").is_none());
}

#[test]
fn misshapen_sample_is_an_error() {
    let mut world = Drifter {
        energy_as_vector: true,
        ..Drifter::new()
    };
    let err = measure(&mut world, &short_run(), &mut RunRecord::new()).unwrap_err();
    assert!(matches!(
        err,
        AccuracyError::SampleShape {
            quantity: Quantity::Energy,
            expected: "scalar",
            found: "vector",
        }
    ));
}

#[test]
fn invalid_config_is_rejected_before_stepping() {
    let config = SphereStackConfig {
        dt: 0.0,
        ..SphereStackConfig::default()
    };
    let mut world = Drifter::new();
    let err = measure(&mut world, &config, &mut RunRecord::new()).unwrap_err();
    assert!(matches!(err, AccuracyError::InvalidConfig(_)));
    assert_eq!(world.sim_time(), 0.0);
}
