use driftgrid::{ConfigError, Forcing, SimConfig, Simulator};
use glam::Vec2;

#[test]
fn test_defaults_are_valid() {
    let config = SimConfig::default();
    config.validate().unwrap();
    assert_eq!(config.iterations, 20);
    assert_eq!(config.forcing, Some(Forcing::default()));
    assert_eq!(Forcing::default().velocity, Vec2::new(500.0, 0.0));
}

#[test]
fn test_reference_forcing_cell_scales_with_resolution() {
    let forcing = Forcing::default();
    assert_eq!(forcing.resolve(64, 64).unwrap(), (16, 32));
    assert_eq!(forcing.resolve(16, 16).unwrap(), (4, 8));
    assert_eq!(forcing.resolve(1, 1).unwrap(), (1, 1));
    assert_eq!(forcing.resolve(3, 2).unwrap(), (1, 1));
}

#[test]
fn test_explicit_forcing_must_be_active() {
    let forcing = Forcing::at(0, 3, Vec2::X);
    assert!(matches!(
        forcing.resolve(8, 8),
        Err(ConfigError::ForcingOutOfRange { cell: [0, 3], .. })
    ));
    assert!(Forcing::at(8, 8, Vec2::X).resolve(8, 8).is_ok());
}

#[test]
fn test_partial_json_uses_defaults() {
    let config = SimConfig::from_json_str(r#"{ "resolution": 16, "forcing": null }"#).unwrap();
    assert_eq!(config.resolution, 16);
    assert_eq!(config.forcing, None);
    assert_eq!(config.dt, SimConfig::default().dt);
    assert_eq!(config.iterations, 20);
}

#[test]
fn test_json_forcing_with_explicit_cell() {
    let json = r#"{
        "resolution": 8,
        "viscosity": 0.0,
        "forcing": { "cell": [2, 3], "velocity": [0.0, 250.0] }
    }"#;
    let config = SimConfig::from_json_str(json).unwrap();
    assert_eq!(
        config.forcing,
        Some(Forcing::at(2, 3, Vec2::new(0.0, 250.0)))
    );

    let sim = Simulator::new(config).unwrap();
    assert_eq!(sim.grid().nx(), 8);
}

#[test]
fn test_json_round_trip_of_defaults() {
    let json = SimConfig::default().to_json().unwrap();
    assert_eq!(SimConfig::from_json_str(&json).unwrap(), SimConfig::default());
}

#[test]
fn test_json_validation_errors() {
    assert!(matches!(
        SimConfig::from_json_str(r#"{ "dt": 0.0 }"#),
        Err(ConfigError::InvalidTimeStep(_))
    ));
    assert!(matches!(
        SimConfig::from_json_str(r#"{ "resolution": 4, "forcing": { "cell": [5, 1], "velocity": [1.0, 0.0] } }"#),
        Err(ConfigError::ForcingOutOfRange { .. })
    ));
    assert!(matches!(
        SimConfig::from_json_str("{ resolution: 4 }"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_from_file() {
    let dir = std::env::temp_dir().join(format!("driftgrid-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sim.json");
    std::fs::write(&path, r#"{ "resolution": 32, "diffusion": 0.001 }"#).unwrap();

    let config = SimConfig::load(&path).unwrap();
    assert_eq!(config.resolution, 32);
    assert_eq!(config.diffusion, 0.001);

    let missing = SimConfig::load(dir.join("missing.json"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
    let err = missing.unwrap_err();
    assert!(std::error::Error::source(&err).is_some());

    std::fs::remove_dir_all(&dir).unwrap();
}
