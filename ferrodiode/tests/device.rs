use ferrodiode::device::{Device, LayerStackBuilder, MaterialDatabase};
use ferrodiode::{ConfigurationError, FerroDiodeError};
use std::io::Write;

#[test]
fn unknown_materials_are_configuration_errors() {
    let info_desk = MaterialDatabase::default();
    let result = LayerStackBuilder::<f64, _, _, _, _>::new()
        .with_info_desk(&info_desk)
        .with_bottom_electrode("Unobtainium")
        .with_top_electrode("Au")
        .with_ferroelectric("HfO2", 10e-9)
        .build();
    assert!(matches!(
        result,
        Err(ConfigurationError::UnknownProperty { .. })
    ));

    let result = LayerStackBuilder::<f64, _, _, _, _>::new()
        .with_info_desk(&info_desk)
        .with_bottom_electrode("Ti")
        .with_top_electrode("Au")
        .with_ferroelectric("Unobtainium", 10e-9)
        .build();
    let error: FerroDiodeError = result.unwrap_err().into();
    assert!(matches!(error, FerroDiodeError::Configuration(_)));
}

#[test]
fn switching_voltage_from_a_device_file() {
    let contents = r#"
temperature = 300.0

[electrodes]
bottom = "Pt"
top = "Pt"

[ferroelectric]
material = "BaTiO3"
thickness = 5.0
polarization = 0.26
coercive_field = 1.0e7

[oxide]
material = "SiO2"
thickness = 0.0
"#;
    let path = std::env::temp_dir().join(format!("ferrodiode-bto-{}.toml", std::process::id()));
    std::fs::File::create(&path)
        .unwrap()
        .write_all(contents.as_bytes())
        .unwrap();
    let device: Device<f64> = Device::build(path.clone()).unwrap();
    std::fs::remove_file(path).unwrap();

    let stack = device.layer_stack(&device.info_desk()).unwrap();
    assert_eq!(stack.active_layers().count(), 1);
    assert_eq!(stack.built_in_voltage(), 0.);

    // A bare ferroelectric between ideal electrodes switches at Ec dfe
    let dielectric = device.dielectric_stack(&stack).unwrap();
    let voltage = dielectric
        .switching_voltage(device.ferroelectric.coercive_field)
        .unwrap();
    approx::assert_relative_eq!(voltage, 1.0e7 * 5e-9, max_relative = 1e-9);
}
