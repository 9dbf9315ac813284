use lean_core::testing::FakeCliDirectory;
use lean_core::{Language, LeanError, OptionKind};

#[test]
fn test_every_option_round_trips_through_its_storage() {
    let fixture = FakeCliDirectory::new().unwrap();
    let registry = fixture.registry();

    for option in registry.options() {
        let value = match option.kind() {
            OptionKind::Choice(choices) => choices[choices.len() - 1],
            OptionKind::Plain => "some-value",
            OptionKind::Image => "custom/lean:2024.1",
        };
        registry
            .get_option_by_key(option.key())
            .unwrap()
            .set_value(value)
            .unwrap();
        assert_eq!(option.get_value().unwrap().as_deref(), Some(value));
    }
}

#[test]
fn test_values_persist_across_registry_instances() {
    let fixture = FakeCliDirectory::new().unwrap();
    fixture
        .registry()
        .get_option_by_key("default-language")
        .unwrap()
        .set_value("csharp")
        .unwrap();

    assert_eq!(
        fixture.registry().default_language().unwrap(),
        Language::CSharp
    );
}

#[test]
fn test_invalid_default_language_is_rejected() {
    let fixture = FakeCliDirectory::new().unwrap();
    let registry = fixture.registry();
    let option = registry.get_option_by_key("default-language").unwrap();

    let error = option.set_value("fsharp").unwrap_err();
    assert!(matches!(error, LeanError::InvalidChoice { .. }));
    assert!(error.to_string().contains("python, csharp"));
    assert_eq!(option.get_value().unwrap().as_deref(), Some("python"));
}

#[test]
fn test_unknown_option_error_mentions_documentation() {
    let fixture = FakeCliDirectory::new().unwrap();
    let error = fixture.registry().get_option_by_key("engine").unwrap_err();
    assert!(error.to_string().contains("https://www.lean.io/docs"));
}

#[test]
fn test_image_options_reject_malformed_names_before_writing() {
    let fixture = FakeCliDirectory::new().unwrap();
    let registry = fixture.registry();

    for key in ["engine-image", "research-image"] {
        let option = registry.get_option_by_key(key).unwrap();
        for value in ["lean:", ":tag", "registry/"] {
            assert!(matches!(
                option.set_value(value),
                Err(LeanError::InvalidImage(_))
            ));
        }
        assert!(!option.is_set().unwrap());
    }
    assert!(!fixture.path_manager().general_config_file().exists());
}

#[test]
fn test_image_option_stores_tagged_name() {
    let fixture = FakeCliDirectory::new().unwrap();
    let registry = fixture.registry();

    registry.engine_image_option().set_value("custom/lean").unwrap();

    assert_eq!(
        registry.engine_image_option().get_value().unwrap().as_deref(),
        Some("custom/lean:latest")
    );
}
