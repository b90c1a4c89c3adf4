use pr_survey::*;

fn two_strip_survey() -> Survey {
    Survey {
        version: SURVEY_VERSION,
        name: "Two strips".to_string(),
        flow: FlowConditions {
            inlet_pressure_psi: 1000.0,
            ..FlowConditions::default()
        },
        terrain: TerrainCosts::default(),
        strips: vec![
            StripDef {
                points: vec![PointDef::origin(0.0, 0.0, 100.0)],
            },
            StripDef {
                points: vec![PointDef::linked(
                    500.0,
                    20.0,
                    120.0,
                    LandClass::Water,
                    TreeClass::Large,
                    0,
                    0,
                )],
            },
        ],
    }
}

#[test]
fn roundtrip_yaml() {
    let survey = two_strip_survey();
    let path = std::env::temp_dir().join("pr_survey_roundtrip.yaml");

    save_yaml(&path, &survey).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(survey, loaded);
}

#[test]
fn roundtrip_json() {
    let survey = two_strip_survey();
    let path = std::env::temp_dir().join("pr_survey_roundtrip.json");

    save_json(&path, &survey).unwrap();
    let loaded = load_survey(&path).unwrap();
    assert_eq!(survey, loaded);
}

#[test]
fn omitted_sections_take_defaults() {
    let yaml = r#"
version: 1
name: Minimal
strips:
  - points:
      - { x: 0, y: 0, z: 0 }
  - points:
      - { x: 10, y: 0, z: 5, land: rock, links: [0, 0] }
"#;
    let survey: Survey = serde_yaml::from_str(yaml).unwrap();
    validate_survey(&survey).unwrap();

    assert_eq!(survey.flow, FlowConditions::default());
    assert_eq!(survey.terrain, TerrainCosts::default());
    assert_eq!(survey.strips[1].points[0].trees, TreeClass::None);
    assert_eq!(survey.terrain.factor(LandClass::Rock, TreeClass::None), 2.5);
}

#[test]
fn invalid_survey_is_not_saved() {
    let mut survey = two_strip_survey();
    survey.strips[1].points[0].links = Some([1, 1]);
    let path = std::env::temp_dir().join("pr_survey_invalid.yaml");

    let err = save_yaml(&path, &survey).unwrap_err();
    assert!(matches!(
        err,
        SurveyError::Validation(ValidationError::LinkOutOfRange { .. })
    ));
}
