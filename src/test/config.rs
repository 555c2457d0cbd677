use crate::game::config::{builtin_stages, BoxConfig, SceneConfig};
use crate::game::GameError;

fn cube(name: Option<&str>) -> BoxConfig {
    BoxConfig {
        name: name.map(str::to_string),
        position: [0.0, 0.0, 0.0],
        size: [1.0, 1.0, 1.0],
        color: "#ffffff".to_string(),
        mass: 1.0,
        tracked: false,
        guarded: false,
        visible: true,
        fixed_rotation: false,
    }
}

fn stage(boxes: Vec<BoxConfig>) -> SceneConfig {
    SceneConfig {
        player: cube(None),
        boxes,
    }
}

#[test]
fn test_builtin_stages() {
    let stages = builtin_stages().unwrap();
    assert_eq!(stages.len(), 2);

    let room = &stages[0];
    assert_eq!(room.tracked_names(), vec!["blue", "green"]);
    assert_eq!(room.guarded_names(), vec!["blue"]);
    for stage in &stages {
        for name in ["key", "chest", "door"] {
            assert!(
                stage.boxes.iter().any(|b| b.name.as_deref() == Some(name)),
                "every stage needs a {}",
                name
            );
        }
    }
}

#[test]
fn test_optional_fields_have_defaults() {
    let config = SceneConfig::from_json(
        r##"{
            "player": { "position": [0, 0, 0], "size": [1, 1, 1], "color": "#7000a0", "mass": 2 },
            "boxes": [ { "position": [1, 2, 3], "size": [1, 1, 1], "color": "red", "mass": 0 } ]
        }"##,
    )
    .unwrap();
    let b = &config.boxes[0];
    assert_eq!(b.name, None);
    assert!(b.visible);
    assert!(!b.tracked && !b.guarded && !b.fixed_rotation);
    assert_eq!(b.position, [1.0, 2.0, 3.0]);
}

#[test]
fn test_malformed_json_is_an_error() {
    let result = SceneConfig::from_json(r#"{ "player": { "position": [0, 0] } }"#);
    assert!(matches!(result, Err(GameError::Json(_))));
}

#[test]
fn test_validation() {
    let mut tracked_anonymous = cube(None);
    tracked_anonymous.tracked = true;
    assert!(matches!(
        stage(vec![tracked_anonymous]).validate(),
        Err(GameError::Config(_))
    ));

    let mut tracked_key = cube(Some("key"));
    tracked_key.tracked = true;
    assert!(matches!(
        stage(vec![tracked_key]).validate(),
        Err(GameError::Config(_))
    ));

    let mut twice = cube(Some("blue"));
    twice.tracked = true;
    assert!(stage(vec![twice.clone(), twice]).validate().is_err());

    let mut badly_colored = cube(Some("blue"));
    badly_colored.color = "#zzzzzz".to_string();
    assert!(matches!(
        stage(vec![badly_colored]).validate(),
        Err(GameError::Color(_))
    ));

    let mut flat = cube(None);
    flat.size = [1.0, 0.0, 1.0];
    assert!(stage(vec![flat]).validate().is_err());

    let mut not_a_number = cube(None);
    not_a_number.size = [1.0, f32::NAN, 1.0];
    assert!(stage(vec![not_a_number]).validate().is_err());

    let mut guarded = cube(Some("blue"));
    guarded.guarded = true;
    guarded.tracked = true;
    assert!(stage(vec![guarded, cube(Some("green"))]).validate().is_ok());
}

#[test]
fn test_player_needs_a_volume() {
    let sizes = [
        [0.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, f32::NAN],
        [f32::INFINITY, 1.0, 1.0],
    ];
    for size in sizes {
        let mut config = stage(vec![cube(Some("blue"))]);
        config.player.size = size;
        assert!(
            matches!(config.validate(), Err(GameError::Config(_))),
            "player size {:?} was accepted",
            size
        );
    }
    assert!(stage(Vec::new()).validate().is_ok());
}
