use super::{assert_close, ndc_of};
use crate::game::msg::MsgClass;
use crate::game::save::{save_game, MemoryStorage, SaveState};
use crate::game::{Game, GameError, Language, Pick, RunState, SceneConfig};
use crate::render::HeadlessRenderer;
use crate::ui::input::InputFlags;

use cgmath::{Vector2, Vector3};

const ROOM: &str = r##"{
    "player": { "position": [0, -3, 0], "size": [1, 1, 1], "color": "#7000a0", "mass": 2 },
    "boxes": [
        { "name": "floor", "position": [0, -4, 0], "size": [40, 1, 20], "color": "#222222", "mass": 0 },
        { "name": "blue", "position": [3, -3, 0], "size": [1, 1, 1], "color": "#00a0ff", "mass": 2, "tracked": true, "guarded": true, "fixed_rotation": true },
        { "name": "green", "position": [3, -3, -4], "size": [1, 1, 1], "color": "#3bb143", "mass": 2, "tracked": true, "fixed_rotation": true },
        { "name": "key", "position": [-4, -3, 0], "size": [1, 1, 1], "color": "#fff135", "mass": 2 },
        { "name": "chest", "position": [6, -3, 2], "size": [1, 1, 1], "color": "#7b3f00", "mass": 2 },
        { "name": "door", "position": [-1.5, -1, 0], "size": [1, 5, 3], "color": "#7b3f00", "mass": 0 }
    ]
}"##;

const CELLAR: &str = r##"{
    "player": { "position": [0, -3, 0], "size": [1, 1, 1], "color": "#7000a0", "mass": 2 },
    "boxes": [
        { "name": "floor", "position": [0, -4, 0], "size": [40, 1, 20], "color": "#222222", "mass": 0 },
        { "name": "orange", "position": [2, -3, -3], "size": [1, 1, 1], "color": "#ff8c00", "mass": 2, "tracked": true, "guarded": true },
        { "name": "key", "position": [-4, -3, 0], "size": [1, 1, 1], "color": "#fff135", "mass": 2 },
        { "name": "chest", "position": [4, -3, 0], "size": [1, 1, 1], "color": "#7b3f00", "mass": 2 }
    ]
}"##;

fn new_game() -> Game {
    let stages = [ROOM, CELLAR]
        .iter()
        .map(|json| SceneConfig::from_json(json).unwrap())
        .collect();
    Game::new(stages).unwrap()
}

fn playing() -> Game {
    let mut game = new_game();
    game.start(Language::English);
    game
}

fn run(game: &mut Game, ticks: usize) {
    let mut renderer = HeadlessRenderer::new();
    for _ in 0..ticks {
        game.tick(&mut renderer);
    }
}

fn position_of(game: &Game, name: &str) -> Vector3<f32> {
    game.scene()
        .get_game_object_by_name(name)
        .unwrap_or_else(|| panic!("no object named {}", name))
        .position()
}

fn pointer_at(game: &Game, name: &str) -> Vector2<f32> {
    ndc_of(game.camera(), position_of(game, name))
}

fn click_on(game: &mut Game, name: &str) -> Pick {
    let ndc = pointer_at(game, name);
    game.click(ndc).unwrap()
}

fn last_message(game: &Game) -> &str {
    game.log().last().map_or("", |(text, _)| text.as_str())
}

fn has_message(game: &Game, key: &str) -> bool {
    let text = game.text(key);
    game.log().messages.iter().any(|(m, _)| m == text)
}

fn is_grounded(game: &Game) -> bool {
    game.scene()
        .player()
        .and_then(|p| p.player())
        .map_or(false, |ctrl| ctrl.is_grounded())
}

#[test]
fn test_menu_until_started() {
    let mut game = new_game();
    assert_eq!(game.run_state(), RunState::MainMenu);
    assert_eq!(game.hud().text(), game.text("title"));

    let mut renderer = HeadlessRenderer::new();
    game.tick(&mut renderer);
    assert_eq!(renderer.frames(), 1);
    assert_eq!(game.ticks(), 0);
    assert_eq!(position_of(&game, "blue"), Vector3::new(3.0, -3.0, 0.0));
}

#[test]
fn test_click_ignored_in_menu() {
    let mut game = new_game();
    assert_eq!(click_on(&mut game, "key"), Pick::Nothing);
    assert!(game.scene().get_game_object_by_name("key").is_some());
}

#[test]
fn test_start_selects_language() {
    let mut game = new_game();
    game.start(Language::Arabic);
    assert_eq!(game.run_state(), RunState::Playing);
    assert_eq!(game.language(), Language::Arabic);
    assert_eq!(game.hud().text(), "احصل على المفتاح وافتح الصندوق للفوز!");

    // only the first start counts
    game.start(Language::English);
    assert_eq!(game.language(), Language::Arabic);

    game.set_language(Language::Chinese);
    assert_eq!(game.hud().text(), "收集钥匙，打开宝箱，即可获胜");
}

#[test]
fn test_initial_hint_points_at_key() {
    let game = playing();
    assert_eq!(game.hud().hint(), game.text("hint_key"));
}

#[test]
fn test_player_lands_and_jumps() {
    let mut game = playing();
    run(&mut game, 5);
    assert!(is_grounded(&game));

    assert!(game.key_down(" "));
    run(&mut game, 1);
    assert!(!is_grounded(&game));
    assert!(game.scene().player().unwrap().body.velocity.y > 0.0);

    // holding jump while airborne changes nothing
    run(&mut game, 5);
    assert!(!is_grounded(&game));
    assert!(position_of(&game, "blue").y < game.scene().player().unwrap().position().y);

    assert!(game.key_up("Space"));
    run(&mut game, 120);
    assert!(is_grounded(&game));
    assert_close(game.scene().player().unwrap().position().y, -3.0, 1e-2);
}

#[test]
fn test_walking_right() {
    let mut game = playing();
    assert!(game.key_down("d"));
    assert!(!game.key_down("q"));
    assert!(game.input().right && !game.input().left);
    run(&mut game, 30);
    let player = game.scene().player().unwrap().position();
    assert!(player.x > 0.5, "player at {:?}", player);
    assert_close(player.z, 0.0, 1e-4);
    assert_eq!(game.ticks(), 30);

    assert!(game.key_up("D"));
    assert_eq!(*game.input(), InputFlags::default());
}

#[test]
fn test_hud_refresh_only_on_change() {
    let mut game = new_game();
    assert!(game.hud().require_refresh);
    game.hud_mut().require_refresh = false;

    run(&mut game, 3);
    assert!(!game.hud().require_refresh);

    game.start(Language::English);
    assert!(game.hud().require_refresh);
    game.hud_mut().require_refresh = false;

    // the headline and the key hint stay the same while the player settles
    run(&mut game, 3);
    assert!(!game.hud().require_refresh);

    game.set_language(Language::Chinese);
    assert!(game.hud().require_refresh);
}

#[test]
fn test_pick_up_key() {
    let mut game = playing();
    assert_eq!(click_on(&mut game, "key"), Pick::Key);

    assert!(game.has_key());
    assert!(game.scene().get_game_object_by_name("key").is_none());
    assert_eq!(last_message(&game), game.text("key_picked"));
    assert_eq!(game.log().last().map(|(_, class)| *class), Some(MsgClass::Event));
    // the door is within reach, and the key hint no longer applies
    assert_eq!(game.hud().hint(), game.text("hint_door_unlocked"));
}

#[test]
fn test_click_on_nothing() {
    let mut game = playing();
    assert_eq!(game.click(Vector2::new(0.99, 0.99)).unwrap(), Pick::Nothing);
    assert!(!game.has_key());
}

#[test]
fn test_chest_without_key() {
    let mut game = playing();
    assert_eq!(click_on(&mut game, "chest"), Pick::ChestLocked);
    assert_eq!(last_message(&game), game.text("chest_locked"));
    assert_eq!(game.run_state(), RunState::Playing);
    assert_eq!(game.stage(), 0);
}

#[test]
fn test_chest_with_key_enters_next_stage() {
    let mut game = playing();
    let last_old_id = *game.scene().ids().last().unwrap();

    click_on(&mut game, "key");
    assert_eq!(click_on(&mut game, "chest"), Pick::ChestOpened);

    assert_eq!(game.stage(), 1);
    assert_eq!(game.run_state(), RunState::Playing);
    assert!(!game.has_key());
    assert_close(game.camera_offset_x(), 0.0, f32::EPSILON);
    assert_eq!(game.scene().len(), 5);
    assert!(game.scene().ids().iter().all(|id| *id > last_old_id));
    assert!(game.scene().get_game_object_by_name("orange").is_some());
    assert!(game.scene().get_game_object_by_name("blue").is_none());
    assert!(has_message(&game, "stage_complete"));
    assert_eq!(game.hud().text(), game.text("goal"));
}

#[test]
fn test_chest_on_last_stage_wins() {
    let mut game = playing();
    click_on(&mut game, "key");
    click_on(&mut game, "chest");
    game.key_down("d");
    run(&mut game, 10);

    click_on(&mut game, "key");
    assert_eq!(click_on(&mut game, "chest"), Pick::ChestOpened);

    assert_eq!(game.run_state(), RunState::Won);
    assert_eq!(game.hud().text(), game.text("won"));
    assert!(has_message(&game, "chest_opened"));
    let scene = game.scene();
    assert_eq!(scene.player().unwrap().body.velocity, Vector3::new(0.0, 0.0, 0.0));
    let orange = scene.get_game_object_by_name("orange").unwrap();
    assert_eq!(orange.body.velocity, Vector3::new(0.0, 0.0, 0.0));

    // the world stands still once the game is over
    let ticks = game.ticks();
    run(&mut game, 10);
    assert_eq!(game.ticks(), ticks);
}

#[test]
fn test_locked_door_blocks_the_way() {
    let mut game = playing();
    game.key_down("a");
    run(&mut game, 90);

    assert!(game.scene().get_game_object_by_name("door").is_some());
    let player = game.scene().player().unwrap().position();
    assert!(player.x > -0.51, "player walked into the door: {:?}", player);
}

#[test]
fn test_door_opens_with_key() {
    let mut game = playing();
    click_on(&mut game, "key");
    game.key_down("a");
    run(&mut game, 90);

    assert!(game.scene().get_game_object_by_name("door").is_none());
    assert!(has_message(&game, "door_unlocked"));

    run(&mut game, 60);
    assert!(game.scene().player().unwrap().position().x < -1.0);
}

#[test]
fn test_locked_door_hint() {
    let mut game = playing();
    let key = game.scene().id_of("key").unwrap();
    game.scene_mut().remove_game_object(key);
    run(&mut game, 1);
    assert_eq!(game.hud().hint(), game.text("hint_door_locked"));
}

#[test]
fn test_lose_when_guarded_object_leaves_bounds() {
    let mut game = playing();
    game.scene_mut()
        .get_game_object_by_name_mut("blue")
        .unwrap()
        .body
        .position
        .x = 12.0;
    run(&mut game, 1);

    assert_eq!(game.run_state(), RunState::Lost);
    assert_eq!(game.hud().text(), game.text("lost"));
    let ticks = game.ticks();
    run(&mut game, 5);
    assert_eq!(game.ticks(), ticks);
}

#[test]
fn test_bounds_do_not_follow_the_camera() {
    let mut game = playing();
    game.scene_mut().player_mut().unwrap().body.position = Vector3::new(9.5, -3.0, 0.0);
    run(&mut game, 1);
    assert_close(game.camera_offset_x(), 18.0, f32::EPSILON);
    assert_eq!(game.run_state(), RunState::Playing);

    // inside the room the camera now shows, but outside the playfield
    game.scene_mut()
        .get_game_object_by_name_mut("blue")
        .unwrap()
        .body
        .position
        .x = 12.0;
    run(&mut game, 1);
    assert_eq!(game.run_state(), RunState::Lost);
}

#[test]
fn test_camera_follows_player_between_rooms() {
    let mut game = playing();
    let teleport = |game: &mut Game, x: f32| {
        game.scene_mut().player_mut().unwrap().body.position = Vector3::new(x, -3.0, 0.0);
        run(game, 1);
    };

    teleport(&mut game, 9.5);
    assert_close(game.camera_offset_x(), 18.0, f32::EPSILON);
    assert_close(game.camera().position.x, 18.0, f32::EPSILON);

    teleport(&mut game, 12.0);
    assert_close(game.camera_offset_x(), 18.0, f32::EPSILON);

    teleport(&mut game, 8.0);
    assert_close(game.camera_offset_x(), 0.0, f32::EPSILON);

    teleport(&mut game, -9.5);
    assert_close(game.camera_offset_x(), -18.0, f32::EPSILON);
}

#[test]
fn test_save_and_load_round_trip() {
    let mut storage = MemoryStorage::new();

    let mut first = new_game();
    first.start(Language::Arabic);
    click_on(&mut first, "key");
    first.scene_mut().player_mut().unwrap().body.position = Vector3::new(9.5, -3.0, 0.0);
    first.key_down("d");
    run(&mut first, 3);
    first.save(&mut storage).unwrap();
    let saved = first.save_state();
    assert!(saved.has_key);
    assert_close(saved.camera_offset_x, 18.0, f32::EPSILON);
    assert_eq!(saved.cubes.len(), 2);

    let mut second = playing();
    run(&mut second, 10);
    assert!(second.load(&storage).unwrap());

    assert_eq!(second.save_state(), saved);
    assert_eq!(second.language(), Language::Arabic);
    assert!(second.has_key());
    assert!(second.scene().get_game_object_by_name("key").is_none());
    assert_close(second.camera().position.x, 18.0, f32::EPSILON);
    assert_eq!(second.run_state(), RunState::Playing);
    assert_eq!(last_message(&second), second.text("loaded"));
}

#[test]
fn test_save_and_load_later_stage() {
    let mut storage = MemoryStorage::new();
    let mut first = playing();
    click_on(&mut first, "key");
    click_on(&mut first, "chest");
    run(&mut first, 20);
    first.save(&mut storage).unwrap();

    let mut second = new_game();
    assert!(second.load(&storage).unwrap());
    assert_eq!(second.stage(), 1);
    assert_eq!(second.save_state(), first.save_state());
}

#[test]
fn test_load_without_save() {
    let storage = MemoryStorage::new();
    let mut game = playing();
    run(&mut game, 10);
    let before = game.save_state();

    assert!(!game.load(&storage).unwrap());
    assert_eq!(game.save_state(), before);
    assert_eq!(last_message(&game), game.text("no_save"));
    assert_eq!(game.run_state(), RunState::Playing);
}

#[test]
fn test_load_rejects_save_of_other_layout() {
    let mut storage = MemoryStorage::new();
    let foreign = SaveState {
        stage: 0,
        player: [0.0, 0.0, 0.0],
        cubes: vec![[1.0, 1.0, 1.0]],
        has_key: false,
        camera_offset_x: 0.0,
        language: Language::English,
    };
    save_game(&mut storage, &foreign).unwrap();

    let mut game = playing();
    let before = game.save_state();
    assert!(matches!(game.load(&storage), Err(GameError::SaveMismatch(_))));
    assert_eq!(game.save_state(), before);

    let missing_stage = SaveState { stage: 7, ..foreign };
    save_game(&mut storage, &missing_stage).unwrap();
    assert!(matches!(game.load(&storage), Err(GameError::SaveMismatch(_))));
}

#[test]
fn test_game_needs_a_stage() {
    assert!(matches!(Game::new(Vec::new()), Err(GameError::Config(_))));
}

#[test]
fn test_builtin_game_runs() {
    let mut game = Game::with_builtin_stages().unwrap();
    game.start(Language::English);
    game.key_down("d");
    run(&mut game, 120);
    assert_eq!(game.run_state(), RunState::Playing);
    assert_eq!(game.ticks(), 120);
}
