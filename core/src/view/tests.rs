use colview_shared::{
    Collider, CollisionHeader, CollisionPoly, CollisionViewSettings, GameState,
    HitboxViewSettings, SphereElement, Vec3s, ViewSettings,
};

use super::*;
use crate::gfx::Command;
use crate::sink::{FrameLists, RenderPass};

fn scene() -> GameState {
    let up = Vec3s::new(0, 0x7FFF, 0);
    let mut game = GameState {
        in_game: true,
        scene_index: 7,
        ..Default::default()
    };
    game.collision.header = CollisionHeader {
        vertices: vec![
            Vec3s::new(0, 0, 0),
            Vec3s::new(100, 0, 0),
            Vec3s::new(100, 0, 100),
            Vec3s::new(0, 0, 100),
        ],
        polys: vec![
            CollisionPoly::new(0, 0, 1, 2, up),
            CollisionPoly::new(0, 0, 2, 3, up),
        ],
        ..Default::default()
    };
    game.hitboxes.oc.push(Collider::SphereList(vec![SphereElement {
        center: Vec3s::new(0, 40, 0),
        radius: 20,
    }]));
    game
}

fn list_calls(frame: &FrameLists, pass: RenderPass) -> usize {
    frame
        .pass(pass)
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::DisplayList(_)))
        .count()
}

#[test]
fn test_state_requests() {
    let mut state = ViewState::Inactive;
    state.request_stop("test");
    assert_eq!(state, ViewState::Inactive);

    state.request_start("test");
    assert_eq!(state, ViewState::Start);
    // Stopping before anything was allocated goes straight back
    state.request_stop("test");
    assert_eq!(state, ViewState::Inactive);

    state = ViewState::Active;
    state.request_start("test");
    assert_eq!(state, ViewState::Active);
    state.request_stop("test");
    assert_eq!(state, ViewState::BeginStop);

    state = ViewState::Restart;
    state.request_stop("test");
    assert_eq!(state, ViewState::Stop);
}

#[test]
fn test_advance() {
    let mut state = ViewState::BeginStop;
    assert!(!state.advance("test"));
    assert_eq!(state, ViewState::Stop);
    assert!(state.advance("test"));
    assert_eq!(state, ViewState::Inactive);
    assert!(!state.advance("test"));

    state = ViewState::BeginRestart;
    assert!(!state.advance("test"));
    assert_eq!(state, ViewState::Restart);
    assert!(state.advance("test"));
    assert_eq!(state, ViewState::Restart);
}

#[test]
fn test_stop_releases_after_two_frames() {
    let game = scene();
    let settings = HitboxViewSettings::default();
    let mut frame = FrameLists::new(16);
    let mut view = HitboxView::new();

    view.start();
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Active);
    assert!(view.is_allocated());

    view.stop();
    assert_eq!(view.state(), ViewState::BeginStop);

    frame.clear();
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Stop);
    assert!(view.is_allocated());
    assert_eq!(list_calls(&frame, RenderPass::Translucent), 0);

    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Inactive);
    assert!(!view.is_allocated());

    // A fresh start allocates again
    view.start();
    view.update(&game, &settings, &mut frame);
    assert!(view.is_allocated());
    assert_eq!(list_calls(&frame, RenderPass::Translucent), 1);
}

#[test]
fn test_paused_game_defers_start() {
    let mut game = scene();
    game.paused = true;
    let settings = HitboxViewSettings::default();
    let mut frame = FrameLists::new(16);
    let mut view = HitboxView::new();

    view.start();
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Start);
    assert!(!view.is_allocated());
    assert!(frame.translucent().is_empty());

    game.paused = false;
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Active);
    assert_eq!(list_calls(&frame, RenderPass::Translucent), 1);
}

#[test]
fn test_double_buffer_alternates() {
    let game = scene();
    let settings = HitboxViewSettings {
        translucent: false,
        ..Default::default()
    };
    let mut frame = FrameLists::new(16);
    let mut view = HitboxView::new();
    view.start();

    let mut lists = Vec::new();
    for _ in 0..3 {
        frame.clear();
        view.update(&game, &settings, &mut frame);
        lists.push(view.current_list().cloned());
    }
    assert_ne!(lists[0], lists[1]);
    assert_ne!(lists[1], lists[2]);
    assert_eq!(list_calls(&frame, RenderPass::Opaque), 1);
}

#[test]
fn test_sink_holding_lists_forces_reallocation() {
    let game = scene();
    let settings = HitboxViewSettings::default();
    let mut frame = FrameLists::new(16);
    let mut view = HitboxView::new();
    view.start();

    for _ in 0..4 {
        view.update(&game, &settings, &mut frame);
    }
    // Every call stays valid because the sink keeps its own handle
    assert_eq!(list_calls(&frame, RenderPass::Translucent), 4);
    for cmd in frame.translucent().commands() {
        let Command::DisplayList(list) = cmd else {
            panic!("unexpected command {cmd:?}");
        };
        assert_eq!(list.commands().last(), Some(&Command::EndDisplayList));
    }
}

#[test]
fn test_sync_follows_setting() {
    let mut view = HitboxView::new();
    view.sync(false);
    assert_eq!(view.state(), ViewState::Inactive);
    view.sync(true);
    assert_eq!(view.state(), ViewState::Start);
    view.sync(true);
    assert_eq!(view.state(), ViewState::Start);
    view.sync(false);
    assert_eq!(view.state(), ViewState::Inactive);
}

#[test]
fn test_collision_draws_static_and_dynamic() {
    let game = scene();
    let settings = CollisionViewSettings::default();
    let mut frame = FrameLists::new(64);
    let mut view = CollisionView::new();

    view.start();
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Active);

    let (Some(static_poly), Some(dyn_poly)) = (view.static_poly_list(), view.dyn_poly_list())
    else {
        panic!("expected lists");
    };
    let calls: Vec<&Command> = frame
        .translucent()
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::DisplayList(_)))
        .collect();
    assert_eq!(
        calls,
        vec![
            &Command::DisplayList(static_poly.clone()),
            &Command::DisplayList(dyn_poly.clone()),
        ]
    );
    assert!(view.static_line_list().is_none());
    assert!(!frame.translucent().commands().contains(&Command::LoadLineMicrocode));
}

#[test]
fn test_collision_restart_on_wireframe_toggle() {
    let game = scene();
    let mut settings = CollisionViewSettings::default();
    let mut frame = FrameLists::new(64);
    let mut view = CollisionView::new();

    view.start();
    view.update(&game, &settings, &mut frame);
    let first = view.static_poly_list().cloned();

    settings.wireframe = true;
    frame.clear();
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Restart);
    assert!(frame.translucent().is_empty());

    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Active);
    assert_ne!(view.static_poly_list().cloned(), first);
    assert!(view.static_line_list().is_some());
    assert!(view.dyn_line_list().is_some());
    assert!(frame.translucent().commands().contains(&Command::LoadLineMicrocode));
}

#[test]
fn test_collision_restart_on_scene_change() {
    let mut game = scene();
    let settings = CollisionViewSettings {
        update_continuously: false,
        ..Default::default()
    };
    let mut frame = FrameLists::new(64);
    let mut view = CollisionView::new();

    view.start();
    view.update(&game, &settings, &mut frame);
    let dyn_first = view.dyn_poly_list().cloned();

    // Without continuous update the dynamic list is kept
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.dyn_poly_list().cloned(), dyn_first);

    game.scene_index += 1;
    view.update(&game, &settings, &mut frame);
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Active);
    assert_ne!(view.dyn_poly_list().cloned(), dyn_first);
}

#[test]
fn test_collision_stop_releases_everything() {
    let game = scene();
    let settings = CollisionViewSettings {
        wireframe: true,
        ..Default::default()
    };
    let mut frame = FrameLists::new(64);
    let mut view = CollisionView::new();

    view.start();
    view.update(&game, &settings, &mut frame);
    view.stop();
    view.update(&game, &settings, &mut frame);
    assert!(view.is_allocated());
    view.update(&game, &settings, &mut frame);
    assert!(!view.is_allocated());
    assert!(view.static_poly_list().is_none());
    assert!(view.static_line_list().is_none());
}

#[test]
fn test_collision_stop_during_restart() {
    let mut game = scene();
    let settings = CollisionViewSettings::default();
    let mut frame = FrameLists::new(64);
    let mut view = CollisionView::new();

    view.start();
    view.update(&game, &settings, &mut frame);
    game.scene_index += 1;
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Restart);

    view.stop();
    assert_eq!(view.state(), ViewState::Stop);
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Inactive);
    assert!(!view.is_allocated());
    assert!(view.static_poly_list().is_none());
    assert!(view.dyn_poly_list().is_none());

    frame.clear();
    view.start();
    view.update(&game, &settings, &mut frame);
    assert_eq!(view.state(), ViewState::Active);
    assert!(view.is_allocated());
    assert_eq!(list_calls(&frame, RenderPass::Translucent), 2);
}

#[test]
fn test_collision_stop_during_begin_restart() {
    let mut state = ViewState::BeginRestart;
    state.request_stop("test");
    assert_eq!(state, ViewState::BeginStop);
    assert!(!state.advance("test"));
    assert!(state.advance("test"));
    assert_eq!(state, ViewState::Inactive);
}

#[test]
fn test_view_set_drives_enabled_views() {
    let game = scene();
    let mut settings = ViewSettings::default();
    settings.collision.enabled = true;
    settings.hitbox.enabled = true;
    settings.hitbox.translucent = false;

    let mut frame = FrameLists::new(64);
    let mut views = ViewSet::new();
    views.update(&game, &settings, &mut frame);

    assert_eq!(views.collision.state(), ViewState::Active);
    assert_eq!(views.hitbox.state(), ViewState::Active);
    assert_eq!(views.path.state(), ViewState::Inactive);
    assert_eq!(views.water.state(), ViewState::Inactive);
    assert_eq!(list_calls(&frame, RenderPass::Opaque), 1);
    assert_eq!(list_calls(&frame, RenderPass::Translucent), 2);

    views.stop_all();
    for _ in 0..2 {
        frame.clear();
        views.update(&game, &ViewSettings::default(), &mut frame);
    }
    assert!(!views.collision.is_allocated());
    assert!(!views.hitbox.is_allocated());
    assert!(frame.opaque().is_empty());
}
