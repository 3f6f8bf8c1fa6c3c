//! Collision view driven end to end over small hand-built scenes.

use std::collections::HashSet;
use std::sync::Arc;

use colview_core::classify::{HOOKSHOT, LOADING, PLAIN};
use colview_core::gfx::{Command, DisplayList, Rgba};
use colview_core::{CollisionView, DebugView, FrameLists, ViewState};
use colview_shared::{
    CollisionHeader, CollisionPoly, CollisionViewSettings, DynamicSlot, GameState, LIST_END,
    PolyListNode, SurfaceType, Vec3s,
};

const UP: Vec3s = Vec3s::new(0, 0x7FFF, 0);

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn square_floor() -> CollisionHeader {
    CollisionHeader {
        vertices: vec![
            Vec3s::new(0, 0, 0),
            Vec3s::new(100, 0, 0),
            Vec3s::new(100, 0, 100),
            Vec3s::new(0, 0, 100),
        ],
        polys: vec![
            CollisionPoly::new(0, 0, 1, 2, UP),
            CollisionPoly::new(1, 0, 2, 3, UP),
        ],
        surface_types: vec![
            SurfaceType::default(),
            SurfaceType {
                hookshot: true,
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

fn game(header: CollisionHeader) -> GameState {
    let mut game = GameState {
        in_game: true,
        ..Default::default()
    };
    game.collision.header = header;
    game
}

fn run(game: &GameState, settings: &CollisionViewSettings) -> CollisionView {
    init_logging();
    let mut frame = FrameLists::new(64);
    let mut view = CollisionView::new();
    view.start();
    view.update(game, settings, &mut frame);
    assert_eq!(view.state(), ViewState::Active);
    view
}

fn colors(list: &DisplayList) -> Vec<Rgba> {
    list.commands()
        .iter()
        .filter_map(|c| match c {
            Command::SetPrimColor(color) => Some(*color),
            _ => None,
        })
        .collect()
}

/// World-space endpoints of every line in a wireframe list
fn lines(list: &DisplayList) -> Vec<([i16; 3], [i16; 3])> {
    let mut cache = [[0i16; 3]; 32];
    let mut out = Vec::new();
    for cmd in list.commands() {
        match cmd {
            Command::Vertex { data, v0, .. } => {
                for (i, v) in list.vertices(*data).iter().enumerate() {
                    cache[*v0 as usize + i] = v.ob;
                }
            }
            Command::Line3d(a, b) => out.push((cache[*a as usize], cache[*b as usize])),
            _ => {}
        }
    }
    out
}

fn unique_edges(lines: &[([i16; 3], [i16; 3])]) -> HashSet<([i16; 3], [i16; 3])> {
    lines
        .iter()
        .map(|&(a, b)| if a <= b { (a, b) } else { (b, a) })
        .collect()
}

#[test]
fn static_polys_take_classified_colors() {
    let view = run(&game(square_floor()), &CollisionViewSettings::default());
    let Some(list) = view.static_poly_list() else {
        panic!("expected static list");
    };
    assert_eq!(colors(list), vec![Rgba::TRANSPARENT, PLAIN, HOOKSHOT]);
    assert_eq!(list.commands().last(), Some(&Command::EndDisplayList));
}

#[test]
fn restricted_only_hides_plain_surfaces() {
    let settings = CollisionViewSettings {
        restricted_only: true,
        wireframe: true,
        ..Default::default()
    };
    let view = run(&game(square_floor()), &settings);
    let (Some(polys), Some(wire)) = (view.static_poly_list(), view.static_line_list()) else {
        panic!("expected static lists");
    };
    assert_eq!(colors(polys), vec![Rgba::TRANSPARENT, HOOKSHOT]);
    // Outlines are kept for hidden polygons
    assert_eq!(unique_edges(&lines(wire)).len(), 5);
}

#[test]
fn shared_edges_are_not_repeated() {
    let mut header = square_floor();
    // Same triangle again: every edge is already drawn
    header.polys.push(CollisionPoly::new(0, 2, 1, 0, UP));
    let settings = CollisionViewSettings {
        wireframe: true,
        ..Default::default()
    };
    let view = run(&game(header), &settings);
    let Some(wire) = view.static_line_list() else {
        panic!("expected wireframe list");
    };
    let drawn = lines(wire);
    assert_eq!(drawn.len(), 6);
    assert_eq!(unique_edges(&drawn).len(), 5);
}

#[test]
fn dynamic_lists_follow_active_slots() {
    let mut game = game(CollisionHeader::default());
    let exit = Arc::new(CollisionHeader {
        surface_types: vec![SurfaceType {
            exit: 1,
            ..Default::default()
        }],
        ..Default::default()
    });
    let collision = &mut game.collision;
    collision.dyn_vertices = vec![
        Vec3s::new(0, 50, 0),
        Vec3s::new(10, 50, 0),
        Vec3s::new(0, 50, 10),
    ];
    collision.dyn_polys = vec![CollisionPoly::new(0, 0, 1, 2, UP); 2];
    collision.dyn_lists = vec![
        PolyListNode { poly: 0, next: 1 },
        PolyListNode {
            poly: 1,
            next: LIST_END,
        },
    ];
    collision.dyn_slots = vec![
        DynamicSlot {
            active: true,
            header: exit.clone(),
            floor_list: 0,
            ..Default::default()
        },
        DynamicSlot {
            active: false,
            header: exit,
            wall_list: 0,
            ..Default::default()
        },
    ];

    let view = run(&game, &CollisionViewSettings::default());
    let Some(list) = view.dyn_poly_list() else {
        panic!("expected dynamic list");
    };
    assert_eq!(colors(list), vec![Rgba::TRANSPARENT, LOADING]);
    assert_eq!(
        list.commands()
            .iter()
            .filter(|c| matches!(c, Command::Triangle2(..)))
            .count(),
        1
    );
    assert!(list.capacity() >= colview_core::view::DYN_MIN_CAPACITY);
}

#[test]
fn missing_vertices_are_skipped() {
    let mut header = square_floor();
    header.polys.push(CollisionPoly::new(0, 0, 1, 99, UP));
    let view = run(&game(header), &CollisionViewSettings::default());
    let Some(list) = view.static_poly_list() else {
        panic!("expected static list");
    };
    let tris: usize = list
        .commands()
        .iter()
        .map(|c| match c {
            Command::Triangle1(_) => 1,
            Command::Triangle2(..) => 2,
            _ => 0,
        })
        .sum();
    assert_eq!(tris, 2);
}
