use cgmath::{Point2, Point3};
use noise::Constant;
use voxel_explorer::{
    Block, BlockType, CollisionResolver, Mode, Player, TerrainGenerator, VoxelField,
};
use winit::{event::ElementState, keyboard::KeyCode};

/// Flat ground whose top layer is y = 50 across the 3x3 chunks around the origin.
fn flat_world() -> VoxelField {
    let mut field = VoxelField::new();
    TerrainGenerator::new(Constant::new(0.0)).spawn_area(&mut field, Point2::new(0, 0), 1);
    field
}

fn tick_until_grounded(player: &mut Player, field: &VoxelField, limit: usize) -> usize {
    for tick in 1..=limit {
        player.tick(field);
        if player.is_grounded() {
            return tick;
        }
    }
    panic!("player never landed, eye at {:?}", player.eye());
}

#[test]
fn standing_on_a_column_is_grounded() {
    let mut field = VoxelField::new();
    for y in 48..=50 {
        field.set_block(0, y, 0, Block::new(BlockType::DIRT)).unwrap();
    }
    let resolver = CollisionResolver::default();
    let eye = Point3::new(0.0, 51.7, 0.0);

    assert!(resolver.is_grounded(&field, eye));
    assert!(resolver.find_collisions(&field, eye).contains(&Point3::new(0, 50, 0)));
}

#[test]
fn falling_player_lands_on_the_surface() {
    let field = flat_world();
    let mut player = Player::new(Point3::new(3.5, 60.0, 3.5), Mode::Survival);

    tick_until_grounded(&mut player, &field, 200);

    // Feet within the top block's span: the eye is at most 1.75 above y = 51.
    let eye = player.eye();
    assert!(eye.y <= 52.75 && eye.y > 52.0, "landed with eye at {}", eye.y);

    player.tick(&field);
    player.tick(&field);
    assert_eq!(player.eye(), eye);
    assert!(player.is_grounded());
}

#[test]
fn jump_then_land_again() {
    let field = flat_world();
    let mut player = Player::new(Point3::new(0.5, 55.0, 0.5), Mode::Survival);
    tick_until_grounded(&mut player, &field, 200);
    let rest_height = player.eye().y;

    player.handle_key(KeyCode::Space, ElementState::Pressed);
    assert!(!player.is_grounded());
    assert_eq!(player.velocity(), 0.2);

    player.tick(&field);
    assert!(player.eye().y > rest_height);

    tick_until_grounded(&mut player, &field, 200);
    assert!(player.eye().y <= 52.75);
}

#[test]
fn creative_flight_ignores_gravity_until_toggled() {
    let field = flat_world();
    let mut player = Player::new(Point3::new(0.5, 70.0, 0.5), Mode::Creative);

    for _ in 0..30 {
        player.tick(&field);
    }
    assert_eq!(player.eye().y, 70.0);

    player.handle_key(KeyCode::KeyF, ElementState::Released);
    assert_eq!(player.mode(), Mode::Survival);
    player.tick(&field);
    assert!(player.eye().y < 70.0);

    player.handle_key(KeyCode::KeyF, ElementState::Released);
    assert_eq!(player.mode(), Mode::Creative);
    assert_eq!(player.velocity(), 0.0);
}

#[test]
fn player_outside_generated_chunks_keeps_falling() {
    let field = flat_world();
    let mut player = Player::new(Point3::new(500.5, 52.0, 500.5), Mode::Survival);

    for _ in 0..120 {
        player.tick(&field);
    }
    assert!(!player.is_grounded());
    assert!(player.eye().y < 52.0);
}
