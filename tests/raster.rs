use halo::{compose, render_scene, Canvas, Color, Environment, RingConfig, Srgb, Symbol};

fn rendered_frame(size: usize, config: &RingConfig, progress: f64) -> Vec<u8> {
    let scene = compose(
        size as f64,
        size as f64,
        config,
        progress,
        &Srgb,
        &Environment::default(),
    );
    let mut frame = vec![0u8; size * size * 4];
    let mut canvas = Canvas::new(&mut frame, size, size);
    render_scene(&mut canvas, &scene, config);
    frame
}

fn painted_pixels(frame: &[u8]) -> usize {
    frame
        .chunks_exact(4)
        .filter(|px| px.iter().any(|&b| b != 0))
        .count()
}

#[test]
fn a_valid_scene_paints_pixels() {
    let config = RingConfig::builder().line_width(10.0).build();
    let frame = rendered_frame(64, &config, 0.75);
    assert!(painted_pixels(&frame) > 0);
}

#[test]
fn a_degenerate_scene_leaves_the_frame_untouched() {
    let config = RingConfig::builder().build();
    let frame = rendered_frame(8, &config, 0.75);
    assert_eq!(painted_pixels(&frame), 0);
}

#[test]
fn the_track_adds_coverage_beyond_the_sweep() {
    let bare = RingConfig::builder().line_width(10.0).build();
    let tracked = RingConfig::builder()
        .line_width(10.0)
        .placeholder_color(Color::new(60, 60, 60))
        .build();
    let without = painted_pixels(&rendered_frame(64, &bare, 0.25));
    let with = painted_pixels(&rendered_frame(64, &tracked, 0.25));
    assert!(with > without);
}

#[test]
fn the_symbol_is_stamped_at_the_head() {
    let bare = RingConfig::builder().line_width(6.0).build();
    let marked = RingConfig::builder()
        .line_width(6.0)
        .symbol(Symbol::dot(12.0, Color::new(255, 255, 255)))
        .build();
    let without = painted_pixels(&rendered_frame(96, &bare, 0.5));
    let with = painted_pixels(&rendered_frame(96, &marked, 0.5));
    assert!(with > without);
}

#[test]
fn the_rigid_rotation_moves_the_head() {
    // With no rotation a 25% sweep ends at the bottom of the ring; the
    // default -90 rotation moves that head a quarter turn back.
    let unrotated = RingConfig::builder()
        .line_width(8.0)
        .rotation_degrees(0.0)
        .build();
    let rotated = RingConfig::builder()
        .line_width(8.0)
        .rotation_degrees(-90.0)
        .build();
    let a = rendered_frame(96, &unrotated, 0.25);
    let b = rendered_frame(96, &rotated, 0.25);
    assert_ne!(a, b);
    assert!(painted_pixels(&a) > 0);
    assert!(painted_pixels(&b) > 0);
}
