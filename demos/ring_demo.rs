use halo::{Color, Ring, RingCommand, RingConfig, Symbol};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), halo::RingError> {
    env_logger::init();

    let config = RingConfig::builder()
        .title("halo".to_string())
        .line_width(14.0)
        .start_color(Color::new(0xff, 0x2d, 0x55))
        .end_color(Color::new(0xff, 0x9f, 0x0a))
        .placeholder_color(Color::new(0x2c, 0x2c, 0x2e))
        .head_shadow_radius(8.0)
        .symbol(Symbol::arrow(18.0, Color::new(0xff, 0xff, 0xff)))
        .symbol_rotates(true)
        .background_color(Color::new(0x1c, 0x1c, 0x1e))
        .build();

    let mut ring = Ring::new(config);

    // Drive the ring from a worker thread over a channel
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut target = 0.0_f64;
        loop {
            target = if target > 2.0 {
                0.0
            } else {
                target + rng.random_range(0.05..0.25)
            };
            if sender.send(RingCommand::SetProgress(target)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(400));
        }
    });

    println!("Displaying gradient progress ring:");
    println!("- progress climbs randomly and past 100% to show overflow laps");
    println!("- the arrow symbol rides the head of the sweep");
    println!("Press Ctrl+C to exit");

    ring.show_with_commands(receiver)
}
